//! Line content: a path through consecutive points, broken at gaps, with a
//! glyph on every point.

use super::{convert_points, project, Content, ContentFrame, GraphData, PointNodes};
use crate::context::GraphContext;
use crate::glyph::GLYPH_SIZE;
use crate::svg::{Element, NodeId};
use cgraph_common::{format_px, Result};
use cgraph_config::defaults::DEFAULT_CONTENT_COLOR;
use cgraph_config::{validate_content, ContentConfig, ContentInput};
use std::fmt::Write;

/// Line series.
#[derive(Debug)]
pub struct Line {
    config: ContentConfig,
    frame: ContentFrame,
    path: Option<NodeId>,
    points: PointNodes,
}

impl Line {
    /// Validates input into a line.
    pub fn new(input: &ContentInput) -> Result<Self> {
        Ok(Self::from_config(validate_content(
            input,
            DEFAULT_CONTENT_COLOR,
        )?))
    }

    /// Wraps an already validated configuration.
    pub fn from_config(config: ContentConfig) -> Self {
        Self {
            config,
            frame: ContentFrame::default(),
            path: None,
            points: PointNodes::default(),
        }
    }

    /// Rendered point glyphs.
    pub const fn points(&self) -> &PointNodes {
        &self.points
    }

    /// Path data; each run of non-gap points becomes its own subpath.
    fn path_data(&self, ctx: &GraphContext) -> String {
        let mut data = String::new();
        let mut pen_down = false;
        for point in &self.config.values {
            match project(ctx, &self.config, point) {
                Some((x, y)) => {
                    let command = if pen_down { 'L' } else { 'M' };
                    let _ = write!(data, "{command}{},{}", format_px(x), format_px(y));
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
        data
    }

    fn render(&mut self, ctx: &mut GraphContext) {
        let Some(group) = self.frame.group else {
            return;
        };
        if !ctx.config.is_shown(&self.config.key) {
            return;
        }
        let data = self.path_data(ctx);
        self.path = ctx.document.append(
            group,
            Element::new("path")
                .class("cgraph-line")
                .attr("d", data)
                .attr("stroke", self.config.color.clone())
                .attr("fill", "none"),
        );
        self.points
            .render(ctx, group, &self.config, |_| GLYPH_SIZE);
    }
}

impl Content for Line {
    fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn kind(&self) -> &'static str {
        "line"
    }

    fn load(&mut self, ctx: &mut GraphContext) -> Result<()> {
        self.frame = ContentFrame::attach(ctx, &self.config, self.kind());
        self.render(ctx);
        Ok(())
    }

    fn unload(&mut self, ctx: &mut GraphContext) {
        self.frame.detach(ctx, &self.config.key);
        self.path = None;
        self.points.clear();
    }

    fn resize(&mut self, ctx: &mut GraphContext) {
        if let Some(path) = self.path {
            let data = self.path_data(ctx);
            ctx.document.set_attr(path, "d", data);
        }
        self.points.reposition(ctx, &self.config);
        self.frame.reposition(ctx, &self.config);
    }

    fn reflow(&mut self, ctx: &mut GraphContext, data: &GraphData) -> Result<()> {
        self.config.values = convert_points(&data.values, ctx.config.axis.x.axis_type)?;
        let Some(group) = self.frame.group else {
            return Ok(());
        };
        if self.path.is_none() {
            return Ok(());
        }
        self.resize(ctx);
        self.points
            .sync(ctx, group, &self.config, |_| GLYPH_SIZE);
        Ok(())
    }

    fn redraw(&mut self, ctx: &mut GraphContext) {
        self.frame.clear(ctx);
        self.path = None;
        self.points.clear();
        self.render(ctx);
        self.frame.reposition(ctx, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, input};
    use super::*;
    use cgraph_config::PointInput;

    #[test]
    fn test_load_renders_path_and_points() {
        let mut ctx = context();
        let mut line = Line::new(&input("uid_1", &[(10.0, Some(5.0)), (20.0, Some(10.0))])).unwrap();
        line.load(&mut ctx).unwrap();

        assert_eq!(line.points().len(), 2);
        let path = line.path.unwrap();
        assert!(ctx.document.attr(path, "d").unwrap().starts_with('M'));
    }

    #[test]
    fn test_gap_starts_new_subpath() {
        let mut ctx = context();
        let mut line = Line::new(&input(
            "uid_1",
            &[(10.0, Some(5.0)), (20.0, None), (30.0, Some(8.0))],
        ))
        .unwrap();
        line.load(&mut ctx).unwrap();

        let d = ctx.document.attr(line.path.unwrap(), "d").unwrap();
        assert_eq!(d.matches('M').count(), 2);
        assert!(!d.contains('L'));
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn test_resize_keeps_nodes() {
        let mut ctx = context();
        let mut line = Line::new(&input("uid_1", &[(10.0, Some(5.0))])).unwrap();
        line.load(&mut ctx).unwrap();
        let node = line.points().get(0).unwrap();
        let before = ctx.document.attr(node, "transform").unwrap().to_string();

        ctx.config.canvas_width = 540.0;
        ctx.rebuild_scales();
        line.resize(&mut ctx);

        assert_eq!(line.points().get(0), Some(node));
        assert_ne!(ctx.document.attr(node, "transform").unwrap(), before);
    }

    #[test]
    fn test_reflow_reuses_and_extends() {
        let mut ctx = context();
        let mut line = Line::new(&input("uid_1", &[(10.0, Some(5.0))])).unwrap();
        line.load(&mut ctx).unwrap();
        let first = line.points().get(0).unwrap();

        let data = GraphData {
            key: line.key().clone(),
            values: vec![PointInput::new(15.0, Some(6.0)), PointInput::new(25.0, Some(7.0))],
            ..GraphData::default()
        };
        line.reflow(&mut ctx, &data).unwrap();
        assert_eq!(line.points().get(0), Some(first));
        assert_eq!(line.points().len(), 2);
        assert_eq!(line.config().values.len(), 2);
    }

    #[test]
    fn test_hidden_line_draws_nothing() {
        let mut ctx = context();
        let mut line = Line::new(&input("uid_1", &[(10.0, Some(5.0))])).unwrap();
        line.load(&mut ctx).unwrap();
        ctx.config.shown_targets.clear();
        line.redraw(&mut ctx);
        assert!(line.points().is_empty());
        assert!(line.path.is_none());
    }

    #[test]
    fn test_unload_resets_state() {
        let mut ctx = context();
        let mut line = Line::new(&input("uid_1", &[(10.0, Some(5.0))])).unwrap();
        line.load(&mut ctx).unwrap();
        line.unload(&mut ctx);
        assert!(line.points().is_empty());
        assert!(line.path.is_none());
        assert!(ctx.config.shown_targets.is_empty());
    }
}
