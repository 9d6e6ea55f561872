//! Scatter content: unconnected point glyphs.

use super::{convert_points, Content, ContentFrame, GraphData, PointNodes};
use crate::context::GraphContext;
use crate::glyph::GLYPH_SIZE;
use cgraph_common::Result;
use cgraph_config::defaults::DEFAULT_CONTENT_COLOR;
use cgraph_config::{validate_content, ContentConfig, ContentInput};

/// Scatter series.
#[derive(Debug)]
pub struct Scatter {
    config: ContentConfig,
    frame: ContentFrame,
    points: PointNodes,
}

impl Scatter {
    /// Validates input into a scatter series.
    pub fn new(input: &ContentInput) -> Result<Self> {
        let config = validate_content(input, DEFAULT_CONTENT_COLOR)?;
        Ok(Self {
            config,
            frame: ContentFrame::default(),
            points: PointNodes::default(),
        })
    }

    /// Rendered point glyphs.
    pub const fn points(&self) -> &PointNodes {
        &self.points
    }

    fn render(&mut self, ctx: &mut GraphContext) {
        let Some(group) = self.frame.group else {
            return;
        };
        if ctx.config.is_shown(&self.config.key) {
            self.points.render(ctx, group, &self.config, |_| GLYPH_SIZE);
        }
    }
}

impl Content for Scatter {
    fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn kind(&self) -> &'static str {
        "scatter"
    }

    fn load(&mut self, ctx: &mut GraphContext) -> Result<()> {
        self.frame = ContentFrame::attach(ctx, &self.config, self.kind());
        self.render(ctx);
        Ok(())
    }

    fn unload(&mut self, ctx: &mut GraphContext) {
        self.frame.detach(ctx, &self.config.key);
        self.points.clear();
    }

    fn resize(&mut self, ctx: &mut GraphContext) {
        self.points.reposition(ctx, &self.config);
        self.frame.reposition(ctx, &self.config);
    }

    fn reflow(&mut self, ctx: &mut GraphContext, data: &GraphData) -> Result<()> {
        self.config.values = convert_points(&data.values, ctx.config.axis.x.axis_type)?;
        if let Some(group) = self.frame.group {
            if ctx.config.is_shown(&self.config.key) {
                self.points.sync(ctx, group, &self.config, |_| GLYPH_SIZE);
            }
        }
        Ok(())
    }

    fn redraw(&mut self, ctx: &mut GraphContext) {
        self.frame.clear(ctx);
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
    fn test_gaps_are_skipped() {
        let mut ctx = context();
        let mut scatter =
            Scatter::new(&input("uid_1", &[(10.0, Some(1.0)), (20.0, None)])).unwrap();
        scatter.load(&mut ctx).unwrap();
        assert_eq!(scatter.points().len(), 1);
        assert!(scatter.points().get(1).is_none());
    }

    #[test]
    fn test_reflow_removes_points() {
        let mut ctx = context();
        let mut scatter =
            Scatter::new(&input("uid_1", &[(10.0, Some(1.0)), (20.0, Some(2.0))])).unwrap();
        scatter.load(&mut ctx).unwrap();
        let removed = scatter.points().get(1).unwrap();

        let data = GraphData {
            key: scatter.key().clone(),
            values: vec![PointInput::new(10.0, Some(3.0))],
            ..GraphData::default()
        };
        scatter.reflow(&mut ctx, &data).unwrap();
        assert_eq!(scatter.points().len(), 1);
        assert!(!ctx.document.contains(removed));
    }
}
