//! Axis chrome: layer translation, axes, grid, axis labels, label shapes, and
//! the reference line at y = 0.
//!
//! Everything here is derived from [`GraphContext`] and is safe to rebuild
//! on every layout pass.

use crate::context::GraphContext;
use crate::glyph;
use crate::layers::Layer;
use crate::svg::{Element, NodeId};
use crate::ticks;
use cgraph_common::{format_px, AxisId, YAxis};
use cgraph_config::defaults::{LABEL_SPACING, TICK_SIZE};
use cgraph_config::{ContentConfig, XOrientation};

const LABEL_SHAPES_CLASS: &str = "cgraph-label-shape-container";

/// Moves every layer to its place for the current geometry.
pub fn translate_layers(ctx: &mut GraphContext) {
    let config = &ctx.config;
    let left = config.plot_left();
    let top = config.plot_top();
    let width = config.plot_width();
    let height = config.height;
    let x_axis_top = match config.axis.x.orientation {
        XOrientation::Bottom => top + height,
        XOrientation::Top => top,
    };
    let info_row_top = top + height + config.axis_sizes.x;
    let canvas_width = config.canvas_width;
    let canvas_height = config.canvas_height;

    if let Some(canvas) = ctx.layer(Layer::Canvas) {
        ctx.document.set_px(canvas, "width", canvas_width);
        ctx.document.set_px(canvas, "height", canvas_height);
    }
    let placements = [
        (Layer::Regions, left, top),
        (Layer::Grid, left, top),
        (Layer::XAxis, left, x_axis_top),
        (Layer::YAxis, left, top),
        (Layer::Y2Axis, left + width, top),
        (Layer::Content, left, top),
        (Layer::AxisInfoRow, left, info_row_top),
        (Layer::AxisReferenceLine, left, top),
        (Layer::Dateline, left, top),
        (Layer::Eventline, left, top),
    ];
    for (layer, x, y) in placements {
        if let Some(node) = ctx.layer(layer) {
            ctx.document.set_attr(node, "transform", glyph::translate(x, y));
        }
    }
    update_clip_path(ctx, width, height);
}

/// Identifier of the content clip path.
pub fn clip_path_id(ctx: &GraphContext) -> String {
    let suffix: String = ctx
        .config
        .bind_to
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    format!("cgraph-clip-{suffix}")
}

fn update_clip_path(ctx: &mut GraphContext, width: f64, height: f64) {
    let Some(defs) = ctx.layer(Layer::Defs) else {
        return;
    };
    let id = clip_path_id(ctx);
    let rect = match ctx.document.find_by_class(defs, "cgraph-clip-rect").first() {
        Some(rect) => Some(*rect),
        None => ctx
            .document
            .append(defs, Element::new("clipPath").attr("id", id.clone()))
            .and_then(|clip| {
                ctx.document
                    .append(clip, Element::new("rect").class("cgraph-clip-rect"))
            }),
    };
    if let Some(rect) = rect {
        ctx.document.set_px(rect, "width", width);
        ctx.document.set_px(rect, "height", height);
    }
    if let Some(content) = ctx.layer(Layer::Content) {
        ctx.document
            .set_attr(content, "clip-path", format!("url(#{id})"));
    }
}

/// Tick positions and labels of the x axis, in plot pixels.
pub fn x_ticks(ctx: &GraphContext) -> Vec<(f64, String)> {
    let axis = &ctx.config.axis.x;
    let scale = &ctx.scales.x;
    match &axis.ticks.values {
        Some(_) => {
            let (lower, upper) = scale.domain();
            let texts = crate::layout::tick_texts(&axis.ticks, lower, upper);
            axis.ticks
                .values
                .iter()
                .flatten()
                .zip(texts)
                .map(|(value, text)| (scale.map(value), text))
                .collect()
        }
        None => scale
            .tick_labels(axis.ticks.count)
            .into_iter()
            .map(|(value, text)| (scale.map_raw(value), text))
            .collect(),
    }
}

/// Tick positions and labels of a vertical axis, in plot pixels.
pub fn y_ticks(ctx: &GraphContext, axis: YAxis) -> Vec<(f64, String)> {
    let scale = ctx.scales.y_for(axis);
    let Some(axis_config) = ctx.config.axis.vertical(axis.into()) else {
        return Vec::new();
    };
    let (lower, upper) = scale.domain();
    match &axis_config.ticks.values {
        Some(values) => values
            .iter()
            .map(|value| (scale.map(value.as_f64()), ticks::format_linear_tick(value.as_f64())))
            .collect(),
        None => ticks::linear_ticks(lower, upper, axis_config.ticks.count)
            .into_iter()
            .map(|value| (scale.map(value), ticks::format_linear_tick(value)))
            .collect(),
    }
}

/// Rebuilds the x, y, and y2 axes and the grid.
pub fn draw_axes(ctx: &mut GraphContext) {
    let width = ctx.config.plot_width();
    let height = ctx.config.height;

    let x_marks = x_ticks(ctx);
    let y_marks = y_ticks(ctx, YAxis::Y);
    let y2_marks = y_ticks(ctx, YAxis::Y2);

    if let Some(node) = ctx.layer(Layer::XAxis) {
        ctx.document.clear_children(node);
        if ctx.config.axis.x.show {
            let direction = match ctx.config.axis.x.orientation {
                XOrientation::Bottom => 1.0,
                XOrientation::Top => -1.0,
            };
            draw_axis(ctx, node, AxisId::X, width, direction, &x_marks);
        }
    }
    if let Some(node) = ctx.layer(Layer::YAxis) {
        ctx.document.clear_children(node);
        if ctx.config.axis.y.show {
            draw_axis(ctx, node, AxisId::Y, height, -1.0, &y_marks);
        }
    }
    if let Some(node) = ctx.layer(Layer::Y2Axis) {
        ctx.document.clear_children(node);
        if ctx.config.axis.y2.show {
            draw_axis(ctx, node, AxisId::Y2, height, 1.0, &y2_marks);
        }
    }
    if let Some(grid) = ctx.layer(Layer::Grid) {
        ctx.document.clear_children(grid);
        for (x, _) in &x_marks {
            ctx.document.append(
                grid,
                line("cgraph-grid-x", (*x, 0.0), (*x, height)),
            );
        }
        for (y, _) in &y_marks {
            ctx.document.append(
                grid,
                line("cgraph-grid-y", (0.0, *y), (width, *y)),
            );
        }
    }
}

/// Draws one axis: the domain path plus tick marks and labels.
///
/// `direction` is the side ticks extend to: +1 is down/right, -1 is up/left.
fn draw_axis(
    ctx: &mut GraphContext,
    node: NodeId,
    axis: AxisId,
    length: f64,
    direction: f64,
    tick_values: &[(f64, String)],
) {
    let horizontal = axis == AxisId::X;
    let path = if horizontal {
        format!("M0,0 H{}", format_px(length))
    } else {
        format!("M0,0 V{}", format_px(length))
    };
    ctx.document
        .append(node, Element::new("path").class("domain").attr("d", path));

    let offset = direction * TICK_SIZE;
    for (position, text) in tick_values {
        let (tick_x, tick_y) = if horizontal {
            (*position, 0.0)
        } else {
            (0.0, *position)
        };
        let Some(tick) = ctx.document.append(
            node,
            Element::new("g")
                .class("tick")
                .attr("transform", glyph::translate(tick_x, tick_y)),
        ) else {
            continue;
        };
        let (x2, y2) = if horizontal { (0.0, offset) } else { (offset, 0.0) };
        ctx.document.append(tick, line("tick-line", (0.0, 0.0), (x2, y2)));
        let label = if horizontal {
            Element::new("text")
                .px("y", offset * 1.5)
                .attr("text-anchor", "middle")
        } else {
            Element::new("text")
                .px("x", offset * 1.5)
                .attr("text-anchor", if direction < 0.0 { "end" } else { "start" })
        };
        ctx.document.append(tick, label.text(text.clone()));
    }
}

fn line(class: &str, from: (f64, f64), to: (f64, f64)) -> Element {
    Element::new("line")
        .class(class)
        .px("x1", from.0)
        .px("y1", from.1)
        .px("x2", to.0)
        .px("y2", to.1)
}

/// Creates the axis label groups for every shown, labelled axis.
pub fn draw_axis_labels(ctx: &mut GraphContext) {
    let Some(layer) = ctx.ensure_layer(Layer::AxisLabels) else {
        return;
    };
    ctx.document.clear_children(layer);
    for axis in AxisId::ALL {
        let Some(label) = axis_label(ctx, axis) else {
            continue;
        };
        let Some(group) = ctx.document.append(
            layer,
            Element::new("g")
                .class(format!("cgraph-axis-label-{axis}"))
                .attr("data-axis", axis.name()),
        ) else {
            continue;
        };
        ctx.document.append(
            group,
            Element::new("text")
                .class("cgraph-axis-label")
                .attr("text-anchor", "middle")
                .text(label),
        );
        ctx.document
            .append(group, Element::new("g").class(LABEL_SHAPES_CLASS));
    }
    position_axis_labels(ctx);
}

fn axis_label(ctx: &GraphContext, axis: AxisId) -> Option<String> {
    let (show, label) = match axis {
        AxisId::X => (ctx.config.axis.x.show, &ctx.config.axis.x.label),
        AxisId::Y => (ctx.config.axis.y.show, &ctx.config.axis.y.label),
        AxisId::Y2 => (ctx.config.axis.y2.show, &ctx.config.axis.y2.label),
    };
    label.clone().filter(|_| show)
}

fn label_group(ctx: &GraphContext, axis: AxisId) -> Option<NodeId> {
    let layer = ctx.layer(Layer::AxisLabels)?;
    ctx.document.find_by_attr(layer, "data-axis", axis.name())
}

/// Moves axis label groups to the current geometry.
pub fn position_axis_labels(ctx: &mut GraphContext) {
    let config = &ctx.config;
    let left = config.plot_left();
    let top = config.plot_top();
    let width = config.plot_width();
    let height = config.height;
    let middle_y = top + height / 2.0;

    let x_label_y = match config.axis.x.orientation {
        XOrientation::Bottom => {
            top + height + config.axis_sizes.x + config.axis_label_heights.x - LABEL_SPACING / 2.0
        }
        XOrientation::Top => config.padding.top + config.axis_label_heights.x / 2.0,
    };
    let placements = [
        (AxisId::X, glyph::translate(left + width / 2.0, x_label_y)),
        (
            AxisId::Y,
            format!(
                "{} rotate(-90)",
                glyph::translate(config.padding.left + config.axis_label_widths.y / 2.0, middle_y)
            ),
        ),
        (
            AxisId::Y2,
            format!(
                "{} rotate(90)",
                glyph::translate(
                    left + width + config.axis_sizes.y2 + config.axis_label_widths.y2 / 2.0,
                    middle_y
                )
            ),
        ),
    ];
    for (axis, transform) in placements {
        if let Some(group) = label_group(ctx, axis) {
            ctx.document.set_attr(group, "transform", transform);
        }
    }
}

/// Appends a label shape for `config` next to its axis label.
pub fn add_label_shape(ctx: &mut GraphContext, config: &ContentConfig) -> Option<NodeId> {
    let group = label_group(ctx, config.y_axis.into())?;
    let container = ctx
        .document
        .find_by_class(group, LABEL_SHAPES_CLASS)
        .first()
        .copied()?;
    #[allow(clippy::cast_precision_loss)]
    let offset = ctx.document.children(container).len() as f64 * glyph::GLYPH_SIZE * 1.5;
    let shape = ctx.document.append(
        container,
        Element::new("g")
            .class("cgraph-label-shape")
            .attr("data-key", config.key.as_str())
            .attr("transform", glyph::translate(offset, -glyph::GLYPH_SIZE * 2.0)),
    )?;
    ctx.document
        .append(shape, glyph::glyph(config.shape, glyph::GLYPH_SIZE, &config.color));
    Some(shape)
}

/// Number of label shapes across all axes.
pub fn label_shape_count(ctx: &GraphContext) -> usize {
    ctx.layer(Layer::AxisLabels).map_or(0, |layer| {
        ctx.document.find_by_class(layer, "cgraph-label-shape").len()
    })
}

/// Redraws the horizontal line at y = 0 when zero lies inside the y domain.
pub fn draw_reference_line(ctx: &mut GraphContext) {
    let Some(layer) = ctx.layer(Layer::AxisReferenceLine) else {
        return;
    };
    ctx.document.clear_children(layer);
    let (lower, upper) = ctx.scales.y.domain();
    if !(lower < 0.0 && upper > 0.0) {
        return;
    }
    let y = ctx.scales.y.map(0.0);
    let width = ctx.config.plot_width();
    ctx.document.append(
        layer,
        line("cgraph-axis-reference-line", (0.0, y), (width, y)),
    );
}

/// Rebuilds every piece of chrome for the current scales.
pub fn refresh(ctx: &mut GraphContext) {
    translate_layers(ctx);
    draw_axes(ctx);
    position_axis_labels(ctx);
    draw_reference_line(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgraph_common::test_utils::config_fixtures;
    use cgraph_config::{validate_content, ConfigLoader, ConfigValidator, ContentInput, Domain};

    fn context() -> GraphContext {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        let mut config = ConfigValidator::validate(&input).unwrap();
        config.canvas_width = 600.0;
        let mut ctx = GraphContext::new(config);
        for layer in crate::layers::LAYER_ORDER {
            ctx.ensure_layer(layer);
        }
        ctx
    }

    #[test]
    fn test_axes_have_ticks() {
        let mut ctx = context();
        draw_axes(&mut ctx);
        let x = ctx.layer(Layer::XAxis).unwrap();
        assert_eq!(ctx.document.find_by_class(x, "tick").len(), 6);
        let y2 = ctx.layer(Layer::Y2Axis).unwrap();
        assert!(ctx.document.children(y2).is_empty());
    }

    #[test]
    fn test_explicit_x_ticks() {
        let mut ctx = context();
        ctx.config.axis.x.ticks.values = Some(vec![
            cgraph_config::XValue::Number(10.0),
            cgraph_config::XValue::Number(90.0),
        ]);
        let ticks = x_ticks(&ctx);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].1, "10");
    }

    #[test]
    fn test_reference_line_only_when_zero_is_inside() {
        let mut ctx = context();
        draw_reference_line(&mut ctx);
        let layer = ctx.layer(Layer::AxisReferenceLine).unwrap();
        assert!(ctx.document.children(layer).is_empty());

        ctx.config.axis.y.domain = Domain::new(-10.0, 10.0);
        ctx.rebuild_scales();
        draw_reference_line(&mut ctx);
        assert_eq!(ctx.document.children(layer).len(), 1);
    }

    #[test]
    fn test_label_shapes() {
        let mut ctx = context();
        draw_axis_labels(&mut ctx);
        let input = ContentInput {
            key: Some("uid_1".to_string()),
            values: Some(vec![]),
            ..ContentInput::default()
        };
        let config = validate_content(&input, "#000000").unwrap();
        let shape = add_label_shape(&mut ctx, &config).unwrap();
        assert_eq!(label_shape_count(&ctx), 1);
        ctx.document.remove(shape);
        assert_eq!(label_shape_count(&ctx), 0);
    }

    #[test]
    fn test_translate_sets_canvas_size() {
        let mut ctx = context();
        ctx.config.canvas_height = 300.0;
        translate_layers(&mut ctx);
        let canvas = ctx.layer(Layer::Canvas).unwrap();
        assert_eq!(ctx.document.attr(canvas, "width"), Some("600"));
        assert_eq!(ctx.document.attr(canvas, "height"), Some("300"));
        let content = ctx.layer(Layer::Content).unwrap();
        assert!(ctx.document.attr(content, "clip-path").is_some());
    }
}
