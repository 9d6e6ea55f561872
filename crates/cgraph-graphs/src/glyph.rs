//! Marker glyphs drawn at the origin and positioned by `transform`.

use crate::svg::Element;
use cgraph_common::format_px;
use cgraph_config::MarkerShape;

/// Default glyph edge length in pixels.
pub const GLYPH_SIZE: f64 = 8.0;

/// `translate(x,y)` transform value.
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", format_px(x), format_px(y))
}

/// Glyph element centered on the origin.
pub fn glyph(shape: MarkerShape, size: f64, color: &str) -> Element {
    let half = size / 2.0;
    let base = match shape {
        MarkerShape::Circle => Element::new("circle").px("r", half),
        MarkerShape::Square => Element::new("rect")
            .px("x", -half)
            .px("y", -half)
            .px("width", size)
            .px("height", size),
        MarkerShape::Triangle => Element::new("path").attr(
            "d",
            format!(
                "M0,{} L{},{} L{},{} Z",
                format_px(-half),
                format_px(half),
                format_px(half),
                format_px(-half),
                format_px(half)
            ),
        ),
        MarkerShape::Diamond => Element::new("path").attr(
            "d",
            format!(
                "M0,{m} L{h},0 L0,{h} L{m},0 Z",
                m = format_px(-half),
                h = format_px(half)
            ),
        ),
        MarkerShape::Cross => Element::new("path")
            .attr(
                "d",
                format!(
                    "M{m},{m} L{h},{h} M{m},{h} L{h},{m}",
                    m = format_px(-half),
                    h = format_px(half)
                ),
            )
            .attr("stroke", color.to_string()),
    };
    base.class(format!("cgraph-glyph-{}", shape.name()))
        .attr("fill", color.to_string())
}
