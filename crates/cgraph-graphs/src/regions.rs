//! Horizontal region bands drawn beneath content.

use crate::context::GraphContext;
use crate::layers::Layer;
use crate::svg::{Element, NodeId};
use cgraph_config::{ContentConfig, RegionConfig};

/// Creates one band per region of `config`; returns the band nodes in region order.
pub fn draw(ctx: &mut GraphContext, config: &ContentConfig) -> Vec<NodeId> {
    if config.regions.is_empty() {
        return Vec::new();
    }
    let Some(layer) = ctx.ensure_layer(Layer::Regions) else {
        return Vec::new();
    };
    let nodes: Vec<NodeId> = config
        .regions
        .iter()
        .filter_map(|region| {
            ctx.document.append(
                layer,
                Element::new("rect")
                    .class("cgraph-region")
                    .attr("data-key", config.key.as_str())
                    .attr("fill", region.color.clone()),
            )
        })
        .collect();
    position(ctx, config, &nodes);
    nodes
}

/// Re-positions existing bands against the current scales and visibility.
pub fn position(ctx: &mut GraphContext, config: &ContentConfig, nodes: &[NodeId]) {
    let shown = ctx.config.is_shown(&config.key);
    for (region, node) in config.regions.iter().zip(nodes) {
        let (top, bottom) = band(ctx, region);
        ctx.document.set_px(*node, "x", 0.0);
        ctx.document.set_px(*node, "y", top);
        ctx.document.set_px(*node, "width", ctx.config.plot_width());
        ctx.document.set_px(*node, "height", (bottom - top).max(0.0));
        ctx.document
            .set_attr(*node, "visibility", if shown { "visible" } else { "hidden" });
    }
}

/// Pixel `(top, bottom)` of a band; open ends extend to the domain limits.
fn band(ctx: &GraphContext, region: &RegionConfig) -> (f64, f64) {
    let scale = ctx.scales.y_for(region.axis);
    let (lower, upper) = scale.domain();
    let start = region.start.unwrap_or(lower);
    let end = region.end.unwrap_or(upper);
    (scale.map(end), scale.map(start))
}

/// Removes band nodes.
pub fn remove(ctx: &mut GraphContext, nodes: &[NodeId]) {
    for node in nodes {
        ctx.document.remove(*node);
    }
}
