//! Legend items: one per loaded content, toggled active or inactive.

use crate::context::GraphContext;
use crate::glyph;
use crate::layers::Layer;
use crate::svg::{Element, NodeId};
use cgraph_common::ContentKey;
use cgraph_config::ContentConfig;

const ITEM_CLASS: &str = "cgraph-legend-item";
const INACTIVE_CLASS: &str = "cgraph-legend-item-inactive";

/// Consumer callback for legend clicks when click pass-through is on.
///
/// Receives the content key and whether the content is currently shown.
pub type LegendClickHandler = Box<dyn FnMut(&ContentKey, bool)>;

/// Appends a legend item for `config`; `None` when the legend is off or the
/// content opts out.
pub fn add_item(ctx: &mut GraphContext, config: &ContentConfig) -> Option<NodeId> {
    if !ctx.config.show_legend || !config.show_in_legend {
        return None;
    }
    let legend = ctx.ensure_layer(Layer::Legend)?;
    let item = ctx.document.append(
        legend,
        Element::new("li")
            .class(ITEM_CLASS)
            .attr("data-key", config.key.as_str())
            .attr("aria-selected", "true")
            .attr("role", "option"),
    )?;
    let icon = ctx.document.append(
        item,
        Element::new("svg")
            .class("cgraph-legend-item-btn")
            .px("width", glyph::GLYPH_SIZE * 2.0)
            .px("height", glyph::GLYPH_SIZE * 2.0),
    )?;
    let size = glyph::GLYPH_SIZE;
    let holder = ctx
        .document
        .append(icon, Element::new("g").attr("transform", glyph::translate(size, size)))?;
    ctx.document
        .append(holder, glyph::glyph(config.shape, size, &config.color));
    ctx.document.append(
        item,
        Element::new("span")
            .class("cgraph-legend-item-text")
            .text(config.label.clone()),
    );
    Some(item)
}

/// Marks an item active (content shown) or inactive.
pub fn set_active(ctx: &mut GraphContext, item: NodeId, active: bool) {
    if active {
        ctx.document.remove_class(item, INACTIVE_CLASS);
    } else {
        ctx.document.add_class(item, INACTIVE_CLASS);
    }
    ctx.document
        .set_attr(item, "aria-selected", if active { "true" } else { "false" });
}

/// Legend item of a content key.
pub fn item_for(ctx: &GraphContext, key: &ContentKey) -> Option<NodeId> {
    let legend = ctx.layer(Layer::Legend)?;
    ctx.document
        .find_by_class(legend, ITEM_CLASS)
        .into_iter()
        .find(|item| ctx.document.attr(*item, "data-key") == Some(key.as_str()))
}

/// Number of legend items.
pub fn item_count(ctx: &GraphContext) -> usize {
    ctx.layer(Layer::Legend)
        .map_or(0, |legend| ctx.document.find_by_class(legend, ITEM_CLASS).len())
}
