//! Dateline and eventline markers on time-series graphs.

use crate::context::GraphContext;
use crate::glyph;
use crate::layers::Layer;
use crate::svg::Element;
use cgraph_common::{format_timestamp, to_epoch_millis};
use cgraph_config::Dateline;

/// Consumer callback for dateline clicks.
pub type DatelineClickHandler = Box<dyn FnMut(&Dateline)>;

/// Redraws all datelines and eventlines. No-op on linear x axes.
pub fn draw(ctx: &mut GraphContext) {
    if !ctx.config.is_timeseries() {
        return;
    }
    draw_datelines(ctx);
    draw_eventlines(ctx);
}

fn draw_datelines(ctx: &mut GraphContext) {
    if ctx.config.datelines.is_empty() {
        return;
    }
    let Some(layer) = ctx.ensure_layer(Layer::Dateline) else {
        return;
    };
    ctx.document.clear_children(layer);
    let height = ctx.config.height;
    let datelines = ctx.config.datelines.clone();
    for (index, dateline) in datelines.iter().enumerate() {
        let x = ctx.scales.x.map_raw(to_epoch_millis(dateline.value));
        let Some(group) = ctx.document.append(
            layer,
            Element::new("g")
                .class("cgraph-dateline")
                .attr("data-index", index.to_string())
                .attr("data-value", format_timestamp(dateline.value)),
        ) else {
            continue;
        };
        ctx.document.append(
            group,
            Element::new("line")
                .px("x1", x)
                .px("y1", 0.0)
                .px("x2", x)
                .px("y2", height)
                .attr("stroke", dateline.color.clone()),
        );
        if let Some(indicator) = ctx.document.append(
            group,
            Element::new("g")
                .class("cgraph-dateline-indicator")
                .attr("transform", glyph::translate(x, 0.0)),
        ) {
            ctx.document.append(
                indicator,
                glyph::glyph(dateline.shape, glyph::GLYPH_SIZE, &dateline.color),
            );
        }
        if let Some(label) = &dateline.label {
            ctx.document.append(
                group,
                Element::new("title").text(label.clone()),
            );
        }
    }
}

fn draw_eventlines(ctx: &mut GraphContext) {
    if ctx.config.eventlines.is_empty() {
        return;
    }
    let Some(layer) = ctx.ensure_layer(Layer::Eventline) else {
        return;
    };
    ctx.document.clear_children(layer);
    let height = ctx.config.height;
    let eventlines = ctx.config.eventlines.clone();
    for eventline in &eventlines {
        let x = ctx.scales.x.map_raw(to_epoch_millis(eventline.value));
        let mut element = Element::new("line")
            .class("cgraph-eventline")
            .px("x1", x)
            .px("y1", 0.0)
            .px("x2", x)
            .px("y2", height)
            .attr("stroke", eventline.color.clone());
        if let Some(style) = &eventline.style {
            element = element.attr("stroke-dasharray", style.clone());
        }
        ctx.document.append(layer, element);
    }
}
