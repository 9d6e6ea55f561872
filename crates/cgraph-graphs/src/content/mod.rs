//! Content plugins: the contract every data series implements, plus the
//! bookkeeping they share (content group, legend item, label shape, regions).

mod bubble;
mod line;
mod paired_result;
mod scatter;

pub use bubble::Bubble;
pub use line::Line;
pub use paired_result::{PairedResult, PairedResultInput, PairedValueInput};
pub use scatter::Scatter;

use crate::context::GraphContext;
use crate::layers::Layer;
use crate::svg::{Element, NodeId};
use crate::{axes, glyph, legend, regions};
use cgraph_common::{ContentKey, Result};
use cgraph_config::{AxisType, ContentConfig, DataPoint, PointInput, RawValue, XValue};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Reflow payload: new values for one content plus optional x axis updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    /// Key of the content to update.
    pub key: ContentKey,
    /// Replacement values.
    #[serde(default)]
    pub values: Vec<PointInput>,
    /// Replacement values for paired result content.
    #[serde(default)]
    pub paired_values: Vec<PairedValueInput>,
    /// Replacement x tick values.
    #[serde(default)]
    pub x_ticks: Option<Vec<RawValue>>,
    /// Replacement x limits, `[lower, upper]`.
    #[serde(default)]
    pub x_domain: Option<[RawValue; 2]>,
}

/// Behavior every content variant provides to the graph.
///
/// The graph only ever talks to content through this trait. Each call gets
/// the graph's shared [`GraphContext`] and must position visuals with its
/// current scales.
pub trait Content: Debug {
    /// Validated configuration.
    fn config(&self) -> &ContentConfig;

    /// Variant name used in class attributes and logs.
    fn kind(&self) -> &'static str;

    /// Attaches visuals, legend item, and label shape. Called once per registration.
    fn load(&mut self, ctx: &mut GraphContext) -> Result<()>;

    /// Removes every visual and resets the data-target state.
    fn unload(&mut self, ctx: &mut GraphContext);

    /// Re-positions existing visuals against the current scales.
    fn resize(&mut self, ctx: &mut GraphContext);

    /// Replaces the values and updates only the affected visuals.
    fn reflow(&mut self, ctx: &mut GraphContext, data: &GraphData) -> Result<()>;

    /// Re-renders visuals from the current values, honoring visibility.
    fn redraw(&mut self, ctx: &mut GraphContext);

    /// Unique key.
    fn key(&self) -> &ContentKey {
        &self.config().key
    }
}

/// Nodes a loaded content owns outside its own point visuals.
#[derive(Debug, Clone, Default)]
pub struct ContentFrame {
    /// Group in the content layer holding the variant's visuals.
    pub group: Option<NodeId>,
    /// Legend item, when the legend is on.
    pub legend_item: Option<NodeId>,
    /// Label shape next to the axis label.
    pub label_shape: Option<NodeId>,
    /// Region bands.
    pub regions: Vec<NodeId>,
}

impl ContentFrame {
    /// Registers `config` as shown and creates its shared nodes.
    pub fn attach(ctx: &mut GraphContext, config: &ContentConfig, kind: &str) -> Self {
        if !ctx.config.is_shown(&config.key) {
            ctx.config.shown_targets.push(config.key.clone());
        }
        let group = ctx.ensure_layer(Layer::Content).and_then(|layer| {
            ctx.document.append(
                layer,
                Element::new("g")
                    .class("cgraph-content")
                    .class(format!("cgraph-content-{kind}"))
                    .attr("data-key", config.key.as_str())
                    .attr("aria-describedby", config.key.as_str()),
            )
        });
        let legend_item = legend::add_item(ctx, config);
        let label_shape = axes::add_label_shape(ctx, config);
        let regions = regions::draw(ctx, config);
        Self {
            group,
            legend_item,
            label_shape,
            regions,
        }
    }

    /// Removes every shared node and the shown-target entry.
    pub fn detach(&mut self, ctx: &mut GraphContext, key: &ContentKey) {
        for node in [
            self.group.take(),
            self.legend_item.take(),
            self.label_shape.take(),
        ]
        .into_iter()
        .flatten()
        {
            ctx.document.remove(node);
        }
        regions::remove(ctx, &self.regions);
        self.regions.clear();
        ctx.config.shown_targets.retain(|shown| shown != key);
    }

    /// Whether the frame is attached.
    pub const fn is_attached(&self) -> bool {
        self.group.is_some()
    }

    /// Re-positions region bands.
    pub fn reposition(&self, ctx: &mut GraphContext, config: &ContentConfig) {
        regions::position(ctx, config, &self.regions);
    }

    /// Removes the group's children, keeping the group itself.
    pub fn clear(&self, ctx: &mut GraphContext) {
        if let Some(group) = self.group {
            ctx.document.clear_children(group);
        }
    }
}

/// Pixel position of a point, or `None` for a gap.
pub fn project(ctx: &GraphContext, config: &ContentConfig, point: &DataPoint) -> Option<(f64, f64)> {
    let y = point.y?;
    Some((
        ctx.scales.x.map(&point.x),
        ctx.scales.y_for(config.y_axis).map(y),
    ))
}

/// Appends a positioned glyph for one point.
pub fn append_point(
    ctx: &mut GraphContext,
    parent: NodeId,
    config: &ContentConfig,
    index: usize,
    position: (f64, f64),
    size: f64,
) -> Option<NodeId> {
    let holder = ctx.document.append(
        parent,
        Element::new("g")
            .class("cgraph-point")
            .attr("data-index", index.to_string())
            .attr("transform", glyph::translate(position.0, position.1)),
    )?;
    ctx.document
        .append(holder, glyph::glyph(config.shape, size, &config.color));
    Some(holder)
}

/// Point glyph nodes indexed like the content's values; gaps hold `None`.
#[derive(Debug, Clone, Default)]
pub struct PointNodes {
    nodes: Vec<Option<NodeId>>,
}

impl PointNodes {
    /// Creates a glyph for every non-gap point of `config`.
    pub fn render(
        &mut self,
        ctx: &mut GraphContext,
        group: NodeId,
        config: &ContentConfig,
        size: impl Fn(&DataPoint) -> f64,
    ) {
        self.nodes = config
            .values
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let position = project(ctx, config, point)?;
                append_point(ctx, group, config, index, position, size(point))
            })
            .collect();
    }

    /// Moves existing glyphs to the current scales.
    pub fn reposition(&self, ctx: &mut GraphContext, config: &ContentConfig) {
        for (node, point) in self.nodes.iter().zip(&config.values) {
            let (Some(node), Some((x, y))) = (node, project(ctx, config, point)) else {
                continue;
            };
            ctx.document
                .set_attr(*node, "transform", glyph::translate(x, y));
        }
    }

    /// Reconciles glyphs with replaced values: reuses nodes by index, drops
    /// nodes for removed points or new gaps, and creates nodes for new points.
    pub fn sync(
        &mut self,
        ctx: &mut GraphContext,
        group: NodeId,
        config: &ContentConfig,
        size: impl Fn(&DataPoint) -> f64,
    ) {
        for stale in self.nodes.drain(config.values.len().min(self.nodes.len())..) {
            if let Some(node) = stale {
                ctx.document.remove(node);
            }
        }
        self.nodes.resize(config.values.len(), None);
        for (index, point) in config.values.iter().enumerate() {
            let position = project(ctx, config, point);
            match (self.nodes[index], position) {
                (Some(node), Some((x, y))) => {
                    ctx.document
                        .set_attr(node, "transform", glyph::translate(x, y));
                    ctx.document.clear_children(node);
                    ctx.document
                        .append(node, glyph::glyph(config.shape, size(point), &config.color));
                }
                (Some(node), None) => {
                    ctx.document.remove(node);
                    self.nodes[index] = None;
                }
                (None, Some(position)) => {
                    self.nodes[index] =
                        append_point(ctx, group, config, index, position, size(point));
                }
                (None, None) => {}
            }
        }
    }

    /// Forgets every node (the caller removes the subtree).
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Number of rendered glyphs.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether no glyph is rendered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node of the point at `index`.
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied().flatten()
    }
}

/// Converts reflow points for the graph's x axis type.
pub fn convert_points(points: &[PointInput], axis_type: AxisType) -> Result<Vec<DataPoint>> {
    points
        .iter()
        .map(|point| {
            Ok(DataPoint {
                x: XValue::from_raw(&point.x, axis_type)?,
                y: point.y.filter(|y| y.is_finite()),
                weight: point.weight,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use cgraph_common::test_utils::config_fixtures;
    use cgraph_config::{ConfigLoader, ConfigValidator, ContentInput};

    pub fn context() -> GraphContext {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        let mut config = ConfigValidator::validate(&input).unwrap();
        config.canvas_width = 1080.0;
        let mut ctx = GraphContext::new(config);
        for layer in crate::layers::LAYER_ORDER {
            if !matches!(layer, Layer::Dateline | Layer::Eventline | Layer::NoData) {
                ctx.ensure_layer(layer);
            }
        }
        axes::draw_axis_labels(&mut ctx);
        ctx
    }

    pub fn input(key: &str, points: &[(f64, Option<f64>)]) -> ContentInput {
        ContentInput {
            key: Some(key.to_string()),
            values: Some(
                points
                    .iter()
                    .map(|(x, y)| PointInput::new(*x, *y))
                    .collect(),
            ),
            ..ContentInput::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use cgraph_config::validate_content;

    #[test]
    fn test_attach_and_detach_are_symmetric() {
        let mut ctx = context();
        let config = validate_content(&input("uid_1", &[(1.0, Some(2.0))]), "#000").unwrap();
        let before = ctx.document.len();

        let mut frame = ContentFrame::attach(&mut ctx, &config, "line");
        assert!(frame.is_attached());
        assert_eq!(ctx.config.shown_targets, vec![config.key.clone()]);
        assert_eq!(legend::item_count(&ctx), 1);
        assert_eq!(axes::label_shape_count(&ctx), 1);

        frame.detach(&mut ctx, &config.key);
        assert!(!frame.is_attached());
        assert!(ctx.config.shown_targets.is_empty());
        assert_eq!(ctx.document.len(), before);
    }

    #[test]
    fn test_project_skips_gaps() {
        let ctx = context();
        let config = validate_content(&input("uid_1", &[(0.0, Some(0.0)), (1.0, None)]), "#000")
            .unwrap();
        assert!(project(&ctx, &config, &config.values[0]).is_some());
        assert!(project(&ctx, &config, &config.values[1]).is_none());
    }

    #[test]
    fn test_convert_points_keeps_axis_type() {
        let converted =
            convert_points(&[PointInput::new(3.0, Some(1.0))], AxisType::Linear).unwrap();
        assert_eq!(converted[0].x, XValue::Number(3.0));

        let bad = PointInput {
            x: RawValue::from("2016-01-01T00:00:00Z"),
            y: Some(1.0),
            weight: None,
        };
        assert!(convert_points(&[bad], AxisType::Linear).is_err());
    }
}
