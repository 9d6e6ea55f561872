//! Paired result content: high/mid/low readings per x, joined by a vertical line.

use super::{append_point, convert_points, project, Content, ContentFrame, GraphData};
use crate::context::GraphContext;
use crate::glyph::{self, GLYPH_SIZE};
use crate::svg::{Element, NodeId};
use cgraph_common::{Result, YAxis};
use cgraph_config::defaults::DEFAULT_CONTENT_COLOR;
use cgraph_config::{
    validate_content, AxisType, ContentConfig, ContentInput, DataPoint, LabelInput,
    LegendOptionsInput, MarkerShape, PointInput, RegionInput,
};
use serde::{Deserialize, Serialize};

const ROLES: [&str; 3] = ["high", "mid", "low"];

/// One paired reading as written by consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairedValueInput {
    /// High reading.
    #[serde(default)]
    pub high: Option<PointInput>,
    /// Middle reading.
    #[serde(default)]
    pub mid: Option<PointInput>,
    /// Low reading.
    #[serde(default)]
    pub low: Option<PointInput>,
}

impl PairedValueInput {
    fn readings(&self) -> [Option<&PointInput>; 3] {
        [self.high.as_ref(), self.mid.as_ref(), self.low.as_ref()]
    }
}

/// Paired result input; mirrors [`ContentInput`] with paired values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedResultInput {
    /// Unique key within one graph.
    #[serde(default)]
    pub key: Option<String>,
    /// Legend label.
    #[serde(default)]
    pub label: Option<LabelInput>,
    /// Series color.
    #[serde(default)]
    pub color: Option<String>,
    /// Reading glyph.
    #[serde(default)]
    pub shape: Option<MarkerShape>,
    /// Vertical axis assignment.
    #[serde(default)]
    pub y_axis: YAxis,
    /// Paired readings.
    #[serde(default)]
    pub values: Option<Vec<PairedValueInput>>,
    /// Horizontal bands drawn behind content.
    #[serde(default)]
    pub regions: Vec<RegionInput>,
    /// Legend options.
    #[serde(default)]
    pub legend_options: LegendOptionsInput,
}

type Pair = [Option<DataPoint>; 3];

#[derive(Debug, Clone)]
struct PairNodes {
    group: NodeId,
    line: Option<NodeId>,
    readings: [Option<NodeId>; 3],
}

/// Paired result series.
#[derive(Debug)]
pub struct PairedResult {
    config: ContentConfig,
    pairs: Vec<Pair>,
    frame: ContentFrame,
    nodes: Vec<PairNodes>,
}

/// Flattens paired readings in high/mid/low order, remembering each slot.
fn flatten(values: &[PairedValueInput]) -> (Vec<PointInput>, Vec<(usize, usize)>) {
    let mut points = Vec::new();
    let mut slots = Vec::new();
    for (pair, value) in values.iter().enumerate() {
        for (role, reading) in value.readings().into_iter().enumerate() {
            if let Some(reading) = reading {
                points.push(reading.clone());
                slots.push((pair, role));
            }
        }
    }
    (points, slots)
}

fn regroup(count: usize, points: &[DataPoint], slots: &[(usize, usize)]) -> Vec<Pair> {
    let mut pairs = vec![[None; 3]; count];
    for (point, (pair, role)) in points.iter().zip(slots) {
        pairs[*pair][*role] = Some(*point);
    }
    pairs
}

impl PairedResult {
    /// Validates input into a paired result series.
    pub fn new(input: &PairedResultInput) -> Result<Self> {
        let paired = input.values.as_deref();
        let (points, slots) = paired.map(flatten).unwrap_or_default();
        let content = ContentInput {
            key: input.key.clone(),
            label: input.label.clone(),
            color: input.color.clone(),
            shape: input.shape,
            y_axis: input.y_axis,
            values: paired.map(|_| points),
            regions: input.regions.clone(),
            legend_options: input.legend_options.clone(),
        };
        let config = validate_content(&content, DEFAULT_CONTENT_COLOR)?;
        let pairs = regroup(paired.map_or(0, <[_]>::len), &config.values, &slots);
        Ok(Self {
            config,
            pairs,
            frame: ContentFrame::default(),
            nodes: Vec::new(),
        })
    }

    /// Number of rendered pair groups.
    pub fn rendered_pairs(&self) -> usize {
        self.nodes.len()
    }

    fn set_pairs(&mut self, values: &[PairedValueInput], axis_type: AxisType) -> Result<()> {
        let (points, slots) = flatten(values);
        self.config.values = convert_points(&points, axis_type)?;
        self.pairs = regroup(values.len(), &self.config.values, &slots);
        Ok(())
    }

    fn render(&mut self, ctx: &mut GraphContext) {
        let Some(group) = self.frame.group else {
            return;
        };
        if !ctx.config.is_shown(&self.config.key) {
            return;
        }
        for (index, pair) in self.pairs.iter().enumerate() {
            let Some(pair_group) = ctx.document.append(
                group,
                Element::new("g")
                    .class("cgraph-paired-result")
                    .attr("data-index", index.to_string()),
            ) else {
                continue;
            };
            let mut line = None;
            if let Some((from, to)) = span(ctx, &self.config, pair) {
                line = ctx.document.append(
                    pair_group,
                    Element::new("line")
                        .class("cgraph-paired-line")
                        .attr("stroke", self.config.color.clone()),
                );
                if let Some(line) = line {
                    position_line(ctx, line, from, to);
                }
            }
            let mut readings = [None; 3];
            for (role, point) in pair.iter().enumerate() {
                let Some(position) = point.and_then(|point| project(ctx, &self.config, &point))
                else {
                    continue;
                };
                readings[role] =
                    append_point(ctx, pair_group, &self.config, index, position, GLYPH_SIZE);
                if let Some(node) = readings[role] {
                    ctx.document
                        .add_class(node, &format!("cgraph-paired-{}", ROLES[role]));
                }
            }
            self.nodes.push(PairNodes {
                group: pair_group,
                line,
                readings,
            });
        }
    }

    fn clear(&mut self, ctx: &mut GraphContext) {
        for nodes in self.nodes.drain(..) {
            ctx.document.remove(nodes.group);
        }
    }
}

/// Pixel end points of the high-to-low line, when both readings are present.
fn span(ctx: &GraphContext, config: &ContentConfig, pair: &Pair) -> Option<((f64, f64), (f64, f64))> {
    let high = pair[0].as_ref().and_then(|point| project(ctx, config, point))?;
    let low = pair[2].as_ref().and_then(|point| project(ctx, config, point))?;
    Some((high, low))
}

fn position_line(ctx: &mut GraphContext, line: NodeId, from: (f64, f64), to: (f64, f64)) {
    ctx.document.set_px(line, "x1", from.0);
    ctx.document.set_px(line, "y1", from.1);
    ctx.document.set_px(line, "x2", to.0);
    ctx.document.set_px(line, "y2", to.1);
}

impl Content for PairedResult {
    fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn kind(&self) -> &'static str {
        "paired-result"
    }

    fn load(&mut self, ctx: &mut GraphContext) -> Result<()> {
        self.frame = ContentFrame::attach(ctx, &self.config, self.kind());
        self.render(ctx);
        Ok(())
    }

    fn unload(&mut self, ctx: &mut GraphContext) {
        self.frame.detach(ctx, &self.config.key);
        self.nodes.clear();
    }

    fn resize(&mut self, ctx: &mut GraphContext) {
        for (nodes, pair) in self.nodes.iter().zip(&self.pairs) {
            if let (Some(line), Some((from, to))) = (nodes.line, span(ctx, &self.config, pair)) {
                position_line(ctx, line, from, to);
            }
            for (node, point) in nodes.readings.iter().zip(pair) {
                let (Some(node), Some(point)) = (node, point) else {
                    continue;
                };
                if let Some((x, y)) = project(ctx, &self.config, point) {
                    ctx.document
                        .set_attr(*node, "transform", glyph::translate(x, y));
                }
            }
        }
        self.frame.reposition(ctx, &self.config);
    }

    fn reflow(&mut self, ctx: &mut GraphContext, data: &GraphData) -> Result<()> {
        self.set_pairs(&data.paired_values, ctx.config.axis.x.axis_type)?;
        self.clear(ctx);
        self.render(ctx);
        Ok(())
    }

    fn redraw(&mut self, ctx: &mut GraphContext) {
        self.clear(ctx);
        self.render(ctx);
        self.frame.reposition(ctx, &self.config);
    }
}
