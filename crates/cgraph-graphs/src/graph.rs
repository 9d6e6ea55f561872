//! The graph orchestrator: configuration, layout, scales, rendered tree, and
//! the content lifecycle (load, unload, reflow, resize, destroy).

use crate::axes;
use crate::content::{Content, GraphData};
use crate::context::GraphContext;
use crate::host::{ComputedStyle, Host};
use crate::layers::{Layer, LAYER_ORDER};
use crate::layout::LayoutCalculator;
use crate::legend::{self, LegendClickHandler};
use crate::markers::{self, DatelineClickHandler};
use crate::range::AxisRangeCalculator;
use crate::registry::ContentRegistry;
use crate::scale::Scales;
use crate::scheduler::{TransitionKind, TransitionScheduler};
use crate::svg::{Document, Element};
use crate::throttle::ResizeThrottle;
use cgraph_common::{AxisId, ContentKey, GraphError, Result};
use cgraph_config::defaults::NO_DATA_TEXT;
use cgraph_config::{ConfigValidator, GraphConfig, GraphInput, XValue};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Lifecycle state of a [`Graph`].
///
/// A graph value only exists once its input has been validated, so the
/// uninitialized state is the absence of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// Input validated, layout and scales computed; nothing rendered yet.
    Configured,
    /// Structure rendered; content may be loaded.
    Rendered,
    /// Torn down; every further operation is rejected.
    Destroyed,
}

impl fmt::Display for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configured => "configured",
            Self::Rendered => "rendered",
            Self::Destroyed => "destroyed",
        })
    }
}

/// A chart bound to one container.
pub struct Graph {
    state: GraphState,
    host: Arc<dyn Host>,
    layout: LayoutCalculator,
    ctx: GraphContext,
    registry: ContentRegistry,
    scheduler: TransitionScheduler,
    throttle: ResizeThrottle,
    legend_handler: Option<LegendClickHandler>,
    dateline_handler: Option<DatelineClickHandler>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("state", &self.state)
            .field("bind_to", &self.ctx.config.bind_to)
            .field("contents", &self.registry.keys())
            .finish_non_exhaustive()
    }
}

impl Graph {
    /// Validates input, lays out, and renders the graph structure.
    pub fn new(input: &GraphInput, host: Arc<dyn Host>) -> Result<Self> {
        let mut graph = Self::configure(input, host)?;
        graph.generate()?;
        Ok(graph)
    }

    /// Validates input and computes layout and scales without rendering.
    pub fn configure(input: &GraphInput, host: Arc<dyn Host>) -> Result<Self> {
        Self::configure_with_layout(input, host, LayoutCalculator::default())
    }

    /// Like [`Graph::configure`] with a custom layout calculator (text measurement).
    pub fn configure_with_layout(
        input: &GraphInput,
        host: Arc<dyn Host>,
        layout: LayoutCalculator,
    ) -> Result<Self> {
        let config = ConfigValidator::validate(input)?;
        let style = host
            .computed_style(&config.bind_to)
            .ok_or_else(|| GraphError::ContainerNotFound(config.bind_to.clone()))?;

        let throttle = ResizeThrottle::new(config.throttle);
        let mut ctx = GraphContext::new(config);
        AxisRangeCalculator::calibrate(&mut ctx.config, std::iter::empty());
        AxisRangeCalculator::calibrate_x(&mut ctx.config);
        layout.apply(&mut ctx.config, &style);
        ctx.rebuild_scales();

        info!(
            bind_to = %ctx.config.bind_to,
            canvas_width = ctx.config.canvas_width,
            canvas_height = ctx.config.canvas_height,
            "graph configured"
        );
        Ok(Self {
            state: GraphState::Configured,
            host,
            layout,
            ctx,
            registry: ContentRegistry::new(),
            scheduler: TransitionScheduler::new(),
            throttle,
            legend_handler: None,
            dateline_handler: None,
        })
    }

    fn require(&self, op: &'static str, expected: GraphState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GraphError::invalid_state(op, self.state))
        }
    }

    /// Creates the layer structure in paint order and draws the chrome.
    pub fn generate(&mut self) -> Result<()> {
        self.require("generate", GraphState::Configured)?;
        let timeseries = self.ctx.config.is_timeseries();
        for layer in LAYER_ORDER {
            let skip = match layer {
                Layer::Dateline | Layer::Eventline => !timeseries,
                Layer::Legend => !self.ctx.config.show_legend,
                Layer::NoData => true,
                _ => false,
            };
            if !skip {
                self.ctx.ensure_layer(layer);
            }
        }
        axes::draw_axis_labels(&mut self.ctx);
        axes::refresh(&mut self.ctx);
        markers::draw(&mut self.ctx);
        self.update_no_data();
        self.state = GraphState::Rendered;
        info!(bind_to = %self.ctx.config.bind_to, "graph generated");
        Ok(())
    }

    /// Registers content and renders it against freshly calibrated scales.
    ///
    /// Fails without side effects on a duplicate key, an x type that does not
    /// match the axis, a missing legend handler under click pass-through, or
    /// a failing content `load`.
    pub fn load_content(&mut self, content: Box<dyn Content>) -> Result<()> {
        self.require("loadContent", GraphState::Rendered)?;
        let key = content.key().clone();
        self.registry.ensure_unique(&key)?;
        content
            .config()
            .check_axis_type(self.ctx.config.axis.x.axis_type)?;
        if self.ctx.config.legend_pass_through && self.legend_handler.is_none() {
            return Err(GraphError::LegendHandlerMissing);
        }

        let snapshot = self.ctx.clone();
        self.registry.push(content)?;

        let modified = AxisRangeCalculator::calibrate(&mut self.ctx.config, self.registry.configs());
        if modified && self.ctx.config.allow_calibration {
            self.ctx.rebuild_scales();
            axes::refresh(&mut self.ctx);
        }

        let loaded = self
            .registry
            .get_mut(&key)
            .map_or(Ok(()), |content| content.load(&mut self.ctx));
        if let Err(err) = loaded {
            warn!(key = %key, error = %err, "content load failed, rolling back");
            self.registry.remove(&key);
            self.ctx = snapshot;
            return Err(err);
        }

        markers::draw(&mut self.ctx);
        self.update_no_data();
        self.resize()?;
        debug!(key = %key, contents = self.registry.len(), "content loaded");
        Ok(())
    }

    /// Unregisters content by key and removes its visuals.
    pub fn unload_content(&mut self, key: &ContentKey) -> Result<Box<dyn Content>> {
        self.require("unloadContent", GraphState::Rendered)?;
        let mut content = self.registry.remove(key).ok_or(GraphError::InvalidObject)?;
        self.scheduler.cancel_for(key);
        content.unload(&mut self.ctx);

        let modified = AxisRangeCalculator::calibrate(&mut self.ctx.config, self.registry.configs());
        if modified && self.ctx.config.allow_calibration {
            self.ctx.rebuild_scales();
            axes::refresh(&mut self.ctx);
        }
        self.update_no_data();
        self.resize()?;
        debug!(key = %key, contents = self.registry.len(), "content unloaded");
        Ok(content)
    }

    /// Replaces one content's values in place and refreshes the x axis.
    ///
    /// An unknown key is not an error: the x domain, scales, and axes are
    /// still recomputed.
    pub fn reflow(&mut self, data: &GraphData) -> Result<()> {
        self.require("reflow", GraphState::Rendered)?;
        let axis_type = self.ctx.config.axis.x.axis_type;
        let limits = data
            .x_domain
            .as_ref()
            .map(|[lower, upper]| -> Result<(f64, f64)> {
                let lower = XValue::from_raw(lower, axis_type)?.as_f64();
                let upper = XValue::from_raw(upper, axis_type)?.as_f64();
                if lower > upper {
                    return Err(GraphError::InvalidAxisLimits(AxisId::X));
                }
                Ok((lower, upper))
            })
            .transpose()?;
        let tick_values = data
            .x_ticks
            .as_ref()
            .map(|ticks| {
                ticks
                    .iter()
                    .map(|tick| XValue::from_raw(tick, axis_type))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let snapshot = self.ctx.clone();
        if let Some((lower, upper)) = limits {
            self.ctx.config.axis.x.lower_limit = lower;
            self.ctx.config.axis.x.upper_limit = upper;
        }
        if tick_values.is_some() {
            self.ctx.config.axis.x.ticks.values = tick_values;
        }
        AxisRangeCalculator::calibrate_x(&mut self.ctx.config);
        self.ctx.rebuild_scales();
        axes::refresh(&mut self.ctx);

        let Some(content) = self.registry.get_mut(&data.key) else {
            warn!(key = %data.key, "reflow matched no loaded content");
            self.apply_scales();
            return Ok(());
        };
        if let Err(err) = content.reflow(&mut self.ctx, data) {
            self.ctx = snapshot;
            return Err(err);
        }
        AxisRangeCalculator::calibrate(&mut self.ctx.config, self.registry.configs());
        self.apply_scales();
        self.update_no_data();
        debug!(key = %data.key, "content reflowed");
        Ok(())
    }

    /// Recomputes layout from the container and re-positions everything.
    ///
    /// A container the host no longer resolves keeps the last known width.
    pub fn resize(&mut self) -> Result<()> {
        self.require("resize", GraphState::Rendered)?;
        let style = self
            .host
            .computed_style(&self.ctx.config.bind_to)
            .unwrap_or_else(|| {
                warn!(bind_to = %self.ctx.config.bind_to, "container not found, keeping canvas width");
                ComputedStyle::with_width(self.ctx.config.canvas_width)
            });
        self.layout.apply(&mut self.ctx.config, &style);
        self.apply_scales();
        debug!(
            canvas_width = self.ctx.config.canvas_width,
            canvas_height = self.ctx.config.canvas_height,
            "graph resized"
        );
        Ok(())
    }

    /// Rebuilds scales, then chrome and every content's positions.
    fn apply_scales(&mut self) {
        self.ctx.rebuild_scales();
        axes::refresh(&mut self.ctx);
        markers::draw(&mut self.ctx);
        for content in self.registry.iter_mut() {
            content.resize(&mut self.ctx);
        }
    }

    fn update_no_data(&mut self) {
        let show = self.ctx.config.show_no_data_text && !self.registry.any_has_values();
        let present = self.ctx.layer(Layer::NoData).is_some();
        if show && !present {
            if let Some(layer) = self.ctx.ensure_layer(Layer::NoData) {
                self.ctx.document.append(
                    layer,
                    Element::new("div")
                        .class("cgraph-no-data-content")
                        .text(NO_DATA_TEXT),
                );
            }
        } else if !show && present {
            self.ctx.remove_layer(Layer::NoData);
        }
    }

    /// Tears the graph down: cancels transitions, drops content and handlers,
    /// and resets state. Further operations fail.
    pub fn destroy(&mut self) {
        if self.state == GraphState::Destroyed {
            return;
        }
        self.scheduler.cancel_all();
        self.throttle.cancel();
        let dropped = self.registry.drain().len();
        self.legend_handler = None;
        self.dateline_handler = None;
        let mut config = self.ctx.config.clone();
        config.reset_derived();
        self.ctx = GraphContext::new(config);
        self.state = GraphState::Destroyed;
        info!(bind_to = %self.ctx.config.bind_to, dropped, "graph destroyed");
    }

    /// Registers the legend click handler used under click pass-through.
    pub fn set_legend_handler(&mut self, handler: LegendClickHandler) {
        self.legend_handler = Some(handler);
    }

    /// Handles a legend item click for `key`.
    ///
    /// With click pass-through the handler receives the key and its shown
    /// state. Otherwise the content's visibility is toggled: hiding removes
    /// the key from the shown targets, showing appends it.
    pub fn click_legend_item(&mut self, key: &ContentKey) -> Result<()> {
        self.require("clickLegendItem", GraphState::Rendered)?;
        if !self.registry.contains(key) {
            return Err(GraphError::InvalidObject);
        }
        let shown = self.ctx.config.is_shown(key);
        if self.ctx.config.legend_pass_through {
            let handler = self
                .legend_handler
                .as_mut()
                .ok_or(GraphError::LegendHandlerMissing)?;
            handler(key, shown);
            return Ok(());
        }

        if shown {
            self.ctx.config.shown_targets.retain(|target| target != key);
        } else {
            self.ctx.config.shown_targets.push(key.clone());
        }
        if let Some(item) = legend::item_for(&self.ctx, key) {
            legend::set_active(&mut self.ctx, item, !shown);
        }
        if let Some(content) = self.registry.get_mut(key) {
            content.redraw(&mut self.ctx);
        }
        debug!(key = %key, shown = !shown, "legend item toggled");
        Ok(())
    }

    /// Schedules highlight of `key` and blur of every other content.
    pub fn hover_legend_item(&mut self, key: &ContentKey) {
        for other in self.registry.keys() {
            let kind = if &other == key {
                TransitionKind::Highlight
            } else {
                TransitionKind::Blur
            };
            self.scheduler.schedule(other, kind);
        }
    }

    /// Schedules restoring every content's emphasis.
    pub fn leave_legend_item(&mut self) {
        for key in self.registry.keys() {
            self.scheduler.schedule(key, TransitionKind::Restore);
        }
    }

    /// Applies pending transitions; returns how many reached a live node.
    pub fn flush_transitions(&mut self) -> usize {
        self.scheduler.flush(&mut self.ctx)
    }

    /// Registers the dateline click handler.
    pub fn set_dateline_handler(&mut self, handler: DatelineClickHandler) {
        self.dateline_handler = Some(handler);
    }

    /// Dispatches a click on the dateline at `index`; returns whether a handler ran.
    pub fn click_dateline(&mut self, index: usize) -> Result<bool> {
        self.require("clickDateline", GraphState::Rendered)?;
        let dateline = self
            .ctx
            .config
            .datelines
            .get(index)
            .ok_or(GraphError::InvalidObject)?;
        Ok(self.dateline_handler.as_mut().is_some_and(|handler| {
            handler(dateline);
            true
        }))
    }

    /// Records a container resize notification.
    pub fn request_resize(&mut self, now: Instant) {
        self.throttle.request(now);
    }

    /// Runs a pending resize once the throttle delay has elapsed since the
    /// last request; returns whether it ran.
    pub fn poll_resize(&mut self, now: Instant) -> Result<bool> {
        if self.state != GraphState::Rendered || !self.throttle.take_ready(now) {
            return Ok(false);
        }
        self.resize()?;
        Ok(true)
    }

    /// Serialized markup of the rendered tree; empty once destroyed.
    pub fn render_markup(&self) -> String {
        match self.state {
            GraphState::Destroyed => String::new(),
            _ => self.ctx.document.render(),
        }
    }

    /// Lifecycle state.
    pub const fn state(&self) -> GraphState {
        self.state
    }

    /// Runtime configuration.
    pub const fn config(&self) -> &GraphConfig {
        &self.ctx.config
    }

    /// Current scales.
    pub const fn scales(&self) -> &Scales {
        &self.ctx.scales
    }

    /// Rendered tree.
    pub const fn document(&self) -> &Document {
        &self.ctx.document
    }

    /// Layers currently present, in document order.
    pub fn layers(&self) -> Vec<Layer> {
        self.ctx.layers.present(&self.ctx.document)
    }

    /// Loaded content keys in load order.
    pub fn content_keys(&self) -> Vec<ContentKey> {
        self.registry.keys()
    }

    /// Loaded content by key.
    pub fn content(&self, key: &ContentKey) -> Option<&dyn Content> {
        self.registry.get(key)
    }

    /// Number of loaded contents.
    pub fn content_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether the no-data overlay is displayed.
    pub fn has_no_data_view(&self) -> bool {
        self.ctx.layer(Layer::NoData).is_some()
    }

    /// Number of legend items.
    pub fn legend_item_count(&self) -> usize {
        legend::item_count(&self.ctx)
    }

    /// Number of axis label shapes.
    pub fn label_shape_count(&self) -> usize {
        axes::label_shape_count(&self.ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Line;
    use crate::host::StaticHost;
    use cgraph_common::test_utils::{config_fixtures, init_test_logging};
    use cgraph_config::{ConfigLoader, ContentInput, PointInput};

    fn host() -> Arc<StaticHost> {
        Arc::new(StaticHost::new().with_container(
            "#testGraph_carbon",
            ComputedStyle::with_width(1024.0),
        ))
    }

    fn graph() -> Graph {
        init_test_logging();
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        Graph::new(&input, host()).unwrap()
    }

    fn line(key: &str, points: &[(f64, Option<f64>)]) -> Box<dyn Content> {
        let input = ContentInput {
            key: Some(key.to_string()),
            values: Some(points.iter().map(|(x, y)| PointInput::new(*x, *y)).collect()),
            ..ContentInput::default()
        };
        Box::new(Line::new(&input).unwrap())
    }

    #[test]
    fn test_missing_container() {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        let err = Graph::new(&input, Arc::new(StaticHost::new())).unwrap_err();
        assert_eq!(
            err,
            GraphError::ContainerNotFound("#testGraph_carbon".to_string())
        );
    }

    #[test]
    fn test_configure_then_generate() {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        let mut graph = Graph::configure(&input, host()).unwrap();
        assert_eq!(graph.state(), GraphState::Configured);
        assert!(graph.load_content(line("a", &[])).is_err());
        graph.generate().unwrap();
        assert_eq!(graph.state(), GraphState::Rendered);
        assert!(graph.generate().is_err());
    }

    #[test]
    fn test_failed_type_check_leaves_no_trace() {
        let mut graph = graph();
        let markup = graph.render_markup();
        let input = ContentInput {
            key: Some("uid_1".to_string()),
            values: Some(vec![PointInput {
                x: "2016-01-01T00:00:00Z".into(),
                y: Some(1.0),
                weight: None,
            }]),
            ..ContentInput::default()
        };
        let err = graph
            .load_content(Box::new(Line::new(&input).unwrap()))
            .unwrap_err();
        assert_eq!(err, GraphError::AxisTypeMismatch);
        assert_eq!(graph.content_count(), 0);
        assert_eq!(graph.render_markup(), markup);
    }

    #[test]
    fn test_legend_toggle_reorders_shown_targets() {
        let mut graph = graph();
        graph.load_content(line("a", &[(1.0, Some(1.0))])).unwrap();
        graph.load_content(line("b", &[(2.0, Some(2.0))])).unwrap();

        let a = ContentKey::from("a");
        graph.click_legend_item(&a).unwrap();
        assert_eq!(graph.config().shown_targets, vec![ContentKey::from("b")]);
        graph.click_legend_item(&a).unwrap();
        assert_eq!(
            graph.config().shown_targets,
            vec![ContentKey::from("b"), ContentKey::from("a")]
        );
    }

    #[test]
    fn test_legend_pass_through_requires_handler() {
        let mut input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        input.click_pass_through.legend = true;
        let mut graph = Graph::new(&input, host()).unwrap();
        assert_eq!(
            graph.load_content(line("a", &[])).unwrap_err(),
            GraphError::LegendHandlerMissing
        );

        let clicks = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicks);
        graph.set_legend_handler(Box::new(move |key, shown| {
            sink.lock().push((key.clone(), shown));
        }));
        graph.load_content(line("a", &[])).unwrap();
        graph.click_legend_item(&ContentKey::from("a")).unwrap();
        assert_eq!(clicks.lock().as_slice(), &[(ContentKey::from("a"), true)]);
        assert_eq!(graph.config().shown_targets.len(), 1);
    }

    #[test]
    fn test_hover_transitions() {
        let mut graph = graph();
        graph.load_content(line("a", &[(1.0, Some(1.0))])).unwrap();
        graph.load_content(line("b", &[(2.0, Some(2.0))])).unwrap();
        graph.hover_legend_item(&ContentKey::from("a"));
        graph.unload_content(&ContentKey::from("b")).unwrap();
        assert_eq!(graph.flush_transitions(), 1);
        graph.leave_legend_item();
        graph.destroy();
        assert_eq!(graph.flush_transitions(), 0);
    }

    #[test]
    fn test_destroy_rejects_further_use() {
        let mut graph = graph();
        graph.load_content(line("a", &[(1.0, Some(1.0))])).unwrap();
        graph.destroy();
        assert_eq!(graph.state(), GraphState::Destroyed);
        assert_eq!(graph.content_count(), 0);
        assert!(graph.render_markup().is_empty());
        let err = graph.resize().unwrap_err();
        assert_eq!(err.to_string(), "Invalid Usage: resize is not allowed while the graph is destroyed");
        graph.destroy();
    }

    #[test]
    fn test_resize_throttle() {
        let mut graph = graph();
        let start = Instant::now();
        graph.request_resize(start);
        assert!(!graph.poll_resize(start).unwrap());
        assert!(graph
            .poll_resize(start + graph.config().throttle)
            .unwrap());
    }
}
