//! # cgraph Graphs
//!
//! Graph lifecycle, coordinate and scale engine, and SVG content rendering.
//!
//! A [`Graph`] owns a validated configuration, a retained SVG [`svg::Document`],
//! and the scales derived from both. Content series implementing [`Content`]
//! are loaded, reflowed, and unloaded incrementally; every change recalibrates
//! axis domains against the union of loaded data and re-positions the chart.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod axes;
pub mod content;
pub mod context;
pub mod glyph;
pub mod graph;
pub mod host;
pub mod layers;
pub mod layout;
pub mod legend;
pub mod markers;
pub mod range;
pub mod regions;
pub mod registry;
pub mod scale;
pub mod scheduler;
pub mod svg;
pub mod throttle;
pub mod ticks;

pub use content::{
    Bubble, Content, GraphData, Line, PairedResult, PairedResultInput, PairedValueInput, Scatter,
};
pub use context::GraphContext;
pub use graph::{Graph, GraphState};
pub use host::{BoxSizing, ComputedStyle, Host, StaticHost};
pub use layers::Layer;
pub use layout::{ApproxTextMeasure, LayoutCalculator, TextMeasure};
pub use range::AxisRangeCalculator;
pub use scale::{LinearScale, Scales, TimeScale, XScale};
