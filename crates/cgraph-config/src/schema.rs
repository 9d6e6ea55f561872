//! Configuration schema: consumer input types and the runtime graph configuration.
//!
//! Input types mirror the JSON shape consumers write (camelCase keys, optional
//! fields). [`GraphConfig`] is the validated, owned snapshot a graph mutates in
//! place as layout and domains are recomputed.

use crate::content::{RawValue, XValue};
use crate::defaults;
use cgraph_common::{AxisId, ContentKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level consumer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInput {
    /// CSS selector of the container element.
    #[serde(default)]
    pub bind_to: Option<String>,
    /// Axis configuration.
    #[serde(default)]
    pub axis: Option<AxisInput>,
    /// Explicit dimension overrides.
    #[serde(default)]
    pub dimension: DimensionInput,
    /// Canvas padding; unspecified sides use defaults.
    #[serde(default)]
    pub padding: Option<PaddingInput>,
    /// Panning options.
    #[serde(default)]
    pub pan: PanInput,
    /// Dateline markers (time-series only).
    #[serde(default)]
    pub dateline: Vec<DatelineInput>,
    /// Eventline markers (time-series only).
    #[serde(default)]
    pub eventline: Vec<EventlineInput>,
    /// Whether to render the legend.
    #[serde(default)]
    pub show_legend: Option<bool>,
    /// Whether to render the "no data" overlay when nothing is plotted.
    #[serde(default)]
    pub show_no_data_text: Option<bool>,
    /// Resize debounce delay in milliseconds.
    #[serde(default)]
    pub throttle: Option<u64>,
    /// Whether y domains are recalibrated from loaded content.
    #[serde(default)]
    pub allow_calibration: Option<bool>,
    /// Click events routed to consumer handlers instead of built-in behavior.
    #[serde(default)]
    pub click_pass_through: ClickPassThroughInput,
}

/// Per-axis input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisInput {
    /// Horizontal axis.
    #[serde(default)]
    pub x: Option<AxisSideInput>,
    /// Primary vertical axis.
    #[serde(default)]
    pub y: Option<AxisSideInput>,
    /// Secondary vertical axis.
    #[serde(default)]
    pub y2: Option<AxisSideInput>,
}

/// Input for a single axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSideInput {
    /// Scale type; only meaningful on the x axis.
    #[serde(default, rename = "type")]
    pub axis_type: AxisType,
    /// Whether the axis is rendered.
    #[serde(default)]
    pub show: Option<bool>,
    /// Axis label text.
    #[serde(default)]
    pub label: Option<String>,
    /// Lower domain limit.
    #[serde(default)]
    pub lower_limit: Option<RawValue>,
    /// Upper domain limit.
    #[serde(default)]
    pub upper_limit: Option<RawValue>,
    /// Axis placement; only meaningful on the x axis.
    #[serde(default)]
    pub orientation: XOrientation,
    /// Whether the domain is padded beyond the data extent.
    #[serde(default)]
    pub pad_domain: Option<bool>,
    /// Tick options.
    #[serde(default)]
    pub ticks: TicksInput,
}

/// Tick options for an axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicksInput {
    /// Explicit tick values.
    #[serde(default)]
    pub values: Option<Vec<RawValue>>,
    /// Suggested number of generated ticks.
    #[serde(default)]
    pub count: Option<usize>,
}

/// Scale type of the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    /// Numeric values mapped linearly.
    #[default]
    Linear,
    /// ISO-8601 dates mapped on a time scale.
    Timeseries,
}

/// Placement of the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XOrientation {
    /// Below the plot area.
    #[default]
    Bottom,
    /// Above the plot area.
    Top,
}

/// Explicit dimension overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionInput {
    /// Plot height in pixels.
    #[serde(default)]
    pub height: Option<f64>,
}

/// Padding sides; `None` falls back to the default for that side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaddingInput {
    /// Top padding.
    #[serde(default)]
    pub top: Option<f64>,
    /// Left padding.
    #[serde(default)]
    pub left: Option<f64>,
    /// Right padding.
    #[serde(default)]
    pub right: Option<f64>,
    /// Bottom padding.
    #[serde(default)]
    pub bottom: Option<f64>,
}

/// Panning options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanInput {
    /// When true, scales do not clamp output to their range.
    #[serde(default)]
    pub enabled: bool,
}

/// Click pass-through switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickPassThroughInput {
    /// Legend item clicks go to the consumer handler instead of toggling.
    #[serde(default)]
    pub legend: bool,
}

/// Marker glyph shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    /// Circle glyph.
    #[default]
    Circle,
    /// Square glyph.
    Square,
    /// Upward triangle glyph.
    Triangle,
    /// Diamond glyph.
    Diamond,
    /// Cross glyph.
    Cross,
}

impl MarkerShape {
    /// Name used in class attributes.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Cross => "cross",
        }
    }
}

/// Label text wrapper used by datelines and content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelInput {
    /// Display text.
    #[serde(default)]
    pub display: Option<String>,
}

/// Dateline descriptor input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatelineInput {
    /// ISO-8601 date the line marks.
    #[serde(default)]
    pub value: Option<String>,
    /// Line and glyph color.
    #[serde(default)]
    pub color: Option<String>,
    /// Glyph drawn at the top of the line.
    #[serde(default)]
    pub shape: Option<MarkerShape>,
    /// Optional popup label.
    #[serde(default)]
    pub label: Option<LabelInput>,
}

/// Eventline descriptor input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventlineInput {
    /// ISO-8601 date the line marks.
    #[serde(default)]
    pub value: Option<String>,
    /// Line color.
    #[serde(default)]
    pub color: Option<String>,
    /// Stroke dash array, e.g. `"4,4"`.
    #[serde(default)]
    pub style: Option<String>,
}

/// Data-space interval an axis represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Lower bound.
    pub lower_limit: f64,
    /// Upper bound.
    pub upper_limit: f64,
}

impl Domain {
    /// Creates a new domain.
    pub const fn new(lower_limit: f64, upper_limit: f64) -> Self {
        Self {
            lower_limit,
            upper_limit,
        }
    }

    /// Span of the domain.
    pub fn span(&self) -> f64 {
        self.upper_limit - self.lower_limit
    }

    /// Whether `value` lies within the domain, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_limit && value <= self.upper_limit
    }
}

/// Resolved tick options.
#[derive(Debug, Clone, PartialEq)]
pub struct TicksConfig {
    /// Explicit tick values; generated when `None`.
    pub values: Option<Vec<XValue>>,
    /// Suggested number of generated ticks.
    pub count: usize,
}

/// Resolved x axis configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisConfig {
    /// Scale type.
    pub axis_type: AxisType,
    /// Whether the axis is rendered.
    pub show: bool,
    /// Axis label text.
    pub label: Option<String>,
    /// Configured lower limit (epoch milliseconds for time-series).
    pub lower_limit: f64,
    /// Configured upper limit (epoch milliseconds for time-series).
    pub upper_limit: f64,
    /// Axis placement.
    pub orientation: XOrientation,
    /// Whether the domain is padded.
    pub pad_domain: bool,
    /// Tick options.
    pub ticks: TicksConfig,
    /// Current domain, post-padding.
    pub domain: Domain,
}

/// Resolved y or y2 axis configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxisConfig {
    /// Whether the axis is rendered.
    pub show: bool,
    /// Axis label text.
    pub label: Option<String>,
    /// Configured lower limit.
    pub lower_limit: f64,
    /// Configured upper limit.
    pub upper_limit: f64,
    /// Whether the domain is padded.
    pub pad_domain: bool,
    /// Tick options.
    pub ticks: TicksConfig,
    /// Current domain, post-padding.
    pub domain: Domain,
    /// Whether the last calibration changed the domain.
    pub is_range_modified: bool,
}

/// All three axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesConfig {
    /// Horizontal axis.
    pub x: XAxisConfig,
    /// Primary vertical axis.
    pub y: YAxisConfig,
    /// Secondary vertical axis.
    pub y2: YAxisConfig,
}

impl AxesConfig {
    /// Vertical axis config by id; `AxisId::X` maps to `None`.
    pub const fn vertical(&self, axis: AxisId) -> Option<&YAxisConfig> {
        match axis {
            AxisId::Y => Some(&self.y),
            AxisId::Y2 => Some(&self.y2),
            AxisId::X => None,
        }
    }

    /// Mutable vertical axis config by id.
    pub fn vertical_mut(&mut self, axis: AxisId) -> Option<&mut YAxisConfig> {
        match axis {
            AxisId::Y => Some(&mut self.y),
            AxisId::Y2 => Some(&mut self.y2),
            AxisId::X => None,
        }
    }
}

/// Resolved canvas padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top padding.
    pub top: f64,
    /// Left padding.
    pub left: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
}

/// Per-axis pixel measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSizes {
    /// Horizontal axis.
    pub x: f64,
    /// Primary vertical axis.
    pub y: f64,
    /// Secondary vertical axis.
    pub y2: f64,
}

impl AxisSizes {
    /// Measurement for one axis.
    pub const fn get(&self, axis: AxisId) -> f64 {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            AxisId::Y2 => self.y2,
        }
    }
}

/// Validated dateline.
#[derive(Debug, Clone, PartialEq)]
pub struct Dateline {
    /// Date the line marks.
    pub value: DateTime<Utc>,
    /// Line and glyph color.
    pub color: String,
    /// Glyph shape.
    pub shape: MarkerShape,
    /// Popup label text.
    pub label: Option<String>,
}

/// Validated eventline.
#[derive(Debug, Clone, PartialEq)]
pub struct Eventline {
    /// Date the line marks.
    pub value: DateTime<Utc>,
    /// Line color.
    pub color: String,
    /// Stroke dash array.
    pub style: Option<String>,
}

/// Runtime configuration owned and mutated by one graph instance.
///
/// Validated fields are fixed at construction; derived fields (canvas size,
/// axis measurements, domains, shown targets) are rewritten by layout and
/// calibration passes and read back by every later step of the same call.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Container selector.
    pub bind_to: String,
    /// Axis configuration.
    pub axis: AxesConfig,
    /// Explicit plot height.
    pub dimension_height: Option<f64>,
    /// Canvas padding.
    pub padding: Padding,
    /// Whether any padding side deviates from the defaults.
    ///
    /// Informational for consumers; layout always uses [`Self::padding`] as given.
    pub has_custom_padding: bool,
    /// Whether panning is enabled (disables scale clamping).
    pub pan_enabled: bool,
    /// Dateline markers.
    pub datelines: Vec<Dateline>,
    /// Eventline markers.
    pub eventlines: Vec<Eventline>,
    /// Whether to render the legend.
    pub show_legend: bool,
    /// Whether to render the no-data overlay.
    pub show_no_data_text: bool,
    /// Resize debounce delay.
    pub throttle: Duration,
    /// Whether y domains follow loaded content.
    pub allow_calibration: bool,
    /// Legend clicks are routed to the consumer handler.
    pub legend_pass_through: bool,
    /// Content keys currently toggled visible, in stacking order.
    pub shown_targets: Vec<ContentKey>,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Plot area height in pixels.
    pub height: f64,
    /// Tick area size per axis.
    pub axis_sizes: AxisSizes,
    /// Label area width per axis.
    pub axis_label_widths: AxisSizes,
    /// Label area height per axis.
    pub axis_label_heights: AxisSizes,
}

impl GraphConfig {
    /// Whether the x axis is a time-series axis.
    pub fn is_timeseries(&self) -> bool {
        self.axis.x.axis_type == AxisType::Timeseries
    }

    /// Whether the content key is currently toggled visible.
    pub fn is_shown(&self, key: &ContentKey) -> bool {
        self.shown_targets.contains(key)
    }

    /// Plot area width: canvas minus padding and vertical axis reservations.
    pub fn plot_width(&self) -> f64 {
        let reserved = self.padding.left
            + self.padding.right
            + self.axis_sizes.y
            + self.axis_label_widths.y
            + self.axis_sizes.y2
            + self.axis_label_widths.y2;
        (self.canvas_width - reserved).max(0.0)
    }

    /// Left edge of the plot area within the canvas.
    pub fn plot_left(&self) -> f64 {
        self.padding.left + self.axis_sizes.y + self.axis_label_widths.y
    }

    /// Top edge of the plot area within the canvas.
    pub fn plot_top(&self) -> f64 {
        let top_axis = if self.axis.x.orientation == XOrientation::Top {
            self.axis_sizes.x + self.axis_label_heights.x
        } else {
            0.0
        };
        self.padding.top + top_axis
    }

    /// Resets derived fields to their pre-layout state.
    pub fn reset_derived(&mut self) {
        self.shown_targets.clear();
        self.canvas_width = 0.0;
        self.canvas_height = 0.0;
        self.height = self.dimension_height.unwrap_or(defaults::DEFAULT_HEIGHT);
        self.axis_sizes = AxisSizes::default();
        self.axis_label_widths = AxisSizes::default();
        self.axis_label_heights = AxisSizes::default();
    }
}
