//! Content (data series) configuration and its shared validate-and-clone path.
//!
//! Every content variant (line, scatter, bubble, paired result) builds its
//! [`ContentConfig`] through [`validate_content`], so key/values/region checks
//! and date parsing behave identically across variants.

use crate::schema::{AxisType, LabelInput, MarkerShape};
use cgraph_common::{parse_iso_date, to_epoch_millis, ContentKey, GraphError, Result, YAxis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Untyped scalar as written by consumers: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric value.
    Number(f64),
    /// Text value, expected to be an ISO-8601 date.
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Typed x value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XValue {
    /// Value on a linear axis.
    Number(f64),
    /// Value on a time-series axis.
    Time(DateTime<Utc>),
}

impl XValue {
    /// Axis type this value belongs on.
    pub const fn axis_type(&self) -> AxisType {
        match self {
            Self::Number(_) => AxisType::Linear,
            Self::Time(_) => AxisType::Timeseries,
        }
    }

    /// Numeric position in domain space (epoch milliseconds for times).
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Time(timestamp) => to_epoch_millis(*timestamp),
        }
    }

    /// Converts a raw value for an axis of the given type.
    pub fn from_raw(raw: &RawValue, axis_type: AxisType) -> Result<Self> {
        match (raw, axis_type) {
            (RawValue::Number(value), AxisType::Linear) => Ok(Self::Number(*value)),
            (RawValue::Text(text), AxisType::Timeseries) => parse_iso_date(text).map(Self::Time),
            _ => Err(GraphError::AxisTypeMismatch),
        }
    }
}

impl TryFrom<&RawValue> for XValue {
    type Error = GraphError;

    fn try_from(raw: &RawValue) -> Result<Self> {
        match raw {
            RawValue::Number(value) => Ok(Self::Number(*value)),
            RawValue::Text(text) => parse_iso_date(text).map(Self::Time),
        }
    }
}

/// Data point as written by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInput {
    /// X value.
    pub x: RawValue,
    /// Y value; `null` marks a gap.
    #[serde(default)]
    pub y: Option<f64>,
    /// Bubble weight.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PointInput {
    /// Numeric point.
    pub const fn new(x: f64, y: Option<f64>) -> Self {
        Self {
            x: RawValue::Number(x),
            y,
            weight: None,
        }
    }
}

/// Validated data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// X value.
    pub x: XValue,
    /// Y value; `None` marks a gap.
    pub y: Option<f64>,
    /// Bubble weight.
    pub weight: Option<f64>,
}

/// Region input: a horizontal band on one vertical axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInput {
    /// Axis the band is measured on.
    #[serde(default)]
    pub axis: YAxis,
    /// Band start; open-ended towards the axis lower limit when absent.
    #[serde(default)]
    pub start: Option<f64>,
    /// Band end; open-ended towards the axis upper limit when absent.
    #[serde(default)]
    pub end: Option<f64>,
    /// Fill color.
    #[serde(default)]
    pub color: Option<String>,
}

/// Validated region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    /// Axis the band is measured on.
    pub axis: YAxis,
    /// Band start.
    pub start: Option<f64>,
    /// Band end.
    pub end: Option<f64>,
    /// Fill color.
    pub color: String,
}

/// Legend presence options for one content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptionsInput {
    /// Whether the content gets a legend item.
    #[serde(default = "default_show_element")]
    pub show_element: bool,
}

const fn default_show_element() -> bool {
    true
}

impl Default for LegendOptionsInput {
    fn default() -> Self {
        Self { show_element: true }
    }
}

/// Content input as written by consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    /// Unique key within one graph.
    #[serde(default)]
    pub key: Option<String>,
    /// Legend label.
    #[serde(default)]
    pub label: Option<LabelInput>,
    /// Series color.
    #[serde(default)]
    pub color: Option<String>,
    /// Point glyph.
    #[serde(default)]
    pub shape: Option<MarkerShape>,
    /// Vertical axis assignment.
    #[serde(default)]
    pub y_axis: YAxis,
    /// Data points.
    #[serde(default)]
    pub values: Option<Vec<PointInput>>,
    /// Horizontal bands drawn behind content.
    #[serde(default)]
    pub regions: Vec<RegionInput>,
    /// Legend options.
    #[serde(default)]
    pub legend_options: LegendOptionsInput,
}

/// Validated, owned content configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    /// Unique key within one graph.
    pub key: ContentKey,
    /// Legend label.
    pub label: String,
    /// Series color.
    pub color: String,
    /// Point glyph.
    pub shape: MarkerShape,
    /// Vertical axis assignment.
    pub y_axis: YAxis,
    /// Data points.
    pub values: Vec<DataPoint>,
    /// Horizontal bands.
    pub regions: Vec<RegionConfig>,
    /// Whether the content gets a legend item.
    pub show_in_legend: bool,
}

impl ContentConfig {
    /// Fails with [`GraphError::AxisTypeMismatch`] if any x value does not fit the axis type.
    pub fn check_axis_type(&self, axis_type: AxisType) -> Result<()> {
        if self.values.iter().all(|point| point.x.axis_type() == axis_type) {
            Ok(())
        } else {
            Err(GraphError::AxisTypeMismatch)
        }
    }

    /// Whether at least one point has a y value.
    pub fn has_values(&self) -> bool {
        self.values.iter().any(|point| point.y.is_some())
    }
}

/// Validates consumer content input and clones it into an owned [`ContentConfig`].
pub fn validate_content(input: &ContentInput, default_color: &str) -> Result<ContentConfig> {
    let key = input
        .key
        .as_deref()
        .map(ContentKey::new)
        .filter(|key| !key.is_blank())
        .ok_or(GraphError::MissingKey)?;
    let raw_values = input.values.as_ref().ok_or(GraphError::MissingValues)?;

    let values = raw_values
        .iter()
        .map(|point| {
            Ok(DataPoint {
                x: XValue::try_from(&point.x)?,
                y: point.y.filter(|y| y.is_finite()),
                weight: point.weight,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let regions = input
        .regions
        .iter()
        .map(|region| validate_region(region, default_color))
        .collect::<Result<Vec<_>>>()?;

    let label = input
        .label
        .as_ref()
        .and_then(|label| label.display.clone())
        .unwrap_or_else(|| key.to_string());

    tracing::trace!(key = %key, points = values.len(), "validated content input");

    Ok(ContentConfig {
        key,
        label,
        color: input.color.clone().unwrap_or_else(|| default_color.to_string()),
        shape: input.shape.unwrap_or_default(),
        y_axis: input.y_axis,
        values,
        regions,
        show_in_legend: input.legend_options.show_element,
    })
}

fn validate_region(region: &RegionInput, default_color: &str) -> Result<RegionConfig> {
    if let (Some(start), Some(end)) = (region.start, region.end) {
        if start > end {
            return Err(GraphError::InvalidRegion);
        }
    }
    Ok(RegionConfig {
        axis: region.axis,
        start: region.start,
        end: region.end,
        color: region.color.clone().unwrap_or_else(|| default_color.to_string()),
    })
}
