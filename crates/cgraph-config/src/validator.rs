//! Validation of consumer input into the runtime [`GraphConfig`].

use crate::content::XValue;
use crate::defaults::{
    DEFAULT_HEIGHT, DEFAULT_PADDING, DEFAULT_RESIZE_THROTTLE, DEFAULT_TICK_COUNT, MAX_TICK_COUNT,
};
use crate::schema::{
    AxesConfig, AxisSideInput, AxisSizes, AxisType, Dateline, DatelineInput, Domain, Eventline,
    EventlineInput, GraphConfig, GraphInput, Padding, TicksConfig, TicksInput, XAxisConfig,
    YAxisConfig,
};
use cgraph_common::{parse_iso_date, AxisId, GraphError, Result};
use std::time::Duration;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates consumer input and deep-clones it into a runtime configuration.
    ///
    /// Domains start at the configured limits; layout and calibration fill in
    /// the derived fields later.
    pub fn validate(input: &GraphInput) -> Result<GraphConfig> {
        let bind_to = input
            .bind_to
            .as_deref()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
            .ok_or(GraphError::MissingBindTo)?
            .to_string();

        let axis_input = input.axis.as_ref().ok_or(GraphError::MissingAxis)?;
        let x_input = axis_input.x.as_ref().ok_or(GraphError::MissingAxis)?;
        let y_input = axis_input.y.as_ref().ok_or(GraphError::MissingAxis)?;

        let x = validate_x_axis(x_input)?;
        let y = validate_y_axis(AxisId::Y, y_input, true)?;
        let y2 = match axis_input.y2.as_ref() {
            Some(y2_input) if y2_input.show.unwrap_or(false) => {
                validate_y_axis(AxisId::Y2, y2_input, true)?
            }
            _ => YAxisConfig {
                show: false,
                label: None,
                ..y.clone()
            },
        };

        let padding = resolve_padding(input);
        let is_timeseries = x.axis_type == AxisType::Timeseries;
        let datelines = input
            .dateline
            .iter()
            .map(validate_dateline)
            .collect::<Result<Vec<_>>>()?;
        let eventlines = input
            .eventline
            .iter()
            .map(validate_eventline)
            .collect::<Result<Vec<_>>>()?;
        if !is_timeseries && !(datelines.is_empty() && eventlines.is_empty()) {
            tracing::warn!("datelines and eventlines are ignored on a linear x axis");
        }

        tracing::debug!(bind_to = %bind_to, timeseries = is_timeseries, "validated graph input");

        Ok(GraphConfig {
            bind_to,
            axis: AxesConfig { x, y, y2 },
            dimension_height: input.dimension.height,
            has_custom_padding: padding.is_custom(),
            padding,
            pan_enabled: input.pan.enabled,
            datelines,
            eventlines,
            show_legend: input.show_legend.unwrap_or(true),
            show_no_data_text: input.show_no_data_text.unwrap_or(true),
            throttle: input
                .throttle
                .map_or(DEFAULT_RESIZE_THROTTLE, Duration::from_millis),
            allow_calibration: input.allow_calibration.unwrap_or(true),
            legend_pass_through: input.click_pass_through.legend,
            shown_targets: Vec::new(),
            canvas_width: 0.0,
            canvas_height: 0.0,
            height: input.dimension.height.unwrap_or(DEFAULT_HEIGHT).max(0.0),
            axis_sizes: AxisSizes::ZERO,
            axis_label_widths: AxisSizes::ZERO,
            axis_label_heights: AxisSizes::ZERO,
        })
    }
}

fn resolve_padding(input: &GraphInput) -> Padding {
    let Some(custom) = input.padding.as_ref() else {
        return DEFAULT_PADDING;
    };
    Padding {
        top: custom.top.unwrap_or(DEFAULT_PADDING.top),
        left: custom.left.unwrap_or(DEFAULT_PADDING.left),
        right: custom.right.unwrap_or(DEFAULT_PADDING.right),
        bottom: custom.bottom.unwrap_or(DEFAULT_PADDING.bottom),
    }
}

fn require_label(axis: AxisId, input: &AxisSideInput, show: bool) -> Result<Option<String>> {
    match input.label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => Ok(Some(label.to_string())),
        _ if show => Err(GraphError::MissingLabel(axis)),
        _ => Ok(None),
    }
}

fn limits(axis: AxisId, input: &AxisSideInput, axis_type: AxisType) -> Result<(XValue, XValue)> {
    let (Some(lower), Some(upper)) = (input.lower_limit.as_ref(), input.upper_limit.as_ref())
    else {
        return Err(GraphError::MissingAxisLimits(axis));
    };
    let lower = XValue::from_raw(lower, axis_type)?;
    let upper = XValue::from_raw(upper, axis_type)?;
    if lower.as_f64() > upper.as_f64() {
        return Err(GraphError::InvalidAxisLimits(axis));
    }
    Ok((lower, upper))
}

fn resolve_ticks(ticks: &TicksInput, axis_type: AxisType) -> Result<TicksConfig> {
    let values = ticks
        .values
        .as_ref()
        .map(|values| {
            values
                .iter()
                .map(|raw| XValue::from_raw(raw, axis_type))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    Ok(TicksConfig {
        values,
        count: ticks
            .count
            .unwrap_or(DEFAULT_TICK_COUNT)
            .clamp(1, MAX_TICK_COUNT),
    })
}

fn validate_x_axis(input: &AxisSideInput) -> Result<XAxisConfig> {
    let show = input.show.unwrap_or(true);
    let (lower, upper) = limits(AxisId::X, input, input.axis_type)?;
    Ok(XAxisConfig {
        axis_type: input.axis_type,
        show,
        label: require_label(AxisId::X, input, show)?,
        lower_limit: lower.as_f64(),
        upper_limit: upper.as_f64(),
        orientation: input.orientation,
        pad_domain: input.pad_domain.unwrap_or(false),
        ticks: resolve_ticks(&input.ticks, input.axis_type)?,
        domain: Domain::new(lower.as_f64(), upper.as_f64()),
    })
}

fn validate_y_axis(axis: AxisId, input: &AxisSideInput, default_show: bool) -> Result<YAxisConfig> {
    let show = input.show.unwrap_or(default_show);
    let (lower, upper) = limits(axis, input, AxisType::Linear)?;
    Ok(YAxisConfig {
        show,
        label: require_label(axis, input, show)?,
        lower_limit: lower.as_f64(),
        upper_limit: upper.as_f64(),
        pad_domain: input.pad_domain.unwrap_or(true),
        ticks: resolve_ticks(&input.ticks, AxisType::Linear)?,
        domain: Domain::new(lower.as_f64(), upper.as_f64()),
        is_range_modified: false,
    })
}

fn validate_dateline(input: &DatelineInput) -> Result<Dateline> {
    let (Some(value), Some(color), Some(shape)) =
        (input.value.as_deref(), input.color.as_deref(), input.shape)
    else {
        return Err(GraphError::InvalidDatelineInput);
    };
    if color.trim().is_empty() {
        return Err(GraphError::InvalidDatelineInput);
    }
    Ok(Dateline {
        value: parse_iso_date(value)?,
        color: color.to_string(),
        shape,
        label: input.label.as_ref().and_then(|label| label.display.clone()),
    })
}

fn validate_eventline(input: &EventlineInput) -> Result<Eventline> {
    let (Some(value), Some(color)) = (input.value.as_deref(), input.color.as_deref()) else {
        return Err(GraphError::InvalidEventlineInput);
    };
    if color.trim().is_empty() {
        return Err(GraphError::InvalidEventlineInput);
    }
    Ok(Eventline {
        value: parse_iso_date(value)?,
        color: color.to_string(),
        style: input.style.clone(),
    })
}
