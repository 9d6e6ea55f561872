//! Canvas geometry: container width, plot height, and reserved axis space.

use crate::host::ComputedStyle;
use crate::ticks;
use cgraph_common::{format_number, format_timestamp, AxisId, Size};
use cgraph_config::defaults::{DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, LABEL_SPACING, TICK_SIZE};
use cgraph_config::{AxisSizes, GraphConfig, TicksConfig, XValue, YAxisConfig};

/// Measures rendered text.
pub trait TextMeasure: Send + Sync {
    /// Bounding box of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Font-agnostic estimate: fixed advance per character and a fixed line height.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font_size: f64) -> Size {
        Size::new(
            text.chars().count() as f64 * font_size * 0.6,
            font_size * 1.2,
        )
    }
}

/// Computes canvas and axis geometry.
pub struct LayoutCalculator {
    measurer: Box<dyn TextMeasure>,
    font_size: f64,
}

impl Default for LayoutCalculator {
    fn default() -> Self {
        Self::new(Box::new(ApproxTextMeasure))
    }
}

impl std::fmt::Debug for LayoutCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCalculator")
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

impl LayoutCalculator {
    /// Creates a calculator with a custom text measurer.
    pub fn new(measurer: Box<dyn TextMeasure>) -> Self {
        Self {
            measurer,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Container content width: computed width minus the box-sizing parameters.
    pub fn compute_canvas_width(&self, style: &ComputedStyle) -> f64 {
        (style.width - style.box_sizing_parameters()).max(0.0)
    }

    /// Plot height: the explicit override, else the default height.
    pub fn compute_height(&self, config: &GraphConfig) -> f64 {
        config.dimension_height.unwrap_or(DEFAULT_HEIGHT).max(0.0)
    }

    /// Tick area size per axis; hidden axes reserve nothing.
    pub fn compute_axes_sizes(&self, config: &GraphConfig) -> AxisSizes {
        let line_height = self.measurer.measure("0", self.font_size).height;
        AxisSizes {
            x: if config.axis.x.show {
                TICK_SIZE + line_height
            } else {
                0.0
            },
            y: self.vertical_axis_size(&config.axis.y),
            y2: self.vertical_axis_size(&config.axis.y2),
        }
    }

    fn vertical_axis_size(&self, axis: &YAxisConfig) -> f64 {
        if !axis.show {
            return 0.0;
        }
        let widest = tick_texts(&axis.ticks, axis.domain.lower_limit, axis.domain.upper_limit)
            .iter()
            .map(|text| self.measurer.measure(text, self.font_size).width)
            .fold(0.0, f64::max);
        TICK_SIZE + widest + TICK_SIZE / 2.0
    }

    /// Label area sizes per axis: `(widths, heights)`.
    pub fn compute_axes_label_sizes(&self, config: &GraphConfig) -> (AxisSizes, AxisSizes) {
        let mut widths = AxisSizes::ZERO;
        let mut heights = AxisSizes::ZERO;
        for axis in AxisId::ALL {
            let (show, label) = match axis {
                AxisId::X => (config.axis.x.show, config.axis.x.label.as_deref()),
                AxisId::Y => (config.axis.y.show, config.axis.y.label.as_deref()),
                AxisId::Y2 => (config.axis.y2.show, config.axis.y2.label.as_deref()),
            };
            let Some(label) = label.filter(|_| show) else {
                continue;
            };
            let size = self.measurer.measure(label, self.font_size);
            match axis {
                AxisId::X => {
                    widths.x = size.width;
                    heights.x = size.height + LABEL_SPACING;
                }
                // Vertical labels are rotated; their height becomes reserved width.
                AxisId::Y => {
                    widths.y = size.height + LABEL_SPACING;
                    heights.y = size.width;
                }
                AxisId::Y2 => {
                    widths.y2 = size.height + LABEL_SPACING;
                    heights.y2 = size.width;
                }
            }
        }
        (widths, heights)
    }

    /// Canvas height from the plot height, padding, and x axis reservations.
    ///
    /// Bottom padding is doubled when the x axis is shown or labelled so both
    /// the ticks and the label text get breathing room.
    pub fn compute_canvas_height(&self, config: &GraphConfig) -> f64 {
        let x = &config.axis.x;
        let bottom_factor = if x.show || x.label.is_some() { 2.0 } else { 1.0 };
        let total = config.height
            + config.padding.top
            + config.padding.bottom * bottom_factor
            + config.axis_sizes.x
            + config.axis_label_heights.x;
        total.max(0.0)
    }

    /// Writes every derived geometry field of `config` for the given container.
    pub fn apply(&self, config: &mut GraphConfig, style: &ComputedStyle) {
        config.height = self.compute_height(config);
        config.axis_sizes = self.compute_axes_sizes(config);
        let (widths, heights) = self.compute_axes_label_sizes(config);
        config.axis_label_widths = widths;
        config.axis_label_heights = heights;
        config.canvas_width = self.compute_canvas_width(style);
        config.canvas_height = self.compute_canvas_height(config);
        tracing::trace!(
            canvas_width = config.canvas_width,
            canvas_height = config.canvas_height,
            height = config.height,
            "layout computed"
        );
    }
}

/// Tick label texts for an axis: explicit values when configured, else generated.
pub fn tick_texts(ticks_config: &TicksConfig, lower: f64, upper: f64) -> Vec<String> {
    match &ticks_config.values {
        Some(values) => values
            .iter()
            .map(|value| match value {
                XValue::Number(number) => format_number(*number),
                XValue::Time(timestamp) => format_timestamp(*timestamp),
            })
            .collect(),
        None => ticks::linear_ticks(lower, upper, ticks_config.count)
            .into_iter()
            .map(ticks::format_linear_tick)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BoxSizing;
    use cgraph_common::test_utils::config_fixtures;
    use cgraph_config::{ConfigLoader, ConfigValidator, Padding};

    fn config() -> GraphConfig {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        ConfigValidator::validate(&input).unwrap()
    }

    #[test]
    fn test_canvas_width_subtracts_box_parameters() {
        let layout = LayoutCalculator::default();
        let style = ComputedStyle {
            width: 1024.0,
            padding_left: 10.0,
            padding_right: 10.0,
            margin_left: 2.0,
            margin_right: 2.0,
            border_left: 1.0,
            border_right: 1.0,
            box_sizing: BoxSizing::BorderBox,
        };
        assert_eq!(layout.compute_canvas_width(&style), 998.0);
        assert_eq!(
            layout.compute_canvas_width(&ComputedStyle::with_width(0.0)),
            0.0
        );
    }

    #[test]
    fn test_height_override() {
        let layout = LayoutCalculator::default();
        let mut config = config();
        assert_eq!(layout.compute_height(&config), DEFAULT_HEIGHT);
        config.dimension_height = Some(400.0);
        assert_eq!(layout.compute_height(&config), 400.0);
    }

    #[test]
    fn test_hidden_axes_reserve_nothing() {
        let layout = LayoutCalculator::default();
        let mut config = config();
        config.axis.x.show = false;
        config.axis.y.show = false;
        let sizes = layout.compute_axes_sizes(&config);
        assert_eq!(sizes, AxisSizes::ZERO);
        assert_eq!(sizes.y2, 0.0);
    }

    #[test]
    fn test_label_sizes() {
        let layout = LayoutCalculator::default();
        let (widths, heights) = layout.compute_axes_label_sizes(&config());
        assert!(widths.y > 0.0);
        assert!(heights.x > 0.0);
        assert_eq!(widths.y2, 0.0);
    }

    #[test]
    fn test_canvas_height_doubles_bottom_padding() {
        let layout = LayoutCalculator::default();
        let mut config = config();
        layout.apply(&mut config, &ComputedStyle::with_width(800.0));
        let expected = config.height
            + config.padding.top
            + config.padding.bottom * 2.0
            + config.axis_sizes.x
            + config.axis_label_heights.x;
        assert_eq!(config.canvas_height, expected);
        assert_eq!(config.canvas_width, 800.0);
    }

    #[test]
    fn test_negative_padding_is_not_clamped() {
        let layout = LayoutCalculator::default();
        let mut config = config();
        config.padding = Padding {
            top: -10.0,
            left: -5.0,
            right: 0.0,
            bottom: 0.0,
        };
        layout.apply(&mut config, &ComputedStyle::with_width(500.0));
        assert_eq!(config.padding.top, -10.0);
        assert!(config.plot_width() > 500.0 - config.axis_sizes.y - config.axis_label_widths.y);
    }

    #[test]
    fn test_degenerate_layout_does_not_go_negative() {
        let layout = LayoutCalculator::default();
        let mut config = config();
        config.dimension_height = Some(-50.0);
        layout.apply(&mut config, &ComputedStyle::with_width(10.0));
        assert_eq!(config.height, 0.0);
        assert!(config.canvas_height >= 0.0);
        assert_eq!(config.plot_width(), 0.0);
    }

    #[test]
    fn test_explicit_tick_texts() {
        let ticks_config = TicksConfig {
            values: Some(vec![XValue::Number(1.5), XValue::Number(3.0)]),
            count: 5,
        };
        assert_eq!(tick_texts(&ticks_config, 0.0, 10.0), vec!["1.5", "3"]);
    }
}
