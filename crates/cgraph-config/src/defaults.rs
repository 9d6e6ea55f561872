//! Default values and layout constants.

use crate::schema::{AxisSizes, Padding};
use std::time::Duration;

/// Plot height used when no explicit dimension is configured.
pub const DEFAULT_HEIGHT: f64 = 250.0;

/// Default canvas padding.
pub const DEFAULT_PADDING: Padding = Padding {
    top: 10.0,
    left: 30.0,
    right: 50.0,
    bottom: 5.0,
};

/// Proportion of the domain span added to each end when padding a domain.
pub const DOMAIN_PADDING_RATIO: f64 = 0.05;

/// Delay applied to coalesce container resize notifications.
pub const DEFAULT_RESIZE_THROTTLE: Duration = Duration::from_millis(400);

/// Suggested tick count for generated ticks.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Upper bound on a configured tick count.
pub const MAX_TICK_COUNT: usize = 50;

/// Font size used to measure tick and label text.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Length of an axis tick mark.
pub const TICK_SIZE: f64 = 6.0;

/// Gap between tick labels and the axis label.
pub const LABEL_SPACING: f64 = 10.0;

/// Series color applied when content does not configure one.
pub const DEFAULT_CONTENT_COLOR: &str = "#1c91da";

/// Text of the no-data overlay.
pub const NO_DATA_TEXT: &str = "No Data Available";

impl Default for Padding {
    fn default() -> Self {
        DEFAULT_PADDING
    }
}

impl Padding {
    /// Whether any side differs from [`DEFAULT_PADDING`].
    pub fn is_custom(&self) -> bool {
        *self != DEFAULT_PADDING
    }
}

impl AxisSizes {
    /// All axes zero-sized.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        y2: 0.0,
    };
}
