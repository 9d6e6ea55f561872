//! Axis domain calibration from registered content.

use cgraph_common::AxisId;
use cgraph_config::{defaults, ContentConfig, DataPoint, Domain, GraphConfig};

/// Min/max of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl DataRange {
    /// Range covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extends the range to include a domain.
    #[must_use]
    pub fn include(self, lower: f64, upper: f64) -> Self {
        self.merge(Self {
            min: lower,
            max: upper,
        })
    }
}

/// Y extent of a point set, ignoring gaps. `None` when every y is null.
pub fn value_range(points: &[DataPoint]) -> Option<DataRange> {
    points
        .iter()
        .filter_map(|point| point.y)
        .fold(None, |range, y| {
            let point = DataRange { min: y, max: y };
            Some(range.map_or(point, |range: DataRange| range.merge(point)))
        })
}

/// Union of the y extents of every content assigned to `axis`.
pub fn axis_range<'a>(
    contents: impl IntoIterator<Item = &'a ContentConfig>,
    axis: AxisId,
) -> Option<DataRange> {
    contents
        .into_iter()
        .filter(|content| AxisId::from(content.y_axis) == axis)
        .filter_map(|content| value_range(&content.values))
        .reduce(DataRange::merge)
}

/// Pads a domain by [`defaults::DOMAIN_PADDING_RATIO`] of its span on each end.
///
/// A zero-width domain is padded by the ratio of its magnitude (or of 1 at zero)
/// so that the resulting scale stays invertible.
pub fn pad_domain(lower: f64, upper: f64) -> Domain {
    let span = upper - lower;
    let margin = if span == 0.0 {
        lower.abs().max(1.0) * defaults::DOMAIN_PADDING_RATIO
    } else {
        span * defaults::DOMAIN_PADDING_RATIO
    };
    Domain::new(lower - margin, upper + margin)
}

/// Computes per-axis domains from registered content.
pub struct AxisRangeCalculator;

impl AxisRangeCalculator {
    /// Recomputes the y and y2 domains and records `is_range_modified` per axis.
    ///
    /// With calibration allowed the domain spans the configured limits folded
    /// with the union of loaded content. Without it, or when no content has
    /// values on an axis, the configured limits are used. Returns whether any
    /// axis changed.
    pub fn calibrate<'a>(
        config: &mut GraphConfig,
        contents: impl IntoIterator<Item = &'a ContentConfig> + Clone,
    ) -> bool {
        let allow = config.allow_calibration;
        let mut modified = false;
        for axis in [AxisId::Y, AxisId::Y2] {
            let data = if allow {
                axis_range(contents.clone(), axis)
            } else {
                None
            };
            let Some(axis_config) = config.axis.vertical_mut(axis) else {
                continue;
            };
            let configured = DataRange {
                min: axis_config.lower_limit,
                max: axis_config.upper_limit,
            };
            let range = data.map_or(configured, |data| data.merge(configured));
            let domain = if axis_config.pad_domain {
                pad_domain(range.min, range.max)
            } else {
                Domain::new(range.min, range.max)
            };
            axis_config.is_range_modified = domain != axis_config.domain;
            if axis_config.is_range_modified {
                tracing::debug!(
                    %axis,
                    lower = domain.lower_limit,
                    upper = domain.upper_limit,
                    "axis domain recalibrated"
                );
                axis_config.domain = domain;
                modified = true;
            }
        }
        modified
    }

    /// Recomputes the x domain from the configured limits.
    pub fn calibrate_x(config: &mut GraphConfig) {
        let x = &mut config.axis.x;
        x.domain = if x.pad_domain {
            pad_domain(x.lower_limit, x.upper_limit)
        } else {
            Domain::new(x.lower_limit, x.upper_limit)
        };
    }
}
