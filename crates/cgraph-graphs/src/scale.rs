//! Domain-to-pixel scales and the builder that derives them from configuration.

use crate::ticks;
use cgraph_common::{from_epoch_millis, to_epoch_millis, YAxis};
use cgraph_config::{AxisType, Domain, GraphConfig, XValue};
use chrono::{DateTime, Utc};

/// Continuous linear mapping from a domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    /// Creates a scale; `clamp` restricts output to the range.
    pub const fn new(domain: (f64, f64), range: (f64, f64), clamp: bool) -> Self {
        Self {
            domain,
            range,
            clamp,
        }
    }

    /// Domain bounds.
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Pixel range bounds.
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Whether output is clamped to the range.
    pub const fn clamp(&self) -> bool {
        self.clamp
    }

    /// Maps a domain value to pixels.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let mut t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    /// Maps pixels back to a domain value.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let mut t = if span == 0.0 { 0.5 } else { (pixel - r0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        d0 + t * (d1 - d0)
    }

    /// Generated tick values over the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Time scale over epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Creates a time scale from an epoch-millisecond domain.
    pub const fn new(domain: (f64, f64), range: (f64, f64), clamp: bool) -> Self {
        Self {
            inner: LinearScale::new(domain, range, clamp),
        }
    }

    /// Maps a timestamp to pixels.
    pub fn map_time(&self, value: DateTime<Utc>) -> f64 {
        self.inner.map(to_epoch_millis(value))
    }

    /// Maps pixels back to a timestamp.
    pub fn invert_time(&self, pixel: f64) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.inner.invert(pixel))
    }

    /// Underlying linear mapping over epoch milliseconds.
    pub const fn linear(&self) -> &LinearScale {
        &self.inner
    }
}

/// Horizontal scale: linear or time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XScale {
    /// Numeric x axis.
    Linear(LinearScale),
    /// Time-series x axis.
    Time(TimeScale),
}

impl XScale {
    fn linear(&self) -> &LinearScale {
        match self {
            Self::Linear(scale) => scale,
            Self::Time(scale) => scale.linear(),
        }
    }

    /// Maps an x value to pixels.
    pub fn map(&self, value: &XValue) -> f64 {
        self.linear().map(value.as_f64())
    }

    /// Maps a raw domain number (epoch milliseconds for time) to pixels.
    pub fn map_raw(&self, value: f64) -> f64 {
        self.linear().map(value)
    }

    /// Domain bounds (epoch milliseconds for time).
    pub fn domain(&self) -> (f64, f64) {
        self.linear().domain()
    }

    /// Pixel range bounds.
    pub fn range(&self) -> (f64, f64) {
        self.linear().range()
    }

    /// Whether output is clamped to the range.
    pub fn clamp(&self) -> bool {
        self.linear().clamp()
    }

    /// Generated tick values with their labels.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (start, stop) = self.domain();
        match self {
            Self::Linear(_) => ticks::linear_ticks(start, stop, count)
                .into_iter()
                .map(|tick| (tick, ticks::format_linear_tick(tick)))
                .collect(),
            Self::Time(_) => {
                let interval = ticks::time_interval(start, stop, count);
                ticks::time_ticks(start, stop, count)
                    .into_iter()
                    .map(|tick| (tick, ticks::format_time_tick(tick, interval)))
                    .collect()
            }
        }
    }
}

/// The graph's current scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    /// Horizontal scale.
    pub x: XScale,
    /// Primary vertical scale.
    pub y: LinearScale,
    /// Secondary vertical scale.
    pub y2: LinearScale,
}

impl Scales {
    /// Vertical scale for an axis assignment.
    pub const fn y_for(&self, axis: YAxis) -> &LinearScale {
        match axis {
            YAxis::Y => &self.y,
            YAxis::Y2 => &self.y2,
        }
    }
}

/// Builds [`Scales`] from the configuration's domains and layout.
pub struct ScaleBuilder;

impl ScaleBuilder {
    /// Builds fresh scales. Pure: equal configurations yield equal scales.
    pub fn build(config: &GraphConfig) -> Scales {
        let clamp = !config.pan_enabled;
        let x_range = (0.0, config.plot_width());
        let y_range = (config.height.max(0.0), 0.0);
        let x_domain = bounds(&config.axis.x.domain);

        let x = match config.axis.x.axis_type {
            AxisType::Linear => XScale::Linear(LinearScale::new(x_domain, x_range, clamp)),
            AxisType::Timeseries => XScale::Time(TimeScale::new(x_domain, x_range, clamp)),
        };
        Scales {
            x,
            y: LinearScale::new(bounds(&config.axis.y.domain), y_range, clamp),
            y2: LinearScale::new(bounds(&config.axis.y2.domain), y_range, clamp),
        }
    }
}

const fn bounds(domain: &Domain) -> (f64, f64) {
    (domain.lower_limit, domain.upper_limit)
}
