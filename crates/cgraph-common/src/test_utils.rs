//! Test utilities and shared test helpers for the cgraph workspace.
//!
//! Enabled for downstream crates through the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Consumer configuration fixtures in JSON form.
pub mod config_fixtures {
    /// Linear x axis 0..100 and y axis 0..20, both labelled.
    pub fn linear_axis_json() -> &'static str {
        r##"{
  "bindTo": "#testGraph_carbon",
  "axis": {
    "x": { "label": "X", "lowerLimit": 0, "upperLimit": 100 },
    "y": { "label": "Y", "lowerLimit": 0, "upperLimit": 20 }
  }
}"##
    }

    /// Time-series x axis with one dateline and one eventline.
    pub fn timeseries_axis_json() -> &'static str {
        r##"{
  "bindTo": "#testGraph_carbon",
  "axis": {
    "x": {
      "type": "timeseries",
      "label": "Date",
      "lowerLimit": "2016-01-01T12:00:00Z",
      "upperLimit": "2017-01-01T12:00:00Z"
    },
    "y": { "label": "Y", "lowerLimit": 0, "upperLimit": 20 }
  },
  "dateline": [
    {
      "label": { "display": "Release" },
      "color": "#C8E6FA",
      "shape": "circle",
      "value": "2016-06-01T12:00:00Z"
    }
  ],
  "eventline": [
    { "color": "#D6D6D6", "value": "2016-03-01T12:00:00Z" }
  ]
}"##
    }
}

/// Data series fixtures.
pub mod data_fixtures {
    /// Three linear points whose y range (4..35) exceeds a 0..20 axis.
    pub fn line_values_json() -> &'static str {
        r#"[{"x": 35, "y": 4}, {"x": 45, "y": 10}, {"x": 25, "y": 35}]"#
    }

    /// A series with a gap (`y: null`) in the middle.
    pub fn gapped_values_json() -> &'static str {
        r#"[{"x": 10, "y": 30}, {"x": 20, "y": null}, {"x": 30, "y": 60}]"#
    }

    /// Time-series points within 2016.
    pub fn timeseries_values_json() -> &'static str {
        r#"[
  {"x": "2016-02-03T12:00:00Z", "y": 4},
  {"x": "2016-05-03T12:00:00Z", "y": 15},
  {"x": "2016-09-03T12:00:00Z", "y": 10}
]"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for finite y values within a plausible chart range.
    pub fn y_value_strategy() -> impl Strategy<Value = f64> {
        -1.0e6..1.0e6
    }

    /// Strategy for series of optional y values (gaps allowed).
    pub fn gapped_series_strategy() -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(prop::option::of(y_value_strategy()), 0..32)
    }

    /// Strategy for ordered (lower, upper) limit pairs with a non-zero span.
    pub fn limits_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-1.0e4..1.0e4f64, 1.0e-3..1.0e4f64).prop_map(|(lower, span)| (lower, lower + span))
    }
}
