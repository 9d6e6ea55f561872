//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key identifying one content (data series) within a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    /// Creates a new content key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Gets the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContentKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ContentKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContentKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Identifies one of the three graph axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    /// Horizontal axis.
    X,
    /// Primary vertical axis.
    Y,
    /// Secondary vertical axis.
    Y2,
}

impl AxisId {
    /// All axes in rendering order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Y2];

    /// Lowercase axis name as used in class names and messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Y2 => "y2",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vertical axis a content is plotted against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    /// Primary vertical axis.
    #[default]
    Y,
    /// Secondary vertical axis.
    Y2,
}

impl From<YAxis> for AxisId {
    fn from(value: YAxis) -> Self {
        match value {
            YAxis::Y => Self::Y,
            YAxis::Y2 => Self::Y2,
        }
    }
}

impl fmt::Display for YAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AxisId::from(*self).fmt(f)
    }
}

/// Pixel width and height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
