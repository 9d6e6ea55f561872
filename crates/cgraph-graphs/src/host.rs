//! Host boundary: resolving the container selector to its computed box model.
//!
//! Layout engines live outside this crate. A [`Host`] answers the one
//! question the graph needs from it: how wide is the container right now.

use parking_lot::RwLock;
use std::collections::HashMap;

/// CSS `box-sizing` of the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoxSizing {
    /// `width` covers the content box only.
    #[default]
    ContentBox,
    /// `width` includes padding and border.
    BorderBox,
}

/// Subset of a container's computed style used for layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputedStyle {
    /// Computed `width` in pixels.
    pub width: f64,
    /// Left padding.
    pub padding_left: f64,
    /// Right padding.
    pub padding_right: f64,
    /// Left margin.
    pub margin_left: f64,
    /// Right margin.
    pub margin_right: f64,
    /// Left border width.
    pub border_left: f64,
    /// Right border width.
    pub border_right: f64,
    /// Box sizing mode.
    pub box_sizing: BoxSizing,
}

impl ComputedStyle {
    /// Style with only a width set.
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Horizontal space taken by margin, padding, and (for border-box) border.
    pub fn box_sizing_parameters(&self) -> f64 {
        let border = match self.box_sizing {
            BoxSizing::BorderBox => self.border_left + self.border_right,
            BoxSizing::ContentBox => 0.0,
        };
        self.margin_left + self.margin_right + self.padding_left + self.padding_right + border
    }
}

/// Resolves container selectors to computed styles.
pub trait Host: Send + Sync {
    /// Computed style of the element matching `selector`, if any.
    fn computed_style(&self, selector: &str) -> Option<ComputedStyle>;
}

/// In-memory host with mutable container styles.
#[derive(Debug, Default)]
pub struct StaticHost {
    containers: RwLock<HashMap<String, ComputedStyle>>,
}

impl StaticHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style container registration.
    #[must_use]
    pub fn with_container(self, selector: impl Into<String>, style: ComputedStyle) -> Self {
        self.insert(selector, style);
        self
    }

    /// Registers or replaces a container.
    pub fn insert(&self, selector: impl Into<String>, style: ComputedStyle) {
        self.containers.write().insert(selector.into(), style);
    }

    /// Changes a container's width; returns `false` if the selector is unknown.
    pub fn set_width(&self, selector: &str, width: f64) -> bool {
        self.containers
            .write()
            .get_mut(selector)
            .map(|style| style.width = width)
            .is_some()
    }

    /// Drops a container, as if its element were detached.
    pub fn remove(&self, selector: &str) -> Option<ComputedStyle> {
        self.containers.write().remove(selector)
    }
}

impl Host for StaticHost {
    fn computed_style(&self, selector: &str) -> Option<ComputedStyle> {
        self.containers.read().get(selector).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_sizing_parameters() {
        let style = ComputedStyle {
            width: 1024.0,
            padding_left: 5.0,
            padding_right: 5.0,
            margin_left: 10.0,
            margin_right: 10.0,
            border_left: 1.0,
            border_right: 1.0,
            box_sizing: BoxSizing::ContentBox,
        };
        assert_eq!(style.box_sizing_parameters(), 30.0);

        let border_box = ComputedStyle {
            box_sizing: BoxSizing::BorderBox,
            ..style
        };
        assert_eq!(border_box.box_sizing_parameters(), 32.0);
    }

    #[test]
    fn test_static_host_resize() {
        let host = StaticHost::new().with_container("#chart", ComputedStyle::with_width(800.0));
        assert!(host.set_width("#chart", 400.0));
        assert!(!host.set_width("#missing", 400.0));
        assert_eq!(host.computed_style("#chart").unwrap().width, 400.0);
        assert!(host.remove("#chart").is_some());
        assert!(host.computed_style("#chart").is_none());
    }
}
