//! Paint-order contract for the graph's structural layers.
//!
//! Layers are created in [`LAYER_ORDER`]. A layer created later (for example
//! the no-data overlay) is inserted at its slot, after every existing sibling
//! that precedes it in the order, so the stacking never depends on call
//! sequence.

use crate::svg::{Document, Element, NodeId};
use std::collections::HashMap;

/// Structural layers of a rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Outer container element; the document root.
    Container,
    /// The SVG canvas.
    Canvas,
    /// Definitions (clip paths).
    Defs,
    /// Region bands.
    Regions,
    /// Grid lines.
    Grid,
    /// Horizontal axis.
    XAxis,
    /// Primary vertical axis.
    YAxis,
    /// Secondary vertical axis.
    Y2Axis,
    /// Per-content groups.
    Content,
    /// Row of supplementary x axis information.
    AxisInfoRow,
    /// Axis label text and label shapes.
    AxisLabels,
    /// Horizontal line at y = 0.
    AxisReferenceLine,
    /// Dateline markers.
    Dateline,
    /// Eventline markers.
    Eventline,
    /// Legend items.
    Legend,
    /// "No data" overlay.
    NoData,
}

/// Creation and stacking order, bottom-most first.
pub const LAYER_ORDER: [Layer; 16] = [
    Layer::Container,
    Layer::Canvas,
    Layer::Defs,
    Layer::Regions,
    Layer::Grid,
    Layer::XAxis,
    Layer::YAxis,
    Layer::Y2Axis,
    Layer::Content,
    Layer::AxisInfoRow,
    Layer::AxisLabels,
    Layer::AxisReferenceLine,
    Layer::Dateline,
    Layer::Eventline,
    Layer::Legend,
    Layer::NoData,
];

impl Layer {
    /// Parent layer; `None` for the container.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Container => None,
            Self::Canvas | Self::Legend | Self::NoData => Some(Self::Container),
            _ => Some(Self::Canvas),
        }
    }

    /// Class attribute of the layer's node.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Container => "cgraph-container",
            Self::Canvas => "cgraph-canvas",
            Self::Defs => "cgraph-defs",
            Self::Regions => "cgraph-regions",
            Self::Grid => "cgraph-grid",
            Self::XAxis => "cgraph-axis-x",
            Self::YAxis => "cgraph-axis-y",
            Self::Y2Axis => "cgraph-axis-y2",
            Self::Content => "cgraph-content-container",
            Self::AxisInfoRow => "cgraph-axis-info-row",
            Self::AxisLabels => "cgraph-axis-labels",
            Self::AxisReferenceLine => "cgraph-axis-reference-line",
            Self::Dateline => "cgraph-dateline-group",
            Self::Eventline => "cgraph-eventline-group",
            Self::Legend => "cgraph-legend",
            Self::NoData => "cgraph-no-data",
        }
    }

    /// Element tag of the layer's node.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Container | Self::Legend | Self::NoData => "div",
            Self::Canvas => "svg",
            Self::Defs => "defs",
            _ => "g",
        }
    }

    /// Position in [`LAYER_ORDER`].
    pub fn rank(self) -> usize {
        LAYER_ORDER
            .iter()
            .position(|layer| *layer == self)
            .unwrap_or(LAYER_ORDER.len())
    }

    /// Element used when creating the layer.
    pub fn element(self) -> Element {
        Element::new(self.tag()).class(self.class())
    }
}

/// Live layer nodes of one document.
#[derive(Debug, Clone, Default)]
pub struct LayerNodes {
    nodes: HashMap<Layer, NodeId>,
}

impl LayerNodes {
    /// Handle of a layer that is currently present.
    pub fn get(&self, layer: Layer) -> Option<NodeId> {
        self.nodes.get(&layer).copied()
    }

    /// Records the container (document root).
    pub fn bind_container(&mut self, root: NodeId) {
        self.nodes.clear();
        self.nodes.insert(Layer::Container, root);
    }

    /// Returns the layer's node, creating it at its ordered slot if absent.
    pub fn ensure(&mut self, document: &mut Document, layer: Layer) -> Option<NodeId> {
        if let Some(existing) = self.get(layer).filter(|id| document.contains(*id)) {
            return Some(existing);
        }
        let parent_layer = layer.parent()?;
        let parent = self.ensure(document, parent_layer)?;
        let rank = layer.rank();
        let index = document
            .children(parent)
            .iter()
            .filter(|child| {
                self.nodes
                    .iter()
                    .any(|(other, id)| id == *child && other.rank() < rank)
            })
            .count();
        let id = document.insert(parent, index, layer.element())?;
        self.nodes.insert(layer, id);
        Some(id)
    }

    /// Removes a layer and its subtree.
    pub fn remove(&mut self, document: &mut Document, layer: Layer) -> bool {
        self.nodes
            .remove(&layer)
            .is_some_and(|id| document.remove(id))
    }

    /// Present layers in document order.
    pub fn present(&self, document: &Document) -> Vec<Layer> {
        let mut layers: Vec<Layer> = self
            .nodes
            .iter()
            .filter(|(_, id)| document.contains(**id))
            .map(|(layer, _)| *layer)
            .collect();
        layers.sort_by_key(|layer| layer.rank());
        layers
    }

    /// Forgets every layer.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_has_every_layer_once() {
        for (index, layer) in LAYER_ORDER.iter().enumerate() {
            assert_eq!(layer.rank(), index);
        }
    }

    #[test]
    fn test_regions_and_grid_below_content() {
        assert!(Layer::Regions.rank() < Layer::Content.rank());
        assert!(Layer::Grid.rank() < Layer::Content.rank());
        assert!(Layer::AxisLabels.rank() > Layer::Content.rank());
    }

    #[test]
    fn test_late_layer_is_inserted_at_its_slot() {
        let mut document = Document::new(Layer::Container.element());
        let mut layers = LayerNodes::default();
        layers.bind_container(document.root());

        layers.ensure(&mut document, Layer::Grid).unwrap();
        layers.ensure(&mut document, Layer::Content).unwrap();
        let regions = layers.ensure(&mut document, Layer::Regions).unwrap();

        let canvas = layers.get(Layer::Canvas).unwrap();
        assert_eq!(document.children(canvas)[0], regions);
        assert_eq!(
            layers.present(&document),
            vec![
                Layer::Container,
                Layer::Canvas,
                Layer::Regions,
                Layer::Grid,
                Layer::Content
            ]
        );
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut document = Document::new(Layer::Container.element());
        let mut layers = LayerNodes::default();
        layers.bind_container(document.root());

        let first = layers.ensure(&mut document, Layer::NoData).unwrap();
        let second = layers.ensure(&mut document, Layer::NoData).unwrap();
        assert_eq!(first, second);
        assert!(layers.remove(&mut document, Layer::NoData));
        assert!(layers.get(Layer::NoData).is_none());
    }
}
