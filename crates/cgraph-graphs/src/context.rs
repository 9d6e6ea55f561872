//! Mutable state shared by the graph and its content.

use crate::layers::{Layer, LayerNodes};
use crate::scale::{ScaleBuilder, Scales};
use crate::svg::{Document, NodeId};
use cgraph_config::GraphConfig;

/// Per-graph state every rendering step reads and writes in place.
///
/// There is exactly one of these per [`Graph`](crate::Graph); content
/// receives it by mutable reference and observes every earlier write made
/// during the same operation.
#[derive(Debug, Clone)]
pub struct GraphContext {
    /// Runtime configuration, including derived geometry and domains.
    pub config: GraphConfig,
    /// Current scales.
    pub scales: Scales,
    /// Rendered tree.
    pub document: Document,
    /// Structural layer nodes within [`Self::document`].
    pub layers: LayerNodes,
}

impl GraphContext {
    /// Creates a context with scales built from `config` and a bare container.
    pub fn new(config: GraphConfig) -> Self {
        let scales = ScaleBuilder::build(&config);
        let document = Document::new(
            Layer::Container
                .element()
                .attr("data-bind-to", config.bind_to.clone()),
        );
        let mut layers = LayerNodes::default();
        layers.bind_container(document.root());
        Self {
            config,
            scales,
            document,
            layers,
        }
    }

    /// Rebuilds scales from the current configuration.
    pub fn rebuild_scales(&mut self) {
        self.scales = ScaleBuilder::build(&self.config);
    }

    /// Node of a present layer.
    pub fn layer(&self, layer: Layer) -> Option<NodeId> {
        self.layers.get(layer)
    }

    /// Node of a layer, created at its ordered slot when absent.
    pub fn ensure_layer(&mut self, layer: Layer) -> Option<NodeId> {
        self.layers.ensure(&mut self.document, layer)
    }

    /// Removes a layer and its subtree.
    pub fn remove_layer(&mut self, layer: Layer) -> bool {
        self.layers.remove(&mut self.document, layer)
    }
}
