//! Retained SVG/HTML node tree.
//!
//! The graph keeps its rendered output as an arena of nodes so that content
//! can be attached, re-positioned, and removed incrementally. Removed slots
//! are recycled; each slot carries a generation so a stale [`NodeId`] stops
//! resolving once its node is gone, even after the slot is reused.

use cgraph_common::{escape_markup, format_px};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Element description used to create nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
}

impl Element {
    /// Creates an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Appends a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Sets a numeric attribute formatted as a pixel coordinate.
    #[must_use]
    pub fn px(self, name: impl Into<String>, value: f64) -> Self {
        self.attr(name, format_px(value))
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A live node: an element plus its tree links.
#[derive(Debug, Clone)]
pub struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.element.tag
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.element.classes
    }

    /// Text content.
    pub fn text(&self) -> Option<&str> {
        self.element.text.as_deref()
    }

    /// Child handles in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle; `None` for the root.
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    root: NodeId,
}

impl Document {
    /// Creates a document whose root is the given element.
    pub fn new(root: Element) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    element: root,
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
            live: 1,
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// Root handle.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the handle still resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Resolves a handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Number of live nodes, root included.
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Number of allocated slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether only the root is left.
    pub const fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Appends a new child element; returns `None` if the parent is gone.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        let index = self.node(parent)?.children.len();
        self.insert(parent, index, element)
    }

    /// Inserts a new child element at `index` (clamped to the child count).
    pub fn insert(&mut self, parent: NodeId, index: usize, element: Element) -> Option<NodeId> {
        self.node(parent)?;
        let node = Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(slot_index) => {
                let slot = &mut self.slots[slot_index];
                slot.node = Some(node);
                NodeId {
                    index: slot_index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        if let Some(parent_node) = self.node_mut(parent) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, id);
        }
        Some(id)
    }

    /// Removes a node and its subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.node(id).and_then(Node::parent) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.live -= 1;
                stack.extend(node.children);
            }
        }
        true
    }

    /// Removes every child of a node.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self
            .node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
    }

    /// Children of a node; empty if the node is gone.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Attribute value.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.element.attrs.get(name).map(String::as_str)
    }

    /// Sets an attribute; returns `false` if the node is gone.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        self.node_mut(id).is_some_and(|node| {
            node.element.attrs.insert(name.to_string(), value.into());
            true
        })
    }

    /// Sets a numeric attribute formatted as a pixel coordinate.
    pub fn set_px(&mut self, id: NodeId, name: &str, value: f64) -> bool {
        self.set_attr(id, name, format_px(value))
    }

    /// Removes an attribute.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.node_mut(id)
            .is_some_and(|node| node.element.attrs.remove(name).is_some())
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        self.node_mut(id).is_some_and(|node| {
            node.element.text = Some(text.into());
            true
        })
    }

    /// Whether the node carries the class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|node| node.element.classes.iter().any(|c| c == class))
    }

    /// Adds a class if absent.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            return true;
        }
        self.node_mut(id).is_some_and(|node| {
            node.element.classes.push(class.to_string());
            true
        })
    }

    /// Removes a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.node_mut(id).is_some_and(|node| {
            let before = node.element.classes.len();
            node.element.classes.retain(|c| c != class);
            before != node.element.classes.len()
        })
    }

    /// Descendants of `scope` (excluding it) in depth-first document order.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Descendants carrying a class.
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// First descendant whose attribute equals `value`.
    pub fn find_by_attr(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.attr(*id, name) == Some(value))
    }

    /// Serializes the tree to markup.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_node(self.root, 0, &mut output);
        output
    }

    fn render_node(&self, id: NodeId, depth: usize, output: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let indent = "    ".repeat(depth);
        let element = &node.element;
        let _ = write!(output, "{indent}<{}", element.tag);
        if element.tag == "svg" {
            output.push_str(r#" xmlns="http://www.w3.org/2000/svg""#);
        }
        if !element.classes.is_empty() {
            let _ = write!(output, r#" class="{}""#, escape_markup(&element.classes.join(" ")));
        }
        for (name, value) in &element.attrs {
            let _ = write!(output, r#" {name}="{}""#, escape_markup(value));
        }

        match (&element.text, node.children.is_empty()) {
            (None, true) => output.push_str("/>\n"),
            (Some(text), true) => {
                let _ = writeln!(output, ">{}</{}>", escape_markup(text), element.tag);
            }
            (text, false) => {
                output.push_str(">\n");
                if let Some(text) = text {
                    let _ = writeln!(output, "{indent}    {}", escape_markup(text));
                }
                for child in &node.children {
                    self.render_node(*child, depth + 1, output);
                }
                let _ = writeln!(output, "{indent}</{}>", element.tag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(Element::new("div").class("root"))
    }

    #[test]
    fn test_append_and_insert_order() {
        let mut doc = doc();
        let root = doc.root();
        let a = doc.append(root, Element::new("g").class("a")).unwrap();
        let c = doc.append(root, Element::new("g").class("c")).unwrap();
        let b = doc.insert(root, 1, Element::new("g").class("b")).unwrap();
        assert_eq!(doc.children(root), &[a, b, c]);
    }

    #[test]
    fn test_remove_subtree() {
        let mut doc = doc();
        let root = doc.root();
        let group = doc.append(root, Element::new("g")).unwrap();
        let leaf = doc.append(group, Element::new("circle")).unwrap();

        assert!(doc.remove(group));
        assert!(!doc.contains(group));
        assert!(!doc.contains(leaf));
        assert!(doc.children(root).is_empty());
        assert!(!doc.remove(group));
        assert!(!doc.remove(root));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_stale_handles_are_ignored() {
        let mut doc = doc();
        let root = doc.root();
        let node = doc.append(root, Element::new("rect")).unwrap();
        doc.remove(node);

        assert!(!doc.set_attr(node, "x", "1"));
        assert!(!doc.add_class(node, "active"));
        assert!(doc.append(node, Element::new("g")).is_none());

        let reused = doc.append(root, Element::new("circle")).unwrap();
        assert_ne!(reused, node);
        assert!(!doc.contains(node));
        assert!(doc.contains(reused));
    }

    #[test]
    fn test_removed_slots_are_recycled() {
        let mut doc = doc();
        let root = doc.root();
        for _ in 0..100 {
            let group = doc.append(root, Element::new("g")).unwrap();
            for _ in 0..5 {
                doc.append(group, Element::new("circle"));
            }
            doc.clear_children(root);
        }
        assert_eq!(doc.len(), 1);
        assert!(doc.capacity() <= 7);
    }

    #[test]
    fn test_classes() {
        let mut doc = doc();
        let node = doc.append(doc.root(), Element::new("g").class("a")).unwrap();
        doc.add_class(node, "b");
        doc.add_class(node, "b");
        assert_eq!(doc.node(node).unwrap().classes(), &["a", "b"]);
        assert!(doc.remove_class(node, "a"));
        assert!(!doc.has_class(node, "a"));
    }

    #[test]
    fn test_find() {
        let mut doc = doc();
        let root = doc.root();
        let group = doc.append(root, Element::new("g").class("series")).unwrap();
        let point = doc
            .append(group, Element::new("circle").class("point").attr("data-key", "k1"))
            .unwrap();
        assert_eq!(doc.find_by_class(root, "point"), vec![point]);
        assert_eq!(doc.find_by_attr(root, "data-key", "k1"), Some(point));
        assert_eq!(doc.find_by_attr(root, "data-key", "k2"), None);
    }

    #[test]
    fn test_render_escapes_and_nests() {
        let mut doc = Document::new(Element::new("svg").px("width", 10.5));
        let root = doc.root();
        doc.append(root, Element::new("text").text("a < b"));
        let markup = doc.render();
        assert!(markup.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10.5">"#));
        assert!(markup.contains("<text>a &lt; b</text>"));
        assert!(markup.trim_end().ends_with("</svg>"));
    }
}
