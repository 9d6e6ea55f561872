//! Ordered collection of loaded content, unique by key.

use crate::content::Content;
use crate::range::{axis_range, DataRange};
use cgraph_common::{AxisId, ContentKey, GraphError, Result};
use cgraph_config::ContentConfig;

/// Registered content in load order.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    contents: Vec<Box<dyn Content>>,
}

impl ContentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`GraphError::NonUniqueKey`] if `key` is registered.
    pub fn ensure_unique(&self, key: &ContentKey) -> Result<()> {
        if self.contains(key) {
            Err(GraphError::NonUniqueKey(key.to_string()))
        } else {
            Ok(())
        }
    }

    /// Appends content; rejects duplicate keys without modifying the registry.
    pub fn push(&mut self, content: Box<dyn Content>) -> Result<()> {
        self.ensure_unique(content.key())?;
        self.contents.push(content);
        Ok(())
    }

    /// Removes content by key.
    pub fn remove(&mut self, key: &ContentKey) -> Option<Box<dyn Content>> {
        let index = self.position(key)?;
        Some(self.contents.remove(index))
    }

    /// Removes every content, returning them in load order.
    pub fn drain(&mut self) -> Vec<Box<dyn Content>> {
        std::mem::take(&mut self.contents)
    }

    fn position(&self, key: &ContentKey) -> Option<usize> {
        self.contents.iter().position(|content| content.key() == key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &ContentKey) -> bool {
        self.position(key).is_some()
    }

    /// Content by key.
    pub fn get(&self, key: &ContentKey) -> Option<&dyn Content> {
        self.contents
            .iter()
            .find(|content| content.key() == key)
            .map(|content| &**content)
    }

    /// Mutable content by key.
    pub fn get_mut(&mut self, key: &ContentKey) -> Option<&mut (dyn Content + 'static)> {
        self.contents
            .iter_mut()
            .find(|content| content.key() == key)
            .map(|content| &mut **content)
    }

    /// Mutable iteration in load order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Content>> {
        self.contents.iter_mut()
    }

    /// Registered keys in load order.
    pub fn keys(&self) -> Vec<ContentKey> {
        self.contents.iter().map(|content| content.key().clone()).collect()
    }

    /// Content configurations in load order.
    pub fn configs(&self) -> impl Iterator<Item = &ContentConfig> + Clone {
        self.contents.iter().map(|content| content.config())
    }

    /// Union of value ranges on one axis.
    pub fn data_range(&self, axis: AxisId) -> Option<DataRange> {
        axis_range(self.configs(), axis)
    }

    /// Whether any content has at least one non-null value.
    pub fn any_has_values(&self) -> bool {
        self.configs().any(ContentConfig::has_values)
    }

    /// Number of registered contents.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
