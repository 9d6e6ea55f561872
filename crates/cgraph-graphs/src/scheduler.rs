//! Cancellable visual transitions (highlight, blur, restore) keyed by content.
//!
//! Transitions only touch class attributes of existing nodes. They resolve
//! their targets when flushed, so a transition whose content is gone is a
//! no-op rather than a write to a removed node.

use crate::context::GraphContext;
use crate::layers::Layer;
use cgraph_common::ContentKey;

const HIGHLIGHT_CLASS: &str = "cgraph-highlight";
const BLUR_CLASS: &str = "cgraph-blur";

/// Kind of visual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Emphasize the content.
    Highlight,
    /// De-emphasize the content.
    Blur,
    /// Clear emphasis.
    Restore,
}

/// A pending transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Target content.
    pub key: ContentKey,
    /// What to apply.
    pub kind: TransitionKind,
}

/// Queue of pending transitions.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    pending: Vec<Transition>,
}

impl TransitionScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a transition, replacing any pending one for the same key.
    pub fn schedule(&mut self, key: ContentKey, kind: TransitionKind) {
        self.pending.retain(|transition| transition.key != key);
        self.pending.push(Transition { key, kind });
    }

    /// Drops pending transitions for a key; returns how many were dropped.
    pub fn cancel_for(&mut self, key: &ContentKey) -> usize {
        let before = self.pending.len();
        self.pending.retain(|transition| &transition.key != key);
        before - self.pending.len()
    }

    /// Drops every pending transition.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Pending transitions in scheduling order.
    pub fn pending(&self) -> &[Transition] {
        &self.pending
    }

    /// Applies and drains pending transitions; returns how many touched a node.
    pub fn flush(&mut self, ctx: &mut GraphContext) -> usize {
        let mut applied = 0;
        for transition in self.pending.drain(..) {
            let Some(content_layer) = ctx.layer(Layer::Content) else {
                continue;
            };
            let Some(group) =
                ctx.document
                    .find_by_attr(content_layer, "data-key", transition.key.as_str())
            else {
                tracing::trace!(key = %transition.key, "transition target is gone");
                continue;
            };
            match transition.kind {
                TransitionKind::Highlight => {
                    ctx.document.remove_class(group, BLUR_CLASS);
                    ctx.document.add_class(group, HIGHLIGHT_CLASS);
                }
                TransitionKind::Blur => {
                    ctx.document.remove_class(group, HIGHLIGHT_CLASS);
                    ctx.document.add_class(group, BLUR_CLASS);
                }
                TransitionKind::Restore => {
                    ctx.document.remove_class(group, HIGHLIGHT_CLASS);
                    ctx.document.remove_class(group, BLUR_CLASS);
                }
            }
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::Element;
    use cgraph_common::test_utils::config_fixtures;
    use cgraph_config::{ConfigLoader, ConfigValidator};

    fn context_with_group(key: &str) -> GraphContext {
        let input = ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap();
        let mut ctx = GraphContext::new(ConfigValidator::validate(&input).unwrap());
        let layer = ctx.ensure_layer(Layer::Content).unwrap();
        ctx.document
            .append(layer, Element::new("g").attr("data-key", key))
            .unwrap();
        ctx
    }

    #[test]
    fn test_flush_applies_classes() {
        let mut ctx = context_with_group("uid_1");
        let mut scheduler = TransitionScheduler::new();
        scheduler.schedule(ContentKey::from("uid_1"), TransitionKind::Blur);
        scheduler.schedule(ContentKey::from("uid_1"), TransitionKind::Highlight);
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.flush(&mut ctx), 1);

        let layer = ctx.layer(Layer::Content).unwrap();
        let group = ctx.document.find_by_attr(layer, "data-key", "uid_1").unwrap();
        assert!(ctx.document.has_class(group, HIGHLIGHT_CLASS));
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let mut ctx = context_with_group("uid_1");
        let mut scheduler = TransitionScheduler::new();
        scheduler.schedule(ContentKey::from("gone"), TransitionKind::Highlight);
        assert_eq!(scheduler.flush(&mut ctx), 0);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = TransitionScheduler::new();
        scheduler.schedule(ContentKey::from("a"), TransitionKind::Highlight);
        scheduler.schedule(ContentKey::from("b"), TransitionKind::Blur);
        assert_eq!(scheduler.cancel_for(&ContentKey::from("a")), 1);
        scheduler.cancel_all();
        assert!(scheduler.pending().is_empty());
    }
}
