//! Tab-order synchronization for the content subtree.
//!
//! Focusable descendants are removed from and restored to the keyboard tab
//! order in lock-step with visibility, so hidden content is never reachable
//! by keyboard.

use crate::node::Node;

/// Capability interface over an arbitrary content subtree: visit every
/// focusable node under the root and apply the tab stop flag.
pub trait TabOrder {
    fn apply_tab_stops(&mut self, enabled: bool);
}

impl TabOrder for Node {
    fn apply_tab_stops(&mut self, enabled: bool) {
        if self.focusable {
            self.tab_stop = enabled;
        }
        for child in &mut self.children {
            child.apply_tab_stops(enabled);
        }
    }
}

/// Recomputes tab stops whenever visibility state changes.
#[derive(Debug, Clone, Copy)]
pub struct AccessibilitySync {
    /// When false, the tab order is never touched.
    remove_while_collapsed: bool,
}

impl AccessibilitySync {
    pub fn new(remove_while_collapsed: bool) -> Self {
        Self {
            remove_while_collapsed,
        }
    }

    /// Apply the tab-order flag matching the given visibility. Idempotent
    /// under repeated application.
    ///
    /// Called on every `collapsed` edge and again when the controller
    /// settles into the expanded state, so focusable descendants added
    /// while the subtree was growing are included.
    pub fn sync(&self, root: &mut impl TabOrder, collapsed: bool) {
        if !self.remove_while_collapsed {
            return;
        }
        log::trace!("[focus] tab stops {}", if collapsed { "removed" } else { "enabled" });
        root.apply_tab_stops(!collapsed);
    }
}
