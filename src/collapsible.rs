//! The mounted collapsible instance.
//!
//! Wires the size observer, the transition controller, and the
//! accessibility sync together around a caller-owned content subtree.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::CollapsibleConfig;
use crate::controller::{Settle, TransitionController, UpdateCause};
use crate::focus::AccessibilitySync;
use crate::node::Node;
use crate::observer::{ContentSize, Subscription};
use crate::style::{render_style, RenderStyle};
use crate::transitions::TransitionConfig;

struct Inner {
    config: CollapsibleConfig,
    controller: TransitionController,
    a11y: AccessibilitySync,
    content: Arc<Mutex<Node>>,
    /// Held for the lifetime of the mount; released on drop.
    _subscription: Option<Subscription>,
}

/// A container that animates its height between collapsed (zero, hidden)
/// and expanded (natural content height).
///
/// Cheap to clone; all clones share the same state. The size observation
/// is acquired once on mount and released when the last handle drops,
/// even mid-transition.
pub struct Collapsible {
    inner: Arc<Mutex<Inner>>,
    size: ContentSize,
}

impl Clone for Collapsible {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            size: self.size.clone(),
        }
    }
}

impl Collapsible {
    /// Mount the primitive around a caller-owned content subtree.
    ///
    /// Subscribes to `size` (which immediately reports the current
    /// measurement) and applies the initial tab-order state.
    pub fn mount(
        config: CollapsibleConfig,
        content: Arc<Mutex<Node>>,
        size: &ContentSize,
        now: Instant,
    ) -> Self {
        Self::mount_with_transition(config, content, size, TransitionConfig::default(), now)
    }

    /// Mount with a custom transition duration/easing.
    pub fn mount_with_transition(
        config: CollapsibleConfig,
        content: Arc<Mutex<Node>>,
        size: &ContentSize,
        transition: TransitionConfig,
        now: Instant,
    ) -> Self {
        let collapsed = config.collapsed;
        let a11y = AccessibilitySync::new(config.remove_from_tab_index_while_collapsed);
        if let Ok(mut root) = content.lock() {
            a11y.sync(&mut *root, collapsed);
        }

        let inner = Arc::new(Mutex::new(Inner {
            config,
            controller: TransitionController::with_config(collapsed, transition),
            a11y,
            content,
            _subscription: None,
        }));

        // The initial measurement fires synchronously inside `observe`;
        // it is stamped with the mount instant, later ones with their
        // own arrival time.
        let weak = Arc::downgrade(&inner);
        let mut mount_instant = Some(now);
        let subscription = size.observe(Box::new(move |height| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut guard = match inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let collapsed = guard.config.collapsed;
            let transition_height_changes = guard.config.transition_height_changes;
            let at = mount_instant.take().unwrap_or_else(Instant::now);
            guard.controller.update(
                collapsed,
                transition_height_changes,
                height,
                UpdateCause::OrganicResize,
                at,
            );
        }));

        if let Ok(mut guard) = inner.lock() {
            guard._subscription = Some(subscription);
        }

        Self {
            inner,
            size: size.clone(),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut MutexGuard<'_, Inner>) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    /// Set the collapsed flag. No-op when unchanged; otherwise starts the
    /// matching height transition and recomputes the tab order.
    pub fn set_collapsed(&self, collapsed: bool, now: Instant) {
        let target = if collapsed { 0.0 } else { self.size.get() };
        self.with_inner(|guard| {
            if guard.config.collapsed == collapsed {
                return;
            }
            guard.config.collapsed = collapsed;
            let transition_height_changes = guard.config.transition_height_changes;
            guard.controller.update(
                collapsed,
                transition_height_changes,
                target,
                UpdateCause::CollapseToggle,
                now,
            );
            let a11y = guard.a11y;
            let content = Arc::clone(&guard.content);
            if let Ok(mut root) = content.lock() {
                a11y.sync(&mut *root, collapsed);
            };
        });
    }

    /// Toggle between collapsed and expanded.
    pub fn toggle(&self, now: Instant) {
        let collapsed = self.is_collapsed();
        self.set_collapsed(!collapsed, now);
    }

    /// Advance the in-flight transition. On settling into the expanded
    /// state, re-runs the tab-order sync so descendants added while the
    /// subtree was growing are included.
    pub fn tick(&self, now: Instant) {
        self.with_inner(|guard| {
            if guard.controller.tick(now) == Some(Settle::Expanded) {
                let a11y = guard.a11y;
                let content = Arc::clone(&guard.content);
                if let Ok(mut root) = content.lock() {
                    a11y.sync(&mut *root, false);
                };
            }
        });
    }

    /// Derive the current visual style.
    pub fn style(&self) -> RenderStyle {
        self.with_inner(|guard| render_style(guard.controller.state(), &guard.config))
    }

    pub fn is_collapsed(&self) -> bool {
        self.with_inner(|guard| guard.config.collapsed)
    }

    pub fn is_animating(&self) -> bool {
        self.with_inner(|guard| guard.controller.is_animating())
    }

    pub fn fits_content(&self) -> bool {
        self.with_inner(|guard| guard.controller.fits_content())
    }

    pub fn current_height(&self) -> f32 {
        self.with_inner(|guard| guard.controller.current_height())
    }

    pub fn target_height(&self) -> f32 {
        self.with_inner(|guard| guard.controller.state().target_height)
    }

    /// When the in-flight transition settles, if any. Callers that block
    /// when idle can sleep until this deadline before the next `tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.with_inner(|guard| guard.controller.next_deadline())
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&self, enabled: bool) {
        self.with_inner(|guard| guard.controller.set_reduced_motion(enabled));
    }
}

impl std::fmt::Debug for Collapsible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_inner(|guard| {
            f.debug_struct("Collapsible")
                .field("config", &guard.config)
                .field("state", guard.controller.state())
                .finish()
        })
    }
}
