//! The height-transition state machine.
//!
//! Every height change, whether caused by a collapse/expand toggle or by the
//! content's own growth, funnels through [`TransitionController::update`]
//! with an explicit [`UpdateCause`]. The controller decides to animate, snap
//! instantly, or ignore the change, and keeps the derived fit-content
//! rendering mode synchronized with the animation lifecycle.

use std::time::Instant;

use crate::transitions::{HeightTween, TransitionConfig};

/// What triggered a height update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCause {
    /// The `collapsed` flag flipped; the caller computed the matching
    /// target height (zero, or the current natural measurement).
    CollapseToggle,
    /// The content's own size changed while mounted.
    OrganicResize,
}

/// Stable mode reached when a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Settled at natural content sizing; further growth is visually free.
    Expanded,
    /// Settled at a fixed zero height.
    Collapsed,
}

/// Live animation state of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    /// The live, possibly-animating height value.
    pub current_height: f32,
    pub target_height: f32,
    pub animating: bool,
    /// Height is determined naturally by content rather than forced to a
    /// pixel value. Never true mid-animation.
    pub fit_content: bool,
    pub zero_height: bool,
    /// Last observed value of `collapsed`, used to detect edge transitions.
    pub previously_collapsed: bool,
}

impl TransitionState {
    fn new(collapsed: bool) -> Self {
        Self {
            current_height: 0.0,
            target_height: 0.0,
            animating: false,
            fit_content: !collapsed,
            zero_height: collapsed,
            previously_collapsed: collapsed,
        }
    }
}

/// Drives the container height between collapsed and expanded states.
#[derive(Debug)]
pub struct TransitionController {
    state: TransitionState,
    config: TransitionConfig,
    tween: Option<HeightTween>,
    /// Whether the active transition restores fit-content sizing once it
    /// completes. Rewritten on every retarget, so a superseded expand can
    /// never restore fit-content under a newer collapse.
    settles_to_fit: bool,
    /// When enabled, would-be animations complete instantly.
    reduced_motion: bool,
}

impl TransitionController {
    /// Create a controller in its initial state: fixed zero height when
    /// collapsed, natural sizing otherwise.
    pub fn new(collapsed: bool) -> Self {
        Self::with_config(collapsed, TransitionConfig::default())
    }

    pub fn with_config(collapsed: bool, config: TransitionConfig) -> Self {
        Self {
            state: TransitionState::new(collapsed),
            config,
            tween: None,
            settles_to_fit: false,
            reduced_motion: false,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn current_height(&self) -> f32 {
        self.state.current_height
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    pub fn fits_content(&self) -> bool {
        self.state.fit_content
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, transitions complete on the next tick instead of
    /// interpolating over the configured duration.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// The instant at which the in-flight transition settles, if any.
    /// Callers that block when idle can sleep until this deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tween.as_ref().map(|t| t.deadline())
    }

    /// Process one height-change event.
    ///
    /// `height` is the new target: zero when collapsing, the natural content
    /// height otherwise. Resizes of hidden content are discarded entirely;
    /// they are invisible until re-expansion takes a fresh measurement.
    pub fn update(
        &mut self,
        collapsed: bool,
        transition_height_changes: bool,
        height: f32,
        cause: UpdateCause,
        now: Instant,
    ) {
        let collapsed_changed = collapsed != self.state.previously_collapsed;

        if collapsed && !collapsed_changed {
            log::trace!("[controller] suppressed {cause:?} to {height}px while collapsed");
            return;
        }

        let should_animate = transition_height_changes || collapsed_changed;

        if should_animate {
            log::debug!(
                "[controller] animating {cause:?}: {} -> {height}px",
                self.state.current_height
            );
            // Exit natural sizing so a fixed, continuously updated pixel
            // height can be painted during the transition.
            self.state.fit_content = false;
            self.state.animating = true;

            let config = if self.reduced_motion {
                TransitionConfig::new(std::time::Duration::ZERO, self.config.easing)
            } else {
                self.config
            };
            if self.reduced_motion {
                let from = self
                    .tween
                    .as_ref()
                    .map(|t| t.value_at(now))
                    .unwrap_or(self.state.current_height);
                self.tween = Some(HeightTween::new(from, height, now, config));
            } else if let Some(tween) = &mut self.tween {
                tween.retarget(height, now);
            } else {
                self.tween = Some(HeightTween::new(
                    self.state.current_height,
                    height,
                    now,
                    config,
                ));
            }
            // A collapsed container stays at a fixed zero height; only an
            // expansion re-enters fit-content mode when it settles.
            self.settles_to_fit = !collapsed;
        } else {
            log::debug!("[controller] snap {cause:?}: {height}px");
            // Pixel-exact snap. A snap supersedes any in-flight transition,
            // resolving its settle disposition immediately.
            self.state.current_height = height;
            if self.tween.take().is_some() {
                self.state.animating = false;
                if self.settles_to_fit {
                    self.state.fit_content = true;
                    self.settles_to_fit = false;
                }
            }
        }

        self.state.target_height = height;
        self.state.zero_height = height == 0.0;
        self.state.previously_collapsed = collapsed;
    }

    /// Advance the in-flight transition to `now`.
    ///
    /// Samples the interpolated height and, once the transition completes,
    /// reports which stable mode was reached. Fit-content sizing is restored
    /// only when the settled target is the expanded state.
    pub fn tick(&mut self, now: Instant) -> Option<Settle> {
        let tween = self.tween.as_ref()?;
        self.state.current_height = tween.value_at(now);

        if !tween.is_complete(now) {
            return None;
        }

        self.state.current_height = tween.target();
        self.tween = None;
        self.state.animating = false;

        if self.settles_to_fit {
            self.settles_to_fit = false;
            self.state.fit_content = true;
            log::debug!("[controller] settled expanded at {}px", self.state.current_height);
            Some(Settle::Expanded)
        } else {
            log::debug!("[controller] settled collapsed");
            Some(Settle::Collapsed)
        }
    }
}
