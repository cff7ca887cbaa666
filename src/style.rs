//! Pure derivation of the visual style from controller state.

use crate::config::CollapsibleConfig;
use crate::controller::TransitionState;

/// How the container's height is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightExpr {
    /// Height determined naturally by content.
    FitContent,
    /// Fixed pixel height, continuously updated during a transition.
    Px(f32),
}

impl std::fmt::Display for HeightExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightExpr::FitContent => write!(f, "fit-content"),
            HeightExpr::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// Derived presentation of the container.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub height: HeightExpr,
    /// The configured negative margin, present only at zero height.
    pub margin_bottom: Option<String>,
    pub animating: bool,
    pub zero_height: bool,
}

impl RenderStyle {
    /// Overflow must be clipped during any transition (the fixed
    /// intermediate height may briefly be smaller than the content's
    /// natural size) and at a declared zero height (content would
    /// otherwise bleed out).
    pub fn clips_overflow(&self) -> bool {
        self.animating || self.zero_height
    }

    /// State-indicating class list.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.animating {
            classes.push("animating");
        }
        if self.zero_height {
            classes.push("zero-height");
        }
        classes
    }
}

/// Derive the visual style for the current state.
pub fn render_style(state: &TransitionState, config: &CollapsibleConfig) -> RenderStyle {
    let height = if state.fit_content {
        HeightExpr::FitContent
    } else {
        HeightExpr::Px(state.current_height)
    };

    let margin_bottom = if state.zero_height {
        config.negative_margin_while_collapsed.clone()
    } else {
        None
    };

    RenderStyle {
        height,
        margin_bottom,
        animating: state.animating,
        zero_height: state.zero_height,
    }
}
