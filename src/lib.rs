//! A UI primitive that smoothly animates a container's height between a
//! collapsed (zero, hidden) and an expanded (natural content height) state,
//! while handling organic height changes of the content itself.
//!
//! The core is [`TransitionController`], the height-transition state
//! machine; [`Collapsible`] wires it to a size observer and keeps the
//! keyboard tab order of focusable descendants in lock-step with
//! visibility.

pub mod collapsible;
pub mod config;
pub mod controller;
pub mod focus;
pub mod node;
pub mod observer;
pub mod style;
pub mod transitions;

pub use collapsible::Collapsible;
pub use config::CollapsibleConfig;
pub use controller::{Settle, TransitionController, TransitionState, UpdateCause};
pub use focus::{AccessibilitySync, TabOrder};
pub use node::{collect_focusable, find_node, Node};
pub use observer::{ContentSize, Subscription};
pub use style::{render_style, HeightExpr, RenderStyle};
pub use transitions::{Easing, HeightTween, TransitionConfig, DEFAULT_DURATION};
