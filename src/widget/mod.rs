//! Interactive widget behaviour
//!
//! Rebuilt on every render pass. Holds no references into the tree; each event
//! re-queries the container it is handed.

pub mod action;
pub mod controller;

pub use action::WidgetAction;
pub use controller::{Notification, SlideDirection, WidgetController, WidgetState};
