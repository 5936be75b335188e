//! Built-in widgets.
//!
//! Each widget is a consuming builder: configure it, then call
//! `build(&registry, &handlers)` to produce a [`joist::Element`] tree.
//! Building registers the widget's callbacks into the [`HandlerRegistry`]
//! so the event router can find them by element id.
//!
//! [`HandlerRegistry`]: crate::HandlerRegistry

pub mod button;
pub mod dialog;
pub mod radio;
pub mod trigger;

pub use button::Button;
pub use dialog::Dialog;
pub use radio::{RadioGroup, RadioOption, RadioState};
pub use trigger::{TriggerKind, TriggerProps, TriggerSpec};
