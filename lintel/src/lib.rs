pub mod app;
pub mod content;
pub mod dispatch;
pub mod fsm;
pub mod handler;
pub mod overlay;
pub mod state;
pub mod widgets;

pub use handler::{EventData, Handler, HandlerContext, HandlerRegistry, WidgetHandlers};
pub use state::State;

pub mod prelude {
    pub use crate::app::{App, AppError, ExitHandle};
    pub use crate::content::{ContentOverrides, ContentSpec};
    pub use crate::dispatch::{DispatchResult, EventRouter};
    pub use crate::fsm::{DialogCore, DialogInput, DialogPhase, DialogSignal};
    pub use crate::handler::{
        EventData, Handler, HandlerContext, HandlerRegistry, WidgetHandlers,
    };
    pub use crate::overlay::{OverlayGuard, OverlayStack};
    pub use crate::state::State;
    pub use crate::widgets::{
        Button, Dialog, RadioGroup, RadioOption, RadioState, TriggerKind, TriggerProps,
        TriggerSpec,
    };

    pub use joist::Element;
}
