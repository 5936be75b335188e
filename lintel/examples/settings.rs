//! Settings dialog demo: a badge trigger opening a modal with a radio
//! group inside. Tab cycles within the dialog while it is open, Escape or
//! the backdrop dismisses it, and the quit button stops the loop.

use std::fs::File;
use std::sync::Arc;

use joist::{Edges, Size, Style};
use simplelog::{Config, LevelFilter, WriteLogger};

use lintel::prelude::*;

fn main() -> Result<(), AppError> {
    // Set up file logging
    if let Ok(log_file) = File::create("settings.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let mut app = App::new()?;
    let exit = app.exit_handle();

    let settings = State::new(DialogCore::new());
    let theme = State::new(RadioState::new([
        ("dark".to_string(), "Dark"),
        ("light".to_string(), "Light"),
        ("system".to_string(), "Follow system"),
    ]));

    app.run(move |registry| view(registry, &settings, &theme, &exit))
}

fn view(
    registry: &HandlerRegistry,
    settings: &State<DialogCore>,
    theme: &State<RadioState<String>>,
    exit: &ExitHandle,
) -> Element {
    let mut radio_handlers = WidgetHandlers::new();
    radio_handlers.insert(
        "on_change",
        Arc::new(|hx: &HandlerContext| {
            log::info!("theme changed to {:?}", hx.event().value());
        }),
    );
    let theme_radio = RadioGroup::new()
        .state(theme)
        .id("theme")
        .build(registry, &radio_handlers);

    let mut dialog_handlers = WidgetHandlers::new();
    dialog_handlers.insert(
        "on_open",
        Arc::new(|_hx: &HandlerContext| {
            log::info!("settings opened");
        }),
    );
    let settings_dialog = Dialog::new()
        .state(settings)
        .id("settings")
        .title("Settings")
        .trigger(TriggerSpec::component(
            "badge",
            TriggerProps::new().label("Sam Doe"),
        ))
        .body(theme_radio)
        .close_label("Close settings")
        .build(registry, &dialog_handlers);

    let mut quit_handlers = WidgetHandlers::new();
    {
        let exit = exit.clone();
        quit_handlers.insert(
            "on_activate",
            Arc::new(move |_hx: &HandlerContext| exit.exit()),
        );
    }
    let quit = Button::new()
        .label("Quit")
        .hint("ctrl+c")
        .id("quit")
        .build(registry, &quit_handlers);

    Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .padding(Edges::all(2))
        .gap(1)
        .child(Element::text("Account").style(Style::new().bold()))
        .child(settings_dialog)
        .child(quit)
}
