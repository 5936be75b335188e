use std::fs::File;

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind};
use joist::{
    mark_focused, Align, Backdrop, Border, Color, Edges, Element, FocusState, Justify, Position,
    Size, Style, Terminal,
};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("overlay.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut focus = FocusState::new();
    let mut sheet_open = false;

    loop {
        let mut root = ui(sheet_open);
        focus.sync_traps(&root);
        mark_focused(&mut root, focus.focused());

        let layout = term.render(&root)?.clone();

        let raw_events = term.poll(None)?;

        for event in &raw_events {
            if let CtEvent::Key(key_event) = event {
                if key_event.kind == KeyEventKind::Press {
                    match key_event.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('o') => sheet_open = !sheet_open,
                        KeyCode::Esc if sheet_open => sheet_open = false,
                        _ => {}
                    }
                }
            }
        }

        // Tab cycling and hover focus stay inside the sheet while it is up
        let _ = focus.process_events(&raw_events, &root, &layout);
    }
}

fn ui(sheet_open: bool) -> Element {
    let mut root = Element::box_()
        .id("app")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(background_content());

    if sheet_open {
        root = root.child(sheet());
    }

    root
}

fn background_content() -> Element {
    Element::col()
        .id("background")
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(Color::oklch(0.25, 0.08, 250.0)))
        .padding(Edges::all(2))
        .gap(1)
        .child(
            Element::text("Overlay Demo")
                .style(Style::new().bold().foreground(Color::oklch(0.9, 0.05, 250.0))),
        )
        .child(Element::text("Press 'o' to open the sheet, 'q' to quit."))
        .child(Element::text("Tab moves between the items below."))
        .child(Element::text(""))
        .child(
            Element::row()
                .gap(2)
                .child(item("First", "item-1"))
                .child(item("Second", "item-2"))
                .child(item("Third", "item-3")),
        )
}

fn item(label: &str, id: &str) -> Element {
    Element::col()
        .id(id)
        .width(Size::Fixed(12))
        .height(Size::Fixed(3))
        .focusable(true)
        .justify(Justify::Center)
        .align(Align::Center)
        .style(
            Style::new()
                .background(Color::oklch(0.4, 0.1, 250.0))
                .border(Border::Rounded),
        )
        .style_focused(
            Style::new()
                .background(Color::oklch(0.55, 0.12, 250.0))
                .border(Border::Thick),
        )
        .child(Element::text(label))
}

fn sheet() -> Element {
    Element::col()
        .id("veil")
        .position(Position::Fixed)
        .left(0)
        .top(0)
        .width(Size::Percent(1.0))
        .height(Size::Percent(1.0))
        .z_index(100)
        .backdrop(Backdrop::Dim(0.6))
        .justify(Justify::Center)
        .align(Align::Center)
        .child(
            Element::col()
                .id("sheet")
                .interaction_scope(true)
                .width(Size::Fixed(44))
                .height(Size::Fixed(10))
                .padding(Edges::all(1))
                .gap(1)
                .style(
                    Style::new()
                        .background(Color::oklch(0.2, 0.02, 250.0))
                        .border(Border::Rounded)
                        .foreground(Color::oklch(0.9, 0.02, 250.0)),
                )
                .child(Element::text("Sheet").style(Style::new().bold()))
                .child(Element::text("While open, Tab stays in here."))
                .child(
                    Element::row()
                        .gap(2)
                        .child(item("Yes", "sheet-yes"))
                        .child(item("No", "sheet-no")),
                ),
        )
}
