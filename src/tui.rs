use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::error::Result;
use crate::fmt::units;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const UNITS_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const UNITS_NEG_STYLE: Style = Style::new().fg(Color::Red);
pub const BAR_STYLE: Style = Style::new().fg(Color::Cyan);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Unit count as a colored Span. Negative counts only show up in bad source data.
pub fn units_span(count: i64) -> Span<'static> {
    let style = if count < 0 {
        UNITS_NEG_STYLE
    } else {
        UNITS_POS_STYLE
    };
    Span::styled(units(count), style)
}

pub enum ViewAction {
    Continue,
    Close,
}

pub trait InteractiveView {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Run an interactive ratatui view. Sets up the terminal, event loop,
/// and panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn InteractiveView) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key.code) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
