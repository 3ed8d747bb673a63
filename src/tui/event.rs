use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    Export,
    None,
}

/// Waits up to `timeout` for a key press.
pub fn poll_event(timeout: Duration) -> std::io::Result<Event> {
    if event::poll(timeout)? {
        if let CrosstermEvent::Key(key) = event::read()? {
            return Ok(map_key_event(key));
        }
    }
    Ok(Event::None)
}

fn map_key_event(key: KeyEvent) -> Event {
    if key.kind != KeyEventKind::Press {
        return Event::None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            Event::Quit
        }
        (KeyCode::Char('e'), _) => Event::Export,
        _ => Event::None,
    }
}
