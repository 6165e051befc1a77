//! Real-terminal drivers on top of crossterm.

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::keyboard::KeyNormalizer;
use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

/// Reads normalized terminal events.
///
/// Runs of pointer motion, drag or resize events that are already waiting
/// are folded into the latest one. Each drag event becomes a widget update,
/// and only the final pointer position of a burst matters.
pub struct ConsoleInputDriver {
    normalizer: KeyNormalizer,
    pending: VecDeque<Event>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyNormalizer::new(),
            pending: VecDeque::new(),
        }
    }

    /// Queue an event ahead of the terminal's own input.
    pub fn push_event(&mut self, evt: Event) {
        self.pending.push_back(evt);
    }

    fn next_normalized(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = self.normalizer.normalize(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }

    fn coalesce(&mut self, mut evt: Event) -> io::Result<Event> {
        while coalescible(&evt) {
            let next = match self.pending.pop_front() {
                Some(next) => next,
                None if crossterm::event::poll(Duration::ZERO)? => self.next_normalized()?,
                None => break,
            };
            if same_motion(&evt, &next) {
                evt = next;
            } else {
                self.pending.push_front(next);
                break;
            }
        }
        Ok(evt)
    }
}

fn coalescible(evt: &Event) -> bool {
    matches!(
        evt,
        Event::Resize(..)
            | Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                ..
            })
    )
}

fn same_motion(a: &Event, b: &Event) -> bool {
    match (a, b) {
        (Event::Resize(..), Event::Resize(..)) => true,
        (Event::Mouse(a), Event::Mouse(b)) => match (a.kind, b.kind) {
            (MouseEventKind::Moved, MouseEventKind::Moved) => true,
            (MouseEventKind::Drag(x), MouseEventKind::Drag(y)) => x == y,
            _ => false,
        },
        _ => false,
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        let evt = match self.pending.pop_front() {
            Some(evt) => evt,
            None => self.next_normalized()?,
        };
        self.coalesce(evt)
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Full-screen ratatui terminal on stdout.
///
/// `enter` switches to the alternate screen in raw mode; `exit` (also run on
/// drop) puts the shell back the way it was.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            active: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.active = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(|frame| f(UiFrame::new(frame)))
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drag_bursts_fold_into_the_last_position() {
        let drag = MouseEventKind::Drag(MouseButton::Left);
        let mut d = ConsoleInputDriver::new();
        d.push_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        d.push_event(mouse(drag, 2, 1));
        d.push_event(mouse(drag, 3, 2));
        d.push_event(mouse(drag, 7, 4));
        d.push_event(mouse(MouseEventKind::Up(MouseButton::Left), 7, 4));
        d.push_event(key('z'));

        assert!(d.poll(Duration::ZERO).unwrap());
        assert!(matches!(d.read().unwrap(), Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(d.read().unwrap(), mouse(drag, 7, 4));
        assert!(matches!(d.read().unwrap(), Event::Mouse(m) if m.kind == MouseEventKind::Up(MouseButton::Left)));
        assert_eq!(d.read().unwrap(), key('z'));
    }

    #[test]
    fn motion_of_different_kinds_is_kept_apart() {
        let mut d = ConsoleInputDriver::new();
        d.push_event(mouse(MouseEventKind::Moved, 1, 1));
        d.push_event(mouse(MouseEventKind::Moved, 2, 1));
        d.push_event(mouse(MouseEventKind::Drag(MouseButton::Right), 3, 1));
        d.push_event(Event::Resize(80, 24));
        d.push_event(Event::Resize(100, 30));
        d.push_event(key('q'));

        assert_eq!(d.read().unwrap(), mouse(MouseEventKind::Moved, 2, 1));
        assert_eq!(
            d.read().unwrap(),
            mouse(MouseEventKind::Drag(MouseButton::Right), 3, 1)
        );
        assert_eq!(d.read().unwrap(), Event::Resize(100, 30));
        assert_eq!(d.read().unwrap(), key('q'));
    }
}
