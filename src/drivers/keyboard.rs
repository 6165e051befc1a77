//! Normalizes raw terminal key events before they reach keybinding lookup.
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Default)]
pub struct KeyNormalizer;

impl KeyNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Drops key releases, folds the Shift+Tab spellings into a bare
    /// `BackTab` and strips Shift from punctuation (`?` arrives shifted on
    /// most layouts). Non-key events pass through unchanged.
    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.kind == KeyEventKind::Release {
                    return None;
                }
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                }
                if key.code == KeyCode::BackTab {
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                if let KeyCode::Char(c) = key.code
                    && !c.is_ascii_alphabetic()
                {
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
