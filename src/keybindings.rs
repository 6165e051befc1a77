use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Quit,
    ToggleHelp,
    ToggleEdit,
    SelectNext,
    SelectPrev,
    Deselect,
    // Moving the selected widget
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    // Resizing the selected widget
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
    AddWidget,
    RemoveWidget,
    Compact,
    Optimize,
    CyclePreset,
    Save,
    Reset,
    ClearStorage,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleHelp => "Toggle this help",
            Action::ToggleEdit => "Toggle edit mode",
            Action::SelectNext => "Select next widget",
            Action::SelectPrev => "Select previous widget",
            Action::Deselect => "Clear selection",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::GrowWidth => "Widen",
            Action::ShrinkWidth => "Narrow",
            Action::GrowHeight => "Taller",
            Action::ShrinkHeight => "Shorter",
            Action::AddWidget => "Add next widget type",
            Action::RemoveWidget => "Remove selected widget",
            Action::Compact => "Compact vertically",
            Action::Optimize => "Snap to grid",
            Action::CyclePreset => "Apply next preset",
            Action::Save => "Save and leave edit mode",
            Action::Reset => "Reset to default layout",
            Action::ClearStorage => "Forget saved layout",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let shift = KeyModifiers::SHIFT;
        let ctrl = KeyModifiers::CONTROL;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::plain(KeyCode::Char('q')));
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), ctrl));
        kb.add(ToggleHelp, KeyCombo::plain(KeyCode::Char('?')));
        kb.add(ToggleHelp, KeyCombo::plain(KeyCode::F(1)));
        kb.add(ToggleEdit, KeyCombo::plain(KeyCode::Char('e')));
        kb.add(SelectNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(SelectPrev, KeyCombo::plain(KeyCode::BackTab));
        kb.add(Deselect, KeyCombo::plain(KeyCode::Esc));
        kb.add(MoveLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(MoveRight, KeyCombo::plain(KeyCode::Right));
        kb.add(MoveUp, KeyCombo::plain(KeyCode::Up));
        kb.add(MoveDown, KeyCombo::plain(KeyCode::Down));
        kb.add(GrowWidth, KeyCombo::new(KeyCode::Right, shift));
        kb.add(ShrinkWidth, KeyCombo::new(KeyCode::Left, shift));
        kb.add(GrowHeight, KeyCombo::new(KeyCode::Down, shift));
        kb.add(ShrinkHeight, KeyCombo::new(KeyCode::Up, shift));
        kb.add(AddWidget, KeyCombo::plain(KeyCode::Char('a')));
        kb.add(RemoveWidget, KeyCombo::plain(KeyCode::Char('d')));
        kb.add(RemoveWidget, KeyCombo::plain(KeyCode::Delete));
        kb.add(Compact, KeyCombo::plain(KeyCode::Char('c')));
        kb.add(Optimize, KeyCombo::plain(KeyCode::Char('o')));
        kb.add(CyclePreset, KeyCombo::plain(KeyCode::Char('p')));
        kb.add(Save, KeyCombo::plain(KeyCode::Char('s')));
        kb.add(Save, KeyCombo::new(KeyCode::Char('s'), ctrl));
        kb.add(Reset, KeyCombo::plain(KeyCode::Char('r')));
        kb.add(ClearStorage, KeyCombo::new(KeyCode::Char('r'), ctrl));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// Every bound action with its key labels, in declaration order.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        let mut v: Vec<_> = self
            .map
            .iter()
            .map(|(act, list)| (*act, list.iter().map(KeyCombo::display).collect()))
            .collect();
        v.sort_by_key(|(act, _)| *act);
        v
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}
