//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Used for the result list and overlays. While the search bar has focus,
/// printable characters are edited into the query before this table is
/// consulted.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers are compared; event kind and state flags
    /// reported by some terminals are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut kb = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Vim-style selection
        kb.bind(KeyCode::Char('j'), none, KeyAction::SelectNext);
        kb.bind(KeyCode::Char('k'), none, KeyAction::SelectPrev);
        kb.bind(KeyCode::Char('g'), none, KeyAction::SelectFirst);
        kb.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::SelectLast);
        kb.bind(KeyCode::Char('G'), none, KeyAction::SelectLast);

        // Arrow keys
        kb.bind(KeyCode::Down, none, KeyAction::SelectNext);
        kb.bind(KeyCode::Up, none, KeyAction::SelectPrev);
        kb.bind(KeyCode::Home, none, KeyAction::SelectFirst);
        kb.bind(KeyCode::End, none, KeyAction::SelectLast);

        // Page navigation
        kb.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        kb.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        kb.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        kb.bind(KeyCode::PageUp, none, KeyAction::PageUp);

        // Search
        kb.bind(KeyCode::Char('/'), none, KeyAction::FocusSearch);
        kb.bind(KeyCode::Char('i'), none, KeyAction::FocusSearch);
        kb.bind(KeyCode::Tab, none, KeyAction::CycleFocus);
        kb.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::CycleFocus);
        kb.bind(KeyCode::Char('m'), none, KeyAction::LoadMore);
        kb.bind(KeyCode::Char('r'), none, KeyAction::Retry);

        // Overlay
        kb.bind(KeyCode::Enter, none, KeyAction::OpenDetail);
        kb.bind(KeyCode::Char(' '), none, KeyAction::OpenDetail);
        kb.bind(KeyCode::Esc, none, KeyAction::CloseOverlay);

        // Application controls
        kb.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        kb.bind(KeyCode::Char('?'), none, KeyAction::Help);
        kb.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);

        kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_map_m_to_load_more() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);

        assert_eq!(
            bindings.get(key_event),
            Some(KeyAction::LoadMore),
            "'m' should map to LoadMore"
        );
    }

    #[test]
    fn default_bindings_map_vim_and_arrow_navigation() {
        let bindings = KeyBindings::default();
        let get = |code| bindings.get(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(get(KeyCode::Char('j')), Some(KeyAction::SelectNext));
        assert_eq!(get(KeyCode::Down), Some(KeyAction::SelectNext));
        assert_eq!(get(KeyCode::Char('k')), Some(KeyAction::SelectPrev));
        assert_eq!(get(KeyCode::Up), Some(KeyAction::SelectPrev));
    }

    #[test]
    fn uppercase_g_maps_to_select_last_with_or_without_shift() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::SelectLast)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE)),
            Some(KeyAction::SelectLast)
        );
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::NUM_LOCK,
        );

        assert_eq!(bindings.get(key_event), Some(KeyAction::Quit));
    }

    #[test]
    fn unbound_key_returns_none() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(bindings.get(key_event), None);
    }
}
