//! Keyboard handling for the font-select combobox input.
//!
//! Features:
//! - Key code names parsed into winit `KeyCode`s
//! - Mapping of key codes to the navigation keys the combobox intercepts
//!
//! Only the navigation keys are intercepted. Everything else passes through
//! so ordinary typing keeps driving the filter through input events.

pub mod parser;

pub use parser::{ParseError, parse_key_code, parse_key_sequence};
pub use winit::keyboard::KeyCode;

/// A key the combobox input intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Down,
    Up,
    /// Collapse the current family's variation sub-list (drill-down only)
    Left,
    /// Expand the highlighted family's variation sub-list (drill-down only)
    Right,
    Escape,
    /// Enter or NumpadEnter
    Enter,
}

impl NavKey {
    /// Map a key code to a navigation key.
    ///
    /// ArrowLeft/ArrowRight are only intercepted in drill-down layouts.
    pub fn from_key_code(code: KeyCode, drill_down: bool) -> Option<Self> {
        match code {
            KeyCode::ArrowDown => Some(NavKey::Down),
            KeyCode::ArrowUp => Some(NavKey::Up),
            KeyCode::Escape => Some(NavKey::Escape),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(NavKey::Enter),
            KeyCode::ArrowLeft if drill_down => Some(NavKey::Left),
            KeyCode::ArrowRight if drill_down => Some(NavKey::Right),
            _ => None,
        }
    }

    /// Parse a key code name straight to a navigation key.
    ///
    /// Returns `Ok(None)` for valid key codes that are not intercepted.
    pub fn parse(s: &str, drill_down: bool) -> Result<Option<Self>, ParseError> {
        let code = parse_key_code(s)?;
        let key = Self::from_key_code(code, drill_down);
        if key.is_none() {
            log::trace!("Key {:?} passes through", code);
        }
        Ok(key)
    }
}
