//! Keyboard navigation for the combobox input.
//!
//! Only [`NavKey`]s reach this module; the caller maps raw key codes with
//! [`NavKey::from_key_code`] so typing keys pass through untouched. Every
//! key handled here cancels the event's default action.

use font_select_keybindings::{KeyCode, NavKey};

use crate::preview::EntryId;
use crate::state_machine::{Effect, Machine};

/// Map a key code for the given layout. `None` means the key passes through.
pub fn nav_key_for(code: KeyCode, drill_down: bool) -> Option<NavKey> {
    NavKey::from_key_code(code, drill_down)
}

impl Machine<'_> {
    pub(crate) fn key(&mut self, key: NavKey) {
        if matches!(key, NavKey::Left | NavKey::Right) && !self.ctx.layout.is_drill_down() {
            return;
        }
        self.handled = true;

        match key {
            NavKey::Escape => self.escape(),
            NavKey::Enter => self.enter(),
            NavKey::Down => self.step(true),
            NavKey::Up => self.step(false),
            NavKey::Right => self.expand(),
            NavKey::Left => self.collapse(),
        }
    }

    fn escape(&mut self) {
        if self.state.is_open {
            self.close();
            return;
        }
        if !self.state.query.is_empty() {
            self.effects.push(Effect::SetInputText(String::new()));
        }
        self.state.query.clear();
        self.effects.push(Effect::PreviewGroup(None));
        self.open();
    }

    fn enter(&mut self) {
        match self.state.highlighted_entry(self.ctx.catalog) {
            Some(entry) => self.commit(entry),
            None => self.close(),
        }
    }

    /// Move the highlight circularly through the visible entries.
    fn step(&mut self, forward: bool) {
        if !self.state.is_open {
            self.open();
        }
        let entries = self.entries();
        let count = entries.len();
        if count == 0 {
            return;
        }

        self.state.pointer_hovering = false;
        let next = match (self.state.highlighted, forward) {
            (None, true) => 0,
            (Some(index), true) => (index + 1) % count,
            (None, false) | (Some(0), false) => count - 1,
            (Some(index), false) => (index - 1).min(count - 1),
        };
        self.set_highlight(next, entries[next]);
    }

    /// Reveal the highlighted family's variation sub-list.
    fn expand(&mut self) {
        let Some(EntryId::Family(family)) = self.state.highlighted_entry(self.ctx.catalog) else {
            return;
        };
        if self.state.expanded == Some(family) {
            return;
        }
        self.state.expanded = Some(family);
        // The family keeps its position; another family's sub-list may have
        // collapsed above it.
        if let Some(index) = self.entries().iter().position(|e| *e == EntryId::Family(family)) {
            self.set_highlight(index, EntryId::Family(family));
        }
    }

    /// Hide the current family's sub-list and highlight the family itself.
    fn collapse(&mut self) {
        let family = match self.state.highlighted_entry(self.ctx.catalog) {
            Some(entry) => entry.family(),
            None => match self.state.expanded {
                Some(family) => family,
                None => return,
            },
        };
        if self.state.expanded != Some(family) {
            return;
        }
        self.state.expanded = None;
        if let Some(index) = self.entries().iter().position(|e| *e == EntryId::Family(family)) {
            self.set_highlight(index, EntryId::Family(family));
        }
    }

    fn set_highlight(&mut self, index: usize, entry: EntryId) {
        self.state.highlighted = Some(index);
        self.effects.push(Effect::Highlight(Some(entry)));
        self.effects.push(Effect::ScrollIntoView(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::{ComboEvent, Context, NavigationState, Transition, transition};
    use font_select_config::Layout;
    use font_select_fonts::{Catalog, RawFontRecord};

    fn catalog() -> Catalog {
        let mut records = Vec::new();
        for family in ["Arial", "Georgia", "Verdana"] {
            records.push(RawFontRecord::new(family, family, family));
            records.push(RawFontRecord::new(
                family,
                format!("{family} Bold"),
                format!("{family}-Bold"),
            ));
        }
        Catalog::from_records(records)
    }

    fn run(catalog: &Catalog, layout: Layout, events: Vec<ComboEvent>) -> Transition {
        let ctx = Context {
            catalog,
            layout,
            interactive: true,
        };
        let mut current = Transition {
            state: NavigationState::default(),
            effects: Vec::new(),
            handled: false,
        };
        for event in events {
            current = transition(&ctx, &current.state, event);
        }
        current
    }

    fn keys(keys: &[NavKey]) -> Vec<ComboEvent> {
        keys.iter().copied().map(ComboEvent::Key).collect()
    }

    #[test]
    fn test_arrow_down_from_closed_lands_on_first() {
        let catalog = catalog();
        let t = run(&catalog, Layout::Flat, keys(&[NavKey::Down]));
        assert!(t.handled);
        assert!(t.state.is_open);
        assert_eq!(t.state.highlighted, Some(0));
        assert!(t.effects.contains(&Effect::ScrollIntoView(EntryId::Family(0))));
    }

    #[test]
    fn test_arrow_down_wraps_after_n_presses() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Down; 4]));
        let t = run(&catalog, Layout::Flat, events);
        // 3 visible entries: 0, 1, 2, then back to 0
        assert_eq!(t.state.highlighted, Some(0));
    }

    #[test]
    fn test_arrow_up_wraps_to_last() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Up]));
        let t = run(&catalog, Layout::Flat, events.clone());
        assert_eq!(t.state.highlighted, Some(2));

        events.extend(keys(&[NavKey::Down, NavKey::Up, NavKey::Up]));
        let t = run(&catalog, Layout::Flat, events);
        assert_eq!(t.state.highlighted, Some(1));
    }

    #[test]
    fn test_arrows_skip_hidden_entries() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("a".into())];
        events.extend(keys(&[NavKey::Down, NavKey::Down]));
        let t = run(&catalog, Layout::Flat, events);
        // "a" matches Arial, Georgia and Verdana, all three visible
        assert_eq!(t.state.highlighted, Some(1));

        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("ver".into())];
        events.extend(keys(&[NavKey::Down, NavKey::Down]));
        let t = run(&catalog, Layout::Flat, events);
        assert_eq!(t.state.highlighted, Some(0));
        assert_eq!(
            t.state.highlighted_entry(&catalog),
            Some(EntryId::Family(2))
        );
    }

    #[test]
    fn test_arrow_without_matches_does_nothing() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("xyz".into())];
        events.extend(keys(&[NavKey::Down]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(t.handled);
        assert!(!t.state.is_open);
        assert_eq!(t.state.highlighted, None);
    }

    #[test]
    fn test_enter_commits_highlighted() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("ar".into())];
        events.extend(keys(&[NavKey::Down, NavKey::Enter]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(!t.state.is_open);
        assert_eq!(t.state.query, "Arial");
        assert!(t.effects.contains(&Effect::CommitFamily { family: 0 }));
    }

    #[test]
    fn test_enter_without_highlight_closes_without_commit() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Enter]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(!t.state.is_open);
        assert_eq!(t.effects, vec![Effect::Closed]);
    }

    #[test]
    fn test_escape_while_open_closes() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("geo".into())];
        events.extend(keys(&[NavKey::Escape]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(!t.state.is_open);
        assert_eq!(t.state.query, "geo");
        assert_eq!(t.effects, vec![Effect::Closed]);
    }

    #[test]
    fn test_escape_while_closed_clears_and_reopens() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus, ComboEvent::Input("geo".into())];
        events.extend(keys(&[NavKey::Escape, NavKey::Escape]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(t.state.is_open);
        assert_eq!(t.state.query, "");
        assert_eq!(t.state.visible_entries(&catalog).len(), 3);
        assert!(t.effects.contains(&Effect::SetInputText(String::new())));
    }

    #[test]
    fn test_horizontal_arrows_ignored_in_flat_layout() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Down, NavKey::Right]));
        let t = run(&catalog, Layout::Flat, events);
        assert!(!t.handled);
        assert_eq!(t.state.expanded, None);
    }

    #[test]
    fn test_drill_down_expand_and_collapse() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Down, NavKey::Down, NavKey::Right]));
        let t = run(&catalog, Layout::DrillDown, events.clone());
        assert_eq!(t.state.expanded, Some(1));
        assert_eq!(
            t.state.visible_entries(&catalog),
            vec![
                EntryId::Family(0),
                EntryId::Family(1),
                EntryId::Variant { family: 1, variant: 0 },
                EntryId::Variant { family: 1, variant: 1 },
                EntryId::Family(2),
            ]
        );
        assert_eq!(t.state.highlighted, Some(1));

        // Down twice reaches "Georgia Bold", Left returns to "Georgia".
        events.extend(keys(&[NavKey::Down, NavKey::Down]));
        let t = run(&catalog, Layout::DrillDown, events.clone());
        assert_eq!(
            t.state.highlighted_entry(&catalog),
            Some(EntryId::Variant { family: 1, variant: 1 })
        );

        events.extend(keys(&[NavKey::Left]));
        let t = run(&catalog, Layout::DrillDown, events);
        assert!(t.handled);
        assert_eq!(t.state.expanded, None);
        assert_eq!(t.state.highlighted, Some(1));
        assert_eq!(t.state.visible_entries(&catalog).len(), 3);
    }

    #[test]
    fn test_drill_down_enter_on_variant_commits_variant() {
        let catalog = catalog();
        let mut events = vec![ComboEvent::Focus];
        events.extend(keys(&[NavKey::Down, NavKey::Right, NavKey::Down, NavKey::Down]));
        events.extend(keys(&[NavKey::Enter]));
        let t = run(&catalog, Layout::DrillDown, events);
        assert!(t.effects.contains(&Effect::CommitVariant {
            family: 0,
            variant: 1
        }));
        assert_eq!(t.state.query, "Arial");
        assert!(!t.state.is_open);
    }

    #[test]
    fn test_nav_key_for_layout() {
        assert_eq!(nav_key_for(KeyCode::ArrowRight, false), None);
        assert_eq!(nav_key_for(KeyCode::ArrowRight, true), Some(NavKey::Right));
        assert_eq!(nav_key_for(KeyCode::KeyQ, true), None);
    }
}
