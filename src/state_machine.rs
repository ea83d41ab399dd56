//! Selection state machine for the combobox.
//!
//! The combobox is either closed or open. Every UI event goes through
//! [`transition`], a pure function from the current [`NavigationState`] and
//! an event to the next state plus a list of [`Effect`]s. The widget applies
//! the effects (committing values, updating the input text) and the
//! presentation layer reads the resulting state.
//!
//! Keyboard events are handled in [`crate::navigation`].

use font_select_config::Layout;
use font_select_fonts::Catalog;
use font_select_keybindings::NavKey;

use crate::filter::filter;
use crate::preview::{EntryId, layout_entries};

/// Transient combobox state. Reset on open and close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub is_open: bool,
    /// Position in the visible entry list, `None` when nothing is highlighted
    pub highlighted: Option<usize>,
    /// Pointer is over the preview list; suppresses the close on blur
    pub pointer_hovering: bool,
    /// Current text of the input
    pub query: String,
    pub focused: bool,
    /// Family whose variation sub-list is revealed (drill-down layouts)
    pub expanded: Option<usize>,
    /// Result of the last filter run, in catalog order
    pub visible_families: Vec<usize>,
}

impl NavigationState {
    /// Entries currently shown. Empty while closed.
    pub fn visible_entries(&self, catalog: &Catalog) -> Vec<EntryId> {
        if !self.is_open {
            return Vec::new();
        }
        layout_entries(catalog, &self.visible_families, self.expanded)
    }

    /// The highlighted entry, if any.
    pub fn highlighted_entry(&self, catalog: &Catalog) -> Option<EntryId> {
        let index = self.highlighted?;
        self.visible_entries(catalog).get(index).copied()
    }
}

/// Everything a transition may read besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub catalog: &'a Catalog,
    pub layout: Layout,
    /// False while the catalog is loading, after a degrade, or when disabled
    pub interactive: bool,
}

/// UI events consumed by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboEvent {
    /// The text input received focus
    Focus,
    /// The text input lost focus
    Blur,
    /// The disclosure toggle was activated
    Toggle,
    /// The input text changed
    Input(String),
    PointerEnter(EntryId),
    PointerLeave,
    PointerDown(EntryId),
    Key(NavKey),
    /// The widget became disabled
    Disable,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The list opened; expanded flags become true
    Opened,
    /// The list closed; expanded flags become false
    Closed,
    SetInputText(String),
    /// Commit a family, keeping the current variant if the family is already committed
    CommitFamily { family: usize },
    /// Commit one specific variant
    CommitVariant { family: usize, variant: usize },
    /// The input text named no family; clear the committed value
    Reject,
    /// Active descendant changed
    Highlight(Option<EntryId>),
    ScrollIntoView(EntryId),
    /// Move focus to the text input
    FocusInput,
    /// Family whose variation group the selector previews while typing
    PreviewGroup(Option<usize>),
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: NavigationState,
    pub effects: Vec<Effect>,
    /// The event's default action must be cancelled
    pub handled: bool,
}

/// Compute the next state for `event`.
pub fn transition(ctx: &Context<'_>, state: &NavigationState, event: ComboEvent) -> Transition {
    let mut machine = Machine::new(ctx, state.clone());
    machine.dispatch(event);
    machine.finish()
}

/// Mutable working copy of a transition in progress.
pub(crate) struct Machine<'a> {
    pub(crate) ctx: Context<'a>,
    pub(crate) state: NavigationState,
    pub(crate) effects: Vec<Effect>,
    pub(crate) handled: bool,
}

impl<'a> Machine<'a> {
    fn new(ctx: &Context<'a>, state: NavigationState) -> Self {
        Self {
            ctx: *ctx,
            state,
            effects: Vec::new(),
            handled: false,
        }
    }

    fn finish(self) -> Transition {
        Transition {
            state: self.state,
            effects: self.effects,
            handled: self.handled,
        }
    }

    fn dispatch(&mut self, event: ComboEvent) {
        log::debug!("combobox event {:?} (open={})", event, self.state.is_open);

        if let ComboEvent::Disable = event {
            self.state.focused = false;
            self.state.pointer_hovering = false;
            self.close();
            return;
        }
        if !self.ctx.interactive {
            log::trace!("Ignoring {:?}: widget is not interactive", event);
            return;
        }

        match event {
            ComboEvent::Focus => self.focus(),
            ComboEvent::Blur => self.blur(),
            ComboEvent::Toggle => self.toggle(),
            ComboEvent::Input(text) => self.input(text),
            ComboEvent::PointerEnter(entry) => self.pointer_enter(entry),
            ComboEvent::PointerLeave => self.pointer_leave(),
            ComboEvent::PointerDown(entry) => self.pointer_down(entry),
            ComboEvent::Key(key) => self.key(key),
            ComboEvent::Disable => {}
        }
    }

    pub(crate) fn entries(&self) -> Vec<EntryId> {
        self.state.visible_entries(self.ctx.catalog)
    }

    /// Closed → Open, showing the entries that match the current query.
    ///
    /// Stays closed when nothing matches.
    pub(crate) fn open(&mut self) {
        self.clear_highlight();
        self.state.expanded = None;
        self.state.visible_families = filter(self.ctx.catalog, &self.state.query, false);
        if self.state.visible_families.is_empty() {
            self.close();
            return;
        }
        if !self.state.is_open {
            self.state.is_open = true;
            self.effects.push(Effect::Opened);
        }
    }

    /// Open → Closed. Hides every entry and clears the highlight.
    pub(crate) fn close(&mut self) {
        self.clear_highlight();
        self.state.expanded = None;
        if self.state.is_open {
            self.state.is_open = false;
            self.effects.push(Effect::Closed);
        }
    }

    /// Drop the highlight, announcing it when one was set.
    fn clear_highlight(&mut self) {
        if self.state.highlighted.take().is_some() {
            self.effects.push(Effect::Highlight(None));
        }
    }

    /// Commit a visible entry: write its family into the input and close.
    pub(crate) fn commit(&mut self, entry: EntryId) {
        let Some(group) = self.ctx.catalog.group(entry.family()) else {
            return;
        };
        let text = group.family_name().to_string();
        log::debug!("Committing {:?} ({})", entry, text);

        self.state.query = text.clone();
        self.effects.push(Effect::SetInputText(text));
        self.effects.push(match entry {
            EntryId::Family(family) => Effect::CommitFamily { family },
            EntryId::Variant { family, variant } => Effect::CommitVariant { family, variant },
        });
        self.close();
    }

    /// Validate the input text against the catalog (change semantics).
    ///
    /// A case-insensitive exact family match commits that family and
    /// normalizes the text; anything else clears text and value.
    fn validate_text(&mut self) {
        match filter(self.ctx.catalog, &self.state.query, true).first() {
            Some(&family) => {
                let canonical = self.ctx.catalog.group(family).map(|g| g.family_name());
                if let Some(name) = canonical
                    && name != self.state.query
                {
                    self.state.query = name.to_string();
                    self.effects.push(Effect::SetInputText(name.to_string()));
                }
                self.effects.push(Effect::CommitFamily { family });
            }
            None => {
                if !self.state.query.is_empty() {
                    log::debug!("Rejecting unrecognized text {:?}", self.state.query);
                    self.effects.push(Effect::SetInputText(String::new()));
                }
                self.state.query.clear();
                self.effects.push(Effect::Reject);
            }
        }
    }

    fn focus(&mut self) {
        self.state.focused = true;
        if !self.state.is_open {
            self.open();
        }
    }

    fn blur(&mut self) {
        self.state.focused = false;
        if self.state.pointer_hovering {
            // A pointerdown on the list may still follow.
            return;
        }
        self.close();
        self.validate_text();
    }

    fn toggle(&mut self) {
        if self.state.is_open {
            self.close();
            return;
        }
        if !self.state.focused {
            self.effects.push(Effect::FocusInput);
        }
        self.focus();
    }

    fn input(&mut self, text: String) {
        self.state.query = text;
        self.clear_highlight();

        let preview = self.ctx.catalog.family_index(&self.state.query);
        self.effects.push(Effect::PreviewGroup(preview));

        if self.state.query.is_empty() {
            self.open();
            return;
        }

        self.state.visible_families = filter(self.ctx.catalog, &self.state.query, false);
        if self.state.visible_families.is_empty() {
            self.close();
            return;
        }
        if let Some(expanded) = self.state.expanded
            && !self.state.visible_families.contains(&expanded)
        {
            self.state.expanded = None;
        }
        if !self.state.is_open {
            self.state.is_open = true;
            self.effects.push(Effect::Opened);
        }
    }

    fn pointer_enter(&mut self, entry: EntryId) {
        self.state.pointer_hovering = true;
        if let Some(index) = self.entries().iter().position(|e| *e == entry) {
            self.state.highlighted = Some(index);
            self.effects.push(Effect::Highlight(Some(entry)));
        }
    }

    fn pointer_leave(&mut self) {
        self.state.pointer_hovering = false;
        // The input blurred while the pointer was over the list and no
        // pointerdown followed: finish the deferred blur now.
        if !self.state.focused && self.state.is_open {
            self.close();
            self.validate_text();
        }
    }

    fn pointer_down(&mut self, entry: EntryId) {
        if !self.state.is_open || !self.entries().contains(&entry) {
            return;
        }
        self.state.pointer_hovering = false;
        self.commit(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_select_fonts::RawFontRecord;

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

    fn ctx(catalog: &Catalog) -> Context<'_> {
        Context {
            catalog,
            layout: Layout::Flat,
            interactive: true,
        }
    }

    fn run(ctx: &Context<'_>, state: &NavigationState, events: Vec<ComboEvent>) -> Transition {
        let mut current = Transition {
            state: state.clone(),
            effects: Vec::new(),
            handled: false,
        };
        for event in events {
            current = transition(ctx, &current.state, event);
        }
        current
    }

    #[test]
    fn test_focus_opens_with_all_entries() {
        let catalog = catalog();
        let t = transition(&ctx(&catalog), &NavigationState::default(), ComboEvent::Focus);
        assert!(t.state.is_open);
        assert_eq!(t.state.highlighted, None);
        assert_eq!(t.state.visible_entries(&catalog).len(), 3);
        assert_eq!(t.effects, vec![Effect::Opened]);
    }

    #[test]
    fn test_focus_with_query_shows_matches() {
        let catalog = catalog();
        let state = NavigationState {
            query: "geo".into(),
            ..NavigationState::default()
        };
        let t = transition(&ctx(&catalog), &state, ComboEvent::Focus);
        assert_eq!(
            t.state.visible_entries(&catalog),
            vec![EntryId::Family(1)]
        );
    }

    #[test]
    fn test_not_interactive_ignores_events() {
        let catalog = catalog();
        let context = Context {
            interactive: false,
            ..ctx(&catalog)
        };
        let t = transition(&context, &NavigationState::default(), ComboEvent::Focus);
        assert_eq!(t.state, NavigationState::default());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_blur_closes_and_rejects_partial_text() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![ComboEvent::Focus, ComboEvent::Input("ar".into())],
        );
        assert!(t.state.is_open);
        let t = transition(&ctx(&catalog), &t.state, ComboEvent::Blur);
        assert!(!t.state.is_open);
        assert_eq!(t.state.query, "");
        assert!(t.effects.contains(&Effect::SetInputText(String::new())));
        assert!(t.effects.contains(&Effect::Reject));
    }

    #[test]
    fn test_blur_with_exact_family_commits_and_normalizes() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("georgia".into()),
                ComboEvent::Blur,
            ],
        );
        assert_eq!(t.state.query, "Georgia");
        assert!(t.effects.contains(&Effect::CommitFamily { family: 1 }));
    }

    #[test]
    fn test_blur_while_hovering_keeps_open() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("ar".into()),
                ComboEvent::PointerEnter(EntryId::Family(0)),
                ComboEvent::Blur,
            ],
        );
        assert!(t.state.is_open);
        assert_eq!(t.state.query, "ar");

        let t = transition(
            &ctx(&catalog),
            &t.state,
            ComboEvent::PointerDown(EntryId::Family(0)),
        );
        assert!(!t.state.is_open);
        assert_eq!(t.state.query, "Arial");
        assert!(t.effects.contains(&Effect::CommitFamily { family: 0 }));
    }

    #[test]
    fn test_pointer_leave_after_deferred_blur_closes() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("ver".into()),
                ComboEvent::PointerEnter(EntryId::Family(2)),
                ComboEvent::Blur,
                ComboEvent::PointerLeave,
            ],
        );
        assert!(!t.state.is_open);
        assert_eq!(t.state.query, "");
        assert!(t.effects.contains(&Effect::Reject));
    }

    #[test]
    fn test_pointer_enter_highlights_visible_position() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![ComboEvent::Focus, ComboEvent::PointerEnter(EntryId::Family(2))],
        );
        assert_eq!(t.state.highlighted, Some(2));
        assert!(t.state.pointer_hovering);
        assert_eq!(t.effects, vec![Effect::Highlight(Some(EntryId::Family(2)))]);
    }

    #[test]
    fn test_pointer_down_on_hidden_entry_is_ignored() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("geo".into()),
                ComboEvent::PointerDown(EntryId::Family(0)),
            ],
        );
        assert!(t.state.is_open);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_input_without_matches_closes() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![ComboEvent::Focus, ComboEvent::Input("xyz".into())],
        );
        assert!(!t.state.is_open);
        assert!(t.state.visible_entries(&catalog).is_empty());
        assert!(t.effects.contains(&Effect::Closed));
    }

    #[test]
    fn test_input_after_empty_result_reopens() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("xyz".into()),
                ComboEvent::Input("v".into()),
            ],
        );
        assert!(t.state.is_open);
        assert_eq!(t.state.visible_entries(&catalog), vec![EntryId::Family(2)]);
    }

    #[test]
    fn test_input_clears_highlight_with_effect() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![ComboEvent::Focus, ComboEvent::Key(NavKey::Down)],
        );
        assert_eq!(t.state.highlighted, Some(0));

        let t = transition(&ctx(&catalog), &t.state, ComboEvent::Input("geo".into()));
        assert_eq!(t.state.highlighted, None);
        assert!(t.effects.contains(&Effect::Highlight(None)));

        // Nothing to announce when no highlight was set.
        let t = transition(&ctx(&catalog), &t.state, ComboEvent::Input("g".into()));
        assert!(!t.effects.contains(&Effect::Highlight(None)));
    }

    #[test]
    fn test_input_cleared_shows_everything() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![
                ComboEvent::Focus,
                ComboEvent::Input("geo".into()),
                ComboEvent::Input(String::new()),
            ],
        );
        assert!(t.state.is_open);
        assert_eq!(t.state.visible_entries(&catalog).len(), 3);
    }

    #[test]
    fn test_input_previews_exact_family_group() {
        let catalog = catalog();
        let t = run(
            &ctx(&catalog),
            &NavigationState::default(),
            vec![ComboEvent::Focus, ComboEvent::Input("Verdana".into())],
        );
        assert!(t.effects.contains(&Effect::PreviewGroup(Some(2))));
    }

    #[test]
    fn test_toggle_opens_then_closes() {
        let catalog = catalog();
        let t = transition(&ctx(&catalog), &NavigationState::default(), ComboEvent::Toggle);
        assert!(t.state.is_open);
        assert!(t.state.focused);
        assert!(t.effects.contains(&Effect::FocusInput));

        let t = transition(&ctx(&catalog), &t.state, ComboEvent::Toggle);
        assert!(!t.state.is_open);
        assert_eq!(t.effects, vec![Effect::Closed]);
    }

    #[test]
    fn test_disable_closes_even_when_not_interactive() {
        let catalog = catalog();
        let open = transition(&ctx(&catalog), &NavigationState::default(), ComboEvent::Focus);
        let context = Context {
            interactive: false,
            ..ctx(&catalog)
        };
        let t = transition(&context, &open.state, ComboEvent::Disable);
        assert!(!t.state.is_open);
        assert!(!t.state.focused);
    }
}
