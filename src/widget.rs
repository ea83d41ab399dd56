//! The font-select widget.
//!
//! `FontSelect` owns one catalog, the combobox navigation state and the
//! reflected attributes. UI events are fed through [`FontSelect::handle_event`]
//! (or the convenience methods around it); the transition function decides
//! what happens and the widget applies the resulting effects. The
//! presentation layer reads [`FontSelect::render_state`] and drains
//! [`FontSelect::drain_effects`] for one-shot requests such as scrolling.

use font_select_config::{Config, Layout};
use font_select_fonts::{
    Catalog, FontAccess, FontFaceRegistry, FontRegistrar, FontVariant, LoadError, PermissionHost,
    load_catalog,
};
use font_select_keybindings::KeyCode;

use crate::error::SelectionError;
use crate::navigation::nav_key_for;
use crate::preview::EntryId;
use crate::reflection::{AttributeName, Attributes, ChangeEvent, ChangeListeners, CommittedValue};
use crate::state_machine::{ComboEvent, Context, Effect, NavigationState, Transition, transition};

/// Catalog availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Enumeration has not finished; the input is inert.
    Loading,
    Ready,
    /// Loading failed; the widget stays a disabled input.
    Degraded(LoadError),
}

/// One entry of the preview list as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEntry {
    pub id: EntryId,
    pub text: String,
    /// Registered face name to render the entry in
    pub font_face: String,
    pub highlighted: bool,
    pub selected: bool,
}

/// One option of the variation selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationOption {
    pub label: String,
    pub full_name: String,
    pub postscript_name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationSelectorState {
    pub enabled: bool,
    pub multiple: bool,
    /// Variants of the active family group
    pub options: Vec<VariationOption>,
}

/// Everything the presentation layer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub is_open: bool,
    pub highlighted_index: Option<usize>,
    pub entries: Vec<RenderEntry>,
    /// Input control disabled (attribute set, loading, or degraded)
    pub disabled: bool,
    pub input_text: String,
    /// Text of the highlighted entry
    pub active_descendant: Option<String>,
    pub variation_selector: VariationSelectorState,
}

impl RenderState {
    /// Highlight as a signed index, −1 for none.
    pub fn highlighted_index_i32(&self) -> i32 {
        self.highlighted_index
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Expanded flags mirror the open state.
    pub fn expanded(&self) -> bool {
        self.is_open
    }
}

/// Headless font family/variation picker.
#[derive(Debug)]
pub struct FontSelect {
    layout: Layout,
    register_font_faces: bool,
    attributes: Attributes,
    status: LoadStatus,
    catalog: Catalog,
    nav: NavigationState,
    committed: Option<CommittedValue>,
    /// Selected variants as `(family, variant)`, in catalog order
    selected: Vec<(usize, usize)>,
    /// Family group shown by the variation selector
    variation_group: Option<usize>,
    active_descendant: Option<EntryId>,
    /// Value set before the catalog finished loading
    pending_value: Option<String>,
    outbox: Vec<Effect>,
    listeners: ChangeListeners,
}

impl Default for FontSelect {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl FontSelect {
    /// Create a widget in the `Loading` state from config defaults.
    pub fn new(config: &Config) -> Self {
        let mut attributes = Attributes::new();
        attributes.set_flag(AttributeName::Disabled, config.disabled);
        attributes.set_flag(AttributeName::Multiple, config.multiple);
        attributes.set_flag(AttributeName::Autofocus, config.autofocus);

        let pending_value = if config.value.is_empty() {
            None
        } else {
            attributes.set(AttributeName::Value, config.value.clone());
            Some(config.value.clone())
        };

        Self {
            layout: config.layout,
            register_font_faces: config.register_font_faces,
            attributes,
            status: LoadStatus::Loading,
            catalog: Catalog::default(),
            nav: NavigationState::default(),
            committed: None,
            selected: Vec::new(),
            variation_group: None,
            active_descendant: None,
            pending_value,
            outbox: Vec::new(),
            listeners: ChangeListeners::default(),
        }
    }

    /// Load the catalog, registering faces with the process-wide registry
    /// when configured to.
    ///
    /// Permission denial and missing capability degrade the widget and
    /// return `Ok`. Any other fault degrades it too and is returned.
    pub async fn initialize<H>(&mut self, host: &H) -> Result<(), LoadError>
    where
        H: FontAccess + PermissionHost,
    {
        if self.register_font_faces {
            self.initialize_with_registrar(host, Some(FontFaceRegistry::global()))
                .await
        } else {
            self.initialize_with_registrar(host, None).await
        }
    }

    /// Load the catalog with an explicit registrar.
    pub async fn initialize_with_registrar<H>(
        &mut self,
        host: &H,
        registrar: Option<&dyn FontRegistrar>,
    ) -> Result<(), LoadError>
    where
        H: FontAccess + PermissionHost,
    {
        match load_catalog(host, registrar).await {
            Ok(catalog) => {
                self.catalog = catalog;
                self.status = LoadStatus::Ready;
                self.resolve_pending_value();
                if self.autofocus() && self.is_interactive() {
                    self.handle_event(ComboEvent::Focus);
                }
                Ok(())
            }
            Err(e) if e.is_degrade() => {
                log::warn!("Font selection degraded: {e}");
                self.status = LoadStatus::Degraded(e);
                Ok(())
            }
            Err(e) => {
                log::error!("Font catalog load failed: {e}");
                self.status = LoadStatus::Degraded(e.clone());
                Err(e)
            }
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn committed(&self) -> Option<&CommittedValue> {
        self.committed.as_ref()
    }

    pub fn input_text(&self) -> &str {
        &self.nav.query
    }

    /// Selected variants in catalog order.
    pub fn selected_variants(&self) -> Vec<&FontVariant> {
        self.selected
            .iter()
            .filter_map(|&(f, v)| self.catalog.variant(f, v))
            .collect()
    }

    /// Whether user input currently has any effect.
    pub fn is_interactive(&self) -> bool {
        self.status == LoadStatus::Ready && !self.disabled()
    }

    /// Register a listener for change notifications.
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.add(listener);
    }

    /// Take the effects applied since the last call, for the presentation layer.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Run one event through the state machine and apply its effects.
    ///
    /// Returns whether the event's default action must be cancelled.
    pub fn handle_event(&mut self, event: ComboEvent) -> bool {
        let ctx = Context {
            catalog: &self.catalog,
            layout: self.layout,
            interactive: self.is_interactive(),
        };
        let Transition {
            state,
            effects,
            handled,
        } = transition(&ctx, &self.nav, event);
        self.nav = state;
        for effect in effects {
            self.apply(effect);
        }
        handled
    }

    pub fn focus(&mut self) {
        self.handle_event(ComboEvent::Focus);
    }

    pub fn blur(&mut self) {
        self.handle_event(ComboEvent::Blur);
    }

    /// Activate the disclosure toggle.
    pub fn toggle(&mut self) {
        self.handle_event(ComboEvent::Toggle);
    }

    /// The input text changed to `text`.
    pub fn input(&mut self, text: impl Into<String>) {
        self.handle_event(ComboEvent::Input(text.into()));
    }

    /// A key was pressed in the input. Returns whether the default action
    /// must be cancelled; keys that are not intercepted return `false`.
    pub fn key_down(&mut self, code: KeyCode) -> bool {
        match nav_key_for(code, self.layout.is_drill_down()) {
            Some(key) => self.handle_event(ComboEvent::Key(key)),
            None => false,
        }
    }

    pub fn pointer_enter(&mut self, entry: EntryId) {
        self.handle_event(ComboEvent::PointerEnter(entry));
    }

    pub fn pointer_leave(&mut self) {
        self.handle_event(ComboEvent::PointerLeave);
    }

    pub fn pointer_down(&mut self, entry: EntryId) {
        self.handle_event(ComboEvent::PointerDown(entry));
    }

    fn apply(&mut self, effect: Effect) {
        match &effect {
            Effect::Opened => log::debug!("preview opened"),
            Effect::Closed => {
                log::debug!("preview closed");
                self.active_descendant = None;
            }
            Effect::SetInputText(_) | Effect::ScrollIntoView(_) | Effect::FocusInput => {}
            Effect::CommitFamily { family } => {
                let already = self.selected.first().map(|&(f, _)| f) == Some(*family);
                if !already {
                    self.commit_variant(*family, 0);
                }
            }
            Effect::CommitVariant { family, variant } => self.commit_variant(*family, *variant),
            Effect::Reject => self.reject_selection(),
            Effect::Highlight(entry) => self.active_descendant = *entry,
            Effect::PreviewGroup(group) => self.variation_group = *group,
        }
        self.outbox.push(effect);
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn commit_variant(&mut self, family: usize, variant: usize) {
        if self.catalog.variant(family, variant).is_none() {
            return;
        }
        let previous = std::mem::replace(&mut self.selected, vec![(family, variant)]);
        self.variation_group = Some(family);
        self.publish(&previous);
    }

    fn reject_selection(&mut self) {
        let previous = std::mem::take(&mut self.selected);
        self.variation_group = None;
        self.publish(&previous);
    }

    /// Sync `committed` and the `value` marker with `selected`, then notify.
    ///
    /// Listeners hear about a change of `value`, or of the selected set
    /// while `multiple` is on.
    fn publish(&mut self, previous: &[(usize, usize)]) {
        self.committed = self
            .selected
            .first()
            .and_then(|&(f, v)| self.catalog.variant(f, v))
            .map(|v| CommittedValue {
                family: v.family().to_string(),
                variation_full_name: v.full_name().to_string(),
            });

        let value = self
            .committed
            .as_ref()
            .map(|c| c.variation_full_name.clone())
            .unwrap_or_default();
        let value_changed = if value.is_empty() {
            self.attributes.remove(AttributeName::Value)
        } else {
            self.attributes.set(AttributeName::Value, value)
        };
        let selection_changed = self.multiple() && previous != self.selected.as_slice();

        if value_changed || selection_changed {
            self.emit_change();
        }
    }

    fn emit_change(&mut self) {
        let event = ChangeEvent {
            value: self.value().to_string(),
            selected: self.selected_variants().into_iter().cloned().collect(),
        };
        self.listeners.emit(&event);
    }

    /// Choose a variation of the committed family through the variation
    /// selector. With `multiple` set this toggles the variation instead;
    /// the last remaining variation cannot be toggled off.
    pub fn select_variation(&mut self, full_name: &str) -> Result<(), SelectionError> {
        if !self.is_interactive() {
            return Err(SelectionError::NotInteractive);
        }
        let Some(&(family, _)) = self.selected.first() else {
            return Err(SelectionError::NoFamily);
        };
        let variant = self
            .catalog
            .group(family)
            .and_then(|g| g.variant_position(full_name))
            .ok_or_else(|| SelectionError::UnrecognizedSelection(full_name.to_string()))?;

        let previous = self.selected.clone();
        if self.multiple() {
            if let Some(pos) = self.selected.iter().position(|&s| s == (family, variant)) {
                if self.selected.len() > 1 {
                    self.selected.remove(pos);
                }
            } else {
                self.selected.push((family, variant));
                self.selected.sort_unstable();
            }
        } else {
            self.selected = vec![(family, variant)];
        }
        self.variation_group = Some(family);
        self.publish(&previous);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reflected attributes
    // -----------------------------------------------------------------------

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn disabled(&self) -> bool {
        self.attributes.disabled()
    }

    pub fn multiple(&self) -> bool {
        self.attributes.multiple()
    }

    pub fn autofocus(&self) -> bool {
        self.attributes.autofocus()
    }

    pub fn value(&self) -> &str {
        self.attributes.value()
    }

    /// Disabling closes the list, drops focus and blocks interaction with
    /// both the input and the variation selector.
    pub fn set_disabled(&mut self, disabled: bool) {
        if !self.attributes.set_flag(AttributeName::Disabled, disabled) {
            return;
        }
        log::debug!("disabled -> {disabled}");
        if disabled {
            self.handle_event(ComboEvent::Disable);
        }
    }

    pub fn set_multiple(&mut self, multiple: bool) {
        if !self.attributes.set_flag(AttributeName::Multiple, multiple) {
            return;
        }
        if !multiple && self.selected.len() > 1 {
            self.selected.truncate(1);
            self.emit_change();
        }
    }

    /// Setting autofocus on an interactive widget focuses the input.
    pub fn set_autofocus(&mut self, autofocus: bool) {
        if !self.attributes.set_flag(AttributeName::Autofocus, autofocus) {
            return;
        }
        if autofocus && self.is_interactive() {
            self.handle_event(ComboEvent::Focus);
        }
    }

    /// Set the committed value by variant full name.
    ///
    /// Before the catalog has loaded the value is kept and resolved once
    /// loading completes. A name that matches no variant clears the text and
    /// value and returns `UnrecognizedSelection`.
    pub fn set_value(&mut self, value: &str) -> Result<(), SelectionError> {
        match self.status {
            LoadStatus::Loading => {
                self.pending_value = (!value.is_empty()).then(|| value.to_string());
                let changed = if value.is_empty() {
                    self.attributes.remove(AttributeName::Value)
                } else {
                    self.attributes.set(AttributeName::Value, value)
                };
                if changed {
                    self.emit_change();
                }
                Ok(())
            }
            LoadStatus::Degraded(_) => Err(SelectionError::NotInteractive),
            LoadStatus::Ready => {
                if value.is_empty() {
                    self.set_input_text(String::new());
                    self.reject_selection();
                    return Ok(());
                }
                match self.catalog.find_variant(value) {
                    Some((family, variant)) => {
                        let family_name = self
                            .catalog
                            .group(family)
                            .map(|g| g.family_name().to_string())
                            .unwrap_or_default();
                        self.set_input_text(family_name);
                        self.commit_variant(family, variant);
                        Ok(())
                    }
                    None => {
                        log::warn!("Rejecting unrecognized value {:?}", value);
                        self.set_input_text(String::new());
                        self.reject_selection();
                        Err(SelectionError::UnrecognizedSelection(value.to_string()))
                    }
                }
            }
        }
    }

    /// Generic attribute mutation, as an embedding page would perform it.
    ///
    /// `None` removes the marker. Unknown names are ignored.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), SelectionError> {
        let Some(attr) = AttributeName::from_name(name) else {
            log::debug!("Ignoring unobserved attribute {name:?}");
            return Ok(());
        };
        match attr {
            AttributeName::Disabled => self.set_disabled(value.is_some()),
            AttributeName::Multiple => self.set_multiple(value.is_some()),
            AttributeName::Autofocus => self.set_autofocus(value.is_some()),
            AttributeName::Value => return self.set_value(value.unwrap_or("")),
        }
        Ok(())
    }

    fn set_input_text(&mut self, text: String) {
        if self.nav.query != text {
            self.nav.query = text.clone();
            self.outbox.push(Effect::SetInputText(text));
        }
    }

    fn resolve_pending_value(&mut self) {
        if let Some(value) = self.pending_value.take()
            && let Err(e) = self.set_value(&value)
        {
            log::warn!("Initial value rejected: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render_state(&self) -> RenderState {
        let entries = self
            .nav
            .visible_entries(&self.catalog)
            .into_iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let text = id.display_text(&self.catalog)?.to_string();
                let font_face = id
                    .face_name(&self.catalog)
                    .map_or_else(|| text.clone(), str::to_string);
                Some(RenderEntry {
                    id,
                    font_face,
                    highlighted: self.nav.highlighted == Some(index),
                    selected: self.is_entry_selected(id),
                    text,
                })
            })
            .collect();

        RenderState {
            is_open: self.nav.is_open,
            highlighted_index: self.nav.highlighted,
            entries,
            disabled: !self.is_interactive(),
            input_text: self.nav.query.clone(),
            active_descendant: self
                .active_descendant
                .and_then(|e| e.display_text(&self.catalog))
                .map(str::to_string),
            variation_selector: self.variation_selector_state(),
        }
    }

    fn is_entry_selected(&self, id: EntryId) -> bool {
        match id {
            EntryId::Family(family) => self.selected.first().map(|&(f, _)| f) == Some(family),
            EntryId::Variant { family, variant } => self.selected.contains(&(family, variant)),
        }
    }

    fn variation_selector_state(&self) -> VariationSelectorState {
        let committed_family = self.selected.first().map(|&(f, _)| f);
        let options = self
            .variation_group
            .and_then(|family| self.catalog.group(family).map(|g| (family, g)))
            .map(|(family, group)| {
                group
                    .variants()
                    .iter()
                    .enumerate()
                    .map(|(index, v)| VariationOption {
                        label: v.variation_label().to_string(),
                        full_name: v.full_name().to_string(),
                        postscript_name: v.postscript_name().to_string(),
                        selected: if committed_family == Some(family) {
                            self.selected.contains(&(family, index))
                        } else {
                            // Previewed group: its first variant is pre-selected.
                            index == 0
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        VariationSelectorState {
            enabled: self.is_interactive() && self.committed.is_some(),
            multiple: self.multiple(),
            options,
        }
    }
}
