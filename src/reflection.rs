//! Attribute/value reflection.
//!
//! The widget exposes four observable properties. Each is backed by a
//! marker: the boolean properties reflect marker presence, `value` reflects
//! the marker's text (empty when absent). Changes to `value` are announced
//! to listeners as [`ChangeEvent`]s.

use std::collections::BTreeMap;
use std::fmt;

use font_select_fonts::FontVariant;

/// Names of the observable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeName {
    Autofocus,
    Multiple,
    Disabled,
    Value,
}

impl AttributeName {
    pub const ALL: [AttributeName; 4] = [
        AttributeName::Autofocus,
        AttributeName::Multiple,
        AttributeName::Disabled,
        AttributeName::Value,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeName::Autofocus => "autofocus",
            AttributeName::Multiple => "multiple",
            AttributeName::Disabled => "disabled",
            AttributeName::Value => "value",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker storage for the observable attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    markers: BTreeMap<AttributeName, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: AttributeName) -> bool {
        self.markers.contains_key(&name)
    }

    /// Raw marker text, `None` when the marker is absent.
    pub fn get(&self, name: AttributeName) -> Option<&str> {
        self.markers.get(&name).map(String::as_str)
    }

    /// Set a marker. Returns whether anything changed.
    pub fn set(&mut self, name: AttributeName, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.markers.get(&name) == Some(&value) {
            return false;
        }
        self.markers.insert(name, value);
        true
    }

    /// Remove a marker. Returns whether it was present.
    pub fn remove(&mut self, name: AttributeName) -> bool {
        self.markers.remove(&name).is_some()
    }

    /// Boolean reflection: presence of the marker.
    pub fn flag(&self, name: AttributeName) -> bool {
        self.has(name)
    }

    /// Set or clear a boolean marker. Returns whether anything changed.
    pub fn set_flag(&mut self, name: AttributeName, on: bool) -> bool {
        if on {
            if self.has(name) {
                return false;
            }
            self.set(name, "")
        } else {
            self.remove(name)
        }
    }

    /// String reflection: marker text, or empty when absent.
    pub fn string(&self, name: AttributeName) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn disabled(&self) -> bool {
        self.flag(AttributeName::Disabled)
    }

    pub fn multiple(&self) -> bool {
        self.flag(AttributeName::Multiple)
    }

    pub fn autofocus(&self) -> bool {
        self.flag(AttributeName::Autofocus)
    }

    pub fn value(&self) -> &str {
        self.string(AttributeName::Value)
    }
}

/// The widget's authoritative selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedValue {
    pub family: String,
    pub variation_full_name: String,
}

/// Notification raised whenever the committed value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// New `value` (empty when the selection was cleared)
    pub value: String,
    /// Every selected variant, in catalog order
    pub selected: Vec<FontVariant>,
}

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Registered change listeners.
#[derive(Default)]
pub struct ChangeListeners {
    listeners: Vec<Listener>,
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl ChangeListeners {
    pub fn add(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: &ChangeEvent) {
        log::debug!(
            "change event: value={:?} ({} selected)",
            event.value,
            event.selected.len()
        );
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
