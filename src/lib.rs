// Library exports for the font-select widget and its demo CLI.
//
// The widget is split into a pure core and an orchestrator:
//
//   - `filter`, `preview`, `state_machine` and `navigation` compute the
//     next combobox state from the current one and a UI event. They never
//     touch the committed value.
//
//   - `widget::FontSelect` owns the catalog, applies the effects produced
//     by the state machine, keeps the reflected attributes in sync and
//     notifies change listeners.
//
// Catalog loading, host capabilities and font-face registration live in
// the `font-select-fonts` crate; configuration in `font-select-config`.

/// Crate version, reported by the CLI at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod preview;
pub mod reflection;
pub mod state_machine;
pub mod widget;

pub use error::SelectionError;
pub use preview::EntryId;
pub use reflection::{AttributeName, Attributes, ChangeEvent, CommittedValue};
pub use state_machine::{ComboEvent, Effect, NavigationState};
pub use widget::{FontSelect, LoadStatus, RenderEntry, RenderState, VariationSelectorState};

pub use font_select_config::{Config, Layout};
pub use font_select_fonts::{Catalog, FontFamilyGroup, FontVariant, LoadError, RawFontRecord};
pub use font_select_keybindings::{KeyCode, NavKey};
