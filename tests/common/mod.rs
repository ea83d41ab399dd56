//! Shared integration test helpers for font-select.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{ready_widget, sample_records};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use font_select::{ChangeEvent, Config, FontSelect, Layout};
use font_select_fonts::{InMemoryHost, RawFontRecord};

/// Arial, Georgia and Verdana, each with Regular and Bold, in shuffled order.
pub fn sample_records() -> Vec<RawFontRecord> {
    vec![
        RawFontRecord::new("Verdana", "Verdana Bold", "Verdana-Bold"),
        RawFontRecord::new("Arial", "Arial", "ArialMT"),
        RawFontRecord::new("Georgia", "Georgia Bold", "Georgia-Bold"),
        RawFontRecord::new("Arial", "Arial Bold", "Arial-BoldMT"),
        RawFontRecord::new("Georgia", "Georgia", "Georgia"),
        RawFontRecord::new("Verdana", "Verdana", "Verdana"),
    ]
}

pub fn sample_host() -> InMemoryHost {
    InMemoryHost::new(sample_records())
}

/// Config that keeps tests away from the process-wide font-face registry.
pub fn test_config() -> Config {
    Config {
        register_font_faces: false,
        ..Config::default()
    }
}

pub fn drill_down_config() -> Config {
    Config {
        layout: Layout::DrillDown,
        ..test_config()
    }
}

/// A widget loaded from `sample_host()`.
pub async fn ready_widget(config: &Config) -> FontSelect {
    let mut widget = FontSelect::new(config);
    widget
        .initialize(&sample_host())
        .await
        .expect("sample host loads");
    widget
}

/// Record every change event raised by `widget`.
pub fn record_changes(widget: &mut FontSelect) -> Rc<RefCell<Vec<ChangeEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    widget.on_change(move |e| sink.borrow_mut().push(e.clone()));
    events
}

/// Texts of the entries currently visible.
pub fn visible_texts(widget: &FontSelect) -> Vec<String> {
    widget
        .render_state()
        .entries
        .into_iter()
        .map(|e| e.text)
        .collect()
}
