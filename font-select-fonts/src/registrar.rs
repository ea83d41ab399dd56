//! Named font-face registration.
//!
//! Every discovered variant is registered under its full name so preview
//! entries can be rendered in their own typeface. Registration is additive:
//! a name registered twice keeps its first rule, and nothing is ever removed.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::catalog::FontVariant;

/// Capability the loader uses to register font faces.
pub trait FontRegistrar {
    /// Register `variant`. Must be idempotent.
    fn register(&self, variant: &FontVariant);
}

/// A named font face resolving to locally installed fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    /// Name the face is registered under (the variant's full name)
    pub font_family: String,
    /// Local names tried in order: full name, then PostScript name
    pub local_sources: Vec<String>,
}

impl FontFaceRule {
    pub fn for_variant(variant: &FontVariant) -> Self {
        let mut local_sources = vec![variant.full_name().to_string()];
        let postscript = variant.postscript_name();
        if !postscript.is_empty() && postscript != variant.full_name() {
            local_sources.push(postscript.to_string());
        }
        Self {
            font_family: variant.full_name().to_string(),
            local_sources,
        }
    }

    /// Render as an `@font-face` rule.
    pub fn to_css(&self) -> String {
        let sources: Vec<String> = self
            .local_sources
            .iter()
            .map(|s| format!("local('{}')", escape_quotes(s)))
            .collect();
        format!(
            "@font-face {{ font-family: '{}'; src: {}; }}",
            escape_quotes(&self.font_family),
            sources.join(", ")
        )
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Registry of font-face rules keyed by face name.
#[derive(Debug, Default)]
pub struct FontFaceRegistry {
    rules: Mutex<BTreeMap<String, FontFaceRule>>,
}

impl FontFaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry shared by every widget instance.
    pub fn global() -> &'static FontFaceRegistry {
        static GLOBAL: OnceLock<FontFaceRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FontFaceRegistry::new)
    }

    pub fn len(&self) -> usize {
        self.rules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.lock().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.lock().contains_key(name)
    }

    pub fn rule(&self, name: &str) -> Option<FontFaceRule> {
        self.rules.lock().get(name).cloned()
    }

    /// All rules as one style sheet, ordered by face name.
    pub fn style_sheet(&self) -> String {
        let rules = self.rules.lock();
        let mut out = String::new();
        for rule in rules.values() {
            out.push_str(&rule.to_css());
            out.push('\n');
        }
        out
    }
}

impl FontRegistrar for FontFaceRegistry {
    fn register(&self, variant: &FontVariant) {
        let mut rules = self.rules.lock();
        if rules.contains_key(variant.full_name()) {
            return;
        }
        log::trace!("Registered font face: {}", variant.full_name());
        rules.insert(
            variant.full_name().to_string(),
            FontFaceRule::for_variant(variant),
        );
    }
}
