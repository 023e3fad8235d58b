//! Message translation
//!
//! Every message the engine or a constraint produces goes through a
//! [`Translator`]. Format strings use positional `{}` placeholders.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};

/// Turns message keys, format strings and tokens into user-facing text.
pub trait Translator: Send + Sync {
    /// Translates a fixed message.
    fn translate_message(&self, message: &str) -> String;

    /// Translates a format string, then fills its `{}` placeholders in order.
    fn translate_format(&self, format: &str, args: &[&dyn Display]) -> String;

    /// Translates a single token such as a type name.
    fn translate_token(&self, token: &str) -> String;
}

/// Replaces each `{}` in `format` with the next argument.
///
/// Surplus placeholders are left as they are; surplus arguments are ignored.
#[must_use]
pub fn fill(format: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut args = args.iter();
    let mut rest = format;
    while let Some(at) = rest.find("{}") {
        out.push_str(&rest[..at]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}

// ============================================================================
// DEFAULT
// ============================================================================

/// Passes everything through untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn translate_format(&self, format: &str, args: &[&dyn Display]) -> String {
        fill(format, args)
    }

    fn translate_token(&self, token: &str) -> String {
        token.to_string()
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Map-backed translator, typically loaded from a JSON catalog.
///
/// ```
/// use vigil_validator::core::{CatalogTranslator, Translator};
///
/// let catalog: CatalogTranslator = serde_json::from_str(r#"{
///     "messages": {"Missing property": "Propriété manquante"},
///     "formats": {"Expected type {}": "Type attendu : {}"},
///     "tokens": {"string": "chaîne"}
/// }"#).unwrap();
///
/// assert_eq!(catalog.translate_message("Missing property"), "Propriété manquante");
/// let token = catalog.translate_token("string");
/// assert_eq!(catalog.translate_format("Expected type {}", &[&token]), "Type attendu : chaîne");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogTranslator {
    /// Fixed messages.
    pub messages: HashMap<String, String>,
    /// Format strings; translated formats keep the same placeholder count.
    pub formats: HashMap<String, String>,
    /// Single tokens.
    pub tokens: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message translation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }

    /// Adds a format translation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_format(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.formats.insert(key.into(), text.into());
        self
    }

    /// Adds a token translation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_token(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.tokens.insert(key.into(), text.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn translate_message(&self, message: &str) -> String {
        self.messages
            .get(message)
            .map_or_else(|| message.to_string(), Clone::clone)
    }

    fn translate_format(&self, format: &str, args: &[&dyn Display]) -> String {
        let format = self.formats.get(format).map_or(format, String::as_str);
        fill(format, args)
    }

    fn translate_token(&self, token: &str) -> String {
        self.tokens
            .get(token)
            .map_or_else(|| token.to_string(), Clone::clone)
    }
}

impl fmt::Debug for dyn Translator + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<translator>")
    }
}
