//! Text resolver port - localized message lookup.
//!
//! The chat engine never holds strings for display itself. It asks a
//! `TextResolver` for a message id in the session language, and the adapter
//! is responsible for the fallback chain to the default language.

use std::collections::BTreeMap;

/// Template parameters for a localized message.
///
/// Named values replace `{{Name}}` placeholders. `count` selects between the
/// singular and plural forms where a catalog entry has both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams {
    values: BTreeMap<String, String>,
    count: Option<usize>,
}

impl TemplateParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets the plural count, also exposed to templates as `{{Count}}`.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self.values.insert("Count".to_string(), count.to_string());
        self
    }

    /// Returns a named value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the plural count, if any.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Substitutes every `{{Name}}` placeholder in `template`.
    ///
    /// Unknown placeholders are left untouched.
    pub fn render(&self, template: &str) -> String {
        let mut rendered = template.to_string();
        for (key, value) in &self.values {
            rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
        }
        rendered
    }
}

/// Port for resolving message ids into display text.
pub trait TextResolver: Send + Sync {
    /// Looks up `message_id` in `language`, falling back to the default
    /// language. Returns `None` when neither catalog has the message.
    fn lookup(&self, language: &str, message_id: &str, params: &TemplateParams)
        -> Option<String>;

    /// Resolves a message, falling back to the id itself when missing.
    fn resolve(&self, language: &str, message_id: &str, params: &TemplateParams) -> String {
        self.lookup(language, message_id, params)
            .unwrap_or_else(|| message_id.to_string())
    }
}

/// A resolver bound to one language, as used while building a reply.
#[derive(Clone, Copy)]
pub struct Localizer<'a> {
    resolver: &'a dyn TextResolver,
    language: &'a str,
}

impl<'a> Localizer<'a> {
    pub fn new(resolver: &'a dyn TextResolver, language: &'a str) -> Self {
        Self { resolver, language }
    }

    /// The language this localizer resolves into.
    pub fn language(&self) -> &str {
        self.language
    }

    /// Resolves a message without parameters.
    pub fn text(&self, message_id: &str) -> String {
        self.resolver
            .resolve(self.language, message_id, &TemplateParams::new())
    }

    /// Resolves a message with parameters.
    pub fn text_with(&self, message_id: &str, params: &TemplateParams) -> String {
        self.resolver.resolve(self.language, message_id, params)
    }

    /// Resolves a message, rendering `default` when no catalog has it.
    pub fn text_or(&self, message_id: &str, params: &TemplateParams, default: &str) -> String {
        self.resolver
            .lookup(self.language, message_id, params)
            .unwrap_or_else(|| params.render(default))
    }
}

impl std::fmt::Debug for Localizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
