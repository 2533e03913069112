//! JSON catalog text resolver.
//!
//! One file per language, `<code>.json`, mapping message ids to either a
//! plain template or a `{"one": ..., "other": ...}` plural pair. Templates use
//! `{{Name}}` placeholders. Lookups fall back to the default language.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ports::{TemplateParams, TextResolver};

/// Errors while loading catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse catalog {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("No catalog for default language: {0}")]
    MissingDefault(String),
}

/// A catalog message, with optional plural forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Plain(String),
    Plural {
        #[serde(default)]
        one: Option<String>,
        other: String,
    },
}

impl CatalogEntry {
    fn template(&self, count: Option<usize>) -> &str {
        match self {
            CatalogEntry::Plain(text) => text,
            CatalogEntry::Plural { one, other } => match (count, one) {
                (Some(1), Some(one)) => one,
                _ => other,
            },
        }
    }
}

pub type Catalog = HashMap<String, CatalogEntry>;

/// Text resolver over in-memory catalogs keyed by language code.
#[derive(Debug, Clone)]
pub struct CatalogTextResolver {
    catalogs: HashMap<String, Catalog>,
    default_language: String,
}

impl CatalogTextResolver {
    /// Builds a resolver from already parsed catalogs.
    ///
    /// # Errors
    ///
    /// `MissingDefault` if there is no catalog for `default_language`.
    pub fn new(
        catalogs: HashMap<String, Catalog>,
        default_language: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let default_language = default_language.into();
        if !catalogs.contains_key(&default_language) {
            return Err(CatalogError::MissingDefault(default_language));
        }
        Ok(Self {
            catalogs,
            default_language,
        })
    }

    /// Loads every `<code>.json` file in `dir`.
    pub fn load_dir<P: AsRef<Path>>(
        dir: P,
        default_language: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let io_error = |e: std::io::Error| CatalogError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        };

        let mut catalogs = HashMap::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let raw = fs::read_to_string(&path).map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let catalog: Catalog = serde_json::from_str(&raw).map_err(|e| CatalogError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            catalogs.insert(language.to_string(), catalog);
        }
        Self::new(catalogs, default_language)
    }

    /// Language codes with a loaded catalog.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    fn entry(&self, language: &str, message_id: &str) -> Option<&CatalogEntry> {
        self.catalogs
            .get(language)
            .and_then(|catalog| catalog.get(message_id))
    }
}

impl TextResolver for CatalogTextResolver {
    fn lookup(&self, language: &str, message_id: &str, params: &TemplateParams) -> Option<String> {
        self.entry(language, message_id)
            .or_else(|| self.entry(&self.default_language, message_id))
            .map(|entry| params.render(entry.template(params.count())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::{LANGUAGE_OPTIONS, WHAT_OPTIONS, WHO_OPTIONS};

    fn resolver() -> CatalogTextResolver {
        let en: Catalog = serde_json::from_str(
            r#"{
                "zip-prompt": "What is your ZIP code?",
                "restart-prompt": "Text {{Number}} to start over",
                "results-available": {"one": "{{Count}} result", "other": "{{Count}} results"}
            }"#,
        )
        .unwrap();
        let es: Catalog =
            serde_json::from_str(r#"{"zip-prompt": "¿Cuál es su código postal?"}"#).unwrap();
        CatalogTextResolver::new(
            HashMap::from([("en".to_string(), en), ("es".to_string(), es)]),
            "en",
        )
        .unwrap()
    }

    mod lookup {
        use super::*;

        #[test]
        fn uses_requested_language() {
            assert_eq!(
                resolver().lookup("es", "zip-prompt", &TemplateParams::new()),
                Some("¿Cuál es su código postal?".to_string())
            );
        }

        #[test]
        fn falls_back_to_default_language() {
            let params = TemplateParams::new().with("Number", "2");
            assert_eq!(
                resolver().lookup("es", "restart-prompt", &params),
                Some("Text 2 to start over".to_string())
            );
        }

        #[test]
        fn unknown_language_uses_default() {
            assert_eq!(
                resolver().lookup("zz", "zip-prompt", &TemplateParams::new()),
                Some("What is your ZIP code?".to_string())
            );
        }

        #[test]
        fn missing_everywhere_is_none() {
            assert_eq!(resolver().lookup("es", "nope", &TemplateParams::new()), None);
            assert_eq!(resolver().resolve("es", "nope", &TemplateParams::new()), "nope");
        }

        #[test]
        fn plural_forms_follow_count() {
            let resolver = resolver();
            assert_eq!(
                resolver.resolve("en", "results-available", &TemplateParams::new().with_count(1)),
                "1 result"
            );
            assert_eq!(
                resolver.resolve("en", "results-available", &TemplateParams::new().with_count(4)),
                "4 results"
            );
        }
    }

    #[test]
    fn new_requires_default_catalog() {
        let err = CatalogTextResolver::new(HashMap::new(), "en").unwrap_err();
        assert!(matches!(err, CatalogError::MissingDefault(_)));
    }

    mod shipped_catalogs {
        use super::*;

        fn shipped() -> CatalogTextResolver {
            let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("i18n");
            CatalogTextResolver::load_dir(dir, "en").unwrap()
        }

        #[test]
        fn loads_english_and_spanish() {
            let catalog = shipped();
            let languages = catalog.languages();
            assert!(languages.contains(&"en"));
            assert!(languages.contains(&"es"));
        }

        #[test]
        fn english_covers_every_menu_message() {
            let resolver = shipped();
            let mut ids: Vec<String> = [
                "site-title",
                "site-intro",
                "language-prompt",
                "what-prompt",
                "who-prompt",
                "enter-all-numbers",
                "zip-prompt",
                "please-enter-valid-option",
                "please-enter-valid-zip",
                "results-available",
                "see-more-prompt",
                "restart-prompt",
                "info-aid-prompt",
                "no-results",
                "added-to-network",
                "what-label",
                "who-label",
                "languages-label",
                "hours-label",
                "who-option-All",
            ]
            .iter()
            .map(|id| id.to_string())
            .collect();
            ids.extend(LANGUAGE_OPTIONS.iter().map(|code| format!("option-{}", code)));
            ids.extend(WHAT_OPTIONS.iter().map(|value| format!("option-{}", value)));
            ids.extend(WHO_OPTIONS.iter().map(|value| format!("option-{}", value)));

            for id in ids {
                assert!(
                    resolver.entry("en", &id).is_some(),
                    "missing English message: {}",
                    id
                );
            }
        }
    }
}
