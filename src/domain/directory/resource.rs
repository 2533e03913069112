//! Resource entity - one entry of the community resource directory.
//!
//! Field names on the wire follow the directory's column names, which is how
//! the snapshot file is written by the sync job.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::ports::{Localizer, TemplateParams};

/// Geographic applicability tier, ordered coarse to fine.
///
/// Unrecognized values sort after every known level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Level {
    National,
    State,
    County,
    City,
    Neighborhood,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Level {
    /// True for levels whose coverage depends on the contact's ZIP code.
    pub fn is_zip_scoped(&self) -> bool {
        matches!(self, Level::City | Level::Neighborhood)
    }
}

/// Review status of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ResourceStatus {
    Approved,
    Pending,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResourceStatus {
    /// Only approved entries are shown to contacts.
    pub fn is_approved(&self) -> bool {
        matches!(self, ResourceStatus::Approved)
    }
}

/// A directory entry describing an aid or service provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Link", default)]
    pub link: String,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Description ES", default)]
    pub description_es: String,

    #[serde(rename = "Hours", default)]
    pub hours: String,

    #[serde(rename = "Languages", default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "ZIP", default)]
    pub zip: String,

    #[serde(rename = "Category", default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(rename = "Who", default, skip_serializing_if = "Vec::is_empty")]
    pub who: Vec<String>,

    #[serde(rename = "Level", default)]
    pub level: Level,

    #[serde(rename = "Status", default)]
    pub status: ResourceStatus,

    /// Identifier in the upstream directory, used to reconcile syncs.
    #[serde(rename = "External ID", default)]
    pub external_id: String,

    #[serde(rename = "Last Updated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,

    #[serde(rename = "Created", default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl Resource {
    /// Description in the contact's language, falling back to the default.
    pub fn description_for(&self, language: &str) -> &str {
        match language {
            "es" if !self.description_es.is_empty() => &self.description_es,
            _ => &self.description,
        }
    }

    /// Renders the resource as it appears in a reply.
    pub fn as_text(&self, localizer: &Localizer<'_>) -> String {
        let mut text = format!("{}\n", self.name);

        let labelled = [
            ("what-label", &self.categories),
            ("who-label", &self.who),
            ("languages-label", &self.languages),
        ];
        for (label, values) in labelled {
            if !values.is_empty() {
                text.push_str(&format!(
                    "\n{}: {}",
                    localizer.text(label),
                    translate_all(values, localizer)
                ));
            }
        }

        if !self.hours.is_empty() {
            text.push_str(&format!("\n{}: {}", localizer.text("hours-label"), self.hours));
        }

        let description = self.description_for(localizer.language()).trim();
        if !description.is_empty() {
            text.push_str(&format!("\n\n{}\n", description));
        }

        for field in [&self.phone, &self.link, &self.email, &self.address] {
            if !field.is_empty() {
                text.push('\n');
                text.push_str(field);
            }
        }
        text
    }
}

fn translate_all(values: &[String], localizer: &Localizer<'_>) -> String {
    values
        .iter()
        .map(|value| localizer.text_or(value, &TemplateParams::new(), value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Orders resources from broadest to narrowest coverage, keeping the
/// directory's order within a level.
pub fn sort_by_level(resources: &mut [Resource]) {
    resources.sort_by_key(|resource| resource.level);
}
