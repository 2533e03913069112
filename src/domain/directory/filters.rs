//! Filter parameters and the resource matching rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::options::{tracked_who_options, NONE_OPTION};
use super::resource::{Level, Resource};

/// Maps a ZIP code to the ZIP codes of the service area it belongs to.
pub type ZipIndex = HashMap<String, Vec<String>>;

/// Search criteria accumulated over the menu.
///
/// Empty lists and a missing ZIP mean "no constraint on this axis".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub what: Vec<String>,

    #[serde(default)]
    pub who: Vec<String>,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub zip: Option<String>,
}

impl FilterParams {
    /// Returns true if no axis is constrained.
    pub fn is_empty(&self) -> bool {
        self.what.is_empty() && self.who.is_empty() && self.languages.is_empty() && self.zip.is_none()
    }

    /// Adds a category, ignoring duplicates.
    pub fn add_what(&mut self, category: impl Into<String>) {
        push_unique(&mut self.what, category.into());
    }

    /// Adds a population, ignoring duplicates.
    pub fn add_who(&mut self, population: impl Into<String>) {
        push_unique(&mut self.who, population.into());
    }

    /// Replaces the who selection with the "None" sentinel alone.
    pub fn set_who_none(&mut self) {
        self.who = vec![NONE_OPTION.to_string()];
    }

    /// Returns true if the who selection is exactly the "None" sentinel.
    pub fn is_who_none(&self) -> bool {
        self.who.len() == 1 && self.who[0] == NONE_OPTION
    }

    /// Decides whether `resource` satisfies every axis of these filters.
    ///
    /// `zip_index` resolves neighborhood service areas and `city_zips` lists
    /// the ZIP codes inside the city; either may be absent.
    pub fn matches(
        &self,
        resource: &Resource,
        zip_index: Option<&ZipIndex>,
        city_zips: Option<&[String]>,
    ) -> bool {
        if !resource.status.is_approved() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        self.matches_what(resource)
            && self.matches_who(resource)
            && self.matches_languages(resource)
            && self.matches_zip(resource, zip_index, city_zips)
    }

    fn matches_what(&self, resource: &Resource) -> bool {
        self.what.is_empty() || overlaps(&self.what, &resource.categories)
    }

    fn matches_who(&self, resource: &Resource) -> bool {
        if self.who.is_empty() || resource.who.is_empty() {
            return true;
        }
        if self.is_who_none() {
            let tracked = tracked_who_options();
            return !resource
                .who
                .iter()
                .any(|tag| tracked.contains(&tag.as_str()));
        }
        overlaps(&self.who, &resource.who)
    }

    fn matches_languages(&self, resource: &Resource) -> bool {
        self.languages.is_empty() || overlaps(&self.languages, &resource.languages)
    }

    fn matches_zip(
        &self,
        resource: &Resource,
        zip_index: Option<&ZipIndex>,
        city_zips: Option<&[String]>,
    ) -> bool {
        let Some(zip) = self.zip.as_deref() else {
            return true;
        };
        match resource.level {
            Level::City => city_zips.map_or(true, |zips| zips.iter().any(|z| z == zip)),
            Level::Neighborhood => match zip_index.and_then(|index| index.get(zip)) {
                Some(area) => area.iter().any(|z| z == zip),
                None => resource.zip.contains(zip),
            },
            _ => true,
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

fn overlaps(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.contains(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::ResourceStatus;
    use proptest::prelude::*;

    fn approved() -> Resource {
        Resource {
            status: ResourceStatus::Approved,
            ..Default::default()
        }
    }

    fn with_zip(zip: &str) -> FilterParams {
        FilterParams {
            zip: Some(zip.to_string()),
            ..Default::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    mod status {
        use super::*;

        #[test]
        fn empty_filters_match_approved_resource() {
            assert!(FilterParams::default().matches(&approved(), None, None));
        }

        #[test]
        fn unapproved_never_matches_even_with_empty_filters() {
            let resource = Resource {
                status: ResourceStatus::Pending,
                ..Default::default()
            };
            assert!(!FilterParams::default().matches(&resource, None, None));
        }
    }

    mod what_and_languages {
        use super::*;

        #[test]
        fn what_requires_category_overlap() {
            let params = FilterParams {
                what: strings(&["Food", "Housing"]),
                ..Default::default()
            };
            let food = Resource {
                categories: strings(&["Food"]),
                ..approved()
            };
            let legal = Resource {
                categories: strings(&["Legal Help"]),
                ..approved()
            };

            assert!(params.matches(&food, None, None));
            assert!(!params.matches(&legal, None, None));
        }

        #[test]
        fn languages_require_overlap() {
            let params = FilterParams {
                languages: strings(&["es"]),
                ..Default::default()
            };
            let bilingual = Resource {
                languages: strings(&["en", "es"]),
                ..approved()
            };
            let english = Resource {
                languages: strings(&["en"]),
                ..approved()
            };

            assert!(params.matches(&bilingual, None, None));
            assert!(!params.matches(&english, None, None));
        }
    }

    mod who {
        use super::*;

        #[test]
        fn unset_who_matches_with_and_without_tags() {
            let params = with_zip("12345");
            let untagged = approved();
            let families = Resource {
                who: strings(&["Families"]),
                ..approved()
            };

            assert!(params.matches(&untagged, None, None));
            assert!(params.matches(&families, None, None));
        }

        #[test]
        fn selected_who_matches_untagged_and_overlapping_only() {
            let params = FilterParams {
                who: strings(&["Families"]),
                ..with_zip("12345")
            };
            let untagged = approved();
            let families = Resource {
                who: strings(&["Families"]),
                ..approved()
            };
            let immigrants = Resource {
                who: strings(&["Immigrants"]),
                ..approved()
            };

            assert!(params.matches(&untagged, None, None));
            assert!(params.matches(&families, None, None));
            assert!(!params.matches(&immigrants, None, None));
        }

        #[test]
        fn none_sentinel_matches_untagged_and_untracked() {
            let mut params = with_zip("12345");
            params.set_who_none();
            let untagged = approved();
            let tracked = Resource {
                who: strings(&["Families"]),
                ..approved()
            };
            let untracked = Resource {
                who: strings(&["TEST"]),
                ..approved()
            };

            assert!(params.matches(&untagged, None, None));
            assert!(!params.matches(&tracked, None, None));
            assert!(params.matches(&untracked, None, None));
        }

        #[test]
        fn set_who_none_overrides_previous_selection() {
            let mut params = FilterParams::default();
            params.add_who("Families");
            params.set_who_none();
            assert!(params.is_who_none());
            assert_eq!(params.who.len(), 1);
        }
    }

    mod zip {
        use super::*;

        #[test]
        fn broad_levels_ignore_zip() {
            let params = with_zip("45678");
            for level in [Level::National, Level::State, Level::County, Level::Unspecified] {
                let resource = Resource {
                    zip: "67890".to_string(),
                    level,
                    ..approved()
                };
                assert!(params.matches(&resource, None, None), "{:?}", level);
            }
        }

        #[test]
        fn city_matches_any_zip_without_city_list() {
            let resource = Resource {
                level: Level::City,
                ..approved()
            };
            assert!(with_zip("99999").matches(&resource, None, None));
        }

        #[test]
        fn city_requires_membership_in_city_list() {
            let resource = Resource {
                level: Level::City,
                ..approved()
            };
            let city = strings(&["60601", "60602"]);

            assert!(with_zip("60601").matches(&resource, None, Some(&city)));
            assert!(!with_zip("99999").matches(&resource, None, Some(&city)));
        }

        #[test]
        fn neighborhood_uses_index_entry_when_present() {
            let index: ZipIndex =
                HashMap::from([("12345".to_string(), strings(&["12345", "67890"]))]);
            let resource = Resource {
                zip: "67890".to_string(),
                level: Level::Neighborhood,
                ..approved()
            };

            assert!(with_zip("12345").matches(&resource, Some(&index), None));
        }

        #[test]
        fn neighborhood_index_entry_without_filter_zip_rejects() {
            let index: ZipIndex = HashMap::from([("12345".to_string(), strings(&["67890"]))]);
            let resource = Resource {
                zip: "12345".to_string(),
                level: Level::Neighborhood,
                ..approved()
            };

            assert!(!with_zip("12345").matches(&resource, Some(&index), None));
        }

        #[test]
        fn neighborhood_falls_back_to_substring() {
            let index: ZipIndex =
                HashMap::from([("12345".to_string(), strings(&["12345", "67890"]))]);
            let resource = Resource {
                zip: "67890".to_string(),
                level: Level::Neighborhood,
                ..approved()
            };

            assert!(with_zip("67890").matches(&resource, Some(&index), None));
            assert!(!with_zip("45678").matches(&resource, Some(&index), None));
            assert!(with_zip("67890").matches(&resource, None, None));
        }
    }

    proptest! {
        #[test]
        fn unapproved_resources_never_match(
            what in proptest::collection::vec("[A-Za-z]{1,8}", 0..3),
            zip in proptest::option::of("[0-9]{5}"),
        ) {
            let params = FilterParams { what: what.clone(), zip, ..Default::default() };
            let resource = Resource {
                categories: what,
                status: ResourceStatus::Rejected,
                ..Default::default()
            };
            prop_assert!(!params.matches(&resource, None, None));
        }

        #[test]
        fn missing_zip_filter_never_blocks(level_idx in 0usize..6, zip in "[0-9]{5}") {
            let levels = [
                Level::National, Level::State, Level::County,
                Level::City, Level::Neighborhood, Level::Unspecified,
            ];
            let params = FilterParams { what: vec!["Food".to_string()], ..Default::default() };
            let resource = Resource {
                zip,
                level: levels[level_idx],
                categories: vec!["Food".to_string()],
                ..approved()
            };
            prop_assert!(params.matches(&resource, None, Some(&[])));
        }
    }
}
