//! Reply text for the menu steps.
//!
//! All copy comes from the text resolver; this module only decides which
//! message ids go into a reply and how they are laid out.

use crate::domain::directory::{DEFAULT_LANGUAGE, LANGUAGE_OPTIONS, WHAT_OPTIONS, WHO_OPTIONS};
use crate::ports::{Localizer, TemplateParams, TextResolver};

/// Forces UCS-2 SMS encoding so accented characters render consistently.
pub const PUNCTUATION_SPACE: &str = "\u{2008}";

/// Menu number that restarts the search from the results list.
pub const RESTART_NUMBER: &str = "2";

/// Menu number that shows the next page of results.
pub const SEE_MORE_NUMBER: &str = "1";

/// Menu number asking to be added to the mutual aid network.
pub const INFO_AID_NUMBER: &str = "3";

/// Builds localized reply bodies for one session language.
#[derive(Debug, Clone, Copy)]
pub struct Prompts<'a> {
    localizer: Localizer<'a>,
}

impl<'a> Prompts<'a> {
    pub fn new(resolver: &'a dyn TextResolver, language: &'a str) -> Self {
        Self {
            localizer: Localizer::new(resolver, language),
        }
    }

    pub fn localizer(&self) -> &Localizer<'a> {
        &self.localizer
    }

    /// Punctuation space for non-English sessions, empty otherwise.
    pub fn unicode_suffix(&self) -> &'static str {
        let language = self.localizer.language();
        if language.is_empty() || language == DEFAULT_LANGUAGE {
            ""
        } else {
            PUNCTUATION_SPACE
        }
    }

    pub fn language_menu(&self) -> String {
        let mut body = format!(
            "{}\n{}\n\n{}{}\n",
            self.localizer.text("site-title"),
            self.localizer.text("site-intro"),
            self.localizer.text("language-prompt"),
            PUNCTUATION_SPACE,
        );
        for (idx, code) in LANGUAGE_OPTIONS.iter().enumerate() {
            body.push('\n');
            body.push_str(&self.localizer.text_with(
                &format!("option-{}", code),
                &numbered(&idx.to_string()),
            ));
        }
        body
    }

    pub fn what_menu(&self) -> String {
        let mut body = self.multi_select_header("what-prompt");
        for (idx, value) in WHAT_OPTIONS.iter().enumerate() {
            body.push('\n');
            body.push_str(&self.option("option", idx, value));
        }
        body
    }

    pub fn who_menu(&self) -> String {
        let mut body = self.multi_select_header("who-prompt");
        for (idx, value) in WHO_OPTIONS.iter().enumerate() {
            // "All" reads differently for populations
            let prefix = if idx == 0 { "who-option" } else { "option" };
            body.push('\n');
            body.push_str(&self.option(prefix, idx, value));
        }
        body
    }

    pub fn zip_prompt(&self) -> String {
        format!("{}{}", self.localizer.text("zip-prompt"), self.unicode_suffix())
    }

    pub fn invalid_option(&self) -> String {
        self.localizer.text("please-enter-valid-option")
    }

    pub fn invalid_zip(&self) -> String {
        self.localizer.text("please-enter-valid-zip")
    }

    pub fn results_header(&self, count: usize) -> String {
        self.localizer
            .text_with("results-available", &TemplateParams::new().with_count(count))
    }

    pub fn see_more(&self) -> String {
        self.localizer
            .text_with("see-more-prompt", &numbered(SEE_MORE_NUMBER))
    }

    pub fn restart(&self) -> String {
        format!(
            "{}{}",
            self.localizer
                .text_with("restart-prompt", &numbered(RESTART_NUMBER)),
            self.unicode_suffix()
        )
    }

    pub fn info_aid(&self) -> String {
        format!(
            "{}{}",
            self.localizer
                .text_with("info-aid-prompt", &numbered(INFO_AID_NUMBER)),
            self.unicode_suffix()
        )
    }

    pub fn no_results(&self) -> String {
        format!(
            "{}{}\n\n{}\n{}",
            self.localizer.text("no-results"),
            self.unicode_suffix(),
            self.restart(),
            self.info_aid()
        )
    }

    pub fn added_to_network(&self) -> String {
        format!(
            "{}{}",
            self.localizer.text("added-to-network"),
            self.unicode_suffix()
        )
    }

    fn multi_select_header(&self, prompt_id: &str) -> String {
        format!(
            "{}\n{}{}\n",
            self.localizer.text(prompt_id),
            self.localizer.text("enter-all-numbers"),
            self.unicode_suffix(),
        )
    }

    fn option(&self, prefix: &str, idx: usize, value: &str) -> String {
        self.localizer.text_or(
            &format!("{}-{}", prefix, value),
            &numbered(&idx.to_string()),
            &format!("{} {}", idx, value),
        )
    }
}

fn numbered(number: &str) -> TemplateParams {
    TemplateParams::new().with("Number", number)
}
