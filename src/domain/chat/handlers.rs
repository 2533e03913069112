//! Per-state message handlers.
//!
//! Each menu state has its own handler type. A handler reads the inbound body,
//! mutates the session, and returns the reply bodies to send.

use super::errors::ChatError;
use super::prompts::{Prompts, INFO_AID_NUMBER, RESTART_NUMBER, SEE_MORE_NUMBER};
use super::session::ChatSession;
use super::state::ChatState;
use crate::domain::directory::{
    highest_option_in, options_in, paginate, who_none_index, Resource, ZipIndex, ALL_INDEX,
    LANGUAGE_OPTIONS, PAGE_SIZE, WHAT_OPTIONS, WHO_OPTIONS,
};
use crate::ports::{ResourceSource, TextResolver};

/// Collaborators available to a handler for one turn.
#[derive(Clone, Copy)]
pub struct TurnContext<'a> {
    pub resources: &'a dyn ResourceSource,
    pub resolver: &'a dyn TextResolver,
    pub zip_index: Option<&'a ZipIndex>,
    pub city_zips: Option<&'a [String]>,
}

impl<'a> TurnContext<'a> {
    fn prompts<'s>(&self, session: &'s ChatSession) -> Prompts<'s>
    where
        'a: 's,
    {
        Prompts::new(self.resolver, session.language())
    }
}

/// Behavior of one menu state.
pub trait StateHandler: Send + Sync {
    /// Handles `body` for a session in this handler's state.
    ///
    /// # Errors
    ///
    /// Only directory load failures are returned as errors.
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError>;
}

/// Returns the handler for `state`.
pub fn handler_for(state: ChatState) -> &'static dyn StateHandler {
    match state {
        ChatState::Started => &StartedHandler,
        ChatState::SetLanguage => &SetLanguageHandler,
        ChatState::SetWhat => &SetWhatHandler,
        ChatState::SetWho => &SetWhoHandler,
        ChatState::SetZip => &SetZipHandler,
        ChatState::Results => &ResultsHandler,
    }
}

/// Answers any first message with the language menu.
pub struct StartedHandler;

impl StateHandler for StartedHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        _body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        session.advance_to(ChatState::SetLanguage);
        Ok(vec![ctx.prompts(session).language_menu()])
    }
}

/// Picks the session language.
///
/// An unrecognized reply is dropped without a re-prompt.
pub struct SetLanguageHandler;

impl StateHandler for SetLanguageHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        let Some(idx) = highest_option_in(body, LANGUAGE_OPTIONS.len()) else {
            return Ok(Vec::new());
        };
        session.set_language(LANGUAGE_OPTIONS[idx]);
        session.advance_to(ChatState::SetWhat);
        Ok(vec![ctx.prompts(session).what_menu()])
    }
}

/// Collects need categories.
pub struct SetWhatHandler;

impl StateHandler for SetWhatHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        let selected = options_in(body, WHAT_OPTIONS.len());
        if selected.is_empty() {
            return Ok(vec![ctx.prompts(session).invalid_option()]);
        }
        if !selected.contains(&ALL_INDEX) {
            for idx in selected {
                session.params_mut().add_what(WHAT_OPTIONS[idx]);
            }
        }
        session.advance_to(ChatState::SetWho);
        Ok(vec![ctx.prompts(session).who_menu()])
    }
}

/// Collects target populations, including the exclusive "None" choice.
pub struct SetWhoHandler;

impl StateHandler for SetWhoHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        let selected = options_in(body, WHO_OPTIONS.len());
        if selected.is_empty() {
            return Ok(vec![ctx.prompts(session).invalid_option()]);
        }
        if !selected.contains(&ALL_INDEX) {
            if selected.contains(&who_none_index()) {
                session.params_mut().set_who_none();
            } else {
                for idx in selected {
                    session.params_mut().add_who(WHO_OPTIONS[idx]);
                }
            }
        }
        session.advance_to(ChatState::SetZip);
        Ok(vec![ctx.prompts(session).zip_prompt()])
    }
}

/// Reads a ZIP code and shows the first page of results straight away.
pub struct SetZipHandler;

impl StateHandler for SetZipHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        let Some(zip) = extract_zip(body) else {
            return Ok(vec![ctx.prompts(session).invalid_zip()]);
        };
        session.params_mut().zip = Some(zip);
        session.advance_to(ChatState::Results);
        ResultsHandler.handle(session, "", ctx)
    }
}

/// First five digits of `body` once every non-digit is removed.
pub fn extract_zip(body: &str) -> Option<String> {
    let digits: String = body.chars().filter(char::is_ascii_digit).collect();
    digits.get(..5).map(str::to_string)
}

/// Pages through matches and handles the restart and info-aid commands.
pub struct ResultsHandler;

impl ResultsHandler {
    fn matching(session: &ChatSession, ctx: &TurnContext<'_>) -> Result<Vec<Resource>, ChatError> {
        let params = session.params();
        Ok(ctx
            .resources
            .load_resources()?
            .into_iter()
            .filter(|resource| params.matches(resource, ctx.zip_index, ctx.city_zips))
            .collect())
    }
}

impl StateHandler for ResultsHandler {
    fn handle(
        &self,
        session: &mut ChatSession,
        body: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<String>, ChatError> {
        if body.contains(RESTART_NUMBER) {
            return Ok(restart(session, ctx));
        }
        let info_aid = body.contains(INFO_AID_NUMBER);
        if !body.contains(SEE_MORE_NUMBER) && !info_aid && session.page() != 0 {
            return Ok(Vec::new());
        }

        let results = Self::matching(session, ctx)?;

        if info_aid {
            let prompts = ctx.prompts(session);
            let mut reply = format!("{}\n\n", prompts.added_to_network());
            if results.len() > session.page() * PAGE_SIZE {
                reply.push_str(&prompts.see_more());
                reply.push('\n');
            }
            reply.push_str(&prompts.restart());
            return Ok(vec![reply]);
        }

        if results.is_empty() {
            // Stops repeated "no results" replies to further chatter
            session.next_page();
            return Ok(vec![ctx.prompts(session).no_results()]);
        }

        let page = session.page();
        let (window, has_more) = paginate(&results, page, PAGE_SIZE);
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let prompts = ctx.prompts(session);
        let mut reply = String::new();
        if page == 0 {
            reply.push_str(&prompts.results_header(results.len()));
        }
        for resource in window {
            reply.push_str("\n\n\n");
            reply.push_str(&resource.as_text(prompts.localizer()));
        }
        if has_more {
            reply.push_str(&format!("\n\n{}\n", prompts.see_more()));
        } else {
            reply.push_str("\n\n");
        }
        reply.push_str(&prompts.restart());
        if page == 0 {
            reply.push('\n');
            reply.push_str(&prompts.info_aid());
        }

        session.next_page();
        Ok(vec![reply])
    }
}

/// Clears filters and paging and sends the what menu again.
pub fn restart(session: &mut ChatSession, ctx: &TurnContext<'_>) -> Vec<String> {
    session.restart();
    vec![ctx.prompts(session).what_menu()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_zip_strips_non_digits() {
        assert_eq!(extract_zip(" 12345 "), Some("12345".to_string()));
        assert_eq!(extract_zip(" 123 45"), Some("12345".to_string()));
        assert_eq!(extract_zip("12345-67890"), Some("12345".to_string()));
        assert_eq!(extract_zip("zip: 60601!"), Some("60601".to_string()));
    }

    #[test]
    fn extract_zip_requires_five_digits() {
        assert_eq!(extract_zip("1234"), None);
        assert_eq!(extract_zip("no zip"), None);
        assert_eq!(extract_zip(""), None);
    }

    #[test]
    fn every_state_has_a_handler() {
        for state in [
            ChatState::Started,
            ChatState::SetLanguage,
            ChatState::SetWhat,
            ChatState::SetWho,
            ChatState::SetZip,
            ChatState::Results,
        ] {
            let _ = handler_for(state);
        }
    }
}
