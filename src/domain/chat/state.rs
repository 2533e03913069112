//! Chat menu states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Position of a contact in the directory menu.
///
/// The menu moves forward one step per valid reply:
/// `Started -> SetLanguage -> SetWhat -> SetWho -> SetZip -> Results`.
/// `Results -> SetWhat` is the only backward step (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// First message not yet answered.
    #[default]
    Started,

    /// Waiting for a language choice.
    SetLanguage,

    /// Waiting for need categories.
    SetWhat,

    /// Waiting for target populations.
    SetWho,

    /// Waiting for a ZIP code.
    SetZip,

    /// Browsing matched resources.
    Results,
}

impl ChatState {
    /// Returns true once filter criteria are being collected.
    pub fn is_collecting_filters(&self) -> bool {
        matches!(self, Self::SetWhat | Self::SetWho | Self::SetZip)
    }
}

impl StateMachine for ChatState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ChatState::*;
        matches!(
            (self, target),
            (Started, SetLanguage)
                | (SetLanguage, SetWhat)
                | (SetWhat, SetWho)
                | (SetWho, SetZip)
                | (SetZip, Results)
                // Restart keeps the language
                | (Results, SetWhat)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ChatState::*;
        match self {
            Started => vec![SetLanguage],
            SetLanguage => vec![SetWhat],
            SetWhat => vec![SetWho],
            SetWho => vec![SetZip],
            SetZip => vec![Results],
            Results => vec![SetWhat],
        }
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChatState::Started => "started",
            ChatState::SetLanguage => "set_language",
            ChatState::SetWhat => "set_what",
            ChatState::SetWho => "set_who",
            ChatState::SetZip => "set_zip",
            ChatState::Results => "results",
        };
        write!(f, "{}", name)
    }
}
