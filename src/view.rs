//! View models derived from a session snapshot
//!
//! Front ends render from these and never look at the orchestrator directly.

use crate::model::{Character, SessionState, UiState};

/// What the result list shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Hidden,
    Loading,
    Error(String),
    Empty,
    Rows(Vec<String>),
}

/// What the detail panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Hidden,
    Prompt,
    Character {
        name: String,
        birth_year: String,
        gender: String,
    },
}

pub const LOADING_TEXT: &str = "Loading\u{2026}";
pub const EMPTY_TEXT: &str = "No characters found.";
pub const ERROR_FALLBACK_TEXT: &str = "Something went wrong.";
pub const SELECT_PROMPT_TEXT: &str = "Select a character to see details.";

/// One list row: `"<name> — <birth year>"`
pub fn row_label(character: &Character) -> String {
    format!("{} \u{2014} {}", character.name, character.birth_year)
}

pub fn list_view(state: &SessionState) -> ListView {
    match state.ui_state {
        UiState::Idle => ListView::Hidden,
        UiState::Loading => ListView::Loading,
        UiState::Error if state.error_message.is_empty() => {
            ListView::Error(ERROR_FALLBACK_TEXT.to_string())
        }
        UiState::Error => ListView::Error(state.error_message.clone()),
        UiState::Empty => ListView::Empty,
        UiState::Success if state.characters.is_empty() => ListView::Empty,
        UiState::Success => ListView::Rows(state.characters.iter().map(row_label).collect()),
    }
}

/// "Showing X of Y results." plus a first-page note; only for a settled,
/// non-empty result list
pub fn summary_line(state: &SessionState) -> Option<String> {
    if state.ui_state != UiState::Success || state.characters.is_empty() {
        return None;
    }

    let plural = if state.total_count == 1 { "" } else { "s" };
    let mut line = format!(
        "Showing {} of {} result{}.",
        state.characters.len(),
        state.total_count,
        plural
    );
    if state.has_next_page {
        line.push_str(" First page only.");
    }
    Some(line)
}

pub fn detail_view(state: &SessionState) -> DetailView {
    match &state.selected {
        Some(c) => DetailView::Character {
            name: c.name.clone(),
            birth_year: c.birth_year.clone(),
            gender: c.gender.clone(),
        },
        None if state.ui_state == UiState::Success && !state.characters.is_empty() => {
            DetailView::Prompt
        }
        None => DetailView::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_results(characters: Vec<Character>, total: usize, has_next: bool) -> SessionState {
        SessionState {
            query: "l".into(),
            ui_state: UiState::Success,
            characters,
            total_count: total,
            has_next_page: has_next,
            ..Default::default()
        }
    }

    #[test]
    fn idle_renders_nothing() {
        let state = SessionState::default();
        assert_eq!(list_view(&state), ListView::Hidden);
        assert_eq!(summary_line(&state), None);
        assert_eq!(detail_view(&state), DetailView::Hidden);
    }

    #[test]
    fn rows_show_name_and_birth_year() {
        let state = with_results(vec![Character::new("Luke Skywalker", "19BBY", "male")], 1, false);
        assert_eq!(
            list_view(&state),
            ListView::Rows(vec!["Luke Skywalker \u{2014} 19BBY".to_string()])
        );
    }

    #[test]
    fn summary_pluralises_and_notes_first_page() {
        let one = with_results(vec![Character::new("Luke Skywalker", "19BBY", "male")], 1, false);
        assert_eq!(summary_line(&one).unwrap(), "Showing 1 of 1 result.");

        let many = with_results(
            vec![
                Character::new("Luke Skywalker", "19BBY", "male"),
                Character::new("Leia Organa", "19BBY", "female"),
            ],
            12,
            true,
        );
        assert_eq!(
            summary_line(&many).unwrap(),
            "Showing 2 of 12 results. First page only."
        );
    }

    #[test]
    fn error_uses_message_or_fallback() {
        let mut state = SessionState {
            ui_state: UiState::Error,
            error_message: "Request failed: 500 Internal Server Error".into(),
            ..Default::default()
        };
        assert_eq!(
            list_view(&state),
            ListView::Error("Request failed: 500 Internal Server Error".into())
        );

        state.error_message.clear();
        assert_eq!(list_view(&state), ListView::Error(ERROR_FALLBACK_TEXT.into()));
    }

    #[test]
    fn detail_prompts_until_something_is_selected() {
        let luke = Character::new("Luke Skywalker", "19BBY", "male");
        let mut state = with_results(vec![luke.clone()], 1, false);
        assert_eq!(detail_view(&state), DetailView::Prompt);

        state.selected = Some(luke);
        assert_eq!(
            detail_view(&state),
            DetailView::Character {
                name: "Luke Skywalker".into(),
                birth_year: "19BBY".into(),
                gender: "male".into(),
            }
        );
    }

    #[test]
    fn loading_hides_previous_results_summary_and_prompt() {
        let state = SessionState {
            query: "b".into(),
            ui_state: UiState::Loading,
            characters: vec![
                Character::new("Luke Skywalker", "19BBY", "male"),
                Character::new("Leia Organa", "19BBY", "female"),
            ],
            total_count: 0,
            ..Default::default()
        };
        assert_eq!(list_view(&state), ListView::Loading);
        assert_eq!(summary_line(&state), None);
        assert_eq!(detail_view(&state), DetailView::Hidden);
    }

    #[test]
    fn loading_and_empty_states() {
        let loading = SessionState {
            ui_state: UiState::Loading,
            ..Default::default()
        };
        assert_eq!(list_view(&loading), ListView::Loading);

        let empty = SessionState {
            ui_state: UiState::Empty,
            ..Default::default()
        };
        assert_eq!(list_view(&empty), ListView::Empty);
    }
}
