use crate::model::{Character, SessionState};
use std::ops::Range;

/// Cursor movements in the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

/// Which result row is highlighted and which slice of rows is on screen.
///
/// The highlight is only a pointer into `SessionState::characters`. Choosing
/// a character is a separate step, and [`ResultCursor::sync`] puts the
/// highlight back on the chosen one whenever the list changes.
#[derive(Debug)]
pub struct ResultCursor {
    index: Option<usize>,
    scroll_offset: usize,
    /// Rows that fit in the list panel; set by the renderer every frame
    pub visible_rows: usize,
}

impl Default for ResultCursor {
    fn default() -> Self {
        Self {
            index: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl ResultCursor {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Re-anchor after the result list changed: on the selected character if
    /// it is still listed, otherwise on the first row
    pub fn sync(&mut self, state: &SessionState) {
        let selected = state
            .selected
            .as_ref()
            .and_then(|s| state.characters.iter().position(|c| c == s));

        self.index = match selected {
            Some(i) => Some(i),
            None if state.characters.is_empty() => None,
            None => Some(0),
        };
        self.scroll_offset = 0;
        if let Some(i) = self.index {
            self.scroll_into_view(i);
        }
    }

    pub fn apply(&mut self, motion: Motion, total: usize) {
        if total == 0 {
            self.index = None;
            self.scroll_offset = 0;
            return;
        }

        let last = total - 1;
        let page = self.visible_rows.saturating_sub(1).max(1);
        let next = match (motion, self.index) {
            (Motion::First, _) | (Motion::Up, None) | (Motion::PageUp, None) => 0,
            (Motion::Last, _) => last,
            (Motion::Down, None) => 0,
            (Motion::PageDown, None) => page.min(last),
            (Motion::Up, Some(i)) => i.saturating_sub(1),
            (Motion::Down, Some(i)) => (i + 1).min(last),
            (Motion::PageUp, Some(i)) => i.saturating_sub(page),
            (Motion::PageDown, Some(i)) => (i + page).min(last),
        };

        self.index = Some(next);
        self.scroll_into_view(next);
    }

    /// The character under the highlight, if the highlight is on a row
    pub fn highlighted<'a>(&self, state: &'a SessionState) -> Option<&'a Character> {
        self.index.and_then(|i| state.characters.get(i))
    }

    /// Row indices to draw for a list of `total` rows
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = self.scroll_offset.min(total);
        let end = start.saturating_add(self.visible_rows).min(total);
        start..end
    }

    fn scroll_into_view(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index + 1 - self.visible_rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiState;

    fn listing(names: &[&str]) -> SessionState {
        SessionState {
            query: "a".into(),
            ui_state: UiState::Success,
            characters: names
                .iter()
                .map(|n| Character::new(n, "unknown", "n/a"))
                .collect(),
            total_count: names.len(),
            ..Default::default()
        }
    }

    #[test]
    fn moves_stay_in_bounds() {
        let mut cursor = ResultCursor::default();
        cursor.apply(Motion::Down, 2);
        cursor.apply(Motion::Down, 2);
        cursor.apply(Motion::Down, 2);
        assert_eq!(cursor.index(), Some(1));

        cursor.apply(Motion::Up, 2);
        cursor.apply(Motion::Up, 2);
        assert_eq!(cursor.index(), Some(0));

        cursor.apply(Motion::Down, 0);
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn window_follows_the_highlight() {
        let mut cursor = ResultCursor {
            visible_rows: 3,
            ..Default::default()
        };
        cursor.apply(Motion::Last, 10);
        assert_eq!(cursor.index(), Some(9));
        assert_eq!(cursor.window(10), 7..10);

        cursor.apply(Motion::PageUp, 10);
        assert_eq!(cursor.index(), Some(7));
        assert_eq!(cursor.window(10), 7..10);

        cursor.apply(Motion::First, 10);
        assert_eq!(cursor.window(10), 0..3);

        // A shorter list never yields rows past its end
        assert_eq!(cursor.window(2), 0..2);
    }

    #[test]
    fn sync_lands_on_the_selected_character() {
        let mut state = listing(&["Luke", "Leia", "Han", "Chewbacca", "Yoda"]);
        state.selected = Some(state.characters[3].clone());

        let mut cursor = ResultCursor {
            visible_rows: 2,
            ..Default::default()
        };
        cursor.sync(&state);
        assert_eq!(cursor.index(), Some(3));
        assert_eq!(cursor.window(5), 2..4);
        assert_eq!(cursor.highlighted(&state).map(|c| c.name.as_str()), Some("Chewbacca"));
    }

    #[test]
    fn sync_without_selection_starts_at_top_or_nowhere() {
        let mut cursor = ResultCursor::default();
        cursor.apply(Motion::Last, 5);

        cursor.sync(&listing(&["Luke", "Leia"]));
        assert_eq!(cursor.index(), Some(0));

        cursor.sync(&SessionState::default());
        assert_eq!(cursor.index(), None);
        assert!(cursor.highlighted(&SessionState::default()).is_none());
    }
}
