use crate::debounce::Debouncer;
use crate::orchestrator::{SearchOrchestrator, UiEvent};
use crate::tui::list::{Motion, ResultCursor};
use crate::tui::search::SearchState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct App {
    pub orchestrator: SearchOrchestrator,

    // Sub-states
    pub search: SearchState,
    pub cursor: ResultCursor,
    debouncer: Debouncer,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(orchestrator: SearchOrchestrator, debounce: Duration) -> Self {
        Self {
            orchestrator,
            search: SearchState::default(),
            cursor: ResultCursor::default(),
            debouncer: Debouncer::new(debounce),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            // Wake for the next tick or the pending query, whichever is sooner
            let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(due) = self.debouncer.time_until_due(Instant::now()) {
                timeout = timeout.min(due);
            }
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }

            let query_due = self
                .debouncer
                .time_until_due(Instant::now())
                .is_some_and(|d| d.is_zero());
            if query_due || last_tick.elapsed() >= tick_rate {
                self.tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Fire a settled query and apply finished fetches
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.submit_query(query);
        }
        if self.orchestrator.process_messages() > 0 {
            self.cursor.sync(self.orchestrator.state());
        }
    }

    pub fn result_count(&self) -> usize {
        self.orchestrator.state().characters.len()
    }

    fn submit_query(&mut self, query: String) {
        debug!(%query, "query settled");
        self.orchestrator.handle_event(UiEvent::QueryChanged(query));
        self.cursor.sync(self.orchestrator.state());
        if self.result_count() == 0 && !self.search.focused {
            self.search.focused = true;
        }
    }

    fn query_edited(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.on_change(&self.search.query, now) {
            self.submit_query(query);
        }
    }

    /// Choose the highlighted row. Ignored while a search is loading, when
    /// the rows on screen are no longer the ones being replaced.
    fn select_under_cursor(&mut self) {
        if self.orchestrator.is_loading() {
            return;
        }
        let character = self.cursor.highlighted(self.orchestrator.state()).cloned();
        if character.is_some() {
            self.orchestrator
                .handle_event(UiEvent::CharacterSelected(character));
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && self.search.clear() {
                    self.query_edited(now);
                } else if self.search.focused {
                    self.should_quit = true;
                } else if self.orchestrator.state().selected.is_some() {
                    self.orchestrator
                        .handle_event(UiEvent::CharacterSelected(None));
                } else {
                    self.search.focused = true;
                }
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key, now);
        } else {
            self.handle_list_key(key, now);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let changed = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert_char(c)
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => {
                self.search.move_left();
                false
            }
            KeyCode::Right => {
                self.search.move_right();
                false
            }
            KeyCode::Home => {
                self.search.home();
                false
            }
            KeyCode::End => {
                self.search.end();
                false
            }
            KeyCode::Enter => {
                let query = self.debouncer.submit();
                self.submit_query(query);
                false
            }
            KeyCode::Tab | KeyCode::Down => {
                if self.result_count() > 0 {
                    self.search.focused = false;
                }
                false
            }
            _ => false,
        };

        if changed {
            self.query_edited(now);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, now: Instant) {
        let total = self.result_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.apply(Motion::Up, total),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.apply(Motion::Down, total),
            KeyCode::PageUp => self.cursor.apply(Motion::PageUp, total),
            KeyCode::PageDown => self.cursor.apply(Motion::PageDown, total),
            KeyCode::Home => self.cursor.apply(Motion::First, total),
            KeyCode::End => self.cursor.apply(Motion::Last, total),
            KeyCode::Enter => self.select_under_cursor(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.end();
                self.search.insert_char(c);
                self.query_edited(now);
            }

            _ => {}
        }
    }
}
