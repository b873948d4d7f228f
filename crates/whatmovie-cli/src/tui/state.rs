//! Picker TUI view state and key handling.

use crossterm::event::{KeyCode, KeyModifiers};
use whatmovie_picker::FilterCriteria;

/// Input mode for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Normal,
    /// Editing the filter prompt.
    Filter,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do beyond redrawing.
    None,
    /// Leave the TUI.
    Quit,
    /// Show the next movie.
    Generate,
    /// Apply the parsed filter.
    ApplyFilter(FilterCriteria),
    /// Open the current trailer in the browser.
    OpenTrailer,
}

/// UI-only state; the movie state lives in `PickerState`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ViewState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Filter prompt text.
    pub filter_input: String,
    /// Parse error for the filter prompt.
    pub filter_error: Option<String>,
    /// A top-level fetch is in flight.
    pub loading: bool,
    /// One-line status message (e.g. browser launch failure).
    pub status: Option<String>,
}

impl ViewState {
    /// Creates the view with the prompt prefilled from `criteria`.
    #[must_use]
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            input_mode: InputMode::Normal,
            filter_input: criteria.to_string(),
            filter_error: None,
            loading: false,
            status: None,
        }
    }

    /// Maps a key press to an action, updating the prompt as needed.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Filter => self.handle_filter_key(key),
        }
    }

    /// Handles key input in normal mode.
    fn handle_normal_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('g' | ' ') | KeyCode::Enter => {
                self.status = None;
                Action::Generate
            }
            KeyCode::Char('f' | '/') => {
                self.input_mode = InputMode::Filter;
                self.filter_error = None;
                self.status = None;
                Action::None
            }
            KeyCode::Char('o') => Action::OpenTrailer,
            _ => Action::None,
        }
    }

    /// Handles key input in filter mode.
    fn handle_filter_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.filter_error = None;
                Action::None
            }
            KeyCode::Enter => match self.filter_input.parse::<FilterCriteria>() {
                Ok(criteria) => {
                    self.input_mode = InputMode::Normal;
                    self.filter_error = None;
                    self.filter_input = criteria.to_string();
                    Action::ApplyFilter(criteria)
                }
                Err(err) => {
                    self.filter_error = Some(err.to_string());
                    Action::None
                }
            },
            KeyCode::Backspace => {
                self.filter_input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.filter_input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }
}
