//! Interactive movie picker.
//!
//! Uses `ratatui` + `crossterm` for rendering. The event loop runs on the
//! current-thread runtime so runtime/trailer lookups make progress while it
//! sleeps between frames.

/// Picker view state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use whatmovie_api::backend::MovieApi;
use whatmovie_picker::display::trailer_url;
use whatmovie_picker::{FilterCriteria, PickerState, PoolManager};

use self::state::{Action, ViewState};

/// Delay between frames.
const TICK: Duration = Duration::from_millis(50);

/// Terminal type used by the picker.
type PickerTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the picker TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. Fetch
/// failures are shown inside the UI and do not end the loop.
pub async fn run_picker<A>(api: Arc<A>, criteria: FilterCriteria) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let mut manager = PoolManager::new(api);
    let mut picker = PickerState::new(criteria);
    let mut view = ViewState::new(picker.criteria());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut manager, &mut picker, &mut view).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut PickerTerminal,
    manager: &mut PoolManager<A>,
    picker: &mut PickerState,
    view: &mut ViewState,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    // Startup: the popular feed, or the configured filter straight away.
    draw_loading(terminal, picker, view)?;
    let _ = if picker.criteria().is_empty() {
        manager.load_popular(picker).await
    } else {
        manager.generate(picker).await
    };
    view.loading = false;

    loop {
        manager.pump(picker);
        terminal
            .draw(|frame| ui::draw(frame, picker, view))
            .context("failed to draw TUI")?;

        if event::poll(Duration::ZERO).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match view.handle_key(key.code, key.modifiers) {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::Generate => {
                    draw_loading(terminal, picker, view)?;
                    let _ = manager.generate(picker).await;
                    view.loading = false;
                }
                Action::ApplyFilter(criteria) => {
                    draw_loading(terminal, picker, view)?;
                    let _ = manager.apply_filter(picker, criteria).await;
                    view.loading = false;
                }
                Action::OpenTrailer => open_trailer(picker, view),
            }
        }

        tokio::time::sleep(TICK).await;
    }
}

/// Shows the loading indicator before a top-level fetch suspends the loop.
fn draw_loading(
    terminal: &mut PickerTerminal,
    picker: &PickerState,
    view: &mut ViewState,
) -> Result<()> {
    view.loading = true;
    terminal
        .draw(|frame| ui::draw(frame, picker, view))
        .context("failed to draw TUI")?;
    Ok(())
}

/// Opens the trailer of the selected movie in the system browser.
fn open_trailer(picker: &PickerState, view: &mut ViewState) {
    let Some(key) = picker.selection().trailer_key.as_deref() else {
        view.status = Some(String::from("No trailer for this movie."));
        return;
    };
    let url = trailer_url(key);
    if let Err(err) = open::that(&url) {
        view.status = Some(format!("Could not open {url}: {err}"));
    }
}
