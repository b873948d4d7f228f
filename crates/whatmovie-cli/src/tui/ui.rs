//! TUI rendering logic for the picker.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use whatmovie_picker::{MovieCard, PickerState};

use super::state::{InputMode, ViewState};

/// Draws the picker UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, picker: &PickerState, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // movie card
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], picker, view);
    draw_card(frame, chunks[1], picker, view);
    draw_footer(frame, chunks[2], view);
}

/// Draws the header with the filter prompt and page position.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, picker: &PickerState, view: &ViewState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    let (filter_text, filter_style) = if view.input_mode == InputMode::Filter {
        (
            format!("{}_", view.filter_input),
            Style::default().fg(Color::Yellow),
        )
    } else if picker.criteria().is_empty() {
        (String::from("(none)"), Style::default().fg(Color::DarkGray))
    } else {
        (picker.criteria().to_string(), Style::default())
    };

    let filter = Paragraph::new(filter_text)
        .style(filter_style)
        .block(Block::default().borders(Borders::ALL).title(" Filter: f "));
    frame.render_widget(filter, header_chunks[0]);

    let pages = picker.pages();
    let position = picker.pool().map_or_else(
        || format!("page {}/{}", pages.page(), pages.total_pages()),
        |pool| {
            format!(
                "#{} of {}  page {}/{}",
                pool.cursor().saturating_add(1),
                pool.len(),
                pages.page(),
                pages.total_pages()
            )
        },
    );
    let position = Paragraph::new(position)
        .block(Block::default().borders(Borders::ALL).title(" WHAT MOVIE? "));
    frame.render_widget(position, header_chunks[1]);
}

/// Draws the selected movie, the loading indicator, or the error line.
fn draw_card(frame: &mut Frame, area: Rect, picker: &PickerState, view: &ViewState) {
    let block = Block::default().borders(Borders::ALL);

    let lines = if view.loading {
        vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Cyan),
        ))]
    } else if let Some(error) = picker.error() {
        vec![Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ))]
    } else if let Some(card) = MovieCard::from_selection(picker.selection()) {
        card_lines(&card)
    } else {
        vec![Line::from("Press g to generate a movie.")]
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Builds the text lines of a movie card.
fn card_lines(card: &MovieCard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        card.heading(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    let details = card.details();
    if !details.is_empty() {
        lines.push(Line::from(details));
    }
    lines.push(Line::from(""));
    if !card.description.is_empty() {
        lines.push(Line::from(card.description.clone()));
        lines.push(Line::from(""));
    }
    if let Some(ref poster) = card.poster_url {
        lines.push(Line::from(format!("Poster:  {poster}")));
    }
    let trailer = card
        .trailer_url
        .clone()
        .unwrap_or_else(|| String::from("-"));
    lines.push(Line::from(format!("Trailer: {trailer}")));
    lines
}

/// Draws the footer with key hints or the prompt error.
fn draw_footer(frame: &mut Frame, area: Rect, view: &ViewState) {
    let help_text = match view.input_mode {
        InputMode::Filter => view.filter_error.as_ref().map_or_else(
            || {
                Line::from(
                    "from=YYYY to=YYYY rating=N.N genres=ID,ID | Enter: apply | Esc: cancel",
                )
            },
            |err| Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))),
        ),
        InputMode::Normal => view.status.as_ref().map_or_else(
            || Line::from("g: generate  f: filter  o: open trailer  q: quit"),
            |status| Line::from(status.clone()),
        ),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
