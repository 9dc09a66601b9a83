use crate::model::UiState;
use crate::tui::app::App;
use crate::view::{self, DetailView, ListView};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use unicode_width::UnicodeWidthStr;

const BAR_BG: Color = Color::Rgb(40, 40, 50);

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // List + detail
            Constraint::Length(1), // Summary
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_title(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_list(frame, app, body[0]);
    draw_detail(frame, app, body[1]);
    draw_summary(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    if app.search.focused {
        // Border (1) + space (1) + search icon (2 cols) + space (1)
        let cursor_x = chunks[1].x + 5 + app.search.cursor_column() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(" Star Wars Character Search").style(
        Style::default()
            .fg(Color::White)
            .bg(BAR_BG)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search by name ");

    let search_text = format!(" \u{1F50D} {}", app.search.query);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.search.focused {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        })
        .title(" Characters ");

    let state = app.orchestrator.state();
    let rows = match view::list_view(state) {
        ListView::Hidden => {
            frame.render_widget(block, area);
            return;
        }
        ListView::Loading => {
            let p = Paragraph::new(view::LOADING_TEXT)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, area);
            return;
        }
        ListView::Error(message) => {
            let p = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(p, area);
            return;
        }
        ListView::Empty => {
            let p = Paragraph::new(view::EMPTY_TEXT)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(p, area);
            return;
        }
        ListView::Rows(rows) => rows,
    };

    // Inner height minus borders
    app.cursor.visible_rows = area.height.saturating_sub(2) as usize;

    let state = app.orchestrator.state();
    let highlight = if app.search.focused {
        None
    } else {
        app.cursor.index()
    };

    let table_rows: Vec<Row> = app
        .cursor
        .window(rows.len())
        .enumerate()
        .map(|(visual_idx, idx)| {
            let under_cursor = highlight == Some(idx);
            let is_selected =
                state.selected.is_some() && state.selected.as_ref() == state.characters.get(idx);

            // Alternating row background
            let bg = if under_cursor {
                Color::Rgb(60, 60, 80)
            } else if visual_idx % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };

            let marker = if is_selected { "\u{25B6} " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::LightYellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(bg)
            };

            Row::new(vec![Cell::from(format!("{}{}", marker, rows[idx])).style(style)])
        })
        .collect();

    let table = Table::new(table_rows, [Constraint::Fill(1)]).block(block);
    frame.render_widget(table, area);
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Details ");

    let label = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);

    let content = match view::detail_view(app.orchestrator.state()) {
        DetailView::Hidden => Paragraph::new(""),
        DetailView::Prompt => Paragraph::new(view::SELECT_PROMPT_TEXT)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        DetailView::Character {
            name,
            birth_year,
            gender,
        } => Paragraph::new(vec![
            Line::from(Span::styled(
                name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("BIRTH YEAR", label)),
            Line::from(birth_year),
            Line::from(""),
            Line::from(Span::styled("GENDER", label)),
            Line::from(gender),
        ]),
    };

    frame.render_widget(content.block(block), area);
}

fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let text = view::summary_line(app.orchestrator.state())
        .map(|line| format!(" {}", line))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.orchestrator.state();
    let left_text = match state.ui_state {
        UiState::Loading => format!(" \u{23F3} Searching for '{}'...", state.query),
        UiState::Idle => " Type to search".to_string(),
        other => format!(" {} | {} cached", other.label(), app.orchestrator.cache().len()),
    };

    let right_text = if app.search.focused {
        " Enter:Search  Tab:Results  Esc:Clear/Quit  Ctrl+Q:Quit "
    } else {
        " \u{2191}\u{2193}:Move  Enter:Select  Esc:Deselect  Tab:Search  Ctrl+Q:Quit "
    };

    let status_str = status_line(&left_text, right_text, area.width as usize);
    let paragraph = Paragraph::new(status_str).style(Style::default().fg(Color::White).bg(BAR_BG));
    frame.render_widget(paragraph, area);
}

/// Left text, padding, then right text, measured in terminal columns. The
/// right side is dropped when both do not fit.
fn status_line(left: &str, right: &str, width: usize) -> String {
    let left_len = left.width();
    let right_len = right.width();

    if left_len + right_len < width {
        let padding = width - left_len - right_len;
        format!("{}{:padding$}{}", left, "", right, padding = padding)
    } else {
        let pad = width.saturating_sub(left_len);
        format!("{}{:pad$}", left, "", pad = pad)
    }
}
