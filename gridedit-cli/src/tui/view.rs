//! Ratatui rendering of the grid: the table window with its sentinel row,
//! inline cell editors, loading / error screens, and the status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};

use crate::api::models::{Field, Record, Status};
use crate::grid::CellEditor;

use super::state::{COLUMNS, State};

pub fn render(frame: &mut Frame, state: &mut State) {
    let [table_area, status_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

    if state.controller.loading() && state.controller.rows().is_empty() {
        render_message(frame, table_area, "Loading records...", Color::DarkGray);
    } else if state.controller.error().is_some() {
        render_error(frame, table_area, state);
    } else {
        render_table(frame, table_area, state);
    }

    render_status(frame, status_area, state);
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let block = Block::bordered().title(" gridedit ");
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color),
    )))
    .block(block)
    .centered();
    frame.render_widget(paragraph, area);
}

/// Fetch errors suppress the entire grid in favor of one message.
fn render_error(frame: &mut Frame, area: Rect, state: &State) {
    let err = state.controller.error().unwrap_or_default();
    let block = Block::bordered().title(" gridedit ");
    let lines = vec![
        Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red)),
            Span::raw(err.to_string()),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "r to retry, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block).centered(), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut State) {
    let block = Block::bordered().title(" gridedit ");
    let inner = block.inner(area);
    // One line of the inner area goes to the header row.
    let body_height = inner.height.saturating_sub(1) as usize;
    state.viewport_height = body_height;
    state.list_state.set_viewport_height(body_height);
    let display_count = state.display_count();
    state.list_state.update_scroll(body_height, display_count);

    let offset = state.list_state.scroll_offset();
    let selected = state.list_state.selected();
    let records = state.controller.rows();
    let end = (offset + body_height).min(records.len() + 1);

    let mut rows: Vec<Row> = Vec::with_capacity(end.saturating_sub(offset));
    for idx in offset..end {
        if idx == records.len() {
            rows.push(sentinel_row(state, selected == Some(idx)));
        } else {
            rows.push(record_row(state, &records[idx], selected == Some(idx)));
        }
    }

    let header = Row::new(COLUMNS.iter().enumerate().map(|(i, col)| {
        let style = if i == state.focused_col {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(Span::styled(col.title, style))
    }));

    let widths: Vec<Constraint> = COLUMNS.iter().map(|c| Constraint::Length(c.width)).collect();
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn record_row<'a>(state: &'a State, record: &'a Record, is_selected: bool) -> Row<'a> {
    let row_style = if is_selected {
        Style::default().bg(Color::Rgb(40, 40, 50))
    } else {
        Style::default()
    };

    let cells = COLUMNS.iter().enumerate().map(|(col_idx, col)| {
        let focused = is_selected && col_idx == state.focused_col;

        // The editing cell renders its editor instead of the merged value.
        if focused {
            if let Some(editor) = &state.editor {
                if editor.row_id() == record.id {
                    return editor_cell(editor);
                }
            }
        }

        let value = match col.field {
            Some(field) => record.field_value(field),
            None => record.created_at.as_str(),
        };

        if value.is_empty() {
            let placeholder = if focused { "<empty>" } else { "-" };
            return Cell::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut style = match col.field {
            Some(Field::Status) => status_style(record.status),
            _ => Style::default(),
        };
        if record.is_new {
            style = style.add_modifier(Modifier::ITALIC).fg(Color::Cyan);
        }
        if focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(Span::styled(value, style))
    });

    Row::new(cells).style(row_style)
}

/// The trailing sentinel row: its presence inside the viewport is what
/// triggers the next page load.
fn sentinel_row(state: &State, is_selected: bool) -> Row<'static> {
    let text = if state.controller.has_more() {
        "..."
    } else if state.controller.rows().is_empty() {
        "no records"
    } else {
        "- end of data -"
    };
    let mut style = Style::default().fg(Color::DarkGray);
    if is_selected {
        style = style.bg(Color::Rgb(40, 40, 50));
    }
    Row::new(vec![Cell::from(Span::styled(text, style))])
}

fn editor_cell(editor: &CellEditor) -> Cell<'_> {
    match editor {
        CellEditor::Text(edit) => {
            let at = edit
                .buffer
                .char_indices()
                .nth(edit.cursor)
                .map(|(i, _)| i)
                .unwrap_or(edit.buffer.len());
            let (before, rest) = edit.buffer.split_at(at);
            let mut chars = rest.chars();
            let under_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".into());
            let after: String = chars.collect();

            let base = Style::default().fg(Color::Yellow);
            Cell::from(Line::from(vec![
                Span::styled(before.to_string(), base),
                Span::styled(under_cursor, base.add_modifier(Modifier::REVERSED)),
                Span::styled(after, base),
            ]))
        }
        CellEditor::Select(select) => Cell::from(Span::styled(
            format!("< {} >", select.highlighted_option()),
            Style::default().fg(Color::Yellow),
        )),
    }
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Active => Style::default().fg(Color::Green),
        Status::Inactive => Style::default().fg(Color::DarkGray),
        Status::Pending => Style::default().fg(Color::Yellow),
        Status::Suspended => Style::default().fg(Color::Red),
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &State) {
    let line = match &state.editor {
        Some(editor) => {
            let mut spans = vec![Span::styled(
                " editing ",
                Style::default().fg(Color::Yellow),
            )];
            if let Some(message) = editor.error() {
                spans.push(Span::styled(
                    format!("{}  ", message),
                    Style::default().fg(Color::Red),
                ));
            }
            spans.push(Span::styled(
                match editor {
                    CellEditor::Text(_) => "Enter commit - Esc cancel",
                    CellEditor::Select(_) => "Up/Down choose - Enter commit - Esc cancel",
                },
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        }
        None => {
            let counts = format!(
                " {}/{} rows{} ",
                state.controller.loaded(),
                state.controller.total(),
                if state.controller.has_more() {
                    " (+)"
                } else {
                    ""
                },
            );
            Line::from(vec![
                Span::raw(counts),
                Span::styled(
                    "arrows move - Enter edit - n new row - r reload - q quit",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
