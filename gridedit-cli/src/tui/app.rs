//! Event loop and update dispatch for the grid app.
//!
//! Terminal events and async fetch results both arrive as `Msg` values;
//! `update` is the only place state transitions happen. The fetch runs as a
//! spawned task whose result comes back over an mpsc channel, so a quit in
//! the meantime simply tears the controller down and the late result is
//! discarded.

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::api::ApiClient;
use crate::config::OverlayStore;
use crate::grid::{CellEditor, GridController};

use super::state::{COLUMNS, Msg, State};
use super::view;
use super::widgets::ListState;

pub async fn run(url: String) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, url).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut ratatui::DefaultTerminal, url: String) -> Result<()> {
    let client = ApiClient::new(url);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = State::new(GridController::new(OverlayStore::new()));
    spawn_fetch(&client, &mut state, &tx);

    let mut events = EventStream::new();
    while !state.should_quit {
        terminal.draw(|frame| view::render(frame, &mut state))?;

        // The render pass fixed the viewport; a sentinel inside it requests
        // the next page under the loader guard. Redraw before waiting when
        // rows were appended.
        if state.controller.maybe_load_next(state.sentinel_visible()) {
            continue;
        }

        tokio::select! {
            Some(msg) = rx.recv() => update(&mut state, msg, &client, &tx),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    update(&mut state, Msg::Key(key), &client, &tx);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    state.controller.teardown();
    Ok(())
}

fn update(state: &mut State, msg: Msg, client: &ApiClient, tx: &UnboundedSender<Msg>) {
    match msg {
        Msg::RecordsLoaded(result) => {
            state.controller.fetch_complete(result);
            state
                .list_state
                .select_and_scroll(Some(0), state.display_count());
        }
        Msg::Key(key) => {
            if state.editor.is_some() {
                handle_editor_key(state, key);
            } else {
                handle_grid_key(state, key, client, tx);
            }
        }
    }
}

/// Keys while a cell editor is open.
fn handle_editor_key(state: &mut State, key: KeyEvent) {
    let Some(editor) = state.editor.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            // Cancel: the input resets to the last committed value and the
            // cell returns to display mode. No overlay write.
            if let CellEditor::Text(edit) = editor {
                edit.cancel();
            }
            state.editor = None;
        }
        KeyCode::Enter => {
            if let Some(value) = editor.commit() {
                let row_id = editor.row_id().to_string();
                let field = editor.field();
                state.controller.update_cell(&row_id, field, &value);
                state.editor = None;
            }
            // On a failed commit the editor stays open with its message and
            // the rejected value; the record is untouched.
        }
        _ => match editor {
            CellEditor::Text(edit) => match key.code {
                KeyCode::Char(c) => edit.insert(c),
                KeyCode::Backspace => edit.backspace(),
                KeyCode::Left => edit.move_left(),
                KeyCode::Right => edit.move_right(),
                KeyCode::Home => edit.move_home(),
                KeyCode::End => edit.move_end(),
                _ => {}
            },
            CellEditor::Select(select) => match key.code {
                KeyCode::Up => select.prev(),
                KeyCode::Down => select.next(),
                _ => {}
            },
        },
    }
}

/// Keys while every cell is in display mode.
fn handle_grid_key(
    state: &mut State,
    key: KeyEvent,
    client: &ApiClient,
    tx: &UnboundedSender<Msg>,
) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Char('r') => {
            state.editor = None;
            state.list_state = ListState::with_selection();
            spawn_fetch(client, state, tx);
        }
        KeyCode::Char('n') => {
            if !state.controller.loading() && state.controller.error().is_none() {
                state.controller.create_row();
                state
                    .list_state
                    .select_and_scroll(Some(0), state.display_count());
            }
        }
        KeyCode::Left => state.focused_col = state.focused_col.saturating_sub(1),
        KeyCode::Right => {
            state.focused_col = (state.focused_col + 1).min(COLUMNS.len() - 1);
        }
        KeyCode::Enter => open_editor(state),
        _ => {
            state
                .list_state
                .handle_key(key.code, state.display_count(), state.viewport_height);
        }
    }
}

/// Activate the focused cell: display -> editing. The sentinel row and
/// read-only columns have no editor.
fn open_editor(state: &mut State) {
    let Some(selected) = state.list_state.selected() else {
        return;
    };
    let Some(record) = state.controller.rows().get(selected) else {
        return;
    };
    let Some(field) = COLUMNS[state.focused_col].field else {
        return;
    };
    state.editor = Some(CellEditor::for_cell(record, field));
}

fn spawn_fetch(client: &ApiClient, state: &mut State, tx: &UnboundedSender<Msg>) {
    state.controller.start_fetch();
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_records().await.map_err(|e| e.to_string());
        // The receiver is gone if the app quit; the late result is dropped.
        let _ = tx.send(Msg::RecordsLoaded(result));
    });
}
