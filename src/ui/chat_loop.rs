//! The main interaction loop for a chat session.
//!
//! The loop owns the [`ConversationState`] outright. Submissions spawn one
//! tokio task that performs the HTTP round-trip and reports back over an
//! unbounded channel; the loop drains completions between input polls.
//! `waiting_for_reply` gates submission, so at most one request task exists
//! at any time, and a request is never cancelled once issued.

use std::{error::Error, io, sync::Arc, time::Duration};

use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
            KeyModifiers, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::models::ChatResponse;
use crate::api::{AgentClient, AgentError};
use crate::core::conversation::ConversationState;
use crate::ui::renderer::{
    build_display_lines, max_scroll_offset, transcript_viewport_height, ui,
};
use crate::utils::input::sanitize_text_input;
use crate::utils::logging::LoggingState;

/// Everything a chat session needs beyond the conversation itself: the
/// agent client, the session identifier fixed for the process lifetime,
/// and the optional transcript log.
pub struct ChatSession {
    pub agent: Arc<dyn AgentClient>,
    pub session_id: String,
    pub logging: LoggingState,
}

/// Completion of one spawned request, delivered back to the loop.
pub enum ChatEvent {
    Completed(Result<ChatResponse, AgentError>),
}

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<ChatTerminal, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut ChatTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive session until the user quits. The terminal is
/// always restored, including when the loop exits with an error.
pub async fn run_chat(session: ChatSession) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    let result = chat_loop(&mut terminal, session).await;
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

async fn chat_loop(terminal: &mut ChatTerminal, session: ChatSession) -> Result<(), Box<dyn Error>> {
    let mut state = ConversationState::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<ChatEvent>();

    loop {
        terminal.draw(|f| ui(f, &state))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        submit_current_input(&mut state, &session, &tx);
                    }
                    KeyCode::Char(c) => {
                        state.insert_input_char(c);
                    }
                    KeyCode::Backspace => {
                        state.backspace_input();
                    }
                    KeyCode::Up => {
                        scroll_by(&mut state, terminal.size()?.height, -1);
                    }
                    KeyCode::Down => {
                        scroll_by(&mut state, terminal.size()?.height, 1);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll_by(&mut state, terminal.size()?.height, -3);
                    }
                    MouseEventKind::ScrollDown => {
                        scroll_by(&mut state, terminal.size()?.height, 3);
                    }
                    _ => {}
                },
                Event::Paste(text) => {
                    state.input.push_str(&sanitize_text_input(&text));
                }
                _ => {}
            }
        }

        while let Ok(chat_event) = rx.try_recv() {
            apply_event(&mut state, &session.logging, chat_event);
        }
    }
}

/// Submit the current input buffer, spawning the request task when the
/// submission is accepted. A rejected submission (empty input or a reply
/// already pending) changes nothing.
fn submit_current_input(
    state: &mut ConversationState,
    session: &ChatSession,
    tx: &mpsc::UnboundedSender<ChatEvent>,
) {
    let Some(query) = state.submit() else {
        return;
    };
    state.auto_scroll = true;

    if let Some(message) = state.last_message() {
        if let Err(e) = session.logging.log_message(message) {
            eprintln!("Failed to log message: {e}");
        }
    }

    let agent = Arc::clone(&session.agent);
    let session_id = session.session_id.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = agent.ask(&query, &session_id).await;
        let _ = tx.send(ChatEvent::Completed(outcome));
    });
}

/// Apply one completed request to the conversation. Failures collapse to
/// the fixed error text here and never escape the loop.
fn apply_event(state: &mut ConversationState, logging: &LoggingState, chat_event: ChatEvent) {
    match chat_event {
        ChatEvent::Completed(Ok(response)) => {
            state.resolve_reply(response.response);
        }
        ChatEvent::Completed(Err(e)) => {
            debug!(error = %e, "chat request failed");
            state.resolve_error();
        }
    }
    state.auto_scroll = true;

    if let Some(message) = state.last_message() {
        if let Err(e) = logging.log_message(message) {
            eprintln!("Failed to log message: {e}");
        }
    }
}

fn scroll_by(state: &mut ConversationState, terminal_height: u16, delta: i16) {
    let viewport_height = transcript_viewport_height(terminal_height);
    let total_lines = build_display_lines(state).len() as u16;
    let max_offset = max_scroll_offset(total_lines, viewport_height);

    // Manual scrolling starts from wherever the view currently is.
    if state.auto_scroll {
        state.scroll_offset = max_offset;
    }

    if delta < 0 {
        state.auto_scroll = false;
        state.scroll_offset = state.scroll_offset.saturating_sub(delta.unsigned_abs());
    } else {
        state.scroll_offset = state
            .scroll_offset
            .saturating_add(delta.unsigned_abs())
            .min(max_offset);
        if state.scroll_offset >= max_offset {
            state.auto_scroll = true;
        }
    }
}
