use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::constants::TYPING_INDICATOR;
use crate::core::conversation::ConversationState;
use crate::core::message::Sender;

/// Rows taken by the bordered input area at the bottom of the screen.
pub const INPUT_AREA_HEIGHT: u16 = 3;

/// Rows taken by the transcript title line.
const TITLE_HEIGHT: u16 = 1;

/// Build the transcript as display lines, newest entry last.
///
/// The typing indicator is render-only state: it is derived from
/// `waiting_for_reply` here and never stored in the transcript.
pub fn build_display_lines(state: &ConversationState) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for msg in &state.messages {
        match msg.sender {
            Sender::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "You: ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(&msg.text, Style::default().fg(Color::Cyan)),
                ]));
                lines.push(Line::from(""));
            }
            Sender::Agent => {
                for content_line in msg.text.lines() {
                    if content_line.trim().is_empty() {
                        lines.push(Line::from(""));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line,
                            Style::default().fg(Color::White),
                        )));
                    }
                }
                lines.push(Line::from(""));
            }
        }
    }

    if state.waiting_for_reply {
        lines.push(Line::from(Span::styled(
            TYPING_INDICATOR,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    lines
}

/// Transcript rows visible once the title and input area are accounted for.
pub fn transcript_viewport_height(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(INPUT_AREA_HEIGHT)
        .saturating_sub(TITLE_HEIGHT)
}

pub fn max_scroll_offset(total_lines: u16, viewport_height: u16) -> u16 {
    total_lines.saturating_sub(viewport_height)
}

/// Scroll offset actually used for a frame: pinned to the newest entry
/// while auto-scroll is engaged, clamped into range otherwise.
pub fn effective_scroll_offset(state: &ConversationState, viewport_height: u16) -> u16 {
    let total_lines = build_display_lines(state).len() as u16;
    let max_offset = max_scroll_offset(total_lines, viewport_height);
    if state.auto_scroll {
        max_offset
    } else {
        state.scroll_offset.min(max_offset)
    }
}

pub fn ui(f: &mut Frame, state: &ConversationState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(INPUT_AREA_HEIGHT)])
        .split(f.area());

    let viewport_height = chunks[0].height.saturating_sub(TITLE_HEIGHT);
    let scroll_offset = effective_scroll_offset(state, viewport_height);

    let transcript = Paragraph::new(build_display_lines(state))
        .block(Block::default().title("Weather Agent Chat"))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(state.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ask me about the weather (Enter to send, Ctrl+C to quit)"),
        );
    f.render_widget(input, chunks[1]);

    // Cursor sits after the input text, measured in display columns so wide
    // characters line up.
    f.set_cursor_position((
        chunks[1].x + state.input.as_str().width() as u16 + 1,
        chunks[1].y + 1,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn typing_indicator_is_the_newest_entry_while_waiting() {
        let mut state = ConversationState::new();
        state.set_input("forecast?");
        state.submit();

        let lines = build_display_lines(&state);
        let non_empty: Vec<String> = lines
            .iter()
            .map(line_text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(non_empty.last().unwrap(), TYPING_INDICATOR);
    }

    #[test]
    fn typing_indicator_disappears_when_reply_lands() {
        let mut state = ConversationState::new();
        state.set_input("forecast?");
        state.submit();
        state.resolve_reply(Some("Sunny, 25C".to_string()));

        let lines = build_display_lines(&state);
        assert!(lines.iter().map(|l| line_text(l)).all(|t| t != TYPING_INDICATOR));
    }

    #[test]
    fn user_messages_carry_prefix_and_agent_messages_do_not() {
        let mut state = ConversationState::new();
        state.set_input("rain?");
        state.submit();
        state.resolve_reply(Some("No rain expected.".to_string()));

        let texts: Vec<String> = build_display_lines(&state)
            .iter()
            .map(line_text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["You: rain?", "No rain expected."]);
    }

    #[test]
    fn multi_line_agent_reply_is_split_into_lines() {
        let mut state = ConversationState::new();
        state.set_input("week?");
        state.submit();
        state.resolve_reply(Some("Mon: sun\nTue: rain".to_string()));

        let texts: Vec<String> = build_display_lines(&state)
            .iter()
            .map(line_text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["You: week?", "Mon: sun", "Tue: rain"]);
    }

    #[test]
    fn scroll_bounds() {
        assert_eq!(max_scroll_offset(10, 4), 6);
        assert_eq!(max_scroll_offset(3, 4), 0);
        assert_eq!(transcript_viewport_height(24), 20);
        assert_eq!(transcript_viewport_height(2), 0);
    }

    #[test]
    fn auto_scroll_pins_to_bottom_and_manual_scroll_is_clamped() {
        let mut state = ConversationState::new();
        for i in 0..8 {
            state.set_input(format!("q{i}"));
            state.submit();
            state.resolve_reply(Some("ok".to_string()));
        }
        // 8 exchanges at 2 display lines per message = 32 lines.
        let viewport = 10;
        assert_eq!(effective_scroll_offset(&state, viewport), 22);

        state.auto_scroll = false;
        state.scroll_offset = 5;
        assert_eq!(effective_scroll_offset(&state, viewport), 5);
        state.scroll_offset = 99;
        assert_eq!(effective_scroll_offset(&state, viewport), 22);
    }
}
