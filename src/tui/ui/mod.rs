//! TUI rendering module.
//!
//! [`frame_lines`] turns a [`Session`] into the lines of one frame. [`render`]
//! joins them into plain text and [`draw`] paints them through ratatui, so both
//! always show the same content.
//!
//! - `layout` - list scrolling

pub mod layout;

use crate::tui::app::{FetchState, Session};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

pub const HEADER: &str = "Issues assigned to you:";
pub const FOOTER: &str = "j/k or arrows: move • enter/space: select • q: quit";
pub const LOADING: &str = "Loading issues...";
pub const NO_ISSUES: &str = "No issues assigned to you.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Blank,
    Choice { cursor: bool, selected: bool },
    Status { error: bool },
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub kind: LineKind,
    pub text: String,
}

impl FrameLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

/// The lines of one frame, top to bottom.
pub fn frame_lines(session: &Session) -> Vec<FrameLine> {
    let mut lines = vec![FrameLine::new(LineKind::Header, HEADER), FrameLine::blank()];

    for (idx, choice) in session.choices.iter().enumerate() {
        let cursor = idx == session.cursor;
        let selected = session.is_selected(idx);
        let text = format!(
            "{} [{}] {}",
            if cursor { '>' } else { ' ' },
            if selected { 'x' } else { ' ' },
            choice.label
        );
        lines.push(FrameLine::new(LineKind::Choice { cursor, selected }, text));
    }

    if let Some(status) = status_line(session) {
        lines.push(status);
    }

    lines.push(FrameLine::blank());
    lines.push(FrameLine::new(LineKind::Footer, FOOTER));
    lines
}

fn status_line(session: &Session) -> Option<FrameLine> {
    match &session.fetch {
        FetchState::Failed(reason) => Some(FrameLine::new(
            LineKind::Status { error: true },
            format!("Error: {}", reason),
        )),
        FetchState::Pending if session.choices.is_empty() => {
            Some(FrameLine::new(LineKind::Status { error: false }, LOADING))
        }
        FetchState::Loaded if session.choices.is_empty() => {
            Some(FrameLine::new(LineKind::Status { error: false }, NO_ISSUES))
        }
        _ => None,
    }
}

/// Plain-text frame for `session`. Pure and deterministic.
pub fn render(session: &Session) -> String {
    frame_lines(session)
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Header => Style::default().add_modifier(Modifier::BOLD),
        LineKind::Blank => Style::default(),
        LineKind::Choice { cursor, selected } => {
            let mut style = Style::default();
            if selected {
                style = style.fg(Color::Green);
            }
            if cursor {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            style
        }
        LineKind::Status { error: true } => Style::default().fg(Color::Red),
        LineKind::Status { error: false } => Style::default().fg(Color::Yellow),
        LineKind::Footer => Style::default().fg(Color::DarkGray),
    }
}

fn to_lines(lines: &[FrameLine]) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|l| Line::styled(l.text.clone(), line_style(l.kind)))
        .collect()
}

/// Main draw function - renders the whole picker.
pub fn draw(f: &mut Frame, session: &Session) {
    let lines = frame_lines(session);

    // Header + blank on top, footer block at the bottom, choices scroll between
    let list_start = lines
        .iter()
        .position(|l| matches!(l.kind, LineKind::Choice { .. }))
        .unwrap_or(2);
    let list_end = list_start + session.choices.len();
    let (head, rest) = lines.split_at(list_start);
    let (list, tail) = rest.split_at(list_end - list_start);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(head.len() as u16),
            Constraint::Min(0),
            Constraint::Length(tail.len() as u16),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(to_lines(head)), chunks[0]);

    let offset = layout::scroll_offset(session.cursor, chunks[1].height as usize);
    f.render_widget(
        Paragraph::new(to_lines(list)).scroll((offset as u16, 0)),
        chunks[1],
    );

    f.render_widget(Paragraph::new(to_lines(tail)), chunks[2]);
}
