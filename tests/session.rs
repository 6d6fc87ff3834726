//! Tests for the picker session state machine.
//!
//! Covers cursor clamping, toggle semantics, fetch handling and the
//! end-to-end picker scenarios.

use lin::data::Issue;
use lin::tui::ui::render;
use lin::tui::{Command, FetchOutcome, FetchState, Message, Session, Transition};
use std::collections::BTreeSet;

mod test_utils;
use test_utils::*;

fn indices(items: &[usize]) -> BTreeSet<usize> {
    items.iter().copied().collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_fetch_move_toggle_scenario() {
    let (mut session, command) = Session::init();
    assert_eq!(command, Command::FetchIssues);

    session.update(Message::fetched(sample_issues()));
    assert_eq!(session.choices.len(), 2);
    assert_eq!(session.cursor, 0);

    session.update(Message::MoveDown);
    assert_eq!(session.cursor, 1);

    session.update(Message::Toggle);
    assert_eq!(session.selected_indices(), indices(&[1]));

    let frame = render(&session);
    let choice_lines: Vec<&str> = frame.lines().filter(|l| l.contains("(ENG-")).collect();
    assert_eq!(choice_lines.len(), 2);
    assert!(choice_lines[1].starts_with('>'));
    assert!(choice_lines[1].contains("[x]"));
    assert!(!choice_lines[0].starts_with('>'));
    assert!(choice_lines[0].contains("[ ]"));
}

#[test]
fn test_move_down_on_empty_keeps_cursor_at_zero() {
    let mut session = Session::new();
    assert_eq!(session.update(Message::MoveDown), Transition::Continue);
    assert_eq!(session.cursor, 0);
    assert!(session.current().is_none());
}

#[test]
fn test_quit_from_any_state() {
    let mut empty = Session::new();
    assert_eq!(empty.update(Message::Quit), Transition::Quit);

    let mut busy = session_with(make_issues(5));
    busy.update(Message::MoveDown);
    busy.update(Message::Toggle);
    assert_eq!(busy.update(Message::Quit), Transition::Quit);
}

// ============================================================================
// Cursor
// ============================================================================

mod cursor {
    use super::*;

    #[test]
    fn test_cursor_stays_in_bounds_for_any_move_sequence() {
        let mut session = session_with(make_issues(4));
        // Deterministic pseudo-random walk
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let msg = if seed & 0x100 == 0 {
                Message::MoveUp
            } else {
                Message::MoveDown
            };
            session.update(msg);
            assert!(session.cursor < session.choices.len());
        }
    }

    #[test]
    fn test_cursor_clamps_instead_of_wrapping() {
        let mut session = session_with(make_issues(3));
        session.update(Message::MoveUp);
        assert_eq!(session.cursor, 0);
        for _ in 0..10 {
            session.update(Message::MoveDown);
        }
        assert_eq!(session.cursor, 2);
    }

    #[test]
    fn test_moves_before_fetch_then_fetch_keeps_cursor() {
        let mut session = Session::new();
        session.update(Message::MoveDown);
        session.update(Message::MoveUp);
        session.update(Message::fetched(make_issues(2)));
        assert_eq!(session.cursor, 0);
        assert_eq!(session.current().unwrap().issue.identifier, "ENG-0");
    }
}

// ============================================================================
// Selection
// ============================================================================

mod selection {
    use super::*;

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut session = session_with(make_issues(3));
        session.update(Message::MoveDown);
        session.update(Message::Toggle);
        let before = session.selected.clone();

        session.update(Message::Toggle);
        session.update(Message::Toggle);
        assert_eq!(session.selected, before);

        session.update(Message::Toggle);
        assert!(session.selected.is_empty());
    }

    #[test]
    fn test_multi_select() {
        let mut session = session_with(make_issues(4));
        session.update(Message::Toggle);
        session.update(Message::MoveDown);
        session.update(Message::MoveDown);
        session.update(Message::Toggle);
        assert_eq!(session.selected_indices(), indices(&[0, 2]));

        let picked: Vec<String> = session
            .selected_issues()
            .into_iter()
            .map(|i| i.identifier)
            .collect();
        assert_eq!(picked, vec!["ENG-0", "ENG-2"]);
    }

    #[test]
    fn test_selection_is_keyed_by_issue_id() {
        let mut session = session_with(make_issues(2));
        session.update(Message::Toggle);
        assert!(session.selected.contains("id-0"));

        // More issues arriving later do not shift the selection
        session.update(Message::fetched(vec![Issue::new("late", "ENG-9", "Late")]));
        assert_eq!(session.selected_indices(), indices(&[0]));
    }

    #[test]
    fn test_unknown_selected_id_is_ignored() {
        let mut session = session_with(make_issues(2));
        session.selected.insert("not-in-list".to_string());
        assert!(session.selected_indices().is_empty());
        assert!(session.selected_issues().is_empty());
    }
}

// ============================================================================
// Fetch results
// ============================================================================

mod fetch {
    use super::*;

    #[test]
    fn test_issues_fetched_is_additive_and_ordered() {
        let mut session = session_with(make_issues(2));
        session.update(Message::MoveDown);
        session.update(Message::Toggle);
        let before: Vec<String> = session.choices.iter().map(|c| c.label.clone()).collect();

        let more = vec![
            Issue::new("z", "ENG-99", "Zeta"),
            Issue::new("a", "ENG-10", "Alpha"),
        ];
        session.update(Message::fetched(more));

        let after: Vec<String> = session.choices.iter().map(|c| c.label.clone()).collect();
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(&after[2..], &["Zeta (ENG-99)".to_string(), "Alpha (ENG-10)".to_string()]);
        assert_eq!(session.cursor, 1);
        assert_eq!(session.selected_indices(), indices(&[1]));
    }

    #[test]
    fn test_choice_label_is_title_and_identifier() {
        let session = session_with(sample_issues());
        assert_eq!(session.choices[0].label, "Fix bug (ENG-1)");
        assert_eq!(session.choices[1].label, "Write docs (ENG-2)");
    }

    #[test]
    fn test_failed_fetch_behaves_as_empty_list() {
        let mut session = Session::new();
        session.update(Message::IssuesFetched(FetchOutcome::Failed(
            "network down".to_string(),
        )));
        assert!(session.choices.is_empty());
        assert_eq!(session.fetch, FetchState::Failed("network down".to_string()));

        // UI stays usable
        assert_eq!(session.update(Message::MoveDown), Transition::Continue);
        assert_eq!(session.update(Message::Toggle), Transition::Continue);
        assert_eq!(session.cursor, 0);
    }

    #[test]
    fn test_fetch_outcome_from_result() {
        let ok: anyhow::Result<Vec<Issue>> = Ok(sample_issues());
        assert_eq!(FetchOutcome::from(ok), FetchOutcome::Loaded(sample_issues()));

        let err: anyhow::Result<Vec<Issue>> =
            Err(anyhow::anyhow!("timed out").context("Failed to identify current user"));
        assert_eq!(
            FetchOutcome::from(err),
            FetchOutcome::Failed("Failed to identify current user: timed out".to_string())
        );
    }

    #[test]
    fn test_none_message_changes_nothing() {
        let mut session = session_with(make_issues(3));
        session.update(Message::MoveDown);
        session.update(Message::Toggle);
        let frame = render(&session);

        assert_eq!(session.update(Message::None), Transition::Continue);
        assert_eq!(render(&session), frame);
    }
}
