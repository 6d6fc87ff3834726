use super::message::{Command, FetchOutcome, Message};
use crate::data::Issue;
use std::collections::{BTreeSet, HashSet};

/// One display line of the picker, projected from an [`Issue`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub issue: Issue,
    pub label: String,
}

impl Choice {
    pub fn from_issue(issue: Issue) -> Self {
        let title: String = issue
            .title
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let label = format!("{} ({})", title, issue.identifier);
        Self { issue, label }
    }

    pub fn issue_id(&self) -> &str {
        &self.issue.id
    }
}

/// Progress of the single issue fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// What the event loop should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// The picker's state. Only [`Session::update`] mutates it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub choices: Vec<Choice>,
    /// Index into `choices`; meaningless while `choices` is empty
    pub cursor: usize,
    /// Selected issues, keyed by issue id so the set survives reordering
    pub selected: HashSet<String>,
    pub fetch: FetchState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session plus the one command it needs run at startup.
    pub fn init() -> (Self, Command) {
        (Self::new(), Command::FetchIssues)
    }

    /// Process a message and update state (Elm Architecture update function).
    ///
    /// Total over all messages: unknown input is a no-op, never an error.
    pub fn update(&mut self, msg: Message) -> Transition {
        match msg {
            Message::IssuesFetched(outcome) => self.apply_fetch(outcome),
            Message::MoveUp => self.move_up(),
            Message::MoveDown => self.move_down(),
            Message::Toggle => self.toggle_current(),
            Message::Quit => return Transition::Quit,
            Message::None => {}
        }
        Transition::Continue
    }

    fn apply_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(issues) => {
                self.choices.extend(issues.into_iter().map(Choice::from_issue));
                self.fetch = FetchState::Loaded;
            }
            FetchOutcome::Failed(reason) => {
                self.fetch = FetchState::Failed(reason);
            }
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.choices.len() - 1);
    }

    fn toggle_current(&mut self) {
        let Some(id) = self.current().map(|c| c.issue_id().to_string()) else {
            return;
        };
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// The choice under the cursor, if the list is non-empty.
    pub fn current(&self) -> Option<&Choice> {
        self.choices.get(self.cursor)
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.choices
            .get(idx)
            .is_some_and(|c| self.selected.contains(c.issue_id()))
    }

    /// Selection translated to display indices.
    pub fn selected_indices(&self) -> BTreeSet<usize> {
        (0..self.choices.len()).filter(|&i| self.is_selected(i)).collect()
    }

    /// Selected issues in display order.
    pub fn selected_issues(&self) -> Vec<Issue> {
        self.choices
            .iter()
            .filter(|c| self.selected.contains(c.issue_id()))
            .map(|c| c.issue.clone())
            .collect()
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.fetch {
            FetchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
