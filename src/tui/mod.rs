pub mod app;
pub mod input;
mod message;
pub mod ui;

use crate::data::Issue;
use crate::integrations::{self, IssueSource};
use crate::util::send_or_log;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

pub use app::{Choice, FetchState, Session, Transition};
pub use message::{Command, FetchOutcome, Message};

/// How often the input thread wakes up to check whether it should stop.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

const EVENT_QUEUE_CAPACITY: usize = 64;

/// Everything the event loop can receive, from any producer.
#[derive(Debug)]
pub enum LoopEvent {
    Input(Event),
    Fetched(FetchOutcome),
    InputFailed(io::Error),
}

/// What the user walked away with.
#[derive(Debug, Clone, Default)]
pub struct PickOutcome {
    pub selected: Vec<Issue>,
    pub fetch_error: Option<String>,
}

pub async fn run(source: Arc<dyn IssueSource>) -> Result<PickOutcome> {
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("lin requires an interactive terminal (try `lin table`)");
    }

    let guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let stop = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(tx.clone(), Arc::clone(&stop));

    let (mut session, command) = Session::init();
    perform(command, &source, &tx);
    drop(tx);

    let result = event_loop(&mut terminal, &mut session, rx).await;
    stop.store(true, Ordering::Relaxed);

    drop(guard);

    if input.join().is_err() {
        tracing::warn!("Input thread panicked");
    }

    result?;
    Ok(PickOutcome {
        selected: session.selected_issues(),
        fetch_error: session.fetch_error().map(str::to_string),
    })
}

/// Raw mode plus the alternate screen, undone on drop.
///
/// Dropping restores the terminal on every exit path, unwinding included.
/// Each restore step runs even when an earlier one fails.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on, a failure leaves through Drop
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let steps = [
            ("disable raw mode", disable_raw_mode()),
            ("leave alternate screen", execute!(self.out, LeaveAlternateScreen)),
            ("show cursor", execute!(self.out, cursor::Show)),
        ];
        for (step, result) in steps {
            if let Err(e) = result {
                tracing::warn!("Failed to {} while restoring terminal: {}", step, e);
            }
        }
    }
}

/// Carry out a command requested by the session.
pub fn perform(command: Command, source: &Arc<dyn IssueSource>, tx: &mpsc::Sender<LoopEvent>) {
    match command {
        Command::FetchIssues => {
            let source = Arc::clone(source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = FetchOutcome::from(integrations::fetch_my_issues(source.as_ref()).await);
                if let FetchOutcome::Failed(reason) = &outcome {
                    tracing::debug!("Issue fetch failed: {}", reason);
                }
                send_or_log(&tx, LoopEvent::Fetched(outcome), "fetch result").await;
            });
        }
    }
}

/// Read terminal events on a dedicated thread and forward them to the loop.
fn spawn_input_thread(tx: mpsc::Sender<LoopEvent>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let next = match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => event::read().map(LoopEvent::Input),
                Err(e) => Err(e),
            };
            let failed = next.is_err();
            let event = next.unwrap_or_else(LoopEvent::InputFailed);
            if tx.blocking_send(event).is_err() || failed {
                break;
            }
        }
    })
}

/// Draw, wait for the next event, apply it; until the session asks to quit.
///
/// Every event is applied to completion before the next one is read.
pub async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    mut rx: mpsc::Receiver<LoopEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, session))?;

        let msg = match rx.recv().await {
            Some(LoopEvent::Input(event)) => input::message_for_event(&event),
            Some(LoopEvent::Fetched(outcome)) => Message::IssuesFetched(outcome),
            Some(LoopEvent::InputFailed(e)) => {
                return Err(e).context("Failed to read terminal input");
            }
            None => anyhow::bail!("Event channel closed unexpectedly"),
        };

        if session.update(msg) == Transition::Quit {
            return Ok(());
        }
    }
}
