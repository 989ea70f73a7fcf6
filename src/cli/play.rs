//! Terminal player mode
//!
//! Reads one command per line from stdin. Timers and simulated fades are
//! driven from the wall clock: the loop sleeps until the next engine
//! deadline or fade end, whichever comes first.

use std::io::Write;
use std::time::Duration;

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;

use super::PlayConfig;
use super::terminal::TerminalStage;
use crate::content::Story;
use crate::input::{InputController, Trigger};
use crate::logging::INPUT;
use crate::runtime::Engine;
use crate::types::{ElementId, Outcome};

/// Key that ends the session
const QUIT: &str = "q";

/// An engine on a terminal, plus the fades it is waiting on
pub struct PlayerSession<W: Write> {
    engine: Engine<TerminalStage<W>>,
    input: InputController,
    fade_ms: u64,
    /// Simulated fades, with the virtual time they end
    fades: Vec<(u64, ElementId)>,
}

impl<W: Write> PlayerSession<W> {
    pub fn new(story: Story, config: PlayConfig, out: W) -> Self {
        let fade_ms = config.engine.fade_ms;
        Self {
            engine: Engine::new(story, config.engine, TerminalStage::new(out)),
            input: InputController::new(config.keys),
            fade_ms,
            fades: Vec::new(),
        }
    }

    pub fn engine(&self) -> &Engine<TerminalStage<W>> {
        &self.engine
    }

    /// Next virtual time something is due, if anything is
    pub fn next_wake(&self) -> Option<u64> {
        let fade = self.fades.iter().map(|(due, _)| *due).min();
        match (self.engine.next_deadline(), fade) {
            (Some(timer), Some(fade)) => Some(timer.min(fade)),
            (timer, fade) => timer.or(fade),
        }
    }

    /// Handle one line typed by the reader at virtual time `now_ms`
    pub fn handle_line(&mut self, line: &str, now_ms: u64) -> anyhow::Result<Outcome> {
        self.tick(now_ms)?;
        let trigger = parse_line(line);
        let Some(command) = self.input.trigger(trigger) else {
            return Ok(Outcome::Ignored);
        };
        let outcome = self.engine.apply(command)?;
        debug!(target: INPUT, "command {outcome:?}");
        self.collect_fades();
        self.surface_failure()?;
        Ok(outcome)
    }

    /// Fire timers and finish fades in time order up to `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> anyhow::Result<()> {
        loop {
            let timer = self.engine.next_deadline().filter(|due| *due <= now_ms);
            let fade = self
                .fades
                .iter()
                .map(|(due, _)| *due)
                .min()
                .filter(|due| *due <= now_ms);
            match (timer, fade) {
                (Some(timer), fade) if fade.is_none_or(|fade| timer <= fade) => {
                    self.engine.tick_to(timer)?;
                    self.collect_fades();
                }
                (_, Some(fade)) => {
                    self.engine.tick_to(fade)?;
                    self.finish_fades(fade)?;
                }
                _ => break,
            }
        }
        self.engine.tick_to(now_ms)?;
        self.surface_failure()
    }

    fn collect_fades(&mut self) {
        let due = self.engine.now_ms() + self.fade_ms;
        let started = self.engine.stage_mut().take_started();
        self.fades.extend(started.into_iter().map(|element| (due, element)));
    }

    fn finish_fades(&mut self, until_ms: u64) -> anyhow::Result<()> {
        let (done, pending): (Vec<_>, Vec<_>) =
            self.fades.drain(..).partition(|(due, _)| *due <= until_ms);
        self.fades = pending;
        for (_, element) in done {
            self.engine.stage_mut().finish_fade(&element);
            self.engine.animation_finished(element)?;
            self.collect_fades();
        }
        Ok(())
    }

    fn surface_failure(&mut self) -> anyhow::Result<()> {
        match self.engine.stage_mut().take_failure() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Turn a typed line into a trigger
///
/// An empty line is Enter, `s <progress>` scrolls, anything else is a key.
pub fn parse_line(line: &str) -> Trigger {
    let line = line.trim();
    if line.is_empty() {
        return Trigger::Key("Enter".to_string());
    }
    if let Some(progress) = line
        .strip_prefix("s ")
        .and_then(|rest| rest.trim().parse::<f64>().ok())
    {
        return Trigger::Scroll(progress);
    }
    Trigger::Key(line.to_string())
}

fn print_controls() {
    println!("=== hereafter ===");
    println!();
    println!("Controls:");
    println!("  b:        begin");
    println!("  Enter:    continue");
    println!("  1 / 2:    ask a question");
    println!("  s <0..1>: scroll");
    println!("  d / a:    debug step forward / back");
    println!("  r:        restart");
    println!("  q:        quit");
    println!();
}

/// Drive a session from `reader` until it closes or the reader quits
pub async fn run<R, W>(mut session: PlayerSession<W>, reader: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let origin = Instant::now();
    let elapsed = || origin.elapsed().as_millis() as u64;
    let mut lines = reader.lines();

    loop {
        let wake = session.next_wake();
        let sleep_ms = wake.map_or(0, |due| due.saturating_sub(elapsed()));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim() == QUIT {
                    break;
                }
                session.handle_line(&line, elapsed())?;
            }
            _ = tokio::time::sleep(Duration::from_millis(sleep_ms)), if wake.is_some() => {
                session.tick(elapsed())?;
            }
        }
    }
    info!(target: INPUT, "player closed at {}ms", elapsed());
    Ok(())
}

/// Run the player on stdin and stdout
pub async fn run_play(story: Story, config: PlayConfig) -> anyhow::Result<()> {
    print_controls();
    let session = PlayerSession::new(story, config, std::io::stdout());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(session, stdin).await
}
