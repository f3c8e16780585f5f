//! Glue code tying content, the simulation and the terminal UI together.
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use charter_content::{Content, ContentFactory, bundled_data_dir};
use charter_core::{GameEngine, GameState, Snapshot};
use crossterm::event::{self as term_event, Event};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::input::{InputHandler, KeyAction};
use crate::presentation::messages::MessageLevel;
use crate::presentation::{MessageLog, terminal, ui};

const MESSAGE_CAPACITY: usize = 64;

pub struct CliApp {
    config: CliConfig,
    content: Content,
    state: GameState,
    input: InputHandler,
    messages: MessageLog,
}

impl CliApp {
    /// Loads content and generates the world for the configured seed.
    pub fn new(config: CliConfig) -> Result<Self> {
        let data_dir = config.data_dir.clone().unwrap_or_else(bundled_data_dir);
        let content = ContentFactory::new(&data_dir)
            .load_all()
            .with_context(|| format!("loading content from {}", data_dir.display()))?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        let state = GameState::new(&content.config, &content.layout, content.catalog.clone(), seed)
            .context("generating the world")?;
        info!(
            seed,
            world = %hex::encode(state.map().digest()),
            "session started"
        );

        let mut messages = MessageLog::new(MESSAGE_CAPACITY);
        messages.push(
            0.0,
            MessageLevel::Info,
            format!("Seed {seed}. Trade well, and mind the guards."),
        );

        Ok(Self {
            input: InputHandler::new(config.hold),
            config,
            content,
            state,
            messages,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        info!("CLI client starting...");

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let mut ticker = time::interval(self.config.frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        loop {
            ticker.tick().await;
            if self.drain_terminal_events()? {
                break;
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;

            let input = self.input.sample(now);
            let report = GameEngine::new(&mut self.state, &self.content.config).tick(&input, dt);
            let view = Snapshot::capture(&self.state, &self.content.config);
            if !report.is_empty() {
                debug!(events = report.events.len(), "tick produced events");
                self.messages.record(&report, &view);
            }
            ui::render(&mut terminal, &view, &self.content.config.view, &self.messages)?;
        }

        terminal::restore()?;
        info!(
            gold = self.state.player.gold(),
            elapsed = self.state.elapsed,
            "CLI client exiting"
        );
        Ok(())
    }

    /// Feeds every pending terminal event to the input handler. Returns true
    /// when the player asked to quit.
    fn drain_terminal_events(&mut self) -> Result<bool> {
        while term_event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = term_event::read()? {
                if self.input.handle_key(key, Instant::now()) == KeyAction::Quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
