// src/app.rs
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use crate::editor::{EditorSession, Outcome};
use crate::input;
use crate::render;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    pub session: EditorSession,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: EditorSession) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    /// Runs until the user quits. Events and frames are handled in this one
    /// task, so a frame never sees a half-applied edit.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || read_events(event_tx));

        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.should_quit {
            tokio::select! {
                event = event_rx.recv() => match event {
                    Some(event) => self.handle_event(&event),
                    None => break,
                },
                _ = frames.tick() => self.draw(terminal)?,
            }
        }

        drop(event_rx);
        reader.await??;
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(action) = input::translate(event) else {
            return;
        };

        match self.session.apply(action, Instant::now()) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Saved(path)) => tracing::info!("Saved to {}", path.display()),
            Ok(Outcome::Quit) => self.should_quit = true,
            Err(e) => tracing::warn!("Action failed: {}", e),
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let area = terminal.size()?;
        let regions = render::layout(area, self.session.buffer.line_count());
        self.session.set_text_area(regions.text);
        self.session.tick(Instant::now());

        terminal.draw(|f| render::draw(f, &self.session))?;
        Ok(())
    }
}

/// Forwards terminal events until the receiving side goes away.
fn read_events(tx: mpsc::UnboundedSender<Event>) -> std::io::Result<()> {
    while !tx.is_closed() {
        if event::poll(FRAME_INTERVAL)? && tx.send(event::read()?).is_err() {
            break;
        }
    }
    Ok(())
}
