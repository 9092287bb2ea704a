//! One background request per screen
//!
//! Spawning for a screen aborts whatever that screen had running. Every
//! spawn gets a new generation number and only the latest generation is
//! accepted, so results that were already queued when a screen was left or
//! reloaded are dropped.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use super::events::{AppEvent, TaskOutcome};
use crate::navigation::ScreenKind;

#[derive(Debug, Default)]
pub struct ScreenTasks {
    generations: HashMap<ScreenKind, u64>,
    running: HashMap<ScreenKind, JoinHandle<()>>,
}

impl ScreenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` for `screen`, replacing any request already running there
    pub fn spawn<F>(&mut self, screen: ScreenKind, tx: UnboundedSender<AppEvent>, request: F) -> u64
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        self.cancel(screen);
        let generation = self.generation(screen);

        let handle = tokio::spawn(async move {
            let outcome = request.await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send(AppEvent::Task {
                screen,
                generation,
                outcome,
            });
        });
        self.running.insert(screen, handle);
        generation
    }

    /// Abort the screen's request and invalidate anything it already sent
    pub fn cancel(&mut self, screen: ScreenKind) {
        if let Some(handle) = self.running.remove(&screen) {
            debug!("Aborting request for {:?}", screen);
            handle.abort();
        }
        *self.generations.entry(screen).or_insert(0) += 1;
    }

    pub fn cancel_all(&mut self) {
        let screens: Vec<ScreenKind> = self.running.keys().copied().collect();
        for screen in screens {
            self.cancel(screen);
        }
    }

    /// Current generation for `screen`
    pub fn generation(&self, screen: ScreenKind) -> u64 {
        self.generations.get(&screen).copied().unwrap_or(0)
    }

    /// Whether a finished task's result is still wanted. Accepting it marks
    /// the screen idle.
    pub fn accept(&mut self, screen: ScreenKind, generation: u64) -> bool {
        if self.generation(screen) != generation {
            return false;
        }
        self.running.remove(&screen);
        true
    }

    pub fn is_running(&self, screen: ScreenKind) -> bool {
        self.running.contains_key(&screen)
    }
}
