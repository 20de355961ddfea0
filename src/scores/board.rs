use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::scores::client::ScoreApi;
use crate::scores::models::{NewScore, ScoreRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum ScoreEvent {
    Loaded { level: usize, scores: Vec<ScoreRecord> },
    Submitted { level: usize, record: ScoreRecord },
    Failed { level: usize, error: String },
}

/// Runs score requests off the game loop. Results come back through
/// [`ScoreBoard::poll`]; a failed request is logged and otherwise ignored.
pub struct ScoreBoard {
    api: Arc<dyn ScoreApi>,
    tx: Sender<ScoreEvent>,
    rx: Receiver<ScoreEvent>,
}

impl ScoreBoard {
    pub fn new(api: Arc<dyn ScoreApi>) -> Self {
        let (tx, rx) = channel();
        ScoreBoard { api, tx, rx }
    }

    pub fn request_level(&self, level: usize) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(fetch(api.as_ref(), level));
        });
    }

    /// Posts the score, then reloads that level's board.
    pub fn submit(&self, score: NewScore, level: usize) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || match api.submit(&score) {
            Ok(record) => {
                debug!(id = %record.id, "score submitted");
                let _ = tx.send(ScoreEvent::Submitted { level, record });
                let _ = tx.send(fetch(api.as_ref(), level));
            }
            Err(err) => {
                warn!(%err, level, "score submission failed");
                let _ = tx.send(ScoreEvent::Failed { level, error: err.to_string() });
            }
        });
    }

    pub fn poll(&self) -> Vec<ScoreEvent> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    fn wait(&self) -> Option<ScoreEvent> {
        self.rx.recv().ok()
    }
}

fn fetch(api: &dyn ScoreApi, level: usize) -> ScoreEvent {
    match api.fetch_level(level) {
        Ok(scores) => ScoreEvent::Loaded { level, scores },
        Err(err) => {
            warn!(%err, level, "failed to load scores");
            ScoreEvent::Failed { level, error: err.to_string() }
        }
    }
}
