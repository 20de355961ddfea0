use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A stored high score. Numbers are kept exactly as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub score: Number,
    pub level: Number,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewScore {
    pub name: String,
    pub score: Number,
    pub level: Number,
}

impl NewScore {
    pub fn from_run(name: &str, moves: u32, level_idx: usize) -> Self {
        NewScore {
            name: name.to_string(),
            score: Number::from(moves),
            level: Number::from(level_idx as u64),
        }
    }

    pub fn into_record(self, id: String) -> ScoreRecord {
        ScoreRecord {
            id,
            name: self.name,
            score: self.score,
            level: self.level,
        }
    }
}

impl ScoreRecord {
    pub fn is_for_level(&self, level: i64) -> bool {
        self.level.as_f64() == Some(level as f64)
    }

    pub fn score_value(&self) -> f64 {
        self.score.as_f64().unwrap_or(f64::INFINITY)
    }
}

/// Fewest moves first. Ties keep their stored order.
pub fn sort_scores(scores: &mut [ScoreRecord]) {
    scores.sort_by(|a, b| a.score_value().total_cmp(&b.score_value()));
}
