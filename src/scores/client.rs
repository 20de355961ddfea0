use std::time::Duration;

use reqwest::blocking::Client;

use crate::scores::models::{sort_scores, NewScore, ScoreRecord};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Remote side of the score board.
pub trait ScoreApi: Send + Sync {
    /// Scores for one level, fewest moves first.
    fn fetch_level(&self, level: usize) -> Result<Vec<ScoreRecord>, ClientError>;
    fn submit(&self, score: &NewScore) -> Result<ScoreRecord, ClientError>;
}

pub struct ScoreClient {
    http: Client,
    base_url: String,
}

impl ScoreClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(ScoreClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::Rejected { status: status.as_u16(), body })
}

impl ScoreApi for ScoreClient {
    fn fetch_level(&self, level: usize) -> Result<Vec<ScoreRecord>, ClientError> {
        let url = format!("{}/api/scores/{}", self.base_url, level);
        let response = check(self.http.get(url).send()?)?;
        let mut scores: Vec<ScoreRecord> = response.json()?;
        sort_scores(&mut scores);
        Ok(scores)
    }

    fn submit(&self, score: &NewScore) -> Result<ScoreRecord, ClientError> {
        let url = format!("{}/api/scores", self.base_url);
        let response = check(self.http.post(url).json(score).send()?)?;
        Ok(response.json()?)
    }
}
