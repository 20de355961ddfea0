use serde_json::{Map, Value};

use crate::scores::models::NewScore;

const ALLOWED_KEYS: [&str; 3] = ["name", "score", "level"];
pub const MAX_NAME_LENGTH: usize = 100;

/// Length of a name in UTF-16 units, as browsers count it.
pub fn name_length(name: &str) -> usize {
    name.encode_utf16().count()
}

/// Rejections of a submitted score. The message is the plain-text response body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScorePayloadError {
    #[error("Invalid payload")]
    NotAnObject,
    #[error("Found unknown keys!")]
    UnknownKeys,
    #[error("Invalid name")]
    InvalidName,
    #[error("Invalid score")]
    InvalidScore,
    #[error("Invalid level")]
    InvalidLevel,
}

/// Parses a raw request body. An empty body counts as an empty object.
pub fn parse_score_body(body: &[u8]) -> Result<NewScore, ScorePayloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return validate_score(&Value::Object(Map::new()));
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| ScorePayloadError::NotAnObject)?;
    validate_score(&value)
}

pub fn validate_score(value: &Value) -> Result<NewScore, ScorePayloadError> {
    let Value::Object(fields) = value else {
        return Err(ScorePayloadError::NotAnObject);
    };
    if fields.keys().any(|key| !ALLOWED_KEYS.contains(&key.as_str())) {
        return Err(ScorePayloadError::UnknownKeys);
    }

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() && name_length(name) <= MAX_NAME_LENGTH => name,
        _ => return Err(ScorePayloadError::InvalidName),
    };
    let score = match fields.get("score") {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v >= 1.0) => n,
        _ => return Err(ScorePayloadError::InvalidScore),
    };
    let level = match fields.get("level") {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v >= 0.0) => n,
        _ => return Err(ScorePayloadError::InvalidLevel),
    };

    Ok(NewScore {
        name: name.clone(),
        score: score.clone(),
        level: level.clone(),
    })
}

/// Leading-integer parse of a path segment: `"3abc"` is 3, `"abc"` is `None`.
pub fn parse_level_param(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_a_well_formed_score() {
        let score = validate_score(&json!({"name": "ada", "score": 12, "level": 0})).unwrap();
        assert_eq!(score.name, "ada");
        assert_eq!(score.score.as_u64(), Some(12));
        assert_eq!(score.level.as_u64(), Some(0));
    }

    #[test]
    fn unknown_keys_are_checked_first() {
        let err = validate_score(&json!({"name": "", "score": 0, "level": -1, "foo": 1})).unwrap_err();
        assert_eq!(err, ScorePayloadError::UnknownKeys);
    }

    #[test]
    fn name_must_be_a_short_non_empty_string() {
        for name in [json!(""), json!(7), json!("x".repeat(101)), Value::Null] {
            let err = validate_score(&json!({"name": name, "score": 3, "level": 0})).unwrap_err();
            assert_eq!(err, ScorePayloadError::InvalidName);
        }
        assert!(validate_score(&json!({"name": "x".repeat(100), "score": 3, "level": 0})).is_ok());
    }

    #[test]
    fn name_length_counts_utf16_units() {
        assert_eq!(name_length("ada"), 3);
        assert_eq!(name_length("😀"), 2);
        let name = "😀".repeat(51);
        let err = validate_score(&json!({"name": name, "score": 3, "level": 0})).unwrap_err();
        assert_eq!(err, ScorePayloadError::InvalidName);
        assert!(validate_score(&json!({"name": "😀".repeat(50), "score": 3, "level": 0})).is_ok());
    }

    #[test]
    fn score_and_level_have_lower_bounds() {
        let err = validate_score(&json!({"name": "a", "score": 0.5, "level": 0})).unwrap_err();
        assert_eq!(err, ScorePayloadError::InvalidScore);
        let err = validate_score(&json!({"name": "a", "score": "12", "level": 0})).unwrap_err();
        assert_eq!(err, ScorePayloadError::InvalidScore);
        let err = validate_score(&json!({"name": "a", "score": 1, "level": -1})).unwrap_err();
        assert_eq!(err, ScorePayloadError::InvalidLevel);
        let err = validate_score(&json!({"name": "a", "score": 1})).unwrap_err();
        assert_eq!(err, ScorePayloadError::InvalidLevel);
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        assert_eq!(parse_score_body(b""), Err(ScorePayloadError::InvalidName));
        assert_eq!(parse_score_body(b"[1]"), Err(ScorePayloadError::NotAnObject));
        assert_eq!(parse_score_body(b"{oops"), Err(ScorePayloadError::NotAnObject));
    }

    #[test]
    fn level_param_uses_the_leading_integer() {
        assert_eq!(parse_level_param("3"), Some(3));
        assert_eq!(parse_level_param("12abc"), Some(12));
        assert_eq!(parse_level_param(" -2"), Some(-2));
        assert_eq!(parse_level_param("abc"), None);
        assert_eq!(parse_level_param(""), None);
    }
}
