use std::time::Duration;

/// Minimum gap between two accepted movement inputs.
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a sprite takes to slide to its new tile.
pub const TRANSITION_TIME: Duration = Duration::from_millis(150);

pub const PROGRESS_KEY: &str = "progress";
