#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::app::App;
    use crate::console_interface::ConsoleInput;
    use crate::core::{Direction, LevelCatalog, PROGRESS_KEY, TRANSITION_TIME};
    use crate::progress::Progress;
    use crate::projection::ProjectionMode;
    use crate::scores::{
        name_length, sort_scores, validate_score, ClientError, NewScore, ScoreApi, ScoreBoard, ScoreRecord,
        MAX_NAME_LENGTH,
    };
    use serde_json::json;
    use crate::storage::LocalStorage;

    const LEVELS: &str = "#@$.#\n\n#@-$.#\n\n#-@$-.#";

    #[derive(Default)]
    struct FakeApi {
        stored: Mutex<Vec<ScoreRecord>>,
        offline: bool,
    }

    impl ScoreApi for FakeApi {
        fn fetch_level(&self, level: usize) -> Result<Vec<ScoreRecord>, ClientError> {
            if self.offline {
                return Err(ClientError::Rejected { status: 503, body: "offline".into() });
            }
            let mut scores: Vec<ScoreRecord> = self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.is_for_level(level as i64))
                .cloned()
                .collect();
            sort_scores(&mut scores);
            Ok(scores)
        }

        fn submit(&self, score: &NewScore) -> Result<ScoreRecord, ClientError> {
            if self.offline {
                return Err(ClientError::Rejected { status: 503, body: "offline".into() });
            }
            let mut stored = self.stored.lock().unwrap();
            let record = score.clone().into_record(format!("score-{}", stored.len() + 1));
            stored.push(record.clone());
            Ok(record)
        }
    }

    fn app_with(api: Arc<FakeApi>, progress: &str) -> App {
        let mut storage = LocalStorage::in_memory();
        storage.set_item(PROGRESS_KEY, progress).unwrap();
        App::new(
            LevelCatalog::parse(LEVELS),
            Progress::load(storage),
            ScoreBoard::new(api),
            ProjectionMode::Flat,
        )
        .unwrap()
    }

    /// Ticks until `done` holds or a couple of seconds pass.
    fn settle(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
        for _ in 0..200 {
            app.tick(Instant::now());
            if done(app) {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    fn later(start: Instant, step: u64) -> Instant {
        start + Duration::from_millis(400 * step)
    }

    #[test]
    fn starts_on_the_furthest_unlocked_level() {
        let app = app_with(Arc::new(FakeApi::default()), "1");
        assert_eq!(app.session().level_idx(), 1);
        let app = app_with(Arc::new(FakeApi::default()), "99");
        assert_eq!(app.session().level_idx(), 2);
    }

    #[test]
    fn winning_unlocks_the_next_level() {
        let mut app = app_with(Arc::new(FakeApi::default()), "0");
        app.select_level(1);
        assert_eq!(app.session().level_idx(), 0);
        assert_eq!(app.status(), Some("Level 2 is locked"));

        app.move_player(Direction::Right, Instant::now());
        assert!(app.session().is_won());
        assert_eq!(app.progress().unlocked(), 1);

        app.select_level(1);
        assert_eq!(app.session().level_idx(), 1);
        assert_eq!(app.session().moves(), 0);
    }

    #[test]
    fn replaying_an_old_level_keeps_progress() {
        let mut app = app_with(Arc::new(FakeApi::default()), "2");
        app.select_level(0);
        app.move_player(Direction::Right, Instant::now());
        assert!(app.session().is_won());
        assert_eq!(app.progress().unlocked(), 2);
    }

    #[test]
    fn inputs_inside_the_debounce_window_are_dropped() {
        let mut app = app_with(Arc::new(FakeApi::default()), "1");
        let start = Instant::now();
        app.move_player(Direction::Right, start);
        app.move_player(Direction::Right, start + Duration::from_millis(100));
        assert_eq!(app.session().moves(), 1);
        app.move_player(Direction::Right, later(start, 1));
        assert_eq!(app.session().moves(), 2);
        assert!(app.session().is_won());
    }

    #[test]
    fn reset_starts_over_from_the_original_level() {
        let mut app = app_with(Arc::new(FakeApi::default()), "1");
        let start = Instant::now();
        app.move_player(Direction::Right, start);
        app.move_player(Direction::Right, later(start, 1));
        assert!(app.session().is_won());

        app.handle(ConsoleInput::Reset, later(start, 2));
        assert!(!app.session().is_won());
        assert_eq!(app.session().moves(), 0);
        assert_eq!(app.session().boxes(), app.session().level().boxes.as_slice());
    }

    #[test]
    fn mode_cycles_without_touching_the_session() {
        let mut app = app_with(Arc::new(FakeApi::default()), "0");
        let before = app.session().state().clone();
        app.handle(ConsoleInput::CycleMode, Instant::now());
        assert_eq!(app.view().mode(), ProjectionMode::Inclined);
        app.handle(ConsoleInput::CycleMode, Instant::now());
        assert_eq!(app.view().mode(), ProjectionMode::Isometric);
        assert_eq!(app.session().state(), &before);
    }

    #[test]
    fn deferred_stacking_lands_after_the_transition() {
        let mut app = app_with(Arc::new(FakeApi::default()), "2");
        app.set_mode(ProjectionMode::Isometric);
        let start = Instant::now();
        app.move_player(Direction::Left, start);
        assert!(app.view().has_pending_transitions());
        app.tick(start + TRANSITION_TIME / 2);
        assert!(app.view().has_pending_transitions());
        app.tick(start + TRANSITION_TIME);
        assert!(!app.view().has_pending_transitions());
    }

    #[test]
    fn score_is_submitted_once_per_session() {
        let api = Arc::new(FakeApi::default());
        let mut app = app_with(Arc::clone(&api), "0");
        assert!(!app.can_submit());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        assert!(!app.is_typing());

        app.move_player(Direction::Right, Instant::now());
        assert!(app.can_submit());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        for c in " ada ".chars() {
            app.handle(ConsoleInput::Text(c), Instant::now());
        }
        app.handle(ConsoleInput::Confirm, Instant::now());
        assert!(!app.is_typing());
        assert!(!app.can_submit());

        assert!(settle(&mut app, |app| app.scores().iter().any(|s| s.name == "ada")));
        assert_eq!(app.status(), Some("Score submitted"));
        let stored = api.stored.lock().unwrap().clone();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].score.as_u64(), Some(1));
        assert_eq!(stored[0].level.as_u64(), Some(0));
        drop(stored);

        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        assert!(!app.is_typing());
    }

    #[test]
    fn name_entry_stops_at_the_server_length_limit() {
        let api = Arc::new(FakeApi::default());
        let mut app = app_with(Arc::clone(&api), "0");
        app.move_player(Direction::Right, Instant::now());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        for _ in 0..MAX_NAME_LENGTH {
            app.handle(ConsoleInput::Text('😀'), Instant::now());
        }
        let typed = app.render_state().name_input.unwrap().to_string();
        assert_eq!(typed.chars().count(), MAX_NAME_LENGTH / 2);
        assert_eq!(name_length(&typed), MAX_NAME_LENGTH);

        app.handle(ConsoleInput::Text('a'), Instant::now());
        assert_eq!(app.render_state().name_input, Some(typed.as_str()));

        app.handle(ConsoleInput::Confirm, Instant::now());
        assert!(settle(&mut app, |app| app.status() == Some("Score submitted")));
        let stored = api.stored.lock().unwrap().clone();
        assert_eq!(stored.len(), 1);
        assert!(validate_score(&json!({"name": stored[0].name.clone(), "score": 1, "level": 0})).is_ok());
    }

    #[test]
    fn blank_name_is_not_sent() {
        let api = Arc::new(FakeApi::default());
        let mut app = app_with(Arc::clone(&api), "0");
        app.move_player(Direction::Right, Instant::now());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        app.handle(ConsoleInput::Text(' '), Instant::now());
        app.handle(ConsoleInput::Confirm, Instant::now());
        assert!(app.is_typing());
        assert!(app.can_submit());
        assert!(api.stored.lock().unwrap().is_empty());

        app.handle(ConsoleInput::Cancel, Instant::now());
        assert!(!app.is_typing());
        assert!(app.can_submit());
    }

    #[test]
    fn score_board_shows_only_the_current_level_sorted() {
        let api = Arc::new(FakeApi::default());
        for (name, moves, level) in [("slow", 30, 1), ("fast", 12, 1), ("other", 5, 0)] {
            api.submit(&NewScore::from_run(name, moves, level)).unwrap();
        }
        let mut app = app_with(Arc::clone(&api), "1");
        assert!(settle(&mut app, |app| app.scores().len() == 2));
        let names: Vec<&str> = app.scores().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["fast", "slow"]);
    }

    #[test]
    fn network_failures_do_not_disturb_play() {
        let api = Arc::new(FakeApi { offline: true, ..FakeApi::default() });
        let mut app = app_with(api, "0");
        app.move_player(Direction::Right, Instant::now());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        app.handle(ConsoleInput::Text('x'), Instant::now());
        app.handle(ConsoleInput::Confirm, Instant::now());
        thread::sleep(Duration::from_millis(50));
        app.tick(Instant::now());
        assert!(app.session().is_won());
        assert_eq!(app.session().moves(), 1);
        assert!(app.scores().is_empty());
    }

    #[test]
    fn typing_does_not_move_the_player() {
        let mut app = app_with(Arc::new(FakeApi::default()), "0");
        app.move_player(Direction::Right, Instant::now());
        app.handle(ConsoleInput::BeginNameEntry, Instant::now());
        assert!(app.handle(ConsoleInput::Text('q'), Instant::now()));
        assert_eq!(app.render_state().name_input, Some("q"));
        app.handle(ConsoleInput::Backspace, Instant::now());
        assert_eq!(app.render_state().name_input, Some(""));
        assert!(!app.handle(ConsoleInput::Quit, Instant::now()));
    }
}
