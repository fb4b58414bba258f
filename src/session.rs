use crate::dataset::DatasetError;
use crate::logger;
use crate::models::{
    AppState, CountryRecord, MAX_QUESTIONS, MIN_QUESTIONS, QuestionId, Settings, TimerEvent,
};
use crate::quiz::{Effect, QuizSession};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;

const MAX_COUNT_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    Questions,
    TimeLimit,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub dataset: Vec<CountryRecord>,
    pub dataset_label: String,
    pub quiz: QuizSession,
    pub settings: Settings,
    pub focused_field: MenuField,
    pub count_input: String,
    /// Set once the count field has been typed into; the first digit after
    /// focus or an adjustment replaces the value.
    count_dirty: bool,
    pub selected_option: usize,
    pub message: Option<String>,
    pub should_quit: bool,
    last_question: Option<QuestionId>,
    rng: StdRng,
}

impl App {
    pub fn new(dataset_label: impl Into<String>) -> Self {
        Self::with_rng(dataset_label, StdRng::from_entropy())
    }

    pub fn with_rng(dataset_label: impl Into<String>, rng: StdRng) -> Self {
        let settings = Settings::default();
        Self {
            state: AppState::Loading,
            dataset: Vec::new(),
            dataset_label: dataset_label.into(),
            quiz: QuizSession::new(settings),
            settings,
            focused_field: MenuField::Questions,
            count_input: settings.total_questions.to_string(),
            count_dirty: false,
            selected_option: 0,
            message: None,
            should_quit: false,
            last_question: None,
            rng,
        }
    }

    /// Moves the screen along with the quiz phase and resets the option cursor
    /// whenever a new question shows up.
    fn sync_with_quiz(&mut self) {
        let current = self.quiz.current_question().map(|q| q.id);
        if current != self.last_question {
            self.selected_option = 0;
            self.last_question = current;
        }

        if self.quiz.is_finished()
            && matches!(self.state, AppState::Quiz | AppState::QuizQuitConfirm)
        {
            self.state = AppState::Summary;
        }
    }

    fn restart(&mut self) -> Vec<Effect> {
        let effects = self.quiz.restart();
        self.sync_with_quiz();
        self.state = AppState::Menu;
        effects
    }
}

pub fn apply_dataset(app: &mut App, result: Result<Vec<CountryRecord>, DatasetError>) {
    match result {
        Ok(records) => {
            app.dataset = records;
            app.message = None;
            app.state = AppState::Menu;
        }
        Err(e) => {
            logger::log(&format!("Dataset load failed: {}", e));
            app.dataset.clear();
            app.state = AppState::LoadError(e.to_string());
        }
    }
}

pub fn handle_timer_event(app: &mut App, event: TimerEvent) -> Vec<Effect> {
    let effects = match event {
        TimerEvent::Tick(id) => app.quiz.tick(id),
        TimerEvent::RevealElapsed(id) => app.quiz.reveal_elapsed(id, &app.dataset, &mut app.rng),
    };
    app.sync_with_quiz();
    effects
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return app.quiz.restart();
    }

    match app.state {
        AppState::Loading => {
            if key.code == KeyCode::Esc {
                app.should_quit = true;
            }
            Vec::new()
        }
        AppState::LoadError(_) => {
            handle_load_error_input(app, key);
            Vec::new()
        }
        AppState::Menu => handle_menu_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::QuizQuitConfirm => handle_quit_confirm_input(app, key),
        AppState::Summary => handle_summary_input(app, key),
    }
}

fn handle_load_error_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            logger::log("Retrying dataset load");
            app.state = AppState::Loading;
        }
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

pub fn handle_menu_input(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            app.count_dirty = false;
            app.focused_field = match app.focused_field {
                MenuField::Questions => MenuField::TimeLimit,
                MenuField::TimeLimit => MenuField::Questions,
            };
        }
        KeyCode::Left => adjust_setting(app, false),
        KeyCode::Right => adjust_setting(app, true),
        KeyCode::Char(c) if c.is_ascii_digit() && app.focused_field == MenuField::Questions => {
            if !app.count_dirty || app.count_input == "0" {
                app.count_input.clear();
                app.count_dirty = true;
            }
            if app.count_input.len() < MAX_COUNT_DIGITS {
                app.count_input.push(c);
            }
        }
        KeyCode::Backspace if app.focused_field == MenuField::Questions => {
            app.count_dirty = true;
            app.count_input.pop();
        }
        KeyCode::Enter => return start_quiz(app),
        _ => {}
    }
    Vec::new()
}

fn adjust_setting(app: &mut App, up: bool) {
    app.count_dirty = false;
    match app.focused_field {
        MenuField::Questions => {
            let current = parse_count(&app.count_input);
            let next = if up {
                current.saturating_add(1)
            } else {
                current.saturating_sub(1)
            };
            app.settings.set_total_questions(next);
            app.count_input = app.settings.total_questions.to_string();
        }
        MenuField::TimeLimit => {
            if up {
                app.settings.next_time_limit();
            } else {
                app.settings.previous_time_limit();
            }
        }
    }
}

/// Anything unparsable counts as the minimum; the result is always in range.
fn parse_count(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .unwrap_or(MIN_QUESTIONS)
        .clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}

fn start_quiz(app: &mut App) -> Vec<Effect> {
    app.settings.set_total_questions(parse_count(&app.count_input));
    app.count_input = app.settings.total_questions.to_string();
    app.count_dirty = false;
    app.quiz.settings = app.settings;

    match app.quiz.start(&app.dataset, &mut app.rng) {
        Ok(effects) => {
            app.message = None;
            app.state = AppState::Quiz;
            app.sync_with_quiz();
            effects
        }
        Err(e) => {
            logger::log(&format!("Cannot start quiz: {}", e));
            app.message = Some(e.to_string());
            Vec::new()
        }
    }
}

pub fn handle_quiz_input(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.code == KeyCode::Esc {
        app.state = AppState::QuizQuitConfirm;
        return Vec::new();
    }

    // Options are locked while the correct answer is on screen.
    if app.quiz.showing_correct_answer() {
        return Vec::new();
    }
    let choice_count = app
        .quiz
        .current_question()
        .map(|q| q.options.choices.len())
        .unwrap_or(0);
    if choice_count == 0 {
        return Vec::new();
    }

    let effects = match key.code {
        KeyCode::Up => {
            app.selected_option = app.selected_option.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Down => {
            if app.selected_option < choice_count - 1 {
                app.selected_option += 1;
            }
            Vec::new()
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let index = (c as usize).wrapping_sub('1' as usize);
            if index < choice_count {
                app.selected_option = index;
                app.quiz.answer_index(index, &app.dataset, &mut app.rng)
            } else {
                Vec::new()
            }
        }
        KeyCode::Enter => app
            .quiz
            .answer_index(app.selected_option, &app.dataset, &mut app.rng),
        _ => Vec::new(),
    };

    app.sync_with_quiz();
    effects
}

pub fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            logger::log("Quiz abandoned, returning to menu");
            app.restart()
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = AppState::Quiz;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub fn handle_summary_input(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => app.restart(),
        KeyCode::Esc | KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::tests::sample_dataset;
    use crate::quiz::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn loaded_app() -> App {
        let mut app = App::with_rng("test", StdRng::seed_from_u64(42));
        apply_dataset(&mut app, Ok(sample_dataset()));
        app
    }

    fn correct_index(app: &App) -> usize {
        app.quiz
            .current_question()
            .unwrap()
            .options
            .correct_index()
            .unwrap()
    }

    fn set_count(app: &mut App, count: &str) {
        for _ in 0..MAX_COUNT_DIGITS {
            handle_key(app, key(KeyCode::Backspace));
        }
        for c in count.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_dataset_loaded_moves_to_menu() {
        let app = loaded_app();
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.dataset.len(), sample_dataset().len());
    }

    #[test]
    fn test_dataset_error_is_its_own_state() {
        let mut app = App::with_rng("test", StdRng::seed_from_u64(1));
        apply_dataset(&mut app, Err(DatasetError::Empty));
        assert_eq!(
            app.state,
            AppState::LoadError("Dataset contains no countries".to_string())
        );

        // Enter does nothing here; only retry or quit.
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_empty());
        assert!(matches!(app.state, AppState::LoadError(_)));

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Loading);
    }

    #[test]
    fn test_menu_question_count_editing() {
        let mut app = loaded_app();
        assert_eq!(app.count_input, "10");

        set_count(&mut app, "25");
        assert_eq!(app.count_input, "25");

        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.count_input, "26");
        assert_eq!(app.settings.total_questions, 26);

        // Three digits at most
        set_count(&mut app, "12345");
        assert_eq!(app.count_input, "123");
    }

    #[test]
    fn test_first_digit_replaces_count() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Char('5')));
        assert_eq!(app.count_input, "5");
        handle_key(&mut app, key(KeyCode::Char('0')));
        assert_eq!(app.count_input, "50");

        // An adjustment hands the field back to replace mode.
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.count_input, "51");
        handle_key(&mut app, key(KeyCode::Char('7')));
        assert_eq!(app.count_input, "7");

        // So does moving focus away and back.
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Up));
        handle_key(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.count_input, "3");

        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.quiz.settings.total_questions, 3);
    }

    #[test]
    fn test_menu_clamps_count_on_start() {
        let mut app = loaded_app();
        set_count(&mut app, "999");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.quiz.settings.total_questions, 500);
        assert_eq!(app.count_input, "500");

        let mut app = loaded_app();
        set_count(&mut app, "");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.quiz.settings.total_questions, 1);
    }

    #[test]
    fn test_menu_time_limit_cycles() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.focused_field, MenuField::TimeLimit);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.settings.time_limit, 20);
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.settings.time_limit, 5);

        // Digits don't edit the count while the time limit is focused.
        handle_key(&mut app, key(KeyCode::Char('7')));
        assert_eq!(app.count_input, "10");
    }

    #[test]
    fn test_start_without_dataset_reports_message() {
        let mut app = App::with_rng("test", StdRng::seed_from_u64(1));
        app.state = AppState::Menu;
        let effects = handle_key(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.state, AppState::Menu);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_start_enters_quiz_with_countdown() {
        let mut app = loaded_app();
        let effects = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);
        let id = app.quiz.current_question().unwrap().id;
        assert_eq!(
            effects,
            vec![Effect::CancelTimers, Effect::StartCountdown(id)]
        );
    }

    #[test]
    fn test_answer_by_digit_and_finish() {
        let mut app = loaded_app();
        set_count(&mut app, "1");
        handle_key(&mut app, key(KeyCode::Enter));

        let idx = correct_index(&app);
        let digit = char::from_digit(idx as u32 + 1, 10).unwrap();
        handle_key(&mut app, key(KeyCode::Char(digit)));

        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.quiz.stats.correct, 1);
        assert_eq!(app.quiz.stats.attempts, 1);
    }

    #[test]
    fn test_answer_by_navigation_and_enter() {
        let mut app = loaded_app();
        set_count(&mut app, "2");
        handle_key(&mut app, key(KeyCode::Enter));

        let idx = correct_index(&app);
        for _ in 0..idx {
            handle_key(&mut app, key(KeyCode::Down));
        }
        assert_eq!(app.selected_option, idx);
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.quiz.stats.correct, 1);
        assert_eq!(app.quiz.stats.question_number, 2);
        assert_eq!(app.selected_option, 0, "cursor resets on a new question");
    }

    #[test]
    fn test_options_locked_during_reveal() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Enter));
        let id = app.quiz.current_question().unwrap().id;

        for _ in 0..app.settings.time_limit {
            handle_timer_event(&mut app, TimerEvent::Tick(id));
        }
        assert!(app.quiz.showing_correct_answer());

        let idx = correct_index(&app);
        let digit = char::from_digit(idx as u32 + 1, 10).unwrap();
        assert!(handle_key(&mut app, key(KeyCode::Char(digit))).is_empty());
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.quiz.stats.correct, 0);
        assert_eq!(app.quiz.stats.incorrect, 1);
    }

    #[test]
    fn test_timeout_reveal_then_summary() {
        let mut app = loaded_app();
        set_count(&mut app, "1");
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Left)); // 5 seconds
        handle_key(&mut app, key(KeyCode::Enter));
        let id = app.quiz.current_question().unwrap().id;

        let mut effects = Vec::new();
        for _ in 0..5 {
            effects = handle_timer_event(&mut app, TimerEvent::Tick(id));
        }
        assert_eq!(
            effects,
            vec![Effect::CancelTimers, Effect::ScheduleReveal(id)]
        );
        assert_eq!(app.state, AppState::Quiz);

        handle_timer_event(&mut app, TimerEvent::RevealElapsed(id));
        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.quiz.stats.incorrect, 1);
        assert_eq!(app.quiz.stats.score(), -0.25);
    }

    #[test]
    fn test_quit_confirmation_flow() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Enter));

        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state, AppState::QuizQuitConfirm);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Quiz);

        handle_key(&mut app, key(KeyCode::Esc));
        let effects = handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(effects, vec![Effect::CancelTimers]);
        assert_eq!(app.state, AppState::Menu);
        assert!(app.quiz.is_idle());
        assert_eq!(app.quiz.stats.attempts, 0);
    }

    #[test]
    fn test_quiz_can_finish_behind_quit_dialog() {
        let mut app = loaded_app();
        set_count(&mut app, "1");
        handle_key(&mut app, key(KeyCode::Enter));
        let id = app.quiz.current_question().unwrap().id;
        handle_key(&mut app, key(KeyCode::Esc));

        for _ in 0..app.settings.time_limit {
            handle_timer_event(&mut app, TimerEvent::Tick(id));
        }
        handle_timer_event(&mut app, TimerEvent::RevealElapsed(id));
        assert_eq!(app.state, AppState::Summary);
    }

    #[test]
    fn test_summary_restart_returns_to_menu() {
        let mut app = loaded_app();
        set_count(&mut app, "1");
        handle_key(&mut app, key(KeyCode::Enter));
        let idx = correct_index(&app);
        let digit = char::from_digit(idx as u32 + 1, 10).unwrap();
        handle_key(&mut app, key(KeyCode::Char(digit)));
        assert_eq!(app.state, AppState::Summary);

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.quiz.phase, Phase::Idle);
        // Settings survive a restart.
        assert_eq!(app.count_input, "1");
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = loaded_app();
        handle_key(&mut app, key(KeyCode::Enter));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let effects = handle_key(&mut app, ctrl_c);
        assert!(app.should_quit);
        assert_eq!(effects, vec![Effect::CancelTimers]);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = loaded_app();
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert!(handle_key(&mut app, release).is_empty());
        assert_eq!(app.state, AppState::Menu);
    }
}
