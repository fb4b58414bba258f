use std::fmt;

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 500;
pub const DEFAULT_QUESTIONS: u32 = 10;
pub const TIME_LIMITS: [u32; 5] = [5, 10, 20, 30, 60];
pub const DEFAULT_TIME_LIMIT: u32 = 10;
pub const REVEAL_SECONDS: u64 = 3;
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub continent: String,
    pub country: String,
    pub flag_url: String,
    pub capital: String,
    pub currency: String,
    /// Not part of the provider's documented shape; `None` unless the feed carries it.
    pub head_of_state: Option<String>,
}

impl CountryRecord {
    pub fn value(&self, kind: QuestionKind) -> Option<&str> {
        match kind {
            QuestionKind::Continent => Some(self.continent.as_str()),
            QuestionKind::Country => Some(self.country.as_str()),
            QuestionKind::Capital => Some(self.capital.as_str()),
            QuestionKind::Currency => Some(self.currency.as_str()),
            QuestionKind::HeadOfState => self.head_of_state.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Continent,
    Country,
    Capital,
    Currency,
    HeadOfState,
}

/// Selection table for question kinds. Head of state is listed twice.
pub const WEIGHTED_KINDS: [QuestionKind; 6] = [
    QuestionKind::Continent,
    QuestionKind::Country,
    QuestionKind::Capital,
    QuestionKind::Currency,
    QuestionKind::HeadOfState,
    QuestionKind::HeadOfState,
];

impl QuestionKind {
    pub fn prompt(&self) -> &'static str {
        match self {
            QuestionKind::Continent => "Which continent does this flag belong to?",
            QuestionKind::Country => "Which country does this flag belong to?",
            QuestionKind::Capital => "What is the capital of this country?",
            QuestionKind::Currency => "What is the currency of this country?",
            QuestionKind::HeadOfState => "Who is the President or head of the country?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
}

impl OptionSet {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| *c == self.correct_answer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub record: CountryRecord,
    pub kind: QuestionKind,
    pub options: OptionSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub total_questions: u32,
    pub time_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_questions: DEFAULT_QUESTIONS,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

impl Settings {
    pub fn clamp_questions(value: u32) -> u32 {
        value.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
    }

    pub fn set_total_questions(&mut self, value: u32) {
        self.total_questions = Self::clamp_questions(value);
    }

    /// Snaps to the nearest allowed limit so a hand-built value can't escape the list.
    pub fn set_time_limit(&mut self, seconds: u32) {
        self.time_limit = *TIME_LIMITS
            .iter()
            .min_by_key(|limit| limit.abs_diff(seconds))
            .unwrap_or(&DEFAULT_TIME_LIMIT);
    }

    pub fn next_time_limit(&mut self) {
        self.step_time_limit(1);
    }

    pub fn previous_time_limit(&mut self) {
        self.step_time_limit(TIME_LIMITS.len() - 1);
    }

    fn step_time_limit(&mut self, step: usize) {
        self.set_time_limit(self.time_limit);
        let idx = TIME_LIMITS
            .iter()
            .position(|l| *l == self.time_limit)
            .unwrap_or(0);
        self.time_limit = TIME_LIMITS[(idx + step) % TIME_LIMITS.len()];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(QuestionId),
    RevealElapsed(QuestionId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Loading,
    LoadError(String),
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
