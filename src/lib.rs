pub mod config;
pub mod dataset;
pub mod logger;
pub mod models;
pub mod question;
pub mod quiz;
pub mod session;
pub mod timer;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use config::Config;
pub use dataset::{DatasetError, DatasetSource, load_dataset, parse_dataset};
pub use models::{AppState, CountryRecord, OptionSet, Question, QuestionKind, Settings};
pub use question::generate_question;
pub use quiz::{Effect, Phase, QuizError, QuizSession};
pub use session::{App, apply_dataset, handle_key, handle_timer_event};
pub use timer::Scheduler;
pub use ui::draw;
