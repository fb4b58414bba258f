use crate::models::{
    CountryRecord, MAX_OPTIONS, OptionSet, Question, QuestionId, QuestionKind, WEIGHTED_KINDS,
};
use crate::quiz::QuizError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Draws from the weighted table. If the record has no value for the drawn
/// kind, redraws among the weighted entries it can answer.
pub fn pick_kind<R: Rng + ?Sized>(record: &CountryRecord, rng: &mut R) -> QuestionKind {
    let drawn = WEIGHTED_KINDS[rng.gen_range(0..WEIGHTED_KINDS.len())];
    if record.value(drawn).is_some() {
        return drawn;
    }

    let available: Vec<QuestionKind> = WEIGHTED_KINDS
        .iter()
        .copied()
        .filter(|kind| record.value(*kind).is_some())
        .collect();
    *available.choose(rng).unwrap_or(&QuestionKind::Country)
}

/// Distinct values of one attribute across the dataset, in first-seen order.
pub fn distinct_values(dataset: &[CountryRecord], kind: QuestionKind) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .iter()
        .filter_map(|record| record.value(kind))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

pub fn build_options<R: Rng + ?Sized>(
    dataset: &[CountryRecord],
    kind: QuestionKind,
    correct_answer: &str,
    rng: &mut R,
) -> OptionSet {
    let incorrect: Vec<String> = distinct_values(dataset, kind)
        .into_iter()
        .filter(|value| value != correct_answer)
        .collect();

    let mut choices: Vec<String> = incorrect
        .choose_multiple(rng, MAX_OPTIONS - 1)
        .cloned()
        .collect();
    choices.push(correct_answer.to_string());
    choices.shuffle(rng);

    OptionSet {
        prompt: kind.prompt().to_string(),
        choices,
        correct_answer: correct_answer.to_string(),
    }
}

pub fn generate_question<R: Rng + ?Sized>(
    dataset: &[CountryRecord],
    id: QuestionId,
    rng: &mut R,
) -> Result<Question, QuizError> {
    let record = dataset.choose(rng).ok_or(QuizError::EmptyDataset)?;
    let kind = pick_kind(record, rng);
    let correct_answer = record.value(kind).unwrap_or_default();
    let options = build_options(dataset, kind, correct_answer, rng);

    Ok(Question {
        id,
        record: record.clone(),
        kind,
        options,
    })
}
