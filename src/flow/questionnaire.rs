//! Guided questionnaire flow
//!
//! Walks an ordered list of questions, records typed answers and signals
//! completion. Values are not validated against the declared options; the
//! hosting screen only offers valid ones.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::flow::Cursor;
use crate::{PulseError, Result};

/// Answer type of a question together with what it accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerKind {
    /// Exactly one option label
    SingleChoice { options: Vec<String> },
    /// Any set of option labels
    MultiChoice { options: Vec<String> },
    /// A 1-based position on a labelled scale
    Scale { labels: Vec<String> },
    /// A number within a range
    Slider {
        min: f64,
        max: f64,
        step: f64,
        unit: String,
    },
}

impl AnswerKind {
    pub fn is_multiple(&self) -> bool {
        matches!(self, AnswerKind::MultiChoice { .. })
    }

    /// Option labels offered for choice and scale questions
    pub fn options(&self) -> &[String] {
        match self {
            AnswerKind::SingleChoice { options } | AnswerKind::MultiChoice { options } => options,
            AnswerKind::Scale { labels } => labels,
            AnswerKind::Slider { .. } => &[],
        }
    }
}

/// A single question of the flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: AnswerKind,
    /// Cosmetic grouping
    pub category: String,
}

impl Question {
    pub fn new(id: &str, prompt: &str, category: &str, kind: AnswerKind) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind,
            category: category.to_string(),
        }
    }
}

/// A recorded answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(BTreeSet<String>),
    Number(f64),
}

impl AnswerValue {
    /// Whether the answer carries a selection
    pub fn is_present(&self) -> bool {
        match self {
            AnswerValue::Multiple(set) => !set.is_empty(),
            AnswerValue::Single(_) | AnswerValue::Number(_) => true,
        }
    }

    /// Short display form for summaries
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Single(value) => value.clone(),
            AnswerValue::Multiple(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
            AnswerValue::Number(n) if n.fract() == 0.0 => format!("{:.0}", n),
            AnswerValue::Number(n) => format!("{}", n),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Single(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

/// Final answer set handed to the hosting screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    pub completed_at: DateTime<Utc>,
    pub answers: BTreeMap<String, AnswerValue>,
}

/// Questionnaire session state
#[derive(Debug, Clone)]
pub struct Questionnaire {
    questions: Vec<Question>,
    answers: BTreeMap<String, AnswerValue>,
    cursor: Cursor,
}

impl Questionnaire {
    /// Create a flow positioned at the first question
    pub fn new(questions: Vec<Question>) -> Self {
        let cursor = Cursor::new(questions.len());
        Self {
            questions,
            answers: BTreeMap::new(),
            cursor,
        }
    }

    /// Record an answer
    ///
    /// With `is_multiple` a single label is toggled in or out of the
    /// question's selection set (a set passed here is toggled label by
    /// label). Otherwise the stored value is overwritten.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: impl Into<AnswerValue>,
        is_multiple: bool,
    ) {
        let value = value.into();
        if !is_multiple {
            debug!(question_id, answer = %value.display(), "answer recorded");
            self.answers.insert(question_id.to_string(), value);
            return;
        }

        match value {
            AnswerValue::Single(label) => self.toggle_option(question_id, &label),
            AnswerValue::Multiple(labels) => {
                for label in labels {
                    self.toggle_option(question_id, &label);
                }
            }
            AnswerValue::Number(n) => self.toggle_option(question_id, &n.to_string()),
        }
    }

    /// Overwrite the answer with one option
    pub fn select_option(&mut self, question_id: &str, label: &str) {
        self.record_answer(question_id, label, false);
    }

    /// Overwrite the answer with a number
    pub fn set_number(&mut self, question_id: &str, value: f64) {
        self.record_answer(question_id, value, false);
    }

    /// Add `label` to the selection set if absent, remove it if present
    ///
    /// A selection set that becomes empty is removed so the question reads
    /// as unanswered again.
    pub fn toggle_option(&mut self, question_id: &str, label: &str) {
        let mut set = match self.answers.remove(question_id) {
            Some(AnswerValue::Multiple(set)) => set,
            _ => BTreeSet::new(),
        };
        if !set.remove(label) {
            set.insert(label.to_string());
        }
        debug!(question_id, label, selected = set.len(), "option toggled");
        if !set.is_empty() {
            self.answers
                .insert(question_id.to_string(), AnswerValue::Multiple(set));
        }
    }

    /// Move to the next question, or into the completed state after the last
    ///
    /// Not gated on the current answer; see [`Questionnaire::try_advance`].
    pub fn advance(&mut self) {
        let was_completed = self.cursor.is_completed();
        self.cursor.advance();
        if self.cursor.is_completed() && !was_completed {
            info!(answered = self.answers.len(), "questionnaire completed");
        }
    }

    /// Advance only when the current question is answered
    pub fn try_advance(&mut self) -> Result<()> {
        if let Some(question) = self.current_question() {
            if !self.is_answered(&question.id) {
                return Err(PulseError::Unanswered(question.id.clone()));
            }
        }
        self.advance();
        Ok(())
    }

    /// Move to the previous question, floored at the first
    pub fn retreat(&mut self) {
        self.cursor.retreat();
    }

    /// Whether the question has a non-empty recorded value
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(AnswerValue::is_present)
    }

    /// Display-only progress, `(index + 1) / total`
    pub fn progress_fraction(&self) -> f64 {
        self.cursor.fraction()
    }

    pub fn is_completed(&self) -> bool {
        self.cursor.is_completed()
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.cursor.current().and_then(|i| self.questions.get(i))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn answers(&self) -> &BTreeMap<String, AnswerValue> {
        &self.answers
    }

    /// Consume the flow into its answer map
    pub fn into_summary(self) -> QuestionnaireSummary {
        QuestionnaireSummary {
            completed_at: Utc::now(),
            answers: self.answers,
        }
    }
}
