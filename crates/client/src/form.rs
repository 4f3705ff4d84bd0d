use review_protocol::GenerationRequest;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Minimum answer length (in grapheme clusters) accepted for review. A
/// shorter answer is rejected locally, before any network call.
pub const MIN_ANSWER_CHARS: usize = 100;

/// How the question side of the form is filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionMode {
    /// Review against a known past-exam question.
    Existing { official_question_id: String },
    /// Review against a question the user typed in.
    New {
        question_text: String,
        reference_text: Option<String>,
        question_title: Option<String>,
        subject: Option<String>,
    },
}

/// Editable state of the submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub answer_text: String,
    pub mode: QuestionMode,
    pub subject_id: Option<String>,
    pub exam_type: Option<String>,
    pub year: Option<u16>,
}

/// Local, pre-submission failures. These never issue a network call and are
/// surfaced as form-level messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("answer text is empty")]
    EmptyAnswer,

    #[error("answer text has {chars} characters, at least {MIN_ANSWER_CHARS} are required")]
    AnswerTooShort { chars: usize },

    #[error("question text is required when submitting a new question")]
    MissingQuestionText,

    #[error("an official question must be selected")]
    MissingOfficialQuestion,
}

impl ReviewForm {
    pub fn existing(answer_text: impl Into<String>, official_question_id: impl Into<String>) -> Self {
        Self {
            answer_text: answer_text.into(),
            mode: QuestionMode::Existing {
                official_question_id: official_question_id.into(),
            },
            subject_id: None,
            exam_type: None,
            year: None,
        }
    }

    pub fn new_question(answer_text: impl Into<String>, question_text: impl Into<String>) -> Self {
        Self {
            answer_text: answer_text.into(),
            mode: QuestionMode::New {
                question_text: question_text.into(),
                reference_text: None,
                question_title: None,
                subject: None,
            },
            subject_id: None,
            exam_type: None,
            year: None,
        }
    }

    /// Check the soft gates of the form. All violations are reported at
    /// once so the form can mark every offending field.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.answer_text.trim().is_empty() {
            errors.push(ValidationError::EmptyAnswer);
        } else {
            let chars = self.answer_text.graphemes(true).count();
            if chars < MIN_ANSWER_CHARS {
                errors.push(ValidationError::AnswerTooShort { chars });
            }
        }

        match &self.mode {
            QuestionMode::Existing {
                official_question_id,
            } => {
                if official_question_id.trim().is_empty() {
                    errors.push(ValidationError::MissingOfficialQuestion);
                }
            }
            QuestionMode::New { question_text, .. } => {
                if question_text.trim().is_empty() {
                    errors.push(ValidationError::MissingQuestionText);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and build the wire request.
    pub fn to_request(&self) -> Result<GenerationRequest, Vec<ValidationError>> {
        self.validate()?;

        let mut request = GenerationRequest {
            answer_text: self.answer_text.clone(),
            official_question_id: None,
            question_text: None,
            reference_text: None,
            question_title: None,
            subject: None,
            subject_id: self.subject_id.clone(),
            exam_type: self.exam_type.clone(),
            year: self.year,
        };

        match &self.mode {
            QuestionMode::Existing {
                official_question_id,
            } => {
                request.official_question_id = Some(official_question_id.clone());
            }
            QuestionMode::New {
                question_text,
                reference_text,
                question_title,
                subject,
            } => {
                request.question_text = Some(question_text.clone());
                request.reference_text = reference_text.clone();
                request.question_title = question_title.clone();
                request.subject = subject.clone();
            }
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn long_answer() -> String {
        "本件において検討すべき論点は多岐にわたるが、".repeat(10)
    }

    #[test]
    fn valid_existing_mode_builds_a_request() {
        let form = ReviewForm::existing(long_answer(), "q-2023-kenpo-1");
        let request = form.to_request().unwrap();
        assert_eq!(
            request.official_question_id.as_deref(),
            Some("q-2023-kenpo-1")
        );
        assert!(request.question_text.is_none());
        assert!(request.targets_official_question());
    }

    #[test]
    fn empty_answer_is_a_single_violation() {
        let form = ReviewForm::existing("   ", "q-1");
        assert_eq!(form.validate().unwrap_err(), vec![ValidationError::EmptyAnswer]);
    }

    #[test]
    fn short_answer_reports_its_grapheme_count() {
        let form = ReviewForm::existing("短い答案", "q-1");
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::AnswerTooShort { chars: 4 }]
        );
    }

    #[test]
    fn hundred_graphemes_pass_the_gate() {
        let form = ReviewForm::existing("あ".repeat(MIN_ANSWER_CHARS), "q-1");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn new_mode_requires_question_text() {
        let form = ReviewForm::new_question(long_answer(), " ");
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::MissingQuestionText]
        );
    }

    #[test]
    fn existing_mode_requires_a_resolved_question_id() {
        let form = ReviewForm::existing(long_answer(), "");
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::MissingOfficialQuestion]
        );
    }

    #[test]
    fn all_violations_are_reported_together() {
        let form = ReviewForm::new_question("", "");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyAnswer,
                ValidationError::MissingQuestionText
            ]
        );
    }

    #[test]
    fn new_mode_carries_reference_material() {
        let mut form = ReviewForm::new_question(long_answer(), "以下の事例について論ぜよ。");
        if let QuestionMode::New {
            reference_text,
            subject,
            ..
        } = &mut form.mode
        {
            *reference_text = Some("参考判例".to_string());
            *subject = Some("憲法".to_string());
        }
        let request = form.to_request().unwrap();
        assert_eq!(request.reference_text.as_deref(), Some("参考判例"));
        assert_eq!(request.subject.as_deref(), Some("憲法"));
        assert!(!request.targets_official_question());
    }
}
