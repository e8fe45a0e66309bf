use std::sync::LazyLock;

use manasooth_core::models::assessment::AssessmentType;

use super::FREQUENCY_OPTIONS;
use crate::Questionnaire;
use crate::scoring::{InterpretationBand, Question, bands, questions};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items, each rated 0–3. Total 0–21.
pub struct Gad7;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let stems = [
        "feeling nervous, anxious, or on edge",
        "not being able to stop or control worrying",
        "worrying too much about different things",
        "trouble relaxing",
        "being so restless that it is hard to sit still",
        "becoming easily annoyed or irritable",
        "feeling afraid as if something awful might happen",
    ]
    .map(|s| format!("Over the last 2 weeks, how often have you been bothered by {s}?"));
    let texts: Vec<&str> = stems.iter().map(String::as_str).collect();
    questions("gad7", &texts, &FREQUENCY_OPTIONS)
});

static BANDS: LazyLock<Vec<InterpretationBand>> = LazyLock::new(|| {
    bands(&[
        (0, 4, "Minimal anxiety"),
        (5, 9, "Mild anxiety"),
        (10, 14, "Moderate anxiety"),
        (15, 21, "Severe anxiety"),
    ])
});

impl Questionnaire for Gad7 {
    fn assessment_type(&self) -> AssessmentType {
        AssessmentType::Gad7
    }

    fn scoring_note(&self) -> &str {
        "Scores for each item range from 0 (Not at all) to 3 (Nearly every day). \
         Total score ranges from 0 to 21."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn interpretation(&self) -> &[InterpretationBand] {
        &BANDS
    }
}
