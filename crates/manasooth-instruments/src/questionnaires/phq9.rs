use std::sync::LazyLock;

use manasooth_core::models::assessment::AssessmentType;

use super::FREQUENCY_OPTIONS;
use crate::Questionnaire;
use crate::scoring::{InterpretationBand, Question, bands, questions};

/// PHQ-9: Patient Health Questionnaire depression module.
/// 9 items, each rated 0–3. Total 0–27.
pub struct Phq9;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let stems = [
        "little interest or pleasure in doing things",
        "feeling down, depressed, or hopeless",
        "trouble falling or staying asleep, or sleeping too much",
        "feeling tired or having little energy",
        "poor appetite or overeating",
        "feeling bad about yourself - or that you are a failure or have let yourself or your family down",
        "trouble concentrating on things, such as reading the newspaper or watching television",
        "moving or speaking so slowly that other people could have noticed? Or the opposite - \
         being so fidgety or restless that you have been moving around a lot more than usual",
        "thoughts that you would be better off dead, or of hurting yourself in some way",
    ]
    .map(|s| {
        let end = if s.ends_with('?') { "" } else { "?" };
        format!("Over the last 2 weeks, how often have you been bothered by {s}{end}")
    });
    let texts: Vec<&str> = stems.iter().map(String::as_str).collect();
    questions("phq9", &texts, &FREQUENCY_OPTIONS)
});

static BANDS: LazyLock<Vec<InterpretationBand>> = LazyLock::new(|| {
    bands(&[
        (0, 4, "Minimal depression"),
        (5, 9, "Mild depression"),
        (10, 14, "Moderate depression"),
        (15, 19, "Moderately severe depression"),
        (20, 27, "Severe depression"),
    ])
});

impl Questionnaire for Phq9 {
    fn assessment_type(&self) -> AssessmentType {
        AssessmentType::Phq9
    }

    fn scoring_note(&self) -> &str {
        "Scores for each item range from 0 (Not at all) to 3 (Nearly every day). \
         Total score ranges from 0 to 27."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn interpretation(&self) -> &[InterpretationBand] {
        &BANDS
    }
}
