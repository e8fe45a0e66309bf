use std::sync::LazyLock;

use manasooth_core::models::assessment::AssessmentType;

use crate::Questionnaire;
use crate::scoring::{InterpretationBand, Question, bands, options, questions};

/// WHO-5 Well-being Index.
/// 5 items, each rated 0–5. Raw sum × 4 gives 0–100; higher is better.
pub struct Who5;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let scale = options(&[
        "At no time",
        "Some of the time",
        "Less than half of the time",
        "More than half of the time",
        "Most of the time",
        "All of the time",
    ]);
    questions(
        "who5",
        &[
            "Over the last two weeks, I have felt cheerful and in good spirits.",
            "Over the last two weeks, I have felt calm and relaxed.",
            "Over the last two weeks, I have felt active and vigorous.",
            "Over the last two weeks, I woke up feeling fresh and rested.",
            "Over the last two weeks, my daily life has been filled with things that interest me.",
        ],
        &scale,
    )
});

static BANDS: LazyLock<Vec<InterpretationBand>> = LazyLock::new(|| {
    bands(&[
        (70, 100, "Excellent well-being"),
        (50, 69, "Moderate well-being"),
        (0, 49, "Poor well-being, consider seeking support"),
    ])
});

impl Questionnaire for Who5 {
    fn assessment_type(&self) -> AssessmentType {
        AssessmentType::Who5
    }

    fn scoring_note(&self) -> &str {
        "Each question is scored from 0 (Not present) to 5 (Constantly present). \
         The raw score is multiplied by 4 to get the final score (0-100). \
         A score below 50 suggests poor well-being."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn interpretation(&self) -> &[InterpretationBand] {
        &BANDS
    }

    fn multiplier(&self) -> u32 {
        4
    }
}
