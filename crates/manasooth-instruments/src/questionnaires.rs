pub mod gad7;
pub mod phq9;
pub mod who5;

use std::sync::LazyLock;

use crate::scoring::{AnswerOption, options};

/// Frequency scale shared by GAD-7 and PHQ-9.
pub(crate) static FREQUENCY_OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
    options(&[
        "Not at all",
        "Several days",
        "More than half the days",
        "Nearly every day",
    ])
});
