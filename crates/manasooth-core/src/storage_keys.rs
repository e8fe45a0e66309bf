//! Storage key conventions.
//!
//! Every persisted blob lives under one of these fixed keys. Values are
//! whole-array (or whole-object) JSON documents.

pub const CURRENT_ASSESSMENT_SCORES: &str = "manasooth_current_assessment_scores";

pub const PROGRESS_DATA: &str = "manasooth_progress_data";

pub const USER_GOALS: &str = "manasooth_user_goals";

pub const MOOD_ENTRIES: &str = "manasooth_mood_entries";

pub const SELECTED_ASSESSMENT_FLOW: &str = "manasooth_selected_assessment_flow";

/// All keys owned by the application, in the order they are cleared.
pub const ALL: [&str; 5] = [
    CURRENT_ASSESSMENT_SCORES,
    PROGRESS_DATA,
    USER_GOALS,
    MOOD_ENTRIES,
    SELECTED_ASSESSMENT_FLOW,
];
