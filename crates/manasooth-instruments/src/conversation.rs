//! Chat-style walk through one questionnaire.
//!
//! The session asks which questionnaire to take, then asks its questions one
//! at a time, accepting only a listed option value as an answer. Once the
//! last question is answered the collected values are scored and the
//! session is concluded; later input only gets a closing reply.

use serde::Serialize;
use ts_rs::TS;

use manasooth_core::models::assessment::AssessmentType;
use manasooth_core::models::chat::{ChatSender, TranscriptMessage};

use crate::get_questionnaire;
use crate::scoring::Question;

pub const GREETING: &str = "Hello! I'm Manasooth's assessment assistant. I can guide you through one of the following questionnaires:\n\n- WHO-5 Well-being Index\n- GAD-7 Anxiety Assessment\n- PHQ-9 Depression Screening\n\nWhich one would you like to take today? Please type its name (e.g., 'WHO-5', 'Anxiety', or 'PHQ-9').";

const UNRECOGNISED_CHOICE: &str = "I'm sorry, I didn't recognize that assessment. Please choose from WHO-5, GAD-7, or PHQ-9. For example, type 'GAD-7'.";

const SESSION_FINISHED: &str = "You've already completed this assessment session. If you'd like to take another assessment, you can start a new session from the assessment page.";

/// Choice aliases, compared after lowercasing and removing all whitespace.
const ALIASES: &[(&str, AssessmentType)] = &[
    ("who-5", AssessmentType::Who5),
    ("who5", AssessmentType::Who5),
    ("wellbeing", AssessmentType::Who5),
    ("gad-7", AssessmentType::Gad7),
    ("gad7", AssessmentType::Gad7),
    ("anxiety", AssessmentType::Gad7),
    ("phq-9", AssessmentType::Phq9),
    ("phq9", AssessmentType::Phq9),
    ("depression", AssessmentType::Phq9),
];

/// Resolve free text like `"Well being"` or `"PHQ-9"` to a questionnaire.
pub fn parse_choice(input: &str) -> Option<AssessmentType> {
    let key: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, t)| *t)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    AwaitingChoice,
    Question {
        assessment: AssessmentType,
        index: usize,
    },
    Conclusion,
}

/// Score produced when a session finishes its questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletedQuestionnaire {
    pub assessment: AssessmentType,
    pub score: u32,
}

/// The assistant's answer to one user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub text: String,
    pub stage: Stage,
    /// Set only on the reply that finishes the questionnaire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<CompletedQuestionnaire>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    stage: Stage,
    answers: Vec<u32>,
    transcript: Vec<TranscriptMessage>,
    completed: Option<CompletedQuestionnaire>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    /// Start a session with the greeting already in the transcript.
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingChoice,
            answers: Vec::new(),
            transcript: vec![TranscriptMessage::now(ChatSender::Ai, GREETING)],
            completed: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn transcript(&self) -> &[TranscriptMessage] {
        &self.transcript
    }

    pub fn completed(&self) -> Option<CompletedQuestionnaire> {
        self.completed
    }

    pub fn greeting(&self) -> &str {
        GREETING
    }

    /// Feed one user message. Blank input is ignored and returns `None`.
    pub fn respond(&mut self, input: &str) -> Option<Reply> {
        if input.trim().is_empty() {
            return None;
        }
        self.transcript
            .push(TranscriptMessage::now(ChatSender::User, input));

        let mut completed = None;
        let text = match self.stage {
            Stage::AwaitingChoice => self.choose(input),
            Stage::Question { assessment, index } => {
                let (text, done) = self.answer(assessment, index, input);
                completed = done;
                text
            }
            Stage::Conclusion => SESSION_FINISHED.to_string(),
        };

        self.transcript
            .push(TranscriptMessage::now(ChatSender::Ai, text.clone()));
        Some(Reply {
            text,
            stage: self.stage,
            completed,
        })
    }

    fn choose(&mut self, input: &str) -> String {
        let Some(assessment) = parse_choice(input) else {
            return UNRECOGNISED_CHOICE.to_string();
        };
        let questionnaire = get_questionnaire(assessment);
        let questions = questionnaire.questions();
        self.stage = Stage::Question {
            assessment,
            index: 0,
        };
        self.answers.clear();
        format!(
            "Great! Let's start with the {}. It has {} questions.\n\nQuestion 1: {}",
            assessment.display_name(),
            questions.len(),
            format_question(&questions[0]),
        )
    }

    /// Only a bare whole number counts as an answer: `1.5` or `2 points`
    /// repeats the question rather than being truncated.
    fn answer(
        &mut self,
        assessment: AssessmentType,
        index: usize,
        input: &str,
    ) -> (String, Option<CompletedQuestionnaire>) {
        let questionnaire = get_questionnaire(assessment);
        let questions = questionnaire.questions();
        let question = &questions[index];

        let value = match input.trim().parse::<u32>() {
            Ok(v) if question.accepts(v) => v,
            _ => {
                let text = format!(
                    "I'm sorry, I didn't quite catch that. Please select one of the numbered options for the question. Let's try again:\n\nQuestion {}: {}",
                    index + 1,
                    format_question(question),
                );
                return (text, None);
            }
        };
        self.answers.push(value);

        let next = index + 1;
        if let Some(next_question) = questions.get(next) {
            self.stage = Stage::Question {
                assessment,
                index: next,
            };
            let text = format!(
                "Okay. Question {} for {}:\n{}",
                next + 1,
                assessment.display_name(),
                format_question(next_question),
            );
            return (text, None);
        }

        let score = questionnaire.scaled_total(&self.answers);
        let done = CompletedQuestionnaire { assessment, score };
        self.stage = Stage::Conclusion;
        self.completed = Some(done);
        let text = format!(
            "Excellent! You've completed the {}. Your score is {}: {}. It has been saved to your current results. Thank you for your time!",
            assessment.display_name(),
            score,
            questionnaire.band(score).unwrap_or("no interpretation available"),
        );
        (text, Some(done))
    }
}

fn format_question(question: &Question) -> String {
    let options: Vec<String> = question
        .options
        .iter()
        .map(|o| format!("{}: {}", o.value, o.text))
        .collect();
    format!(
        "{}\n\nOptions (reply with the number corresponding to your choice):\n{}",
        question.text,
        options.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_ignore_case_and_whitespace() {
        assert_eq!(parse_choice("Well being"), Some(AssessmentType::Who5));
        assert_eq!(parse_choice("  WHO-5 "), Some(AssessmentType::Who5));
        assert_eq!(parse_choice("Anxiety"), Some(AssessmentType::Gad7));
        assert_eq!(parse_choice("phq 9"), Some(AssessmentType::Phq9));
        assert_eq!(parse_choice("k10"), None);
    }

    #[test]
    fn new_session_greets() {
        let session = ConversationSession::new();
        assert_eq!(session.stage(), Stage::AwaitingChoice);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].sender, ChatSender::Ai);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = ConversationSession::new();
        assert!(session.respond("   ").is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn unknown_choice_asks_again() {
        let mut session = ConversationSession::new();
        let reply = session.respond("something else").unwrap();
        assert_eq!(reply.text, UNRECOGNISED_CHOICE);
        assert_eq!(reply.stage, Stage::AwaitingChoice);
    }

    #[test]
    fn choosing_asks_first_question_with_options() {
        let mut session = ConversationSession::new();
        let reply = session.respond("GAD-7").unwrap();
        assert!(reply.text.starts_with("Great! Let's start with the GAD-7 Anxiety Assessment. It has 7 questions."));
        assert!(reply.text.contains("Question 1: "));
        assert!(reply.text.contains("0: Not at all"));
        assert_eq!(
            reply.stage,
            Stage::Question { assessment: AssessmentType::Gad7, index: 0 }
        );
    }

    #[test]
    fn invalid_answers_repeat_the_question() {
        let mut session = ConversationSession::new();
        session.respond("gad7").unwrap();
        for bad in ["7", "two", "-1", "1.5"] {
            let reply = session.respond(bad).unwrap();
            assert!(reply.text.starts_with("I'm sorry, I didn't quite catch that."));
            assert_eq!(
                reply.stage,
                Stage::Question { assessment: AssessmentType::Gad7, index: 0 }
            );
        }
        let reply = session.respond(" 2 ").unwrap();
        assert!(reply.text.starts_with("Okay. Question 2 for GAD-7 Anxiety Assessment:"));
    }

    #[test]
    fn finishing_scores_the_questionnaire() {
        let mut session = ConversationSession::new();
        session.respond("wellbeing").unwrap();
        for _ in 0..4 {
            assert!(session.respond("3").unwrap().completed.is_none());
        }
        let reply = session.respond("4").unwrap();
        let done = CompletedQuestionnaire { assessment: AssessmentType::Who5, score: 64 };
        assert_eq!(reply.completed, Some(done));
        assert_eq!(reply.stage, Stage::Conclusion);
        assert_eq!(session.completed(), Some(done));
        assert!(reply.text.contains("Moderate well-being"));

        let after = session.respond("who5").unwrap();
        assert_eq!(after.text, SESSION_FINISHED);
        assert_eq!(after.stage, Stage::Conclusion);
        assert!(after.completed.is_none());
    }

    #[test]
    fn transcript_records_both_sides() {
        let mut session = ConversationSession::new();
        session.respond("phq9").unwrap();
        let senders: Vec<_> = session.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![ChatSender::Ai, ChatSender::User, ChatSender::Ai]);
        assert_eq!(session.transcript()[1].text, "phq9");
    }

    #[test]
    fn stage_serializes_with_type_tag() {
        let json = serde_json::to_value(Stage::Question {
            assessment: AssessmentType::Phq9,
            index: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "question", "assessment": "phq9", "index": 2})
        );
        assert_eq!(
            serde_json::to_value(Stage::AwaitingChoice).unwrap(),
            serde_json::json!({"type": "awaiting_choice"})
        );
    }
}
