//! Engine configuration

use serde::{Deserialize, Serialize};

/// How the question interlude behaves where authoring intent was unclear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionPolicy {
    /// Keep the setup prompt on screen after the first question was asked
    pub keep_setup_after_first: bool,
    /// Disable the other prompt while an answer is showing
    pub lock_while_answering: bool,
}

/// Timing constants and policies for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay between the start flash and the first intro segment
    pub lead_in_ms: u64,
    /// Delay applied to timed segments that do not declare one
    pub default_delay_ms: u64,
    /// Pause after the last answer before the question panel fades out
    pub question_resume_delay_ms: u64,
    /// Pause after the scroll section ends before dialogue resumes
    pub scroll_resume_delay_ms: u64,
    /// Duration hosts use when simulating fade animations
    pub fade_ms: u64,
    pub questions: QuestionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lead_in_ms: 3000,
            default_delay_ms: 3000,
            question_resume_delay_ms: 2000,
            scroll_resume_delay_ms: 1000,
            fade_ms: 1000,
            questions: QuestionPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_lead_in(mut self, ms: u64) -> Self {
        self.lead_in_ms = ms;
        self
    }

    pub fn with_default_delay(mut self, ms: u64) -> Self {
        self.default_delay_ms = ms;
        self
    }

    pub fn with_question_policy(mut self, policy: QuestionPolicy) -> Self {
        self.questions = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.lead_in_ms, 3000);
        assert_eq!(config.default_delay_ms, 3000);
        assert!(!config.questions.keep_setup_after_first);
        assert!(!config.questions.lock_while_answering);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "lead_in_ms": 10, "questions": { "lock_while_answering": true } }"#)
                .unwrap();
        assert_eq!(config.lead_in_ms, 10);
        assert_eq!(config.default_delay_ms, 3000);
        assert!(config.questions.lock_while_answering);
        assert!(!config.questions.keep_setup_after_first);
    }

    #[test]
    fn builder_methods() {
        let config = EngineConfig::default().with_lead_in(0).with_default_delay(500);
        assert_eq!(config.lead_in_ms, 0);
        assert_eq!(config.default_delay_ms, 500);
    }
}
