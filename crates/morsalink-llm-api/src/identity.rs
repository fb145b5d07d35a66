use serde::{Deserialize, Serialize};

/// Canned self-introduction, answered before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub assistant_name: String,
    pub creator: String,
    /// Lowercase phrases; a question containing any of them is answered locally
    pub triggers: Vec<String>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            assistant_name: "Morsalink AI".to_string(),
            creator: "Morsalin".to_string(),
            triggers: vec!["who are you".to_string()],
        }
    }
}

impl Identity {
    pub fn introduction(&self) -> String {
        format!("I am {} made by {}.", self.assistant_name, self.creator)
    }

    pub fn greeting(&self) -> String {
        format!("Hi! I'm {}. How can I help you today?", self.assistant_name)
    }

    /// The introduction, if `question` asks who the assistant is
    pub fn answer(&self, question: &str) -> Option<String> {
        let q = question.trim().to_lowercase();
        self.triggers
            .iter()
            .map(|t| t.trim().to_lowercase())
            .any(|t| !t.is_empty() && q.contains(&t))
            .then(|| self.introduction())
    }
}
