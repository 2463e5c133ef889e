use crate::curator::client::CuratorError;
use serde::Serialize;

pub const SYSTEM_INSTRUCTION: &str = "You are the Head Curator of the Chronos Digital Museum. \
Your tone is sophisticated, educational, yet accessible and slightly mysterious.\n\
When describing an object, use evocative language. If the object is generic or unknown, \
invent a plausible, fascinating history for it based on its name or type.\n\
Keep descriptions concise (under 80 words) but impactful.";

pub const DESCRIBE_FAILED: &str = "The archives are currently silent about this artifact.";
pub const DESCRIBE_EMPTY: &str = "History unknown.";
pub const ASK_FAILED: &str =
    "Pardon me, I was distracted by a restoration project. Could you repeat that?";
pub const ASK_EMPTY: &str = "I cannot answer that at this moment.";

/// A single question put to the curator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CuratorQuery {
    Describe { file_name: String },
    Ask { question: String, context: String },
}

impl CuratorQuery {
    pub fn prompt(&self) -> String {
        match self {
            Self::Describe { file_name } => format!(
                "Generate a museum placard description for an artifact with the filename: \
                 \"{file_name}\". Create a fictional but grounded historical context for it."
            ),
            Self::Ask { question, context } => format!(
                "Context: The user is looking at an artifact described as: \"{context}\".\n\
                 User Question: \"{question}\"\n\
                 Answer as the Curator."
            ),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Describe { .. } => "describe",
            Self::Ask { .. } => "ask",
        }
    }

    /// Pre-authored text shown instead of a failed or empty answer.
    pub fn fallback(&self, error: &CuratorError) -> &'static str {
        match (self, error) {
            (Self::Describe { .. }, CuratorError::EmptyAnswer) => DESCRIBE_EMPTY,
            (Self::Describe { .. }, _) => DESCRIBE_FAILED,
            (Self::Ask { .. }, CuratorError::EmptyAnswer) => ASK_EMPTY,
            (Self::Ask { .. }, _) => ASK_FAILED,
        }
    }
}
