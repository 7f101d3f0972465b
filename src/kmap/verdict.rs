use serde::{Deserialize, Serialize};

/// Outcome of a K-map check, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Short headline for the student
    pub message: String,
    /// Details of what went wrong
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Render indices as `{0, 1, 5}`
pub(crate) fn format_indices(indices: &[usize]) -> String {
    let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
    format!("{{{}}}", parts.join(", "))
}
