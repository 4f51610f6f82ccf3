//! Verdict mapping and status-message rendering.

use serde_json::Value;

use crate::practicum::PollError;

/// Review outcome for a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkVerdict {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkVerdict {
    /// Map an API status key to a verdict.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Display text delivered to the user.
    pub fn text(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Extract name and verdict from one submission record and render the
/// status-change notification text.
pub fn parse_status(homework: &Value) -> Result<String, PollError> {
    let homework_name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(PollError::MissingHomeworkName)?;

    let status = homework
        .get("status")
        .and_then(Value::as_str)
        .ok_or(PollError::MissingStatus)?;

    let verdict = HomeworkVerdict::from_key(status).ok_or_else(|| PollError::UnknownVerdict {
        status: status.to_string(),
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework_name,
        verdict.text()
    ))
}
