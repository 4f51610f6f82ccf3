use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::poller::StatusSource;

/// Production endpoint for homework review statuses.
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// A structurally valid API response.
///
/// `homeworks` elements stay loosely shaped so status extraction can report
/// exactly which field was unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    /// Server clock at response time. `None` when the field was present but
    /// not a number; validation never rejects on its type.
    pub current_date: Option<u64>,
}

/// A recoverable failure within one polling cycle.
///
/// Display text is user-facing: it is embedded verbatim in the error
/// notification delivered to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The endpoint answered with a status other than 200.
    Endpoint { endpoint: String, status: u16 },
    /// The request never produced a response.
    Transport { error: String },
    /// The body could not be decoded as JSON.
    InvalidJson { error: String },
    /// The response was not a JSON object.
    NotAMapping,
    /// `homeworks` or `current_date` is absent.
    MissingKeys,
    /// `homeworks` is not an array.
    HomeworksNotAList,
    /// The submission has no readable `homework_name`.
    MissingHomeworkName,
    /// The submission has no readable `status`.
    MissingStatus,
    /// The submission status is not a recognized verdict key.
    UnknownVerdict { status: String },
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint { endpoint, status } => write!(
                f,
                "Эндпоинт {} недоступен. Код ответа API: {}",
                endpoint, status
            ),
            Self::Transport { error } => {
                write!(f, "Сбой при запросе к эндпоинту: {}", error)
            }
            Self::InvalidJson { error } => {
                write!(f, "Ответ API не является корректным JSON: {}", error)
            }
            Self::NotAMapping => write!(f, "Ответ API не является словарем."),
            Self::MissingKeys => write!(f, "Отсутствие ожидаемых ключей в ответе API."),
            Self::HomeworksNotAList => {
                write!(f, "Элемент \"homeworks\" не является списком.")
            }
            Self::MissingHomeworkName => {
                write!(f, "В ответе API отсутствует ключ \"homework_name\".")
            }
            Self::MissingStatus => write!(f, "В ответе API отсутствует ключ \"status\"."),
            Self::UnknownVerdict { status } => {
                write!(f, "Неизвестный статус домашней работы: \"{}\".", status)
            }
        }
    }
}

impl std::error::Error for PollError {}

/// Client for the Practicum homework-status API.
pub struct PracticumClient {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String, endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token,
            endpoint,
        }
    }

    /// Fetch every status change at or after `from_date` and validate the
    /// response shape. Success is exactly HTTP 200.
    pub async fn homework_statuses(&self, from_date: u64) -> Result<ApiResponse, PollError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| PollError::Transport {
                error: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::Endpoint {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| PollError::InvalidJson {
            error: e.to_string(),
        })?;

        check_response(body)
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn homework_statuses(&self, from_date: u64) -> Result<ApiResponse, PollError> {
        PracticumClient::homework_statuses(self, from_date).await
    }
}

/// Validate the decoded response against the expected structure.
///
/// Three ordered checks, each with its own error: the value is an object,
/// both expected keys are present, and `homeworks` is an array. Nothing else
/// is checked; in particular `current_date` may be of any type.
pub fn check_response(body: Value) -> Result<ApiResponse, PollError> {
    let map = body.as_object().ok_or(PollError::NotAMapping)?;

    if !map.contains_key("homeworks") || !map.contains_key("current_date") {
        return Err(PollError::MissingKeys);
    }

    let homeworks = map
        .get("homeworks")
        .and_then(Value::as_array)
        .ok_or(PollError::HomeworksNotAList)?
        .clone();
    let current_date = map.get("current_date").and_then(Value::as_u64);

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}
