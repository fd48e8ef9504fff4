use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pollchat_core::ChatError;
use serde_json::json;

#[derive(Debug)]
pub enum Error {
    // Client errors from the chat state
    MissingParameter(&'static str),
    MalformedPayload(String),

    // Future `ChatError` variants (the enum is `#[non_exhaustive]`)
    BadRequest(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) | Error::MalformedPayload(_) | Error::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            Error::MissingParameter(param) => format!("{} required", capitalize(param)),
            Error::MalformedPayload(_) => "Invalid message".to_string(),
            Error::BadRequest(msg) => msg,
        };

        let body = Json(json!({
            "error": {
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ChatError> for Error {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::MissingParameter(param) => Error::MissingParameter(param),
            ChatError::MalformedPayload(detail) => Error::MalformedPayload(detail),
            other => Error::BadRequest(other.to_string()),
        }
    }
}
