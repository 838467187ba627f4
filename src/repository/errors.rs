use thiserror::Error;

/// Error bodies longer than this are not shown to the user verbatim.
pub const MAX_PLAIN_ERROR_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    /// Non-2xx response from the catalog backend.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Builds the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = error_message(status, body);
        if status == 404 {
            RepositoryError::NotFound(message)
        } else {
            RepositoryError::Api { status, message }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::NotFound(_) => Some(404),
            RepositoryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Text surfaced to the user for a failed backend call.
///
/// A JSON body contributes its `message` or `error` field; a short plain-text
/// body is used as is; anything else falls back to `HTTP <status>`.
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = format!("HTTP {status}");

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| {
                json.get(*key)
                    .and_then(serde_json::Value::as_str)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or(fallback),
        Err(_) if !body.is_empty() && body.chars().count() < MAX_PLAIN_ERROR_LEN => {
            body.to_string()
        }
        Err(_) => fallback,
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Unexpected(format!("Invalid backend response: {err}"))
        } else {
            RepositoryError::ConnectionError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_json_message_then_error() {
        assert_eq!(
            error_message(400, r#"{"status":400,"error":"Bad Request","message":"El precio debe ser mayor a 0"}"#),
            "El precio debe ser mayor a 0"
        );
        assert_eq!(
            error_message(409, r#"{"error":"Conflict"}"#),
            "Conflict"
        );
        assert_eq!(error_message(500, r#"{"path":"/api/products"}"#), "HTTP 500");
        assert_eq!(error_message(500, r#"{"message":""}"#), "HTTP 500");
    }

    #[test]
    fn short_plain_text_is_kept() {
        assert_eq!(error_message(502, "Bad gateway"), "Bad gateway");
        assert_eq!(error_message(502, ""), "HTTP 502");
        assert_eq!(error_message(502, &"x".repeat(250)), "HTTP 502");
    }

    #[test]
    fn not_found_is_distinguished() {
        let err = RepositoryError::from_response(404, r#"{"message":"Producto no encontrado"}"#);
        assert!(matches!(err, RepositoryError::NotFound(ref m) if m == "Producto no encontrado"));
        assert_eq!(err.status(), Some(404));

        let err = RepositoryError::from_response(409, "");
        assert!(matches!(err, RepositoryError::Api { status: 409, .. }));
        assert_eq!(err.to_string(), "HTTP 409");
    }
}
