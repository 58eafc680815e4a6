use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request (4xx). The payload is kept verbatim.
    #[error("rejected by backend ({status}): {payload}")]
    Validation { status: u16, payload: Value },

    #[error("backend error ({status}): {body}")]
    Server { status: u16, body: String },

    /// A success response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-success response into the matching kind.
    pub fn from_status(status: u16, body: &str) -> Self {
        if (400..500).contains(&status) {
            let payload = serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(body.to_string()));
            ApiError::Validation { status, payload }
        } else {
            ApiError::Server {
                status,
                body: body.to_string(),
            }
        }
    }

    /// Human-readable reason from a validation payload, if it carries one.
    ///
    /// Understands `{"detail": "..."}`, FastAPI-style
    /// `{"detail": [{"msg": "..."}]}` and bare string payloads.
    pub fn detail(&self) -> Option<String> {
        let ApiError::Validation { payload, .. } = self else {
            return None;
        };
        match payload {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => match map.get("detail")? {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => {
                    let msgs: Vec<&str> = items
                        .iter()
                        .filter_map(|i| i.get("msg").and_then(Value::as_str))
                        .collect();
                    if msgs.is_empty() {
                        None
                    } else {
                        Some(msgs.join("; "))
                    }
                }
                other => Some(other.to_string()),
            },
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }
}

/// Status codes are mapped in `send` from the response itself, so a
/// transport error here never carries a body worth keeping.
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
