use serde::{Deserialize, Serialize};

/// Request body for `POST /execute`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecuteRequest {
    pub content: String,
}

/// Success body for `POST /execute`. Extra fields are ignored; a non-string
/// `result` is a shape mismatch and decodes as an error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecuteResponse {
    pub result: String,
}

/// Body of the service's `GET /` greeting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: String,
}
