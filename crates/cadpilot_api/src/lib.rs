//! Wire types for the CadPilot backend HTTP API.
//!
//! Field names follow the server's JSON exactly; the client-side vocabulary
//! lives in `cadpilot_domain` and is mapped at the transport boundary.

use serde::{Deserialize, Serialize};

/// `POST /generate`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub code: String,
}

/// `POST /run-in-freecad`. The payload field is named `prompt` even though
/// it carries generated code; the server forwards it to the FreeCAD
/// listener verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRequest {
    pub prompt: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub message: String,
}

/// `POST /sessions`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub id: String,
}

/// `POST /sessions/{id}/sync`. `previous_session_id` is serialized even when
/// null; the server distinguishes "no previous session" from an absent field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncSessionRequest {
    pub previous_session_id: Option<String>,
}

/// `GET /sessions` item and `PATCH /sessions/{id}` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
}

/// `PATCH /sessions/{id}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameSessionRequest {
    pub title: String,
}

/// `GET /sessions/{id}/messages` item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub role: String,
    pub content: String,
}

/// Body of a non-2xx response. `detail` is what the server wants shown to
/// the user; bodies without it get a generic client-side message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
