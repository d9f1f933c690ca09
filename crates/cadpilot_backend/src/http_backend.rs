use std::time::Duration;

use anyhow::Context as _;
use cadpilot_api::{
    CreateSessionRequest, CreateSessionResponse, ErrorBody, GenerateRequest, GenerateResponse,
    MessageRecord, RenameSessionRequest, RunRequest, RunResponse, SessionSummary,
    SyncSessionRequest,
};
use cadpilot_domain::{BackendService, MessageRole, SessionEntry, SessionId, SessionMessage};
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocking HTTP client for the generation backend. Methods run on worker
/// threads; errors come back as user-facing strings, preferring the server's
/// `detail` over a generic status line.
pub struct HttpBackend {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn read_json<T: DeserializeOwned>(
    context: &str,
    res: reqwest::blocking::Response,
) -> Result<T, String> {
    let status = res.status();
    if !status.is_success() {
        let detail = res.json::<ErrorBody>().ok().and_then(|body| body.detail);
        return Err(detail.unwrap_or_else(|| format!("{context} failed with status {status}")));
    }
    res.json::<T>()
        .map_err(|err| format!("{context} response parse failed: {err}"))
}

fn read_ok(context: &str, res: reqwest::blocking::Response) -> Result<(), String> {
    let status = res.status();
    if !status.is_success() {
        let detail = res.json::<ErrorBody>().ok().and_then(|body| body.detail);
        return Err(detail.unwrap_or_else(|| format!("{context} failed with status {status}")));
    }
    Ok(())
}

fn session_message(record: MessageRecord) -> Result<SessionMessage, String> {
    let role = MessageRole::parse(&record.role)
        .ok_or_else(|| format!("session store returned unknown role {:?}", record.role))?;
    Ok(SessionMessage {
        id: record.id,
        role,
        content: record.content,
    })
}

impl BackendService for HttpBackend {
    fn generate(&self, prompt: String, session_id: Option<SessionId>) -> Result<String, String> {
        let res = self
            .http
            .post(self.url("/generate"))
            .json(&GenerateRequest {
                prompt,
                session_id: session_id.map(|id| id.as_str().to_owned()),
            })
            .send()
            .map_err(|err| format!("generate request failed: {err}"))?;
        let parsed: GenerateResponse = read_json("generate", res)?;
        Ok(parsed.code)
    }

    fn run_in_freecad(&self, code: String) -> Result<String, String> {
        let res = self
            .http
            .post(self.url("/run-in-freecad"))
            .json(&RunRequest { prompt: code })
            .send()
            .map_err(|err| format!("run-in-freecad request failed: {err}"))?;
        let parsed: RunResponse = read_json("run-in-freecad", res)?;
        Ok(parsed.message)
    }

    fn create_session(&self, title: String) -> Result<SessionId, String> {
        let res = self
            .http
            .post(self.url("/sessions"))
            .json(&CreateSessionRequest { title })
            .send()
            .map_err(|err| format!("create session request failed: {err}"))?;
        let parsed: CreateSessionResponse = read_json("create session", res)?;
        Ok(SessionId::from_string(parsed.id))
    }

    fn sync_session(
        &self,
        session_id: SessionId,
        previous_session_id: Option<SessionId>,
    ) -> Result<(), String> {
        let res = self
            .http
            .post(self.url(&format!("/sessions/{}/sync", session_id.as_str())))
            .json(&SyncSessionRequest {
                previous_session_id: previous_session_id.map(|id| id.as_str().to_owned()),
            })
            .send()
            .map_err(|err| format!("sync session request failed: {err}"))?;
        read_ok("sync session", res)
    }

    fn list_sessions(&self) -> Result<Vec<SessionEntry>, String> {
        let res = self
            .http
            .get(self.url("/sessions"))
            .send()
            .map_err(|err| format!("list sessions request failed: {err}"))?;
        let parsed: Vec<SessionSummary> = read_json("list sessions", res)?;
        Ok(parsed
            .into_iter()
            .map(|summary| SessionEntry {
                id: SessionId::from_string(summary.id),
                title: summary.title,
            })
            .collect())
    }

    fn load_messages(&self, session_id: SessionId) -> Result<Vec<SessionMessage>, String> {
        let res = self
            .http
            .get(self.url(&format!("/sessions/{}/messages", session_id.as_str())))
            .send()
            .map_err(|err| format!("load messages request failed: {err}"))?;
        let parsed: Vec<MessageRecord> = read_json("load messages", res)?;
        parsed.into_iter().map(session_message).collect()
    }

    fn rename_session(
        &self,
        session_id: SessionId,
        title: String,
    ) -> Result<SessionEntry, String> {
        let res = self
            .http
            .patch(self.url(&format!("/sessions/{}", session_id.as_str())))
            .json(&RenameSessionRequest { title })
            .send()
            .map_err(|err| format!("rename session request failed: {err}"))?;
        let parsed: SessionSummary = read_json("rename session", res)?;
        Ok(SessionEntry {
            id: SessionId::from_string(parsed.id),
            title: parsed.title,
        })
    }
}
