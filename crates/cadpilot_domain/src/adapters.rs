use crate::{SessionEntry, SessionId, SessionMessage};

/// The seam between the orchestration core and the remote backend. All
/// methods block until the request resolves; callers are expected to run
/// them off the event loop. Errors are user-facing message strings: the
/// server-provided `detail` when there is one, a generic description
/// otherwise.
pub trait BackendService: Send + Sync {
    fn generate(&self, prompt: String, session_id: Option<SessionId>) -> Result<String, String>;

    fn run_in_freecad(&self, code: String) -> Result<String, String>;

    fn create_session(&self, title: String) -> Result<SessionId, String>;

    fn sync_session(
        &self,
        session_id: SessionId,
        previous_session_id: Option<SessionId>,
    ) -> Result<(), String>;

    fn list_sessions(&self) -> Result<Vec<SessionEntry>, String>;

    fn load_messages(&self, session_id: SessionId) -> Result<Vec<SessionMessage>, String>;

    fn rename_session(&self, session_id: SessionId, title: String)
    -> Result<SessionEntry, String>;
}
