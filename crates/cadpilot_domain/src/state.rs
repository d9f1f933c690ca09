#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub(crate) String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// One turn in the active conversation. `local_id` is assigned at insertion
/// and identifies the entry on this client; `id` is the backend identifier
/// and is present only on messages hydrated from the session store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatMessage {
    pub local_id: u64,
    pub id: Option<String>,
    pub role: MessageRole,
    pub content: String,
}

/// A message as returned by the session store, before it is given a local id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionMessage {
    pub id: Option<String>,
    pub role: MessageRole,
    pub content: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionEntry {
    pub id: SessionId,
    pub title: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationStatus {
    Idle,
    Running,
}

/// Transient "sent to FreeCAD" confirmation. The token ties the scheduled
/// expiry to this notice so a late timer cannot clear a newer one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchNotice {
    pub text: String,
    pub token: u64,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub sessions: Vec<SessionEntry>,
    pub active_session: Option<SessionId>,
    pub draft: String,
    pub generation_status: OperationStatus,
    pub dispatch_status: OperationStatus,
    pub last_error: Option<String>,
    pub directory_error: Option<String>,
    pub dispatch_notice: Option<DispatchNotice>,
    pub(crate) next_local_message_id: u64,
    pub(crate) pending_prompt: Option<String>,
    pub(crate) active_run_id: Option<u64>,
    pub(crate) next_run_id: u64,
    pub(crate) next_notice_token: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            sessions: Vec::new(),
            active_session: None,
            draft: String::new(),
            generation_status: OperationStatus::Idle,
            dispatch_status: OperationStatus::Idle,
            last_error: None,
            directory_error: None,
            dispatch_notice: None,
            next_local_message_id: 1,
            pending_prompt: None,
            active_run_id: None,
            next_run_id: 1,
            next_notice_token: 1,
        }
    }

    /// Content of the n-th assistant message (1-based), or the most recent
    /// one when `index` is `None`.
    pub fn assistant_code(&self, index: Option<usize>) -> Option<&str> {
        let mut scripts = self
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant);
        match index {
            Some(n) => scripts.nth(n.checked_sub(1)?).map(|m| m.content.as_str()),
            None => scripts.next_back().map(|m| m.content.as_str()),
        }
    }

    pub(crate) fn push_message(&mut self, role: MessageRole, content: String) {
        let local_id = self.next_local_message_id;
        self.next_local_message_id = self.next_local_message_id.saturating_add(1);
        self.messages.push(ChatMessage {
            local_id,
            id: None,
            role,
            content,
        });
    }

    pub(crate) fn replace_messages(&mut self, fetched: Vec<SessionMessage>) {
        self.messages.clear();
        for message in fetched {
            let local_id = self.next_local_message_id;
            self.next_local_message_id = self.next_local_message_id.saturating_add(1);
            self.messages.push(ChatMessage {
                local_id,
                id: message.id,
                role: message.role,
                content: message.content,
            });
        }
    }

    /// Drops any in-flight generation: late completions carrying the old run
    /// id no longer match and are discarded by the reducer.
    pub(crate) fn invalidate_generation(&mut self) {
        self.active_run_id = None;
        self.pending_prompt = None;
        self.generation_status = OperationStatus::Idle;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
