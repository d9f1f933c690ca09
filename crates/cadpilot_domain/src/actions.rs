use crate::{SessionEntry, SessionId, SessionMessage};

#[derive(Clone, Debug)]
pub enum Action {
    AppStarted,

    DraftChanged {
        text: String,
    },
    SubmitPrompt {
        text: String,
    },
    SessionCreated {
        run_id: u64,
        id: SessionId,
    },
    SessionCreateFailed {
        run_id: u64,
        message: String,
    },
    GenerationSucceeded {
        run_id: u64,
        code: String,
    },
    GenerationFailed {
        run_id: u64,
        prompt: String,
        message: String,
    },

    SelectSession {
        id: SessionId,
    },
    NewChat,
    MessagesLoaded {
        session_id: SessionId,
        messages: Vec<SessionMessage>,
    },
    MessagesLoadFailed {
        session_id: SessionId,
        message: String,
    },

    SessionsLoaded {
        sessions: Vec<SessionEntry>,
    },
    SessionsLoadFailed {
        message: String,
    },
    RenameSession {
        id: SessionId,
        title: String,
    },
    SessionRenamed {
        id: SessionId,
        title: String,
    },
    SessionRenameFailed {
        message: String,
    },

    RunCode {
        code: String,
    },
    DispatchSucceeded {
        message: String,
    },
    DispatchFailed {
        message: String,
    },
    DispatchNoticeExpired {
        token: u64,
    },

    ClearError,
}
