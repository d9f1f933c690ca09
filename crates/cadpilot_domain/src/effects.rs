use crate::SessionId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    CreateSession {
        run_id: u64,
        title: String,
    },
    SyncSession {
        session_id: SessionId,
        previous_session_id: Option<SessionId>,
    },
    Generate {
        run_id: u64,
        prompt: String,
        session_id: Option<SessionId>,
    },
    LoadSessions,
    LoadMessages {
        session_id: SessionId,
    },
    RenameSession {
        session_id: SessionId,
        title: String,
    },
    DispatchCode {
        code: String,
    },
    ScheduleNoticeExpiry {
        token: u64,
    },
}
