use cadpilot_domain::{AppState, ChatMessage, MessageRole};

/// Turns state snapshots into terminal output, printing each message,
/// error, and notice exactly once. Message local ids are monotonic even
/// across a session switch, so "newer than the last rendered id" covers
/// both appends and wholesale replacement.
pub struct RenderTracker {
    last_message_local_id: u64,
    last_notice_token: u64,
    seen_error: Option<String>,
    seen_directory_error: Option<String>,
}

impl RenderTracker {
    pub fn new() -> Self {
        Self {
            last_message_local_id: 0,
            last_notice_token: 0,
            seen_error: None,
            seen_directory_error: None,
        }
    }

    pub fn render_delta(&mut self, state: &AppState) -> Vec<String> {
        let mut lines = Vec::new();

        for message in &state.messages {
            if message.local_id <= self.last_message_local_id {
                continue;
            }
            self.last_message_local_id = message.local_id;
            lines.push(format_message(message));
        }

        if state.last_error != self.seen_error {
            if let Some(error) = &state.last_error {
                lines.push(format!("error: {error}"));
            }
            self.seen_error = state.last_error.clone();
        }

        if state.directory_error != self.seen_directory_error {
            if let Some(error) = &state.directory_error {
                lines.push(format!("session error: {error}"));
            }
            self.seen_directory_error = state.directory_error.clone();
        }

        if let Some(notice) = &state.dispatch_notice
            && notice.token > self.last_notice_token
        {
            self.last_notice_token = notice.token;
            lines.push(format!("* {}", notice.text));
        }

        lines
    }
}

impl Default for RenderTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn format_message(message: &ChatMessage) -> String {
    match message.role {
        MessageRole::User => format!("you> {}", message.content),
        MessageRole::Assistant => format!(
            "--- generated code ---\n{}\n----------------------",
            message.content
        ),
    }
}
