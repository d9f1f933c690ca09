use crate::{Action, AppState, DispatchNotice, Effect, MessageRole, OperationStatus};

mod title;

pub use title::derive_session_title;

impl AppState {
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::AppStarted => vec![Effect::LoadSessions],

            Action::DraftChanged { text } => {
                self.draft = text;
                Vec::new()
            }

            Action::SubmitPrompt { text } => {
                let prompt = text.trim();
                if prompt.is_empty() {
                    return Vec::new();
                }
                // Single-flight: a submission while one is pending is a
                // no-op, not a queue.
                if self.generation_status == OperationStatus::Running {
                    return Vec::new();
                }

                let prompt = prompt.to_owned();
                let run_id = self.next_run_id;
                self.next_run_id = self.next_run_id.saturating_add(1);
                self.active_run_id = Some(run_id);
                self.generation_status = OperationStatus::Running;
                self.last_error = None;

                match self.active_session.clone() {
                    Some(session_id) => {
                        self.push_message(MessageRole::User, prompt.clone());
                        self.draft.clear();
                        vec![Effect::Generate {
                            run_id,
                            prompt,
                            session_id: Some(session_id),
                        }]
                    }
                    None => {
                        // Lazy session creation: the optimistic insert and the
                        // generate call wait for the create to resolve.
                        let title = derive_session_title(&prompt);
                        self.pending_prompt = Some(prompt);
                        vec![Effect::CreateSession { run_id, title }]
                    }
                }
            }

            Action::SessionCreated { run_id, id } => {
                if self.active_run_id != Some(run_id) {
                    return Vec::new();
                }
                self.active_session = Some(id.clone());
                let Some(prompt) = self.pending_prompt.take() else {
                    return vec![Effect::LoadSessions];
                };
                self.push_message(MessageRole::User, prompt.clone());
                self.draft.clear();
                vec![
                    Effect::SyncSession {
                        session_id: id.clone(),
                        previous_session_id: None,
                    },
                    Effect::Generate {
                        run_id,
                        prompt,
                        session_id: Some(id),
                    },
                    Effect::LoadSessions,
                ]
            }

            Action::SessionCreateFailed { run_id, .. } => {
                if self.active_run_id != Some(run_id) {
                    return Vec::new();
                }
                // Non-fatal: generate without a session context so the user
                // still sees output locally.
                let Some(prompt) = self.pending_prompt.take() else {
                    return Vec::new();
                };
                self.push_message(MessageRole::User, prompt.clone());
                self.draft.clear();
                vec![Effect::Generate {
                    run_id,
                    prompt,
                    session_id: None,
                }]
            }

            Action::GenerationSucceeded { run_id, code } => {
                if self.active_run_id != Some(run_id) {
                    return Vec::new();
                }
                self.push_message(MessageRole::Assistant, code);
                self.active_run_id = None;
                self.generation_status = OperationStatus::Idle;
                Vec::new()
            }

            Action::GenerationFailed {
                run_id,
                prompt,
                message,
            } => {
                if self.active_run_id != Some(run_id) {
                    return Vec::new();
                }
                // The optimistic user message stays: the conversation keeps a
                // record of the attempt. The draft gets the prompt back so
                // the user can edit and retry.
                self.last_error = Some(message);
                self.draft = prompt;
                self.active_run_id = None;
                self.generation_status = OperationStatus::Idle;
                Vec::new()
            }

            Action::SelectSession { id } => {
                self.invalidate_generation();
                self.last_error = None;
                self.active_session = Some(id.clone());
                vec![Effect::LoadMessages { session_id: id }, Effect::LoadSessions]
            }

            Action::NewChat => {
                self.invalidate_generation();
                self.active_session = None;
                self.messages.clear();
                self.draft.clear();
                self.last_error = None;
                vec![Effect::LoadSessions]
            }

            Action::MessagesLoaded {
                session_id,
                messages,
            } => {
                // A hydration that resolves after another switch is stale.
                if self.active_session.as_ref() != Some(&session_id) {
                    return Vec::new();
                }
                self.replace_messages(messages);
                Vec::new()
            }

            // Stale-but-safe: keep whatever the store held rather than
            // flashing an empty conversation on a transient failure.
            Action::MessagesLoadFailed { .. } => Vec::new(),

            Action::SessionsLoaded { sessions } => {
                self.sessions = sessions;
                Vec::new()
            }

            Action::SessionsLoadFailed { .. } => Vec::new(),

            Action::RenameSession { id, title } => {
                let title = title.trim().to_owned();
                if title.is_empty() {
                    return Vec::new();
                }
                vec![Effect::RenameSession {
                    session_id: id,
                    title,
                }]
            }

            Action::SessionRenamed { id, title } => {
                if let Some(entry) = self.sessions.iter_mut().find(|s| s.id == id) {
                    entry.title = title;
                }
                self.directory_error = None;
                Vec::new()
            }

            Action::SessionRenameFailed { message } => {
                self.directory_error = Some(message);
                Vec::new()
            }

            Action::RunCode { code } => {
                if code.trim().is_empty() {
                    return Vec::new();
                }
                if self.dispatch_status == OperationStatus::Running {
                    return Vec::new();
                }
                self.dispatch_status = OperationStatus::Running;
                vec![Effect::DispatchCode { code }]
            }

            Action::DispatchSucceeded { message } => {
                self.dispatch_status = OperationStatus::Idle;
                let token = self.next_notice_token;
                self.next_notice_token = self.next_notice_token.saturating_add(1);
                self.dispatch_notice = Some(DispatchNotice {
                    text: message,
                    token,
                });
                vec![Effect::ScheduleNoticeExpiry { token }]
            }

            Action::DispatchFailed { message } => {
                self.dispatch_status = OperationStatus::Idle;
                self.last_error = Some(message);
                Vec::new()
            }

            Action::DispatchNoticeExpired { token } => {
                if self
                    .dispatch_notice
                    .as_ref()
                    .is_some_and(|notice| notice.token == token)
                {
                    self.dispatch_notice = None;
                }
                Vec::new()
            }

            Action::ClearError => {
                self.last_error = None;
                self.directory_error = None;
                Vec::new()
            }
        }
    }
}
