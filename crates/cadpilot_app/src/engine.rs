use anyhow::Context as _;
use cadpilot_domain::{Action, AppState, BackendService, DISPATCH_NOTICE_TTL, Effect};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub async fn dispatch(&self, action: Action) -> anyhow::Result<()> {
        self.tx
            .send(EngineCommand::DispatchAction {
                action: Box::new(action),
            })
            .await
            .context("engine unavailable")
    }

    pub async fn state(&self) -> anyhow::Result<AppState> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::GetState { reply: tx })
            .await
            .context("engine unavailable")?;
        rx.await.context("engine stopped")
    }
}

pub enum EngineCommand {
    GetState {
        reply: oneshot::Sender<AppState>,
    },
    DispatchAction {
        action: Box<Action>,
    },
}

/// Owns the application state and runs effects. Actions arrive over a
/// command channel; every state change is published on a watch channel the
/// renderer observes.
pub struct Engine {
    state: AppState,
    backend: Arc<dyn BackendService>,
    states: watch::Sender<AppState>,
    tx: mpsc::Sender<EngineCommand>,
}

impl Engine {
    pub fn start(backend: Arc<dyn BackendService>) -> (EngineHandle, watch::Receiver<AppState>) {
        let (tx, mut rx) = mpsc::channel::<EngineCommand>(256);
        let (states, states_rx) = watch::channel(AppState::new());

        let mut engine = Self {
            state: AppState::new(),
            backend,
            states,
            tx: tx.clone(),
        };

        tokio::spawn(async move {
            engine.process_action_queue(Action::AppStarted).await;
            while let Some(cmd) = rx.recv().await {
                engine.handle(cmd).await;
            }
        });

        (EngineHandle { tx }, states_rx)
    }

    async fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::GetState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            EngineCommand::DispatchAction { action } => {
                self.process_action_queue(*action).await;
            }
        }
    }

    async fn process_action_queue(&mut self, initial: Action) {
        let mut actions = VecDeque::from([initial]);
        let mut effects = VecDeque::<Effect>::new();

        while let Some(action) = actions.pop_front() {
            let new_effects = self.state.apply(action);
            let _ = self.states.send(self.state.clone());

            effects.extend(new_effects);

            while let Some(effect) = effects.pop_front() {
                let mut followups = self.run_effect(effect).await;
                actions.append(&mut followups);
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> VecDeque<Action> {
        match effect {
            Effect::CreateSession { run_id, title } => {
                let backend = self.backend.clone();
                let created = tokio::task::spawn_blocking(move || backend.create_session(title))
                    .await
                    .ok()
                    .unwrap_or_else(|| Err("failed to join create session task".to_owned()));
                let action = match created {
                    Ok(id) => Action::SessionCreated { run_id, id },
                    Err(message) => {
                        tracing::warn!(error = %message, "session create failed");
                        Action::SessionCreateFailed { run_id, message }
                    }
                };
                VecDeque::from([action])
            }
            Effect::SyncSession {
                session_id,
                previous_session_id,
            } => {
                let backend = self.backend.clone();
                let synced = tokio::task::spawn_blocking(move || {
                    backend.sync_session(session_id, previous_session_id)
                })
                .await
                .ok()
                .unwrap_or_else(|| Err("failed to join sync session task".to_owned()));
                if let Err(message) = synced {
                    // The FreeCAD listener catches up on its next poll.
                    tracing::warn!(error = %message, "session sync failed");
                }
                VecDeque::new()
            }
            Effect::Generate {
                run_id,
                prompt,
                session_id,
            } => {
                // Generation can run for a while; it gets a dedicated thread
                // instead of a blocking-pool slot.
                let backend = self.backend.clone();
                let tx = self.tx.clone();
                std::thread::spawn(move || {
                    let action = match backend.generate(prompt.clone(), session_id) {
                        Ok(code) => Action::GenerationSucceeded { run_id, code },
                        Err(message) => Action::GenerationFailed {
                            run_id,
                            prompt,
                            message,
                        },
                    };
                    let _ = tx.blocking_send(EngineCommand::DispatchAction {
                        action: Box::new(action),
                    });
                });
                VecDeque::new()
            }
            Effect::LoadSessions => {
                let backend = self.backend.clone();
                let loaded = tokio::task::spawn_blocking(move || backend.list_sessions())
                    .await
                    .ok()
                    .unwrap_or_else(|| Err("failed to join list sessions task".to_owned()));
                let action = match loaded {
                    Ok(sessions) => Action::SessionsLoaded { sessions },
                    Err(message) => {
                        tracing::warn!(error = %message, "session list failed");
                        Action::SessionsLoadFailed { message }
                    }
                };
                VecDeque::from([action])
            }
            Effect::LoadMessages { session_id } => {
                let backend = self.backend.clone();
                let for_request = session_id.clone();
                let loaded =
                    tokio::task::spawn_blocking(move || backend.load_messages(for_request))
                        .await
                        .ok()
                        .unwrap_or_else(|| Err("failed to join load messages task".to_owned()));
                let action = match loaded {
                    Ok(messages) => Action::MessagesLoaded {
                        session_id,
                        messages,
                    },
                    Err(message) => {
                        tracing::warn!(error = %message, "message load failed");
                        Action::MessagesLoadFailed {
                            session_id,
                            message,
                        }
                    }
                };
                VecDeque::from([action])
            }
            Effect::RenameSession { session_id, title } => {
                let backend = self.backend.clone();
                let renamed =
                    tokio::task::spawn_blocking(move || backend.rename_session(session_id, title))
                        .await
                        .ok()
                        .unwrap_or_else(|| Err("failed to join rename session task".to_owned()));
                let action = match renamed {
                    Ok(entry) => Action::SessionRenamed {
                        id: entry.id,
                        title: entry.title,
                    },
                    Err(message) => Action::SessionRenameFailed { message },
                };
                VecDeque::from([action])
            }
            Effect::DispatchCode { code } => {
                let backend = self.backend.clone();
                let tx = self.tx.clone();
                std::thread::spawn(move || {
                    let action = match backend.run_in_freecad(code) {
                        Ok(message) => Action::DispatchSucceeded { message },
                        Err(message) => Action::DispatchFailed { message },
                    };
                    let _ = tx.blocking_send(EngineCommand::DispatchAction {
                        action: Box::new(action),
                    });
                });
                VecDeque::new()
            }
            Effect::ScheduleNoticeExpiry { token } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(DISPATCH_NOTICE_TTL).await;
                    let _ = tx
                        .send(EngineCommand::DispatchAction {
                            action: Box::new(Action::DispatchNoticeExpired { token }),
                        })
                        .await;
                });
                VecDeque::new()
            }
        }
    }
}
