use cadpilot_app::{Engine, RenderTracker, ReplCommand, parse_line, resolve_session};
use cadpilot_backend::HttpBackend;
use cadpilot_domain::Action;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let base_url = cadpilot_backend::backend_base_url()?;
    let backend = Arc::new(HttpBackend::new(base_url.clone())?);
    tracing::info!(%base_url, "cadpilot starting");

    let (engine, mut states) = Engine::start(backend);

    // rustyline blocks on stdin, so it lives on its own thread and feeds
    // lines into the event loop.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        let mut editor = match rustyline::DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                tracing::error!(error = %err, "failed to initialize line editor");
                return;
            }
        };
        loop {
            match editor.readline("cadpilot> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    tracing::error!(error = %err, "readline failed");
                    break;
                }
            }
        }
    });

    let mut tracker = RenderTracker::new();
    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                for line in tracker.render_delta(&state) {
                    println!("{line}");
                }
            }
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match parse_line(&line) {
                    ReplCommand::Quit => break,
                    ReplCommand::Empty => {}
                    ReplCommand::Help => println!("{}", cadpilot_app::HELP_TEXT),
                    ReplCommand::Prompt(text) => {
                        engine.dispatch(Action::SubmitPrompt { text }).await?;
                    }
                    ReplCommand::Sessions => {
                        let state = engine.state().await?;
                        if state.sessions.is_empty() {
                            println!("no sessions yet");
                        }
                        for (index, session) in state.sessions.iter().enumerate() {
                            let marker = if state.active_session.as_ref() == Some(&session.id) {
                                "*"
                            } else {
                                " "
                            };
                            println!("{marker} {}. {}", index + 1, session.title);
                        }
                    }
                    ReplCommand::Open(target) => {
                        let state = engine.state().await?;
                        match resolve_session(&state, &target) {
                            Some(id) => engine.dispatch(Action::SelectSession { id }).await?,
                            None => println!("no such session: {target}"),
                        }
                    }
                    ReplCommand::New => {
                        engine.dispatch(Action::NewChat).await?;
                        println!("started a new chat");
                    }
                    ReplCommand::Rename(title) => {
                        let state = engine.state().await?;
                        match state.active_session.clone() {
                            Some(id) => engine.dispatch(Action::RenameSession { id, title }).await?,
                            None => println!("no active session to rename"),
                        }
                    }
                    ReplCommand::Run(index) => {
                        let state = engine.state().await?;
                        match state.assistant_code(index) {
                            Some(code) => {
                                let code = code.to_owned();
                                engine.dispatch(Action::RunCode { code }).await?;
                            }
                            None => println!("no generated code to run"),
                        }
                    }
                    ReplCommand::Clear => engine.dispatch(Action::ClearError).await?,
                    ReplCommand::Unknown(input) => {
                        println!("unknown command: {input} (try /help)");
                    }
                }
            }
        }
    }

    Ok(())
}
