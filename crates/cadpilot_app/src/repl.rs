use cadpilot_domain::{AppState, SessionId};

/// One line of REPL input. Anything that does not start with `/` is a
/// prompt for the generator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReplCommand {
    Prompt(String),
    Sessions,
    Open(String),
    New,
    Rename(String),
    Run(Option<usize>),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Prompt(trimmed.to_owned());
    }

    let (command, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let rest = rest.trim();

    match command {
        "/sessions" => ReplCommand::Sessions,
        "/open" if !rest.is_empty() => ReplCommand::Open(rest.to_owned()),
        "/new" => ReplCommand::New,
        "/rename" if !rest.is_empty() => ReplCommand::Rename(rest.to_owned()),
        "/run" => {
            if rest.is_empty() {
                ReplCommand::Run(None)
            } else {
                match rest.parse::<usize>() {
                    Ok(index) => ReplCommand::Run(Some(index)),
                    Err(_) => ReplCommand::Unknown(trimmed.to_owned()),
                }
            }
        }
        "/clear" => ReplCommand::Clear,
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_owned()),
    }
}

/// Resolves a `/open` target: a 1-based index into the directory listing,
/// or a session id.
pub fn resolve_session(state: &AppState, target: &str) -> Option<SessionId> {
    if let Ok(index) = target.parse::<usize>() {
        return state
            .sessions
            .get(index.checked_sub(1)?)
            .map(|s| s.id.clone());
    }
    state
        .sessions
        .iter()
        .find(|s| s.id.as_str() == target)
        .map(|s| s.id.clone())
}

pub const HELP_TEXT: &str = "\
<prompt>           generate FreeCAD code for the prompt
/run [n]           send the latest (or n-th) generated script to FreeCAD
/sessions          list sessions
/open <n|id>       switch to a session
/new               start a new chat
/rename <title>    rename the active session
/clear             clear error messages
/help              show this help
/quit              exit";

#[cfg(test)]
mod tests {
    use super::*;
    use cadpilot_domain::{Action, SessionEntry};

    #[test]
    fn plain_text_is_a_prompt() {
        assert_eq!(
            parse_line("  make a cube  "),
            ReplCommand::Prompt("make a cube".to_owned())
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(parse_line("   "), ReplCommand::Empty);
    }

    #[test]
    fn commands_parse_with_arguments() {
        assert_eq!(parse_line("/sessions"), ReplCommand::Sessions);
        assert_eq!(parse_line("/open 2"), ReplCommand::Open("2".to_owned()));
        assert_eq!(
            parse_line("/rename Bracket ideas"),
            ReplCommand::Rename("Bracket ideas".to_owned())
        );
        assert_eq!(parse_line("/run"), ReplCommand::Run(None));
        assert_eq!(parse_line("/run 3"), ReplCommand::Run(Some(3)));
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
        assert_eq!(parse_line("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn bad_input_is_unknown() {
        assert_eq!(
            parse_line("/open"),
            ReplCommand::Unknown("/open".to_owned())
        );
        assert_eq!(
            parse_line("/run two"),
            ReplCommand::Unknown("/run two".to_owned())
        );
        assert_eq!(
            parse_line("/frobnicate"),
            ReplCommand::Unknown("/frobnicate".to_owned())
        );
    }

    #[test]
    fn resolve_session_accepts_index_or_id() {
        let mut state = AppState::new();
        state.apply(Action::SessionsLoaded {
            sessions: vec![
                SessionEntry {
                    id: SessionId::from_string("s-a".to_owned()),
                    title: "First".to_owned(),
                },
                SessionEntry {
                    id: SessionId::from_string("s-b".to_owned()),
                    title: "Second".to_owned(),
                },
            ],
        });

        assert_eq!(
            resolve_session(&state, "2").map(|id| id.as_str().to_owned()),
            Some("s-b".to_owned())
        );
        assert_eq!(
            resolve_session(&state, "s-a").map(|id| id.as_str().to_owned()),
            Some("s-a".to_owned())
        );
        assert_eq!(resolve_session(&state, "0"), None);
        assert_eq!(resolve_session(&state, "3"), None);
        assert_eq!(resolve_session(&state, "s-missing"), None);
    }
}
