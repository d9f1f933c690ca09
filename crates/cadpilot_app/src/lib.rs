mod engine;
mod render;
mod repl;

pub use engine::{Engine, EngineHandle};
pub use render::RenderTracker;
pub use repl::{HELP_TEXT, ReplCommand, parse_line, resolve_session};
