mod actions;
pub use actions::Action;

mod adapters;
pub use adapters::BackendService;

mod effects;
pub use effects::Effect;

mod state;
pub use state::*;

mod reducer;
pub use reducer::derive_session_title;

pub const SESSION_TITLE_MAX_CHARS: usize = 30;

/// How long a dispatch success notice stays visible before it self-clears.
pub const DISPATCH_NOTICE_TTL: std::time::Duration = std::time::Duration::from_secs(3);
