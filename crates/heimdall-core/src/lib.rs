pub mod rules;
pub mod state;
pub mod tool;
pub mod verdict;

pub use state::SessionState;
pub use tool::ToolCall;
pub use verdict::{Encoded, Verdict};
