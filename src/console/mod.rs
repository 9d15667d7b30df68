//! Line-oriented console over the raid service and kiosk.

mod parser;
mod session;

pub use parser::{Command, USAGE};
pub use session::Session;
