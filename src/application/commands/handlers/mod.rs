//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod generate_handlers;
mod history_handlers;

pub use generate_handlers::*;
pub use history_handlers::*;
