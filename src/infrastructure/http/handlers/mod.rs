//! HTTP Handlers

mod generate;
mod history;
mod root;

pub use generate::*;
pub use history::*;
pub use root::*;
