mod args;
mod category_cmd;
mod command;
mod session_cmd;

pub use args::Cli;
pub use category_cmd::{CategoryCmd, ImageArgs};
pub use command::Command;
pub use session_cmd::SessionCmd;

pub use args::parse;
