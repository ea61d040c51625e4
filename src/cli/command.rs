use clap::Subcommand;

use crate::cli::category_cmd::CategoryCmd;
use crate::cli::session_cmd::SessionCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Category management commands",
        long_about = "List, search, inspect, create, edit and delete product categories."
    )]
    Category {
        #[command(subcommand)]
        cmd: CategoryCmd,
    },
    #[command(
        about = "Session commands",
        long_about = "Log in, sign up, log out and show the current session. Credentials are not verified."
    )]
    Session {
        #[command(subcommand)]
        cmd: SessionCmd,
    },
}
