use crate::app::Stores;
use crate::cli::Command;

pub mod category;
pub mod session;

impl Command {
    pub async fn run(&self, stores: &Stores) -> anyhow::Result<()> {
        match self {
            Command::Category { cmd } => cmd.run(&stores.categories).await,
            Command::Session { cmd } => cmd.run(&stores.session).await,
        }
    }
}
