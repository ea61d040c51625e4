use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCmd {
    #[command(
        about = "Log in",
        long_about = "Log in with any email and password. The password is prompted for when not given."
    )]
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    #[command(
        about = "Create an account",
        long_about = "Create an account and log in. The password is prompted for, twice, when not given."
    )]
    Signup {
        #[arg(long, value_name = "NAME")]
        name: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    #[command(about = "Log out")]
    Logout,
    #[command(about = "Show the current session")]
    Show,
}
