use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
#[group(required = false, multiple = false)]
pub struct ImageArgs {
    #[arg(long, value_name = "URL", help = "Remote image URL")]
    pub image_url: Option<String>,
    #[arg(
        long,
        value_name = "PATH",
        help = "Local image file, stored as an embedded data URI"
    )]
    pub image_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCmd {
    #[command(
        about = "List categories",
        long_about = "List categories in insertion order, optionally filtered by a case-insensitive name search."
    )]
    List {
        #[arg(
            long,
            short = 's',
            value_name = "TERM",
            help = "Only show names containing TERM"
        )]
        search: Option<String>,
    },
    #[command(about = "Show one category")]
    Get {
        #[arg(value_name = "ID")]
        id: String,
    },
    #[command(about = "Create a category")]
    Add {
        #[arg(long, value_name = "NAME")]
        name: String,
        #[arg(
            long,
            value_name = "N",
            allow_hyphen_values = true,
            help = "Number of items in the category"
        )]
        item_count: String,
        #[command(flatten)]
        image: ImageArgs,
    },
    #[command(
        about = "Edit a category",
        long_about = "Edit a category. Fields not given keep their current value."
    )]
    Update {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        item_count: Option<String>,
        #[command(flatten)]
        image: ImageArgs,
    },
    #[command(about = "Delete a category")]
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}
