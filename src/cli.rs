use clap::{Parser, Subcommand};

use crate::keywords::SelectionMode;

#[derive(Parser, Debug)]
#[command(
    name = "autopost",
    version,
    about = "Draft blog posts with an LLM and publish them to WordPress"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a keyword, generate a draft and save it to the drafts directory
    Generate {
        #[arg(long, value_enum, default_value_t = SelectionMode::Daily)]
        mode: SelectionMode,
    },
    /// Convert the latest draft to HTML and submit it to WordPress
    Publish {
        #[arg(long, help = "Write the payload to a JSON file instead of submitting it")]
        dry_run: bool,
    },
}
