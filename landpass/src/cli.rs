use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default one
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Base url of the location server, overrides the configuration file
    #[arg(short, long)]
    pub server: Option<String>,
    /// Print HTML fragments instead of plain text
    #[arg(long)]
    pub html: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Submit a new location and show the upcoming overpasses")]
    Submit {
        #[arg(long, allow_hyphen_values = true)]
        latitude: String,
        #[arg(long, allow_hyphen_values = true)]
        longitude: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    #[command(about = "List the saved locations")]
    Locations,
    #[command(about = "Replay a script of page events and show the resulting page")]
    Session {
        /// Script to replay. Reads from stdin if not given
        script: Option<PathBuf>,
    },
}
