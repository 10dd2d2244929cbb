use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Smart Murti utilities - trunk must be installed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Build the frontend and run the launcher")]
    Launch {
        /// Forwarded to the launcher; uses the local JSON store when absent
        #[arg(long)]
        database_url: Option<String>,
    },
    #[command(about = "Build a release bundle into ./SmartMurti")]
    Dist { target_triple: Option<String> },
}
