mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pajaros", version, about = "JSON service for bird records")]
struct Cli {
    /// Path to the database file
    #[arg(long, env = "PAJAROS_DB", default_value = "pajaros.db", global = true)]
    db: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and the birds table
    Init,
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "PAJAROS_HOST", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "PAJAROS_PORT", default_value_t = 8080)]
        port: u16,
        /// Keep records in process memory instead of the database file
        #[arg(long)]
        in_memory: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    pajaros::logging::init(cli.log_json);

    let result = match cli.command {
        Commands::Init => commands::init::run(&cli.db),
        Commands::Serve {
            host,
            port,
            in_memory,
        } => commands::serve::run(&cli.db, &host, port, in_memory),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
