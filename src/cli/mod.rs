pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blog-creator-api")]
#[command(about = "Blog Creator API - per-user blog records over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Use in-memory stores instead of Postgres (development only)")]
        memory: bool,
    },

    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Create a user account")]
    CreateUser {
        #[arg(long, help = "Login email")]
        email: String,
        #[arg(long, help = "Login password")]
        password: String,
        #[arg(long, default_value = "", help = "Display name")]
        name: String,
        #[arg(long, help = "Grant staff and superuser flags")]
        superuser: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { memory } => commands::serve::handle(memory).await,
        Commands::Migrate => commands::migrate::handle().await,
        Commands::CreateUser { email, password, name, superuser } => {
            commands::user::handle(&email, &password, &name, superuser).await
        }
    }
}
