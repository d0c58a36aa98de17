mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Profiles => commands::list_profiles(&cli),
        Commands::Init => commands::init(&cli),
        Commands::Show { query, output } => {
            let patterns: Vec<&str> = query.iter().map(String::as_str).collect();
            commands::show(&cli, &patterns, *output)
        }
        Commands::Get { option } => commands::get(&cli, *option),
        Commands::Set { option, value } => commands::set(&cli, *option, *value),
        Commands::Legacy { query } => {
            let patterns: Vec<&str> = query.iter().map(String::as_str).collect();
            commands::legacy(&cli, &patterns)
        }
    }
}
