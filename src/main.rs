mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::context::Context;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let result = Context::init(&args).and_then(|ctx| match &args.command {
        Commands::Describe { name } => cli::commands::describe::execute(&ctx, name),
        Commands::Ls { json } => cli::commands::list::execute(&ctx, *json),
        Commands::New { kind } => cli::commands::new::execute(&ctx, kind),
        Commands::Nuke => cli::commands::remove::execute_nuke(&ctx),
        Commands::Rm { name } => cli::commands::remove::execute_rm(&ctx, name),
        Commands::Sign {
            name,
            signer,
            issue,
        } => cli::commands::sign::execute(&ctx, name, signer, issue),
        Commands::Trust { name, to_trust } => {
            cli::commands::trust::execute(&ctx, name, to_trust)
        }
    });

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
