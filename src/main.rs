mod categories;
mod cli;
mod db;
mod error;
mod facade;
mod fmt;
mod logging;
mod models;
mod repository;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};
use models::NewExpense;
use repository::ExpenseRepository;
use settings::load_settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init_tracing(cli.debug) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let settings = load_settings();
    let config = settings.store_config(cli.db.as_deref());

    // Nothing is served against a store that failed to initialize.
    if let Err(e) = db::initialize(&config) {
        tracing::error!(error = %e, "store initialization failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    let repo = ExpenseRepository::new(config.clone());

    let result = match cli.command {
        Commands::Init => cli::init::run(settings, &config, cli.db.as_deref()),
        Commands::Add {
            date,
            amount,
            category,
            subcategory,
            note,
        } => {
            let expense = NewExpense::new(date, amount, category)
                .subcategory(subcategory)
                .note(note);
            cli::expenses::add(&repo, expense, cli.json).await
        }
        Commands::List { range } => cli::expenses::list(&repo, &range, cli.json).await,
        Commands::Summary { range, category } => {
            cli::summary::run(&repo, &range, category.as_deref(), cli.json).await
        }
        Commands::Categories => cli::categories::run(&settings, cli.json),
        Commands::Export { range, output } => cli::export::run(&repo, &range, output).await,
        Commands::Backup { output } => cli::backup::run(&config, output),
        Commands::Status => cli::status::run(&settings, &repo).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
