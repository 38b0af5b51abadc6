mod cli;
mod db;
mod error;
mod importer;
mod models;
mod normalizer;
mod rules;
mod settings;
mod splitter;

use clap::Parser;

use cli::{CategoriesCommands, Cli, Commands, LabelsCommands, RulesCommands, TransactionsCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file, delete_after } => cli::import::run(&file, delete_after),
        Commands::ApplyRules => cli::rules::apply(),
        Commands::Split { id, parts } => cli::split::run(&id, &parts),
        Commands::Rules { command } => match command {
            RulesCommands::Add {
                holder,
                category,
                account,
                label,
                person,
            } => cli::rules::add(
                &holder,
                &category,
                account.as_deref(),
                label.as_deref(),
                person.as_deref(),
            ),
            RulesCommands::List => cli::rules::list(),
            RulesCommands::Delete { id } => cli::rules::delete(id),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add { name, icon, kind } => {
                cli::categories::add(&name, icon.as_deref(), &kind)
            }
            CategoriesCommands::List => cli::categories::list(),
            CategoriesCommands::Delete { id } => cli::categories::delete(id),
        },
        Commands::Labels { command } => match command {
            LabelsCommands::Add { name } => cli::labels::add(&name),
            LabelsCommands::List => cli::labels::list(),
        },
        Commands::Transactions { command } => match command {
            TransactionsCommands::Uncategorized => cli::transactions::uncategorized(),
            TransactionsCommands::Classify {
                id,
                category,
                label,
                person,
            } => cli::transactions::classify(
                &id,
                category.as_deref(),
                label.as_deref(),
                person.as_deref(),
            ),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
