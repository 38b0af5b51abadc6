pub mod categories;
pub mod import;
pub mod init;
pub mod labels;
pub mod rules;
pub mod split;
pub mod status;
pub mod transactions;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kasboek", about = "Bank-statement import, classification and splitting ledger.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up kasboek: choose a data directory and initialize the database.
    Init {
        /// Path for kasboek data (default: ~/Documents/kasboek)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a semicolon-delimited bank statement export.
    Import {
        /// Path to the statement CSV file
        file: String,
        /// Remove the file after processing (upload semantics)
        #[arg(long)]
        delete_after: bool,
    },
    /// Apply all stored rules to already-imported transactions.
    ApplyRules,
    /// Split a transaction into two or more parts.
    Split {
        /// Id of the transaction to split
        id: String,
        /// Part spec, repeatable: AMOUNT[:CATEGORY[:LABEL[:PERSON]]]
        #[arg(long = "part", required = true)]
        parts: Vec<String>,
    },
    /// Manage classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage labels.
    Labels {
        #[command(subcommand)]
        command: LabelsCommands,
    },
    /// Inspect and reclassify transactions.
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommands,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Add a rule mapping a counterparty to a classification.
    Add {
        /// Counterparty holder name to match
        holder: String,
        /// Category name to assign
        #[arg(long)]
        category: String,
        /// Counterparty account number to also match on (bulk apply)
        #[arg(long)]
        account: Option<String>,
        /// Label name to assign
        #[arg(long)]
        label: Option<String>,
        /// Person to assign
        #[arg(long)]
        person: Option<String>,
    },
    List,
    /// Delete a rule by id.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    Add {
        name: String,
        #[arg(long)]
        icon: Option<String>,
        /// 'income' or 'expense'
        #[arg(long, default_value = "expense")]
        kind: String,
    },
    List,
    /// Delete a category; referencing transactions lose their category.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum LabelsCommands {
    Add { name: String },
    List,
}

#[derive(Subcommand)]
pub enum TransactionsCommands {
    /// List transactions without a category, newest first.
    Uncategorized,
    /// Set classification fields on one transaction.
    Classify {
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        person: Option<String>,
    },
}
