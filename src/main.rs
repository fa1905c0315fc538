use std::io;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use expense_tracker::config::Config;
use expense_tracker::core::{Category, Expense, summarize};
use expense_tracker::interactive::Session;
use expense_tracker::report::{render_json, render_text};
use expense_tracker::storage::{CsvFileStore, ExpenseStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "expenses",
    about = "Log expenses and summarize them against a budget"
)]
struct Cli {
    /// Path of the TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
        /// One of Food, Clothing, Entertainment, Rent
        #[arg(long)]
        category: Category,
    },
    /// List all recorded expenses
    List,
    /// Print the monthly summary report
    Summary {
        /// Month number to report on (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Date to treat as today, as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
        /// Abort instead of skipping malformed records
        #[arg(long)]
        strict: bool,
    },
    /// Store a new budget in the configuration file
    SetBudget { amount: f64 },
    /// Run the menu-driven prompt (default)
    Interactive,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "expense_tracker=info"
    } else {
        "expense_tracker=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config;
    let mut cfg = Config::load(&config_path)?;
    let mut store = CsvFileStore::new(cfg.expense_file.clone());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Add {
            name,
            amount,
            category,
        } => {
            let expense = Expense::new(name, category, amount)?;
            store.append(&expense)?;
            println!("Saved expense: {expense}");
        }
        Commands::List => {
            let loaded = store.load()?;
            for rejected in &loaded.rejected {
                eprintln!("warning: skipped malformed record at {rejected}");
            }
            for expense in loaded.log.expenses() {
                println!("{expense}");
            }
        }
        Commands::Summary {
            month,
            date,
            json,
            strict,
        } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let month = month.unwrap_or(today.month());
            let loaded = store.load()?;
            let log = if strict {
                loaded.into_strict()?
            } else {
                for rejected in &loaded.rejected {
                    eprintln!("warning: skipped malformed record at {rejected}");
                }
                loaded.log
            };
            let report = summarize(log.expenses(), &cfg.budget_config(), today, month)?;
            if json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
        }
        Commands::SetBudget { amount } => {
            cfg.budget = amount;
            cfg.save(&config_path)?;
            println!("Budget set to ${amount:.2}");
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut session = Session::new(
                stdin.lock(),
                io::stdout(),
                store,
                cfg.budget_config(),
                Local::now().date_naive(),
            );
            session.run()?;
        }
    }

    Ok(())
}
