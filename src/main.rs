//! Expense Sync CLI - session driver for the remote-backed expense ledger
//!
//! Loads the remote ledger into a local cache and drives the mutation
//! coordinator from the command line: `list`, `add`, `edit`, `remove`.

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expense_sync::{
    Config, ExpenseCache, FormPayload, HttpRemoteStore, MutationCoordinator, Outcome, RemoteStore,
};

/// Entry point for the expense sync CLI.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the HTTP remote store client
/// 4. Create the session cache and coordinator
/// 5. Dispatch the requested command
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: base_url={}, request_timeout={}s",
        config.base_url, config.request_timeout
    );

    let remote = HttpRemoteStore::new(&config).context("failed to build remote store client")?;
    let cache = Arc::new(RwLock::new(ExpenseCache::new()));
    let mut coordinator = MutationCoordinator::new(cache.clone(), remote);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") | None => {
            coordinator.load().await.context("failed to load expenses")?;
            print_ledger(&cache).await;
        }
        Some("add") => {
            let draft = parse_form(&args, 1)?;
            report(coordinator.submit(draft, None).await, &coordinator, "added");
        }
        Some("edit") => {
            let id = args.get(1).cloned().unwrap_or_default();
            if id.is_empty() {
                bail!("usage: expense_sync edit <id> <description> <amount> <YYYY-MM-DD>");
            }
            let draft = parse_form(&args, 2)?;
            // The cache must hold the entry before an optimistic update
            coordinator.load().await.context("failed to load expenses")?;
            report(
                coordinator.submit(draft, Some(&id)).await,
                &coordinator,
                "updated",
            );
        }
        Some("remove") => {
            let id = args.get(1).cloned().unwrap_or_default();
            if id.is_empty() {
                bail!("usage: expense_sync remove <id>");
            }
            coordinator.load().await.context("failed to load expenses")?;
            report(coordinator.delete(&id).await, &coordinator, "removed");
        }
        Some(other) => {
            bail!(
                "unknown command '{}'\nusage: expense_sync [list | add <description> <amount> <date> | edit <id> <description> <amount> <date> | remove <id>]",
                other
            );
        }
    }

    Ok(())
}

/// Validates the positional form arguments starting at `offset`.
fn parse_form(args: &[String], offset: usize) -> anyhow::Result<expense_sync::ExpenseDraft> {
    let payload = FormPayload {
        description: args.get(offset).cloned().unwrap_or_default(),
        amount: args.get(offset + 1).cloned().unwrap_or_default(),
        date: args.get(offset + 2).cloned().unwrap_or_default(),
    };

    payload
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid input, check these fields: {:?}", e.fields))
}

/// Prints the cached ledger with its running total.
async fn print_ledger(cache: &Arc<RwLock<ExpenseCache>>) {
    let cache = cache.read().await;
    if cache.is_empty() {
        println!("no expenses recorded");
        return;
    }

    for expense in cache.iter() {
        println!(
            "{}  {}  {:>10.2}  {}",
            expense.id, expense.date, expense.amount, expense.description
        );
    }
    println!("total: {:.2}", cache.total());
}

/// Reports a mutation outcome to the user.
fn report<S: RemoteStore>(outcome: Outcome, coordinator: &MutationCoordinator<S>, verb: &str) {
    match outcome {
        Outcome::Leave => println!("expense {verb}"),
        Outcome::Stay => {
            eprintln!("{}", coordinator.message().unwrap_or("operation rejected"));
        }
    }
}
