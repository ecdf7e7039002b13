use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;
use expense_tracker_client::domain::{
    recent_expenses, recent_fallback_text, ExpenseForm, ExpensesSummary, ScreenState,
    ALL_FALLBACK_TEXT,
};
use expense_tracker_client::services::init_logging;
use expense_tracker_client::{
    ApiClient, ClientConfig, ExpenseStore, InMemoryRemote, RemoteSyncClient, SyncOrchestrator,
};
use shared::{Expense, ExpenseField};
use tracing::info;

const USAGE: &str = "usage: expense-tracker [list | add <amount> <YYYY-MM-DD> <description...> | delete <id>]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    init_logging(&config.log_level);
    info!("🚀 Starting expense tracker client");

    let remote: Arc<dyn RemoteSyncClient> = match &config.base_url {
        Some(url) => {
            info!("Using remote collection at {}", url);
            Arc::new(ApiClient::from_config(&config)?)
        }
        None => {
            info!("EXPENSES_API_URL not set, using an in-process collection");
            Arc::new(InMemoryRemote::new())
        }
    };
    let orchestrator = SyncOrchestrator::new(remote, ExpenseStore::new().shared());

    let mut screen = ScreenState::loading();
    let loaded = orchestrator.load().await;
    screen.settle(&loaded, |_| {});
    if let Some(message) = screen.error_message() {
        bail!("{}", message);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => {}
        Some("add") if args.len() >= 4 => {
            let mut form = ExpenseForm::new();
            form.set_field(ExpenseField::Amount, args[1].as_str());
            form.set_field(ExpenseField::Date, args[2].as_str());
            form.set_field(ExpenseField::Description, args[3..].join(" "));

            screen.begin();
            let saved = orchestrator.confirm(&mut form).await;
            screen.settle(&saved, |_| info!("Expense saved"));
            if form.is_invalid() {
                let invalid: Vec<&str> = ExpenseField::ALL
                    .iter()
                    .filter(|field| !form.field(**field).is_valid)
                    .map(|field| field.label())
                    .collect();
                bail!("{} ({})", form.error_text().unwrap_or_default(), invalid.join(", "));
            }
        }
        Some("delete") if args.len() == 2 => {
            screen.begin();
            let deleted = orchestrator.delete(&args[1]).await;
            screen.settle(&deleted, |_| info!("Expense deleted"));
        }
        _ => bail!(USAGE),
    }

    if let Some(message) = screen.error_message() {
        bail!("{}", message);
    }

    let expenses = orchestrator.snapshot();
    let today = Local::now().date_naive();
    let recent = recent_expenses(&expenses, today, config.recent_days);

    print_section(
        &ExpensesSummary::recent(&expenses, today, config.recent_days),
        &recent,
        &recent_fallback_text(config.recent_days),
    );
    print_section(&ExpensesSummary::all(&expenses), &expenses, ALL_FALLBACK_TEXT);

    Ok(())
}

fn print_section(summary: &ExpensesSummary, expenses: &[Expense], fallback: &str) {
    println!("{}: {}", summary.period_name, summary.formatted_total());
    if summary.is_empty() {
        println!("  {}", fallback);
        return;
    }
    for expense in expenses {
        println!(
            "  {}  {:>10.2}  {}  [{}]",
            expense.formatted_date(),
            expense.amount,
            expense.description,
            expense.id
        );
    }
}
