//! Read-only views over the hydrated store.

use crate::commands::{listing, Out};
use crate::model::{Amount, Totals, Transaction, TransactionType};
use crate::{App, Result};
use serde::Serialize;

/// The landing view: the per-type totals and the most recent transactions.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub latest: Vec<Transaction>,
}

/// Loads the session's data and shows the totals with the latest `latest_count` transactions.
pub async fn dashboard(app: &App) -> Result<Out<Dashboard>> {
    app.sync().await?.hydrate().await?;
    let store = app.store().lock().await;
    let totals = store.list_totals();
    let latest: Vec<Transaction> = store
        .list_latest(app.config().latest_count())
        .into_iter()
        .cloned()
        .collect();

    let message = format!(
        "{}\n{}",
        describe_totals(&totals),
        listing("Latest transactions", &latest)
    );
    Ok(Out::new(message, Dashboard { totals, latest }))
}

/// Lists every loaded transaction, most recent first, optionally only those of one type.
pub async fn list(
    app: &App,
    transaction_type: Option<TransactionType>,
) -> Result<Out<Vec<Transaction>>> {
    app.sync().await?.hydrate().await?;
    let store = app.store().lock().await;
    let (heading, transactions) = match transaction_type {
        Some(t) => (format!("{t} transactions"), store.list_by_type(t)),
        None => ("All transactions".to_string(), store.list_all()),
    };
    let message = listing(&heading, transactions.iter().copied());
    let transactions: Vec<Transaction> = transactions.into_iter().cloned().collect();
    Ok(Out::new(message, transactions))
}

/// Shows the running total of each transaction type.
pub async fn totals(app: &App) -> Result<Out<Totals>> {
    app.sync().await?.hydrate().await?;
    let totals = app.store().lock().await.list_totals();
    Ok(Out::new(describe_totals(&totals), totals))
}

/// e.g. `Total credit: $5,040.00, Total debit: $2,095.44`. A type with no total shows `$0.00`.
fn describe_totals(totals: &Totals) -> String {
    TransactionType::ALL
        .iter()
        .map(|t| {
            let sum = totals.get(t).copied().unwrap_or(Amount::ZERO);
            format!("Total {t}: {sum}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
