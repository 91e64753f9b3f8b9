//! Creating, editing and deleting transactions.

use crate::commands::{describe, Out};
use crate::model::{Amount, Category, Transaction, TransactionForm, TransactionId, TransactionType};
use crate::{App, Result};

/// The fields supplied to `edit`. Anything left as `None` keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormChanges {
    pub name: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub amount: Option<Amount>,
    pub date: Option<String>,
}

impl FormChanges {
    /// Overlays these changes on a pre-filled form.
    pub fn apply(self, mut form: TransactionForm) -> TransactionForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(transaction_type) = self.transaction_type {
            form.transaction_type = Some(transaction_type);
        }
        if let Some(category) = self.category {
            form.category = Some(category);
        }
        if let Some(amount) = self.amount {
            form.amount = amount;
        }
        if let Some(date) = self.date {
            form.date = date;
        }
        form
    }
}

/// Adds a transaction. The form is validated before anything is sent.
pub async fn add(app: &App, form: &TransactionForm) -> Result<Out<Transaction>> {
    let sync = app.sync().await?;
    sync.hydrate().await?;
    let created = sync.create(form).await?;
    Ok(Out::new(
        format!("Transaction Added\n{}", describe(&created)),
        created,
    ))
}

/// Changes the given fields of transaction `id`, keeping the rest.
pub async fn edit(app: &App, id: TransactionId, changes: FormChanges) -> Result<Out<Transaction>> {
    let sync = app.sync().await?;
    sync.hydrate().await?;
    let form = changes.apply(sync.edit_form(id).await?);
    let updated = sync.edit(id, &form).await?;
    Ok(Out::new(
        format!("Transaction Updated\n{}", describe(&updated)),
        updated,
    ))
}

pub async fn delete(app: &App, id: TransactionId) -> Result<Out<Transaction>> {
    let sync = app.sync().await?;
    sync.hydrate().await?;
    let deleted = sync.delete(id).await?;
    Ok(Out::new(
        format!("Transaction deleted\n{}", describe(&deleted)),
        deleted,
    ))
}
