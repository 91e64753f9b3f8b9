use crate::error::{Error, ErrorType, Result};
use crate::model::{Amount, TransactionType};
use serde::Serialize;
use std::collections::BTreeMap;

/// The current sum for every known transaction type.
pub type Totals = BTreeMap<TransactionType, Amount>;

/// The running sum of `amount` over all transactions of one type.
///
/// A sum may go negative if the amounts it is given are inconsistent. It may not leave the range of
/// a `Decimal`: an addition or removal that would is rejected and leaves the sum as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTotal {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    sum: Amount,
}

impl AggregateTotal {
    pub(crate) fn new(transaction_type: TransactionType, sum: Amount) -> Self {
        Self {
            transaction_type,
            sum,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn sum(&self) -> Amount {
        self.sum
    }

    /// Adds `amount` to the sum and rebinds the type. Callers look totals up by type, so the rebind
    /// leaves the type unchanged in practice.
    pub(crate) fn add_amount(
        &mut self,
        amount: Amount,
        transaction_type: TransactionType,
    ) -> Result<()> {
        let sum = self
            .sum
            .checked_add(amount)
            .ok_or_else(|| out_of_range(self, "Adding", amount))?;
        self.sum = sum;
        self.transaction_type = transaction_type;
        Ok(())
    }

    /// Subtracts `amount` from the sum and rebinds the type.
    pub(crate) fn remove_amount(
        &mut self,
        amount: Amount,
        transaction_type: TransactionType,
    ) -> Result<()> {
        let sum = self
            .sum
            .checked_sub(amount)
            .ok_or_else(|| out_of_range(self, "Removing", amount))?;
        self.sum = sum;
        self.transaction_type = transaction_type;
        Ok(())
    }
}

fn out_of_range(total: &AggregateTotal, action: &str, amount: Amount) -> Error {
    Error::msg(
        ErrorType::Store,
        format!(
            "{action} {amount} takes the {} total of {} out of range",
            total.transaction_type, total.sum
        ),
    )
}
