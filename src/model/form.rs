//! Input for creating and editing transactions, and the validation that gates every request.

use crate::error::{Error, ErrorType, Result};
use crate::model::{Amount, Category, Transaction, TransactionDate, TransactionType};
use serde::Serialize;

/// What a user has entered into a create or edit form. Every field may still be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub name: String,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    pub amount: Amount,
    pub date: String,
}

impl TransactionForm {
    /// Checks the form in the order the fields appear to the user and reports the first problem.
    /// Nothing is sent to the API unless this succeeds.
    pub fn validate(&self) -> Result<ValidTransaction> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("Please enter name"));
        }
        let Some(category) = self.category else {
            return Err(invalid("Please enter category"));
        };
        if self.date.trim().is_empty() {
            return Err(invalid("Please enter date"));
        }
        let Some(transaction_type) = self.transaction_type else {
            return Err(invalid("Please enter type"));
        };
        if self.amount.is_zero() {
            return Err(invalid("Please enter amount"));
        }
        if self.amount.is_negative() {
            return Err(invalid("Amount cannot be negative"));
        }
        let date = TransactionDate::parse(&self.date)
            .map_err(|e| Error::new(ErrorType::Validation, e))?;

        Ok(ValidTransaction {
            name: name.to_string(),
            transaction_type,
            category,
            amount: self.amount,
            date,
        })
    }
}

fn invalid(message: &'static str) -> Error {
    Error::msg(ErrorType::Validation, message)
}

impl From<&Transaction> for TransactionForm {
    /// Pre-fills an edit form with the current state of `transaction`.
    fn from(transaction: &Transaction) -> Self {
        Self {
            name: transaction.name().to_string(),
            transaction_type: Some(transaction.transaction_type()),
            category: Some(transaction.category()),
            amount: transaction.amount(),
            date: transaction.date().to_string(),
        }
    }
}

/// A form that has passed validation. This is the only input the create and edit requests accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidTransaction {
    name: String,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: Category,
    amount: Amount,
    date: TransactionDate,
}

impl ValidTransaction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> &TransactionDate {
        &self.date
    }
}

/// Credentials entered on the log in screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogInForm {
    pub email: String,
    pub password: String,
}

impl LogInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Rejects a blank email, then a blank password. Returns the trimmed email.
    pub fn validate(&self) -> Result<&str> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(invalid("Please enter email"));
        }
        if self.password.trim().is_empty() {
            return Err(invalid("Please enter password"));
        }
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TransactionForm {
        TransactionForm {
            name: "  Groceries run ".to_string(),
            transaction_type: Some(TransactionType::Debit),
            category: Some(Category::Food),
            amount: Amount::from(42),
            date: "2024-02-10".to_string(),
        }
    }

    fn rejection(form: TransactionForm) -> String {
        let err = form.validate().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        err.to_string()
    }

    #[test]
    fn test_valid_form() {
        let valid = filled().validate().unwrap();
        assert_eq!(valid.name(), "Groceries run");
        assert_eq!(valid.transaction_type(), TransactionType::Debit);
        assert_eq!(valid.category(), Category::Food);
        assert_eq!(valid.amount(), Amount::from(42));
        assert_eq!(valid.date().as_str(), "2024-02-10");
    }

    #[test]
    fn test_blank_name() {
        let form = TransactionForm {
            name: "   ".to_string(),
            ..filled()
        };
        assert_eq!(rejection(form), "Please enter name");
    }

    #[test]
    fn test_missing_category() {
        let form = TransactionForm {
            category: None,
            ..filled()
        };
        assert_eq!(rejection(form), "Please enter category");
    }

    #[test]
    fn test_missing_date() {
        let form = TransactionForm {
            date: String::new(),
            ..filled()
        };
        assert_eq!(rejection(form), "Please enter date");
    }

    #[test]
    fn test_missing_type() {
        let form = TransactionForm {
            transaction_type: None,
            ..filled()
        };
        assert_eq!(rejection(form), "Please enter type");
    }

    #[test]
    fn test_zero_amount() {
        let form = TransactionForm {
            amount: Amount::ZERO,
            ..filled()
        };
        assert_eq!(rejection(form), "Please enter amount");
    }

    #[test]
    fn test_negative_amount() {
        let form = TransactionForm {
            amount: Amount::from(-3),
            ..filled()
        };
        assert_eq!(rejection(form), "Amount cannot be negative");
    }

    #[test]
    fn test_unparseable_date() {
        let form = TransactionForm {
            date: "next tuesday".to_string(),
            ..filled()
        };
        assert!(rejection(form).contains("not a valid date"));
    }

    #[test]
    fn test_first_problem_wins() {
        assert_eq!(rejection(TransactionForm::default()), "Please enter name");
    }

    #[test]
    fn test_prefill_from_transaction() {
        let tx = Transaction::new(
            3,
            "Rent",
            TransactionType::Debit,
            Category::Service,
            Amount::from(1200),
            TransactionDate::parse("2024-04-01").unwrap(),
        );
        let form = TransactionForm::from(&tx);
        assert_eq!(form.name, "Rent");
        assert_eq!(form.category, Some(Category::Service));
        assert_eq!(form.date, "2024-04-01");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_log_in_form() {
        let form = LogInForm::new(" jane@example.com ", "secret");
        assert_eq!(form.validate().unwrap(), "jane@example.com");

        let err = LogInForm::new("  ", "secret").validate().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(err.to_string(), "Please enter email");
        let err = LogInForm::new("jane@example.com", "  ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter password");
    }
}
