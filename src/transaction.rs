//! The simplified transaction shape returned to the app.

use serde::{Deserialize, Serialize};

use crate::plaid::PlaidTransaction;

/// A transaction as sent to the app.
///
/// `merchant_name` is always present in the JSON, as `null` when Plaid did not
/// provide one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOut {
    /// The merchant or description of the transaction.
    pub name: String,
    /// Positive for money leaving the account, negative for money entering it.
    pub amount: f64,
    /// The posted date, `YYYY-MM-DD`.
    pub date: String,
    /// The merchant name, if known.
    pub merchant_name: Option<String>,
    /// The Plaid account the transaction belongs to.
    pub account_id: String,
}

impl From<PlaidTransaction> for TransactionOut {
    fn from(transaction: PlaidTransaction) -> Self {
        Self {
            name: transaction.name,
            amount: transaction.amount,
            date: transaction.date,
            merchant_name: transaction.merchant_name,
            account_id: transaction.account_id,
        }
    }
}

/// The response body for the exchange endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsOut {
    /// The transactions, in the order Plaid returned them.
    pub transactions: Vec<TransactionOut>,
}

/// Project Plaid transactions onto [TransactionOut], keeping their order.
pub fn map_transactions(transactions: Vec<PlaidTransaction>) -> Vec<TransactionOut> {
    transactions.into_iter().map(TransactionOut::from).collect()
}
