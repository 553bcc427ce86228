use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::parsers::prelude::*;

/// Column order of the YNAB CSV import format.
pub const YNAB_HEADERS: [&str; 5] = ["Date", "Payee", "Memo", "Outflow", "Inflow"];

/// One row of a YNAB import file.
///
/// YNAB wants debits and credits as two non-negative columns instead of a
/// signed amount: a negative amount fills `outflow`, a positive one fills
/// `inflow`. A zero or unreadable amount leaves both empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct YnabTransaction {
    #[serde(serialize_with = "serialize_date")]
    pub date: SheetDate,
    pub payee: String,
    pub memo: String,
    #[serde(serialize_with = "serialize_amount")]
    pub outflow: Option<Decimal>,
    #[serde(serialize_with = "serialize_amount")]
    pub inflow: Option<Decimal>,
}

impl From<SheetTransaction> for YnabTransaction {
    fn from(txn: SheetTransaction) -> Self {
        let (outflow, inflow) = match txn.amount {
            Some(amount) if amount < Decimal::ZERO => (Some(amount.abs()), None),
            Some(amount) if amount > Decimal::ZERO => (None, Some(amount)),
            _ => (None, None),
        };

        YnabTransaction {
            date: txn.date,
            payee: txn.payee,
            memo: String::new(),
            outflow,
            inflow,
        }
    }
}

/// Shortest exact decimal with at least one fractional digit: `42.5`,
/// `100.0`, `0.01`.
pub fn format_amount(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.scale() == 0 {
        format!("{}.0", amount)
    } else {
        amount.to_string()
    }
}

fn serialize_date<S: Serializer>(date: &SheetDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

fn serialize_amount<S: Serializer>(
    amount: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => serializer.serialize_str(&format_amount(*amount)),
        None => serializer.serialize_none(),
    }
}
