use rust_decimal::Decimal;
use serde::Deserialize;
use std::{collections::BTreeMap, path::PathBuf, str::FromStr};
use thiserror::Error;

/// Accumulated amount per category name. Ordered so that ties in the report
/// and node order in the flow graph don't depend on hashing.
pub type CategoryTotals = BTreeMap<String, Decimal>;

/// One row of the bank export, as found in the CSV file. Amounts stay raw text
/// here since they may carry thousands separators; see `parse_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Record {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

/// Money goes either in or out. Only the exact `INCOME` marker counts as income,
/// every other value of the `Type` column is an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Income,
    Expense,
}

impl From<&str> for Kind {
    fn from(kind: &str) -> Self {
        match kind {
            "INCOME" => Kind::Income,
            _ => Kind::Expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub category: String,
    pub amount: Decimal,
    pub kind: Kind,
}

impl TryFrom<Record> for Transaction {
    type Error = Error;

    fn try_from(record: Record) -> Result<Self, Error> {
        Ok(Self {
            amount: parse_amount(&record.amount)?,
            kind: Kind::from(record.kind.as_str()),
            category: record.category,
        })
    }
}

/// Parses an amount as exported by the bank. A plain decimal is tried first;
/// if that fails the thousands separators are dropped and we try again.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, Error> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_str(&trimmed.replace(',', "")))
        .map_err(|_| Error::MalformedAmount(raw.to_string()))
}

/// Formats an amount the way it shows up in the report, i.e. with exactly two decimals.
pub(crate) fn money(amount: Decimal) -> String {
    let mut amount = amount;
    amount.rescale(2);
    amount.to_string()
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read input file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Input is neither valid UTF-16 nor UTF-8")]
    Decoding,
    #[error("Malformed amount {0:?}")]
    MalformedAmount(String),
    #[error(
        "Inconsistent flow graph \
         ({sources} sources, {targets} targets, {values} values, {nodes} nodes)"
    )]
    GraphConsistency {
        sources: usize,
        targets: usize,
        values: usize,
        nodes: usize,
    },
}
