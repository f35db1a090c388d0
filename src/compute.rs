use crate::{
    data::{CategoryTotals, Error, Kind, Record, Transaction},
    read::RecordUser,
};
use log::debug;
use std::collections::BTreeSet;

/// Running totals per category, split by direction. Filled on the fly while
/// the export is read; single-threaded so no protections for MT.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Totals {
    pub revenues: CategoryTotals,
    pub expenses: CategoryTotals,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tx: Transaction) {
        let totals = match tx.kind {
            Kind::Income => &mut self.revenues,
            Kind::Expense => &mut self.expenses,
        };
        *totals.entry(tx.category).or_default() += tx.amount;
    }

    /// Renames every category found on both sides, `<name>_in` for revenues and
    /// `<name>_out` for expenses, so that no name is shared anymore.
    /// Collisions are computed once against the untouched maps, and a renamed
    /// total wins over an existing category of the same name.
    pub fn reconcile(self) -> Self {
        let collisions: BTreeSet<String> = self
            .expenses
            .keys()
            .filter(|category| self.revenues.contains_key(*category))
            .cloned()
            .collect();
        if collisions.is_empty() {
            return self;
        }
        debug!("renaming categories found on both sides: {collisions:?}");
        let rename = |totals: CategoryTotals, suffix: &str| -> CategoryTotals {
            let (renamed, mut kept): (CategoryTotals, CategoryTotals) = totals
                .into_iter()
                .partition(|(category, _)| collisions.contains(category));
            kept.extend(
                renamed
                    .into_iter()
                    .map(|(category, amount)| (format!("{category}{suffix}"), amount)),
            );
            kept
        };
        Self {
            revenues: rename(self.revenues, "_in"),
            expenses: rename(self.expenses, "_out"),
        }
    }
}

impl RecordUser for Totals {
    fn use_record(&mut self, record: Record) -> Result<(), Error> {
        self.add(Transaction::try_from(record)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        data::{Error, Kind, Record, Transaction},
        read::RecordUser,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::Totals;

    fn tx(category: &str, amount: Decimal, kind: Kind) -> Transaction {
        Transaction {
            category: category.into(),
            amount,
            kind,
        }
    }

    fn totals(pairs: &[(&str, Decimal)]) -> crate::data::CategoryTotals {
        pairs
            .iter()
            .map(|(category, amount)| (category.to_string(), *amount))
            .collect()
    }

    #[test]
    fn test_salary_and_rent() {
        let mut t = Totals::new();
        t.add(tx("Salary", dec!(1000), Kind::Income));
        t.add(tx("Rent", dec!(400), Kind::Expense));
        assert_eq!(t.revenues, totals(&[("Salary", dec!(1000.00))]));
        assert_eq!(t.expenses, totals(&[("Rent", dec!(400.00))]));
    }

    #[test]
    fn test_accumulate_per_category() {
        let mut t = Totals::new();
        t.add(tx("Food", dec!(12.30), Kind::Expense));
        t.add(tx("Food", dec!(7.70), Kind::Expense));
        t.add(tx("Salary", dec!(1000), Kind::Income));
        t.add(tx("Salary", dec!(200), Kind::Income));
        t.add(tx("Rent", dec!(400), Kind::Expense));
        assert_eq!(t.revenues, totals(&[("Salary", dec!(1200))]));
        assert_eq!(
            t.expenses,
            totals(&[("Food", dec!(20.00)), ("Rent", dec!(400))])
        );
    }

    #[test]
    fn test_sums_are_preserved() {
        let txs = [
            tx("Salary", dec!(1000), Kind::Income),
            tx("Gift", dec!(25.5), Kind::Income),
            tx("Gift", dec!(10), Kind::Expense),
            tx("Rent", dec!(400), Kind::Expense),
            tx("Food", dec!(0.01), Kind::Expense),
        ];
        let expected: Decimal = txs.iter().map(|tx| tx.amount).sum();
        let mut t = Totals::new();
        for tx in txs {
            t.add(tx);
        }
        let t = t.reconcile();
        let sum: Decimal = t.revenues.values().chain(t.expenses.values()).sum();
        assert_eq!(sum, expected);
    }

    #[test]
    fn test_use_record() {
        let mut t = Totals::new();
        t.use_record(Record {
            category: "Bonus".into(),
            amount: "1,234.50".into(),
            kind: "INCOME".into(),
        })
        .unwrap();
        t.use_record(Record {
            category: "Fees".into(),
            amount: "3".into(),
            kind: "CARD".into(),
        })
        .unwrap();
        assert_eq!(t.revenues, totals(&[("Bonus", dec!(1234.50))]));
        assert_eq!(t.expenses, totals(&[("Fees", dec!(3))]));
    }

    #[test]
    fn test_use_record_malformed() {
        let mut t = Totals::new();
        let err = t
            .use_record(Record {
                category: "Bonus".into(),
                amount: "12.3.4".into(),
                kind: "INCOME".into(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::MalformedAmount(raw) if raw == "12.3.4"));
        assert_eq!(t, Totals::new());
    }

    #[test]
    fn test_reconcile_collision() {
        let mut t = Totals::new();
        t.add(tx("Gift", dec!(50), Kind::Income));
        t.add(tx("Salary", dec!(1000), Kind::Income));
        t.add(tx("Gift", dec!(30), Kind::Expense));
        t.add(tx("Rent", dec!(400), Kind::Expense));
        let t = t.reconcile();
        assert_eq!(
            t.revenues,
            totals(&[("Gift_in", dec!(50)), ("Salary", dec!(1000))])
        );
        assert_eq!(
            t.expenses,
            totals(&[("Gift_out", dec!(30)), ("Rent", dec!(400))])
        );
        assert!(t.revenues.keys().all(|k| !t.expenses.contains_key(k)));
    }

    #[test]
    fn test_reconcile_checks_names_before_renaming() {
        // "Gift_in" as a genuine expense must not be confused with a renamed revenue
        let mut t = Totals::new();
        t.add(tx("Gift", dec!(50), Kind::Income));
        t.add(tx("Gift", dec!(30), Kind::Expense));
        t.add(tx("Gift_in", dec!(5), Kind::Expense));
        let t = t.reconcile();
        assert_eq!(t.revenues, totals(&[("Gift_in", dec!(50))]));
        assert_eq!(
            t.expenses,
            totals(&[("Gift_in", dec!(5)), ("Gift_out", dec!(30))])
        );
    }

    #[test]
    fn test_reconcile_renamed_total_wins() {
        let mut t = Totals::new();
        t.add(tx("Gift", dec!(50), Kind::Income));
        t.add(tx("Gift_in", dec!(5), Kind::Income));
        t.add(tx("Gift", dec!(30), Kind::Expense));
        t.add(tx("Gift_out", dec!(2), Kind::Expense));
        let t = t.reconcile();
        assert_eq!(t.revenues, totals(&[("Gift_in", dec!(50))]));
        assert_eq!(t.expenses, totals(&[("Gift_out", dec!(30))]));
    }

    #[test]
    fn test_reconcile_without_collision_is_identity() {
        let mut t = Totals::new();
        t.add(tx("Salary", dec!(1000), Kind::Income));
        t.add(tx("Rent", dec!(400), Kind::Expense));
        let once = t.clone().reconcile();
        assert_eq!(once, t);
        assert_eq!(once.clone().reconcile(), once);
    }

    #[test]
    fn test_reconcile_empty() {
        assert_eq!(Totals::new().reconcile(), Totals::new());
    }
}
