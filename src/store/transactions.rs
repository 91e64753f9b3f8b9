//! The transaction store: the single owner of transaction records and of the per-type running
//! totals that summarize them.
//!
//! Every mutation keeps the totals in step with the records. For each type `T`, the sum of
//! `T` changes by exactly the change in the amounts of the `T` records held here, so a store that
//! was hydrated with consistent data stays consistent. Mutations either fully apply or leave the
//! store untouched, and a `StoreEvent` is published only after a mutation has been applied.
//!
//! The store outlives sessions. Each `clear` starts a new epoch, which lets holders of older work
//! tell that the records they were given no longer belong to the store.

use crate::error::{Error, ErrorType, Result};
use crate::model::{AggregateTotal, Amount, Totals, Transaction, TransactionId, TransactionType};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

/// Lagging subscribers lose the oldest events beyond this many. Events are hints to re-read the
/// store, so a lagged subscriber only needs to re-read once.
const EVENT_CAPACITY: usize = 64;

/// Published to subscribers after the store changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Hydrated { count: usize },
    TotalsHydrated { count: usize },
    Added { id: TransactionId },
    Updated { id: TransactionId },
    Removed { id: TransactionId },
    /// The session ended and the store is empty and unhydrated again.
    Cleared,
}

#[derive(Debug)]
pub struct TransactionStore {
    /// Insertion order is kept so that transactions with equal dates list in the order they arrived.
    transactions: Vec<Transaction>,
    totals: Vec<AggregateTotal>,
    hydrated: bool,
    totals_hydrated: bool,
    epoch: u64,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            transactions: Vec::new(),
            totals: Vec::new(),
            hydrated: false,
            totals_hydrated: false,
            epoch: 0,
            events,
        }
    }

    /// Registers for change notifications. Re-derive any view of the store when an event arrives.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn totals_hydrated(&self) -> bool {
        self.totals_hydrated
    }

    /// Advances on every `clear`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Loads the initial set of transactions, keeping their order. Allowed once per store; a second
    /// call is rejected and changes nothing.
    ///
    /// A transaction whose id is already held (because its creation was confirmed while the
    /// initial fetch was in flight) is skipped.
    pub fn hydrate(&mut self, transactions: Vec<Transaction>) -> Result<()> {
        if self.hydrated {
            return Err(Error::msg(
                ErrorType::Store,
                "Transactions have already been loaded for this session",
            ));
        }
        let mut count = 0;
        for transaction in transactions {
            if self.position(transaction.id()).is_some() {
                warn!(
                    "Skipping transaction {} during hydration, it is already loaded",
                    transaction.id()
                );
                continue;
            }
            self.transactions.push(transaction);
            count += 1;
        }
        self.hydrated = true;
        debug!("Hydrated {count} transactions");
        self.publish(StoreEvent::Hydrated { count });
        Ok(())
    }

    /// Loads the initial per-type totals. Allowed once per store. A payload that lists the same type
    /// twice is rejected and changes nothing.
    pub fn hydrate_totals(&mut self, totals: Vec<AggregateTotal>) -> Result<()> {
        if self.totals_hydrated {
            return Err(Error::msg(
                ErrorType::Store,
                "Totals have already been loaded for this session",
            ));
        }
        for (ix, total) in totals.iter().enumerate() {
            let t = total.transaction_type();
            if totals[..ix].iter().any(|other| other.transaction_type() == t) {
                return Err(Error::msg(
                    ErrorType::Store,
                    format!("The totals list the '{t}' type more than once"),
                ));
            }
        }
        let count = totals.len();
        self.totals = totals;
        self.totals_hydrated = true;
        debug!("Hydrated {count} totals");
        self.publish(StoreEvent::TotalsHydrated { count });
        Ok(())
    }

    /// Inserts a server-confirmed new transaction and adds its amount to its type's total.
    pub fn add(&mut self, transaction: Transaction) -> Result<()> {
        self.require_totals()?;
        let id = transaction.id();
        if self.position(id).is_some() {
            return Err(Error::msg(
                ErrorType::Store,
                format!("Transaction {id} already exists"),
            ));
        }
        let t = transaction.transaction_type();
        let mut totals = self.totals.clone();
        total_mut(&mut totals, t).add_amount(transaction.amount(), t)?;
        self.totals = totals;
        self.transactions.push(transaction);
        trace!("Added transaction {id}");
        self.publish(StoreEvent::Added { id });
        Ok(())
    }

    /// Replaces the fields of the transaction with the same id as `transaction`.
    ///
    /// The old amount always leaves the old type's total and the new amount always enters the new
    /// type's total, which moves the amount between totals when the type changes.
    pub fn update(&mut self, transaction: Transaction) -> Result<()> {
        self.require_totals()?;
        let id = transaction.id();
        let ix = self.position(id).ok_or_else(|| not_found(id))?;

        let old = &self.transactions[ix];
        let (old_amount, old_type) = (old.amount(), old.transaction_type());
        let new_type = transaction.transaction_type();
        let mut totals = self.totals.clone();
        total_mut(&mut totals, old_type).remove_amount(old_amount, old_type)?;
        total_mut(&mut totals, new_type).add_amount(transaction.amount(), new_type)?;

        self.totals = totals;
        self.transactions[ix].overwrite_with(&transaction);
        trace!("Updated transaction {id}");
        self.publish(StoreEvent::Updated { id });
        Ok(())
    }

    /// Removes the transaction with `id` and subtracts its amount from its type's total. Returns the
    /// removed transaction.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction> {
        self.require_totals()?;
        let ix = self.position(id).ok_or_else(|| not_found(id))?;
        let (amount, t) = (
            self.transactions[ix].amount(),
            self.transactions[ix].transaction_type(),
        );
        let mut totals = self.totals.clone();
        total_mut(&mut totals, t).remove_amount(amount, t)?;

        self.totals = totals;
        let removed = self.transactions.remove(ix);
        trace!("Removed transaction {id}");
        self.publish(StoreEvent::Removed { id });
        Ok(removed)
    }

    /// Forgets everything so the store can be hydrated for the next session. Subscribers stay
    /// registered.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.totals.clear();
        self.hydrated = false;
        self.totals_hydrated = false;
        self.epoch = self.epoch.wrapping_add(1);
        debug!("Cleared the transaction store, now at epoch {}", self.epoch);
        self.publish(StoreEvent::Cleared);
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// All transactions, most recent first. Transactions with the same date keep their insertion
    /// order. Computed on every call.
    pub fn list_all(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        // `sort_by` is stable.
        sorted.sort_by(|a, b| b.date().cmp(a.date()));
        sorted
    }

    /// The first `n` entries of `list_all`.
    pub fn list_latest(&self, n: usize) -> Vec<&Transaction> {
        let mut sorted = self.list_all();
        sorted.truncate(n);
        sorted
    }

    /// The entries of `list_all` that have type `transaction_type`.
    pub fn list_by_type(&self, transaction_type: TransactionType) -> Vec<&Transaction> {
        self.list_all()
            .into_iter()
            .filter(|t| t.transaction_type() == transaction_type)
            .collect()
    }

    pub fn list_totals(&self) -> Totals {
        self.totals
            .iter()
            .map(|t| (t.transaction_type(), t.sum()))
            .collect()
    }

    /// The totals in the order the API listed them.
    pub fn aggregate_totals(&self) -> &[AggregateTotal] {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id() == id)
    }

    fn require_totals(&self) -> Result<()> {
        if self.totals_hydrated {
            Ok(())
        } else {
            Err(Error::msg(
                ErrorType::Store,
                "Totals must be loaded before transactions can be changed",
            ))
        }
    }

    fn publish(&self, event: StoreEvent) {
        // An error only means nobody is subscribed.
        let _ = self.events.send(event);
    }
}

/// The total for `transaction_type`. A type the API sent no total for starts at zero, which is the
/// correct sum over no transactions.
fn total_mut(
    totals: &mut Vec<AggregateTotal>,
    transaction_type: TransactionType,
) -> &mut AggregateTotal {
    let ix = match totals
        .iter()
        .position(|t| t.transaction_type() == transaction_type)
    {
        Some(ix) => ix,
        None => {
            warn!("No total was loaded for '{transaction_type}', starting it at zero");
            totals.push(AggregateTotal::new(transaction_type, Amount::ZERO));
            totals.len() - 1
        }
    };
    &mut totals[ix]
}

fn not_found(id: TransactionId) -> Error {
    Error::msg(ErrorType::NotFound, format!("Transaction {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, TransactionDate};
    use rust_decimal::Decimal;
    use tokio::sync::broadcast::error::TryRecvError;

    fn tx(id: TransactionId, t: TransactionType, amount: i64, date: &str) -> Transaction {
        Transaction::new(
            id,
            format!("Transaction {id}"),
            t,
            Category::Shopping,
            Amount::from(amount),
            TransactionDate::parse(date).unwrap(),
        )
    }

    fn total(t: TransactionType, sum: i64) -> AggregateTotal {
        AggregateTotal::new(t, Amount::from(sum))
    }

    fn ids(list: &[&Transaction]) -> Vec<TransactionId> {
        list.iter().map(|t| t.id()).collect()
    }

    /// A store whose totals start equal to the sums of its transactions.
    fn consistent_store(transactions: Vec<Transaction>) -> TransactionStore {
        let mut store = TransactionStore::new();
        let totals = TransactionType::ALL
            .iter()
            .map(|&t| {
                let sum = transactions
                    .iter()
                    .filter(|tx| tx.transaction_type() == t)
                    .map(|tx| tx.amount())
                    .sum();
                AggregateTotal::new(t, sum)
            })
            .collect();
        store.hydrate_totals(totals).unwrap();
        store.hydrate(transactions).unwrap();
        store
    }

    fn assert_consistent(store: &TransactionStore) {
        for (t, sum) in store.list_totals() {
            let expected: Amount = store
                .list_all()
                .iter()
                .filter(|tx| tx.transaction_type() == t)
                .map(|tx| tx.amount())
                .sum();
            assert_eq!(sum, expected, "total for {t} drifted from its transactions");
        }
        let mut seen = ids(&store.list_all());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), store.len(), "duplicate ids in the store");
    }

    #[test]
    fn test_sum_stays_consistent_through_mutations() {
        let mut store = consistent_store(vec![
            tx(1, TransactionType::Credit, 500, "2024-01-01"),
            tx(2, TransactionType::Debit, 20, "2024-01-02"),
            tx(3, TransactionType::Debit, 35, "2024-01-03"),
        ]);
        assert_consistent(&store);

        store
            .add(tx(4, TransactionType::Credit, 75, "2024-01-04"))
            .unwrap();
        assert_consistent(&store);
        store
            .update(tx(2, TransactionType::Credit, 22, "2024-01-02"))
            .unwrap();
        assert_consistent(&store);
        store
            .update(tx(1, TransactionType::Credit, 450, "2024-01-01"))
            .unwrap();
        assert_consistent(&store);
        store.remove(3).unwrap();
        assert_consistent(&store);
        store
            .update(tx(4, TransactionType::Debit, 80, "2024-01-04"))
            .unwrap();
        assert_consistent(&store);

        let totals = store.list_totals();
        assert_eq!(totals[&TransactionType::Credit], Amount::from(472));
        assert_eq!(totals[&TransactionType::Debit], Amount::from(80));
    }

    #[test]
    fn test_list_all_orders_by_date_descending() {
        let store = consistent_store(vec![
            tx(1, TransactionType::Credit, 1, "2024-01-01"),
            tx(2, TransactionType::Credit, 1, "2024-03-01"),
            tx(3, TransactionType::Credit, 1, "2024-02-01"),
        ]);
        assert_eq!(ids(&store.list_all()), vec![2, 3, 1]);
    }

    #[test]
    fn test_list_all_ties_keep_insertion_order() {
        let mut store = consistent_store(vec![
            tx(10, TransactionType::Debit, 1, "2024-05-05"),
            tx(11, TransactionType::Debit, 1, "2024-05-06"),
            tx(12, TransactionType::Debit, 1, "2024-05-05T00:00:00Z"),
        ]);
        store
            .add(tx(13, TransactionType::Credit, 1, "2024-05-05"))
            .unwrap();
        assert_eq!(ids(&store.list_all()), vec![11, 10, 12, 13]);
    }

    #[test]
    fn test_list_all_reflects_latest_mutation() {
        let mut store = consistent_store(vec![
            tx(1, TransactionType::Credit, 1, "2024-01-01"),
            tx(2, TransactionType::Credit, 1, "2024-01-02"),
        ]);
        assert_eq!(ids(&store.list_all()), vec![2, 1]);
        store
            .update(tx(1, TransactionType::Credit, 1, "2024-06-01"))
            .unwrap();
        assert_eq!(ids(&store.list_all()), vec![1, 2]);
    }

    #[test]
    fn test_get_after_add_and_remove() {
        let mut store = consistent_store(Vec::new());
        let record = tx(5, TransactionType::Debit, 9, "2024-02-02");
        store.add(record.clone()).unwrap();
        assert_eq!(store.get(5), Some(&record));
        let removed = store.remove(5).unwrap();
        assert_eq!(removed, record);
        assert!(store.get(5).is_none());
    }

    #[test]
    fn test_update_moves_amount_across_types() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![
                total(TransactionType::Credit, 100),
                total(TransactionType::Debit, 50),
            ])
            .unwrap();
        store
            .hydrate(vec![tx(1, TransactionType::Credit, 30, "2024-01-01")])
            .unwrap();

        store
            .update(tx(1, TransactionType::Debit, 30, "2024-01-01"))
            .unwrap();

        let totals = store.list_totals();
        assert_eq!(totals[&TransactionType::Credit], Amount::from(70));
        assert_eq!(totals[&TransactionType::Debit], Amount::from(80));
        assert_eq!(
            store.get(1).unwrap().transaction_type(),
            TransactionType::Debit
        );
    }

    #[test]
    fn test_update_same_type_rebalances_amount() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![total(TransactionType::Credit, 100)])
            .unwrap();
        store
            .hydrate(vec![tx(1, TransactionType::Credit, 30, "2024-01-01")])
            .unwrap();
        store
            .update(tx(1, TransactionType::Credit, 45, "2024-01-01"))
            .unwrap();
        assert_eq!(
            store.list_totals()[&TransactionType::Credit],
            Amount::from(115)
        );
    }

    #[test]
    fn test_remove_rebalances_totals() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![total(TransactionType::Credit, 100)])
            .unwrap();
        store
            .hydrate(vec![tx(2, TransactionType::Credit, 40, "2024-01-01")])
            .unwrap();

        store.remove(2).unwrap();

        assert_eq!(
            store.list_totals()[&TransactionType::Credit],
            Amount::from(60)
        );
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_list_latest_bound() {
        let transactions = (1..=10)
            .map(|i| tx(i, TransactionType::Debit, i, &format!("2024-01-{i:02}")))
            .collect();
        let store = consistent_store(transactions);
        let latest = store.list_latest(5);
        assert_eq!(latest.len(), 5);
        assert_eq!(ids(&latest), ids(&store.list_all()[..5]));
        assert_eq!(ids(&latest), vec![10, 9, 8, 7, 6]);
        assert_eq!(store.list_latest(50).len(), 10);
        assert!(store.list_latest(0).is_empty());
    }

    #[test]
    fn test_list_by_type() {
        let store = consistent_store(vec![
            tx(1, TransactionType::Credit, 1, "2024-01-01"),
            tx(2, TransactionType::Debit, 1, "2024-01-02"),
            tx(3, TransactionType::Credit, 1, "2024-01-03"),
        ]);
        assert_eq!(
            ids(&store.list_by_type(TransactionType::Credit)),
            vec![3, 1]
        );
        assert_eq!(ids(&store.list_by_type(TransactionType::Debit)), vec![2]);
    }

    #[test]
    fn test_second_hydration_is_rejected() {
        let mut store = consistent_store(vec![tx(1, TransactionType::Credit, 10, "2024-01-01")]);
        let err = store
            .hydrate(vec![tx(1, TransactionType::Credit, 10, "2024-01-01")])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert_eq!(store.len(), 1);

        let err = store
            .hydrate_totals(vec![total(TransactionType::Credit, 999)])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert_eq!(
            store.list_totals()[&TransactionType::Credit],
            Amount::from(10)
        );
    }

    #[test]
    fn test_hydrate_skips_already_known_ids() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![total(TransactionType::Debit, 0)])
            .unwrap();
        store
            .add(tx(7, TransactionType::Debit, 5, "2024-01-01"))
            .unwrap();
        store
            .hydrate(vec![
                tx(7, TransactionType::Debit, 5, "2024-01-01"),
                tx(8, TransactionType::Debit, 6, "2024-01-02"),
            ])
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_total_types_are_rejected() {
        let mut store = TransactionStore::new();
        let err = store
            .hydrate_totals(vec![
                total(TransactionType::Credit, 1),
                total(TransactionType::Credit, 2),
            ])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert!(!store.totals_hydrated());
        assert!(store.list_totals().is_empty());
    }

    #[test]
    fn test_add_duplicate_id_is_rejected() {
        let mut store = consistent_store(vec![tx(1, TransactionType::Credit, 10, "2024-01-01")]);
        let err = store
            .add(tx(1, TransactionType::Credit, 99, "2024-01-02"))
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.list_totals()[&TransactionType::Credit],
            Amount::from(10)
        );
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let mut store = consistent_store(vec![tx(1, TransactionType::Credit, 10, "2024-01-01")]);
        let before = store.list_totals();

        let err = store
            .update(tx(2, TransactionType::Debit, 5, "2024-01-01"))
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
        let err = store.remove(2).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
        assert!(err.to_string().contains("Transaction 2 not found"));

        assert_eq!(store.list_totals(), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_total_bucket_starts_at_zero() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![total(TransactionType::Credit, 100)])
            .unwrap();
        store.hydrate(Vec::new()).unwrap();
        store
            .add(tx(1, TransactionType::Debit, 25, "2024-01-01"))
            .unwrap();
        let totals = store.list_totals();
        assert_eq!(totals[&TransactionType::Debit], Amount::from(25));
        assert_eq!(totals[&TransactionType::Credit], Amount::from(100));
    }

    #[test]
    fn test_mutations_require_totals() {
        let mut store = TransactionStore::new();
        let err = store
            .add(tx(1, TransactionType::Credit, 10, "2024-01-01"))
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_events_follow_mutations() {
        let mut store = TransactionStore::new();
        let mut rx = store.subscribe();
        store
            .hydrate_totals(vec![total(TransactionType::Credit, 0)])
            .unwrap();
        store
            .hydrate(vec![tx(1, TransactionType::Credit, 1, "2024-01-01")])
            .unwrap();
        store
            .add(tx(2, TransactionType::Credit, 1, "2024-01-02"))
            .unwrap();
        store
            .update(tx(2, TransactionType::Credit, 3, "2024-01-02"))
            .unwrap();
        store.remove(1).unwrap();
        // Failed mutations publish nothing.
        assert!(store.remove(1).is_err());

        assert_eq!(rx.try_recv(), Ok(StoreEvent::TotalsHydrated { count: 1 }));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::Hydrated { count: 1 }));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::Added { id: 2 }));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::Updated { id: 2 }));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::Removed { id: 1 }));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_out_of_range_total_leaves_store_untouched() {
        let max = Amount::new(Decimal::MAX);
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![
                AggregateTotal::new(TransactionType::Credit, max),
                total(TransactionType::Debit, 10),
            ])
            .unwrap();
        store
            .hydrate(vec![tx(1, TransactionType::Debit, 10, "2024-01-01")])
            .unwrap();
        let before = store.list_totals();
        let mut rx = store.subscribe();

        let huge = Transaction::new(
            2,
            "Windfall".to_string(),
            TransactionType::Credit,
            Category::Transfer,
            max,
            TransactionDate::parse("2024-01-02").unwrap(),
        );
        let err = store.add(huge).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert!(store.get(2).is_none());

        // Moving the debit into the full credit total fails after the debit side was computed.
        let err = store
            .update(tx(1, TransactionType::Credit, 10, "2024-01-01"))
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert_eq!(
            store.get(1).unwrap().transaction_type(),
            TransactionType::Debit
        );

        assert_eq!(store.list_totals(), before);
        assert_eq!(store.len(), 1);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_remove_out_of_range_is_rejected() {
        let mut store = TransactionStore::new();
        store
            .hydrate_totals(vec![AggregateTotal::new(
                TransactionType::Debit,
                Amount::new(Decimal::MIN),
            )])
            .unwrap();
        store
            .hydrate(vec![tx(1, TransactionType::Debit, 5, "2024-01-01")])
            .unwrap();
        let err = store.remove(1).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_allows_the_next_session_to_hydrate() {
        let mut store = consistent_store(vec![tx(1, TransactionType::Debit, 9, "2024-01-01")]);
        let mut rx = store.subscribe();
        let epoch = store.epoch();
        store.clear();
        assert_eq!(store.epoch(), epoch + 1);
        assert!(store.is_empty());
        assert!(!store.is_hydrated());
        assert!(!store.totals_hydrated());
        assert!(store.list_totals().is_empty());
        assert_eq!(rx.try_recv(), Ok(StoreEvent::Cleared));

        store
            .hydrate(vec![tx(2, TransactionType::Credit, 4, "2024-02-01")])
            .unwrap();
        assert_eq!(ids(&store.list_all()), vec![2]);
    }
}
