//! Optimistic List
//!
//! The owned collection handle pages hold on to.

use std::future::Future;

use leptos::prelude::*;

use crate::mutation::{position_of, replace_entry, PendingMutation, Snapshot};
use crate::Identified;

/// Reactive, keyed list that can run ahead of the server.
///
/// Cloning the handle shares the underlying state, so one list can be
/// provided through context and used from any number of components. The
/// list is only ever changed through these methods; readers get a
/// read-only view from [`OptimisticList::items`].
pub struct OptimisticList<T> {
    items: ArcRwSignal<Vec<T>>,
    pending: ArcRwSignal<usize>,
}

impl<T> Clone for OptimisticList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<T> Default for OptimisticList<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OptimisticList<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        warn_on_duplicates(&items);
        Self {
            items: ArcRwSignal::new(items),
            pending: ArcRwSignal::new(0),
        }
    }

    // ========================
    // Read surface
    // ========================

    /// Reactive read-only view of the current list
    pub fn items(&self) -> ArcReadSignal<Vec<T>> {
        self.items.read_only()
    }

    /// Current list without subscribing
    pub fn snapshot(&self) -> Vec<T> {
        self.items.get_untracked()
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.items
            .with_untracked(|items| items.iter().find(|entry| entry.id() == *id).cloned())
    }

    pub fn len(&self) -> usize {
        self.items.with_untracked(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any remote call is still outstanding (reactive).
    ///
    /// Advisory only: it is meant for disabling controls, the list never
    /// blocks a call because of it.
    pub fn is_pending(&self) -> bool {
        self.pending.get() > 0
    }

    pub fn pending_count(&self) -> usize {
        self.pending.get_untracked()
    }

    // ========================
    // Mutations
    // ========================

    /// Replace everything with an authoritative list.
    ///
    /// In-flight mutations still settle afterwards, but only touch entries
    /// that are present in the new list.
    pub fn replace_all(&self, items: Vec<T>) {
        warn_on_duplicates(&items);
        self.items.set(items);
    }

    /// Show `next` in place of `previous` now, then run `remote`.
    ///
    /// The returned future yields the server's value, which also replaces
    /// the entry, or the remote error after `previous` has been restored.
    /// Overlapping updates on one identifier are not serialized: whichever
    /// write lands last is what the list shows.
    ///
    /// # Panics
    ///
    /// If `next` and `previous` carry different identifiers.
    pub fn optimistic_update<F, E>(
        &self,
        next: T,
        previous: T,
        remote: F,
    ) -> impl Future<Output = Result<T, E>> + 'static
    where
        F: Future<Output = Result<T, E>> + 'static,
        E: 'static,
    {
        let id = previous.id();
        assert!(
            next.id() == id,
            "optimistic update changed the identifier from {:?} to {:?}",
            id,
            next.id()
        );

        let mut applied = false;
        self.items.update(|items| applied = replace_entry(items, &id, next));
        if !applied {
            log::debug!("optimistic update for {:?} found no listed entry", id);
        }

        let mutation = self.begin(id, Snapshot::Replaced(previous));
        async move {
            match remote.await {
                Ok(confirmed) => {
                    mutation.confirm(Some(confirmed.clone()));
                    Ok(confirmed)
                }
                Err(err) => {
                    mutation.roll_back();
                    Err(err)
                }
            }
        }
    }

    /// Remove `item` now, then run `remote`.
    ///
    /// On failure the item goes back to the index it was removed from
    /// (clamped to the current length) before the error is returned.
    pub fn optimistic_delete<F, R, E>(
        &self,
        item: T,
        remote: F,
    ) -> impl Future<Output = Result<R, E>> + 'static
    where
        F: Future<Output = Result<R, E>> + 'static,
        R: 'static,
        E: 'static,
    {
        let id = item.id();
        let mut index = None;
        self.items.update(|items| {
            index = position_of(items, &id);
            if let Some(index) = index {
                items.remove(index);
            }
        });
        if index.is_none() {
            log::debug!("optimistic delete for {:?} found no listed entry", id);
        }

        let mutation = self.begin(id, Snapshot::Removed { item, index });
        async move {
            match remote.await {
                Ok(value) => {
                    mutation.confirm(None);
                    Ok(value)
                }
                Err(err) => {
                    mutation.roll_back();
                    Err(err)
                }
            }
        }
    }

    /// Append `provisional` now, then run `remote`.
    ///
    /// `provisional` normally carries a temporary identifier; the server's
    /// record replaces it on success. On failure the provisional entry is
    /// removed again.
    pub fn optimistic_insert<F, E>(
        &self,
        provisional: T,
        remote: F,
    ) -> impl Future<Output = Result<T, E>> + 'static
    where
        F: Future<Output = Result<T, E>> + 'static,
        E: 'static,
    {
        let id = provisional.id();
        let mut displaced = None;
        self.items.update(|items| match position_of(items, &id) {
            Some(index) => displaced = Some(std::mem::replace(&mut items[index], provisional)),
            None => items.push(provisional),
        });

        let snapshot = match displaced {
            Some(previous) => {
                log::warn!("provisional id {:?} was already listed", id);
                Snapshot::Replaced(previous)
            }
            None => Snapshot::Inserted,
        };

        let mutation = self.begin(id, snapshot);
        async move {
            match remote.await {
                Ok(created) => {
                    mutation.confirm(Some(created.clone()));
                    Ok(created)
                }
                Err(err) => {
                    mutation.roll_back();
                    Err(err)
                }
            }
        }
    }

    fn begin(&self, id: T::Id, snapshot: Snapshot<T>) -> PendingMutation<T> {
        PendingMutation::begin(id, snapshot, self.items.clone(), self.pending.clone())
    }
}

fn warn_on_duplicates<T: Identified>(items: &[T]) {
    for (index, item) in items.iter().enumerate() {
        let id = item.id();
        if items[..index].iter().any(|other| other.id() == id) {
            log::warn!("list contains duplicate id {:?}", id);
            debug_assert!(false, "duplicate id {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::future::ready;

    #[derive(Clone, Debug, PartialEq)]
    struct Account {
        id: u32,
        name: &'static str,
        active: bool,
    }

    impl Identified for Account {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn account(id: u32, name: &'static str, active: bool) -> Account {
        Account { id, name, active }
    }

    /// Remote action that settles when the sender fires
    fn remote<T>() -> (
        oneshot::Sender<Result<T, String>>,
        impl Future<Output = Result<T, String>>,
    ) {
        let (tx, rx) = oneshot::channel();
        (tx, async move { rx.await.expect("sender dropped") })
    }

    fn ids(list: &OptimisticList<Account>) -> Vec<u32> {
        list.snapshot().iter().map(|a| a.id).collect()
    }

    #[tokio::test]
    async fn test_update_rolls_back_on_failure() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let (tx, action) = remote();

        let fut = list.optimistic_update(account(1, "A", false), account(1, "A", true), action);
        assert_eq!(list.snapshot(), vec![account(1, "A", false)]);
        assert!(list.is_pending());

        tx.send(Err("server down".to_string())).unwrap();
        assert_eq!(fut.await, Err("server down".to_string()));
        assert_eq!(list.snapshot(), vec![account(1, "A", true)]);
        assert!(!list.is_pending());
    }

    #[tokio::test]
    async fn test_update_converges_to_server_value() {
        let list = OptimisticList::with_items(vec![account(1, "A", true), account(2, "B", true)]);
        let (tx, action) = remote();

        let fut = list.optimistic_update(account(2, "B", false), account(2, "B", true), action);
        assert_eq!(list.get(&2), Some(account(2, "B", false)));

        tx.send(Ok(account(2, "B (server)", false))).unwrap();
        assert_eq!(fut.await, Ok(account(2, "B (server)", false)));
        assert_eq!(
            list.snapshot(),
            vec![account(1, "A", true), account(2, "B (server)", false)]
        );
        assert_eq!(list.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_restores_original_index() {
        let list = OptimisticList::with_items(vec![
            account(1, "A", true),
            account(2, "B", true),
            account(3, "C", true),
        ]);
        let (tx, action) = remote::<()>();

        let fut = list.optimistic_delete(account(2, "B", true), action);
        assert_eq!(ids(&list), vec![1, 3]);

        tx.send(Err("forbidden".to_string())).unwrap();
        assert_eq!(fut.await, Err("forbidden".to_string()));
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert_eq!(list.get(&2), Some(account(2, "B", true)));
    }

    #[tokio::test]
    async fn test_delete_success_keeps_item_removed() {
        let list = OptimisticList::with_items(vec![account(1, "A", true), account(2, "B", true)]);

        let result = list
            .optimistic_delete(account(1, "A", true), ready(Ok::<_, String>(())))
            .await;
        assert_eq!(result, Ok(()));
        assert_eq!(ids(&list), vec![2]);
    }

    #[tokio::test]
    async fn test_delete_rollback_clamps_index_after_shrink() {
        let list = OptimisticList::with_items(vec![
            account(1, "A", true),
            account(2, "B", true),
            account(3, "C", true),
        ]);
        let (tx, action) = remote::<()>();

        let fut = list.optimistic_delete(account(3, "C", true), action);
        list.replace_all(vec![account(1, "A", true)]);

        tx.send(Err("timeout".to_string())).unwrap();
        assert!(fut.await.is_err());
        assert_eq!(ids(&list), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_rollback_keeps_reloaded_entry() {
        let list = OptimisticList::with_items(vec![account(1, "A", true), account(2, "B", true)]);
        let (tx, action) = remote::<()>();

        let fut = list.optimistic_delete(account(2, "B", true), action);
        list.replace_all(vec![account(1, "A", true), account(2, "B (reloaded)", true)]);

        tx.send(Err("conflict".to_string())).unwrap();
        assert!(fut.await.is_err());
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.get(&2), Some(account(2, "B (reloaded)", true)));
    }

    #[test]
    fn test_replace_all_is_idempotent() {
        let list = OptimisticList::new();
        let loaded = vec![account(1, "A", true), account(2, "B", false)];

        list.replace_all(loaded.clone());
        assert_eq!(list.snapshot(), loaded);
        list.replace_all(loaded.clone());
        assert_eq!(list.snapshot(), loaded);
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_all_discards_speculative_state() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let (tx, action) = remote();

        let fut = list.optimistic_update(account(1, "A", false), account(1, "A", true), action);
        list.replace_all(vec![account(1, "A", true)]);
        assert_eq!(list.snapshot(), vec![account(1, "A", true)]);

        tx.send(Ok(account(1, "A", false))).unwrap();
        fut.await.unwrap();
        assert_eq!(list.snapshot(), vec![account(1, "A", false)]);
    }

    #[tokio::test]
    async fn test_updates_on_distinct_ids_settle_independently() {
        let list = OptimisticList::with_items(vec![account(1, "A", true), account(2, "B", true)]);
        let (tx1, action1) = remote();
        let (tx2, action2) = remote();

        let first = list.optimistic_update(account(1, "A", false), account(1, "A", true), action1);
        let second = list.optimistic_update(account(2, "B", false), account(2, "B", true), action2);
        assert_eq!(list.pending_count(), 2);

        tx2.send(Err("nope".to_string())).unwrap();
        assert!(second.await.is_err());
        assert_eq!(list.pending_count(), 1);

        tx1.send(Ok(account(1, "A", false))).unwrap();
        assert!(first.await.is_ok());
        assert_eq!(
            list.snapshot(),
            vec![account(1, "A", false), account(2, "B", true)]
        );
        assert!(!list.is_pending());
    }

    #[tokio::test]
    async fn test_same_id_last_write_wins() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let (tx1, action1) = remote();
        let (tx2, action2) = remote();

        let first = list.optimistic_update(account(1, "A1", true), account(1, "A", true), action1);
        let second = list.optimistic_update(account(1, "A2", true), account(1, "A1", true), action2);
        assert_eq!(list.get(&1), Some(account(1, "A2", true)));

        tx2.send(Ok(account(1, "A2", true))).unwrap();
        second.await.unwrap();
        tx1.send(Ok(account(1, "A1", true))).unwrap();
        first.await.unwrap();

        // No per-id queueing: the later resolution overwrites the earlier one
        assert_eq!(list.get(&1), Some(account(1, "A1", true)));
    }

    #[tokio::test]
    async fn test_insert_swaps_provisional_for_server_record() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let (tx, action) = remote();

        let fut = list.optimistic_insert(account(u32::MAX, "New", true), action);
        assert_eq!(ids(&list), vec![1, u32::MAX]);

        tx.send(Ok(account(42, "New", true))).unwrap();
        assert_eq!(fut.await, Ok(account(42, "New", true)));
        assert_eq!(ids(&list), vec![1, 42]);
    }

    #[tokio::test]
    async fn test_insert_failure_removes_provisional() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);

        let result = list
            .optimistic_insert(
                account(u32::MAX, "New", true),
                ready(Err::<Account, _>("invalid".to_string())),
            )
            .await;
        assert_eq!(result, Err("invalid".to_string()));
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    fn test_dropped_future_keeps_local_value_and_releases_pending() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let (_tx, action) = remote();

        let fut = list.optimistic_update(account(1, "A", false), account(1, "A", true), action);
        assert_eq!(list.pending_count(), 1);
        drop(fut);

        assert_eq!(list.pending_count(), 0);
        assert_eq!(list.get(&1), Some(account(1, "A", false)));
    }

    #[tokio::test]
    async fn test_cloned_handle_outlives_disposed_owner() {
        let owner = Owner::new();
        let list = owner.with(|| {
            let stored = StoredValue::new(OptimisticList::<Account>::new());
            stored.get_value()
        });
        let (tx, load) = remote::<Vec<Account>>();
        let settle = {
            let list = list.clone();
            async move {
                if let Ok(rows) = load.await {
                    list.replace_all(rows);
                }
            }
        };

        // Component unmounted while the load was in flight
        drop(owner);
        tx.send(Ok(vec![account(1, "A", true)])).unwrap();
        settle.await;
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    #[should_panic(expected = "changed the identifier")]
    fn test_update_rejects_identifier_change() {
        let list = OptimisticList::with_items(vec![account(1, "A", true)]);
        let _ = list.optimistic_update(
            account(2, "A", true),
            account(1, "A", true),
            ready(Ok::<_, String>(account(2, "A", true))),
        );
    }

    #[tokio::test]
    async fn test_mixed_sequence_keeps_ids_unique() {
        let list = OptimisticList::with_items(vec![
            account(1, "A", true),
            account(2, "B", true),
            account(3, "C", true),
        ]);

        let _ = list
            .optimistic_delete(account(2, "B", true), ready(Err::<(), _>("x".to_string())))
            .await;
        let _ = list
            .optimistic_update(
                account(3, "C", false),
                account(3, "C", true),
                ready(Ok::<_, String>(account(3, "C", false))),
            )
            .await;
        let _ = list
            .optimistic_insert(account(9, "I", true), ready(Ok::<_, String>(account(3, "C'", true))))
            .await;
        let _ = list
            .optimistic_delete(account(1, "A", true), ready(Ok::<_, String>(())))
            .await;

        let mut seen = ids(&list);
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(ids(&list), vec![2, 3]);
    }
}
