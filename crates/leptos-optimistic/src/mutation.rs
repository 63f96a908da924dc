//! Pending Mutations
//!
//! Bookkeeping for one in-flight optimistic change and the helpers that
//! edit the keyed vector in place.

use leptos::prelude::*;

use crate::Identified;

/// Lifecycle of a single optimistic mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationPhase {
    /// Entry shows its last loaded or confirmed value
    Idle,
    /// Local value diverges from the server while the remote call runs
    Applied,
    /// Remote call succeeded (terminal)
    Confirmed,
    /// Remote call failed and the snapshot was restored (terminal)
    RolledBack,
}

impl MutationPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::RolledBack)
    }
}

/// What a rollback has to restore.
pub(crate) enum Snapshot<T> {
    /// Entry was overwritten; put this value back
    Replaced(T),
    /// Entry was removed from `index` (None if it was not in the list)
    Removed { item: T, index: Option<usize> },
    /// Entry was added; take it out again
    Inserted,
}

/// One in-flight mutation.
///
/// Settling takes `self` by value, so at most one outcome is ever applied.
/// Dropping it without settling keeps the applied value and only releases
/// the pending count.
pub(crate) struct PendingMutation<T: Identified> {
    id: T::Id,
    snapshot: Option<Snapshot<T>>,
    phase: MutationPhase,
    items: ArcRwSignal<Vec<T>>,
    pending: ArcRwSignal<usize>,
}

impl<T> PendingMutation<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    pub(crate) fn begin(
        id: T::Id,
        snapshot: Snapshot<T>,
        items: ArcRwSignal<Vec<T>>,
        pending: ArcRwSignal<usize>,
    ) -> Self {
        pending.update(|n| *n += 1);
        Self {
            id,
            snapshot: Some(snapshot),
            phase: MutationPhase::Applied,
            items,
            pending,
        }
    }

    /// Accept the remote result. `confirmed` replaces the local entry when given.
    pub(crate) fn confirm(mut self, confirmed: Option<T>) {
        debug_assert_eq!(self.phase, MutationPhase::Applied);
        self.phase = MutationPhase::Confirmed;
        self.snapshot = None;

        if let Some(value) = confirmed {
            let id = self.id.clone();
            let mut found = false;
            self.items.update(|items| found = settle_entry(items, &id, value));
            if !found {
                log::debug!("confirmed entry {:?} is no longer listed", id);
            }
        }
    }

    /// Restore the pre-mutation state.
    pub(crate) fn roll_back(mut self) {
        debug_assert_eq!(self.phase, MutationPhase::Applied);
        self.phase = MutationPhase::RolledBack;

        let id = self.id.clone();
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        log::debug!("rolling back optimistic change to {:?}", id);

        self.items.update(|items| match snapshot {
            Snapshot::Replaced(previous) => {
                replace_entry(items, &id, previous);
            }
            Snapshot::Removed { item, index } => {
                // A reload that already listed it again wins over the snapshot
                if position_of(items, &id).is_none() {
                    match index {
                        Some(index) => items.insert(index.min(items.len()), item),
                        None => items.push(item),
                    }
                }
            }
            Snapshot::Inserted => items.retain(|entry| entry.id() != id),
        });
    }
}

impl<T: Identified> Drop for PendingMutation<T> {
    fn drop(&mut self) {
        if !self.phase.is_terminal() {
            log::warn!("optimistic change to {:?} dropped before it settled", self.id);
        }
        self.pending.update(|n| *n = n.saturating_sub(1));
    }
}

// ========================
// Vector helpers
// ========================

pub(crate) fn position_of<T: Identified>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|entry| entry.id() == *id)
}

/// Overwrite the entry with `id`. Returns false if there is none.
pub(crate) fn replace_entry<T: Identified>(items: &mut [T], id: &T::Id, value: T) -> bool {
    match position_of(items, id) {
        Some(index) => {
            items[index] = value;
            true
        }
        None => false,
    }
}

/// Overwrite the entry keyed by `id` with a value whose own identifier may
/// differ (server-assigned ids). Any other entry already carrying the new
/// identifier is dropped so identifiers stay unique.
pub(crate) fn settle_entry<T: Identified>(items: &mut Vec<T>, id: &T::Id, value: T) -> bool {
    let Some(mut index) = position_of(items, id) else {
        return false;
    };
    let new_id = value.id();
    if new_id != *id {
        if let Some(duplicate) = position_of(items, &new_id) {
            items.remove(duplicate);
            if duplicate < index {
                index -= 1;
            }
        }
    }
    items[index] = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Entry(u32, &'static str);

    impl Identified for Entry {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_replace_entry_missing_id() {
        let mut items = vec![Entry(1, "a")];
        assert!(!replace_entry(&mut items, &2, Entry(2, "b")));
        assert_eq!(items, vec![Entry(1, "a")]);
    }

    #[test]
    fn test_settle_entry_drops_duplicate_before_target() {
        // Provisional entry confirmed as 7 after a reload already listed 7
        let mut items = vec![Entry(7, "reloaded"), Entry(3, "c"), Entry(u32::MAX, "draft")];
        assert!(settle_entry(&mut items, &u32::MAX, Entry(7, "server")));
        assert_eq!(items, vec![Entry(3, "c"), Entry(7, "server")]);
    }

    #[test]
    fn test_phase_terminal() {
        assert!(!MutationPhase::Idle.is_terminal());
        assert!(!MutationPhase::Applied.is_terminal());
        assert!(MutationPhase::Confirmed.is_terminal());
        assert!(MutationPhase::RolledBack.is_terminal());
    }
}
