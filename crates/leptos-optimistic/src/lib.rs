//! Leptos Optimistic List
//!
//! Keyed list state for list-backed views. Mutations are applied to the
//! local list before the backend is called, then either confirmed with the
//! server's value or rolled back to the previous snapshot once the remote
//! call settles.
//!
//! Every entry point applies its local change synchronously and returns a
//! future that performs the remote call. The UI therefore updates before
//! any network latency is observed, even if the future is only spawned
//! later.

mod identified;
mod list;
mod mutation;

pub use identified::Identified;
pub use list::OptimisticList;
pub use mutation::MutationPhase;
