use std::fmt::Debug;

/// A record that carries a stable identifier.
///
/// The list only ever compares identifiers, the rest of the record is
/// opaque to it.
pub trait Identified {
    type Id: Clone + Eq + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}
