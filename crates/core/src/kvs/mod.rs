//! The module defining the versioned record store which statements read
//! from. The [`Transactable`] trait is the read API of a store, and
//! [`mem::Datastore`] is an in-memory implementation of it. The
//! [`Datastore`] executes batches of statements against a store.

mod api;
mod ds;

pub mod mem;

pub use self::api::Transactable;
pub use self::ds::Datastore;
