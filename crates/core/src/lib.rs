//! # Strata Core
//!
//! This crate is the SELECT execution engine of the strata document store. It
//! resolves statement targets against a versioned key-value reader, filters,
//! groups, orders and paginates records, and assembles the projected output of
//! every statement in a batch.
//!
//! Statements are supplied as already-parsed trees (see [`expr`]), and records
//! are read through the [`kvs::Transactable`] trait, for which an in-memory
//! implementation is provided in [`kvs::mem`].

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

mod doc;
mod fmt;
mod fnc;

pub mod cnf;
pub mod ctx;
pub mod dbs;
pub mod err;
pub mod expr;
pub mod kvs;
pub mod val;
