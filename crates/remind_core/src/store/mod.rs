//! Durable reminder storage.
//!
//! # Responsibility
//! - Define the store contract and its SQLite implementation.
//! - Keep SQL details behind the persistence boundary.
//!
//! # Invariants
//! - Mutating a missing id yields zero affected rows, never an error.
//! - Each store call is individually atomic; no transaction spans calls.

pub mod reminder_store;
