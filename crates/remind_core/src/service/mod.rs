//! Background mutation service.
//!
//! # Responsibility
//! - Run every store mutation on one serial worker, off the caller thread.
//! - Broadcast completion events to registered observers.
//!
//! # Invariants
//! - Execution order matches submission order; no reordering, no priority.

pub mod remind_service;
