//! # StudyPact Core
//!
//! Shared domain types for the StudyPact fine settlement service.
//!
//! This crate holds everything the other crates agree on:
//!
//! - **Models**: rooms, participants, rules, attendance logs, vacations,
//!   fines and notifications, plus the request/response shapes of the API
//! - **Errors**: the domain error taxonomy used across all crates
//! - **Store**: the persistence and notification traits the settlement
//!   engine is written against
//!
//! The crate is deliberately free of I/O so that the settlement engine and
//! its tests only depend on trait contracts, not on a concrete database.

/// Domain error taxonomy
pub mod errors;
/// Mock implementations of the store traits for testing
pub mod mock;
/// Domain models and API request/response types
pub mod models;
/// Persistence and notification trait contracts
pub mod store;
