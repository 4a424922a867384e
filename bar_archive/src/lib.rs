//! Canonical per-symbol archive of daily price bars.
//!
//! Each tracked symbol has one continuously-growing CSV artifact in a durable
//! store. Every run fetches a small recent window of bars and reconciles it
//! into the stored history: read, merge (deduplicated by trading date, newest
//! fetch wins), write back. The merge is a pure function and idempotent, so
//! retried or overlapping runs converge to the same artifact instead of
//! corrupting it.
//!
//! Module map:
//! - [`model`] - validated [`Bar`](model::Bar) records and the invariant-holding
//!   [`Dataset`](model::Dataset).
//! - [`codec`] - the persisted CSV encoding, with fail-closed corruption checks.
//! - [`merge`] - the incremental merge engine.
//! - [`store`] - the durable object store boundary (local filesystem, in-memory).
//! - [`reconcile`] - per-symbol read-merge-write orchestration.
//! - [`report`] - per-run outcome summary.
//! - [`config`] - TOML run configuration.

pub mod codec;
pub mod config;
pub mod merge;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod store;
