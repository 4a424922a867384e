//! Market-data fetch collaborator for the daily bar archive.
//!
//! This crate owns everything between the archive engine and the outside
//! world's bar data: the [`BarFeed`](providers::BarFeed) trait, the Alpaca
//! REST implementation, credential resolution, and the untrusted wire-shaped
//! [`RawBar`](models::raw_bar::RawBar) record. The archive engine validates
//! every record coming out of here; nothing in this crate is trusted for
//! shape or ordering.

pub mod credentials;
pub mod models;
pub mod providers;
