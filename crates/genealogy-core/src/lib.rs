//! Core types and trait definitions for the genealogy record store.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the two pieces with real logic, family-group resolution ([`family`]) and
//! the review workflow ([`review`]), and the [`store::GenealogyStore`]
//! abstraction both are written against.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assertion;
pub mod error;
pub mod event;
pub mod family;
pub mod limit;
pub mod location;
pub mod note;
pub mod person;
pub mod relationship;
pub mod review;
pub mod status;
pub mod store;
pub mod text;

pub use error::{Error, Result};
