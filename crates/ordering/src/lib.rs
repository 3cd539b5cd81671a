//! Pronto Ordering - cart and order-taking core.
//!
//! This crate is the backend core of the Pronto food-delivery application:
//!
//! - [`carts`] - concurrent in-memory cart store, catalog-aware cart
//!   operations, and the idle-cart eviction sweeper
//! - [`orders`] - pricing engine and the order-creation pipeline
//! - [`catalog`] / [`users`] - collaborator traits resolved by the
//!   embedding application
//! - [`db`] - `PostgreSQL` implementations of the collaborator traits
//!
//! The HTTP layer, templates, and authentication live in the embedding
//! application; this crate exposes services for it to call.
//!
//! # Time
//!
//! Everything that reads the current time goes through [`clock::Clock`],
//! so tests can pin timestamps. [`clock::SystemClock`] is the production
//! implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod orders;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
