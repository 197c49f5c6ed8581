//! Mercado Core - Shared types library.
//!
//! This crate provides the types shared by all Mercado components:
//! - `server` - REST backend for the product catalog
//! - `storefront` - Client-side catalog rendering and cart display
//! - `cli` - Command-line tools for migrations, seeding and browsing
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no database
//! access and no HTTP clients. Cart state goes through the [`cart::CartStorage`]
//! port so it can be backed by memory in tests and by a file in the CLI.
//!
//! # Modules
//!
//! - [`types`] - Product records, field diffs, image URLs and prices
//! - [`cart`] - Cart entries, the storage port and quantity aggregation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartEntry, CartStorage, CartStorageError, MemoryStorage};
pub use types::*;
