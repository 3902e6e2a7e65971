//! Tavola Catalog - Food catalog storage.
//!
//! Owns the persisted [`Food`](models::Food) collection and exposes
//! validated list/get/create/bulk-create/delete operations over an embedded
//! SQLite database.
//!
//! # Modules
//!
//! - [`models`] - Domain types ([`models::Food`], [`models::NewFood`])
//! - [`validation`] - Required-field validation with field-set reporting
//! - [`repository`] - [`repository::FoodRepository`], the storage API
//! - [`db`] - Pool creation and embedded migrations
//! - [`error`] - [`error::CatalogError`] taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{CatalogError, Result};
pub use models::{Food, NewFood, PLACEHOLDER_IMAGE};
pub use repository::FoodRepository;
pub use validation::InvalidFields;
