//! Core types for Fishmarket.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod id;
pub mod line_item;
pub mod product;

pub use id::{ProductId, ProductIdError};
pub use line_item::{LineItem, LineItemError, is_positive_quantity};
pub use product::Product;
