//! Expense Tracker - Personal finance tracking library
//!
//! This library provides the core functionality for a personal expense
//! tracker: a transaction log with income and expenses, monthly category
//! budgets with near-limit and over-limit alerting, period reports over
//! weekly, monthly, yearly, or custom date ranges, and financial todos.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, todos, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (aggregation, budget evaluation, alerts)
//! - `reports`: Period and budget status reports
//! - `export`: CSV, JSON, and YAML export
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
//! use expense_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
