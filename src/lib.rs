//! Expense Tracker
//!
//! This crate records personal expenses to an append-only log and summarizes
//! them against a fixed budget.

pub mod config;
pub mod core;
pub mod interactive;
pub mod report;
pub mod storage;
