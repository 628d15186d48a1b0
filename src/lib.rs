//! gradpay: graduate employment survey analytics.
//!
//! Loads the cleaned survey table, projects next-year salaries per
//! (degree, university) cohort and relates employment rates to salary.
//! The dashboard and report binaries are thin callers of this library.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use error::{Error, Result};
