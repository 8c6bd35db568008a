//! Domain layer for the timebox governor
//!
//! This module contains the outcome model, the raised-fault sum type and the
//! ports the governor depends on.

pub mod error;
pub mod models;
pub mod ports;

pub use error::GovernorError;
