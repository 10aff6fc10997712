//! Error handling utilities
//!
//! This module defines the error taxonomy shared by every cache component.

pub mod error;

pub use error::*;
