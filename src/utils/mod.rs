//! Utility functions
//!
//! Provides logging, network, and validation utilities.

pub mod logging;
pub mod network;
pub mod validation;
