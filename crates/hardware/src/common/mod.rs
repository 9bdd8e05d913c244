//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache model and
//! the trace driver. It includes:
//! 1. **Geometry and Addresses:** Validated cache dimensions and the address decoder.
//! 2. **Constants:** Address width and trace syntax constants.
//! 3. **Access Kinds:** Local and snooped access classification.
//! 4. **Error Handling:** Configuration, access and trace error types.

/// Cache geometry and address decoding.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Access kind definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressDecoder, Geometry};
pub use constants::{ADDRESS_MASK, ADDRESS_WIDTH};
pub use data::AccessKind;
pub use error::{AccessError, ConfigError, TraceError};
