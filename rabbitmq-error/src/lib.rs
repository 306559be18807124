// Copyright 2023 The RabbitMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # RabbitMQ Error Handling
//!
//! This crate provides the unified error type shared by the rabbitmq-rust
//! crates.
//!
//! ## Usage
//!
//! ```rust
//! use rabbitmq_error::RabbitMQError;
//! use rabbitmq_error::RabbitMQResult;
//!
//! fn check_priority(priority: Option<u8>) -> RabbitMQResult<u8> {
//!     priority.ok_or_else(|| RabbitMQError::illegal_argument("priority is required"))
//! }
//! # assert!(check_priority(None).is_err());
//! # assert_eq!(check_priority(Some(4)).unwrap(), 4);
//! ```

use thiserror::Error;

/// Main error type for all RabbitMQ operations.
///
/// Each variant represents a logical category of failures with enough
/// context for production debugging. `From` conversions bridge the
/// third-party layers (JSON) into this type so call sites can use `?`.
#[derive(Debug, Error)]
pub enum RabbitMQError {
    /// Caller handed an absent or unusable argument to an operation
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// Header table entry exists with a value shape the caller cannot accept
    #[error("Invalid value for header '{field}': {reason}")]
    InvalidHeaderValue { field: String, reason: String },

    /// Delivery-mode octet outside the protocol pair (1 = non-persistent, 2 = persistent)
    #[error("Unknown delivery mode: {0}")]
    UnknownDeliveryMode(u8),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl RabbitMQError {
    /// Create an illegal argument error
    #[inline]
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Create an invalid header value error
    #[inline]
    pub fn invalid_header_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeaderValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the rabbitmq-rust crates
pub type RabbitMQResult<T> = Result<T, RabbitMQError>;
