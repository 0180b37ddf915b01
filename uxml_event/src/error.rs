// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use uxml_types::TypeTag;

use crate::id::EventId;

/// Errors raised while registering events and class handlers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The (name, owner) pair is already registered.
    #[error("event '{name}' is already registered on {owner}")]
    Duplicate {
        /// Event name.
        name: &'static str,
        /// Owner type.
        owner: TypeTag,
    },
    /// The registry was sealed.
    #[error("event registry is sealed")]
    Sealed,
    /// The u16 id space is exhausted.
    #[error("too many events registered (max {})", u16::MAX)]
    TooMany,
    /// The id is not known to the registry.
    #[error("{0} is not registered")]
    Unregistered(EventId),
}

/// Failure reported by an event handler.
///
/// Handler failures are logged and counted; they never abort the remaining
/// handlers of a dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("event handler failed: {message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with a human readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
