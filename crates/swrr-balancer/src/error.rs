//! Balancer error types.

use thiserror::Error;

/// Errors that can occur while building or driving a selector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalancerError {
    /// The weight list was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Internal credit state no longer satisfies the zero-sum invariant.
    /// Fatal: the selector must be rebuilt, never retried.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type BalancerResult<T> = Result<T, BalancerError>;
