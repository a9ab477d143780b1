//! Engine error taxonomy.

use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Every variant reflects an invalid input detected synchronously at the
/// point of validation. Nothing here is transient: a failed operation is
/// terminal for that one call, and the caller's state is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A velocity with `|v| >= 1` was supplied to a boost, a frame, or an
    /// object/event. Never clamped or coerced.
    #[error("invalid velocity {0}: |v| must be strictly less than 1 (c = 1)")]
    InvalidVelocity(f64),

    /// An object, event, or child frame named a frame id that was never
    /// declared.
    #[error("unknown reference frame id {0}")]
    UnknownFrameReference(u32),

    /// A load specification was structurally unusable: missing or ill-typed
    /// fields, non-finite numbers, or duplicate frame ids.
    #[error("malformed scene spec: {0}")]
    MalformedSpec(String),
}
