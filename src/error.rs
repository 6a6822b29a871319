//! Error types shared by the parse tree reader and the deparser.

use thiserror::Error;

/// Errors returned by this crate.
///
/// The deparser fails fast: the first node it cannot render aborts the call
/// and no partial output is returned. The reference extractor never fails on
/// a well-formed parse tree; unknown node kinds contribute no references.
#[derive(Debug, Error)]
pub enum Error {
    /// The parse tree JSON could not be deserialized.
    #[error("invalid parse tree: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The deparser met a node kind it has no handler for.
    #[error("unsupported node kind {kind}: {payload}")]
    UnsupportedNode { kind: String, payload: String },

    /// The type-name renderer met an unknown `pg_catalog` type.
    #[error("unsupported pg_catalog type: {name}")]
    UnsupportedType { name: String },

    /// An `A_Expr` carried a kind the deparser does not cover.
    #[error("unsupported A_Expr kind: {kind}")]
    UnsupportedAExprKind { kind: i32 },

    /// A `ResTarget` was rendered in a context the deparser does not cover.
    #[error("unsupported ResTarget context: {context}")]
    UnsupportedResTargetContext { context: String },

    /// A transaction statement carried an unknown kind.
    #[error("unsupported transaction statement kind: {kind}")]
    UnsupportedTransactionKind { kind: i32 },
}

pub type Result<T> = core::result::Result<T, Error>;
