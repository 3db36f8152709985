use lanid_common::network::identifier::{ClientId, InvalidIdentifier};
use thiserror::Error;

/// Validation and mutation failures of the client directory.
///
/// Expected, non-exceptional outcomes (adding a client whose name is taken,
/// a discovered host losing a priority race) are reported through boolean
/// results instead of this type.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client name must not be empty")]
    EmptyName,

    #[error("client {0:?} has no identifiers")]
    EmptyIds(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    #[error("invalid upstream servers: {0}")]
    InvalidUpstreams(#[source] anyhow::Error),

    #[error("client {0:?} already exists")]
    DuplicateName(String),

    #[error("another client uses the same identifier ({id}): {owner:?}")]
    IdentifierConflict { id: ClientId, owner: String },

    #[error("client {0:?} not found")]
    NotFound(String),
}
