//! Request error taxonomy.
//!
//! Callers distinguish "my request was malformed" (`Validation`,
//! `Encode` — synchronous, before any network activity), "the network
//! failed" (`Transport` — no status code was obtained), and "the server
//! rejected it" (`Http` — a classified non-2xx outcome carrying the full
//! well-formed response).

use thiserror::Error;

use crate::picker::SelectionError;
use crate::request::ValidationError;
use crate::response::Response;
use crate::transport::TransportError;
use crate::encode::EncodeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status. Not a fault: the
    /// response is complete and well-formed.
    #[error("HTTP {status}", status = .0.status)]
    Http(Response),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl Error {
    /// The classified response, when the server answered non-2xx.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Http(response) => Some(response),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
