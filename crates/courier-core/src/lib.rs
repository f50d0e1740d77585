//! courier-core: client-side HTTP request transport.
//!
//! Normalizes loose request parameters into a validated configuration,
//! encodes payloads for the chosen content type, issues the request over
//! libcurl, blends upload/download progress into one 0-100 scale, and
//! classifies the response.

pub mod config;
pub mod logging;

pub mod client;
pub mod encode;
pub mod error;
pub mod picker;
pub mod progress;
pub mod request;
pub mod response;
pub mod transport;

pub use client::Client;
pub use encode::{ContentType, EncodeError, Multipart, Part, FORM, JSON, URLENCODED};
pub use error::{Error, Result};
pub use picker::{FilePicker, PathPicker, PickerPrompt, SelectedFile, SelectionError};
pub use progress::{blend, Phase, ProgressFn};
pub use request::{
    validate, Method, RequestConfig, RequestData, RequestParams, ValidationError,
};
pub use response::{Body, Response};
pub use transport::{TransportError, REQUESTED_WITH};
