//! Request orchestration: validate, encode, exchange, classify.
//!
//! `Client` exposes the public operations. Requests are independent and
//! share no mutable state; the one shared resource is the cached file
//! picker behind [`FileSelector`], which serializes prompts itself. The
//! blocking curl exchange runs under `spawn_blocking`; progress callbacks
//! fire on that transport thread, strictly before the outcome resolves.

use std::sync::Arc;

use crate::encode;
use crate::error::{Error, Result};
use crate::picker::{FilePicker, FileSelector, PickerFactory, PickerPrompt, SelectedFile};
use crate::progress::ProgressSink;
use crate::request::{validate, RequestData, RequestParams};
use crate::response::Response;
use crate::transport::{self, TransportError};

/// Issues HTTP requests on behalf of the host application.
#[derive(Debug, Default)]
pub struct Client {
    selector: FileSelector,
}

impl Client {
    /// Client without a file-picking capability; `transport` and
    /// `select_files` report that no picker is configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client with a file-picking capability. The factory runs once, on
    /// the first selection; the picker is cached for the client lifetime.
    pub fn with_picker(factory: PickerFactory) -> Self {
        Self {
            selector: FileSelector::new(factory),
        }
    }

    /// Convenience for a ready-made picker instance.
    pub fn with_picker_instance(picker: Arc<dyn FilePicker>) -> Self {
        Self::with_picker(Box::new(move || Arc::clone(&picker)))
    }

    /// Main request operation with all configurable params.
    ///
    /// Exactly one of `Ok`/`Err` per call. Config and encoding failures
    /// surface before any network activity; a non-2xx answer is returned
    /// as [`Error::Http`] carrying the classified response.
    pub async fn request(&self, params: RequestParams) -> Result<Response> {
        let config = validate(&params)?;
        let prepared = encode::prepare(&config)?;
        tracing::debug!(method = %config.method, url = %prepared.url, "sending request");

        let sink = ProgressSink::new(config.upload_ratio, Arc::clone(&config.progress));
        let raw = tokio::task::spawn_blocking(move || transport::perform(prepared, sink))
            .await
            .map_err(TransportError::Worker)??;

        let response = Response::from_raw(raw);
        tracing::debug!(status = response.status, "request classified");
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::Http(response))
        }
    }

    /// GET request; `data` is folded into the URL query string.
    pub async fn get(&self, params: RequestParams) -> Result<Response> {
        self.request(params.with_method("GET")).await
    }

    /// POST request.
    pub async fn post(&self, params: RequestParams) -> Result<Response> {
        self.request(params.with_method("POST")).await
    }

    /// Drives the file-choice prompt and resolves with the chosen files.
    pub async fn select_files(&self, params: RequestParams) -> Result<Vec<SelectedFile>> {
        let config = validate(&params)?;
        let files = self
            .selector
            .select(PickerPrompt {
                accept: config.accept,
                multiple: config.multiple,
            })
            .await?;
        Ok(files)
    }

    /// Uploads user-chosen files: select, build a multipart payload with
    /// each file under `field_name`, append any extra `data` fields, run
    /// the `before_send` hook, POST.
    pub async fn transport(&self, params: RequestParams) -> Result<Response> {
        let config = validate(&params)?;
        let files = self
            .selector
            .select(PickerPrompt {
                accept: config.accept.clone(),
                multiple: config.multiple,
            })
            .await?;

        let mut multipart = encode::Multipart::new();
        for file in &files {
            multipart.append_file(
                config.field_name.clone(),
                file.name.clone(),
                file.mime.clone(),
                file.data.clone(),
            );
        }
        // Extra data fields are appended after the files; same-named
        // fields accumulate rather than overwrite.
        match &config.data {
            None => {}
            Some(RequestData::Value(value)) => multipart.append_value_fields(value)?,
            Some(RequestData::Multipart(extra)) => {
                for part in extra.parts() {
                    multipart.append_part(part.clone());
                }
            }
        }

        if let Some(hook) = &config.before_send {
            hook(&files);
        }

        let mut upload = RequestParams::from(config);
        upload.method = Some("POST".to_string());
        upload.data = Some(RequestData::Multipart(multipart));
        upload.content_type = None;
        self.request(upload).await
    }
}
