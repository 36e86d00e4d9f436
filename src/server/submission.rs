//! Request extractor for `POST /process-email`.
//!
//! Accepts `multipart/form-data` and `application/x-www-form-urlencoded`.
//! Any other body is treated as an empty submission.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{StatusCode, header};
use axum::Form;

use crate::error::ApiError;

/// Form field carrying inline email text.
pub const CONTENT_FIELD: &str = "email_content";
/// Form field carrying an uploaded email file.
pub const FILE_FIELD: &str = "email_file";

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_PDF: &str = "application/pdf";

/// A file part from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The two optional inputs of a submission.
#[derive(Debug, Clone, Default)]
pub struct EmailSubmission {
    pub content: Option<String>,
    pub file: Option<UploadedFile>,
}

impl EmailSubmission {
    /// Resolve the submission into the email text to process.
    ///
    /// The file is checked first and wins over inline text.
    pub fn into_email_text(self) -> Result<String, ApiError> {
        let text = match (self.file, self.content) {
            (Some(file), _) => decode_file(file)?,
            (None, Some(content)) => content,
            (None, None) => return Err(ApiError::MissingInput),
        };

        if text.trim().is_empty() {
            return Err(ApiError::EmptyContent);
        }
        Ok(text)
    }
}

fn decode_file(file: UploadedFile) -> Result<String, ApiError> {
    let content_type = file.content_type.as_deref().map(mime_essence).unwrap_or_default();
    match content_type.as_str() {
        TEXT_PLAIN => String::from_utf8(file.bytes.to_vec()).map_err(|_| ApiError::InvalidEncoding),
        APPLICATION_PDF => Err(ApiError::PdfNotImplemented),
        _ => Err(ApiError::UnsupportedFileType { content_type }),
    }
}

/// `text/plain; charset=utf-8` → `text/plain`.
fn mime_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl<S> FromRequest<S> for EmailSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(mime_essence)
            .unwrap_or_default();

        match content_type.as_str() {
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::MalformedForm(e.body_text()))?;
                from_multipart(multipart).await
            }
            "application/x-www-form-urlencoded" => {
                let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| {
                        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                            ApiError::PayloadTooLarge
                        } else {
                            ApiError::MalformedForm(e.body_text())
                        }
                    })?;
                Ok(Self {
                    content: fields.remove(CONTENT_FIELD),
                    file: None,
                })
            }
            _ => Ok(Self::default()),
        }
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<EmailSubmission, ApiError> {
    let mut submission = EmailSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CONTENT_FIELD) => {
                submission.content = Some(field.text().await.map_err(multipart_error)?);
            }
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was picked.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                submission.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::MalformedForm(e.body_text())
    }
}
