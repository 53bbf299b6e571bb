//! Multipart decoding for `POST /upload`.
//!
//! The form carries one `image` file part and three text parts (`x`, `y`,
//! `size`). Numeric text is parsed leniently: decimal values are truncated
//! toward zero, so `"123.9"` becomes `123`. Unknown parts are drained and
//! ignored.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::domain::ports::UploadRegionRequest;
use crate::domain::{Error, Placement, PlacementValidationError};

/// Largest accepted text part (`x`, `y`, `size`).
const MAX_TEXT_FIELD_BYTES: usize = 64;

fn multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

fn too_large(field: &str, limit: usize) -> Error {
    Error::invalid_request(format!("{field} exceeds the {limit} byte limit"))
        .with_details(json!({ "field": field, "limit": limit }))
}

async fn read_field(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
            return Err(too_large(name, limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Parse a placement number, truncating decimals toward zero.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_coordinate("x", "123.9")?, 123);
/// assert_eq!(parse_coordinate("x", "-4.5")?, -4);
/// ```
pub(crate) fn parse_coordinate(field: &str, raw: &str) -> Result<i32, Error> {
    let invalid = || {
        Error::invalid_request(format!("{field} must be a number"))
            .with_details(json!({ "field": field, "value": raw }))
    };
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return Ok(value);
    }
    let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    let truncated = value.trunc();
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return Err(Error::invalid_request(format!("{field} is out of range"))
            .with_details(json!({ "field": field, "value": raw })));
    }
    // Range checked above, so the cast cannot saturate.
    Ok(truncated as i32)
}

/// Text and file parts collected from the multipart stream.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub image: Option<(String, Vec<u8>)>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub size: Option<String>,
}

impl UploadForm {
    fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, Error> {
        value.as_deref().ok_or_else(|| {
            Error::invalid_request(format!("{field} is required"))
                .with_details(json!({ "field": field }))
        })
    }

    /// Validate the collected parts into a domain request.
    pub(crate) fn into_request(self) -> Result<UploadRegionRequest, Error> {
        let x = parse_coordinate("x", Self::required(&self.x, "x")?)?;
        let y = parse_coordinate("y", Self::required(&self.y, "y")?)?;
        let size = parse_coordinate("size", Self::required(&self.size, "size")?)?;
        let (original_name, bytes) = self.image.ok_or_else(|| {
            Error::invalid_request("image file is required")
                .with_details(json!({ "field": "image" }))
        })?;
        let placement = Placement::new(x, y, size).map_err(|err| match err {
            PlacementValidationError::SizeTooSmall { min, actual } => {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "size", "min": min, "actual": actual }))
            }
        })?;
        Ok(UploadRegionRequest {
            original_name,
            bytes,
            placement,
        })
    }
}

/// Drain the multipart stream into an [`UploadRegionRequest`].
pub(crate) async fn read_upload_form(
    mut payload: Multipart,
    max_image_bytes: usize,
) -> Result<UploadRegionRequest, Error> {
    let mut form = UploadForm::default();
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "image" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_owned();
                let bytes = read_field(&mut field, "image", max_image_bytes).await?;
                form.image = Some((filename, bytes));
            }
            "x" | "y" | "size" => {
                let bytes = read_field(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| Error::invalid_request(format!("{name} must be UTF-8 text")))?;
                match name.as_str() {
                    "x" => form.x = Some(text),
                    "y" => form.y = Some(text),
                    _ => form.size = Some(text),
                }
            }
            _ => {
                while field.try_next().await.map_err(multipart_error)?.is_some() {}
            }
        }
    }
    form.into_request()
}
