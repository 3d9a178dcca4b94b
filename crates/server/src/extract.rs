//! Multipart form handling for upload endpoints. Everything is drained
//! into memory first; uploads are images and small documents, not streams.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::JsonApiError;

pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, JsonApiError> {
        let mut out = FormData::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| JsonApiError::bad_request(format!("malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(|f| f.to_string()) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| JsonApiError::bad_request(format!("cannot read upload: {e}")))?;
                    out.files.push(UploadedFile { field: name, file_name, bytes: bytes.to_vec() });
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| JsonApiError::bad_request(format!("cannot read field: {e}")))?;
                    out.fields.insert(name, text);
                }
            }
        }
        Ok(out)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    pub fn require(&self, name: &str) -> Result<&str, JsonApiError> {
        self.text(name)
            .ok_or_else(|| JsonApiError::bad_request(format!("missing field: {name}")))
    }

    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }

    pub fn require_file(&self, field: &str) -> Result<&UploadedFile, JsonApiError> {
        self.file(field)
            .ok_or_else(|| JsonApiError::bad_request(format!("missing file: {field}")))
    }

    pub fn uuid(&self, name: &str) -> Result<Option<Uuid>, JsonApiError> {
        match self.text(name) {
            None | Some("") => Ok(None),
            Some(v) => Uuid::parse_str(v)
                .map(Some)
                .map_err(|_| JsonApiError::bad_request(format!("invalid uuid in {name}"))),
        }
    }

    pub fn f64(&self, name: &str) -> Result<Option<f64>, JsonApiError> {
        match self.text(name) {
            None | Some("") => Ok(None),
            Some(v) => v
                .parse::<f64>()
                .map(Some)
                .map_err(|_| JsonApiError::bad_request(format!("invalid number in {name}"))),
        }
    }

    pub fn bool(&self, name: &str) -> Result<Option<bool>, JsonApiError> {
        match self.text(name) {
            None | Some("") => Ok(None),
            Some("true") | Some("1") | Some("on") => Ok(Some(true)),
            Some("false") | Some("0") | Some("off") => Ok(Some(false)),
            Some(v) => Err(JsonApiError::bad_request(format!("invalid boolean in {name}: {v}"))),
        }
    }

    /// ISO `YYYY-MM-DD`.
    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, JsonApiError> {
        match self.text(name) {
            None | Some("") => Ok(None),
            Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| JsonApiError::bad_request(format!("invalid date in {name} (want YYYY-MM-DD)"))),
        }
    }
}
