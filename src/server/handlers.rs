//! HTTP request handlers
//!
//! Thin glue between the HTTP surface and the storage engine: multipart
//! parsing, path parameter extraction, separator translation, and response
//! formatting. All invariants live in the storage layer.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use std::sync::Arc;

use crate::error::ApiError;
use crate::storage::StorageEngine;

/// Separator token accepted in upload target paths and directory creation,
/// e.g. `2025_Janvier_Factures` names the nested path `2025/Janvier/Factures`.
const SEPARATOR_TOKEN: char = '_';

fn translate_separators(path: &str) -> String {
    path.replace(SEPARATOR_TOKEN, "/")
}

/// Upload a file from a multipart form.
///
/// Expects a `file` field carrying the filename and content, and an optional
/// `targetPath` field naming the destination directory with `_` separators.
pub async fn upload_file(
    State(storage): State<Arc<StorageEngine>>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    let mut target_path = String::new();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        ApiError::BadRequest("File field is missing a filename".into())
                    })?;
                let content = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read file content: {}", e))
                })?;
                upload = Some((filename, content));
            }
            Some("targetPath") => {
                target_path = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read target path: {}", e))
                })?;
            }
            _ => {}
        }
    }

    let (filename, content) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing file field".into()))?;

    let relative = if target_path.is_empty() {
        filename
    } else {
        format!("{}/{}", translate_separators(&target_path), filename)
    };

    storage.store_file(&relative, &content).await?;
    Ok(format!("File uploaded successfully: {}", relative))
}

/// List every stored file and directory, relative to the storage root.
pub async fn list_files(
    State(storage): State<Arc<StorageEngine>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let entries = storage.list_files().await?;
    let listing = entries
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    Ok(Json(listing))
}

/// Download a file's raw content. The wildcard path uses real `/` separators.
pub async fn download_file(
    State(storage): State<Arc<StorageEngine>>,
    Path(path): Path<String>,
) -> Result<Vec<u8>, ApiError> {
    Ok(storage.read_file(&path).await?)
}

/// Delete a file. Idempotent: deleting a missing file succeeds.
pub async fn delete_file(
    State(storage): State<Arc<StorageEngine>>,
    Path(path): Path<String>,
) -> Result<String, ApiError> {
    storage.delete_file(&path).await?;
    Ok(format!("File deleted successfully: {}", path))
}

/// Create a directory chain. The path parameter uses `_` separators.
pub async fn create_directory(
    State(storage): State<Arc<StorageEngine>>,
    Path(path): Path<String>,
) -> Result<String, ApiError> {
    let relative = translate_separators(&path);
    storage.create_directory(&relative).await?;
    Ok(format!("Directory created successfully: {}", relative))
}

/// Delete a directory and everything beneath it.
pub async fn delete_directory(
    State(storage): State<Arc<StorageEngine>>,
    Path(path): Path<String>,
) -> Result<String, ApiError> {
    storage.delete_directory(&path).await?;
    Ok(format!("Directory deleted successfully: {}", path))
}
