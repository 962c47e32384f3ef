//! Text extraction endpoints
//!
//! Documents arrive as multipart/form-data. The single-file endpoint
//! expects a `file` field; the batch endpoint accepts any number of file
//! fields and reports per-file outcomes.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::models::{
    BatchExtractionResponse, BatchFailure, BatchOutcome, ExtractionResponse, FileInfo,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::secure_filename;
use crate::AppState;

/// Extract text from a single uploaded document
///
/// Expects multipart/form-data with a `file` field containing the
/// document. Returns the extracted text and file metadata.
pub async fn extract_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractionResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (raw_filename, data) = upload.ok_or(AppError::MissingFile)?;
    if raw_filename.is_empty() {
        return Err(AppError::MissingFilename);
    }

    let filename = secure_filename(&raw_filename);
    if filename.is_empty() {
        return Err(AppError::MissingFilename);
    }

    let format = state.extractor.resolve_format(&filename)?;
    let file_info = FileInfo::new(data.len() as u64, Some(format));

    info!(
        filename = %filename,
        size_mb = file_info.size_mb,
        "processing uploaded file"
    );

    let extraction = state.extractor.extract(&filename, format, data).await?;

    Ok(Json(ExtractionResponse::new(
        filename,
        extraction.text,
        file_info,
    )))
}

/// Extract text from several uploaded documents
///
/// Every file field is processed independently; a failing file becomes a
/// per-file error entry instead of failing the whole request.
pub async fn extract_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<BatchExtractionResponse>> {
    let max_files = state.extractor.max_batch_files();
    let mut outcomes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        let Some(raw_filename) = field.file_name().map(str::to_string) else {
            // Not a file field
            continue;
        };

        if outcomes.len() >= max_files {
            return Err(AppError::BadRequest(format!(
                "Too many files: maximum {} per batch request",
                max_files
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?
            .to_vec();

        outcomes.push(extract_one(&state, &raw_filename, data).await);
    }

    if outcomes.is_empty() {
        return Err(AppError::MissingFile);
    }

    Ok(Json(BatchExtractionResponse::new(outcomes)))
}

/// Run one batch entry, folding any error into a per-file failure
async fn extract_one(state: &AppState, raw_filename: &str, data: Vec<u8>) -> BatchOutcome {
    let filename = secure_filename(raw_filename);
    if filename.is_empty() {
        return BatchOutcome::Failure(BatchFailure::new(
            raw_filename.to_string(),
            AppError::MissingFilename.error_type(),
            AppError::MissingFilename.to_string(),
        ));
    }

    let format = match state.extractor.resolve_format(&filename) {
        Ok(format) => format,
        Err(e) => {
            return BatchOutcome::Failure(BatchFailure::new(
                filename,
                e.error_type(),
                e.to_string(),
            ))
        }
    };

    let file_info = FileInfo::new(data.len() as u64, Some(format));
    match state.extractor.extract(&filename, format, data).await {
        Ok(extraction) => {
            BatchOutcome::Success(ExtractionResponse::new(filename, extraction.text, file_info))
        }
        Err(e) => BatchOutcome::Failure(BatchFailure::new(filename, e.error_type(), e.to_string())),
    }
}

/// Map a multipart error, substituting the configured size limit
fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    match AppError::from(err) {
        AppError::PayloadTooLarge { .. } => AppError::PayloadTooLarge {
            limit_mb: state.extractor.max_file_size_mb(),
        },
        other => other,
    }
}
