//! Batch merge endpoint: upload reception, pipeline invocation and
//! archive streaming.
//!
//! Cleanup is a single guard that tracks every temporary file the
//! request creates. On validation or processing errors the guard drops
//! when the handler returns; on success it rides inside the streaming
//! body, so a completed transfer and a mid-stream client disconnect
//! both trigger the same removal.

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::stream;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use fusor_core::metrics::BATCHES_TOTAL;
use fusor_core::{ArchiveEntry, ArchiveJob, CleanupGuard, UploadedFile};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// POST /api/v1/merge/batch
///
/// Accepts multipart file fields `orders` and `invoices`, merges each
/// sorted pair and streams back a zip of the merged documents.
pub async fn merge_batch(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let mut cleanup = CleanupGuard::new();
    let run_id = state.batcher().begin_run();

    let (orders, invoices) = match receive_uploads(&state, &run_id, multipart, &mut cleanup).await {
        Ok(fields) => fields,
        Err(response) => {
            BATCHES_TOTAL
                .with_label_values(&["validation_failed"])
                .inc();
            return response;
        }
    };

    info!(
        run_id,
        orders = orders.len(),
        invoices = invoices.len(),
        "Batch merge requested"
    );

    let artifacts = match state
        .batcher()
        .merge_batch(&run_id, orders, invoices, &mut cleanup)
        .await
    {
        Ok(artifacts) => artifacts,
        Err(e) if e.is_validation() => {
            BATCHES_TOTAL
                .with_label_values(&["validation_failed"])
                .inc();
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: e.to_string(),
                    detail: e.detail(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            warn!(run_id, error = %e, "Batch merge failed");
            BATCHES_TOTAL.with_label_values(&["failed"]).inc();
            return processing_error(e.to_string());
        }
    };

    let zip_name = format!("merge_batch_{run_id}.zip");
    let zip_path = state.workdir().join(&zip_name);
    cleanup.track(zip_path.clone());

    let job = ArchiveJob {
        entries: artifacts
            .iter()
            .map(|a| ArchiveEntry {
                source: a.path.clone(),
                name: a.archive_name.clone(),
            })
            .collect(),
        destination: zip_path.clone(),
    };

    if let Err(e) = state.archiver().archive(job).await {
        warn!(run_id, error = %e, "Archive packaging failed");
        BATCHES_TOTAL.with_label_values(&["failed"]).inc();
        return processing_error(e.to_string());
    }

    match stream_archive(&zip_name, &zip_path, cleanup).await {
        Ok(response) => {
            info!(run_id, pairs = artifacts.len(), "Batch merge completed");
            BATCHES_TOTAL.with_label_values(&["success"]).inc();
            response
        }
        Err(detail) => {
            BATCHES_TOTAL.with_label_values(&["failed"]).inc();
            processing_error(detail)
        }
    }
}

/// Upload reception: persists every `orders`/`invoices` part under a
/// run-scoped temporary name and records the client filename.
async fn receive_uploads(
    state: &AppState,
    run_id: &str,
    mut multipart: Multipart,
    cleanup: &mut CleanupGuard,
) -> Result<(Vec<UploadedFile>, Vec<UploadedFile>), Response> {
    let max_files = state.config().limits.max_files_per_field;
    let mut orders: Vec<UploadedFile> = Vec::new();
    let mut invoices: Vec<UploadedFile> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(upload_error(format!("Carga multipart inválida: {e}"))),
        };

        let (bucket, tag) = match field.name() {
            Some("orders") => (&mut orders, "ord"),
            Some("invoices") => (&mut invoices, "fac"),
            _ => continue,
        };

        if bucket.len() >= max_files {
            return Err(upload_error(format!(
                "Demasiados archivos adjuntos (máximo {max_files} por campo)"
            )));
        }

        let original_name = field.file_name().map(|s| s.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Err(upload_error(format!(
                    "No se pudo leer el archivo adjunto: {e}"
                )))
            }
        };

        let path = state
            .workdir()
            .join(format!("{}_up_{}_{}.pdf", run_id, tag, bucket.len() + 1));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            return Err(processing_error(e.to_string()));
        }
        cleanup.track(path.clone());
        bucket.push(UploadedFile::new(path, original_name));
    }

    Ok((orders, invoices))
}

/// State carried through the response stream; dropping it (completed
/// transfer or client disconnect) fires the cleanup guard.
struct ArchiveStream {
    file: File,
    _cleanup: CleanupGuard,
}

async fn stream_archive(
    zip_name: &str,
    zip_path: &Path,
    cleanup: CleanupGuard,
) -> Result<Response, String> {
    let file = File::open(zip_path).await.map_err(|e| e.to_string())?;

    let stream = stream::unfold(
        ArchiveStream {
            file,
            _cleanup: cleanup,
        },
        |mut state| async move {
            let mut buf = vec![0u8; 64 * 1024];
            match state.file.read(&mut buf).await {
                Ok(0) => None,
                Ok(n) => {
                    buf.truncate(n);
                    Some((Ok::<Bytes, std::io::Error>(Bytes::from(buf)), state))
                }
                Err(e) => Some((Err(e), state)),
            }
        },
    );

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{zip_name}\""),
        ),
    ];
    Ok((headers, Body::from_stream(stream)).into_response())
}

fn upload_error(detail: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "Carga de archivos inválida".to_string(),
            detail: Some(detail),
        }),
    )
        .into_response()
}

fn processing_error(detail: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "No se pudo completar la fusión por lotes".to_string(),
            detail: Some(detail),
        }),
    )
        .into_response()
}
