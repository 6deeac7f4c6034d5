//! Common test utilities for in-process server testing.
//!
//! Builds the full router with a temp working directory and a
//! deterministic run id provider, so responses and on-disk state can
//! be asserted without a running process.

// Compiled once per test binary; not every binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use fusor_core::testing::SequentialRunIdProvider;
use fusor_core::{BatchMerger, Config, ZipArchiver};
use fusor_server::api::create_router;
use fusor_server::state::AppState;

pub struct TestFixture {
    pub router: Router,
    /// Owns the on-disk state for the fixture's lifetime.
    #[allow(dead_code)]
    pub temp_dir: TempDir,
    pub workdir: PathBuf,
}

/// Response from a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

impl TestFixture {
    /// Create a new test fixture with an isolated working directory.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workdir = temp_dir.path().join("work");
        std::fs::create_dir_all(&workdir).expect("Failed to create workdir");

        let mut config = Config::default();
        config.storage.workdir = workdir.clone();

        let batcher = BatchMerger::new(
            workdir.clone(),
            Arc::new(SequentialRunIdProvider::new("testrun")),
        );

        let state = Arc::new(AppState::new(config, batcher, Arc::new(ZipArchiver::new())));
        let router = create_router(state);

        Self {
            router,
            temp_dir,
            workdir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with a multipart form body.
    pub async fn post_multipart(&self, path: &str, form: MultipartForm) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", form.content_type())
            .body(Body::from(form.finish()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            bytes,
        }
    }

    /// Files currently present in the working directory.
    pub fn workdir_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.workdir)
            .expect("Failed to read workdir")
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

const BOUNDARY: &str = "fusor-test-boundary";

/// Hand-rolled multipart/form-data body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(mut self, field: &str, filename: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
