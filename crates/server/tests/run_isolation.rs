//! Tests for run id namespacing across requests.
//!
//! Two requests against the same working directory must never touch
//! each other's temporary files, sequentially or concurrently.

mod common;

use axum::http::{header, StatusCode};

use common::{MultipartForm, TestFixture};
use fusor_core::testing::fixtures;

fn pair_form() -> MultipartForm {
    MultipartForm::new()
        .add_file("orders", "orden1.pdf", &fixtures::pdf_with_pages(1))
        .add_file("invoices", "factura1.pdf", &fixtures::pdf_with_pages(2))
}

#[tokio::test]
async fn test_sequential_requests_get_distinct_run_ids() {
    let fixture = TestFixture::new().await;

    let first = fixture.post_multipart("/api/v1/merge/batch", pair_form()).await;
    let second = fixture.post_multipart("/api/v1/merge/batch", pair_form()).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        first.headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"merge_batch_testrun-1.zip\""
    );
    assert_eq!(
        second.headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"merge_batch_testrun-2.zip\""
    );

    assert!(fixture.workdir_entries().is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_share_workdir_safely() {
    let fixture = TestFixture::new().await;

    let (a, b) = tokio::join!(
        fixture.post_multipart("/api/v1/merge/batch", pair_form()),
        fixture.post_multipart("/api/v1/merge/batch", pair_form()),
    );

    assert_eq!(a.status, StatusCode::OK);
    assert_eq!(b.status, StatusCode::OK);
    assert!(!a.bytes.is_empty());
    assert!(!b.bytes.is_empty());

    // Both runs finished and removed their own files.
    assert!(fixture.workdir_entries().is_empty());
}

#[tokio::test]
async fn test_failed_request_does_not_disturb_succeeding_one() {
    let fixture = TestFixture::new().await;

    let bad_form = MultipartForm::new()
        .add_file("orders", "orden1.pdf", &fixtures::corrupt_pdf())
        .add_file("invoices", "factura1.pdf", &fixtures::pdf_with_pages(1));

    let (good, bad) = tokio::join!(
        fixture.post_multipart("/api/v1/merge/batch", pair_form()),
        fixture.post_multipart("/api/v1/merge/batch", bad_form),
    );

    assert_eq!(good.status, StatusCode::OK);
    assert_eq!(bad.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(fixture.workdir_entries().is_empty());
}
