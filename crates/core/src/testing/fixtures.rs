//! Programmatically generated PDF fixtures.
//!
//! Building fixtures with lopdf keeps the repository free of binary
//! test files and guarantees the bytes are loadable by the same
//! library the merger uses.

use lopdf::{dictionary, Document, Object, Stream};

/// A minimal valid PDF with `count` empty pages.
pub fn pdf_with_pages(count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(count);
    for _ in 0..count {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .expect("fixture PDF should serialize");
    bytes
}

/// A structurally valid PDF whose page tree is empty.
pub fn zero_page_pdf() -> Vec<u8> {
    pdf_with_pages(0)
}

/// Bytes that no PDF parser will accept.
pub fn corrupt_pdf() -> Vec<u8> {
    b"this is not a pdf document".to_vec()
}
