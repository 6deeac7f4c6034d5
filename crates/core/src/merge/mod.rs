//! Pair merging: one purchase order plus one invoice into a single PDF.
//!
//! The merged document carries every page of the order, in the order's
//! page order, followed by every page of the invoice. Inputs are treated
//! as opaque page sequences; nothing below the page level is interpreted.

mod error;

pub use error::{DocumentRole, MergeError};

use lopdf::{Document, Object, ObjectId};

/// Merges (order, invoice) byte pairs into single PDF documents.
///
/// Zero-page inputs are rejected: a pageless order or invoice is always
/// an upstream mistake, and refusing it keeps the batch all-or-nothing
/// contract simple.
#[derive(Debug, Default)]
pub struct PairMerger;

impl PairMerger {
    pub fn new() -> Self {
        Self
    }

    /// Produces the merged document as a byte buffer.
    ///
    /// Either the complete merged document is returned or an error is
    /// raised; no partial output exists in any failure case.
    pub fn merge(&self, order: &[u8], invoice: &[u8]) -> Result<Vec<u8>, MergeError> {
        let mut merged = load_document(order, DocumentRole::Order)?;
        let invoice_doc = load_document(invoice, DocumentRole::Invoice)?;

        append_pages(&mut merged, invoice_doc)?;

        merged.prune_objects();
        merged.renumber_objects();

        let mut bytes = Vec::new();
        merged
            .save_to(&mut bytes)
            .map_err(|e| MergeError::Serialize {
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}

fn load_document(bytes: &[u8], role: DocumentRole) -> Result<Document, MergeError> {
    let doc = Document::load_mem(bytes).map_err(|e| MergeError::parse(role, e.to_string()))?;
    if doc.get_pages().is_empty() {
        return Err(MergeError::EmptyDocument { role });
    }
    Ok(doc)
}

/// Splices every page of `doc` onto the end of `merged`.
fn append_pages(merged: &mut Document, mut doc: Document) -> Result<(), MergeError> {
    // Renumber to avoid object ID conflicts before the trees are joined.
    doc.renumber_objects_with(merged.max_id + 1);
    merged.max_id = doc.max_id;

    // get_pages is keyed by page number, so values iterate in page order.
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    merged.objects.extend(doc.objects);

    add_pages_to_tree(merged, &page_ids)
}

fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<(), MergeError> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| MergeError::assemble(format!("Failed to get catalog: {}", e)))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| MergeError::assemble(format!("Failed to get pages reference: {}", e)))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| MergeError::assemble(format!("Failed to get pages object: {}", e)))?;

    if let Object::Dictionary(dict) = pages_dict {
        let kids = dict
            .get_mut(b"Kids")
            .map_err(|_| MergeError::assemble("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            for &page_id in page_ids {
                kids_array.push(Object::Reference(page_id));
            }
        } else {
            return Err(MergeError::assemble("Kids is not an array"));
        }

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));
    } else {
        return Err(MergeError::assemble("Pages object is not a dictionary"));
    }

    // Reparent the spliced pages so viewers can walk back up the tree.
    for &page_id in page_ids {
        if let Ok(Object::Dictionary(page)) = merged.get_object_mut(page_id) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}
