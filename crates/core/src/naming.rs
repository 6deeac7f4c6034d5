//! Collision-free archive entry names for one batch run.

use std::collections::HashSet;

/// Allocates unique archive entry names within a single batch run.
///
/// Names are derived from the order file's original filename, falling
/// back to `orden_<n>.pdf` when the client did not supply one. Path
/// separators are replaced so an entry name can never escape the
/// archive root or create directories. Allocation is deterministic:
/// the same inputs against the same prior allocations always produce
/// the same name.
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a unique entry name for the pair at `index`.
    pub fn allocate(&mut self, original: Option<&str>, index: usize) -> String {
        let trimmed = original.map(str::trim).unwrap_or("");
        let base = if trimmed.is_empty() {
            format!("orden_{}.pdf", index + 1)
        } else {
            trimmed.to_string()
        };

        let with_ext = if base.to_lowercase().ends_with(".pdf") {
            base
        } else {
            format!("{base}.pdf")
        };

        let sanitized: String = with_ext
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();

        let name = if self.used.contains(&sanitized) {
            let (stem, ext) = split_extension(&sanitized);
            let mut suffix = 1;
            loop {
                let candidate = format!("{stem}_{suffix}{ext}");
                if !self.used.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        } else {
            sanitized
        };

        self.used.insert(name.clone());
        name
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => (&name[..dot], &name[dot..]),
        None => (name, ""),
    }
}
