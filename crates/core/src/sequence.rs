//! Filename sequence keys and pair ordering.
//!
//! Uploaded orders and invoices are paired positionally after both
//! collections are sorted by the numeric sequence embedded in their
//! filenames ("orden_3.pdf", "factura 12,5.pdf"). Files without a
//! recognizable sequence sort after keyed files, ordered by a
//! numeric-segment-aware comparison of the full filename.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::cmp::Ordering;

static SEQUENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Extracts the first numeric run from a filename as a sortable key.
///
/// A single decimal separator is accepted in either `.` or `,` form
/// (comma is normalized before parsing). Returns `None` when the name
/// contains no digits or the run does not parse to a finite number.
pub fn extract_sequence(name: &str) -> Option<f64> {
    let found = SEQUENCE_RE.find(name)?;
    let normalized = found.as_str().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compares two filenames by their sequence keys.
///
/// Keyed files order by ascending key and sort before unkeyed files.
/// When neither file has a key, or both keys are equal, the filenames
/// fall back to a case-insensitive comparison that orders embedded
/// digit runs numerically ("orden2" before "orden10").
pub fn compare_by_sequence(a: &str, b: &str) -> Ordering {
    match (extract_sequence(a), extract_sequence(b)) {
        (Some(x), Some(y)) if x != y => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => natural_compare(a, b),
    }
}

/// Sorts a slice by the sequence key of the name yielded by `name_of`.
///
/// The sort is stable: entries that compare equal keep their input order.
pub fn sort_by_sequence<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_by_sequence(name_of(a), name_of(b)));
}

/// Case-insensitive comparison with numeric-aware digit runs.
fn natural_compare(a: &str, b: &str) -> Ordering {
    let mut chars_a = a.chars().peekable();
    let mut chars_b = b.chars().peekable();

    loop {
        match (chars_a.peek().copied(), chars_b.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut chars_a);
                    let run_b = take_digit_run(&mut chars_b);
                    let ord = compare_digit_runs(&run_a, &run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = x.to_lowercase().cmp(y.to_lowercase());
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    chars_a.next();
                    chars_b.next();
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Compares two digit runs by numeric value without overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let trimmed_a = a.trim_start_matches('0');
    let trimmed_b = b.trim_start_matches('0');
    trimmed_a
        .len()
        .cmp(&trimmed_b.len())
        .then_with(|| trimmed_a.cmp(trimmed_b))
}
