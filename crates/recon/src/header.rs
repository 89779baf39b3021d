//! Header resolution: map a ledger's raw column names onto canonical fields.
//!
//! Resolution runs in two passes per field. The exact pass compares
//! normalized headers for equality, trying aliases in priority order. Only
//! when no alias matches exactly does the fuzzy pass run, accepting
//! containment in either direction. An exact hit on the last alias therefore
//! beats a fuzzy hit on the first.

use crate::config::AliasDictionary;
use crate::model::{CanonicalField, ColumnMapping};

/// Strip all whitespace, fold full-width ASCII to half-width, lower-case.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_width)
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_width(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

/// Resolve one canonical field against the raw headers.
pub fn resolve_header<'a>(columns: &'a [String], aliases: &[String]) -> Option<&'a str> {
    let normalized: Vec<(&str, String)> = columns
        .iter()
        .map(|c| (c.as_str(), normalize_header(c)))
        .collect();
    let targets: Vec<String> = aliases.iter().map(|a| normalize_header(a)).collect();

    for target in &targets {
        if let Some((raw, _)) = normalized.iter().find(|(_, n)| n == target) {
            return Some(raw);
        }
    }

    for target in targets.iter().filter(|t| !t.is_empty()) {
        let hit = normalized.iter().find(|(_, n)| {
            !n.is_empty() && (n.contains(target.as_str()) || target.contains(n.as_str()))
        });
        if let Some((raw, _)) = hit {
            return Some(raw);
        }
    }

    None
}

/// Resolve every canonical field for one ledger.
pub fn resolve_columns(columns: &[String], dictionary: &AliasDictionary) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for field in CanonicalField::ALL {
        let resolved = resolve_header(columns, dictionary.aliases(field)).map(str::to_string);
        mapping.set(field, resolved);
    }
    mapping
}
