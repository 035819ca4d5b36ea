//! Identifier Normalization
//!
//! Turns raw schema keys into the naming forms shared by every generated
//! file:
//! - type name (`kurs_termine` -> `KursTermine`), also the file-name stem
//! - singular form, used by the data-access facade (`createKursTermineEntry`)
//! - constant name, the key into the external `APP_IDS` registry
//! - route segment (`kurs-termine`)
//!
//! Every form is a pure function of the identifier string. Documents import
//! each other by these derived names, so the rules here must not drift: the
//! singular heuristic in particular is naive on purpose and must stay naive.

use serde::Serialize;

/// Suffix appended by [`singular_name`] when the type name does not end in `s`
pub const SINGULAR_SUFFIX: &str = "Entry";

/// Diacritics with their ASCII digraph spelling
///
/// Lower case only. Upper-case umlauts are word separators like any other
/// non-ASCII character, so `Ärzte` becomes `Rzte`; the sibling type
/// generator names things the same way.
const TRANSLITERATIONS: &[(char, &str)] = &[('ä', "ae"), ('ö', "oe"), ('ü', "ue"), ('ß', "ss")];

// =============================================================================
// Naming forms
// =============================================================================

/// All derived names for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNames {
    pub identifier: String,
    pub type_name: String,
    pub singular: String,
    pub constant: String,
    pub route: String,
    /// Identifier as used in generated variable names (`kurseList`)
    pub var: String,
}

impl EntityNames {
    pub fn of(identifier: &str) -> Self {
        let type_name = type_name(identifier);
        let singular = singular_name(&type_name);
        Self {
            identifier: identifier.to_string(),
            singular,
            constant: const_name(identifier),
            route: route_segment(identifier),
            var: var_name(identifier),
            type_name,
        }
    }
}

/// PascalCase type name
///
/// Lower-case umlauts and `ß` become digraphs, every run of characters outside
/// `[A-Za-z0-9]` separates words, and each word is capitalized.
pub fn type_name(identifier: &str) -> String {
    let ascii = transliterate(identifier);
    ascii
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Strip a trailing `s`, otherwise append [`SINGULAR_SUFFIX`]
///
/// Not real singularization: `Status` becomes `Statu`, `Person` becomes
/// `PersonEntry`. Generated files only need the result to be consistent.
pub fn singular_name(type_name: &str) -> String {
    match type_name.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => format!("{type_name}{SINGULAR_SUFFIX}"),
    }
}

/// SCREAMING_SNAKE constant name
pub fn const_name(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len());
    for c in identifier.chars().filter(|&c| c != '&') {
        if c.is_alphanumeric() {
            result.extend(c.to_uppercase());
        } else if !result.ends_with('_') {
            result.push('_');
        }
    }
    result
}

/// URL path segment for the router
pub fn route_segment(identifier: &str) -> String {
    identifier.replace('_', "-")
}

/// Variable-name stem; reverting a route segment's hyphens yields this form
pub fn var_name(identifier: &str) -> String {
    identifier.replace('-', "_")
}

// =============================================================================
// Helpers
// =============================================================================

fn transliterate(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match TRANSLITERATIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => result.push_str(to),
            None => result.push(c),
        }
    }
    result
}

/// First letter upper, rest lower
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut result = first.to_ascii_uppercase().to_string();
            for c in chars {
                result.push(c.to_ascii_lowercase());
            }
            result
        }
    }
}
