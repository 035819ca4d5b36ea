//! Field Classification
//!
//! Maps each field's `fulltype` tag to a rendering strategy, chosen
//! independently for the form input and the table cell. Classification is
//! total: unknown tags land on [`FieldKind::Fallback`].
//!
//! The only stateful step is [`plan_cells`], which marks the first plain
//! text or email cell of an entity as the row's emphasized label.

use indexmap::IndexMap;
use serde::Serialize;

use crate::metadata::{EntityMetadata, FieldDescriptor};

/// Record-identity field every record carries
pub const RECORD_ID_FIELD: &str = "record_id";

/// Keys that usually hold a record's name, in priority order
const NAME_LIKE_KEYS: &[&str] = &["name", "title", "bezeichnung", "label", "titel", "description"];

// =============================================================================
// Field Kind
// =============================================================================

/// Closed set of rendering strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `string/text`
    Text,
    /// `string/textarea`
    Textarea,
    /// `string/email`
    Email,
    /// `number`
    Number,
    /// `bool`
    Boolean,
    /// `date/date`
    Date,
    /// `date/datetimeminute`
    DateTime,
    /// `lookup/select` with fixed options
    Choice,
    /// `applookup/*`, a record of another entity
    Reference,
    /// Anything else, rendered as plain text
    Fallback,
}

impl FieldKind {
    /// Kind for an exactly known tag
    fn from_exact(fulltype: &str) -> Option<Self> {
        match fulltype {
            "string/text" => Some(Self::Text),
            "string/textarea" => Some(Self::Textarea),
            "string/email" => Some(Self::Email),
            "number" => Some(Self::Number),
            "bool" => Some(Self::Boolean),
            "date/date" => Some(Self::Date),
            "date/datetimeminute" => Some(Self::DateTime),
            "lookup/select" => Some(Self::Choice),
            _ => None,
        }
    }

    /// Candidate for the emphasized first cell
    pub fn is_primary_text(&self) -> bool {
        matches!(self, Self::Text | Self::Email)
    }

    // Component imports decided by kind

    pub fn needs_textarea(&self) -> bool {
        matches!(self, Self::Textarea)
    }

    pub fn needs_checkbox(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    /// Fixed-option select. A reference needs one only once its target resolved.
    pub fn needs_select(&self) -> bool {
        matches!(self, Self::Choice)
    }

    /// Table cell rendered as a badge
    pub fn needs_badge(&self) -> bool {
        matches!(self, Self::Choice)
    }
}

/// Chosen strategy for both rendering axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderStrategy {
    pub input: FieldKind,
    pub cell: FieldKind,
}

/// Classify a `fulltype` tag. Never fails.
pub fn classify(fulltype: &str) -> RenderStrategy {
    if let Some(kind) = FieldKind::from_exact(fulltype) {
        return RenderStrategy { input: kind, cell: kind };
    }

    if is_reference_type(fulltype) {
        return RenderStrategy {
            input: FieldKind::Reference,
            cell: FieldKind::Reference,
        };
    }

    // Unknown date variants still display as dates in tables
    let cell = if mentions_date(fulltype) {
        FieldKind::Date
    } else {
        FieldKind::Fallback
    };

    RenderStrategy {
        input: FieldKind::Fallback,
        cell,
    }
}

/// Does this tag reference another entity
pub fn is_reference_type(fulltype: &str) -> bool {
    fulltype.contains("applookup")
}

fn mentions_date(fulltype: &str) -> bool {
    fulltype.contains("date")
}

// =============================================================================
// Cell Planning
// =============================================================================

/// One table column of an entity page
#[derive(Debug, Clone)]
pub struct CellPlan<'a> {
    pub key: &'a str,
    pub field: &'a FieldDescriptor,
    pub strategy: RenderStrategy,
    /// Row's label column
    pub emphasized: bool,
}

/// Classify every field in display order, emphasizing the first text cell
pub fn plan_cells(controls: &IndexMap<String, FieldDescriptor>) -> Vec<CellPlan<'_>> {
    let mut seen_text = false;
    controls
        .iter()
        .map(|(key, field)| {
            let strategy = classify(&field.fulltype);
            let emphasized = !seen_text && strategy.cell.is_primary_text();
            if strategy.cell.is_primary_text() {
                seen_text = true;
            }
            CellPlan {
                key: key.as_str(),
                field,
                strategy,
                emphasized,
            }
        })
        .collect()
}

// =============================================================================
// Entity Predicates
// =============================================================================

/// Any field whose type mentions a date
pub fn has_date_field(entity: &EntityMetadata) -> bool {
    entity.controls.values().any(|c| mentions_date(&c.fulltype))
}

/// Field to show for a record of this entity in selects and lookups
///
/// Priority: first `string/text` field flagged `in_list`, a name-like key,
/// the first text-ish field, the first field, then [`RECORD_ID_FIELD`].
pub fn display_field(entity: &EntityMetadata) -> &str {
    let controls = &entity.controls;

    if let Some((key, _)) = controls
        .iter()
        .find(|(_, c)| c.fulltype == "string/text" && c.in_list)
    {
        return key;
    }

    if let Some(key) = NAME_LIKE_KEYS.iter().find(|k| controls.contains_key(**k)) {
        return key;
    }

    if let Some((key, _)) = controls.iter().find(|(_, c)| c.fulltype.contains("string")) {
        return key;
    }

    controls
        .keys()
        .next()
        .map(String::as_str)
        .unwrap_or(RECORD_ID_FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(fields: &[(&str, &str, bool)]) -> EntityMetadata {
        let mut e = EntityMetadata::default();
        for (key, fulltype, in_list) in fields {
            e.controls.insert(
                key.to_string(),
                FieldDescriptor {
                    fulltype: fulltype.to_string(),
                    in_list: *in_list,
                    ..Default::default()
                },
            );
        }
        e
    }

    #[test]
    fn test_known_types() {
        assert_eq!(classify("string/text").input, FieldKind::Text);
        assert_eq!(classify("string/textarea").input, FieldKind::Textarea);
        assert_eq!(classify("string/email").cell, FieldKind::Email);
        assert_eq!(classify("number").input, FieldKind::Number);
        assert_eq!(classify("bool").input, FieldKind::Boolean);
        assert_eq!(classify("date/date").input, FieldKind::Date);
        assert_eq!(classify("date/datetimeminute").input, FieldKind::DateTime);
        assert_eq!(classify("lookup/select").input, FieldKind::Choice);
        assert_eq!(classify("applookup/select").input, FieldKind::Reference);
        assert_eq!(classify("multipleapplookup/choice").cell, FieldKind::Reference);
    }

    #[test]
    fn test_component_needs() {
        assert!(classify("string/textarea").input.needs_textarea());
        assert!(classify("bool").input.needs_checkbox());
        assert!(classify("lookup/select").input.needs_select());
        assert!(classify("lookup/select").cell.needs_badge());
        assert!(!classify("applookup/select").input.needs_select());
        assert!(!classify("applookup/select").cell.needs_badge());
        for fulltype in ["string/text", "number", "date/date", "geo"] {
            let s = classify(fulltype);
            assert!(!s.input.needs_textarea(), "{fulltype}");
            assert!(!s.input.needs_checkbox(), "{fulltype}");
            assert!(!s.input.needs_select(), "{fulltype}");
            assert!(!s.cell.needs_badge(), "{fulltype}");
        }
    }

    #[test]
    fn test_unknown_types_fall_back() {
        for fulltype in ["", "geo", "string/url", "STRING/TEXT", "🙂", "lookup/radio"] {
            let s = classify(fulltype);
            assert_eq!(s.input, FieldKind::Fallback, "{fulltype}");
            assert_eq!(s.cell, FieldKind::Fallback, "{fulltype}");
        }
    }

    #[test]
    fn test_unknown_date_variant_cell() {
        let s = classify("date/datetimesecond");
        assert_eq!(s.input, FieldKind::Fallback);
        assert_eq!(s.cell, FieldKind::Date);
    }

    #[test]
    fn test_first_text_emphasis() {
        let e = entity(&[
            ("active", "bool", false),
            ("name", "string/text", false),
            ("email", "string/email", false),
            ("other", "string/text", false),
        ]);
        let cells = plan_cells(&e.controls);
        let emphasized: Vec<_> = cells.iter().filter(|c| c.emphasized).map(|c| c.key).collect();
        assert_eq!(emphasized, vec!["name"]);
        assert_eq!(
            cells.iter().map(|c| c.key).collect::<Vec<_>>(),
            vec!["active", "name", "email", "other"]
        );
    }

    #[test]
    fn test_email_can_be_first_text() {
        let e = entity(&[("mail", "string/email", false), ("name", "string/text", false)]);
        let cells = plan_cells(&e.controls);
        assert!(cells[0].emphasized);
        assert!(!cells[1].emphasized);
    }

    #[test]
    fn test_display_field_priority() {
        let e = entity(&[
            ("title", "string/text", false),
            ("code", "string/text", true),
        ]);
        assert_eq!(display_field(&e), "code");

        let e = entity(&[("notes", "string/textarea", false), ("titel", "number", false)]);
        assert_eq!(display_field(&e), "titel");

        let e = entity(&[("count", "number", false), ("notes", "string/textarea", false)]);
        assert_eq!(display_field(&e), "notes");

        let e = entity(&[("count", "number", false), ("when", "date/date", false)]);
        assert_eq!(display_field(&e), "count");

        assert_eq!(display_field(&EntityMetadata::default()), RECORD_ID_FIELD);
    }

    #[test]
    fn test_has_date_field() {
        assert!(has_date_field(&entity(&[("d", "date/datetimeminute", false)])));
        assert!(!has_date_field(&entity(&[("n", "number", false)])));
    }
}
