//! Document Assembly
//!
//! Turns the derived model (names, locale, classification, references,
//! icons) into the text of each generated TSX document.
//!
//! Emitters never read raw metadata for naming or typing decisions; they get
//! an [`EntityView`] or [`EntitySummary`] prepared by the generator and a
//! [`Texts`](crate::locale::Texts) table for every UI string. Output is a
//! pure function of those inputs.

pub mod dialog;
pub mod overview;
pub mod page;
pub mod placeholder;
pub mod primitives;
pub mod shell;

use crate::graph::Reference;
use crate::metadata::EntityMetadata;
use crate::names::EntityNames;

/// Import path of the data-access facade
pub const SERVICE_MODULE: &str = "@/services/livingAppsService";
/// Import path of the generated entity types and `APP_IDS`
pub const TYPES_MODULE: &str = "@/types/app";
/// Name of the data-access facade
pub const SERVICE: &str = "LivingAppsService";

// =============================================================================
// Views
// =============================================================================

/// Everything the page and dialog emitters need for one entity
#[derive(Debug, Clone)]
pub struct EntityView<'a> {
    pub names: &'a EntityNames,
    pub entity: &'a EntityMetadata,
    /// Display label
    pub label: &'a str,
    /// Resolved reference fields, display order
    pub references: Vec<Reference>,
    /// One reference per target entity, first occurrence order
    pub lookups: Vec<Reference>,
}

impl EntityView<'_> {
    /// Resolved reference for a field, if it has one
    pub fn reference_for(&self, field_key: &str) -> Option<&Reference> {
        self.references.iter().find(|r| r.field_key == field_key)
    }

    /// Entity type plus every lookup target's type, deduplicated
    pub fn type_imports(&self) -> Vec<&str> {
        let mut imports = vec![self.names.type_name.as_str()];
        for lookup in &self.lookups {
            let name = lookup.target_names.type_name.as_str();
            if !imports.contains(&name) {
                imports.push(name);
            }
        }
        imports
    }
}

/// Per-entity data for the shell, navigation, and overview documents
#[derive(Debug, Clone)]
pub struct EntitySummary<'a> {
    pub names: &'a EntityNames,
    pub label: &'a str,
    pub icon: &'static str,
}

// =============================================================================
// Document Builder
// =============================================================================

/// Line-oriented text buffer
#[derive(Debug, Default)]
pub struct Doc {
    out: String,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Append lines with a fixed indent
    pub fn indented<I, S>(&mut self, indent: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.out.push_str(indent);
            self.line(line);
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

// =============================================================================
// Escaping
// =============================================================================

/// Content for a single-quoted TS string literal
pub fn js_str(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Content for a backtick template literal
pub fn js_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Content for a double-quoted JSX attribute
pub fn jsx_attr(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

/// JSX text child
pub fn jsx_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Text for a `//` comment line
pub fn comment(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        assert_eq!(js_str("Kunde's"), "Kunde\\'s");
        assert_eq!(js_str("a\\b"), "a\\\\b");
        assert_eq!(js_template("`${x}`"), "\\`\\${x}\\`");
        assert_eq!(jsx_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(jsx_attr("R&D \"x\""), "R&amp;D &quot;x&quot;");
        assert_eq!(jsx_text("<a>{b}"), "&lt;a&gt;&#123;b&#125;");
        assert_eq!(jsx_text("A&B"), "A&amp;B");
        assert_eq!(jsx_text("A&amp;B"), "A&amp;amp;B");
        assert_eq!(jsx_text("x < y & {z}"), "x &lt; y &amp; &#123;z&#125;");
        assert_eq!(comment("a\nb"), "a b");
    }

    #[test]
    fn test_doc_lines() {
        let mut doc = Doc::new();
        doc.line("a");
        doc.blank();
        doc.indented("  ", ["b", "c"]);
        assert_eq!(doc.finish(), "a\n\n  b\n  c\n");
    }
}
