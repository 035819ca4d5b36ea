//! UI language detection and localized phrases
//!
//! The language is picked once per run from the union of all entity names
//! and field labels, then every literal UI string in every document comes
//! from the same [`Texts`] table.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// Characters that only show up in German text
const GERMAN_CHARS: &[char] = &['ä', 'ö', 'ü', 'ß'];

/// Common German words in entity names and labels
const GERMAN_STOP_WORDS: &[&str] = &[
    "und", "der", "die", "das", "für", "mit", "von", "zur", "zum",
    "aus", "bei", "ein", "eine", "name", "datum", "preis", "nummer",
    "telefon", "adresse", "strasse", "stadt", "raum", "gebaeude",
    "beschreibung", "bezeichnung", "bemerkung", "anmerkung",
];

/// Stop-word hits needed (without umlauts) to switch to German
const STOP_WORD_THRESHOLD: usize = 2;

static WORD_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

// =============================================================================
// Locale
// =============================================================================

/// UI display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Primary locale and the fallback table for every lookup
    #[default]
    En,
    De,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    /// `date-fns/locale` export to pass to `format`, if any
    pub fn date_fns_locale(&self) -> Option<&'static str> {
        match self {
            Locale::En => None,
            Locale::De => Some("de"),
        }
    }

    /// Form of an entity label used mid-sentence
    ///
    /// English lower-cases it; German nouns keep their capital.
    pub fn inline_noun(&self, label: &str) -> String {
        match self {
            Locale::En => label.to_lowercase(),
            Locale::De => label.to_string(),
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::De => DE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Configured locale choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSetting {
    /// Detect from the metadata's display text
    #[default]
    Auto,
    En,
    De,
}

impl LocaleSetting {
    pub fn resolve<'a>(self, texts: impl IntoIterator<Item = &'a str>) -> Locale {
        match self {
            LocaleSetting::Auto => detect(texts),
            LocaleSetting::En => Locale::En,
            LocaleSetting::De => Locale::De,
        }
    }
}

/// Pick the UI language for a set of display texts
///
/// German umlauts or `ß` anywhere win immediately. Otherwise the text is
/// split into words and German is chosen when at least two distinct German
/// stop words appear. The result depends only on the multiset of texts, not
/// on their order.
pub fn detect<'a>(texts: impl IntoIterator<Item = &'a str>) -> Locale {
    let joined = texts.into_iter().collect::<Vec<_>>().join(" ").to_lowercase();

    if joined.contains(GERMAN_CHARS) {
        return Locale::De;
    }

    let words: HashSet<&str> = WORD_SPLIT.split(&joined).collect();
    let hits = GERMAN_STOP_WORDS.iter().filter(|w| words.contains(*w)).count();
    if hits >= STOP_WORD_THRESHOLD {
        Locale::De
    } else {
        Locale::En
    }
}

// =============================================================================
// Phrase lookup
// =============================================================================

/// Localized phrase table for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texts {
    locale: Locale,
}

impl Texts {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Phrase without placeholders
    pub fn phrase(&self, key: &str) -> Result<String> {
        self.text(key, &[])
    }

    /// Look up `key` and substitute `{name}` placeholders
    ///
    /// Falls back to the English table, then to `key` itself. Every
    /// placeholder in the phrase must be supplied in `args`.
    pub fn text(&self, key: &str, args: &[(&str, &str)]) -> Result<String> {
        let template = lookup(self.locale.table(), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key);

        for caps in PLACEHOLDER.captures_iter(template) {
            let name = &caps[1];
            if !args.iter().any(|(arg, _)| *arg == name) {
                return Err(GenerateError::MissingPlaceholder {
                    key: key.to_string(),
                    placeholder: name.to_string(),
                });
            }
        }

        let mut result = template.to_string();
        for (name, value) in args {
            result = result.replace(&format!("{{{name}}}"), value);
        }
        Ok(result)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const DE: &[(&str, &str)] = &[
    ("overview", "Übersicht"),
    ("navigation", "Navigation"),
    ("cancel", "Abbrechen"),
    ("delete", "Löschen"),
    ("save", "Speichern"),
    ("saving", "Speichern..."),
    ("create", "Erstellen"),
    ("search", "Suchen..."),
    ("actions", "Aktionen"),
    ("no_results", "Keine Ergebnisse gefunden."),
    ("no_data_yet", "Noch keine {entity}. Jetzt hinzufügen!"),
    ("select_placeholder", "Auswählen..."),
    (
        "confirm_delete_desc",
        "Soll dieser Eintrag wirklich gelöscht werden? Diese Aktion kann nicht rückgängig gemacht werden.",
    ),
    ("add", "Hinzufügen"),
    ("edit_entity", "{entity} bearbeiten"),
    ("new_entity", "{entity} hinzufügen"),
    ("delete_entity", "{entity} löschen"),
    ("yes", "Ja"),
    ("no", "Nein"),
    ("search_entity", "{entity} suchen..."),
    ("in_system", "{entity} im System"),
    ("welcome", "Willkommen"),
    ("overview_subtitle", "Hier ist eine Übersicht Ihrer Daten."),
    ("management", "Verwaltung"),
    ("dashboard", "Dashboard"),
    ("date_format", "dd.MM.yyyy"),
    ("record_url", "Datensatz-URL"),
    ("placeholder_hint", "Hier entsteht eine eigene Ansicht für {entity}."),
    ("placeholder_body", "Platzhalter: eigene Ansicht für {entity}"),
];

const EN: &[(&str, &str)] = &[
    ("overview", "Overview"),
    ("navigation", "Navigation"),
    ("cancel", "Cancel"),
    ("delete", "Delete"),
    ("save", "Save"),
    ("saving", "Saving..."),
    ("create", "Create"),
    ("search", "Search..."),
    ("actions", "Actions"),
    ("no_results", "No results found."),
    ("no_data_yet", "No {entity} yet. Add one!"),
    ("select_placeholder", "Select..."),
    ("confirm_delete_desc", "Are you sure? This action cannot be undone."),
    ("add", "Add"),
    ("edit_entity", "Edit {entity}"),
    ("new_entity", "New {entity}"),
    ("delete_entity", "Delete {entity}"),
    ("yes", "Yes"),
    ("no", "No"),
    ("search_entity", "Search {entity}..."),
    ("in_system", "{entity} in the system"),
    ("welcome", "Welcome back"),
    ("overview_subtitle", "Here's an overview of your data."),
    ("management", "Management"),
    ("dashboard", "Dashboard"),
    ("date_format", "MMM d, yyyy"),
    ("record_url", "Record URL"),
    ("placeholder_hint", "Build your custom {entity} view here."),
    ("placeholder_body", "Custom UI placeholder: build your {entity} view here"),
];
