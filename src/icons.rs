//! Icon selection for entities
//!
//! Best-effort keyword match from an entity identifier to a lucide icon.
//! The table is scanned in order and the first hit wins, so overlapping
//! keywords (`raum` inside `zeitraum`, `ort` inside `sport`) resolve the same
//! way on every run. Keep the order when adding entries.

/// Icon used when no keyword matches
pub const DEFAULT_ICON: &str = "FileText";

/// Ordered (keyword, icon) pairs. Earlier entries win.
pub const ICON_TABLE: &[(&str, &str)] = &[
    // People
    ("user", "Users"),
    ("member", "Users"),
    ("employee", "Users"),
    ("team", "Users"),
    ("person", "Users"),
    ("customer", "Users"),
    ("client", "Users"),
    ("contact", "Users"),
    ("staff", "Users"),
    ("participant", "Users"),
    ("teilnehmer", "Users"),
    ("mitarbeiter", "Users"),
    ("kunde", "Users"),
    ("personal", "Users"),
    // Education
    ("instructor", "GraduationCap"),
    ("teacher", "GraduationCap"),
    ("dozent", "GraduationCap"),
    ("trainer", "GraduationCap"),
    ("course", "BookOpen"),
    ("class", "BookOpen"),
    ("lesson", "BookOpen"),
    ("kurs", "BookOpen"),
    ("schulung", "BookOpen"),
    // Places
    ("room", "DoorOpen"),
    ("raum", "DoorOpen"),
    ("location", "MapPin"),
    ("standort", "MapPin"),
    ("ort", "MapPin"),
    ("building", "Building2"),
    ("gebaeude", "Building2"),
    // Work
    ("project", "FolderKanban"),
    ("projekt", "FolderKanban"),
    ("task", "CheckSquare"),
    ("aufgabe", "CheckSquare"),
    ("shift", "Clock"),
    ("schicht", "Clock"),
    ("schedule", "CalendarDays"),
    ("termin", "CalendarDays"),
    ("event", "Calendar"),
    ("veranstaltung", "Calendar"),
    // Commerce
    ("product", "Package"),
    ("produkt", "Package"),
    ("item", "Package"),
    ("artikel", "Package"),
    ("inventory", "Boxes"),
    ("lager", "Boxes"),
    ("bestand", "Boxes"),
    ("order", "ShoppingCart"),
    ("bestellung", "ShoppingCart"),
    ("invoice", "Receipt"),
    ("rechnung", "Receipt"),
    // Organization
    ("category", "Tag"),
    ("kategorie", "Tag"),
    ("label", "Tags"),
    ("tag", "Tags"),
    ("type", "Tag"),
    ("typ", "Tag"),
    ("department", "Building"),
    ("abteilung", "Building"),
    // Equipment / Vehicles
    ("vehicle", "Car"),
    ("fahrzeug", "Car"),
    ("equipment", "Wrench"),
    ("geraet", "Wrench"),
    // Registration / Booking
    ("registration", "ClipboardList"),
    ("anmeldung", "ClipboardList"),
    ("booking", "CalendarCheck"),
    ("buchung", "CalendarCheck"),
];

/// Icon for an entity identifier. Never fails.
///
/// Each entry is tried as a plain substring of the lower-cased identifier,
/// then with both sides normalized (umlauts and `ae`/`oe`/`ue` collapsed to the
/// base vowel), before moving to the next entry.
pub fn category_of(identifier: &str) -> &'static str {
    let lower = identifier.to_lowercase();
    let normalized = normalize(&lower);

    for (keyword, icon) in ICON_TABLE {
        if lower.contains(keyword) || normalized.contains(&normalize(keyword)) {
            return icon;
        }
    }
    DEFAULT_ICON
}

fn normalize(text: &str) -> String {
    text.replace('ä', "a")
        .replace('ö', "o")
        .replace('ü', "u")
        .replace('ß', "ss")
        .replace("ae", "a")
        .replace("oe", "o")
        .replace("ue", "u")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_match() {
        assert_eq!(category_of("customers"), "Users");
        assert_eq!(category_of("kurse"), "BookOpen");
        assert_eq!(category_of("Dozenten"), "GraduationCap");
        assert_eq!(category_of("anmeldungen"), "ClipboardList");
    }

    #[test]
    fn test_normalized_match() {
        assert_eq!(category_of("räume"), "DoorOpen");
        assert_eq!(category_of("gebäude"), "Building2");
        assert_eq!(category_of("geräte"), "Wrench");
    }

    #[test]
    fn test_first_entry_wins() {
        // "kunde" (Users) comes before "termin" (CalendarDays)
        assert_eq!(category_of("kundentermine"), "Users");
        // "raum" (DoorOpen) comes before "ort" (MapPin)
        assert_eq!(category_of("raumort"), "DoorOpen");
        // "user" hides "order"
        assert_eq!(category_of("user_orders"), "Users");
    }

    #[test]
    fn test_default_icon() {
        assert_eq!(category_of("xyz"), DEFAULT_ICON);
        assert_eq!(category_of(""), DEFAULT_ICON);
    }

    #[test]
    fn test_table_contains_no_duplicate_keywords() {
        let mut seen = std::collections::HashSet::new();
        for (keyword, _) in ICON_TABLE {
            assert!(seen.insert(keyword), "duplicate keyword {keyword}");
        }
    }
}
