//! Stand-in page for entities outside the scaffold list

use super::{comment, jsx_text, Doc};
use crate::error::Result;
use crate::locale::Texts;
use crate::names::EntityNames;

/// Minimal `<Type>Page.tsx` marking where a custom view belongs
pub fn placeholder_page(names: &EntityNames, label: &str, texts: &Texts) -> Result<String> {
    let noun = texts.locale().inline_noun(label);
    let args = [("entity", noun.as_str())];
    let body = texts.text("placeholder_body", &args)?;
    let hint = texts.text("placeholder_hint", &args)?;

    let mut doc = Doc::new();
    doc.line(format!("// {}", comment(&body)));
    doc.line(format!("// Entity: {}", names.identifier));
    doc.blank();
    doc.line(format!("export default function {}Page() {{", names.type_name));
    doc.line("  return (");
    doc.line("    <div className=\"space-y-6\">");
    doc.line(format!(
        "      <h1 className=\"text-2xl font-bold tracking-tight\">{}</h1>",
        jsx_text(label)
    ));
    doc.line(format!(
        "      <p className=\"text-muted-foreground\">{}</p>",
        jsx_text(&hint)
    ));
    doc.line("    </div>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_placeholder_localized_noun() {
        let names = EntityNames::of("raeume");
        let en = placeholder_page(&names, "Rooms", &Texts::new(Locale::En)).unwrap();
        assert!(en.contains("export default function RaeumePage()"));
        assert!(en.contains(">Rooms</h1>"));
        assert!(en.contains("Build your custom rooms view here."));
        assert!(!en.contains("LivingAppsService"));

        let de = placeholder_page(&names, "Räume", &Texts::new(Locale::De)).unwrap();
        assert!(de.contains("Hier entsteht eine eigene Ansicht für Räume."));
    }
}
