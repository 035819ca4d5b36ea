//! Create/edit form dialog for scaffolded entities
//!
//! Each field gets an input widget from its classification. Reference
//! fields whose target resolved become selects over the target's records
//! and store the full record URL; unresolved ones fall back to a text input.

use super::{js_str, jsx_attr, jsx_text, Doc, EntityView, SERVICE_MODULE, TYPES_MODULE};
use crate::classify::{classify, FieldKind};
use crate::error::Result;
use crate::graph::Reference;
use crate::locale::Texts;
use crate::metadata::FieldDescriptor;

/// Output path of an entity's dialog
pub fn dialog_path(type_name: &str) -> String {
    format!("src/components/dialogs/{type_name}Dialog.tsx")
}

/// Input widget chosen for one field
#[derive(Debug, Clone, Copy)]
enum Widget<'v> {
    Input { kind: &'static str },
    Number,
    Textarea,
    Checkbox,
    Date,
    DateTime,
    Choice,
    Lookup(&'v Reference),
    RecordUrl,
}

impl Widget<'_> {
    fn uses_input(&self) -> bool {
        matches!(
            self,
            Widget::Input { .. } | Widget::Number | Widget::Date | Widget::DateTime | Widget::RecordUrl
        )
    }
}

struct FormField<'v> {
    key: &'v str,
    field: &'v FieldDescriptor,
    kind: FieldKind,
    widget: Widget<'v>,
}

impl FormField<'_> {
    /// Native `required` attribute, set on plain text and date inputs only
    fn required_attr(&self) -> bool {
        self.field.required && matches!(self.kind, FieldKind::Text | FieldKind::Date)
    }
}

fn widget_for<'v>(view: &'v EntityView<'_>, key: &str, kind: FieldKind) -> Widget<'v> {
    match kind {
        FieldKind::Textarea => Widget::Textarea,
        FieldKind::Email => Widget::Input { kind: "email" },
        FieldKind::Number => Widget::Number,
        FieldKind::Boolean => Widget::Checkbox,
        FieldKind::Date => Widget::Date,
        FieldKind::DateTime => Widget::DateTime,
        FieldKind::Choice => Widget::Choice,
        FieldKind::Reference => view
            .reference_for(key)
            .map_or(Widget::RecordUrl, Widget::Lookup),
        FieldKind::Text | FieldKind::Fallback => Widget::Input { kind: "text" },
    }
}

/// `<Type>Dialog.tsx`
pub fn entity_dialog(view: &EntityView<'_>, texts: &Texts) -> Result<String> {
    let ty = view.names.type_name.as_str();
    let fields: Vec<FormField<'_>> = view
        .entity
        .controls
        .iter()
        .map(|(key, field)| {
            let kind = classify(&field.fulltype).input;
            FormField {
                key: key.as_str(),
                field,
                kind,
                widget: widget_for(view, key, kind),
            }
        })
        .collect();

    let has_lookups = fields.iter().any(|f| matches!(f.widget, Widget::Lookup(_)));
    let mut doc = Doc::new();

    // Imports
    doc.line("import { useState, useEffect } from 'react';");
    doc.line(format!(
        "import type {{ {} }} from '{TYPES_MODULE}';",
        view.type_imports().join(", ")
    ));
    if has_lookups {
        doc.line(format!("import {{ APP_IDS }} from '{TYPES_MODULE}';"));
        doc.line(format!(
            "import {{ extractRecordId, createRecordUrl }} from '{SERVICE_MODULE}';"
        ));
    }
    doc.line("import {");
    doc.line("  Dialog,");
    doc.line("  DialogContent,");
    doc.line("  DialogHeader,");
    doc.line("  DialogTitle,");
    doc.line("  DialogFooter,");
    doc.line("} from '@/components/ui/dialog';");
    doc.line("import { Button } from '@/components/ui/button';");
    if fields.iter().any(|f| f.widget.uses_input()) {
        doc.line("import { Input } from '@/components/ui/input';");
    }
    if !fields.is_empty() {
        doc.line("import { Label } from '@/components/ui/label';");
    }
    if fields.iter().any(|f| f.kind.needs_textarea()) {
        doc.line("import { Textarea } from '@/components/ui/textarea';");
    }
    if fields.iter().any(|f| f.kind.needs_checkbox()) {
        doc.line("import { Checkbox } from '@/components/ui/checkbox';");
    }
    if fields
        .iter()
        .any(|f| f.kind.needs_select() || matches!(f.widget, Widget::Lookup(_)))
    {
        doc.line("import {");
        doc.line("  Select,");
        doc.line("  SelectContent,");
        doc.line("  SelectItem,");
        doc.line("  SelectTrigger,");
        doc.line("  SelectValue,");
        doc.line("} from '@/components/ui/select';");
    }
    doc.blank();

    // Props
    doc.line(format!("interface {ty}DialogProps {{"));
    doc.line("  open: boolean;");
    doc.line("  onClose: () => void;");
    doc.line(format!("  onSubmit: (fields: {ty}['fields']) => Promise<void>;"));
    doc.line(format!("  defaultValues?: {ty}['fields'];"));
    for lookup in &view.lookups {
        let t = &lookup.target_names;
        doc.line(format!("  {}List: {}[];", t.var, t.type_name));
    }
    doc.line("}");
    doc.blank();

    let mut props = vec!["open", "onClose", "onSubmit", "defaultValues"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    props.extend(view.lookups.iter().map(|l| format!("{}List", l.target_names.var)));

    doc.line(format!(
        "export function {ty}Dialog({{ {} }}: {ty}DialogProps) {{",
        props.join(", ")
    ));
    doc.line(format!(
        "  const [fields, setFields] = useState<Partial<{ty}['fields']>>({{}});"
    ));
    doc.line("  const [saving, setSaving] = useState(false);");
    doc.blank();
    doc.line("  useEffect(() => {");
    doc.line("    if (open) setFields(defaultValues ?? {});");
    doc.line("  }, [open, defaultValues]);");
    doc.blank();
    doc.line("  async function handleSubmit(e: React.FormEvent) {");
    doc.line("    e.preventDefault();");
    doc.line("    setSaving(true);");
    doc.line("    try {");
    doc.line(format!("      await onSubmit(fields as {ty}['fields']);"));
    doc.line("    } finally {");
    doc.line("      setSaving(false);");
    doc.line("    }");
    doc.line("  }");
    doc.blank();

    let entity_arg = [("entity", view.label)];
    let edit_title = texts.text("edit_entity", &entity_arg)?;
    let new_title = texts.text("new_entity", &entity_arg)?;

    doc.line("  return (");
    doc.line("    <Dialog open={open} onOpenChange={v => !v && onClose()}>");
    doc.line("      <DialogContent className=\"max-w-lg max-h-[90vh] overflow-y-auto\">");
    doc.line("        <DialogHeader>");
    doc.line(format!(
        "          <DialogTitle>{{defaultValues ? '{}' : '{}'}}</DialogTitle>",
        js_str(&edit_title),
        js_str(&new_title)
    ));
    doc.line("        </DialogHeader>");
    doc.line("        <form onSubmit={handleSubmit} className=\"space-y-4\">");
    for field in &fields {
        form_field(&mut doc, field, texts)?;
    }
    doc.line("          <DialogFooter>");
    doc.line(format!(
        "            <Button type=\"button\" variant=\"outline\" onClick={{onClose}}>{}</Button>",
        jsx_text(&texts.phrase("cancel")?)
    ));
    doc.line("            <Button type=\"submit\" disabled={saving}>");
    doc.line(format!(
        "              {{saving ? '{}' : defaultValues ? '{}' : '{}'}}",
        js_str(&texts.phrase("saving")?),
        js_str(&texts.phrase("save")?),
        js_str(&texts.phrase("create")?)
    ));
    doc.line("            </Button>");
    doc.line("          </DialogFooter>");
    doc.line("        </form>");
    doc.line("      </DialogContent>");
    doc.line("    </Dialog>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}

// =============================================================================
// Form Fields
// =============================================================================

const INDENT: &str = "              ";

fn form_field(doc: &mut Doc, form: &FormField<'_>, texts: &Texts) -> Result<()> {
    let key = form.key;
    let label = jsx_text(form.field.label_or(key));
    let marker = if form.field.required { " *" } else { "" };
    let required = form.required_attr();
    let setter = |value: &str| format!("setFields(f => ({{ ...f, {key}: {value} }}))");

    doc.line("          <div className=\"space-y-2\">");

    if let Widget::Checkbox = form.widget {
        doc.line("            <div className=\"flex items-center gap-2\">");
        doc.line("              <Checkbox");
        doc.line(format!("                id=\"{key}\""));
        doc.line(format!("                checked={{!!fields.{key}}}"));
        doc.line(format!("                onCheckedChange={{v => {}}}", setter("!!v")));
        doc.line("              />");
        doc.line(format!("              <Label htmlFor=\"{key}\">{label}{marker}</Label>"));
        doc.line("            </div>");
        doc.line("          </div>");
        return Ok(());
    }

    doc.line(format!("            <Label htmlFor=\"{key}\">{label}{marker}</Label>"));

    let text_change = format!("onChange={{e => {}}}", setter("e.target.value"));
    match form.widget {
        Widget::Input { kind } => input(doc, key, kind, &format!("value={{fields.{key} ?? ''}}"), &text_change, required, None),
        Widget::Number => input(
            doc,
            key,
            "number",
            &format!("value={{fields.{key} ?? ''}}"),
            &format!(
                "onChange={{e => {}}}",
                setter("e.target.value ? Number(e.target.value) : undefined")
            ),
            false,
            None,
        ),
        Widget::Date => input(doc, key, "date", &format!("value={{fields.{key} ?? ''}}"), &text_change, required, None),
        Widget::DateTime => {
            doc.line("            <Input");
            doc.line(format!("              id=\"{key}\""));
            doc.line("              type=\"datetime-local\"");
            doc.line("              step=\"60\"");
            doc.line(format!("              value={{fields.{key} ?? ''}}"));
            doc.line(format!("              {text_change}"));
            doc.line("            />");
        }
        Widget::RecordUrl => {
            let placeholder = texts.phrase("record_url")?;
            input(
                doc,
                key,
                "text",
                &format!("value={{fields.{key} ?? ''}}"),
                &text_change,
                false,
                Some(&placeholder),
            )
        }
        Widget::Textarea => {
            doc.line("            <Textarea");
            doc.line(format!("              id=\"{key}\""));
            doc.line("              rows={3}");
            doc.line(format!("              value={{fields.{key} ?? ''}}"));
            doc.line(format!("              {text_change}"));
            doc.line("            />");
        }
        Widget::Choice => {
            let options: Vec<(&str, String)> = form.field.choices().collect();
            let cast = if options.is_empty() {
                String::new()
            } else {
                let union = options
                    .iter()
                    .map(|(value, _)| format!("'{}'", js_str(value)))
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!(" as {union}")
            };
            doc.line("            <Select");
            doc.line(format!("              value={{fields.{key} ?? 'none'}}"));
            doc.line(format!(
                "              onValueChange={{v => {}}}",
                setter(&format!("v === 'none' ? undefined : v{cast}"))
            ));
            doc.line("            >");
            select_trigger(doc, key, texts)?;
            doc.line("              <SelectContent>");
            doc.line("                <SelectItem value=\"none\">—</SelectItem>");
            for (value, text) in &options {
                doc.line(format!(
                    "                <SelectItem value=\"{}\">{}</SelectItem>",
                    jsx_attr(value),
                    jsx_text(text)
                ));
            }
            doc.line("              </SelectContent>");
            doc.line("            </Select>");
        }
        Widget::Lookup(reference) => {
            let t = &reference.target_names;
            doc.line("            <Select");
            doc.line(format!(
                "              value={{extractRecordId(fields.{key}) ?? 'none'}}"
            ));
            doc.line(format!(
                "              onValueChange={{v => {}}}",
                setter(&format!(
                    "v === 'none' ? undefined : createRecordUrl(APP_IDS.{}, v)",
                    t.constant
                ))
            ));
            doc.line("            >");
            select_trigger(doc, key, texts)?;
            doc.line("              <SelectContent>");
            doc.line("                <SelectItem value=\"none\">—</SelectItem>");
            doc.line(format!("                {{{}List.map(r => (", t.var));
            doc.line("                  <SelectItem key={r.record_id} value={r.record_id}>");
            doc.line(format!(
                "                    {{r.fields.{} ?? r.record_id}}",
                reference.display_field
            ));
            doc.line("                  </SelectItem>");
            doc.line("                ))}");
            doc.line("              </SelectContent>");
            doc.line("            </Select>");
        }
        Widget::Checkbox => {}
    }

    doc.line("          </div>");
    Ok(())
}

fn input(
    doc: &mut Doc,
    key: &str,
    kind: &str,
    value: &str,
    on_change: &str,
    required: bool,
    placeholder: Option<&str>,
) {
    doc.line("            <Input");
    doc.indented(
        INDENT,
        [format!("id=\"{key}\""), format!("type=\"{kind}\""), value.to_string()],
    );
    if let Some(placeholder) = placeholder {
        doc.line(format!("{INDENT}placeholder=\"{}\"", jsx_attr(placeholder)));
    }
    doc.line(format!("{INDENT}{on_change}"));
    if required {
        doc.line(format!("{INDENT}required"));
    }
    doc.line("            />");
}

fn select_trigger(doc: &mut Doc, key: &str, texts: &Texts) -> Result<()> {
    doc.line(format!("              <SelectTrigger id=\"{key}\">"));
    doc.line(format!(
        "                <SelectValue placeholder=\"{}\" />",
        jsx_attr(&texts.phrase("select_placeholder")?)
    ));
    doc.line("              </SelectTrigger>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{references_of, unique_referenced_entities, AppIndex};
    use crate::locale::Locale;
    use crate::metadata::AppMetadata;
    use crate::names::EntityNames;

    const META: &str = r#"{"apps": {
        "kunden": {"app_id": "K", "name": "Kunden", "controls": {
            "name": {"fulltype": "string/text", "label": "Name", "in_list": true}
        }},
        "buchungen": {"app_id": "B", "name": "Buchungen", "controls": {
            "titel": {"fulltype": "string/text", "label": "Titel", "required": true},
            "notiz": {"fulltype": "string/textarea", "label": "Notiz"},
            "anzahl": {"fulltype": "number", "label": "Anzahl"},
            "bezahlt": {"fulltype": "bool", "label": "Bezahlt"},
            "beginn": {"fulltype": "date/datetimeminute", "label": "Beginn"},
            "status": {"fulltype": "lookup/select", "label": "Status",
                       "lookup_data": {"offen": "Offen", "fertig": "Fertig"}},
            "kunde": {"fulltype": "applookup/select", "label": "Kunde", "lookup_app": "https://x/apps/K"},
            "extern": {"fulltype": "applookup/select", "label": "Extern", "lookup_app": "https://x/apps/ZZ"}
        }},
        "termine": {"app_id": "T", "name": "Termine", "controls": {
            "bestaetigt": {"fulltype": "bool", "label": "Bestätigt", "required": true},
            "art": {"fulltype": "lookup/select", "label": "Art", "required": true,
                    "lookup_data": {"kurs": "Kurs"}},
            "kunde": {"fulltype": "applookup/select", "label": "Kunde", "required": true,
                      "lookup_app": "https://x/apps/K"},
            "datum": {"fulltype": "date/date", "label": "Datum", "required": true},
            "mail": {"fulltype": "string/email", "label": "Mail", "required": true},
            "plaetze": {"fulltype": "number", "label": "Plätze", "required": true},
            "beschreibung": {"fulltype": "string/textarea", "label": "Beschreibung", "required": true},
            "ende": {"fulltype": "date/datetimeminute", "label": "Ende", "required": true}
        }}
    }}"#;

    fn render(identifier: &str) -> String {
        let meta = AppMetadata::from_json_str(META).unwrap();
        let index = AppIndex::build(&meta);
        let names = EntityNames::of(identifier);
        let entity = meta.get(identifier).unwrap();
        let references = references_of(&meta, &index, identifier);
        let view = EntityView {
            names: &names,
            entity,
            label: entity.name.as_deref().unwrap(),
            lookups: unique_referenced_entities(&references),
            references,
        };
        entity_dialog(&view, &Texts::new(Locale::De)).unwrap()
    }

    #[test]
    fn test_widgets_by_kind() {
        let dialog = render("buchungen");
        assert!(dialog.contains("<Label htmlFor=\"titel\">Titel *</Label>"));
        assert!(dialog.contains("rows={3}"));
        assert!(dialog.contains("Number(e.target.value)"));
        assert!(dialog.contains("<Label htmlFor=\"bezahlt\">Bezahlt</Label>"));
        assert!(dialog.contains("type=\"datetime-local\""));
        assert!(dialog.contains("v === 'none' ? undefined : v as 'offen' | 'fertig'"));
        assert!(dialog.contains("<SelectItem value=\"fertig\">Fertig</SelectItem>"));
    }

    #[test]
    fn test_references_resolved_and_unresolved() {
        let dialog = render("buchungen");
        assert!(dialog.contains("createRecordUrl(APP_IDS.KUNDEN, v)"));
        assert!(dialog.contains("{kundenList.map(r => ("));
        assert!(dialog.contains("{r.fields.name ?? r.record_id}"));
        assert!(dialog.contains("kundenList: Kunden[];"));
        assert!(dialog.contains("placeholder=\"Datensatz-URL\""));
    }

    #[test]
    fn test_submit_labels_and_imports() {
        let dialog = render("kunden");
        assert!(dialog.contains("{saving ? 'Speichern...' : defaultValues ? 'Speichern' : 'Erstellen'}"));
        assert!(dialog.contains("{defaultValues ? 'Kunden bearbeiten' : 'Kunden hinzufügen'}"));
        assert!(!dialog.contains("@/components/ui/select"));
        assert!(!dialog.contains("@/components/ui/checkbox"));
        assert!(!dialog.contains("createRecordUrl"));
    }

    #[test]
    fn test_required_marker_on_every_widget() {
        let dialog = render("termine");
        for label in [
            "<Label htmlFor=\"bestaetigt\">Bestätigt *</Label>",
            "<Label htmlFor=\"art\">Art *</Label>",
            "<Label htmlFor=\"kunde\">Kunde *</Label>",
            "<Label htmlFor=\"datum\">Datum *</Label>",
            "<Label htmlFor=\"mail\">Mail *</Label>",
            "<Label htmlFor=\"plaetze\">Plätze *</Label>",
            "<Label htmlFor=\"beschreibung\">Beschreibung *</Label>",
            "<Label htmlFor=\"ende\">Ende *</Label>",
        ] {
            assert!(dialog.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_required_attribute_only_on_text_and_date() {
        // the only native `required` in this dialog belongs to the date input
        let dialog = render("termine");
        assert_eq!(dialog.matches("              required\n").count(), 1);
        let date = dialog.find("type=\"date\"").unwrap();
        let required = dialog.find("              required\n").unwrap();
        let end = dialog[date..].find("/>").unwrap() + date;
        assert!(date < required && required < end);

        // titel is the single required text input of the booking dialog
        let dialog = render("buchungen");
        assert_eq!(dialog.matches("              required\n").count(), 1);
        assert!(!render("kunden").contains("required"));
    }

    #[test]
    fn test_component_imports_follow_field_kinds() {
        let dialog = render("termine");
        assert!(dialog.contains("import { Textarea } from '@/components/ui/textarea';"));
        assert!(dialog.contains("import { Checkbox } from '@/components/ui/checkbox';"));
        assert!(dialog.contains("} from '@/components/ui/select';"));
        assert!(dialog.contains("createRecordUrl(APP_IDS.KUNDEN, v)"));
    }
}
