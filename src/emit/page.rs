//! List page for scaffolded entities
//!
//! Search, table, create, edit, and delete for one entity. The page loads
//! its own records and every lookup target's records in a single
//! `Promise.all` batch and stays in the loading state until all of them
//! have settled, so no row renders against partially loaded lookups.

use super::{js_str, js_template, jsx_attr, jsx_text, Doc, EntityView, SERVICE, SERVICE_MODULE, TYPES_MODULE};
use crate::classify::{plan_cells, CellPlan, FieldKind};
use crate::error::Result;
use crate::locale::Texts;

/// Output path of an entity's page
pub fn page_path(type_name: &str) -> String {
    format!("src/pages/{type_name}Page.tsx")
}

/// `<Type>Page.tsx`
pub fn entity_page(view: &EntityView<'_>, texts: &Texts) -> Result<String> {
    let ty = view.names.type_name.as_str();
    let singular = view.names.singular.as_str();
    let label = view.label;
    let cells = plan_cells(&view.entity.controls);

    let has_badge = cells.iter().any(|c| c.strategy.cell.needs_badge());
    let has_dates = crate::classify::has_date_field(view.entity);
    let column_count = cells.len() + 1;

    let mut doc = Doc::new();

    // Imports
    doc.line("import { useState, useEffect } from 'react';");
    if view.lookups.is_empty() {
        doc.line(format!("import {{ {SERVICE} }} from '{SERVICE_MODULE}';"));
    } else {
        doc.line(format!("import {{ {SERVICE}, extractRecordId }} from '{SERVICE_MODULE}';"));
    }
    doc.line(format!(
        "import type {{ {} }} from '{TYPES_MODULE}';",
        view.type_imports().join(", ")
    ));
    doc.line("import { Button } from '@/components/ui/button';");
    doc.line("import { Input } from '@/components/ui/input';");
    doc.line("import {");
    doc.line("  Table, TableBody, TableCell, TableHead,");
    doc.line("  TableHeader, TableRow,");
    doc.line("} from '@/components/ui/table';");
    if has_badge {
        doc.line("import { Badge } from '@/components/ui/badge';");
    }
    doc.line("import { Pencil, Trash2, Plus, Search } from 'lucide-react';");
    doc.line(format!("import {{ {ty}Dialog }} from '@/components/dialogs/{ty}Dialog';"));
    doc.line("import { ConfirmDialog } from '@/components/ConfirmDialog';");
    doc.line("import { PageShell } from '@/components/PageShell';");
    if has_dates {
        doc.line("import { format, parseISO } from 'date-fns';");
        if let Some(locale) = texts.locale().date_fns_locale() {
            doc.line(format!("import {{ {locale} }} from 'date-fns/locale';"));
        }
    }
    doc.blank();

    if has_dates {
        emit_date_helper(&mut doc, texts)?;
    }

    // State
    doc.line(format!("export default function {ty}Page() {{"));
    doc.line(format!("  const [records, setRecords] = useState<{ty}[]>([]);"));
    doc.line("  const [loading, setLoading] = useState(true);");
    doc.line("  const [search, setSearch] = useState('');");
    doc.line("  const [dialogOpen, setDialogOpen] = useState(false);");
    doc.line(format!("  const [editingRecord, setEditingRecord] = useState<{ty} | null>(null);"));
    doc.line(format!("  const [deleteTarget, setDeleteTarget] = useState<{ty} | null>(null);"));
    for lookup in &view.lookups {
        let t = &lookup.target_names;
        doc.line(format!(
            "  const [{}List, set{}List] = useState<{}[]>([]);",
            t.var, t.type_name, t.type_name
        ));
    }
    doc.blank();
    doc.line("  useEffect(() => { loadData(); }, []);");
    doc.blank();

    emit_load_data(&mut doc, view);
    emit_handlers(&mut doc, ty, singular);
    emit_display_helpers(&mut doc, view);

    // Search filter
    doc.line("  const filtered = records.filter(r => {");
    doc.line("    if (!search) return true;");
    doc.line("    const s = search.toLowerCase();");
    doc.line("    return Object.values(r.fields).some(v =>");
    doc.line("      String(v ?? '').toLowerCase().includes(s)");
    doc.line("    );");
    doc.line("  });");
    doc.blank();

    // Loading state
    doc.line("  if (loading) {");
    doc.line("    return (");
    doc.line("      <div className=\"flex items-center justify-center py-32\">");
    doc.line("        <div className=\"animate-spin h-8 w-8 border-2 border-primary border-t-transparent rounded-full\" />");
    doc.line("      </div>");
    doc.line("    );");
    doc.line("  }");
    doc.blank();

    let entity_arg = [("entity", label)];
    let search_placeholder = texts.text("search_entity", &entity_arg)?;
    let in_system = texts.text("in_system", &entity_arg)?;
    let no_data = texts.text("no_data_yet", &entity_arg)?;
    let delete_title = texts.text("delete_entity", &entity_arg)?;

    doc.line("  return (");
    doc.line("    <PageShell");
    doc.line(format!("      title=\"{}\"", jsx_attr(label)));
    doc.line(format!(
        "      subtitle={{`${{records.length}} {}`}}",
        js_template(&in_system)
    ));
    doc.line("      action={");
    doc.line("        <Button onClick={() => setDialogOpen(true)} className=\"shrink-0\">");
    doc.line(format!(
        "          <Plus className=\"h-4 w-4 mr-2\" /> {}",
        jsx_text(&texts.phrase("add")?)
    ));
    doc.line("        </Button>");
    doc.line("      }");
    doc.line("    >");

    // Search bar
    doc.line("      <div className=\"relative w-full max-w-sm\">");
    doc.line("        <Search className=\"absolute left-3 top-1/2 -translate-y-1/2 h-4 w-4 text-muted-foreground\" />");
    doc.line("        <Input");
    doc.line(format!("          placeholder=\"{}\"", jsx_attr(&search_placeholder)));
    doc.line("          value={search}");
    doc.line("          onChange={e => setSearch(e.target.value)}");
    doc.line("          className=\"pl-9\"");
    doc.line("        />");
    doc.line("      </div>");

    // Table
    doc.line("      <div className=\"rounded-lg border bg-card overflow-hidden\">");
    doc.line("        <Table>");
    doc.line("          <TableHeader>");
    doc.line("            <TableRow>");
    for cell in &cells {
        doc.line(format!(
            "              <TableHead>{}</TableHead>",
            jsx_text(cell.field.label_or(cell.key))
        ));
    }
    doc.line(format!(
        "              <TableHead className=\"w-24\">{}</TableHead>",
        jsx_text(&texts.phrase("actions")?)
    ));
    doc.line("            </TableRow>");
    doc.line("          </TableHeader>");
    doc.line("          <TableBody>");
    doc.line("            {filtered.map(record => (");
    doc.line("              <TableRow key={record.record_id} className=\"hover:bg-muted/50 transition-colors\">");
    for cell in &cells {
        doc.line(format!("                {}", table_cell(cell, view, texts)?));
    }
    doc.line("                <TableCell>");
    doc.line("                  <div className=\"flex gap-1\">");
    doc.line("                    <Button variant=\"ghost\" size=\"icon\" onClick={() => setEditingRecord(record)}>");
    doc.line("                      <Pencil className=\"h-4 w-4\" />");
    doc.line("                    </Button>");
    doc.line("                    <Button variant=\"ghost\" size=\"icon\" onClick={() => setDeleteTarget(record)}>");
    doc.line("                      <Trash2 className=\"h-4 w-4 text-destructive\" />");
    doc.line("                    </Button>");
    doc.line("                  </div>");
    doc.line("                </TableCell>");
    doc.line("              </TableRow>");
    doc.line("            ))}");

    // Empty state
    doc.line("            {filtered.length === 0 && (");
    doc.line("              <TableRow>");
    doc.line(format!(
        "                <TableCell colSpan={{{column_count}}} className=\"text-center py-16 text-muted-foreground\">"
    ));
    doc.line(format!(
        "                  {{search ? '{}' : '{}'}}",
        js_str(&texts.phrase("no_results")?),
        js_str(&no_data)
    ));
    doc.line("                </TableCell>");
    doc.line("              </TableRow>");
    doc.line("            )}");
    doc.line("          </TableBody>");
    doc.line("        </Table>");
    doc.line("      </div>");
    doc.blank();

    // Dialogs
    doc.line(format!("      <{ty}Dialog"));
    doc.line("        open={dialogOpen || !!editingRecord}");
    doc.line("        onClose={() => { setDialogOpen(false); setEditingRecord(null); }}");
    doc.line("        onSubmit={editingRecord ? handleUpdate : handleCreate}");
    doc.line("        defaultValues={editingRecord?.fields}");
    for lookup in &view.lookups {
        let var = &lookup.target_names.var;
        doc.line(format!("        {var}List={{{var}List}}"));
    }
    doc.line("      />");
    doc.blank();
    doc.line("      <ConfirmDialog");
    doc.line("        open={!!deleteTarget}");
    doc.line("        onClose={() => setDeleteTarget(null)}");
    doc.line("        onConfirm={handleDelete}");
    doc.line(format!("        title=\"{}\"", jsx_attr(&delete_title)));
    doc.line(format!(
        "        description=\"{}\"",
        jsx_attr(&texts.phrase("confirm_delete_desc")?)
    ));
    doc.line("      />");
    doc.line("    </PageShell>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}

// =============================================================================
// Sections
// =============================================================================

fn emit_date_helper(doc: &mut Doc, texts: &Texts) -> Result<()> {
    let pattern = js_str(&texts.phrase("date_format")?);
    let options = texts
        .locale()
        .date_fns_locale()
        .map(|locale| format!(", {{ locale: {locale} }}"))
        .unwrap_or_default();

    doc.line("function formatDate(d?: string) {");
    doc.line("  if (!d) return '—';");
    doc.line(format!(
        "  try {{ return format(parseISO(d), '{pattern}'{options}); }} catch {{ return d; }}"
    ));
    doc.line("}");
    doc.blank();
    Ok(())
}

/// Primary records and every lookup target in one parallel batch
fn emit_load_data(doc: &mut Doc, view: &EntityView<'_>) {
    let ty = &view.names.type_name;

    doc.line("  async function loadData() {");
    doc.line("    setLoading(true);");
    doc.line("    try {");
    if view.lookups.is_empty() {
        doc.line(format!("      setRecords(await {SERVICE}.get{ty}());"));
    } else {
        let mut vars = vec!["mainData".to_string()];
        let mut calls = vec![format!("{SERVICE}.get{ty}()")];
        for lookup in &view.lookups {
            let t = &lookup.target_names;
            vars.push(format!("{}Data", t.var));
            calls.push(format!("{SERVICE}.get{}()", t.type_name));
        }
        doc.line(format!("      const [{}] = await Promise.all([", vars.join(", ")));
        for call in calls {
            doc.line(format!("        {call},"));
        }
        doc.line("      ]);");
        doc.line("      setRecords(mainData);");
        for lookup in &view.lookups {
            let t = &lookup.target_names;
            doc.line(format!("      set{}List({}Data);", t.type_name, t.var));
        }
    }
    doc.line("    } finally {");
    doc.line("      setLoading(false);");
    doc.line("    }");
    doc.line("  }");
    doc.blank();
}

fn emit_handlers(doc: &mut Doc, ty: &str, singular: &str) {
    doc.line(format!("  async function handleCreate(fields: {ty}['fields']) {{"));
    doc.line(format!("    await {SERVICE}.create{singular}(fields);"));
    doc.line("    await loadData();");
    doc.line("    setDialogOpen(false);");
    doc.line("  }");
    doc.blank();
    doc.line(format!("  async function handleUpdate(fields: {ty}['fields']) {{"));
    doc.line("    if (!editingRecord) return;");
    doc.line(format!(
        "    await {SERVICE}.update{singular}(editingRecord.record_id, fields);"
    ));
    doc.line("    await loadData();");
    doc.line("    setEditingRecord(null);");
    doc.line("  }");
    doc.blank();
    doc.line("  async function handleDelete() {");
    doc.line("    if (!deleteTarget) return;");
    doc.line(format!("    await {SERVICE}.delete{singular}(deleteTarget.record_id);"));
    doc.line("    setRecords(prev => prev.filter(r => r.record_id !== deleteTarget.record_id));");
    doc.line("    setDeleteTarget(null);");
    doc.line("  }");
    doc.blank();
}

/// One lookup helper per target entity
fn emit_display_helpers(doc: &mut Doc, view: &EntityView<'_>) {
    for lookup in &view.lookups {
        let t = &lookup.target_names;
        doc.line(format!("  function get{}DisplayName(url?: string) {{", t.type_name));
        doc.line("    if (!url) return '—';");
        doc.line("    const id = extractRecordId(url);");
        doc.line(format!(
            "    return {}List.find(r => r.record_id === id)?.fields.{} ?? '—';",
            t.var, lookup.display_field
        ));
        doc.line("  }");
        doc.blank();
    }
}

// =============================================================================
// Table Cells
// =============================================================================

fn table_cell(cell: &CellPlan<'_>, view: &EntityView<'_>, texts: &Texts) -> Result<String> {
    let key = cell.key;
    let value = format!("record.fields.{key}");

    let rendered = match cell.strategy.cell {
        FieldKind::Textarea => format!(
            "<TableCell className=\"max-w-xs\"><span className=\"truncate block\">{{{value} ?? '—'}}</span></TableCell>"
        ),
        FieldKind::Boolean => format!(
            "<TableCell><span className={{`inline-flex items-center px-2.5 py-1 rounded-full text-xs font-medium ${{{value} ? 'bg-primary/10 text-primary' : 'bg-muted text-muted-foreground'}}`}}>{{{value} ? '{}' : '{}'}}</span></TableCell>",
            js_str(&texts.phrase("yes")?),
            js_str(&texts.phrase("no")?)
        ),
        FieldKind::Choice => format!(
            "<TableCell><Badge variant=\"secondary\">{{{value} ?? '—'}}</Badge></TableCell>"
        ),
        FieldKind::Reference => match view.reference_for(key) {
            Some(reference) => format!(
                "<TableCell>{{get{}DisplayName({value})}}</TableCell>",
                reference.target_names.type_name
            ),
            None => format!("<TableCell>{{{value} ?? '—'}}</TableCell>"),
        },
        FieldKind::Date | FieldKind::DateTime => format!(
            "<TableCell className=\"text-muted-foreground\">{{formatDate({value})}}</TableCell>"
        ),
        _ if cell.emphasized => format!(
            "<TableCell className=\"font-medium\">{{{value} ?? '—'}}</TableCell>"
        ),
        _ => format!("<TableCell>{{{value} ?? '—'}}</TableCell>"),
    };
    Ok(rendered)
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
            "titel": {"fulltype": "string/text", "label": "Titel"},
            "kunde": {"fulltype": "applookup/select", "label": "Kunde", "lookup_app": "https://x/apps/K"},
            "zahler": {"fulltype": "applookup/select", "label": "Zahler", "lookup_app": "https://x/apps/K"},
            "datum": {"fulltype": "date/date", "label": "Datum"},
            "status": {"fulltype": "lookup/select", "label": "Status"}
        }}
    }}"#;

    fn render(identifier: &str, locale: Locale) -> String {
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
        entity_page(&view, &Texts::new(locale)).unwrap()
    }

    #[test]
    fn test_lookups_loaded_in_one_batch() {
        let page = render("buchungen", Locale::De);
        assert!(page.contains("const [mainData, kundenData] = await Promise.all(["));
        assert_eq!(page.matches("LivingAppsService.getKunden()").count(), 1);
        assert_eq!(page.matches("function getKundenDisplayName").count(), 1);
        assert!(page.contains("?.fields.name ?? '—';"));
    }

    #[test]
    fn test_columns_follow_display_order() {
        let page = render("buchungen", Locale::De);
        let headers: Vec<usize> = ["Titel", "Kunde", "Zahler", "Datum", "Status", "Aktionen"]
            .iter()
            .map(|h| page.find(&format!("<TableHead>{h}</TableHead>")).or_else(|| page.find(&format!(">{h}</TableHead>"))).unwrap())
            .collect();
        assert!(headers.windows(2).all(|w| w[0] < w[1]));
        assert!(page.contains("colSpan={6}"));
    }

    #[test]
    fn test_cell_strategies() {
        let page = render("buchungen", Locale::De);
        assert!(page.contains("<TableCell className=\"font-medium\">{record.fields.titel ?? '—'}</TableCell>"));
        assert!(page.contains("<TableCell>{getKundenDisplayName(record.fields.zahler)}</TableCell>"));
        assert!(page.contains("{formatDate(record.fields.datum)}"));
        assert!(page.contains("<Badge variant=\"secondary\">{record.fields.status ?? '—'}</Badge>"));
        assert!(page.contains("import { de } from 'date-fns/locale';"));
        assert!(page.contains("format(parseISO(d), 'dd.MM.yyyy', { locale: de })"));
    }

    #[test]
    fn test_page_without_lookups() {
        let page = render("kunden", Locale::En);
        assert!(page.contains("setRecords(await LivingAppsService.getKunden());"));
        assert!(!page.contains("Promise.all"));
        assert!(!page.contains("extractRecordId"));
        assert!(!page.contains("date-fns"));
        assert!(page.contains("await LivingAppsService.createKundenEntry(fields);"));
        assert!(page.contains("await LivingAppsService.deleteKundenEntry(deleteTarget.record_id);"));
    }
}
