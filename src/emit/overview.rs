//! Overview page with one record count per entity

use super::{jsx_attr, jsx_text, Doc, EntitySummary, SERVICE, SERVICE_MODULE, TYPES_MODULE};
use crate::error::Result;
use crate::locale::Texts;

pub const OVERVIEW_PATH: &str = "src/pages/DashboardOverview.tsx";

/// Maximum number of KPI card columns on large screens
const MAX_GRID_COLUMNS: usize = 5;

/// `DashboardOverview.tsx`: counts for every entity, loaded in one batch
pub fn overview(entities: &[EntitySummary<'_>], texts: &Texts) -> Result<String> {
    let mut doc = Doc::new();
    doc.line("import { useEffect, useState } from 'react';");
    doc.line("import { StatCard } from '@/components/StatCard';");
    doc.line(format!("import {{ {SERVICE} }} from '{SERVICE_MODULE}';"));
    if !entities.is_empty() {
        let types = entities
            .iter()
            .map(|e| e.names.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        doc.line(format!("import type {{ {types} }} from '{TYPES_MODULE}';"));
    }
    doc.blank();

    doc.line("export default function DashboardOverview() {");
    for e in entities {
        doc.line(format!(
            "  const [{}Count, set{}Count] = useState(0);",
            e.names.var, e.names.type_name
        ));
    }
    doc.line("  const [loading, setLoading] = useState(true);");
    doc.blank();

    doc.line("  useEffect(() => {");
    doc.line("    async function loadStats() {");
    doc.line("      try {");
    let results = entities
        .iter()
        .map(|e| format!("{}Data", e.names.var))
        .collect::<Vec<_>>()
        .join(", ");
    doc.line(format!("        const [{results}] = await Promise.all(["));
    for e in entities {
        doc.line(format!("          {SERVICE}.get{}(),", e.names.type_name));
    }
    doc.line("        ]);");
    for e in entities {
        doc.line(format!(
            "        set{}Count({}Data.length);",
            e.names.type_name, e.names.var
        ));
    }
    doc.line("      } catch (e) {");
    doc.line("        console.error('Failed to load stats:', e);");
    doc.line("      } finally {");
    doc.line("        setLoading(false);");
    doc.line("      }");
    doc.line("    }");
    doc.line("    loadStats();");
    doc.line("  }, []);");
    doc.blank();

    doc.line("  return (");
    doc.line("    <div className=\"space-y-8\">");
    doc.line("      <div>");
    doc.line(format!(
        "        <h1 className=\"text-3xl font-bold tracking-tight\">{}</h1>",
        jsx_text(&texts.phrase("welcome")?)
    ));
    doc.line(format!(
        "        <p className=\"text-muted-foreground mt-1\">{}</p>",
        jsx_text(&texts.phrase("overview_subtitle")?)
    ));
    doc.line("      </div>");
    doc.blank();

    let columns = entities.len().clamp(1, MAX_GRID_COLUMNS);
    doc.line(format!(
        "      <div className=\"grid grid-cols-2 lg:grid-cols-{columns} gap-4\">"
    ));
    for e in entities {
        let description = texts.text("in_system", &[("entity", e.label)])?;
        doc.line("        <StatCard");
        doc.line(format!("          title=\"{}\"", jsx_attr(e.label)));
        doc.line(format!(
            "          value={{loading ? '...' : {}Count}}",
            e.names.var
        ));
        doc.line(format!("          description=\"{}\"", jsx_attr(&description)));
        doc.line("        />");
    }
    doc.line("      </div>");
    doc.line("    </div>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}
