//! Application shell: router and sidebar navigation

use std::collections::BTreeSet;

use super::{js_str, Doc, EntitySummary};
use crate::error::Result;
use crate::icons::DEFAULT_ICON;
use crate::locale::Texts;

pub const APP_PATH: &str = "src/App.tsx";
pub const LAYOUT_PATH: &str = "src/components/Layout.tsx";

/// Icons the layout uses regardless of entities
const SHELL_ICONS: &[&str] = &["LayoutDashboard", "Menu", "X"];

/// `App.tsx`: one route per entity under the shared layout
pub fn app_router(entities: &[EntitySummary<'_>]) -> String {
    let mut doc = Doc::new();
    doc.line("import { BrowserRouter, Routes, Route } from 'react-router-dom';");
    doc.line("import { Layout } from '@/components/Layout';");
    doc.line("import DashboardOverview from '@/pages/DashboardOverview';");
    for e in entities {
        let ty = &e.names.type_name;
        doc.line(format!("import {ty}Page from '@/pages/{ty}Page';"));
    }
    doc.blank();
    doc.line("export default function App() {");
    doc.line("  return (");
    doc.line("    <BrowserRouter basename={import.meta.env.BASE_URL}>");
    doc.line("      <Routes>");
    doc.line("        <Route element={<Layout />}>");
    doc.line("          <Route index element={<DashboardOverview />} />");
    for e in entities {
        doc.line(format!(
            "          <Route path=\"{}\" element={{<{}Page />}} />",
            e.names.route, e.names.type_name
        ));
    }
    doc.line("        </Route>");
    doc.line("      </Routes>");
    doc.line("    </BrowserRouter>");
    doc.line("  );");
    doc.line("}");
    doc.finish()
}

/// `Layout.tsx`: responsive sidebar listing the overview and every entity
pub fn layout(entities: &[EntitySummary<'_>], texts: &Texts) -> Result<String> {
    let overview = js_str(&texts.phrase("overview")?);
    let management = js_str(&texts.phrase("management")?);
    let navigation = texts.phrase("navigation")?;
    let title = js_str(&texts.phrase("dashboard")?);

    // Logo uses the first entity's icon
    let logo_icon = entities.first().map_or(DEFAULT_ICON, |e| e.icon);

    let mut icons: BTreeSet<&str> = SHELL_ICONS.iter().copied().collect();
    icons.insert(logo_icon);
    icons.extend(entities.iter().map(|e| e.icon));
    let icon_list = icons.into_iter().collect::<Vec<_>>().join(", ");

    let mut doc = Doc::new();
    doc.line("import { NavLink, Outlet } from 'react-router-dom';");
    doc.line(format!("import {{ {icon_list} }} from 'lucide-react';"));
    doc.line("import { useState } from 'react';");
    doc.blank();
    doc.line("// Customize these for your app");
    doc.line(format!("const APP_TITLE = '{title}';"));
    doc.line(format!("const APP_SUBTITLE = '{management}';"));
    doc.blank();
    doc.line("const navigation = [");
    doc.line(format!("  {{ name: '{overview}', href: '/', icon: LayoutDashboard }},"));
    for e in entities {
        doc.line(format!(
            "  {{ name: '{}', href: '/{}', icon: {} }},",
            js_str(e.label),
            e.names.route,
            e.icon
        ));
    }
    doc.line("];");
    doc.blank();
    doc.line("export function Layout() {");
    doc.line("  const [sidebarOpen, setSidebarOpen] = useState(false);");
    doc.blank();
    doc.line("  return (");
    doc.line("    <div className=\"min-h-screen bg-background\">");
    doc.line("      {sidebarOpen && (");
    doc.line("        <div");
    doc.line("          className=\"fixed inset-0 bg-black/50 backdrop-blur-sm z-40 lg:hidden\"");
    doc.line("          onClick={() => setSidebarOpen(false)}");
    doc.line("        />");
    doc.line("      )}");
    doc.blank();
    doc.line("      <aside");
    doc.line("        className={`");
    doc.line("          fixed top-0 left-0 z-50 h-full w-64 bg-sidebar border-r border-sidebar-border");
    doc.line("          transform transition-transform duration-200 ease-in-out");
    doc.line("          ${sidebarOpen ? 'translate-x-0' : '-translate-x-full'}");
    doc.line("          lg:translate-x-0");
    doc.line("        `}");
    doc.line("      >");
    doc.line("        <div className=\"flex items-center justify-between px-5 py-6 border-b border-sidebar-border\">");
    doc.line("          <div className=\"flex items-center gap-3\">");
    doc.line("            <div className=\"w-9 h-9 rounded-xl bg-sidebar-primary flex items-center justify-center shadow-sm\">");
    doc.line(format!(
        "              <{logo_icon} size={{16}} className=\"text-sidebar-primary-foreground\" />"
    ));
    doc.line("            </div>");
    doc.line("            <div>");
    doc.line("              <h1 className=\"text-sm font-bold tracking-tight text-sidebar-foreground\">{APP_TITLE}</h1>");
    doc.line("              <p className=\"text-xs text-sidebar-foreground/60\">{APP_SUBTITLE}</p>");
    doc.line("            </div>");
    doc.line("          </div>");
    doc.line("          <button");
    doc.line("            className=\"lg:hidden p-1.5 rounded-lg text-sidebar-foreground/60 hover:text-sidebar-foreground transition-colors\"");
    doc.line("            onClick={() => setSidebarOpen(false)}");
    doc.line("          >");
    doc.line("            <X size={16} />");
    doc.line("          </button>");
    doc.line("        </div>");
    doc.line("        <nav className=\"px-3 pt-4 space-y-0.5\">");
    doc.line("          <p className=\"px-3 pb-2 text-xs font-semibold uppercase tracking-widest text-sidebar-foreground/40\">");
    doc.line(format!("            {}", super::jsx_text(&navigation)));
    doc.line("          </p>");
    doc.line("          {navigation.map(item => (");
    doc.line("            <NavLink");
    doc.line("              key={item.href}");
    doc.line("              to={item.href}");
    doc.line("              end={item.href === '/'}");
    doc.line("              onClick={() => setSidebarOpen(false)}");
    doc.line("              className={({ isActive }: { isActive: boolean }) =>");
    doc.line("                `flex items-center gap-3 px-3 py-2.5 rounded-lg text-sm font-medium transition-colors ${");
    doc.line("                  isActive");
    doc.line("                    ? 'bg-sidebar-primary text-sidebar-primary-foreground shadow-sm'");
    doc.line("                    : 'text-sidebar-foreground/70 hover:bg-sidebar-accent hover:text-sidebar-accent-foreground'");
    doc.line("                }`");
    doc.line("              }");
    doc.line("            >");
    doc.line("              <item.icon size={16} className=\"shrink-0\" />");
    doc.line("              {item.name}");
    doc.line("            </NavLink>");
    doc.line("          ))}");
    doc.line("        </nav>");
    doc.line("      </aside>");
    doc.blank();
    doc.line("      <div className=\"lg:pl-64\">");
    doc.line("        <header className=\"lg:hidden flex items-center gap-4 px-4 py-3 border-b bg-card sticky top-0 z-30\">");
    doc.line("          <button");
    doc.line("            className=\"p-2 rounded-lg hover:bg-accent transition-colors\"");
    doc.line("            onClick={() => setSidebarOpen(true)}");
    doc.line("          >");
    doc.line("            <Menu size={18} />");
    doc.line("          </button>");
    doc.line("          <span className=\"font-semibold text-sm\">{APP_TITLE}</span>");
    doc.line("        </header>");
    doc.line("        <main className=\"p-6 lg:p-8 max-w-screen-2xl\">");
    doc.line("          <Outlet />");
    doc.line("        </main>");
    doc.line("      </div>");
    doc.line("    </div>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}
