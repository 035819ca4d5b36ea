//! Shared primitives: page wrapper, delete confirmation, summary card
//!
//! Emitted once per run regardless of entity count.

use super::{jsx_text, Doc};
use crate::error::Result;
use crate::locale::Texts;

pub const PAGE_SHELL_PATH: &str = "src/components/PageShell.tsx";
pub const CONFIRM_DIALOG_PATH: &str = "src/components/ConfirmDialog.tsx";
pub const STAT_CARD_PATH: &str = "src/components/StatCard.tsx";

const PAGE_SHELL: &str = r#"import type { ReactNode } from 'react';

interface PageShellProps {
  title: string;
  subtitle: string;
  action?: ReactNode;
  children: ReactNode;
}

export function PageShell({ title, subtitle, action, children }: PageShellProps) {
  return (
    <div className="space-y-6">
      <div className="flex items-start justify-between gap-4">
        <div>
          <h1 className="text-2xl font-bold tracking-tight">
            {title}
          </h1>
          <p className="text-sm text-muted-foreground mt-1">{subtitle}</p>
        </div>
        {action}
      </div>
      {children}
    </div>
  );
}
"#;

const STAT_CARD: &str = r#"interface StatCardProps {
  title: string;
  value: string | number;
  description?: string;
  icon?: React.ReactNode;
}

export function StatCard({ title, value, description, icon }: StatCardProps) {
  return (
    <div className="rounded-xl border bg-card p-6 shadow-sm">
      <div className="flex items-center justify-between">
        <p className="text-sm font-medium text-muted-foreground">{title}</p>
        {icon}
      </div>
      <p className="text-3xl font-bold mt-2">{value}</p>
      {description && (
        <p className="text-xs text-muted-foreground mt-1">{description}</p>
      )}
    </div>
  );
}
"#;

/// Page header wrapper with title, subtitle, and an action slot
pub fn page_shell() -> String {
    PAGE_SHELL.to_string()
}

/// Labelled KPI card
pub fn stat_card() -> String {
    STAT_CARD.to_string()
}

/// Generic destructive-action confirmation
pub fn confirm_dialog(texts: &Texts) -> Result<String> {
    let cancel = jsx_text(&texts.phrase("cancel")?);
    let delete = jsx_text(&texts.phrase("delete")?);

    let mut doc = Doc::new();
    doc.line("import {");
    doc.line("  Dialog,");
    doc.line("  DialogContent,");
    doc.line("  DialogHeader,");
    doc.line("  DialogTitle,");
    doc.line("  DialogDescription,");
    doc.line("  DialogFooter,");
    doc.line("} from '@/components/ui/dialog';");
    doc.line("import { Button } from '@/components/ui/button';");
    doc.blank();
    doc.line("interface ConfirmDialogProps {");
    doc.line("  open: boolean;");
    doc.line("  onClose: () => void;");
    doc.line("  onConfirm: () => void;");
    doc.line("  title: string;");
    doc.line("  description: string;");
    doc.line("}");
    doc.blank();
    doc.line("export function ConfirmDialog({ open, onClose, onConfirm, title, description }: ConfirmDialogProps) {");
    doc.line("  return (");
    doc.line("    <Dialog open={open} onOpenChange={v => !v && onClose()}>");
    doc.line("      <DialogContent>");
    doc.line("        <DialogHeader>");
    doc.line("          <DialogTitle>{title}</DialogTitle>");
    doc.line("          <DialogDescription>{description}</DialogDescription>");
    doc.line("        </DialogHeader>");
    doc.line("        <DialogFooter>");
    doc.line(format!("          <Button variant=\"outline\" onClick={{onClose}}>{cancel}</Button>"));
    doc.line(format!("          <Button variant=\"destructive\" onClick={{onConfirm}}>{delete}</Button>"));
    doc.line("        </DialogFooter>");
    doc.line("      </DialogContent>");
    doc.line("    </Dialog>");
    doc.line("  );");
    doc.line("}");
    Ok(doc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_confirm_dialog_localized() {
        let de = confirm_dialog(&Texts::new(Locale::De)).unwrap();
        assert!(de.contains(">Abbrechen</Button>"));
        assert!(de.contains(">Löschen</Button>"));

        let en = confirm_dialog(&Texts::new(Locale::En)).unwrap();
        assert!(en.contains(">Cancel</Button>"));
        assert!(!en.contains("Abbrechen"));
    }

    #[test]
    fn test_fixed_primitives_end_with_newline() {
        assert!(page_shell().ends_with("}\n"));
        assert!(stat_card().ends_with("}\n"));
    }
}
