//! Entity Scaffold
//!
//! A metadata-driven generator that turns a description of app entities
//! (fields, types, cross-references) into a complete React + TypeScript CRUD
//! source tree: router, sidebar layout, overview dashboard, and one list page
//! plus create/edit dialog per scaffolded entity.
//!
//! ## Features
//!
//! - **Consistent Naming**: One set of derived names per entity, shared by every file
//! - **Field Classification**: Each `fulltype` maps to an input widget and a table cell
//! - **Reference Resolution**: `applookup` fields become selects over the target entity
//! - **Locale Detection**: German or English UI text, picked once per run
//! - **Drift Detection**: Compare a fresh run against an existing tree
//!
//! ## Output
//!
//! ```text
//! src/
//! ├── App.tsx
//! ├── components/
//! │   ├── Layout.tsx
//! │   ├── PageShell.tsx
//! │   ├── ConfirmDialog.tsx
//! │   ├── StatCard.tsx
//! │   └── dialogs/
//! │       └── KurseDialog.tsx
//! └── pages/
//!     ├── DashboardOverview.tsx
//!     ├── KursePage.tsx
//!     └── RaeumePage.tsx
//! ```

pub mod checksum;
pub mod classify;
pub mod config;
pub mod drift;
pub mod emit;
pub mod error;
pub mod generator;
pub mod graph;
pub mod icons;
pub mod locale;
pub mod metadata;
pub mod names;
pub mod output;

pub use checksum::Checksum;
pub use classify::{classify, FieldKind, RenderStrategy};
pub use config::ScaffoldConfig;
pub use drift::{DriftReport, FileStatus};
pub use error::{GenerateError, Result};
pub use generator::Generator;
pub use graph::{Reference, ReferenceGraph};
pub use locale::{Locale, LocaleSetting, Texts};
pub use metadata::{AppMetadata, EntityMetadata, FieldDescriptor};
pub use names::EntityNames;
pub use output::GeneratedFiles;
