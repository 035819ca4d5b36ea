//! Generation Driver
//!
//! Owns one run: names, the app index, and the locale are derived once from
//! the metadata, then every document is assembled into a single ordered
//! path-to-text mapping. The same metadata and scaffold list always produce
//! the same mapping.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::classify;
use crate::emit::{dialog, overview, page, placeholder, primitives, shell, EntitySummary, EntityView};
use crate::error::{GenerateError, Result};
use crate::graph::{self, AppIndex, Reference, ReferenceGraph};
use crate::icons;
use crate::locale::{Locale, LocaleSetting, Texts};
use crate::metadata::{AppMetadata, EntityMetadata};
use crate::names::EntityNames;
use crate::output::GeneratedFiles;

/// Owner recorded for documents that belong to no single entity
const SHELL_OWNER: &str = "<shell>";

/// Scaffold generator for one metadata set
#[derive(Debug)]
pub struct Generator {
    metadata: AppMetadata,
    scaffolds: Vec<String>,
    names: IndexMap<String, EntityNames>,
    index: AppIndex,
    texts: Texts,
}

impl Generator {
    /// Generator with the locale detected from the metadata's display text
    pub fn new<I, S>(metadata: AppMetadata, scaffolds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_locale(metadata, scaffolds, LocaleSetting::Auto)
    }

    /// Generator with an explicit locale setting
    pub fn with_locale<I, S>(metadata: AppMetadata, scaffolds: I, setting: LocaleSetting) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: IndexMap<String, EntityNames> = metadata
            .identifiers()
            .map(|id| (id.to_string(), EntityNames::of(id)))
            .collect();
        let index = AppIndex::build(&metadata);
        let locale = setting.resolve(metadata.display_texts());
        debug!(locale = %locale, entities = names.len(), "resolved locale");

        let mut accepted: Vec<String> = Vec::new();
        for scaffold in scaffolds.into_iter().map(Into::into) {
            if metadata.contains(&scaffold) {
                if !accepted.contains(&scaffold) {
                    accepted.push(scaffold);
                }
                continue;
            }
            match suggest(&scaffold, metadata.identifiers()) {
                Some(close) => warn!(
                    scaffold = %scaffold,
                    suggestion = close,
                    "unknown scaffold entity ignored; did you mean '{close}'?"
                ),
                None => warn!(scaffold = %scaffold, "unknown scaffold entity ignored"),
            }
        }

        Self {
            metadata,
            scaffolds: accepted,
            names,
            index,
            texts: Texts::new(locale),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn locale(&self) -> Locale {
        self.texts.locale()
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Naming forms of every entity, metadata order
    pub fn entities(&self) -> impl Iterator<Item = &EntityNames> {
        self.names.values()
    }

    /// Scaffold identifiers that exist in the metadata, first mention order
    pub fn scaffolds(&self) -> &[String] {
        &self.scaffolds
    }

    pub fn is_scaffolded(&self, identifier: &str) -> bool {
        self.scaffolds.iter().any(|s| s == identifier)
    }

    pub fn references_of(&self, identifier: &str) -> Vec<Reference> {
        graph::references_of(&self.metadata, &self.index, identifier)
    }

    pub fn unique_referenced_entities(&self, identifier: &str) -> Vec<Reference> {
        graph::unique_referenced_entities(&self.references_of(identifier))
    }

    /// Display field of an entity, `None` if it does not exist
    pub fn display_field(&self, identifier: &str) -> Option<&str> {
        self.metadata.get(identifier).map(classify::display_field)
    }

    pub fn reference_graph(&self) -> ReferenceGraph {
        ReferenceGraph::build(&self.metadata, &self.index)
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Assemble every document of the run
    ///
    /// Shell and primitives come first, then each entity in metadata order:
    /// page and dialog when scaffolded, a placeholder page otherwise.
    pub fn generate_all(&self) -> Result<GeneratedFiles> {
        let summaries: Vec<EntitySummary<'_>> = self
            .metadata
            .apps
            .iter()
            .filter_map(|(id, entity)| {
                let names = self.names.get(id)?;
                Some(EntitySummary {
                    names,
                    label: entity.label_or(&names.type_name),
                    icon: icons::category_of(id),
                })
            })
            .collect();

        let mut out = Assembly::default();
        out.add(shell::APP_PATH, shell::app_router(&summaries), SHELL_OWNER)?;
        out.add(shell::LAYOUT_PATH, shell::layout(&summaries, &self.texts)?, SHELL_OWNER)?;
        out.add(primitives::PAGE_SHELL_PATH, primitives::page_shell(), SHELL_OWNER)?;
        out.add(
            overview::OVERVIEW_PATH,
            overview::overview(&summaries, &self.texts)?,
            SHELL_OWNER,
        )?;
        out.add(
            primitives::CONFIRM_DIALOG_PATH,
            primitives::confirm_dialog(&self.texts)?,
            SHELL_OWNER,
        )?;
        out.add(primitives::STAT_CARD_PATH, primitives::stat_card(), SHELL_OWNER)?;

        let mut scaffolded = 0;
        for summary in &summaries {
            let id = summary.names.identifier.as_str();
            let Some(entity) = self.metadata.get(id) else {
                continue;
            };
            let page_path = page::page_path(&summary.names.type_name);

            if self.is_scaffolded(id) {
                let view = self.view(summary, entity);
                debug!(
                    entity = id,
                    references = view.references.len(),
                    lookups = view.lookups.len(),
                    "scaffolding entity"
                );
                out.add(&page_path, page::entity_page(&view, &self.texts)?, id)?;
                out.add(
                    &dialog::dialog_path(&summary.names.type_name),
                    dialog::entity_dialog(&view, &self.texts)?,
                    id,
                )?;
                scaffolded += 1;
            } else {
                debug!(entity = id, "placeholder page");
                out.add(
                    &page_path,
                    placeholder::placeholder_page(summary.names, summary.label, &self.texts)?,
                    id,
                )?;
            }
        }

        info!(
            files = out.files.len(),
            scaffolded,
            placeholders = summaries.len() - scaffolded,
            locale = %self.locale(),
            "generated scaffold"
        );
        Ok(out.files)
    }

    fn view<'a>(&self, summary: &EntitySummary<'a>, entity: &'a EntityMetadata) -> EntityView<'a> {
        let references = self.references_of(&summary.names.identifier);
        EntityView {
            names: summary.names,
            entity,
            label: summary.label,
            lookups: graph::unique_referenced_entities(&references),
            references,
        }
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Output under construction, tracking which entity produced each path
#[derive(Default)]
struct Assembly {
    files: GeneratedFiles,
    owners: IndexMap<String, String>,
}

impl Assembly {
    fn add(&mut self, path: &str, content: String, owner: &str) -> Result<()> {
        if let Some(first) = self.owners.get(path) {
            return Err(GenerateError::NameCollision {
                path: path.to_string(),
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.owners.insert(path.to_string(), owner.to_string());
        self.files.insert(path.to_string(), content);
        Ok(())
    }
}

/// Closest known identifier to an unknown one
fn suggest<'a>(unknown: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default();
    let needle = unknown.to_lowercase();
    candidates
        .filter_map(|candidate| {
            let forward = matcher.fuzzy_match(candidate, &needle);
            let backward = matcher.fuzzy_match(&needle, candidate);
            forward.max(backward).map(|score| (score, candidate))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate)
}
