//! Entity Reference Graph
//!
//! Resolves `applookup` fields to the entity they point at. The target is
//! named by the last path segment of the field's `lookup_app` URL, which is
//! matched against every entity's `app_id` through an [`AppIndex`] built
//! once per run.
//!
//! Unresolvable references are dropped one at a time; they never fail the
//! entity. [`ReferenceGraph`] is the whole-schema view of the same edges
//! (back-references and cycles), built on petgraph.

use std::collections::{HashMap, HashSet};

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use tracing::warn;

use crate::classify::{display_field, is_reference_type};
use crate::metadata::AppMetadata;
use crate::names::EntityNames;

// =============================================================================
// App Index
// =============================================================================

/// `app_id` -> entity identifier
#[derive(Debug, Clone, Default)]
pub struct AppIndex {
    by_app_id: HashMap<String, String>,
}

impl AppIndex {
    /// Index every entity's `app_id`. The last entity claiming an id keeps it.
    pub fn build(metadata: &AppMetadata) -> Self {
        let mut by_app_id = HashMap::new();
        for (identifier, entity) in &metadata.apps {
            if entity.app_id.is_empty() {
                continue;
            }
            if let Some(replaced) = by_app_id.insert(entity.app_id.clone(), identifier.clone()) {
                warn!(
                    app_id = %entity.app_id,
                    kept = %identifier,
                    ignored = %replaced,
                    "duplicate app_id"
                );
            }
        }
        Self { by_app_id }
    }

    pub fn resolve(&self, app_id: &str) -> Option<&str> {
        self.by_app_id.get(app_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_app_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_app_id.is_empty()
    }
}

/// Last path segment of a reference URL
pub fn target_app_id(lookup_app: &str) -> Option<&str> {
    lookup_app
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

// =============================================================================
// References
// =============================================================================

/// A resolved reference field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Field key on the referencing entity
    pub field_key: String,
    /// Identifier of the target entity
    pub target: String,
    pub target_names: EntityNames,
    /// Field of the target shown in place of the raw reference
    pub display_field: String,
}

/// Every resolvable reference field of an entity, in display order
pub fn references_of(metadata: &AppMetadata, index: &AppIndex, identifier: &str) -> Vec<Reference> {
    let Some(entity) = metadata.get(identifier) else {
        return Vec::new();
    };

    let mut refs = Vec::new();
    for (key, field) in &entity.controls {
        if !is_reference_type(&field.fulltype) {
            continue;
        }

        let resolved = field
            .lookup_app
            .as_deref()
            .and_then(target_app_id)
            .and_then(|app_id| index.resolve(app_id))
            .and_then(|target| metadata.get(target).map(|e| (target, e)));

        match resolved {
            Some((target, target_entity)) => refs.push(Reference {
                field_key: key.clone(),
                target: target.to_string(),
                target_names: EntityNames::of(target),
                display_field: display_field(target_entity).to_string(),
            }),
            None => warn!(
                entity = %identifier,
                field = %key,
                lookup_app = field.lookup_app.as_deref().unwrap_or(""),
                "unresolved reference dropped"
            ),
        }
    }
    refs
}

/// One reference per distinct target, first occurrence wins
pub fn unique_referenced_entities(refs: &[Reference]) -> Vec<Reference> {
    let mut seen = HashSet::new();
    refs.iter()
        .filter(|r| seen.insert(r.target.as_str()))
        .cloned()
        .collect()
}

// =============================================================================
// Reference Graph
// =============================================================================

/// Directed graph of entities, one edge per resolved reference field
pub struct ReferenceGraph {
    graph: DiGraph<String, String>,
    nodes: HashMap<String, NodeIndex>,
}

/// Serializable view of a [`ReferenceGraph`]
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub entities: Vec<String>,
    pub edges: Vec<GraphEdge>,
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub field: String,
    pub target: String,
}

impl ReferenceGraph {
    /// Build the graph; nodes and edges follow metadata order
    pub fn build(metadata: &AppMetadata, index: &AppIndex) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for identifier in metadata.identifiers() {
            let idx = graph.add_node(identifier.to_string());
            nodes.insert(identifier.to_string(), idx);
        }

        for identifier in metadata.identifiers() {
            let source = nodes[identifier];
            for reference in references_of(metadata, index, identifier) {
                let target = nodes[&reference.target];
                graph.add_edge(source, target, reference.field_key);
            }
        }

        Self { graph, nodes }
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .map(|e| GraphEdge {
                source: self.graph[e.source()].clone(),
                field: e.weight().clone(),
                target: self.graph[e.target()].clone(),
            })
            .collect()
    }

    /// Entities with at least one field pointing at `identifier`, in metadata order
    pub fn referenced_by(&self, identifier: &str) -> Vec<&str> {
        let Some(&idx) = self.nodes.get(identifier) else {
            return Vec::new();
        };
        let mut sources: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        sources.sort();
        sources.dedup();
        sources.into_iter().map(|n| self.graph[n].as_str()).collect()
    }

    /// Groups of entities that reference each other, including self references
    ///
    /// Members are in metadata order, groups ordered by their first member.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<NodeIndex>> = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0])
            })
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        groups.sort_by_key(|scc| scc[0]);

        groups
            .into_iter()
            .map(|scc| scc.into_iter().map(|n| self.graph[n].clone()).collect())
            .collect()
    }

    /// Graphviz DOT text, edges labelled with the referencing field
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph EntityGraph {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box, style=rounded, fontname=\"Helvetica\", fontsize=10];\n");
        output.push_str("  edge [fontname=\"Helvetica\", fontsize=8];\n\n");

        for node in self.graph.node_weights() {
            output.push_str(&format!("  \"{node}\";\n"));
        }
        if self.graph.edge_count() > 0 {
            output.push('\n');
        }
        for edge in self.edges() {
            output.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.source, edge.target, edge.field
            ));
        }
        output.push_str("}\n");
        output
    }

    pub fn export(&self) -> GraphExport {
        GraphExport {
            entities: self.graph.node_weights().cloned().collect(),
            edges: self.edges(),
            cycles: self.cycles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> AppMetadata {
        AppMetadata::from_json_str(
            r#"{"apps": {
                "kunden": {"app_id": "A1", "controls": {
                    "firma": {"fulltype": "string/text", "in_list": true}
                }},
                "raeume": {"app_id": "A2", "controls": {
                    "bezeichnung": {"fulltype": "string/text"}
                }},
                "buchungen": {"app_id": "A3", "controls": {
                    "kunde": {"fulltype": "applookup/select", "lookup_app": "https://x/rest/apps/A1"},
                    "raum": {"fulltype": "applookup/select", "lookup_app": "https://x/rest/apps/A2/"},
                    "rechnungskunde": {"fulltype": "applookup/select", "lookup_app": "https://x/rest/apps/A1"},
                    "geist": {"fulltype": "applookup/select", "lookup_app": "https://x/rest/apps/ZZ"},
                    "kaputt": {"fulltype": "applookup/select", "lookup_app": "///"},
                    "leer": {"fulltype": "applookup/select"}
                }}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_target_app_id() {
        assert_eq!(target_app_id("https://x/rest/apps/abc"), Some("abc"));
        assert_eq!(target_app_id("https://x/rest/apps/abc/"), Some("abc"));
        assert_eq!(target_app_id("abc"), Some("abc"));
        assert_eq!(target_app_id(""), None);
        assert_eq!(target_app_id("///"), None);
    }

    #[test]
    fn test_references_resolved_and_dropped() {
        let meta = metadata();
        let index = AppIndex::build(&meta);
        let refs = references_of(&meta, &index, "buchungen");

        let keys: Vec<_> = refs.iter().map(|r| r.field_key.as_str()).collect();
        assert_eq!(keys, vec!["kunde", "raum", "rechnungskunde"]);
        assert_eq!(refs[0].target, "kunden");
        assert_eq!(refs[0].display_field, "firma");
        assert_eq!(refs[1].display_field, "bezeichnung");
        assert_eq!(refs[1].target_names.type_name, "Raeume");
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let meta = metadata();
        let index = AppIndex::build(&meta);
        let refs = references_of(&meta, &index, "buchungen");
        let unique = unique_referenced_entities(&refs);

        let targets: Vec<_> = unique.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["kunden", "raeume"]);
        assert_eq!(unique[0].field_key, "kunde");
    }

    #[test]
    fn test_unknown_entity_has_no_references() {
        let meta = metadata();
        let index = AppIndex::build(&meta);
        assert!(references_of(&meta, &index, "nope").is_empty());
    }

    #[test]
    fn test_duplicate_app_id_keeps_last() {
        let meta = AppMetadata::from_json_str(
            r#"{"apps": {"a": {"app_id": "X"}, "b": {"app_id": "X"}, "c": {"app_id": "X"}}}"#,
        )
        .unwrap();
        let index = AppIndex::build(&meta);
        assert_eq!(index.resolve("X"), Some("c"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_graph_back_references() {
        let meta = metadata();
        let index = AppIndex::build(&meta);
        let graph = ReferenceGraph::build(&meta, &index);

        assert_eq!(graph.entity_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.referenced_by("kunden"), vec!["buchungen"]);
        assert!(graph.referenced_by("buchungen").is_empty());
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_graph_cycles() {
        let meta = AppMetadata::from_json_str(
            r#"{"apps": {
                "a": {"app_id": "1", "controls": {"b": {"fulltype": "applookup/select", "lookup_app": "/2"}}},
                "b": {"app_id": "2", "controls": {"a": {"fulltype": "applookup/select", "lookup_app": "/1"}}},
                "c": {"app_id": "3", "controls": {"parent": {"fulltype": "applookup/select", "lookup_app": "/3"}}},
                "d": {"app_id": "4"}
            }}"#,
        )
        .unwrap();
        let index = AppIndex::build(&meta);
        let graph = ReferenceGraph::build(&meta, &index);

        assert_eq!(
            graph.cycles(),
            vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
        );
    }

    #[test]
    fn test_dot_export() {
        let meta = metadata();
        let index = AppIndex::build(&meta);
        let dot = ReferenceGraph::build(&meta, &index).to_dot();

        assert!(dot.starts_with("digraph EntityGraph {"));
        assert!(dot.contains("  \"buchungen\" -> \"kunden\" [label=\"kunde\"];"));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}
