//! Stadium layout import
//!
//! A stadium layout is a JSON tree of sections:
//!
//! ```json
//! { "name": "Estadio", "sections": [
//!     { "code": "PISO_1", "name": "Piso 1", "sections": [ { "code": "101" } ] },
//!     { "code": "PALCOS", "unnumbered": true }
//! ] }
//! ```
//!
//! Leaves (no children, not `unnumbered: true`) are the sections that get a
//! seat grid. Unnumbered nodes are skipped together with their subtree.
//! Unknown fields are kept so the layout is stored back exactly as imported.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::section::SectionCache;

/// Parent used in archive paths for top-level leaves
pub const ORPHAN_PARENT: &str = "OTHERS";

/// Display name used when the layout has none
pub const DEFAULT_STADIUM_NAME: &str = "Stadium Layout";

/// Errors raised while importing a layout
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No leaf sections (unnumbered: false) found in the JSON.")]
    NoLeafSections,
    #[error("Section {0:?} appears inside itself")]
    CyclicReference(String),
    #[error("A leaf section has no code")]
    MissingCode,
}

/// One node of the section tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionNode {
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "strict_true")]
    pub unnumbered: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SectionNode {
    pub fn leaf(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Default::default()
        }
    }

    pub fn parent(code: &str, sections: Vec<SectionNode>) -> Self {
        Self {
            code: code.to_string(),
            sections,
            ..Default::default()
        }
    }

    /// Label for the section tree
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.code)
    }

    fn is_parent(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// Only a literal `true` marks a section unnumbered
fn strict_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Accept numeric codes (`"code": 101`) as well as strings
fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// The imported stadium layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StadiumLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StadiumLayout {
    /// Parse and validate a layout.
    ///
    /// Fails on malformed JSON, on a node whose code repeats one of its
    /// ancestors, on leaves without a code, and when no leaf sections exist.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: StadiumLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut ancestors = Vec::new();
        check_nodes(&self.sections, &mut ancestors)?;
        if LayoutIndex::build(self).leaves.is_empty() {
            return Err(LayoutError::NoLeafSections);
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_STADIUM_NAME)
    }
}

fn check_nodes<'a>(
    nodes: &'a [SectionNode],
    ancestors: &mut Vec<&'a str>,
) -> Result<(), LayoutError> {
    for node in nodes.iter().filter(|n| !n.unnumbered) {
        if !node.code.is_empty() && ancestors.contains(&node.code.as_str()) {
            return Err(LayoutError::CyclicReference(node.code.clone()));
        }
        if node.is_parent() {
            ancestors.push(&node.code);
            check_nodes(&node.sections, ancestors)?;
            ancestors.pop();
        } else if node.code.is_empty() {
            return Err(LayoutError::MissingCode);
        }
    }
    Ok(())
}

/// Parent and leaf counts shown in the project header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub parents: usize,
    pub leaves: usize,
}

/// Leaf sections of a layout in document order, with their direct parents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutIndex {
    pub leaves: Vec<String>,
    parents: HashMap<String, String>,
    stats: ProjectStats,
}

impl LayoutIndex {
    pub fn build(layout: &StadiumLayout) -> Self {
        let mut index = Self::default();
        index.collect(&layout.sections, None);
        index
    }

    fn collect(&mut self, nodes: &[SectionNode], parent: Option<&str>) {
        for node in nodes.iter().filter(|n| !n.unnumbered) {
            if node.is_parent() {
                self.stats.parents += 1;
                self.collect(&node.sections, Some(&node.code));
            } else {
                self.stats.leaves += 1;
                self.leaves.push(node.code.clone());
                if let Some(parent) = parent {
                    self.parents.insert(node.code.clone(), parent.to_string());
                }
            }
        }
    }

    /// Direct parent code of a leaf, if it has one
    pub fn parent_of(&self, leaf: &str) -> Option<&str> {
        self.parents.get(leaf).map(String::as_str)
    }

    pub fn stats(&self) -> ProjectStats {
        self.stats
    }

    pub fn contains(&self, code: &str) -> bool {
        self.leaves.iter().any(|l| l == code)
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.leaves.iter().position(|l| l == code)
    }

    /// Leaf `offset` positions away from `code`, wrapping around
    pub fn neighbor(&self, code: &str, offset: isize) -> Option<&str> {
        if self.leaves.is_empty() {
            return None;
        }
        let len = self.leaves.len() as isize;
        let current = self.position(code).map(|p| p as isize).unwrap_or(-1);
        let next = (current + offset).rem_euclid(len) as usize;
        self.leaves.get(next).map(String::as_str)
    }
}

/// One visible row of the section navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow {
    Parent {
        code: String,
        name: String,
        depth: usize,
        leaf_count: usize,
        /// Every leaf below is configured
        all_configured: bool,
        expanded: bool,
    },
    Leaf {
        code: String,
        name: String,
        depth: usize,
        configured: bool,
        active: bool,
    },
}

impl TreeRow {
    pub fn code(&self) -> &str {
        match self {
            TreeRow::Parent { code, .. } | TreeRow::Leaf { code, .. } => code,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeRow::Parent { depth, .. } | TreeRow::Leaf { depth, .. } => *depth,
        }
    }
}

/// Key under which a parent's expanded state is remembered
pub fn node_key(code: &str) -> String {
    format!("node_{}", code)
}

#[derive(Default)]
struct SubtreeStatus {
    has_active: bool,
    total_leaves: usize,
    configured_leaves: usize,
}

/// Flatten the section tree into navigator rows.
///
/// Parents that contain the active section, or whose key is in `expanded`,
/// show their children.
pub fn section_tree(
    layout: &StadiumLayout,
    cache: &SectionCache,
    active: &str,
    expanded: &BTreeSet<String>,
) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    build_rows(&layout.sections, cache, active, expanded, 0, &mut rows);
    rows
}

fn build_rows(
    nodes: &[SectionNode],
    cache: &SectionCache,
    active: &str,
    expanded: &BTreeSet<String>,
    depth: usize,
    out: &mut Vec<TreeRow>,
) -> SubtreeStatus {
    let mut status = SubtreeStatus::default();

    for node in nodes.iter().filter(|n| !n.unnumbered) {
        if node.is_parent() {
            let mut children = Vec::new();
            let child =
                build_rows(&node.sections, cache, active, expanded, depth + 1, &mut children);
            let is_expanded = child.has_active || expanded.contains(&node_key(&node.code));

            out.push(TreeRow::Parent {
                code: node.code.clone(),
                name: node.display_name().to_string(),
                depth,
                leaf_count: child.total_leaves,
                all_configured: child.total_leaves > 0
                    && child.total_leaves == child.configured_leaves,
                expanded: is_expanded,
            });
            if is_expanded {
                out.extend(children);
            }

            status.has_active |= child.has_active;
            status.total_leaves += child.total_leaves;
            status.configured_leaves += child.configured_leaves;
        } else {
            let configured = cache.is_configured(&node.code);
            let is_active = node.code == active;
            out.push(TreeRow::Leaf {
                code: node.code.clone(),
                name: node.display_name().to_string(),
                depth,
                configured,
                active: is_active,
            });

            status.has_active |= is_active;
            status.total_leaves += 1;
            if configured {
                status.configured_leaves += 1;
            }
        }
    }

    status
}
