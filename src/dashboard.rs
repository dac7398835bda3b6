//! Toolbox registry
//!
//! To add a tool, append an entry to [`TOOLS`]; the listing is generated
//! from it.

/// A tool of the operations toolbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Entry point, relative to the toolbox root
    pub path: &'static str,
    /// `#RRGGBB`
    pub accent: &'static str,
}

pub const TOOLS: &[ToolEntry] = &[
    ToolEntry {
        id: "grid-manager",
        name: "G.R.I.D.O.",
        subtitle: "Stadium Grid Manager",
        description: "Diseñá y exportá grillas de asientos para estadios con canvas infinito, pintado drag, y exportación a CSV/ZIP.",
        icon: "🏟️",
        path: "tools/grid-manager/index.html",
        accent: "#3b82f6",
    },
    ToolEntry {
        id: "acreditation-manager",
        name: "Acreditaciones Fanki",
        subtitle: "Credential Manager",
        description: "Generá y gestioná acreditaciones con códigos QR/barcode, grupos, subgrupos y exportación a Excel.",
        icon: "🎫",
        path: "tools/acreditation-manager/index.html",
        accent: "#2563eb",
    },
];

pub fn find(id: &str) -> Option<&'static ToolEntry> {
    TOOLS.iter().find(|t| t.id == id)
}

/// Plain-text listing of every tool, one card per entry
pub fn render_listing() -> String {
    TOOLS
        .iter()
        .map(|tool| {
            format!(
                "{} {} - {}\n   {}\n   id: {}  path: {}  accent: {}\n",
                tool.icon,
                tool.name,
                tool.subtitle,
                tool.description,
                tool.id,
                tool.path,
                tool.accent
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
