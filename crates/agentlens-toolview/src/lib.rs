//! Tool activity interpretation for the presentation layer.
//!
//! Given an opaque stream of tool-call events emitted by a running agent,
//! this crate resolves each event to a renderer capability ([`registry`]),
//! a human-readable label ([`display`]), an icon tag ([`icon`]), and a
//! best-effort primary parameter summary ([`extract`]). It selects and
//! feeds renderers; the rendering widgets themselves live elsewhere.

use agentlens_core::types::ToolCallEvent;
use serde::{Deserialize, Serialize};

pub mod display;
pub mod extract;
pub mod icon;
pub mod registry;

pub use display::display_name;
pub use extract::extract_primary_param;
pub use icon::{ToolIcon, tool_icon};
pub use registry::ToolViewRegistry;

/// Rendering capability tag a tool call resolves to.
///
/// The presentation layer maps each tag to a concrete renderer widget;
/// unknown tools degrade to [`ToolCapability::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCapability {
    Browser,
    Shell,
    File,
    Edit,
    Web,
    Data,
    Port,
    Vision,
    Ask,
    Completion,
    Generic,
}

/// Canonical form of a tool identifier.
///
/// The backend emits the same logical tool under hyphenated and underscored
/// names; every lookup table in this crate keys on the underscored form so
/// both surface spellings resolve identically.
pub fn canonical_tool_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Whether an identifier belongs to the browser-automation family.
///
/// Matched by prefix, case-insensitively, in either surface form.
pub fn is_browser_tool(name: &str) -> bool {
    canonical_tool_name(name)
        .to_ascii_lowercase()
        .starts_with("browser_")
}

/// Everything the presentation layer needs to render one tool-call event.
#[derive(Debug, Clone)]
pub struct ResolvedToolView {
    pub capability: ToolCapability,
    pub label: String,
    pub icon: ToolIcon,
    pub summary: Option<String>,
}

/// Resolve a tool-call event against a registry.
///
/// Infallible: unknown tools degrade to the generic capability, the raw
/// identifier as label, the fallback icon, and no summary.
pub fn resolve_tool_view(registry: &ToolViewRegistry, event: &ToolCallEvent) -> ResolvedToolView {
    ResolvedToolView {
        capability: registry.get(&event.name),
        label: display_name(&event.name),
        icon: tool_icon(&event.name),
        summary: extract_primary_param(&event.name, &event.payload),
    }
}
