//! Icon tags for tool identifiers.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

use tracing::debug;

use crate::{canonical_tool_name, is_browser_tool};

/// Glyph tag the presentation layer maps to an actual icon asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolIcon {
    Terminal,
    FileEdit,
    FileSearch,
    FilePlus,
    FileText,
    FileX,
    Globe,
    Search,
    Network,
    CloudUpload,
    Code,
    ExternalLink,
    MessageQuestion,
    CheckCircle,
    Wrench,
}

/// Identifiers already reported as unknown, so each is logged once.
static LOGGED_UNKNOWN: LazyLock<Mutex<HashSet<String>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

/// Resolve a tool identifier to its icon tag.
///
/// Unknown identifiers resolve to [`ToolIcon::Wrench`] and are logged once
/// per process as a diagnostic.
pub fn tool_icon(name: &str) -> ToolIcon {
    if is_browser_tool(name) {
        return ToolIcon::Globe;
    }

    match canonical_tool_name(name).to_ascii_lowercase().as_str() {
        // File operations
        "create_file" => ToolIcon::FileEdit,
        "str_replace" => ToolIcon::FileSearch,
        "full_file_rewrite" => ToolIcon::FilePlus,
        "read_file" => ToolIcon::FileText,
        "delete_file" => ToolIcon::FileX,

        // Shell commands
        "execute_command" | "check_command_output" | "terminate_command" | "list_commands" => {
            ToolIcon::Terminal
        }

        // Web operations
        "web_search" => ToolIcon::Search,
        "crawl_webpage" | "scrape_webpage" => ToolIcon::Globe,
        "web_browser_takeover" => ToolIcon::Globe,

        // API and data operations
        "call_data_provider" => ToolIcon::ExternalLink,
        "get_data_provider_endpoints" | "execute_data_provider_call" => ToolIcon::Network,

        // Deployment
        "deploy_site" | "deploy" => ToolIcon::CloudUpload,
        "expose_port" => ToolIcon::Network,

        // Code execution
        "execute_code" => ToolIcon::Code,

        // Vision and media
        "see_image" => ToolIcon::FileText,

        // User interaction and completion
        "ask" => ToolIcon::MessageQuestion,
        "complete" => ToolIcon::CheckCircle,

        // Computer use tools
        "move_to" | "click" | "scroll" | "typing" | "press" | "wait" | "mouse_down"
        | "mouse_up" | "drag_to" | "hotkey" => ToolIcon::Code,

        other => {
            let mut logged = LOGGED_UNKNOWN.lock().unwrap_or_else(|e| e.into_inner());
            if logged.insert(other.to_string()) {
                debug!(tool = name, "Using fallback icon for unknown tool");
            }
            ToolIcon::Wrench
        }
    }
}
