//! Human-readable labels for tool identifiers.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::canonical_tool_name;

static DISPLAY_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("execute_command", "Executing Command"),
        ("check_command_output", "Checking Command Output"),
        ("terminate_command", "Terminating Command"),
        ("list_commands", "Listing Commands"),
        ("create_file", "Creating File"),
        ("delete_file", "Deleting File"),
        ("full_file_rewrite", "Rewriting File"),
        ("str_replace", "Editing Text"),
        ("browser_click_element", "Clicking Element"),
        ("browser_close_tab", "Closing Tab"),
        ("browser_drag_drop", "Dragging Element"),
        ("browser_get_dropdown_options", "Getting Options"),
        ("browser_go_back", "Going Back"),
        ("browser_input_text", "Entering Text"),
        ("browser_navigate_to", "Navigating to Page"),
        ("browser_scroll_down", "Scrolling Down"),
        ("browser_scroll_to_text", "Scrolling to Text"),
        ("browser_scroll_up", "Scrolling Up"),
        ("browser_select_dropdown_option", "Selecting Option"),
        ("browser_click_coordinates", "Clicking Coordinates"),
        ("browser_send_keys", "Pressing Keys"),
        ("browser_switch_tab", "Switching Tab"),
        ("browser_wait", "Waiting"),
        ("execute_data_provider_call", "Calling data provider"),
        ("get_data_provider_endpoints", "Getting endpoints"),
        ("deploy", "Deploying"),
        ("ask", "Ask"),
        ("complete", "Completing Task"),
        ("crawl_webpage", "Crawling Website"),
        ("expose_port", "Exposing Port"),
        ("scrape_webpage", "Scraping Website"),
        ("web_search", "Searching Web"),
        ("see_image", "Viewing Image"),
    ])
});

/// Map a tool identifier to its display label.
///
/// Unknown identifiers come back unchanged; no beautification is attempted.
pub fn display_name(name: &str) -> String {
    DISPLAY_NAMES
        .get(canonical_tool_name(name).as_str())
        .map(|label| (*label).to_string())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(display_name("execute-command"), "Executing Command");
        assert_eq!(display_name("execute_command"), "Executing Command");
        assert_eq!(display_name("browser-navigate-to"), "Navigating to Page");
        assert_eq!(display_name("complete"), "Completing Task");
    }

    #[test]
    fn test_unknown_name_passthrough() {
        assert_eq!(display_name("my-custom-tool"), "my-custom-tool");
        assert_eq!(display_name(""), "");
    }
}
