//! Best-effort primary-parameter extraction from raw tool-call payloads.
//!
//! Payloads are opaque serialized blobs (XML-attribute-shaped text or JSON)
//! produced by the agent backend. Extraction is purely heuristic: rules are
//! tried in a strict precedence order and any rule that finds nothing yields
//! `None`. A malformed payload is never an error, only an absent summary.

use std::sync::LazyLock;

use regex::Regex;

use crate::{canonical_tool_name, is_browser_tool};

/// Summaries longer than this are truncated with a trailing ellipsis.
const MAX_SUMMARY_LEN: usize = 30;

static ATTR_URL: LazyLock<Regex> = LazyLock::new(|| attr_regex("url"));
static ATTR_GOAL: LazyLock<Regex> = LazyLock::new(|| attr_regex("goal"));
static ATTR_FILE_PATH: LazyLock<Regex> = LazyLock::new(|| attr_regex("file_path"));
static ATTR_COMMAND: LazyLock<Regex> = LazyLock::new(|| attr_regex("command"));
static ATTR_QUERY: LazyLock<Regex> = LazyLock::new(|| attr_regex("query"));
static ATTR_SERVICE_NAME: LazyLock<Regex> = LazyLock::new(|| attr_regex("service_name"));
static ATTR_ROUTE: LazyLock<Regex> = LazyLock::new(|| attr_regex("route"));
static ATTR_SITE_NAME: LazyLock<Regex> = LazyLock::new(|| attr_regex("site_name"));

/// `command=` or its `cmd=` shorthand, as emitted inside XML tags.
static ATTR_COMMAND_OR_CMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:command|cmd)=["']([^"']+)["']"#).expect("valid attribute regex")
});

/// Attribute block of the first XML tag: `<name attr="..." ...>`.
static XML_ATTR_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+\s+([^>]+)>").expect("valid tag regex"));

fn attr_regex(attr: &str) -> Regex {
    Regex::new(&format!(r#"{attr}=["']([^"']+)["']"#)).expect("valid attribute regex")
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Truncate a summary to 30 characters (27 plus ellipsis).
fn truncate_summary(value: &str) -> String {
    if value.chars().count() > MAX_SUMMARY_LEN {
        let head: String = value.chars().take(MAX_SUMMARY_LEN - 3).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}

/// Final path segment of a file path.
fn basename(path: &str) -> String {
    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// Extract a short human-oriented summary of a tool call's primary parameter.
///
/// Precedence:
/// 1. Browser-family tools: `url=` attribute, then truncated `goal=`.
/// 2. XML-shaped payloads: `file_path` (final segment) from the first tag's
///    attributes; for `execute-command` also `command`/`cmd`, truncated.
/// 3. Per-tool rule table keyed on the canonical identifier.
/// 4. `None`.
pub fn extract_primary_param(name: &str, payload: &str) -> Option<String> {
    if payload.is_empty() {
        return None;
    }

    if is_browser_tool(name) {
        if let Some(url) = capture(&ATTR_URL, payload) {
            return Some(url);
        }
        if let Some(goal) = capture(&ATTR_GOAL, payload) {
            return Some(truncate_summary(&goal));
        }
        return None;
    }

    let canonical = canonical_tool_name(name).to_ascii_lowercase();

    // XML-shaped payloads carry their parameters as tag attributes
    if payload.starts_with('<') && payload.contains('>') {
        if let Some(attrs) = XML_ATTR_BLOCK
            .captures(payload)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
        {
            if let Some(path) = capture(&ATTR_FILE_PATH, &attrs) {
                return Some(basename(&path));
            }
            if canonical == "execute_command" {
                if let Some(cmd) = capture(&ATTR_COMMAND_OR_CMD, &attrs) {
                    return Some(truncate_summary(&cmd));
                }
            }
        }
    }

    match canonical.as_str() {
        // File operations
        "create_file" | "full_file_rewrite" | "read_file" | "delete_file" | "str_replace" => {
            capture(&ATTR_FILE_PATH, payload).map(|p| basename(&p))
        }

        // Shell commands
        "execute_command" => capture(&ATTR_COMMAND, payload).map(|c| truncate_summary(&c)),

        // Web search
        "web_search" => capture(&ATTR_QUERY, payload).map(|q| truncate_summary(&q)),

        // Data provider operations
        "call_data_provider" => {
            let service = capture(&ATTR_SERVICE_NAME, payload)?;
            match capture(&ATTR_ROUTE, payload) {
                Some(route) => Some(format!("{service}/{route}")),
                None => Some(service),
            }
        }

        // Deployment
        "deploy_site" => capture(&ATTR_SITE_NAME, payload),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_url_first() {
        let payload = r#"<browser-navigate-to url="https://example.com" goal="check the docs">"#;
        assert_eq!(
            extract_primary_param("browser-navigate-to", payload),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_browser_goal_truncated() {
        let payload = r#"goal="click the big blue submit button at the bottom of the page""#;
        let summary = extract_primary_param("browser-click-element", payload).unwrap();
        assert!(summary.chars().count() <= 30);
        assert!(summary.ends_with("..."));
        assert!(summary.starts_with("click the big blue"));
    }

    #[test]
    fn test_browser_no_match() {
        assert_eq!(
            extract_primary_param("browser-wait", r#"seconds="3""#),
            None
        );
    }

    #[test]
    fn test_xml_file_path_final_segment() {
        assert_eq!(
            extract_primary_param("create-file", r#"<create-file file_path="/a/b/c.txt">"#),
            Some("c.txt".to_string())
        );
    }

    #[test]
    fn test_xml_execute_command_cmd_shorthand() {
        assert_eq!(
            extract_primary_param("execute-command", r#"<execute-command cmd="ls -la">"#),
            Some("ls -la".to_string())
        );
    }

    #[test]
    fn test_command_truncation() {
        let payload = r#"command="ls -la /very/long/path/exceeding/thirty/chars""#;
        let summary = extract_primary_param("execute-command", payload).unwrap();
        assert!(summary.chars().count() <= 30);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_underscore_form_resolves_identically() {
        let payload = r#"command="echo hi""#;
        assert_eq!(
            extract_primary_param("execute_command", payload),
            extract_primary_param("execute-command", payload),
        );
    }

    #[test]
    fn test_web_search_query() {
        assert_eq!(
            extract_primary_param("web-search", r#"query="rust lifetimes""#),
            Some("rust lifetimes".to_string())
        );
    }

    #[test]
    fn test_data_provider_service_and_route() {
        let payload = r#"service_name="linkedin" route="profile""#;
        assert_eq!(
            extract_primary_param("call-data-provider", payload),
            Some("linkedin/profile".to_string())
        );
        assert_eq!(
            extract_primary_param("call-data-provider", r#"service_name="linkedin""#),
            Some("linkedin".to_string())
        );
    }

    #[test]
    fn test_deploy_site_name() {
        assert_eq!(
            extract_primary_param("deploy-site", r#"site_name="my-site""#),
            Some("my-site".to_string())
        );
    }

    #[test]
    fn test_malformed_payload_yields_none() {
        assert_eq!(extract_primary_param("create-file", "<<<>>>"), None);
        assert_eq!(extract_primary_param("create-file", "{broken json"), None);
        assert_eq!(extract_primary_param("create-file", ""), None);
    }

    #[test]
    fn test_unknown_tool_yields_none() {
        assert_eq!(
            extract_primary_param("mystery-tool", r#"anything="here""#),
            None
        );
    }

    #[test]
    fn test_basename_edge_cases() {
        assert_eq!(basename("plain.txt"), "plain.txt");
        assert_eq!(basename("/a/b/c.txt"), "c.txt");
        assert_eq!(basename("trailing/"), "trailing/");
    }
}
