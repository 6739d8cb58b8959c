use std::collections::{HashMap, HashSet};

/// Render a lesson body to sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "h1", "h2", "h3", "h4", "p", "br", "hr", "em", "strong", "del", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "table", "thead", "tbody", "tr", "th", "td", "input",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("code", ["class"].into_iter().collect());
    attributes.insert("input", ["type", "checked", "disabled"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// First heading of a body, used as a fallback title.
#[must_use]
pub fn first_heading(input: &str) -> Option<&str> {
    input
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{first_heading, markdown_to_html};

    #[test]
    fn markdown_to_html_sanitizes_links() {
        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn raw_script_is_dropped() {
        let html = markdown_to_html("hi <script>alert(1)</script>");
        assert!(!html.contains("<script"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn code_blocks_keep_language_class() {
        let html = markdown_to_html("```go\nfunc main() {}\n```");
        assert!(html.contains("<pre><code class=\"language-go\">"));
    }

    #[test]
    fn headings_survive() {
        let html = markdown_to_html("# Title\n\nBody");
        assert!(html.contains("<h1>Title</h1>"));
        assert_eq!(first_heading("intro\n# Title \n## sub"), Some("Title"));
        assert_eq!(first_heading("no heading"), None);
    }
}
