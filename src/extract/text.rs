// src/extract/text.rs
// =============================================================================
// Pulls the readable text out of an HTML page.
//
// Boilerplate subtrees (scripts, styles, navigation, header/footer, sidebars)
// are skipped entirely. What remains is split into lines, each line trimmed,
// blank lines dropped, and the rest joined with '\n'.
// =============================================================================

use scraper::{Html, Node};

// Elements whose whole subtree is never visible page content
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript",
];

pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| SKIPPED_TAGS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        lines.extend(text.lines().map(str::trim).filter(|line| !line.is_empty()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_boilerplate() {
        let html = r#"
            <html>
              <head><title>Research Computing</title><style>p { color: red; }</style></head>
              <body>
                <header>Site banner</header>
                <nav><a href="/">Home</a></nav>
                <main>
                  <h1>Shared Computing Cluster</h1>
                  <p>Request an account.</p>
                </main>
                <aside>Related links</aside>
                <script>var x = 1;</script>
                <noscript>Enable JavaScript</noscript>
                <footer>Copyright</footer>
              </body>
            </html>
        "#;
        let text = extract_visible_text(html);
        assert_eq!(
            text,
            "Research Computing\nShared Computing Cluster\nRequest an account."
        );
    }

    #[test]
    fn test_collapses_blank_lines() {
        let html = "<p>  first  </p>\n\n\n<p>\n\n   second\n\n</p>";
        assert_eq!(extract_visible_text(html), "first\nsecond");
    }

    #[test]
    fn test_keeps_non_ascii() {
        let html = "<p>Génomique — 基因组</p>";
        assert_eq!(extract_visible_text(html), "Génomique — 基因组");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_visible_text(""), "");
    }
}
