//! HTML to plain text.
//!
//! Markup goes through `scraper`'s HTML5 parser, so entities, stray brackets
//! and broken tags resolve the way a browser resolves them. Text runs are
//! joined without separators, like a DOM `textContent` read. The bodies of
//! `script` and `style` elements are dropped.

use scraper::{Html, Node};

const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

pub fn extract_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());

    for node in fragment.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            out.push_str(text);
        }
    }

    out
}
