use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::error::Result;

// Create a static client to reuse connections
pub(crate) static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

/// Content regions tried in order; the first with visible text wins.
const CONTENT_SELECTORS: &[&str] = &[
    ".article-body",
    ".gh-content",
    ".entry-content",
    ".post-content",
    ".content",
    "article",
    "main",
];

static CONTENT_REGIONS: Lazy<Vec<Selector>> = Lazy::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse content selector"))
        .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub body_excerpt: Option<String>,
}

impl ExtractedContent {
    /// Stand-in used when the post itself could not be fetched.
    pub fn url_only(url: &str) -> Self {
        ExtractedContent {
            title: Some(url.to_string()),
            body_excerpt: None,
        }
    }
}

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

pub fn extract_content(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let body_excerpt = CONTENT_REGIONS.iter().zip(CONTENT_SELECTORS).find_map(|(selector, name)| {
        let text = document.select(selector).next().map(visible_text)?;
        if text.is_empty() {
            return None;
        }
        ::log::debug!("Content region {:?} matched ({} chars)", name, text.chars().count());
        Some(text)
    });

    ExtractedContent { title, body_excerpt }
}

/// Text nodes under `element`, skipping script/style, concatenated as-is and
/// then whitespace-collapsed.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut chunks: Vec<&str> = Vec::new();
    for node in element.descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
            });
            if !hidden {
                chunks.push(text);
            }
        }
    }
    collapse_whitespace(&chunks.concat())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_first_matching_region() {
        let html = r#"<html><head><title>
            A Post Title
        </title></head><body>
            <nav>Home About</nav>
            <main>fallback main</main>
            <section class="gh-content">
                <p>First   paragraph.</p>
                <p>Second <em>one</em>.</p>
            </section>
        </body></html>"#;
        let content = extract_content(html);
        assert_eq!(content.title.as_deref(), Some("A Post Title"));
        assert_eq!(
            content.body_excerpt.as_deref(),
            Some("First paragraph. Second one.")
        );
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let content =
            extract_content("<article><p>H<sub>2</sub>O is <a href=x>link</a>s, ok.</p></article>");
        assert_eq!(content.body_excerpt.as_deref(), Some("H2O is links, ok."));
    }

    #[test]
    fn title_whitespace_is_collapsed() {
        let content = extract_content("<title>Foo\n\n   Bar</title><main>body</main>");
        assert_eq!(content.title.as_deref(), Some("Foo Bar"));
    }

    #[test]
    fn empty_region_falls_through_to_next_selector() {
        let html = r#"<html><body>
            <div class="entry-content">   </div>
            <article><p>Article text</p></article>
        </body></html>"#;
        let content = extract_content(html);
        assert_eq!(content.body_excerpt.as_deref(), Some("Article text"));
    }

    #[test]
    fn scripts_are_not_visible_text() {
        let html = r#"<html><body><article>
            <script>var x = 1;</script><style>p{}</style><p>Kept</p>
        </article></body></html>"#;
        let content = extract_content(html);
        assert_eq!(content.body_excerpt.as_deref(), Some("Kept"));
    }

    #[test]
    fn missing_title_and_regions_yield_nothing() {
        let content = extract_content("<html><body><div>loose text</div></body></html>");
        assert_eq!(content, ExtractedContent::default());
    }

    #[test]
    fn url_only_uses_url_as_title() {
        let content = ExtractedContent::url_only("https://x.io/a");
        assert_eq!(content.title.as_deref(), Some("https://x.io/a"));
        assert!(content.body_excerpt.is_none());
    }

    #[test]
    fn collapse_whitespace_handles_newlines_and_tabs() {
        assert_eq!(collapse_whitespace("  a\n\n b\t\tc  "), "a b c");
    }
}
