use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Extract the readable text of the first element matching
/// `content_selector`, skipping `script` and `style` subtrees. `None` when
/// the selector misses.
pub fn extract_block_text(html: &str, content_selector: &str) -> Option<String> {
    let selector = Selector::parse(content_selector).ok()?;
    let document = Html::parse_document(html);
    let block = document.select(&selector).next()?;

    let mut pieces = Vec::new();
    collect_text(block, &mut pieces);

    let joined = pieces.join(" ");
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn collect_text(element: ElementRef, out: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push(text.text.to_string()),
            Node::Element(el) => {
                if el.name() == "script" || el.name() == "style" {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Truncate to a character budget (characters, not bytes, so multi-byte
/// text never splits a code point).
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Up to `limit` post links matched by `link_selector`, resolved against
/// the index URL.
pub fn extract_post_links(html: &str, link_selector: &str, index_url: &str, limit: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse(link_selector) else {
        return Vec::new();
    };
    let base = Url::parse(index_url).ok();
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let resolved = if href.starts_with("http") {
            href.to_string()
        } else if let Some(base) = &base {
            match base.join(href) {
                Ok(url) => url.to_string(),
                Err(_) => continue,
            }
        } else {
            continue;
        };
        links.push(resolved);
    }

    links
}

/// Derive a human-readable title from a post URL slug:
/// `.../why-vdrs-matter/` becomes `Why Vdrs Matter`.
pub fn title_from_slug(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string());

    let slug = path
        .split('/')
        .filter(|seg| !seg.is_empty())
        .next_back()
        .unwrap_or("")
        .to_string();

    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_block_text_skips_script_and_style() {
        let html = r#"
            <html><body>
              <div class="post-content">
                <p>Virtual data rooms speed up diligence.</p>
                <script>tracker("nope");</script>
                <style>.post { color: red; }</style>
                <p>Access controls matter.</p>
              </div>
            </body></html>
        "#;
        let text = extract_block_text(html, "div.post-content").unwrap();
        assert_eq!(
            text,
            "Virtual data rooms speed up diligence. Access controls matter."
        );
    }

    #[test]
    fn test_extract_block_text_selector_miss() {
        assert!(extract_block_text("<html><body><p>x</p></body></html>", "div.post-content").is_none());
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // é is two bytes; a byte-based cut at 3 would panic or split it.
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }

    #[test]
    fn test_extract_post_links_resolves_and_limits() {
        let html = r#"
            <html><body>
              <a class="uael-post__read-more" href="/blog/why-vdrs-matter/">Read more</a>
              <a class="uael-post__read-more" href="https://www.dealsignal.io/blog/closing-faster/">Read more</a>
              <a class="uael-post__read-more" href="/blog/third-post/">Read more</a>
            </body></html>
        "#;
        let links = extract_post_links(
            html,
            "a.uael-post__read-more",
            "https://www.dealsignal.io/blog/",
            2,
        );
        assert_eq!(
            links,
            vec![
                "https://www.dealsignal.io/blog/why-vdrs-matter/",
                "https://www.dealsignal.io/blog/closing-faster/",
            ]
        );
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(
            title_from_slug("https://www.dealsignal.io/blog/why-vdrs-matter/"),
            "Why Vdrs Matter"
        );
        assert_eq!(
            title_from_slug("https://www.dealsignal.io/blog/closing-faster"),
            "Closing Faster"
        );
        assert_eq!(title_from_slug("https://www.dealsignal.io/"), "");
    }
}
