//! Best-effort extractors over raw HTML.
//!
//! These run on unparsed HTML with regexes rather than a DOM. That is
//! deliberate: marketing sites are wildly inconsistent, every extractor has
//! a fallback, and a miss costs a default value rather than an error.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Fallback brand colors when nothing usable is found in the HTML.
const DEFAULT_PRIMARY: &str = "#2c5aa0";
const DEFAULT_SECONDARY: &str = "#f0a030";

/// Brand colors guessed from a site's HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteColors {
    pub primary: String,
    pub secondary: String,
}

/// Page metadata pulled from the head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
}

/// Find the most plausible logo URL, resolved against the page URL.
///
/// Candidates in priority order: an image inside `<header>`, any image whose
/// tag mentions "logo", an icon `<link>`, and finally `og:image`.
pub fn extract_logo(html: &str, base: &Url) -> Option<String> {
    let header_img = Regex::new(r#"(?si)<header[^>]*>.*?<img[^>]*\ssrc=["']([^"']+)["']"#)
        .expect("header image pattern is valid");
    let logo_img = Regex::new(r#"(?i)<img[^>]*logo[^>]*>"#).expect("logo image pattern is valid");
    let img_src = Regex::new(r#"(?i)\ssrc=["']([^"']+)["']"#).expect("src pattern is valid");
    let icon_link = Regex::new(
        r#"(?i)<link[^>]*rel=["'][^"']*icon[^"']*["'][^>]*href=["']([^"']+)["']"#,
    )
    .expect("icon link pattern is valid");
    let og_image = Regex::new(
        r#"(?i)<meta[^>]*property=["']og:image["'][^>]*content=["']([^"']+)["']"#,
    )
    .expect("og:image pattern is valid");

    let candidate = header_img
        .captures(html)
        .map(|caps| caps[1].to_string())
        .or_else(|| {
            logo_img
                .find(html)
                .and_then(|tag| img_src.captures(tag.as_str()).map(|caps| caps[1].to_string()))
        })
        .or_else(|| icon_link.captures(html).map(|caps| caps[1].to_string()))
        .or_else(|| og_image.captures(html).map(|caps| caps[1].to_string()))?;

    base.join(&candidate).ok().map(|resolved| resolved.to_string())
}

/// Guess primary and secondary brand colors.
///
/// CSS custom properties named like `--primary-color` / `--secondary-color`
/// win outright; otherwise the two most frequent non-grayscale hex literals
/// in the HTML are used, and fixed defaults are the floor.
pub fn extract_colors(html: &str) -> SiteColors {
    let custom_prop = |name: &str| -> Option<String> {
        let pattern = format!(
            r#"(?i)--{name}(?:-color)?\s*:\s*(#[0-9a-f]{{3,8}}|rgba?\([^)]*\))"#
        );
        Regex::new(&pattern)
            .expect("custom property pattern is valid")
            .captures(html)
            .map(|caps| caps[1].to_lowercase())
    };

    let declared_primary = custom_prop("primary");
    let declared_secondary = custom_prop("secondary");

    let mut by_frequency = frequent_colors(html);
    let primary = declared_primary
        .or_else(|| {
            if by_frequency.is_empty() {
                None
            } else {
                Some(by_frequency.remove(0))
            }
        })
        .unwrap_or_else(|| DEFAULT_PRIMARY.to_string());

    let secondary = declared_secondary
        .or_else(|| by_frequency.into_iter().find(|color| *color != primary))
        .unwrap_or_else(|| DEFAULT_SECONDARY.to_string());

    SiteColors { primary, secondary }
}

/// Hex colors in the HTML ordered by frequency, grayscale excluded.
fn frequent_colors(html: &str) -> Vec<String> {
    let hex = Regex::new(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("hex pattern is valid");
    let mut counts: HashMap<String, usize> = HashMap::new();

    for caps in hex.captures_iter(html) {
        let color = format!("#{}", caps[1].to_lowercase());
        if is_grayscale(&color) {
            continue;
        }
        *counts.entry(color).or_insert(0) += 1;
    }

    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ordered.into_iter().map(|(color, _)| color).collect()
}

/// Whether a hex color is (near-)grayscale: whites, blacks, and grays are
/// layout colors, not brand colors.
fn is_grayscale(hex: &str) -> bool {
    let digits = &hex[1..];
    let (r, g, b) = match digits.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1].repeat(2), 16);
            match (channel(0), channel(1), channel(2)) {
                (Ok(r), Ok(g), Ok(b)) => (r, g, b),
                _ => return false,
            }
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
            match (channel(0), channel(2), channel(4)) {
                (Ok(r), Ok(g), Ok(b)) => (r, g, b),
                _ => return false,
            }
        }
        _ => return false,
    };

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    max - min < 16
}

/// Extract the page's visible text.
///
/// Strips script/style/nav/footer blocks, then prefers the first matching
/// content container (`<main>`, `<article>`, an element marked "content")
/// over the whole document, and converts the winner to plain text.
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let strip = Regex::new(
        r"(?si)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>|<nav[^>]*>.*?</nav>|<footer[^>]*>.*?</footer>",
    )
    .expect("strip pattern is valid");
    let cleaned = strip.replace_all(html, " ");

    let containers = [
        r"(?si)<main[^>]*>(.*?)</main>",
        r"(?si)<article[^>]*>(.*?)</article>",
        r#"(?si)<(?:div|section)[^>]*(?:id|class)=["'][^"']*content[^"']*["'][^>]*>(.*?)</(?:div|section)>"#,
    ];

    let fragment = containers
        .iter()
        .find_map(|pattern| {
            Regex::new(pattern)
                .expect("container pattern is valid")
                .captures(&cleaned)
                .map(|caps| caps[1].to_string())
        })
        .unwrap_or_else(|| cleaned.to_string());

    let text = html2text::from_read(fragment.as_bytes(), 80)
        .unwrap_or_default()
        .trim()
        .to_string();

    truncate_utf8(&text, max_chars)
}

/// Pull title/description metadata from the head.
pub fn extract_metadata(html: &str) -> SiteMetadata {
    let title = Regex::new(r"(?si)<title[^>]*>(.*?)</title>")
        .expect("title pattern is valid")
        .captures(html)
        .map(|caps| caps[1].trim().to_string());

    let meta = |attr: &str, name: &str| -> Option<String> {
        let pattern = format!(
            r#"(?i)<meta[^>]*{attr}=["']{name}["'][^>]*content=["']([^"']*)["']"#
        );
        Regex::new(&pattern)
            .expect("meta pattern is valid")
            .captures(html)
            .map(|caps| caps[1].trim().to_string())
    };

    SiteMetadata {
        title,
        description: meta("name", "description"),
        og_title: meta("property", "og:title"),
        og_description: meta("property", "og:description"),
    }
}

/// Truncate to a byte budget without splitting a UTF-8 character.
pub(crate) fn truncate_utf8(input: &str, max_bytes: usize) -> String {
    if input.len() <= max_bytes {
        return input.to_string();
    }
    if max_bytes == 0 {
        return String::new();
    }

    let mut idx = max_bytes.min(input.len());
    while idx > 0 && !input.is_char_boundary(idx) {
        idx -= 1;
    }

    input[..idx].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_logo_prefers_header_image() {
        let html = r#"
            <header><a href="/"><img src="/img/brand.png" alt="home"></a></header>
            <img src="/img/logo-footer.png" class="logo">
        "#;
        assert_eq!(
            extract_logo(html, &base()),
            Some("https://example.com/img/brand.png".to_string())
        );
    }

    #[test]
    fn test_logo_falls_back_to_logo_named_image() {
        let html = r#"<div><img class="site-logo" src="assets/logo.svg"></div>"#;
        assert_eq!(
            extract_logo(html, &base()),
            Some("https://example.com/assets/logo.svg".to_string())
        );
    }

    #[test]
    fn test_logo_falls_back_to_favicon_then_og_image() {
        let favicon = r#"<link rel="shortcut icon" href="/favicon.ico">"#;
        assert_eq!(
            extract_logo(favicon, &base()),
            Some("https://example.com/favicon.ico".to_string())
        );

        let og = r#"<meta property="og:image" content="https://cdn.example.com/card.png">"#;
        assert_eq!(
            extract_logo(og, &base()),
            Some("https://cdn.example.com/card.png".to_string())
        );
    }

    #[test]
    fn test_logo_none_when_nothing_matches() {
        assert_eq!(extract_logo("<p>no images here</p>", &base()), None);
    }

    #[test]
    fn test_colors_prefer_custom_properties() {
        let html = r#"<style>:root { --primary-color: #1A6B3C; --secondary: #f4a300; }</style>"#;
        let colors = extract_colors(html);
        assert_eq!(colors.primary, "#1a6b3c");
        assert_eq!(colors.secondary, "#f4a300");
    }

    #[test]
    fn test_colors_by_frequency_skip_grayscale() {
        let html = r#"
            <style>
              .a { color: #ffffff; } .b { color: #336699; } .c { background: #336699; }
              .d { color: #000; } .e { border-color: #cc2200; }
            </style>
        "#;
        let colors = extract_colors(html);
        assert_eq!(colors.primary, "#336699");
        assert_eq!(colors.secondary, "#cc2200");
    }

    #[test]
    fn test_colors_default_when_html_is_bare() {
        let colors = extract_colors("<p>plain page</p>");
        assert_eq!(colors.primary, DEFAULT_PRIMARY);
        assert_eq!(colors.secondary, DEFAULT_SECONDARY);
    }

    #[test]
    fn test_text_prefers_main_and_strips_chrome() {
        let html = r#"
            <nav>Home | About | Contact</nav>
            <main><h1>Pest control you can trust</h1><p>Family owned since 2004.</p></main>
            <footer>Copyright 2025</footer>
            <script>analytics();</script>
        "#;
        let text = extract_text(html, 15_000);
        assert!(text.contains("Pest control you can trust"));
        assert!(text.contains("Family owned since 2004."));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("analytics"));
    }

    #[test]
    fn test_text_truncates_to_budget() {
        let html = format!("<main><p>{}</p></main>", "word ".repeat(10_000));
        let text = extract_text(&html, 100);
        assert!(text.len() <= 100);
    }

    #[test]
    fn test_metadata_fields() {
        let html = r#"
            <head>
              <title> Desert Shield Pest Control </title>
              <meta name="description" content="Phoenix pest control since 2004">
              <meta property="og:title" content="Desert Shield">
              <meta property="og:description" content="Scorpion specialists">
            </head>
        "#;
        let metadata = extract_metadata(html);
        assert_eq!(metadata.title.as_deref(), Some("Desert Shield Pest Control"));
        assert_eq!(
            metadata.description.as_deref(),
            Some("Phoenix pest control since 2004")
        );
        assert_eq!(metadata.og_title.as_deref(), Some("Desert Shield"));
        assert_eq!(metadata.og_description.as_deref(), Some("Scorpion specialists"));
    }

    #[test]
    fn test_truncate_utf8_respects_char_boundary() {
        let input = "héllo wörld";
        let truncated = truncate_utf8(input, 2);
        assert_eq!(truncated, "h");
    }
}
