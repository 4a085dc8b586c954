//! HTML extractor for quote pages
//!
//! This module turns a page body into quote records:
//! - every `.quote` element becomes one [`Quote`], in document order
//! - the presence of a `.next` element becomes the `has_next` hint

use scraper::{ElementRef, Html, Selector};

/// Selector for one quote block
const QUOTE_SELECTOR: &str = ".quote";

/// Selector for the quote text inside a block
const TEXT_SELECTOR: &str = ".text";

/// Selector for the author name inside a block
const AUTHOR_SELECTOR: &str = ".author";

/// Selector for the pager's "next page" item
const NEXT_SELECTOR: &str = ".next";

/// A single quote/author record
///
/// Fields keep whatever whitespace the document had; nothing is trimmed.
/// There are no setters, so a quote never changes after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    text: String,
    author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Extracted information from a quote page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedPage {
    /// Quotes in document order
    pub quotes: Vec<Quote>,

    /// True if the page advertises a link to a following page
    pub has_next: bool,
}

/// Parses a page body and extracts its quotes
///
/// # Extraction Rules
///
/// - Each element matching `.quote` yields one quote
/// - `text` is the text content of the block's `.text` descendants
/// - `author` is the text content of the block's `.author` descendants
/// - A missing descendant yields an empty field rather than dropping the quote
/// - `has_next` is true when at least one `.next` element exists
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// * `Ok(ScrapedPage)` - Quotes and the next-page hint
/// * `Err(String)` - A selector could not be compiled
///
/// # Example
///
/// ```
/// use quote_scraper::crawler::extract_quotes;
///
/// let html = r#"<div class="quote"><span class="text">Hi</span><small class="author">Me</small></div>"#;
/// let page = extract_quotes(html).unwrap();
/// assert_eq!(page.quotes[0].text(), "Hi");
/// assert!(!page.has_next);
/// ```
pub fn extract_quotes(html: &str) -> Result<ScrapedPage, String> {
    let document = Html::parse_document(html);

    let quote_selector = compile(QUOTE_SELECTOR)?;
    let text_selector = compile(TEXT_SELECTOR)?;
    let author_selector = compile(AUTHOR_SELECTOR)?;
    let next_selector = compile(NEXT_SELECTOR)?;

    let quotes = document
        .select(&quote_selector)
        .map(|block| {
            Quote::new(
                text_of(block, &text_selector),
                text_of(block, &author_selector),
            )
        })
        .collect();

    let has_next = document.select(&next_selector).next().is_some();

    Ok(ScrapedPage { quotes, has_next })
}

fn compile(selector: &str) -> Result<Selector, String> {
    Selector::parse(selector).map_err(|e| format!("invalid selector '{}': {:?}", selector, e))
}

/// Concatenated text of every descendant of `block` matching `selector`
fn text_of(block: ElementRef<'_>, selector: &Selector) -> String {
    block
        .select(selector)
        .flat_map(|element| element.text())
        .collect()
}
