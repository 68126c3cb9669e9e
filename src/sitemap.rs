//! Sitemap parsing and sitemap index expansion.
//!
//! A document is classified by its root element: `<urlset>` lists pages,
//! `<sitemapindex>` lists child sitemaps which are loaded and expanded in
//! document order. Anything else is valid but carries no URLs.

use futures::future::{BoxFuture, FutureExt};
use quick_xml::{events::Event, Reader};
use tracing::{debug, error, instrument};

use crate::{
    errors::{Error, ParseError},
    loader::{location_key, Loader},
};

/// Nested sitemap indexes deeper than this are not expanded.
pub const MAX_INDEX_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Page URLs of a `<urlset>`.
    UrlSet(Vec<String>),
    /// Child sitemap locations of a `<sitemapindex>`.
    Index(Vec<String>),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    Index,
    Other,
}

impl Root {
    fn from_name(name: &[u8]) -> Self {
        match name {
            b"urlset" => Root::UrlSet,
            b"sitemapindex" => Root::Index,
            _ => Root::Other,
        }
    }

    fn entry_name(self) -> Option<&'static [u8]> {
        match self {
            Root::UrlSet => Some(b"url".as_slice()),
            Root::Index => Some(b"sitemap".as_slice()),
            Root::Other => None,
        }
    }
}

/// Classify `xml` and collect the `<loc>` of every entry directly under the root.
#[instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_document(xml: &str) -> Result<SitemapDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Root> = None;
    let mut depth = 0usize;
    let mut in_entry = false;
    // `Some` while inside the `<loc>` of the current entry
    let mut loc_text: Option<String> = None;
    let mut entry_loc: Option<String> = None;
    let mut locs = vec![];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name();
                let name: &[u8] = local.as_ref();
                match depth {
                    0 if root.is_some() => {
                        return Err(ParseError::Malformed("multiple root elements"))
                    }
                    0 => root = Some(Root::from_name(name)),
                    1 => {
                        in_entry = root.and_then(Root::entry_name) == Some(name);
                        entry_loc = None;
                    }
                    2 if in_entry && name == b"loc" => loc_text = Some(String::new()),
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(ParseError::Malformed("multiple root elements"));
                    }
                    root = Some(Root::from_name(e.local_name().as_ref()));
                }
            }
            Event::End(_) => {
                match depth {
                    0 => return Err(ParseError::Malformed("unmatched end tag")),
                    3 => {
                        if let Some(text) = loc_text.take() {
                            entry_loc.get_or_insert(text.trim().to_owned());
                        }
                    }
                    2 if in_entry => {
                        match entry_loc.take() {
                            Some(loc) if !loc.is_empty() => locs.push(loc),
                            _ => debug!("skip sitemap entry without loc"),
                        }
                        in_entry = false;
                    }
                    _ => {}
                }
                depth -= 1;
            }
            Event::Text(e) => {
                if depth == 0 {
                    return Err(ParseError::Malformed("text outside root element"));
                }
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if depth == 0 {
                    return Err(ParseError::Malformed("text outside root element"));
                }
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::Malformed("unclosed element"));
    }

    let document = match root {
        None => return Err(ParseError::Malformed("no root element")),
        Some(Root::UrlSet) => SitemapDocument::UrlSet(locs),
        Some(Root::Index) => SitemapDocument::Index(locs),
        Some(Root::Other) => SitemapDocument::Other,
    };
    Ok(document)
}

/// Extract page URLs from `xml`, expanding sitemap indexes through `loader`.
///
/// Only a malformed top-level document is an error. A child sitemap that fails
/// to load or parse is logged and contributes no URLs.
pub async fn extract_urls(loader: &Loader, xml: &str) -> Result<Vec<String>, ParseError> {
    let document = parse_document(xml)?;
    Ok(expand(loader, document, &mut vec![]).await)
}

/// Same as [`extract_urls`], `location` being where `xml` was loaded from so an
/// index listing itself is recognised as a cycle.
pub async fn extract_urls_at(
    loader: &Loader,
    location: &str,
    xml: &str,
) -> Result<Vec<String>, ParseError> {
    let document = parse_document(xml)?;
    Ok(expand(loader, document, &mut vec![location_key(location).await]).await)
}

#[derive(Debug, thiserror::Error)]
enum ChildError {
    #[error(transparent)]
    Load(#[from] Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("sitemap index cycle")]
    Cycle,
    #[error("sitemap index nested deeper than {MAX_INDEX_DEPTH}")]
    TooDeep,
}

// `trail` holds the `location_key` of the indexes currently being expanded
fn expand<'a>(
    loader: &'a Loader,
    document: SitemapDocument,
    trail: &'a mut Vec<String>,
) -> BoxFuture<'a, Vec<String>> {
    async move {
        let children = match document {
            SitemapDocument::UrlSet(urls) => return urls,
            SitemapDocument::Other => return vec![],
            SitemapDocument::Index(children) => children,
        };

        let mut urls = vec![];
        for child in children {
            match expand_child(loader, &child, trail).await {
                Ok(child_urls) => urls.extend(child_urls),
                Err(err) => error!(?err, child = %child, "Error processing child sitemap"),
            }
        }
        urls
    }
    .boxed()
}

async fn expand_child(
    loader: &Loader,
    location: &str,
    trail: &mut Vec<String>,
) -> Result<Vec<String>, ChildError> {
    let key = location_key(location).await;
    if trail.contains(&key) {
        return Err(ChildError::Cycle);
    }
    if trail.len() >= MAX_INDEX_DEPTH {
        return Err(ChildError::TooDeep);
    }

    debug!("Fetching child sitemap: {location}");
    let content = loader.load(location).await?;
    let document = parse_document(&content)?;

    trail.push(key);
    let urls = expand(loader, document, trail).await;
    trail.pop();
    Ok(urls)
}
