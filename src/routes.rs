//! Maps pages to URLs and to output file paths. The listing lives at the
//! site root, each article at `artigos/{slug}/`, static assets under
//! `static/` and the feed at `feed.atom`.

use std::path::PathBuf;
use url::{ParseError, Url};

/// The path segment article pages live under.
pub const ARTICLES_SEGMENT: &str = "artigos";
pub const STATIC_SEGMENT: &str = "static";
pub const FEED_FILE: &str = "feed.atom";
pub const INDEX_FILE: &str = "index.html";
pub const NOT_FOUND_FILE: &str = "404.html";

/// Resolves page URLs against the site root.
#[derive(Clone, Debug)]
pub struct Routes {
    root: Url,
}

impl Routes {
    /// `root` must end in a slash (see [`crate::config::with_trailing_slash`]).
    pub fn new(root: Url) -> Routes {
        Routes { root }
    }

    /// The URL of the article listing.
    pub fn home(&self) -> &Url {
        &self.root
    }

    /// The URL of an article's detail page.
    pub fn article(&self, slug: &str) -> Result<Url, ParseError> {
        self.root.join(&format!("{}/{}/", ARTICLES_SEGMENT, slug))
    }

    /// The base URL for static assets. Ends in a slash.
    pub fn static_url(&self) -> Result<Url, ParseError> {
        self.root.join(&format!("{}/", STATIC_SEGMENT))
    }

    pub fn feed(&self) -> Result<Url, ParseError> {
        self.root.join(FEED_FILE)
    }
}

/// The output file for an article's detail page, relative to the output
/// directory.
pub fn article_file(slug: &str) -> PathBuf {
    PathBuf::from(ARTICLES_SEGMENT).join(slug).join(INDEX_FILE)
}
