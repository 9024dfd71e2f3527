//! Defines the [`Article`] and [`Articles`] types and the logic for loading
//! the article collection from its static JSON source. The collection is
//! read-only once loaded: [`Articles::list_articles`] and
//! [`Articles::find_article_by_slug`] are the only ways to read it.

use serde::Deserialize;
use serde_json::Number;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single article as stored in the data file. The field names accept the
/// Portuguese keys of the article data (`titulo`, `autor`, ...) as well as
/// their English equivalents.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Article {
    /// The numeric identifier of the article. Any JSON number is accepted.
    pub id: Number,

    /// The URL-safe routing key for the article's detail page.
    pub slug: String,

    #[serde(rename = "titulo", alias = "title")]
    pub title: String,

    #[serde(rename = "autor", alias = "author")]
    pub author: String,

    /// The publication date as an ISO date string without a time component
    /// (e.g., `2024-03-05`). It is kept verbatim; see [`crate::date`] for
    /// parsing and display.
    #[serde(rename = "dataPublicacao", alias = "publishedAt")]
    pub published: String,

    #[serde(rename = "resumo", alias = "summary")]
    pub summary: String,

    #[serde(rename = "conteudo", alias = "content")]
    pub body: String,
}

/// The immutable, ordered article collection.
#[derive(Clone, Debug, Default)]
pub struct Articles {
    articles: Vec<Article>,
}

impl Articles {
    /// Loads the collection from the JSON file at `path`. The file must
    /// contain a JSON array of [`Article`] records.
    pub fn load(path: &Path) -> Result<Articles> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let articles = Articles::from_reader(BufReader::new(file)).map_err(|err| {
            Error::Annotated(format!("loading `{}`", path.display()), Box::new(err))
        })?;
        tracing::info!(
            path = %path.display(),
            count = articles.len(),
            "loaded articles"
        );
        Ok(articles)
    }

    /// Parses the collection from any reader yielding a JSON array.
    pub fn from_reader<R: Read>(reader: R) -> Result<Articles> {
        Articles::new(serde_json::from_reader(reader)?)
    }

    /// Parses the collection from an in-memory JSON array.
    pub fn from_json(input: &str) -> Result<Articles> {
        Articles::new(serde_json::from_str(input)?)
    }

    /// Builds a collection from already-parsed articles, preserving their
    /// order. Fails if any slug is not URL-safe or appears more than once.
    pub fn new(articles: Vec<Article>) -> Result<Articles> {
        let mut seen: HashMap<&str, &Number> = HashMap::with_capacity(articles.len());
        for article in &articles {
            if !is_url_safe(&article.slug) {
                return Err(Error::InvalidSlug {
                    id: article.id.clone(),
                    slug: article.slug.clone(),
                });
            }
            if let Some(first) = seen.insert(article.slug.as_str(), &article.id) {
                return Err(Error::DuplicateSlug {
                    slug: article.slug.clone(),
                    first: first.clone(),
                    second: article.id.clone(),
                });
            }
        }
        Ok(Articles { articles })
    }

    /// Returns the full collection in source order.
    pub fn list_articles(&self) -> &[Article] {
        &self.articles
    }

    /// Returns the first article whose slug equals `slug`, if any.
    pub fn find_article_by_slug(&self, slug: &str) -> Option<&Article> {
        self.list_articles().iter().find(|a| a.slug == slug)
    }

    /// The number of articles in the collection.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the collection has no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// A slug is URL-safe when it is a single, non-empty path segment made only
/// of unreserved URL characters (`A-Z a-z 0-9 - . _ ~`). `.` and `..` are
/// excluded since they'd escape the article's output directory.
fn is_url_safe(slug: &str) -> bool {
    !matches!(slug, "" | "." | "..")
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

/// The result of loading the article collection.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to load the article collection. All variants are
/// fatal: there is no fallback source.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the data file can't be opened.
    #[error("opening article data `{}`: {err}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the data isn't a JSON array of articles.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Returned when two articles share a slug.
    #[error("duplicate slug `{slug}` (articles {first} and {second})")]
    DuplicateSlug {
        slug: String,
        first: Number,
        second: Number,
    },

    /// Returned when a slug isn't URL-safe.
    #[error("article {id} has a slug that isn't URL-safe: `{slug}`")]
    InvalidSlug { id: Number, slug: String },

    /// An error with an annotation.
    #[error("{0}: {1}")]
    Annotated(String, Box<Error>),
}
