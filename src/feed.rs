//! Support for creating an Atom feed from the article collection.

use crate::article::Article;
use crate::config::Author;
use crate::date::{midnight_utc, parse_date};
use crate::routes::Routes;
use atom_syndication::{Entry, Feed, Link, Person};
use chrono::{DateTime, FixedOffset};
use std::io::Write;
use thiserror::Error;

/// Bundled configuration for creating a feed.
pub struct FeedConfig<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub author: Option<&'a Author>,
    pub routes: &'a Routes,
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// [`Article`]s and writes the result to a [`std::io::Write`].
pub fn write_feed<W: Write>(config: &FeedConfig, articles: &[Article], w: W) -> Result<()> {
    feed(config, articles)?.write_to(w)?;
    Ok(())
}

/// Builds the feed. Entries keep the collection's order; the feed's
/// `updated` time is the most recent publication date. Articles whose date
/// doesn't parse are left out of the feed with a warning.
pub fn feed(config: &FeedConfig, articles: &[Article]) -> Result<Feed> {
    let mut entries = Vec::with_capacity(articles.len());
    for article in articles {
        if let Some(entry) = feed_entry(config, article)? {
            entries.push(entry);
        }
    }
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or_default();
    let home_page = config.routes.home().to_string();

    Ok(Feed {
        title: config.title.into(),
        subtitle: match config.subtitle {
            "" => None,
            subtitle => Some(subtitle.into()),
        },
        id: home_page.clone(),
        updated,
        authors: author_to_people(config.author),
        links: vec![
            Link {
                href: home_page,
                rel: "alternate".to_owned(),
                ..Default::default()
            },
            Link {
                href: config.routes.feed()?.to_string(),
                rel: "self".to_owned(),
                ..Default::default()
            },
        ],
        entries,
        ..Default::default()
    })
}

fn feed_entry(config: &FeedConfig, article: &Article) -> Result<Option<Entry>> {
    let date: DateTime<FixedOffset> =
        match parse_date(&article.published).ok().and_then(midnight_utc) {
            Some(date) => date.into(),
            None => {
                tracing::warn!(
                    slug = %article.slug,
                    date = %article.published,
                    "leaving article with an invalid publication date out of the feed"
                );
                return Ok(None);
            }
        };
    let url = config.routes.article(&article.slug)?.to_string();

    Ok(Some(Entry {
        id: url.clone(),
        title: article.title.as_str().into(),
        updated: date,
        published: Some(date),
        authors: vec![Person {
            name: article.author.clone(),
            ..Default::default()
        }],
        links: vec![Link {
            href: url,
            rel: "alternate".to_owned(),
            ..Default::default()
        }],
        summary: Some(article.summary.as_str().into()),
        ..Default::default()
    }))
}

fn author_to_people(author: Option<&Author>) -> Vec<Person> {
    match author {
        Some(author) => vec![Person {
            name: author.name.clone(),
            email: author.email.clone(),
            uri: None,
        }],
        None => Vec::new(),
    }
}

/// The result of a feed operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when there is an Atom-related error, including I/O errors
    /// while writing the feed.
    #[error(transparent)]
    Atom(#[from] atom_syndication::Error),

    /// Returned when an article URL can't be built.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
