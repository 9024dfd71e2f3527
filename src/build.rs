//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading the articles
//! ([`crate::article`]), rendering the listing, every article page and the
//! not-found page ([`crate::render`]), copying the static source directory
//! into the static output directory, and generating the Atom feed.

use crate::article::{Articles, Error as ArticleError};
use crate::config::Config;
use crate::feed::{write_feed, Error as FeedError, FeedConfig};
use crate::render::{Error as RenderError, Site};
use crate::routes::{
    article_file, Routes, ARTICLES_SEGMENT, FEED_FILE, INDEX_FILE, NOT_FOUND_FILE,
    STATIC_SEGMENT,
};
use crate::theme::{Error as ThemeError, Theme};
use crate::util::{copy_dir, remove_path};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Loads everything needed to render the site described by `config`:
/// the articles and the theme. Links are resolved against `routes`.
pub fn load_site(config: &Config, routes: Routes) -> Result<Site> {
    Ok(Site {
        articles: Articles::load(&config.data_file)?,
        meta: config.site.clone(),
        routes,
        theme: Theme::load(config.theme_directory.as_deref())?,
    })
}

/// Builds the site from a [`Config`] object: one page per article at
/// `artigos/{slug}/index.html`, the listing at `index.html`, `404.html`,
/// `feed.atom`, and a copy of the project's static assets under `static/`.
/// Returns the number of article pages written.
pub fn build_site(config: &Config) -> Result<usize> {
    let site = load_site(config, Routes::new(config.site_root.clone()))?;
    let output = &config.output_directory;

    // Only remove what a previous build generated so pointing `--output` at
    // the wrong directory doesn't wipe unrelated files.
    for generated in &[
        INDEX_FILE,
        NOT_FOUND_FILE,
        FEED_FILE,
        ARTICLES_SEGMENT,
        STATIC_SEGMENT,
    ] {
        let path = output.join(generated);
        remove_path(&path).map_err(|err| Error::Clean { path, err })?;
    }
    std::fs::create_dir_all(output)?;

    write_page(&output.join(INDEX_FILE), &site.render_index()?)?;
    for article in site.articles.list_articles() {
        write_page(
            &output.join(article_file(&article.slug)),
            &site.render_article(article)?,
        )?;
    }
    write_page(&output.join(NOT_FOUND_FILE), &site.render_not_found()?)?;

    if config.static_source_directory.is_dir() {
        let copied = copy_dir(
            &config.static_source_directory,
            &output.join(STATIC_SEGMENT),
        )?;
        tracing::debug!(files = copied, "copied static assets");
    }

    // Rendered in memory so a failure leaves no partial feed behind.
    let mut xml = Vec::new();
    write_feed(
        &FeedConfig {
            title: &site.meta.title,
            subtitle: &site.meta.tagline,
            author: site.meta.author.as_ref(),
            routes: &site.routes,
        },
        site.articles.list_articles(),
        &mut xml,
    )?;
    std::fs::write(output.join(FEED_FILE), xml)?;

    tracing::info!(
        articles = site.articles.len(),
        output = %output.display(),
        "built site"
    );
    Ok(site.articles.len())
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, html).map_err(|err| Error::WritePage {
        path: path.to_owned(),
        err,
    })?;
    tracing::debug!(path = %path.display(), "wrote page");
    Ok(())
}

/// The result of building a site.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during loading the
/// articles or the theme, rendering, writing, cleaning output directories,
/// creating the feed, and other I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors loading the articles.
    #[error(transparent)]
    Articles(#[from] ArticleError),

    /// Returned for errors loading the theme.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// Returned for errors rendering pages.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Returned for I/O problems while cleaning the output directory.
    #[error("Cleaning '{}': {err}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for I/O problems while writing a page.
    #[error("Writing page '{}': {err}", path.display())]
    WritePage {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for errors writing the feed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Returned for other I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
