//! Defines the [`Theme`]: the four templates pages are rendered with. A
//! default theme is compiled into the binary; a project can replace any of
//! its templates by placing a file with the same name in its `theme/`
//! directory. Templates use `gtmpl` (Go `text/template`) syntax and are
//! parsed once on load so syntax errors surface before anything is
//! rendered.

use gtmpl::Template;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const ARTICLE_TEMPLATE: &str = "article.html";
pub const CARD_TEMPLATE: &str = "card.html";
pub const NOT_FOUND_TEMPLATE: &str = "not_found.html";

/// The template sources for each view.
#[derive(Clone, Debug)]
pub struct Theme {
    /// The listing page. Receives the rendered cards as `.cards`.
    pub index: String,

    /// An article's detail page.
    pub article: String,

    /// A single article in the listing.
    pub card: String,

    /// The page for slugs that match no article.
    pub not_found: String,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            index: include_str!("templates/index.html").to_owned(),
            article: include_str!("templates/article.html").to_owned(),
            card: include_str!("templates/card.html").to_owned(),
            not_found: include_str!("templates/not_found.html").to_owned(),
        }
    }
}

impl Theme {
    /// Loads the theme for a project. Templates missing from `directory` (or
    /// all of them, when there's no directory) come from the default theme.
    pub fn load(directory: Option<&Path>) -> Result<Theme> {
        let mut theme = Theme::default();
        if let Some(directory) = directory {
            for (name, source) in theme.templates_mut() {
                let path = directory.join(name);
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        tracing::debug!(path = %path.display(), "using theme template");
                        *source = contents;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(err) => return Err(Error::Read { path, err }),
                }
            }
        }
        theme.check()?;
        Ok(theme)
    }

    /// Parses every template, returning the first syntax error.
    pub fn check(&self) -> Result<()> {
        for (name, source) in self.templates() {
            let mut template = Template::default();
            template.parse(source).map_err(|e| Error::Parse {
                name,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn templates(&self) -> [(&'static str, &String); 4] {
        [
            (INDEX_TEMPLATE, &self.index),
            (ARTICLE_TEMPLATE, &self.article),
            (CARD_TEMPLATE, &self.card),
            (NOT_FOUND_TEMPLATE, &self.not_found),
        ]
    }

    fn templates_mut(&mut self) -> [(&'static str, &mut String); 4] {
        [
            (INDEX_TEMPLATE, &mut self.index),
            (ARTICLE_TEMPLATE, &mut self.article),
            (CARD_TEMPLATE, &mut self.card),
            (NOT_FOUND_TEMPLATE, &mut self.not_found),
        ]
    }
}

/// The result of loading a [`Theme`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading a [`Theme`].
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a template file exists but can't be read.
    #[error("reading template file `{}`: {err}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned when a template has a syntax error.
    #[error("parsing template `{name}`: {message}")]
    Parse { name: &'static str, message: String },
}
