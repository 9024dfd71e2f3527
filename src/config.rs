//! Loads the project configuration from a `gazette.yaml` project file. The
//! file is searched for in the given directory and then in each of its
//! ancestors, and every path in the resulting [`Config`] is resolved
//! relative to the directory that holds it.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "gazette.yaml";

/// The default location of the article data file, relative to the project
/// root.
pub const DEFAULT_DATA_FILE: &str = "data/artigos.json";

/// The name of the directory generated output lands in when no output
/// directory is given.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "_output";

/// The site author, used for page metadata and the feed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct Project {
    title: String,

    #[serde(default)]
    tagline: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    keywords: Vec<String>,

    #[serde(default)]
    article_keywords: Vec<String>,

    #[serde(default)]
    author: Option<Author>,

    site_root: Url,

    #[serde(default = "default_data_file")]
    data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

/// Site-wide text used across pages and the feed.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteMeta {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,

    /// Keywords appended to every article's own keywords.
    pub article_keywords: Vec<String>,
    pub author: Option<Author>,
}

/// The resolved configuration for building or serving a site.
#[derive(Clone, Debug)]
pub struct Config {
    pub site: SiteMeta,

    /// The URL the site is published under. Always ends in a slash.
    pub site_root: Url,

    /// The JSON file holding the articles.
    pub data_file: PathBuf,

    /// Static assets copied to `{output}/static/`. May not exist.
    pub static_source_directory: PathBuf,

    /// The directory with the theme templates, if the project overrides the
    /// built-in theme.
    pub theme_directory: Option<PathBuf>,

    /// The directory generated files are written to.
    pub output_directory: PathBuf,
}

impl Config {
    /// Finds the project file in `dir` or its nearest ancestor and loads it.
    /// `output_directory` defaults to `_output` under the project root.
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            Config::from_project_file(&path, output_directory)
                .with_context(|| format!("Loading configuration `{}`", path.display()))
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;
        Ok(Config::from_project(project, project_root, output_directory))
    }

    fn from_project(
        project: Project,
        project_root: &Path,
        output_directory: Option<&Path>,
    ) -> Config {
        let theme_directory = project_root.join("theme");
        Config {
            site: SiteMeta {
                title: project.title,
                tagline: project.tagline,
                description: project.description,
                keywords: project.keywords,
                article_keywords: project.article_keywords,
                author: project.author,
            },
            site_root: with_trailing_slash(project.site_root),
            data_file: project_root.join(project.data_file),
            static_source_directory: project_root.join("static"),
            theme_directory: if theme_directory.is_dir() {
                Some(theme_directory)
            } else {
                None
            },
            output_directory: match output_directory {
                Some(dir) => dir.to_owned(),
                None => project_root.join(DEFAULT_OUTPUT_DIRECTORY),
            },
        }
    }
}

/// Appends a trailing slash to the URL's path if it's missing. Without it,
/// [`Url::join`] treats the last path segment as a file name and drops it.
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod test {
    use super::*;

    const PROJECT: &str = r#"
title: Next Blog
tagline: Artigos sobre desenvolvimento web
description: Blog sobre desenvolvimento web
keywords: [Rust, Blog]
article_keywords: [Blog]
author:
  name: Blog Moderno
site_root: https://example.org/blog
"#;

    #[test]
    fn test_from_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, PROJECT)?;

        let config = Config::from_project_file(&path, None)?;
        assert_eq!("Next Blog", config.site.title);
        assert_eq!(vec!["Rust", "Blog"], config.site.keywords);
        assert_eq!(
            Some(Author {
                name: String::from("Blog Moderno"),
                email: None,
            }),
            config.site.author
        );
        assert_eq!("https://example.org/blog/", config.site_root.as_str());
        assert_eq!(dir.path().join(DEFAULT_DATA_FILE), config.data_file);
        assert_eq!(dir.path().join("static"), config.static_source_directory);
        assert_eq!(None, config.theme_directory);
        assert_eq!(
            dir.path().join(DEFAULT_OUTPUT_DIRECTORY),
            config.output_directory
        );
        Ok(())
    }

    #[test]
    fn test_from_directory_searches_ancestors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(PROJECT_FILE), PROJECT)?;
        std::fs::create_dir_all(dir.path().join("theme"))?;
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;

        let output = dir.path().join("out");
        let config = Config::from_directory(&nested, Some(&output))?;
        assert_eq!("Next Blog", config.site.title);
        assert_eq!(Some(dir.path().join("theme")), config.theme_directory);
        assert_eq!(output, config.output_directory);
        Ok(())
    }

    #[test]
    fn test_missing_required_field() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "title: Missing root\n")?;
        assert!(Config::from_project_file(&path, None).is_err());
        Ok(())
    }

    #[test]
    fn test_with_trailing_slash() -> Result<()> {
        assert_eq!(
            "https://example.org/",
            with_trailing_slash(Url::parse("https://example.org")?).as_str()
        );
        assert_eq!(
            "https://example.org/a/",
            with_trailing_slash(Url::parse("https://example.org/a")?).as_str()
        );
        Ok(())
    }
}
