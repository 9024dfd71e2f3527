//! Renders the site's views: the listing, an article's detail page, the
//! card each article gets in the listing, and the not-found page. Every
//! value is HTML-escaped before it's handed to a template, so templates can
//! print values verbatim.

use crate::article::{Article, Articles};
use crate::config::SiteMeta;
use crate::date::format_date;
use crate::meta::PageMeta;
use crate::routes::Routes;
use crate::theme::{
    Theme, ARTICLE_TEMPLATE, CARD_TEMPLATE, INDEX_TEMPLATE, NOT_FOUND_TEMPLATE,
};
use crate::util::escape_html;
use gtmpl::Value;
use std::collections::HashMap;
use thiserror::Error;

/// The `lang` attribute of every page.
pub const LANG: &str = "pt-BR";

/// Everything needed to render pages: the articles, the site metadata, the
/// routes the pages link to, and the theme.
pub struct Site {
    pub articles: Articles,
    pub meta: SiteMeta,
    pub routes: Routes,
    pub theme: Theme,
}

/// The outcome of rendering an article's detail page by slug.
#[derive(Debug, PartialEq)]
pub enum Page {
    Found(String),
    NotFound(String),
}

impl Site {
    /// Renders the listing: one card per article, in collection order.
    pub fn render_index(&self) -> Result<String> {
        let cards = self
            .articles
            .list_articles()
            .iter()
            .map(|a| self.render_card(a).map(Value::String))
            .collect::<Result<Vec<Value>>>()?;

        let mut value = self.page_value(&PageMeta::home(&self.meta, self.routes.home()))?;
        value.insert("tagline".to_owned(), text(&self.meta.tagline));
        value.insert("cards".to_owned(), Value::Array(cards));
        execute(INDEX_TEMPLATE, &self.theme.index, value)
    }

    /// Renders a single article's card.
    pub fn render_card(&self, article: &Article) -> Result<String> {
        let mut value = self.article_value(article);
        value.insert("url".to_owned(), text(self.routes.article(&article.slug)?.as_str()));
        execute(CARD_TEMPLATE, &self.theme.card, value)
    }

    /// Renders an article's detail page.
    pub fn render_article(&self, article: &Article) -> Result<String> {
        let url = self.routes.article(&article.slug)?;
        let mut value = self.page_value(&PageMeta::article(&self.meta, article, &url))?;
        value.extend(self.article_value(article));
        value.insert(
            "paragraphs".to_owned(),
            Value::Array(paragraphs(&article.body).iter().map(|p| text(p)).collect()),
        );
        execute(ARTICLE_TEMPLATE, &self.theme.article, value)
    }

    /// Looks `slug` up and renders either its detail page or the not-found
    /// page.
    pub fn render_article_page(&self, slug: &str) -> Result<Page> {
        match self.articles.find_article_by_slug(slug) {
            Some(article) => Ok(Page::Found(self.render_article(article)?)),
            None => {
                tracing::debug!(slug, "no article with slug");
                Ok(Page::NotFound(self.render_not_found()?))
            }
        }
    }

    /// Renders the not-found page.
    pub fn render_not_found(&self) -> Result<String> {
        let value = self.page_value(&PageMeta::not_found())?;
        execute(NOT_FOUND_TEMPLATE, &self.theme.not_found, value)
    }

    /// The fields every full page receives.
    fn page_value(&self, meta: &PageMeta) -> Result<HashMap<String, Value>> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("head".to_owned(), Value::String(meta.to_html()));
        m.insert("lang".to_owned(), Value::String(LANG.to_owned()));
        m.insert("site_title".to_owned(), text(&self.meta.title));
        m.insert("home_page".to_owned(), text(self.routes.home().as_str()));
        m.insert("static_url".to_owned(), text(self.routes.static_url()?.as_str()));
        m.insert("feed_url".to_owned(), text(self.routes.feed()?.as_str()));
        Ok(m)
    }

    /// The article fields shared by cards and detail pages.
    fn article_value(&self, article: &Article) -> HashMap<String, Value> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("slug".to_owned(), text(&article.slug));
        m.insert("title".to_owned(), text(&article.title));
        m.insert("author".to_owned(), text(&article.author));
        m.insert("published".to_owned(), text(&article.published));
        m.insert("date".to_owned(), text(&format_date(&article.published)));
        m.insert("summary".to_owned(), text(&article.summary));
        m
    }
}

fn text(s: &str) -> Value {
    Value::String(escape_html(s))
}

/// Splits body text into paragraphs on blank (or whitespace-only) lines.
fn paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

fn execute(name: &'static str, template: &str, value: HashMap<String, Value>) -> Result<String> {
    gtmpl::template(template, Value::Object(value)).map_err(|e| Error::Template {
        name,
        message: e.to_string(),
    })
}

/// The result of a rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem rendering a page.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a template fails to execute.
    #[error("rendering template `{name}`: {message}")]
    Template { name: &'static str, message: String },

    /// Returned when a page URL can't be built from the site root.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures::ARTICLES;
    use url::Url;

    fn site() -> Site {
        Site {
            articles: Articles::from_json(ARTICLES).unwrap(),
            meta: SiteMeta {
                title: String::from("Next Blog"),
                tagline: String::from("Artigos sobre desenvolvimento web"),
                description: String::from("Blog sobre desenvolvimento web"),
                keywords: Vec::new(),
                article_keywords: Vec::new(),
                author: None,
            },
            routes: Routes::new(Url::parse("https://example.org/").unwrap()),
            theme: Theme::default(),
        }
    }

    #[test]
    fn test_render_index() -> Result<()> {
        let html = site().render_index()?;
        assert!(html.contains("<title>Next Blog</title>"));
        assert!(html.contains("<p class=\"subtitle\">Artigos sobre desenvolvimento web</p>"));
        assert!(html.contains(r#"href="https://example.org/static/style.css""#));

        let positions: Vec<usize> = [
            "https://example.org/artigos/introducao-ao-nextjs/",
            "https://example.org/artigos/typescript-na-pratica/",
            "https://example.org/artigos/seo-com-metadados/",
        ]
        .iter()
        .map(|url| html.find(&format!(r#"<a href="{}""#, url)).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(html.contains("Por Maria Silva"));
        assert!(html.contains("05 de março de 2024"));
        assert!(html.contains("Primeiros passos com o framework."));
        assert_eq!(3, html.matches("Ler artigo completo").count());
        Ok(())
    }

    #[test]
    fn test_render_index_escapes() -> Result<()> {
        let html = site().render_index()?;
        assert!(html.contains("SEO com &lt;meta&gt; &amp; Open Graph"));
        assert!(html.contains("Metadados &quot;importam&quot;."));
        assert!(!html.contains("<meta> &"));
        Ok(())
    }

    #[test]
    fn test_render_index_empty() -> Result<()> {
        let mut site = site();
        site.articles = Articles::default();
        let html = site.render_index()?;
        assert!(!html.contains("artigo-card"));
        Ok(())
    }

    #[test]
    fn test_render_article_page_found() -> Result<()> {
        match site().render_article_page("introducao-ao-nextjs")? {
            Page::Found(html) => {
                assert!(html.contains("<h1>Introdução ao Next.js</h1>"));
                assert!(html.contains("Por Maria Silva"));
                assert!(html.contains("05 de março de 2024"));
                assert!(html.contains("<p>Next.js é um framework para React.</p>"));
                assert!(html.contains("<p>Ele renderiza páginas no servidor.</p>"));
                assert!(html.contains(r#"<a href="https://example.org/" class="voltar-link">"#));
                assert!(html.contains("<title>Introdução ao Next.js | Next Blog</title>"));
                assert!(html.contains(r#"content="summary_large_image""#));
            }
            Page::NotFound(_) => panic!("wanted the article page"),
        }
        Ok(())
    }

    #[test]
    fn test_render_article_page_not_found() -> Result<()> {
        match site().render_article_page("nao-existe")? {
            Page::NotFound(html) => {
                assert!(html.contains("404 - Artigo não encontrado"));
                assert!(html.contains("<title>Artigo não encontrado</title>"));
            }
            Page::Found(_) => panic!("wanted the not-found page"),
        }
        Ok(())
    }

    #[test]
    fn test_every_article_renders() -> Result<()> {
        let site = site();
        for article in site.articles.list_articles() {
            assert!(matches!(
                site.render_article_page(&article.slug)?,
                Page::Found(_)
            ));
        }
        Ok(())
    }

    #[test]
    fn test_paragraphs() {
        let body = "um\n\ndois\r\n\r\ntrês\n\n\n\n  quatro  \n";
        assert_eq!(vec!["um", "dois", "três", "quatro"], paragraphs(body));
        assert!(paragraphs("").is_empty());
        assert!(paragraphs(" \n\t\n").is_empty());
    }

    #[test]
    fn test_paragraphs_whitespace_and_mixed_breaks() {
        let body = "um\n   \ndois\r\n\ntrês\n\t\r\nquatro\ncontinua";
        assert_eq!(
            vec!["um", "dois", "três", "quatro\ncontinua"],
            paragraphs(body)
        );
    }
}
