//! Builds the SEO metadata for each kind of page ([`PageMeta`]) and renders
//! it as `<head>` markup. The listing page describes the site, article pages
//! describe the article (including Open Graph and Twitter card tags), and the
//! not-found page carries a fixed title and description.

use crate::article::Article;
use crate::config::SiteMeta;
use crate::util::escape_html;
use std::fmt::Write;
use url::Url;

/// The Open Graph locale of every page.
pub const OG_LOCALE: &str = "pt_BR";

pub const NOT_FOUND_TITLE: &str = "Artigo não encontrado";
pub const NOT_FOUND_DESCRIPTION: &str = "O artigo solicitado não foi encontrado";

/// The Open Graph object type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OgKind {
    Website,
    Article,
}

impl OgKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OgKind::Website => "website",
            OgKind::Article => "article",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub kind: OgKind,
    pub url: Option<Url>,

    /// The raw stored publication date. Only set for articles.
    pub published_time: Option<String>,
    pub authors: Vec<String>,
    pub locale: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
}

/// Everything that goes into a page's `<head>` besides the stylesheet.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    pub canonical: Option<Url>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
}

impl PageMeta {
    /// Metadata for the article listing at the site root.
    pub fn home(site: &SiteMeta, url: &Url) -> PageMeta {
        PageMeta {
            title: site.title.clone(),
            description: site.description.clone(),
            keywords: site.keywords.clone(),
            authors: site.author.iter().map(|a| a.name.clone()).collect(),
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title: site.title.clone(),
                description: site.description.clone(),
                kind: OgKind::Website,
                url: Some(url.clone()),
                published_time: None,
                authors: Vec::new(),
                locale: OG_LOCALE,
            }),
            twitter: None,
        }
    }

    /// Metadata for an article's detail page.
    pub fn article(site: &SiteMeta, article: &Article, url: &Url) -> PageMeta {
        let mut keywords = vec![article.title.clone(), article.author.clone()];
        keywords.extend(site.article_keywords.iter().cloned());
        PageMeta {
            title: format!("{} | {}", article.title, site.title),
            description: article.summary.clone(),
            keywords,
            authors: vec![article.author.clone()],
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title: article.title.clone(),
                description: article.summary.clone(),
                kind: OgKind::Article,
                url: Some(url.clone()),
                published_time: Some(article.published.clone()),
                authors: vec![article.author.clone()],
                locale: OG_LOCALE,
            }),
            twitter: Some(TwitterCard {
                card: "summary_large_image",
                title: article.title.clone(),
                description: article.summary.clone(),
            }),
        }
    }

    /// Metadata for a slug that matches no article.
    pub fn not_found() -> PageMeta {
        PageMeta {
            title: NOT_FOUND_TITLE.to_owned(),
            description: NOT_FOUND_DESCRIPTION.to_owned(),
            keywords: Vec::new(),
            authors: Vec::new(),
            canonical: None,
            open_graph: None,
            twitter: None,
        }
    }

    /// Renders the metadata as `<head>` tags, one per line. All values are
    /// escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // `fmt::Write` for `String` is infallible; results are ignored below.
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        meta_name(&mut out, "description", &self.description);
        if !self.keywords.is_empty() {
            meta_name(&mut out, "keywords", &self.keywords.join(","));
        }
        for author in &self.authors {
            meta_name(&mut out, "author", author);
        }
        if let Some(canonical) = &self.canonical {
            let _ = writeln!(
                out,
                r#"<link rel="canonical" href="{}">"#,
                escape_html(canonical.as_str())
            );
        }
        if let Some(og) = &self.open_graph {
            meta_property(&mut out, "og:title", &og.title);
            meta_property(&mut out, "og:description", &og.description);
            meta_property(&mut out, "og:type", og.kind.as_str());
            meta_property(&mut out, "og:locale", og.locale);
            if let Some(url) = &og.url {
                meta_property(&mut out, "og:url", url.as_str());
            }
            if let Some(published) = &og.published_time {
                meta_property(&mut out, "article:published_time", published);
            }
            for author in &og.authors {
                meta_property(&mut out, "article:author", author);
            }
        }
        if let Some(twitter) = &self.twitter {
            meta_name(&mut out, "twitter:card", twitter.card);
            meta_name(&mut out, "twitter:title", &twitter.title);
            meta_name(&mut out, "twitter:description", &twitter.description);
        }
        out
    }
}

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta name="{}" content="{}">"#,
        name,
        escape_html(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta property="{}" content="{}">"#,
        property,
        escape_html(content)
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::Articles;
    use crate::config::Author;
    use crate::fixtures::ARTICLES;

    fn site() -> SiteMeta {
        SiteMeta {
            title: String::from("Next Blog"),
            tagline: String::new(),
            description: String::from("Blog sobre desenvolvimento web"),
            keywords: vec![String::from("Rust"), String::from("Blog")],
            article_keywords: vec![String::from("Blog")],
            author: Some(Author {
                name: String::from("Blog Moderno"),
                email: None,
            }),
        }
    }

    #[test]
    fn test_article_meta() -> Result<(), Box<dyn std::error::Error>> {
        let articles = Articles::from_json(ARTICLES)?;
        let article = &articles.list_articles()[0];
        let url = Url::parse("https://example.org/artigos/introducao-ao-nextjs/")?;
        let meta = PageMeta::article(&site(), article, &url);

        assert_eq!("Introdução ao Next.js | Next Blog", meta.title);
        assert_eq!("Primeiros passos com o framework.", meta.description);
        assert_eq!(
            vec!["Introdução ao Next.js", "Maria Silva", "Blog"],
            meta.keywords
        );
        let og = meta.open_graph.as_ref().unwrap();
        assert_eq!(OgKind::Article, og.kind);
        assert_eq!(Some("2024-03-05"), og.published_time.as_deref());
        assert_eq!(vec!["Maria Silva"], og.authors);
        assert_eq!(
            Some("summary_large_image"),
            meta.twitter.as_ref().map(|t| t.card)
        );

        let html = meta.to_html();
        assert!(html.contains("<title>Introdução ao Next.js | Next Blog</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(
            r#"<meta property="article:published_time" content="2024-03-05">"#
        ));
        assert!(html.contains(r#"<meta property="og:locale" content="pt_BR">"#));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://example.org/artigos/introducao-ao-nextjs/">"#
        ));
        Ok(())
    }

    #[test]
    fn test_home_meta() -> Result<(), url::ParseError> {
        let meta = PageMeta::home(&site(), &Url::parse("https://example.org/")?);
        assert_eq!("Next Blog", meta.title);
        assert_eq!(vec!["Blog Moderno"], meta.authors);
        assert_eq!(None, meta.twitter);
        let html = meta.to_html();
        assert!(html.contains(r#"<meta name="keywords" content="Rust,Blog">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        Ok(())
    }

    #[test]
    fn test_not_found_meta() {
        let html = PageMeta::not_found().to_html();
        assert!(html.contains("<title>Artigo não encontrado</title>"));
        assert!(html.contains("O artigo solicitado não foi encontrado"));
        assert!(!html.contains("og:"));
        assert!(!html.contains("keywords"));
    }

    #[test]
    fn test_meta_is_escaped() -> Result<(), Box<dyn std::error::Error>> {
        let articles = Articles::from_json(ARTICLES)?;
        let article = articles.find_article_by_slug("seo-com-metadados").unwrap();
        let url = Url::parse("https://example.org/artigos/seo-com-metadados/")?;
        let html = PageMeta::article(&site(), article, &url).to_html();
        assert!(html.contains("<title>SEO com &lt;meta&gt; &amp; Open Graph | Next Blog</title>"));
        assert!(html.contains(
            r#"<meta name="description" content="Metadados &quot;importam&quot;.">"#
        ));
        assert!(!html.contains("<meta> &"));
        Ok(())
    }
}
