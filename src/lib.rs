//! The library code for the `gazette` blog front-end. It renders a small,
//! static collection of articles, read from a JSON data file, into a listing
//! page and one page per article. The architecture breaks down into three
//! steps:
//!
//! 1. Loading the articles from the data file ([`crate::article`])
//! 2. Rendering pages from them ([`crate::render`]), each with its SEO
//!    metadata ([`crate::meta`])
//! 3. Delivering the pages, either by writing them to disk
//!    ([`crate::build`]) or by serving them per request ([`crate::server`])
//!
//! The article collection is read-only once loaded. The only lookup is by
//! slug, and a slug that matches no article renders the not-found page.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod build;
pub mod config;
pub mod date;
pub mod feed;
pub mod meta;
pub mod render;
pub mod routes;
pub mod server;
pub mod theme;
mod util;
