use std::io::ErrorKind;
use std::path::Path;

use axum::response::Html;

use crate::config::SiteVariant;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Menu,
    Index,
    Abc,
    Listening,
    Writing,
}

impl Page {
    pub fn template(self) -> &'static str {
        match self {
            Page::Menu => "menu.html",
            Page::Index | Page::Abc => "index.html",
            Page::Listening => "listening-game.html",
            Page::Writing => "writing-game.html",
        }
    }

    /// Page served at `/` for a site variant.
    pub fn home(site: SiteVariant) -> Self {
        match site {
            SiteVariant::Games => Page::Menu,
            SiteVariant::VoiceTesting => Page::Index,
        }
    }

    /// Game pages exposed besides `/`, with their paths.
    pub fn games(site: SiteVariant) -> &'static [(&'static str, Page)] {
        match site {
            SiteVariant::Games => &[
                ("/abc", Page::Abc),
                ("/listening", Page::Listening),
                ("/writing", Page::Writing),
            ],
            SiteVariant::VoiceTesting => &[],
        }
    }
}

pub async fn render(templates_dir: &Path, page: Page) -> Result<Html<String>, AppError> {
    let path = templates_dir.join(page.template());

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::TemplateNotFound(page.template().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
