//! The HTML file render target.

use std::path::{Path, PathBuf};

use quakemap_core::{QuakeMapError, RenderTarget};
use quakemap_types::MapDocument;
use tracing::info;

use crate::page::PageRenderer;

/// Renders documents to a standalone HTML page on disk.
///
/// The most recently written page is kept so it can also be served.
pub struct HtmlFileTarget {
    renderer: PageRenderer,
    output_path: PathBuf,
    page: Option<String>,
}

impl HtmlFileTarget {
    /// Create a target writing to `output_path`.
    pub fn new(renderer: PageRenderer, output_path: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            output_path: output_path.into(),
            page: None,
        }
    }

    /// Where pages are written.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Consume the target, returning the last page written.
    pub fn into_page(self) -> Option<String> {
        self.page
    }
}

impl RenderTarget for HtmlFileTarget {
    fn present(&mut self, document: &MapDocument) -> Result<(), QuakeMapError> {
        let html = self
            .renderer
            .render(document)
            .map_err(|e| QuakeMapError::Render(e.to_string()))?;

        // A single small file per render, written synchronously on the
        // runtime thread.
        let parent = self.output_path.parent();
        if let Some(parent) = parent.filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                QuakeMapError::Render(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.output_path, &html).map_err(|e| {
            let path = self.output_path.display();
            QuakeMapError::Render(format!("failed to write {path}: {e}"))
        })?;

        info!(
            path = %self.output_path.display(),
            bytes = html.len(),
            "map page written"
        );
        self.page = Some(html);
        Ok(())
    }
}
