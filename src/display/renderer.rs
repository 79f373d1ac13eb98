//! Rendering surfaces

use tokio::sync::mpsc;

use super::DisplayView;
use crate::error::RenderError;

/// The page surface a replica paints into. May fail when the page is torn
/// down underneath it.
pub trait Renderer: Send {
    fn render(&mut self, view: &DisplayView) -> Result<(), RenderError>;
}

/// Forwards views to a tab's socket writer
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    views_tx: mpsc::UnboundedSender<DisplayView>,
}

impl ChannelRenderer {
    pub fn new(views_tx: mpsc::UnboundedSender<DisplayView>) -> Self {
        Self { views_tx }
    }
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, view: &DisplayView) -> Result<(), RenderError> {
        self.views_tx
            .send(view.clone())
            .map_err(|_| RenderError::Detached)
    }
}
