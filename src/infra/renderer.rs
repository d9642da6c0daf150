use crate::application::history::Renderer;
use crate::domain::RenderRequest;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Forwards render requests to whoever owns the receiving end.
pub struct ChannelRenderer {
    tx: UnboundedSender<RenderRequest>,
}

impl ChannelRenderer {
    pub fn channel() -> (Self, UnboundedReceiver<RenderRequest>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Renderer for ChannelRenderer {
    fn render(&self, request: RenderRequest) {
        if self.tx.send(request).is_err() {
            log::debug!("Render request dropped: no host listening");
        }
    }
}

/// Writes each request to stdout as one JSON line for a host process.
#[derive(Debug, Default)]
pub struct StdoutRenderer;

impl Renderer for StdoutRenderer {
    fn render(&self, request: RenderRequest) {
        match serde_json::to_string(&request) {
            Ok(json) => println!("{json}"),
            Err(err) => log::warn!("Failed to serialize render request: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewPlacement;

    fn request() -> RenderRequest {
        RenderRequest {
            command: "githistory.preview".into(),
            address: "githistory://authority/git-history?id=1".into(),
            placement: ViewPlacement::Beside,
            title: "Git History".into(),
        }
    }

    #[tokio::test]
    async fn test_channel_renderer_delivers_requests() {
        let (renderer, mut rx) = ChannelRenderer::channel();
        renderer.render(request());
        assert_eq!(rx.recv().await, Some(request()));
    }

    #[test]
    fn test_channel_renderer_ignores_closed_host() {
        let (renderer, rx) = ChannelRenderer::channel();
        drop(rx);
        renderer.render(request());
    }

    #[test]
    fn test_render_request_json_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["placement"], "beside");
        assert_eq!(json["title"], "Git History");
        assert!(json.get("address").is_some());
    }
}
