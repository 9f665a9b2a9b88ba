//! Message transport — channel plumbing between callers and the page.
//!
//! The serve loop owns the `Page` outright, so requests are answered
//! strictly one at a time and no field write ever races another. Each
//! request carries its own reply slot and is answered exactly once.

use std::sync::Arc;

use formpilot_core::{EngineConfig, Error, Result};
use formpilot_dom::Page;
use formpilot_protocol::{Request, Response};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::decrypt::TemplateDecryptor;
use crate::orchestrator::Orchestrator;

/// One in-flight request and the slot its response goes back through.
pub type RequestEnvelope = (Request, oneshot::Sender<Response>);

/// Caller-side handle to a running serve loop.
#[derive(Clone)]
pub struct RequestSender {
    tx: mpsc::Sender<RequestEnvelope>,
}

impl RequestSender {
    /// Send one request and wait for its response.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| Error::Internal("transport closed".into()))?;
        reply_rx
            .await
            .map_err(|_| Error::Internal("serve loop dropped the request".into()))
    }

    /// Parse a raw JSON message and send it.
    pub async fn send_json(&self, value: &serde_json::Value) -> Result<Response> {
        self.send(Request::from_json(value)).await
    }
}

/// Create the request channel for one page session.
pub fn channel(capacity: usize) -> (RequestSender, mpsc::Receiver<RequestEnvelope>) {
    let (tx, rx) = mpsc::channel(capacity);
    (RequestSender { tx }, rx)
}

/// Serve requests against one page until every sender is dropped.
pub async fn serve(
    mut page: Page,
    decryptor: Arc<dyn TemplateDecryptor>,
    config: EngineConfig,
    mut rx: mpsc::Receiver<RequestEnvelope>,
) {
    let survey = page.survey();
    info!(
        forms = survey.forms,
        controls = survey.controls,
        "serving page"
    );

    let orchestrator = Orchestrator::new(config);
    while let Some((request, reply)) = rx.recv().await {
        let response = orchestrator.handle(&mut page, &decryptor, request).await;
        if reply.send(response).is_err() {
            debug!("caller went away before the response");
        }
    }
    info!("transport closed, page session over");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decrypt::PlainDecryptor;
    use formpilot_dom::Element;
    use formpilot_protocol::{EncryptedTemplate, Template, TemplateField};
    use serde_json::json;

    fn page_with_email() -> Page {
        let mut page = Page::new();
        page.append_element(
            page.body(),
            Element::new("input").attr("type", "email").attr("name", "email"),
        );
        page
    }

    #[tokio::test]
    async fn test_detect_then_fill_over_channel() {
        let (sender, rx) = channel(8);
        let server = tokio::spawn(serve(
            page_with_email(),
            Arc::new(PlainDecryptor),
            EngineConfig::immediate(),
            rx,
        ));

        let detect = sender.send(Request::DetectFields).await.unwrap();
        let detect = serde_json::to_value(detect).unwrap();
        assert_eq!(detect["detectedFields"], 1);

        let template = Template {
            name: "Contato".into(),
            fields: vec![TemplateField::new("email", "email", "ana@exemplo.com")],
        };
        let fill = sender
            .send(Request::FillForm {
                template: EncryptedTemplate::plaintext(&template),
            })
            .await
            .unwrap();
        let fill = serde_json::to_value(fill).unwrap();
        assert_eq!(fill["filledFields"], 1);

        drop(sender);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_raw_json_messages() {
        let (sender, rx) = channel(8);
        tokio::spawn(serve(
            page_with_email(),
            Arc::new(PlainDecryptor),
            EngineConfig::immediate(),
            rx,
        ));

        let response = sender
            .send_json(&json!({"action": "analyzePage"}))
            .await
            .unwrap();
        assert!(!response.success());
    }
}
