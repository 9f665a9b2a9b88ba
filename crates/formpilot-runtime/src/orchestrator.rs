//! Orchestrator — the detect and fill entry points.
//!
//! One instance per page session. Detection is a pure read; filling
//! decrypts, re-scans, matches each template field, and writes them in
//! template order, one at a time. A field that cannot be matched or
//! written becomes an error string in the response; the loop always
//! runs to completion.

use std::collections::BTreeMap;
use std::sync::Arc;

use formpilot_core::EngineConfig;
use formpilot_detect::{scan, DetectedField};
use formpilot_dom::Page;
use formpilot_fill::{FeedbackAnnotator, Filler};
use formpilot_match::select_match;
use formpilot_protocol::{
    DetectResponse, EncryptedTemplate, FillResponse, Request, Response,
};
use tracing::{info, warn};

use crate::decrypt::TemplateDecryptor;

pub struct Orchestrator {
    config: EngineConfig,
}

impl Orchestrator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Scan the page and report every fillable field, grouped by
    /// control type for the caller's convenience.
    pub fn detect_fields(&self, page: &Page) -> Response {
        let fields = scan(page);
        info!(count = fields.len(), "fields detected");

        let mut fields_by_type: BTreeMap<String, Vec<DetectedField>> = BTreeMap::new();
        for field in &fields {
            fields_by_type
                .entry(field.control_type.clone())
                .or_default()
                .push(field.clone());
        }

        Response::Detect(DetectResponse {
            success: true,
            detected_fields: fields.len(),
            fields,
            fields_by_type,
        })
    }

    /// Decrypt a template and inject its values into the page.
    ///
    /// Decryption failure is the only fatal outcome. Per-field
    /// failures (no match, write error) are accumulated as error
    /// strings and the remaining fields still run, so the response
    /// carries `success: true` whenever the loop completed.
    pub async fn fill_form(
        &self,
        page: &mut Page,
        decryptor: &Arc<dyn TemplateDecryptor>,
        blob: &EncryptedTemplate,
    ) -> Response {
        let template = match decryptor.decrypt_object(blob).await {
            Ok(template) => template,
            Err(e) => {
                warn!(error = %e, "template decryption failed");
                return Response::error(e.to_string());
            }
        };
        info!(template = %template.name, fields = template.fields.len(), "filling form");

        let detected = scan(page);
        let filler = Filler::new(&self.config);
        let annotator = FeedbackAnnotator::new();

        let mut filled = 0usize;
        let mut errors = Vec::new();

        for entry in &template.fields {
            let Some(target) = select_match(entry, &detected) else {
                warn!(field = %entry.name, "no matching field on page");
                errors.push(format!("Campo não encontrado: {}", entry.name));
                continue;
            };
            match filler.fill(page, target, &entry.value).await {
                Ok(()) => {
                    filled += 1;
                    if self.config.feedback_enabled {
                        annotator.mark_filled(page, target.node);
                    }
                }
                Err(e) => {
                    warn!(field = %entry.name, error = %e, "field write failed");
                    errors.push(format!("Erro ao preencher {}: {e}", entry.name));
                }
            }
        }

        if self.config.feedback_enabled {
            annotator.show_success_banner(page, filled, template.fields.len());
        }
        info!(filled, total = template.fields.len(), "fill completed");

        Response::Fill(FillResponse {
            success: true,
            filled_fields: filled,
            total_fields: template.fields.len(),
            errors,
        })
    }

    /// Dispatch one parsed request.
    pub async fn handle(
        &self,
        page: &mut Page,
        decryptor: &Arc<dyn TemplateDecryptor>,
        request: Request,
    ) -> Response {
        match request {
            Request::DetectFields => self.detect_fields(page),
            Request::FillForm { template } => self.fill_form(page, decryptor, &template).await,
            Request::Unknown { action } => {
                warn!(action = %action, "unknown action");
                Response::unknown_action()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decrypt::PlainDecryptor;
    use formpilot_dom::Element;
    use formpilot_protocol::{Template, TemplateField};

    fn decryptor() -> Arc<dyn TemplateDecryptor> {
        Arc::new(PlainDecryptor)
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(EngineConfig::immediate())
    }

    fn blob(fields: Vec<TemplateField>) -> EncryptedTemplate {
        EncryptedTemplate::plaintext(&Template {
            name: "Cadastro".into(),
            fields,
        })
    }

    fn signup_page() -> Page {
        let mut page = Page::new();
        let form = page.append_element(page.body(), Element::new("form"));
        let label = page.append_element(form, Element::new("label").attr("for", "nome"));
        page.append_text(label, "Nome completo");
        page.append_element(
            form,
            Element::new("input").attr("type", "text").attr("id", "nome").attr("name", "nome"),
        );
        page.append_element(form, Element::new("input").attr("type", "email").attr("id", "email"));
        page
    }

    #[test]
    fn test_detect_groups_by_type() {
        let page = signup_page();
        let response = orchestrator().detect_fields(&page);

        let Response::Detect(detect) = response else {
            panic!("expected detect response");
        };
        assert!(detect.success);
        assert_eq!(detect.detected_fields, 2);
        assert_eq!(detect.fields_by_type["text"].len(), 1);
        assert_eq!(detect.fields_by_type["email"].len(), 1);
    }

    #[tokio::test]
    async fn test_fill_matches_email_by_id() {
        let mut page = signup_page();
        let blob = blob(vec![TemplateField::new("E-mail", "email", "ana@exemplo.com")]);

        let response = orchestrator()
            .fill_form(&mut page, &decryptor(), &blob)
            .await;

        let Response::Fill(fill) = response else {
            panic!("expected fill response");
        };
        assert!(fill.success);
        assert_eq!(fill.filled_fields, 1);
        assert!(fill.errors.is_empty());

        let email = page
            .elements()
            .into_iter()
            .find(|&n| page.attr(n, "id") == Some("email"))
            .unwrap();
        assert_eq!(page.value(email), "ana@exemplo.com");
    }

    #[tokio::test]
    async fn test_unmatched_field_reported_not_fatal() {
        // A page with no controls leaves every template field unmatched.
        let mut page = Page::new();
        let blob = blob(vec![TemplateField::new("cpf", "text", "123")]);

        let response = orchestrator()
            .fill_form(&mut page, &decryptor(), &blob)
            .await;

        let Response::Fill(fill) = response else {
            panic!("expected fill response");
        };
        assert!(fill.success);
        assert_eq!(fill.filled_fields, 0);
        assert_eq!(fill.total_fields, 1);
        assert_eq!(fill.errors, vec!["Campo não encontrado: cpf".to_string()]);
    }

    #[tokio::test]
    async fn test_every_template_field_lands_when_page_has_candidates() {
        // Selection never reports an unmatched field while the page has
        // any candidate at all: when no candidate is type-compatible,
        // the fallback treats every one as compatible. A select-typed
        // field on a page with only text inputs still fills.
        let mut page = Page::new();
        let loose = page.append_element(
            page.body(),
            Element::new("input").attr("type", "text").rect(600.0, 600.0, 120.0, 24.0),
        );
        let email = page.append_element(
            page.body(),
            Element::new("input").attr("type", "email").attr("id", "email"),
        );
        let blob = blob(vec![
            TemplateField::new("E-mail", "email", "ana@exemplo.com"),
            TemplateField::new("zzzz", "select", "opt"),
        ]);

        let response = orchestrator()
            .fill_form(&mut page, &decryptor(), &blob)
            .await;

        let Response::Fill(fill) = response else {
            panic!("expected fill response");
        };
        assert!(fill.success);
        assert_eq!(fill.filled_fields, 2);
        assert!(fill.errors.is_empty());
        assert_eq!(page.value(email), "ana@exemplo.com");
        assert_eq!(page.value(loose), "opt");
    }

    #[tokio::test]
    async fn test_decrypt_failure_is_fatal() {
        let mut page = signup_page();
        let blob = EncryptedTemplate(serde_json::json!({"iv": "garbage"}));

        let response = orchestrator()
            .fill_form(&mut page, &decryptor(), &blob)
            .await;

        assert!(!response.success());
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("Decryption error"));
    }

    #[tokio::test]
    async fn test_feedback_annotations_applied() {
        let mut page = signup_page();
        let config = EngineConfig {
            settle_delay_ms: 0,
            feedback_enabled: true,
        };
        let blob = blob(vec![TemplateField::new("nome", "text", "Ana Souza")]);

        Orchestrator::new(config)
            .fill_form(&mut page, &decryptor(), &blob)
            .await;

        let nome = page
            .elements()
            .into_iter()
            .find(|&n| page.attr(n, "id") == Some("nome"))
            .unwrap();
        assert_eq!(page.inline_style(nome, "borderColor"), Some("#4CAF50"));

        let banner_text = page
            .elements()
            .into_iter()
            .filter_map(|n| page.attr(n, "id").map(|id| (n, id.to_string())))
            .find(|(_, id)| id.starts_with("formpilot-banner-"))
            .map(|(n, _)| page.text_content(n))
            .unwrap();
        assert!(banner_text.contains("1 de 1"));
    }

    #[tokio::test]
    async fn test_unknown_action_answered_with_error() {
        let mut page = Page::new();
        let request = Request::from_json(&serde_json::json!({"action": "analyzePage"}));

        let response = orchestrator()
            .handle(&mut page, &decryptor(), request)
            .await;

        assert!(!response.success());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"], "Ação não reconhecida");
    }
}
