//! Integration and property tests for the legal document server API
//!
//! The router is driven through axum-test with a scripted text generator in
//! place of Gemini, so every remote prompt can be inspected.
//!
//! Test categories:
//! - Session lifecycle and upload
//! - Risk analysis, insights and clause card actions
//! - Chat assistant
//! - Error mapping
//! - Path and media type parsing (proptest)

#[cfg(test)]
mod api_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use clause_engine::{
        GenerationError, ScriptedGenerator, TextGenerator, CHAT_APOLOGY, RISK_KEYWORDS,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::router;
    use crate::state::AppState;

    const CONTRACT: &str = "This is a termination clause. This is unrelated. \
                            Liability is excluded here.";

    fn server_for(generator: Arc<dyn TextGenerator>) -> TestServer {
        let state = AppState::new(
            generator,
            RISK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        );
        TestServer::new(router(state, 1024 * 1024)).unwrap()
    }

    fn test_server(generator: ScriptedGenerator) -> (TestServer, Arc<ScriptedGenerator>) {
        let generator = Arc::new(generator);
        (server_for(generator.clone()), generator)
    }

    /// Rates every clause high after a delay; answers anything else at once
    struct SlowRiskGenerator;

    #[async_trait]
    impl TextGenerator for SlowRiskGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            if prompt.starts_with("Evaluate risk level") {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok("high".to_string())
            } else {
                Ok("Chat answer".to_string())
            }
        }
    }

    /// Risk replies keyed on clause content; everything else gets a fixed answer
    fn risk_generator() -> ScriptedGenerator {
        ScriptedGenerator::new(|prompt| {
            if !prompt.starts_with("Evaluate risk level") {
                Ok("Plain answer".to_string())
            } else if prompt.contains("termination") {
                Ok("HIGH".to_string())
            } else {
                Ok("This looks medium".to_string())
            }
        })
    }

    async fn create_session(server: &TestServer) -> String {
        let body: Value = server.post("/api/sessions").await.json();
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn upload_text(server: &TestServer, id: &str, text: &str) -> Value {
        upload_named(server, id, "contract.txt", text).await
    }

    async fn upload_named(server: &TestServer, id: &str, name: &str, text: &str) -> Value {
        let response = server
            .post(&format!("/api/sessions/{}/document", id))
            .json(&json!({
                "name": name,
                "media_type": "text/plain",
                "data_base64": STANDARD.encode(text),
            }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));

        let health: Value = server.get("/health").await.json();
        assert_eq!(health["status"], "healthy");

        let index = server.get("/").await;
        index.assert_status_ok();
        assert!(index.text().contains("Legal Document Simplifier"));
    }

    #[tokio::test]
    async fn test_glossary_and_keywords() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));

        let glossary: Value = server.get("/api/glossary").await.json();
        assert_eq!(glossary["entries"].as_array().unwrap().len(), 11);
        assert_eq!(glossary["entries"][4]["term"], "Force Majeure");

        let keywords: Value = server.get("/api/keywords").await.json();
        assert_eq!(keywords["keywords"][0], "termination");
        assert_eq!(keywords["keywords"].as_array().unwrap().len(), 14);
    }

    #[tokio::test]
    async fn test_upload_and_preview() {
        let (server, generator) = test_server(ScriptedGenerator::replying("low"));
        let id = create_session(&server).await;

        let uploaded = upload_text(&server, &id, CONTRACT).await;
        assert_eq!(uploaded["media_type"], "plain");
        assert_eq!(uploaded["preview"], format!("{} ...", CONTRACT));

        let preview: Value = server
            .get(&format!("/api/sessions/{}/document", id))
            .await
            .json();
        assert_eq!(preview["name"], "contract.txt");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_base64() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));
        let id = create_session(&server).await;

        let response = server
            .post(&format!("/api/sessions/{}/document", id))
            .json(&json!({"name": "a.txt", "data_base64": "%%% not base64"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_upload_reports_extraction_failure() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));
        let id = create_session(&server).await;

        let response = server
            .post(&format!("/api/sessions/{}/document", id))
            .json(&json!({
                "name": "broken.docx",
                "data_base64": STANDARD.encode("not a word file"),
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));

        let response = server
            .post("/api/sessions/00000000-0000-0000-0000-000000000000/simplify")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_ended_session_is_gone() {
        let (server, _) = test_server(ScriptedGenerator::replying("low"));
        let id = create_session(&server).await;

        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/sessions/{}/chat", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_simplify_requires_document() {
        let (server, generator) = test_server(ScriptedGenerator::replying("summary"));
        let id = create_session(&server).await;

        let response = server.post(&format!("/api/sessions/{}/simplify", id)).await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "NO_DOCUMENT");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_simplify_returns_generated_text() {
        let (server, generator) = test_server(ScriptedGenerator::replying("It ends early."));
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let body: Value = server
            .post(&format!("/api/sessions/{}/simplify", id))
            .await
            .json();

        assert_eq!(body["text"], "It ends early.");
        assert!(generator.prompts()[0].starts_with("Explain this legal text in simple English:"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway() {
        let (server, _) = test_server(ScriptedGenerator::new(|_| {
            Err(GenerationError::Service {
                status: 403,
                body: "bad key".into(),
            })
        }));
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let response = server.post(&format!("/api/sessions/{}/simplify", id)).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(response.json::<Value>()["code"], "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn test_empty_clause_explainer_is_rejected() {
        let (server, generator) = test_server(ScriptedGenerator::replying("explained"));
        let id = create_session(&server).await;

        let response = server
            .post(&format!("/api/sessions/{}/explain", id))
            .json(&json!({"clause": "   "}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "EMPTY_INPUT");
        assert_eq!(body["error"], "Please enter a clause first");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analysis_highlights_and_builds_cards() {
        let (server, _) = test_server(risk_generator());
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let body: Value = server
            .post(&format!("/api/sessions/{}/analysis", id))
            .await
            .json();

        assert_eq!(body["success"], true);
        let cards = body["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["heading"], "High Risk: This is a termination clause...");
        assert_eq!(cards[1]["risk_label"], "medium");
        assert_eq!(cards[1]["expanded"], false);
        assert_eq!(
            cards[1]["actions"],
            json!([
                {"action": "explain", "label": "Explain this clause"},
                {"action": "suggest_fair_terms", "label": "Suggest Fair Terms"},
            ])
        );

        let html = body["highlighted_html"].as_str().unwrap();
        assert!(html.contains("background-color:#ffcccc; font-weight:bold'>This is a termination clause</span>"));
        assert!(html.contains("background-color:#fff2cc; font-weight:bold'>Liability is excluded here</span>"));
        assert!(body["failures"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insights_summary_chart_and_glossary() {
        let (server, _) = test_server(risk_generator());
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let body: Value = server
            .post(&format!("/api/sessions/{}/insights", id))
            .await
            .json();

        assert_eq!(
            body["executive_summary"],
            json!([
                "1. High Risk: This is a termination clause...",
                "2. Medium Risk: Liability is excluded here...",
            ])
        );
        assert_eq!(body["tally"], json!({"high": 1, "medium": 1, "low": 0}));
        let chart = body["chart"].as_array().unwrap();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[0]["color"], "red");
        assert_eq!(chart[0]["percent"], 50.0);
        assert_eq!(chart[2]["count"], 0);
        assert_eq!(body["glossary"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_classification_failure_is_not_fatal() {
        let (server, _) = test_server(ScriptedGenerator::new(|prompt| {
            if prompt.contains("Liability") {
                Err(GenerationError::Transport("reset".into()))
            } else {
                Ok("low".into())
            }
        }));
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let response = server.post(&format!("/api/sessions/{}/insights", id)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["cards"].as_array().unwrap().len(), 2);
        assert_eq!(body["failures"][0]["index"], 1);
        assert_eq!(body["tally"], json!({"high": 0, "medium": 0, "low": 1}));
    }

    #[tokio::test]
    async fn test_clause_card_actions() {
        let (server, generator) = test_server(risk_generator());
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;
        server
            .post(&format!("/api/sessions/{}/analysis", id))
            .await
            .assert_status_ok();

        let body: Value = server
            .post(&format!("/api/sessions/{}/clauses/1/suggest", id))
            .await
            .json();
        assert_eq!(body["text"], "Plain answer");
        assert_eq!(
            generator.prompts().last().unwrap(),
            "Suggest fair/legal improvements for this clause:\n\nLiability is excluded here"
        );

        server
            .post(&format!("/api/sessions/{}/clauses/9/explain", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .post(&format!("/api/sessions/{}/clauses/0/redline", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_toggle_and_send() {
        let (server, generator) = test_server(ScriptedGenerator::replying("Clause 9."));
        let id = create_session(&server).await;

        let toggled: Value = server
            .post(&format!("/api/sessions/{}/chat/toggle", id))
            .await
            .json();
        assert_eq!(toggled["expanded"], true);

        let body: Value = server
            .post(&format!("/api/sessions/{}/chat", id))
            .json(&json!({"message": "What is the termination clause?"}))
            .await
            .json();

        assert_eq!(body["reply"], json!({"speaker": "assistant", "message": "Clause 9."}));
        assert_eq!(
            body["transcript"],
            json!([
                {"speaker": "user", "message": "What is the termination clause?"},
                {"speaker": "assistant", "message": "Clause 9."},
            ])
        );
        assert_eq!(
            generator.prompts(),
            vec!["Contract Excerpt:\n\n\nUser: What is the termination clause?\nAI:".to_string()]
        );

        let state: Value = server
            .get(&format!("/api/sessions/{}/chat", id))
            .await
            .json();
        assert_eq!(state["expanded"], true);
        assert_eq!(state["transcript"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_failure_appends_apology() {
        let (server, _) = test_server(ScriptedGenerator::failing());
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let response = server
            .post(&format!("/api/sessions/{}/chat", id))
            .json(&json!({"message": "Who pays?"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["reply"]["message"], CHAT_APOLOGY);
        assert_eq!(body["transcript"][0]["message"], "Who pays?");
    }

    #[tokio::test]
    async fn test_actions_during_analysis_are_not_lost() {
        let server = server_for(Arc::new(SlowRiskGenerator));
        let id = create_session(&server).await;
        upload_text(&server, &id, CONTRACT).await;

        let analysis_url = format!("/api/sessions/{}/analysis", id);
        let chat_url = format!("/api/sessions/{}/chat", id);
        let (analysis, chat, _) = tokio::join!(
            async { server.post(&analysis_url).await },
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                server
                    .post(&chat_url)
                    .json(&json!({"message": "Who pays?"}))
                    .await
            },
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                upload_named(&server, &id, "new.txt", "Nothing relevant here.").await
            },
        );

        analysis.assert_status_ok();
        assert_eq!(analysis.json::<Value>()["cards"].as_array().unwrap().len(), 2);
        chat.assert_status_ok();
        assert_eq!(chat.json::<Value>()["transcript"].as_array().unwrap().len(), 2);

        let state: Value = server.get(&chat_url).await.json();
        assert_eq!(state["transcript"].as_array().unwrap().len(), 2);
        let preview: Value = server
            .get(&format!("/api/sessions/{}/document", id))
            .await
            .json();
        assert_eq!(preview["name"], "new.txt");

        // The later upload dropped the earlier analysis
        server
            .post(&format!("/api/sessions/{}/clauses/0/explain", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use shared_types::MediaType;

    use crate::api::{parse_clause_action, resolve_media_type};

    proptest! {
        /// Property: only the two card actions parse
        #[test]
        fn unknown_clause_actions_rejected(action in "[a-z_]{1,12}".prop_filter(
            "Must not be a valid action",
            |s| !matches!(s.as_str(), "explain" | "suggest" | "suggest_fair_terms")
        )) {
            prop_assert!(parse_clause_action(&action).is_err());
        }

        /// Property: without a declared type the extension decides
        #[test]
        fn extension_decides_media_type(stem in "[a-z]{1,10}", ext in prop_oneof![
            Just(("pdf", MediaType::Pdf)),
            Just(("PDF", MediaType::Pdf)),
            Just(("docx", MediaType::Docx)),
            Just(("txt", MediaType::Plain)),
            Just(("md", MediaType::Plain)),
        ]) {
            let name = format!("{}.{}", stem, ext.0);
            prop_assert_eq!(resolve_media_type(None, &name), ext.1);
        }

        /// Property: any declared non-PDF/Word MIME type decodes as text
        #[test]
        fn unknown_mime_is_plain(mime in "text/[a-z]{1,8}") {
            prop_assert_eq!(resolve_media_type(Some(mime.as_str()), "file.pdf"), MediaType::Plain);
        }
    }
}
