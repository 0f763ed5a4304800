//! Delegation router integration tests
//!
//! Case-insensitive name matching, not-found as a displayable outcome,
//! first-match-wins on duplicate names, and the full discovery-to-delegation
//! scenario with one dead endpoint.


use agenthost::agent::{AgentDiscovery, AGENT_CARD_PATH};
use agenthost::registry::AgentRegistry;
use agenthost::routing::DelegationRouter;
use agenthost::testing::mocks::card_json;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_agent(server: &MockServer, name: &str, reply: &str) {
    Mock::given(method("GET"))
        .and(path(AGENT_CARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json(name, &server.uri())))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": {"message": {"parts": [{"text": reply}]}}}
        })))
        .mount(server)
        .await;
}

fn router(urls: Vec<String>) -> DelegationRouter {
    let config = test_helpers::test_config();
    let discovery = AgentDiscovery::new(
        AgentRegistry::from_urls(urls),
        Duration::from_secs(config.http.discovery_timeout_secs),
    )
    .unwrap();
    DelegationRouter::new(discovery)
        .with_delegation_timeout(Duration::from_secs(config.http.delegation_timeout_secs))
}

#[tokio::test]
async fn test_delegation_matches_case_insensitively() {
    let server = MockServer::start().await;
    serve_agent(&server, "Writer", "page built").await;

    let router = router(vec![server.uri()]);

    assert_eq!(
        router.delegate("writer", "build it").await.unwrap(),
        "page built"
    );
    assert_eq!(
        router.delegate("WRITER", "build it").await.unwrap(),
        "page built"
    );
    assert_eq!(
        router.delegate("Writer", "build it").await.unwrap(),
        "page built"
    );
}

#[tokio::test]
async fn test_unknown_name_returns_not_found_string() {
    let server = MockServer::start().await;
    serve_agent(&server, "Writer", "irrelevant").await;

    let result = router(vec![server.uri()])
        .delegate("Researcher", "find things")
        .await
        .unwrap();

    assert_eq!(result, "Agent 'Researcher' not found");
}

#[tokio::test]
async fn test_duplicate_names_resolve_to_first_registry_entry() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    serve_agent(&first, "Writer", "from first").await;
    serve_agent(&second, "writer", "from second").await;

    let result = router(vec![first.uri(), second.uri()])
        .delegate("WRITER", "hello")
        .await
        .unwrap();

    assert_eq!(result, "from first");
}

#[tokio::test]
async fn test_list_agents_returns_resolved_cards() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    serve_agent(&a, "Writer", "x").await;
    serve_agent(&b, "Editor", "y").await;

    let cards = router(vec![a.uri(), b.uri()]).list_agents().await;

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Writer");
    assert_eq!(cards[1].name, "Editor");
}

// Full scenario: one registered endpoint is dead, the other answers with an
// empty status message and a substantive history entry.
#[tokio::test]
async fn test_dead_endpoint_plus_history_fallback_scenario() {
    let dead = MockServer::start().await;
    let writer = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AGENT_CARD_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&dead)
        .await;

    Mock::given(method("GET"))
        .and(path(AGENT_CARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("Writer", &writer.uri())))
        .mount(&writer)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "status": {"message": {"parts": [{"text": ""}]}},
                "history": [
                    {"role": "agent", "parts": [{"kind": "text", "text": "Done: hello.html created."}]}
                ]
            }
        })))
        .mount(&writer)
        .await;

    let router = router(vec![dead.uri(), writer.uri()]);

    let cards = router.list_agents().await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Writer");

    let result = router.delegate("writer", "hello").await.unwrap();
    assert_eq!(result, "Done: hello.html created.");
}
