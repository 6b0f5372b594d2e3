//! Call/response integration tests
//!
//! Drives `JrhClient::call` against a mock server and checks each way a
//! response can succeed or fail.

mod common;

use axum::http::StatusCode;
use common::{error_response, success, MockHttpServer};
use jrh_client::JrhClient;
use jrh_core::ErrorKind;
use serde::Deserialize;
use serde_json::json;

fn client_for(server: &MockHttpServer) -> JrhClient {
    JrhClient::builder("127.0.0.1", server.port())
        .credentials("user", "pass")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_subtract_returns_result() {
    let server = MockHttpServer::with_handler(|req| {
        let params = req.json()["params"].clone();
        let difference = params[0].as_i64().unwrap() - params[1].as_i64().unwrap();
        (StatusCode::OK, success(req, json!(difference)))
    })
    .await;

    let client = client_for(&server);
    let result = client.call("subtract", vec![json!(42), json!(23)]).await.unwrap();
    assert_eq!(result, json!(19));

    let sent = server.single_request().json();
    assert_eq!(sent["jsonrpc"], "2.0");
    assert_eq!(sent["method"], "subtract");
    assert_eq!(sent["params"], json!([42, 23]));
    assert!(sent["id"].is_string());

    server.shutdown().await;
}

#[tokio::test]
async fn test_null_result_is_success() {
    let server = MockHttpServer::returning(json!(null)).await;

    let client = client_for(&server);
    let result = client.call("ping", vec![]).await.unwrap();
    assert!(result.is_null());

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_params_sent_as_array() {
    let server = MockHttpServer::returning(json!(1)).await;

    let client = client_for(&server);
    client.call("getblockcount", vec![]).await.unwrap();

    assert_eq!(server.single_request().json()["params"], json!([]));

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_version_is_tolerated() {
    let server = MockHttpServer::with_handler(|req| {
        (StatusCode::OK, json!({"result": "ok", "id": req.id()}).to_string())
    })
    .await;

    let client = client_for(&server);
    assert_eq!(client.call("status", vec![]).await.unwrap(), json!("ok"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_version_wins_over_server_error() {
    let server = MockHttpServer::with_handler(|req| {
        let body = json!({
            "jsonrpc": "1.0",
            "error": {"code": -32601, "message": "Method not found"},
            "id": req.id(),
        });
        (StatusCode::OK, body.to_string())
    })
    .await;

    let client = client_for(&server);
    match client.call("anything", vec![]).await.unwrap_err().into_kind() {
        ErrorKind::ProtocolMismatch { received } => assert_eq!(received, json!("1.0")),
        other => panic!("Expected ProtocolMismatch, got {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_id_mismatch() {
    let server = MockHttpServer::with_handler(|_req| {
        (
            StatusCode::OK,
            json!({"jsonrpc": "2.0", "result": 1, "id": "not-your-id"}).to_string(),
        )
    })
    .await;

    let client = client_for(&server);
    let err = client.call("anything", vec![]).await.unwrap_err();

    let sent_id = server.single_request().id();
    match err.into_kind() {
        ErrorKind::IdMismatch { expected, received } => {
            assert_eq!(json!(expected.as_str()), sent_id);
            assert_eq!(received, Some(json!("not-your-id")));
        }
        other => panic!("Expected IdMismatch, got {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_server_error_is_surfaced() {
    let server = MockHttpServer::with_handler(|req| {
        (StatusCode::OK, error_response(req, -32601, "Method not found"))
    })
    .await;

    let client = client_for(&server);
    match client.call("no_such_method", vec![]).await.unwrap_err().into_kind() {
        ErrorKind::Server(data) => {
            assert_eq!(data.code, -32601);
            assert_eq!(data.message, "Method not found");
            assert!(data.data.is_none());
        }
        other => panic!("Expected Server error, got {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_server_error_with_data() {
    let server = MockHttpServer::with_handler(|req| {
        let body = json!({
            "jsonrpc": "2.0",
            "error": {"code": -5, "message": "Invalid address", "data": {"field": "addr"}},
            "id": req.id(),
        });
        (StatusCode::OK, body.to_string())
    })
    .await;

    let client = client_for(&server);
    match client.call("validate", vec![json!("xyz")]).await.unwrap_err().into_kind() {
        ErrorKind::Server(data) => assert_eq!(data.data, Some(json!({"field": "addr"}))),
        other => panic!("Expected Server error, got {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_reserved_method_sends_nothing() {
    let server = MockHttpServer::returning(json!(1)).await;

    let client = client_for(&server);
    let err = client.call("rpc.discover", vec![]).await.unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::ReservedMethod { .. }));
    assert!(server.requests().is_empty());
    assert!(!client.has_connection().await);

    server.shutdown().await;
}

#[tokio::test]
async fn test_ids_differ_between_calls() {
    let server = MockHttpServer::returning(json!(true)).await;

    let client = client_for(&server);
    client.call("a", vec![]).await.unwrap();
    client.call("b", vec![]).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].id(), requests[1].id());
    assert_eq!(requests[0].id().as_str().unwrap().len(), 16);

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_calls_on_one_client() {
    let server = MockHttpServer::with_handler(|req| {
        let echoed = req.json()["params"][0].clone();
        (StatusCode::OK, success(req, echoed))
    })
    .await;

    let client = client_for(&server);
    let (a, b) = tokio::join!(
        client.call("echo", vec![json!("a")]),
        client.call("echo", vec![json!("b")]),
    );

    assert_eq!(a.unwrap(), json!("a"));
    assert_eq!(b.unwrap(), json!("b"));

    server.shutdown().await;
}

#[derive(Debug, Deserialize, PartialEq)]
struct NodeInfo {
    version: String,
    blocks: u64,
}

#[tokio::test]
async fn test_call_as_typed_result() {
    let server = MockHttpServer::returning(json!({"version": "0.21", "blocks": 700000})).await;

    let client = client_for(&server);
    let info: NodeInfo = client.call_as("getinfo", vec![]).await.unwrap();
    assert_eq!(
        info,
        NodeInfo {
            version: "0.21".to_string(),
            blocks: 700000,
        }
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_call_as_type_mismatch() {
    let server = MockHttpServer::returning(json!("not a number")).await;

    let client = client_for(&server);
    let err = client.call_as::<u64>("getblockcount", vec![]).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Serialization(_)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_errors_carry_client_endpoint() {
    let server = MockHttpServer::with_handler(|req| {
        if req.json()["method"] == "fail" {
            (StatusCode::OK, error_response(req, -32000, "boom"))
        } else {
            (StatusCode::OK, success(req, json!("text")))
        }
    })
    .await;

    let client = client_for(&server);
    let expected = format!("http://127.0.0.1:{}/", server.port());
    assert_eq!(client.endpoint(), expected);

    let server_error = client.call("fail", vec![]).await.unwrap_err();
    assert_eq!(server_error.endpoint(), Some(expected.as_str()));
    assert!(server_error.to_string().contains(&expected));

    let reserved = client.call("rpc.discover", vec![]).await.unwrap_err();
    assert_eq!(reserved.endpoint(), Some(expected.as_str()));

    let mismatch = client.call_as::<u64>("text", vec![]).await.unwrap_err();
    assert!(matches!(mismatch.kind(), ErrorKind::Serialization(_)));
    assert_eq!(mismatch.endpoint(), Some(expected.as_str()));

    server.shutdown().await;
}
