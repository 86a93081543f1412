//! Transport classification tests against a mock manager

use catmgr::errors::{FailureKind, ManagerError};
use catmgr::http::client::HttpClient;
use catmgr::http::command::ManagerCommand;
use catmgr::http::endpoint::EndpointConfig;
use httpmock::prelude::*;

fn client(server: &MockServer) -> HttpClient {
    let endpoint = EndpointConfig::new(&server.url("/manager/text"))
        .unwrap()
        .with_credentials("admin", "secret");
    HttpClient::new(endpoint).unwrap()
}

#[tokio::test]
async fn test_success_returns_raw_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/manager/text/list")
                .header("authorization", "Basic YWRtaW46c2VjcmV0");
            then.status(200)
                .body("OK - Listed applications for virtual host localhost\n/foo:running:0:foo\n");
        })
        .await;

    let response = client(&server).invoke(&ManagerCommand::List, None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        response.raw(),
        "OK - Listed applications for virtual host localhost\n/foo:running:0:foo\n"
    );
    assert_eq!(response.message(), "Listed applications for virtual host localhost");
}

#[tokio::test]
async fn test_unauthorized_is_invalid_credentials() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manager/text/list");
            then.status(401).body("<html>401 Unauthorized</html>");
        })
        .await;

    let err = client(&server).invoke(&ManagerCommand::List, None).await.unwrap_err();

    assert!(matches!(err, ManagerError::InvalidCredentials));
    assert_eq!(err.kind(), FailureKind::Authentication);
    assert_eq!(
        err.to_string(),
        "The username and password you provided are not correct (error 401)"
    );
}

#[tokio::test]
async fn test_forbidden_is_distinct_from_unauthorized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manager/text/list");
            then.status(403).body("<html>403 Access Denied</html>");
        })
        .await;

    let err = client(&server).invoke(&ManagerCommand::List, None).await.unwrap_err();

    assert!(matches!(err, ManagerError::Forbidden));
    assert_eq!(err.kind(), FailureKind::Authorization);
    assert_ne!(err.to_string(), ManagerError::InvalidCredentials.to_string());
}

#[tokio::test]
async fn test_other_status_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manager/text/list");
            then.status(500).body("boom");
        })
        .await;

    let err = client(&server).invoke(&ManagerCommand::List, None).await.unwrap_err();

    assert!(matches!(err, ManagerError::HttpError(_)));
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn test_failure_body_is_protocol_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manager/text/undeploy");
            then.status(200).body("FAIL - Encountered exception");
        })
        .await;

    let command = ManagerCommand::Undeploy {
        path: "/foo".to_string(),
    };
    let err = client(&server).invoke(&command, None).await.unwrap_err();

    match err {
        ManagerError::Protocol(message) => assert_eq!(message, "FAIL - Encountered exception"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_body_is_protocol_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manager/text/list");
            then.status(200);
        })
        .await;

    let err = client(&server).invoke(&ManagerCommand::List, None).await.unwrap_err();

    assert!(matches!(err, ManagerError::Protocol(ref message) if message.is_empty()));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/manager/text/serverinfo")
                .header("user-agent", "catmgr-test/1.0");
            then.status(200).body("OK - Server info\nOS Name: Linux\n");
        })
        .await;

    let endpoint = EndpointConfig::new(&server.url("/manager/text"))
        .unwrap()
        .with_user_agent("catmgr-test/1.0");
    let client = HttpClient::new(endpoint).unwrap();
    client.invoke(&ManagerCommand::ServerInfo, None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let endpoint = EndpointConfig::new("http://127.0.0.1:1/manager/text").unwrap();
    let client = HttpClient::new(endpoint).unwrap();

    let err = client.invoke(&ManagerCommand::List, None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}
