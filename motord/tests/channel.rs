use std::time::Duration;

use httpmock::prelude::*;
use motord::{CommandClient, PollError};
use protocol::Direction;

#[tokio::test]
async fn poll_decodes_a_command() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_motor_commands");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"direction":"CW","motor_on":true,"quit":false}"#);
        })
        .await;

    let client =
        CommandClient::new(server.url("/get_motor_commands"), Duration::from_secs(1)).unwrap();
    let cmd = client.poll().await.unwrap();
    assert_eq!(cmd.direction, Direction::Cw);
    assert!(cmd.motor_on);
    assert!(!cmd.quit);
}

#[tokio::test]
async fn repeated_server_errors_stay_nonfatal() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/get_motor_commands");
            then.status(500);
        })
        .await;

    let client =
        CommandClient::new(server.url("/get_motor_commands"), Duration::from_secs(1)).unwrap();
    for _ in 0..3 {
        let err = client.poll().await.unwrap_err();
        assert!(matches!(err, PollError::Status(s) if s.as_u16() == 500));
    }
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn malformed_payload_is_reported_as_such() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/get_motor_commands");
            then.status(200).body("not json at all");
        })
        .await;

    let client =
        CommandClient::new(server.url("/get_motor_commands"), Duration::from_secs(1)).unwrap();
    assert!(matches!(
        client.poll().await.unwrap_err(),
        PollError::Malformed(_)
    ));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // nothing listens on this port
    let client = CommandClient::new(
        "http://127.0.0.1:9/get_motor_commands",
        Duration::from_millis(200),
    )
    .unwrap();
    assert!(matches!(
        client.poll().await.unwrap_err(),
        PollError::Transport(_)
    ));
}
