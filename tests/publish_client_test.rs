//! Integration tests for the Kafka REST proxy publisher
//!
//! These tests run the real publisher against a mock proxy and verify the
//! two-level error model: HTTP status first, then the per-record error on
//! the acknowledged offset.

use mockito::{Matcher, Server, ServerGuard};
use tokio::sync::watch;
use ukrlp_sync::adapters::kafka::{KafkaRestProxyPublisher, ProviderReceiver};
use ukrlp_sync::config::KafkaConfig;
use ukrlp_sync::domain::{Provider, PublishError, SyncError};

fn publisher_for(server: &ServerGuard) -> KafkaRestProxyPublisher {
    KafkaRestProxyPublisher::new(&KafkaConfig {
        rest_proxy_url: server.url(),
        topic: "ukrlp-providers".to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn unsignalled() -> watch::Receiver<bool> {
    watch::channel(false).1
}

fn provider(ukprn: i64) -> Provider {
    Provider {
        ukprn,
        provider_name: Some(format!("Provider {ukprn}")),
        accessible_provider_name: None,
        provider_status: "A".to_string(),
        provider_verification_date: None,
        expiry_date: None,
        provider_contacts: Vec::new(),
        verification_details: Vec::new(),
    }
}

#[tokio::test]
async fn publishes_one_keyed_record_to_the_topic() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/topics/ukrlp-providers")
        .match_header("Content-Type", "application/vnd.kafka.json.v2+json")
        .match_header("Accept", "application/vnd.kafka.v2+json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "records": [{
                "key": "10012345",
                "value": {
                    "UnitedKingdomProviderReferenceNumber": 10012345,
                    "ProviderName": "Provider 10012345",
                    "ProviderStatus": "A"
                }
            }]
        })))
        .with_status(200)
        .with_body(r#"{"offsets":[{"partition":2,"offset":41}]}"#)
        .expect(1)
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    publisher
        .send_provider(&provider(10012345), &unsignalled())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_2xx_is_a_transport_error_with_the_body() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/topics/ukrlp-providers")
        .with_status(503)
        .with_body("proxy overloaded")
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    let err = publisher
        .send_provider(&provider(1), &unsignalled())
        .await
        .unwrap_err();

    match err {
        SyncError::Publish(PublishError::Transport {
            ref topic,
            status,
            ref body,
        }) => {
            assert_eq!(topic, "ukrlp-providers");
            assert_eq!(status, 503);
            assert_eq!(body.as_deref(), Some("proxy overloaded"));
            assert_eq!(
                err.to_string(),
                "Publish error: Error posting message to ukrlp-providers, \
                 http status 503 returned.\nproxy overloaded"
            );
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_wins_even_with_a_parseable_offset_body() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/topics/ukrlp-providers")
        .with_status(500)
        .with_body(r#"{"offsets":[{"partition":0,"offset":7}]}"#)
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    let err = publisher
        .send_provider(&provider(1), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Publish(PublishError::Transport { status: 500, .. })
    ));
}

#[tokio::test]
async fn errored_offset_under_http_200_is_an_application_error() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/topics/ukrlp-providers")
        .with_status(200)
        .with_body(
            r#"{"offsets":[{"partition":-1,"offset":-1,"error_code":"50002","error":"Broker message format error"}]}"#,
        )
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    let err = publisher
        .send_provider(&provider(1), &unsignalled())
        .await
        .unwrap_err();

    match err {
        SyncError::Publish(PublishError::Offset {
            status,
            partition,
            offset,
            ref error_code,
            ref error,
        }) => {
            assert_eq!(status, 200);
            assert_eq!(partition, -1);
            assert_eq!(offset, -1);
            assert_eq!(error_code.as_deref(), Some("50002"));
            assert_eq!(error.as_deref(), Some("Broker message format error"));
            assert_eq!(
                err.to_string(),
                "Publish error: Offset reports an error. \
                 Partition=-1, Offset=-1, Code=50002\nBroker message format error"
            );
        }
        other => panic!("expected an offset error, got {other:?}"),
    }
}

#[tokio::test]
async fn offset_error_message_alone_still_fails() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/topics/ukrlp-providers")
        .with_status(200)
        .with_body(r#"{"offsets":[{"partition":0,"offset":3,"error":"leader not available"}]}"#)
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    let err = publisher
        .send_provider(&provider(1), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Publish(PublishError::Offset {
            error_code: None,
            ..
        })
    ));
}

#[tokio::test]
async fn missing_offsets_is_an_invalid_response() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/topics/ukrlp-providers")
        .with_status(200)
        .with_body(r#"{"offsets":[]}"#)
        .create_async()
        .await;

    let publisher = publisher_for(&server);
    let err = publisher
        .send_provider(&provider(1), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Publish(PublishError::InvalidResponse(_))
    ));
}
