//! Integration tests for the UKRLP query client
//!
//! These tests run the real client against a mock SOAP endpoint and verify:
//! - One query per provider lifecycle status, every pass
//! - Results merge with UKPRN-based deduplication
//! - A SOAP fault wins over the HTTP status
//! - A non-2xx response without a fault is a transport error

use mockito::{Matcher, Server, ServerGuard};
use tokio::sync::watch;
use ukrlp_sync::adapters::ukrlp::{UkrlpApi, UkrlpApiClient};
use ukrlp_sync::config::UkrlpConfig;
use ukrlp_sync::domain::{SyncError, UkrlpError};

const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const UKRLP_NS: &str = "http://ukrlp.co.uk.server.ws.v3";

fn client_for(server: &ServerGuard) -> UkrlpApiClient {
    UkrlpApiClient::new(&UkrlpConfig {
        base_url: server.url(),
        stakeholder_id: 9,
        timeout_seconds: 5,
    })
    .unwrap()
}

fn unsignalled() -> watch::Receiver<bool> {
    watch::channel(false).1
}

fn status_matcher(status: &str) -> Matcher {
    Matcher::Regex(format!("<ProviderStatus>{status}</ProviderStatus>"))
}

fn record_xml(ukprn: i64, status: &str) -> String {
    format!(
        "<MatchingProviderRecords>\
           <UnitedKingdomProviderReferenceNumber>{ukprn}</UnitedKingdomProviderReferenceNumber>\
           <ProviderName>Provider {ukprn}</ProviderName>\
           <ProviderStatus>{status}</ProviderStatus>\
         </MatchingProviderRecords>"
    )
}

fn response_with_records(records: &[String]) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <S:Envelope xmlns:S=\"{SOAP_NS}\"><S:Body>\
           <ukrlp:ProviderQueryResponse xmlns:ukrlp=\"{UKRLP_NS}\">{}</ukrlp:ProviderQueryResponse>\
         </S:Body></S:Envelope>",
        records.concat()
    )
}

fn empty_response() -> String {
    response_with_records(&[])
}

fn fault_response(fault_code: &str, fault_string: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <S:Envelope xmlns:S=\"{SOAP_NS}\"><S:Body>\
           <S:Fault>\
             <faultcode>{fault_code}</faultcode>\
             <faultstring>{fault_string}</faultstring>\
           </S:Fault>\
         </S:Body></S:Envelope>"
    )
}

#[tokio::test]
async fn queries_each_status_once_and_merges_with_dedup() {
    let mut server = Server::new_async().await;

    let mock_a = server
        .mock("POST", "/")
        .match_body(status_matcher("A"))
        .with_status(200)
        .with_body(response_with_records(&[
            record_xml(1, "A"),
            record_xml(2, "A"),
        ]))
        .expect(1)
        .create_async()
        .await;
    let mock_v = server
        .mock("POST", "/")
        .match_body(status_matcher("V"))
        .with_status(200)
        .with_body(response_with_records(&[
            record_xml(2, "V"),
            record_xml(3, "V"),
        ]))
        .expect(1)
        .create_async()
        .await;
    let mock_pd1 = server
        .mock("POST", "/")
        .match_body(status_matcher("PD1"))
        .with_status(200)
        .with_body(empty_response())
        .expect(1)
        .create_async()
        .await;
    let mock_pd2 = server
        .mock("POST", "/")
        .match_body(status_matcher("PD2"))
        .with_status(200)
        .with_body(empty_response())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let providers = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap();

    // UKPRN 2 appears under both A and V but is one logical change
    let ukprns: Vec<i64> = providers.iter().map(|p| p.ukprn).collect();
    assert_eq!(ukprns, vec![1, 2, 3]);

    mock_a.assert_async().await;
    mock_v.assert_async().await;
    mock_pd1.assert_async().await;
    mock_pd2.assert_async().await;
}

#[tokio::test]
async fn fans_out_to_all_statuses_even_when_everything_is_empty() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(empty_response())
        .expect(4)
        .create_async()
        .await;

    let client = client_for(&server);
    let providers = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap();

    assert!(providers.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn sends_the_protocol_headers_and_updated_since() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("SOAPAction", "retrieveAllProviders")
        .match_header("Content-Type", Matcher::Regex("text/xml".to_string()))
        .match_body(Matcher::Regex("<ProviderUpdatedSince>".to_string()))
        .with_status(200)
        .with_body(empty_response())
        .expect(4)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn soap_fault_wins_over_http_status() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/")
        .with_status(500)
        .with_body(fault_response("soap:Server", "stakeholder not recognised"))
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap_err();

    match err {
        SyncError::Ukrlp(UkrlpError::Fault {
            fault_code,
            fault_string,
        }) => {
            assert_eq!(fault_code.as_deref(), Some("soap:Server"));
            assert_eq!(fault_string.as_deref(), Some("stakeholder not recognised"));
        }
        other => panic!("expected a SOAP fault, got {other:?}"),
    }
}

#[tokio::test]
async fn soap_fault_is_raised_even_under_http_200() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(fault_response("soap:Client", "malformed criteria"))
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Ukrlp(UkrlpError::Fault { .. })
    ));
}

#[tokio::test]
async fn non_2xx_without_fault_is_a_transport_error() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/")
        .with_status(503)
        .with_body("<html><body>Service Unavailable</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Ukrlp(UkrlpError::Transport { status: 503 })
    ));
}

#[tokio::test]
async fn garbage_body_under_http_200_is_a_malformed_response() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/")
        .with_status(200)
        .with_body("this is not xml")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .providers_changed_since(chrono::Utc::now(), &unsignalled())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Ukrlp(UkrlpError::MalformedResponse(_))
    ));
}
