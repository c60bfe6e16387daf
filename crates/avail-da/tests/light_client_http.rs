//! End-to-end tests of the adapter against an HTTP light client double.

use std::sync::Arc;

use avail_da::{
    decode_identifier, encode_identifier, AvailDaConfig, AvailDaService, DaError,
    DataAvailabilityApi,
};
use serde_json::json;
use tokio::sync::watch;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestContext {
    server: MockServer,
    service: Arc<AvailDaService>,
    _shutdown: watch::Sender<bool>,
}

async fn setup() -> TestContext {
    let server = MockServer::start().await;
    let config = AvailDaConfig {
        lc_url: format!("{}/v2", server.uri()),
        ..AvailDaConfig::for_testing()
    };
    let (shutdown, rx) = watch::channel(false);
    let service = AvailDaService::connect(&config, rx).unwrap();
    TestContext {
        server,
        service: Arc::new(service),
        _shutdown: shutdown,
    }
}

fn submit_response(block_number: u32, tx_hash: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "block_number": block_number,
        "block_hash": format!("mocked_block_hash_{}", block_number),
        "hash": tx_hash,
        "index": 0,
    }))
}

async fn mount_submit(server: &MockServer, data: &str, block_number: u32, tx_hash: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/submit"))
        .and(body_json(json!({ "data": data })))
        .respond_with(submit_response(block_number, tx_hash))
        .mount(server)
        .await;
}

async fn mount_block(server: &MockServer, block_number: u32, transactions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/blocks/{}/data", block_number)))
        .and(query_param("fields", "data,extrinsic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "block_number": block_number,
            "data_transactions": transactions,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_submit_single_message() {
    let ctx = setup().await;
    mount_submit(&ctx.server, "bWVzc2FnZSAx", 42, "mocked_transaction_hash").await;

    let result = ctx.service.submit(vec![b"message 1".to_vec()]).await.unwrap();

    assert_eq!(result.identifiers.len(), 1);
    assert_eq!(result.proofs.len(), 1);
    assert_eq!(decode_identifier(&result.identifiers[0]).unwrap(), 42);
    assert_eq!(result.proofs[0], b"mocked_transaction_hash".to_vec());
}

#[tokio::test]
async fn test_submit_batch_then_get_each_block() {
    let ctx = setup().await;
    mount_submit(&ctx.server, "TW9ja2VkRGF0YQ==", 42, "tx42").await;
    mount_submit(&ctx.server, "TW9ja2VkRGF0YTI=", 43, "tx43").await;
    mount_block(
        &ctx.server,
        42,
        json!([{ "data": "TW9ja2VkRGF0YQ==", "extrinsic": "tx42" }]),
    )
    .await;
    mount_block(
        &ctx.server,
        43,
        json!([{ "data": "TW9ja2VkRGF0YTI=", "extrinsic": "tx43" }]),
    )
    .await;

    let result = ctx
        .service
        .submit(vec![b"MockedData".to_vec(), b"MockedData2".to_vec()])
        .await
        .unwrap();
    assert_eq!(result.identifiers.len(), 2);

    for id in &result.identifiers {
        let blobs = ctx.service.get(std::slice::from_ref(id)).await.unwrap();
        let expected: &[u8] = match decode_identifier(id).unwrap() {
            42 => b"MockedData",
            43 => b"MockedData2",
            other => panic!("unexpected block {}", other),
        };
        assert_eq!(blobs, vec![expected.to_vec()]);
    }

    let proofs = ctx
        .service
        .get_proofs(&[encode_identifier(43).to_vec()])
        .await
        .unwrap();
    assert_eq!(proofs, vec![b"tx43".to_vec()]);
}

#[tokio::test]
async fn test_get_not_found_is_empty() {
    let ctx = setup().await;
    Mock::given(method("GET"))
        .and(path("/v2/blocks/99/data"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&ctx.server)
        .await;

    let blobs = ctx
        .service
        .get(&[encode_identifier(99).to_vec()])
        .await
        .unwrap();
    assert!(blobs.is_empty());
}

#[tokio::test]
async fn test_get_waits_out_processing_block() {
    let ctx = setup().await;
    // Mounted first so it wins while it has uses left.
    Mock::given(method("GET"))
        .and(path("/v2/blocks/10/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Processing block"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&ctx.server)
        .await;
    mount_block(&ctx.server, 10, json!([{ "data": "YQ==", "extrinsic": "e" }])).await;

    let blobs = ctx
        .service
        .get(&[encode_identifier(10).to_vec()])
        .await
        .unwrap();
    assert_eq!(blobs, vec![b"a".to_vec()]);
}

#[tokio::test]
async fn test_get_processing_forever_exhausts_retries() {
    let ctx = setup().await;
    Mock::given(method("GET"))
        .and(path("/v2/blocks/11/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Processing block"))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .service
        .get(&[encode_identifier(11).to_vec()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DaError::RetriesExhausted {
            block_number: 11,
            attempts: 5
        }
    ));
}

#[tokio::test]
async fn test_get_short_identifier() {
    let ctx = setup().await;

    let err = ctx.service.get(&[vec![0, 42]]).await.unwrap_err();
    assert!(matches!(err, DaError::MalformedIdentifier { .. }));

    let requests = ctx.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_one_failing_blob_fails_batch() {
    let ctx = setup().await;
    mount_submit(&ctx.server, "TW9ja2VkRGF0YQ==", 42, "tx42").await;
    Mock::given(method("POST"))
        .and(path("/v2/submit"))
        .and(body_json(json!({ "data": "YmFk" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .service
        .submit(vec![b"MockedData".to_vec(), b"bad".to_vec()])
        .await
        .unwrap_err();

    match err {
        DaError::SubmissionFailed {
            failed,
            total,
            cause,
        } => {
            assert_eq!((failed, total), (1, 2));
            assert!(matches!(*cause, DaError::Decode(_)));
        }
        other => panic!("expected SubmissionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_light_client() {
    let (_tx, rx) = watch::channel(false);
    let config = AvailDaConfig {
        lc_url: "http://127.0.0.1:1/v2".to_string(),
        ..AvailDaConfig::for_testing()
    };
    let service = AvailDaService::connect(&config, rx).unwrap();

    let err = service.submit(vec![b"x".to_vec()]).await.unwrap_err();
    assert!(err.is_submission_failure());

    let err = service
        .get(&[encode_identifier(1).to_vec()])
        .await
        .unwrap_err();
    assert!(matches!(err, DaError::Transport(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_get_ids_and_submit() {
    let ctx = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/submit"))
        .respond_with(submit_response(77, "shared_tx"))
        .mount(&ctx.server)
        .await;

    let mut handles = Vec::new();
    for i in 0..100u64 {
        let service = Arc::clone(&ctx.service);
        handles.push(tokio::spawn(async move {
            let ids = service.get_ids(i).await.unwrap();
            assert_eq!(ids, vec![encode_identifier(i as u32).to_vec()]);
        }));

        let service = Arc::clone(&ctx.service);
        handles.push(tokio::spawn(async move {
            let blob = format!("blob {}", i).into_bytes();
            let result = service.submit(vec![blob]).await.unwrap();
            assert_eq!(result.identifiers, vec![encode_identifier(77).to_vec()]);
            assert_eq!(result.proofs, vec![b"shared_tx".to_vec()]);
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let requests = ctx.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 100);
}
