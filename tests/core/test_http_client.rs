//! Pinecone HTTP client against a local fake service

use crate::common::{
    assert_stats_line, closed_port_url, http_config, output_string, sample_stats, FakePinecone,
    TEST_INDEX,
};
use pinecheck::core::client::{PineconeClient, VectorService};
use pinecheck::core::config::ResolveMode;
use pinecheck::core::error::ProbeError;
use pinecheck::core::prober::{probe, run};
use pinecheck::core::types::OutputFormat;

// =============================================================================
// Resolution and stats
// =============================================================================

/// Eager resolution describes the index, then queries its host
#[tokio::test]
async fn test_eager_probe_end_to_end() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(42));
    let config = http_config(&fake.url, TEST_INDEX);
    let mut out = Vec::new();

    let report = probe(&config, OutputFormat::Human, &mut out)
        .await
        .expect("probe against fake should succeed");

    let text = output_string(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(TEST_INDEX));
    assert_stats_line(lines[1]);

    assert_eq!(report.stats, sample_stats(42));
    assert_eq!(
        report.host.as_deref(),
        Some(format!("{}/data/{}", fake.url, TEST_INDEX).as_str())
    );
    assert_eq!(fake.count("/indexes/"), 1);
    assert_eq!(fake.count("/data/"), 1);
}

/// Every request carries the key and API version headers
#[tokio::test]
async fn test_requests_carry_headers() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(1));
    let config = http_config(&fake.url, TEST_INDEX);
    let mut out = Vec::new();

    probe(&config, OutputFormat::Json, &mut out).await.unwrap();

    let requests = fake.requests();
    assert!(!requests.is_empty());
    for request in requests {
        assert_eq!(request.api_key.as_deref(), Some("test-key"));
        assert_eq!(request.api_version.as_deref(), Some("2024-07"));
    }
    let stats_request = fake
        .requests()
        .into_iter()
        .find(|r| r.path.ends_with("/describe_index_stats"))
        .expect("stats request");
    assert_eq!(stats_request.method, "POST");
}

/// Lazy resolution: handle creation sends nothing
#[tokio::test]
async fn test_lazy_handle_sends_nothing() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(3));
    let mut config = http_config(&fake.url, TEST_INDEX);
    config.probe.resolve = ResolveMode::Lazy;

    let client = PineconeClient::connect(&config).unwrap();
    let handle = client.index(TEST_INDEX).await.unwrap();
    assert!(!handle.is_resolved());
    assert!(fake.requests().is_empty());

    let stats = client.describe_stats(&handle).await.unwrap();
    assert_eq!(stats.total_vector_count, 3);
    assert_eq!(fake.count("/indexes/"), 1);
}

/// An explicit index host skips the control plane entirely
#[tokio::test]
async fn test_explicit_index_host() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(5));
    // Control plane is closed; only the data plane is reachable
    let mut config = http_config(&closed_port_url(), TEST_INDEX);
    config.pinecone.index_host = Some(format!("{}/data/{}", fake.url, TEST_INDEX));
    let mut out = Vec::new();

    let report = probe(&config, OutputFormat::Human, &mut out).await.unwrap();
    assert_eq!(report.stats.total_vector_count, 5);
    assert_eq!(fake.count("/indexes"), 0);
}

#[tokio::test]
async fn test_list_indexes() {
    let fake = FakePinecone::start()
        .with_index("alpha", sample_stats(1))
        .with_index("beta", sample_stats(2));
    let client = PineconeClient::connect(&http_config(&fake.url, "alpha")).unwrap();

    let indexes = client.list_indexes().await.unwrap();
    let names: Vec<&str> = indexes.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(indexes.iter().all(|i| i.status.ready));
}

// =============================================================================
// Failures
// =============================================================================

/// Unknown index, eager: 404 on describe, nothing printed
#[tokio::test]
async fn test_missing_index_eager() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(1));
    let config = http_config(&fake.url, "does-not-exist");
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::QueryFailure(_)));
    assert!(err.message().contains("not found"));
    assert!(out.is_empty());
}

/// Unknown index, lazy: confirmation printed, then the lookup fails
#[tokio::test]
async fn test_missing_index_lazy() {
    let fake = FakePinecone::start();
    let mut config = http_config(&fake.url, "does-not-exist");
    config.probe.resolve = ResolveMode::Lazy;
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(err.is_query());
    let text = output_string(out);
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("does-not-exist"));
}

/// Rejected key maps to a connection failure
#[tokio::test]
async fn test_rejected_key() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(1));
    let mut config = http_config(&fake.url, TEST_INDEX);
    config.pinecone.api_key = "wrong-key".to_string();
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(err.is_connection());
    assert!(err.message().contains("401"));
    assert!(out.is_empty());
}

/// Nothing listening: connection refused surfaces as a connection failure
#[tokio::test]
async fn test_connection_refused() {
    let config = http_config(&closed_port_url(), TEST_INDEX);
    let client = PineconeClient::connect(&config).unwrap();
    let mut out = Vec::new();

    let err = run(&config, &client, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::ConnectionFailure(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(out.is_empty());
}

/// Timeouts configure the client without changing results
#[tokio::test]
async fn test_timeout_configured() {
    let fake = FakePinecone::start().with_index(TEST_INDEX, sample_stats(9));
    let mut config = http_config(&fake.url, TEST_INDEX);
    config.pinecone.timeout_sec = Some(5);
    let mut out = Vec::new();

    let report = probe(&config, OutputFormat::Human, &mut out).await.unwrap();
    assert_eq!(report.stats.total_vector_count, 9);
}

/// Server errors and throttling are query failures
#[tokio::test]
async fn test_server_error_is_query_failure() {
    for status in [500, 503, 429] {
        let fake = FakePinecone::start()
            .with_index(TEST_INDEX, sample_stats(1))
            .fail_with(status);
        let config = http_config(&fake.url, TEST_INDEX);
        let mut out = Vec::new();

        let err = probe(&config, OutputFormat::Human, &mut out)
            .await
            .unwrap_err();

        assert!(err.is_query(), "status {status}: {err:?}");
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains(&status.to_string()));
        assert!(out.is_empty());
    }
}

/// 403 is treated like a rejected key
#[tokio::test]
async fn test_forbidden_is_connection_failure() {
    let fake = FakePinecone::start()
        .with_index(TEST_INDEX, sample_stats(1))
        .fail_with(403);
    let config = http_config(&fake.url, TEST_INDEX);
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(err.is_connection());
    assert_eq!(err.exit_code(), 3);
    assert!(err.message().contains("403"));
}

/// A 200 whose body is not JSON is a query failure
#[tokio::test]
async fn test_undecodable_body_is_query_failure() {
    let fake = FakePinecone::start()
        .with_index(TEST_INDEX, sample_stats(1))
        .respond_with(200, "<html>maintenance</html>");
    let config = http_config(&fake.url, TEST_INDEX);
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::QueryFailure(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(err.message().contains("invalid response body"));
}

/// Undecodable stats from a known host: confirmation, then failure
#[tokio::test]
async fn test_undecodable_stats_after_confirmation() {
    let fake = FakePinecone::start().respond_with(200, "not json");
    let mut config = http_config(&fake.url, TEST_INDEX);
    config.pinecone.index_host = Some(format!("{}/data/{}", fake.url, TEST_INDEX));
    let mut out = Vec::new();

    let err = probe(&config, OutputFormat::Human, &mut out)
        .await
        .unwrap_err();

    assert!(err.is_query());
    assert_eq!(output_string(out).lines().count(), 1);
    assert_eq!(fake.count("/data/"), 1);
}
