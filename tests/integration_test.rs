use sentinel_config::{
    ClusterConfig, ClusterPath, EtcdStore, HttpTransport, NotAvailableReason, ReplaceConfigError, ReplaceOutcome,
    ReplacerConfig, ReplacerOptions,
};
use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use std::net::SocketAddr;
use tokio::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLUSTER_NAME: &str = "pg-main";

// Nothing listens on port 1.
const DEAD_ADDR: &str = "127.0.0.1:1";

#[tokio::test]
async fn replace_config_end_to_end() -> Result<(), Box<dyn Error>> {
    let leader = MockServer::start().await;
    let etcd = etcd_with_leader_at(leader.address()).await;

    Mock::given(method("PUT"))
        .and(path("/config/current"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "maxConnections": 100 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&leader)
        .await;

    let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
    replacer.replace_config(&max_connections_100()).await?;

    Ok(())
}

#[tokio::test]
async fn leader_deserializes_exactly_what_was_sent() -> Result<(), Box<dyn Error>> {
    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct LeaderSideConfig {
        #[serde(rename = "maxConnections")]
        max_connections: u32,
        #[serde(rename = "synchronousReplication")]
        synchronous_replication: bool,
        #[serde(rename = "pgParameters")]
        pg_parameters: std::collections::HashMap<String, String>,
    }

    let leader = MockServer::start().await;
    let etcd = etcd_with_leader_at(leader.address()).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&leader)
        .await;

    let cluster_config = ClusterConfig::from_json_slice(
        br#"{"maxConnections": 100, "synchronousReplication": true, "pgParameters": {"work_mem": "4MB"}}"#,
    )?;
    let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
    replacer.replace_config(&cluster_config).await?;

    let requests = leader.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 1);
    let received: LeaderSideConfig = serde_json::from_slice(&requests[0].body)?;
    let mut pg_parameters = std::collections::HashMap::new();
    pg_parameters.insert("work_mem".to_string(), "4MB".to_string());
    assert_eq!(
        received,
        LeaderSideConfig {
            max_connections: 100,
            synchronous_replication: true,
            pg_parameters,
        }
    );

    Ok(())
}

#[tokio::test]
async fn leader_rejection_carries_status() -> Result<(), Box<dyn Error>> {
    for &status in &[400u16, 500, 503] {
        let leader = MockServer::start().await;
        let etcd = etcd_with_leader_at(leader.address()).await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(status).set_body_string("config rejected"))
            .expect(1)
            .mount(&leader)
            .await;

        let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
        let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();

        match &err {
            ReplaceConfigError::RejectedByLeader {
                status: observed, body, ..
            } => {
                assert_eq!(*observed, status);
                assert_eq!(body, "config rejected");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(err.outcome(), ReplaceOutcome::Rejected);
    }

    Ok(())
}

#[tokio::test]
async fn leader_redirect_is_a_rejection_not_a_second_write() -> Result<(), Box<dyn Error>> {
    // Once with the default client, once with the client built for a leader timeout.
    for &leader_timeout in &[None, Some(Duration::from_secs(2))] {
        for &status in &[301u16, 307] {
            let leader = MockServer::start().await;
            let etcd = etcd_with_leader_at(leader.address()).await;
            Mock::given(path("/config/current"))
                .respond_with(ResponseTemplate::new(status).insert_header("Location", "/elsewhere"))
                .expect(1)
                .mount(&leader)
                .await;
            Mock::given(path("/elsewhere"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&leader)
                .await;

            let mut config = config(vec![etcd.uri()]);
            config.options.leader_request_timeout = leader_timeout;
            let replacer = sentinel_config::try_create_config_replacer(config)?;
            let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();

            match &err {
                ReplaceConfigError::RejectedByLeader { status: observed, .. } => assert_eq!(*observed, status),
                other => panic!("Unexpected error: {:?}", other),
            }
            let requests = leader.received_requests().await.expect("Request recording enabled");
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].method.to_string(), "PUT");
        }
    }

    Ok(())
}

#[tokio::test]
async fn no_leader_published() -> Result<(), Box<dyn Error>> {
    let etcd = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": 100,
            "message": "Key not found"
        })))
        .mount(&etcd)
        .await;

    let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
    let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();

    match err {
        ReplaceConfigError::LeaderUnavailable(NotAvailableReason::RecordAbsent) => { /* expected */ }
        other => panic!("Unexpected error: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn coordination_store_unreachable() -> Result<(), Box<dyn Error>> {
    let replacer = sentinel_config::try_create_config_replacer(config(vec![format!("http://{}", DEAD_ADDR)]))?;

    let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();

    match err {
        ReplaceConfigError::CoordinationStoreUnreachable(_) => { /* expected */ }
        other => panic!("Unexpected error: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn leader_unreachable_is_transport_failure() -> Result<(), Box<dyn Error>> {
    let etcd = MockServer::start().await;
    mount_leader_record(&etcd, json!({ "ListenAddress": "127.0.0.1", "Port": "1" }).to_string()).await;

    let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
    let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();

    match &err {
        ReplaceConfigError::TransportFailure { leader, .. } => assert_eq!(leader.port, "1"),
        other => panic!("Unexpected error: {:?}", other),
    }
    assert_eq!(err.outcome(), ReplaceOutcome::TransportFailed);

    Ok(())
}

#[tokio::test]
async fn slow_leader_hits_configured_timeout() -> Result<(), Box<dyn Error>> {
    let leader = MockServer::start().await;
    let etcd = etcd_with_leader_at(leader.address()).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&leader)
        .await;

    let mut config = config(vec![etcd.uri()]);
    config.options.leader_request_timeout = Some(Duration::from_millis(200));
    let replacer = sentinel_config::try_create_config_replacer(config)?;

    let err = replacer.replace_config(&max_connections_100()).await.unwrap_err();
    assert_eq!(err.outcome(), ReplaceOutcome::TransportFailed);

    Ok(())
}

#[tokio::test]
async fn every_attempt_resolves_the_leader_again() -> Result<(), Box<dyn Error>> {
    let old_leader = MockServer::start().await;
    let new_leader = MockServer::start().await;
    let etcd = MockServer::start().await;

    // First read sees the old leader, every later read sees the new one.
    Mock::given(method("GET"))
        .respond_with(etcd_reply(leader_record(old_leader.address())))
        .up_to_n_times(1)
        .mount(&etcd)
        .await;
    Mock::given(method("GET"))
        .respond_with(etcd_reply(leader_record(new_leader.address())))
        .mount(&etcd)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&old_leader)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&new_leader)
        .await;

    let replacer = sentinel_config::try_create_config_replacer(config(vec![etcd.uri()]))?;
    replacer.replace_config(&max_connections_100()).await?;
    replacer.replace_config(&max_connections_100()).await?;

    Ok(())
}

#[tokio::test]
async fn free_function_with_injected_store_and_transport() -> Result<(), Box<dyn Error>> {
    let leader = MockServer::start().await;
    let etcd = etcd_with_leader_at(leader.address()).await;
    Mock::given(method("PUT"))
        .and(path("/config/current"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&leader)
        .await;

    let logger = discard_logger();
    let store = EtcdStore::new(logger.clone(), vec![etcd.uri()], Duration::from_secs(2))?;
    let transport = HttpTransport::new(logger)?;
    let leader_key = ClusterPath::with_default_base(CLUSTER_NAME).leader_sentinel_info_key();

    sentinel_config::replace_config(&store, &transport, &leader_key, &json!({ "maxConnections": 100 })).await?;

    Ok(())
}

// ------- Helpers --------

fn max_connections_100() -> ClusterConfig {
    let mut config = ClusterConfig::new();
    config.insert("maxConnections", 100);
    config
}

fn config(store_endpoints: Vec<String>) -> ReplacerConfig {
    ReplacerConfig {
        cluster_name: CLUSTER_NAME.to_string(),
        store_endpoints,
        logger: discard_logger(),
        options: ReplacerOptions {
            store_request_timeout: Some(Duration::from_secs(2)),
            ..ReplacerOptions::default()
        },
    }
}

fn leader_record(leader_addr: &SocketAddr) -> String {
    json!({
        "ID": "sentinel-1",
        "ListenAddress": leader_addr.ip().to_string(),
        "Port": leader_addr.port().to_string(),
    })
    .to_string()
}

fn etcd_reply(record: String) -> ResponseTemplate {
    let key = ClusterPath::with_default_base(CLUSTER_NAME).leader_sentinel_info_key();
    ResponseTemplate::new(200).set_body_json(json!({
        "action": "get",
        "node": { "key": key, "value": record, "modifiedIndex": 7, "createdIndex": 7 }
    }))
}

async fn mount_leader_record(etcd: &MockServer, record: String) {
    let key = ClusterPath::with_default_base(CLUSTER_NAME).leader_sentinel_info_key();
    Mock::given(method("GET"))
        .and(path(format!("/v2/keys{}", key)))
        .and(query_param("quorum", "true"))
        .respond_with(etcd_reply(record))
        .mount(etcd)
        .await;
}

async fn etcd_with_leader_at(leader_addr: &SocketAddr) -> MockServer {
    let etcd = MockServer::start().await;
    mount_leader_record(&etcd, leader_record(leader_addr)).await;
    etcd
}

fn discard_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}
