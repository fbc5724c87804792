//! Cross-crate flows over a node wired from real subsystems.
//!
//! Detector nodes are `wiremock` servers speaking the detector wire
//! format; storage is in memory unless a test needs a directory.

pub mod read_path;
pub mod write_path;

#[cfg(test)]
pub(crate) mod harness {
    use node_runtime::adapters::InMemoryContentStore;
    use node_runtime::container::{in_memory_ledger, NodeConfig, NodeContainer};
    use pv_01_detector::HttpDetectorClient;
    use pv_02_consensus::{ConsensusConfig, ConsensusCoordinator};
    use pv_03_ledger::GrantPolicy;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// How a mock detector node answers.
    pub enum NodeBehaviour {
        Real(f64),
        Fake(f64),
        Slow(Duration),
        ServerError,
        Garbage,
    }

    pub async fn detector(behaviour: NodeBehaviour) -> MockServer {
        let server = MockServer::start().await;
        let response = match behaviour {
            NodeBehaviour::Real(confidence) => ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "is_deepfake": false, "confidence": confidence }),
            ),
            NodeBehaviour::Fake(confidence) => ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "is_deepfake": true, "confidence": confidence }),
            ),
            NodeBehaviour::Slow(delay) => ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "is_deepfake": false, "confidence": 0.99 }))
                .set_delay(delay),
            NodeBehaviour::ServerError => ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "model not loaded" })),
            NodeBehaviour::Garbage => ResponseTemplate::new(200).set_body_string("<html>"),
        };
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    pub struct TestNode {
        pub node: NodeContainer,
        pub store: Arc<InMemoryContentStore>,
        /// Kept alive for the node's lifetime
        pub servers: Vec<MockServer>,
    }

    pub async fn node_with(behaviours: Vec<NodeBehaviour>, policy: GrantPolicy) -> TestNode {
        let mut servers = Vec::new();
        for behaviour in behaviours {
            servers.push(detector(behaviour).await);
        }
        let endpoints: Vec<String> = servers
            .iter()
            .map(|s| format!("{}/predict", s.uri()))
            .collect();

        let config = ConsensusConfig::default()
            .with_endpoints(endpoints)
            .with_node_timeout(Duration::from_secs(2));
        let consensus = ConsensusCoordinator::new(
            Arc::new(HttpDetectorClient::new().expect("http client")),
            config.clone(),
        )
        .expect("valid consensus config");

        let store = Arc::new(InMemoryContentStore::new());
        let mut node_config = NodeConfig::ephemeral();
        node_config.consensus = config;
        node_config.ledger.grant_policy = policy;

        let node = NodeContainer::from_parts(
            Arc::new(consensus),
            in_memory_ledger(policy),
            store.clone(),
            node_config,
        );
        TestNode {
            node,
            store,
            servers,
        }
    }

    /// Two authentic votes against one fake: accepted.
    pub async fn authentic_node() -> TestNode {
        node_with(
            vec![
                NodeBehaviour::Real(0.9),
                NodeBehaviour::Real(0.8),
                NodeBehaviour::Fake(0.6),
            ],
            GrantPolicy::OwnerOnly,
        )
        .await
    }
}
