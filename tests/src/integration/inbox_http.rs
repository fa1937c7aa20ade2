//! # Inbox HTTP Integration
//!
//! Drives the axum router against a manager backed by the production
//! RocksDB adapter, covering the full acceptance state machine:
//! Received → Decoded → Validated → Persisted, and the rejection gates.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use notify_inbox::{
        build_router, HttpDeliverySink, ManagerConfig, NotificationManager, LD_JSON_CONTENT_TYPE,
    };
    use notify_store::{NotificationStore, RocksDbConfig, RocksDbStore};
    use notify_types::Direction;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct Harness {
        router: Router,
        store: Arc<RocksDbStore>,
        _dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            RocksDbStore::open(RocksDbConfig::for_testing(dir.path().to_string_lossy())).unwrap(),
        );

        let config =
            ManagerConfig::new("https://repo.example.org", "https://repo.example.org/inbox");
        let delivery = Arc::new(HttpDeliverySink::new(&config).unwrap());
        let manager =
            Arc::new(NotificationManager::new(config, store.clone(), delivery).unwrap());

        Harness {
            router: build_router(manager),
            store,
            _dir: dir,
        }
    }

    fn offer_body(id: &str) -> String {
        serde_json::json!({
            "@context": ["https://www.w3.org/ns/activitystreams", "https://purl.org/coar/notify"],
            "id": id,
            "type": ["Offer", "coar-notify:ReviewAction"],
            "origin": {"id": "A"},
            "target": {"id": "B"},
        })
        .to_string()
    }

    fn post(body: impl Into<Body>, content_type: &str) -> Request<Body> {
        Request::post("/inbox")
            .header(CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap()
    }

    // =========================================================================
    // ACCEPTANCE
    // =========================================================================

    #[tokio::test]
    async fn test_accepted_notification_lands_in_store() {
        let harness = harness();
        let id = "urn:uuid:0370c0fb-bb78-4a9b-87f5-bed307a509dd";

        let response = harness
            .router
            .clone()
            .oneshot(post(offer_body(id), LD_JSON_CONTENT_TYPE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = harness.store.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.direction(), Direction::Inbound);
        assert_eq!(stored.from_id(), "A");
        assert_eq!(stored.to_id(), "B");
        assert_eq!(stored.status(), Some(201));
        assert!(stored.timestamp().is_some());

        // The original payload survives verbatim
        let original: serde_json::Value = serde_json::from_str(stored.original()).unwrap();
        assert_eq!(original["id"], id);
        assert_eq!(original["type"][1], "coar-notify:ReviewAction");
    }

    #[tokio::test]
    async fn test_accepted_notification_is_deletable() {
        let harness = harness();
        let id = "urn:uuid:0370c0fb-bb78-4a9b-87f5-bed307a509dd";

        harness
            .router
            .clone()
            .oneshot(post(offer_body(id), LD_JSON_CONTENT_TYPE))
            .await
            .unwrap();

        assert!(harness.store.remove_by_id(id).unwrap());
        assert!(harness.store.get_by_id(id).unwrap().is_none());
    }

    // =========================================================================
    // REJECTION GATES
    // =========================================================================

    #[tokio::test]
    async fn test_bad_json_is_400_and_not_stored() {
        let harness = harness();

        let response = harness
            .router
            .clone()
            .oneshot(post("{not json", LD_JSON_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(harness
            .store
            .list_by_direction(Direction::Inbound, 10)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_coar_namespace_is_422_and_not_stored() {
        let harness = harness();
        let body = serde_json::json!({
            "@context": ["https://www.w3.org/ns/activitystreams"],
            "id": "urn:uuid:0370c0fb-bb78-4a9b-87f5-bed307a509dd",
            "origin": {"id": "A"},
            "target": {"id": "B"},
        })
        .to_string();

        let response = harness
            .router
            .clone()
            .oneshot(post(body, LD_JSON_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(harness
            .store
            .list_by_direction(Direction::Inbound, 10)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_empty_id_is_422() {
        let harness = harness();
        let response = harness
            .router
            .clone()
            .oneshot(post(offer_body(""), LD_JSON_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_plain_text_is_415_regardless_of_body() {
        let harness = harness();
        let id = "urn:uuid:0370c0fb-bb78-4a9b-87f5-bed307a509dd";

        let response = harness
            .router
            .clone()
            .oneshot(post(offer_body(id), "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(harness.store.get_by_id(id).unwrap().is_none());
    }
}
