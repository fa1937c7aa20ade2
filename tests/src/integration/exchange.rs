//! # Exchange Integration
//!
//! Outbound flows end to end: pattern construction, real HTTP delivery to
//! a live peer inbox, and transport-failure capture against a dead one.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notify_inbox::{
        build_router, transport_code, HttpDeliverySink, ManagerConfig, NotificationManager,
    };
    use notify_store::{InMemoryStore, NotificationStore};
    use notify_types::{
        Direction, NotificationActor, NotificationContext, NotificationObject, NotificationTarget,
        NotificationUrl,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn manager(id: &str, inbox_url: &str, store: Arc<InMemoryStore>) -> NotificationManager {
        let config = ManagerConfig::new(id, inbox_url);
        let delivery = Arc::new(HttpDeliverySink::new(&config).unwrap());
        NotificationManager::new(config, store, delivery).unwrap()
    }

    fn value_objects(target_inbox: &str) -> (
        NotificationActor,
        NotificationObject,
        Option<NotificationContext>,
        NotificationTarget,
    ) {
        (
            NotificationActor::new("actorId", "actorName", "Person"),
            NotificationObject::new("objId", "citeAs", vec!["objType".to_string()]),
            Some(NotificationContext::new(
                "ctxId",
                "inbox",
                vec!["type".to_string()],
                NotificationUrl::new("urlId", "urlMediaType", vec!["urlType".to_string()]),
            )),
            NotificationTarget::new("targetId", target_inbox),
        )
    }

    /// Serve a peer's inbox on an ephemeral loopback port.
    async fn spawn_peer(manager: Arc<NotificationManager>) -> String {
        let router = build_router(manager);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/inbox")
    }

    // =========================================================================
    // TRANSPORT FAILURE CAPTURE
    // =========================================================================

    #[tokio::test]
    async fn test_acknowledge_against_dead_inbox_records_connect_failure() {
        let store = Arc::new(InMemoryStore::new());
        let sender = manager(
            "https://repo.example.org",
            "https://repo.example.org/inbox",
            store.clone(),
        );

        let (actor, object, context, _) = value_objects("unused");
        let target = NotificationTarget::new("targetId", "http://127.0.0.1:1/inbox");
        let mut notification = sender
            .create_outbound(actor, object, context, target)
            .unwrap();

        sender
            .acknowledge_and_accept(&mut notification, None)
            .await
            .unwrap();

        assert_eq!(notification.type_json(), r#"["Accept"]"#);
        assert_eq!(notification.target_url(), Some("http://127.0.0.1:1/inbox"));
        assert_eq!(notification.status(), Some(transport_code::CONNECT_FAILED));

        // Failed sends are persisted too
        let stored = store.get_by_id(notification.id()).unwrap().unwrap();
        assert_eq!(stored.status(), Some(transport_code::CONNECT_FAILED));
        assert_eq!(stored.direction(), Direction::Outbound);
    }

    // =========================================================================
    // PEER-TO-PEER EXCHANGE
    // =========================================================================

    #[tokio::test]
    async fn test_request_review_reaches_peer_inbox() {
        let receiver_store = Arc::new(InMemoryStore::new());
        let receiver = Arc::new(manager(
            "https://journal.example.com",
            "https://journal.example.com/inbox",
            receiver_store.clone(),
        ));
        let peer_inbox = spawn_peer(receiver).await;

        let sender_store = Arc::new(InMemoryStore::new());
        let sender = manager(
            "https://repo.example.org",
            "https://repo.example.org/inbox",
            sender_store.clone(),
        );

        let (actor, object, context, _) = value_objects("unused");
        let target = NotificationTarget::new("https://journal.example.com", peer_inbox.as_str());
        let mut notification = sender
            .create_outbound(actor, object, context, target)
            .unwrap();

        sender.request_review(&mut notification, None).await.unwrap();

        // The peer accepted the POST
        assert_eq!(notification.status(), Some(201));

        // Sender persisted its outbound copy
        let sent = sender_store.get_by_id(notification.id()).unwrap().unwrap();
        assert_eq!(sent.direction(), Direction::Outbound);
        assert_eq!(sent.to_id(), "https://journal.example.com");

        // Receiver persisted the inbound copy under the same id
        let received = receiver_store
            .get_by_id(notification.id())
            .unwrap()
            .unwrap();
        assert_eq!(received.direction(), Direction::Inbound);
        assert_eq!(received.from_id(), "https://repo.example.org");
        assert_eq!(received.to_id(), "https://journal.example.com");
        assert_eq!(
            received.type_json(),
            r#"["Offer","coar-notify:ReviewAction"]"#
        );
    }

    #[tokio::test]
    async fn test_announce_review_replies_to_received_offer() {
        let repo_store = Arc::new(InMemoryStore::new());
        let repo = Arc::new(manager(
            "https://repo.example.org",
            "https://repo.example.org/inbox",
            repo_store.clone(),
        ));
        let repo_inbox = spawn_peer(repo.clone()).await;

        let journal_store = Arc::new(InMemoryStore::new());
        let journal = manager(
            "https://journal.example.com",
            "https://journal.example.com/inbox",
            journal_store.clone(),
        );

        // Step 1: the repository requests a review
        let (actor, object, context, _) = value_objects("unused");
        let target = NotificationTarget::new("https://journal.example.com", "http://127.0.0.1:1/x");
        let mut offer = repo.create_outbound(actor, object, context, target).unwrap();
        repo.request_review(&mut offer, None).await.unwrap();

        // Step 2: the journal announces the finished review, chaining the
        // offer id, delivered into the repository's live inbox
        let (actor, object, context, _) = value_objects("unused");
        let target = NotificationTarget::new("https://repo.example.org", repo_inbox.as_str());
        let mut announce = journal
            .create_outbound(actor, object, context, target)
            .unwrap();
        journal
            .announce_review(&mut announce, Some(offer.id()))
            .await
            .unwrap();

        assert_eq!(announce.status(), Some(201));
        assert_eq!(announce.in_reply_to(), Some(offer.id()));

        // The repository stored the announcement with the reply chain intact
        let received = repo_store.get_by_id(announce.id()).unwrap().unwrap();
        let original: serde_json::Value = serde_json::from_str(received.original()).unwrap();
        assert_eq!(original["type"][1], "coar-notify:ReviewAction");
        assert_eq!(original["origin"]["id"], "https://journal.example.com");
    }
}
