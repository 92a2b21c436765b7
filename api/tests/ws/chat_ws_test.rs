#[cfg(test)]
mod tests {
    use crate::helpers::{
        assert_silent, connect_ws, join_room, make_test_app, make_test_app_with, next_json,
        seed_ticket, spawn_server,
    };
    use db::models::chat_message::{self, MessageType};
    use futures_util::SinkExt;
    use serde_json::{Value, json};
    use tokio_tungstenite::tungstenite::{Error, protocol::Message};

    fn frame(v: Value) -> Message {
        Message::Text(v.to_string().into())
    }

    #[tokio::test]
    async fn unknown_ticket_is_refused_before_upgrade() {
        let t = make_test_app().await;
        let addr = spawn_server(t.app.clone()).await;

        match connect_ws(&addr, 9999).await {
            Ok(_) => panic!("upgrade should be refused"),
            Err(Error::Http(resp)) => {
                assert_eq!(resp.status(), 404);
                let body = std::str::from_utf8(resp.body().as_ref().unwrap()).unwrap();
                let json: Value = serde_json::from_str(body).unwrap();
                assert_eq!(json["message"], "Ticket not found");
            }
            Err(e) => panic!("Unexpected error: {e:?}"),
        }
    }

    #[tokio::test]
    async fn chat_init_replies_with_history_to_sender_only() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        chat_message::Model::append(t.state.db(), seeded.ticket.id, "bob", "first", MessageType::Text)
            .await
            .unwrap();
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, seeded.ticket.id).await;

        ws1.send(frame(json!({ "type": "chatInit", "userId": seeded.user.id })))
            .await
            .unwrap();

        let msg = next_json(&mut ws1).await;
        assert_eq!(msg["type"], "event");
        assert_eq!(msg["event"], "chatHistory");
        assert_eq!(msg["topic"], format!("tickets:{}", seeded.ticket.id));
        assert_eq!(msg["payload"]["ticket_id"], seeded.ticket.id);
        assert_eq!(msg["payload"]["messages"][0]["message"], "first");

        assert_silent(&mut ws2, 200).await;
    }

    #[tokio::test]
    async fn chat_init_without_chat_sends_null() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws = join_room(&addr, seeded.ticket.id).await;
        ws.send(frame(json!({ "type": "chatInit" }))).await.unwrap();

        let msg = next_json(&mut ws).await;
        assert_eq!(msg["event"], "chatHistory");
        assert!(msg["payload"].is_null());
    }

    #[tokio::test]
    async fn message_is_persisted_and_broadcast_to_room() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, seeded.ticket.id).await;

        ws1.send(frame(json!({
            "type": "chatMessage",
            "sender": "bob",
            "message": "Hello from bob"
        })))
        .await
        .unwrap();

        for ws in [&mut ws1, &mut ws2] {
            let msg = next_json(ws).await;
            assert_eq!(msg["event"], "message");
            assert_eq!(msg["payload"]["sender"], "bob");
            assert_eq!(msg["payload"]["message"], "Hello from bob");
            assert_eq!(msg["payload"]["message_type"], "text");
        }

        let (_, messages) = chat_message::Model::history_for_ticket(t.state.db(), seeded.ticket.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "Hello from bob");
    }

    #[tokio::test]
    async fn rooms_are_isolated_per_ticket() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let other = db::models::tickets::Model::create(
            t.state.db(),
            seeded.user.id,
            seeded.admin.id,
            db::models::tickets::NewTicket {
                email: "bob@hd.io",
                title: "Other",
                department: "IT",
                description: "Other issue",
                priority: "Low",
            },
        )
        .await
        .unwrap();
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, other.id).await;

        ws1.send(frame(json!({
            "type": "chatMessage",
            "sender": "bob",
            "message": "only for ticket one"
        })))
        .await
        .unwrap();

        assert_eq!(next_json(&mut ws1).await["event"], "message");
        assert_silent(&mut ws2, 200).await;
    }

    #[tokio::test]
    async fn empty_message_is_ignored() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws = join_room(&addr, seeded.ticket.id).await;
        ws.send(frame(json!({ "type": "chatMessage", "sender": "bob", "message": "   " })))
            .await
            .unwrap();

        assert_silent(&mut ws, 200).await;
        assert!(
            chat_message::Model::history_for_ticket(t.state.db(), seeded.ticket.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn image_is_stored_and_broadcast() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, seeded.ticket.id).await;

        // "hello" in base64
        ws1.send(frame(json!({
            "type": "chatImage",
            "sender": "alice",
            "image": "data:image/png;base64,aGVsbG8="
        })))
        .await
        .unwrap();

        let msg = next_json(&mut ws2).await;
        assert_eq!(msg["event"], "image");
        assert_eq!(msg["payload"]["sender"], "alice");
        assert_eq!(msg["payload"]["message_type"], "image");

        let file_name = msg["payload"]["message"].as_str().unwrap().to_owned();
        assert!(file_name.starts_with("image_") && file_name.ends_with(".png"));
        assert_eq!(
            std::fs::read(t.uploads.path().join(&file_name)).unwrap(),
            b"hello"
        );

        assert_eq!(next_json(&mut ws1).await["event"], "image");
    }

    #[tokio::test]
    async fn bad_image_reports_error_to_sender_only() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, seeded.ticket.id).await;

        ws1.send(frame(json!({
            "type": "chatImage",
            "sender": "alice",
            "image": "data:image/png;base64,@@not-base64@@"
        })))
        .await
        .unwrap();

        let msg = next_json(&mut ws1).await;
        assert_eq!(msg["event"], "error");
        assert!(
            msg["payload"]["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid image data")
        );
        assert_silent(&mut ws2, 200).await;
    }

    #[tokio::test]
    async fn oversized_image_is_refused_and_not_stored() {
        let t = make_test_app_with(|state| state.with_max_image_bytes(16)).await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws1 = join_room(&addr, seeded.ticket.id).await;
        let mut ws2 = join_room(&addr, seeded.ticket.id).await;

        ws1.send(frame(json!({
            "type": "chatImage",
            "sender": "alice",
            "image": format!("data:image/png;base64,{}", "A".repeat(64 * 1024))
        })))
        .await
        .unwrap();

        let msg = next_json(&mut ws1).await;
        assert_eq!(msg["event"], "error");
        assert!(
            msg["payload"]["message"]
                .as_str()
                .unwrap()
                .ends_with("the limit is 16 bytes")
        );
        assert_silent(&mut ws2, 200).await;

        assert_eq!(std::fs::read_dir(t.uploads.path()).unwrap().count(), 0);
        assert!(
            chat_message::Model::history_for_ticket(t.state.db(), seeded.ticket.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn invalid_frames_are_ignored_and_ping_gets_pong() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;

        let mut ws = join_room(&addr, seeded.ticket.id).await;
        ws.send(Message::Text("not json".into())).await.unwrap();
        ws.send(frame(json!({ "type": "typing" }))).await.unwrap();
        ws.send(frame(json!({ "type": "ping" }))).await.unwrap();

        let msg = next_json(&mut ws).await;
        assert_eq!(msg["event"], "pong");
    }

    #[tokio::test]
    async fn disconnect_leaves_the_room() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let addr = spawn_server(t.app.clone()).await;
        let topic = format!("tickets:{}", seeded.ticket.id);

        let ws1 = join_room(&addr, seeded.ticket.id).await;
        let ws2 = join_room(&addr, seeded.ticket.id).await;

        assert_eq!(t.state.ws().subscriber_count(&topic).await, 2);

        drop(ws2);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(t.state.ws().subscriber_count(&topic).await, 1);
        assert!(t.state.ws().has_topic(&topic).await);

        drop(ws1);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(t.state.ws().subscriber_count(&topic).await, 0);
        assert!(!t.state.ws().has_topic(&topic).await);
    }
}
