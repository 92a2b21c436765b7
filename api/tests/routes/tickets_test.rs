#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, get_request, json_request, make_test_app, seed_ticket};
    use axum::http::{StatusCode, header};
    use db::models::{admin, chat_message, chat_message::MessageType, tickets, user};
    use serde_json::json;

    fn new_ticket(email: &str, department: &str) -> serde_json::Value {
        json!({
            "email": email,
            "title": "Laptop broken",
            "description": "Screen is black",
            "priority": "Medium",
            "department": department
        })
    }

    #[tokio::test]
    async fn create_assigns_least_loaded_admin() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        // alice already has one pending ticket; ben has none.
        let ben = admin::Model::create(t.state.db(), "ben", "ben@hd.io", "pw", "IT")
            .await
            .unwrap();

        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "IT")))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["data"]["assigned_admin_id"], ben.id);
        assert_eq!(json["data"]["status"], "pending");
        assert_eq!(json["data"]["user_id"], seeded.user.id);

        // Now both have one; the earlier registered admin wins the tie.
        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "IT")))
            .await;
        let json = body_json(response).await;
        assert_eq!(json["data"]["assigned_admin_id"], seeded.admin.id);
    }

    #[tokio::test]
    async fn solved_tickets_do_not_count_towards_load() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        admin::Model::create(t.state.db(), "ben", "ben@hd.io", "pw", "IT")
            .await
            .unwrap();
        tickets::Model::set_status(t.state.db(), seeded.ticket.id, tickets::TicketStatus::Solved)
            .await
            .unwrap();

        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "IT")))
            .await;
        let json = body_json(response).await;
        assert_eq!(json["data"]["assigned_admin_id"], seeded.admin.id);
    }

    #[tokio::test]
    async fn create_rejects_placeholder_department() {
        let t = make_test_app().await;
        seed_ticket(&t.state).await;

        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "Select")))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Select appropriate department");
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_not_found() {
        let t = make_test_app().await;
        seed_ticket(&t.state).await;

        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("ghost@hd.io", "IT")))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_in_department_without_admins_is_unprocessable() {
        let t = make_test_app().await;
        seed_ticket(&t.state).await;

        let response = t
            .send(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "HR")))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No admins found in department 'HR'");
    }

    #[tokio::test]
    async fn concurrent_creations_spread_across_admins() {
        let t = make_test_app().await;
        let db = t.state.db();
        user::Model::create(db, "bob", "bob@hd.io", "pw").await.unwrap();
        let a = admin::Model::create(db, "ann", "ann@hd.io", "pw", "IT").await.unwrap();
        let b = admin::Model::create(db, "ben", "ben@hd.io", "pw", "IT").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let app = t.app.clone();
            handles.push(tokio::spawn(async move {
                use tower::ServiceExt;
                app.oneshot(json_request("POST", "/api/tickets", new_ticket("bob@hd.io", "IT")))
                    .await
                    .unwrap()
                    .status()
            }));
        }
        for h in handles {
            assert_eq!(h.await.unwrap(), StatusCode::CREATED);
        }

        assert_eq!(tickets::Model::count_pending_for_admin(db, a.id).await.unwrap(), 2);
        assert_eq!(tickets::Model::count_pending_for_admin(db, b.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_returns_users_tickets() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;

        let response = t.send(get_request("/api/tickets?email=bob@hd.io")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let list = json["data"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], seeded.ticket.id);

        let response = t.send(get_request("/api/tickets?email=ghost@hd.io")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_page_includes_participants_and_history() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        chat_message::Model::append(t.state.db(), seeded.ticket.id, "bob", "hello", MessageType::Text)
            .await
            .unwrap();
        chat_message::Model::append(t.state.db(), seeded.ticket.id, "alice", "hi bob", MessageType::Text)
            .await
            .unwrap();

        let uri = format!("/api/tickets/{}/chat?sender=bob&role=user", seeded.ticket.id);
        let response = t.send(get_request(&uri)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let data = &json["data"];
        assert_eq!(data["ticket"]["id"], seeded.ticket.id);
        assert_eq!(data["user"]["username"], "bob");
        assert_eq!(data["admin"]["username"], "alice");
        assert_eq!(data["sender"], "bob");
        assert_eq!(data["role"], "user");

        let history = data["chat_history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["message"], "hello");
        assert_eq!(history[1]["sender"], "alice");
        assert_eq!(history[1]["message_type"], "text");
    }

    #[tokio::test]
    async fn chat_page_without_messages_has_empty_history() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;

        let uri = format!("/api/tickets/{}/chat", seeded.ticket.id);
        let json = body_json(t.send(get_request(&uri)).await).await;
        assert_eq!(json["data"]["chat_history"], json!([]));
        assert!(json["data"]["sender"].is_null());
    }

    #[tokio::test]
    async fn chat_page_errors() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;

        let response = t.send(get_request("/api/tickets/9999/chat")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Ticket not found");

        // Deleting the admin unassigns the ticket, so there is no one to chat with.
        use sea_orm::ModelTrait;
        seeded.admin.delete(t.state.db()).await.unwrap();

        let uri = format!("/api/tickets/{}/chat", seeded.ticket.id);
        let response = t.send(get_request(&uri)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Error opening chat");
    }

    #[tokio::test]
    async fn status_toggle_returns_admin_dashboard() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;
        let uri = format!("/api/tickets/{}/status", seeded.ticket.id);

        let response = t
            .send(json_request(
                "PUT",
                &uri,
                json!({ "solved": true, "admin_email": "alice@hd.io" }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["admin"]["email"], "alice@hd.io");
        assert_eq!(json["data"]["assigned_tickets"][0]["status"], "solved");

        let response = t
            .send(json_request(
                "PUT",
                &uri,
                json!({ "solved": false, "admin_email": "alice@hd.io" }),
            ))
            .await;
        let json = body_json(response).await;
        assert_eq!(json["data"]["assigned_tickets"][0]["status"], "pending");
    }

    #[tokio::test]
    async fn status_for_unknown_ticket_or_admin_is_not_found() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;

        let response = t
            .send(json_request(
                "PUT",
                "/api/tickets/9999/status",
                json!({ "solved": true, "admin_email": "alice@hd.io" }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let uri = format!("/api/tickets/{}/status", seeded.ticket.id);
        let response = t
            .send(json_request(
                "PUT",
                &uri,
                json!({ "solved": true, "admin_email": "ghost@hd.io" }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Admin not found");
    }

    #[tokio::test]
    async fn csv_download_is_an_attachment() {
        let t = make_test_app().await;
        let seeded = seed_ticket(&t.state).await;

        let uri = format!("/api/tickets/{}/csv", seeded.ticket.id);
        let response = t.send(get_request(&uri)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers().clone();
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"ticket_{}.csv\"", seeded.ticket.id).as_str()
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "Title,Description,Status,Priority\nVPN down,Cannot reach the intranet,pending,High\n"
        );

        let response = t.send(get_request("/api/tickets/9999/csv")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
