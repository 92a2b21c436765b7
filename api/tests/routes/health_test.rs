#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, get_request, make_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let t = make_test_app().await;

        let response = t.send(get_request("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }
}
