#[cfg(test)]
mod tests {
    use crate::helpers::{empty_request, make_test_app, send};
    use axum::http::StatusCode;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_health_check_is_public() {
        let (app, _state, _tmp) = make_test_app().await;

        let (status, json) = send(&app, empty_request("GET", "/api/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }

    #[tokio::test]
    #[serial]
    async fn test_trailing_slash_reaches_the_same_route() {
        let (app, _state, _tmp) = make_test_app().await;

        let (status, json) = send(&app, empty_request("GET", "/api/health/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Health check passed");
    }
}
