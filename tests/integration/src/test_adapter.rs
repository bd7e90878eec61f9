//! Full invocations: fixture event in, proxy response out.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use scfproxy_model::{FunctionContext, ProxyEvent};

    use crate::{PIXEL_PNG, load_event, shop_adapter};

    const GET_ORDERS: &str = include_str!("../fixtures/get_orders.json");
    const POST_ECHO: &str = include_str!("../fixtures/post_echo.json");

    fn runtime() -> FunctionContext {
        FunctionContext {
            function_name: "shop-api".to_owned(),
            function_version: "$LATEST".to_owned(),
            namespace: "default".to_owned(),
            memory_limit_in_mb: 128,
            time_limit_in_ms: 3000,
            region: "ap-guangzhou".to_owned(),
            ..FunctionContext::default()
        }
    }

    #[test]
    fn test_should_route_orders_after_stripping_base_path() {
        let adapter = shop_adapter("/shop");
        let event = load_event(GET_ORDERS).unwrap();

        let resp = adapter.proxy(&event).unwrap();
        assert_eq!(resp.status_code, 200);
        assert!(!resp.is_base64_encoded);
        assert_eq!(resp.headers["Content-Type"], "application/json");

        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["requestId"], "c6af9ac6-7b61-11e6-9a41-93e8deadbeef");
        assert_eq!(body["stage"], "release");
        assert_eq!(body["forwardedFor"], "203.0.113.7");

        let mut query: Vec<&str> = body["query"].as_str().unwrap().split('&').collect();
        query.sort_unstable();
        assert_eq!(query, ["page=2", "status=open"]);
    }

    #[test]
    fn test_should_not_route_without_base_path() {
        let adapter = shop_adapter("");
        let event = load_event(GET_ORDERS).unwrap();

        let resp = adapter.proxy(&event).unwrap();
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "not found");
        assert_eq!(resp.headers["Content-Type"], "text/plain; charset=utf-8");
        assert_eq!(resp.headers["X-Shop-Route"], "none");
    }

    #[test]
    fn test_should_echo_post_body() {
        let adapter = shop_adapter("");
        let event = load_event(POST_ECHO).unwrap();

        let resp = adapter.proxy(&event).unwrap();
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.body, r#"{"name":"widget","qty":3}"#);
        assert_eq!(resp.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_should_base64_encode_binary_route() {
        let adapter = shop_adapter("");
        let resp = adapter.proxy(&ProxyEvent::new("/pixel.png", "GET")).unwrap();

        assert_eq!(resp.status_code, 200);
        assert!(resp.is_base64_encoded);
        assert_eq!(resp.headers["Content-Type"], "image/png");
        assert_eq!(BASE64.decode(&resp.body).unwrap(), PIXEL_PNG);
    }

    #[test]
    fn test_should_pass_context_in_header_mode() {
        let adapter = shop_adapter("");
        let mut event = load_event(POST_ECHO).unwrap();
        event.path = "/context".to_owned();
        event.method = "GET".to_owned();

        let resp = adapter.proxy(&event).unwrap();
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["mode"], "header");
        assert_eq!(body["requestId"], "0a1b2c3d");
    }

    #[test]
    fn test_should_pass_context_in_extension_mode() {
        let adapter = shop_adapter("");
        let mut event = load_event(POST_ECHO).unwrap();
        event.path = "/context".to_owned();
        event.method = "GET".to_owned();

        let resp = adapter.proxy_with_context(runtime(), &event).unwrap();
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["mode"], "extensions");
        assert_eq!(body["requestId"], "0a1b2c3d");
        assert_eq!(body["function"], "shop-api");
    }

    #[test]
    fn test_should_report_missing_context_for_plain_translation() {
        use scfproxy_core::{HttpHandler, ProxyResponseWriter};

        let mut event = load_event(GET_ORDERS).unwrap();
        event.path = "/context".to_owned();
        let request = crate::test_accessor().event_to_request(&event).unwrap();

        let mut writer = ProxyResponseWriter::new();
        crate::ShopApp.serve_http(&mut writer, request);

        let resp = writer.proxy_response().unwrap();
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["mode"], "none");
    }
}
