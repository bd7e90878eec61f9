//! Request translation for fixture events, without a handler in between.

#[cfg(test)]
mod tests {
    use scfproxy_core::{API_GW_CONTEXT_HEADER, gateway_context_from_header};

    use crate::{load_event, test_accessor};

    const GET_ORDERS: &str = include_str!("../fixtures/get_orders.json");
    const POST_ECHO: &str = include_str!("../fixtures/post_echo.json");

    #[test]
    fn test_should_parse_fixture_events() {
        let event = load_event(GET_ORDERS).unwrap();
        assert_eq!(event.method, "get");
        assert_eq!(event.query_string["status"], ["open", "closed"]);
        assert_eq!(event.query_string["page"], ["2"]);
        assert_eq!(event.context.stage, "release");
        assert!(event.context.identity.secret_id.is_none());

        let event = load_event(POST_ECHO).unwrap();
        assert!(event.query_string.is_empty());
        assert_eq!(
            event.context.identity.secret_id.as_deref(),
            Some("AKIDexample")
        );
    }

    #[test]
    fn test_should_translate_get_event_with_base_path() {
        let event = load_event(GET_ORDERS).unwrap();
        let mut accessor = test_accessor();
        accessor.strip_base_path("/shop");

        let request = accessor.event_to_request(&event).unwrap();
        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(request.uri().scheme_str(), Some("https"));
        assert_eq!(request.uri().host(), Some("scf-api-proxy.com"));
        assert_eq!(request.uri().path(), "/orders");

        let mut query: Vec<&str> = request.uri().query().unwrap().split('&').collect();
        query.sort_unstable();
        assert_eq!(query, ["page=2", "status=open"]);

        let headers = request.headers();
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-apigateway-serviceid"], "service-abc");
        assert_eq!(headers["x-apigateway-method"], "ANY");
        assert_eq!(headers["x-apigateway-path"], "/shop");
        assert_eq!(headers["x-apigateway-stage"], "release");
        assert_eq!(headers["x-forwarded-for"], "203.0.113.7");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_should_translate_post_event_body_verbatim() {
        let event = load_event(POST_ECHO).unwrap();
        let request = test_accessor().event_to_request(&event).unwrap();

        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.uri().path(), "/echo");
        assert!(request.uri().query().is_none());
        assert_eq!(&request.body()[..], br#"{"name":"widget","qty":3}"#);
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_should_embed_context_header_for_fixture() {
        let event = load_event(POST_ECHO).unwrap();
        let request = test_accessor()
            .proxy_event_to_http_request(&event)
            .unwrap();

        assert!(request.headers().contains_key(API_GW_CONTEXT_HEADER));
        let ctx = gateway_context_from_header(&request).unwrap();
        assert_eq!(ctx, event.context);
    }
}
