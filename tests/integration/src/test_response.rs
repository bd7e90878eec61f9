//! Wire shape of the rendered proxy response.

#[cfg(test)]
mod tests {
    use scfproxy_model::ProxyEvent;

    use crate::{load_event, shop_adapter};

    const POST_ECHO: &str = include_str!("../fixtures/post_echo.json");

    #[test]
    fn test_should_serialize_response_in_gateway_shape() {
        let adapter = shop_adapter("");
        let resp = adapter.proxy(&load_event(POST_ECHO).unwrap()).unwrap();

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(json["body"], r#"{"name":"widget","qty":3}"#);

        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["body", "headers", "isBase64Encoded", "statusCode"]);
    }

    #[test]
    fn test_should_serialize_binary_response_as_base64() {
        let adapter = shop_adapter("");
        let resp = adapter.proxy(&ProxyEvent::new("/pixel.png", "GET")).unwrap();

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["isBase64Encoded"], true);
        assert!(json["body"].as_str().unwrap().starts_with("iVBORw0KGgo"));
    }
}
