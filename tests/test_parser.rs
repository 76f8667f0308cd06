use warden::http::parser::{MAX_HEADER_BYTES, ParseError, parse_request};
use warden::http::request::Method;

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host"), Some("example.com"));
    assert_eq!(parsed.host.as_deref(), Some("example.com"));
    assert!(parsed.body.is_empty());
    assert!(parsed.params.is_empty());
}

#[tokio::test]
async fn test_parse_browser_style_request() {
    let mut req: &[u8] = b"GET /mini.jpg HTTP/1.1\r\n\
        Host: localhost\r\n\
        Connection: keep-alive\r\n\
        Cache-Control: max-age=0\r\n\
        Accept: image/webp,image/*,*/*;q=0.8\r\n\
        User-Agent: Mozilla/5.0 (Windows NT 6.1; WOW64)\r\n\
        Referer: https://localhost/\r\n\
        Accept-Encoding: gzip, deflate, sdch\r\n\
        Accept-Language: en-US,en;q=0.8,sv;q=0.6\r\n\
        \r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.path, "/mini.jpg");
    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.len(), 8);
    assert_eq!(parsed.headers.get("Accept-Encoding"), Some("gzip, deflate, sdch"));
}

#[tokio::test]
async fn test_parse_post_request_with_body() {
    let mut req: &[u8] = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/api");
    assert_eq!(parsed.body.as_ref(), b"hello");
}

#[tokio::test]
async fn test_body_length_follows_content_length_exactly() {
    // Trailing bytes past Content-Length stay on the stream.
    let mut req: &[u8] = b"PUT /x HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcdef";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.body.as_ref(), b"abc");
    assert_eq!(req, &b"def"[..]);
}

#[tokio::test]
async fn test_missing_content_length_means_empty_body() {
    let mut req: &[u8] = b"DELETE /thing HTTP/1.1\r\nHost: h\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.method, Method::DELETE);
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_path_keeps_query_string_and_percent_encoding() {
    let mut req: &[u8] = b"GET /search?q=a%20b HTTP/1.1\r\nHost: h\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.path, "/search?q=a%20b");
}

#[tokio::test]
async fn test_request_line_with_two_tokens_is_malformed() {
    let mut req: &[u8] = b"GET /\r\nHost: h\r\n\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::MalformedRequestLine(_)));
    assert!(err.wants_bad_request());
}

#[tokio::test]
async fn test_request_line_with_four_tokens_is_malformed() {
    let mut req: &[u8] = b"GET / HTTP/1.1 extra\r\nHost: h\r\n\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::MalformedRequestLine(_)));
}

#[tokio::test]
async fn test_unrecognized_method_is_rejected() {
    let mut req: &[u8] = b"PATCH /api HTTP/1.1\r\nHost: h\r\n\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::UnknownMethod(_)));
    assert!(err.wants_bad_request());
}

#[tokio::test]
async fn test_method_matching_is_case_sensitive() {
    let mut req: &[u8] = b"get / HTTP/1.1\r\n\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::UnknownMethod(_)));
}

#[tokio::test]
async fn test_non_numeric_content_length_is_rejected() {
    let mut req: &[u8] = b"POST /api HTTP/1.1\r\nContent-Length: five\r\n\r\nhello";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::InvalidContentLength(_)));
    assert!(err.wants_bad_request());
}

#[tokio::test]
async fn test_body_shorter_than_declared_is_truncated() {
    let mut req: &[u8] = b"POST /api HTTP/1.1\r\nContent-Length: 5\r\n\r\nabc";
    let err = parse_request(&mut req).await.unwrap_err();

    match err {
        ParseError::TruncatedBody { expected, got } => {
            assert_eq!(expected, 5);
            assert_eq!(got, 3);
        }
        other => panic!("expected TruncatedBody, got {other:?}"),
    }
}

#[tokio::test]
async fn test_header_region_over_the_cap_is_rejected() {
    let mut req = b"GET / HTTP/1.1\r\n".to_vec();
    while req.len() <= MAX_HEADER_BYTES {
        req.extend_from_slice(b"X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n");
    }
    req.extend_from_slice(b"\r\n");

    let mut stream: &[u8] = &req;
    let err = parse_request(&mut stream).await.unwrap_err();

    assert!(matches!(err, ParseError::HeaderTooLarge(_)));
    assert!(!err.wants_bad_request());
}

#[tokio::test]
async fn test_header_region_just_under_the_cap_is_accepted() {
    let mut req = b"GET / HTTP/1.1\r\n".to_vec();
    let filler_line = b"X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n";
    while req.len() + 2 * filler_line.len() + 2 <= MAX_HEADER_BYTES {
        req.extend_from_slice(filler_line);
    }
    req.extend_from_slice(b"\r\n");
    assert!(req.len() <= MAX_HEADER_BYTES);

    let mut stream: &[u8] = &req;
    let parsed = parse_request(&mut stream).await.unwrap();
    assert_eq!(parsed.path, "/");
}

#[tokio::test]
async fn test_header_line_without_colon_is_malformed() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nNoColonHere\r\n\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::MalformedHeader(_)));
}

#[tokio::test]
async fn test_stream_ending_mid_headers_is_connection_lost() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: h\r\n";
    let err = parse_request(&mut req).await.unwrap_err();

    assert!(matches!(err, ParseError::ConnectionLost(_)));
}

#[tokio::test]
async fn test_cookie_header_is_parsed_into_pairs() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nCookie: a=1; b=2\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.cookie("a"), Some("1"));
    assert_eq!(parsed.cookie("b"), Some("2"));
    assert_eq!(parsed.cookies.len(), 2);
}

#[tokio::test]
async fn test_malformed_cookie_pair_is_dropped_silently() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nCookie: a=1; nonsense\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.cookie("a"), Some("1"));
    assert_eq!(parsed.cookies.len(), 1);
}

#[tokio::test]
async fn test_duplicate_header_last_write_wins() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nX-Tag: one\r\nHost: h\r\nX-Tag: two\r\n\r\n";
    let parsed = parse_request(&mut req).await.unwrap();

    assert_eq!(parsed.headers.get("X-Tag"), Some("two"));
    assert_eq!(parsed.headers.len(), 2);
}

#[tokio::test]
async fn test_parsed_fields_survive_reserialization() {
    let mut req: &[u8] =
        b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 4\r\n\r\nbody";
    let first = parse_request(&mut req).await.unwrap();

    let rendered = first.to_string();
    let mut bytes = rendered.as_bytes();
    let second = parse_request(&mut bytes).await.unwrap();

    assert_eq!(second.method, first.method);
    assert_eq!(second.path, first.path);
    assert_eq!(second.version, first.version);
    assert_eq!(second.headers.get("Host"), first.headers.get("Host"));
    assert_eq!(second.body, first.body);
}
