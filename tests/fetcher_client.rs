use curator::fetcher::{FetchError, fetch};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn fetch_decodes_successful_html_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>Hello World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/article", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.status.is_success());
    assert!(page.body.contains("Hello World"));
    assert_eq!(page.url_final.as_str(), url);
    assert_eq!(page.encoding, "UTF-8");
}

#[tokio::test]
async fn fetch_surfaces_http_status_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_non_html_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("{\"not\": \"html\"}".as_bytes())
                .insert_header("Content-Type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/data.json", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::UnsupportedContentType(ct)) => assert!(ct.contains("application/json")),
        other => panic!("expected unsupported content-type error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_invalid_urls() {
    match fetch("not a url").await {
        Err(FetchError::InvalidUrl(_)) => {}
        other => panic!("expected invalid url error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_follows_redirects_to_final_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>moved content lives here</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.url_final.as_str().ends_with("/new"));
    assert!(page.body.contains("moved content"));
}
