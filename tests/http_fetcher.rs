// HTTP 抓取集成测试

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site_lingo::config::SiteConfig;
use site_lingo::error::LingoError;
use site_lingo::i18n::MemoryPreferences;
use site_lingo::network::HttpFetcher;
use site_lingo::{DomResultView, PageFetcher, ResourceFetcher, SearchOutcome, Site};

async fn site_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>El café de la casa</p></body></html>"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/latin1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<p>caf\xe9 solo</p>".to_vec(),
            "text/html; charset=ISO-8859-1",
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/slow.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>café lento</p>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

fn fetcher(server: &MockServer) -> HttpFetcher {
    HttpFetcher::new(&format!("{}/docs", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_pages() {
    let server = site_server().await;
    let fetcher = fetcher(&server);

    assert!(fetcher.fetch("index.html").await.unwrap().contains("El café"));
    assert_eq!(
        fetcher.fetch("/latin1.html").await.unwrap(),
        "<p>café solo</p>"
    );
}

#[tokio::test]
async fn error_statuses_are_reported() {
    let server = site_server().await;
    let fetcher = fetcher(&server);

    match fetcher.fetch("broken.html").await {
        Err(LingoError::HttpStatus { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/docs/broken.html"));
        }
        other => panic!("expected status error, got {:?}", other),
    }

    assert!(matches!(
        fetcher.fetch("missing.html").await,
        Err(LingoError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn fetch_all_keeps_order_and_blanks_failures() {
    let server = site_server().await;
    let pages = PageFetcher::new(Arc::new(fetcher(&server)), Duration::from_millis(300));

    let bodies = pages
        .fetch_all(&[
            "broken.html".to_string(),
            "index.html".to_string(),
            "slow.html".to_string(),
            "latin1.html".to_string(),
        ])
        .await;

    assert_eq!(bodies.len(), 4);
    assert_eq!(bodies[0], "");
    assert!(bodies[1].contains("El café"));
    assert_eq!(bodies[2], "");
    assert_eq!(bodies[3], "<p>café solo</p>");
}

#[tokio::test]
async fn searches_a_remote_site() {
    let server = site_server().await;
    let config = SiteConfig {
        base_url: Some(format!("{}/docs/", server.uri())),
        pages: vec![
            "index.html".to_string(),
            "broken.html".to_string(),
            "latin1.html".to_string(),
        ],
        ..SiteConfig::default()
    };
    let site = Site::with_fetcher(
        config.clone(),
        Arc::new(HttpFetcher::new(config.base_url.as_deref().unwrap(), config.fetch_timeout()).unwrap()),
        Arc::new(MemoryPreferences::new()),
        None,
    );
    let view = DomResultView::search_page("Resultados", "h2");

    let SearchOutcome::Results(results) = site.search("café", &view).await else {
        panic!("expected results");
    };
    let pages: Vec<&str> = results.iter().map(|r| r.page.as_str()).collect();
    assert_eq!(pages, vec!["index.html", "latin1.html"]);
}
