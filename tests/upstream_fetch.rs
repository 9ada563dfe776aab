use std::sync::Arc;

use mockito::Matcher;

use vendor_news::{
    config::NewsConfig, error::NewsError, search::search_news, upstream::FeedClient,
};

fn client_for(upstream: &str, config: NewsConfig) -> FeedClient {
    let config = NewsConfig {
        upstream_base_url: format!("{upstream}/rss/search"),
        ..config
    };
    FeedClient::new(Arc::new(config)).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_encoded_query_and_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rss/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Golden Hour Studios Goa wedding".into()),
            Matcher::UrlEncoded("hl".into(), "en-IN".into()),
            Matcher::UrlEncoded("gl".into(), "IN".into()),
            Matcher::UrlEncoded("ceid".into(), "IN:en".into()),
        ]))
        .match_header("user-agent", Matcher::Regex("Chrome".into()))
        .with_status(200)
        .with_body("<rss><channel></channel></rss>")
        .create_async()
        .await;

    let client = client_for(&server.url(), NewsConfig::default());
    let body = client
        .fetch_feed("Golden Hour Studios Goa wedding")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(body.contains("<channel>"));
}

#[tokio::test]
async fn test_fetch_non_success_status_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let client = client_for(&server.url(), NewsConfig::default());
    let err = client.fetch_feed("anything").await.unwrap_err();
    match err {
        NewsError::UpstreamStatus(status) => assert_eq!(status.as_u16(), 429),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_search_uses_configured_suffix_and_cap() {
    let items: String = (0..6)
        .map(|n| format!("<item><title>Mehendi {n} - Herald</title><link>https://news.test/{n}</link></item>"))
        .collect();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rss/search")
        .match_query(Matcher::UrlEncoded("q".into(), "Henna Hues Udaipur wedding".into()))
        .with_status(200)
        .with_body(format!("<rss><channel>{items}</channel></rss>"))
        .create_async()
        .await;

    let config = NewsConfig {
        query_suffix: " Udaipur wedding".to_string(),
        max_articles: 4,
        ..NewsConfig::default()
    };
    let client = client_for(&server.url(), config);
    let outcome = search_news(&client, "Henna Hues").await.unwrap();

    mock.assert_async().await;
    assert!(outcome.upstream_ok);
    assert_eq!(outcome.query, "Henna Hues Udaipur wedding");
    assert_eq!(outcome.articles.len(), 4);
    assert_eq!(outcome.articles[3].title, "Mehendi 3");
}

#[tokio::test]
async fn test_search_swallows_upstream_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server.url(), NewsConfig::default());
    let outcome = search_news(&client, "Golden").await.unwrap();
    assert!(!outcome.upstream_ok);
    assert!(outcome.articles.is_empty());
    assert_eq!(outcome.query, "Golden Goa wedding");
}

#[tokio::test]
async fn test_search_propagates_transport_errors() {
    let client = client_for("http://127.0.0.1:1", NewsConfig::default());
    let err = search_news(&client, "Golden").await.unwrap_err();
    assert!(matches!(err, NewsError::Http(_)));
}
