//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve a small shop and run the full
//! crawl → filter → scrape → export cycle end-to-end.

use chrono::{NaiveDate, Utc};
use shop_sieve::config::Config;
use shop_sieve::{run_pipeline, Pipeline};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", base_url);
    config.output.data_dir = dir.join("data").display().to_string();
    config.output.error_log = dir.join("scraper-error.log").display().to_string();
    config
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_product(server: &MockServer, id: &str, title: &str, price: &str) {
    let body = format!(
        r#"<html><head><title>{title}</title></head><body>
        <div class="shirt-picture"><span><img src="img/shirts/shirt-{id}.jpg" alt="{title}"></span></div>
        <div class="shirt-details"><h1><span class="price">{price}</span> {title}</h1></div>
        </body></html>"#
    );

    Mock::given(method("GET"))
        .and(path("/shirt.php"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Homepage → shirts.php / contact.php → product pages
async fn mount_shop(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><body>
            <ul class="nav">
                <li><a href="shirts.php">Shirts</a></li>
                <li><a href="contact.php">Contact</a></li>
                <li><a href="http://twitter.com/treehouse">Twitter</a></li>
                <li><a href="./">Home</a></li>
                <li><a href="//partner.invalid/shirt.php?id=9">Partner</a></li>
            </ul>
            <a href="shirt.php?id=101">Featured</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/shirts.php",
        r#"<html><body>
            <ul class="nav"><li><a href="contact.php">Contact</a></li></ul>
            <ul class="products">
                <li><a href="shirt.php?id=101">Red</a></li>
                <li><a href="shirt.php?id=102">Black</a></li>
                <li><a href="shirt.php?id=101">Red again</a></li>
            </ul>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/contact.php",
        r#"<html><body><a href="shirts.php">Shirts</a><a href="mailto:hi@example.com">Mail</a></body></html>"#,
    )
    .await;

    mount_product(server, "101", "Logo Shirt, Red", "$18").await;
    mount_product(server, "102", "Mike the Frog Shirt, Black", "$20").await;
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader.headers().expect("Missing header").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Title", "Price", "ImageURL", "URL", "Time"]
    );

    reader
        .records()
        .map(|row| row.expect("Bad row").iter().map(String::from).collect())
        .collect()
}

#[tokio::test]
async fn test_full_scrape_two_levels() {
    let mock_server = MockServer::start().await;
    mount_shop(&mock_server).await;
    let base_url = mock_server.uri();

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, dir.path());

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let pipeline = Pipeline::new(config).expect("Failed to create pipeline");
    let csv_path = pipeline.run_for_date(date).await.expect("Scrape failed");

    assert_eq!(csv_path, dir.path().join("data").join("2024-01-01.csv"));

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0][0], "Logo Shirt, Red");
    assert_eq!(rows[0][1], "$18");
    assert_eq!(rows[0][2], format!("{}/img/shirts/shirt-101.jpg", base_url));
    assert_eq!(rows[0][3], format!("{}/shirt.php?id=101", base_url));
    assert_eq!(rows[0][4].len(), 19);

    assert_eq!(rows[1][0], "Mike the Frog Shirt, Black");
    assert_eq!(rows[1][3], format!("{}/shirt.php?id=102", base_url));

    // Nothing failed, so nothing was logged
    assert!(!dir.path().join("scraper-error.log").exists());
}

#[tokio::test]
async fn test_discover_products_two_levels() {
    let mock_server = MockServer::start().await;
    mount_shop(&mock_server).await;
    let base_url = mock_server.uri();

    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(create_test_config(&base_url, dir.path())).unwrap();
    let products = pipeline.discover_products().await.unwrap();

    assert_eq!(
        products,
        vec![
            format!("{}/shirt.php?id=101", base_url),
            format!("{}/shirt.php?id=102", base_url),
        ]
    );
}

#[tokio::test]
async fn test_listing_page_single_level() {
    let mock_server = MockServer::start().await;
    mount_shop(&mock_server).await;
    let base_url = mock_server.uri();

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, dir.path());
    config.site.seeds = vec!["shirts.php".to_string()];
    config.crawler.levels = 1;
    config.crawler.link_selector = ".products > li > a".to_string();

    let pipeline = Pipeline::new(config).unwrap();
    let products = pipeline.discover_products().await.unwrap();

    assert_eq!(
        products,
        vec![
            format!("{}/shirt.php?id=101", base_url),
            format!("{}/shirt.php?id=102", base_url),
        ]
    );
}

#[tokio::test]
async fn test_failed_product_page_logs_and_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<a href="shirt.php?id=1">One</a><a href="shirt.php?id=2">Two</a>"#,
    )
    .await;
    mount_product(&mock_server, "1", "One", "$1").await;
    Mock::given(method("GET"))
        .and(path("/shirt.php"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), dir.path());
    config.crawler.levels = 1;

    let err = run_pipeline(config).await.unwrap_err();

    assert!(err.is_fetch());
    assert_eq!(err.friendly_message(), "Could not fetch product details");

    // All-or-nothing: no CSV, one log line with the raw message
    assert!(!dir.path().join("data").exists());
    let log = std::fs::read_to_string(dir.path().join("scraper-error.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with(&format!(
        "] Unexpected HTTP status 500 for {}/shirt.php?id=2",
        mock_server.uri()
    )));
}

#[tokio::test]
async fn test_unreachable_homepage_is_fetch_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());

    let err = run_pipeline(config).await.unwrap_err();

    assert!(err.is_fetch());
    assert!(err.friendly_message().starts_with("Could not crawl"));
    assert!(dir.path().join("scraper-error.log").exists());
    assert!(!dir.path().join("data").exists());
}

#[tokio::test]
async fn test_site_without_products_writes_header_only() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<a href="about.php">About</a>"#).await;
    mount_page(&mock_server, "/about.php", r#"<p>We sell nothing.</p>"#).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());

    let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let pipeline = Pipeline::new(config).unwrap();
    let csv_path = pipeline.run_for_date(date).await.unwrap();

    assert!(read_rows(&csv_path).is_empty());
}

#[tokio::test]
async fn test_run_pipeline_writes_todays_csv() {
    let mock_server = MockServer::start().await;
    mount_shop(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());

    let before = Utc::now().date_naive();
    let csv_path = run_pipeline(config).await.expect("Scrape failed");
    let after = Utc::now().date_naive();

    let data_dir = dir.path().join("data");
    assert!(
        csv_path == data_dir.join(format!("{}.csv", before.format("%Y-%m-%d")))
            || csv_path == data_dir.join(format!("{}.csv", after.format("%Y-%m-%d")))
    );

    // The off-site partner link is never followed
    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row[3].starts_with(&mock_server.uri())));
    assert!(!dir.path().join("scraper-error.log").exists());
}
