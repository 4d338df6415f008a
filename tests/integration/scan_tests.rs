//! Integration tests for the scanner
//!
//! These tests use wiremock to stand in for the auction API and run full
//! scans over HTTP.

use auction_scout::config::Config;
use auction_scout::output::{ConsolePresenter, ResultPresenter};
use auction_scout::{MatchCriteria, Scanner};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUCTIONS_PATH: &str = "/skyblock/auctions";

/// Builds a successful page body
fn page_body(page: u32, total_pages: u32, auctions: &[(&str, &str, u64, &str)]) -> Value {
    let auctions: Vec<Value> = auctions
        .iter()
        .map(|(name, lore, price, uuid)| {
            json!({
                "uuid": uuid,
                "item_name": name,
                "item_lore": lore,
                "starting_bid": price,
                "bin": true
            })
        })
        .collect();

    json!({
        "success": true,
        "page": page,
        "totalPages": total_pages,
        "totalAuctions": auctions.len(),
        "auctions": auctions
    })
}

async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(AUCTIONS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Mounts five pages; page 2 reports an API failure
async fn mount_five_pages(server: &MockServer) {
    let pages: [&[(&str, &str, u64, &str)]; 5] = [
        &[
            ("Hyperion", "§7Ability: Wither Impact\nUltimate Wise V", 900_000_000, "h-900m"),
            ("Aspect of the End", "Ultimate Wise V", 100_000, "aote"),
        ],
        &[
            ("Heroic Hyperion", "Ultimate Wise V\nWither Impact", 750_000_000, "h-750m"),
            ("Hyperion", "Wither Impact", 1_000_000, "h-no-wise"),
        ],
        &[("Hyperion", "Ultimate Wise V Wither Impact", 1, "h-hidden")],
        &[("HYPERION", "ultimate wise v wither impact", 2, "h-lowercase-lore")],
        &[("Fabled Hyperion", "Wither Impact, Ultimate Wise V", 750_000_000, "h-750m-b")],
    ];

    for (page, auctions) in pages.iter().enumerate() {
        let page = page as u32;
        let template = if page == 2 {
            ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "cause": "Internal error"
            }))
        } else {
            ResponseTemplate::new(200).set_body_json(page_body(page, 5, auctions))
        };
        mount_page(server, page, template).await;
    }
}

fn test_config(server: &MockServer, staleness_secs: u64) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}{}", server.uri(), AUCTIONS_PATH);
    config.scan.batch_width = 2;
    config.scan.window_size = 3;
    config.scan.staleness_secs = staleness_secs;
    config
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

async fn requests_for_page(server: &MockServer, page: u32) -> usize {
    let page = page.to_string();
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| {
            request
                .url
                .query_pairs()
                .any(|(key, value)| key == "page" && value == page.as_str())
        })
        .count()
}

fn hyperion_criteria() -> MatchCriteria {
    MatchCriteria::from_filter("hyperion", "Wither Impact", "Ultimate Wise V")
}

#[tokio::test]
async fn test_full_scan_over_http() {
    let server = MockServer::start().await;
    mount_five_pages(&server).await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let found = scanner.scan(&hyperion_criteria()).await;

    let ids: Vec<&str> = found.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["h-750m", "h-750m-b", "h-900m"]);
    assert_eq!(found[0].name, "heroic hyperion");
    assert_eq!(found[0].price, 750_000_000.0);

    // One request per page; page 0 also carries the page count
    assert_eq!(request_count(&server).await, 5);
    assert_eq!(requests_for_page(&server, 0).await, 1);
    assert_eq!(scanner.cache().len(), 4);
    assert!(!scanner.cache().has(2));

    let report = scanner.last_report().unwrap();
    assert!(report.refreshed);
    assert_eq!(report.total_pages, 5);
    assert_eq!(report.pages_fetched, 4);
    assert_eq!(report.matches, 3);
}

#[tokio::test]
async fn test_repeat_scan_within_window_uses_cache() {
    let server = MockServer::start().await;
    mount_five_pages(&server).await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let first = scanner.scan(&hyperion_criteria()).await;
    let after_first = request_count(&server).await;

    let second = scanner.scan(&hyperion_criteria()).await;
    assert_eq!(first, second);
    assert_eq!(request_count(&server).await, after_first);

    // A different search is answered from the same cache
    let aote = scanner
        .scan(&MatchCriteria::from_filter("aspect", "Ultimate Wise", ""))
        .await;
    assert_eq!(aote.len(), 1);
    assert_eq!(aote[0].id, "aote");
    assert_eq!(request_count(&server).await, after_first);
}

#[tokio::test]
async fn test_stale_cache_refetches_everything() {
    let server = MockServer::start().await;
    mount_five_pages(&server).await;

    let mut scanner = Scanner::from_config(&test_config(&server, 0)).unwrap();
    scanner.scan(&hyperion_criteria()).await;
    scanner.scan(&hyperion_criteria()).await;

    assert_eq!(request_count(&server).await, 10);
    assert_eq!(requests_for_page(&server, 0).await, 2);
}

#[tokio::test]
async fn test_failed_first_page_returns_no_results() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
    )
    .await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let found = scanner
        .scan(&MatchCriteria::from_filter("", "", ""))
        .await;

    assert!(found.is_empty());
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(scanner.last_report().unwrap().total_pages, 0);
}

#[tokio::test]
async fn test_malformed_page_is_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        ResponseTemplate::new(200).set_body_json(page_body(0, 2, &[("Stick", "", 5, "s0")])),
    )
    .await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let found = scanner
        .scan(&MatchCriteria::from_filter("stick", "", ""))
        .await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "s0");
    assert_eq!(scanner.cache().len(), 1);
}

#[tokio::test]
async fn test_scan_and_present_to_console() {
    let server = MockServer::start().await;
    mount_five_pages(&server).await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let mut presenter = ConsolePresenter::new(Vec::new());

    scanner
        .scan_and_present(&hyperion_criteria(), &mut presenter)
        .await
        .unwrap();

    assert_eq!(presenter.entries().len(), 3);
    assert_eq!(presenter.entry(1).unwrap().price_label, "750.00m");
    assert_eq!(presenter.entry(3).unwrap().view_command, "/viewauction h-900m");

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert!(text.contains("heroic hyperion"));
    assert!(text.ends_with("3 matching auctions.\n"));
}

#[tokio::test]
async fn test_presenter_lifecycle_hooks_run_once() {
    #[derive(Default)]
    struct CountingPresenter {
        begins: usize,
        presented: usize,
        finishes: usize,
    }

    impl ResultPresenter for CountingPresenter {
        fn begin(&mut self) -> std::io::Result<()> {
            self.begins += 1;
            Ok(())
        }

        fn present(&mut self, _entry: auction_scout::output::ResultEntry) -> std::io::Result<()> {
            self.presented += 1;
            Ok(())
        }

        fn finish(&mut self) -> std::io::Result<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    let server = MockServer::start().await;
    mount_five_pages(&server).await;

    let mut scanner = Scanner::from_config(&test_config(&server, 60)).unwrap();
    let mut presenter = CountingPresenter::default();
    scanner
        .scan_and_present(&hyperion_criteria(), &mut presenter)
        .await
        .unwrap();

    assert_eq!(presenter.begins, 1);
    assert_eq!(presenter.presented, 3);
    assert_eq!(presenter.finishes, 1);
}
