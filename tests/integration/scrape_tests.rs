//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a fake listing page and fake deputy
//! profiles, and run the full scrape cycle end-to-end.

use deputes_scraper::config::{Config, FetchConfig, SourceConfig, UserAgentConfig};
use deputes_scraper::crawler::Scraper;
use deputes_scraper::model::{FailureKind, Field};
use deputes_scraper::output::{self, RenderOptions};
use deputes_scraper::region::resolve_regions;
use deputes_scraper::{FetchErrorKind, RegionError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/deputes/liste/regions";

/// Creates a test configuration pointing every source URL at the mock server
fn create_test_config(base_url: &str, threads: u32, retries: u32, delay_secs: f64) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            listing_url: format!("{}{}", base_url, LISTING_PATH),
        },
        fetch: FetchConfig {
            threads,
            retries,
            delay_secs,
            timeout_secs: 2.0,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestScraper".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
    }
}

/// Builds a listing page with one Bretagne department and one Corse department
fn listing_page(bretagne: &[(&str, u32)], corse: &[(&str, u32)]) -> String {
    let rows = |deputies: &[(&str, u32)]| {
        deputies
            .iter()
            .map(|(name, id)| format!(r#"<li><a href="/deputes/fiche/OMC_PA{}">{}</a></li>"#, id, name))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<html><body>
        <h2>Bretagne</h2>
        <h4 class="departementTitre">Finistère (29)</h4>
        <div><ul>{}</ul></div>
        <h2>Corse</h2>
        <h4 class="departementTitre">Corse-du-Sud (2A)</h4>
        <div><ul>{}</ul></div>
        </body></html>"#,
        rows(bretagne),
        rows(corse)
    )
}

/// Builds a profile page; missing values are left out of the markup
fn profile_page(email: Option<&str>, groupe: &str, circonscription: &str) -> String {
    let email = email
        .map(|address| format!(r#"<a href="mailto:{}">{}</a>"#, address, address))
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <a class="h4 _colored link" href="/groupe">{}</a>
        <div class="_mb-small _centered-text"><span class="_big">{}</span></div>
        {}
        </body></html>"#,
        groupe, circonscription, email
    )
}

async fn mount_listing(mock_server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

async fn mount_profile(mock_server: &MockServer, id: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/dyn/deputes/PA{}", id)))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_bretagne_table_with_missing_email() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        listing_page(&[("Anne Martin", 1001), ("Yann Le Gall", 1002)], &[]),
    )
    .await;
    mount_profile(
        &mock_server,
        1001,
        ResponseTemplate::new(200).set_body_string(profile_page(
            Some("anne.martin@assemblee-nationale.fr"),
            "Groupe Écologiste",
            "1ère circonscription",
        )),
    )
    .await;
    mount_profile(
        &mock_server,
        1002,
        ResponseTemplate::new(200).set_body_string(profile_page(
            None,
            "Les Républicains",
            "3ème circonscription",
        )),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 2, 1, 0.0);
    let regions = resolve_regions(&["Bretagne"]).unwrap();
    let report = Scraper::new(&config).unwrap().run(&regions).await;

    assert!(report.is_complete());
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].nom, "Anne Martin");
    assert_eq!(report.records[0].region, "Bretagne");
    assert_eq!(report.records[1].email, None);
    assert_eq!(report.records[1].groupe.as_deref(), Some("Les Républicains"));

    let options = RenderOptions {
        fields: vec![Field::Nom, Field::Email],
        table: true,
        ..RenderOptions::default()
    };
    let rendered = output::render(&report.records, &options);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Nom"));
    assert!(lines[2].contains("anne.martin@assemblee-nationale.fr"));
    assert!(lines[3].starts_with("Yann Le Gall | "));
    assert!(lines[3].trim_end().ends_with('|'));
}

#[tokio::test]
async fn test_listing_retried_exactly_max_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, 3, 0.1);
    let regions = resolve_regions(&["Bretagne"]).unwrap();

    let start = Instant::now();
    let report = Scraper::new(&config).unwrap().run(&regions).await;
    let elapsed = start.elapsed();

    // Two pauses between three attempts, none after the last one.
    assert!(elapsed >= Duration::from_millis(200));
    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "Bretagne");
    assert_eq!(report.failures[0].attempts, 3);
    assert_eq!(
        report.failures[0].kind,
        FailureKind::Fetch(FetchErrorKind::Status(500))
    );
}

#[tokio::test]
async fn test_profile_timeout_applies_per_attempt() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, listing_page(&[("Anne Martin", 1001)], &[])).await;
    Mock::given(method("GET"))
        .and(path("/dyn/deputes/PA1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(profile_page(Some("a@b.fr"), "G", "C"))
                .set_delay(Duration::from_secs(5)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 1, 2, 0.0);
    config.fetch.timeout_secs = 0.3;
    let regions = resolve_regions(&["Bretagne"]).unwrap();

    let start = Instant::now();
    let report = Scraper::new(&config).unwrap().run(&regions).await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "Anne Martin (Bretagne)");
    assert_eq!(report.failures[0].attempts, 2);
    assert_eq!(
        report.failures[0].kind,
        FailureKind::Fetch(FetchErrorKind::Timeout)
    );
}

#[tokio::test]
async fn test_failed_profile_does_not_abort_run() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        listing_page(
            &[("Anne Martin", 1001), ("Yann Le Gall", 1002), ("Katell Riou", 1003)],
            &[],
        ),
    )
    .await;
    mount_profile(
        &mock_server,
        1001,
        ResponseTemplate::new(200).set_body_string(profile_page(Some("anne@an.fr"), "G1", "C1")),
    )
    .await;
    mount_profile(&mock_server, 1002, ResponseTemplate::new(404)).await;
    mount_profile(
        &mock_server,
        1003,
        ResponseTemplate::new(200).set_body_string(profile_page(Some("katell@an.fr"), "G3", "C3")),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 3, 2, 0.0);
    let regions = resolve_regions(&["Bretagne"]).unwrap();
    let report = Scraper::new(&config).unwrap().run(&regions).await;

    let names: Vec<&str> = report.records.iter().map(|r| r.nom.as_str()).collect();
    assert_eq!(names, vec!["Anne Martin", "Katell Riou"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "Yann Le Gall (Bretagne)");
    assert_eq!(report.failures[0].attempts, 2);
    assert_eq!(report.failures_by_kind().get("fetch"), Some(&1));
    assert!(output::format_summary(&report).contains("2 succeeded, 1 failed"));
}

#[tokio::test]
async fn test_invalid_region_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, listing_page(&[("Anne Martin", 1001)], &[])).await;

    let result = resolve_regions(&["Bretagne", "Atlantide"]);

    assert_eq!(
        result,
        Err(RegionError::Invalid {
            values: vec!["Atlantide".to_string()]
        })
    );
    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_record_order_stable_across_runs() {
    let mock_server = MockServer::start().await;

    let bretagne = [("Anne Martin", 1001), ("Yann Le Gall", 1002), ("Katell Riou", 1003)];
    let corse = [("Paul Santoni", 2001), ("Marie Luciani", 2002)];
    mount_listing(&mock_server, listing_page(&bretagne, &corse)).await;

    // Earlier targets answer slower so completion order differs from target order.
    let delays = [120u64, 90, 60, 30, 0];
    for ((name, id), delay) in bretagne.iter().chain(corse.iter()).zip(delays) {
        let email = format!("{}@an.fr", id);
        mount_profile(
            &mock_server,
            *id,
            ResponseTemplate::new(200)
                .set_body_string(profile_page(Some(&email), "G", name))
                .set_delay(Duration::from_millis(delay)),
        )
        .await;
    }

    let config = create_test_config(&mock_server.uri(), 4, 1, 0.0);
    let regions = resolve_regions(&["Corse", "Bretagne"]).unwrap();
    let scraper = Scraper::new(&config).unwrap();

    let expected = vec![
        "Paul Santoni",
        "Marie Luciani",
        "Anne Martin",
        "Yann Le Gall",
        "Katell Riou",
    ];
    for _ in 0..2 {
        let report = scraper.run(&regions).await;
        let names: Vec<&str> = report.records.iter().map(|r| r.nom.as_str()).collect();
        assert_eq!(names, expected);
        assert_eq!(report.regions_succeeded, 2);
    }
}

#[tokio::test]
async fn test_missing_region_section_reported() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, listing_page(&[("Anne Martin", 1001)], &[])).await;
    mount_profile(
        &mock_server,
        1001,
        ResponseTemplate::new(200).set_body_string(profile_page(Some("anne@an.fr"), "G", "C")),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 2, 1, 0.0);
    let regions = resolve_regions(&["Bretagne", "Normandie"]).unwrap();
    let report = Scraper::new(&config).unwrap().run(&regions).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "Normandie");
    assert_eq!(report.failures[0].kind.as_str(), "parse");
}
