use medref_harvest::config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use medref_harvest::crawler::{run_crawl, CrawlOptions};
use medref_harvest::output::read_report;
use medref_harvest::DiseaseLink;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_A: &str = r#"<html><body><ul>
    <li><a href="/diseases-conditions/acne/symptoms-causes/syc-20368047">Acne</a></li>
    <li><a href="/diseases-conditions/anemia/symptoms-causes/syc-20351360">Anemia</a></li>
    <li><a href="/diseases-conditions/index?letter=B">B</a></li>
    <li><a href="/about">About</a></li>
</ul></body></html>"#;

const ACNE_PAGE: &str = r#"<html><body>
    <h1>Acne</h1>
    <span class="pubdate">Sept. 28, 2023</span>
    <div class="content">
        <div class="toc"><h2>On this page</h2></div>
        <div class="article">
            <p>Preamble without a heading</p>
            <h2>Overview</h2>
            <p>Acne is a skin condition.</p>
            <h2>Symptoms</h2>
            <ul><li>Whiteheads</li><li>Blackheads</li></ul>
            <h3>When to see a doctor</h3>
            <p>If self-care remedies don't clear your acne.</p>
        </div>
    </div>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, keys: &str, output: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", base_url),
            index_keys: keys.to_string(),
            ..SiteConfig::default()
        },
        crawler: CrawlerConfig {
            delay_ms: 0,
            max_retries: 2,
            request_timeout_secs: 5,
            user_agent: "TestBot/1.0".to_string(),
        },
        output: OutputConfig {
            directory: output.to_path_buf(),
        },
    }
}

fn all_items() -> CrawlOptions {
    CrawlOptions {
        start_from: 0,
        limit: None,
        delay: Duration::ZERO,
    }
}

async fn mount_index(server: &MockServer, letter: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/diseases-conditions/index"))
        .and(query_param("letter", letter))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_writes_artifacts_and_report() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), "AB", output.path());

    mount_index(
        &mock_server,
        "A",
        ResponseTemplate::new(200).set_body_string(INDEX_A),
    )
    .await;

    // Index B is down; discovery skips it after max_retries attempts
    Mock::given(method("GET"))
        .and(path("/diseases-conditions/index"))
        .and(query_param("letter", "B"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/diseases-conditions/acne/symptoms-causes/syc-20368047"))
        .and(query_param("p", "1"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACNE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/diseases-conditions/anemia/symptoms-causes/syc-20351360"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let progress = run_crawl(&config, &all_items(), &CancellationToken::new())
        .await
        .expect("harvest should complete");

    assert_eq!(progress.total, 2);
    assert_eq!(progress.successful, 1);
    assert_eq!(progress.failed, 1);
    assert_eq!(
        progress.failed_list,
        vec![DiseaseLink::new(
            "Anemia",
            format!(
                "{}/diseases-conditions/anemia/symptoms-causes/syc-20351360",
                mock_server.uri()
            ),
        )]
    );

    let markdown = std::fs::read_to_string(output.path().join("markdown/acne.md")).unwrap();
    assert!(markdown.starts_with("# Acne\n"));
    assert!(markdown.contains("## Overview\n\nAcne is a skin condition.\n"));
    assert!(markdown.contains("- Whiteheads\n- Blackheads\n"));
    assert!(markdown.contains("### When to see a doctor\n"));
    assert!(!markdown.contains("Preamble"));
    assert!(!markdown.contains("On this page"));

    let yaml = std::fs::read_to_string(output.path().join("yaml/acne.yaml")).unwrap();
    assert!(yaml.contains("pubdate:"));
    assert!(yaml.contains("Sept. 28, 2023"));
    assert!(yaml.contains("heading: When to see a doctor"));

    let report = read_report(&config.output.report_path()).unwrap();
    assert_eq!(report.start_from, 0);
    assert_eq!(report.progress, progress);
}

#[tokio::test]
async fn test_limit_bounds_leaf_requests() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), "A", output.path());

    mount_index(
        &mock_server,
        "A",
        ResponseTemplate::new(200).set_body_string(INDEX_A),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/diseases-conditions/acne/symptoms-causes/syc-20368047"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACNE_PAGE))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/diseases-conditions/anemia/symptoms-causes/syc-20351360"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            ACNE_PAGE.replace("Acne", "Anemia"),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = CrawlOptions {
        start_from: 1,
        limit: Some(1),
        delay: Duration::ZERO,
    };
    let progress = run_crawl(&config, &options, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(progress.total, 1);
    assert_eq!(progress.successful, 1);
    assert!(output.path().join("markdown/anemia.md").exists());
    assert!(!output.path().join("markdown/acne.md").exists());

    let report = read_report(&config.output.report_path()).unwrap();
    assert_eq!(report.start_from, 1);
    assert_eq!(report.resume_index(), 2);
}

#[tokio::test]
async fn test_all_index_pages_failing_yields_empty_run() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), "AB", output.path());

    Mock::given(method("GET"))
        .and(path("/diseases-conditions/index"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&mock_server)
        .await;

    let progress = run_crawl(&config, &all_items(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(progress.total, 0);
    assert_eq!(progress.attempted(), 0);
    assert!(config.output.report_path().exists());
}

#[tokio::test]
async fn test_cancelled_before_start_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), "AB", output.path());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let progress = run_crawl(&config, &all_items(), &cancel).await.unwrap();

    assert_eq!(progress.total, 0);
    let report = read_report(&config.output.report_path()).unwrap();
    assert_eq!(report.progress.failed, 0);
}
