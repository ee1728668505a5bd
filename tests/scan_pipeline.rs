//! End-to-end pipeline tests against mock sites.
//!
//! These tests drive `run_scan` and `scan_target` through the public API:
//! - The two-script scenario, with and without persistence
//! - Partial failure isolation between assets and between targets
//! - Idempotent output and reformatting that never changes the file set

mod helpers;

use std::io::Write;
use std::sync::Arc;

use helpers::*;
use httptest::Server;
use jsmapfinder::extract::Extractor;
use jsmapfinder::fetch::Fetcher;
use jsmapfinder::{run_scan, scan_target, Config, DiscoveryMethod, ScanContext, Target};
use tempfile::{NamedTempFile, TempDir};

#[tokio::test]
async fn test_two_script_page_yields_one_finding() {
    let server = Server::run();
    two_script_site(&server, 1);
    let output = TempDir::new().unwrap();

    let report = run_scan(config_for(server.url_str("/"), Some(output.path())))
        .await
        .expect("scan should complete");

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert!(result.error.is_none());
    assert_eq!(result.findings.len(), 1);

    let finding = &result.findings[0];
    assert_eq!(finding.map_url, server.url_str("/static/app.js.map"));
    assert_eq!(finding.asset_url, server.url_str("/static/app.js"));
    assert_eq!(finding.method, DiscoveryMethod::Directive);
    assert_eq!(finding.sources_count, 1);
    assert!(finding.has_content);
    assert_eq!(finding.extracted_files, 1);

    let seed = format!("map_1_{}", host_label(&server));
    let source = output.path().join("sources").join(format!("{seed}_app.ts"));
    assert_eq!(std::fs::read_to_string(source).unwrap(), "const x=1");

    let map = output.path().join("sourcemaps").join(format!("{seed}.map"));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(map).unwrap()).unwrap();
    assert_eq!(written, serde_json::from_str::<serde_json::Value>(APP_MAP).unwrap());

    // Nothing else was written
    assert_eq!(snapshot(output.path()).len(), 2);

    assert_eq!(report.summary.targets_scanned, 1);
    assert_eq!(report.summary.targets_with_maps, 1);
    assert_eq!(report.summary.total_maps, 1);
    assert_eq!(report.summary.total_sources, 1);
    assert_eq!(report.summary.sources_with_content, 1);
    assert!(report.output_dir.as_ref().unwrap().is_absolute());
}

#[tokio::test]
async fn test_report_only_mode_writes_nothing() {
    let server = Server::run();
    two_script_site(&server, 1);

    let report = run_scan(config_for(server.url_str("/"), None))
        .await
        .unwrap();

    let finding = &report.results[0].findings[0];
    assert_eq!(finding.sources_count, 1);
    assert!(finding.has_content);
    assert_eq!(finding.extracted_files, 0);
    assert!(report.output_dir.is_none());
}

#[tokio::test]
async fn test_one_failing_asset_does_not_affect_siblings() {
    let server = Server::run();
    expect_get(
        &server,
        "/",
        200,
        page(&["/a.js", "/b.js", "/c.js"]),
        1,
    );
    expect_get(
        &server,
        "/a.js",
        200,
        "a();\n//# sourceMappingURL=/maps/a.map".to_string(),
        1,
    );
    expect_get(&server, "/maps/a.map", 200, APP_MAP.to_string(), 1);
    // Transport failure on the asset itself: no probe follows
    expect_get(&server, "/b.js", 503, String::new(), 1);
    expect_get(&server, "/c.js", 200, "c();".to_string(), 1);
    expect_head(&server, "/c.js.map", 200, 1);
    expect_get(&server, "/c.js.map", 200, BUNDLE_MAP.to_string(), 1);

    let report = run_scan(config_for(server.url_str("/"), None))
        .await
        .unwrap();

    let result = &report.results[0];
    assert!(result.error.is_none());
    let found: Vec<(&str, DiscoveryMethod)> = result
        .findings
        .iter()
        .map(|f| (f.map_url.as_str(), f.method))
        .collect();
    let a_map = server.url_str("/maps/a.map");
    let c_map = server.url_str("/c.js.map");
    assert_eq!(
        found,
        vec![
            (a_map.as_str(), DiscoveryMethod::Directive),
            (c_map.as_str(), DiscoveryMethod::ConventionalSuffix),
        ]
    );
    assert_eq!(report.summary.total_sources, 3);
}

#[tokio::test]
async fn test_invalid_candidates_are_dropped() {
    let server = Server::run();
    expect_get(&server, "/", 200, page(&["/html.js", "/nokeys.js"]), 1);
    expect_get(
        &server,
        "/html.js",
        200,
        "//# sourceMappingURL=html.js.map".to_string(),
        1,
    );
    expect_get(
        &server,
        "/html.js.map",
        200,
        "<html>Not Found</html>".to_string(),
        1,
    );
    expect_get(
        &server,
        "/nokeys.js",
        200,
        "//# sourceMappingURL=nokeys.js.map".to_string(),
        1,
    );
    expect_get(
        &server,
        "/nokeys.js.map",
        200,
        r#"{"sources":["a.js"]}"#.to_string(),
        1,
    );

    let report = run_scan(config_for(server.url_str("/"), None))
        .await
        .unwrap();

    assert!(report.results[0].findings.is_empty());
    assert!(report.results[0].error.is_none());
    assert_eq!(report.summary.targets_with_maps, 0);
}

#[tokio::test]
async fn test_unreachable_page_reports_error_without_aborting() {
    let server = Server::run();
    expect_get(&server, "/", 404, String::new(), 1);

    let report = run_scan(config_for(server.url_str("/"), None))
        .await
        .expect("a failed target is not a failed run");

    let result = &report.results[0];
    assert!(result.findings.is_empty());
    assert!(result.error.as_deref().unwrap().contains("404"));
    assert_eq!(report.summary.targets_scanned, 1);
}

#[tokio::test]
async fn test_target_list_with_failures_and_duplicates() {
    let good = Server::run();
    two_script_site(&good, 1);
    let bad = Server::run();
    expect_get(&bad, "/", 500, String::new(), 1);

    let mut list = NamedTempFile::new().unwrap();
    writeln!(list, "{}", good.url_str("/")).unwrap();
    writeln!(list).unwrap();
    writeln!(list, "{}", bad.url_str("/")).unwrap();
    writeln!(list, "   {}   ", good.url_str("/")).unwrap();
    writeln!(list, "not a url at all!!!").unwrap();
    list.flush().unwrap();

    let config = Config {
        file: Some(list.path().to_path_buf()),
        max_concurrency: 2,
        ..Default::default()
    };
    let report = run_scan(config).await.unwrap();

    // good, bad and the rejected line; the duplicate is scanned once
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.summary.targets_scanned, 3);
    assert_eq!(report.summary.targets_with_maps, 1);
    assert_eq!(report.summary.total_maps, 1);

    let good_result = report
        .results
        .iter()
        .find(|r| r.target == good.url_str("/"))
        .unwrap();
    assert_eq!(good_result.findings.len(), 1);

    let failed: Vec<_> = report.results.iter().filter(|r| r.error.is_some()).collect();
    assert_eq!(failed.len(), 2);
}

#[tokio::test]
async fn test_missing_target_list_fails_the_run() {
    let config = Config {
        file: Some("/nonexistent/targets.txt".into()),
        ..Default::default()
    };
    let err = run_scan(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/targets.txt"));
}

#[tokio::test]
async fn test_rescan_is_byte_identical() {
    let server = Server::run();
    two_script_site(&server, 2);
    let output = TempDir::new().unwrap();

    run_scan(config_for(server.url_str("/"), Some(output.path())))
        .await
        .unwrap();
    let first = snapshot(output.path());

    run_scan(config_for(server.url_str("/"), Some(output.path())))
        .await
        .unwrap();
    let second = snapshot(output.path());

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_beautify_changes_bytes_not_files() {
    let server = Server::run();
    expect_get(&server, "/", 200, page(&["/bundle.js"]), 2);
    expect_get(
        &server,
        "/bundle.js",
        200,
        "main();\n/*# sourceMappingURL=bundle.js.map */".to_string(),
        2,
    );
    expect_get(&server, "/bundle.js.map", 200, BUNDLE_MAP.to_string(), 2);

    let plain_dir = TempDir::new().unwrap();
    let pretty_dir = TempDir::new().unwrap();

    run_scan(config_for(server.url_str("/"), Some(plain_dir.path())))
        .await
        .unwrap();
    let mut pretty_config = config_for(server.url_str("/"), Some(pretty_dir.path()));
    pretty_config.beautify = true;
    run_scan(pretty_config).await.unwrap();

    let plain = snapshot(plain_dir.path());
    let pretty = snapshot(pretty_dir.path());
    assert_eq!(
        plain.keys().collect::<Vec<_>>(),
        pretty.keys().collect::<Vec<_>>()
    );

    let seed = format!("map_1_{}", host_label(&server));
    let js = std::path::Path::new("sources").join(format!("{seed}_webpack:___src_index.js"));
    let css = std::path::Path::new("sources").join(format!("{seed}_webpack:___src_util.css"));
    assert_eq!(plain[&js], b"function main(){if(a){b();}}");
    assert_eq!(
        String::from_utf8(pretty[&js].clone()).unwrap(),
        "function main(){\n  if(a){\n    b();\n  }\n}\n"
    );
    assert_eq!(plain[&css], pretty[&css]);
}

#[tokio::test]
async fn test_scan_target_owns_its_statistics() {
    let server = Server::run();
    two_script_site(&server, 1);
    let output = TempDir::new().unwrap();

    let config = config_for(server.url_str("/"), Some(output.path()));
    let extractor = Extractor::from_config(&config).unwrap();
    extractor.layout().prepare().await.unwrap();
    let ctx = ScanContext {
        fetcher: Fetcher::from_config(&config).unwrap(),
        extractor: Some(Arc::new(extractor)),
    };

    let target = Target::parse(&server.url_str("/")).unwrap();
    let outcome = scan_target(&ctx, &target).await;

    assert_eq!(outcome.result.findings.len(), 1);
    assert_eq!(outcome.stats.total_errors(), 0);
    assert_eq!(
        outcome
            .stats
            .get_info_count(jsmapfinder::error_handling::InfoType::DirectiveMatch),
        1
    );
    assert_eq!(
        outcome
            .stats
            .get_info_count(jsmapfinder::error_handling::InfoType::SourceFileExtracted),
        1
    );
}

#[tokio::test]
async fn test_content_key_without_text_counts_as_content() {
    let server = Server::run();
    expect_get(&server, "/", 200, page(&["/nulls.js"]), 1);
    expect_get(
        &server,
        "/nulls.js",
        200,
        "f();\n//# sourceMappingURL=nulls.js.map".to_string(),
        1,
    );
    expect_get(
        &server,
        "/nulls.js.map",
        200,
        r#"{"version":3,"sources":["a.js","b.js"],"sourcesContent":[null,null]}"#.to_string(),
        1,
    );
    let output = TempDir::new().unwrap();

    let config = config_for(server.url_str("/"), Some(output.path()));
    let extractor = Extractor::from_config(&config).unwrap();
    extractor.layout().prepare().await.unwrap();
    let ctx = ScanContext {
        fetcher: Fetcher::from_config(&config).unwrap(),
        extractor: Some(Arc::new(extractor)),
    };

    let target = Target::parse(&server.url_str("/")).unwrap();
    let outcome = scan_target(&ctx, &target).await;

    let finding = &outcome.result.findings[0];
    assert!(finding.has_content);
    assert_eq!(finding.extracted_files, 0);
    assert_eq!(outcome.result.sources_with_content(), 2);
    assert_eq!(
        outcome.stats.get_warning_count(
            jsmapfinder::error_handling::WarningType::MissingSourcesContent
        ),
        1
    );
    // Only the map itself is written
    assert_eq!(snapshot(output.path()).len(), 1);
}

#[tokio::test]
async fn test_json_report_written() {
    let server = Server::run();
    two_script_site(&server, 1);
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.json");

    let mut config = config_for(server.url_str("/"), None);
    config.json_report = Some(report_path.clone());
    run_scan(config).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_maps"], 1);
    assert_eq!(
        json["results"][0]["findings"][0]["asset_url"],
        server.url_str("/static/app.js")
    );
}
