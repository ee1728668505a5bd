// Shared helpers for the pipeline integration tests.
//
// Each test file includes this with `mod helpers;`, so not every helper is
// used by every file.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use httptest::{matchers::*, responders::*, Expectation, Server};
use jsmapfinder::{Config, Target};

/// A map embedding one TypeScript source.
pub const APP_MAP: &str =
    r#"{"version":3,"file":"app.js","sources":["app.ts"],"sourcesContent":["const x=1"],"names":[],"mappings":"AAAA"}"#;

/// A map embedding two sources, one of them minified JavaScript.
pub const BUNDLE_MAP: &str = r#"{"version":3,"sources":["webpack:///src/index.js","webpack:///src/util.css"],"sourcesContent":["function main(){if(a){b();}}","a{color:red}"],"mappings":""}"#;

/// An HTML page referencing the given script paths.
pub fn page(scripts: &[&str]) -> String {
    let tags: String = scripts
        .iter()
        .map(|src| format!("<script src=\"{src}\"></script>\n"))
        .collect();
    format!("<!doctype html><html><head><title>t</title>\n{tags}</head><body></body></html>")
}

/// Expects `times` GETs of `path`, answered with `status` and `body`.
pub fn expect_get(server: &Server, path: &'static str, status: u16, body: String, times: usize) {
    server.expect(
        Expectation::matching(request::method_path("GET", path))
            .times(times)
            .respond_with(status_code(status).body(body)),
    );
}

/// Expects `times` HEAD probes of `path`, answered with `status`.
pub fn expect_head(server: &Server, path: &'static str, status: u16, times: usize) {
    server.expect(
        Expectation::matching(request::method_path("HEAD", path))
            .times(times)
            .respond_with(status_code(status)),
    );
}

/// The end-to-end site: one script with a directive and a map, one script
/// with neither a directive nor a `.map` sibling. Every resource is
/// expected `times` times.
pub fn two_script_site(server: &Server, times: usize) {
    expect_get(
        server,
        "/",
        200,
        page(&["/static/app.js", "/static/vendor.js"]),
        times,
    );
    expect_get(
        server,
        "/static/app.js",
        200,
        "console.log(1);\n//# sourceMappingURL=app.js.map".to_string(),
        times,
    );
    expect_get(server, "/static/app.js.map", 200, APP_MAP.to_string(), times);
    expect_get(server, "/static/vendor.js", 200, "var v=1;".to_string(), times);
    expect_head(server, "/static/vendor.js.map", 404, times);
}

/// Naming seed host component for a mock server.
///
/// The server may listen on IPv4 or IPv6 loopback, so the label is derived
/// from its URL; every `:` (port separator or IPv6 group) becomes `_`.
pub fn host_label(server: &Server) -> String {
    Target::parse(&server.url_str("/"))
        .expect("mock server URL is a valid target")
        .host_label()
        .replace(':', "_")
}

/// Config scanning `url`, persisting into `output` when given.
pub fn config_for(url: String, output: Option<&Path>) -> Config {
    Config {
        url: Some(url),
        output: output.map(Path::to_path_buf),
        timeout_seconds: 5,
        probe_timeout_seconds: 2,
        ..Default::default()
    }
}

/// Every file below `dir`, keyed by path relative to `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current).expect("readable output dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let bytes = std::fs::read(&path).expect("readable file");
                let relative = path.strip_prefix(dir).expect("below dir").to_path_buf();
                files.insert(relative, bytes);
            }
        }
    }
    files
}
