//! Wiremock helpers for the release host endpoints

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site_update::ReleaseChannel;

/// Mount the channel version feed, expecting exactly `hits` queries
pub async fn mock_version_feed(
    server: &MockServer,
    channel: ReleaseChannel,
    version: &str,
    hits: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/version/{}", channel)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}\n", version)))
        .expect(hits)
        .mount(server)
        .await;
}

/// Mount the unscoped source version feed
pub async fn mock_source_feed(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/version/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}\n", version)))
        .mount(server)
        .await;
}

/// Mount a failing source version feed
pub async fn mock_source_feed_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/version/"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount a release archive download endpoint
pub async fn mock_archive_download(
    server: &MockServer,
    channel: ReleaseChannel,
    platform_path: &str,
    version: &str,
    archive: Vec<u8>,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/binaries/{}/{}/{}.tar.gz",
            channel, platform_path, version
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .mount(server)
        .await;
}
