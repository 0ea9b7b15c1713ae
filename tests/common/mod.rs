//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use redirect_server::config::{loader, Format, FormatCache, ServerConfig};
use redirect_server::routing::DispatchChain;
use redirect_server::HttpServer;

pub const YAML_SOURCE: &str = "\
- path: /rick
  url: https://x/rick
- path: /google
  url: https://x/google
";

pub const JSON_SOURCE: &str = r#"
{
    "config": {
        "/docs": "https://x/docs"
    }
}"#;

pub const TOML_SOURCE: &str = r#"
[links]
"/search" = "https://x/search"

[media]
"/video" = "https://x/video"
"#;

/// Start a redirect server on the given address with the three sample
/// sources loaded into their default namespaces.
pub async fn spawn_server(addr: SocketAddr) {
    let sources = [
        (Format::Yaml, YAML_SOURCE, "/yaml"),
        (Format::Json, JSON_SOURCE, "/json"),
        (Format::Toml, TOML_SOURCE, "/toml"),
    ];

    let cache = FormatCache::new();
    let mut chain = DispatchChain::new();
    for (format, bytes, namespace) in sources {
        let mapping = loader::load(format, bytes.as_bytes(), &cache).unwrap();
        chain.add_namespace(namespace, format, (*mapping).clone());
    }

    let server = HttpServer::new(ServerConfig::default(), chain);
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
}

/// HTTP client that surfaces redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
