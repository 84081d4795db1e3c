use anyhow::{Context, bail};
use tokio::net::lookup_host;

use courier::client::Transport;
use courier::config::Config;
use courier::http::request::RequestBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let arg = std::env::args()
        .nth(1)
        .context("usage: courier <http-url>")?;
    let parsed = url::Url::parse(&arg).context("invalid URL")?;
    if parsed.scheme() != "http" {
        bail!("only plain http:// URLs are supported");
    }

    let host = parsed.host_str().context("URL missing host")?.to_string();
    let port = parsed.port().unwrap_or(80);
    let mut path = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        path = format!("{path}?{query}");
    }

    // The transport connects to a bare IP; resolve the host here.
    let addr = lookup_host((host.as_str(), port))
        .await
        .context("host lookup failed")?
        .next()
        .context("host did not resolve")?;

    let mut request = RequestBuilder::new()
        .domain(&host)
        .ip(addr.ip().to_string())
        .port(port)
        .path(path)
        .timeout(cfg.read_timeout())
        .header("User-Agent", &cfg.user_agent)
        .build()
        .map_err(anyhow::Error::msg)?;

    let mut transport = Transport::new(cfg.connect_timeout());
    let response = transport.send(&mut request, "").await?;

    println!("HTTP {}", response.status_code());
    if !response.server().is_empty() {
        println!("Server: {}", response.server());
    }
    if !response.content_type().is_empty() {
        println!("Content-Type: {}", response.content_type());
    }
    for (name, value) in response.headers().iter() {
        println!("{name}: {value}");
    }
    println!();
    print!("{}", String::from_utf8_lossy(&response.decoded_body()));

    Ok(())
}
