// Byte Roast server: serves the upload page and proxies images to the roast endpoint.

use anyhow::Context;
use argh::FromArgs;
use byte_roast::Config;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(FromArgs)]
/// Upload an image, get roasted.
struct ServerArgs {
    /// the host to run the server on
    #[argh(option, short = 'h', default = "DEFAULT_HOST.to_string()")]
    host: String,

    /// the port to run the server on
    #[argh(option, short = 'p', default = "DEFAULT_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: ServerArgs = argh::from_env();
    let config = Config::from_env()?;

    if config.api_token.is_none() {
        log::warn!("⚠️ CLOUDFLARE_API not set, upstream requests go out without a bearer token");
    }
    log::info!("🔗 Upstream: {}", config.upstream_uri);

    let app = byte_roast::app(config);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("🚀 Server running on http://{}", addr);
    log::info!("📸 Open in your browser to get roasted!");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
