// Command-line upload client: roasts a local image through a running server.

use std::path::PathBuf;

use anyhow::{bail, Context};
use argh::FromArgs;
use byte_roast::client::{RoastClient, RoastSession, SelectedImage, DEFAULT_SERVER};

#[derive(FromArgs)]
/// Get an image roasted.
struct RoastArgs {
    /// path to the image to roast
    #[argh(positional)]
    image: PathBuf,

    /// base URL of the byte-roast server
    #[argh(option, short = 's', default = "DEFAULT_SERVER.to_string()")]
    server: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: RoastArgs = argh::from_env();

    let image = SelectedImage::from_path(&args.image)
        .await
        .with_context(|| format!("failed to load {}", args.image.display()))?;
    let Some(image) = image else {
        bail!("{} is not an image", args.image.display());
    };

    let mut session = RoastSession::new();
    session.select(image);

    let client = RoastClient::new(&args.server);
    log::info!("📤 Sending {} to {}", args.image.display(), client.endpoint());

    match session.generate(&client).await {
        Some(outcome) => println!("{}", outcome.text),
        None => bail!("nothing to roast"),
    }

    Ok(())
}
