mod downloader;
mod installer;
mod utils;

use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let Some(url) = env::args().nth(1) else {
        eprintln!("usage: cursepack <modpack project url>");
        return;
    };

    if let Err(err) = installer::pack::install_from_url(&url).await {
        eprintln!("An error occured: {err}");
    }
}
