use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

// The timeout only takes effect on the first call.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nonpb_terminal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")
    })
}
