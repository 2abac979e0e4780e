use anyhow::Result;
use image::DynamicImage;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::Config;
use crate::hierarchy::PlayerRecord;
use crate::http_client::http_client;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://drive.google.com/uc";
pub const IMAGES_PER_PLAYER: usize = 2;

#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("player has no image id at position {index}")]
    MissingImageId { index: usize },
    #[error("request for image {id} failed: {source}")]
    Request {
        id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("image {id} returned http {status}")]
    Status { id: String, status: StatusCode },
    #[error("image {id} is not image content: {source}")]
    Decode {
        id: String,
        #[source]
        source: image::ImageError,
    },
}

/// Where raw image bytes come from, keyed by external image id.
pub trait ImageSource {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, ImageFetchError>;
}

pub struct HttpImageSource {
    client: &'static Client,
    base_url: String,
}

impl HttpImageSource {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config.http_timeout)?,
            base_url: config.image_base_url.clone(),
        })
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, ImageFetchError> {
        let url = image_url(&self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ImageFetchError::Request {
                id: id.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                id: id.to_string(),
                status,
            });
        }
        let body = resp.bytes().map_err(|source| ImageFetchError::Request {
            id: id.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

pub fn image_url(base_url: &str, id: &str) -> String {
    format!("{base_url}?id={id}")
}

pub fn decode_image(id: &str, bytes: &[u8]) -> Result<DynamicImage, ImageFetchError> {
    image::load_from_memory(bytes).map_err(|source| ImageFetchError::Decode {
        id: id.to_string(),
        source,
    })
}

/// Fetches the player's first and second image in order, handing each one
/// to `on_image` as soon as it decodes. A failure on the second image leaves
/// the first one delivered.
pub fn fetch_player_images<S: ImageSource + ?Sized>(
    source: &S,
    record: &PlayerRecord,
    mut on_image: impl FnMut(usize, DynamicImage),
) -> Result<(), ImageFetchError> {
    for index in 0..IMAGES_PER_PLAYER {
        let id = record
            .image_ids
            .get(index)
            .ok_or(ImageFetchError::MissingImageId { index })?;
        let bytes = source.fetch(id)?;
        let image = decode_image(id, &bytes)?;
        on_image(index, image);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_id_query() {
        assert_eq!(
            image_url(DEFAULT_IMAGE_BASE_URL, "abc123"),
            "https://drive.google.com/uc?id=abc123"
        );
    }

    #[test]
    fn html_body_is_rejected() {
        let err = decode_image("x", b"<html>quota exceeded</html>").unwrap_err();
        assert!(matches!(err, ImageFetchError::Decode { ref id, .. } if id == "x"));
    }
}
