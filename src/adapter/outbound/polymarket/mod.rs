//! Polymarket REST integration.
//!
//! - **Gamma API** (`gamma-api.polymarket.com`): event listing
//! - **CLOB API** (`clob.polymarket.com`): best-price lookups

pub mod clob;
pub mod gamma;
pub mod settings;

pub use clob::ClobPriceClient;
pub use gamma::GammaClient;
pub use settings::{HttpSettings, ListingSettings, OracleSettings};

use url::Url;

use crate::error::{Error, Result};

/// `base` with `segment` appended as a path segment.
fn endpoint(base: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| Error::Parse(format!("not a base URL: {base}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segment() {
        assert_eq!(
            endpoint("https://gamma-api.polymarket.com", "events").unwrap().as_str(),
            "https://gamma-api.polymarket.com/events"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:1234/api/", "price").unwrap().as_str(),
            "http://127.0.0.1:1234/api/price"
        );
    }

    #[test]
    fn endpoint_rejects_invalid_base() {
        assert!(matches!(endpoint("not a url", "events"), Err(Error::Url(_))));
        assert!(matches!(endpoint("mailto:someone@example.com", "x"), Err(Error::Parse(_))));
    }
}
