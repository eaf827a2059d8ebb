//! Shareable-link configuration and builders.
//!
//! The base URL is plain data; link construction is a standalone helper so
//! callers can build links for any host.

use url::Url;

/// Hosted viewer this build points share links at
pub const VIEWER_BASE_URL: &str = "https://paulgerber-design.github.io/aim-maps/index.html";

/// Shareable viewer link for a hosted row set
pub fn share_url(base: &str, gist_id: &str) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("gist", gist_id);
            url.to_string()
        }
        // A relative or otherwise odd base still yields a usable link
        Err(_) => format!("{base}?gist={gist_id}"),
    }
}
