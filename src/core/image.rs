use crate::domain::model::{NormalizedCertification, ResolvedImage};
use reqwest::Client;

/// Attachment type for canonical box-art shots.
pub const BOX_ART_TYPE_ID: i64 = 15;

/// Picks the best illustrative image URL for a certificate.
///
/// Priority: first type-15 attachment, else attachment 0, else the game's own
/// image but only when the attachment list is empty. An attachment that wins
/// the chain without a usable `highResUrl` yields no candidate rather than
/// falling through.
pub fn select_candidate(record: &NormalizedCertification) -> Option<String> {
    if let Some(attachment) = record
        .attachments
        .iter()
        .find(|a| a.attachment_type_id == Some(BOX_ART_TYPE_ID))
        .or_else(|| record.attachments.first())
    {
        return attachment.high_res_url.as_deref().map(qualify_scheme);
    }

    record.game.img_url.clone()
}

fn fetch_failed(e: &reqwest::Error, record: &NormalizedCertification) -> String {
    format!(
        "The request for the image was not successful. Status code: {}, {}",
        e.status().map(|s| s.as_u16()).unwrap_or(0),
        record.label
    )
}

/// Registry attachment URLs are stored scheme-relative (`//host/path`).
fn qualify_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

pub struct ImageResolver {
    client: Client,
    user_agent: String,
}

impl ImageResolver {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }

    /// Runs the fallback chain and fetches the winning URL, one attempt.
    /// Never fatal: a failed fetch or an exhausted chain comes back as
    /// `found: false` with an anomaly string for the notifier.
    pub async fn resolve(&self, record: &NormalizedCertification) -> ResolvedImage {
        let url = match select_candidate(record) {
            Some(url) => url,
            None => {
                return ResolvedImage::missing(format!("No image found. Game: {}", record.label))
            }
        };

        tracing::debug!("Fetching image from: {}", url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => ResolvedImage::fetched(bytes.to_vec()),
                Err(e) => ResolvedImage::missing(fetch_failed(&e, record)),
            },
            Ok(response) => ResolvedImage::missing(format!(
                "The request for the image was not successful. Status code: {}, {}",
                response.status().as_u16(),
                record.label
            )),
            Err(e) => ResolvedImage::missing(fetch_failed(&e, record)),
        }
    }
}
