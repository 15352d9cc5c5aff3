use crate::domain::model::RawRecord;
use crate::domain::ports::{CertificationApi, FetchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Registry client: one GET per lookup against
/// `{base}/certdetails/{cert_id}` with a fixed identifying User-Agent.
pub struct HttpRegistryClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl HttpRegistryClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl CertificationApi for HttpRegistryClient {
    async fn fetch_cert(&self, cert_id: &str) -> Result<FetchOutcome> {
        let url = format!("{}/certdetails/{}", self.base_url, cert_id);
        tracing::debug!("Making registry request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        tracing::debug!("Registry response status: {}", response.status());

        if response.status().is_success() {
            let record: RawRecord = response.json().await?;
            Ok(FetchOutcome::Record(record))
        } else {
            Ok(FetchOutcome::Status(response.status().as_u16()))
        }
    }
}
