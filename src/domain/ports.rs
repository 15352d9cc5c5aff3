use crate::domain::model::RawRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// What the registry answered for a cert id, short of transport failures
/// (those come back as `Err`).
#[derive(Debug)]
pub enum FetchOutcome {
    Record(RawRecord),
    Status(u16),
}

#[async_trait]
pub trait CertificationApi: Send + Sync {
    /// Single attempt, no retry, no caching.
    async fn fetch_cert(&self, cert_id: &str) -> Result<FetchOutcome>;
}

#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Atomic read-modify-write; returns the post-increment value. Write
    /// failures are errors, the attempt must not silently disappear.
    async fn increment(&self) -> Result<u64>;

    /// Current value without mutation; absent or corrupt storage reads as 0.
    async fn read(&self) -> u64;
}

#[async_trait]
pub trait AnomalyNotifier: Send + Sync {
    /// Fire-and-forget dispatch; failures are logged and swallowed.
    async fn notify(&self, text: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn registry_base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn webhook_url(&self) -> Option<&str>;
    fn counter_file(&self) -> &str;
}
