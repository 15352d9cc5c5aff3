use crate::core::image::ImageResolver;
use crate::core::normalize::normalize;
use crate::domain::model::{LookupFailure, LookupResult};
use crate::domain::ports::{AnomalyNotifier, CertificationApi, FetchOutcome, RequestCounter};
use crate::utils::error::{LookupError, Result};
use chrono::Local;

/// Drives one certificate lookup end to end: count the attempt, fetch the raw
/// record, normalize it, resolve the image, and report anomalies along the
/// way. Generic over the ports so tests can swap any collaborator.
pub struct LookupEngine<A, K, N>
where
    A: CertificationApi,
    K: RequestCounter,
    N: AnomalyNotifier,
{
    api: A,
    counter: K,
    notifier: N,
    images: ImageResolver,
}

impl<A, K, N> LookupEngine<A, K, N>
where
    A: CertificationApi,
    K: RequestCounter,
    N: AnomalyNotifier,
{
    pub fn new(api: A, counter: K, notifier: N, images: ImageResolver) -> Self {
        Self {
            api,
            counter,
            notifier,
            images,
        }
    }

    pub fn counter(&self) -> &K {
        &self.counter
    }

    /// The sole entry point consumed by the presentation layer.
    ///
    /// The counter is bumped before the remote call so attempt accounting
    /// includes failed lookups. Only counter write failures surface as `Err`;
    /// remote problems come back as `LookupResult::Failure`.
    pub async fn lookup(&self, cert_id: &str, requester_name: &str) -> Result<LookupResult> {
        let request_number = self.counter.increment().await?;
        tracing::info!("Lookup #{} for cert {}", request_number, cert_id);

        let raw = match self.api.fetch_cert(cert_id).await {
            Ok(FetchOutcome::Record(raw)) => raw,
            Ok(FetchOutcome::Status(status)) => {
                self.report_fetch_failure(cert_id, requester_name).await;
                return Ok(LookupResult::Failure(LookupFailure::Status(status)));
            }
            Err(LookupError::ApiError(e)) => {
                tracing::warn!("Registry unreachable for cert {}: {}", cert_id, e);
                self.report_fetch_failure(cert_id, requester_name).await;
                return Ok(LookupResult::Failure(LookupFailure::Network(e.to_string())));
            }
            Err(e) => return Err(e),
        };

        let record = match normalize(raw) {
            Ok(record) => record,
            Err(LookupError::MalformedRecord { field }) => {
                tracing::warn!("Malformed record for cert {}: missing {}", cert_id, field);
                self.report_fetch_failure(cert_id, requester_name).await;
                return Ok(LookupResult::Failure(LookupFailure::Malformed(field)));
            }
            Err(e) => return Err(e),
        };

        let image = self.images.resolve(&record).await;
        if !image.found {
            if let Some(anomaly) = image.anomaly.as_deref() {
                self.notifier.notify(anomaly).await;
            }
        }

        Ok(LookupResult::Success {
            record,
            image,
            request_number,
        })
    }

    async fn report_fetch_failure(&self, cert_id: &str, requester_name: &str) {
        let now = Local::now();
        let message = format!(
            "`{}` There was an error in the following game: **`{}`** by **`{}`**",
            now.format("%H:%M:%S"),
            cert_id,
            requester_name
        );
        self.notifier.notify(&message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct StubApi {
        outcome: fn() -> Result<FetchOutcome>,
    }

    #[async_trait]
    impl CertificationApi for StubApi {
        async fn fetch_cert(&self, _cert_id: &str) -> Result<FetchOutcome> {
            (self.outcome)()
        }
    }

    #[derive(Default)]
    struct MemoryCounter {
        value: AtomicU64,
    }

    #[async_trait]
    impl RequestCounter for MemoryCounter {
        async fn increment(&self) -> Result<u64> {
            Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn read(&self) -> u64 {
            self.value.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnomalyNotifier for RecordingNotifier {
        async fn notify(&self, text: &str) {
            self.messages.lock().unwrap().push(text.to_string());
        }
    }

    fn well_formed_record() -> RawRecord {
        serde_json::from_value(serde_json::json!({
            "label": "WATA-12345",
            "game": {"name": "Tetris", "platforms": "Game Boy", "year": 1989, "publisher": "Nintendo"},
            "region": "USA",
            "grade": {"overallGrade": "9.0", "box": "8.5"},
            "attachments": []
        }))
        .unwrap()
    }

    fn engine(
        outcome: fn() -> Result<FetchOutcome>,
    ) -> LookupEngine<StubApi, MemoryCounter, RecordingNotifier> {
        LookupEngine::new(
            StubApi { outcome },
            MemoryCounter::default(),
            RecordingNotifier::default(),
            ImageResolver::new("test-agent"),
        )
    }

    #[tokio::test]
    async fn test_counter_bumped_even_on_fetch_failure() {
        let engine = engine(|| Ok(FetchOutcome::Status(404)));

        let result = engine.lookup("12345", "tester").await.unwrap();
        assert!(matches!(
            result,
            LookupResult::Failure(LookupFailure::Status(404))
        ));
        assert_eq!(engine.counter.read().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_one_anomaly_with_context() {
        let engine = engine(|| Ok(FetchOutcome::Status(500)));

        engine.lookup("12345", "tester").await.unwrap();

        let messages = engine.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("12345"));
        assert!(messages[0].contains("tester"));
    }

    #[tokio::test]
    async fn test_malformed_record_behaves_like_fetch_failure() {
        let engine = engine(|| {
            Ok(FetchOutcome::Record(
                serde_json::from_value(serde_json::json!({
                    "game": {"name": "Tetris", "platforms": "Game Boy"},
                    "grade": {"overallGrade": "9.0", "box": "8.5"}
                }))
                .unwrap(),
            ))
        });

        let result = engine.lookup("12345", "tester").await.unwrap();
        assert!(matches!(
            result,
            LookupResult::Failure(LookupFailure::Malformed(_))
        ));
        assert_eq!(engine.notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_image_is_non_fatal_but_reported() {
        let engine = engine(|| Ok(FetchOutcome::Record(well_formed_record())));

        let result = engine.lookup("12345", "tester").await.unwrap();
        match result {
            LookupResult::Success {
                record,
                image,
                request_number,
            } => {
                assert_eq!(record.label, "WATA-12345");
                assert_eq!(request_number, 1);
                assert!(!image.found);
            }
            other => panic!("expected success, got {:?}", other),
        }

        let messages = engine.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("No image found"));
    }
}
