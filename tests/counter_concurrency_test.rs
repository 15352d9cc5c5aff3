use cert_lookup::domain::ports::RequestCounter;
use cert_lookup::FileCounter;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_concurrent_increments_have_no_lost_updates() {
    let temp_dir = TempDir::new().unwrap();
    let counter = Arc::new(FileCounter::new(temp_dir.path().join("counter.txt")));

    const N: u64 = 50;
    let mut handles = Vec::new();
    for _ in 0..N {
        let counter = Arc::clone(&counter);
        handles.push(tokio::spawn(
            async move { counter.increment().await.unwrap() },
        ));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        let value = handle.await.unwrap();
        assert!(seen.insert(value), "duplicate post-increment value {}", value);
    }

    // Exactly {1..N}, no duplicates or gaps.
    let expected: HashSet<u64> = (1..=N).collect();
    assert_eq!(seen, expected);
    assert_eq!(counter.read().await, N);
}

#[tokio::test]
async fn test_counter_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("counter.txt");

    {
        let counter = FileCounter::new(&path);
        counter.increment().await.unwrap();
        counter.increment().await.unwrap();
    }

    let reopened = FileCounter::new(&path);
    assert_eq!(reopened.read().await, 2);
    assert_eq!(reopened.increment().await.unwrap(), 3);
}
