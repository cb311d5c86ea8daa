//! Batch runner: process many records with bounded concurrency.
//!
//! Keeps up to `max_concurrent` tasks in flight; when one finishes the next
//! record is started until the queue is empty. Each task runs on tokio's
//! blocking pool since fetches block on curl and on the retry delay.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::fetch::Fetch;
use crate::task::{Orchestrator, Record, TaskStatus};

/// Default number of records processed at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Runs every record through `orchestrator` and returns status by id.
///
/// Results arrive in completion order; if `progress_tx` is `Some`, each
/// `(id, status)` is also sent there as soon as its task finishes. Task
/// failures are statuses; a task that panics is logged and left out of the
/// result.
pub async fn run_all<F>(
    orchestrator: Arc<Orchestrator<F>>,
    records: Vec<Record>,
    max_concurrent: usize,
    progress_tx: Option<mpsc::Sender<(String, TaskStatus)>>,
) -> HashMap<String, TaskStatus>
where
    F: Fetch + Send + Sync + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let total = records.len();
    let mut queue = records.into_iter();
    let mut results = HashMap::with_capacity(total);
    let mut join_set = JoinSet::new();

    tracing::info!(total, max_concurrent, "starting batch");

    loop {
        while join_set.len() < max_concurrent {
            let Some(record) = queue.next() else {
                break;
            };
            let orchestrator = Arc::clone(&orchestrator);
            join_set.spawn_blocking(move || orchestrator.run_task(&record));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (id, status) = match res {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(error = %e, "task did not complete");
                continue;
            }
        };
        if let Some(tx) = &progress_tx {
            let _ = tx.send((id.clone(), status.clone())).await;
        }
        results.insert(id, status);
    }

    tracing::info!(completed = results.len(), total, "batch finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchStatus;
    use crate::retry::FetchError;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Succeeds for URLs containing "ok", tracks peak concurrency.
    #[derive(Default)]
    struct SlowFetcher {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl Fetch for SlowFetcher {
        fn fetch(&self, url: &str, _destination: &Path) -> FetchStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(30));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if url.contains("boom") {
                panic!("fetcher blew up on {}", url);
            }
            if url.contains("ok") {
                FetchStatus::ValidPdf
            } else {
                FetchStatus::Failed(FetchError::Transport("refused".into()))
            }
        }
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(format!("R{}", i), Some(format!("http://ok.test/{}.pdf", i)), None))
            .collect()
    }

    #[tokio::test]
    async fn all_records_get_a_status() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let mut input = records(4);
        input.push(Record::new("none", None, None));
        input.push(Record::new("bad", Some("http://down.test/x".into()), None));

        let results = run_all(Arc::clone(&orch), input, 2, None).await;
        assert_eq!(results.len(), 6);
        for i in 0..4 {
            assert_eq!(results[&format!("R{}", i)], TaskStatus::ValidPdf);
        }
        assert_eq!(results["none"], TaskStatus::NoUrlAvailable);
        assert_eq!(
            results["bad"],
            TaskStatus::FailedPrimaryError("refused".into())
        );
        assert_eq!(orch.fetcher().calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrency_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let results = run_all(Arc::clone(&orch), records(12), 3, None).await;
        assert_eq!(results.len(), 12);
        let peak = orch.fetcher().peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency {} exceeds limit", peak);
        assert!(peak >= 2, "expected tasks to overlap, peak was {}", peak);
    }

    #[tokio::test]
    async fn zero_concurrency_still_runs() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let results = run_all(orch, records(2), 0, None).await;
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let results = run_all(orch, Vec::new(), DEFAULT_MAX_CONCURRENT, None).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn progress_receives_every_result() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let (tx, mut rx) = mpsc::channel(16);
        let results = run_all(orch, records(5), 2, Some(tx)).await;
        let mut seen = Vec::new();
        while let Some((id, status)) = rx.recv().await {
            assert_eq!(results[&id], status);
            seen.push(id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn panicking_task_keeps_other_results() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Arc::new(Orchestrator::new(SlowFetcher::default(), dir.path()));
        let mut input = records(3);
        input.insert(1, Record::new("P1", Some("http://boom.test/x.pdf".into()), None));

        let results = run_all(orch, input, 2, None).await;
        assert_eq!(results.len(), 3);
        assert!(!results.contains_key("P1"));
        for i in 0..3 {
            assert_eq!(results[&format!("R{}", i)], TaskStatus::ValidPdf);
        }
    }
}
