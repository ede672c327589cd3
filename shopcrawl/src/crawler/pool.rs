use std::future::Future;

use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinError};
use tokio_stream::wrappers::ReceiverStream;

/// A fixed-size pool of tokio tasks.
///
/// Each job runs as its own task on the multi-threaded runtime, with at most
/// `concurrency` of them in flight. Results come back in completion order,
/// not submission order.
#[derive(Clone, Copy, Debug)]
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Starts processing `jobs` with `work` and returns a stream of results.
    ///
    /// # Arguments
    ///
    /// * `jobs` - The inputs, one task per input.
    /// * `work` - Builds the future run for a single job.
    ///
    /// # Remarks
    ///
    /// A panicking job surfaces as a `JoinError` in the stream; it never takes
    /// the other jobs down with it.
    ///
    pub fn run<J, R, F, Fut>(&self, jobs: Vec<J>, work: F) -> ReceiverStream<Result<R, JoinError>>
    where
        J: Send + 'static,
        R: Send + 'static,
        F: Fn(J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let concurrency = self.concurrency;
        let (results_tx, results_rx) = mpsc::channel(concurrency * 2);

        tokio::spawn(async move {
            let mut in_flight = futures::stream::iter(jobs)
                .map(|job| tokio::spawn(work(job)))
                .buffer_unordered(concurrency);

            while let Some(result) = in_flight.next().await {
                if let Err(err) = &result {
                    log::error!("worker task failed: {}", err);
                }

                if results_tx.send(result).await.is_err() {
                    log::debug!("result receiver dropped, stopping pool");
                    break;
                }
            }
        });

        ReceiverStream::new(results_rx)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn runs_every_job() {
        let pool = WorkerPool::new(3);
        let results: Vec<_> = pool
            .run((1..=10).collect(), |n: u32| async move { n * 2 })
            .collect()
            .await;

        let mut values: Vec<u32> = results.into_iter().map(|r| r.unwrap()).collect();
        values.sort();
        assert_eq!(values, (1..=10).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn never_exceeds_concurrency() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let pool = WorkerPool::new(2);

        let (active_c, peak_c) = (active.clone(), peak.clone());
        let results: Vec<_> = pool
            .run((0..8).collect(), move |_: u32| {
                let active = active_c.clone();
                let peak = peak_c.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect()
            .await;

        assert_eq!(results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn panicking_job_is_reported_not_fatal() {
        let pool = WorkerPool::new(2);
        let results: Vec<_> = pool
            .run(vec![1u32, 2, 3], |n| async move {
                if n == 2 {
                    panic!("boom");
                }
                n
            })
            .collect()
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }
}
