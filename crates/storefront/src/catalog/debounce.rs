//! Search debouncing.
//!
//! Typing into the search box produces a stream of partial queries. Only
//! the query matching the latest input after a quiet period may hit the
//! catalog or update results; everything else resolves as superseded
//! without dispatching. There is no true cancellation of an in-flight
//! request, only disregard of its result.
//!
//! The state is a single generation counter: every submission (including
//! too-short ones) advances it, and a submission only survives the quiet
//! period and the dispatch if the counter still holds its token afterwards.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{CatalogError, CatalogItem};

/// Minimum query length before anything is dispatched.
pub const MIN_QUERY_LEN: usize = 3;

/// Outcome of a debounced search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input was below the minimum length; any previous result set should
    /// be cleared rather than queried for.
    Cleared,
    /// A newer submission superseded this one; nothing was (or will be)
    /// displayed for it.
    Superseded,
    /// This submission was the latest at dispatch time and its results are
    /// current.
    Results(Vec<CatalogItem>),
}

/// Debounces a stream of search inputs down to one dispatch per quiet period.
///
/// Cheaply cloneable; clones share the generation counter, so submissions
/// from any clone supersede each other.
#[derive(Clone)]
pub struct SearchDebouncer {
    generation: Arc<AtomicU64>,
    window: Duration,
}

impl SearchDebouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            window,
        }
    }

    /// Submit one search input.
    ///
    /// `dispatch` is invoked at most once, and only if this submission is
    /// still the latest after the quiet period. A result that lands after
    /// a newer submission is discarded as [`SearchOutcome::Superseded`].
    ///
    /// # Errors
    ///
    /// Propagates the dispatch error when this submission actually
    /// dispatched and the catalog call failed.
    pub async fn submit<F, Fut>(
        &self,
        query: &str,
        dispatch: F,
    ) -> Result<SearchOutcome, CatalogError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Vec<CatalogItem>, CatalogError>>,
    {
        let trimmed = query.trim();

        // Short input clears the results and also supersedes anything pending
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Ok(SearchOutcome::Cleared);
        }

        tokio::time::sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(SearchOutcome::Superseded);
        }

        let results = dispatch(trimmed.to_owned()).await?;

        // "Last one wins" also applies to results arriving out of order
        if self.generation.load(Ordering::SeqCst) != token {
            return Ok(SearchOutcome::Superseded);
        }

        Ok(SearchOutcome::Results(results))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn item(id: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: id.to_string(),
            image: format!("https://img/{id}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_dispatches_once_for_latest() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));
        let dispatched = Arc::new(AtomicUsize::new(0));

        let dispatch = |counter: Arc<AtomicUsize>| {
            move |query: String| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok(vec![item(&query)]) }
            }
        };

        // All three submissions start inside one quiet period
        let (first, second, third) = tokio::join!(
            debouncer.submit("Pi", dispatch(dispatched.clone())),
            debouncer.submit("Pik", dispatch(dispatched.clone())),
            debouncer.submit("Pika", dispatch(dispatched.clone())),
        );

        // "Pi" is below the minimum length
        assert_eq!(first.unwrap(), SearchOutcome::Cleared);
        // "Pik" was superseded before its window elapsed
        assert_eq!(second.unwrap(), SearchOutcome::Superseded);
        // Only "Pika" dispatched
        assert_eq!(third.unwrap(), SearchOutcome::Results(vec![item("Pika")]));
        assert_eq!(dispatched.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_clears_without_dispatch() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));
        let dispatched = Arc::new(AtomicUsize::new(0));
        let counter = dispatched.clone();

        let outcome = debouncer
            .submit("Pi", move |query| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok(vec![item(&query)]) }
            })
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Cleared);
        assert_eq!(dispatched.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lone_submission_dispatches() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));

        let outcome = debouncer
            .submit("Mewtwo", |query| async move { Ok(vec![item(&query)]) })
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Results(vec![item("Mewtwo")]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_supersedes_pending_query() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));
        let dispatched = Arc::new(AtomicUsize::new(0));
        let counter = dispatched.clone();

        // "Pika" is pending when the user deletes back to "Pi": the pending
        // query must not dispatch.
        let (pending, cleared) = tokio::join!(
            debouncer.submit("Pika", move |query| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok(vec![item(&query)]) }
            }),
            debouncer.submit("Pi", |query| async move { Ok(vec![item(&query)]) }),
        );

        assert_eq!(pending.unwrap(), SearchOutcome::Superseded);
        assert_eq!(cleared.unwrap(), SearchOutcome::Cleared);
        assert_eq!(dispatched.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_result_disregarded_when_superseded() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));

        let slow = debouncer.submit("Lugia", |query| async move {
            // Result arrives well after the next submission's window
            tokio::time::sleep(Duration::from_millis(5_000)).await;
            Ok(vec![item(&query)])
        });
        let fast = async {
            // Let the first submission clear its quiet period and dispatch
            tokio::time::sleep(Duration::from_millis(1_000)).await;
            debouncer
                .submit("Lugia V", |query| async move { Ok(vec![item(&query)]) })
                .await
        };

        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert_eq!(slow_outcome.unwrap(), SearchOutcome::Superseded);
        assert_eq!(
            fast_outcome.unwrap(),
            SearchOutcome::Results(vec![item("Lugia V")])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_error_propagates() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(600));

        let result = debouncer
            .submit("Pikachu", |_query| async move {
                Err(CatalogError::Status(503))
            })
            .await;

        assert!(matches!(result, Err(CatalogError::Status(503))));
    }
}
