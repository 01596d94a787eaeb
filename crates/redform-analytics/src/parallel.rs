//! Conditional parallel iteration for batched evaluation.
//!
//! Uses rayon when the `parallel` feature is enabled and the batch is large
//! enough per [`AnalyticsConfig`]. Results are always returned in input
//! order, so parallel and sequential runs are indistinguishable.

use redform_core::{AnalyticsConfig, CreditResult};

/// Maps a fallible function over items, conditionally using parallel
/// iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// Sequentially, evaluation stops at the first error. In parallel every item
/// may be evaluated, but the error returned is still the one belonging to
/// the earliest failing item.
#[allow(unused_variables)]
pub fn maybe_parallel_try_map<T, U, F>(
    items: &[T],
    config: &AnalyticsConfig,
    f: F,
) -> CreditResult<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> CreditResult<U> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            let results: Vec<CreditResult<U>> = items.par_iter().map(f).collect();
            return results.into_iter().collect();
        }
    }

    items.iter().map(f).collect()
}
