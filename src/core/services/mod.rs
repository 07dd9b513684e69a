pub mod answer;
pub mod matching;
pub mod option;
pub mod question;
pub mod sub_question;
pub mod true_false;

use crate::core::models::question::Question;
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::Store;
use crate::core::ports::search::SearchIndex;
use crate::core::sync::sync_projections;
use crate::error::Error;

/// Post-mutation synchronization with the uniform failure policy of the
/// sub-entity paths: an aggregate load failure is hard, projection write
/// failures are logged and the mutation still counts. The root create path
/// deliberately does not use this (see services::question::create).
pub(crate) async fn resync<S, C, X>(store: &mut S, cache: &C, index: &X, question: &Question) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let report = sync_projections(store, cache, index, question).await?;
    if !report.fully_synced() {
        log::warn!(
            "projections for question {} lag behind after mutation (cache_ok={}, search_ok={})",
            question.id,
            report.cache_ok,
            report.search_ok
        );
    }
    Ok(())
}
