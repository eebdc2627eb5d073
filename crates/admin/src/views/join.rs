//! Structured fan-out for page loaders.

use std::future::Future;

/// Run three fallible fetches concurrently and keep all results or none.
///
/// Resolves with the first error as soon as any fetch fails; the futures
/// still running are dropped at that point.
///
/// # Errors
///
/// Returns the first error produced by any of the three futures.
pub async fn all_or_nothing<A, B, C, E, FA, FB, FC>(a: FA, b: FB, c: FC) -> Result<(A, B, C), E>
where
    FA: Future<Output = Result<A, E>>,
    FB: Future<Output = Result<B, E>>,
    FC: Future<Output = Result<C, E>>,
{
    futures::future::try_join3(a, b, c).await
}
