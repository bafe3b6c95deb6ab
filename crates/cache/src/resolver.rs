//! Resolver seam: the externally supplied fetch behind each cache key.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

/// Performs the remote fetch for one cache key.
///
/// The cache is agnostic to transport and wire shape; anything that can
/// produce a JSON value or fail with an error can back an entry. A transport
/// failure of any kind is a single outcome here; the cache does not
/// distinguish timeouts from refusals.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self) -> anyhow::Result<Value>;
}

/// Adapter turning a plain async closure into a [`Resolver`].
pub struct FnResolver<F>(F);

impl<F, Fut> FnResolver<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    pub fn new(fetch: F) -> Self {
        Self(fetch)
    }
}

#[async_trait]
impl<F, Fut> Resolver for FnResolver<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    async fn resolve(&self) -> anyhow::Result<Value> {
        (self.0)().await
    }
}
