//! Aggregate Assembler: picks the adapter for a block and bounds its run.

use std::time::{Duration, Instant};

use futures::future::join_all;
use uwdash_core::{AppConfig, BlockConfig, BlockSettings, BlocksFile, RenderedBlock};

use crate::client::RemoteClient;
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::sources::{BlockSource, RenderContext};

/// Renders configured blocks against the live source APIs.
///
/// Holds no per-render state; every call to [`Renderer::render`] builds a
/// fresh [`RenderContext`] so label lookups are never shared between renders.
#[derive(Debug, Clone)]
pub struct Renderer {
    client: RemoteClient,
    endpoints: Endpoints,
    render_timeout_secs: u64,
}

impl Renderer {
    #[must_use]
    pub fn new(client: RemoteClient, endpoints: Endpoints, render_timeout_secs: u64) -> Self {
        Self {
            client,
            endpoints,
            render_timeout_secs,
        }
    }

    /// # Errors
    ///
    /// Returns [`FeedError`] if the HTTP client cannot be built or an API key
    /// is not a valid header value.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FeedError> {
        let client = RemoteClient::with_connect_timeout(
            config.request_timeout_secs,
            config.connect_timeout_secs,
            &config.user_agent,
        )?;
        let endpoints = Endpoints::from_app_config(config)?;
        Ok(Self::new(client, endpoints, config.render_timeout_secs))
    }

    #[must_use]
    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Runs one block's fetch chain within the render timeout.
    ///
    /// # Errors
    ///
    /// [`FeedError::Timeout`] when the chain outlives the render timeout;
    /// otherwise whatever the block's adapter returned.
    pub async fn render(&self, block: &BlockConfig) -> Result<RenderedBlock, FeedError> {
        let started = Instant::now();
        let result = tokio::time::timeout(
            Duration::from_secs(self.render_timeout_secs),
            self.assemble(&block.settings),
        )
        .await
        .unwrap_or_else(|_| {
            Err(FeedError::Timeout {
                block: block.id.clone(),
                secs: self.render_timeout_secs,
            })
        });

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(rendered) => tracing::info!(
                block = %block.id,
                kind = %block.kind(),
                count = rendered.len(),
                elapsed_ms,
                "block rendered"
            ),
            Err(e) => tracing::warn!(
                block = %block.id,
                kind = %block.kind(),
                elapsed_ms,
                error = %e,
                "block render failed"
            ),
        }
        result
    }

    /// Renders every block concurrently, keeping file order in the output.
    pub async fn render_all(
        &self,
        blocks: &BlocksFile,
    ) -> Vec<(String, Result<RenderedBlock, FeedError>)> {
        let results = join_all(blocks.blocks.iter().map(|b| self.render(b))).await;
        blocks
            .blocks
            .iter()
            .map(|b| b.id.clone())
            .zip(results)
            .collect()
    }

    async fn assemble(&self, settings: &BlockSettings) -> Result<RenderedBlock, FeedError> {
        let mut ctx = RenderContext::new(&self.client, &self.endpoints);
        Ok(match settings {
            BlockSettings::Events(s) => RenderedBlock::Events(s.build(&mut ctx).await?),
            BlockSettings::ImportantDates(s) => {
                RenderedBlock::ImportantDates(s.build(&mut ctx).await?)
            }
            BlockSettings::News(s) => RenderedBlock::News(s.build(&mut ctx).await?),
            BlockSettings::GlobalNews(s) => RenderedBlock::GlobalNews(s.build(&mut ctx).await?),
            BlockSettings::Stories(s) => RenderedBlock::Stories(s.build(&mut ctx).await?),
        })
    }
}
