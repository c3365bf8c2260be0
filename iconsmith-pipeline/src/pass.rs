//! A single generation pass over one vector source.
//!
//! The pass computes the distinct sizes its variants need, rasterizes each
//! size exactly once into a pass-owned [`RasterCache`], encodes the icon
//! container from the cached rasters, and then assembles one asset per
//! variant. Any rasterization failure aborts the whole pass.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use iconsmith_core::{
    CoreError, GeneratedAsset, RasterError, RasterImage, Rasterizer, VariantSpec, VectorSource,
};
use iconsmith_ico::encode_icon_container;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::cache::RasterCache;
use crate::error::GenerateError;
use crate::presets::CONTAINER_SIZES;

/// Largest size an ICO directory entry can describe.
pub const MAX_CONTAINER_SIZE: u32 = 256;

// ============================================================================
// Required Sizes
// ============================================================================

/// Distinct sizes a pass must rasterize, ascending.
///
/// The union of `container_sizes` and the size of every PNG variant. Container
/// sizes are included even when no ICO variant is requested.
pub fn required_sizes(container_sizes: &[u32], variants: &[VariantSpec]) -> Vec<u32> {
    let mut sizes: Vec<u32> = container_sizes
        .iter()
        .copied()
        .chain(variants.iter().filter_map(VariantSpec::raster_size))
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

// ============================================================================
// Raster Attempt
// ============================================================================

/// Record of rasterizing one size.
#[derive(Debug, Clone)]
pub struct RasterAttempt {
    /// The size that was rendered.
    pub size: u32,
    /// Whether rendering succeeded.
    pub success: bool,
    /// Error if rendering failed.
    pub error: Option<String>,
    /// How long the render took.
    pub duration: Duration,
}

impl RasterAttempt {
    /// Creates a successful attempt record.
    pub fn success(size: u32, duration: Duration) -> Self {
        Self {
            size,
            success: true,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(size: u32, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            size,
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Pass Outcome
// ============================================================================

/// The outcome of a generation pass.
#[derive(Debug)]
pub struct PassOutcome {
    /// One asset per requested variant, in request order, or the error that
    /// aborted the pass.
    pub result: Result<Vec<GeneratedAsset>, GenerateError>,
    /// Every size rendered, in completion order for sequential passes and in
    /// size order for concurrent ones.
    pub attempts: Vec<RasterAttempt>,
    /// PNG and SVG assets that were complete when the container failed.
    ///
    /// Empty unless `result` is [`GenerateError::Container`].
    pub salvaged: Vec<GeneratedAsset>,
    /// Total wall time of the pass.
    pub duration: Duration,
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
}

impl PassOutcome {
    fn new(
        result: Result<Vec<GeneratedAsset>, GenerateError>,
        attempts: Vec<RasterAttempt>,
        start: Instant,
    ) -> Self {
        Self {
            result,
            attempts,
            salvaged: Vec::new(),
            duration: start.elapsed(),
            finished_at: Utc::now(),
        }
    }

    /// Returns true if every variant was produced.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns true if the pass was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(&self.result, Err(e) if e.is_cancelled())
    }

    /// Returns the number of sizes rendered or attempted.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns all rasterization errors.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }

    /// Consumes the outcome and returns the assets.
    pub fn into_assets(self) -> Result<Vec<GeneratedAsset>, GenerateError> {
        self.result
    }
}

// ============================================================================
// Generation Pass
// ============================================================================

/// Runs one source through rasterization and container encoding.
#[derive(Clone)]
pub struct GenerationPass {
    rasterizer: Arc<dyn Rasterizer>,
    container_sizes: Vec<u32>,
    concurrent: bool,
}

impl GenerationPass {
    /// Creates a sequential pass with the default container sizes.
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            rasterizer,
            container_sizes: CONTAINER_SIZES.to_vec(),
            concurrent: false,
        }
    }

    /// Sets the sizes embedded in the icon container, in directory order.
    pub fn with_container_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.container_sizes = sizes;
        self
    }

    /// Renders distinct sizes concurrently instead of one after another.
    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Returns the container sizes.
    pub fn container_sizes(&self) -> &[u32] {
        &self.container_sizes
    }

    /// Returns true if sizes render concurrently.
    pub fn is_concurrent(&self) -> bool {
        self.concurrent
    }

    /// Checks the container sizes and every variant before any work starts.
    pub fn validate(&self, variants: &[VariantSpec]) -> Result<(), GenerateError> {
        if self.container_sizes.is_empty() {
            return Err(CoreError::InvalidConfig("no container sizes".to_string()).into());
        }
        if let Some(&bad) = self
            .container_sizes
            .iter()
            .find(|&&s| s == 0 || s > MAX_CONTAINER_SIZE)
        {
            return Err(CoreError::InvalidConfig(format!(
                "container size {bad} outside 1..={MAX_CONTAINER_SIZE}"
            ))
            .into());
        }
        for variant in variants {
            variant.validate()?;
        }
        Ok(())
    }

    /// Execute the pass.
    ///
    /// `cancel` is checked at every suspension point. A cancelled pass
    /// returns [`GenerateError::Cancelled`] and drops its partial cache.
    #[instrument(
        skip(self, source, variants, cancel),
        fields(
            rasterizer = self.rasterizer.name(),
            variants = variants.len(),
            concurrent = self.concurrent,
        )
    )]
    pub async fn run(
        &self,
        source: &VectorSource,
        variants: &[VariantSpec],
        cancel: &CancellationToken,
    ) -> PassOutcome {
        let start = Instant::now();

        if let Err(error) = self.validate(variants) {
            return PassOutcome::new(Err(error), Vec::new(), start);
        }

        let sizes = required_sizes(&self.container_sizes, variants);
        info!(sizes = ?sizes, "Starting generation pass");

        let (cache, attempts) = if self.concurrent {
            self.rasterize_concurrent(source, &sizes, cancel).await
        } else {
            self.rasterize_sequential(source, &sizes, cancel).await
        };

        let cache = match cache {
            Ok(cache) => cache,
            Err(error) => {
                warn!(error = %error, "Generation pass aborted");
                return PassOutcome::new(Err(error), attempts, start);
            }
        };

        if cancel.is_cancelled() {
            return PassOutcome::new(Err(GenerateError::Cancelled), attempts, start);
        }

        let (result, salvaged) = self.assemble(source, variants, &cache);
        let mut outcome = PassOutcome::new(result, attempts, start);
        outcome.salvaged = salvaged;

        match &outcome.result {
            Ok(assets) => info!(
                assets = assets.len(),
                rasters = cache.len(),
                duration = ?outcome.duration,
                "Generation pass complete"
            ),
            Err(error) => warn!(
                error = %error,
                salvaged = outcome.salvaged.len(),
                "Generation pass failed"
            ),
        }
        outcome
    }

    async fn rasterize_sequential(
        &self,
        source: &VectorSource,
        sizes: &[u32],
        cancel: &CancellationToken,
    ) -> (Result<RasterCache, GenerateError>, Vec<RasterAttempt>) {
        let mut cache = RasterCache::new();
        let mut attempts = Vec::with_capacity(sizes.len());

        for &size in sizes {
            let attempt_start = Instant::now();
            debug!(size, "Rasterizing");

            let rendered = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(size, "Cancelled before raster completed");
                    return (Err(GenerateError::Cancelled), attempts);
                }
                rendered = self.rasterizer.rasterize(source, size) => rendered,
            };

            let duration = attempt_start.elapsed();
            match rendered {
                Ok(image) => {
                    attempts.push(RasterAttempt::success(size, duration));
                    cache.insert(image);
                }
                Err(error) => {
                    if error.is_environment_fatal() {
                        error!(size, error = %error, "Rasterizer unavailable");
                    }
                    attempts.push(RasterAttempt::failure(size, error.to_string(), duration));
                    return (Err(GenerateError::Raster { size, source: error }), attempts);
                }
            }
        }

        (Ok(cache), attempts)
    }

    async fn rasterize_concurrent(
        &self,
        source: &VectorSource,
        sizes: &[u32],
        cancel: &CancellationToken,
    ) -> (Result<RasterCache, GenerateError>, Vec<RasterAttempt>) {
        let renders = sizes.iter().map(|&size| async move {
            let attempt_start = Instant::now();
            let rendered = self.rasterizer.rasterize(source, size).await;
            (size, rendered, attempt_start.elapsed())
        });

        let results = tokio::select! {
            biased;
            () = cancel.cancelled() => return (Err(GenerateError::Cancelled), Vec::new()),
            results = join_all(renders) => results,
        };

        let mut cache = RasterCache::new();
        let mut attempts = Vec::with_capacity(results.len());
        let mut first_error: Option<GenerateError> = None;

        for (size, rendered, duration) in results {
            match rendered {
                Ok(image) => {
                    attempts.push(RasterAttempt::success(size, duration));
                    cache.insert(image);
                }
                Err(error) => {
                    attempts.push(RasterAttempt::failure(size, error.to_string(), duration));
                    // An unusable environment explains every other failure.
                    let replace = match &first_error {
                        None => true,
                        Some(current) => {
                            error.is_environment_fatal()
                                && !current.raster_error().is_some_and(RasterError::is_environment_fatal)
                        }
                    };
                    if replace {
                        first_error = Some(GenerateError::Raster { size, source: error });
                    }
                }
            }
        }

        match first_error {
            Some(error) => (Err(error), attempts),
            None => (Ok(cache), attempts),
        }
    }

    /// Builds one asset per variant from the filled cache.
    ///
    /// The container is encoded once, and only if some variant asks for it.
    fn assemble(
        &self,
        source: &VectorSource,
        variants: &[VariantSpec],
        cache: &RasterCache,
    ) -> (Result<Vec<GeneratedAsset>, GenerateError>, Vec<GeneratedAsset>) {
        let container = if variants.iter().any(VariantSpec::is_container_format) {
            match self.encode_container(cache) {
                Ok(bytes) => Some(bytes),
                Err(error @ GenerateError::Container(_)) => {
                    return (Err(error), Self::salvage(source, variants, cache));
                }
                Err(error) => return (Err(error), Vec::new()),
            }
        } else {
            None
        };

        let mut assets = Vec::with_capacity(variants.len());
        for variant in variants {
            let bytes: Arc<[u8]> = match (variant.is_vector_passthrough(), &container) {
                (true, _) => Arc::from(source.as_bytes()),
                (false, Some(container)) if variant.is_container_format() => Arc::clone(container),
                _ => match cache.require(variant.size) {
                    Ok(image) => image.shared_bytes(),
                    Err(error) => return (Err(error), Vec::new()),
                },
            };
            assets.push(GeneratedAsset::new(variant.clone(), bytes));
        }
        (Ok(assets), Vec::new())
    }

    /// Non-container assets that can still be delivered without the ICO.
    fn salvage(
        source: &VectorSource,
        variants: &[VariantSpec],
        cache: &RasterCache,
    ) -> Vec<GeneratedAsset> {
        variants
            .iter()
            .filter(|v| !v.is_container_format())
            .filter_map(|variant| {
                let bytes: Arc<[u8]> = if variant.is_vector_passthrough() {
                    Arc::from(source.as_bytes())
                } else {
                    cache.get(variant.size).map(RasterImage::shared_bytes)?
                };
                Some(GeneratedAsset::new(variant.clone(), bytes))
            })
            .collect()
    }

    fn encode_container(&self, cache: &RasterCache) -> Result<Arc<[u8]>, GenerateError> {
        let images = cache.collect(&self.container_sizes)?;
        let container = encode_icon_container(&images)?;
        debug!(
            images = container.image_count(),
            bytes = container.len(),
            "Encoded icon container"
        );
        Ok(Arc::from(container.into_bytes()))
    }
}

impl std::fmt::Debug for GenerationPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPass")
            .field("rasterizer", &self.rasterizer.name())
            .field("container_sizes", &self.container_sizes)
            .field("concurrent", &self.concurrent)
            .finish()
    }
}
