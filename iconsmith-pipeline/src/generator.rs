//! Stateful generation controller.
//!
//! [`Generator`] runs a light pass and an optional dark pass per request and
//! keeps the last successful [`FaviconSet`]. Starting a new request cancels
//! the one in flight, so only the latest input ever publishes results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use iconsmith_core::{ColorVariant, GeneratedAsset, Rasterizer, VariantSpec, VectorSource};
use iconsmith_raster::SvgRasterizer;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::pass::{GenerationPass, PassOutcome, RasterAttempt};

// ============================================================================
// Generator State
// ============================================================================

/// Observable lifecycle of a [`Generator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum GeneratorState {
    /// Nothing generated yet, or reset.
    #[default]
    Idle,
    /// A pass is running.
    Generating,
    /// The latest pass succeeded.
    Ready,
    /// The latest pass failed. Earlier assets stay available.
    Failed(String),
}

impl GeneratorState {
    /// Returns true while a pass is running.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

// ============================================================================
// Favicon Set
// ============================================================================

/// Assets from one successful generation.
#[derive(Debug, Clone)]
pub struct FaviconSet {
    /// Assets rendered from the light source, in variant order.
    pub light: Vec<GeneratedAsset>,
    /// Assets rendered from the dark source, if one was given.
    pub dark: Option<Vec<GeneratedAsset>>,
    /// Every size rendered across both passes.
    pub attempts: Vec<RasterAttempt>,
    /// Wall time of both passes.
    pub duration: Duration,
    /// When the last pass finished.
    pub generated_at: DateTime<Utc>,
}

impl FaviconSet {
    /// All assets, light first.
    pub fn all(&self) -> impl Iterator<Item = &GeneratedAsset> {
        self.light.iter().chain(self.dark.iter().flatten())
    }

    /// Assets for one color.
    pub fn for_color(&self, color: ColorVariant) -> &[GeneratedAsset] {
        match color {
            ColorVariant::Light => &self.light,
            ColorVariant::Dark => self.dark.as_deref().unwrap_or_default(),
        }
    }

    /// Finds an asset by variant id.
    pub fn find(&self, id: &str) -> Option<&GeneratedAsset> {
        self.all().find(|asset| asset.id() == id)
    }

    /// Assets whose ids appear in `ids`, in set order.
    pub fn select<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a GeneratedAsset> {
        self.all()
            .filter(move |asset| ids.iter().any(|id| id == asset.id()))
    }

    /// Number of assets across both colors.
    pub fn len(&self) -> usize {
        self.light.len() + self.dark.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the set holds no assets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total payload bytes.
    pub fn total_bytes(&self) -> usize {
        self.all().map(GeneratedAsset::len).sum()
    }
}

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the generator.
///
/// Behind a std mutex because [`PassGuard`] settles it from `Drop`. Never held
/// across an await.
#[derive(Default)]
struct GeneratorInner {
    /// Last successful set.
    current: Option<Arc<FaviconSet>>,
    /// Pass id and token of the request in flight.
    active: Option<(u64, CancellationToken)>,
}

// ============================================================================
// Generator
// ============================================================================

/// Runs generation passes and holds the latest result.
///
/// Observable via [`Generator::subscribe`].
pub struct Generator {
    pass: GenerationPass,
    light: Vec<VariantSpec>,
    dark: Vec<VariantSpec>,
    inner: Mutex<GeneratorInner>,
    state: watch::Sender<GeneratorState>,
    next_pass: AtomicU64,
}

impl Generator {
    /// Creates a generator using `rasterizer` and the settings in `config`.
    pub fn new(rasterizer: Arc<dyn Rasterizer>, config: &GeneratorConfig) -> Self {
        let pass = GenerationPass::new(rasterizer)
            .with_container_sizes(config.container_sizes.clone())
            .with_concurrency(config.concurrent);
        let (state, _) = watch::channel(GeneratorState::Idle);

        Self {
            pass,
            light: config.light.clone(),
            dark: config.dark.clone(),
            inner: Mutex::new(GeneratorInner::default()),
            state,
            next_pass: AtomicU64::new(0),
        }
    }

    /// Creates a generator backed by [`SvgRasterizer`].
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(Arc::new(SvgRasterizer::with_options(&config.raster)), config)
    }

    /// Replaces the variant lists used by later requests.
    pub fn with_variants(mut self, light: Vec<VariantSpec>, dark: Vec<VariantSpec>) -> Self {
        self.light = light;
        self.dark = dark;
        self
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<GeneratorState> {
        self.state.subscribe()
    }

    /// Returns the current state.
    pub fn state(&self) -> GeneratorState {
        self.state.borrow().clone()
    }

    /// Returns the last successful set.
    pub fn current(&self) -> Option<Arc<FaviconSet>> {
        self.lock().current.clone()
    }

    /// Returns true while a `generate` call is in flight.
    pub fn is_generating(&self) -> bool {
        self.lock().active.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, GeneratorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Generates assets for `light` and, if given, `dark`.
    ///
    /// Cancels any request already in flight. If this request is itself
    /// superseded it returns [`GenerateError::Cancelled`] without touching the
    /// stored set or state.
    #[instrument(skip_all, fields(dark = dark.is_some()))]
    pub async fn generate(
        &self,
        light: VectorSource,
        dark: Option<VectorSource>,
    ) -> Result<Arc<FaviconSet>, GenerateError> {
        let pass_id = self.next_pass.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();

        {
            let mut inner = self.lock();
            if let Some((previous, token)) = inner.active.replace((pass_id, cancel.clone())) {
                debug!(previous, pass_id, "Superseding pass in flight");
                token.cancel();
            }
        }
        self.state.send_replace(GeneratorState::Generating);

        let mut guard = PassGuard {
            generator: self,
            pass_id,
            armed: true,
        };
        let result = self.run_passes(&light, dark.as_ref(), &cancel).await;
        guard.armed = false;

        let mut inner = self.lock();
        let still_active = matches!(&inner.active, Some((active, _)) if *active == pass_id);
        if !still_active {
            debug!(pass_id, "Pass superseded, discarding result");
            return Err(GenerateError::Cancelled);
        }
        inner.active = None;

        match result {
            Ok(set) => {
                let set = Arc::new(set);
                inner.current = Some(Arc::clone(&set));
                self.state.send_replace(GeneratorState::Ready);
                info!(pass_id, assets = set.len(), "Favicon set ready");
                Ok(set)
            }
            Err(GenerateError::Cancelled) => {
                let settled = if inner.current.is_some() {
                    GeneratorState::Ready
                } else {
                    GeneratorState::Idle
                };
                self.state.send_replace(settled);
                Err(GenerateError::Cancelled)
            }
            Err(error) => {
                warn!(pass_id, error = %error, "Generation failed");
                self.state.send_replace(GeneratorState::Failed(error.to_string()));
                Err(error)
            }
        }
    }

    async fn run_passes(
        &self,
        light: &VectorSource,
        dark: Option<&VectorSource>,
        cancel: &CancellationToken,
    ) -> Result<FaviconSet, GenerateError> {
        let PassOutcome {
            result,
            mut attempts,
            mut duration,
            mut finished_at,
            ..
        } = self.pass.run(light, &self.light, cancel).await;
        let light_assets = result?;

        let dark_assets = match dark {
            Some(source) if !self.dark.is_empty() => {
                let outcome = self.pass.run(source, &self.dark, cancel).await;
                attempts.extend(outcome.attempts);
                duration += outcome.duration;
                finished_at = outcome.finished_at;
                Some(outcome.result?)
            }
            _ => None,
        };

        Ok(FaviconSet {
            light: light_assets,
            dark: dark_assets,
            attempts,
            duration,
            generated_at: finished_at,
        })
    }

    /// Cancels the request in flight, if any.
    pub fn cancel(&self) {
        if let Some((pass_id, token)) = self.lock().active.as_ref() {
            debug!(pass_id, "Cancelling pass");
            token.cancel();
        }
    }

    /// Cancels any request in flight and clears stored assets.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some((_, token)) = inner.active.take() {
            token.cancel();
        }
        inner.current = None;
        self.state.send_replace(GeneratorState::Idle);
        debug!("Generator reset");
    }
}

// ============================================================================
// Pass Guard
// ============================================================================

/// Settles the generator when a `generate` future is dropped mid-pass.
///
/// Disarmed once the passes return; `generate` then settles state itself.
struct PassGuard<'a> {
    generator: &'a Generator,
    pass_id: u64,
    armed: bool,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut inner = self.generator.lock();
        let still_active = matches!(&inner.active, Some((active, _)) if *active == self.pass_id);
        if !still_active {
            return;
        }

        if let Some((_, token)) = inner.active.take() {
            token.cancel();
        }
        let settled = if inner.current.is_some() {
            GeneratorState::Ready
        } else {
            GeneratorState::Idle
        };
        self.generator.state.send_replace(settled);
        debug!(pass_id = self.pass_id, "Generate call dropped mid-pass");
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("pass", &self.pass)
            .field("light", &self.light.len())
            .field("dark", &self.dark.len())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
