use crate::core::{Matcher, PairingError};
use crate::models::PairingResult;
use crate::services::store::{PairingStore, StoreError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a pairing run
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),
}

/// Per-run knobs supplied by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub max_attempts: Option<usize>,
    pub dry_run: bool,
}

/// Outcome of one run of the service
#[derive(Debug, Clone)]
pub struct PairingRun {
    pub run_id: uuid::Uuid,
    /// Seed the shuffle source was built from; replaying it reproduces the run
    pub seed: u64,
    pub persisted: bool,
    pub result: PairingResult,
}

/// Loads the roster, runs the matcher and writes the rotation back
pub struct PairingService<S> {
    store: Arc<S>,
    matcher: Matcher,
    default_seed: Option<u64>,
}

impl<S> Clone for PairingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            matcher: self.matcher,
            default_seed: self.default_seed,
        }
    }
}

impl<S: PairingStore> PairingService<S> {
    pub fn new(store: Arc<S>, matcher: Matcher, default_seed: Option<u64>) -> Self {
        Self {
            store,
            matcher,
            default_seed,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a full pairing round
    ///
    /// Nothing is written when the run fails, when `dry_run` is set, or when
    /// the roster was empty.
    pub async fn run(&self, options: RunOptions) -> Result<PairingRun, ServiceError> {
        let run_id = uuid::Uuid::new_v4();
        let seed = options
            .seed
            .or(self.default_seed)
            .unwrap_or_else(rand::random::<u64>);

        let matcher = match options.max_attempts {
            Some(max_attempts) => Matcher::new(max_attempts)?,
            None => self.matcher,
        };

        tracing::info!(
            "Starting pairing run {} (seed {}, max attempts {}, dry run {})",
            run_id,
            seed,
            matcher.max_attempts(),
            options.dry_run
        );

        let roster = self.store.load_roster().await?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = matcher.generate(&roster, &mut rng).map_err(|e| {
            tracing::warn!("Pairing run {} failed: {}", run_id, e);
            e
        })?;

        let persisted = if options.dry_run || result.is_empty() {
            false
        } else {
            self.store.save_pairings(&result.pairs()).await?;
            true
        };

        tracing::info!(
            "Pairing run {} finished: {} assignments, persisted = {}",
            run_id,
            result.assignments.len(),
            persisted
        );

        Ok(PairingRun {
            run_id,
            seed,
            persisted,
            result,
        })
    }
}
