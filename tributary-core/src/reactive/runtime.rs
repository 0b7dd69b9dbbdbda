//! Reactive Runtime
//!
//! Runtime-wide knobs for the propagation engine and the bookkeeping that
//! enforces them.
//!
//! # Configuration
//!
//! A process-wide default [`RuntimeConfig`] lives behind a lock. Each thread
//! reads it lazily, and may override it for the duration of a closure with
//! [`RuntimeConfig::scoped`]. Overrides never leak to other threads, which
//! keeps tests that tweak the limits independent of each other.
//!
//! # Cycle detection
//!
//! Propagation is synchronous and recursive: a write re-runs its subscribers,
//! whose own writes re-run theirs, and so on. An acyclic graph may nest as
//! deep as its longest chain. A computation only starts again while one of
//! its own runs is still on the stack when its writes feed back into it, so
//! every run enters a [`DepthGuard`] on that computation's counter. Once one
//! computation is re-entered more than `max_propagation_depth` times the
//! guard panics with [`ReactiveError::DepthExceeded`], and a cyclic graph
//! fails loudly instead of overflowing the stack.

use std::cell::Cell;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ReactiveError, Result};

/// What happens when a subscriber panics in the middle of a propagation wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicPolicy {
    /// Keep notifying the remaining subscribers, then report the first panic.
    #[default]
    Isolate,
    /// Unwind immediately; the rest of the wave is skipped.
    Abort,
}

/// Tunables for the propagation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Maximum number of runs of one computation nested inside each other.
    pub max_propagation_depth: usize,
    /// Fault handling for panicking subscribers.
    pub panic_policy: PanicPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_propagation_depth: 256,
            panic_policy: PanicPolicy::Isolate,
        }
    }
}

static GLOBAL_CONFIG: RwLock<RuntimeConfig> = RwLock::new(RuntimeConfig {
    max_propagation_depth: 256,
    panic_policy: PanicPolicy::Isolate,
});

thread_local! {
    /// Per-thread override; `None` falls back to the global default.
    static LOCAL_CONFIG: Cell<Option<RuntimeConfig>> = const { Cell::new(None) };
}

impl RuntimeConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_propagation_depth == 0 {
            return Err(ReactiveError::InvalidConfig(
                "max_propagation_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configuration in effect on the calling thread.
    pub fn current() -> Self {
        LOCAL_CONFIG
            .with(Cell::get)
            .unwrap_or_else(|| *GLOBAL_CONFIG.read())
    }

    /// Replace the process-wide default.
    ///
    /// Threads with an active [`scoped`](Self::scoped) override keep it.
    pub fn set_global(config: Self) -> Result<()> {
        config.validate()?;
        *GLOBAL_CONFIG.write() = config;
        tracing::debug!(?config, "global runtime configuration replaced");
        Ok(())
    }

    /// Run `f` with `self` as the configuration of the calling thread.
    ///
    /// The previous configuration is restored afterwards, also on unwind.
    pub fn scoped<R>(self, f: impl FnOnce() -> R) -> Result<R> {
        self.validate()?;
        let _restore = ScopedConfig::enter(self);
        Ok(f())
    }
}

/// Restores the previous per-thread configuration on drop.
struct ScopedConfig {
    previous: Option<RuntimeConfig>,
}

impl ScopedConfig {
    fn enter(config: RuntimeConfig) -> Self {
        let previous = LOCAL_CONFIG.with(|local| local.replace(Some(config)));
        Self { previous }
    }
}

impl Drop for ScopedConfig {
    fn drop(&mut self) {
        LOCAL_CONFIG.with(|local| local.set(self.previous));
    }
}

/// Guard counting one active run of a computation.
///
/// Entering past the configured limit panics; the counter is released on
/// drop, so an unwinding wave leaves the computation with a clean count.
pub(crate) struct DepthGuard<'a> {
    active: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    pub(crate) fn enter(active: &'a Cell<usize>) -> Self {
        let limit = RuntimeConfig::current().max_propagation_depth;
        let depth = active.get() + 1;
        active.set(depth);
        // Constructed before the check so the increment is undone on panic.
        let guard = Self { active };

        if depth > limit {
            tracing::warn!(depth, limit, "computation re-entered past the depth limit");
            panic!("{}", ReactiveError::DepthExceeded { limit });
        }

        guard
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}
