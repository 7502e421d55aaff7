//! Solver configuration with YAML schema and validation.
//!
//! Mistakes are caught in three layers:
//! - Type-safe configuration structs (`deny_unknown_fields`)
//! - Schema validation via `validator`
//! - Semantic validation of values the schema cannot express
//!
//! # Example YAML
//!
//! ```yaml
//! schema_version: "1.0"
//! restarts:
//!   policy: sampled
//!   count: 5
//!   seed: 42
//! two_opt:
//!   enabled: true
//!   strategy: first-improvement
//!   epsilon: 1.0e-9
//!   max_passes: 10000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{SolverError, SolverResult};
use crate::solver::restart::{RestartPolicy, DEFAULT_SAMPLED_STARTS};
use crate::solver::two_opt::ImprovementStrategy;

/// Top-level solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Which starting cities to try.
    #[serde(default)]
    pub restarts: RestartPolicy,

    /// 2-opt refinement settings.
    #[validate(nested)]
    #[serde(default)]
    pub two_opt: TwoOptConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            restarts: RestartPolicy::default(),
            two_opt: TwoOptConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SolverResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SolverResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn check(&self) -> SolverResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SolverResult<()> {
        self.restarts.validate()?;

        let epsilon = self.two_opt.epsilon;
        if !epsilon.is_finite() {
            return Err(SolverError::config(format!(
                "2-opt epsilon must be finite, got {epsilon}"
            )));
        }

        Ok(())
    }
}

/// 2-opt refinement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TwoOptConfig {
    /// Run 2-opt after construction.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Move selection strategy.
    #[serde(default)]
    pub strategy: ImprovementStrategy,
    /// Minimum length reduction for a move to count as improving.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Maximum neighbourhood scans per restart.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_passes")]
    pub max_passes: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_epsilon() -> f64 {
    1e-9
}

const fn default_max_passes() -> u64 {
    10_000
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: ImprovementStrategy::default(),
            epsilon: default_epsilon(),
            max_passes: default_max_passes(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SolverConfigBuilder {
    restarts: Option<RestartPolicy>,
    seed: Option<u64>,
    two_opt: Option<bool>,
    strategy: Option<ImprovementStrategy>,
    epsilon: Option<f64>,
    max_passes: Option<u64>,
}

impl SolverConfigBuilder {
    /// Set the restart policy.
    #[must_use]
    pub const fn restarts(mut self, policy: RestartPolicy) -> Self {
        self.restarts = Some(policy);
        self
    }

    /// Set the sampling seed. Implies sampled restarts; keeps the count of an
    /// already sampled policy.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable 2-opt refinement.
    #[must_use]
    pub const fn two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = Some(enabled);
        self
    }

    /// Set the 2-opt move strategy.
    #[must_use]
    pub const fn strategy(mut self, strategy: ImprovementStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the 2-opt improvement threshold.
    #[must_use]
    pub const fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the 2-opt pass cap.
    #[must_use]
    pub const fn max_passes(mut self, max_passes: u64) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Build the configuration. Validation happens in
    /// [`crate::TourSolver::new`].
    #[must_use]
    pub fn build(self) -> SolverConfig {
        let mut config = SolverConfig::default();

        if let Some(policy) = self.restarts {
            config.restarts = policy;
        }

        if let Some(seed) = self.seed {
            let count = match config.restarts {
                RestartPolicy::Sampled { count, .. } => count,
                _ => DEFAULT_SAMPLED_STARTS,
            };
            config.restarts = RestartPolicy::Sampled { count, seed };
        }

        if let Some(enabled) = self.two_opt {
            config.two_opt.enabled = enabled;
        }

        if let Some(strategy) = self.strategy {
            config.two_opt.strategy = strategy;
        }

        if let Some(epsilon) = self.epsilon {
            config.two_opt.epsilon = epsilon;
        }

        if let Some(max_passes) = self.max_passes {
            config.two_opt.max_passes = max_passes;
        }

        config
    }
}
