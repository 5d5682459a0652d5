//! # Generator configuration
//!
//! Everything a generator run needs: where the description comes from, where
//! the tables go, which back end renders them and how strictly the builder
//! treats repeated type variants.

use crate::builder::{BuildOptions, VariantPolicy};
use crate::emitter::{EmitOptions, Target};
use std::fmt;
use std::path::{Path, PathBuf};

/// Namespace the C++ tables are declared in unless overridden
pub const DEFAULT_NAMESPACE: &str = "Asm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// JSON instruction-set description
    pub input: PathBuf,
    /// Generated table file
    pub output: PathBuf,
    pub target: Target,
    /// Namespace (or module path) wrapping the instruction tables
    pub namespace: String,
    pub variant_policy: VariantPolicy,
    /// Report stale output instead of rewriting it
    pub check: bool,
}

impl GenConfig {
    /// Create a configuration, inferring the target from the output
    /// extension when none is given
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        target: Option<Target>,
    ) -> Result<Self, ConfigError> {
        let output = output.into();
        let target = match target {
            Some(target) => target,
            None => Target::from_path(&output).ok_or(ConfigError::UnknownTarget)?,
        };

        let config = Self {
            input: input.into(),
            output,
            target,
            namespace: DEFAULT_NAMESPACE.to_string(),
            variant_policy: VariantPolicy::default(),
            check: false,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Result<Self, ConfigError> {
        self.namespace = namespace.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_variant_policy(mut self, policy: VariantPolicy) -> Self {
        self.variant_policy = policy;
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !uvm_isa::opcode::is_symbol(&self.namespace) {
            return Err(ConfigError::InvalidNamespace);
        }
        if self.output.file_name().is_none() {
            return Err(ConfigError::MissingOutputName);
        }
        if same_path(&self.input, &self.output) {
            return Err(ConfigError::OutputOverwritesInput);
        }
        Ok(())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            variant_policy: self.variant_policy,
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            target: self.target,
            namespace: self.namespace.clone(),
        }
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl fmt::Display for GenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GenConfig {{ input: {}, output: {}, target: {}, namespace: {}, variants: {:?}{} }}",
            self.input.display(),
            self.output.display(),
            self.target,
            self.namespace,
            self.variant_policy,
            if self.check { ", check" } else { "" },
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No target given and the output extension names none
    UnknownTarget,
    /// Namespace must be an identifier, optionally `::`-qualified
    InvalidNamespace,
    /// Output path must name a file
    MissingOutputName,
    /// Output path must differ from the input path
    OutputOverwritesInput,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownTarget => {
                write!(f, "cannot infer target from output extension (use .hpp, .h, .rs, .json or .bin)")
            }
            ConfigError::InvalidNamespace => {
                write!(f, "namespace must be an identifier")
            }
            ConfigError::MissingOutputName => {
                write!(f, "output path must name a file")
            }
            ConfigError::OutputOverwritesInput => {
                write!(f, "output path must differ from the input path")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
