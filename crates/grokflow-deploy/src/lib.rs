//! grokflow HuggingFace Space deployment
//!
//! This crate drives the external `docker` and `huggingface-cli` tools to
//! build a Space image, push it to a container registry and point a
//! HuggingFace Space at it.
//!
//! The deployment is an ordered list of steps ([`DeployPlan`]), each tagged
//! with a [`FailurePolicy`]. [`StepRunner`] executes them one after another
//! and enforces the policy: `Abort` stops the deployment, `WarnAndContinue`
//! records a warning and moves on.
//!
//! # Example
//!
//! ```ignore
//! use grokflow_deploy::{DeployParams, Platform, SystemCommandRunner, deploy};
//!
//! let mut params = DeployParams::new("org/grok2api", "1.2.3");
//! params.platform = Platform::Arm64;
//! params.space_name = Some("user/grok2api-space".to_string());
//!
//! let report = deploy(&SystemCommandRunner, &params).await?;
//! println!("{}", report.image_tag);
//! ```

pub mod command;
pub mod error;
pub mod params;
pub mod plan;
pub mod preflight;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use error::{DeployError, Result};
pub use params::{DEFAULT_REGISTRY, DeployParams, Platform, SPACE_BASE_URL, validate_tag};
pub use plan::{DeployPlan, FailurePolicy, Step, StepKind};
pub use preflight::REQUIRED_TOOLS;
pub use runner::{DeployReport, StepRunner, StepWarning, deploy};
