//! Deploy Module
//!
//! Reconciles remote state with a stack configuration and records what
//! was deployed.
//!
//! ## Structure
//!
//! - `options` - `DeployOptions`
//! - `result` - `DeployResult`
//! - `use_case` - `DeployUseCase` (reconciler + persistence)
//!
//! ## Usage
//!
//! ```ignore
//! use stackctl::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(status_repo, drivers);
//! let result = use_case.execute(&config, &DeployOptions::new(base_dir))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::{DeployUseCase, CLI_VERSION};
