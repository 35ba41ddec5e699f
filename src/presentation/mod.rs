//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Text rendering of stored stack status
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Text views for `list` and `describe`
//!
//! ## Usage
//!
//! ```ignore
//! use stackctl::presentation::factory;
//!
//! let use_case = factory::create_deploy_use_case(&profile)?;
//! let result = use_case.execute(&config, &options)?;
//! ```

pub mod factory;
pub mod output;

pub use factory::{create_deploy_use_case, create_download_use_case, create_stacks_query};
