//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use ringprov::presentation::factory;
//!
//! let use_case = factory::create_provision_use_case(config);
//! let report = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, RenderTarget, WritePolicyArg};
pub use factory::{create_plan_use_case, create_provision_use_case, render_generated};
