//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - Running without a subcommand provisions with default options

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::{StageId, WritePolicy};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicyArg {
    WriteOnce,
    Reconcile,
}

impl From<WritePolicyArg> for WritePolicy {
    fn from(arg: WritePolicyArg) -> Self {
        match arg {
            WritePolicyArg::WriteOnce => WritePolicy::WriteOnce,
            WritePolicyArg::Reconcile => WritePolicy::Reconcile,
        }
    }
}

/// Generated file to print
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Reverse-proxy site
    Proxy,
    /// Backend service unit
    Unit,
}

fn parse_stage(s: &str) -> Result<StageId, String> {
    s.parse::<StageId>().map_err(|e| e.to_string())
}

/// ringprov - idempotent provisioner for the Ring web application host
#[derive(Parser, Debug)]
#[command(name = "ringprov")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'ringprov' without arguments to provision with the effective configuration.")]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: /etc/ringprov/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all provisioning stages
    Provision {
        /// Overwrite generated files that drifted (implies --write-policy reconcile)
        #[arg(short, long)]
        force: bool,

        /// How existing generated files are treated
        #[arg(long, value_enum)]
        write_policy: Option<WritePolicyArg>,

        /// Leave a stage out of this run (repeatable)
        #[arg(long, value_name = "STAGE", value_parser = parse_stage)]
        skip: Vec<StageId>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what each stage would do without changing the host
    Plan {
        /// Plan with a specific write policy
        #[arg(long, value_enum)]
        write_policy: Option<WritePolicyArg>,

        /// Leave a stage out of the plan (repeatable)
        #[arg(long, value_name = "STAGE", value_parser = parse_stage)]
        skip: Vec<StageId>,
    },

    /// Report versions, service states and credentials
    Status,

    /// Print a generated file to stdout
    Render {
        #[arg(value_enum)]
        target: RenderTarget,
    },
}
