//! Proposal generation pipeline.
//!
//! - [`GeneratorBuilder`]: fluent builder for a configured generator
//! - [`GeneratorConfig`]: serde-loadable settings (work dir, resolution, content)
//! - [`ProposalGenerator`]: validation, derivation, rendering and composition
//!
//! # Example
//!
//! ```ignore
//! use sunquote::GeneratorBuilder;
//!
//! let generator = GeneratorBuilder::new()
//!     .with_work_dir("/var/tmp/sunquote")
//!     .with_raster_dpi(200.0)
//!     .build()?;
//!
//! let proposal = generator.generate(&input)?;
//! std::fs::write(&proposal.file_name, &proposal.bytes)?;
//! ```

mod builder;
pub mod config;
mod generator;

pub use builder::GeneratorBuilder;
pub use config::GeneratorConfig;
pub use generator::{GeneratedProposal, ProposalGenerator, proposal_file_name};
