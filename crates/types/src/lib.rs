//! Foundation types shared by every sunquote crate.
//!
//! - The proposal input model and its boundary validation
//! - The flat request adapter
//! - Colour and page geometry primitives

pub mod adapter;
pub mod color;
pub mod geometry;
pub mod model;
pub mod validate;

pub use adapter::{FlatProposalRequest, ProposalRequest};
pub use color::{Color, Palette};
pub use geometry::{Margins, Rect, Size};
pub use model::{
    Client, Investment, InverterSpec, ModuleSpec, MonthKey, MonthlyProduction, ProposalInput,
    SystemSpec, YearlyReturn,
};
pub use validate::{ValidationError, ValidationErrors};
