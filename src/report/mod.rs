//! Report rendering module
//!
//! Turns reconciliation output into consumable artifacts:
//! - plain-text variance table and quick summary (also the input handed to
//!   an external narrative generator)
//! - the narrative-generator seam itself
//! - Excel (.xlsx) report export

pub mod excel;
pub mod narrative;
pub mod text;

pub use narrative::{build_prompt, NarrativeGenerator, NarrativeRequest, QuickNarrative};
