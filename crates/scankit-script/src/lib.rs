//! # ScanKit Script
//!
//! The scripting surface of ScanKit: a two-way mapping between typed scan
//! objects and the mapping-scan DSL.
//!
//! [`ExpressionFactory`] renders models, regions, detectors and whole scan
//! requests as DSL calls in a concise (positional) or verbose (keyword)
//! register; [`parse_path`], [`parse_roi`], [`parse_detector`] and
//! [`parse_request`] read either register back. Rendering and binding are
//! inverses: `parse(render(model)) == model` for every renderable model.

pub mod bind;
pub mod parse;
pub mod render;

pub use bind::{parse_detector, parse_path, parse_request, parse_roi};
pub use parse::{parse_call, parse_expression, PyCall, PyValue};
pub use render::{ExpressionFactory, Register};
