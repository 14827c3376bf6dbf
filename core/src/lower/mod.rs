//! Lowering a [`FunctionDef`] into an evaluable node tree.
//!
//! - [`generic()`]: one node per description node, every edge type-erased.
//! - [`fused()`]: the fusion pass. Known shapes become specialized nodes with
//!   statically-typed children; everything else falls back to the generic
//!   node with fused children.
//!
//! Both lowerings produce trees with the same observable behavior for every
//! argument: same result, same stack and flag state after the call.

mod fused;
mod generic;


pub use fused::{FusionStats, lower as fused};
pub use generic::lower as generic;
