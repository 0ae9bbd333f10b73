//! Passes that normalize class-initialization checks before decompilation.
//!
//! [`ClassInitializerEliminator`] runs first and drops checks that are
//! already guaranteed on every path; [`ClassInitializerTransformer`] then
//! lowers what is left into an explicit test-and-call.

pub mod eliminator;
pub mod transformer;

pub use eliminator::ClassInitializerEliminator;
pub use transformer::ClassInitializerTransformer;

use crate::model::Program;

/// An in-place rewrite of a method's control flow graph.
///
/// Implementations must be idempotent and must not move side-effecting
/// instructions across an initialization check.
pub trait ProgramTransform: Send + Sync {
    fn apply(&self, program: &mut Program);
}
