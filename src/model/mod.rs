//! Model definition.
//!
//! - **Bindings**: [`Bindings`] — ordered name → value container
//! - **Model**: [`Model`] — variables, objective, constraints
//! - **Compiled form**: [`CompiledModel`] — expressions bound to variable slots

mod bindings;
mod compiled;
#[allow(clippy::module_inception)]
mod model;

pub use bindings::Bindings;
pub use compiled::CompiledModel;
pub use model::Model;
