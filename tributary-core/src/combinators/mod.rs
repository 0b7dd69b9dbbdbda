//! Combinators
//!
//! Convenience surface built on the reactive primitives. Everything here is
//! expressed with [`derive`](crate::reactive::derive), effects and
//! [`value`](crate::reactive::value); nothing reaches into the engine.
//!
//! - [`op`]: fluent boolean, comparison and arithmetic expressions
//! - [`trap`]: per-type derived transforms (strings, numbers, vectors, maps)
//! - [`tmpl!`](crate::tmpl): string templates
//! - [`compute`] / [`compute_all`]: derive from a function of several inputs
//! - [`receive`] / [`transmit`]: keep independent signals in step
//! - collection helpers on `Signal<Vec<T>>` and map signals (`push`,
//!   `splice`, `merge`, ...)

mod collections;
mod compute;
mod connect;
mod op;
mod tmpl;
mod trap;
mod truthy;

pub use compute::{compute, compute_all, ComputeArgs};
pub use connect::{receive, transmit};
pub use op::{op, Length, Op};
pub use tmpl::{piece, template, Piece, Render};
pub use trap::{trap, Trap};
pub use truthy::Truthy;
