//! Tributary Core
//!
//! This crate provides a fine-grained reactive state library. It implements:
//!
//! - Reactive primitives (signals, derived signals, effects)
//! - Automatic dependency tracking with synchronous propagation
//! - Combinators that build derived signals from plain values or signals
//!
//! # Architecture
//!
//! The crate is organized into a few modules:
//!
//! - `reactive`: Core reactive primitives and dependency tracking
//! - `combinators`: Fluent helpers (`op`, `trap`, `tmpl!`, `compute`, ...)
//!   built only on `derive`, effects and `value`
//! - `error`: Error types shared by both
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tributary_core::reactive::{derive, Effect, Signal};
//!
//! // Create a signal
//! let count = Signal::new(0);
//!
//! // Create a derived value
//! let source = count.clone();
//! let doubled = derive(move |_| source.get() * 2);
//!
//! // Create an effect
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let (d, log) = (doubled.clone(), Rc::clone(&seen));
//! let _effect = Effect::new(move || log.borrow_mut().push(d.get()));
//!
//! // Update the signal; the effect runs before `set` returns
//! count.set(5);
//! assert_eq!(*seen.borrow(), vec![0, 10]);
//! ```

pub mod combinators;
pub mod error;
pub mod reactive;

pub use error::{ReactiveError, Result};
pub use reactive::{create_effect, create_signal, derive, value, Derived, Effect, Signal};
