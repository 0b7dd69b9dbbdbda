//! String templates over signals.
//!
//! [`tmpl!`](crate::tmpl) derives a `String` from a template with `{}`
//! placeholders. Each argument may be a signal, a derived signal, a
//! [`NonSignal`] or any plain `Display` value; signals among them become
//! dependencies of the result.
//!
//! ```rust
//! use tributary_core::tmpl;
//! use tributary_core::reactive::Signal;
//!
//! let done = Signal::new(3);
//! let label = tmpl!("{} of {} done", done, 10);
//! assert_eq!(label.get(), "3 of 10 done");
//!
//! done.set(4);
//! assert_eq!(label.get(), "4 of 10 done");
//! ```
//!
//! Placeholders without an argument render empty; arguments without a
//! placeholder are ignored and never read.

use std::fmt::Display;

use crate::reactive::{derive, Derived, MaybeSignal, NonSignal, Signal};

/// Something that can be rendered into a template.
pub trait Render {
    fn render(&self) -> String;
}

impl<T: Display> Render for T {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: Display + Clone + 'static> Render for Signal<T> {
    fn render(&self) -> String {
        self.get().to_string()
    }
}

impl<T: Display + Clone + 'static> Render for Derived<T> {
    fn render(&self) -> String {
        self.get().to_string()
    }
}

impl<T: Display> Render for NonSignal<T> {
    fn render(&self) -> String {
        AsRef::<T>::as_ref(self).to_string()
    }
}

impl<T: Display + Clone + 'static> Render for MaybeSignal<T> {
    fn render(&self) -> String {
        self.value().to_string()
    }
}

/// A boxed template argument.
pub type Piece = Box<dyn Render>;

/// Box a template argument.
pub fn piece<R: Render + 'static>(value: R) -> Piece {
    Box::new(value)
}

/// Derive a string from `format`, replacing each `{}` with the next piece.
pub fn template(format: &str, pieces: Vec<Piece>) -> Derived<String> {
    let fragments: Vec<String> = format.split("{}").map(str::to_string).collect();
    derive(move |_| {
        let mut out = String::new();
        let holes = fragments.len() - 1;
        for (i, fragment) in fragments.iter().enumerate() {
            out.push_str(fragment);
            if i < holes {
                if let Some(piece) = pieces.get(i) {
                    out.push_str(&piece.render());
                }
            }
        }
        out
    })
}

/// Derive a `String` from a template with `{}` placeholders; see
/// [`template`](crate::combinators::template).
///
/// Arguments are cloned, so signals can be passed without giving up the
/// handle.
#[macro_export]
macro_rules! tmpl {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::combinators::template(
            $format,
            ::std::vec![$($crate::combinators::piece(::std::clone::Clone::clone(&$arg))),*],
        )
    };
}
