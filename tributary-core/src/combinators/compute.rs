//! Derive a value from a function of several signals or plain values.

use crate::reactive::{derive, Derived, Identity, MaybeSignal};

/// A tuple of [`MaybeSignal`] arguments that can be unwrapped all at once.
pub trait ComputeArgs: 'static {
    /// The plain values, as a tuple of the same arity.
    type Values;

    /// Read every argument, registering the signals among them.
    fn values(&self) -> Self::Values;
}

macro_rules! compute_args {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Clone + 'static),+> ComputeArgs for ($(MaybeSignal<$name>,)+) {
                type Values = ($($name,)+);

                #[allow(non_snake_case)]
                fn values(&self) -> Self::Values {
                    let ($($name,)+) = self;
                    ($($name.value(),)+)
                }
            }
        )*
    };
}

compute_args!((A), (A, B), (A, B, C), (A, B, C, D));

/// Derive `f` applied to the plain values of `args`.
///
/// ```rust
/// use tributary_core::combinators::compute;
/// use tributary_core::reactive::{MaybeSignal, Signal};
///
/// let width = Signal::new(3_u32);
/// let area = compute((MaybeSignal::from(&width), MaybeSignal::from(4_u32)), |(w, h)| w * h);
/// assert_eq!(area.get(), 12);
///
/// width.set(5);
/// assert_eq!(area.get(), 20);
/// ```
pub fn compute<A, R, F>(args: A, f: F) -> Derived<R>
where
    A: ComputeArgs,
    R: Clone + Identity + 'static,
    F: Fn(A::Values) -> R + 'static,
{
    derive(move |_| f(args.values()))
}

/// Derive `f` applied to the plain values of a homogeneous list.
pub fn compute_all<T, R, F>(args: Vec<MaybeSignal<T>>, f: F) -> Derived<R>
where
    T: Clone + 'static,
    R: Clone + Identity + 'static,
    F: Fn(Vec<T>) -> R + 'static,
{
    derive(move |_| f(args.iter().map(MaybeSignal::value).collect()))
}
