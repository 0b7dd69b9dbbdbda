//! Truthiness of plain values.
//!
//! The boolean combinators treat values the way a dynamic language would:
//! `false`, zero, NaN, the empty string and `None` are falsy, everything
//! else is truthy. Collections are truthy even when empty.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Converts a value to a boolean for the `op` combinators.
pub trait Truthy {
    fn is_truthy(&self) -> bool;

    fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }
}

macro_rules! truthy_integers {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! truthy_floats {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0.0 && !self.is_nan()
                }
            }
        )*
    };
}

truthy_floats!(f32, f64);

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for char {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

macro_rules! truthy_collections {
    ($($ty:ident < $($param:ident),+ >),*) => {
        $(
            impl<$($param),+> Truthy for $ty<$($param),+> {
                #[inline]
                fn is_truthy(&self) -> bool {
                    true
                }
            }
        )*
    };
}

truthy_collections!(
    Vec<T>,
    VecDeque<T>,
    HashSet<T, S>,
    BTreeSet<T>,
    HashMap<K, V, S>,
    BTreeMap<K, V>
);

impl<A, B> Truthy for (A, B) {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for serde_json::Value {
    fn is_truthy(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n.is_truthy()),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_follow_dynamic_rules() {
        assert!(1_i32.is_truthy());
        assert!(0_u8.is_falsy());
        assert!(f64::NAN.is_falsy());
        assert!((-0.0_f64).is_falsy());
        assert!("x".is_truthy());
        assert!("".is_falsy());
        assert!(String::new().is_falsy());
        assert!(().is_falsy());
    }

    #[test]
    fn options_delegate_and_none_is_falsy() {
        assert!(Some(3_i64).is_truthy());
        assert!(Some(0_i64).is_falsy());
        assert!(None::<i32>.is_falsy());
    }

    #[test]
    fn empty_collections_are_truthy() {
        assert!(Vec::<i32>::new().is_truthy());
        assert!(BTreeMap::<i32, i32>::new().is_truthy());
    }

    #[test]
    fn json_values() {
        assert!(json!(null).is_falsy());
        assert!(json!(0).is_falsy());
        assert!(json!(0.5).is_truthy());
        assert!(json!("").is_falsy());
        assert!(json!([]).is_truthy());
        assert!(json!({}).is_truthy());
    }
}
