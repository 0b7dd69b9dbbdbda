//! Identity comparison for the no-op write check.
//!
//! A write is skipped only when the new value is *the same value* as the one
//! already stored: scalars and strings compare by value, shared pointers by
//! address, and owned compound values never match. Two vectors with equal
//! contents are still two different instances, so writing one over the other
//! always propagates.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Decides whether a write can be skipped.
pub trait Identity {
    /// Returns `true` when `other` is the same value as `self`.
    fn is_identical(&self, other: &Self) -> bool;
}

/// Implement [`Identity`] by value (`==`) for the listed types.
///
/// Use for plain scalar-like types such as field-less enums.
#[macro_export]
macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::reactive::Identity for $ty {
                #[inline]
                fn is_identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

/// Implement [`Identity`] for the listed types as "always a new instance".
///
/// Every write of such a type propagates.
#[macro_export]
macro_rules! identity_by_instance {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::reactive::Identity for $ty {
                #[inline]
                fn is_identical(&self, _other: &Self) -> bool {
                    false
                }
            }
        )*
    };
}

identity_by_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Identity> Identity for Option<T> {
    fn is_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.is_identical(b),
            _ => false,
        }
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

macro_rules! identity_by_instance_generic {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param),+> Identity for $ty<$($param),+> {
                #[inline]
                fn is_identical(&self, _other: &Self) -> bool {
                    false
                }
            }
        )*
    };
}

identity_by_instance_generic!(
    Vec<T>,
    VecDeque<T>,
    Box<T>,
    HashSet<T, S>,
    BTreeSet<T>,
    HashMap<K, V, S>,
    BTreeMap<K, V>,
);

macro_rules! identity_for_tuples {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name),+> Identity for ($($name,)+) {
                #[inline]
                fn is_identical(&self, _other: &Self) -> bool {
                    false
                }
            }
        )*
    };
}

identity_for_tuples!((A), (A, B), (A, B, C), (A, B, C, D));

/// Dynamic values follow JavaScript strict equality: null, booleans, numbers
/// and strings by value, arrays and objects never.
impl Identity for serde_json::Value {
    fn is_identical(&self, other: &Self) -> bool {
        use serde_json::Value;

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a == b,
                _ => match (a.as_u64(), b.as_u64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => a.as_f64() == b.as_f64(),
                },
            },
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_compare_by_value() {
        assert!(1.is_identical(&1));
        assert!(!1.is_identical(&2));
        assert!("a".to_string().is_identical(&"a".to_string()));
        assert!(true.is_identical(&true));
    }

    #[test]
    fn signed_zero_is_identical_but_rounding_is_not() {
        assert!(0.0_f64.is_identical(&-0.0));
        assert!(!(0.1_f64 + 0.2).is_identical(&0.3));
    }

    #[test]
    fn nan_is_never_identical() {
        assert!(!f64::NAN.is_identical(&f64::NAN));
    }

    #[test]
    fn compound_values_are_distinct_instances() {
        assert!(!vec![1, 2].is_identical(&vec![1, 2]));
        assert!(!(1, 2).is_identical(&(1, 2)));

        let mut map = BTreeMap::new();
        map.insert("k", 1);
        assert!(!map.is_identical(&map.clone()));
    }

    #[test]
    fn shared_pointers_compare_by_address() {
        let a = Rc::new(vec![1]);
        let b = Rc::clone(&a);
        let c = Rc::new(vec![1]);
        assert!(a.is_identical(&b));
        assert!(!a.is_identical(&c));
    }

    #[test]
    fn options_delegate() {
        assert!(None::<i32>.is_identical(&None));
        assert!(Some(3).is_identical(&Some(3)));
        assert!(!Some(3).is_identical(&None));
        assert!(!Some(vec![3]).is_identical(&Some(vec![3])));
    }

    #[test]
    fn json_values_follow_strict_equality() {
        assert!(json!(null).is_identical(&json!(null)));
        assert!(json!(1).is_identical(&json!(1)));
        assert!(json!("x").is_identical(&json!("x")));
        assert!(!json!([1]).is_identical(&json!([1])));
        assert!(!json!({"a": 1}).is_identical(&json!({"a": 1})));
        assert!(!json!(1).is_identical(&json!("1")));
    }
}
