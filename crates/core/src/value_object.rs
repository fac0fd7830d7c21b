//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: `Money`, invite codes and
/// balance snapshots are value objects, while households, expenses and chores are
/// entities (see [`crate::Entity`]).
///
/// To "modify" a value object, build a new one. Two `Money` values holding the same
/// number of cents are the same amount; there is nothing else to compare.
///
/// ```ignore
/// let a = Money::from_minor(4_200);
/// let b = Money::from_minor(4_200);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
