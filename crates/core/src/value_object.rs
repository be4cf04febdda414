//! Value object trait: equality by value, not identity.
//!
//! Value objects carry no identity. A `Score` of 70 is interchangeable with any
//! other `Score` of 70, while two products with identical fields are still two
//! different products.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one. Constructors are the place to enforce range/shape rules, so any
/// instance that exists is already valid.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Percent(u8);
///
/// impl ValueObject for Percent {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
