//! Type keys and bound argument values.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A resolved argument value.
pub type Value = Box<dyn Any + Send + Sync>;

/// Runtime identity of a parameter's semantic type.
///
/// Equality and hashing use the `TypeId` only; the name is for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `alloc::string::String` → `String`. Generic paths are kept whole.
fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

/// One bound parameter slot.
pub enum Bound {
    /// Optional parameter with no token.
    Absent,
    Single(Value),
    /// Repeated parameter, one value per consumed token.
    Many(Vec<Value>),
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Absent => f.write_str("Absent"),
            Bound::Single(_) => f.write_str("Single(..)"),
            Bound::Many(values) => write!(f, "Many({} values)", values.len()),
        }
    }
}

/// Resolved argument vector handed to a handler, in declared parameter order.
///
/// The sender is passed separately and is not part of this vector.
#[derive(Debug, Default)]
pub struct Arguments {
    slots: Vec<Bound>,
}

impl Arguments {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, bound: Bound) {
        self.slots.push(bound);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the parameter at `index` received a value.
    pub fn is_present(&self, index: usize) -> bool {
        !matches!(self.slots.get(index), None | Some(Bound::Absent))
    }

    /// Borrow a single value, if bound and of type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        match self.slots.get(index)? {
            Bound::Single(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Borrow every value of a repeated parameter. Empty when absent.
    pub fn get_all<T: Any>(&self, index: usize) -> Vec<&T> {
        match self.slots.get(index) {
            Some(Bound::Many(values)) => values
                .iter()
                .filter_map(|v| v.downcast_ref::<T>())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Move a single value out, leaving the slot absent.
    ///
    /// A type mismatch leaves the slot untouched and returns `None`.
    pub fn take<T: Any>(&mut self, index: usize) -> Option<T> {
        let slot = self.slots.get_mut(index)?;
        if !matches!(slot, Bound::Single(value) if value.is::<T>()) {
            return None;
        }
        match std::mem::replace(slot, Bound::Absent) {
            Bound::Single(value) => value.downcast::<T>().ok().map(|boxed| *boxed),
            _ => None,
        }
    }
}
