//! Lookup outcome type

use crate::CacheError;

/// Outcome of a backend read before it is collapsed at the repository boundary
///
/// Keeps a transport fault distinguishable from a plain miss internally, while
/// [`Lookup::found`] and [`Lookup::exists`] give the fail-open view handed to
/// callers.
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    /// Value present
    Found(T),
    /// Nothing stored for the key
    Absent,
    /// The backend could not be consulted
    Fault(CacheError),
}

impl<T> Lookup<T> {
    /// Check if a value was found
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Check if the lookup faulted
    pub fn is_fault(&self) -> bool {
        matches!(self, Lookup::Fault(_))
    }

    /// The fault, if any
    pub fn fault(&self) -> Option<&CacheError> {
        match self {
            Lookup::Fault(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse to the fail-open view: faults read as absent
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent | Lookup::Fault(_) => None,
        }
    }

}

impl Lookup<bool> {
    /// Fail-open existence: faults read as `false`
    pub fn exists(self) -> bool {
        matches!(self, Lookup::Found(true))
    }
}

impl<T> From<crate::Result<Option<T>>> for Lookup<T> {
    fn from(result: crate::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::Absent,
            Err(err) => Lookup::Fault(err),
        }
    }
}
