//! Name interning for organizations and candidates.
//!
//! Names are resolved to dense integer ids once at registration, so the
//! search indexes plain vectors instead of hashing strings.

use rustc_hash::FxHashMap;
use std::marker::PhantomData;

/// Dense id handed out by an [`Interner`], tagged with what it names.
#[derive(Debug)]
pub struct Id<T> {
    index: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn new(index: u32) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

/// Marker for organization ids.
#[derive(Debug, Clone, Copy)]
pub enum OrgKind {}

/// Marker for candidate ids.
#[derive(Debug, Clone, Copy)]
pub enum CandidateKind {}

pub type OrgId = Id<OrgKind>;
pub type CandidateId = Id<CandidateKind>;

/// Bidirectional map between names and ids, in insertion order.
#[derive(Debug, Clone)]
pub struct Interner<T> {
    to_id: FxHashMap<String, u32>,
    names: Vec<String>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Interner<T> {
    pub fn new() -> Self {
        Self {
            to_id: FxHashMap::default(),
            names: Vec::new(),
            _kind: PhantomData,
        }
    }

    /// Intern a fresh name. Returns `None` if the name is already present.
    pub fn insert(&mut self, name: &str) -> Option<Id<T>> {
        if self.to_id.contains_key(name) {
            return None;
        }
        let index = self.names.len() as u32;
        self.names.push(name.to_string());
        self.to_id.insert(name.to_string(), index);
        Some(Id::new(index))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Id<T>> {
        self.to_id.get(name).map(|&index| Id::new(index))
    }

    #[inline]
    pub fn resolve(&self, id: Id<T>) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<T> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut interner: Interner<OrgKind> = Interner::new();

        let acme = interner.insert("Acme").unwrap();
        let globex = interner.insert("Globex").unwrap();

        assert_ne!(acme, globex);
        assert_eq!(acme.index(), 0);
        assert_eq!(globex.index(), 1);
        assert_eq!(interner.resolve(globex), "Globex");
        assert_eq!(interner.get("Acme"), Some(acme));
        assert_eq!(interner.get("Initech"), None);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut interner: Interner<CandidateKind> = Interner::new();
        assert!(interner.insert("s1").is_some());
        assert!(interner.insert("s1").is_none());
        assert_eq!(interner.len(), 1);
    }
}
