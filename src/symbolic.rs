//! Finite unordered symbolic domains (C4).
//!
//! Every `SymbolicElement` carries an index into a shared `Ambient` rather
//! than the enum-with-an-empty-sentinel the original source used — see
//! `SPEC_FULL.md` §2 for why that sentinel was dropped instead of ported.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::composite::CompositeSet;
use crate::error::CoreError;
use crate::simple_set::SimpleSet;

/// A fixed, insertion-ordered universe of symbolic values, shared by every
/// element and `Set` that participates in the same algebra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambient {
    values: Vec<String>,
}

impl Ambient {
    pub fn from_iterable<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for v in values {
            let v = v.into();
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        Ambient { values: seen }
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A single symbolic value, represented as an index into its `Ambient`.
/// `index == None` is the empty atom (never appears inside a valid
/// `CompositeSet`, but is needed as the result of a failed `intersect`).
#[derive(Debug, Clone)]
pub struct SymbolicElement {
    index: Option<usize>,
    ambient: Rc<Ambient>,
}

impl SymbolicElement {
    pub fn new(value: &str, ambient: Rc<Ambient>) -> Result<Self, CoreError> {
        match ambient.index_of(value) {
            Some(index) => Ok(SymbolicElement { index: Some(index), ambient }),
            None => Err(CoreError::InvalidAtom(format!(
                "{value:?} is not a member of its ambient set"
            ))),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.index.and_then(|i| self.ambient.value_at(i))
    }

    pub fn ambient(&self) -> &Rc<Ambient> {
        &self.ambient
    }

    fn assert_same_ambient(&self, other: &Self) {
        assert_eq!(
            self.ambient, other.ambient,
            "symbolic elements belong to different ambient sets"
        );
    }

    fn empty_with(ambient: Rc<Ambient>) -> Self {
        SymbolicElement { index: None, ambient }
    }
}

impl PartialEq for SymbolicElement {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl Eq for SymbolicElement {}

impl PartialOrd for SymbolicElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SymbolicElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for SymbolicElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "\u{2205}"),
        }
    }
}

impl SimpleSet for SymbolicElement {
    type Point = usize;

    fn intersect(&self, other: &Self) -> Self {
        self.assert_same_ambient(other);
        if self.index.is_some() && self.index == other.index {
            self.clone()
        } else {
            Self::empty_with(self.ambient.clone())
        }
    }

    fn complement(&self) -> CompositeSet<Self> {
        let all = 0..self.ambient.len();
        let excluded = self.index;
        let atoms: Vec<Self> = all
            .filter(|i| Some(*i) != excluded)
            .map(|i| SymbolicElement { index: Some(i), ambient: self.ambient.clone() })
            .collect();
        CompositeSet::from_atoms(atoms)
    }

    fn is_empty(&self) -> bool {
        self.index.is_none()
    }

    fn contains(&self, point: &usize) -> bool {
        self.index == Some(*point)
    }
}

/// The composite-set specialization for finite symbolic domains. Unlike
/// `Interval`, this can't be a bare type alias: the empty set still needs
/// to remember which ambient it would be the complement of.
#[derive(Debug, Clone)]
pub struct Set {
    ambient: Rc<Ambient>,
    atoms: CompositeSet<SymbolicElement>,
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.ambient == other.ambient && self.atoms == other.atoms
    }
}
impl Eq for Set {}

impl PartialOrd for Set {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Set {
    fn cmp(&self, other: &Self) -> Ordering {
        self.atoms.cmp(&other.atoms)
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.atoms)
    }
}

impl Set {
    pub fn empty(ambient: Rc<Ambient>) -> Self {
        Set { ambient, atoms: CompositeSet::empty() }
    }

    pub fn atoms(&self) -> &CompositeSet<SymbolicElement> {
        &self.atoms
    }

    pub fn full(ambient: Rc<Ambient>) -> Self {
        let atoms: Vec<SymbolicElement> = (0..ambient.len())
            .map(|i| SymbolicElement { index: Some(i), ambient: ambient.clone() })
            .collect();
        Set { ambient: ambient.clone(), atoms: CompositeSet::from_atoms(atoms) }
    }

    pub fn from_values<I, S>(ambient: Rc<Ambient>, values: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let atoms = values
            .into_iter()
            .map(|v| SymbolicElement::new(v.as_ref(), ambient.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Set { ambient, atoms: CompositeSet::from_atoms(atoms) })
    }

    pub fn ambient(&self) -> &Rc<Ambient> {
        &self.ambient
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        match self.ambient.index_of(value) {
            Some(index) => self.atoms.contains(&index),
            None => false,
        }
    }

    pub fn values(&self) -> Vec<&str> {
        self.atoms.atoms().iter().filter_map(|a| a.value()).collect()
    }

    fn assert_same_ambient(&self, other: &Self) {
        assert_eq!(self.ambient, other.ambient, "sets belong to different ambient sets");
    }

    pub fn union(&self, other: &Self) -> Self {
        self.assert_same_ambient(other);
        Set { ambient: self.ambient.clone(), atoms: self.atoms.union(&other.atoms) }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        self.assert_same_ambient(other);
        Set { ambient: self.ambient.clone(), atoms: self.atoms.intersect(&other.atoms) }
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.assert_same_ambient(other);
        Set { ambient: self.ambient.clone(), atoms: self.atoms.difference(&other.atoms) }
    }

    /// The complement within the ambient: the generic engine can't invent
    /// "every other symbol" out of zero atoms, so the empty case is handled
    /// here instead of in `CompositeSet::complement`.
    pub fn complement(&self) -> Self {
        if self.is_empty() {
            return Self::full(self.ambient.clone());
        }
        Set { ambient: self.ambient.clone(), atoms: self.atoms.fold_complement() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Rc<Ambient> {
        Rc::new(Ambient::from_iterable(["a", "b", "c"]))
    }

    #[test]
    fn symbolic_complement_scenario() {
        // §8 scenario 2
        let ambient = abc();
        let ab = Set::from_values(ambient.clone(), ["a", "b"]).unwrap();
        let complement = ab.complement();
        assert_eq!(complement.values(), vec!["c"]);
    }

    #[test]
    fn complement_of_empty_is_full_ambient() {
        let ambient = abc();
        let empty = Set::empty(ambient.clone());
        assert_eq!(empty.complement(), Set::full(ambient));
    }

    #[test]
    fn unknown_value_is_invalid_atom() {
        let ambient = abc();
        assert!(SymbolicElement::new("z", ambient).is_err());
    }

    #[test]
    fn union_then_intersect_round_trips() {
        let ambient = abc();
        let a = Set::from_values(ambient.clone(), ["a"]).unwrap();
        let b = Set::from_values(ambient.clone(), ["b"]).unwrap();
        let union = a.union(&b);
        assert_eq!(union.intersect(&a), a);
    }

    #[test]
    #[should_panic(expected = "different ambient sets")]
    fn mismatched_ambients_panic() {
        let a = Set::from_values(abc(), ["a"]).unwrap();
        let other_ambient = Rc::new(Ambient::from_iterable(["x", "y", "z"]));
        let b = Set::from_values(other_ambient, ["x"]).unwrap();
        let _ = a.union(&b);
    }
}
