//! The atom contract (C1): every indecomposable member of the algebra
//! implements this trait. `CompositeSet<A>` (C2) is generic over it, so the
//! dispatch between interval atoms and symbolic atoms is resolved at
//! compile time by monomorphization rather than through a trait object.

use crate::composite::CompositeSet;

pub trait SimpleSet: Clone + PartialEq + Eq + PartialOrd + Ord + std::fmt::Debug {
    /// The type of a single point that can be tested for membership.
    type Point;

    /// The intersection of this atom with another, possibly empty.
    fn intersect(&self, other: &Self) -> Self;

    /// The complement of this atom as a disjoint union of atoms.
    fn complement(&self) -> CompositeSet<Self>
    where
        Self: Sized;

    fn is_empty(&self) -> bool;

    fn contains(&self, point: &Self::Point) -> bool;

    /// The difference of this atom with another, as a disjoint union of atoms.
    ///
    /// Derived as `complement(other) ∩ self`, restricted to the non-empty
    /// fragments, per §4.1. The fragments are pairwise disjoint because
    /// `other.complement()`'s atoms already are.
    fn difference(&self, other: &Self) -> CompositeSet<Self>
    where
        Self: Sized,
    {
        let mut atoms: Vec<Self> = other
            .complement()
            .atoms()
            .iter()
            .map(|fragment| self.intersect(fragment))
            .filter(|fragment| !fragment.is_empty())
            .collect();
        atoms.sort();
        CompositeSet::from_sorted_atoms_unchecked(atoms)
    }

    /// Canonicalize a sorted run of atoms of this kind, merging or
    /// deduplicating as the kind requires. The default simply removes
    /// consecutive duplicates, which is correct for kinds (like symbolic
    /// elements) that never need merging; interval atoms override this to
    /// merge touching intervals per §4.2.
    fn simplify_sorted(atoms: Vec<Self>) -> Vec<Self>
    where
        Self: Sized,
    {
        let mut result: Vec<Self> = Vec::with_capacity(atoms.len());
        for atom in atoms {
            if result.last() != Some(&atom) {
                result.push(atom);
            }
        }
        result
    }
}
