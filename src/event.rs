//! Disjoint unions of product rectangles over a fixed set of variables (C7).
//!
//! `ProductEvent` wraps `CompositeSet<SimpleProductEvent>`, reusing the
//! whole C2 engine for union/intersect/contains, but `difference`,
//! `complement` and `simplify` have distinct formulas at this level (§4.7)
//! and are implemented as their own methods rather than delegated.

use std::fmt;

use crate::composite::CompositeSet;
use crate::interval::SimpleInterval;
use crate::simple_event::SimpleProductEvent;
use crate::simple_set::SimpleSet;
use crate::variable::{Assignment, Value, Variable, VariableMap};

#[derive(Debug, Clone)]
pub struct ProductEvent {
    variables: Vec<Variable>,
    composite: CompositeSet<SimpleProductEvent>,
}

impl PartialEq for ProductEvent {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables && self.composite == other.composite
    }
}

impl fmt::Display for ProductEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.composite)
    }
}

fn full_rectangle(variables: &[Variable]) -> SimpleProductEvent {
    let assignments = VariableMap::from_pairs(variables.iter().map(|v| (v.clone(), v.domain.clone())).collect());
    SimpleProductEvent::new(assignments)
}

fn interval_hull(interval: &crate::interval::Interval) -> crate::interval::Interval {
    if interval.is_empty() {
        return interval.clone();
    }
    let atoms = interval.atoms();
    let first = atoms.first().expect("non-empty interval has at least one atom");
    let last = atoms.last().expect("non-empty interval has at least one atom");
    CompositeSet::single(SimpleInterval { lower: first.lower, upper: last.upper, left: first.left, right: last.right })
}

fn union_assignment(a: &Assignment, b: &Assignment) -> Assignment {
    match (a, b) {
        (Assignment::Interval(x), Assignment::Interval(y)) => Assignment::Interval(x.union(y)),
        (Assignment::Symbolic(x), Assignment::Symbolic(y)) => Assignment::Symbolic(x.union(y)),
        _ => panic!("mismatched assignment kinds for the same variable"),
    }
}

impl ProductEvent {
    pub fn empty(variables: Vec<Variable>) -> Self {
        let mut variables = variables;
        variables.sort();
        ProductEvent { variables, composite: CompositeSet::empty() }
    }

    /// A single product rectangle, with any variable missing from
    /// `assignments` filled in with its full domain.
    pub fn single(variables: Vec<Variable>, assignments: VariableMap<Assignment>) -> Self {
        let mut variables = variables;
        variables.sort();
        let rectangle = SimpleProductEvent::new(assignments).fill_missing_variables(&variables);
        ProductEvent { variables, composite: CompositeSet::single(rectangle) }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn components(&self) -> &[SimpleProductEvent] {
        self.composite.atoms()
    }

    pub fn is_empty(&self) -> bool {
        self.composite.is_empty()
    }

    pub fn contains(&self, point: &VariableMap<Value>) -> bool {
        self.composite.contains(point)
    }

    fn merge_variables(&self, other: &Self) -> Vec<Variable> {
        let mut merged = self.variables.clone();
        for variable in &other.variables {
            if !merged.iter().any(|v| v.name == variable.name) {
                merged.push(variable.clone());
            }
        }
        merged.sort();
        merged
    }

    /// Re-key every component onto `variables`, filling in full domains for
    /// anything this event doesn't otherwise mention.
    fn aligned_composite(&self, variables: &[Variable]) -> CompositeSet<SimpleProductEvent> {
        let atoms: Vec<SimpleProductEvent> =
            self.composite.atoms().iter().map(|atom| atom.fill_missing_variables(variables)).collect();
        CompositeSet::from_atoms(atoms)
    }

    pub fn union(&self, other: &Self) -> Self {
        let variables = self.merge_variables(other);
        let a = self.aligned_composite(&variables);
        let b = other.aligned_composite(&variables);
        ProductEvent { variables, composite: a.union(&b) }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let variables = self.merge_variables(other);
        let a = self.aligned_composite(&variables);
        let b = other.aligned_composite(&variables);
        ProductEvent { variables, composite: a.intersect(&b) }
    }

    /// `difference(a, b) = intersect(a, complement(b))`, per §4.7 — a
    /// different formula from `CompositeSet::difference`'s iterative
    /// per-atom subtraction, so this does not delegate to it.
    pub fn difference(&self, other: &Self) -> Self {
        let variables = self.merge_variables(other);
        let complement_of_other = other.complement_within(&variables);
        self.intersect(&complement_of_other)
    }

    /// The complement within this event's own variable set.
    pub fn complement(&self) -> Self {
        self.complement_within(&self.variables.clone())
    }

    fn complement_within(&self, variables: &[Variable]) -> Self {
        let aligned = self.aligned_composite(variables);
        let mut folded: Option<CompositeSet<SimpleProductEvent>> = None;
        for component in aligned.atoms() {
            let component_complement = component.complement();
            folded = Some(match folded {
                None => component_complement,
                Some(acc) => acc.intersect(&component_complement),
            });
        }
        let composite = folded
            .unwrap_or_else(|| CompositeSet::single(full_rectangle(variables)))
            .make_disjoint()
            .simplify();
        ProductEvent { variables: variables.to_vec(), composite }
    }

    pub fn marginal(&self, variables: &[Variable]) -> Self {
        let mut variables = variables.to_vec();
        variables.sort();
        let atoms: Vec<SimpleProductEvent> = self.composite.atoms().iter().map(|atom| atom.marginal(&variables)).collect();
        let composite = CompositeSet::from_atoms(atoms).make_disjoint();
        ProductEvent { variables, composite }
    }

    /// Fixed point of merging pairs of components that differ in the
    /// assignment of exactly one variable, where that variable's two
    /// assignments union back into a single contiguous piece. Distinct
    /// from `CompositeSet::simplify`'s sorted-adjacent-merge, since a
    /// `SimpleProductEvent` has no total "adjacency" order to scan.
    pub fn simplify(&self) -> Self {
        let mut atoms: Vec<SimpleProductEvent> = self.composite.atoms().to_vec();
        loop {
            let mut merged_pair = None;
            'search: for i in 0..atoms.len() {
                for j in (i + 1)..atoms.len() {
                    if let Some(merged) = try_merge(&atoms[i], &atoms[j], &self.variables) {
                        merged_pair = Some((i, j, merged));
                        break 'search;
                    }
                }
            }
            match merged_pair {
                Some((i, j, merged)) => {
                    atoms.remove(j);
                    atoms.remove(i);
                    atoms.push(merged);
                }
                None => break,
            }
        }
        ProductEvent { variables: self.variables.clone(), composite: CompositeSet::from_atoms(atoms) }
    }

    /// The smallest single rectangle enclosing every component: per
    /// variable, the convex hull of the union of that variable's
    /// assignments across components (symbolic variables have no gaps to
    /// bridge, so their hull is simply the union).
    pub fn bounding_box(&self) -> VariableMap<Assignment> {
        let mut out = VariableMap::new();
        for variable in &self.variables {
            let mut union: Option<Assignment> = None;
            for component in self.composite.atoms() {
                let value = component.assignment(variable).cloned().unwrap_or_else(|| variable.domain.clone());
                union = Some(match union {
                    None => value,
                    Some(acc) => union_assignment(&acc, &value),
                });
            }
            let value = union.unwrap_or_else(|| variable.domain.clone());
            let hulled = match value {
                Assignment::Interval(interval) => Assignment::Interval(interval_hull(&interval)),
                symbolic => symbolic,
            };
            out.insert(variable.clone(), hulled);
        }
        out
    }
}

fn try_merge(a: &SimpleProductEvent, b: &SimpleProductEvent, variables: &[Variable]) -> Option<SimpleProductEvent> {
    let mut differing: Option<&Variable> = None;
    for variable in variables {
        if a.assignment(variable) != b.assignment(variable) {
            if differing.is_some() {
                return None;
            }
            differing = Some(variable);
        }
    }
    let differing = differing?;
    let av = a.assignment(differing)?;
    let bv = b.assignment(differing)?;
    let merged_assignment = match (av, bv) {
        (Assignment::Interval(x), Assignment::Interval(y)) => Assignment::Interval(x.union(y)),
        (Assignment::Symbolic(x), Assignment::Symbolic(y)) => Assignment::Symbolic(x.union(y)),
        _ => return None,
    };

    let mut assignments = VariableMap::new();
    for variable in variables {
        let value = if variable.name == differing.name {
            merged_assignment.clone()
        } else {
            a.assignment(variable)?.clone()
        };
        assignments.insert(variable.clone(), value);
    }
    Some(SimpleProductEvent::new(assignments))
}
