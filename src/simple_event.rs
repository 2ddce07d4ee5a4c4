//! A single product rectangle: one assignment per variable (C6).
//!
//! `SimpleProductEvent` itself implements `SimpleSet`, so the disjoint-union
//! engine of `composite.rs` can be reused unchanged for events over many
//! variables (C7) — exactly the "every operation on C6/C7 reduces to
//! operations on C2" structure the algorithm description calls for.

use std::cmp::Ordering;
use std::fmt;

use crate::composite::CompositeSet;
use crate::simple_set::SimpleSet;
use crate::variable::{Assignment, Value, Variable, VariableMap};

#[derive(Debug, Clone)]
pub struct SimpleProductEvent {
    assignments: VariableMap<Assignment>,
}

impl SimpleProductEvent {
    pub fn new(assignments: VariableMap<Assignment>) -> Self {
        SimpleProductEvent { assignments }
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.assignments.variables()
    }

    pub fn assignment(&self, variable: &Variable) -> Option<&Assignment> {
        self.assignments.get(variable)
    }

    pub fn assignments(&self) -> &VariableMap<Assignment> {
        &self.assignments
    }

    /// Extend this rectangle with every variable from `all_variables` it
    /// doesn't already mention, assigning each its full domain. Used to
    /// bring every `SimpleProductEvent` belonging to the same `ProductEvent`
    /// onto a shared key set before they're compared or unioned.
    pub fn fill_missing_variables(&self, all_variables: &[Variable]) -> Self {
        let mut assignments = self.assignments.clone();
        for variable in all_variables {
            if assignments.get(variable).is_none() {
                assignments.insert(variable.clone(), variable.domain.clone());
            }
        }
        SimpleProductEvent { assignments }
    }

    /// Project onto a subset of variables, dropping the rest.
    pub fn marginal(&self, variables: &[Variable]) -> Self {
        let mut out = VariableMap::new();
        for variable in variables {
            if let Some(assignment) = self.assignments.get(variable) {
                out.insert(variable.clone(), assignment.clone());
            }
        }
        SimpleProductEvent { assignments: out }
    }
}

fn intersect_assignment(a: &Assignment, b: &Assignment) -> Assignment {
    match (a, b) {
        (Assignment::Interval(x), Assignment::Interval(y)) => Assignment::Interval(x.intersect(y)),
        (Assignment::Symbolic(x), Assignment::Symbolic(y)) => Assignment::Symbolic(x.intersect(y)),
        _ => panic!("mismatched assignment kinds for the same variable"),
    }
}

impl PartialEq for SimpleProductEvent {
    fn eq(&self, other: &Self) -> bool {
        self.assignments.entries() == other.assignments.entries()
    }
}
impl Eq for SimpleProductEvent {}

impl PartialOrd for SimpleProductEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SimpleProductEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.assignments.entries().cmp(other.assignments.entries())
    }
}

impl fmt::Display for SimpleProductEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assignments.is_empty() {
            return write!(f, "\u{2205}");
        }
        let parts: Vec<String> = self.assignments.iter().map(|(v, a)| format!("{v}={a}")).collect();
        write!(f, "{}", parts.join(" \u{2227} "))
    }
}

impl SimpleSet for SimpleProductEvent {
    type Point = VariableMap<Value>;

    fn intersect(&self, other: &Self) -> Self {
        let mut out = VariableMap::new();
        for variable in self.assignments.variables().chain(other.assignments.variables()) {
            if out.get_by_name(&variable.name).is_some() {
                continue;
            }
            let a = self.assignments.get(variable).cloned().unwrap_or_else(|| variable.domain.clone());
            let b = other.assignments.get(variable).cloned().unwrap_or_else(|| variable.domain.clone());
            out.insert(variable.clone(), intersect_assignment(&a, &b));
        }
        SimpleProductEvent { assignments: out }
    }

    /// The deterministic column-sweep decomposition: one fragment per
    /// variable `i` in name order, that fragment assigning `i` to the
    /// *whole* complement `domain(i) \ self[i]` (possibly several atoms, per
    /// §4.6), with earlier variables held at their original assignment and
    /// later ones released to their full domain. Fragments for different `i`
    /// are disjoint because fragment `i`'s `i`-th component excludes the
    /// original value that every later fragment still carries there.
    fn complement(&self) -> CompositeSet<Self> {
        let variables: Vec<Variable> = self.assignments.variables().cloned().collect();
        let mut atoms = Vec::new();

        for (i, var_i) in variables.iter().enumerate() {
            let assignment_i = self.assignments.get(var_i).expect("variable listed in its own event");
            let complement_i = match assignment_i {
                Assignment::Interval(interval) => Assignment::Interval(interval.complement()),
                Assignment::Symbolic(set) => Assignment::Symbolic(set.complement()),
            };

            let mut assignments = VariableMap::new();
            for (j, var_j) in variables.iter().enumerate() {
                let value = match j.cmp(&i) {
                    Ordering::Less => self.assignments.get(var_j).expect("variable listed in its own event").clone(),
                    Ordering::Equal => complement_i.clone(),
                    Ordering::Greater => var_j.domain.clone(),
                };
                assignments.insert(var_j.clone(), value);
            }
            atoms.push(SimpleProductEvent { assignments });
        }

        CompositeSet::from_atoms(atoms)
    }

    fn is_empty(&self) -> bool {
        self.assignments.iter().any(|(_, assignment)| assignment.is_empty())
    }

    fn contains(&self, point: &VariableMap<Value>) -> bool {
        self.assignments.iter().all(|(variable, assignment)| {
            match (assignment, point.get(variable)) {
                (Assignment::Interval(interval), Some(Value::Number(n))) => interval.contains(n),
                (Assignment::Symbolic(set), Some(Value::Symbol(s))) => set.contains_value(s),
                _ => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval;
    use crate::symbolic::Ambient;
    use std::rc::Rc;

    fn var_map(pairs: Vec<(Variable, Assignment)>) -> VariableMap<Assignment> {
        VariableMap::from_pairs(pairs)
    }

    #[test]
    fn intersect_fills_missing_variable_with_full_domain() {
        let x = Variable::continuous("x");
        let y = Variable::continuous("y");
        let a = SimpleProductEvent::new(var_map(vec![(x.clone(), Assignment::Interval(interval::closed(0.0, 5.0)))]));
        let b = SimpleProductEvent::new(var_map(vec![(y.clone(), Assignment::Interval(interval::closed(1.0, 2.0)))]));
        let intersection = a.intersect(&b);
        assert_eq!(intersection.assignment(&x), Some(&Assignment::Interval(interval::closed(0.0, 5.0))));
        assert_eq!(intersection.assignment(&y), Some(&Assignment::Interval(interval::closed(1.0, 2.0))));
    }

    #[test]
    fn complement_of_single_variable_rectangle_matches_interval_complement() {
        let x = Variable::continuous("x");
        let event = SimpleProductEvent::new(var_map(vec![(x.clone(), Assignment::Interval(interval::closed(0.0, 1.0)))]));
        let complement = event.complement();
        // One fragment (one variable), whose x-assignment is the whole
        // two-ray complement interval as a single (composite) Assignment.
        assert_eq!(complement.atoms().len(), 1);
        match complement.atoms()[0].assignment(&x) {
            Some(Assignment::Interval(interval)) => assert_eq!(interval.atoms().len(), 2),
            other => panic!("expected a two-atom interval assignment, got {other:?}"),
        }
    }

    #[test]
    fn complement_of_two_variable_rectangle_has_two_fragments() {
        let x = Variable::continuous("x");
        let ambient = Rc::new(Ambient::from_iterable(["a", "b", "c"]));
        let color = Variable::symbolic("color", ambient.clone());
        let event = SimpleProductEvent::new(var_map(vec![
            (x.clone(), Assignment::Interval(interval::closed(0.0, 1.0))),
            (color.clone(), Assignment::Symbolic(crate::symbolic::Set::from_values(ambient, ["a"]).unwrap())),
        ]));
        let complement = event.complement();
        // One fragment per variable (§4.6): the column=color fragment and
        // the column=x fragment, each carrying its variable's whole
        // complement as one assignment.
        assert_eq!(complement.atoms().len(), 2);
        assert!(complement.is_disjoint());
    }
}
