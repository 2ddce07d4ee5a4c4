//! Typed variables and their domains (C5).

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::CoreError;
use crate::interval::{self, Interval};
use crate::symbolic::{Ambient, Set};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Continuous,
    Integer,
    Symbolic,
}

/// The domain (or, for a `SimpleProductEvent`, the per-variable assignment)
/// of a variable: either an interval set or a symbolic set, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Interval(Interval),
    Symbolic(Set),
}

impl Assignment {
    pub fn is_empty(&self) -> bool {
        match self {
            Assignment::Interval(i) => i.is_empty(),
            Assignment::Symbolic(s) => s.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Assignment::Interval(_) => "interval",
            Assignment::Symbolic(_) => "symbolic",
        }
    }
}

impl Eq for Assignment {}

impl PartialOrd for Assignment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Assignment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Assignment::Interval(a), Assignment::Interval(b)) => a.cmp(b),
            (Assignment::Symbolic(a), Assignment::Symbolic(b)) => a.cmp(b),
            (Assignment::Interval(_), Assignment::Symbolic(_)) => Ordering::Less,
            (Assignment::Symbolic(_), Assignment::Interval(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Interval(i) => write!(f, "{i}"),
            Assignment::Symbolic(s) => write!(f, "{s}"),
        }
    }
}

/// A single concrete value a variable can take on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Symbol(String),
}

/// Input accepted by `Variable::make_value`, coerced into an `Assignment`.
#[derive(Debug, Clone)]
pub enum RawValue {
    Number(f64),
    Range(f64, f64),
    Interval(Interval),
    Symbol(String),
    Symbols(Vec<String>),
    Set(Set),
}

/// A typed variable: a name, a kind, and the domain that kind ranges over.
/// Equal and ordered by `name` alone, per §3 — two variables sharing a name
/// are the same variable regardless of (mismatched) domain bookkeeping.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    pub domain: Assignment,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Variable { name: name.into(), kind: VariableKind::Continuous, domain: Assignment::Interval(interval::reals()) }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Variable { name: name.into(), kind: VariableKind::Integer, domain: Assignment::Interval(interval::reals()) }
    }

    pub fn symbolic(name: impl Into<String>, ambient: Rc<Ambient>) -> Self {
        Variable { name: name.into(), kind: VariableKind::Symbolic, domain: Assignment::Symbolic(Set::full(ambient)) }
    }

    /// Coerce a raw value into an `Assignment` legal for this variable's
    /// kind, per §4.4. Typed `KindMismatch`/`InvalidAtom` failures replace
    /// the source's implicit coercions.
    pub fn make_value(&self, raw: RawValue) -> Result<Assignment, CoreError> {
        match (self.kind, raw) {
            (VariableKind::Continuous | VariableKind::Integer, RawValue::Number(n)) => {
                Ok(Assignment::Interval(interval::singleton(n)))
            }
            (VariableKind::Continuous | VariableKind::Integer, RawValue::Range(lower, upper)) => {
                Ok(Assignment::Interval(interval::closed(lower, upper)))
            }
            (VariableKind::Continuous | VariableKind::Integer, RawValue::Interval(interval)) => {
                Ok(Assignment::Interval(interval))
            }
            (VariableKind::Symbolic, RawValue::Symbol(value)) => {
                let ambient = self.symbolic_ambient()?;
                Ok(Assignment::Symbolic(Set::from_values(ambient, [value])?))
            }
            (VariableKind::Symbolic, RawValue::Symbols(values)) => {
                let ambient = self.symbolic_ambient()?;
                Ok(Assignment::Symbolic(Set::from_values(ambient, values)?))
            }
            (VariableKind::Symbolic, RawValue::Set(set)) => {
                let ambient = self.symbolic_ambient()?;
                if set.ambient() != &ambient {
                    return Err(CoreError::AmbientMismatch);
                }
                Ok(Assignment::Symbolic(set))
            }
            (kind, raw) => Err(CoreError::KindMismatch(format!(
                "{kind:?} variable {:?} cannot take value {raw:?}",
                self.name
            ))),
        }
    }

    fn symbolic_ambient(&self) -> Result<Rc<Ambient>, CoreError> {
        match &self.domain {
            Assignment::Symbolic(set) => Ok(set.ambient().clone()),
            Assignment::Interval(_) => Err(CoreError::KindMismatch(format!(
                "{:?} is not a symbolic variable",
                self.name
            ))),
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A map keyed by `Variable`, kept sorted by name so iteration order is
/// canonical. Used for a variable's per-component assignment in a
/// `SimpleProductEvent`, and anywhere else a variable-indexed lookup is
/// needed by both `Variable` identity and by plain name.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableMap<V> {
    entries: Vec<(Variable, V)>,
}

impl<V> VariableMap<V> {
    pub fn new() -> Self {
        VariableMap { entries: Vec::new() }
    }

    pub fn from_pairs(mut pairs: Vec<(Variable, V)>) -> Self {
        pairs.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        VariableMap { entries: pairs }
    }

    pub fn insert(&mut self, variable: Variable, value: V) {
        match self.entries.binary_search_by(|(v, _)| v.name.cmp(&variable.name)) {
            Ok(idx) => self.entries[idx] = (variable, value),
            Err(idx) => self.entries.insert(idx, (variable, value)),
        }
    }

    pub fn get(&self, variable: &Variable) -> Option<&V> {
        self.get_by_name(&variable.name)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&V> {
        self.entries.iter().find(|(v, _)| v.name == name).map(|(_, value)| value)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter().map(|(v, _)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &V)> {
        self.entries.iter().map(|(v, value)| (v, value))
    }

    pub fn entries(&self) -> &[(Variable, V)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for VariableMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(Variable, V)> for VariableMap<V> {
    fn from_iter<I: IntoIterator<Item = (Variable, V)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_equal_by_name_only() {
        let a = Variable::continuous("x");
        let b = Variable::integer("x");
        assert_eq!(a, b);
    }

    #[test]
    fn make_value_number_becomes_singleton() {
        let x = Variable::continuous("x");
        let assignment = x.make_value(RawValue::Number(2.0)).unwrap();
        assert_eq!(assignment, Assignment::Interval(interval::singleton(2.0)));
    }

    #[test]
    fn make_value_rejects_symbol_for_continuous_variable() {
        let x = Variable::continuous("x");
        assert!(matches!(x.make_value(RawValue::Symbol("a".into())), Err(CoreError::KindMismatch(_))));
    }

    #[test]
    fn make_value_symbol_for_symbolic_variable() {
        let ambient = Rc::new(Ambient::from_iterable(["a", "b", "c"]));
        let v = Variable::symbolic("color", ambient);
        let assignment = v.make_value(RawValue::Symbol("a".into())).unwrap();
        match assignment {
            Assignment::Symbolic(set) => assert_eq!(set.values(), vec!["a"]),
            _ => panic!("expected symbolic assignment"),
        }
    }

    #[test]
    fn variable_map_looks_up_by_name_and_identity() {
        let mut map = VariableMap::new();
        map.insert(Variable::continuous("x"), 1);
        map.insert(Variable::continuous("a"), 2);
        let names: Vec<&str> = map.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "x"]);
        assert_eq!(map.get_by_name("x"), Some(&1));
        assert_eq!(map.get(&Variable::continuous("a")), Some(&2));
    }
}
