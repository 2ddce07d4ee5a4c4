//! A tagged JSON envelope for every serializable entity (C8), keyed by a
//! fully-qualified type tag. Unknown tags and malformed payloads surface as
//! `CoreError::DeserializationFailure` rather than a panic.
//!
//! Serde's internally-tagged enum *is* the registry §4.8 asks for: each
//! variant name is the type tag, and `serde_json` already rejects unknown
//! tags during deserialization — there is no separate dynamic dispatch
//! table to hand-roll on top of it.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bound::Bound;
use crate::composite::CompositeSet;
use crate::error::CoreError;
use crate::interval::{Interval, SimpleInterval};
use crate::simple_event::SimpleProductEvent;
use crate::symbolic::{Ambient, Set, SymbolicElement};
use crate::variable::{Assignment, Variable, VariableKind, VariableMap};
use crate::event::ProductEvent;

/// JSON has no literal for infinity; `serde_json` silently turns a
/// non-finite `f64` into `null` rather than erroring, which would lose
/// unbounded intervals on a round trip. This encodes `±∞`/NaN as the
/// strings Python's own `json` module (with `allow_nan`) would emit, per
/// §4.8's "serialize as the host numeric representation for infinity".
mod finite_f64 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value == f64::INFINITY {
            serializer.serialize_str("Infinity")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrLiteral {
        Number(f64),
        Literal(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrLiteral::deserialize(deserializer)? {
            NumberOrLiteral::Number(n) => Ok(n),
            NumberOrLiteral::Literal(s) => match s.as_str() {
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid float literal {other:?}"))),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Envelope {
    #[serde(rename = "random_events.interval.SimpleInterval")]
    SimpleInterval {
        #[serde(with = "finite_f64")]
        lower: f64,
        #[serde(with = "finite_f64")]
        upper: f64,
        left: Bound,
        right: Bound,
    },

    #[serde(rename = "random_events.interval.Interval")]
    Interval { atoms: Vec<Envelope> },

    #[serde(rename = "random_events.symbolic.Ambient")]
    Ambient { values: Vec<String> },

    #[serde(rename = "random_events.symbolic.Set")]
    Set { content: Vec<String>, values: Vec<String> },

    #[serde(rename = "random_events.variable.Variable")]
    Variable { name: String, kind: String, domain: Box<Envelope> },

    #[serde(rename = "random_events.product_algebra.SimpleEvent")]
    SimpleEvent { assignments: Vec<(String, Envelope)> },

    #[serde(rename = "random_events.product_algebra.Event")]
    Event { variables: Vec<Envelope>, simple_sets: Vec<Envelope> },
}

fn fail(message: impl Into<String>) -> CoreError {
    CoreError::DeserializationFailure(message.into())
}

pub fn simple_interval_to_envelope(atom: &SimpleInterval) -> Envelope {
    Envelope::SimpleInterval { lower: atom.lower, upper: atom.upper, left: atom.left, right: atom.right }
}

pub fn simple_interval_from_envelope(envelope: &Envelope) -> Result<SimpleInterval, CoreError> {
    match envelope {
        Envelope::SimpleInterval { lower, upper, left, right } => {
            SimpleInterval::checked_new(*lower, *upper, *left, *right)
        }
        other => Err(fail(format!("expected a SimpleInterval envelope, got {other:?}"))),
    }
}

pub fn interval_to_envelope(interval: &Interval) -> Envelope {
    Envelope::Interval { atoms: interval.atoms().iter().map(simple_interval_to_envelope).collect() }
}

pub fn interval_from_envelope(envelope: &Envelope) -> Result<Interval, CoreError> {
    match envelope {
        Envelope::Interval { atoms } => {
            let atoms = atoms.iter().map(simple_interval_from_envelope).collect::<Result<Vec<_>, _>>()?;
            Ok(CompositeSet::from_atoms(atoms))
        }
        other => Err(fail(format!("expected an Interval envelope, got {other:?}"))),
    }
}

pub fn ambient_to_envelope(ambient: &Ambient) -> Envelope {
    Envelope::Ambient { values: ambient.values().to_vec() }
}

pub fn ambient_from_envelope(envelope: &Envelope) -> Result<Ambient, CoreError> {
    match envelope {
        Envelope::Ambient { values } => Ok(Ambient::from_iterable(values.clone())),
        other => Err(fail(format!("expected an Ambient envelope, got {other:?}"))),
    }
}

pub fn set_to_envelope(set: &Set) -> Envelope {
    Envelope::Set {
        content: set.ambient().values().to_vec(),
        values: set.values().into_iter().map(str::to_string).collect(),
    }
}

pub fn set_from_envelope(envelope: &Envelope) -> Result<Set, CoreError> {
    match envelope {
        Envelope::Set { content, values } => {
            let ambient = Rc::new(Ambient::from_iterable(content.clone()));
            Set::from_values(ambient, values)
        }
        other => Err(fail(format!("expected a Set envelope, got {other:?}"))),
    }
}

pub fn symbolic_element_to_envelope(element: &SymbolicElement) -> Envelope {
    Envelope::Set {
        content: element.ambient().values().to_vec(),
        values: element.value().into_iter().map(str::to_string).collect(),
    }
}

fn assignment_to_envelope(assignment: &Assignment) -> Envelope {
    match assignment {
        Assignment::Interval(interval) => interval_to_envelope(interval),
        Assignment::Symbolic(set) => set_to_envelope(set),
    }
}

fn assignment_from_envelope(envelope: &Envelope, kind: VariableKind) -> Result<Assignment, CoreError> {
    match kind {
        VariableKind::Continuous | VariableKind::Integer => Ok(Assignment::Interval(interval_from_envelope(envelope)?)),
        VariableKind::Symbolic => Ok(Assignment::Symbolic(set_from_envelope(envelope)?)),
    }
}

fn kind_to_tag(kind: VariableKind) -> &'static str {
    match kind {
        VariableKind::Continuous => "continuous",
        VariableKind::Integer => "integer",
        VariableKind::Symbolic => "symbolic",
    }
}

fn kind_from_tag(tag: &str) -> Result<VariableKind, CoreError> {
    match tag {
        "continuous" => Ok(VariableKind::Continuous),
        "integer" => Ok(VariableKind::Integer),
        "symbolic" => Ok(VariableKind::Symbolic),
        other => Err(fail(format!("unknown variable kind {other:?}"))),
    }
}

pub fn variable_to_envelope(variable: &Variable) -> Envelope {
    Envelope::Variable {
        name: variable.name.clone(),
        kind: kind_to_tag(variable.kind).to_string(),
        domain: Box::new(assignment_to_envelope(&variable.domain)),
    }
}

pub fn variable_from_envelope(envelope: &Envelope) -> Result<Variable, CoreError> {
    match envelope {
        Envelope::Variable { name, kind, domain } => {
            let kind = kind_from_tag(kind)?;
            let domain = assignment_from_envelope(domain, kind)?;
            Ok(Variable { name: name.clone(), kind, domain })
        }
        other => Err(fail(format!("expected a Variable envelope, got {other:?}"))),
    }
}

pub fn simple_product_event_to_envelope(event: &SimpleProductEvent) -> Envelope {
    Envelope::SimpleEvent {
        assignments: event
            .assignments()
            .iter()
            .map(|(variable, assignment)| (variable.name.clone(), assignment_to_envelope(assignment)))
            .collect(),
    }
}

pub fn simple_product_event_from_envelope(envelope: &Envelope, variables: &[Variable]) -> Result<SimpleProductEvent, CoreError> {
    match envelope {
        Envelope::SimpleEvent { assignments } => {
            let mut map = VariableMap::new();
            for (name, assignment_envelope) in assignments {
                let variable = variables
                    .iter()
                    .find(|v| &v.name == name)
                    .ok_or_else(|| CoreError::UnknownVariable(name.clone()))?;
                let assignment = assignment_from_envelope(assignment_envelope, variable.kind)?;
                map.insert(variable.clone(), assignment);
            }
            Ok(SimpleProductEvent::new(map))
        }
        other => Err(fail(format!("expected a SimpleEvent envelope, got {other:?}"))),
    }
}

pub fn product_event_to_envelope(event: &ProductEvent) -> Envelope {
    Envelope::Event {
        variables: event.variables().iter().map(variable_to_envelope).collect(),
        simple_sets: event.components().iter().map(simple_product_event_to_envelope).collect(),
    }
}

pub fn product_event_from_envelope(envelope: &Envelope) -> Result<ProductEvent, CoreError> {
    match envelope {
        Envelope::Event { variables, simple_sets } => {
            let variables = variables.iter().map(variable_from_envelope).collect::<Result<Vec<_>, _>>()?;
            let mut event = ProductEvent::empty(variables.clone());
            for simple_set in simple_sets {
                let rectangle = simple_product_event_from_envelope(simple_set, &variables)?;
                event = event.union(&ProductEvent::single(variables.clone(), rectangle.assignments().clone()));
            }
            Ok(event)
        }
        other => Err(fail(format!("expected an Event envelope, got {other:?}"))),
    }
}

pub fn to_json(envelope: &Envelope) -> Result<String, CoreError> {
    serde_json::to_string(envelope).map_err(|e| fail(e.to_string()))
}

pub fn from_json(json: &str) -> Result<Envelope, CoreError> {
    serde_json::from_str(json).map_err(|e| fail(e.to_string()))
}
