//! One-dimensional real intervals with open/closed bounds (C3).
//!
//! `SimpleInterval` is the atom; `Interval` is the composite-set
//! specialization (`CompositeSet<SimpleInterval>`) that users actually
//! build events out of, analogous to the teacher's `AtomicInterval`/
//! `IntervalSet` split in `src/atomic.rs`/`src/set.rs`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bound::Bound;
use crate::composite::CompositeSet;
use crate::error::CoreError;
use crate::simple_set::SimpleSet;

/// A single closed/open/half-open interval of reals, or a singleton.
///
/// Empty iff `lower > upper`, or `lower == upper` with any open bound.
/// Infinite endpoints are always open (enforced by the factory functions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterval {
    pub lower: f64,
    pub upper: f64,
    pub left: Bound,
    pub right: Bound,
}

impl SimpleInterval {
    /// Construct an interval, rejecting NaN bounds and forcing infinite
    /// endpoints open, as §3 requires.
    pub fn checked_new(lower: f64, upper: f64, left: Bound, right: Bound) -> Result<Self, CoreError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(CoreError::InvalidAtom(format!(
                "interval bound must not be NaN (lower={lower}, upper={upper})"
            )));
        }
        let left = if lower == f64::NEG_INFINITY { Bound::Open } else { left };
        let right = if upper == f64::INFINITY { Bound::Open } else { right };
        Ok(SimpleInterval { lower, upper, left, right })
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
            || (self.lower == self.upper && (self.left == Bound::Open || self.right == Bound::Open))
    }

    /// The midpoint of the interval. Meaningless (and not called) on an
    /// unbounded or empty interval.
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Every integer `k` with `ceil(lower) <= k <= floor(upper)`, adjusting
    /// for open endpoints that land exactly on an integer.
    pub fn contained_integers(&self) -> Vec<i64> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut lo = self.lower.ceil();
        if self.left == Bound::Open && lo == self.lower {
            lo += 1.0;
        }
        let mut hi = self.upper.floor();
        if self.right == Bound::Open && hi == self.upper {
            hi -= 1.0;
        }
        if lo > hi || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        let lo = lo as i64;
        let hi = hi as i64;
        (lo..=hi).collect()
    }
}

impl PartialEq for SimpleInterval {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower
            && self.upper == other.upper
            && self.left == other.left
            && self.right == other.right
    }
}
impl Eq for SimpleInterval {}

impl PartialOrd for SimpleInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SimpleInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower
            .partial_cmp(&other.lower)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.upper.partial_cmp(&other.upper).unwrap_or(Ordering::Equal))
            .then_with(|| self.left.cmp(&other.left))
            .then_with(|| self.right.cmp(&other.right))
    }
}

impl fmt::Display for SimpleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "\u{2205}");
        }
        let left_bracket = if self.left == Bound::Closed { '[' } else { '(' };
        let right_bracket = if self.right == Bound::Closed { ']' } else { ')' };
        write!(f, "{left_bracket}{}, {}{right_bracket}", self.lower, self.upper)
    }
}

impl SimpleSet for SimpleInterval {
    type Point = f64;

    fn intersect(&self, other: &Self) -> Self {
        let new_lower = self.lower.max(other.lower);
        let new_upper = self.upper.min(other.upper);
        if new_lower > new_upper {
            return SimpleInterval { lower: 1.0, upper: 0.0, left: Bound::Open, right: Bound::Open };
        }

        let new_left = if self.lower == other.lower {
            self.left.meet(other.left)
        } else if self.lower > other.lower {
            self.left
        } else {
            other.left
        };

        let new_right = if self.upper == other.upper {
            self.right.meet(other.right)
        } else if self.upper < other.upper {
            self.right
        } else {
            other.right
        };

        SimpleInterval { lower: new_lower, upper: new_upper, left: new_left, right: new_right }
    }

    fn complement(&self) -> CompositeSet<Self> {
        if self.is_empty() {
            return CompositeSet::single(reals_atom());
        }
        if self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY {
            return CompositeSet::empty();
        }
        let mut atoms = Vec::with_capacity(2);
        if self.lower > f64::NEG_INFINITY {
            atoms.push(SimpleInterval {
                lower: f64::NEG_INFINITY,
                upper: self.lower,
                left: Bound::Open,
                right: self.left.invert(),
            });
        }
        if self.upper < f64::INFINITY {
            atoms.push(SimpleInterval {
                lower: self.upper,
                upper: f64::INFINITY,
                left: self.right.invert(),
                right: Bound::Open,
            });
        }
        CompositeSet::from_atoms(atoms)
    }

    fn is_empty(&self) -> bool {
        SimpleInterval::is_empty(self)
    }

    fn contains(&self, point: &f64) -> bool {
        let point = *point;
        (self.lower < point && point < self.upper)
            || (self.lower == point && self.left == Bound::Closed)
            || (self.upper == point && self.right == Bound::Closed)
    }

    /// Merge adjacent/touching intervals: `prev.upper > next.lower`, or
    /// `prev.upper == next.lower` with at least one side closed, per §4.2.
    fn simplify_sorted(atoms: Vec<Self>) -> Vec<Self> {
        let mut result: Vec<SimpleInterval> = Vec::with_capacity(atoms.len());
        for current in atoms {
            if let Some(last) = result.last_mut() {
                if last.upper > current.lower
                    || (last.upper == current.lower && !(last.right == Bound::Open && current.left == Bound::Open))
                {
                    if current.upper > last.upper || (current.upper == last.upper && current.right == Bound::Closed) {
                        last.upper = current.upper;
                        last.right = current.right;
                    }
                    continue;
                }
            }
            result.push(current);
        }
        result
    }
}

fn reals_atom() -> SimpleInterval {
    SimpleInterval { lower: f64::NEG_INFINITY, upper: f64::INFINITY, left: Bound::Open, right: Bound::Open }
}

/// The composite-set specialization for one-dimensional real intervals.
pub type Interval = CompositeSet<SimpleInterval>;

impl Interval {
    /// The complement of an interval set: the generic engine can't invent
    /// "the whole real line" out of nothing, so the empty case is handled
    /// here instead of in `CompositeSet::complement`.
    pub fn complement(&self) -> Interval {
        if self.is_empty() {
            return reals();
        }
        self.fold_complement()
    }
}

pub fn open(left: f64, right: f64) -> Interval {
    CompositeSet::single(SimpleInterval { lower: left, upper: right, left: Bound::Open, right: Bound::Open })
}

pub fn closed(left: f64, right: f64) -> Interval {
    CompositeSet::single(SimpleInterval { lower: left, upper: right, left: Bound::Closed, right: Bound::Closed })
}

pub fn open_closed(left: f64, right: f64) -> Interval {
    CompositeSet::single(SimpleInterval { lower: left, upper: right, left: Bound::Open, right: Bound::Closed })
}

pub fn closed_open(left: f64, right: f64) -> Interval {
    CompositeSet::single(SimpleInterval { lower: left, upper: right, left: Bound::Closed, right: Bound::Open })
}

pub fn singleton(value: f64) -> Interval {
    if value.is_infinite() || value.is_nan() {
        return CompositeSet::empty();
    }
    CompositeSet::single(SimpleInterval { lower: value, upper: value, left: Bound::Closed, right: Bound::Closed })
}

pub fn reals() -> Interval {
    CompositeSet::single(reals_atom())
}
