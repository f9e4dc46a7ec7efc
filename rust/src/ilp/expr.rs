//! Variables, linear expressions and constraint rows.

use crate::interner::NodeId;

/// A model variable. Slot indices are carried structurally, never parsed
/// back out of a printed name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    /// 1 when `node` is scheduled at `slot` (1-based), else 0.
    Assign { node: NodeId, slot: u32 },
    /// Total demand active at `slot`.
    Mem { slot: u32 },
    /// Upper bound on every `Mem` variable.
    MinMemory,
}

impl Var {
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Assign { .. })
    }

    pub fn slot(&self) -> Option<u32> {
        match self {
            Self::Assign { slot, .. } | Self::Mem { slot } => Some(*slot),
            Self::MinMemory => None,
        }
    }
}

/// Convert a weight into a coefficient, saturating at `i64::MAX`.
pub(crate) fn coefficient(weight: u64) -> i64 {
    i64::try_from(weight).unwrap_or(i64::MAX)
}

/// Whether [`coefficient`] would saturate this weight.
pub(crate) fn is_clamped(weight: u64) -> bool {
    i64::try_from(weight).is_err()
}

/// Integer-coefficient linear expression. Terms keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(i64, Var)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `coef * var`. Zero coefficients are dropped.
    pub fn add(&mut self, coef: i64, var: Var) -> &mut Self {
        if coef != 0 {
            self.terms.push((coef, var));
        }
        self
    }

    pub fn terms(&self) -> &[(i64, Var)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Coefficient of `var`, summed over repeated terms.
    pub fn coefficient_of(&self, var: Var) -> i64 {
        self.terms
            .iter()
            .filter(|(_, v)| *v == var)
            .map(|(c, _)| *c)
            .sum()
    }

    /// Evaluate under an assignment of integer values.
    pub fn evaluate<F: Fn(Var) -> i64>(&self, value: F) -> i128 {
        self.terms
            .iter()
            .map(|&(c, v)| c as i128 * value(v) as i128)
            .sum()
    }
}

/// Relational operator of a constraint row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }

    pub fn holds(&self, lhs: i128, rhs: i128) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Le => lhs <= rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

/// A named linear (in)equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintRow {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
}

impl ConstraintRow {
    pub fn new(name: String, expr: LinearExpr, relation: Relation, rhs: i64) -> Self {
        Self {
            name,
            expr,
            relation,
            rhs,
        }
    }

    pub fn is_satisfied<F: Fn(Var) -> i64>(&self, value: F) -> bool {
        self.relation
            .holds(self.expr.evaluate(value), self.rhs as i128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_terms_dropped() {
        let mut expr = LinearExpr::new();
        expr.add(0, Var::MinMemory).add(3, Var::Mem { slot: 1 });
        assert_eq!(expr.len(), 1);
        assert_eq!(expr.coefficient_of(Var::Mem { slot: 1 }), 3);
        assert_eq!(expr.coefficient_of(Var::MinMemory), 0);
    }

    #[test]
    fn test_row_evaluation() {
        let x1 = Var::Assign { node: 0, slot: 1 };
        let x2 = Var::Assign { node: 0, slot: 2 };
        let mut expr = LinearExpr::new();
        expr.add(1, x1).add(2, x2);
        let row = ConstraintRow::new("p0".to_string(), expr, Relation::Ge, 2);

        assert!(row.is_satisfied(|v| if v == x2 { 1 } else { 0 }));
        assert!(!row.is_satisfied(|v| if v == x1 { 1 } else { 0 }));
    }

    #[test]
    fn test_var_slot() {
        assert_eq!(Var::Assign { node: 3, slot: 12 }.slot(), Some(12));
        assert_eq!(Var::MinMemory.slot(), None);
        assert!(!Var::Mem { slot: 1 }.is_decision());
    }
}
