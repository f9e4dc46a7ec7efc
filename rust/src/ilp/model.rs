//! In-memory LP model.

use rustc_hash::{FxHashMap, FxHashSet};

use super::expr::{ConstraintRow, LinearExpr, Var};

/// Sections of the `Subject to` block, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Assignment,
    Precedence,
    Resource,
    NonNegativity,
}

impl Section {
    /// Name prefixes for the rows of this section.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Assignment => "a",
            Self::Precedence => "p",
            Self::Resource => "r",
            Self::NonNegativity => "n",
        }
    }
}

/// A time-indexed scheduling model ready for serialization.
///
/// Decision variables are declared integer, not binary, unless the
/// serializer is asked for binary typing. Each assignment row forces a
/// node's variables to sum to 1, and with non-negativity that leaves 0/1 as
/// the only integer values.
#[derive(Clone, Debug, Default)]
pub struct LpModel {
    pub(crate) node_names: Vec<String>,
    pub(crate) objective: LinearExpr,
    pub(crate) assignment: Vec<ConstraintRow>,
    pub(crate) precedence: Vec<ConstraintRow>,
    pub(crate) resource: Vec<ConstraintRow>,
    pub(crate) non_negativity: Vec<ConstraintRow>,
    pub(crate) decision_vars: Vec<Var>,
    pub(crate) auxiliary_vars: Vec<Var>,
}

impl LpModel {
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn rows(&self, section: Section) -> &[ConstraintRow] {
        match section {
            Section::Assignment => &self.assignment,
            Section::Precedence => &self.precedence,
            Section::Resource => &self.resource,
            Section::NonNegativity => &self.non_negativity,
        }
    }

    /// All `Subject to` rows in emission order.
    pub fn all_rows(&self) -> impl Iterator<Item = &ConstraintRow> {
        self.assignment
            .iter()
            .chain(&self.precedence)
            .chain(&self.resource)
            .chain(&self.non_negativity)
    }

    pub fn row_count(&self) -> usize {
        self.assignment.len()
            + self.precedence.len()
            + self.resource.len()
            + self.non_negativity.len()
    }

    pub fn decision_variables(&self) -> &[Var] {
        &self.decision_vars
    }

    pub fn auxiliary_variables(&self) -> &[Var] {
        &self.auxiliary_vars
    }

    /// Every declared variable: decisions first, then auxiliaries.
    pub fn variables(&self) -> impl Iterator<Item = Var> + '_ {
        self.decision_vars
            .iter()
            .chain(&self.auxiliary_vars)
            .copied()
    }

    pub fn variable_count(&self) -> usize {
        self.decision_vars.len() + self.auxiliary_vars.len()
    }

    /// Printed name of a variable.
    ///
    /// Assignment variables embed the node's name from [`unique_names`],
    /// which is distinct per node, so `x_<name>_<slot>` is too.
    pub fn var_name(&self, var: Var) -> String {
        match var {
            Var::Assign { node, slot } => {
                let label = self
                    .node_names
                    .get(node as usize)
                    .map(String::as_str)
                    .unwrap_or("?");
                format!("x_{}_{}", label, slot)
            }
            Var::Mem { slot } => format!("mem_{}", slot),
            Var::MinMemory => "min_memory".to_string(),
        }
    }

    /// Whether an integer assignment satisfies every row.
    /// Variables missing from `values` count as 0.
    pub fn is_satisfied_by(&self, values: &FxHashMap<Var, i64>) -> bool {
        let value = |v: Var| values.get(&v).copied().unwrap_or(0);
        self.all_rows().all(|row| row.is_satisfied(&value))
    }

    /// Evaluate the objective under an integer assignment.
    pub fn objective_value(&self, values: &FxHashMap<Var, i64>) -> i128 {
        self.objective
            .evaluate(|v| values.get(&v).copied().unwrap_or(0))
    }
}

/// Replace characters LP readers reject in names with `_`.
pub(crate) fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitized labels, one per node, with collisions resolved.
///
/// The first node keeps its sanitized label. Later nodes whose label
/// sanitizes to a name already taken get the first free `<name>_<k>`,
/// skipping every name some other node sanitizes to.
pub(crate) fn unique_names<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let sanitized: Vec<String> = labels.into_iter().map(sanitize_label).collect();
    let reserved: FxHashSet<&str> = sanitized.iter().map(String::as_str).collect();
    let mut taken: FxHashSet<String> = FxHashSet::default();

    sanitized
        .iter()
        .map(|name| {
            let mut unique = name.clone();
            let mut k = 1usize;
            while taken.contains(&unique)
                || (unique != *name && reserved.contains(unique.as_str()))
            {
                unique = format!("{}_{}", name, k);
                k += 1;
            }
            taken.insert(unique.clone());
            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("conv2d.0"), "conv2d.0");
        assert_eq!(sanitize_label("a-b c/d"), "a_b_c_d");
    }

    #[test]
    fn test_unique_names_resolve_collisions() {
        let names = unique_names(["a-b", "a_b", "a_b_1", "n 1", "n_1", "ok"]);
        assert_eq!(names, vec!["a_b", "a_b_2", "a_b_1", "n_1", "n_1_1", "ok"]);
        let distinct: FxHashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
    }

    #[test]
    fn test_unique_names_non_ascii() {
        let names = unique_names(["é", "ü", "_"]);
        assert_eq!(names, vec!["_", "__1", "__2"]);
    }

    #[test]
    fn test_var_names() {
        let model = LpModel {
            node_names: vec!["A".to_string(), "n_7".to_string()],
            ..LpModel::default()
        };
        assert_eq!(model.var_name(Var::Assign { node: 1, slot: 12 }), "x_n_7_12");
        assert_eq!(model.var_name(Var::Mem { slot: 3 }), "mem_3");
        assert_eq!(model.var_name(Var::MinMemory), "min_memory");
    }
}
