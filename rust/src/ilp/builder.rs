//! Time-indexed ILP formulation of DAG scheduling.
//!
//! For a latency budget L, one variable `x(n, i)` exists per node `n` and
//! slot `i` in `1..=L`. The model contains:
//! - assignment rows: `sum_i x(n,i) = 1` per node
//! - precedence rows: `sum_i i*x(v,i) - sum_i i*x(u,i) >= 1` per edge `u -> v`
//! - resource rows, depending on the objective
//! - non-negativity rows for every variable
//!
//! The builder does no validation. Run the feasibility check first.

use crate::config::Objective;
use crate::graph::TaskGraph;
use crate::interner::NodeId;
use crate::logging::VERBOSITY_SILENT;
use crate::{log_debug, log_summary};

use super::expr::{coefficient, is_clamped, ConstraintRow, LinearExpr, Relation, Var};
use super::model::{unique_names, LpModel, Section};

/// Builds an [`LpModel`] from a task graph.
///
/// # Example
/// ```
/// use dagilp_rust::ilp::ModelBuilder;
/// use dagilp_rust::{Objective, TaskGraph};
///
/// let graph = TaskGraph::from_edges([("A", "B", 2)]);
/// let model = ModelBuilder::new(&graph, 3)
///     .with_objective(Objective::Latency)
///     .build();
/// assert_eq!(model.decision_variables().len(), 6);
/// ```
pub struct ModelBuilder<'a> {
    graph: &'a TaskGraph,
    max_latency: u32,
    max_memory: Option<u64>,
    objective: Objective,
    verbosity: u8,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder for `max_latency` slots with unbounded memory and
    /// the latency objective.
    pub fn new(graph: &'a TaskGraph, max_latency: u32) -> Self {
        Self {
            graph,
            max_latency,
            max_memory: None,
            objective: Objective::Latency,
            verbosity: VERBOSITY_SILENT,
        }
    }

    /// Sets the per-slot demand budget (`None` = unbounded).
    pub fn with_max_memory(mut self, max_memory: Option<u64>) -> Self {
        self.max_memory = max_memory;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn slots(&self) -> impl Iterator<Item = u32> {
        1..=self.max_latency
    }

    /// Budget and demands too large for an `i64` coefficient.
    fn clamped_weights(&self) -> usize {
        let budget = match self.objective {
            Objective::Latency => self.max_memory,
            Objective::Memory => None,
        };
        budget
            .into_iter()
            .chain(self.graph.nodes().map(|n| self.graph.out_weight(n)))
            .filter(|&w| is_clamped(w))
            .count()
    }

    /// Builds the model.
    pub fn build(&self) -> LpModel {
        let graph = self.graph;
        let node_names = unique_names(graph.nodes().map(|n| graph.label(n)));

        let mut model = LpModel {
            node_names,
            ..LpModel::default()
        };

        // Node order, then ascending slot
        model.decision_vars = self
            .graph
            .nodes()
            .flat_map(|node| self.slots().map(move |slot| Var::Assign { node, slot }))
            .collect();

        model.assignment = self.assignment_rows();
        model.precedence = self.precedence_rows();

        match self.objective {
            Objective::Latency => {
                model.objective = self.latency_objective(&model.decision_vars);
                if let Some(budget) = self.max_memory {
                    model.resource = self.budget_rows(budget);
                }
            }
            Objective::Memory => {
                model.auxiliary_vars = self
                    .slots()
                    .map(|slot| Var::Mem { slot })
                    .chain(std::iter::once(Var::MinMemory))
                    .collect();
                model.objective.add(1, Var::MinMemory);
                model.resource = self.peak_memory_rows();
            }
        }

        model.non_negativity = model
            .variables()
            .enumerate()
            .map(|(i, var)| {
                let mut expr = LinearExpr::new();
                expr.add(1, var);
                row_name(Section::NonNegativity.prefix(), i, expr, Relation::Ge, 0)
            })
            .collect();

        log_summary!(
            self.verbosity,
            "[ilp] {} objective: {} variables, {} assignment, {} precedence, {} resource, {} non-negativity rows",
            self.objective.as_str(),
            model.variable_count(),
            model.assignment.len(),
            model.precedence.len(),
            model.resource.len(),
            model.non_negativity.len()
        );
        let clamped = self.clamped_weights();
        if clamped > 0 {
            log_summary!(
                self.verbosity,
                "[ilp] warning: {} weights exceed {} and were clamped to it",
                clamped,
                i64::MAX
            );
        }
        if self.verbosity >= crate::logging::VERBOSITY_DEBUG {
            for row in model.all_rows() {
                log_debug!(self.verbosity, "[ilp] {} {:?}", row.name, row.expr.terms());
            }
        }

        model
    }

    /// Sum of `i * x(node, i)` over all slots: the slot the node lands in.
    fn slot_expr(&self, node: NodeId, sign: i64, expr: &mut LinearExpr) {
        for slot in self.slots() {
            expr.add(sign * slot as i64, Var::Assign { node, slot });
        }
    }

    fn assignment_rows(&self) -> Vec<ConstraintRow> {
        self.graph
            .nodes()
            .enumerate()
            .map(|(i, node)| {
                let mut expr = LinearExpr::new();
                for slot in self.slots() {
                    expr.add(1, Var::Assign { node, slot });
                }
                row_name(Section::Assignment.prefix(), i, expr, Relation::Eq, 1)
            })
            .collect()
    }

    fn precedence_rows(&self) -> Vec<ConstraintRow> {
        self.graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let mut expr = LinearExpr::new();
                self.slot_expr(edge.target, 1, &mut expr);
                self.slot_expr(edge.source, -1, &mut expr);
                row_name(Section::Precedence.prefix(), i, expr, Relation::Ge, 1)
            })
            .collect()
    }

    /// Demand active at a slot: `sum_n demand(n) * x(n, slot)`.
    fn demand_at(&self, slot: u32, sign: i64, expr: &mut LinearExpr) {
        for node in self.graph.nodes() {
            let demand = coefficient(self.graph.out_weight(node));
            expr.add(sign * demand, Var::Assign { node, slot });
        }
    }

    /// Latency objective: per-slot demand must stay within the budget.
    ///
    /// One row per slot, even when no node has demand and the row reads `0 <= M`.
    fn budget_rows(&self, budget: u64) -> Vec<ConstraintRow> {
        self.slots()
            .enumerate()
            .map(|(i, slot)| {
                let mut expr = LinearExpr::new();
                self.demand_at(slot, 1, &mut expr);
                row_name(
                    Section::Resource.prefix(),
                    i,
                    expr,
                    Relation::Le,
                    coefficient(budget),
                )
            })
            .collect()
    }

    /// Memory objective: define `mem(i)` per slot and bound each by `min_memory`.
    fn peak_memory_rows(&self) -> Vec<ConstraintRow> {
        let mut rows = Vec::new();

        for (i, slot) in self.slots().enumerate() {
            let mut expr = LinearExpr::new();
            expr.add(1, Var::Mem { slot });
            self.demand_at(slot, -1, &mut expr);
            rows.push(row_name("m", i, expr, Relation::Eq, 0));
        }

        for (i, slot) in self.slots().enumerate() {
            let mut expr = LinearExpr::new();
            expr.add(1, Var::Mem { slot }).add(-1, Var::MinMemory);
            rows.push(row_name("u", i, expr, Relation::Le, 0));
        }

        rows
    }

    /// Minimize the sum of assigned slots.
    fn latency_objective(&self, decision_vars: &[Var]) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for &var in decision_vars {
            if let Some(slot) = var.slot() {
                expr.add(slot as i64, var);
            }
        }
        expr
    }
}

fn row_name(
    prefix: &str,
    index: usize,
    expr: LinearExpr,
    relation: Relation,
    rhs: i64,
) -> ConstraintRow {
    ConstraintRow::new(format!("{}{}", prefix, index), expr, relation, rhs)
}

/// Build a model with the given bounds and objective.
pub fn build_model(
    graph: &TaskGraph,
    max_latency: u32,
    max_memory: Option<u64>,
    objective: Objective,
) -> LpModel {
    ModelBuilder::new(graph, max_latency)
        .with_max_memory(max_memory)
        .with_objective(objective)
        .build()
}
