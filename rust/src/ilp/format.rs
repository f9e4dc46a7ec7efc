//! LP-format serialization.
//!
//! Layout:
//! ```text
//! Minimize
//!  obj: <expr>
//! Subject to
//!  a0: ...        assignment
//!  p0: ...        precedence
//!  r0: ...        resource (or m*/u* under the memory objective)
//!  n0: ...        non-negativity
//! Integer
//!  <every variable>
//! ```
//! With binary typing the trailing block becomes `Binary` for decision
//! variables plus `Integer` for auxiliaries.

use std::io::{self, Write};

use crate::config::{SerializeConfig, VariableTyping};

use super::expr::{ConstraintRow, LinearExpr, Var};
use super::model::LpModel;

impl LpModel {
    /// Render a term list. A coefficient of 1 is written as the bare name.
    fn format_expr(&self, expr: &LinearExpr) -> String {
        let mut out = String::new();
        for (i, &(coef, var)) in expr.terms().iter().enumerate() {
            let name = self.var_name(var);
            let magnitude = coef.unsigned_abs();
            match (i, coef < 0) {
                (0, false) => {}
                (0, true) => out.push('-'),
                (_, false) => out.push_str(" + "),
                (_, true) => out.push_str(" - "),
            }
            if magnitude != 1 {
                out.push_str(&magnitude.to_string());
                out.push(' ');
            }
            out.push_str(&name);
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }

    fn format_row(&self, row: &ConstraintRow) -> String {
        format!(
            "{}: {} {} {}",
            row.name,
            self.format_expr(&row.expr),
            row.relation.symbol(),
            row.rhs
        )
    }

    fn write_var_list<W: Write>(
        &self,
        writer: &mut W,
        header: &str,
        vars: &[Var],
        indent: &str,
    ) -> io::Result<()> {
        writeln!(writer, "{}", header)?;
        if !vars.is_empty() {
            let names: Vec<String> = vars.iter().map(|&v| self.var_name(v)).collect();
            writeln!(writer, "{}{}", indent, names.join(" "))?;
        }
        Ok(())
    }

    /// Write the model as LP text.
    pub fn write_to<W: Write>(&self, writer: &mut W, config: &SerializeConfig) -> io::Result<()> {
        let indent = config.indent.as_str();

        writeln!(writer, "Minimize")?;
        writeln!(writer, "{}obj: {}", indent, self.format_expr(&self.objective))?;

        writeln!(writer, "Subject to")?;
        for row in self.all_rows() {
            writeln!(writer, "{}{}", indent, self.format_row(row))?;
        }

        match config.typing {
            VariableTyping::Integer => {
                let all: Vec<Var> = self.variables().collect();
                self.write_var_list(writer, "Integer", &all, indent)?;
            }
            VariableTyping::Binary => {
                self.write_var_list(writer, "Binary", &self.decision_vars, indent)?;
                if !self.auxiliary_vars.is_empty() {
                    self.write_var_list(writer, "Integer", &self.auxiliary_vars, indent)?;
                }
            }
        }

        Ok(())
    }

    /// Serialize the model to a `String`.
    pub fn to_lp_string(&self, config: &SerializeConfig) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf, config);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Objective, SerializeConfig, VariableTyping};
    use crate::graph::TaskGraph;
    use crate::ilp::build_model;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_single_edge_latency_text() {
        let graph = TaskGraph::from_edges([("A", "B", 2)]);
        let model = build_model(&graph, 3, None, Objective::Latency);
        let text = model.to_lp_string(&SerializeConfig::default());

        let expected = "\
Minimize
 obj: x_A_1 + 2 x_A_2 + 3 x_A_3 + x_B_1 + 2 x_B_2 + 3 x_B_3
Subject to
 a0: x_A_1 + x_A_2 + x_A_3 = 1
 a1: x_B_1 + x_B_2 + x_B_3 = 1
 p0: x_B_1 + 2 x_B_2 + 3 x_B_3 - x_A_1 - 2 x_A_2 - 3 x_A_3 >= 1
 n0: x_A_1 >= 0
 n1: x_A_2 >= 0
 n2: x_A_3 >= 0
 n3: x_B_1 >= 0
 n4: x_B_2 >= 0
 n5: x_B_3 >= 0
Integer
 x_A_1 x_A_2 x_A_3 x_B_1 x_B_2 x_B_3
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_scenario_counts_from_text() {
        let graph = TaskGraph::from_edges([("A", "B", 2)]);
        let text = build_model(&graph, 3, None, Objective::Latency)
            .to_lp_string(&SerializeConfig::default());
        let rows = lines(&text);

        let count = |prefix: &str| rows.iter().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count(" a"), 2);
        assert_eq!(count(" p"), 1);
        assert_eq!(count(" n"), 6);
        assert_eq!(count(" r"), 0);

        let integer_at = rows.iter().position(|l| *l == "Integer").unwrap();
        assert_eq!(rows.len(), integer_at + 2);
        assert_eq!(rows[integer_at + 1].split_whitespace().count(), 6);
    }

    #[test]
    fn test_budget_rows_text_and_indent() {
        let graph = TaskGraph::from_edges([("A", "B", 5), ("A", "C", 5)]);
        let model = build_model(&graph, 2, Some(10), Objective::Latency);
        let config = SerializeConfig {
            indent: "  ".to_string(),
            ..SerializeConfig::default()
        };
        let text = model.to_lp_string(&config);

        assert!(text.contains("\n  r0: 10 x_A_1 <= 10\n"));
        assert!(text.contains("\n  r1: 10 x_A_2 <= 10\n"));
        assert!(!text.contains("r2:"));
    }

    #[test]
    fn test_memory_objective_text() {
        let graph = TaskGraph::from_edges([("A", "B", 4)]);
        let model = build_model(&graph, 2, None, Objective::Memory);
        let text = model.to_lp_string(&SerializeConfig::default());
        let rows = lines(&text);

        assert_eq!(rows[1], " obj: min_memory");
        assert!(rows.contains(&" m0: mem_1 - 4 x_A_1 = 0"));
        assert!(rows.contains(&" m1: mem_2 - 4 x_A_2 = 0"));
        assert!(rows.contains(&" u0: mem_1 - min_memory <= 0"));
        assert!(rows.contains(&" n6: min_memory >= 0"));
        assert_eq!(
            rows.last().copied(),
            Some(" x_A_1 x_A_2 x_B_1 x_B_2 mem_1 mem_2 min_memory")
        );
    }

    #[test]
    fn test_binary_typing_sections() {
        let graph = TaskGraph::from_edges([("A", "B", 4)]);
        let config = SerializeConfig {
            typing: VariableTyping::Binary,
            ..SerializeConfig::default()
        };

        let latency = build_model(&graph, 2, None, Objective::Latency).to_lp_string(&config);
        assert!(latency.ends_with("Binary\n x_A_1 x_A_2 x_B_1 x_B_2\n"));
        assert!(!latency.contains("Integer"));

        let memory = build_model(&graph, 2, None, Objective::Memory).to_lp_string(&config);
        assert!(memory.ends_with(
            "Binary\n x_A_1 x_A_2 x_B_1 x_B_2\nInteger\n mem_1 mem_2 min_memory\n"
        ));
    }

    #[test]
    fn test_colliding_labels_print_distinct_names() {
        let graph = TaskGraph::from_edges([("a-b", "a_b", 1)]);
        let text = build_model(&graph, 2, None, Objective::Latency)
            .to_lp_string(&SerializeConfig::default());
        let rows = lines(&text);

        assert!(rows.contains(&" p0: x_a_b_1_1 + 2 x_a_b_1_2 - x_a_b_1 - 2 x_a_b_2 >= 1"));
        let declared: Vec<&str> = rows.last().unwrap().split_whitespace().collect();
        let distinct: rustc_hash::FxHashSet<&str> = declared.iter().copied().collect();
        assert_eq!(declared.len(), 4);
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_zero_demand_budget_row_text() {
        let graph = TaskGraph::from_edges([("A", "B", 0)]);
        let text = build_model(&graph, 2, Some(3), Objective::Latency)
            .to_lp_string(&SerializeConfig::default());
        assert!(text.contains("\n r0: 0 <= 3\n r1: 0 <= 3\n"));
    }

    #[test]
    fn test_double_digit_slot_names() {
        let graph = TaskGraph::from_edges([("A", "B", 1)]);
        let text = build_model(&graph, 11, None, Objective::Latency)
            .to_lp_string(&SerializeConfig::default());
        assert!(text.contains(" + 10 x_A_10 + 11 x_A_11 + x_B_1 "));
    }

    #[test]
    fn test_output_is_reproducible() {
        let graph = TaskGraph::from_edges([("x", "y", 3), ("y", "z", 1), ("x", "z", 2)]);
        let render = || {
            build_model(&graph, 4, Some(6), Objective::Latency)
                .to_lp_string(&SerializeConfig::default())
        };
        assert_eq!(render(), render());
    }
}
