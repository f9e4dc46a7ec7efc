//! Task graph and its loaders.
//!
//! `TaskGraph` is the read-only input to every analysis and to the model
//! builder. Edge lists and random generation are the two ways to obtain one
//! besides building it by hand.

mod edgelist;
mod generate;
mod task_graph;

pub use edgelist::{format_edgelist, parse_edgelist, read_edgelist, write_edgelist, InputError};
pub use generate::{random_dag, random_dag_with};
pub use task_graph::{Edge, TaskGraph};
