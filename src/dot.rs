//! You can also export the wiring of a layout to the Graphviz dot format using [`Layout::to_dot`].
//!
//! ```rust
//! use redstone_sop::{GraphvizStyle, TruthTable, synthesize};
//!
//! let table = TruthTable::from_file("assets/tables/xor.tt").unwrap();
//! let layout = synthesize(&table).unwrap();
//! println!("{}", layout.to_dot(GraphvizStyle::default()));
//! ```
//!
//! You can then render the graph using the DOT engine. Every cell of the netlist becomes a node,
//! named after its position.

use std::{fmt::Display, ops::Add};

use crate::{
    Layout,
    layout::{CellKind, Position},
};

// Defining default global style.
const DEFAULT_RANKDIR: &str = "LR";

// Defining default style for nodes.
const DEFAULT_INPUT_NODE_FORMAT: &str = "[shape=box]";
const DEFAULT_CONDUCTOR_NODE_FORMAT: &str = "[shape=point, width=0.15]";
const DEFAULT_INVERTER_NODE_FORMAT: &str = "[shape=invtriangle]";
const DEFAULT_REFRESHER_NODE_FORMAT: &str = "[shape=triangle]";
const DEFAULT_OUTPUT_NODE_FORMAT: &str = "[shape=doublecircle]";

// Defining default style for edges.
const DEFAULT_EDGE_ALL_FORMAT: &str = "[arrowsize=0.3]";
const DEFAULT_EDGE_INVERTED_FORMAT: &str = "[headlabel=\"●\", labelangle=.0, labeldistance=1.5]";
const DEFAULT_EDGE_OUTPUT_FORMAT: &str = "[penwidth=2]";

/// String containing the graphviz node style (you must manually include square brackets).
///
/// See [`GraphvizStyle`] for what kind of nodes can be described.
#[derive(Debug, Clone)]
pub struct GraphvizNodeStyle(String);

impl Display for GraphvizNodeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String containing the graphviz edge style (you must manually include square brackets).
#[derive(Debug, Clone, Default)]
pub struct GraphvizEdgeStyle(String);

impl Display for GraphvizEdgeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for GraphvizEdgeStyle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        GraphvizEdgeStyle(format!("{}{}", self.0, rhs.0))
    }
}

/// Parameters for Graphviz rendering.
///
/// ### Nodes
/// Primary inputs, conductors, inverters, refreshers and the light actuator each get their
/// own [`GraphvizNodeStyle`].
///
/// ### Edges
/// Edge styles are additive. All edges implement the `edge_all` style. To that can be added:
/// - `edge_inverted` if the edge is pointing at an inverter
/// - `edge_output` if the edge is pointing at the light actuator.
#[derive(Debug, Clone)]
pub struct GraphvizStyle {
    rankdir: String,

    input: GraphvizNodeStyle,
    conductor: GraphvizNodeStyle,
    inverter: GraphvizNodeStyle,
    refresher: GraphvizNodeStyle,
    output: GraphvizNodeStyle,

    edge_all: GraphvizEdgeStyle,
    edge_inverted: GraphvizEdgeStyle,
    edge_output: GraphvizEdgeStyle,
}

impl Default for GraphvizStyle {
    fn default() -> Self {
        GraphvizStyle {
            rankdir: DEFAULT_RANKDIR.to_string(),

            input: GraphvizNodeStyle(DEFAULT_INPUT_NODE_FORMAT.to_string()),
            conductor: GraphvizNodeStyle(DEFAULT_CONDUCTOR_NODE_FORMAT.to_string()),
            inverter: GraphvizNodeStyle(DEFAULT_INVERTER_NODE_FORMAT.to_string()),
            refresher: GraphvizNodeStyle(DEFAULT_REFRESHER_NODE_FORMAT.to_string()),
            output: GraphvizNodeStyle(DEFAULT_OUTPUT_NODE_FORMAT.to_string()),

            edge_all: GraphvizEdgeStyle(DEFAULT_EDGE_ALL_FORMAT.to_string()),
            edge_inverted: GraphvizEdgeStyle(DEFAULT_EDGE_INVERTED_FORMAT.to_string()),
            edge_output: GraphvizEdgeStyle(DEFAULT_EDGE_OUTPUT_FORMAT.to_string()),
        }
    }
}

impl GraphvizStyle {
    pub fn with_rankdir(mut self, rankdir: &str) -> Self {
        self.rankdir = rankdir.to_string();
        self
    }
}

fn graphviz_id(position: Position) -> String {
    format!("n{}_{}_{}", position.layer, position.row, position.column)
}

impl Layout {
    /// Returns a DOT representation of the layout wiring.
    pub fn to_dot(&self, graphviz_style: GraphvizStyle) -> String {
        let netlist = self.netlist();
        let mut decl_edges = String::new();

        // Creating different subgraphs for node declarations
        let mut decl_inputs = format!(
            "subgraph inputs {{\n rank=same\n node {}\n",
            graphviz_style.input
        );
        let mut decl_conductors = format!(
            "subgraph conductors {{\n node {}\n",
            graphviz_style.conductor
        );
        let mut decl_inverters = format!(
            "subgraph inverters {{\n node {}\n",
            graphviz_style.inverter
        );
        let mut decl_refreshers = format!(
            "subgraph refreshers {{\n node {}\n",
            graphviz_style.refresher
        );
        let mut decl_outputs = format!(
            "subgraph outputs {{\n node {}\n",
            graphviz_style.output
        );

        for node in netlist.nodes() {
            let id = graphviz_id(node);
            let kind = self.grid().get(node);
            if let Some(i) = netlist.input_index(node) {
                decl_inputs.push_str(&format!("{} [label=\"x{}\"]\n", id, i));
            } else {
                let decl = format!("{} [tooltip=\"{} {}\"]\n", id, kind.name(), node);
                match kind {
                    CellKind::Inverter(_) => decl_inverters.push_str(&decl),
                    CellKind::Refresher(_) => decl_refreshers.push_str(&decl),
                    CellKind::LightActuator => decl_outputs
                        .push_str(&format!("{} [label=\"out\"]\n", id)),
                    _ => decl_conductors.push_str(&decl),
                }
            }

            let mut style = GraphvizEdgeStyle::default();
            if matches!(kind, CellKind::Inverter(_)) {
                style = style + graphviz_style.edge_inverted.clone();
            }
            if kind == CellKind::LightActuator {
                style = style + graphviz_style.edge_output.clone();
            }
            for &fanin in netlist.fanins(node) {
                decl_edges.push_str(&format!("{} -> {} {}\n", graphviz_id(fanin), id, style));
            }
        }

        // Concatenating everything together
        format!(
            "
strict digraph {{
    rankdir=\"{}\"
    edge {}
    {}
    }}
    {}
    }}
    {}
    }}
    {}
    }}
    {}
    }}
    {}
}}",
            graphviz_style.rankdir,
            graphviz_style.edge_all,
            decl_inputs,
            decl_conductors,
            decl_inverters,
            decl_refreshers,
            decl_outputs,
            decl_edges
        )
    }
}
