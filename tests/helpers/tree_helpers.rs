//! Building input trees whose types follow a parsed program.

use treeforge::engine::{DescriptorFactory, Node, NodeType};
use treeforge::{Program, parse_program};

/// Parse or panic with the error location
pub fn program(source: &str) -> Program {
    match parse_program(source) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse rules: {err}\n{source}"),
    }
}

/// Runtime type of a declared node, ancestors included
pub fn node_type(program: &Program, name: &str) -> NodeType {
    DescriptorFactory::common(program)
        .node_type(name)
        .unwrap_or_else(|| panic!("type '{name}' is not declared"))
}

pub fn leaf(program: &Program, name: &str, data: &str) -> Node {
    Node::leaf(node_type(program, name), data)
}

pub fn branch(program: &Program, name: &str, children: Vec<Node>) -> Node {
    Node::branch(node_type(program, name), children)
}

/// Render a sibling list the way `Node` displays
pub fn render(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(ToString::to_string).collect()
}
