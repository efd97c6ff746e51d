use crate::domain::id::{FlowName, NodeName};
use crate::domain::node::Node;
use crate::domain::schedulable::SchedulableAttributes;

pub const DEFAULT_FAULTS_TOLERATED: i64 = 0;

/// A message stream traversing an ordered chain of nodes, source first and
/// sink last.
///
/// `link_tx_and_total_cost` is the flow's transmission budget: one entry per
/// node (the per-link attempts, indexed by the link's source node) plus one
/// trailing aggregate worst-case cost. It starts out zero-filled (one entry
/// per node as nodes are added) and is overwritten once during finalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub name: FlowName,
    pub attributes: SchedulableAttributes,
    /// Order in which the flow was read from the workload description; used
    /// as the secondary sort key by every priority ordering.
    pub index: usize,
    /// Worst-case transmissions per link, determined by the fault model.
    pub num_tx_per_link: i64,
    /// Ordered chain copies of the flow's nodes.
    pub nodes: Vec<Node>,
    pub link_tx_and_total_cost: Vec<i64>,
}

impl Flow {
    pub fn new(name: FlowName, priority: i64, index: usize) -> Self {
        let mut attributes = SchedulableAttributes::default();
        attributes.priority = priority;
        Flow {
            name,
            attributes,
            index,
            num_tx_per_link: DEFAULT_FAULTS_TOLERATED + 1,
            nodes: Vec::new(),
            link_tx_and_total_cost: Vec::new(),
        }
    }

    /// Appends a chain copy of `node` and grows the budget placeholder so the
    /// `len(budget) == len(nodes)` invariant holds before finalization.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
        self.link_tx_and_total_cost.push(0);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of hops (edges) on the chain.
    pub fn num_edges(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn sink(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn node_names(&self) -> Vec<NodeName> {
        self.nodes.iter().map(|node| node.name.clone()).collect()
    }

    /// Position of `node_name` within this flow's chain, if present.
    pub fn chain_position(&self, node_name: &NodeName) -> Option<usize> {
        self.nodes.iter().position(|node| &node.name == node_name)
    }

    pub fn priority(&self) -> i64 {
        self.attributes.priority
    }

    pub fn period(&self) -> i64 {
        self.attributes.period
    }

    pub fn deadline(&self) -> i64 {
        self.attributes.deadline
    }

    pub fn phase(&self) -> i64 {
        self.attributes.phase
    }
}

impl Default for Flow {
    fn default() -> Self {
        Flow::new(FlowName::new(""), 0, 0)
    }
}
