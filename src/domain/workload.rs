use std::collections::HashMap;

use crate::api::workload_dto::WorkloadDto;
use crate::domain::flow::Flow;
use crate::domain::id::{FlowName, NodeName};
use crate::domain::node::Node;
use crate::domain::schedulable::{DEFAULT_DEADLINE, DEFAULT_PERIOD, DEFAULT_PHASE, DEFAULT_PRIORITY};
use crate::domain::util::{lcm, sort_names};
use crate::reliability::budget::TransmissionBudgetCalculator;

/// Map of all flows in the workload graph (`<name, Flow>`).
pub type FlowMap = HashMap<FlowName, Flow>;
/// Map of all graph nodes in the workload graph (`<name, Node>`).
pub type NodeMap = HashMap<NodeName, Node>;

/// The canonical flow/node graph of one workload.
///
/// Flows and nodes are keyed by name. A physical node may appear in several
/// flows; the global map keeps one record per name in discovery order, and
/// each flow holds its own ordered chain copies. The model is read-mostly
/// after construction; only the budgeting phase writes each flow's
/// transmission budget, exactly once.
#[derive(Debug, Clone, Default)]
pub struct WorkloadModel {
    pub name: String,
    flows: FlowMap,
    nodes: NodeMap,
    /// Flow names in the order they were read from the workload description.
    flow_names_in_original_order: Vec<FlowName>,
    /// Flow names in the order selected by the scheduler-facing ordering.
    flow_names_in_priority_order: Vec<FlowName>,
}

impl WorkloadModel {
    pub fn new(name: impl Into<String>) -> Self {
        WorkloadModel { name: name.into(), ..WorkloadModel::default() }
    }

    /// Builds the canonical graph from a parsed workload description.
    ///
    /// Flows are added in description order (which fixes their default
    /// priority and index), optional parameters overwrite the defaults, and
    /// the priority ordering is derived once at the end.
    pub fn from_dto(dto: WorkloadDto) -> Self {
        let mut workload = WorkloadModel::new(dto.name);
        for flow_dto in dto.flows {
            workload.add_flow(flow_dto.name.clone());
            for node_name in &flow_dto.nodes {
                workload.add_node_to_flow(&flow_dto.name, node_name);
            }
            if flow_dto.nodes.len() < 2 {
                log::warn!("Flow {} has fewer than 2 nodes; it carries no real hop.", flow_dto.name);
            }
            if let Some(priority) = flow_dto.priority {
                workload.set_flow_priority(&flow_dto.name, priority);
            }
            if let Some(period) = flow_dto.period {
                workload.set_flow_period(&flow_dto.name, period);
            }
            if let Some(deadline) = flow_dto.deadline {
                workload.set_flow_deadline(&flow_dto.name, deadline);
            }
            if let Some(phase) = flow_dto.phase {
                workload.set_flow_phase(&flow_dto.name, phase);
            }
        }
        workload.set_flows_in_priority_order();
        workload
    }

    pub fn flows(&self) -> &FlowMap {
        &self.flows
    }

    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    /// Adds a new flow. Priority and index both default to the number of
    /// flows already present, preserving the description order as priority
    /// until the optional flow parameters overwrite it.
    pub fn add_flow(&mut self, flow_name: impl Into<String>) {
        let flow_name = FlowName::new(flow_name);
        if self.flows.contains_key(&flow_name) {
            log::warn!("A flow with name {} already exists. It has been replaced with a new flow.", flow_name);
        } else {
            self.flow_names_in_original_order.push(flow_name.clone());
        }
        let index = self.flows.len();
        let flow = Flow::new(flow_name.clone(), index as i64, index);
        self.flows.insert(flow_name, flow);
    }

    /// Appends a node to a flow's chain, creating the global node record on
    /// first discovery. The chain copy's priority is its position in the
    /// chain.
    pub fn add_node_to_flow(&mut self, flow_name: &str, node_name: &str) {
        let node_key = NodeName::new(node_name);
        if !self.nodes.contains_key(&node_key) {
            let index = self.nodes.len();
            self.nodes.insert(node_key.clone(), Node::new(node_key.clone(), DEFAULT_PRIORITY, index));
        }

        match self.flows.get_mut(&FlowName::new(flow_name)) {
            Some(flow) => {
                let chain_position = flow.nodes.len();
                flow.add_node(Node::new(node_key, chain_position as i64, 0));
            }
            None => {
                log::warn!("Bad situation: Flow {} doesn't exist but trying to add node {} to it.", flow_name, node_name);
            }
        }
    }

    fn get_flow(&self, flow_name: &str) -> Option<&Flow> {
        let flow = self.flows.get(&FlowName::new(flow_name));
        if flow.is_none() {
            log::warn!("Bad situation: Flow {} doesn't exist but trying to retrieve it.", flow_name);
        }
        flow
    }

    fn get_flow_mut(&mut self, flow_name: &str) -> Option<&mut Flow> {
        let flow = self.flows.get_mut(&FlowName::new(flow_name));
        if flow.is_none() {
            log::warn!("Bad situation: Flow {} doesn't exist but trying to update it.", flow_name);
        }
        flow
    }

    /// Priority of a node within a flow's chain; 0 when either is missing.
    pub fn get_flow_priority_of_node(&self, flow_name: &str, node_name: &str) -> i64 {
        let node_key = NodeName::new(node_name);
        self.get_flow(flow_name)
            .and_then(|flow| flow.nodes.iter().find(|node| node.name == node_key))
            .map(|node| node.priority)
            .unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn get_flow_priority(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.priority()).unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn set_flow_priority(&mut self, flow_name: &str, priority: i64) {
        if let Some(flow) = self.get_flow_mut(flow_name) {
            flow.attributes.priority = priority;
        }
    }

    pub fn get_flow_period(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.period()).unwrap_or(DEFAULT_PERIOD)
    }

    pub fn set_flow_period(&mut self, flow_name: &str, period: i64) {
        if let Some(flow) = self.get_flow_mut(flow_name) {
            flow.attributes.period = period;
        }
    }

    pub fn get_flow_deadline(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.deadline()).unwrap_or(DEFAULT_DEADLINE)
    }

    pub fn set_flow_deadline(&mut self, flow_name: &str, deadline: i64) {
        if let Some(flow) = self.get_flow_mut(flow_name) {
            flow.attributes.deadline = deadline;
        }
    }

    pub fn get_flow_phase(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.phase()).unwrap_or(DEFAULT_PHASE)
    }

    pub fn set_flow_phase(&mut self, flow_name: &str, phase: i64) {
        if let Some(flow) = self.get_flow_mut(flow_name) {
            flow.attributes.phase = phase;
        }
    }

    pub fn get_flow_index(&self, flow_name: &str) -> usize {
        self.get_flow(flow_name).map(|flow| flow.index).unwrap_or(0)
    }

    /// Worst-case transmissions per link, as resolved by the fault model
    /// during finalization; 1 for a flow that was never finalized.
    pub fn get_flow_tx_attempts_per_link(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.num_tx_per_link).unwrap_or(1)
    }

    /// Next release at or after `current_time` for the named flow.
    pub fn next_release_time(&self, flow_name: &str, current_time: i64) -> i64 {
        self.get_flow(flow_name).map(|flow| flow.attributes.next_release_at(current_time)).unwrap_or(current_time)
    }

    /// Next absolute deadline after `current_time` for the named flow.
    pub fn next_absolute_deadline(&self, flow_name: &str, current_time: i64) -> i64 {
        self.get_flow(flow_name)
            .map(|flow| flow.attributes.next_absolute_deadline(current_time))
            .unwrap_or(current_time + DEFAULT_DEADLINE)
    }

    pub fn set_node_channel(&mut self, node_name: &str, channel: u16) {
        match self.nodes.get_mut(&NodeName::new(node_name)) {
            Some(node) => node.channel = channel,
            None => log::warn!("Bad situation: Node {} doesn't exist but trying to set its channel.", node_name),
        }
    }

    pub fn get_node_channel(&self, node_name: &str) -> u16 {
        match self.nodes.get(&NodeName::new(node_name)) {
            Some(node) => node.channel,
            None => {
                log::warn!("Bad situation: Node {} doesn't exist but trying to get its channel.", node_name);
                0
            }
        }
    }

    /// Global discovery index of a node; 0 when the node is unknown.
    pub fn get_node_index(&self, node_name: &str) -> usize {
        match self.nodes.get(&NodeName::new(node_name)) {
            Some(node) => node.index,
            None => {
                log::warn!("Bad situation: Node {} doesn't exist but trying to get its index.", node_name);
                0
            }
        }
    }

    /// Node names of a flow's chain, in chain order; empty when the flow is
    /// unknown.
    pub fn get_nodes_in_flow(&self, flow_name: &str) -> Vec<NodeName> {
        match self.flows.get(&FlowName::new(flow_name)) {
            Some(flow) => flow.node_names(),
            None => {
                log::warn!("No Flow with name {}.", flow_name);
                Vec::new()
            }
        }
    }

    pub fn flow_names_in_original_order(&self) -> &[FlowName] {
        &self.flow_names_in_original_order
    }

    pub fn flow_names_in_priority_order(&self) -> &[FlowName] {
        &self.flow_names_in_priority_order
    }

    /// Flows ordered by priority, then by description order, referenced by
    /// name via `flow_names_in_priority_order`.
    pub fn set_flows_in_priority_order(&mut self) {
        self.order_flows_by(|flow| (flow.priority(), flow.index as i64));
    }

    /// Rate-monotonic ordering: period first, priority as the tie-breaker.
    pub fn set_flows_in_rm_order(&mut self) {
        self.order_flows_by(|flow| (flow.period(), flow.priority()));
    }

    /// Deadline-monotonic ordering: deadline first, priority as the
    /// tie-breaker.
    pub fn set_flows_in_dm_order(&mut self) {
        self.order_flows_by(|flow| (flow.deadline(), flow.priority()));
    }

    /// RealTimeHART schedules in plain priority order.
    pub fn set_flows_in_real_time_hart_order(&mut self) {
        self.set_flows_in_priority_order();
    }

    fn order_flows_by<K: Ord>(&mut self, key: impl Fn(&Flow) -> K) {
        let mut sorted: Vec<&Flow> = self.flows.values().collect();
        sorted.sort_by_key(|flow| (key(flow), flow.index));
        self.flow_names_in_priority_order = sorted.into_iter().map(|flow| flow.name.clone()).collect();
    }

    /// Resolves every flow's transmission budget with the given calculator.
    /// Budgets are written exactly once here; the model is read-only for the
    /// propagation and verification phases that follow.
    pub fn finalize_flows(&mut self, calculator: &TransmissionBudgetCalculator) {
        let flow_names: Vec<FlowName> = self.flow_names_in_original_order.clone();
        for flow_name in flow_names {
            self.finalize_current_flow(flow_name.as_str(), calculator);
        }
    }

    /// Resolves one flow's `num_tx_per_link` and budget vector.
    pub fn finalize_current_flow(&mut self, flow_name: &str, calculator: &TransmissionBudgetCalculator) {
        let Some(flow) = self.flows.get_mut(&FlowName::new(flow_name)) else {
            log::warn!("Bad situation: Flow {} doesn't exist but trying to finalize its budget.", flow_name);
            return;
        };
        flow.num_tx_per_link = calculator.num_tx_per_link(flow);
        match calculator.num_tx_per_link_and_total_cost(flow) {
            Ok(budget) => flow.link_tx_and_total_cost = budget,
            Err(error) => {
                log::warn!("Could not finalize transmission budget for flow {}: {}", flow_name, error);
            }
        }
    }

    /// Trailing aggregate entry of the flow's budget; 0 when unknown.
    pub fn get_total_tx_attempts_in_flow(&self, flow_name: &str) -> i64 {
        self.get_flow(flow_name).and_then(|flow| flow.link_tx_and_total_cost.last().copied()).unwrap_or(0)
    }

    /// Per-link budget entries without the trailing aggregate.
    pub fn get_num_tx_attempts_per_link(&self, flow_name: &str) -> Vec<i64> {
        match self.get_flow(flow_name) {
            Some(flow) if !flow.link_tx_and_total_cost.is_empty() => {
                let last = flow.link_tx_and_total_cost.len() - 1;
                flow.link_tx_and_total_cost[..last].to_vec()
            }
            _ => Vec::new(),
        }
    }

    /// LCM of all flow periods.
    pub fn hyper_period(&self) -> i64 {
        let mut hyper_period = 1;
        for flow_name in &self.flow_names_in_original_order {
            hyper_period = lcm(hyper_period, self.get_flow_period(flow_name.as_str()));
        }
        hyper_period
    }

    pub fn max_flow_length(&self) -> usize {
        self.flows.values().map(|flow| flow.node_count()).max().unwrap_or(0)
    }

    pub fn max_phase(&self) -> i64 {
        self.flows.values().map(|flow| flow.phase()).max().unwrap_or(DEFAULT_PHASE)
    }

    pub fn min_period(&self) -> i64 {
        self.flows.values().map(|flow| flow.period()).min().unwrap_or(DEFAULT_PERIOD)
    }

    /// All node names, sorted; numeric names sort numerically so "10" does
    /// not land between "1" and "2".
    pub fn node_names_ordered_alphabetically(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().map(|name| name.to_string()).collect();
        sort_names(&mut names);
        names
    }
}
