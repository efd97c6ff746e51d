use crate::config::RunConfig;
use crate::domain::flow::Flow;
use crate::error::{Error, Result};

/// Hard cap on the push-round simulation. Normal inputs converge within a few
/// dozen rounds; hitting this cap means the parameters were out of range.
pub const MAX_BUDGET_ROUNDS: usize = 10_000;

/// Fault model used to size a flow's transmission budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReliabilityPolicy {
    /// Tolerate a fixed number of faults per edge per period.
    FixedFaultCount { num_faults: i64 },
    /// Meet a target end-to-end delivery probability over lossy links.
    EndToEnd { e2e: f64, min_packet_reception_rate: f64 },
}

/// Computes, per flow, the worst-case number of transmissions each link needs
/// and the flow's total worst-case transmission cost.
#[derive(Debug, Clone, Copy)]
pub struct TransmissionBudgetCalculator {
    policy: ReliabilityPolicy,
}

impl TransmissionBudgetCalculator {
    pub fn new(policy: ReliabilityPolicy) -> Self {
        TransmissionBudgetCalculator { policy }
    }

    /// Selects the policy the way the run configuration does: a positive
    /// fault count means the fixed-fault model, otherwise the E2E model.
    pub fn from_config(config: &RunConfig) -> Self {
        let policy = if config.uses_fixed_fault_policy() {
            ReliabilityPolicy::FixedFaultCount { num_faults: config.num_faults }
        } else {
            ReliabilityPolicy::EndToEnd {
                e2e: config.e2e,
                min_packet_reception_rate: config.min_packet_reception_rate,
            }
        };
        TransmissionBudgetCalculator { policy }
    }

    pub fn policy(&self) -> ReliabilityPolicy {
        self.policy
    }

    /// The flow's transmission budget: one entry per node (attempts for the
    /// link whose source is that node) plus one trailing aggregate cost.
    pub fn num_tx_per_link_and_total_cost(&self, flow: &Flow) -> Result<Vec<i64>> {
        match self.policy {
            ReliabilityPolicy::FixedFaultCount { num_faults } => Ok(Self::fixed_tx_per_link_and_total_cost(flow, num_faults)),
            ReliabilityPolicy::EndToEnd { e2e, min_packet_reception_rate } => {
                self.e2e_tx_per_link_and_total_cost(flow, e2e, min_packet_reception_rate)
            }
        }
    }

    /// Worst-case transmissions for a single link under the active policy.
    ///
    /// For the E2E policy this is `ceil(ln(1 - e2e^(1/hops)) / ln(1 - m))`,
    /// with one transmission sufficing when every reception succeeds.
    pub fn num_tx_per_link(&self, flow: &Flow) -> i64 {
        match self.policy {
            ReliabilityPolicy::FixedFaultCount { num_faults } => num_faults + 1,
            ReliabilityPolicy::EndToEnd { e2e, min_packet_reception_rate: m } => {
                let mut hops = flow.node_count() as f64;
                if hops < 1.0 {
                    // An empty chain is not a flow; fall back to a 2-hop estimate.
                    hops = 2.0;
                }
                if m >= 1.0 {
                    return 1;
                }
                let per_link_target = e2e.powf(1.0 / hops);
                ((1.0 - per_link_target).ln() / (1.0 - m).ln()).ceil() as i64
            }
        }
    }

    /// Each node is charged `num_faults + 1` attempts; the aggregate assumes
    /// at most `num_faults` faults per edge per period plus the one required
    /// successful transmission per edge.
    ///
    /// Shared by the standalone budget and per-flow finalization so the two
    /// call sites cannot drift apart.
    fn fixed_tx_per_link_and_total_cost(flow: &Flow, num_faults: i64) -> Vec<i64> {
        let n_nodes = flow.node_count();
        let mut budget = vec![num_faults + 1; n_nodes];
        let num_edges = flow.num_edges() as i64;
        budget.push(num_edges + num_edges * num_faults);
        budget
    }

    /// Simulates discrete push rounds over the chain until the sink reaches
    /// the E2E target; per-link push counters become the budget and the
    /// number of rounds becomes the trailing worst-case cost.
    fn e2e_tx_per_link_and_total_cost(&self, flow: &Flow, e2e: f64, m: f64) -> Result<Vec<i64>> {
        let n_nodes = flow.node_count();
        if n_nodes < 2 {
            return Err(Error::InvalidFlow(flow.name.to_string()));
        }
        let n_hops = n_nodes - 1;
        // Minimum reliability each link must clear so the chain product clears
        // the E2E target; max() guards rounding when e2e == 1.0.
        let min_link_reliability = e2e.max(e2e.powf(1.0 / n_hops as f64));

        let mut pushes = vec![0_i64; n_nodes + 1];
        let mut current = vec![0.0_f64; n_nodes];
        current[0] = 1.0;
        let mut rounds = 0_usize;

        while current[n_nodes - 1] < e2e {
            rounds += 1;
            if rounds > MAX_BUDGET_ROUNDS {
                return Err(Error::BudgetNonConvergence { flow: flow.name.to_string(), rounds: MAX_BUDGET_ROUNDS });
            }
            let prev = current.clone();
            for node_index in 0..n_hops {
                let prev_src_state = prev[node_index];
                let prev_snk_state = prev[node_index + 1];
                // Push until the sink clears its per-link target, but skip
                // links whose source cannot have the packet yet.
                if prev_snk_state < min_link_reliability && prev_src_state > 0.0 {
                    current[node_index + 1] = (1.0 - m) * prev_snk_state + m * prev_src_state;
                    pushes[node_index] += 1;
                } else {
                    current[node_index + 1] = prev_snk_state;
                }
            }
        }

        pushes[n_nodes] = rounds as i64;
        Ok(pushes)
    }
}
