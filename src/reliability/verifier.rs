use crate::domain::workload::WorkloadModel;
use crate::reliability::table::{column_label, HeaderIndex, ReliabilityTable};

/// Checks the completed reliability table against the run's E2E target.
///
/// This is a terminal-state check only: a flow meets its target iff every
/// one of its columns' value in the last row is at or above `e2e`. A `false`
/// result is an expected, first-class outcome (the schedule is infeasible
/// for the target), not an error.
#[derive(Debug, Clone, Copy)]
pub struct ReliabilityVerifier {
    e2e: f64,
}

impl ReliabilityVerifier {
    pub fn new(e2e: f64) -> Self {
        ReliabilityVerifier { e2e }
    }

    /// AND across all flows of the per-flow terminal check.
    pub fn verify(&self, table: &ReliabilityTable, workload: &WorkloadModel, header_index: &HeaderIndex) -> bool {
        let Some(last_row) = table.last() else {
            log::warn!("Reliability table for workload {} is empty; nothing meets its target.", workload.name);
            return false;
        };

        let mut all_flows_met = true;
        for flow_name in workload.flow_names_in_priority_order() {
            for node_name in workload.get_nodes_in_flow(flow_name.as_str()) {
                let label = column_label(flow_name.as_str(), node_name.as_str());
                let Some(column) = header_index.column_of(&label) else {
                    log::warn!("Column {} missing from the reliability table header.", label);
                    all_flows_met = false;
                    continue;
                };
                if last_row[column] < self.e2e {
                    log::info!("Flow {} misses its E2E target at {}: {} < {}", flow_name, label, last_row[column], self.e2e);
                    all_flows_met = false;
                }
            }
        }
        all_flows_met
    }

    /// Every column whose terminal value misses the target, as
    /// `(label, terminal value)` pairs in column order. Supports the
    /// reporting collaborators' drill-down.
    pub fn failing_columns(&self, table: &ReliabilityTable, header_index: &HeaderIndex) -> Vec<(String, f64)> {
        let Some(last_row) = table.last() else {
            return Vec::new();
        };
        let mut failing = Vec::new();
        for (column, value) in last_row.iter().enumerate() {
            if *value < self.e2e {
                if let Some(label) = header_index.label_of(column) {
                    failing.push((label.to_string(), *value));
                }
            }
        }
        failing
    }
}
