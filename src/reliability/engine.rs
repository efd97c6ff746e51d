use std::collections::HashSet;

use crate::domain::id::FlowName;
use crate::domain::workload::WorkloadModel;
use crate::reliability::table::{column_label, HeaderIndex, HeaderRow, ReliabilityRow, ReliabilityTable};
use crate::schedule::instruction::InstructionDecoder;
use crate::schedule::table::ScheduleTable;

/// Replays a synthesized schedule through the state-update recurrence to
/// produce the full reliability table.
///
/// The update for every executed transmission is
/// `new_snk = (1 - M) * prev_snk + M * prev_src`, where the "previous" state
/// comes from the last committed row, or from the post-reset snapshot of the
/// working row for flows recycled at a period boundary. Reads always come
/// from an immutable snapshot; writes go to the working copy, which is
/// committed once per time slot.
pub struct ReliabilityPropagationEngine<'a, D: InstructionDecoder> {
    workload: &'a WorkloadModel,
    schedule: &'a ScheduleTable,
    decoder: D,
    min_packet_reception_rate: f64,
}

impl<'a, D: InstructionDecoder> ReliabilityPropagationEngine<'a, D> {
    pub fn new(workload: &'a WorkloadModel, schedule: &'a ScheduleTable, decoder: D, min_packet_reception_rate: f64) -> Self {
        ReliabilityPropagationEngine { workload, schedule, decoder, min_packet_reception_rate }
    }

    /// One `"flow:node"` label per (flow, node) pair, flows in priority
    /// order, nodes in chain order.
    pub fn create_header_row(&self) -> HeaderRow {
        let mut header_row = HeaderRow::new();
        for flow_name in self.workload.flow_names_in_priority_order() {
            for node_name in self.workload.get_nodes_in_flow(flow_name.as_str()) {
                header_row.push(column_label(flow_name.as_str(), node_name.as_str()));
            }
        }
        header_row
    }

    pub fn create_header_index(&self, header_row: &HeaderRow) -> HeaderIndex {
        HeaderIndex::from_header_row(header_row)
    }

    /// The state every flow has the instant it is released: probability 1.0
    /// at its source node, 0.0 everywhere else.
    pub fn build_dummy_row(&self, header_index: &HeaderIndex) -> ReliabilityRow {
        let mut dummy_row = vec![0.0; header_index.num_columns()];
        for flow_name in self.workload.flow_names_in_priority_order() {
            let nodes = self.workload.get_nodes_in_flow(flow_name.as_str());
            if let Some(source) = nodes.first() {
                let column = Self::column_for(header_index, flow_name.as_str(), source.as_str());
                dummy_row[column] = 1.0;
            }
        }
        dummy_row
    }

    /// The state-update recurrence for one executed transmission.
    pub fn next_sink_state(min_packet_reception_rate: f64, prev_snk_state: f64, prev_src_state: f64) -> f64 {
        (1.0 - min_packet_reception_rate) * prev_snk_state + min_packet_reception_rate * prev_src_state
    }

    /// Names of the flows whose period elapses at `time_slot`, in priority
    /// order. Row 0 is seeded from the dummy row instead of being treated as
    /// a boundary.
    pub fn flows_recycled_at(&self, time_slot: usize) -> Vec<FlowName> {
        if time_slot == 0 {
            return Vec::new();
        }
        self.workload
            .flow_names_in_priority_order()
            .iter()
            .filter(|flow_name| {
                let period = self.workload.get_flow_period(flow_name.as_str());
                period > 0 && (time_slot as i64) % period == 0
            })
            .cloned()
            .collect()
    }

    /// Row 0: the dummy row with the schedule's first slot applied to it.
    pub fn create_first_row(&self, header_index: &HeaderIndex, dummy_row: &ReliabilityRow) -> ReliabilityRow {
        let mut first_row = dummy_row.clone();
        self.apply_slot(0, header_index, dummy_row, dummy_row, &HashSet::new(), &mut first_row);
        first_row
    }

    /// Replays the whole schedule and returns the completed table.
    pub fn build_reliability_table(&self) -> ReliabilityTable {
        let header_row = self.create_header_row();
        let header_index = self.create_header_index(&header_row);
        let dummy_row = self.build_dummy_row(&header_index);

        let mut table = ReliabilityTable::new();
        if self.schedule.num_rows() == 0 {
            log::warn!("Schedule for workload {} has no time slots; reliability table is empty.", self.workload.name);
            return table;
        }

        let mut committed_row = self.create_first_row(&header_index, &dummy_row);
        table.push(committed_row.clone());

        for time_slot in 1..self.schedule.num_rows() {
            let mut working_row = committed_row.clone();

            let recycled: HashSet<String> =
                self.flows_recycled_at(time_slot).into_iter().map(String::from).collect();
            for flow_name in &recycled {
                self.reset_flow_columns(flow_name, &header_index, &mut working_row);
            }
            // Recycled flows read from this post-reset snapshot so a reset
            // and the first push of the new period land in the same row.
            let reset_snapshot = working_row.clone();

            self.apply_slot(time_slot, &header_index, &committed_row, &reset_snapshot, &recycled, &mut working_row);

            table.push(working_row.clone());
            committed_row = working_row;
        }
        table
    }

    /// Decodes every cell of schedule row `time_slot` and applies each
    /// non-unused instruction entry to the working row.
    fn apply_slot(
        &self,
        time_slot: usize,
        header_index: &HeaderIndex,
        committed_row: &ReliabilityRow,
        reset_snapshot: &ReliabilityRow,
        recycled: &HashSet<String>,
        working_row: &mut ReliabilityRow,
    ) {
        for column in 0..self.schedule.num_columns() {
            let Some(cell) = self.schedule.get(time_slot, column) else {
                continue;
            };
            for entry in self.decoder.decode(cell) {
                if entry.is_unused() {
                    continue;
                }
                // Each instruction is resolved by its own (flow, node) keys;
                // physically overlapping node names in other flows are
                // unaffected.
                let src_column = Self::column_for(header_index, &entry.flow, &entry.src);
                let snk_column = Self::column_for(header_index, &entry.flow, &entry.snk);

                let basis = if recycled.contains(&entry.flow) { reset_snapshot } else { committed_row };
                working_row[snk_column] =
                    Self::next_sink_state(self.min_packet_reception_rate, basis[snk_column], basis[src_column]);
            }
        }
    }

    /// Reinitializes one flow's columns in the working row for its next
    /// period instance.
    fn reset_flow_columns(&self, flow_name: &str, header_index: &HeaderIndex, working_row: &mut ReliabilityRow) {
        let nodes = self.workload.get_nodes_in_flow(flow_name);
        for (chain_position, node_name) in nodes.iter().enumerate() {
            let column = Self::column_for(header_index, flow_name, node_name.as_str());
            working_row[column] = if chain_position == 0 { 1.0 } else { 0.0 };
        }
    }

    /// A (flow, node) pair absent from the header index means the schedule
    /// synthesizer and the workload disagree; mis-indexing would corrupt the
    /// whole column, so fail loudly instead.
    fn column_for(header_index: &HeaderIndex, flow_name: &str, node_name: &str) -> usize {
        let label = column_label(flow_name, node_name);
        header_index.column_of(&label).unwrap_or_else(|| {
            panic!("Schedule instruction references column {} which is not part of the workload", label)
        })
    }
}
