use bimap::BiMap;

/// Ordered column labels of the reliability table, one `"flow:node"` label
/// per (flow, node) pair: priority-flow order first, chain order within a
/// flow.
pub type HeaderRow = Vec<String>;

/// Builds the canonical `"flow:node"` column label. Labels are constructed
/// structurally from the workload graph, never by re-tokenizing instruction
/// text, so node names containing instruction keywords stay intact.
pub fn column_label(flow_name: &str, node_name: &str) -> String {
    format!("{}:{}", flow_name, node_name)
}

/// Bidirectional label <-> column map over a `HeaderRow`.
///
/// The forward direction resolves instructions to columns; the reverse
/// direction lets reporting collaborators name a failing column.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: BiMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_header_row(header_row: &HeaderRow) -> Self {
        let mut columns = BiMap::new();
        for (column, label) in header_row.iter().enumerate() {
            columns.insert(label.clone(), column);
        }
        HeaderIndex { columns }
    }

    pub fn column_of(&self, label: &str) -> Option<usize> {
        self.columns.get_by_left(label).copied()
    }

    pub fn label_of(&self, column: usize) -> Option<&str> {
        self.columns.get_by_right(&column).map(String::as_str)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// One row of delivery probabilities, one entry per header column, each in
/// `[0.0, 1.0]`.
pub type ReliabilityRow = Vec<f64>;

/// The time x (flow, node) matrix of cumulative delivery probabilities.
///
/// Rows are appended as the schedule is replayed and never mutated once
/// committed; the completed table is immutable output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReliabilityTable {
    rows: Vec<ReliabilityRow>,
}

impl ReliabilityTable {
    pub fn new() -> Self {
        ReliabilityTable { rows: Vec::new() }
    }

    pub fn push(&mut self, row: ReliabilityRow) {
        self.rows.push(row);
    }

    pub fn get(&self, row: usize) -> Option<&ReliabilityRow> {
        self.rows.get(row)
    }

    pub fn first(&self) -> Option<&ReliabilityRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&ReliabilityRow> {
        self.rows.last()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[ReliabilityRow] {
        &self.rows
    }
}
