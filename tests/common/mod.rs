#![allow(dead_code)]

use warp_reliability::api::workload_dto::{FlowDto, WorkloadDto};
use warp_reliability::config::RunConfig;
use warp_reliability::domain::workload::WorkloadModel;
use warp_reliability::reliability::budget::TransmissionBudgetCalculator;
use warp_reliability::schedule::table::ScheduleTable;

pub fn flow_dto(name: &str, priority: i64, period: i64, deadline: i64, nodes: &[&str]) -> FlowDto {
    FlowDto {
        name: name.to_string(),
        priority: Some(priority),
        period: Some(period),
        deadline: Some(deadline),
        phase: Some(0),
        nodes: nodes.iter().map(|node| node.to_string()).collect(),
    }
}

/// The Example4 workload: two flows over the shared chain A-B-C-D, one in
/// each direction, with periods 10 and 20.
pub fn example4_workload() -> WorkloadModel {
    let dto = WorkloadDto {
        name: "Example4".to_string(),
        flows: vec![
            flow_dto("F0", 0, 10, 10, &["A", "B", "C", "D"]),
            flow_dto("F1", 1, 20, 20, &["C", "B", "A"]),
        ],
    };
    WorkloadModel::from_dto(dto)
}

/// Example4 with every flow's transmission budget resolved for `config`.
pub fn finalized_example4(config: &RunConfig) -> WorkloadModel {
    let mut workload = example4_workload();
    let calculator = TransmissionBudgetCalculator::from_config(config);
    workload.finalize_flows(&calculator);
    workload
}

fn schedule(rows: Vec<[&str; 4]>) -> ScheduleTable {
    let rows = rows.into_iter().map(|cells| cells.into_iter().map(str::to_string).collect()).collect();
    ScheduleTable::new(rows).expect("fixture schedules are rectangular")
}

const ALL_SLEEP: [&str; 4] = ["sleep", "sleep", "sleep", "sleep"];

/// The 20-slot priority schedule for Example4 under the E2E policy
/// (budgets F0 = [3, 4, 3], F1 = [3, 3]). Columns are the physical nodes
/// A, B, C, D; transmissions appear in their source node's column with the
/// sink waiting, and F0's pipeline overlap is expressed with conditional
/// instructions.
pub fn example4_e2e_schedule() -> ScheduleTable {
    let mut rows = example4_e2e_period_rows();
    // F0 is re-released at slot 10; F1 (period 20) is not, so its slots in
    // the second half stay idle.
    rows.extend(example4_e2e_period_rows().into_iter().map(|row| {
        if row.iter().any(|cell| cell.contains("F1")) {
            ALL_SLEEP
        } else {
            row
        }
    }));
    schedule(rows)
}

fn example4_e2e_period_rows() -> Vec<[&'static str; 4]> {
    vec![
        ["push(F0: A -> B, #1)", "wait(#1)", "sleep", "sleep"],
        ["push(F0: A -> B, #2)", "if has(F0) push(F0: B -> C, #2) else wait(#2)", "wait(#2)", "sleep"],
        [
            "push(F0: A -> B, #3)",
            "if has(F0) push(F0: B -> C, #3) else wait(#3)",
            "if has(F0) push(F0: C -> D, #4) else wait(#4)",
            "wait(#4)",
        ],
        ["sleep", "push(F0: B -> C, #5)", "if has(F0) push(F0: C -> D, #6) else pull(F0: B -> C, #5)", "wait(#6)"],
        ["sleep", "push(F0: B -> C, #7)", "wait(#7)", "sleep"],
        ["sleep", "sleep", "push(F0: C -> D, #8)", "wait(#8)"],
        ["sleep", "wait(#9)", "push(F1: C -> B, #9)", "sleep"],
        ["wait(#10)", "if has(F1) push(F1: B -> A, #10) else wait(#11)", "push(F1: C -> B, #11)", "sleep"],
        ["wait(#12)", "if has(F1) push(F1: B -> A, #12) else wait(#13)", "push(F1: C -> B, #13)", "sleep"],
        ["wait(#14)", "push(F1: B -> A, #14)", "sleep", "sleep"],
    ]
}

/// The 20-slot priority schedule for Example4 under the fixed-fault policy
/// with one fault tolerated (2 transmissions per link).
pub fn example4_fixed_schedule() -> ScheduleTable {
    let period: Vec<[&str; 4]> = vec![
        ["push(F0: A -> B, #1)", "wait(#1)", "sleep", "sleep"],
        ["push(F0: A -> B, #2)", "if has(F0) push(F0: B -> C, #2) else wait(#2)", "wait(#2)", "sleep"],
        ["sleep", "push(F0: B -> C, #3)", "if has(F0) push(F0: C -> D, #4) else wait(#3)", "wait(#4)"],
        ["sleep", "sleep", "push(F0: C -> D, #5)", "wait(#5)"],
        ["sleep", "wait(#6)", "push(F1: C -> B, #6)", "sleep"],
        ["wait(#7)", "if has(F1) push(F1: B -> A, #7) else wait(#8)", "push(F1: C -> B, #8)", "sleep"],
        ["wait(#9)", "push(F1: B -> A, #9)", "sleep", "sleep"],
        ALL_SLEEP,
        ALL_SLEEP,
        ALL_SLEEP,
    ];
    let mut rows = period.clone();
    // Second F0 instance only; F1's period spans the whole schedule.
    rows.extend(period.into_iter().map(|row| {
        if row.iter().any(|cell| cell.contains("F1")) {
            ALL_SLEEP
        } else {
            row
        }
    }));
    schedule(rows)
}

/// Single-flow workload whose third node is literally named `pushC`.
pub fn keyword_node_workload() -> WorkloadModel {
    let dto = WorkloadDto {
        name: "ExampleCustomInput1".to_string(),
        flows: vec![flow_dto("F0", 0, 10, 10, &["A", "B", "pushC", "D"])],
    };
    WorkloadModel::from_dto(dto)
}

/// 10-slot schedule for `keyword_node_workload`, same shape as F0's slice of
/// the Example4 schedule.
pub fn keyword_node_schedule() -> ScheduleTable {
    let rows = vec![
        ["push(F0: A -> B, #1)", "wait(#1)", "sleep", "sleep"],
        ["push(F0: A -> B, #2)", "if has(F0) push(F0: B -> pushC, #2) else wait(#2)", "wait(#2)", "sleep"],
        [
            "push(F0: A -> B, #3)",
            "if has(F0) push(F0: B -> pushC, #3) else wait(#3)",
            "if has(F0) push(F0: pushC -> D, #4) else wait(#4)",
            "wait(#4)",
        ],
        ["sleep", "push(F0: B -> pushC, #5)", "if has(F0) push(F0: pushC -> D, #6) else pull(F0: B -> pushC, #5)", "wait(#6)"],
        ["sleep", "push(F0: B -> pushC, #7)", "wait(#7)", "sleep"],
        ["sleep", "sleep", "push(F0: pushC -> D, #8)", "wait(#8)"],
        ALL_SLEEP,
        ALL_SLEEP,
        ALL_SLEEP,
        ALL_SLEEP,
    ];
    schedule(rows)
}

/// Two flows whose node names are built from instruction keywords.
pub fn keyword_heavy_workload() -> WorkloadModel {
    let dto = WorkloadDto {
        name: "ExampleCustomInput2".to_string(),
        flows: vec![
            flow_dto("F0", 0, 10, 10, &["A", "B", "pushC", "D"]),
            flow_dto("F1", 1, 20, 20, &["pullC", "pushC", "A"]),
        ],
    };
    WorkloadModel::from_dto(dto)
}
