use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::schedule::instruction::{InstructionDecoder, InstructionKind, InstructionParameters};

lazy_static! {
    /// Reserved words of the instruction grammar. Node names may *contain*
    /// these as substrings ("pushC"); decoding is delimiter-driven, so such
    /// names never change how a cell is tokenized.
    static ref INSTRUCTION_KEYWORDS: HashSet<&'static str> =
        ["push", "pull", "wait", "sleep", "unused", "if", "has", "else"].into_iter().collect();
}

/// Decoder for the WARP schedule instruction grammar.
///
/// Supported cell forms:
/// - `sleep`, `wait(#c)`, `unused`, empty cell
/// - `push(F: X -> Y, #c)` / `pull(F: X -> Y, #c)`
/// - `if has(F) <statement> else <statement>` (one entry per alternative)
#[derive(Debug, Clone, Copy, Default)]
pub struct WarpDsl;

impl WarpDsl {
    pub fn new() -> Self {
        WarpDsl
    }

    fn decode_statement(&self, statement: &str) -> Vec<InstructionParameters> {
        let statement = statement.trim();
        if let Some(condition_tail) = statement.strip_prefix("if") {
            return self.decode_conditional(condition_tail.trim_start());
        }
        vec![self.decode_simple(statement)]
    }

    /// `has(F) <then-statement> else <else-statement>`; the analysis charges
    /// both execution paths, so both alternatives are returned.
    fn decode_conditional(&self, tail: &str) -> Vec<InstructionParameters> {
        let Some(guard_tail) = tail.strip_prefix("has").map(str::trim_start) else {
            log::warn!("Malformed conditional instruction: 'has' guard missing in '{}'", tail);
            return vec![InstructionParameters::unused(InstructionKind::Unused)];
        };
        let Some(guard_end) = guard_tail.find(')') else {
            log::warn!("Malformed conditional instruction: unterminated guard in '{}'", tail);
            return vec![InstructionParameters::unused(InstructionKind::Unused)];
        };
        let branches = guard_tail[guard_end + 1..].trim_start();

        // Node names are single identifiers, so a bare " else " only occurs
        // between the two branches.
        let mut entries = Vec::new();
        match branches.split_once(" else ") {
            Some((then_branch, else_branch)) => {
                entries.push(self.decode_simple(then_branch.trim()));
                entries.push(self.decode_simple(else_branch.trim()));
            }
            None => entries.push(self.decode_simple(branches)),
        }
        entries
    }

    fn decode_simple(&self, statement: &str) -> InstructionParameters {
        let statement = statement.trim();
        if statement.is_empty() || statement == "unused" {
            return InstructionParameters::unused(InstructionKind::Unused);
        }
        if statement == "sleep" {
            return InstructionParameters::unused(InstructionKind::Sleep);
        }
        if Self::is_call(statement, "wait") {
            return InstructionParameters::unused(InstructionKind::Wait);
        }
        if Self::is_call(statement, "push") {
            return self.decode_transmission(statement, InstructionKind::Push);
        }
        if Self::is_call(statement, "pull") {
            return self.decode_transmission(statement, InstructionKind::Pull);
        }

        let leading_word = statement.split(['(', ' ']).next().unwrap_or(statement);
        if !INSTRUCTION_KEYWORDS.contains(leading_word) {
            log::warn!("Unknown instruction '{}' treated as unused.", statement);
        }
        InstructionParameters::unused(InstructionKind::Unused)
    }

    /// `<keyword>(...)` with nothing but whitespace between keyword and
    /// parenthesis. `pushC(...)` is not a `push` call.
    fn is_call(statement: &str, keyword: &str) -> bool {
        statement.strip_prefix(keyword).is_some_and(|tail| tail.trim_start().starts_with('('))
    }

    /// Parses `push(F: X -> Y, #c)` / `pull(F: X -> Y, #c)` by its
    /// delimiters: the flow sits before ':', the hop around '->', and an
    /// optional ', #c' channel suffix is dropped.
    fn decode_transmission(&self, statement: &str, kind: InstructionKind) -> InstructionParameters {
        let inner = statement
            .find('(')
            .and_then(|open| statement.rfind(')').map(|close| &statement[open + 1..close]))
            .unwrap_or("");

        let Some((flow, hop)) = inner.split_once(':') else {
            log::warn!("Malformed transmission instruction '{}': missing flow separator.", statement);
            return InstructionParameters::unused(InstructionKind::Unused);
        };
        let hop = match hop.rsplit_once(',') {
            Some((hop, channel)) if channel.trim_start().starts_with('#') => hop,
            _ => hop,
        };
        let Some((src, snk)) = hop.split_once("->") else {
            log::warn!("Malformed transmission instruction '{}': missing hop separator.", statement);
            return InstructionParameters::unused(InstructionKind::Unused);
        };

        InstructionParameters::transmission(kind, flow.trim(), src.trim(), snk.trim())
    }
}

impl InstructionDecoder for WarpDsl {
    fn decode(&self, instruction: &str) -> Vec<InstructionParameters> {
        self.decode_statement(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Vec<InstructionParameters> {
        WarpDsl::new().decode(text)
    }

    #[test]
    fn decodes_push_with_channel() {
        let entries = decode("push(F0: A -> B, #1)");
        assert_eq!(entries, vec![InstructionParameters::transmission(InstructionKind::Push, "F0", "A", "B")]);
    }

    #[test]
    fn decodes_pull() {
        let entries = decode("pull(F1: C -> B, #5)");
        assert_eq!(entries, vec![InstructionParameters::transmission(InstructionKind::Pull, "F1", "C", "B")]);
    }

    #[test]
    fn sleep_wait_and_unused_are_no_ops() {
        assert!(decode("sleep")[0].is_unused());
        assert!(decode("wait(#2)")[0].is_unused());
        assert!(decode("unused")[0].is_unused());
        assert!(decode("")[0].is_unused());
    }

    #[test]
    fn conditional_yields_both_alternatives() {
        let entries = decode("if has(F1) push(F1: C -> D, #12) else pull(F5: B -> C, #12)");
        assert_eq!(
            entries,
            vec![
                InstructionParameters::transmission(InstructionKind::Push, "F1", "C", "D"),
                InstructionParameters::transmission(InstructionKind::Pull, "F5", "B", "C"),
            ]
        );
    }

    #[test]
    fn conditional_with_unused_alternative() {
        let entries = decode("if has(F0) push(F0: B -> C, #2) else wait(#2)");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], InstructionParameters::transmission(InstructionKind::Push, "F0", "B", "C"));
        assert!(entries[1].is_unused());
    }

    #[test]
    fn keyword_bearing_node_names_survive_decoding() {
        let entries = decode("push(F0: pushB -> pullC, #2)");
        assert_eq!(entries, vec![InstructionParameters::transmission(InstructionKind::Push, "F0", "pushB", "pullC")]);

        let entries = decode("push(F1: sleepA -> waitD, #3)");
        assert_eq!(entries, vec![InstructionParameters::transmission(InstructionKind::Push, "F1", "sleepA", "waitD")]);
    }

    #[test]
    fn node_name_starting_with_keyword_is_not_a_call() {
        // A malformed cell that starts with a node-like word decodes to
        // unused instead of being mistaken for a push.
        assert!(decode("pushC")[0].is_unused());
    }
}
