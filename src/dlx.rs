//! Sparse-matrix dancing links structure and Algorithm X search.
//!
//! [`DancingLinks`] owns a four-way linked incidence matrix for a
//! generalized exact cover problem (primary columns must be covered
//! exactly once, secondary columns at most once) and exposes a lazy,
//! pull-based [`Solutions`] iterator implementing Knuth's Algorithm X with
//! the minimum-remaining-column heuristic.
//!
//! All nodes live in one flat arena (`Vec<Node>`) addressed by index, so
//! `cover`/`uncover` never allocate: the "dancing" unlink/relink just
//! rewrites a handful of neighbor fields. Column headers double as nodes:
//! a header's `data` field holds its live column size, while a body node's
//! `data` field holds the index of its row's name in `row_names`.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use log::{debug, info, trace, warn};

use crate::error::SchemaResult;
use crate::util::{check_disjoint, check_distinct, check_subset};

/// Bound satisfied by any row or column identifier usable with
/// [`DancingLinks`].
pub trait Name: Clone + Eq + Hash + Debug + Display {}
impl<T: Clone + Eq + Hash + Debug + Display> Name for T {}

#[derive(Clone, Copy, Debug)]
struct Node {
    l: usize,
    r: usize,
    u: usize,
    d: usize,
    col: usize,
    data: usize,
}

const ROOT: usize = 0;

/// Generalized exact cover instance represented as a dancing-links sparse
/// matrix.
///
/// `R` identifies a row (a candidate to include in a cover); `C` identifies
/// a column (a primary or secondary constraint). Both must be distinct,
/// hashable, and renderable, matching the name contract used throughout the
/// puzzle reduction layer built on top of this type.
#[derive(Debug)]
pub struct DancingLinks<R: Name, C: Name> {
    nodes: Vec<Node>,
    row_names: Vec<R>,
    col_names: Vec<C>,
    num_primary: usize,
}

impl<R: Name, C: Name> DancingLinks<R, C> {
    /// Builds a new instance from a row-first sparse schema.
    ///
    /// `entries` maps each row name to the column names with a "1" in that
    /// row; rows with no entry are treated as empty. Duplicate names within
    /// `row_names`, `primary_cols`, or `secondary_cols`, overlap between
    /// `primary_cols` and `secondary_cols`, and references in `entries` to
    /// unknown rows or columns all fail with [`crate::error::SchemaError`].
    pub fn new(
        row_names: Vec<R>,
        primary_cols: Vec<C>,
        secondary_cols: Vec<C>,
        entries: HashMap<R, Vec<C>>,
    ) -> SchemaResult<Self> {
        Self::build(row_names, primary_cols, secondary_cols, entries)
            .inspect_err(|e| warn!("DancingLinks::new rejected schema: {e}"))
    }

    fn build(
        row_names: Vec<R>,
        primary_cols: Vec<C>,
        secondary_cols: Vec<C>,
        entries: HashMap<R, Vec<C>>,
    ) -> SchemaResult<Self> {
        check_distinct(&row_names)?;
        check_distinct(&primary_cols)?;
        check_distinct(&secondary_cols)?;
        check_disjoint(&primary_cols, &secondary_cols)?;

        let entry_rows: Vec<R> = entries.keys().cloned().collect();
        check_subset(&entry_rows, &row_names)?;

        let num_primary = primary_cols.len();
        let all_cols: Vec<C> = primary_cols
            .into_iter()
            .chain(secondary_cols)
            .collect();

        let entry_cols: Vec<C> = entries.values().flatten().cloned().collect();
        check_subset(&entry_cols, &all_cols)?;

        let num_cols = all_cols.len();
        let mut col_index: HashMap<C, usize> = HashMap::with_capacity(num_cols);
        for (i, name) in all_cols.iter().enumerate() {
            col_index.insert(name.clone(), i + 1);
        }

        let entry_count: usize = entries.values().map(Vec::len).sum();
        let mut nodes = Vec::with_capacity(1 + num_cols + entry_count);

        // Root sentinel. Its L/R thread the currently-uncovered primary
        // headers; U/D are unused.
        nodes.push(Node {
            l: ROOT,
            r: ROOT,
            u: ROOT,
            d: ROOT,
            col: ROOT,
            data: 0,
        });

        // Column headers, self-linked until threaded below. A header's own
        // `col` field points at itself, and `data` holds its running size.
        for i in 0..num_cols {
            let idx = i + 1;
            nodes.push(Node {
                l: idx,
                r: idx,
                u: idx,
                d: idx,
                col: idx,
                data: 0,
            });
        }

        // Thread only the primary headers into the root's horizontal list,
        // preserving input order. Secondary headers stay self-linked: they
        // are reachable only through entries in their own columns, never
        // through the root, so they can never be chosen by the search.
        for i in 0..num_primary {
            let idx = i + 1;
            let left = nodes[ROOT].l;
            nodes[left].r = idx;
            nodes[idx].l = left;
            nodes[idx].r = ROOT;
            nodes[ROOT].l = idx;
        }

        let mut final_row_names = Vec::with_capacity(row_names.len());
        for row_name in &row_names {
            let row_id = final_row_names.len();
            final_row_names.push(row_name.clone());

            let cols: &[C] = entries.get(row_name).map_or(&[], Vec::as_slice);
            let row_start = nodes.len();

            for col_name in cols {
                let header = col_index[col_name];
                let idx = nodes.len();
                let up = nodes[header].u;

                nodes.push(Node {
                    l: idx,
                    r: idx,
                    u: up,
                    d: header,
                    col: header,
                    data: row_id,
                });
                nodes[up].d = idx;
                nodes[header].u = idx;
                nodes[header].data += 1;
            }

            let row_end = nodes.len();
            let row_len = row_end - row_start;
            for (offset, idx) in (row_start..row_end).enumerate() {
                nodes[idx].l = row_start + (offset + row_len - 1) % row_len;
                nodes[idx].r = row_start + (offset + 1) % row_len;
            }
        }

        info!(
            "constructed exact cover matrix: {} rows, {} primary columns, {} secondary columns",
            final_row_names.len(),
            num_primary,
            num_cols - num_primary,
        );

        Ok(DancingLinks {
            nodes,
            row_names: final_row_names,
            col_names: all_cols,
            num_primary,
        })
    }

    fn is_root_empty(&self) -> bool {
        self.nodes[ROOT].r == ROOT
    }

    /// The primary column with the fewest live entries, breaking ties by
    /// leftmost position in the header list. Only ever called when the
    /// header list is non-empty.
    fn choose_column(&self) -> usize {
        let mut c = self.nodes[ROOT].r;
        let mut best = c;
        let mut best_size = usize::MAX;
        while c != ROOT {
            if self.nodes[c].data < best_size {
                best_size = self.nodes[c].data;
                best = c;
            }
            c = self.nodes[c].r;
        }
        best
    }

    fn cover(&mut self, c: usize) {
        trace!("cover {:?}", self.col_names[c - 1]);
        let header = self.nodes[c];
        self.nodes[header.l].r = header.r;
        self.nodes[header.r].l = header.l;

        let mut i = header.d;
        while i != c {
            let mut j = self.nodes[i].r;
            while j != i {
                let node = self.nodes[j];
                self.nodes[node.u].d = node.d;
                self.nodes[node.d].u = node.u;
                self.nodes[node.col].data -= 1;
                j = node.r;
            }
            i = self.nodes[i].d;
        }
    }

    fn uncover(&mut self, c: usize) {
        let mut i = self.nodes[c].u;
        while i != c {
            let mut j = self.nodes[i].l;
            while j != i {
                let node = self.nodes[j];
                self.nodes[node.col].data += 1;
                self.nodes[node.u].d = j;
                self.nodes[node.d].u = j;
                j = node.l;
            }
            i = self.nodes[i].u;
        }

        let header = self.nodes[c];
        self.nodes[header.l].r = c;
        self.nodes[header.r].l = c;
        trace!("uncover {:?}", self.col_names[c - 1]);
    }

    /// Returns a lazy, pull-based iterator over all exact covers of this
    /// instance, in the order defined by input row/column order and the
    /// minimum-column tie-breaking rule.
    ///
    /// Dropping the iterator before it is exhausted leaves the matrix back
    /// in its original, pristine state (see [`Solutions`]'s docs), so a
    /// fresh call to `solutions()` afterward is always safe.
    pub fn solutions(&mut self) -> Solutions<'_, R, C> {
        let trivial_solution = self.is_root_empty();
        debug!(
            "beginning search over {} rows, {} columns ({} primary)",
            self.row_names.len(),
            self.col_names.len(),
            self.num_primary,
        );
        Solutions {
            dlx: self,
            stack: Vec::new(),
            partial: Vec::new(),
            started: false,
            trivial_solution,
            yield_pending: false,
        }
    }
}

#[derive(Clone, Copy)]
struct Frame {
    col: usize,
    cur: usize,
}

/// Lazy enumeration of the exact covers of a [`DancingLinks`] instance.
///
/// This is an explicit, stack-based rendering of Knuth's recursive search:
/// each [`Frame`] records a chosen column and the row currently being
/// tried in it, standing in for one level of recursion. Advancing the
/// iterator resumes the search exactly where the last yield suspended it.
///
/// Dropping this iterator mid-enumeration runs the remaining uncover stack
/// to completion, so the matrix is never left in a half-covered state for
/// a subsequent `solutions()` call to stumble over.
pub struct Solutions<'a, R: Name, C: Name> {
    dlx: &'a mut DancingLinks<R, C>,
    stack: Vec<Frame>,
    partial: Vec<usize>,
    started: bool,
    trivial_solution: bool,
    yield_pending: bool,
}

impl<'a, R: Name, C: Name> Solutions<'a, R, C> {
    fn collect_solution(&self) -> Vec<R> {
        self.partial
            .iter()
            .map(|&node| self.dlx.row_names[self.dlx.nodes[node].data].clone())
            .collect()
    }

    fn cover_row_forward(&mut self, row_node: usize) {
        let mut j = self.dlx.nodes[row_node].r;
        while j != row_node {
            let col = self.dlx.nodes[j].col;
            self.dlx.cover(col);
            j = self.dlx.nodes[j].r;
        }
    }

    fn uncover_row_backward(&mut self, row_node: usize) {
        let mut j = self.dlx.nodes[row_node].l;
        while j != row_node {
            let col = self.dlx.nodes[j].col;
            self.dlx.uncover(col);
            j = self.dlx.nodes[j].l;
        }
    }

    /// Finishes exploring the row currently held at the top frame: uncovers
    /// its row-mates, pops it off the partial solution, and advances that
    /// frame to the next candidate row in its column.
    fn retreat_top_frame(&mut self) {
        let row_node = self
            .partial
            .pop()
            .expect("retreat_top_frame called with an empty partial solution");
        self.uncover_row_backward(row_node);
        let next = self.dlx.nodes[row_node].d;
        if let Some(frame) = self.stack.last_mut() {
            frame.cur = next;
        }
    }

    fn push_frame_at(&mut self, col: usize) {
        self.dlx.cover(col);
        let cur = self.dlx.nodes[col].d;
        self.stack.push(Frame { col, cur });
    }

    fn unwind_all(&mut self) {
        if self.yield_pending {
            self.retreat_top_frame();
            self.yield_pending = false;
        }
        while let Some(frame) = self.stack.pop() {
            self.dlx.uncover(frame.col);
            if !self.stack.is_empty() {
                self.retreat_top_frame();
            }
        }
    }
}

impl<'a, R: Name, C: Name> Iterator for Solutions<'a, R, C> {
    type Item = Vec<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            if self.trivial_solution {
                debug!("search found a solution with 0 rows");
                return Some(Vec::new());
            }
            if self.dlx.is_root_empty() {
                return None;
            }
            let col = self.dlx.choose_column();
            self.push_frame_at(col);
        } else if self.yield_pending {
            self.retreat_top_frame();
            self.yield_pending = false;
        }

        loop {
            let frame = match self.stack.last() {
                Some(frame) => *frame,
                None => return None,
            };

            if frame.cur == frame.col {
                self.dlx.uncover(frame.col);
                self.stack.pop();
                if self.stack.is_empty() {
                    return None;
                }
                self.retreat_top_frame();
                continue;
            }

            self.partial.push(frame.cur);
            self.cover_row_forward(frame.cur);

            if self.dlx.is_root_empty() {
                let solution = self.collect_solution();
                debug!("search found a solution with {} rows", solution.len());
                self.yield_pending = true;
                return Some(solution);
            }

            let col = self.dlx.choose_column();
            self.push_frame_at(col);
        }
    }
}

impl<'a, R: Name, C: Name> Drop for Solutions<'a, R, C> {
    fn drop(&mut self) {
        self.unwind_all();
    }
}

/// Builds a `DancingLinks<String, String>` from a dense 0/1 matrix, with an
/// optional secondary block. Rows default to their index as a string;
/// primary/secondary columns default to `"primary_{i}"`/`"secondary_{j}"`.
pub fn from_dense(
    primary: &[Vec<bool>],
    secondary: &[Vec<bool>],
    row_names: Option<Vec<String>>,
    col_names: Option<Vec<String>>,
    col_names_secondary: Option<Vec<String>>,
) -> SchemaResult<DancingLinks<String, String>> {
    let num_rows = primary.len();
    debug_assert_eq!(secondary.len(), num_rows, "primary/secondary row counts must match");

    let num_primary = primary.first().map_or(0, Vec::len);
    let num_secondary = secondary.first().map_or(0, Vec::len);

    let row_names = row_names.unwrap_or_else(|| (0..num_rows).map(|i| i.to_string()).collect());
    let primary_cols =
        col_names.unwrap_or_else(|| (0..num_primary).map(|i| format!("primary_{i}")).collect());
    let secondary_cols = col_names_secondary
        .unwrap_or_else(|| (0..num_secondary).map(|i| format!("secondary_{i}")).collect());

    let mut entries: HashMap<String, Vec<String>> = HashMap::with_capacity(num_rows);
    for (i, row_name) in row_names.iter().enumerate() {
        let mut cols = Vec::new();
        for (j, &bit) in primary[i].iter().enumerate() {
            if bit {
                cols.push(primary_cols[j].clone());
            }
        }
        for (j, &bit) in secondary[i].iter().enumerate() {
            if bit {
                cols.push(secondary_cols[j].clone());
            }
        }
        entries.insert(row_name.clone(), cols);
    }

    DancingLinks::new(row_names, primary_cols, secondary_cols, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn solutions_as_strings<R: Name, C: Name>(dlx: &mut DancingLinks<R, C>) -> BTreeSet<String> {
        dlx.solutions()
            .map(|rows| {
                let mut names: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
                names.sort();
                names.concat()
            })
            .collect()
    }

    fn knuth_schema() -> (Vec<&'static str>, Vec<i32>, HashMap<&'static str, Vec<i32>>) {
        let row_names = vec!["A", "B", "C", "D", "E", "F", "G"];
        let col_names: Vec<i32> = (0..7).collect();
        let mut entries = HashMap::new();
        entries.insert("A", vec![0, 3, 6]);
        entries.insert("B", vec![0, 3]);
        entries.insert("C", vec![3, 4, 6]);
        entries.insert("D", vec![2, 4, 5]);
        entries.insert("E", vec![1, 2, 5, 6]);
        entries.insert("F", vec![6]);
        entries.insert("G", vec![1]);
        (row_names, col_names, entries)
    }

    #[test]
    fn knuths_canonical_problem() {
        let (row_names, col_names, entries) = knuth_schema();
        let mut dlx = DancingLinks::new(row_names, col_names, vec![], entries).unwrap();

        let expected: BTreeSet<String> =
            ["ADG", "BDFG"].into_iter().copied().map(String::from).collect();
        assert_eq!(solutions_as_strings(&mut dlx), expected);
    }

    #[test]
    fn restarting_solutions_is_deterministic() {
        let (row_names, col_names, entries) = knuth_schema();
        let mut dlx = DancingLinks::new(row_names, col_names, vec![], entries).unwrap();

        let first: Vec<Vec<&str>> = dlx.solutions().collect();
        let second: Vec<Vec<&str>> = dlx.solutions().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn dropping_mid_enumeration_restores_pristine_state() {
        let (row_names, col_names, entries) = knuth_schema();
        let mut dlx = DancingLinks::new(row_names, col_names, vec![], entries).unwrap();

        {
            let mut iter = dlx.solutions();
            // Pull exactly one solution, then drop mid-enumeration.
            assert!(iter.next().is_some());
        }

        let expected: BTreeSet<String> =
            ["ADG", "BDFG"].into_iter().copied().map(String::from).collect();
        assert_eq!(solutions_as_strings(&mut dlx), expected);
    }

    #[test]
    fn secondary_columns_are_optional_and_at_most_once() {
        let row_names = vec!["A", "B", "C", "D", "E", "F", "G", "H"];
        let primary_cols = vec!["p0", "p1", "p2", "p3"];
        let secondary_cols = vec!["s0"];
        let mut entries = HashMap::new();
        entries.insert("A", vec!["p0", "p1"]);
        entries.insert("B", vec!["p2", "p3"]);
        entries.insert("C", vec!["p1", "p2"]);
        entries.insert("D", vec!["p0", "p3"]);
        entries.insert("E", vec!["p0", "p3", "s0"]);
        entries.insert("F", vec!["p0", "s0"]);
        entries.insert("G", vec!["p3", "s0"]);
        entries.insert("H", vec!["s0"]);

        let mut dlx = DancingLinks::new(row_names, primary_cols, secondary_cols, entries).unwrap();

        let expected: BTreeSet<String> =
            ["AB", "CD", "CE"].into_iter().copied().map(String::from).collect();
        assert_eq!(solutions_as_strings(&mut dlx), expected);
    }

    #[test]
    fn no_solution_is_an_empty_sequence_not_an_error() {
        let row_names = vec!["A"];
        let col_names = vec!["c0", "c1"];
        let mut entries = HashMap::new();
        entries.insert("A", vec!["c0"]);

        let mut dlx = DancingLinks::new(row_names, col_names, vec![], entries).unwrap();
        assert_eq!(dlx.solutions().count(), 0);
    }

    #[test]
    fn zero_columns_yields_one_empty_solution() {
        let dlx_result: SchemaResult<DancingLinks<&str, &str>> =
            DancingLinks::new(vec!["A"], vec![], vec![], HashMap::from([("A", vec![])]));
        let mut dlx = dlx_result.unwrap();
        let solutions: Vec<Vec<&str>> = dlx.solutions().collect();
        assert_eq!(solutions, vec![Vec::<&str>::new()]);
    }

    #[test]
    fn duplicate_row_name_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row", "row"],
            vec!["col1"],
            vec!["col2"],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected 1 count for 'row', found 2");
    }

    #[test]
    fn duplicate_primary_column_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1", "col1"],
            vec!["col2"],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected 1 count for 'col1', found 2");
    }

    #[test]
    fn duplicate_secondary_column_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1"],
            vec!["col2", "col2"],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected 1 count for 'col2', found 2");
    }

    #[test]
    fn overlapping_primary_and_secondary_columns_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1"],
            vec!["col1"],
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Overlapping elements found such as 'col1'");
    }

    #[test]
    fn entry_referencing_unknown_row_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1"],
            vec!["col2"],
            HashMap::from([("row1", vec!["col1"])]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Extra elements found such as 'row1'");
    }

    #[test]
    fn entry_referencing_unknown_column_is_a_schema_error() {
        let err = DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1"],
            vec!["col2"],
            HashMap::from([("row", vec!["col3"])]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Extra elements found such as 'col3'");
    }

    #[test]
    fn successful_construction() {
        DancingLinks::<&str, &str>::new(
            vec!["row"],
            vec!["col1"],
            vec!["col2"],
            HashMap::from([("row", vec!["col1"])]),
        )
        .unwrap();
    }

    #[test]
    fn from_dense_matches_sparse_construction() {
        let primary = vec![
            vec![true, false, false, true, false, false, true],
            vec![true, false, false, true, false, false, false],
            vec![false, false, false, true, true, false, true],
            vec![false, false, true, false, true, true, false],
            vec![false, true, true, false, false, true, true],
            vec![false, false, false, false, false, false, true],
            vec![false, true, false, false, false, false, false],
        ];
        let secondary = vec![vec![]; primary.len()];
        let row_names = vec!["A", "B", "C", "D", "E", "F", "G"]
            .into_iter()
            .map(String::from)
            .collect();

        let mut dlx = from_dense(&primary, &secondary, Some(row_names), None, None).unwrap();
        let expected: BTreeSet<String> =
            ["ADG", "BDFG"].into_iter().copied().map(String::from).collect();
        assert_eq!(solutions_as_strings(&mut dlx), expected);
    }

    #[test]
    fn from_dense_default_names() {
        let primary = vec![vec![true, false]];
        let secondary = vec![vec![false]];
        let dlx = from_dense(&primary, &secondary, None, None, None).unwrap();
        assert_eq!(dlx.row_names, vec!["0".to_string()]);
        assert_eq!(
            dlx.col_names,
            vec!["primary_0".to_string(), "primary_1".to_string(), "secondary_0".to_string()]
        );
    }
}
