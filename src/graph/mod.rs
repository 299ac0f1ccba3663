//! Canonicalisation of directed edge multisets.
//!
//! A higher-level builder produces a flat list of directed edges between
//! numbered vertices, each carrying a set of input edge ids. The processor
//! merges, discards, or synthesizes edges according to a policy over
//! degeneracies, duplicates and sibling pairs, producing a deterministic
//! canonical graph.

mod lexicon;

pub use lexicon::{IdSetLexicon, SequenceLexicon};

use crate::error::GraphError;
use std::cmp::Ordering;

/// An edge between two numbered vertices.
pub type VertexEdge = (u32, u32);

/// Whether edges are directed, or whether each one also represents its
/// reverse.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum EdgeType {
    /// Each edge represents only itself.
    #[default]
    Directed,
    /// Each edge also stands for its reverse.
    Undirected,
}

/// Policy for degenerate edges (equal endpoints).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DegenerateEdges {
    /// Remove all degenerate edges.
    Discard,
    /// Remove degenerate edges at any vertex that also has non-degenerate
    /// incident edges.
    DiscardExcess,
    /// Keep degenerate edges.
    #[default]
    Keep,
}

/// Policy for multiple copies of the same directed edge.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DuplicateEdges {
    /// Collapse copies into one edge, merging their input id sets.
    Merge,
    /// Keep every copy.
    #[default]
    Keep,
}

/// Policy for pairs of edges that are reverses of each other.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum SiblingPairs {
    /// Remove matching pairs (cancelling opposite boundaries).
    Discard,
    /// Like `Discard`, but keep one representative of fully balanced
    /// classes.
    DiscardExcess,
    /// Keep sibling pairs.
    #[default]
    Keep,
    /// Fail unless every edge has a sibling.
    Require,
    /// Synthesize the missing siblings.
    Create,
}

/// The policy bundle consumed by [`GraphOptions::process_edges`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GraphOptions {
    /// Whether edges are directed.
    pub edge_type: EdgeType,
    /// Policy for degenerate edges.
    pub degenerate_edges: DegenerateEdges,
    /// Policy for duplicate edges.
    pub duplicate_edges: DuplicateEdges,
    /// Policy for sibling pairs.
    pub sibling_pairs: SiblingPairs,
}

/// The canonicalised edge list, with a parallel array of input-id-set
/// tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedEdges {
    /// The surviving (and synthesized) edges.
    pub edges: Vec<VertexEdge>,
    /// For each edge, the lexicon ticket of its input edge id set.
    pub input_id_sets: Vec<i32>,
}

impl GraphOptions {
    /// Canonicalises the given edges according to this policy bundle.
    ///
    /// `input_id_sets` carries one lexicon ticket per edge; whenever edges
    /// are collapsed their id sets are merged through `lexicon`.
    /// Synthesized edges (under [`SiblingPairs::Create`]) carry the empty
    /// set.
    ///
    /// The output is deterministic: ties between identical edges are
    /// broken by their original array position.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InconsistentDegenerateEdges`] when a degenerate
    ///   equivalence class has different outgoing and incoming
    ///   multiplicities.
    /// - [`GraphError::OddUndirectedDegenerate`] when undirected
    ///   degenerate edges fail to pair up under `Require`/`Create`.
    /// - [`GraphError::MissingSibling`] when `Require` finds an unpaired
    ///   edge.
    pub fn process_edges(
        &self,
        edges: Vec<VertexEdge>,
        input_id_sets: Vec<i32>,
        lexicon: &mut IdSetLexicon,
    ) -> Result<ProcessedEdges, GraphError> {
        debug_assert_eq!(edges.len(), input_id_sets.len());
        let mut processor = EdgeProcessor {
            options: *self,
            edges,
            input_ids: input_id_sets,
            lexicon,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            new_edges: Vec::new(),
            new_input_ids: Vec::new(),
        };
        processor.run()?;
        Ok(ProcessedEdges {
            edges: processor.new_edges,
            input_id_sets: processor.new_input_ids,
        })
    }
}

// -----------------------------------------------------------------------------

const fn reverse(edge: VertexEdge) -> VertexEdge {
    (edge.1, edge.0)
}

struct EdgeProcessor<'a> {
    options: GraphOptions,
    edges: Vec<VertexEdge>,
    input_ids: Vec<i32>,
    lexicon: &'a mut IdSetLexicon,

    /// Edge indexes sorted by edge, then by original position.
    out_edges: Vec<usize>,
    /// Edge indexes sorted by reversed edge, then by original position.
    in_edges: Vec<usize>,

    new_edges: Vec<VertexEdge>,
    new_input_ids: Vec<i32>,
}

impl EdgeProcessor<'_> {
    fn run(&mut self) -> Result<(), GraphError> {
        let num_edges = self.edges.len();
        if num_edges == 0 {
            return Ok(());
        }

        // Sort the outgoing and incoming views. The sort is made stable by
        // breaking ties with the original index, so that each undirected
        // edge becomes a sibling pair even among identical copies.
        self.out_edges = (0..num_edges).collect();
        self.in_edges = (0..num_edges).collect();
        let edges = &self.edges;
        self.out_edges.sort_unstable_by(|&a, &b| {
            stable_less(edges[a], edges[b], a, b)
        });
        self.in_edges.sort_unstable_by(|&a, &b| {
            stable_less(reverse(edges[a]), reverse(edges[b]), a, b)
        });
        self.new_edges.reserve(num_edges);
        self.new_input_ids.reserve(num_edges);

        // Merge join over the two views, one edge equivalence class at a
        // time.
        let mut out = 0;
        let mut inn = 0;
        while out < num_edges || inn < num_edges {
            let edge = match (
                self.out_edges.get(out).map(|&i| self.edges[i]),
                self.in_edges.get(inn).map(|&i| reverse(self.edges[i])),
            ) {
                (Some(o), Some(r)) => o.min(r),
                (Some(o), None) => o,
                (None, Some(r)) => r,
                (None, None) => unreachable!(),
            };

            let out_begin = out;
            let in_begin = inn;
            while out < num_edges && self.edges[self.out_edges[out]] == edge {
                out += 1;
            }
            while inn < num_edges
                && reverse(self.edges[self.in_edges[inn]]) == edge
            {
                inn += 1;
            }
            let n_out = out - out_begin;
            let n_in = inn - in_begin;

            if edge.0 == edge.1 {
                self.process_degenerate_class(
                    edge, out_begin, out, in_begin, inn, n_out, n_in,
                )?;
            } else {
                self.process_class(
                    edge, out_begin, out, n_out, n_in,
                )?;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn process_degenerate_class(
        &mut self,
        edge: VertexEdge,
        out_begin: usize,
        out_end: usize,
        in_begin: usize,
        in_end: usize,
        n_out: usize,
        n_in: usize,
    ) -> Result<(), GraphError> {
        // A degenerate edge is its own reverse, so the two views must
        // agree on the multiplicity.
        if n_out != n_in {
            return Err(GraphError::InconsistentDegenerateEdges);
        }

        match self.options.degenerate_edges {
            DegenerateEdges::Discard => return Ok(()),
            DegenerateEdges::DiscardExcess => {
                // Discard if any non-degenerate edge is incident to the
                // vertex; the four sorted neighbours of this class cover
                // all the candidates.
                let vertex = edge.0;
                let incident = (out_begin > 0
                    && self.edges[self.out_edges[out_begin - 1]].0 == vertex)
                    || (out_end < self.edges.len()
                        && self.edges[self.out_edges[out_end]].0 == vertex)
                    || (in_begin > 0
                        && self.edges[self.in_edges[in_begin - 1]].1 == vertex)
                    || (in_end < self.edges.len()
                        && self.edges[self.in_edges[in_end]].1 == vertex);
                if incident {
                    return Ok(());
                }
            }
            DegenerateEdges::Keep => {}
        }

        if self.options.edge_type == EdgeType::Undirected
            && matches!(
                self.options.sibling_pairs,
                SiblingPairs::Require | SiblingPairs::Create
            )
        {
            // Undirected degenerate edges must pair up, and each pair
            // yields one edge.
            if n_out & 1 != 0 {
                return Err(GraphError::OddUndirectedDegenerate);
            }
            let copies = if self.options.duplicate_edges == DuplicateEdges::Merge
            {
                1
            } else {
                n_out / 2
            };
            let ids = self.merge_input_ids(out_begin, out_end);
            self.add_edges(copies, edge, ids);
        } else if self.options.duplicate_edges == DuplicateEdges::Merge {
            let ids = self.merge_input_ids(out_begin, out_end);
            self.add_edge(edge, ids);
        } else if matches!(
            self.options.sibling_pairs,
            SiblingPairs::Discard | SiblingPairs::DiscardExcess
        ) {
            // Any sibling option that discards edges merges the labels of
            // all duplicates.
            let ids = self.merge_input_ids(out_begin, out_end);
            self.add_edges(n_out, edge, ids);
        } else {
            self.copy_edges(out_begin, out_end);
        }
        Ok(())
    }

    fn process_class(
        &mut self,
        edge: VertexEdge,
        out_begin: usize,
        out_end: usize,
        n_out: usize,
        n_in: usize,
    ) -> Result<(), GraphError> {
        match self.options.sibling_pairs {
            SiblingPairs::Keep => {
                if n_out > 1
                    && self.options.duplicate_edges == DuplicateEdges::Merge
                {
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edge(edge, ids);
                } else {
                    self.copy_edges(out_begin, out_end);
                }
            }
            SiblingPairs::Discard => {
                if self.options.edge_type == EdgeType::Directed {
                    // n_out == n_in: balanced sibling pairs, all cancel.
                    // n_out < n_in: unbalanced towards the reverse.
                    // n_out > n_in: this direction has the excess copies.
                    if n_out <= n_in {
                        return Ok(());
                    }
                    let copies = if self.options.duplicate_edges
                        == DuplicateEdges::Merge
                    {
                        1
                    } else {
                        n_out - n_in
                    };
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edges(copies, edge, ids);
                } else {
                    if n_out & 1 == 0 {
                        return Ok(());
                    }
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edge(edge, ids);
                }
            }
            SiblingPairs::DiscardExcess => {
                if self.options.edge_type == EdgeType::Directed {
                    // As above, except fully balanced classes keep one
                    // representative pair.
                    if n_out < n_in {
                        return Ok(());
                    }
                    let copies = if self.options.duplicate_edges
                        == DuplicateEdges::Merge
                    {
                        1
                    } else {
                        (n_out - n_in).max(1)
                    };
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edges(copies, edge, ids);
                } else {
                    let copies = if n_out & 1 != 0 { 1 } else { 2 };
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edges(copies, edge, ids);
                }
            }
            SiblingPairs::Require | SiblingPairs::Create => {
                if self.options.sibling_pairs == SiblingPairs::Require
                    && (if self.options.edge_type == EdgeType::Directed {
                        n_out != n_in
                    } else {
                        n_out & 1 != 0
                    })
                {
                    return Err(GraphError::MissingSibling);
                }
                if self.options.duplicate_edges == DuplicateEdges::Merge {
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edge(edge, ids);
                } else if self.options.edge_type == EdgeType::Undirected {
                    // The output switches to directed edges: each sibling
                    // pair yields one directed representative.
                    let ids = self.merge_input_ids(out_begin, out_end);
                    self.add_edges((n_out + 1) / 2, edge, ids);
                } else {
                    self.copy_edges(out_begin, out_end);
                    if n_in > n_out {
                        // Synthesized siblings carry no input edge ids.
                        self.add_edges(
                            n_in - n_out,
                            edge,
                            IdSetLexicon::empty_set_id(),
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, edge: VertexEdge, input_ids: i32) {
        self.new_edges.push(edge);
        self.new_input_ids.push(input_ids);
    }

    fn add_edges(&mut self, count: usize, edge: VertexEdge, input_ids: i32) {
        for _ in 0..count {
            self.add_edge(edge, input_ids);
        }
    }

    fn copy_edges(&mut self, out_begin: usize, out_end: usize) {
        for i in out_begin..out_end {
            let index = self.out_edges[i];
            self.add_edge(self.edges[index], self.input_ids[index]);
        }
    }

    /// The union of the input id sets of the given outgoing range.
    fn merge_input_ids(&mut self, out_begin: usize, out_end: usize) -> i32 {
        if out_end - out_begin == 1 {
            return self.input_ids[self.out_edges[out_begin]];
        }
        let mut ids = Vec::new();
        for i in out_begin..out_end {
            ids.extend(
                self.lexicon.id_set(self.input_ids[self.out_edges[i]]),
            );
        }
        self.lexicon.add(&ids)
    }
}

/// Lexicographic edge order with original positions as tie-breaker.
fn stable_less(
    a: VertexEdge,
    b: VertexEdge,
    ai: usize,
    bi: usize,
) -> Ordering {
    a.cmp(&b).then_with(|| ai.cmp(&bi))
}

#[cfg(test)]
#[path = "./graph_tests.rs"]
mod tests;
