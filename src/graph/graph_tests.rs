use super::*;
use crate::error::GraphError;

fn run(
    options: GraphOptions,
    edges: Vec<VertexEdge>,
    ids: Vec<i32>,
) -> Result<(ProcessedEdges, IdSetLexicon), GraphError> {
    let mut lexicon = IdSetLexicon::new();
    let processed = options.process_edges(edges, ids, &mut lexicon)?;
    Ok((processed, lexicon))
}

#[test]
fn merge_duplicates() {
    // Two copies of the same edge merge into one carrying both labels.
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Merge,
        sibling_pairs: SiblingPairs::Keep,
    };
    let (processed, lexicon) =
        run(options, vec![(1, 2), (1, 2)], vec![1, 2]).expect("no failure");

    assert_eq!(processed.edges, vec![(1, 2)]);
    assert_eq!(processed.input_id_sets.len(), 1);
    assert_eq!(lexicon.id_set(processed.input_id_sets[0]), vec![1, 2]);
}

#[test]
fn require_siblings_fails_on_unpaired_undirected() {
    // Each undirected edge needs its own sibling; one copy per direction
    // is not enough.
    let options = GraphOptions {
        edge_type: EdgeType::Undirected,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Require,
    };
    let result = run(options, vec![(1, 2), (2, 1)], vec![1, 2]);

    assert_eq!(result.unwrap_err(), GraphError::MissingSibling);
}

#[test]
fn require_siblings_accepts_matched_directed() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Require,
    };
    let (processed, _) =
        run(options, vec![(1, 2), (2, 1)], vec![1, 2]).expect("paired");

    assert_eq!(processed.edges, vec![(1, 2), (2, 1)]);
}

#[test]
fn require_siblings_fails_directed_imbalance() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Require,
    };
    let result = run(options, vec![(1, 2), (1, 2), (2, 1)], vec![1, 2, 3]);

    assert_eq!(result.unwrap_err(), GraphError::MissingSibling);
}

#[test]
fn discard_siblings_directed() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Discard,
    };

    // Balanced pairs cancel entirely.
    let (processed, _) =
        run(options, vec![(1, 2), (2, 1)], vec![1, 2]).expect("ok");
    assert!(processed.edges.is_empty());

    // Excess copies in one direction survive.
    let (processed, _) =
        run(options, vec![(1, 2), (1, 2), (2, 1)], vec![1, 2, 3]).expect("ok");
    assert_eq!(processed.edges, vec![(1, 2)]);
}

#[test]
fn discard_siblings_undirected_is_parity() {
    let options = GraphOptions {
        edge_type: EdgeType::Undirected,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Discard,
    };

    let (processed, _) = run(
        options,
        vec![(1, 2), (1, 2), (1, 2)],
        vec![1, 2, 3],
    )
    .expect("ok");
    assert_eq!(processed.edges, vec![(1, 2)], "odd count keeps one");

    let (processed, _) =
        run(options, vec![(1, 2), (1, 2)], vec![1, 2]).expect("ok");
    assert!(processed.edges.is_empty(), "even count cancels");
}

#[test]
fn discard_excess_keeps_one_balanced_pair() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::DiscardExcess,
    };

    // A fully balanced class keeps one pair instead of cancelling.
    let (processed, _) =
        run(options, vec![(1, 2), (2, 1)], vec![1, 2]).expect("ok");
    assert_eq!(processed.edges, vec![(1, 2), (2, 1)]);

    // With an excess, only the excess direction survives; the deficit
    // direction is fully absorbed by its siblings.
    let (processed, _) = run(
        options,
        vec![(1, 2), (1, 2), (2, 1)],
        vec![1, 2, 3],
    )
    .expect("ok");
    assert_eq!(processed.edges, vec![(1, 2)]);
}

#[test]
fn create_synthesizes_missing_siblings() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Create,
    };
    let (processed, lexicon) =
        run(options, vec![(1, 2)], vec![7]).expect("ok");

    assert_eq!(processed.edges, vec![(1, 2), (2, 1)]);
    assert_eq!(lexicon.id_set(processed.input_id_sets[0]), vec![7]);
    assert!(
        lexicon.id_set(processed.input_id_sets[1]).is_empty(),
        "synthesized edges carry the empty label set"
    );
}

#[test]
fn degenerate_discard() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Discard,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Keep,
    };
    let (processed, _) = run(
        options,
        vec![(3, 3), (1, 2), (3, 3)],
        vec![1, 2, 3],
    )
    .expect("ok");

    assert_eq!(processed.edges, vec![(1, 2)]);
}

#[test]
fn degenerate_discard_excess_checks_incident_edges() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::DiscardExcess,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Keep,
    };

    // Vertex 1 has a real outgoing edge, so its degenerate edge goes.
    let (processed, _) =
        run(options, vec![(1, 1), (1, 2)], vec![1, 2]).expect("ok");
    assert_eq!(processed.edges, vec![(1, 2)]);

    // Vertex 3 is isolated, so its degenerate edge stays.
    let (processed, _) =
        run(options, vec![(3, 3), (1, 2)], vec![1, 2]).expect("ok");
    assert_eq!(processed.edges, vec![(1, 2), (3, 3)]);

    // An incoming real edge also counts.
    let (processed, _) =
        run(options, vec![(2, 2), (1, 2)], vec![1, 2]).expect("ok");
    assert_eq!(processed.edges, vec![(1, 2)]);
}

#[test]
fn deterministic_under_input_reordering() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Merge,
        sibling_pairs: SiblingPairs::Keep,
    };

    let (a, lex_a) = run(
        options,
        vec![(5, 6), (1, 2), (5, 6), (3, 4)],
        vec![0, 1, 2, 3],
    )
    .expect("ok");
    let (b, lex_b) = run(
        options,
        vec![(3, 4), (5, 6), (5, 6), (1, 2)],
        vec![3, 2, 0, 1],
    )
    .expect("ok");

    assert_eq!(a.edges, b.edges, "output order ignores input order");
    let sets_a: Vec<_> =
        a.input_id_sets.iter().map(|&s| lex_a.id_set(s)).collect();
    let sets_b: Vec<_> =
        b.input_id_sets.iter().map(|&s| lex_b.id_set(s)).collect();
    assert_eq!(sets_a, sets_b, "merged label sets match too");
}

#[test]
fn output_never_exceeds_input_plus_synthesized() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Create,
    };
    let input = vec![(1, 2), (2, 3), (3, 1), (2, 1)];
    let n = input.len();
    let (processed, _) =
        run(options, input, vec![0, 1, 2, 3]).expect("ok");

    // Create can add at most one sibling per unmatched edge.
    assert!(processed.edges.len() <= 2 * n);
    assert_eq!(processed.edges.len(), 6, "two unmatched edges got siblings");
}
