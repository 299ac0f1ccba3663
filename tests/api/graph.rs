use s2o::{
    DegenerateEdges, DuplicateEdges, EdgeType, GraphOptions, IdSetLexicon,
    SequenceLexicon, SiblingPairs,
};

#[test]
fn duplicate_edges_merge_labels() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Merge,
        sibling_pairs: SiblingPairs::Keep,
    };
    let mut lexicon = IdSetLexicon::new();
    let processed = options
        .process_edges(vec![(1, 2), (1, 2)], vec![1, 2], &mut lexicon)
        .expect("no failure");

    assert_eq!(processed.edges, vec![(1, 2)]);
    assert_eq!(lexicon.id_set(processed.input_id_sets[0]), vec![1, 2]);
}

#[test]
fn require_siblings_reports_missing() {
    let options = GraphOptions {
        edge_type: EdgeType::Undirected,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Require,
    };
    let mut lexicon = IdSetLexicon::new();
    let result =
        options.process_edges(vec![(1, 2), (2, 1)], vec![1, 2], &mut lexicon);

    assert_eq!(result.unwrap_err(), s2o::error::GraphError::MissingSibling);
}

#[test]
fn create_fills_in_reverses() {
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Keep,
        sibling_pairs: SiblingPairs::Create,
    };
    let mut lexicon = IdSetLexicon::new();
    let processed = options
        .process_edges(vec![(4, 9)], vec![0], &mut lexicon)
        .expect("ok");

    assert_eq!(processed.edges, vec![(4, 9), (9, 4)]);
    assert!(
        lexicon.id_set(processed.input_id_sets[1]).is_empty(),
        "synthetic edges have no labels"
    );
}

#[test]
fn emitted_labels_cover_absorbed_inputs() {
    // Whatever collapses, the union of output label sets equals the union
    // of input labels of surviving classes.
    let options = GraphOptions {
        edge_type: EdgeType::Directed,
        degenerate_edges: DegenerateEdges::Keep,
        duplicate_edges: DuplicateEdges::Merge,
        sibling_pairs: SiblingPairs::Keep,
    };
    let mut lexicon = IdSetLexicon::new();
    let processed = options
        .process_edges(
            vec![(1, 2), (1, 2), (1, 2), (3, 4)],
            vec![10, 11, 12, 13],
            &mut lexicon,
        )
        .expect("ok");

    let mut labels: Vec<i32> = processed
        .input_id_sets
        .iter()
        .flat_map(|&s| lexicon.id_set(s))
        .collect();
    labels.sort_unstable();
    assert_eq!(labels, vec![10, 11, 12, 13]);
}

#[test]
fn lexicons_intern_stably() {
    let mut sequences = SequenceLexicon::new();
    let ticket = sequences.add(&[7, 8, 9]);
    assert_eq!(sequences.add(&[7, 8, 9]), ticket);
    assert_eq!(sequences.sequence(ticket), &[7, 8, 9]);

    let mut sets = IdSetLexicon::new();
    assert_eq!(sets.add(&[42]), 42, "singletons are their own ticket");
    let multi = sets.add(&[3, 1, 2]);
    assert!(multi < 0);
    assert_eq!(sets.id_set(multi), vec![1, 2, 3]);
}
