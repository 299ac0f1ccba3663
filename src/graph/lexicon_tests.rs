use super::*;

#[test]
fn sequence_tickets_are_dense_and_stable() {
    let mut lexicon = SequenceLexicon::new();

    assert_eq!(lexicon.add(&[1, 2, 3]), 0);
    assert_eq!(lexicon.add(&[4]), 1);
    assert_eq!(lexicon.add(&[]), 2, "the empty sequence is a sequence too");
    assert_eq!(lexicon.add(&[1, 2, 3]), 0, "same content, same ticket");
    assert_eq!(lexicon.len(), 3);

    assert_eq!(lexicon.sequence(0), &[1, 2, 3]);
    assert_eq!(lexicon.sequence(1), &[4]);
    assert_eq!(lexicon.sequence(2), &[] as &[i32]);
}

#[test]
fn sequence_clear_resets_tickets() {
    let mut lexicon = SequenceLexicon::new();
    lexicon.add(&[5, 6]);
    lexicon.clear();

    assert!(lexicon.is_empty());
    assert_eq!(lexicon.add(&[7]), 0, "tickets restart after clear");
}

#[test]
fn id_set_singletons_are_their_own_ticket() {
    let mut lexicon = IdSetLexicon::new();

    assert_eq!(lexicon.add(&[5]), 5);
    assert_eq!(lexicon.add(&[0]), 0);
    assert_eq!(IdSetLexicon::singleton(12), 12);
    assert_eq!(lexicon.id_set(5), vec![5]);
}

#[test]
fn id_set_multi_element_sets() {
    let mut lexicon = IdSetLexicon::new();

    let ticket = lexicon.add(&[2, 1, 2]);
    assert!(ticket < 0, "non-singletons use complemented tickets");
    assert_eq!(lexicon.id_set(ticket), vec![1, 2], "sorted and deduped");

    assert_eq!(lexicon.add(&[1, 2]), ticket, "same set, same ticket");
    assert_ne!(lexicon.add(&[1, 3]), ticket);

    // Duplicates collapse to a singleton.
    assert_eq!(lexicon.add(&[7, 7, 7]), 7);
}

#[test]
fn id_set_empty() {
    let mut lexicon = IdSetLexicon::new();

    let empty = lexicon.add(&[]);
    assert_eq!(empty, IdSetLexicon::empty_set_id());
    assert!(lexicon.id_set(empty).is_empty());
}
