use ahash::{HashMap, HashMapExt};

/// Interns variable-length sequences of small integers, handing out dense
/// 32-bit tickets.
///
/// Identical content always returns the identical ticket. Tickets are
/// stable until [`SequenceLexicon::clear`], after which they may be
/// reissued for different content.
#[derive(Debug, Default)]
pub struct SequenceLexicon {
    /// All interned sequences, concatenated.
    values: Vec<i32>,
    /// Start offset of each sequence, plus a trailing total.
    begins: Vec<u32>,
    /// Sequence content to ticket.
    tickets: HashMap<Vec<i32>, i32>,
}

impl SequenceLexicon {
    /// Initializes an empty lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            begins: vec![0],
            tickets: HashMap::new(),
        }
    }

    /// Interns the given sequence, returning its ticket.
    pub fn add(&mut self, sequence: &[i32]) -> i32 {
        if let Some(&ticket) = self.tickets.get(sequence) {
            return ticket;
        }
        let ticket = self.len() as i32;
        self.values.extend_from_slice(sequence);
        self.begins.push(self.values.len() as u32);
        self.tickets.insert(sequence.to_vec(), ticket);
        ticket
    }

    /// The sequence interned under the given ticket.
    #[must_use]
    pub fn sequence(&self, ticket: i32) -> &[i32] {
        let i = ticket as usize;
        &self.values[self.begins[i] as usize..self.begins[i + 1] as usize]
    }

    /// The number of interned sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.begins.len() - 1
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all interned sequences and resets the ticket counter.
    pub fn clear(&mut self) {
        self.values.clear();
        self.begins.clear();
        self.begins.push(0);
        self.tickets.clear();
    }
}

// -----------------------------------------------------------------------------

/// Interns *sets* of non-negative 32-bit ids.
///
/// The encoding favors the overwhelmingly common cases: a singleton set is
/// represented by its own id (so no table entry is needed), a
/// multi-element set by the bitwise complement of a dense sequence ticket,
/// and the empty set by a reserved sentinel.
#[derive(Debug, Default)]
pub struct IdSetLexicon {
    lexicon: SequenceLexicon,
}

/// Ticket of the empty set.
pub(crate) const EMPTY_SET_ID: i32 = i32::MIN;

impl IdSetLexicon {
    /// Initializes an empty lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lexicon: SequenceLexicon::new(),
        }
    }

    /// The ticket of the empty set.
    #[must_use]
    pub const fn empty_set_id() -> i32 {
        EMPTY_SET_ID
    }

    /// Interns the given ids as a set (order and duplicates are ignored),
    /// returning its ticket.
    pub fn add(&mut self, ids: &[i32]) -> i32 {
        let mut set = ids.to_vec();
        set.sort_unstable();
        set.dedup();

        match set.as_slice() {
            [] => EMPTY_SET_ID,
            &[id] => {
                debug_assert!(id >= 0, "ids must be non-negative");
                id
            }
            _ => !self.lexicon.add(&set),
        }
    }

    /// The ticket for a single id.
    #[must_use]
    pub fn singleton(id: i32) -> i32 {
        debug_assert!(id >= 0);
        id
    }

    /// The ids of the set interned under the given ticket, sorted.
    #[must_use]
    pub fn id_set(&self, ticket: i32) -> Vec<i32> {
        if ticket >= 0 {
            vec![ticket]
        } else if ticket == EMPTY_SET_ID {
            Vec::new()
        } else {
            self.lexicon.sequence(!ticket).to_vec()
        }
    }

    /// Discards all interned sets and resets the ticket counters.
    pub fn clear(&mut self) {
        self.lexicon.clear();
    }
}

#[cfg(test)]
#[path = "./lexicon_tests.rs"]
mod tests;
