use bitvec::vec::BitVec;
use lasso::{Key, Rodeo, Spur};
use std::fmt;

/// Interned item name
pub type Label = Spur;

/// Growable bitset of labels used for per-cell avoid and next-to relations
///
/// Bits are indexed by the label's interned position, so sets from the same
/// grid can be compared and tested without touching any strings.
#[derive(Clone, Debug, Default)]
pub struct LabelSet {
    bits: BitVec,
}

impl LabelSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
        }
    }

    /// Insert a label, returning whether it was newly added
    pub fn insert(&mut self, label: Label) -> bool {
        let index = label.into_usize();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        let newly_added = !self.contains(label);
        self.bits.set(index, true);
        newly_added
    }

    /// Test label membership
    pub fn contains(&self, label: Label) -> bool {
        self.bits.get(label.into_usize()).as_deref() == Some(&true)
    }

    /// Remove every label
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Test if no labels are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count labels in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate labels in interning order
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.bits.iter_ones().filter_map(Label::try_from_usize)
    }
}

/// String interner shared by every cell of one grid
#[derive(Default)]
pub struct LabelTable {
    rodeo: Rodeo,
}

impl LabelTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its existing label when already known
    pub fn intern(&mut self, name: &str) -> Label {
        self.rodeo.get_or_intern(name)
    }

    /// Look up a name without interning it
    pub fn lookup(&self, name: &str) -> Option<Label> {
        self.rodeo.get(name)
    }

    /// Resolve a label back to its name
    ///
    /// Labels from another table resolve to an empty string.
    pub fn resolve(&self, label: Label) -> &str {
        self.rodeo.try_resolve(&label).unwrap_or_default()
    }

    /// Resolve every label of a set, in interning order
    pub fn resolve_set(&self, set: &LabelSet) -> Vec<String> {
        set.iter()
            .map(|label| self.resolve(label).to_string())
            .collect()
    }

    /// Number of distinct names interned
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Test if no names have been interned
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl fmt::Debug for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelTable")
            .field("len", &self.len())
            .finish()
    }
}
