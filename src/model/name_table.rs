//! Name table module for node labels of a parsed tree.
//!
//! - [NameTable]: Append-only storage of node names, addressed by [NameIndex].

use std::fmt;

/// Index of a name in a [NameTable]; `0` is reserved for "no name".
pub type NameIndex = usize;

/// The reserved [NameIndex] of unnamed nodes.
pub const NO_NAME: NameIndex = 0;

// =#========================================================================#=
// NAME TABLE
// =#========================================================================#=
/// Maps sequential indices to node names.
///
/// The table is built once while parsing and is read-only afterwards.
/// Slot `0` always holds the empty string, so an unnamed node can carry
/// [NO_NAME] and still be looked up. Every accepted name gets its own slot,
/// even if the same name occurred earlier; the table never deduplicates.
///
/// # Example
/// ```
/// use cladeview::model::NameTable;
///
/// let mut names = NameTable::with_capacity(3);
///
/// let kea = names.intern("Nestor notabilis");    // 1
/// let kaka = names.intern("Nestor meridionalis"); // 2
/// let none = names.intern("");                    // 0, nothing stored
///
/// assert_eq!(kea, 1);
/// assert_eq!(kaka, 2);
/// assert_eq!(none, 0);
/// assert_eq!(names.len(), 2);
/// assert_eq!(names.name(kea), Some("Nestor notabilis"));
/// assert_eq!(&names[0], "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable {
    /// Stored names; `names[0]` is the empty string
    names: Vec<String>,
}

impl NameTable {
    /// Creates an empty table (holding only the reserved slot).
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty table with room for `num_names` names.
    pub fn with_capacity(num_names: usize) -> Self {
        let mut names = Vec::with_capacity(num_names + 1);
        names.push(String::new());
        NameTable { names }
    }

    /// Appends `name` and returns its new index.
    ///
    /// An empty `name` is not stored and yields [NO_NAME].
    pub fn intern(&mut self, name: &str) -> NameIndex {
        if name.is_empty() {
            return NO_NAME;
        }

        self.names.push(name.to_string());
        self.names.len() - 1
    }

    /// Retrieves the name stored at `index`.
    ///
    /// # Returns
    /// `Some(&str)` if the index is valid (`Some("")` for [NO_NAME]), `None` otherwise
    pub fn name(&self, index: NameIndex) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns the first index holding `name`, if any.
    ///
    /// The empty string is never found, as it is not a name.
    pub fn index_of(&self, name: &str) -> Option<NameIndex> {
        if name.is_empty() {
            return None;
        }
        self.names.iter().position(|n| n == name)
    }

    /// Returns the number of interned names (the reserved slot not counted).
    pub fn len(&self) -> usize {
        self.names.len() - 1
    }

    /// Returns `true` if no name has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(index, name)` pairs of all interned names.
    pub fn iter(&self) -> impl Iterator<Item = (NameIndex, &str)> {
        self.names
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, name)| (index, name.as_str()))
    }

    /// Builds a lookup from name indices to positions in `names`.
    ///
    /// Entry `i` of the result is the position of the name with index `i`
    /// within `names`, or `None` if that name does not appear there.
    /// Useful to join tree leaves with rows of an external table
    /// that lists the same names in its own order.
    ///
    /// # Arguments
    /// * `names` - Names in the order of the external table
    ///
    /// # Example
    /// ```
    /// use cladeview::model::NameTable;
    ///
    /// let mut table = NameTable::new();
    /// let tui = table.intern("Tui");
    /// let kaka = table.intern("Kaka");
    ///
    /// let lookup = table.translation_lookup(&["Kaka", "Kokako"]);
    /// assert_eq!(lookup.len(), 3);
    /// assert_eq!(lookup[0], None);
    /// assert_eq!(lookup[tui], None);
    /// assert_eq!(lookup[kaka], Some(0));
    /// ```
    pub fn translation_lookup<S: AsRef<str>>(&self, names: &[S]) -> Vec<Option<usize>> {
        let mut lookup = vec![None; self.names.len()];
        for (position, name) in names.iter().enumerate() {
            if let Some(index) = self.last_index_of(name.as_ref()) {
                lookup[index] = Some(position);
            }
        }
        lookup
    }

    /// Last index holding `name`; a duplicated name maps to its latest slot.
    fn last_index_of(&self, name: &str) -> Option<NameIndex> {
        if name.is_empty() {
            return None;
        }
        self.names.iter().rposition(|n| n == name)
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "NameTable ({} names):", self.len())?;
        for (index, name) in self.iter() {
            writeln!(f, "  [{}] {}", index, name)?;
        }
        Ok(())
    }
}

impl std::ops::Index<NameIndex> for NameTable {
    type Output = str;

    fn index(&self, index: NameIndex) -> &Self::Output {
        &self.names[index]
    }
}
