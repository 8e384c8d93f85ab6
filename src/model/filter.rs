//! Trait for deciding which leaves survive parsing.

use std::collections::{BTreeSet, HashMap, HashSet};

// =#========================================================================#=
// LEAF FILTER (trait)
// =#========================================================================#=
/// Membership test applied to leaf names while parsing.
///
/// A [NewickParser](crate::newick::NewickParser) configured with a filter
/// keeps a leaf only if [accepts](Self::accepts) returns `true` for its
/// name. Internal vertices are never filtered, but a clade whose leaves are
/// all rejected ends up without children.
///
/// # Implementations
/// * [HashSet], [BTreeSet] and slices of names: plain membership
/// * `HashMap<String, bool>`: membership map, a name counts when its value is `true`
/// * [FnFilter]: any closure `Fn(&str) -> bool`
pub trait LeafFilter {
    /// Returns whether the leaf called `name` is kept.
    fn accepts(&self, name: &str) -> bool;
}

impl LeafFilter for HashSet<String> {
    fn accepts(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl LeafFilter for BTreeSet<String> {
    fn accepts(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl LeafFilter for HashMap<String, bool> {
    fn accepts(&self, name: &str) -> bool {
        self.get(name).copied().unwrap_or(false)
    }
}

impl LeafFilter for [&str] {
    fn accepts(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

impl LeafFilter for [String] {
    fn accepts(&self, name: &str) -> bool {
        self.iter().any(|n| n == name)
    }
}

impl LeafFilter for Vec<String> {
    fn accepts(&self, name: &str) -> bool {
        self.as_slice().accepts(name)
    }
}

impl<F: LeafFilter + ?Sized> LeafFilter for &F {
    fn accepts(&self, name: &str) -> bool {
        (**self).accepts(name)
    }
}

/// Adapter turning a closure into a [LeafFilter].
///
/// # Example
/// ```
/// use cladeview::model::{FnFilter, LeafFilter};
///
/// let moa_only = FnFilter(|name: &str| name.starts_with("Dinornis"));
/// assert!(moa_only.accepts("Dinornis robustus"));
/// assert!(!moa_only.accepts("Apteryx haastii"));
/// ```
pub struct FnFilter<F>(pub F);

impl<F: Fn(&str) -> bool> LeafFilter for FnFilter<F> {
    fn accepts(&self, name: &str) -> bool {
        (self.0)(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_map_needs_truthy_value() {
        let mut map = HashMap::new();
        map.insert("Kokako".to_string(), true);
        map.insert("Huia".to_string(), false);

        assert!(map.accepts("Kokako"));
        assert!(!map.accepts("Huia"));
        assert!(!map.accepts("Saddleback"));
    }

    #[test]
    fn test_slices_and_sets() {
        let names: &[&str] = &["Takahe", "Pukeko"];
        assert!(names.accepts("Takahe"));
        assert!(!names.accepts("Weka"));

        let set: BTreeSet<String> = ["Weka".to_string()].into_iter().collect();
        assert!(set.accepts("Weka"));
        assert!((&set).accepts("Weka"));
    }
}
