//! Name-set validation shared by the cover matrix and the puzzle compiler.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::{SchemaError, SchemaResult};

/// Fails if any item in `items` appears more than once, naming the first
/// duplicate encountered.
pub(crate) fn check_distinct<T>(items: &[T]) -> SchemaResult<()>
where
    T: Eq + Hash + Display,
{
    let mut seen: HashSet<&T> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item) {
            let count = items.iter().filter(|other| *other == item).count();
            return Err(SchemaError::DuplicateName {
                name: item.to_string(),
                count,
            });
        }
    }
    Ok(())
}

/// Fails if `a` and `b` share any element, naming the first overlap found
/// (scanning `a` in order).
pub(crate) fn check_disjoint<T>(a: &[T], b: &[T]) -> SchemaResult<()>
where
    T: Eq + Hash + Display,
{
    let b_set: HashSet<&T> = b.iter().collect();
    for item in a {
        if b_set.contains(item) {
            return Err(SchemaError::Overlap {
                name: item.to_string(),
            });
        }
    }
    Ok(())
}

/// Fails if `subset` contains an element not present in `superset`, naming
/// the first such element (scanning `subset` in order).
///
/// Note the direction: this is `subset - superset`, not the other way
/// around. Getting it backwards silently accepts dangling references
/// instead of rejecting them.
pub(crate) fn check_subset<T>(subset: &[T], superset: &[T]) -> SchemaResult<()>
where
    T: Eq + Hash + Display,
{
    let superset_set: HashSet<&T> = superset.iter().collect();
    for item in subset {
        if !superset_set.contains(item) {
            return Err(SchemaError::UnknownElement {
                name: item.to_string(),
            });
        }
    }
    Ok(())
}
