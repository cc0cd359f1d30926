//! Lookup helpers shared by the account tree and the report model.

use std::{collections::BTreeMap, collections::HashMap, hash::Hash};

/// Key → position map over a sequence of records.
///
/// Positions refer to the slice the index was built from, so the owner keeps
/// records and index side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniqueIndex<K: Eq + Hash> {
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash> Default for UniqueIndex<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy> UniqueIndex<K> {
    /// Indexes `items` by `key`. Fails with the first key seen twice.
    pub fn build<T>(items: &[T], key: impl Fn(&T) -> K) -> Result<Self, K> {
        let mut positions = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            let k = key(item);
            if positions.insert(k, pos).is_some() {
                return Err(k);
            }
        }
        Ok(Self { positions })
    }

    pub fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Walks a name-keyed nested map along `path`.
///
/// `children` projects a node onto its own child map. Returns the node at the
/// end of the path (`None` for an empty path, meaning the root level), or the
/// first path element that could not be found.
pub fn descend<'t, 'p, N, S>(
    roots: &'t BTreeMap<String, N>,
    path: &'p [S],
    children: impl Fn(&'t N) -> &'t BTreeMap<String, N>,
) -> Result<Option<&'t N>, &'p str>
where
    S: AsRef<str>,
{
    let mut level = roots;
    let mut node = None;
    for name in path {
        let name = name.as_ref();
        let next = level.get(name).ok_or(name)?;
        level = children(next);
        node = Some(next);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Node(BTreeMap<String, Node>);

    fn tree() -> BTreeMap<String, Node> {
        let mut food = Node::default();
        food.0.insert("Groceries".to_string(), Node::default());
        let mut roots = BTreeMap::new();
        roots.insert("Food".to_string(), food);
        roots.insert("Rent".to_string(), Node::default());
        roots
    }

    #[test]
    fn duplicate_key_reports_first_repeat() {
        let err = UniqueIndex::build(&[1, 2, 3, 2, 1], |v| *v).unwrap_err();
        assert_eq!(err, 2);
    }

    #[test]
    fn positions_follow_input() {
        let index = UniqueIndex::build(&[30, 10, 20], |v| *v).unwrap();
        assert_eq!(index.position(&10), Some(1));
        assert_eq!(index.position(&40), None);
        assert_eq!(index.len(), 3);
        assert!(index.contains(&20));
    }

    #[test]
    fn descend_empty_path_is_root_level() {
        let roots = tree();
        let path: [&str; 0] = [];
        assert!(descend(&roots, &path, |n| &n.0).unwrap().is_none());
    }

    #[test]
    fn descend_reports_missing_name() {
        let roots = tree();
        let found = descend(&roots, &["Food", "Groceries"], |n| &n.0).unwrap();
        assert!(found.is_some_and(|n| n.0.is_empty()));

        let missing = descend(&roots, &["Food", "Rent"], |n| &n.0).unwrap_err();
        assert_eq!(missing, "Rent");
    }
}
