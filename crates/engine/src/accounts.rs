//! Account forest assembled from the flat list the backend returns.
//!
//! Every account carries only a reference to its parent. [`AccountTree::build`]
//! indexes the records, links each one under its parent and validates the
//! result, so the render layer always receives either a complete forest or an
//! [`IntegrityError`]. The tree is never patched: any create, update or delete
//! is followed by a full rebuild.

use std::fmt;

use serde::Serialize;

use crate::{error::IntegrityError, index::UniqueIndex};

/// Backend assigned account identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub parent_id: Option<AccountId>,
    pub name: String,
}

impl Account {
    pub fn new(id: i64, parent_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id: AccountId(id),
            parent_id: parent_id.map(AccountId),
            name: name.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl From<api_types::account::Account> for Account {
    fn from(value: api_types::account::Account) -> Self {
        let parent = value.parent();
        Self::new(value.account_id, parent, value.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    account: Account,
    children: Vec<usize>,
}

/// Owned nested view of a subtree, for renderers that want plain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountBranch {
    pub id: AccountId,
    pub name: String,
    pub children: Vec<AccountBranch>,
}

/// Validated account forest plus an id index.
///
/// Nodes keep the input order; children lists and the root list are ordered
/// by input position, which is the order accounts are rendered in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountTree {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    index: UniqueIndex<AccountId>,
}

impl AccountTree {
    pub fn build(accounts: Vec<Account>) -> Result<Self, IntegrityError> {
        let index = UniqueIndex::build(&accounts, |a| a.id)
            .map_err(IntegrityError::DuplicateAccount)?;

        let mut nodes: Vec<Node> = accounts
            .into_iter()
            .map(|account| Node {
                account,
                children: Vec::new(),
            })
            .collect();

        let mut roots = Vec::new();
        for pos in 0..nodes.len() {
            let Account { id, parent_id, .. } = nodes[pos].account;
            match parent_id {
                None => roots.push(pos),
                Some(parent) => {
                    let parent_pos = index
                        .position(&parent)
                        .ok_or(IntegrityError::DanglingParent {
                            account: id,
                            parent,
                        })?;
                    nodes[parent_pos].children.push(pos);
                }
            }
        }

        let tree = Self {
            nodes,
            roots,
            index,
        };
        tree.check_reachable()?;

        tracing::debug!(
            accounts = tree.nodes.len(),
            roots = tree.roots.len(),
            "account tree built"
        );
        Ok(tree)
    }

    /// With every parent resolved, a record unreachable from the roots can
    /// only sit on a parent cycle.
    fn check_reachable(&self) -> Result<(), IntegrityError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = self.roots.clone();
        while let Some(pos) = stack.pop() {
            if std::mem::replace(&mut seen[pos], true) {
                continue;
            }
            stack.extend(&self.nodes[pos].children);
        }

        let unreachable = self
            .nodes
            .iter()
            .zip(&seen)
            .filter(|(_, seen)| !**seen)
            .map(|(node, _)| node.account.id)
            .min();
        match unreachable {
            Some(id) => Err(IntegrityError::Cycle(id)),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.index.position(&id).map(|pos| &self.nodes[pos].account)
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.index.contains(&id)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Account> + '_ {
        self.roots.iter().map(|pos| &self.nodes[*pos].account)
    }

    /// Direct children of `id`, in input order. Empty for unknown ids.
    pub fn children(&self, id: AccountId) -> impl Iterator<Item = &Account> + '_ {
        self.index
            .position(&id)
            .map(|pos| self.nodes[pos].children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|pos| &self.nodes[*pos].account)
    }

    /// Depth-first, pre-order walk of the whole forest with each account's
    /// depth (roots are at depth 0).
    pub fn walk(&self) -> Vec<(usize, &Account)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|p| (0, *p)).collect();
        while let Some((depth, pos)) = stack.pop() {
            let node = &self.nodes[pos];
            out.push((depth, &node.account));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, *c)));
        }
        out
    }

    /// Path from the root down to `id`, inclusive. Empty for unknown ids.
    pub fn ancestors(&self, id: AccountId) -> Vec<&Account> {
        let mut path = Vec::new();
        let mut current = self.get(id);
        while let Some(account) = current {
            path.push(account);
            current = account.parent_id.and_then(|parent| self.get(parent));
        }
        path.reverse();
        path
    }

    /// Account name prefixed by its ancestors, e.g. `Expenses:Food:Groceries`.
    pub fn full_name(&self, id: AccountId, separator: &str) -> Option<String> {
        let path = self.ancestors(id);
        if path.is_empty() {
            return None;
        }
        Some(
            path.iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(separator),
        )
    }

    /// Every account below `id`. A parent picker editing `id` must offer
    /// none of these, nor `id` itself.
    pub fn descendants(&self, id: AccountId) -> Vec<AccountId> {
        let Some(start) = self.index.position(&id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[start].children.iter().rev().copied().collect();
        while let Some(pos) = stack.pop() {
            let node = &self.nodes[pos];
            out.push(node.account.id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Nested copy of the forest. Built bottom-up from a post-order so depth
    /// is bounded by the heap, not the call stack.
    pub fn to_branches(&self) -> Vec<AccountBranch> {
        let mut built: Vec<Option<AccountBranch>> = vec![None; self.nodes.len()];
        let mut stack: Vec<(usize, bool)> = self.roots.iter().rev().map(|p| (*p, false)).collect();
        while let Some((pos, expanded)) = stack.pop() {
            let node = &self.nodes[pos];
            if !expanded {
                stack.push((pos, true));
                stack.extend(node.children.iter().rev().map(|c| (*c, false)));
                continue;
            }
            let children = node
                .children
                .iter()
                .filter_map(|c| built[*c].take())
                .collect();
            built[pos] = Some(AccountBranch {
                id: node.account.id,
                name: node.account.name.clone(),
                children,
            });
        }
        self.roots.iter().filter_map(|pos| built[*pos].take()).collect()
    }
}
