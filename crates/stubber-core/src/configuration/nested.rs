//! Dotted-path traversal over a single configuration store.

use std::borrow::Cow;

use super::node::{Branch, Node};
use crate::error::{ConfigError, Result};

/// Returns true when every segment of `path` resolves, including when the
/// final node is itself a branch. The empty path always resolves.
pub fn nested_has<S: AsRef<str>>(root: &Branch, path: &[S]) -> bool {
    path.is_empty() || lookup(root, path).is_some()
}

/// Resolve `path` against `root`.
///
/// The empty path yields the whole store. Walking into a leaf, or through a
/// missing key, yields `None`; it never errors.
pub fn nested_get<'a, S: AsRef<str>>(root: &'a Branch, path: &[S]) -> Option<Cow<'a, Node>> {
    if path.is_empty() {
        return Some(Cow::Owned(Node::Branch(root.clone())));
    }
    lookup(root, path).map(Cow::Borrowed)
}

/// Node at a non-empty `path`.
fn lookup<'a, S: AsRef<str>>(root: &'a Branch, path: &[S]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut current = root.get(key(first))?;
    for segment in rest {
        current = current.as_branch()?.get(key(segment))?;
    }
    Some(current)
}

/// Write `value` at `path`, creating an empty branch for every missing
/// intermediate segment. Any prior value at the final key is replaced.
///
/// Fails without touching the store when `path` is empty or runs through a
/// leaf.
pub fn nested_set<S: AsRef<str>>(root: &mut Branch, path: &[S], value: Node) -> Result<()> {
    check_writable(root, path)?;
    let Some((last, parents)) = path.split_last() else {
        return Err(invalid_path(path));
    };

    let mut current = root;
    for segment in parents {
        let next = current
            .entry(key(segment).to_string())
            .or_insert_with(|| Node::Branch(Branch::new()));
        current = match next {
            Node::Branch(branch) => branch,
            Node::Leaf(_) => return Err(conflict(path, key(segment))),
        };
    }

    current.insert(key(last).to_string(), value);
    Ok(())
}

/// Checks that [`nested_set`] would succeed on `root`.
pub fn check_writable<S: AsRef<str>>(root: &Branch, path: &[S]) -> Result<()> {
    let Some((_, parents)) = path.split_last() else {
        return Err(invalid_path(path));
    };
    match first_leaf_on_path(root, parents) {
        Some(segment) => Err(conflict(path, &segment)),
        None => Ok(()),
    }
}

fn invalid_path<S: AsRef<str>>(path: &[S]) -> ConfigError {
    ConfigError::InvalidPath {
        section: join_path(path),
    }
}

fn conflict<S: AsRef<str>>(path: &[S], segment: &str) -> ConfigError {
    ConfigError::PathConflict {
        section: join_path(path),
        segment: segment.to_string(),
    }
}

fn first_leaf_on_path<S: AsRef<str>>(root: &Branch, parents: &[S]) -> Option<String> {
    let mut current = root;
    for segment in parents {
        match current.get(key(segment)) {
            None => return None,
            Some(Node::Branch(branch)) => current = branch,
            Some(Node::Leaf(_)) => return Some(key(segment).to_string()),
        }
    }
    None
}

fn key<S: AsRef<str>>(segment: &S) -> &str {
    segment.as_ref()
}

pub(crate) fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(key)
        .collect::<Vec<&str>>()
        .join(".")
}
