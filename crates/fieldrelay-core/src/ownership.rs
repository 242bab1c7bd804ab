use crate::node::{ElementHandle, Node, OwnerId};

/// Default number of parent hops walked before giving up.
pub const MAX_ANCESTOR_DEPTH: usize = 64;

/// Whether `node` or one of its ancestors belongs to `owner`.
///
/// Checks `node` itself and at most `max_depth` parents above it. A chain
/// that is longer than that (or loops back on itself) answers `false`.
pub fn is_owned_by(node: &Node, owner: &OwnerId, max_depth: usize) -> bool {
    let mut current = Some(node.clone());
    let mut hops = 0usize;
    while let Some(n) = current {
        if n.owner().as_ref() == Some(owner) {
            return true;
        }
        if hops == max_depth {
            log::debug!("is_owned_by: gave up after {hops} hops from {}", node.id());
            return false;
        }
        current = n.parent();
        hops += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeNode;
    use std::rc::Rc;

    fn chain(len: usize, owner_at: Option<usize>) -> (Rc<FakeNode>, Vec<Rc<FakeNode>>) {
        // nodes[0] is the leaf, nodes[len - 1] the top
        let nodes: Vec<Rc<FakeNode>> = (0..len)
            .map(|i| {
                let owner = if Some(i) == owner_at { "com.fieldrelay" } else { "com.example.app" };
                FakeNode::container(owner)
            })
            .collect();
        for pair in nodes.windows(2) {
            pair[0].set_parent(&pair[1]);
        }
        (nodes[0].clone(), nodes)
    }

    #[test]
    fn test_self_owned_leaf() {
        let (leaf, _keep) = chain(1, Some(0));
        let node: Node = leaf;
        assert!(is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }

    #[test]
    fn test_owned_ancestor_within_bound() {
        let (leaf, _keep) = chain(65, Some(64));
        let node: Node = leaf;
        assert!(is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }

    #[test]
    fn test_owned_ancestor_beyond_bound() {
        let (leaf, _keep) = chain(80, Some(70));
        let node: Node = leaf;
        assert!(!is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }

    #[test]
    fn test_foreign_chain() {
        let (leaf, _keep) = chain(5, None);
        let node: Node = leaf;
        assert!(!is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }

    #[test]
    fn test_cyclic_parent_chain_terminates() {
        let a = FakeNode::container("com.example.app");
        let b = FakeNode::container("com.example.app");
        a.set_parent(&b);
        b.set_parent(&a);
        let node: Node = a.clone();
        assert!(!is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }

    #[test]
    fn test_stale_ancestor_stops_walk() {
        let (leaf, nodes) = chain(3, Some(2));
        nodes[1].set_stale(true);
        let node: Node = leaf;
        assert!(!is_owned_by(&node, &OwnerId::from("com.fieldrelay"), MAX_ANCESTOR_DEPTH));
    }
}
