extern crate balanced_collections;
extern crate proptest;

use balanced_collections::avl_tree::AvlMap;
use balanced_collections::red_black_tree::RedBlackMap;
use balanced_collections::{Error, OrderedMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(key, val)| Op::Insert(key, val)),
        any::<u8>().prop_map(Op::Remove),
    ]
}

/// Drives a map through an operation sequence alongside `BTreeMap`, checking
/// result values, length, and in-order traversal after every step, and
/// running the structural audit supplied by the concrete map type.
fn run_against_model<M>(map: &mut M, ops: &[Op], audit: impl Fn(&M))
where
    M: OrderedMap<u8, u16>,
{
    let mut model = BTreeMap::new();
    for op in ops {
        match *op {
            Op::Insert(key, val) => {
                let expected = if model.contains_key(&key) {
                    Err(Error::DuplicateKey)
                } else {
                    model.insert(key, val);
                    Ok(())
                };
                assert_eq!(map.insert(key, val), expected);
            },
            Op::Remove(key) => {
                let expected = if model.is_empty() {
                    Err(Error::EmptyTree)
                } else if let Some(val) = model.remove(&key) {
                    Ok((key, val))
                } else {
                    Err(Error::NotFound)
                };
                assert_eq!(map.remove(&key), expected);
            },
        }
        audit(map);
        assert_eq!(map.len(), model.len());
        assert!(map
            .iter()
            .map(|(key, val)| (*key, *val))
            .eq(model.iter().map(|(key, val)| (*key, *val))));
        for (key, val) in &model {
            assert_eq!(map.get(key), Some(val));
        }
    }
}

/// Textbook height-balanced insertion used as a reference: the rotation case
/// is selected by the unbalanced ancestor's heavy child's balance factor.
/// Deliberately small, recursive, and boxed.
mod reference_avl {
    use std::cmp::{self, Ordering};

    pub struct Node {
        pub key: u8,
        pub val: u16,
        pub height: i32,
        pub left: Link,
        pub right: Link,
    }

    pub type Link = Option<Box<Node>>;

    fn height(link: &Link) -> i32 {
        link.as_ref().map_or(-1, |node| node.height)
    }

    fn balance_factor(node: &Node) -> i32 {
        height(&node.left) - height(&node.right)
    }

    fn update_height(node: &mut Node) {
        node.height = cmp::max(height(&node.left), height(&node.right)) + 1;
    }

    fn rotate_right(mut root: Box<Node>) -> Box<Node> {
        let mut pivot = root.left.take().expect("Expected a left child.");
        root.left = pivot.right.take();
        update_height(&mut root);
        pivot.right = Some(root);
        update_height(&mut pivot);
        pivot
    }

    fn rotate_left(mut root: Box<Node>) -> Box<Node> {
        let mut pivot = root.right.take().expect("Expected a right child.");
        root.right = pivot.left.take();
        update_height(&mut root);
        pivot.left = Some(root);
        update_height(&mut pivot);
        pivot
    }

    fn rebalance(mut node: Box<Node>) -> Box<Node> {
        update_height(&mut node);
        let factor = balance_factor(&node);
        if factor > 1 {
            if balance_factor(node.left.as_ref().expect("Expected a left child.")) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            rotate_right(node)
        } else if factor < -1 {
            if balance_factor(node.right.as_ref().expect("Expected a right child.")) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            rotate_left(node)
        } else {
            node
        }
    }

    /// Inserts a pair, leaving the tree unchanged on a duplicate key.
    pub fn insert(link: Link, key: u8, val: u16) -> Link {
        let mut node = match link {
            None => {
                return Some(Box::new(Node {
                    key,
                    val,
                    height: 0,
                    left: None,
                    right: None,
                }))
            },
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Less => node.left = insert(node.left.take(), key, val),
            Ordering::Greater => node.right = insert(node.right.take(), key, val),
            Ordering::Equal => return Some(node),
        }
        Some(rebalance(node))
    }

    pub fn preorder(link: &Link, out: &mut Vec<(u8, i32)>) {
        if let Some(node) = link {
            out.push((node.key, node.height));
            preorder(&node.left, out);
            preorder(&node.right, out);
        }
    }

    pub fn inorder(link: &Link, out: &mut Vec<(u8, u16)>) {
        if let Some(node) = link {
            inorder(&node.left, out);
            out.push((node.key, node.val));
            inorder(&node.right, out);
        }
    }
}

proptest! {
    #[test]
    fn avl_map_matches_model(ops in prop::collection::vec(op_strategy(), 1..256)) {
        let mut map = AvlMap::new();
        run_against_model(&mut map, &ops, AvlMap::assert_invariants);
    }

    #[test]
    fn red_black_map_matches_model(ops in prop::collection::vec(op_strategy(), 1..256)) {
        let mut map = RedBlackMap::new();
        run_against_model(&mut map, &ops, RedBlackMap::assert_invariants);
    }

    // the insertion walk selects its rotation case by comparing the inserted
    // key against the heavy child's key; the reference selects it by the
    // heavy child's balance factor. The two must produce identical trees
    // after every prefix of any insertion sequence
    #[test]
    fn avl_insert_matches_balance_factor_selection(
        entries in prop::collection::vec((any::<u8>(), any::<u16>()), 1..128),
    ) {
        let mut map = AvlMap::new();
        let mut reference = None;
        for &(key, val) in &entries {
            let _ = map.insert(key, val);
            reference = reference_avl::insert(reference, key, val);
            map.assert_invariants();

            let mut expected_shape = Vec::new();
            reference_avl::preorder(&reference, &mut expected_shape);
            let actual_shape = map
                .preorder_heights()
                .into_iter()
                .map(|(key, height)| (*key, height))
                .collect::<Vec<_>>();
            prop_assert_eq!(actual_shape, expected_shape);

            let mut expected_entries = Vec::new();
            reference_avl::inorder(&reference, &mut expected_entries);
            prop_assert!(map
                .iter()
                .map(|(key, val)| (*key, *val))
                .eq(expected_entries.into_iter()));
        }
    }

    // removing the root of any three-node tree must leave a valid two-node
    // tree containing exactly the other two keys, shortcut or not
    #[test]
    fn red_black_three_node_root_removal_is_sound(
        mut keys in prop::collection::btree_set(any::<u8>(), 3),
    ) {
        let sorted = keys.iter().cloned().collect::<Vec<_>>();
        let (low, mid, high) = (sorted[0], sorted[1], sorted[2]);

        let mut map = RedBlackMap::new();
        map.insert(mid, ()).unwrap();
        map.insert(low, ()).unwrap();
        map.insert(high, ()).unwrap();

        map.remove(&mid).unwrap();
        map.assert_invariants();
        prop_assert_eq!(map.len(), 2);
        prop_assert!(map.contains_key(&low));
        prop_assert!(map.contains_key(&high));
        // the shortcut promotes the smaller remaining key
        prop_assert_eq!(map.min(), Some(&low));
        keys.remove(&mid);
        prop_assert!(map.iter().map(|pair| *pair.0).eq(keys.iter().cloned()));
    }
}
