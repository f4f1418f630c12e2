mod common;

use memtree_arena::{ArenaConfig, MemSys};
use memtree_core::compare::i32_native;
use memtree_core::{ArenaError, Direction, TreeError};
use memtree_test_utils::{int, CountingArena, MockArena, RefusingArena};
use memtree_tree::{node, Tree, NODE_RECORD_SIZE};

use common::{collect_ints, height};

#[test]
fn sorted_input_degenerates_and_still_tears_down() {
    let n = 100_000;
    let config = ArenaConfig::new(n * (4 + NODE_RECORD_SIZE)).with_max_blocks(2 * n as u32);
    let mut arena = MemSys::new(config).unwrap();
    let mut tree = Tree::new(4);

    // Build the right spine directly: insertion would walk the whole spine
    // on every insert, which is quadratic.
    tree.insert(&mut arena, &i32_native, &int(0)).unwrap();
    let mut tail = tree.root().unwrap();
    for v in 1..n as i32 {
        tail = node::attach_child(&mut arena, tail, &int(v), Direction::GreaterOrEqual).unwrap();
    }
    assert_eq!(arena.available(), 0);

    let mut probe = int(n as i32 - 1);
    assert!(tree.search(&arena, &i32_native, &mut probe).unwrap());

    tree.destroy(&mut arena).unwrap();
    assert!(arena.stats().is_balanced());
    assert_eq!(arena.stats().frees, 2 * n as u64);
}

#[test]
fn sorted_inserts_form_a_list() {
    let mut arena = MemSys::default();
    let mut tree = Tree::new(4);
    for v in 0..64 {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }
    assert_eq!(height(&arena, tree.root()), 64);
    tree.destroy(&mut arena).unwrap();
}

#[test]
fn free_subtree_clears_only_its_slot() {
    let mut arena = CountingArena::new(MemSys::default());
    let mut tree = Tree::new(4);
    for v in [50, 25, 75, 10, 30] {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }
    let root = tree.root().unwrap();
    let mut left = node::child(&arena, root, Direction::Less).unwrap();
    assert_eq!(node::free_subtree(&mut arena, &mut left).unwrap(), 3);
    assert_eq!(left, None);
    assert_eq!(arena.frees(), 6);
    assert_eq!(arena.live_handles().len(), 4);
}

#[test]
fn detach_leaf_refuses_root_with_children() {
    let mut arena = CountingArena::new(MemSys::default());
    let mut tree = Tree::new(4);
    for v in [2, 1, 3] {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }
    let mut root = tree.root();
    let err = node::detach_leaf(&mut arena, &mut root).unwrap_err();
    assert_eq!(err, TreeError::NotALeaf { node: tree.root().unwrap() });
    assert_eq!(arena.frees(), 0);

    tree.destroy(&mut arena).unwrap();
    arena.assert_balanced();
}

#[test]
fn detach_leaves_bottom_up_matches_destroy() {
    let mut arena = CountingArena::new(MemSys::default());
    let mut tree = Tree::new(4);
    for v in [2, 1, 3] {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }
    let root = tree.root().unwrap();
    let mut l = node::child(&arena, root, Direction::Less).unwrap();
    let mut r = node::child(&arena, root, Direction::GreaterOrEqual).unwrap();
    node::detach_leaf(&mut arena, &mut l).unwrap();
    node::detach_leaf(&mut arena, &mut r).unwrap();
    assert_eq!(arena.frees(), 4);

    // The root record still names its freed children, so it is not a leaf
    // until the links are cleared.
    let mut record = memtree_tree::NodeRecord::load(&arena, root).unwrap();
    record.left = None;
    record.right = None;
    record.store(&mut arena, root).unwrap();
    let mut slot = Some(root);
    node::detach_leaf(&mut arena, &mut slot).unwrap();
    arena.assert_balanced();
}

#[test]
fn teardown_rewrites_each_parent_as_children_go() {
    let mut arena = CountingArena::new(MockArena::new());
    let mut tree = Tree::new(4);
    for v in [5, 3, 8, 1, 4] {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }
    let writes = arena.writes();
    tree.destroy(&mut arena).unwrap();
    // One parent-record write per non-root node.
    assert_eq!(arena.writes() - writes, 4);
    arena.assert_balanced();
}

#[test]
fn interrupted_clear_can_be_resumed() {
    let mut arena = RefusingArena::new(CountingArena::new(MockArena::new()), usize::MAX);
    let mut tree = Tree::new(4);
    for v in [5, 3, 8, 1, 4] {
        tree.insert(&mut arena, &i32_native, &int(v)).unwrap();
    }

    // Leaf 1 goes (node + payload), then the free of leaf 4 is refused.
    arena.set_free_budget(Some(2));
    let err = tree.clear(&mut arena).unwrap_err();
    assert!(matches!(err, TreeError::Arena(ArenaError::StaleHandle { .. })));
    assert!(!tree.is_empty());
    assert_eq!(collect_ints(&arena, tree.root()), vec![3, 4, 5, 8]);

    arena.set_free_budget(None);
    assert_eq!(tree.clear(&mut arena).unwrap(), 4);
    assert!(tree.is_empty());
    arena.inner().assert_balanced();
}
