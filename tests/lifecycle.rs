mod common;

use rstest::{fixture, rstest};
use sapling::{attach, detach, Branch, WeakBranch};

use common::init_test_setup;

/// Eight branches laid out over five layers, returned in creation order.
///
/// ```text
/// layer0_0
/// ├── layer1_0
/// │   └── layer2_0
/// │       ├── layer3_0
/// │       └── layer3_1
/// │           ├── layer4_0
/// │           └── layer4_1
/// └── layer1_1
/// ```
#[fixture]
fn layers() -> Vec<Branch<String>> {
    init_test_setup();
    let names = [
        "layer0_0", "layer1_0", "layer1_1", "layer2_0", "layer3_0", "layer3_1", "layer4_0",
        "layer4_1",
    ];
    let b: Vec<_> = names.iter().map(|name| Branch::new(name.to_string())).collect();
    attach(&b[0], &b[1]);
    attach(&b[0], &b[2]);
    attach(&b[1], &b[3]);
    attach(&b[3], &b[4]);
    attach(&b[3], &b[5]);
    attach(&b[5], &b[6]);
    attach(&b[5], &b[7]);
    b
}

#[rstest]
fn root_keeps_every_descendant_alive(layers: Vec<Branch<String>>) {
    let observers: Vec<WeakBranch<String>> = layers.iter().map(Branch::downgrade).collect();
    let root = layers[0].clone();
    drop(layers);

    assert!(observers.iter().all(|x| !x.is_expired()));
    let names: Vec<String> = root.descendants().map(|x| x.value().clone()).collect();
    assert_eq!(names.len(), 8);
    assert_eq!(root.num_children(), 2);
    let deepest = observers[7].upgrade().expect("root still owns the whole tree");
    assert_eq!(deepest.depth(), 4);
    assert_eq!(deepest.root(), root);
}

#[rstest]
fn dropping_every_handle_destroys_the_tree(layers: Vec<Branch<String>>) {
    let cant_keep_alive = layers[7].downgrade();
    drop(layers);
    assert!(cant_keep_alive.is_expired());
}

#[rstest]
fn retained_subtree_survives_its_ancestors(layers: Vec<Branch<String>>) {
    let observers: Vec<WeakBranch<String>> = layers.iter().map(Branch::downgrade).collect();
    let can_keep_alive = layers[5].clone();
    drop(layers);

    // Includes layer3_0, the sibling of the retained branch, which went down with their parent
    for expired in &observers[..5] {
        assert!(expired.is_expired());
    }
    assert!(!observers[5].is_expired());
    assert!(!observers[6].is_expired());
    assert!(!observers[7].is_expired());

    assert_eq!(can_keep_alive.num_children(), 2);
    // With every ancestor gone, the retained branch is the root of a tree of its own
    assert!(can_keep_alive.is_root());
    assert!(can_keep_alive.parent().is_none());
    assert_eq!(can_keep_alive.subtree_size(), 3);
}

#[rstest]
fn detached_subtree_is_freed_with_the_last_handle(layers: Vec<Branch<String>>) {
    let root = layers[0].clone();
    let subtree = layers[1].clone();
    let subtree_observers: Vec<WeakBranch<String>> =
        subtree.descendants().map(|x| x.downgrade()).collect();
    let sibling = layers[2].downgrade();
    drop(layers);

    detach(&root, &subtree);
    assert!(subtree_observers.iter().all(|x| !x.is_expired()));
    drop(subtree);

    assert_eq!(subtree_observers.len(), 6);
    assert!(subtree_observers.iter().all(WeakBranch::is_expired));
    assert!(!sibling.is_expired());
    assert_eq!(root.num_children(), 1);
}

#[test]
fn detach_with_retained_handle_makes_a_new_tree() {
    init_test_setup();
    let root = Branch::new("R");
    let a = Branch::new("A");
    let b = Branch::new("B");
    attach(&root, &a);
    attach(&root, &b);
    assert_eq!(root.num_children(), 2);
    let order: Vec<&str> = root.children().iter().map(|x| *x.value()).collect();
    assert_eq!(order, ["A", "B"]);

    let g = Branch::new("G");
    attach(&a, &g);
    let weak_b = b.downgrade();
    let weak_dropped = {
        let dropped = Branch::new("D");
        attach(&g, &dropped);
        let weak = dropped.downgrade();
        detach(&g, &dropped);
        weak
    };
    drop(b);
    drop(g);

    detach(&root, &a);
    assert_eq!(root.num_children(), 1);
    assert!(a.is_root());
    assert_eq!(a.num_children(), 1);
    assert_eq!(*a.children()[0].value(), "G");
    assert!(!weak_b.is_expired());
    assert!(weak_dropped.is_expired());
}

#[test]
fn dropped_branch_is_released_by_its_parent() {
    init_test_setup();
    let parent = Branch::new(0_u64);
    let weak_child = {
        let child = Branch::new(1_u64);
        attach(&parent, &child);
        child.downgrade()
    };
    let child = weak_child.upgrade().expect("owned by parent");
    assert_eq!(child.parent(), Some(parent.clone()));
    detach(&parent, &child);
    drop(child);
    assert!(weak_child.is_expired());
    assert_eq!(parent.num_children(), 0);
}

/// Builds a chain of `len` branches valued `0..len` from the bottom up, returning the top and the bottom of it.
fn chain(len: u32) -> (Branch<u32>, Branch<u32>) {
    let bottom = Branch::new(len - 1);
    let mut top = bottom.clone();
    for value in (0..len - 1).rev() {
        let parent = Branch::new(value);
        attach(&parent, &top);
        top = parent;
    }
    (top, bottom)
}

#[test]
fn deep_chain_is_dropped_without_overflowing() {
    init_test_setup();
    let (top, bottom) = chain(100_000);
    let weak_bottom = bottom.downgrade();
    drop(bottom);
    assert_eq!(weak_bottom.upgrade().map(|x| x.depth()), Some(99_999));

    drop(top);
    assert!(weak_bottom.is_expired());
}

#[test]
fn deep_chain_keeps_retained_part() {
    init_test_setup();
    let (top, bottom) = chain(100_000);
    let middle = top
        .find(|x| *x == 50_000)
        .expect("the chain holds every value");
    let weak_top = top.downgrade();
    drop(top);

    assert!(weak_top.is_expired());
    assert!(middle.is_root());
    assert_eq!(middle.subtree_size(), 50_000);
    assert_eq!(bottom.root(), middle);

    drop(middle);
    assert!(bottom.is_root());
    assert_eq!(*bottom.value(), 99_999);
}
