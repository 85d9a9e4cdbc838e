use counted_bst::{Item, Tree};

use std::collections::{BTreeMap, HashSet};

use crate::{Letter, Op};

/// Applies a set of operations to a tree and a map of counts.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same occurrences in both.
fn do_ops(ops: &[Op], tree: &mut Tree<Item>, model: &mut BTreeMap<Item, usize>) {
    for op in ops {
        match op {
            Op::Insert(Letter(item)) => {
                let count = model.entry(*item).or_insert(0);
                *count += 1;
                // Only the first occurrence adds a node.
                assert_eq!(tree.insert(*item), *count == 1);
            }
            Op::Remove(Letter(item)) => {
                let present = match model.get_mut(item) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(item);
                        }
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.remove(item), present);
            }
            Op::Clear => {
                tree.make_empty();
                model.clear();
            }
        }
    }
}

fn render(model: &BTreeMap<Item, usize>) -> String {
    model
        .iter()
        .map(|(item, count)| format!("{} {}\n", item, count))
        .collect()
}

#[quickcheck]
fn fuzz_multiple_operations(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model);
    tree.to_string() == render(&model)
        && model
            .keys()
            .all(|item| tree.retrieve(item) == Some(item))
}

#[quickcheck]
fn contains_not(xs: Vec<Letter>, nots: Vec<Letter>) -> bool {
    let tree: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|Letter(item)| {
        tree.retrieve(item).is_none() && tree.depth(item).is_none() && tree.descendants(item).is_none()
    })
}

#[quickcheck]
fn insert_n_then_remove_n(letter: Letter, n: u8) -> bool {
    let Letter(item) = letter;
    let n = usize::from(n % 16) + 1;
    let mut tree = Tree::new();

    let first_added = tree.insert(item);
    let rest_added = (1..n).any(|_| tree.insert(item));
    let counted = tree.count(&item) == Some(n);

    let all_removed = (0..n).all(|_| tree.remove(&item));
    first_added && !rest_added && counted && all_removed && tree.is_empty() && !tree.remove(&item)
}

#[quickcheck]
fn root_depth_is_zero(xs: Vec<Letter>) -> bool {
    let tree: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();

    xs.first()
        .map_or(tree.is_empty(), |Letter(first)| tree.depth(first) == Some(0))
}

#[quickcheck]
fn root_descendants_count_every_other_node(xs: Vec<Letter>) -> bool {
    let tree: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();
    let distinct: HashSet<_> = xs.iter().collect();

    xs.first().map_or(true, |Letter(first)| {
        tree.descendants(first) == Some(distinct.len() - 1)
    })
}

#[quickcheck]
fn copies_are_equal_then_independent(xs: Vec<Letter>, ops: Vec<Op>) -> bool {
    let original: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();
    let twin: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();
    let before = original.to_string();

    let mut copy = original.clone();
    let equal = copy == original && twin == original;

    let mut model = BTreeMap::new();
    for Letter(item) in &xs {
        *model.entry(*item).or_insert(0) += 1;
    }
    do_ops(&ops, &mut copy, &mut model);

    equal && original.to_string() == before && original == twin
}

#[quickcheck]
fn differing_counts_are_unequal(xs: Vec<Letter>) -> bool {
    let tree: Tree<Item> = xs.iter().map(|Letter(item)| *item).collect();

    xs.first().map_or(true, |Letter(first)| {
        let mut bumped = tree.clone();
        bumped.insert(*first);
        bumped != tree
    })
}
