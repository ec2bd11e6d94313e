//! Outline tree assembly.
//!
//! A heading becomes the child of the nearest preceding heading with a
//! strictly lower level. The walk keeps a stack of open headings and pops
//! every entry whose level is not lower than the incoming one. Nodes live in
//! an index-addressed arena while the shape is decided; nested nodes are
//! then materialized from the last heading backwards, so no step recurses.

use crate::model::{Heading, HeadingNode};

/// Build the outline forest from headings in reading order.
///
/// The order of the input is preserved: siblings appear in input order and
/// a pre-order traversal of the result yields the input again.
pub fn build_tree(headings: &[Heading]) -> Vec<HeadingNode> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); headings.len()];
    let mut roots = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for (index, heading) in headings.iter().enumerate() {
        while let Some(&top) = open.last() {
            if headings[top].level >= heading.level {
                open.pop();
            } else {
                break;
            }
        }

        match open.last() {
            Some(&parent) => children[parent].push(index),
            None => roots.push(index),
        }
        open.push(index);
    }

    // Children always come after their parent, so building in reverse sees
    // every child before the node that owns it.
    let mut built: Vec<Option<HeadingNode>> = (0..headings.len()).map(|_| None).collect();
    for index in (0..headings.len()).rev() {
        let mut node = HeadingNode::from(&headings[index]);
        node.children = children[index]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(node);
    }

    roots
        .into_iter()
        .filter_map(|root| built[root].take())
        .collect()
}

/// Pre-order traversal with the depth of each node (roots at depth 0).
pub fn depth_first(nodes: &[HeadingNode]) -> Vec<(usize, &HeadingNode)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &HeadingNode)> = nodes.iter().rev().map(|n| (0, n)).collect();

    while let Some((depth, node)) = stack.pop() {
        out.push((depth, node));
        stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
    }
    out
}

/// Flatten the tree back into reading-order heading records.
pub fn flatten(nodes: &[HeadingNode]) -> Vec<Heading> {
    depth_first(nodes)
        .into_iter()
        .map(|(_, node)| node.to_heading())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(levels: &[u32]) -> Vec<Heading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Heading {
                id: i,
                page: 1,
                top: i as f32 * 10.0,
                level,
                font_size: 12.0,
                text: format!("h{}", i),
                content_html: Some(String::new()),
            })
            .collect()
    }

    fn shape(nodes: &[HeadingNode]) -> String {
        depth_first(nodes)
            .iter()
            .map(|(depth, n)| format!("{}{}", "  ".repeat(*depth), n.id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn check_containment(nodes: &[HeadingNode]) {
        for (_, node) in depth_first(nodes) {
            for child in &node.children {
                assert!(child.level > node.level, "{} under {}", child.level, node.level);
            }
        }
    }

    #[test]
    fn test_basic_nesting() {
        let tree = build_tree(&headings(&[1, 2, 3, 3, 2, 1, 2]));
        assert_eq!(tree.len(), 2);
        assert_eq!(shape(&tree), "0\n  1\n    2\n    3\n  4\n5\n  6");
    }

    #[test]
    fn test_skipped_levels_attach_directly() {
        let tree = build_tree(&headings(&[2, 4, 3, 4]));
        assert_eq!(shape(&tree), "0\n  1\n  2\n    3");
        check_containment(&tree);
    }

    #[test]
    fn test_leading_deep_heading_is_root() {
        let tree = build_tree(&headings(&[3, 1, 2]));
        assert_eq!(tree.len(), 2);
        assert_eq!(shape(&tree), "0\n1\n  2");
    }

    #[test]
    fn test_equal_levels_are_siblings() {
        let tree = build_tree(&headings(&[2, 2, 2]));
        assert_eq!(tree.len(), 3);
        assert!(tree.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_flatten_round_trip() {
        let sequences: [&[u32]; 4] = [
            &[1, 2, 3, 3, 2, 1, 2],
            &[2, 4, 3, 4, 1, 5, 5, 2],
            &[3, 2, 1],
            &[1, 1, 6, 2, 7, 3, 2, 9],
        ];
        for levels in sequences {
            let input = headings(levels);
            let tree = build_tree(&input);
            check_containment(&tree);

            let flat = flatten(&tree);
            assert_eq!(flat, input);
            assert_eq!(build_tree(&flat), tree);
        }
    }

    #[test]
    fn test_pseudo_random_sequences_hold_invariants() {
        let mut seed: u32 = 12345;
        for _ in 0..50 {
            let levels: Vec<u32> = (0..40)
                .map(|_| {
                    seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    (seed >> 16) % 6 + 1
                })
                .collect();
            let input = headings(&levels);
            let tree = build_tree(&input);
            check_containment(&tree);
            assert_eq!(flatten(&tree), input);
        }
    }

    #[test]
    fn test_deep_nesting_without_recursion() {
        let levels: Vec<u32> = (1..=2000).collect();
        let tree = build_tree(&headings(&levels));
        assert_eq!(tree.len(), 1);
        assert_eq!(depth_first(&tree).last().map(|(d, _)| *d), Some(1999));
    }

    #[test]
    fn test_tree_nodes_do_not_alias_flat_list() {
        let input = headings(&[1, 2]);
        let mut tree = build_tree(&input);
        tree[0].children[0].text = "changed".to_string();
        assert_eq!(input[1].text, "h1");
    }
}
