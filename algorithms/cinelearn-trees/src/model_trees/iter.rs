use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;
use cinelearn::Float;

/// Level-order (BFT) iterator of the nodes in a model tree, yielding every
/// node together with its depth below the root
pub struct NodeIter<'a, F> {
    queue: VecDeque<(usize, &'a TreeNode<F>)>,
}

impl<'a, F> NodeIter<'a, F> {
    pub(crate) fn new(root: &'a TreeNode<F>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((0, root));

        NodeIter { queue }
    }
}

impl<'a, F: Float> Iterator for NodeIter<'a, F> {
    type Item = (usize, &'a TreeNode<F>);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|(depth, node)| {
            if let TreeNode::Split(split) = node {
                split
                    .children()
                    .iter()
                    .filter_map(Option::as_ref)
                    .for_each(|child| self.queue.push_back((depth + 1, child)));
            }

            (depth, node)
        })
    }
}
