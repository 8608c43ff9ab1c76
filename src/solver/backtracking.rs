use crate::moves::Moves;
use crate::solver::node::SearchNode;
use crate::solver::Solution;

/// Follows `prev` links back to the initial state
pub(crate) fn backtrack_path(final_node: &SearchNode<'_>) -> Solution {
    let mut states = Vec::with_capacity(final_node.dist as usize + 1);
    let mut moves = Vec::with_capacity(final_node.dist as usize);

    let mut cur = Some(final_node);
    while let Some(node) = cur {
        states.push(node.state.clone());
        if let Some(mov) = node.prev_move {
            moves.push(mov);
        }
        cur = node.prev;
    }

    states.reverse();
    moves.reverse();
    Solution {
        states,
        moves: Moves::new(moves),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::{Dir, Pos};
    use crate::level::Level;
    use crate::moves::Move;

    #[test]
    fn backtracking() {
        let level: Level = r"
#######
#@$  .#
#######
"
        .parse()
        .unwrap();
        let root = SearchNode::root(level.initial_state());
        let first = Move::new(Pos::new(1, 2), Dir::Right);
        let node1 = root.child(first, root.state.apply(first));
        let second = Move::new(Pos::new(1, 3), Dir::Right);
        let node2 = node1.child(second, node1.state.apply(second));

        let solution = backtrack_path(&node2);
        assert_eq!(solution.states.len(), 3);
        assert_eq!(solution.states[0], level.initial_state());
        assert_eq!(solution.states[2].crates(), &[Pos::new(1, 4)]);
        assert_eq!(solution.moves.to_string(), "RR");

        let solution = backtrack_path(&root);
        assert_eq!(solution.states, vec![level.initial_state()]);
        assert!(solution.moves.is_empty());
    }
}
