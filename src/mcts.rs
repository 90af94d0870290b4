//! Monte Carlo Tree Search planner.
//!
//! The planner grows a tree of positions rooted at the state it is asked
//! to move from. Each cycle descends to an unexpanded node by UCT, expands
//! it through the move generator, rolls every fresh child out to a
//! terminal state, and credits the results back along the descent path.
//! When the wall-clock budget runs out, the root child with the best win
//! rate becomes the move.
//!
//! Nodes store no parent pointers. Descent records the path of child
//! indices it took, and backpropagation replays that path from the root.

use std::time::{Duration, Instant};

use crate::constants::UCT_C;
use crate::movegen::legal_moves;
use crate::playout::rollout;
use crate::position::{Color, Position};

/// A node in the search tree.
pub struct TreeNode {
    pub pos: Position,
    /// Times a backpropagation path ran through this node.
    pub visits: u32,
    /// Rollouts won by the side that moved into this node, i.e. the side
    /// to move at the parent.
    pub wins: u32,
    /// `None` until the node is expanded. Terminal nodes stay unexpanded.
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            visits: 0,
            wins: 0,
            children: None,
        }
    }

    /// Fraction of rollouts through this node won by the side that moved
    /// into it.
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins as f64 / self.visits as f64
        } else {
            0.0
        }
    }

    fn record(&mut self, winner: Color) {
        self.visits += 1;
        if self.pos.side_to_move() != winner {
            self.wins += 1;
        }
    }
}

fn uct(child: &TreeNode, parent_visits: u32) -> f64 {
    child.winrate() + (UCT_C * (parent_visits as f64).ln() / child.visits as f64).sqrt()
}

/// Index of the child to descend into. A child that has never been
/// simulated has no UCT score yet and is taken first; ties go to the
/// earliest child.
fn most_urgent(children: &[TreeNode], parent_visits: u32) -> usize {
    if let Some(idx) = children.iter().position(|c| c.visits == 0) {
        return idx;
    }
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (idx, child) in children.iter().enumerate() {
        let score = uct(child, parent_visits);
        if score > best_score {
            best = idx;
            best_score = score;
        }
    }
    best
}

/// Descend from the root to an unexpanded node and return the path of
/// child indices taken.
fn tree_descend(root: &TreeNode) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = root;
    while let Some(children) = &node.children {
        let idx = most_urgent(children, node.visits);
        path.push(idx);
        node = &children[idx];
    }
    path
}

fn node_at<'a>(root: &'a TreeNode, path: &[usize]) -> &'a TreeNode {
    path.iter().fold(root, |node, &idx| {
        &node.children.as_ref().expect("path descends expanded nodes")[idx]
    })
}

fn node_at_mut<'a>(root: &'a mut TreeNode, path: &[usize]) -> &'a mut TreeNode {
    path.iter().fold(root, |node, &idx| {
        &mut node.children.as_mut().expect("path descends expanded nodes")[idx]
    })
}

/// Credit a finished game to every node along `path`, root included.
fn tree_update(root: &mut TreeNode, path: &[usize], winner: Color) {
    let mut node = root;
    node.record(winner);
    for &idx in path {
        node = &mut node.children.as_mut().expect("path descends expanded nodes")[idx];
        node.record(winner);
    }
}

/// One selection / expansion / simulation / backpropagation cycle.
fn search_cycle(root: &mut TreeNode, rng: &mut fastrand::Rng) {
    let mut path = tree_descend(root);
    let leaf = node_at(root, &path);

    // A terminal leaf is never expanded; its outcome is already known.
    if let Some(winner) = leaf.pos.winner() {
        tree_update(root, &path, winner);
        return;
    }

    let moves = legal_moves(&leaf.pos);
    assert!(
        !moves.is_empty(),
        "move generator yielded no successors for a non-terminal position"
    );
    let count = moves.len();
    node_at_mut(root, &path).children = Some(moves.into_iter().map(TreeNode::new).collect());

    for idx in 0..count {
        path.push(idx);
        let winner = rollout(&node_at(root, &path).pos, rng);
        tree_update(root, &path, winner);
        path.pop();
    }
}

/// Index of the root child with the best win rate. Ties go to the
/// earliest child.
fn best_move(root: &TreeNode) -> usize {
    let children = root
        .children
        .as_ref()
        .expect("the root is expanded by the first search cycle");
    let mut best = 0;
    let mut best_rate = f64::NEG_INFINITY;
    for (idx, child) in children.iter().enumerate() {
        if child.winrate() > best_rate {
            best = idx;
            best_rate = child.winrate();
        }
    }
    best
}

/// Run search cycles under `budget` and return the index of the best root
/// child. The deadline is only checked between cycles; at least one full
/// cycle runs, so a zero budget still produces an answer.
pub fn tree_search(root: &mut TreeNode, budget: Duration, rng: &mut fastrand::Rng) -> usize {
    let deadline = Instant::now() + budget;
    loop {
        search_cycle(root, rng);
        if Instant::now() >= deadline {
            break;
        }
    }
    best_move(root)
}

/// Choose the next position to play from `pos` under a wall-clock budget.
pub fn plan(pos: &Position, budget: Duration) -> Position {
    plan_with_rng(pos, budget, &mut fastrand::Rng::new())
}

/// [`plan`] with a caller-supplied RNG, for reproducible searches.
pub fn plan_with_rng(pos: &Position, budget: Duration, rng: &mut fastrand::Rng) -> Position {
    assert!(!pos.is_over(), "planning from a finished game");
    let mut root = TreeNode::new(pos.clone());
    let best = tree_search(&mut root, budget, rng);
    let mut children = root
        .children
        .expect("the root is expanded by the first search cycle");
    children.swap_remove(best).pos
}
