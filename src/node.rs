use crate::error::{Result, SearchError};
use crate::state::{Player, State};
use ego_tree::{NodeId, Tree};
use std::collections::HashMap;

/// Represents a single explored position in the UCT search tree.
///
/// Each node stores a snapshot of the game state, the statistics of every rollout that
/// passed through it, and the actions that already have a child node.
#[derive(Debug, Clone)]
pub struct UctNode<S: State> {
    /// The game state that this node represents.
    pub state: S,
    /// The move that led to this node from its parent. `None` for the root node.
    pub action: Option<S::Action>,
    /// The player to move in `state`.
    pub current_player: Player,
    /// Expanded actions and the child node each one leads to.
    pub children: HashMap<S::Action, NodeId>,
    /// Number of rollouts that passed through this node.
    pub visits: u32,
    /// Sum of the (unflipped) rewards of those rollouts.
    pub total_reward: f64,
    /// Whether `state` is terminal. Fixed at construction.
    pub is_terminal: bool,
    /// Whether every legal action already has a child. Terminal nodes start out fully expanded.
    pub is_fully_expanded: bool,
}

impl<S: State> UctNode<S> {
    /// Creates an unvisited node for `state`, reached through `action`.
    pub fn new(state: S, action: Option<S::Action>) -> Self {
        let is_terminal = state.is_terminal();
        let current_player = state.current_player();
        UctNode {
            state,
            action,
            current_player,
            children: HashMap::new(),
            visits: 0,
            total_reward: 0.0,
            is_terminal,
            is_fully_expanded: is_terminal,
        }
    }

    /// Mean reward of the rollouts through this node, from `Max`'s point of view.
    pub fn expected_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// The search tree of a single UCT search.
///
/// Nodes live in an arena and refer to each other through [`NodeId`]s. A parent owns its
/// children, and every node can reach its parent in O(1) for backpropagation.
#[derive(Debug)]
pub struct SearchTree<S: State> {
    tree: Tree<UctNode<S>>,
}

impl<S: State> SearchTree<S> {
    /// Creates a tree holding only a root node for `state`.
    pub fn new(state: S) -> Self {
        Self {
            tree: Tree::new(UctNode::new(state, None)),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn root(&self) -> &UctNode<S> {
        self.tree.root().value()
    }

    pub fn get(&self, id: NodeId) -> Result<&UctNode<S>> {
        self.tree
            .get(id)
            .map(|node| node.value())
            .ok_or(SearchError::Invariant("node id does not belong to this tree"))
    }

    /// Returns the parent of `id`, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .get(id)
            .and_then(|node| node.parent())
            .map(|parent| parent.id())
    }

    /// Iterates the children of `id` in the order they were expanded.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &UctNode<S>)> {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.children())
            .map(|child| (child.id(), child.value()))
    }

    /// Attaches a new node for `state` under `parent`, keyed by `action`.
    pub fn add_child(&mut self, parent: NodeId, action: S::Action, state: S) -> Result<NodeId> {
        let mut parent_node = self
            .tree
            .get_mut(parent)
            .ok_or(SearchError::Invariant("node id does not belong to this tree"))?;
        if parent_node.value().children.contains_key(&action) {
            return Err(SearchError::Invariant("action expanded twice"));
        }

        let child_id = parent_node
            .append(UctNode::new(state, Some(action.clone())))
            .id();
        parent_node.value().children.insert(action, child_id);
        Ok(child_id)
    }

    pub fn mark_fully_expanded(&mut self, id: NodeId) -> Result<()> {
        let mut node = self
            .tree
            .get_mut(id)
            .ok_or(SearchError::Invariant("node id does not belong to this tree"))?;
        node.value().is_fully_expanded = true;
        Ok(())
    }

    /// Adds one visit and `reward` to `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) -> Result<()> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let mut node = self
                .tree
                .get_mut(current)
                .ok_or(SearchError::Invariant("node id does not belong to this tree"))?;
            let data = node.value();
            data.visits += 1;
            data.total_reward += reward;
            cursor = self.parent(current);
        }
        Ok(())
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.tree.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.nodes().next().is_none()
    }

    /// Iterates every node of the tree.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &UctNode<S>)> {
        self.tree.nodes().map(|node| (node.id(), node.value()))
    }
}
