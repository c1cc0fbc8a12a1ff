//! Adaptive huffman tree, kept in an arena of nodes addressed by index.
//!
//! The tree starts as a lone NYT ("not yet transmitted") leaf. The first time a symbol is seen
//! the NYT leaf is split into an internal node holding a fresh NYT leaf (left) and a leaf for the
//! symbol (right). Every occurrence then walks from the symbol's leaf up to the root, promoting
//! each node past the highest-order node of equal weight before incrementing it. Encoder and
//! decoder run exactly the same updates, so their trees never drift apart and no code table ever
//! needs to be sent.
use std::collections::BTreeSet;

use log::trace;
use rustc_hash::FxHashMap;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Order given to the very first NYT node. Every later node is numbered below it.
const NYT_ORDER: u32 = 1024;

#[derive(Debug, Clone)]
pub struct Node {
    /// Occurrence count of the symbol (leaf) or of everything below this node (internal).
    pub weight: u32,
    /// Symbol bound to a leaf. None for the NYT leaf and for internal nodes.
    pub symbol: Option<u8>,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Unique tie break rank. Among equal weights the highest order is the promotion target.
    pub order: u32,
}

impl Node {
    fn new(weight: u32, symbol: Option<u8>, parent: Option<NodeId>, order: u32) -> Self {
        Node {
            weight,
            symbol,
            parent,
            left: None,
            right: None,
            order,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct VitterTree {
    nodes: Vec<Node>,
    root: NodeId,
    nyt: NodeId,
    /// Leaf of every symbol seen so far.
    leaves: FxHashMap<u8, NodeId>,
    /// Node currently holding each order value.
    by_order: FxHashMap<u32, NodeId>,
    /// (weight, order) of every node, so the top of an equal-weight block is a range lookup.
    ranks: BTreeSet<(u32, u32)>,
    /// Next (lower) order to hand out.
    next_order: u32,
}

impl VitterTree {
    /// Create a tree holding only the NYT node.
    pub fn new() -> Self {
        let mut tree = VitterTree {
            nodes: Vec::with_capacity(513),
            root: 0,
            nyt: 0,
            leaves: FxHashMap::default(),
            by_order: FxHashMap::default(),
            ranks: BTreeSet::new(),
            next_order: NYT_ORDER - 1,
        };
        tree.root = tree.push(Node::new(0, None, None, NYT_ORDER));
        tree.nyt = tree.root;
        tree
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.by_order.insert(node.order, id);
        self.ranks.insert((node.weight, node.order));
        self.nodes.push(node);
        id
    }

    fn take_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order -= 1;
        order
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn nyt(&self) -> NodeId {
        self.nyt
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes in the tree, NYT included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The NYT node is always present.
        false
    }

    /// True once the symbol has a leaf of its own.
    pub fn contains(&self, symbol: u8) -> bool {
        self.leaves.contains_key(&symbol)
    }

    /// Root to node path. *false* is a left branch (bit 0), *true* a right branch (bit 1).
    fn path_to(&self, mut id: NodeId) -> Vec<bool> {
        let mut code = Vec::new();
        while let Some(parent) = self.nodes[id].parent {
            code.push(self.nodes[parent].right == Some(id));
            id = parent;
        }
        code.reverse();
        code
    }

    /// Current code for a symbol, or None if the symbol has not been seen yet.
    pub fn code_for(&self, symbol: u8) -> Option<Vec<bool>> {
        self.leaves.get(&symbol).map(|&leaf| self.path_to(leaf))
    }

    /// Current code of the NYT leaf. Empty while NYT is the root.
    pub fn nyt_code(&self) -> Vec<bool> {
        self.path_to(self.nyt)
    }

    /// Follow one branch down from an internal node. None if the node is a leaf.
    pub fn child(&self, id: NodeId, right: bool) -> Option<NodeId> {
        if right {
            self.nodes[id].right
        } else {
            self.nodes[id].left
        }
    }

    /// Record one more occurrence of symbol.
    pub fn update(&mut self, symbol: u8) {
        let leaf = self.leaves.get(&symbol).copied();
        match leaf {
            Some(leaf) => self.increment_path(Some(leaf)),
            None => {
                let internal = self.split_nyt(symbol);
                trace!(
                    "New symbol {} split NYT, tree now has {} nodes",
                    symbol,
                    self.nodes.len()
                );
                self.increment_path(self.nodes[internal].parent);
            }
        }
    }

    /// Replace the NYT leaf with an internal node holding the NYT leaf (left) and a new leaf
    /// for symbol (right). Returns the new internal node.
    fn split_nyt(&mut self, symbol: u8) -> NodeId {
        let nyt = self.nyt;
        let old_parent = self.nodes[nyt].parent;

        let internal_order = self.take_order();
        let internal = self.push(Node::new(1, None, old_parent, internal_order));
        let leaf_order = self.take_order();
        let leaf = self.push(Node::new(1, Some(symbol), Some(internal), leaf_order));

        // The internal node takes over the slot NYT held.
        match old_parent {
            Some(parent) => self.replace_child(parent, nyt, internal),
            None => self.root = internal,
        }
        self.nodes[internal].left = Some(nyt);
        self.nodes[internal].right = Some(leaf);
        self.nodes[nyt].parent = Some(internal);

        self.leaves.insert(symbol, leaf);
        internal
    }

    /// Walk from node to the root, promoting and then incrementing every node on the way.
    fn increment_path(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            if let Some(leader) = self.block_leader(self.nodes[id].weight) {
                if leader != id && !self.related(id, leader) {
                    self.swap(id, leader);
                }
            }
            self.increment(id);
            current = self.nodes[id].parent;
        }
    }

    /// Highest order node of the given weight.
    fn block_leader(&self, weight: u32) -> Option<NodeId> {
        self.ranks
            .range((weight, 0)..=(weight, u32::MAX))
            .next_back()
            .map(|(_, order)| self.by_order[order])
    }

    fn increment(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        self.ranks.remove(&(node.weight, node.order));
        node.weight += 1;
        self.ranks.insert((node.weight, node.order));
    }

    /// True if one node lies on the other's path to the root.
    fn related(&self, a: NodeId, b: NodeId) -> bool {
        self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }

    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        while let Some(parent) = self.nodes[id].parent {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let node = &mut self.nodes[parent];
        if node.left == Some(old) {
            node.left = Some(new);
        } else {
            node.right = Some(new);
        }
    }

    /// Exchange the tree positions (parent slots) and the orders of two unrelated nodes.
    /// Subtrees travel with their roots. Both nodes have the same weight, so no ancestor
    /// weight changes.
    fn swap(&mut self, a: NodeId, b: NodeId) {
        let (Some(pa), Some(pb)) = (self.nodes[a].parent, self.nodes[b].parent) else {
            return;
        };
        if pa == pb {
            let parent = &mut self.nodes[pa];
            std::mem::swap(&mut parent.left, &mut parent.right);
        } else {
            self.replace_child(pa, a, b);
            self.replace_child(pb, b, a);
            self.nodes[a].parent = Some(pb);
            self.nodes[b].parent = Some(pa);
        }

        let (oa, ob) = (self.nodes[a].order, self.nodes[b].order);
        self.nodes[a].order = ob;
        self.nodes[b].order = oa;
        // Equal weights mean the (weight, order) index is unchanged. Only the owners move.
        self.by_order.insert(ob, a);
        self.by_order.insert(oa, b);
    }

    /// Check every structural invariant of the tree, describing the first one broken.
    pub fn validate(&self) -> Result<(), String> {
        let nyt = &self.nodes[self.nyt];
        if !nyt.is_leaf() || nyt.weight != 0 || nyt.symbol.is_some() {
            return Err("NYT must be an empty weight 0 leaf".to_string());
        }
        if self.nodes[self.root].parent.is_some() {
            return Err("root has a parent".to_string());
        }
        let mut orders = FxHashMap::default();
        for (id, node) in self.nodes.iter().enumerate() {
            if orders.insert(node.order, id).is_some() {
                return Err(format!("order {} is used twice", node.order));
            }
            if self.by_order.get(&node.order) != Some(&id) {
                return Err(format!("order index is stale for node {}", id));
            }
            if !self.ranks.contains(&(node.weight, node.order)) {
                return Err(format!("weight index is stale for node {}", id));
            }
            if let Some(parent) = node.parent {
                let p = &self.nodes[parent];
                if p.left != Some(id) && p.right != Some(id) {
                    return Err(format!("node {} is not a child of its parent", id));
                }
                if p.weight < node.weight {
                    return Err(format!("node {} outweighs its parent", id));
                }
            } else if id != self.root {
                return Err(format!("node {} is detached", id));
            }
            match (node.left, node.right) {
                (Some(l), Some(r)) => {
                    if node.symbol.is_some() {
                        return Err(format!("internal node {} carries a symbol", id));
                    }
                    if node.weight != self.nodes[l].weight + self.nodes[r].weight {
                        return Err(format!("node {} weight is not the sum of its children", id));
                    }
                    if self.nodes[l].parent != Some(id) || self.nodes[r].parent != Some(id) {
                        return Err(format!("children of node {} point elsewhere", id));
                    }
                }
                (None, None) => {
                    if id != self.nyt {
                        match node.symbol {
                            Some(sym) if self.leaves.get(&sym) == Some(&id) => {}
                            _ => return Err(format!("leaf {} is not mapped to its symbol", id)),
                        }
                    }
                }
                _ => return Err(format!("node {} has a single child", id)),
            }
        }
        if self.ranks.len() != self.nodes.len() {
            return Err("weight index holds extra entries".to_string());
        }
        // Sibling property: apart from NYT, weights never drop as orders rise.
        let mut ranked: Vec<&Node> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|&(id, _)| id != self.nyt)
            .map(|(_, node)| node)
            .collect();
        ranked.sort_unstable_by_key(|node| node.order);
        if let Some(pair) = ranked.windows(2).find(|w| w[0].weight > w[1].weight) {
            return Err(format!(
                "order {} (weight {}) sits below order {} (weight {})",
                pair[1].order, pair[1].weight, pair[0].order, pair[0].weight
            ));
        }
        Ok(())
    }
}

impl Default for VitterTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::VitterTree;

    fn feed(tree: &mut VitterTree, data: &[u8]) {
        for &sym in data {
            tree.update(sym);
            tree.validate().unwrap();
        }
    }

    #[test]
    fn fresh_tree_test() {
        let tree = VitterTree::new();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), tree.nyt());
        assert!(tree.nyt_code().is_empty());
        assert_eq!(tree.code_for(b'a'), None);
        tree.validate().unwrap();
    }

    #[test]
    fn first_symbol_test() {
        let mut tree = VitterTree::new();
        tree.update(b'a');
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.nyt_code(), vec![false]);
        assert_eq!(tree.code_for(b'a'), Some(vec![true]));
        assert_eq!(tree.node(tree.root()).weight, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn second_symbol_test() {
        let mut tree = VitterTree::new();
        feed(&mut tree, b"ab");
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.node(tree.root()).weight, 2);
        // Both symbols have been seen once, so both have codes, neither is empty.
        let a = tree.code_for(b'a').unwrap();
        let b = tree.code_for(b'b').unwrap();
        assert!(!a.is_empty() && !b.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn repeated_symbol_gets_short_code_test() {
        let mut tree = VitterTree::new();
        feed(&mut tree, b"abc");
        feed(&mut tree, &[b'a'; 20]);
        assert_eq!(tree.code_for(b'a').unwrap().len(), 1);
        assert_eq!(tree.node(tree.root()).weight, 23);
    }

    #[test]
    fn codes_are_prefix_free_test() {
        let mut tree = VitterTree::new();
        feed(&mut tree, b"abracadabra, the quick brown fox jumps over the lazy dog");
        let mut codes: Vec<Vec<bool>> = (0..=255_u8).filter_map(|s| tree.code_for(s)).collect();
        codes.push(tree.nyt_code());
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn trees_stay_in_step_test() {
        let data: Vec<u8> = (0..3000_u32).map(|i| ((i * i + 7 * i) % 37) as u8).collect();
        let mut one = VitterTree::new();
        let mut two = VitterTree::new();
        for &sym in &data {
            one.update(sym);
            two.update(sym);
            assert_eq!(one.nyt_code(), two.nyt_code());
            for s in 0..37_u8 {
                assert_eq!(one.code_for(s), two.code_for(s));
            }
        }
        one.validate().unwrap();
    }

    #[test]
    fn skewed_updates_keep_sibling_order_test() {
        let mut tree = VitterTree::new();
        let mut seed = 7_u32;
        let data: Vec<u8> = (0..20000)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                let r = (seed >> 8) & 0xffff;
                // Mostly low bytes, with the whole alphabet showing up now and then.
                if r % 4 == 0 {
                    (r >> 2) as u8
                } else {
                    (r % 5) as u8
                }
            })
            .collect();
        feed(&mut tree, &data);
        let all: Vec<u8> = (0..=255).collect();
        feed(&mut tree, &all);
        assert_eq!(tree.len(), 513);
    }

    #[test]
    fn broken_sibling_order_is_caught_test() {
        let mut tree = VitterTree::new();
        feed(&mut tree, b"aab");
        // Hand the heaviest order to a light leaf without touching the indexes' shape.
        let a = tree.leaves[&b'a'];
        let b = tree.leaves[&b'b'];
        let (oa, ob) = (tree.nodes[a].order, tree.nodes[b].order);
        let (wa, wb) = (tree.nodes[a].weight, tree.nodes[b].weight);
        assert!(wa > wb && oa > ob);
        tree.ranks.remove(&(wa, oa));
        tree.ranks.remove(&(wb, ob));
        tree.nodes[a].order = ob;
        tree.nodes[b].order = oa;
        tree.ranks.insert((wa, ob));
        tree.ranks.insert((wb, oa));
        tree.by_order.insert(ob, a);
        tree.by_order.insert(oa, b);
        assert!(tree.validate().unwrap_err().starts_with("order"));
    }

    #[test]
    fn full_alphabet_test() {
        let mut tree = VitterTree::new();
        let data: Vec<u8> = (0..=255).collect();
        feed(&mut tree, &data);
        feed(&mut tree, &data);
        assert_eq!(tree.len(), 513);
        assert!((0..=255).all(|s| tree.contains(s)));
        assert_eq!(tree.node(tree.root()).weight, 512);
    }
}
