use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// A node in the caller-provided content subtree.
///
/// The collapsible primitive measures this subtree's height and governs the
/// tab order of its focusable descendants; it never mutates anything else.
#[derive(Debug, Clone)]
pub struct Node {
    // Identity
    pub id: String,

    // Interaction
    pub focusable: bool,
    /// Whether this node currently participates in keyboard tab order.
    /// Only meaningful on focusable nodes.
    pub tab_stop: bool,

    // Content
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            id: generate_id("node"),
            focusable: false,
            tab_stop: true,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    // Children
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(new_children);
        self
    }
}

/// Find a node by ID in the tree.
pub fn find_node<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_node(child, id) {
            return Some(found);
        }
    }

    None
}

/// Collect all focusable node IDs in tree order.
pub fn collect_focusable(root: &Node) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(root, &mut result);
    result
}

fn collect_focusable_recursive(node: &Node, result: &mut Vec<String>) {
    if node.focusable {
        result.push(node.id.clone());
    }
    for child in &node.children {
        collect_focusable_recursive(child, result);
    }
}
