use scribe_parser::ast::{Node, ScriptureDocument};

/// Visitor pattern for traversing the scripture tree immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &ScriptureDocument) {
        walk_nodes(self, &doc.content);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_book(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_chapter(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_para(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_verse(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_char(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_note(&mut self, node: &Node) {
        walk_children(self, node);
    }

    fn visit_text(&mut self, _text: &str) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for transforming the scripture tree
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut ScriptureDocument) {
        walk_nodes_mut(self, &mut doc.content);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }

    fn visit_text_mut(&mut self, _text: &mut String) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Book { .. } => visitor.visit_book(node),
        Node::Chapter { .. } => visitor.visit_chapter(node),
        Node::Para { .. } => visitor.visit_para(node),
        Node::Verse { .. } => visitor.visit_verse(node),
        Node::Char { .. } => visitor.visit_char(node),
        Node::Note { .. } => visitor.visit_note(node),
        Node::Text { text } => visitor.visit_text(text),
    }
}

pub fn walk_children<V: Visitor>(visitor: &mut V, node: &Node) {
    if let Some(children) = node.content() {
        walk_nodes(visitor, children);
    }
}

pub fn walk_nodes_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut [Node]) {
    for node in nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    if let Node::Text { text } = node {
        visitor.visit_text_mut(text);
        return;
    }
    if let Some(children) = node.content_mut() {
        walk_nodes_mut(visitor, children);
    }
}
