//! Arena-backed editor over a parsed stylesheet
//!
//! Nodes live in a flat arena and are addressed by `NodeId`s that stay
//! valid for the whole edit session. Insertions only touch the parent's
//! child list, removals just mark the node, and `to_ast` compacts the
//! arena back into an `AstNode` tree.

use crate::ast::{AstNode, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Stylesheet,
    Rule { selectors: Vec<String> },
    Declaration {
        property: String,
        value: String,
        position: Position,
    },
    Comment { text: String },
    Media { query: String },
    Supports { condition: String },
    Keyframes {
        name: String,
        vendor_prefix: Option<String>,
    },
    Keyframe { selectors: Vec<String> },
    Page { selectors: Vec<String> },
    Document {
        condition: String,
        vendor_prefix: Option<String>,
    },
    Import { target: String },
    Charset { value: String },
    Namespace { value: String },
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
}

/// A declaration found while walking the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRef {
    pub id: NodeId,
    /// The rule, frame or page holding the declaration
    pub parent: NodeId,
    /// Vendor prefix of the nearest prefixed `@keyframes` or `@document`
    pub vendor: Option<String>,
}

/// A `@keyframes` block found while walking the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesRef {
    pub id: NodeId,
    pub name: String,
    pub vendor_prefix: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    root: NodeId,
}

impl Tree {
    pub fn from_ast(ast: &AstNode) -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.add_node(ast, None);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn add_node(&mut self, node: &AstNode, parent: Option<NodeId>) -> NodeId {
        let leaf: &[AstNode] = &[];
        let (data, children): (NodeData, &[AstNode]) = match node {
            AstNode::Stylesheet { rules } => (NodeData::Stylesheet, rules.as_slice()),
            AstNode::Rule {
                selectors,
                declarations,
            } => (
                NodeData::Rule {
                    selectors: selectors.clone(),
                },
                declarations.as_slice(),
            ),
            AstNode::Declaration {
                property,
                value,
                position,
            } => (
                NodeData::Declaration {
                    property: property.clone(),
                    value: value.clone(),
                    position: *position,
                },
                leaf,
            ),
            AstNode::Comment { text } => (NodeData::Comment { text: text.clone() }, leaf),
            AstNode::Media { query, rules } => (NodeData::Media { query: query.clone() }, rules.as_slice()),
            AstNode::Supports { condition, rules } => (
                NodeData::Supports {
                    condition: condition.clone(),
                },
                rules.as_slice(),
            ),
            AstNode::Keyframes {
                name,
                vendor_prefix,
                frames,
            } => (
                NodeData::Keyframes {
                    name: name.clone(),
                    vendor_prefix: vendor_prefix.clone(),
                },
                frames.as_slice(),
            ),
            AstNode::Keyframe {
                selectors,
                declarations,
            } => (
                NodeData::Keyframe {
                    selectors: selectors.clone(),
                },
                declarations.as_slice(),
            ),
            AstNode::Page {
                selectors,
                declarations,
            } => (
                NodeData::Page {
                    selectors: selectors.clone(),
                },
                declarations.as_slice(),
            ),
            AstNode::Document {
                condition,
                vendor_prefix,
                rules,
            } => (
                NodeData::Document {
                    condition: condition.clone(),
                    vendor_prefix: vendor_prefix.clone(),
                },
                rules.as_slice(),
            ),
            AstNode::Import { target } => (NodeData::Import { target: target.clone() }, leaf),
            AstNode::Charset { value } => (NodeData::Charset { value: value.clone() }, leaf),
            AstNode::Namespace { value } => (NodeData::Namespace { value: value.clone() }, leaf),
        };

        let id = self.push(data, parent);
        for child in children {
            let child_id = self.add_node(child, Some(id));
            self.slots[id.0].children.push(child_id);
        }
        id
    }

    fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            data,
            parent,
            children: Vec::new(),
            removed: false,
        });
        id
    }

    /// Compact the arena back into a tree, dropping removed nodes
    pub fn to_ast(&self) -> AstNode {
        self.build_node(self.root)
    }

    fn build_node(&self, id: NodeId) -> AstNode {
        let slot = &self.slots[id.0];
        let children = || -> Vec<AstNode> {
            slot.children
                .iter()
                .filter(|child| !self.slots[child.0].removed)
                .map(|child| self.build_node(*child))
                .collect()
        };

        match &slot.data {
            NodeData::Stylesheet => AstNode::Stylesheet { rules: children() },
            NodeData::Rule { selectors } => AstNode::Rule {
                selectors: selectors.clone(),
                declarations: children(),
            },
            NodeData::Declaration {
                property,
                value,
                position,
            } => AstNode::Declaration {
                property: property.clone(),
                value: value.clone(),
                position: *position,
            },
            NodeData::Comment { text } => AstNode::Comment { text: text.clone() },
            NodeData::Media { query } => AstNode::Media {
                query: query.clone(),
                rules: children(),
            },
            NodeData::Supports { condition } => AstNode::Supports {
                condition: condition.clone(),
                rules: children(),
            },
            NodeData::Keyframes { name, vendor_prefix } => AstNode::Keyframes {
                name: name.clone(),
                vendor_prefix: vendor_prefix.clone(),
                frames: children(),
            },
            NodeData::Keyframe { selectors } => AstNode::Keyframe {
                selectors: selectors.clone(),
                declarations: children(),
            },
            NodeData::Page { selectors } => AstNode::Page {
                selectors: selectors.clone(),
                declarations: children(),
            },
            NodeData::Document {
                condition,
                vendor_prefix,
            } => AstNode::Document {
                condition: condition.clone(),
                vendor_prefix: vendor_prefix.clone(),
                rules: children(),
            },
            NodeData::Import { target } => AstNode::Import {
                target: target.clone(),
            },
            NodeData::Charset { value } => AstNode::Charset { value: value.clone() },
            NodeData::Namespace { value } => AstNode::Namespace { value: value.clone() },
        }
    }

    fn live_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots[id.0]
            .children
            .iter()
            .copied()
            .filter(move |child| !self.slots[child.0].removed)
    }

    /// Every live declaration in document order, depth first
    pub fn declarations(&self) -> Vec<DeclarationRef> {
        let mut found = Vec::new();
        self.collect_declarations(self.root, None, &mut found);
        found
    }

    fn collect_declarations(&self, id: NodeId, vendor: Option<&str>, found: &mut Vec<DeclarationRef>) {
        let vendor = match &self.slots[id.0].data {
            NodeData::Keyframes {
                vendor_prefix: Some(prefix),
                ..
            }
            | NodeData::Document {
                vendor_prefix: Some(prefix),
                ..
            } => Some(prefix.as_str()),
            _ => vendor,
        };

        for child in self.live_children(id) {
            if let NodeData::Declaration { .. } = self.slots[child.0].data {
                found.push(DeclarationRef {
                    id: child,
                    parent: id,
                    vendor: vendor.map(str::to_string),
                });
            } else {
                self.collect_declarations(child, vendor, found);
            }
        }
    }

    /// Visit every declaration that exists when the walk starts. The visitor
    /// may edit the tree; declarations it inserts are not visited.
    pub fn for_each_declaration<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Tree, &DeclarationRef),
    {
        for declaration in self.declarations() {
            if !self.is_removed(declaration.id) {
                visit(self, &declaration);
            }
        }
    }

    pub fn keyframes_blocks(&self) -> Vec<KeyframesRef> {
        let mut found = Vec::new();
        self.collect_keyframes(self.root, &mut found);
        found
    }

    fn collect_keyframes(&self, id: NodeId, found: &mut Vec<KeyframesRef>) {
        for child in self.live_children(id) {
            match &self.slots[child.0].data {
                NodeData::Keyframes { name, vendor_prefix } => found.push(KeyframesRef {
                    id: child,
                    name: name.clone(),
                    vendor_prefix: vendor_prefix.clone(),
                }),
                NodeData::Media { .. } | NodeData::Supports { .. } | NodeData::Document { .. } => {
                    self.collect_keyframes(child, found)
                }
                _ => {}
            }
        }
    }

    /// Visit every `@keyframes` block that exists when the walk starts
    pub fn for_each_keyframes_block<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Tree, &KeyframesRef),
    {
        for block in self.keyframes_blocks() {
            if !self.is_removed(block.id) {
                visit(self, &block);
            }
        }
    }

    pub fn is_removed(&self, id: NodeId) -> bool {
        self.slots[id.0].removed
    }

    /// `(property, value)` of a declaration node
    pub fn declaration(&self, id: NodeId) -> Option<(&str, &str)> {
        match &self.slots[id.0].data {
            NodeData::Declaration { property, value, .. } => Some((property.as_str(), value.as_str())),
            _ => None,
        }
    }

    pub fn set_declaration_value(&mut self, id: NodeId, new_value: &str) {
        if let NodeData::Declaration { value, .. } = &mut self.slots[id.0].data {
            *value = new_value.to_string();
        }
    }

    /// Whether the block holding declarations has this exact pair
    pub fn rule_contains(&self, rule: NodeId, property: &str, value: &str) -> bool {
        self.live_children(rule)
            .filter_map(|child| self.declaration(child))
            .any(|(p, v)| p == property && v == value)
    }

    pub fn rule_contains_property(&self, rule: NodeId, property: &str) -> bool {
        self.live_children(rule)
            .filter_map(|child| self.declaration(child))
            .any(|(p, _)| p == property)
    }

    /// Insert `property: value` right before the declaration `before`.
    /// Returns `None` without touching the tree when the pair is already there.
    pub fn insert_declaration_before(&mut self, before: NodeId, property: &str, value: &str) -> Option<NodeId> {
        let parent = self.slots[before.0].parent?;
        if self.rule_contains(parent, property, value) {
            return None;
        }

        let position = match &self.slots[before.0].data {
            NodeData::Declaration { position, .. } => *position,
            _ => Position::default(),
        };
        let id = self.push(
            NodeData::Declaration {
                property: property.to_string(),
                value: value.to_string(),
                position,
            },
            Some(parent),
        );
        self.insert_child_before(parent, before, id);
        Some(id)
    }

    pub fn remove_declaration(&mut self, id: NodeId) {
        if matches!(self.slots[id.0].data, NodeData::Declaration { .. }) {
            self.slots[id.0].removed = true;
        }
    }

    /// Copy a `@keyframes` block under a vendor prefix and place the copy
    /// before it. Returns `None` when a block with that name and prefix exists.
    pub fn clone_keyframes_with_prefix(&mut self, id: NodeId, prefix: &str) -> Option<NodeId> {
        let name = match &self.slots[id.0].data {
            NodeData::Keyframes { name, .. } => name.clone(),
            _ => return None,
        };
        let exists = self
            .keyframes_blocks()
            .iter()
            .any(|block| block.name == name && block.vendor_prefix.as_deref() == Some(prefix));
        if exists {
            return None;
        }

        let parent = self.slots[id.0].parent?;
        let copy = self.copy_subtree(id, Some(parent));
        if let NodeData::Keyframes { vendor_prefix, .. } = &mut self.slots[copy.0].data {
            *vendor_prefix = Some(prefix.to_string());
        }
        self.insert_child_before(parent, id, copy);
        Some(copy)
    }

    pub fn remove_keyframes_block(&mut self, id: NodeId) {
        if matches!(self.slots[id.0].data, NodeData::Keyframes { .. }) {
            self.slots[id.0].removed = true;
        }
    }

    fn copy_subtree(&mut self, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let data = self.slots[id.0].data.clone();
        let children: Vec<NodeId> = self.live_children(id).collect();
        let copy = self.push(data, parent);
        for child in children {
            let child_copy = self.copy_subtree(child, Some(copy));
            self.slots[copy.0].children.push(child_copy);
        }
        copy
    }

    fn insert_child_before(&mut self, parent: NodeId, before: NodeId, child: NodeId) {
        let children = &mut self.slots[parent.0].children;
        let index = children
            .iter()
            .position(|existing| *existing == before)
            .unwrap_or(children.len());
        children.insert(index, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::printer::{print, PrintOptions};

    fn tree(css: &str) -> Tree {
        Tree::from_ast(&parse(css, None).unwrap())
    }

    fn compact(tree: &Tree) -> String {
        print(&tree.to_ast(), &PrintOptions::compact())
    }

    #[test]
    fn test_round_trip_without_edits() {
        let ast = parse("@media print { a { top: 0 } } b { color: red }", None).unwrap();
        assert_eq!(Tree::from_ast(&ast).to_ast(), ast);
    }

    #[test]
    fn test_declarations_carry_vendor_context() {
        let tree = tree(
            "a { top: 0 }\n@media print { b { left: 0 } }\n@-webkit-keyframes k { from { top: 0 } }\n@-moz-document url-prefix() { c { color: red } }",
        );
        let found: Vec<_> = tree
            .declarations()
            .into_iter()
            .map(|d| (tree.declaration(d.id).unwrap().0.to_string(), d.vendor))
            .collect();
        assert_eq!(
            found,
            vec![
                ("top".to_string(), None),
                ("left".to_string(), None),
                ("top".to_string(), Some("-webkit-".to_string())),
                ("color".to_string(), Some("-moz-".to_string())),
            ]
        );
    }

    #[test]
    fn test_insert_before_and_no_duplicates() {
        let mut tree = tree("a { color: red; transition: all 1s }");
        let transition = tree.declarations()[1].id;

        assert!(tree
            .insert_declaration_before(transition, "-webkit-transition", "all 1s")
            .is_some());
        assert!(tree
            .insert_declaration_before(transition, "-webkit-transition", "all 1s")
            .is_none());
        assert!(tree.insert_declaration_before(transition, "color", "red").is_none());

        assert_eq!(
            compact(&tree),
            "a{color:red;-webkit-transition:all 1s;transition:all 1s}"
        );
    }

    #[test]
    fn test_remove_declaration() {
        let mut tree = tree("a { -moz-box-sizing: border-box; box-sizing: border-box; top: 0 }");
        let first = tree.declarations()[0].id;
        tree.remove_declaration(first);
        assert_eq!(tree.declarations().len(), 2);
        assert_eq!(compact(&tree), "a{box-sizing:border-box;top:0}");
    }

    #[test]
    fn test_edits_during_walk() {
        let mut tree = tree("a { top: 0; left: 0 }");
        let mut visited = 0;
        tree.for_each_declaration(|tree, declaration| {
            visited += 1;
            let (property, value) = tree.declaration(declaration.id).map(|(p, v)| (p.to_string(), v.to_string())).unwrap();
            tree.insert_declaration_before(declaration.id, &format!("-x-{}", property), &value);
        });
        assert_eq!(visited, 2);
        assert_eq!(compact(&tree), "a{-x-top:0;top:0;-x-left:0;left:0}");
    }

    #[test]
    fn test_clone_keyframes_once() {
        let mut tree = tree("@keyframes spin { to { top: 0 } }");
        let block = tree.keyframes_blocks()[0].id;

        assert!(tree.clone_keyframes_with_prefix(block, "-webkit-").is_some());
        assert!(tree.clone_keyframes_with_prefix(block, "-webkit-").is_none());
        assert_eq!(tree.keyframes_blocks().len(), 2);
        assert_eq!(
            compact(&tree),
            "@-webkit-keyframes spin{to{top:0}}@keyframes spin{to{top:0}}"
        );

        // The copy is independent of the original
        let copied = tree.declarations()[0].id;
        tree.set_declaration_value(copied, "1px");
        assert_eq!(
            compact(&tree),
            "@-webkit-keyframes spin{to{top:1px}}@keyframes spin{to{top:0}}"
        );
    }

    #[test]
    fn test_remove_keyframes_block() {
        let mut tree = tree("@-moz-keyframes k { to { top: 0 } } a { top: 0 }");
        let block = tree.keyframes_blocks()[0].id;
        tree.remove_keyframes_block(block);
        assert!(tree.keyframes_blocks().is_empty());
        assert_eq!(tree.declarations().len(), 1);
        assert_eq!(compact(&tree), "a{top:0}");
    }

    #[test]
    fn test_rule_contains_property() {
        let tree = tree("a { -webkit-flex: 1; flex: 1 }");
        let rule = tree.declarations()[0].parent;
        assert!(tree.rule_contains_property(rule, "-webkit-flex"));
        assert!(!tree.rule_contains_property(rule, "-ms-flex"));
        assert!(tree.rule_contains(rule, "flex", "1"));
        assert!(!tree.rule_contains(rule, "flex", "2"));
    }
}
