//! Syntax tree produced by the parser and consumed by the printer

/// Source location of a declaration, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Root node
    Stylesheet { rules: Vec<AstNode> },

    /// Qualified rule: `a, b { ... }`
    Rule {
        selectors: Vec<String>,
        declarations: Vec<AstNode>,
    },

    Declaration {
        property: String,
        value: String,
        position: Position,
    },

    /// Comment text without the `/*` and `*/` delimiters
    Comment { text: String },

    Media { query: String, rules: Vec<AstNode> },

    Supports { condition: String, rules: Vec<AstNode> },

    /// `@keyframes` or `@-webkit-keyframes`
    Keyframes {
        name: String,
        vendor_prefix: Option<String>,
        frames: Vec<AstNode>,
    },

    /// One frame of a keyframes block: `from`, `50%`, ...
    Keyframe {
        selectors: Vec<String>,
        declarations: Vec<AstNode>,
    },

    Page {
        selectors: Vec<String>,
        declarations: Vec<AstNode>,
    },

    /// `@document` or `@-moz-document`
    Document {
        condition: String,
        vendor_prefix: Option<String>,
        rules: Vec<AstNode>,
    },

    Import { target: String },

    Charset { value: String },

    Namespace { value: String },
}

impl AstNode {
    /// Structural equality that ignores declaration positions
    pub fn same_structure(&self, other: &AstNode) -> bool {
        use AstNode::*;

        match (self, other) {
            (Stylesheet { rules: a }, Stylesheet { rules: b }) => all_same(a, b),
            (
                Rule {
                    selectors: sa,
                    declarations: a,
                },
                Rule {
                    selectors: sb,
                    declarations: b,
                },
            )
            | (
                Keyframe {
                    selectors: sa,
                    declarations: a,
                },
                Keyframe {
                    selectors: sb,
                    declarations: b,
                },
            )
            | (
                Page {
                    selectors: sa,
                    declarations: a,
                },
                Page {
                    selectors: sb,
                    declarations: b,
                },
            ) => sa == sb && all_same(a, b),
            (
                Declaration {
                    property: pa,
                    value: va,
                    ..
                },
                Declaration {
                    property: pb,
                    value: vb,
                    ..
                },
            ) => pa == pb && va == vb,
            (Media { query: qa, rules: a }, Media { query: qb, rules: b }) => {
                qa == qb && all_same(a, b)
            }
            (
                Supports {
                    condition: ca,
                    rules: a,
                },
                Supports {
                    condition: cb,
                    rules: b,
                },
            ) => ca == cb && all_same(a, b),
            (
                Keyframes {
                    name: na,
                    vendor_prefix: pa,
                    frames: a,
                },
                Keyframes {
                    name: nb,
                    vendor_prefix: pb,
                    frames: b,
                },
            ) => na == nb && pa == pb && all_same(a, b),
            (
                Document {
                    condition: ca,
                    vendor_prefix: pa,
                    rules: a,
                },
                Document {
                    condition: cb,
                    vendor_prefix: pb,
                    rules: b,
                },
            ) => ca == cb && pa == pb && all_same(a, b),
            (a, b) => a == b,
        }
    }

    /// Number of declarations in this subtree
    pub fn declaration_count(&self) -> usize {
        match self {
            AstNode::Declaration { .. } => 1,
            AstNode::Stylesheet { rules }
            | AstNode::Media { rules, .. }
            | AstNode::Supports { rules, .. }
            | AstNode::Document { rules, .. } => rules.iter().map(AstNode::declaration_count).sum(),
            AstNode::Keyframes { frames, .. } => frames.iter().map(AstNode::declaration_count).sum(),
            AstNode::Rule { declarations, .. }
            | AstNode::Keyframe { declarations, .. }
            | AstNode::Page { declarations, .. } => {
                declarations.iter().map(AstNode::declaration_count).sum()
            }
            _ => 0,
        }
    }
}

fn all_same(a: &[AstNode], b: &[AstNode]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_structure(y))
}
