//! Serializes a syntax tree back to CSS text

use crate::ast::AstNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStyle {
    /// One declaration per line, blocks indented with `indent`
    Readable { indent: String },
    /// No insignificant whitespace
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub style: PrintStyle,
    pub keep_comments: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::readable("  ")
    }
}

impl PrintOptions {
    pub fn readable(indent: &str) -> Self {
        Self {
            style: PrintStyle::Readable {
                indent: indent.to_string(),
            },
            keep_comments: true,
        }
    }

    pub fn compact() -> Self {
        Self {
            style: PrintStyle::Compact,
            keep_comments: false,
        }
    }

    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }
}

pub fn print(ast: &AstNode, options: &PrintOptions) -> String {
    let mut printer = Printer::new(options);
    printer.print_node(ast, 0);
    printer.finish()
}

struct Printer<'a> {
    options: &'a PrintOptions,
    output: String,
}

impl<'a> Printer<'a> {
    fn new(options: &'a PrintOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn finish(mut self) -> String {
        if self.is_readable() && !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    fn is_readable(&self) -> bool {
        matches!(self.options.style, PrintStyle::Readable { .. })
    }

    fn indent(&mut self, depth: usize) {
        if let PrintStyle::Readable { indent } = &self.options.style {
            for _ in 0..depth {
                self.output.push_str(indent);
            }
        }
    }

    fn printable<'n>(&self, nodes: &'n [AstNode]) -> Vec<&'n AstNode> {
        nodes
            .iter()
            .filter(|node| self.options.keep_comments || !matches!(node, AstNode::Comment { .. }))
            .collect()
    }

    fn print_node(&mut self, node: &AstNode, depth: usize) {
        match node {
            AstNode::Stylesheet { rules } => self.print_rule_list(rules, depth),
            AstNode::Rule {
                selectors,
                declarations,
            }
            | AstNode::Keyframe {
                selectors,
                declarations,
            } => {
                let prelude = self.join_selectors(selectors, depth);
                self.print_block(&prelude, depth, |printer| {
                    printer.print_declarations(declarations, depth + 1)
                });
            }
            AstNode::Page {
                selectors,
                declarations,
            } => {
                let prelude = if selectors.is_empty() {
                    "@page".to_string()
                } else {
                    format!("@page {}", self.join_selectors(selectors, depth))
                };
                self.print_block(&prelude, depth, |printer| {
                    printer.print_declarations(declarations, depth + 1)
                });
            }
            AstNode::Declaration { property, value, .. } => {
                self.indent(depth);
                if self.is_readable() {
                    self.output.push_str(&format!("{}: {};", property, value));
                } else {
                    self.output.push_str(&format!("{}:{}", property, value));
                }
            }
            AstNode::Comment { text } => {
                self.indent(depth);
                self.output.push_str(&format!("/*{}*/", text));
            }
            AstNode::Media { query, rules } => {
                self.print_block(&format!("@media {}", query), depth, |printer| {
                    printer.print_rule_list(rules, depth + 1)
                });
            }
            AstNode::Supports { condition, rules } => {
                self.print_block(&format!("@supports {}", condition), depth, |printer| {
                    printer.print_rule_list(rules, depth + 1)
                });
            }
            AstNode::Keyframes {
                name,
                vendor_prefix,
                frames,
            } => {
                let prelude = format!("@{}keyframes {}", vendor_prefix.as_deref().unwrap_or(""), name);
                self.print_block(&prelude, depth, |printer| {
                    printer.print_rule_list(frames, depth + 1)
                });
            }
            AstNode::Document {
                condition,
                vendor_prefix,
                rules,
            } => {
                let prelude = format!("@{}document {}", vendor_prefix.as_deref().unwrap_or(""), condition);
                self.print_block(&prelude, depth, |printer| {
                    printer.print_rule_list(rules, depth + 1)
                });
            }
            AstNode::Import { target } => self.print_statement("import", target, depth),
            AstNode::Charset { value } => self.print_statement("charset", value, depth),
            AstNode::Namespace { value } => self.print_statement("namespace", value, depth),
        }
    }

    fn print_statement(&mut self, keyword: &str, value: &str, depth: usize) {
        self.indent(depth);
        self.output.push_str(&format!("@{} {};", keyword, value));
    }

    /// `prelude { body }`, with the body printed by `body`
    fn print_block<F>(&mut self, prelude: &str, depth: usize, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent(depth);
        self.output.push_str(prelude);
        if self.is_readable() {
            self.output.push_str(" {\n");
            let before = self.output.len();
            body(self);
            if self.output.len() > before {
                self.output.push('\n');
            }
            self.indent(depth);
            self.output.push('}');
        } else {
            self.output.push('{');
            body(self);
            self.output.push('}');
        }
    }

    /// Rules, at-rules and frames; readable mode puts a blank line between them
    fn print_rule_list(&mut self, nodes: &[AstNode], depth: usize) {
        let separator = if self.is_readable() { "\n\n" } else { "" };
        for (index, node) in self.printable(nodes).into_iter().enumerate() {
            if index > 0 {
                self.output.push_str(separator);
            }
            self.print_node(node, depth);
        }
    }

    fn print_declarations(&mut self, nodes: &[AstNode], depth: usize) {
        let separator = if self.is_readable() { "\n" } else { ";" };
        let mut previous_was_declaration = false;
        for (index, node) in self.printable(nodes).into_iter().enumerate() {
            // Compact mode only needs `;` to end a declaration that is followed by something
            if index > 0 && (self.is_readable() || previous_was_declaration) {
                self.output.push_str(separator);
            }
            self.print_node(node, depth);
            previous_was_declaration = matches!(node, AstNode::Declaration { .. });
        }
    }

    fn join_selectors(&self, selectors: &[String], depth: usize) -> String {
        match &self.options.style {
            PrintStyle::Readable { indent } => selectors.join(&format!(",\n{}", indent.repeat(depth))),
            PrintStyle::Compact => selectors.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn reprint(css: &str, options: &PrintOptions) -> String {
        print(&parse(css, None).unwrap(), options)
    }

    #[test]
    fn test_readable_output() {
        let css = "a, b { color: red; top: 0 }\n@media print { a { color: black } }";
        assert_eq!(
            reprint(css, &PrintOptions::default()),
            "a,\nb {\n  color: red;\n  top: 0;\n}\n\n@media print {\n  a {\n    color: black;\n  }\n}\n"
        );
    }

    #[test]
    fn test_compact_output() {
        let css = "/* c */ a, b { color: red; /* x */ top: 0 }\n@import url(a.css);\n@keyframes k { from { top: 0 } to { top: 1px } }";
        assert_eq!(
            reprint(css, &PrintOptions::compact()),
            "a,b{color:red;top:0}@import url(a.css);@keyframes k{from{top:0}to{top:1px}}"
        );
    }

    #[test]
    fn test_compact_keeps_comments_on_request() {
        let css = "a { color: red; /* x */ top: 0 }";
        assert_eq!(
            reprint(css, &PrintOptions::compact().with_comments(true)),
            "a{color:red;/* x */top:0}"
        );
    }

    #[test]
    fn test_custom_indent() {
        assert_eq!(
            reprint("@media print { a { top: 0 } }", &PrintOptions::readable("\t")),
            "@media print {\n\ta {\n\t\ttop: 0;\n\t}\n}\n"
        );
    }

    #[test]
    fn test_empty_rule() {
        assert_eq!(reprint("a {}", &PrintOptions::default()), "a {\n}\n");
        assert_eq!(reprint("", &PrintOptions::default()), "");
    }

    #[test]
    fn test_every_node_kind_round_trips() {
        let css = r#"@charset "UTF-8";
@import url("base.css") screen;
@namespace svg url(http://www.w3.org/2000/svg);
/* banner */
a:hover, b[data-x="1,2"] { color: red; background: url(a.png) no-repeat }
@media screen and (min-width: 10px) { @supports (display: flex) { a { display: flex } } }
@-webkit-keyframes spin { from { top: 0 } 50%, 75% { top: 5px } }
@page :first { margin: 1in }
@-moz-document url-prefix() { a { top: 0; /* inner */ } }
@font-face { font-family: x; src: url(x.woff) }
"#;
        let ast = parse(css, None).unwrap();
        for options in [PrintOptions::default(), PrintOptions::compact(), PrintOptions::readable("    ")] {
            let printed = print(&ast, &options);
            let reparsed = parse(&printed, None).unwrap();
            let expected = if options.keep_comments {
                ast.clone()
            } else {
                parse(&print(&ast, &PrintOptions::compact()), None).unwrap()
            };
            assert!(reparsed.same_structure(&expected), "{}", printed);
        }
    }
}
