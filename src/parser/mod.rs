pub mod error;
pub mod locate;

pub use locate::{find_enclosing_function, EnclosingFunction, Receiver};

use crate::core::{GorefError, Result};
use error::ParseError;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// A Go file read from disk together with its syntax tree
pub struct SourceFile {
    pub source: String,
    pub tree: Tree,
}

/// Go language parser using tree-sitter
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| GorefError::tree_sitter(format!("Failed to set Go language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse Go source code. Syntax errors are kept in the tree as error nodes.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseFailed.into())
    }

    /// Read and parse a Go file, rejecting files with syntax errors
    pub fn parse_file(&mut self, path: &Path) -> Result<SourceFile> {
        let source = std::fs::read_to_string(path).map_err(|e| ParseError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let tree = self.parse(&source)?;
        check_syntax(&tree, &source)?;

        Ok(SourceFile { source, tree })
    }
}

/// Fail with the location of the first syntax error in the tree, if any
pub fn check_syntax(tree: &Tree, source: &str) -> std::result::Result<(), ParseError> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }

    let node = first_error_node(root).unwrap_or(root);
    let point = node.start_position();
    let message = if node.is_missing() {
        format!("expected `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
        let snippet: String = text.lines().next().unwrap_or_default().chars().take(32).collect();
        format!("unexpected `{}`", snippet.trim())
    };

    Err(ParseError::SyntaxError {
        line: point.row + 1,
        column: point.column + 1,
        message,
    })
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_node)
}
