//! # Parse Tree
//!
//! Concrete syntax trees built by the engine. Leaves carry the matched lexeme,
//! interior nodes the name of the nonterminal they were reduced to. Children
//! are kept in source order.
//!
//! ```rust
//! # use slr::Tree;
//! let mut sum = Tree::node("E");
//! sum.add(Tree::leaf("1"));
//! sum.add(Tree::leaf("+"));
//! sum.add(Tree::leaf("2"));
//! assert_eq!(sum.leaves().collect::<Vec<_>>(), ["1", "+", "2"]);
//! assert_eq!(sum.to_string(), "E\n   1\n   +\n   2\n");
//! ```
use smartstring::alias::String;
use std::fmt;

/// Indentation added per tree level when printing.
pub const INDENT: &str = "   ";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl Tree {
    /// A terminal leaf.
    pub fn leaf(lexeme: impl Into<String>) -> Self {
        Self {
            label: lexeme.into(),
            children: Vec::new(),
        }
    }

    /// An interior node with no children yet.
    pub fn node(name: impl Into<String>) -> Self {
        Self::leaf(name)
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            label: name.into(),
            children,
        }
    }

    /// Appends `child` after the existing children.
    pub fn add(&mut self, child: Tree) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf labels, left to right.
    ///
    /// An interior node whose production had an empty right-hand side has no
    /// children and is reported here as well.
    pub fn leaves(&self) -> impl Iterator<Item = &str> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                if node.is_leaf() {
                    return Some(node.label());
                }
                stack.extend(node.children.iter().rev());
            }
            None
        })
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Tree::size).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Tree::depth).max().unwrap_or(0)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        for _ in 0..level {
            f.write_str(INDENT)?;
        }
        writeln!(f, "{}", self.label)?;
        for child in &self.children {
            child.write_indented(f, level + 1)?;
        }
        Ok(())
    }
}

/// One label per line, each level indented by [`INDENT`].
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
