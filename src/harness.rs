//! Interactive text session driving a tree.
//!
//! The session reads one line of whitespace-separated integers and inserts
//! them, prints the tree, reads a key to search for, reads a key to delete and
//! prints the tree again. Tokens on the first line that are not integers are
//! skipped; the search and delete lines must each hold one integer.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::btree::BTree;
use crate::error::{Result, TreeError};
use crate::types::Key;

/// Summary of a completed session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionReport {
    /// Keys inserted from the first line
    pub inserted: usize,
    /// Tokens on the first line that were not integers
    pub skipped: usize,
    /// Key searched for
    pub searched: Key,
    /// Whether the searched key was present
    pub found: bool,
    /// Key requested for deletion
    pub deleted: Key,
    /// Whether an entry was removed
    pub removed: bool,
}

/// A harness session over an input and an output stream
pub struct Session<R, W> {
    tree: BTree,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session around an existing tree
    pub fn new(tree: BTree, input: R, output: W) -> Self {
        Self {
            tree,
            input,
            output,
        }
    }

    /// Get the tree
    pub fn tree(&self) -> &BTree {
        &self.tree
    }

    /// Consume the session, returning the tree
    pub fn into_tree(self) -> BTree {
        self.tree
    }

    /// Run the full insert / print / search / delete / print script
    pub fn run(&mut self) -> Result<SessionReport> {
        let mut report = SessionReport::default();

        writeln!(self.output, "Enter 10-15 integers separated by spaces:")?;
        let line = self.read_line("keys to insert")?;
        let (inserted, skipped) = self.insert_all(&line);
        report.inserted = inserted;
        report.skipped = skipped;
        info!(inserted, skipped, "inserted keys");

        writeln!(self.output)?;
        writeln!(self.output, "B-tree after inserting elements:")?;
        self.print_tree()?;

        writeln!(self.output)?;
        writeln!(self.output, "Enter a number to search for:")?;
        let line = self.read_line("key to search for")?;
        report.searched = parse_key(&line)?;
        report.found = self.tree.search(report.searched);
        info!(key = report.searched, found = report.found, "search");
        if report.found {
            writeln!(self.output, "Number found!")?;
        } else {
            writeln!(self.output, "Number not found.")?;
        }

        writeln!(self.output)?;
        writeln!(self.output, "Enter a number to delete:")?;
        let line = self.read_line("key to delete")?;
        report.deleted = parse_key(&line)?;
        report.removed = self.tree.delete(report.deleted);
        info!(key = report.deleted, removed = report.removed, "delete");

        writeln!(self.output)?;
        writeln!(self.output, "B-tree after deleting the element:")?;
        self.print_tree()?;

        self.output.flush()?;
        Ok(report)
    }

    /// Insert every integer token of `line`, returning (inserted, skipped)
    fn insert_all(&mut self, line: &str) -> (usize, usize) {
        let mut inserted = 0;
        let mut skipped = 0;
        for token in line.split_whitespace() {
            match token.parse::<Key>() {
                Ok(key) => {
                    if self.tree.insert(key) {
                        inserted += 1;
                    }
                }
                Err(e) => {
                    debug!(token, error = %e, "skipping token");
                    skipped += 1;
                }
            }
        }
        (inserted, skipped)
    }

    fn print_tree(&mut self) -> Result<()> {
        for line in self.tree.render() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn read_line(&mut self, what: &'static str) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TreeError::UnexpectedEof(what));
        }
        Ok(line)
    }
}

/// Parse a line holding a single integer, ignoring surrounding whitespace
pub fn parse_key(line: &str) -> Result<Key> {
    let trimmed = line.trim();
    trimmed.parse::<Key>().map_err(|source| TreeError::Parse {
        input: trimmed.to_string(),
        source,
    })
}
