//! Single pass parser turning configuration text into a [`Node`] tree.
//!
//! The scan reads one character at a time and keeps an explicit stack of the blocks enclosing
//! the one being built, so nesting depth never grows the call stack:
//!
//! * `{` ends the pending statement and opens a block named by its first token.
//! * `}` closes the current block and appends it to the enclosing one.
//! * `;` ends the pending statement and appends it as a leaf.
//! * space, tab, CR and LF end the pending token.
//!
//! Comments and quoting are not understood; `#` and `"` are ordinary token characters.
use crate::error::Error;
use crate::node::Node;
use std::mem;

/// Parse `text` into a root [`Node`].
///
/// Empty statements (a `;` with no tokens before it) are dropped. Input that ends inside an open
/// block returns the innermost block being built instead of the root, and tokens left pending
/// before a `}` or at end of input carry over or are dropped respectively. Use
/// [`loads_strict`] to reject such input.
///
/// # Errors
///
/// Returns [`Error::InvalidNode`] if a block is opened without a name.
///
/// Returns [`Error::MalformedConfig`] if a `}` has no block to close.
pub fn loads(text: &str) -> Result<Node, Error> {
    Scanner::default().scan(text, false)
}

/// Parse `text` like [`loads`], rejecting unbalanced input.
///
/// # Errors
///
/// Returns [`Error::MalformedConfig`] if a block is still open at end of input, if a `}` has no
/// block to close, or if a statement is not terminated by `;` or `{`.
///
/// Returns [`Error::InvalidNode`] if a block is opened without a name.
pub fn loads_strict(text: &str) -> Result<Node, Error> {
    Scanner::default().scan(text, true)
}

struct Scanner {
    stack: Vec<Node>,
    current: Node,
    statement: Vec<String>,
    word: String,
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner {
            stack: Vec::new(),
            current: Node::root(Vec::new()),
            statement: Vec::new(),
            word: String::new(),
        }
    }
}

impl Scanner {
    fn scan(mut self, text: &str, strict: bool) -> Result<Node, Error> {
        for c in text.chars() {
            match c {
                '{' => self.open_block()?,
                '}' => {
                    if strict {
                        self.ensure_no_pending("`}`")?;
                    }
                    self.close_block()?;
                }
                ';' => self.end_statement()?,
                ' ' | '\t' | '\n' | '\r' => self.flush_word(),
                _ => self.word.push(c),
            }
        }
        self.finish(strict)
    }

    fn flush_word(&mut self) {
        if !self.word.is_empty() {
            self.statement.push(mem::take(&mut self.word));
        }
    }

    fn open_block(&mut self) -> Result<(), Error> {
        self.flush_word();
        let mut tokens = mem::take(&mut self.statement).into_iter();
        let block = Node::new(tokens.next(), tokens.collect(), Vec::new(), false)?;
        tracing::trace!(depth = self.stack.len() + 1, name = ?block.name(), "open block");
        let outer = mem::replace(&mut self.current, block);
        self.stack.push(outer);
        Ok(())
    }

    fn close_block(&mut self) -> Result<(), Error> {
        let outer = self.stack.pop().ok_or_else(|| Error::MalformedConfig {
            reason: "`}` without a matching `{`".to_string(),
        })?;
        let inner = mem::replace(&mut self.current, outer);
        tracing::trace!(depth = self.stack.len(), name = ?inner.name(), "close block");
        self.current.push_child(inner);
        Ok(())
    }

    fn end_statement(&mut self) -> Result<(), Error> {
        self.flush_word();
        let mut tokens = mem::take(&mut self.statement).into_iter();
        if let Some(name) = tokens.next() {
            let leaf = Node::directive(name, tokens.collect())?;
            self.current.push_child(leaf);
        }
        Ok(())
    }

    fn ensure_no_pending(&self, at: &str) -> Result<(), Error> {
        let mut pending = self.statement.clone();
        if !self.word.is_empty() {
            pending.push(self.word.clone());
        }
        if pending.is_empty() {
            return Ok(());
        }
        Err(Error::MalformedConfig {
            reason: format!("unterminated statement \"{}\" before {at}", pending.join(" ")),
        })
    }

    fn finish(self, strict: bool) -> Result<Node, Error> {
        if strict {
            self.ensure_no_pending("end of input")?;
            if !self.stack.is_empty() {
                return Err(Error::MalformedConfig {
                    reason: format!(
                        "{} unclosed block(s), innermost \"{}\"",
                        self.stack.len(),
                        self.current.name().unwrap_or_default()
                    ),
                });
            }
        } else if !self.stack.is_empty() {
            tracing::debug!(
                open = self.stack.len(),
                "input ended inside a block, returning the innermost block"
            );
        }
        tracing::debug!(children = self.current.children().len(), "parsed config");
        Ok(self.current)
    }
}
