//! The parsed configuration tree.
//!
//! A [`Node`] is either the synthetic *root* of a document, owning every top-level directive, or
//! a single *directive* with a name, its argument tokens and its child directives. Names and
//! arguments stay untyped strings: the directive vocabulary is open-ended, so lookups are plain
//! string comparisons through [`Node::query`] and [`Node::query_first`].
//!
//! A directive with children is a *block* and one without is a *leaf statement*. Only the
//! presence of children tells them apart, so `events {}` and `events;` build identical nodes.
use crate::error::Error;
use serde::Serialize;
use std::fmt;

const INDENT: &str = "    ";

/// One element of a parsed configuration tree.
///
/// Nodes are built by the [parser][crate::parser] and are immutable afterwards. Argument and
/// child order is source order; duplicate directives are kept as distinct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    name: Option<String>,
    args: Vec<String>,
    children: Vec<Node>,
}

impl Node {
    /// Construct a node, validating the root/name pairing.
    ///
    /// An empty `name` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `root` is false and no name is given, or if `root` is
    /// true and a name (or any argument) is given.
    pub fn new(
        name: Option<String>,
        args: Vec<String>,
        children: Vec<Node>,
        root: bool,
    ) -> Result<Self, Error> {
        let name = name.filter(|n| !n.is_empty());
        match (root, &name) {
            (false, None) => Err(Error::InvalidNode("a non-root node must have a name")),
            (true, Some(_)) => Err(Error::InvalidNode("the root node must not have a name")),
            (true, None) if !args.is_empty() => {
                Err(Error::InvalidNode("the root node must not have arguments"))
            }
            _ => Ok(Node {
                name,
                args,
                children,
            }),
        }
    }

    /// Construct a root node owning `children`.
    #[must_use]
    pub fn root(children: Vec<Node>) -> Self {
        Node {
            name: None,
            args: Vec::new(),
            children,
        }
    }

    /// Construct a leaf directive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `name` is empty.
    pub fn directive(name: impl Into<String>, args: Vec<String>) -> Result<Self, Error> {
        Self::new(Some(name.into()), args, Vec::new(), false)
    }

    /// The directive name, or `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    /// Whether any children are attached. A block written with an empty body is not a block.
    #[must_use]
    pub fn is_block(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Iterate over the immediate children named `name` whose leading arguments equal
    /// `expected_args`, in source order.
    ///
    /// Children with fewer arguments than `expected_args` never match. Arguments past the
    /// expected prefix are unconstrained, so an empty `expected_args` filters by name only.
    /// Grandchildren are not searched.
    pub fn query<'a>(
        &'a self,
        name: &'a str,
        expected_args: &'a [&'a str],
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.children
            .iter()
            .filter(move |child| child.matches(name, expected_args))
    }

    /// The first immediate child matching [`query`][Self::query].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no child matches.
    pub fn query_first(&self, name: &str, expected_args: &[&str]) -> Result<&Node, Error> {
        self.children
            .iter()
            .find(|child| child.matches(name, expected_args))
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
            })
    }

    fn matches(&self, name: &str, expected_args: &[&str]) -> bool {
        self.name.as_deref() == Some(name)
            && self.args.len() >= expected_args.len()
            && self
                .args
                .iter()
                .zip(expected_args)
                .all(|(arg, expected)| arg == expected)
    }

    /// Render the subtree as configuration text, indented `indent` levels of four spaces.
    ///
    /// The root renders as its children separated by newlines, without braces.
    #[must_use]
    pub fn dump(&self, indent: usize) -> String {
        let Some(name) = &self.name else {
            return self.dump_children(indent);
        };
        let spaces = INDENT.repeat(indent);
        let mut head = name.clone();
        for arg in &self.args {
            head.push(' ');
            head.push_str(arg);
        }
        if self.children.is_empty() {
            format!("{spaces}{head};")
        } else {
            format!(
                "{spaces}{head} {{\n{}\n{spaces}}}",
                self.dump_children(indent + 1)
            )
        }
    }

    fn dump_children(&self, indent: usize) -> String {
        self.children
            .iter()
            .map(|child| child.dump(indent))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, args: &[&str]) -> Node {
        Node::directive(name, args.iter().map(ToString::to_string).collect()).unwrap()
    }

    fn block(name: &str, args: &[&str], children: Vec<Node>) -> Node {
        Node::new(
            Some(name.to_string()),
            args.iter().map(ToString::to_string).collect(),
            children,
            false,
        )
        .unwrap()
    }

    #[test]
    fn non_root_requires_name() {
        assert!(matches!(
            Node::new(None, vec![], vec![], false),
            Err(Error::InvalidNode(_))
        ));
        assert!(matches!(
            Node::directive("", vec![]),
            Err(Error::InvalidNode(_))
        ));
    }

    #[test]
    fn root_rejects_name() {
        assert!(matches!(
            Node::new(Some("http".to_string()), vec![], vec![], true),
            Err(Error::InvalidNode(_))
        ));
    }

    #[test]
    fn root_rejects_args() {
        assert!(matches!(
            Node::new(None, vec!["x".to_string()], vec![], true),
            Err(Error::InvalidNode(_))
        ));
    }

    #[test]
    fn root_via_new() {
        let root = Node::new(None, vec![], vec![leaf("a", &[])], true).unwrap();
        assert!(root.is_root());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn query_prefix() {
        let root = Node::root(vec![
            leaf("listen", &["80"]),
            leaf("server_name", &["example.com"]),
            leaf("listen", &["443", "ssl"]),
        ]);

        let https: Vec<_> = root.query("listen", &["443"]).collect();
        assert_eq!(https, vec![&root.children()[2]]);

        let all: Vec<_> = root.query("listen", &[]).collect();
        assert_eq!(all, vec![&root.children()[0], &root.children()[2]]);

        assert_eq!(root.query("listen", &["443", "ssl", "http2"]).count(), 0);
    }

    #[test]
    fn query_is_not_recursive() {
        let root = Node::root(vec![block(
            "server",
            &[],
            vec![leaf("listen", &["80"])],
        )]);
        assert_eq!(root.query("listen", &[]).count(), 0);
        assert_eq!(root.query("server", &[]).count(), 1);
    }

    #[test]
    fn query_first_not_found() {
        let root = Node::root(vec![leaf("listen", &["80"])]);
        assert!(matches!(
            root.query_first("server_name", &[]),
            Err(Error::NotFound { name }) if name == "server_name"
        ));
        assert_eq!(root.query("server_name", &[]).count(), 0);
    }

    #[test]
    fn dump_nested() {
        let root = Node::root(vec![
            leaf("user", &["www-data"]),
            block(
                "http",
                &[],
                vec![block(
                    "server",
                    &[],
                    vec![leaf("listen", &["80"]), leaf("gzip", &[])],
                )],
            ),
        ]);
        let expected = "\
user www-data;
http {
    server {
        listen 80;
        gzip;
    }
}";
        assert_eq!(root.to_string(), expected);
    }

    #[test]
    fn empty_block_dumps_as_leaf() {
        let events = block("events", &[], vec![]);
        assert!(!events.is_block());
        assert_eq!(events.dump(1), "    events;");
    }

    #[test]
    fn serializes_to_json() {
        let root = Node::root(vec![leaf("listen", &["80"])]);
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": null,
                "args": [],
                "children": [{"name": "listen", "args": ["80"], "children": []}],
            })
        );
    }
}
