use std::path::Path;
use std::sync::Arc;

pub mod css_tree {
    use super::*;

    /// One child of a stylesheet or of a block.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Node {
        Rule(Rule),
        AtRule(AtRule),
        Declaration(Declaration),
        Comment(Comment),
    }

    /// Where a node came from. `line` is 1-based, `column` is 1-based.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Source {
        pub file: Option<Arc<Path>>,
        pub line: u32,
        pub column: u32,
    }

    /// Formatting recorded by the reader so the printer can reproduce the input.
    ///
    /// A `None` field means "use the printer's default".
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Raws {
        /// Whitespace in front of the node.
        pub before: Option<String>,
        /// Rules: between selector and `{`. Declarations: the `:` and its padding.
        /// At-rules: between params and `{` or `;`.
        pub between: Option<String>,
        /// Whitespace before a closing `}`.
        pub after: Option<String>,
        /// At-rules: whitespace between the name and the params.
        pub after_name: Option<String>,
        /// Comments: the untrimmed body between `/*` and `*/`.
        pub text: Option<String>,
        /// Containers: whether the last declaration ended with `;`.
        pub semicolon: bool,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Stylesheet {
        pub nodes: Vec<Node>,
        pub source: Option<Arc<Path>>,
        pub raws: Raws,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Rule {
        pub selector: String,
        pub nodes: Vec<Node>,
        pub source: Option<Source>,
        pub raws: Raws,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct AtRule {
        pub name: String,
        pub params: String,
        /// `None` for statement at-rules such as `@import "a.css";`.
        pub nodes: Option<Vec<Node>>,
        pub source: Option<Source>,
        pub raws: Raws,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Declaration {
        pub prop: String,
        pub value: String,
        pub important: bool,
        pub source: Option<Source>,
        pub raws: Raws,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Comment {
        /// Body with surrounding whitespace trimmed.
        pub text: String,
        pub source: Option<Source>,
        pub raws: Raws,
    }

    impl Stylesheet {
        pub fn new() -> Self {
            Stylesheet::default()
        }

        pub fn append(&mut self, node: Node) {
            self.nodes.push(node);
        }
    }

    impl Rule {
        pub fn new(selector: impl Into<String>) -> Self {
            Rule {
                selector: selector.into(),
                nodes: Vec::new(),
                source: None,
                raws: Raws::default(),
            }
        }

        /// Builder-style append, handy for programmatic trees.
        pub fn with(mut self, node: impl Into<Node>) -> Self {
            self.nodes.push(node.into());
            self
        }

        /// Copy of the rule keeping selector and source, with no children and fresh raws.
        pub fn clone_empty(&self) -> Self {
            Rule {
                selector: self.selector.clone(),
                nodes: Vec::new(),
                source: self.source.clone(),
                raws: Raws {
                    semicolon: true,
                    ..Raws::default()
                },
            }
        }

        pub fn file(&self) -> Option<&Path> {
            self.source.as_ref().and_then(|s| s.file.as_deref())
        }

        pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
            self.nodes.iter().filter_map(|node| match node {
                Node::Declaration(decl) => Some(decl),
                _ => None,
            })
        }
    }

    impl AtRule {
        /// A block at-rule with no children yet.
        pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
            AtRule {
                name: name.into(),
                params: params.into(),
                nodes: Some(Vec::new()),
                source: None,
                raws: Raws::default(),
            }
        }

        pub fn append(&mut self, node: impl Into<Node>) {
            self.nodes.get_or_insert_with(Vec::new).push(node.into());
        }
    }

    impl Declaration {
        pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
            Declaration {
                prop: prop.into(),
                value: value.into(),
                important: false,
                source: None,
                raws: Raws::default(),
            }
        }

        /// Copy carrying a different value; source and formatting are kept.
        pub fn with_value(&self, value: impl Into<String>) -> Self {
            Declaration {
                value: value.into(),
                ..self.clone()
            }
        }
    }

    impl Comment {
        pub fn new(text: impl Into<String>) -> Self {
            Comment {
                text: text.into(),
                source: None,
                raws: Raws::default(),
            }
        }

        /// True when the comment is preceded by a line break, i.e. it does not
        /// share a line with the node before it.
        pub fn starts_own_line(&self) -> bool {
            self.raws
                .before
                .as_deref()
                .map_or(false, |before| before.contains('\n'))
        }
    }

    impl Node {
        pub fn as_comment(&self) -> Option<&Comment> {
            match self {
                Node::Comment(comment) => Some(comment),
                _ => None,
            }
        }

        pub fn as_declaration(&self) -> Option<&Declaration> {
            match self {
                Node::Declaration(decl) => Some(decl),
                _ => None,
            }
        }

        pub fn source(&self) -> Option<&Source> {
            match self {
                Node::Rule(rule) => rule.source.as_ref(),
                Node::AtRule(at_rule) => at_rule.source.as_ref(),
                Node::Declaration(decl) => decl.source.as_ref(),
                Node::Comment(comment) => comment.source.as_ref(),
            }
        }
    }

    impl From<Rule> for Node {
        fn from(rule: Rule) -> Self {
            Node::Rule(rule)
        }
    }

    impl From<AtRule> for Node {
        fn from(at_rule: AtRule) -> Self {
            Node::AtRule(at_rule)
        }
    }

    impl From<Declaration> for Node {
        fn from(decl: Declaration) -> Self {
            Node::Declaration(decl)
        }
    }

    impl From<Comment> for Node {
        fn from(comment: Comment) -> Self {
            Node::Comment(comment)
        }
    }
}
