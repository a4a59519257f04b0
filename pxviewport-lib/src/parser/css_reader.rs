//! Reads CSS text into the [`css_tree`](crate::tree::css_tree) model.
//!
//! Built on the `cssparser` tokenizer. Unlike a style-computing parser this one
//! keeps comments and the whitespace around every node, because the transform
//! needs directive and ignore comments and the printer needs the original layout.

use crate::tree::css_tree::{AtRule, Comment, Declaration, Node, Raws, Rule, Source, Stylesheet};
use cssparser::{Delimiter, ParseError, Parser, ParserInput, ParserState, SourceLocation, SourcePosition, Token};
use std::mem;
use std::path::Path;
use std::sync::Arc;

/// Parse a stylesheet. Every node is tagged with `from` (if given) so file
/// filters can see where rules originate.
///
/// The reader never fails: unbalanced closing tokens are dropped and open
/// blocks are closed at end of input, the same recovery a browser applies.
pub fn parse_stylesheet(css: &str, from: Option<&Path>) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let reader = CssReader {
        file: from.map(Arc::from),
    };
    let block = reader.read_block(&mut parser);

    Stylesheet {
        nodes: block.nodes,
        source: reader.file.clone(),
        raws: Raws {
            after: Some(block.after),
            semicolon: block.semicolon,
            ..Raws::default()
        },
    }
}

/// Contents of a stylesheet or of a `{}` block.
#[derive(Default)]
struct Block {
    nodes: Vec<Node>,
    /// Whitespace after the last node.
    after: String,
    semicolon: bool,
}

struct CssReader {
    file: Option<Arc<Path>>,
}

impl CssReader {
    fn source(&self, location: SourceLocation) -> Option<Source> {
        Some(Source {
            file: self.file.clone(),
            line: location.line + 1,
            column: location.column,
        })
    }

    fn read_block<'i, 't>(&self, parser: &mut Parser<'i, 't>) -> Block {
        let mut block = Block::default();
        let mut before = String::new();

        loop {
            let start = parser.state();
            let location = parser.current_source_location();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match token {
                Token::WhiteSpace(ws) => before.push_str(ws),
                Token::Comment(body) => {
                    block.nodes.push(Node::Comment(Comment {
                        text: body.trim().to_string(),
                        source: self.source(location),
                        raws: Raws {
                            before: Some(mem::take(&mut before)),
                            text: Some(body.to_string()),
                            ..Raws::default()
                        },
                    }));
                }
                // Stray separators and closers carry no meaning here.
                Token::Semicolon
                | Token::CloseCurlyBracket
                | Token::CloseParenthesis
                | Token::CloseSquareBracket => {}
                Token::AtKeyword(name) => {
                    let at_rule = self.read_at_rule(parser, name.to_string(), mem::take(&mut before), location);
                    block.nodes.push(Node::AtRule(at_rule));
                }
                _ => {
                    parser.reset(&start);
                    let (node, trailing) = self.read_rule_or_declaration(parser, mem::take(&mut before), location);
                    block.nodes.push(node);
                    before = trailing;
                }
            }
        }

        // Remember whether the last declaration had its semicolon.
        if let Some(decl) = block.nodes.iter().rev().find_map(Node::as_declaration) {
            block.semicolon = decl.raws.semicolon;
        }
        block.after = before;
        block
    }

    fn read_at_rule<'i, 't>(
        &self,
        parser: &mut Parser<'i, 't>,
        name: String,
        before: String,
        location: SourceLocation,
    ) -> AtRule {
        let prelude = read_prelude(parser).text;
        let params = prelude.trim();
        let after_name = prelude[..prelude.len() - prelude.trim_start().len()].to_string();
        let between = if params.is_empty() {
            String::new()
        } else {
            prelude[prelude.trim_end().len()..].to_string()
        };

        let mut raws = Raws {
            before: Some(before),
            after_name: Some(if params.is_empty() { String::new() } else { after_name }),
            between: Some(if params.is_empty() { prelude.clone() } else { between }),
            ..Raws::default()
        };

        let nodes = match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let block = parser
                    .parse_nested_block(|p| Ok::<_, ParseError<'i, ()>>(self.read_block(p)))
                    .unwrap_or_default();
                raws.after = Some(block.after);
                raws.semicolon = block.semicolon;
                Some(block.nodes)
            }
            _ => None,
        };

        AtRule {
            name,
            params: params.to_string(),
            nodes,
            source: self.source(location),
            raws,
        }
    }

    /// Returns the node plus any whitespace it left unclaimed, which belongs
    /// in front of whatever follows.
    fn read_rule_or_declaration<'i, 't>(
        &self,
        parser: &mut Parser<'i, 't>,
        before: String,
        location: SourceLocation,
    ) -> (Node, String) {
        let Prelude { text: prelude, start, trailing } = read_prelude(parser);
        let end = parser.state();

        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let block = parser
                    .parse_nested_block(|p| Ok::<_, ParseError<'i, ()>>(self.read_block(p)))
                    .unwrap_or_default();
                let selector = prelude.trim_end();
                let rule = Node::Rule(Rule {
                    selector: selector.to_string(),
                    nodes: block.nodes,
                    source: self.source(location),
                    raws: Raws {
                        before: Some(before),
                        between: Some(prelude[selector.len()..].to_string()),
                        after: Some(block.after),
                        semicolon: block.semicolon,
                        ..Raws::default()
                    },
                });
                (rule, String::new())
            }
            Ok(Token::Semicolon) => (
                Node::Declaration(self.declaration(&prelude, before, location, true)),
                String::new(),
            ),
            // Block or input ended without `;`. Whitespace and comments after
            // the value are read again as siblings of the declaration.
            _ => match trailing {
                Some(state) => {
                    let text = parser.slice(start..state.position());
                    parser.reset(&state);
                    (
                        Node::Declaration(self.declaration(text, before, location, false)),
                        String::new(),
                    )
                }
                None => {
                    parser.reset(&end);
                    (
                        Node::Declaration(self.declaration(&prelude, before, location, false)),
                        String::new(),
                    )
                }
            },
        }
    }

    fn declaration(&self, prelude: &str, before: String, location: SourceLocation, semicolon: bool) -> Declaration {
        let (prop, between, mut value) = match prelude.find(':') {
            Some(colon) => {
                let prop = prelude[..colon].trim_end();
                let rest = &prelude[colon + 1..];
                let value = rest.trim_start();
                let between = &prelude[prop.len()..prelude.len() - value.len()];
                (prop, between, value.trim_end())
            }
            None => (prelude.trim_end(), "", ""),
        };

        let mut important = false;
        if let Some(stripped) = strip_important(value) {
            value = stripped;
            important = true;
        }

        Declaration {
            prop: prop.to_string(),
            value: value.to_string(),
            important,
            source: self.source(location),
            raws: Raws {
                before: Some(before),
                between: Some(between.to_string()),
                semicolon,
                ..Raws::default()
            },
        }
    }
}

/// Text of a rule selector, at-rule prelude or declaration.
struct Prelude {
    text: String,
    start: SourcePosition,
    /// Where the run of whitespace and comments at the end of `text` begins.
    trailing: Option<ParserState>,
}

/// Consume everything up to (not including) the next `{` or `;` at this
/// nesting level and return it verbatim.
fn read_prelude<'i, 't>(parser: &mut Parser<'i, 't>) -> Prelude {
    let start = parser.position();
    let mut trailing = None;
    let _ = parser.parse_until_before(Delimiter::CurlyBracketBlock | Delimiter::Semicolon, |p| {
        loop {
            let state = p.state();
            let opens_block = match p.next_including_whitespace_and_comments() {
                Err(_) => break,
                Ok(Token::WhiteSpace(_)) | Ok(Token::Comment(_)) => {
                    trailing.get_or_insert(state);
                    false
                }
                Ok(token) => {
                    trailing = None;
                    matches!(
                        token,
                        Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock
                    )
                }
            };
            // Consume nested blocks right away so every recorded state sits
            // between two top-level tokens.
            if opens_block {
                let _ = p.parse_nested_block(consume_all);
            }
        }
        Ok::<_, ParseError<'i, ()>>(())
    });
    Prelude {
        text: parser.slice_from(start).to_string(),
        start,
        trailing,
    }
}

fn consume_all<'i, 't>(parser: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, ()>> {
    while parser.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
}

fn strip_important(value: &str) -> Option<&str> {
    let bang = value.rfind('!')?;
    let flag = value[bang + 1..].trim();
    if flag.eq_ignore_ascii_case("important") {
        Some(value[..bang].trim_end())
    } else {
        None
    }
}
