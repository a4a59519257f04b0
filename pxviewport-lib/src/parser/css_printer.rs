//! Serializes a [`Stylesheet`] back to CSS text.
//!
//! Recorded raws are written back verbatim; nodes built in code (landscape
//! block, cloned rules) fall back to two-space indentation.

use crate::tree::css_tree::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

pub fn to_css(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_stylesheet(&mut out, sheet);
    out
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stylesheet(f, self)
    }
}

fn write_stylesheet<W: Write>(out: &mut W, sheet: &Stylesheet) -> fmt::Result {
    write_nodes(out, &sheet.nodes, 0, sheet.raws.semicolon)?;
    if let Some(after) = &sheet.raws.after {
        out.write_str(after)?;
    }
    Ok(())
}

fn write_nodes<W: Write>(out: &mut W, nodes: &[Node], depth: usize, semicolon: bool) -> fmt::Result {
    // Trailing comments do not count: `a: 1 /* c */` keeps its missing `;`.
    let last_significant = nodes.iter().rposition(|node| !matches!(node, Node::Comment(_)));

    for (i, node) in nodes.iter().enumerate() {
        let last = Some(i) == last_significant;
        let before = |raw: &Option<String>| -> String {
            match raw {
                Some(raw) => raw.clone(),
                None if depth == 0 && i == 0 => String::new(),
                None => format!("\n{}", INDENT.repeat(depth)),
            }
        };

        match node {
            Node::Declaration(decl) => {
                out.write_str(&before(&decl.raws.before))?;
                write_declaration(out, decl)?;
                if !last || semicolon {
                    out.write_char(';')?;
                }
            }
            Node::Comment(comment) => {
                out.write_str(&before(&comment.raws.before))?;
                write_comment(out, comment)?;
            }
            Node::Rule(rule) => {
                out.write_str(&before(&rule.raws.before))?;
                write_rule(out, rule, depth)?;
            }
            Node::AtRule(at_rule) => {
                out.write_str(&before(&at_rule.raws.before))?;
                write_at_rule(out, at_rule, depth)?;
            }
        }
    }
    Ok(())
}

fn write_declaration<W: Write>(out: &mut W, decl: &Declaration) -> fmt::Result {
    out.write_str(&decl.prop)?;
    match &decl.raws.between {
        Some(between) => out.write_str(between)?,
        None => out.write_str(": ")?,
    }
    out.write_str(&decl.value)?;
    if decl.important {
        out.write_str(" !important")?;
    }
    Ok(())
}

fn write_comment<W: Write>(out: &mut W, comment: &Comment) -> fmt::Result {
    match &comment.raws.text {
        Some(body) => write!(out, "/*{}*/", body),
        None => write!(out, "/* {} */", comment.text),
    }
}

fn write_rule<W: Write>(out: &mut W, rule: &Rule, depth: usize) -> fmt::Result {
    out.write_str(&rule.selector)?;
    out.write_str(rule.raws.between.as_deref().unwrap_or(" "))?;
    write_block(out, &rule.nodes, &rule.raws.after, rule.raws.semicolon, depth)
}

fn write_at_rule<W: Write>(out: &mut W, at_rule: &AtRule, depth: usize) -> fmt::Result {
    write!(out, "@{}", at_rule.name)?;
    if !at_rule.params.is_empty() {
        out.write_str(at_rule.raws.after_name.as_deref().unwrap_or(" "))?;
        out.write_str(&at_rule.params)?;
    }
    match &at_rule.nodes {
        Some(nodes) => {
            out.write_str(at_rule.raws.between.as_deref().unwrap_or(" "))?;
            write_block(out, nodes, &at_rule.raws.after, at_rule.raws.semicolon, depth)
        }
        None => {
            out.write_str(at_rule.raws.between.as_deref().unwrap_or(""))?;
            out.write_char(';')
        }
    }
}

fn write_block<W: Write>(
    out: &mut W,
    nodes: &[Node],
    after: &Option<String>,
    semicolon: bool,
    depth: usize,
) -> fmt::Result {
    out.write_char('{')?;
    write_nodes(out, nodes, depth + 1, semicolon)?;
    match after {
        Some(after) => out.write_str(after)?,
        None if nodes.is_empty() => {}
        None => write!(out, "\n{}", INDENT.repeat(depth))?,
    }
    out.write_char('}')
}
