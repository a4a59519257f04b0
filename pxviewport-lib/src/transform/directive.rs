//! Width directives written as comments inside the stylesheet:
//!
//! ```css
//! /* viewport-width: 750 */
//! /* landscape-width: 1334 */
//! ```
//!
//! A directive applies to every following sibling (and everything nested in
//! them) until the next directive of the same kind.

use crate::tree::css_tree::Node;
use regex::Regex;
use std::sync::OnceLock;

/// Base widths in effect at some point of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWidths {
    pub viewport: f64,
    pub landscape: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectiveKind {
    Viewport,
    Landscape,
}

/// A recognized directive comment. `width` is `None` when the number is not
/// a usable width; such a directive changes nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub width: Option<f64>,
}

fn viewport_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"viewport-width:\s*(\d*\.?\d+)").expect("static regex"))
}

fn landscape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"landscape-width:\s*(\d*\.?\d+)").expect("static regex"))
}

impl Directive {
    pub fn parse(text: &str) -> Option<Directive> {
        let (kind, caps) = if let Some(caps) = landscape_regex().captures(text) {
            (DirectiveKind::Landscape, caps)
        } else {
            (DirectiveKind::Viewport, viewport_regex().captures(text)?)
        };
        let width = caps[1]
            .parse::<f64>()
            .ok()
            .filter(|width| width.is_finite() && *width > 0.0);
        Some(Directive { kind, width })
    }

    pub fn from_node(node: &Node) -> Option<Directive> {
        node.as_comment().and_then(|comment| Directive::parse(&comment.text))
    }

    fn apply(&self, widths: &mut ActiveWidths) {
        match (self.kind, self.width) {
            (DirectiveKind::Viewport, Some(width)) => widths.viewport = width,
            (DirectiveKind::Landscape, Some(width)) => widths.landscape = width,
            (_, None) => {}
        }
    }
}

/// Active widths for every position of one sibling list, computed in a single
/// forward pass.
#[derive(Debug, Clone)]
pub struct DirectiveIndex {
    widths: Vec<ActiveWidths>,
    directives: Vec<usize>,
    inherited: ActiveWidths,
}

impl DirectiveIndex {
    /// `inherited` is what applies before the first sibling: the widths at the
    /// parent's position, or the configured widths at the top level.
    pub fn build(siblings: &[Node], inherited: ActiveWidths) -> Self {
        let mut widths = Vec::with_capacity(siblings.len());
        let mut directives = Vec::new();
        let mut active = inherited;

        for (position, node) in siblings.iter().enumerate() {
            if let Some(directive) = Directive::from_node(node) {
                directive.apply(&mut active);
                directives.push(position);
            }
            widths.push(active);
        }

        DirectiveIndex {
            widths,
            directives,
            inherited,
        }
    }

    /// Widths for the sibling at `position`, taking every directive before it
    /// into account.
    pub fn widths_at(&self, position: usize) -> ActiveWidths {
        self.widths.get(position).copied().unwrap_or(self.inherited)
    }

    /// Positions of the directive comments, in document order.
    pub fn directive_positions(&self) -> &[usize] {
        &self.directives
    }
}
