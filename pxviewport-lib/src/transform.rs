//! The px → viewport pass over a parsed stylesheet.
//!
//! One walk in document order. For every rule: file filter, selector
//! blacklist, directive widths, landscape copy, media scope check, then the
//! declaration pass. Directive comments are dropped from every sibling list
//! whose widths some rule actually used, and the landscape block is appended
//! after the walk.

pub mod converter;
pub mod dedupe;
pub mod directive;
pub mod ignore;
pub mod landscape;

use crate::error::Result;
use crate::options::{Options, PartialOptions};
use crate::style::filters::{file_allowed, is_blacklisted};
use crate::style::prop_list::PropListMatcher;
use crate::style::unit_pattern::UnitPattern;
use crate::tree::css_tree::{Node, Rule, Source, Stylesheet};
use converter::{PixelConverter, Target};
use dedupe::declaration_exists;
use directive::{ActiveWidths, DirectiveIndex};
use ignore::IgnoreDecision;
use std::fmt;

/// A non-fatal diagnostic raised while transforming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Warning {
    fn at(message: String, source: Option<&Source>) -> Self {
        Warning {
            message,
            line: source.map(|s| s.line),
            column: source.map(|s| s.column),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: {}", line, column, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// What one invocation did besides mutating the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformReport {
    pub warnings: Vec<Warning>,
    /// Rules placed in the generated landscape block.
    pub landscape_rules: usize,
    /// Directive comments removed from the tree.
    pub directives_removed: usize,
}

/// Per-invocation state. Created fresh by [`PxToViewport::transform`] and
/// dropped when it returns.
#[derive(Default)]
struct TransformContext {
    landscape_rules: Vec<Rule>,
    warnings: Vec<Warning>,
    directives_removed: usize,
}

/// Compiled settings. Immutable, so one instance can serve many stylesheets,
/// including from several threads at once.
#[derive(Debug, Clone)]
pub struct PxToViewport {
    options: Options,
    converter: PixelConverter,
    prop_list: PropListMatcher,
}

impl PxToViewport {
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let pattern = UnitPattern::new(&options.unit_to_convert)?;
        Ok(PxToViewport {
            converter: PixelConverter::new(pattern, options.unit_precision, options.min_pixel_value),
            prop_list: PropListMatcher::new(&options.prop_list),
            options,
        })
    }

    /// Resolve user settings over the defaults, then compile.
    pub fn from_partial(partial: PartialOptions) -> Result<Self> {
        PxToViewport::new(Options::resolve(partial)?)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Rewrite `sheet` in place.
    pub fn transform(&self, sheet: &mut Stylesheet) -> TransformReport {
        let mut ctx = TransformContext::default();
        let widths = ActiveWidths {
            viewport: self.options.viewport_width,
            landscape: self.options.landscape_width,
        };

        self.walk(&mut sheet.nodes, None, widths, &mut ctx);

        let landscape_rules = ctx.landscape_rules.len();
        if landscape_rules > 0 {
            let block = landscape::landscape_block(std::mem::take(&mut ctx.landscape_rules));
            sheet.nodes.push(Node::AtRule(block));
        }

        log::debug!(
            "transform finished: {} landscape rule(s), {} directive(s) removed, {} warning(s)",
            landscape_rules,
            ctx.directives_removed,
            ctx.warnings.len()
        );

        TransformReport {
            warnings: ctx.warnings,
            landscape_rules,
            directives_removed: ctx.directives_removed,
        }
    }

    /// Visit one sibling list. `params` is the nearest enclosing at-rule's
    /// params, `inherited` the widths in force where the list starts.
    ///
    /// Returns whether any rule in the list, or nested below it, passed the
    /// file and selector filters and so read the active widths.
    fn walk(
        &self,
        nodes: &mut Vec<Node>,
        params: Option<&str>,
        inherited: ActiveWidths,
        ctx: &mut TransformContext,
    ) -> bool {
        let index = DirectiveIndex::build(nodes, inherited);
        let mut consulted = false;

        for position in 0..nodes.len() {
            let widths = index.widths_at(position);
            match &mut nodes[position] {
                Node::Rule(rule) => {
                    consulted |= self.process_rule(rule, params, widths, ctx);
                    consulted |= self.walk(&mut rule.nodes, params, widths, ctx);
                }
                Node::AtRule(at_rule) => {
                    let inner = if at_rule.params.is_empty() {
                        params
                    } else {
                        Some(at_rule.params.as_str())
                    };
                    if let Some(children) = at_rule.nodes.as_mut() {
                        consulted |= self.walk(children, inner, widths, ctx);
                    }
                }
                Node::Declaration(_) | Node::Comment(_) => {}
            }
        }

        // Filtered-out content is left exactly as written, directives included.
        if !consulted {
            return false;
        }

        // Positions are still valid: the loop above never changes this list's length.
        for &position in index.directive_positions().iter().rev() {
            nodes.remove(position);
            ctx.directives_removed += 1;
        }
        true
    }

    /// Returns false when the rule was filtered out by file or selector.
    fn process_rule(
        &self,
        rule: &mut Rule,
        params: Option<&str>,
        widths: ActiveWidths,
        ctx: &mut TransformContext,
    ) -> bool {
        let options = &self.options;

        if !file_allowed(options.include.as_ref(), options.exclude.as_ref(), rule.file()) {
            log::debug!("skipping `{}`: filtered by file path", rule.selector);
            return false;
        }
        if is_blacklisted(&options.selector_black_list, &rule.selector) {
            log::debug!("skipping `{}`: blacklisted selector", rule.selector);
            return false;
        }

        if options.landscape && params.is_none() {
            let target = Target {
                unit: &options.landscape_unit,
                base_width: widths.landscape,
            };
            if let Some(copy) = landscape::landscape_rule(rule, &self.converter, &self.prop_list, target) {
                ctx.landscape_rules.push(copy);
            }
        }

        if params.is_some() && !options.media_query {
            log::debug!("skipping `{}`: inside a media query", rule.selector);
            return true;
        }

        let in_landscape_query = options.landscape && params.map_or(false, |p| p.contains("landscape"));
        self.convert_declarations(rule, in_landscape_query, widths, ctx);
        true
    }

    fn convert_declarations(
        &self,
        rule: &mut Rule,
        in_landscape_query: bool,
        widths: ActiveWidths,
        ctx: &mut TransformContext,
    ) {
        let options = &self.options;
        let nodes = &mut rule.nodes;
        let mut position = 0;

        // Removals and insertions below adjust `position` so that every
        // original declaration is visited exactly once and inserted copies never are.
        while position < nodes.len() {
            let Node::Declaration(decl) = &nodes[position] else {
                position += 1;
                continue;
            };
            if !self.converter.pattern().mentions_unit(&decl.value) || !self.prop_list.matches(&decl.prop) {
                position += 1;
                continue;
            }

            match ignore::inspect(nodes, position) {
                IgnoreDecision::SkipRemovePrevious => {
                    nodes.remove(position - 1);
                    continue;
                }
                IgnoreDecision::SkipRemoveNext => {
                    nodes.remove(position + 1);
                    position += 1;
                    continue;
                }
                IgnoreDecision::ConvertMisplacedMarker => {
                    let marker = nodes[position + 1].source();
                    let warning = Warning::at(ignore::misplaced_marker_message(), marker);
                    log::warn!("{}", warning);
                    ctx.warnings.push(warning);
                }
                IgnoreDecision::Convert => {}
            }

            let Node::Declaration(decl) = &nodes[position] else {
                position += 1;
                continue;
            };
            let target = if in_landscape_query {
                Target {
                    unit: &options.landscape_unit,
                    base_width: widths.landscape,
                }
            } else {
                Target {
                    unit: self.unit_for(&decl.prop),
                    base_width: widths.viewport,
                }
            };
            let value = self.converter.convert(&decl.value, target).into_owned();
            log::trace!("{}: {} -> {}", decl.prop, decl.value, value);

            if options.replace {
                if let Node::Declaration(decl) = &mut nodes[position] {
                    decl.value = value;
                }
                position += 1;
            } else if declaration_exists(nodes, &decl.prop, &value) {
                position += 1;
            } else {
                let copy = decl.with_value(value);
                nodes.insert(position + 1, Node::Declaration(copy));
                position += 2;
            }
        }
    }

    fn unit_for(&self, prop: &str) -> &str {
        if prop.contains("font") {
            &self.options.font_viewport_unit
        } else {
            &self.options.viewport_unit
        }
    }
}
