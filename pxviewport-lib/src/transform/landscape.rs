use crate::style::prop_list::PropListMatcher;
use crate::transform::converter::{PixelConverter, Target};
use crate::tree::css_tree::{AtRule, Node, Rule};

pub const LANDSCAPE_PARAMS: &str = "(orientation: landscape)";

/// Converted copy of `rule` for the landscape block, or `None` when none of
/// its declarations qualify.
pub fn landscape_rule(
    rule: &Rule,
    converter: &PixelConverter,
    prop_list: &PropListMatcher,
    target: Target<'_>,
) -> Option<Rule> {
    let mut copy = rule.clone_empty();

    for decl in rule.declarations() {
        if !converter.pattern().mentions_unit(&decl.value) || !prop_list.matches(&decl.prop) {
            continue;
        }
        let mut converted = decl.with_value(converter.convert(&decl.value, target));
        converted.raws = Default::default();
        copy.nodes.push(Node::Declaration(converted));
    }

    if copy.nodes.is_empty() {
        None
    } else {
        Some(copy)
    }
}

/// Wrap the collected rules in one `@media (orientation: landscape)` block.
pub fn landscape_block(rules: Vec<Rule>) -> AtRule {
    let mut media = AtRule::new("media", LANDSCAPE_PARAMS);
    for rule in rules {
        media.append(rule);
    }
    media
}
