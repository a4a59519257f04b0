use crate::tree::css_tree::Node;

/// True when `siblings` already holds `prop: value`.
pub fn declaration_exists(siblings: &[Node], prop: &str, value: &str) -> bool {
    siblings
        .iter()
        .filter_map(Node::as_declaration)
        .any(|decl| decl.prop == prop && decl.value == value)
}
