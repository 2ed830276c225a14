//! Shape predicates over lowered nodes. All of them are total: a node the
//! classifier does not recognize is a non-match, never an error.

use crate::ast::{NodeData, NodeId, NodeKind, SyntaxTree};

pub fn is_import_declaration(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ImportDeclaration
}

pub fn is_named_specifier(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ImportSpecifier
}

pub fn is_namespace_specifier(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ImportNamespaceSpecifier
}

pub fn is_call_expression(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::CallExpression
}

pub fn is_identifier(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::Identifier
}

pub fn is_member_expression(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::MemberExpression
}

pub fn is_object_pattern(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ObjectPattern
}

pub fn is_property(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::Property
}

pub fn is_literal(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::StringLiteral
}

pub fn is_block_statement(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::BlockStatement
}

pub fn is_variable_declarator(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::VariableDeclarator
}

pub fn is_array_expression(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ArrayExpression
}

pub fn is_await_expression(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::AwaitExpression
}

pub fn is_arrow_function(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ArrowFunction
}

pub fn is_return_statement(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::ReturnStatement
}

/// Matches a call whose callee identifier name, or callee property name for
/// member calls like `rtl.render(...)`, is one of `names`.
pub fn is_render_call(tree: &SyntaxTree, id: NodeId, names: &[&str]) -> bool {
    let NodeData::CallExpression { callee, .. } = &tree.node(id).data else {
        return false;
    };
    match &tree.node(*callee).data {
        NodeData::Identifier { name } => names.contains(&name.as_str()),
        NodeData::MemberExpression { property, .. } => {
            tree.ident_name(*property).is_some_and(|n| names.contains(&n))
        }
        _ => false,
    }
}

/// Matches a member expression accessing a `then` property, the shape left
/// behind by promise chaining.
pub fn has_then_property(tree: &SyntaxTree, id: NodeId) -> bool {
    let NodeData::MemberExpression { property, .. } = &tree.node(id).data else {
        return false;
    };
    tree.ident_name(*property) == Some("then")
}

/// Nearest enclosing call expression, starting at `id` itself. The ascent is
/// iterative over parent links and stops at the root.
pub fn closest_call(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    let mut current = Some(id);
    while let Some(node) = current {
        if is_call_expression(tree, node) {
            return Some(node);
        }
        current = tree.parent(node);
    }
    None
}

/// Nearest enclosing call matching one of `names`, with the same matching
/// semantics as [`is_render_call`].
pub fn closest_call_named(tree: &SyntaxTree, id: NodeId, names: &[&str]) -> Option<NodeId> {
    let mut current = Some(id);
    while let Some(node) = current {
        if is_render_call(tree, node, names) {
            return Some(node);
        }
        current = tree.parent(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use oxc_span::SourceType;

    fn parse(src: &str) -> SyntaxTree {
        parse_source(src, SourceType::default()).unwrap()
    }

    fn find(tree: &SyntaxTree, kind: NodeKind) -> NodeId {
        tree.ids().find(|id| tree.kind(*id) == kind).unwrap()
    }

    #[test]
    fn test_predicates_match_their_kind_only() {
        let tree = parse("import { a } from 'x'; const { b } = require('y');");
        let decl = find(&tree, NodeKind::ImportDeclaration);
        let call = find(&tree, NodeKind::CallExpression);

        assert!(is_import_declaration(&tree, decl));
        assert!(!is_import_declaration(&tree, call));
        assert!(is_call_expression(&tree, call));
        assert!(!is_call_expression(&tree, decl));
        assert!(is_named_specifier(&tree, find(&tree, NodeKind::ImportSpecifier)));
        assert!(is_object_pattern(&tree, find(&tree, NodeKind::ObjectPattern)));
        assert!(is_property(&tree, find(&tree, NodeKind::Property)));
    }

    #[test]
    fn test_predicates_do_not_match_unknown_shapes() {
        let tree = parse("class Widget {}");
        for id in tree.ids() {
            assert!(!is_import_declaration(&tree, id));
            assert!(!is_call_expression(&tree, id));
            assert!(!is_render_call(&tree, id, &["render"]));
        }
    }

    #[test]
    fn test_is_render_call_by_identifier() {
        let tree = parse("render(App);");
        let call = find(&tree, NodeKind::CallExpression);
        assert!(is_render_call(&tree, call, &["render"]));
        assert!(!is_render_call(&tree, call, &["mount"]));
    }

    #[test]
    fn test_is_render_call_by_property() {
        let tree = parse("rtl.render(App);");
        let call = find(&tree, NodeKind::CallExpression);
        assert!(is_render_call(&tree, call, &["render"]));
    }

    #[test]
    fn test_has_then_property() {
        let tree = parse("query().then(cb); other().value;");
        let members: Vec<NodeId> =
            tree.ids().filter(|id| is_member_expression(&tree, *id)).collect();
        assert_eq!(members.iter().filter(|id| has_then_property(&tree, **id)).count(), 1);
    }

    #[test]
    fn test_closest_call_from_nested_identifier() {
        let tree = parse("wrapper(inner());");
        let inner = tree
            .ids()
            .find(|id| {
                let NodeData::CallExpression { callee, .. } = &tree.node(*id).data else {
                    return false;
                };
                tree.ident_name(*callee) == Some("inner")
            })
            .unwrap();
        // Starting at the call itself returns it
        assert_eq!(closest_call(&tree, inner), Some(inner));

        // Starting above it finds the enclosing call
        let outer = closest_call(&tree, tree.parent(inner).unwrap()).unwrap();
        assert!(is_render_call(&tree, outer, &["wrapper"]));
    }

    #[test]
    fn test_closest_call_stops_at_root() {
        let tree = parse("import { a } from 'x';");
        let decl = find(&tree, NodeKind::ImportDeclaration);
        assert_eq!(closest_call(&tree, decl), None);
    }

    #[test]
    fn test_closest_call_named() {
        let tree = parse("waitFor(() => { probe(); });");
        let probe = tree
            .ids()
            .find(|id| {
                let NodeData::CallExpression { callee, .. } = &tree.node(*id).data else {
                    return false;
                };
                tree.ident_name(*callee) == Some("probe")
            })
            .unwrap();
        let found = closest_call_named(&tree, probe, &["waitFor"]).unwrap();
        assert!(is_render_call(&tree, found, &["waitFor"]));
        assert_eq!(closest_call_named(&tree, probe, &["somethingElse"]), None);
    }
}
