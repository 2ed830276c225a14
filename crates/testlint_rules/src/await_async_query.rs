//! Async queries (`findBy*` / `findAllBy*`) return promises; a call whose
//! result is neither awaited, returned, nor chained is almost always a
//! missed assertion.

use testlint_core::classify::{closest_call, has_then_property};
use testlint_core::constants::ASYNC_QUERY_PREFIXES;
use testlint_core::{NodeData, NodeId, NodeKind, RuleCtx, SyntaxTree, VisitorTable};

pub const RULE_ID: &str = "await-async-query";

pub fn visitors() -> VisitorTable {
    let mut table = VisitorTable::new();
    table.on(NodeKind::CallExpression, check_call);
    table
}

pub fn message(data: Option<&str>) -> String {
    let name = data.unwrap_or("an async query");
    format!("promise returned from `{}` must be awaited, returned, or chained with `.then`", name)
}

fn check_call(ctx: &mut RuleCtx<'_>, id: NodeId) {
    let tree = ctx.tree();
    let Some(name) = callee_name(tree, id) else {
        return;
    };
    if !ASYNC_QUERY_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return;
    }
    if !is_promise_handled(tree, id) {
        let name = name.to_string();
        ctx.report(id, RULE_ID, Some(name));
    }
}

fn callee_name(tree: &SyntaxTree, id: NodeId) -> Option<&str> {
    let NodeData::CallExpression { callee, .. } = &tree.node(id).data else {
        return None;
    };
    match &tree.node(*callee).data {
        NodeData::Identifier { name } => Some(name),
        NodeData::MemberExpression { property, .. } => tree.ident_name(*property),
        _ => None,
    }
}

/// Ascends parent links from the query call looking for an `await`, an
/// explicit or implicit return, or a called `.then` chain. Stops at the
/// nearest enclosing function body.
fn is_promise_handled(tree: &SyntaxTree, id: NodeId) -> bool {
    let mut current = id;
    while let Some(parent) = tree.parent(current) {
        match &tree.node(parent).data {
            NodeData::AwaitExpression { .. } | NodeData::ReturnStatement { .. } => return true,
            NodeData::MemberExpression { object, .. } if *object == current => {
                if has_then_property(tree, parent) && closest_call(tree, parent).is_some() {
                    return true;
                }
            }
            // A braceless arrow body is an implicit return
            NodeData::ArrowFunction { expression: true, .. } => return true,
            NodeData::ArrowFunction { .. } | NodeData::BlockStatement { .. } => return false,
            _ => {}
        }
        current = parent;
    }
    false
}
