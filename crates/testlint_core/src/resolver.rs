use log::trace;

use crate::ast::{NodeData, NodeId, SyntaxTree};
use crate::detect::{DetectionState, ImportNode};

/// How a requested symbol is locally bound through the recorded import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierBinding {
    /// The local binding identifier of `import { symbol as local }`.
    Named(NodeId),
    /// The alias of `import * as ns`; uses go through `ns.symbol`.
    Namespace(NodeId),
    /// The key identifier of `const { symbol: local } = require(...)`,
    /// not the renamed local.
    DestructuredKey(NodeId),
    /// The identifier of `const mod = require(...)`; uses go through
    /// `mod.symbol`.
    WholeModule(NodeId),
}

impl SpecifierBinding {
    pub fn node(self) -> NodeId {
        match self {
            SpecifierBinding::Named(id)
            | SpecifierBinding::Namespace(id)
            | SpecifierBinding::DestructuredKey(id)
            | SpecifierBinding::WholeModule(id) => id,
        }
    }
}

/// Resolves how `symbol` is bound in the current file, preferring the
/// custom-module import over the target-library one. `None` when no tracked
/// import was recorded or the recorded import does not bind the symbol.
pub fn resolve_specifier(
    tree: &SyntaxTree,
    state: &DetectionState,
    symbol: &str,
) -> Option<SpecifierBinding> {
    let import = state.custom_module().or(state.target_lib())?;
    match import {
        ImportNode::Static(id) => resolve_static(tree, id, symbol),
        ImportNode::DynamicLoad(id) => resolve_dynamic(tree, id, symbol),
    }
}

fn resolve_static(tree: &SyntaxTree, id: NodeId, symbol: &str) -> Option<SpecifierBinding> {
    let NodeData::ImportDeclaration { specifiers, .. } = &tree.node(id).data else {
        return None;
    };

    let mut namespace = None;
    for spec in specifiers {
        match &tree.node(*spec).data {
            NodeData::ImportSpecifier { imported, local } if imported == symbol => {
                trace!("Resolved '{}' to a named specifier", symbol);
                return Some(SpecifierBinding::Named(*local));
            }
            NodeData::ImportNamespaceSpecifier { local } => namespace = Some(*local),
            _ => {}
        }
    }

    // Without an exact named specifier, a namespace import still makes the
    // whole module reachable as `ns.symbol`.
    namespace.map(|local| {
        trace!("Resolved '{}' to a namespace specifier", symbol);
        SpecifierBinding::Namespace(local)
    })
}

fn resolve_dynamic(tree: &SyntaxTree, id: NodeId, symbol: &str) -> Option<SpecifierBinding> {
    let parent = tree.parent(id)?;
    let NodeData::VariableDeclarator { id: binding, .. } = &tree.node(parent).data else {
        return None;
    };

    match &tree.node(*binding).data {
        NodeData::Identifier { .. } => {
            trace!("Resolved '{}' to a whole-module binding", symbol);
            Some(SpecifierBinding::WholeModule(*binding))
        }
        NodeData::ObjectPattern { properties } => properties.iter().find_map(|prop| {
            let NodeData::Property { key, .. } = &tree.node(*prop).data else {
                return None;
            };
            (tree.ident_name(*key) == Some(symbol)).then(|| {
                trace!("Resolved '{}' to a destructured key", symbol);
                SpecifierBinding::DestructuredKey(*key)
            })
        }),
        _ => None,
    }
}
