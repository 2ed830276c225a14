use log::trace;

use crate::ast::{NodeData, NodeId, NodeKind, SyntaxTree};
use crate::constants::{LOAD_FUNCTION, TARGET_LIBRARY_MARKER};
use crate::settings::Settings;
use crate::visitor::VisitorTable;

/// A recorded import of interest. Holds the node, never a copy of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportNode {
    /// `import ... from '...'`
    Static(NodeId),
    /// `require('...')`, recorded as the whole call expression.
    DynamicLoad(NodeId),
}

impl ImportNode {
    pub fn node(self) -> NodeId {
        match self {
            ImportNode::Static(id) | ImportNode::DynamicLoad(id) => id,
        }
    }
}

/// Per-file import state. Both slots are write-once: the first matching node
/// wins and later matches are ignored, so aliasing imports cannot flip a
/// decision mid-file.
#[derive(Debug, Default)]
pub struct DetectionState {
    target_lib: Option<ImportNode>,
    custom_module: Option<ImportNode>,
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_lib(&self) -> Option<ImportNode> {
        self.target_lib
    }

    pub fn custom_module(&self) -> Option<ImportNode> {
        self.custom_module
    }

    /// With no custom module configured this is unconditionally true, so
    /// utilities re-exported through wrappers the config does not name are
    /// never silently exempted. Otherwise at least one tracked import must
    /// have been recorded.
    pub fn imported_ok(&self, settings: &Settings) -> bool {
        if settings.custom_module.is_none() {
            return true;
        }
        self.target_lib.is_some() || self.custom_module.is_some()
    }

    /// Observes a static import declaration. Both slots are checked
    /// independently; a single declaration may satisfy both.
    pub fn observe_import(&mut self, tree: &SyntaxTree, settings: &Settings, id: NodeId) {
        let NodeData::ImportDeclaration { source, .. } = &tree.node(id).data else {
            return;
        };
        if self.target_lib.is_none() && source.contains(TARGET_LIBRARY_MARKER) {
            trace!("Recording target library import from '{}'", source);
            self.target_lib = Some(ImportNode::Static(id));
        }
        if self.custom_module.is_none()
            && let Some(module) = &settings.custom_module
            && source.ends_with(module.as_str())
        {
            trace!("Recording custom module import from '{}'", source);
            self.custom_module = Some(ImportNode::Static(id));
        }
    }

    /// Observes a call expression, recording it when it is a dynamic load of
    /// a tracked module.
    pub fn observe_call(&mut self, tree: &SyntaxTree, settings: &Settings, id: NodeId) {
        let NodeData::CallExpression { callee, arguments } = &tree.node(id).data else {
            return;
        };
        if tree.ident_name(*callee) != Some(LOAD_FUNCTION) {
            return;
        }
        for arg in arguments {
            let Some(value) = tree.string_value(*arg) else {
                continue;
            };
            if self.target_lib.is_none() && value.contains(TARGET_LIBRARY_MARKER) {
                trace!("Recording target library require('{}')", value);
                self.target_lib = Some(ImportNode::DynamicLoad(id));
            }
            if self.custom_module.is_none()
                && let Some(module) = &settings.custom_module
                && value.ends_with(module.as_str())
            {
                trace!("Recording custom module require('{}')", value);
                self.custom_module = Some(ImportNode::DynamicLoad(id));
            }
        }
    }
}

/// Unanchored search of the configured pattern against the filename.
pub fn filename_ok(settings: &Settings, filename: &str) -> bool {
    settings.filename_pattern.is_match(filename)
}

/// The import tracker's own callback table. Merged ahead of every rule
/// table so detection observes each node before the rule does.
pub fn detection_visitors() -> VisitorTable {
    let mut table = VisitorTable::new();
    table.on(NodeKind::ImportDeclaration, |ctx, id| ctx.observe_import(id));
    table.on(NodeKind::CallExpression, |ctx, id| ctx.observe_call(id));
    table
}
