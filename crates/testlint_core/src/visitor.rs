use std::collections::HashMap;

use log::{debug, trace};
use oxc_span::Span;

use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::detect::{DetectionState, detection_visitors, filename_ok};
use crate::resolver::{SpecifierBinding, resolve_specifier};
use crate::settings::Settings;

/// One report emitted through [`RuleCtx::report`].
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub span: Span,
    pub message_id: &'static str,
    pub data: Option<String>,
}

/// Per-file context handed to every visitor callback. Owns the pass's
/// [`DetectionState`]; the tree, filename and settings are borrowed for the
/// whole pass.
pub struct RuleCtx<'t> {
    tree: &'t SyntaxTree,
    filename: &'t str,
    settings: &'t Settings,
    state: DetectionState,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> RuleCtx<'t> {
    pub fn new(tree: &'t SyntaxTree, filename: &'t str, settings: &'t Settings) -> Self {
        Self { tree, filename, settings, state: DetectionState::new(), diagnostics: Vec::new() }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn filename(&self) -> &'t str {
        self.filename
    }

    pub fn settings(&self) -> &'t Settings {
        self.settings
    }

    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    pub(crate) fn observe_import(&mut self, id: NodeId) {
        self.state.observe_import(self.tree, self.settings, id);
    }

    pub(crate) fn observe_call(&mut self, id: NodeId) {
        self.state.observe_call(self.tree, self.settings, id);
    }

    pub fn imported_ok(&self) -> bool {
        self.state.imported_ok(self.settings)
    }

    pub fn filename_ok(&self) -> bool {
        filename_ok(self.settings, self.filename)
    }

    /// Whether rule callbacks may currently report. Import state can change
    /// mid-traversal, so this is recomputed at every call and must not be
    /// hoisted out of a callback.
    pub fn may_report(&self) -> bool {
        self.imported_ok() && self.filename_ok()
    }

    pub fn resolve_specifier(&self, symbol: &str) -> Option<SpecifierBinding> {
        resolve_specifier(self.tree, &self.state, symbol)
    }

    /// The reporting primitive: node reference, message identifier and
    /// optional interpolation datum.
    pub fn report(&mut self, node: NodeId, message_id: &'static str, data: Option<String>) {
        trace!("Reporting '{}' in {}", message_id, self.filename);
        self.diagnostics.push(Diagnostic { span: self.tree.span(node), message_id, data });
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

pub type Handler = Box<dyn FnMut(&mut RuleCtx<'_>, NodeId)>;

/// Callbacks keyed by node kind. Results flow through the context's
/// diagnostic sink rather than return values.
#[derive(Default)]
pub struct VisitorTable {
    handlers: HashMap<NodeKind, Vec<Handler>>,
}

impl VisitorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked for every visited node of `kind`.
    pub fn on<F>(&mut self, kind: NodeKind, handler: F)
    where
        F: FnMut(&mut RuleCtx<'_>, NodeId) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn run(&mut self, ctx: &mut RuleCtx<'_>, kind: NodeKind, id: NodeId) {
        if let Some(list) = self.handlers.get_mut(&kind) {
            for handler in list {
                handler(ctx, id);
            }
        }
    }
}

/// A detection table and a rule table merged over the union of their keys.
///
/// Per visited node, detection callbacks run first and unconditionally, so
/// their state writes are visible to the gate check that immediately guards
/// the rule callbacks for the same node. The gate is evaluated again on
/// every dispatch, never cached across nodes.
pub struct MergedVisitors {
    detection: VisitorTable,
    rule: VisitorTable,
}

pub fn merge_visitors(detection: VisitorTable, rule: VisitorTable) -> MergedVisitors {
    MergedVisitors { detection, rule }
}

impl MergedVisitors {
    pub fn dispatch(&mut self, ctx: &mut RuleCtx<'_>, id: NodeId) {
        let kind = ctx.tree().kind(id);
        self.detection.run(ctx, kind, id);
        if ctx.may_report() {
            self.rule.run(ctx, kind, id);
        }
    }
}

/// Runs one single-threaded pass over `tree`: an iterative pre-order walk
/// dispatching the import tracker's table merged with `rule` at every node.
/// A fresh [`DetectionState`] is created for the pass and discarded with it.
pub fn run_pass(
    tree: &SyntaxTree,
    filename: &str,
    settings: &Settings,
    rule: VisitorTable,
) -> Vec<Diagnostic> {
    debug!("Running pass over {} ({} nodes)", filename, tree.len());
    let mut ctx = RuleCtx::new(tree, filename, settings);
    let mut merged = merge_visitors(detection_visitors(), rule);

    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        merged.dispatch(&mut ctx, id);
        let children = tree.children(id);
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    let diagnostics = ctx.into_diagnostics();
    debug!("Pass over {} produced {} diagnostics", filename, diagnostics.len());
    diagnostics
}
