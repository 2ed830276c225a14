use anyhow::{Context, Result};
use log::{debug, trace, warn};
use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::{GetSpan, SourceType, Span};
use std::{fs, path::Path};

use crate::ast::{NodeData, NodeId, SyntaxTree};

/// Parses a file from disk and lowers it into a [`SyntaxTree`].
pub fn parse_file(file: &Path) -> Result<SyntaxTree> {
    debug!("Parsing file: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    parse_source(&src, source_type_for(file))
}

/// Parses source text with oxc and lowers the resulting AST into the flat
/// arena representation the rules operate on.
pub fn parse_source(src: &str, st: SourceType) -> Result<SyntaxTree> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, .. } = OxcParser::new(&allocator, src, st).parse();
    if !errors.is_empty() {
        warn!("Parsed with {} recoverable errors", errors.len());
    }

    let mut lower = Lowering { tree: SyntaxTree::new() };
    let body: Vec<NodeId> = program.body.iter().filter_map(|stmt| lower.statement(stmt)).collect();
    let root = lower.alloc(program.span, NodeData::Program { body });

    let mut tree = lower.tree;
    tree.set_root(root);
    trace!("Lowered program into {} nodes", tree.len());
    Ok(tree)
}

pub fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let mut st = SourceType::default()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")));

    // .mjs and .mts are always ES modules
    if matches!(ext, Some("mjs") | Some("mts")) {
        st = st.with_module(true);
    }

    st
}

struct Lowering {
    tree: SyntaxTree,
}

impl Lowering {
    /// Appends a node and claims its children, which were lowered first.
    fn alloc(&mut self, span: Span, data: NodeData) -> NodeId {
        let id = self.tree.push(span, data);
        for child in self.tree.children(id) {
            self.tree.set_parent(child, id);
        }
        id
    }

    fn identifier(&mut self, span: Span, name: &str) -> NodeId {
        self.alloc(span, NodeData::Identifier { name: name.to_string() })
    }

    fn statement(&mut self, stmt: &ast::Statement) -> Option<NodeId> {
        match stmt {
            ast::Statement::ImportDeclaration(decl) => self.import_declaration(decl),
            ast::Statement::VariableDeclaration(vd) => {
                let decls: Vec<NodeId> =
                    vd.declarations.iter().map(|d| self.variable_declarator(d)).collect();
                Some(self.alloc(vd.span, NodeData::Unknown { children: decls }))
            }
            ast::Statement::ExpressionStatement(es) => {
                let expr = self.expression(&es.expression);
                Some(self.alloc(es.span, NodeData::Unknown { children: vec![expr] }))
            }
            ast::Statement::ReturnStatement(rs) => {
                let argument = rs.argument.as_ref().map(|a| self.expression(a));
                Some(self.alloc(rs.span, NodeData::ReturnStatement { argument }))
            }
            ast::Statement::BlockStatement(bs) => {
                let body: Vec<NodeId> =
                    bs.body.iter().filter_map(|s| self.statement(s)).collect();
                Some(self.alloc(bs.span, NodeData::BlockStatement { body }))
            }
            ast::Statement::FunctionDeclaration(f) => {
                let children: Vec<NodeId> =
                    f.body.as_ref().map(|b| self.function_body(b)).unwrap_or_default();
                Some(self.alloc(f.span, NodeData::Unknown { children }))
            }
            ast::Statement::IfStatement(is) => {
                let mut children = vec![self.expression(&is.test)];
                children.extend(self.statement(&is.consequent));
                if let Some(alt) = &is.alternate {
                    children.extend(self.statement(alt));
                }
                Some(self.alloc(is.span, NodeData::Unknown { children }))
            }
            _ => {
                trace!("Dropping statement shape outside the lowered set");
                None
            }
        }
    }

    fn import_declaration(&mut self, decl: &ast::ImportDeclaration) -> Option<NodeId> {
        // Type-only imports never bind runtime utilities
        if decl.import_kind.is_type() {
            trace!("Skipping type-only import of '{}'", decl.source.value);
            return None;
        }

        let mut specifiers = Vec::new();
        if let Some(specs) = &decl.specifiers {
            for spec in specs {
                match spec {
                    ast::ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        if s.import_kind.is_type() {
                            continue;
                        }
                        let local = self.identifier(s.local.span, s.local.name.as_str());
                        let imported = s.imported.name().to_string();
                        specifiers
                            .push(self.alloc(s.span, NodeData::ImportSpecifier { imported, local }));
                    }
                    ast::ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        let local = self.identifier(s.local.span, s.local.name.as_str());
                        specifiers
                            .push(self.alloc(s.span, NodeData::ImportDefaultSpecifier { local }));
                    }
                    ast::ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        let local = self.identifier(s.local.span, s.local.name.as_str());
                        specifiers
                            .push(self.alloc(s.span, NodeData::ImportNamespaceSpecifier { local }));
                    }
                }
            }
        }

        let source = decl.source.value.to_string();
        trace!("Lowered static import of '{}'", source);
        Some(self.alloc(decl.span, NodeData::ImportDeclaration { source, specifiers }))
    }

    fn variable_declarator(&mut self, d: &ast::VariableDeclarator) -> NodeId {
        let id = self.binding_pattern(&d.id);
        let init = d.init.as_ref().map(|e| self.expression(e));
        self.alloc(d.span, NodeData::VariableDeclarator { id, init })
    }

    fn binding_pattern(&mut self, pat: &ast::BindingPattern) -> NodeId {
        match &pat.kind {
            ast::BindingPatternKind::BindingIdentifier(b) => {
                self.identifier(b.span, b.name.as_str())
            }
            ast::BindingPatternKind::ObjectPattern(op) => {
                let properties: Vec<NodeId> = op
                    .properties
                    .iter()
                    .map(|p| {
                        let key = self.property_key(&p.key);
                        let value = self.binding_pattern(&p.value);
                        self.alloc(p.span, NodeData::Property { key, value })
                    })
                    .collect();
                self.alloc(op.span, NodeData::ObjectPattern { properties })
            }
            other => self.alloc(other.span(), NodeData::Unknown { children: Vec::new() }),
        }
    }

    fn property_key(&mut self, key: &ast::PropertyKey) -> NodeId {
        match key {
            ast::PropertyKey::StaticIdentifier(id) => self.identifier(id.span, id.name.as_str()),
            other => self.alloc(other.span(), NodeData::Unknown { children: Vec::new() }),
        }
    }

    fn function_body(&mut self, body: &ast::FunctionBody) -> Vec<NodeId> {
        body.statements.iter().filter_map(|s| self.statement(s)).collect()
    }

    fn expression(&mut self, expr: &ast::Expression) -> NodeId {
        match expr {
            ast::Expression::CallExpression(ce) => {
                let callee = self.expression(&ce.callee);
                let arguments: Vec<NodeId> = ce
                    .arguments
                    .iter()
                    .map(|arg| match arg.as_expression() {
                        Some(e) => self.expression(e),
                        None => self.alloc(arg.span(), NodeData::Unknown { children: Vec::new() }),
                    })
                    .collect();
                self.alloc(ce.span, NodeData::CallExpression { callee, arguments })
            }
            ast::Expression::Identifier(id) => self.identifier(id.span, id.name.as_str()),
            ast::Expression::StringLiteral(sl) => {
                self.alloc(sl.span, NodeData::StringLiteral { value: sl.value.to_string() })
            }
            ast::Expression::StaticMemberExpression(sm) => {
                let object = self.expression(&sm.object);
                let property = self.identifier(sm.property.span, sm.property.name.as_str());
                self.alloc(sm.span, NodeData::MemberExpression { object, property })
            }
            ast::Expression::ComputedMemberExpression(cm) => {
                let object = self.expression(&cm.object);
                let property = self.expression(&cm.expression);
                self.alloc(cm.span, NodeData::MemberExpression { object, property })
            }
            ast::Expression::AwaitExpression(ae) => {
                let argument = self.expression(&ae.argument);
                self.alloc(ae.span, NodeData::AwaitExpression { argument })
            }
            ast::Expression::ArrowFunctionExpression(af) => {
                let body = self.function_body(&af.body);
                self.alloc(af.span, NodeData::ArrowFunction { expression: af.expression, body })
            }
            ast::Expression::FunctionExpression(f) => {
                let children: Vec<NodeId> =
                    f.body.as_ref().map(|b| self.function_body(b)).unwrap_or_default();
                self.alloc(f.span, NodeData::Unknown { children })
            }
            ast::Expression::ArrayExpression(ae) => {
                let elements: Vec<NodeId> = ae
                    .elements
                    .iter()
                    .filter_map(|el| el.as_expression())
                    .map(|e| self.expression(e))
                    .collect();
                self.alloc(ae.span, NodeData::ArrayExpression { elements })
            }
            ast::Expression::ObjectExpression(oe) => {
                let children: Vec<NodeId> = oe
                    .properties
                    .iter()
                    .filter_map(|p| p.as_property())
                    .map(|p| {
                        let key = self.property_key(&p.key);
                        let value = self.expression(&p.value);
                        self.alloc(p.span, NodeData::Property { key, value })
                    })
                    .collect();
                self.alloc(oe.span, NodeData::Unknown { children })
            }
            ast::Expression::ParenthesizedExpression(pe) => self.expression(&pe.expression),
            ast::Expression::AssignmentExpression(ae) => {
                let right = self.expression(&ae.right);
                self.alloc(ae.span, NodeData::Unknown { children: vec![right] })
            }
            ast::Expression::ConditionalExpression(ce) => {
                let children = vec![
                    self.expression(&ce.test),
                    self.expression(&ce.consequent),
                    self.expression(&ce.alternate),
                ];
                self.alloc(ce.span, NodeData::Unknown { children })
            }
            other => self.alloc(other.span(), NodeData::Unknown { children: Vec::new() }),
        }
    }
}
