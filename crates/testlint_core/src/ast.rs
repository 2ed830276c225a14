use oxc_span::Span;

/// Index of a node in its [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fieldless tag for a node's syntactic shape. Visitor tables are keyed by
/// this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    CallExpression,
    Identifier,
    MemberExpression,
    ObjectPattern,
    Property,
    StringLiteral,
    BlockStatement,
    VariableDeclarator,
    ArrayExpression,
    AwaitExpression,
    ArrowFunction,
    ReturnStatement,
    Unknown,
}

/// Payload of a single node: one variant per shape the rules consult.
/// Constructs outside this set lower to [`NodeData::Unknown`], keeping
/// their interesting children so nested code is still traversed.
#[derive(Debug, Clone)]
pub enum NodeData {
    Program { body: Vec<NodeId> },
    ImportDeclaration { source: String, specifiers: Vec<NodeId> },
    /// `import { imported as local } from '...'`
    ImportSpecifier { imported: String, local: NodeId },
    ImportDefaultSpecifier { local: NodeId },
    /// `import * as local from '...'`
    ImportNamespaceSpecifier { local: NodeId },
    CallExpression { callee: NodeId, arguments: Vec<NodeId> },
    Identifier { name: String },
    MemberExpression { object: NodeId, property: NodeId },
    ObjectPattern { properties: Vec<NodeId> },
    Property { key: NodeId, value: NodeId },
    StringLiteral { value: String },
    BlockStatement { body: Vec<NodeId> },
    VariableDeclarator { id: NodeId, init: Option<NodeId> },
    ArrayExpression { elements: Vec<NodeId> },
    AwaitExpression { argument: NodeId },
    /// `expression` is true for a braceless single-expression body.
    ArrowFunction { expression: bool, body: Vec<NodeId> },
    ReturnStatement { argument: Option<NodeId> },
    Unknown { children: Vec<NodeId> },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Program { .. } => NodeKind::Program,
            NodeData::ImportDeclaration { .. } => NodeKind::ImportDeclaration,
            NodeData::ImportSpecifier { .. } => NodeKind::ImportSpecifier,
            NodeData::ImportDefaultSpecifier { .. } => NodeKind::ImportDefaultSpecifier,
            NodeData::ImportNamespaceSpecifier { .. } => NodeKind::ImportNamespaceSpecifier,
            NodeData::CallExpression { .. } => NodeKind::CallExpression,
            NodeData::Identifier { .. } => NodeKind::Identifier,
            NodeData::MemberExpression { .. } => NodeKind::MemberExpression,
            NodeData::ObjectPattern { .. } => NodeKind::ObjectPattern,
            NodeData::Property { .. } => NodeKind::Property,
            NodeData::StringLiteral { .. } => NodeKind::StringLiteral,
            NodeData::BlockStatement { .. } => NodeKind::BlockStatement,
            NodeData::VariableDeclarator { .. } => NodeKind::VariableDeclarator,
            NodeData::ArrayExpression { .. } => NodeKind::ArrayExpression,
            NodeData::AwaitExpression { .. } => NodeKind::AwaitExpression,
            NodeData::ArrowFunction { .. } => NodeKind::ArrowFunction,
            NodeData::ReturnStatement { .. } => NodeKind::ReturnStatement,
            NodeData::Unknown { .. } => NodeKind::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub span: Span,
    pub parent: Option<NodeId>,
    pub data: NodeData,
}

/// One file's lowered syntax tree: a flat arena with parent links.
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new(), root: NodeId(0) }
    }

    /// Appends a node. Nodes are created bottom-up, so the parent link is
    /// patched once the enclosing node exists.
    pub(crate) fn push(&mut self, span: Span, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { span, parent: None, data });
        id
    }

    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// The `Program` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).data.kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in arena order. Document order is recovered by sorting
    /// on span start; the traversal driver does not rely on this.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Children in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).data {
            NodeData::Program { body } => body.clone(),
            NodeData::ImportDeclaration { specifiers, .. } => specifiers.clone(),
            NodeData::ImportSpecifier { local, .. } => vec![*local],
            NodeData::ImportDefaultSpecifier { local } => vec![*local],
            NodeData::ImportNamespaceSpecifier { local } => vec![*local],
            NodeData::CallExpression { callee, arguments } => {
                let mut children = vec![*callee];
                children.extend(arguments.iter().copied());
                children
            }
            NodeData::Identifier { .. } | NodeData::StringLiteral { .. } => Vec::new(),
            NodeData::MemberExpression { object, property } => vec![*object, *property],
            NodeData::ObjectPattern { properties } => properties.clone(),
            NodeData::Property { key, value } => vec![*key, *value],
            NodeData::BlockStatement { body } => body.clone(),
            NodeData::VariableDeclarator { id, init } => {
                let mut children = vec![*id];
                children.extend(init.iter().copied());
                children
            }
            NodeData::ArrayExpression { elements } => elements.clone(),
            NodeData::AwaitExpression { argument } => vec![*argument],
            NodeData::ArrowFunction { body, .. } => body.clone(),
            NodeData::ReturnStatement { argument } => argument.iter().copied().collect(),
            NodeData::Unknown { children } => children.clone(),
        }
    }

    /// Name of an identifier node, if it is one.
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Value of a string literal node, if it is one.
    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::StringLiteral { value } => Some(value),
            _ => None,
        }
    }
}
