//! The AST: an append-only arena of nodes addressed by [`NodeId`].
//!
//! spec.md §3/§9 describes ownership as strictly tree-shaped with a
//! non-owning `parent` back-reference on every node. DESIGN.md resolves
//! that into Design Note 9's recommended option (b): a single arena per
//! translation unit, `NodeId` as a plain `Copy` index, `parent` stored as
//! `Option<NodeId>` in every node's header. Dropping the `Ast` drops every
//! node it owns exactly once; there is no reference counting anywhere in
//! the tree.

pub mod builder;
pub mod dumper;
pub mod node;
pub mod utils;
pub mod visitor;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod mod_tests;

pub use node::{
    AssignOp, BasicType, BinaryOp, CaseKind, DeclKind, DeclNode, DeclQualifiers, EnumConstant, ExprKind, ExprNode,
    NodeHeader, SemanticTypeId, StmtKind, StmtNode, StorageClass, SymbolId, TranslationUnitNode, TypeSpecKind,
    TypeSpecNode, UnaryOp,
};

use crate::location::SourceLocation;

/// A `Copy` handle into an [`Ast`]'s node vector. Stable for the lifetime
/// of the arena: nodes are never removed or reordered, only appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The translation unit is always node 0.
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which of the four families (plus the translation-unit root) a node
/// belongs to. Mirrors spec.md §4.4's family/kind split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    TranslationUnit,
    Expr,
    Stmt,
    Decl,
    TypeSpec,
}

/// The tagged union over all node families. Dispatch is exhaustive pattern
/// matching rather than the source's function-pointer "vtables" — see
/// DESIGN.md's Design Note 9 resolution.
#[derive(Debug, Clone)]
pub enum Node {
    TranslationUnit(TranslationUnitNode),
    Expr(ExprNode),
    Stmt(StmtNode),
    Decl(DeclNode),
    TypeSpec(TypeSpecNode),
}

impl Node {
    pub fn family(&self) -> Family {
        match self {
            Node::TranslationUnit(_) => Family::TranslationUnit,
            Node::Expr(_) => Family::Expr,
            Node::Stmt(_) => Family::Stmt,
            Node::Decl(_) => Family::Decl,
            Node::TypeSpec(_) => Family::TypeSpec,
        }
    }

    pub fn header(&self) -> &NodeHeader {
        match self {
            Node::TranslationUnit(n) => &n.header,
            Node::Expr(n) => &n.header,
            Node::Stmt(n) => &n.header,
            Node::Decl(n) => &n.header,
            Node::TypeSpec(n) => &n.header,
        }
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        match self {
            Node::TranslationUnit(n) => &mut n.header,
            Node::Expr(n) => &mut n.header,
            Node::Stmt(n) => &mut n.header,
            Node::Decl(n) => &mut n.header,
            Node::TypeSpec(n) => &mut n.header,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        &self.header().location
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.header().parent
    }

    /// Human-readable node type name, as used by the dumper (spec.md §4.8)
    /// and in diagnostic/validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::TranslationUnit(_) => "TranslationUnit",
            Node::Expr(n) => match &n.kind {
                ExprKind::Literal { .. } => "LiteralExpr",
                ExprKind::Identifier { .. } => "IdentifierExpr",
                ExprKind::Binary { .. } => "BinaryOperatorExpr",
                ExprKind::Unary { .. } => "UnaryOperatorExpr",
                ExprKind::Assignment { .. } => "AssignmentExpr",
                ExprKind::Ternary { .. } => "TernaryExpr",
                ExprKind::Call { .. } => "CallExpr",
                ExprKind::Subscript { .. } => "SubscriptExpr",
                ExprKind::Member { .. } => "MemberExpr",
                ExprKind::Cast { .. } => "CastExpr",
            },
            Node::Stmt(n) => match &n.kind {
                StmtKind::Expression { .. } => "ExpressionStatement",
                StmtKind::Compound { .. } => "CompoundStatement",
                StmtKind::If { .. } => "IfStatement",
                StmtKind::While { .. } => "WhileStatement",
                StmtKind::DoWhile { .. } => "DoWhileStatement",
                StmtKind::For { .. } => "ForStatement",
                StmtKind::Return { .. } => "ReturnStatement",
                StmtKind::Break => "BreakStatement",
                StmtKind::Continue => "ContinueStatement",
                StmtKind::Switch { .. } => "SwitchStatement",
                StmtKind::Case { .. } => "CaseStatement",
                StmtKind::Labeled { .. } => "LabeledStatement",
                StmtKind::Goto { .. } => "GotoStatement",
            },
            Node::Decl(n) => match &n.kind {
                DeclKind::Variable { .. } => "VariableDeclaration",
                DeclKind::Function { .. } => "FunctionDeclaration",
                DeclKind::Struct { .. } => "StructDeclaration",
                DeclKind::Union { .. } => "UnionDeclaration",
                DeclKind::Enum { .. } => "EnumDeclaration",
                DeclKind::Typedef { .. } => "TypedefDeclaration",
            },
            Node::TypeSpec(n) => match &n.kind {
                TypeSpecKind::Basic { .. } => "BasicTypeSpecifier",
                TypeSpecKind::Pointer { .. } => "PointerTypeSpecifier",
                TypeSpecKind::Array { .. } => "ArrayTypeSpecifier",
                TypeSpecKind::Function { .. } => "FunctionTypeSpecifier",
                TypeSpecKind::StructRef { .. } => "StructTypeSpecifier",
                TypeSpecKind::UnionRef { .. } => "UnionTypeSpecifier",
                TypeSpecKind::EnumRef { .. } => "EnumTypeSpecifier",
                TypeSpecKind::TypedefNameRef { .. } => "TypedefNameSpecifier",
            },
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Node::Expr(_))
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, Node::Stmt(_))
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Node::Decl(_))
    }

    pub fn is_type_specifier(&self) -> bool {
        matches!(self, Node::TypeSpec(_))
    }
}

/// The append-only node arena for one translation unit. Node 0 is always
/// the `TranslationUnit` root; it is the only node with `parent == None`.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    /// Creates a fresh arena containing just the (empty) translation unit
    /// root, located at `location`.
    pub fn new(location: SourceLocation) -> Self {
        Self {
            nodes: vec![Node::TranslationUnit(TranslationUnitNode {
                header: NodeHeader::new(location),
                declarations: Vec::new(),
            })],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the root always exists
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Appends a new node and returns its id. Does not attach it anywhere;
    /// callers (the builder) are responsible for linking it into a parent
    /// and setting the parent back-reference via [`Ast::attach`].
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Sets `child`'s parent back-reference to `parent`. The caller is
    /// responsible for also storing `child` in one of `parent`'s own
    /// child slots — this only updates the back-reference half of the
    /// invariant in spec.md §3.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.get_mut(child).header_mut().parent = Some(parent);
    }

    pub fn translation_unit(&self) -> &TranslationUnitNode {
        match self.get(self.root()) {
            Node::TranslationUnit(tu) => tu,
            _ => unreachable!("node 0 is always the translation unit"),
        }
    }

    fn translation_unit_mut(&mut self) -> &mut TranslationUnitNode {
        let root = self.root();
        match self.get_mut(root) {
            Node::TranslationUnit(tu) => tu,
            _ => unreachable!("node 0 is always the translation unit"),
        }
    }

    /// Appends `decl` to the root's declaration list and sets its parent
    /// back-reference, per spec.md §4.6.
    pub fn push_top_level_declaration(&mut self, decl: NodeId) {
        let root = self.root();
        self.translation_unit_mut().declarations.push(decl);
        self.attach(root, decl);
    }
}
