//! The validating façade the parser builds the tree through — spec.md §4.6.
//!
//! `AstBuilder` owns both the arena and the diagnostic sink. Every
//! `add*Declaration`/`create*Statement`/`create*Expression`/`create*Type`
//! method validates its arguments, reports through the sink on failure,
//! and otherwise allocates the node, sets parent back-references on every
//! child it stores, and returns the new id.

use crate::diagnostics::DiagnosticEngine;
use crate::error::BuilderError;
use crate::location::SourceLocation;
use crate::token::Token;

use super::node::{
    AssignOp, BasicType, BinaryOp, CaseKind, DeclKind, DeclNode, DeclQualifiers, EnumConstant, ExprKind, ExprNode,
    NodeHeader, StmtKind, StmtNode, StorageClass, TypeSpecKind, TypeSpecNode,
};
use super::{Ast, Node, NodeId};

/// `[A-Za-z_][A-Za-z0-9_]*`, per spec.md §4.6's naming contract for
/// declarations.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub struct AstBuilder {
    ast: Ast,
    diagnostics: DiagnosticEngine,
}

impl AstBuilder {
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn new(location: SourceLocation, diagnostics: DiagnosticEngine) -> Self {
        Self { ast: Ast::new(location), diagnostics }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn diagnostics(&self) -> &DiagnosticEngine {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticEngine {
        &mut self.diagnostics
    }

    /// Hands back the finished tree and the sink it reported through.
    pub fn finish(self) -> (Ast, DiagnosticEngine) {
        (self.ast, self.diagnostics)
    }

    fn reject(&mut self, location: SourceLocation, error: BuilderError) -> Result<NodeId, BuilderError> {
        self.diagnostics.error(location, error.to_string());
        Err(error)
    }

    fn check_identifier(&mut self, name: &str, location: &SourceLocation) -> Result<(), BuilderError> {
        if is_valid_identifier(name) {
            Ok(())
        } else {
            let error = BuilderError::InvalidIdentifier { name: name.to_string() };
            self.diagnostics.error(location.clone(), error.to_string());
            Err(error)
        }
    }

    // -- declarations ----------------------------------------------------

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_variable_declaration(
        &mut self,
        name: &str,
        var_type: NodeId,
        storage_class: StorageClass,
        initializer: Option<NodeId>,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.add_variable_declaration_with_qualifiers(name, var_type, storage_class, DeclQualifiers::default(), initializer, location)
    }

    /// As [`Self::add_variable_declaration`], additionally setting the
    /// `const`/`volatile` qualifier flags the dumper annotates per spec.md
    /// §4.8.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_variable_declaration_with_qualifiers(
        &mut self,
        name: &str,
        var_type: NodeId,
        storage_class: StorageClass,
        qualifiers: DeclQualifiers,
        initializer: Option<NodeId>,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.check_identifier(name, &location)?;
        let decl = self.ast.alloc(Node::Decl(DeclNode {
            header: NodeHeader::new(location),
            name: Some(name.to_string()),
            storage_class,
            qualifiers,
            symbol: None,
            kind: DeclKind::Variable { var_type, initializer },
        }));
        self.ast.attach(decl, var_type);
        if let Some(init) = initializer {
            self.ast.attach(decl, init);
        }
        self.ast.push_top_level_declaration(decl);
        Ok(decl)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_function_declaration(
        &mut self,
        name: &str,
        return_type: NodeId,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
        storage_class: StorageClass,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.add_function_declaration_with_qualifiers(
            name,
            return_type,
            parameters,
            body,
            storage_class,
            DeclQualifiers::default(),
            location,
        )
    }

    /// As [`Self::add_function_declaration`], additionally setting the
    /// `inline`/`noreturn` qualifier flags the dumper annotates per spec.md
    /// §4.8.
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_function_declaration_with_qualifiers(
        &mut self,
        name: &str,
        return_type: NodeId,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
        storage_class: StorageClass,
        qualifiers: DeclQualifiers,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.check_identifier(name, &location)?;
        let decl = self.ast.alloc(Node::Decl(DeclNode {
            header: NodeHeader::new(location),
            name: Some(name.to_string()),
            storage_class,
            qualifiers,
            symbol: None,
            kind: DeclKind::Function { return_type, parameters: parameters.clone(), body },
        }));
        self.ast.attach(decl, return_type);
        for param in parameters {
            self.ast.attach(decl, param);
        }
        if let Some(b) = body {
            self.ast.attach(decl, b);
        }
        self.ast.push_top_level_declaration(decl);
        Ok(decl)
    }

    fn add_aggregate_declaration(
        &mut self,
        name: Option<&str>,
        members: Vec<NodeId>,
        location: SourceLocation,
        wrap: impl FnOnce(Vec<NodeId>) -> DeclKind,
    ) -> Result<NodeId, BuilderError> {
        if let Some(n) = name {
            self.check_identifier(n, &location)?;
        }
        let decl = self.ast.alloc(Node::Decl(DeclNode {
            header: NodeHeader::new(location),
            name: name.map(str::to_string),
            storage_class: StorageClass::None,
            qualifiers: DeclQualifiers::default(),
            symbol: None,
            kind: wrap(members.clone()),
        }));
        for member in members {
            self.ast.attach(decl, member);
        }
        self.ast.push_top_level_declaration(decl);
        Ok(decl)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_struct_declaration(
        &mut self,
        name: Option<&str>,
        members: Vec<NodeId>,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.add_aggregate_declaration(name, members, location, |members| DeclKind::Struct { members })
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_union_declaration(
        &mut self,
        name: Option<&str>,
        members: Vec<NodeId>,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.add_aggregate_declaration(name, members, location, |members| DeclKind::Union { members })
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_enum_declaration(
        &mut self,
        name: Option<&str>,
        constants: Vec<EnumConstant>,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        if let Some(n) = name {
            self.check_identifier(n, &location)?;
        }
        let constant_values: Vec<NodeId> = constants.iter().filter_map(|c| c.value).collect();
        let decl = self.ast.alloc(Node::Decl(DeclNode {
            header: NodeHeader::new(location),
            name: name.map(str::to_string),
            storage_class: StorageClass::None,
            qualifiers: DeclQualifiers::default(),
            symbol: None,
            kind: DeclKind::Enum { constants },
        }));
        for value in constant_values {
            self.ast.attach(decl, value);
        }
        self.ast.push_top_level_declaration(decl);
        Ok(decl)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_typedef_declaration(
        &mut self,
        name: &str,
        underlying_type: NodeId,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        self.check_identifier(name, &location)?;
        let decl = self.ast.alloc(Node::Decl(DeclNode {
            header: NodeHeader::new(location),
            name: Some(name.to_string()),
            storage_class: StorageClass::None,
            qualifiers: DeclQualifiers::default(),
            symbol: None,
            kind: DeclKind::Typedef { underlying_type },
        }));
        self.ast.attach(decl, underlying_type);
        self.ast.push_top_level_declaration(decl);
        Ok(decl)
    }

    // -- statements --------------------------------------------------------

    fn alloc_stmt(&mut self, kind: StmtKind, location: SourceLocation) -> NodeId {
        self.ast.alloc(Node::Stmt(StmtNode { header: NodeHeader::new(location), kind }))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_expression_statement(&mut self, expr: NodeId, location: SourceLocation) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::Expression { expr }, location);
        self.ast.attach(stmt, expr);
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_compound_statement(&mut self, location: SourceLocation) -> NodeId {
        self.alloc_stmt(StmtKind::Compound { decls: Vec::new(), stmts: Vec::new() }, location)
    }

    /// Appends `stmt` to `compound`'s statement sequence and sets its
    /// parent back-reference, per spec.md §4.6.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_stmt_to_compound(&mut self, compound: NodeId, stmt: NodeId) -> Result<(), BuilderError> {
        let location = self.ast.get(compound).location().clone();
        match self.ast.get_mut(compound) {
            Node::Stmt(StmtNode { kind: StmtKind::Compound { stmts, .. }, .. }) => {
                stmts.push(stmt);
            }
            _ => {
                return self
                    .reject(location, BuilderError::MissingRequiredChild { what: "addStmtToCompound", child: "compound" })
                    .map(|_| ());
            }
        }
        self.ast.attach(compound, stmt);
        Ok(())
    }

    /// Appends `decl` to `compound`'s declaration sequence and sets its
    /// parent back-reference, per spec.md §4.6.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_decl_to_compound(&mut self, compound: NodeId, decl: NodeId) -> Result<(), BuilderError> {
        let location = self.ast.get(compound).location().clone();
        match self.ast.get_mut(compound) {
            Node::Stmt(StmtNode { kind: StmtKind::Compound { decls, .. }, .. }) => {
                decls.push(decl);
            }
            _ => {
                return self
                    .reject(location, BuilderError::MissingRequiredChild { what: "addDeclToCompound", child: "compound" })
                    .map(|_| ());
            }
        }
        self.ast.attach(compound, decl);
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_if_statement(
        &mut self,
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
        location: SourceLocation,
    ) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::If { cond, then_branch, else_branch }, location);
        self.ast.attach(stmt, cond);
        self.ast.attach(stmt, then_branch);
        if let Some(e) = else_branch {
            self.ast.attach(stmt, e);
        }
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_while_statement(&mut self, cond: NodeId, body: NodeId, location: SourceLocation) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::While { cond, body }, location);
        self.ast.attach(stmt, cond);
        self.ast.attach(stmt, body);
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_do_while_statement(&mut self, body: NodeId, cond: NodeId, location: SourceLocation) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::DoWhile { body, cond }, location);
        self.ast.attach(stmt, body);
        self.ast.attach(stmt, cond);
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_for_statement(
        &mut self,
        init: Option<NodeId>,
        cond: Option<NodeId>,
        step: Option<NodeId>,
        body: NodeId,
        location: SourceLocation,
    ) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::For { init, cond, step, body }, location);
        for child in [init, cond, step] {
            if let Some(c) = child {
                self.ast.attach(stmt, c);
            }
        }
        self.ast.attach(stmt, body);
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_return_statement(&mut self, value: Option<NodeId>, location: SourceLocation) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::Return { value }, location);
        if let Some(v) = value {
            self.ast.attach(stmt, v);
        }
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_break_statement(&mut self, location: SourceLocation) -> NodeId {
        self.alloc_stmt(StmtKind::Break, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_continue_statement(&mut self, location: SourceLocation) -> NodeId {
        self.alloc_stmt(StmtKind::Continue, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_switch_statement(&mut self, cond: NodeId, location: SourceLocation) -> NodeId {
        let stmt = self.alloc_stmt(StmtKind::Switch { cond, cases: Vec::new() }, location);
        self.ast.attach(stmt, cond);
        stmt
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_case_to_switch(&mut self, switch: NodeId, case: NodeId) -> Result<(), BuilderError> {
        let location = self.ast.get(switch).location().clone();
        match self.ast.get_mut(switch) {
            Node::Stmt(StmtNode { kind: StmtKind::Switch { cases, .. }, .. }) => cases.push(case),
            _ => {
                return self
                    .reject(location, BuilderError::MissingRequiredChild { what: "addCaseToSwitch", child: "switch" })
                    .map(|_| ());
            }
        }
        self.ast.attach(switch, case);
        Ok(())
    }

    /// `value` must be present iff `kind == CaseKind::Label` — spec.md §3.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_case_statement(
        &mut self,
        kind: CaseKind,
        value: Option<NodeId>,
        body: NodeId,
        location: SourceLocation,
    ) -> Result<NodeId, BuilderError> {
        match (kind, value) {
            (CaseKind::Label, None) => return self.reject(location, BuilderError::CaseLabelMissingValue),
            (CaseKind::Default, Some(_)) => return self.reject(location, BuilderError::CaseDefaultHasValue),
            _ => {}
        }
        let stmt = self.alloc_stmt(StmtKind::Case { kind, value, body }, location);
        if let Some(v) = value {
            self.ast.attach(stmt, v);
        }
        self.ast.attach(stmt, body);
        Ok(stmt)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_labeled_statement(&mut self, label: &str, body: NodeId, location: SourceLocation) -> Result<NodeId, BuilderError> {
        self.check_identifier(label, &location)?;
        let stmt = self.alloc_stmt(StmtKind::Labeled { label: label.to_string(), body }, location);
        self.ast.attach(stmt, body);
        Ok(stmt)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_goto_statement(&mut self, label: &str, location: SourceLocation) -> Result<NodeId, BuilderError> {
        self.check_identifier(label, &location)?;
        Ok(self.alloc_stmt(StmtKind::Goto { label: label.to_string() }, location))
    }

    // -- expressions ---------------------------------------------------

    fn alloc_expr(&mut self, kind: ExprKind, location: SourceLocation) -> NodeId {
        let is_lvalue = kind.default_is_lvalue();
        let is_constant = kind.default_is_constant();
        self.ast.alloc(Node::Expr(ExprNode {
            header: NodeHeader::new(location),
            is_lvalue,
            is_constant,
            semantic_type: None,
            kind,
        }))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_literal_expression(&mut self, token: Token, location: SourceLocation) -> Result<NodeId, BuilderError> {
        if token.kind == crate::token::TokenKind::Unknown {
            return self.reject(location, BuilderError::MissingRequiredChild { what: "literal", child: "token" });
        }
        Ok(self.alloc_expr(ExprKind::Literal { token }, location))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_identifier_expression(&mut self, name: &str, location: SourceLocation) -> Result<NodeId, BuilderError> {
        self.check_identifier(name, &location)?;
        Ok(self.alloc_expr(ExprKind::Identifier { name: name.to_string() }, location))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_binary_expression(
        &mut self,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
        location: SourceLocation,
    ) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Binary { op, lhs, rhs }, location);
        self.ast.attach(expr, lhs);
        self.ast.attach(expr, rhs);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_unary_expression(
        &mut self,
        op: super::node::UnaryOp,
        operand: NodeId,
        is_prefix: bool,
        location: SourceLocation,
    ) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Unary { op, operand, is_prefix }, location);
        self.ast.attach(expr, operand);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_assignment_expression(
        &mut self,
        op: AssignOp,
        target: NodeId,
        value: NodeId,
        location: SourceLocation,
    ) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Assignment { op, target, value }, location);
        self.ast.attach(expr, target);
        self.ast.attach(expr, value);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_ternary_expression(
        &mut self,
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
        location: SourceLocation,
    ) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Ternary { cond, then_expr, else_expr }, location);
        self.ast.attach(expr, cond);
        self.ast.attach(expr, then_expr);
        self.ast.attach(expr, else_expr);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_call_expression(&mut self, callee: NodeId, args: Vec<NodeId>, location: SourceLocation) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Call { callee, args: args.clone() }, location);
        self.ast.attach(expr, callee);
        for arg in args {
            self.ast.attach(expr, arg);
        }
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_subscript_expression(&mut self, array: NodeId, index: NodeId, location: SourceLocation) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Subscript { array, index }, location);
        self.ast.attach(expr, array);
        self.ast.attach(expr, index);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_member_expression(
        &mut self,
        object: NodeId,
        member: &str,
        is_arrow: bool,
        location: SourceLocation,
    ) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Member { object, member: member.to_string(), is_arrow }, location);
        self.ast.attach(expr, object);
        expr
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_cast_expression(&mut self, target_type: NodeId, operand: NodeId, location: SourceLocation) -> NodeId {
        let expr = self.alloc_expr(ExprKind::Cast { target_type, operand }, location);
        self.ast.attach(expr, target_type);
        self.ast.attach(expr, operand);
        expr
    }

    // -- type specifiers -------------------------------------------------

    fn alloc_type(&mut self, kind: TypeSpecKind, location: SourceLocation) -> NodeId {
        self.ast.alloc(Node::TypeSpec(TypeSpecNode { header: NodeHeader::new(location), kind }))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_basic_type(
        &mut self,
        base: BasicType,
        is_long: bool,
        is_short: bool,
        is_signed: bool,
        is_unsigned: bool,
        location: SourceLocation,
    ) -> NodeId {
        self.alloc_type(TypeSpecKind::Basic { base, is_long, is_short, is_signed, is_unsigned }, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_pointer_type(&mut self, pointee: NodeId, location: SourceLocation) -> NodeId {
        let ty = self.alloc_type(TypeSpecKind::Pointer { pointee }, location);
        self.ast.attach(ty, pointee);
        ty
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_array_type(
        &mut self,
        element: NodeId,
        size: Option<NodeId>,
        is_vla: bool,
        location: SourceLocation,
    ) -> NodeId {
        let ty = self.alloc_type(TypeSpecKind::Array { element, size, is_vla }, location);
        self.ast.attach(ty, element);
        if let Some(s) = size {
            self.ast.attach(ty, s);
        }
        ty
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_function_type(
        &mut self,
        return_type: NodeId,
        params: Vec<NodeId>,
        variadic: bool,
        location: SourceLocation,
    ) -> NodeId {
        let ty = self.alloc_type(TypeSpecKind::Function { return_type, params: params.clone(), variadic }, location);
        self.ast.attach(ty, return_type);
        for param in params {
            self.ast.attach(ty, param);
        }
        ty
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_struct_ref_type(&mut self, name: Option<&str>, definition: Option<NodeId>, location: SourceLocation) -> NodeId {
        self.alloc_type(TypeSpecKind::StructRef { name: name.map(str::to_string), definition }, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_union_ref_type(&mut self, name: Option<&str>, definition: Option<NodeId>, location: SourceLocation) -> NodeId {
        self.alloc_type(TypeSpecKind::UnionRef { name: name.map(str::to_string), definition }, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_enum_ref_type(&mut self, name: Option<&str>, definition: Option<NodeId>, location: SourceLocation) -> NodeId {
        self.alloc_type(TypeSpecKind::EnumRef { name: name.map(str::to_string), definition }, location)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn create_typedef_name_type(&mut self, name: &str, location: SourceLocation) -> Result<NodeId, BuilderError> {
        self.check_identifier(name, &location)?;
        Ok(self.alloc_type(TypeSpecKind::TypedefNameRef { name: name.to_string() }, location))
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod builder_tests;
