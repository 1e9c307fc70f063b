use super::*;
use crate::ast::node::{
    BinaryOp, DeclKind, DeclNode, DeclQualifiers, ExprKind, ExprNode, NodeHeader, StorageClass, TypeSpecKind, TypeSpecNode,
};
use crate::diagnostics::{BufferConsumer, DiagnosticEngine};
use crate::location::SourceLocation;
use crate::token::{Token, TokenKind};

fn engine() -> DiagnosticEngine {
    DiagnosticEngine::new(Box::new(BufferConsumer::new()))
}

fn int_literal(ast: &mut Ast, text: &str) -> NodeId {
    ast.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: true,
        semantic_type: None,
        kind: ExprKind::Literal { token: Token::new(TokenKind::IntegerLiteral, text.to_string(), SourceLocation::unknown(1, 1, 0)) },
    }))
}

fn basic_int_type(ast: &mut Ast) -> NodeId {
    ast.alloc(Node::TypeSpec(TypeSpecNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        kind: TypeSpecKind::Basic { base: BasicType::Int, is_long: false, is_short: false, is_signed: false, is_unsigned: false },
    }))
}

/// `int x = 1 + 2;` as a free-standing variable declaration.
fn sample_variable_decl(ast: &mut Ast) -> NodeId {
    let ty = basic_int_type(ast);
    let lhs = int_literal(ast, "1");
    let rhs = int_literal(ast, "2");
    let sum = ast.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: false,
        semantic_type: None,
        kind: ExprKind::Binary { op: BinaryOp::Add, lhs, rhs },
    }));
    let decl = ast.alloc(Node::Decl(DeclNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        name: Some("x".to_string()),
        storage_class: StorageClass::None,
        qualifiers: DeclQualifiers::default(),
        symbol: None,
        kind: DeclKind::Variable { var_type: ty, initializer: Some(sum) },
    }));
    for child in [ty, sum] {
        ast.attach(decl, child);
    }
    ast.attach(sum, lhs);
    ast.attach(sum, rhs);
    decl
}

#[test]
fn children_of_variable_decl_is_type_then_initializer() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let children = children_of(&ast, decl);
    assert_eq!(children.len(), 2);
    assert!(matches!(ast.get(children[0]), Node::TypeSpec(_)));
    assert!(matches!(ast.get(children[1]), Node::Expr(_)));
}

#[test]
fn count_descendants_counts_every_distinct_reachable_node() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    // decl, type, sum, lhs, rhs = 5
    assert_eq!(count_descendants(&ast, decl), 5);
}

#[test]
fn depth_of_variable_decl_is_three() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    // decl -> sum -> lhs (or rhs) = 3 levels
    assert_eq!(depth(&ast, decl), 3);
}

#[test]
fn child_count_matches_children_of_len() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    assert_eq!(child_count(&ast, decl), children_of(&ast, decl).len());
}

#[test]
fn find_children_by_kind_filters_direct_children_only() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let exprs = find_children_by_kind(&ast, decl, |n| n.is_expression());
    assert_eq!(exprs.len(), 1);
}

#[test]
fn find_parent_by_kind_walks_up_to_the_declaration() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let sum = children_of(&ast, decl)[1];
    let lhs = children_of(&ast, sum)[0];
    let found = find_parent_by_kind(&ast, lhs, |n| n.is_declaration());
    assert_eq!(found, Some(decl));
}

#[test]
fn find_all_by_kind_finds_both_literals() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let literals = find_all_by_kind(&ast, decl, |n| matches!(n, Node::Expr(e) if matches!(e.kind, ExprKind::Literal { .. })));
    assert_eq!(literals.len(), 2);
}

#[test]
fn validate_reports_empty_variable_name() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let ty = basic_int_type(&mut ast);
    let decl = ast.alloc(Node::Decl(DeclNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        name: None,
        storage_class: StorageClass::None,
        qualifiers: DeclQualifiers::default(),
        symbol: None,
        kind: DeclKind::Variable { var_type: ty, initializer: None },
    }));
    ast.attach(decl, ty);
    let mut diagnostics = engine();
    assert!(!validate(&ast, decl, &mut diagnostics));
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn validate_accepts_well_formed_declaration() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let mut diagnostics = engine();
    assert!(validate(&ast, decl, &mut diagnostics));
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn validate_rejects_variable_whose_type_child_is_not_a_type_specifier() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let not_a_type = int_literal(&mut ast, "1");
    let decl = ast.alloc(Node::Decl(DeclNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        name: Some("x".to_string()),
        storage_class: StorageClass::None,
        qualifiers: DeclQualifiers::default(),
        symbol: None,
        kind: DeclKind::Variable { var_type: not_a_type, initializer: None },
    }));
    ast.attach(decl, not_a_type);
    let mut diagnostics = engine();
    assert!(!validate(&ast, decl, &mut diagnostics));
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn validate_rejects_binary_expression_whose_operand_is_not_an_expression() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let not_an_expr = basic_int_type(&mut ast);
    let lhs = int_literal(&mut ast, "1");
    let add = ast.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: false,
        semantic_type: None,
        kind: ExprKind::Binary { op: BinaryOp::Add, lhs, rhs: not_an_expr },
    }));
    ast.attach(add, lhs);
    ast.attach(add, not_an_expr);
    let mut diagnostics = engine();
    assert!(!validate(&ast, add, &mut diagnostics));
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn clone_subtree_produces_structurally_equal_but_distinct_nodes() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = sample_variable_decl(&mut ast);
    let cloned = clone_subtree(&mut ast, decl);
    assert_ne!(cloned, decl);
    assert!(equals(&ast, decl, &ast, cloned));
    // The clone's children live at fresh ids, not the originals'.
    assert_ne!(children_of(&ast, decl), children_of(&ast, cloned));
}

#[test]
fn equals_is_false_when_operator_kind_differs() {
    let mut left = Ast::new(SourceLocation::unknown(1, 1, 0));
    let l_lhs = int_literal(&mut left, "1");
    let l_rhs = int_literal(&mut left, "2");
    let l_add = left.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: false,
        semantic_type: None,
        kind: ExprKind::Binary { op: BinaryOp::Add, lhs: l_lhs, rhs: l_rhs },
    }));
    left.attach(l_add, l_lhs);
    left.attach(l_add, l_rhs);

    let mut right = Ast::new(SourceLocation::unknown(1, 1, 0));
    let r_lhs = int_literal(&mut right, "1");
    let r_rhs = int_literal(&mut right, "2");
    let r_sub = right.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: false,
        semantic_type: None,
        kind: ExprKind::Binary { op: BinaryOp::Sub, lhs: r_lhs, rhs: r_rhs },
    }));
    right.attach(r_sub, r_lhs);
    right.attach(r_sub, r_rhs);

    assert!(!equals(&left, l_add, &right, r_sub));
}
