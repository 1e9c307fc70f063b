use super::*;
use crate::ast::node::{BasicType, BinaryOp, CaseKind, DeclQualifiers, ExprKind, StorageClass};
use crate::diagnostics::{BufferConsumer, DiagnosticEngine};
use crate::location::SourceLocation;
use crate::token::{LiteralBase, LiteralValue, Token, TokenKind};

fn builder() -> AstBuilder {
    AstBuilder::new(SourceLocation::unknown(1, 1, 0), DiagnosticEngine::new(Box::new(BufferConsumer::new())))
}

fn int_type(b: &mut AstBuilder) -> NodeId {
    b.create_basic_type(BasicType::Int, false, false, false, false, SourceLocation::unknown(1, 1, 0))
}

fn int_literal(b: &mut AstBuilder, text: &str, value: i64) -> NodeId {
    let token = Token::new(TokenKind::IntegerLiteral, text.to_string(), SourceLocation::unknown(1, 1, 0))
        .with_literal(LiteralBase::Decimal, LiteralValue::Integer(value));
    b.create_literal_expression(token, SourceLocation::unknown(1, 1, 0)).unwrap()
}

#[test]
fn add_variable_declaration_sets_parent_on_type_and_initializer() {
    let mut b = builder();
    let ty = int_type(&mut b);
    let init = int_literal(&mut b, "0", 0);
    let decl = b.add_variable_declaration("x", ty, StorageClass::None, Some(init), SourceLocation::unknown(1, 1, 0)).unwrap();
    assert_eq!(b.ast().get(ty).parent(), Some(decl));
    assert_eq!(b.ast().get(init).parent(), Some(decl));
    assert_eq!(b.ast().translation_unit().declarations, vec![decl]);
}

#[test]
fn add_variable_declaration_rejects_bad_identifier() {
    let mut b = builder();
    let ty = int_type(&mut b);
    let result = b.add_variable_declaration("9x", ty, StorageClass::None, None, SourceLocation::unknown(1, 1, 0));
    assert!(result.is_err());
    assert_eq!(b.diagnostics().error_count(), 1);
}

#[test]
fn add_variable_declaration_with_qualifiers_sets_const_and_volatile() {
    let mut b = builder();
    let ty = int_type(&mut b);
    let qualifiers = DeclQualifiers { is_const: true, is_volatile: true, ..Default::default() };
    let decl = b
        .add_variable_declaration_with_qualifiers("x", ty, StorageClass::None, qualifiers, None, SourceLocation::unknown(1, 1, 0))
        .unwrap();
    match b.ast().get(decl) {
        Node::Decl(d) => assert_eq!(d.qualifiers, qualifiers),
        _ => panic!("expected declaration"),
    }
}

#[test]
fn function_declaration_attaches_return_type_params_and_body() {
    let mut b = builder();
    let return_type = int_type(&mut b);
    let param_type = int_type(&mut b);
    let param = b.add_variable_declaration("n", param_type, StorageClass::None, None, SourceLocation::unknown(1, 1, 0)).unwrap();
    let body = b.create_compound_statement(SourceLocation::unknown(1, 1, 0));
    let func = b
        .add_function_declaration("main", return_type, vec![param], Some(body), StorageClass::None, SourceLocation::unknown(1, 1, 0))
        .unwrap();
    assert_eq!(b.ast().get(return_type).parent(), Some(func));
    assert_eq!(b.ast().get(body).parent(), Some(func));
}

#[test]
fn add_stmt_to_compound_rejects_non_compound_target() {
    let mut b = builder();
    let not_compound = b.create_break_statement(SourceLocation::unknown(1, 1, 0));
    let stmt = b.create_continue_statement(SourceLocation::unknown(1, 1, 0));
    let result = b.add_stmt_to_compound(not_compound, stmt);
    assert!(result.is_err());
}

#[test]
fn add_stmt_and_decl_to_compound_preserve_two_separate_sequences() {
    let mut b = builder();
    let compound = b.create_compound_statement(SourceLocation::unknown(1, 1, 0));
    let ty = int_type(&mut b);
    let decl = b.add_variable_declaration("x", ty, StorageClass::None, None, SourceLocation::unknown(1, 1, 0)).unwrap();
    // Declarations created via add_variable_declaration land on the root's
    // top-level list; re-homing into a compound still needs an explicit
    // add_decl_to_compound call, matching spec.md's "not interleaved" rule.
    b.add_decl_to_compound(compound, decl).unwrap();
    let stmt = b.create_break_statement(SourceLocation::unknown(1, 1, 0));
    b.add_stmt_to_compound(compound, stmt).unwrap();

    match b.ast().get(compound) {
        Node::Stmt(StmtNode { kind: StmtKind::Compound { decls, stmts }, .. }) => {
            assert_eq!(decls, &vec![decl]);
            assert_eq!(stmts, &vec![stmt]);
        }
        _ => panic!("expected compound statement"),
    }
}

#[test]
fn case_statement_requires_value_iff_label() {
    let mut b = builder();
    let body = b.create_break_statement(SourceLocation::unknown(1, 1, 0));
    assert!(b.create_case_statement(CaseKind::Label, None, body, SourceLocation::unknown(1, 1, 0)).is_err());
    let value = int_literal(&mut b, "1", 1);
    assert!(b.create_case_statement(CaseKind::Default, Some(value), body, SourceLocation::unknown(1, 1, 0)).is_err());
    assert!(b.create_case_statement(CaseKind::Label, Some(value), body, SourceLocation::unknown(1, 1, 0)).is_ok());
}

#[test]
fn binary_expression_is_not_an_lvalue_and_not_constant() {
    let mut b = builder();
    let lhs = int_literal(&mut b, "1", 1);
    let rhs = int_literal(&mut b, "2", 2);
    let expr = b.create_binary_expression(BinaryOp::Add, lhs, rhs, SourceLocation::unknown(1, 1, 0));
    match b.ast().get(expr) {
        Node::Expr(e) => {
            assert!(!e.is_lvalue);
            assert!(!e.is_constant);
        }
        _ => panic!("expected expression"),
    }
}

#[test]
fn identifier_expression_is_an_lvalue() {
    let mut b = builder();
    let expr = b.create_identifier_expression("x", SourceLocation::unknown(1, 1, 0)).unwrap();
    match b.ast().get(expr) {
        Node::Expr(e) => {
            assert!(e.is_lvalue);
            assert!(!e.is_constant);
            assert!(matches!(e.kind, ExprKind::Identifier { .. }));
        }
        _ => panic!("expected expression"),
    }
}

#[test]
fn literal_expression_is_constant_but_not_an_lvalue() {
    let mut b = builder();
    let expr = int_literal(&mut b, "1", 1);
    match b.ast().get(expr) {
        Node::Expr(e) => {
            assert!(!e.is_lvalue);
            assert!(e.is_constant);
        }
        _ => panic!("expected expression"),
    }
}
