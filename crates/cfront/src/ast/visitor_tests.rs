use super::*;
use crate::ast::node::{BinaryOp, ExprKind, ExprNode, NodeHeader};
use crate::location::SourceLocation;
use crate::token::{Token, TokenKind};

fn literal(ast: &mut Ast, value: &str) -> NodeId {
    ast.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: true,
        semantic_type: None,
        kind: ExprKind::Literal { token: Token::new(TokenKind::IntegerLiteral, value.to_string(), SourceLocation::unknown(1, 1, 0)) },
    }))
}

// Builds `(1 + 2)`, unattached to any translation unit — tests only need
// child links, not the root.
fn small_binary_tree() -> (Ast, NodeId, NodeId, NodeId) {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let lhs = literal(&mut ast, "1");
    let rhs = literal(&mut ast, "2");
    let binary = ast.alloc(Node::Expr(ExprNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        is_lvalue: false,
        is_constant: false,
        semantic_type: None,
        kind: ExprKind::Binary { op: BinaryOp::Add, lhs, rhs },
    }));
    ast.attach(binary, lhs);
    ast.attach(binary, rhs);
    (ast, binary, lhs, rhs)
}

struct RecordingVisitor {
    order: Vec<NodeId>,
}

impl Visitor for RecordingVisitor {
    fn visit(&mut self, _ast: &Ast, id: NodeId) {
        self.order.push(id);
    }
}

#[test]
fn preorder_dfs_visits_parent_before_children() {
    let (ast, binary, lhs, rhs) = small_binary_tree();
    let mut visitor = RecordingVisitor { order: Vec::new() };
    let mut ctx = DfsContext::new();
    dfs(&mut visitor, &ast, binary, &mut ctx, true);
    assert_eq!(visitor.order, vec![binary, lhs, rhs]);
}

#[test]
fn postorder_dfs_visits_children_before_parent() {
    let (ast, binary, lhs, rhs) = small_binary_tree();
    let mut visitor = RecordingVisitor { order: Vec::new() };
    let mut ctx = DfsContext::new();
    dfs(&mut visitor, &ast, binary, &mut ctx, false);
    assert_eq!(visitor.order, vec![lhs, rhs, binary]);
}

#[test]
fn bfs_visits_in_level_order() {
    let (ast, binary, lhs, rhs) = small_binary_tree();
    let mut visitor = RecordingVisitor { order: Vec::new() };
    bfs(&mut visitor, &ast, binary);
    assert_eq!(visitor.order, vec![binary, lhs, rhs]);
}

#[test]
fn max_depth_zero_means_unlimited_but_one_prunes_grandchildren() {
    let (ast, binary, _lhs, _rhs) = small_binary_tree();
    let mut visitor = RecordingVisitor { order: Vec::new() };
    let mut ctx = DfsContext { depth: 0, max_depth: 1, visit_children: true, stop_traversal: false };
    dfs(&mut visitor, &ast, binary, &mut ctx, true);
    assert_eq!(visitor.order, vec![binary]);
}

#[test]
fn before_visit_returning_false_skips_node_and_children() {
    struct SkipEverything;
    impl Visitor for SkipEverything {
        fn before_visit(&mut self, _ast: &Ast, _id: NodeId) -> bool {
            false
        }
    }
    let (ast, binary, _lhs, _rhs) = small_binary_tree();
    let mut visitor = SkipEverything;
    let mut ctx = DfsContext::new();
    // Should not panic, and should not invoke any per-kind handler.
    dfs(&mut visitor, &ast, binary, &mut ctx, true);
}

#[test]
fn stop_traversal_aborts_remaining_siblings() {
    struct StopAfterFirst {
        visited: Vec<NodeId>,
    }
    impl Visitor for StopAfterFirst {
        fn visit(&mut self, _ast: &Ast, id: NodeId) {
            self.visited.push(id);
        }
        fn after_visit(&mut self, _ast: &Ast, _id: NodeId) {}
    }
    let (ast, binary, lhs, _rhs) = small_binary_tree();
    let mut visitor = StopAfterFirst { visited: Vec::new() };
    let mut ctx = DfsContext::new();
    // Manually flip stop_traversal after the root is visited by driving
    // one level at a time instead of delegating entirely to `dfs`.
    accept(&mut visitor, &ast, binary);
    ctx.stop_traversal = true;
    dfs(&mut visitor, &ast, lhs, &mut ctx, true);
    assert_eq!(visitor.visited, vec![binary]);
}

#[test]
fn accept_dispatches_to_the_binary_handler() {
    struct KindRecorder {
        saw_binary: bool,
        saw_literal: bool,
    }
    impl Visitor for KindRecorder {
        fn visit_binary_expr(&mut self, _ast: &Ast, _id: NodeId) {
            self.saw_binary = true;
        }
        fn visit_literal_expr(&mut self, _ast: &Ast, _id: NodeId) {
            self.saw_literal = true;
        }
    }
    let (ast, binary, lhs, _rhs) = small_binary_tree();
    let mut visitor = KindRecorder { saw_binary: false, saw_literal: false };
    accept(&mut visitor, &ast, binary);
    assert!(visitor.saw_binary);
    assert!(!visitor.saw_literal);
    accept(&mut visitor, &ast, lhs);
    assert!(visitor.saw_literal);
}
