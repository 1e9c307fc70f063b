//! Generic utilities over the AST: counting, depth, child enumeration,
//! search, structural validation, clone, and equality — spec.md §4.7.
//!
//! `children_of` is the single place that knows, per node kind, which
//! fields are children. Every other utility here (and the dumper) goes
//! through it rather than re-deriving the child list itself.

use crate::diagnostics::DiagnosticEngine;
use crate::error::ValidationError;
use crate::location::SourceLocation;

use super::node::{DeclKind, ExprKind, StmtKind, TypeSpecKind};
use super::{Ast, Node, NodeId};

/// Returns `id`'s direct children in stored order. Table-driven over
/// `Node`'s kind, per spec.md §4.5's "single place that enumerates
/// children" requirement.
pub fn children_of(ast: &Ast, id: NodeId) -> Vec<NodeId> {
    match ast.get(id) {
        Node::TranslationUnit(tu) => tu.declarations.clone(),
        Node::Expr(e) => match &e.kind {
            ExprKind::Literal { .. } | ExprKind::Identifier { .. } => vec![],
            ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Assignment { target, value, .. } => vec![*target, *value],
            ExprKind::Ternary { cond, then_expr, else_expr } => vec![*cond, *then_expr, *else_expr],
            ExprKind::Call { callee, args } => {
                let mut children = vec![*callee];
                children.extend(args.iter().copied());
                children
            }
            ExprKind::Subscript { array, index } => vec![*array, *index],
            ExprKind::Member { object, .. } => vec![*object],
            ExprKind::Cast { target_type, operand } => vec![*target_type, *operand],
        },
        Node::Stmt(s) => match &s.kind {
            StmtKind::Expression { expr } => vec![*expr],
            StmtKind::Compound { decls, stmts } => {
                let mut children = decls.clone();
                children.extend(stmts.iter().copied());
                children
            }
            StmtKind::If { cond, then_branch, else_branch } => {
                let mut children = vec![*cond, *then_branch];
                children.extend(*else_branch);
                children
            }
            StmtKind::While { cond, body } => vec![*cond, *body],
            StmtKind::DoWhile { body, cond } => vec![*body, *cond],
            StmtKind::For { init, cond, step, body } => {
                let mut children = Vec::new();
                children.extend(*init);
                children.extend(*cond);
                children.extend(*step);
                children.push(*body);
                children
            }
            StmtKind::Return { value } => value.iter().copied().collect(),
            StmtKind::Break | StmtKind::Continue => vec![],
            StmtKind::Switch { cond, cases } => {
                let mut children = vec![*cond];
                children.extend(cases.iter().copied());
                children
            }
            StmtKind::Case { value, body, .. } => {
                let mut children: Vec<NodeId> = value.iter().copied().collect();
                children.push(*body);
                children
            }
            StmtKind::Labeled { body, .. } => vec![*body],
            StmtKind::Goto { .. } => vec![],
        },
        Node::Decl(d) => match &d.kind {
            DeclKind::Variable { var_type, initializer } => {
                let mut children = vec![*var_type];
                children.extend(*initializer);
                children
            }
            DeclKind::Function { return_type, parameters, body } => {
                let mut children = vec![*return_type];
                children.extend(parameters.iter().copied());
                children.extend(*body);
                children
            }
            DeclKind::Struct { members } | DeclKind::Union { members } => members.clone(),
            DeclKind::Enum { constants } => constants.iter().filter_map(|c| c.value).collect(),
            DeclKind::Typedef { underlying_type } => vec![*underlying_type],
        },
        Node::TypeSpec(t) => match &t.kind {
            TypeSpecKind::Basic { .. } => vec![],
            TypeSpecKind::Pointer { pointee } => vec![*pointee],
            TypeSpecKind::Array { element, size, .. } => {
                let mut children = vec![*element];
                children.extend(*size);
                children
            }
            TypeSpecKind::Function { return_type, params, .. } => {
                let mut children = vec![*return_type];
                children.extend(params.iter().copied());
                children
            }
            TypeSpecKind::StructRef { .. } | TypeSpecKind::UnionRef { .. } | TypeSpecKind::EnumRef { .. } => vec![],
            TypeSpecKind::TypedefNameRef { .. } => vec![],
        },
    }
}

/// 1 + the sum of descendant counts over `children_of`.
pub fn count_descendants(ast: &Ast, id: NodeId) -> usize {
    1 + children_of(ast, id).iter().map(|child| count_descendants(ast, *child)).sum::<usize>()
}

/// 1 + the max depth of any child; leaves have depth 1.
pub fn depth(ast: &Ast, id: NodeId) -> usize {
    1 + children_of(ast, id).iter().map(|child| depth(ast, *child)).max().unwrap_or(0)
}

/// The number of direct children — a per-kind constant for fixed-arity
/// nodes, the sequence length for list-bearing ones. Implemented in terms
/// of `children_of` rather than duplicating the arity table, since the two
/// must always agree.
pub fn child_count(ast: &Ast, id: NodeId) -> usize {
    children_of(ast, id).len()
}

/// Direct children matching `predicate`, in stored order.
pub fn find_children_by_kind(ast: &Ast, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
    children_of(ast, id).into_iter().filter(|child| predicate(ast.get(*child))).collect()
}

/// Walks `parent` back-references upward from `id` (exclusive) until a
/// node matching `predicate` is found.
pub fn find_parent_by_kind(ast: &Ast, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
    let mut current = ast.get(id).parent();
    while let Some(candidate) = current {
        if predicate(ast.get(candidate)) {
            return Some(candidate);
        }
        current = ast.get(candidate).parent();
    }
    None
}

/// Iterative DFS (explicit stack, per spec.md §4.7) collecting every node
/// reachable from `id`, including `id` itself, matching `predicate`.
pub fn find_all_by_kind(ast: &Ast, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        if predicate(ast.get(current)) {
            found.push(current);
        }
        // Push in reverse so traversal order matches recursive pre-order.
        let children = children_of(ast, current);
        stack.extend(children.into_iter().rev());
    }
    found
}

/// Per-kind structural checks from spec.md §4.7. Each violation is raised
/// as the matching [`ValidationError`] variant and reported through
/// `diagnostics` via its `Display` text; returns `true` iff the whole
/// subtree validated clean.
pub fn validate(ast: &Ast, id: NodeId, diagnostics: &mut DiagnosticEngine) -> bool {
    let node = ast.get(id);
    let location = node.location().clone();
    let mut ok = check_node(ast, node, &location, diagnostics);
    for child in children_of(ast, id) {
        ok &= validate(ast, child, diagnostics);
    }
    ok
}

fn reject(diagnostics: &mut DiagnosticEngine, location: &SourceLocation, error: ValidationError) -> bool {
    diagnostics.error(location.clone(), error.to_string());
    false
}

fn check_node(ast: &Ast, node: &Node, location: &SourceLocation, diagnostics: &mut DiagnosticEngine) -> bool {
    match node {
        Node::Expr(e) => match &e.kind {
            ExprKind::Literal { token } => {
                if token.kind == crate::token::TokenKind::Unknown {
                    return reject(diagnostics, location, ValidationError::LiteralUnknownKind);
                }
                true
            }
            ExprKind::Identifier { name } => {
                if name.is_empty() {
                    return reject(diagnostics, location, ValidationError::EmptyIdentifierName);
                }
                true
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                if !ast.get(*lhs).is_expression() || !ast.get(*rhs).is_expression() {
                    return reject(diagnostics, location, ValidationError::MissingOperand { op: "binary" });
                }
                true
            }
            ExprKind::Unary { operand, .. } => {
                if !ast.get(*operand).is_expression() {
                    return reject(diagnostics, location, ValidationError::MissingOperand { op: "unary" });
                }
                true
            }
            ExprKind::Assignment { target, value, .. } => {
                if !ast.get(*target).is_expression() || !ast.get(*value).is_expression() {
                    return reject(diagnostics, location, ValidationError::MissingOperand { op: "assignment" });
                }
                true
            }
            ExprKind::Ternary { cond, then_expr, else_expr } => {
                let operands_ok =
                    ast.get(*cond).is_expression() && ast.get(*then_expr).is_expression() && ast.get(*else_expr).is_expression();
                if !operands_ok {
                    return reject(diagnostics, location, ValidationError::MissingOperand { op: "ternary" });
                }
                true
            }
            _ => true,
        },
        Node::Stmt(s) => match &s.kind {
            StmtKind::If { then_branch, .. } => {
                if !ast.get(*then_branch).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "if" });
                }
                true
            }
            StmtKind::While { body, .. } => {
                if !ast.get(*body).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "while" });
                }
                true
            }
            StmtKind::DoWhile { body, .. } => {
                if !ast.get(*body).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "do-while" });
                }
                true
            }
            StmtKind::For { body, .. } => {
                if !ast.get(*body).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "for" });
                }
                true
            }
            StmtKind::Case { body, .. } => {
                if !ast.get(*body).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "case" });
                }
                true
            }
            StmtKind::Labeled { body, .. } => {
                if !ast.get(*body).is_statement() {
                    return reject(diagnostics, location, ValidationError::MissingBody { what: "labeled" });
                }
                true
            }
            _ => true,
        },
        Node::Decl(d) => match &d.kind {
            DeclKind::Variable { var_type, .. } => {
                if d.name.as_deref().unwrap_or("").is_empty() {
                    return reject(diagnostics, location, ValidationError::VariableEmptyName);
                }
                if !ast.get(*var_type).is_type_specifier() {
                    let name = d.name.clone().unwrap_or_default();
                    return reject(diagnostics, location, ValidationError::VariableMissingType { name });
                }
                true
            }
            DeclKind::Function { return_type, .. } => {
                if d.name.as_deref().unwrap_or("").is_empty() {
                    return reject(diagnostics, location, ValidationError::FunctionEmptyName);
                }
                if !ast.get(*return_type).is_type_specifier() {
                    let name = d.name.clone().unwrap_or_default();
                    return reject(diagnostics, location, ValidationError::FunctionMissingReturnType { name });
                }
                true
            }
            _ => true,
        },
        _ => true,
    }
}

/// Deep-copies the subtree rooted at `id` into `ast`, appending the new
/// nodes and returning the new root's id. Back-references (`parent`) are
/// rebuilt to point within the cloned subtree; operator kinds, flags, and
/// literal payloads are copied verbatim — resolves Open Question 5.
pub fn clone_subtree(ast: &mut Ast, id: NodeId) -> NodeId {
    let children: Vec<NodeId> = children_of(ast, id);
    let cloned_children: Vec<NodeId> = children.iter().map(|child| clone_subtree(ast, *child)).collect();
    let mut new_node = ast.get(id).clone();
    replace_child_ids(&mut new_node, &children, &cloned_children);
    let new_id = ast.alloc(new_node);
    for child in cloned_children {
        ast.attach(new_id, child);
    }
    new_id
}

/// Rewrites every `NodeId` recorded in `node`'s kind payload according to
/// the `old -> new` mapping implied by parallel `from`/`to` slices — used
/// only by `clone_subtree` to relink a freshly copied node to its freshly
/// copied children (which live at different arena slots than the
/// originals).
fn replace_child_ids(node: &mut Node, from: &[NodeId], to: &[NodeId]) {
    let remap = |id: &mut NodeId| {
        if let Some(pos) = from.iter().position(|candidate| candidate == id) {
            *id = to[pos];
        }
    };
    match node {
        Node::TranslationUnit(tu) => tu.declarations.iter_mut().for_each(remap),
        Node::Expr(e) => match &mut e.kind {
            ExprKind::Literal { .. } | ExprKind::Identifier { .. } => {}
            ExprKind::Binary { lhs, rhs, .. } => {
                remap(lhs);
                remap(rhs);
            }
            ExprKind::Unary { operand, .. } => remap(operand),
            ExprKind::Assignment { target, value, .. } => {
                remap(target);
                remap(value);
            }
            ExprKind::Ternary { cond, then_expr, else_expr } => {
                remap(cond);
                remap(then_expr);
                remap(else_expr);
            }
            ExprKind::Call { callee, args } => {
                remap(callee);
                args.iter_mut().for_each(remap);
            }
            ExprKind::Subscript { array, index } => {
                remap(array);
                remap(index);
            }
            ExprKind::Member { object, .. } => remap(object),
            ExprKind::Cast { target_type, operand } => {
                remap(target_type);
                remap(operand);
            }
        },
        Node::Stmt(s) => match &mut s.kind {
            StmtKind::Expression { expr } => remap(expr),
            StmtKind::Compound { decls, stmts } => {
                decls.iter_mut().for_each(&remap);
                stmts.iter_mut().for_each(&remap);
            }
            StmtKind::If { cond, then_branch, else_branch } => {
                remap(cond);
                remap(then_branch);
                if let Some(e) = else_branch {
                    remap(e);
                }
            }
            StmtKind::While { cond, body } | StmtKind::DoWhile { body, cond } => {
                remap(cond);
                remap(body);
            }
            StmtKind::For { init, cond, step, body } => {
                if let Some(n) = init {
                    remap(n);
                }
                if let Some(n) = cond {
                    remap(n);
                }
                if let Some(n) = step {
                    remap(n);
                }
                remap(body);
            }
            StmtKind::Return { value } => {
                if let Some(v) = value {
                    remap(v);
                }
            }
            StmtKind::Break | StmtKind::Continue | StmtKind::Goto { .. } => {}
            StmtKind::Switch { cond, cases } => {
                remap(cond);
                cases.iter_mut().for_each(&remap);
            }
            StmtKind::Case { value, body, .. } => {
                if let Some(v) = value {
                    remap(v);
                }
                remap(body);
            }
            StmtKind::Labeled { body, .. } => remap(body),
        },
        Node::Decl(d) => match &mut d.kind {
            DeclKind::Variable { var_type, initializer } => {
                remap(var_type);
                if let Some(i) = initializer {
                    remap(i);
                }
            }
            DeclKind::Function { return_type, parameters, body } => {
                remap(return_type);
                parameters.iter_mut().for_each(&remap);
                if let Some(b) = body {
                    remap(b);
                }
            }
            DeclKind::Struct { members } | DeclKind::Union { members } => members.iter_mut().for_each(&remap),
            DeclKind::Enum { constants } => {
                for constant in constants.iter_mut() {
                    if let Some(v) = &mut constant.value {
                        remap(v);
                    }
                }
            }
            DeclKind::Typedef { underlying_type } => remap(underlying_type),
        },
        Node::TypeSpec(t) => match &mut t.kind {
            TypeSpecKind::Basic { .. } => {}
            TypeSpecKind::Pointer { pointee } => remap(pointee),
            TypeSpecKind::Array { element, size, .. } => {
                remap(element);
                if let Some(s) = size {
                    remap(s);
                }
            }
            TypeSpecKind::Function { return_type, params, .. } => {
                remap(return_type);
                params.iter_mut().for_each(&remap);
            }
            TypeSpecKind::StructRef { .. } | TypeSpecKind::UnionRef { .. } | TypeSpecKind::EnumRef { .. } => {}
            TypeSpecKind::TypedefNameRef { .. } => {}
        },
    }
}

/// Recursive structural equality, excluding back-references and location:
/// two subtrees are equal iff they have the same shape, operator kinds,
/// flags, and literal/name payloads. Resolves Open Question 5.
pub fn equals(left_ast: &Ast, left: NodeId, right_ast: &Ast, right: NodeId) -> bool {
    if !node_payload_eq(left_ast.get(left), right_ast.get(right)) {
        return false;
    }
    let left_children = children_of(left_ast, left);
    let right_children = children_of(right_ast, right);
    if left_children.len() != right_children.len() {
        return false;
    }
    left_children
        .iter()
        .zip(right_children.iter())
        .all(|(l, r)| equals(left_ast, *l, right_ast, *r))
}

fn node_payload_eq(left: &Node, right: &Node) -> bool {
    match (left, right) {
        (Node::TranslationUnit(_), Node::TranslationUnit(_)) => true,
        (Node::Expr(a), Node::Expr(b)) => match (&a.kind, &b.kind) {
            (ExprKind::Literal { token: t1 }, ExprKind::Literal { token: t2 }) => t1 == t2,
            (ExprKind::Identifier { name: n1 }, ExprKind::Identifier { name: n2 }) => n1 == n2,
            (ExprKind::Binary { op: o1, .. }, ExprKind::Binary { op: o2, .. }) => o1 == o2,
            (ExprKind::Unary { op: o1, is_prefix: p1, .. }, ExprKind::Unary { op: o2, is_prefix: p2, .. }) => {
                o1 == o2 && p1 == p2
            }
            (ExprKind::Assignment { op: o1, .. }, ExprKind::Assignment { op: o2, .. }) => o1 == o2,
            (ExprKind::Ternary { .. }, ExprKind::Ternary { .. }) => true,
            (ExprKind::Call { args: a1, .. }, ExprKind::Call { args: a2, .. }) => a1.len() == a2.len(),
            (ExprKind::Subscript { .. }, ExprKind::Subscript { .. }) => true,
            (ExprKind::Member { member: m1, is_arrow: w1, .. }, ExprKind::Member { member: m2, is_arrow: w2, .. }) => {
                m1 == m2 && w1 == w2
            }
            (ExprKind::Cast { .. }, ExprKind::Cast { .. }) => true,
            _ => false,
        },
        (Node::Stmt(a), Node::Stmt(b)) => match (&a.kind, &b.kind) {
            (StmtKind::Expression { .. }, StmtKind::Expression { .. }) => true,
            (StmtKind::Compound { .. }, StmtKind::Compound { .. }) => true,
            (StmtKind::If { else_branch: e1, .. }, StmtKind::If { else_branch: e2, .. }) => {
                e1.is_some() == e2.is_some()
            }
            (StmtKind::While { .. }, StmtKind::While { .. }) => true,
            (StmtKind::DoWhile { .. }, StmtKind::DoWhile { .. }) => true,
            (StmtKind::For { .. }, StmtKind::For { .. }) => true,
            (StmtKind::Return { .. }, StmtKind::Return { .. }) => true,
            (StmtKind::Break, StmtKind::Break) => true,
            (StmtKind::Continue, StmtKind::Continue) => true,
            (StmtKind::Switch { .. }, StmtKind::Switch { .. }) => true,
            (StmtKind::Case { kind: k1, .. }, StmtKind::Case { kind: k2, .. }) => k1 == k2,
            (StmtKind::Labeled { label: l1, .. }, StmtKind::Labeled { label: l2, .. }) => l1 == l2,
            (StmtKind::Goto { label: l1 }, StmtKind::Goto { label: l2 }) => l1 == l2,
            _ => false,
        },
        (Node::Decl(a), Node::Decl(b)) => {
            if a.name != b.name || a.storage_class != b.storage_class || a.qualifiers != b.qualifiers {
                return false;
            }
            matches!(
                (&a.kind, &b.kind),
                (DeclKind::Variable { .. }, DeclKind::Variable { .. })
                    | (DeclKind::Function { .. }, DeclKind::Function { .. })
                    | (DeclKind::Struct { .. }, DeclKind::Struct { .. })
                    | (DeclKind::Union { .. }, DeclKind::Union { .. })
                    | (DeclKind::Enum { .. }, DeclKind::Enum { .. })
                    | (DeclKind::Typedef { .. }, DeclKind::Typedef { .. })
            )
        }
        (Node::TypeSpec(a), Node::TypeSpec(b)) => match (&a.kind, &b.kind) {
            (
                TypeSpecKind::Basic { base: b1, is_long: l1, is_short: s1, is_signed: g1, is_unsigned: u1 },
                TypeSpecKind::Basic { base: b2, is_long: l2, is_short: s2, is_signed: g2, is_unsigned: u2 },
            ) => b1 == b2 && l1 == l2 && s1 == s2 && g1 == g2 && u1 == u2,
            (TypeSpecKind::Pointer { .. }, TypeSpecKind::Pointer { .. }) => true,
            (TypeSpecKind::Array { is_vla: v1, .. }, TypeSpecKind::Array { is_vla: v2, .. }) => v1 == v2,
            (TypeSpecKind::Function { variadic: v1, .. }, TypeSpecKind::Function { variadic: v2, .. }) => v1 == v2,
            (TypeSpecKind::StructRef { name: n1, .. }, TypeSpecKind::StructRef { name: n2, .. }) => n1 == n2,
            (TypeSpecKind::UnionRef { name: n1, .. }, TypeSpecKind::UnionRef { name: n2, .. }) => n1 == n2,
            (TypeSpecKind::EnumRef { name: n1, .. }, TypeSpecKind::EnumRef { name: n2, .. }) => n1 == n2,
            (TypeSpecKind::TypedefNameRef { name: n1 }, TypeSpecKind::TypedefNameRef { name: n2 }) => n1 == n2,
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod utils_tests;
