//! `AstDumper`: a concrete [`Visitor`] that prints an indented tree —
//! spec.md §4.8/§6.

use super::node::{AssignOp, BasicType, BinaryOp, CaseKind, DeclKind, ExprKind, StmtKind, StorageClass, TypeSpecKind, UnaryOp};
use super::utils::count_descendants;
use super::visitor::{accept, Visitor};
use super::{Ast, Node, NodeId};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

fn binary_op_spelling(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::LogicalAnd => "&&",
        BinaryOp::LogicalOr => "||",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::Comma => ",",
    }
}

fn unary_op_spelling(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::PostfixInc | UnaryOp::PrefixInc => "++",
        UnaryOp::PostfixDec | UnaryOp::PrefixDec => "--",
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::BitNot => "~",
        UnaryOp::LogicalNot => "!",
        UnaryOp::Deref => "*",
        UnaryOp::AddrOf => "&",
        UnaryOp::Sizeof => "sizeof",
    }
}

fn assign_op_spelling(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::ModAssign => "%=",
        AssignOp::ShlAssign => "<<=",
        AssignOp::ShrAssign => ">>=",
        AssignOp::AndAssign => "&=",
        AssignOp::OrAssign => "|=",
        AssignOp::XorAssign => "^=",
    }
}

fn basic_type_spelling(base: BasicType) -> &'static str {
    match base {
        BasicType::Void => "void",
        BasicType::Char => "char",
        BasicType::Short => "short",
        BasicType::Int => "int",
        BasicType::Long => "long",
        BasicType::Float => "float",
        BasicType::Double => "double",
        BasicType::Signed => "signed",
        BasicType::Unsigned => "unsigned",
        BasicType::Bool => "_Bool",
        BasicType::Complex => "_Complex",
    }
}

/// Configurable tree printer. Default: 2-space indent, no location, no
/// type annotations, no color — machine-readable by default, per spec.md
/// §4.8.
pub struct AstDumper {
    indent_width: usize,
    show_location: bool,
    show_types: bool,
    color_output: bool,
    output: String,
    depth: usize,
}

impl AstDumper {
    pub fn new() -> Self {
        Self { indent_width: 2, show_location: false, show_types: false, color_output: false, output: String::new(), depth: 0 }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_show_location(mut self, value: bool) -> Self {
        self.show_location = value;
        self
    }

    pub fn with_show_types(mut self, value: bool) -> Self {
        self.show_types = value;
        self
    }

    pub fn with_color_output(mut self, value: bool) -> Self {
        self.color_output = value;
        self
    }

    /// Renders `root`'s subtree, header to footer, as a single string.
    pub fn dump(&mut self, ast: &Ast, root: NodeId) -> String {
        self.output.clear();
        self.depth = 0;
        accept(self, ast, root);
        let total = count_descendants(ast, root);
        self.output.push_str(&format!("=== Total: {total} nodes ===\n"));
        std::mem::take(&mut self.output)
    }

    fn indent_str(&self) -> String {
        " ".repeat(self.depth * self.indent_width)
    }

    fn emit(&mut self, text: &str) {
        let indent = self.indent_str();
        self.output.push_str(&indent);
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn emit_node_line(&mut self, ast: &Ast, id: NodeId, annotation: &str) {
        let node = ast.get(id);
        let mut text = String::new();
        if self.color_output {
            text.push_str(BOLD);
        }
        text.push_str(node.type_name());
        if self.color_output {
            text.push_str(RESET);
        }
        text.push_str(annotation);
        if self.show_types {
            if let Node::Expr(e) = node {
                let spelling = match e.semantic_type {
                    Some(t) => format!("#{}", t.0),
                    None => "unresolved".to_string(),
                };
                text.push_str(&format!(" [type: {spelling}]"));
            }
        }
        if self.show_location {
            if self.color_output {
                text.push_str(DIM);
            }
            text.push_str(&format!(" @ {}", node.location()));
            if self.color_output {
                text.push_str(RESET);
            }
        }
        self.emit(&text);
    }

    /// Prints a `Label:` line one level under the current node, then
    /// recurses into `child` one level under *that* — e.g. `Condition:` /
    /// `Then:` / `Body:` each sit between a node and its actual children.
    fn labeled_child(&mut self, ast: &Ast, label: &str, child: NodeId) {
        self.depth += 1;
        self.emit(&format!("{label}:"));
        self.depth += 1;
        accept(self, ast, child);
        self.depth -= 2;
    }

    fn labeled_sequence(&mut self, ast: &Ast, label: &str, children: &[NodeId]) {
        self.depth += 1;
        self.emit(&format!("{label} ({}):", children.len()));
        self.depth += 1;
        for child in children {
            accept(self, ast, *child);
        }
        self.depth -= 2;
    }

    fn child(&mut self, ast: &Ast, child: NodeId) {
        self.depth += 1;
        accept(self, ast, child);
        self.depth -= 1;
    }
}

impl Default for AstDumper {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for AstDumper {
    fn visit_translation_unit(&mut self, ast: &Ast, id: NodeId) {
        self.emit_node_line(ast, id, "");
        let declarations = ast.translation_unit().declarations.clone();
        self.depth += 1;
        for decl in declarations {
            accept(self, ast, decl);
        }
        self.depth -= 1;
    }

    fn visit_literal_expr(&mut self, ast: &Ast, id: NodeId) {
        if let Node::Expr(e) = ast.get(id) {
            if let ExprKind::Literal { token } = &e.kind {
                self.emit_node_line(ast, id, &format!(": '{}'", token.lexeme));
            }
        }
    }

    fn visit_identifier_expr(&mut self, ast: &Ast, id: NodeId) {
        if let Node::Expr(e) = ast.get(id) {
            if let ExprKind::Identifier { name } = &e.kind {
                self.emit_node_line(ast, id, &format!(": '{name}'"));
            }
        }
    }

    fn visit_binary_expr(&mut self, ast: &Ast, id: NodeId) {
        let (op, lhs, rhs) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Binary { op, lhs, rhs } => (op, lhs, rhs),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": {}", binary_op_spelling(op)));
        self.child(ast, lhs);
        self.child(ast, rhs);
    }

    fn visit_unary_expr(&mut self, ast: &Ast, id: NodeId) {
        let (op, operand, is_prefix) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Unary { op, operand, is_prefix } => (op, operand, is_prefix),
                _ => return,
            },
            _ => return,
        };
        let position = if is_prefix { "prefix" } else { "postfix" };
        self.emit_node_line(ast, id, &format!(": {} ({position})", unary_op_spelling(op)));
        self.child(ast, operand);
    }

    fn visit_assignment_expr(&mut self, ast: &Ast, id: NodeId) {
        let (op, target, value) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Assignment { op, target, value } => (op, target, value),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": {}", assign_op_spelling(op)));
        self.child(ast, target);
        self.child(ast, value);
    }

    fn visit_ternary_expr(&mut self, ast: &Ast, id: NodeId) {
        let (cond, then_expr, else_expr) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Ternary { cond, then_expr, else_expr } => (cond, then_expr, else_expr),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Condition", cond);
        self.labeled_child(ast, "Then", then_expr);
        self.labeled_child(ast, "Else", else_expr);
    }

    fn visit_call_expr(&mut self, ast: &Ast, id: NodeId) {
        let (callee, args) = match ast.get(id) {
            Node::Expr(e) => match &e.kind {
                ExprKind::Call { callee, args } => (*callee, args.clone()),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Callee", callee);
        self.labeled_sequence(ast, "Arguments", &args);
    }

    fn visit_subscript_expr(&mut self, ast: &Ast, id: NodeId) {
        let (array, index) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Subscript { array, index } => (array, index),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.child(ast, array);
        self.child(ast, index);
    }

    fn visit_member_expr(&mut self, ast: &Ast, id: NodeId) {
        let (object, member, is_arrow) = match ast.get(id) {
            Node::Expr(e) => match &e.kind {
                ExprKind::Member { object, member, is_arrow } => (*object, member.clone(), *is_arrow),
                _ => return,
            },
            _ => return,
        };
        let accessor = if is_arrow { "->" } else { "." };
        self.emit_node_line(ast, id, &format!(": '{member}' ({accessor})"));
        self.child(ast, object);
    }

    fn visit_cast_expr(&mut self, ast: &Ast, id: NodeId) {
        let (target_type, operand) = match ast.get(id) {
            Node::Expr(e) => match e.kind {
                ExprKind::Cast { target_type, operand } => (target_type, operand),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "TargetType", target_type);
        self.child(ast, operand);
    }

    fn visit_expression_stmt(&mut self, ast: &Ast, id: NodeId) {
        let expr = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::Expression { expr } => expr,
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.child(ast, expr);
    }

    fn visit_compound_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (decls, stmts) = match ast.get(id) {
            Node::Stmt(s) => match &s.kind {
                StmtKind::Compound { decls, stmts } => (decls.clone(), stmts.clone()),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        if !decls.is_empty() {
            self.labeled_sequence(ast, "Declarations", &decls);
        }
        if !stmts.is_empty() {
            self.labeled_sequence(ast, "Statements", &stmts);
        }
    }

    fn visit_if_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (cond, then_branch, else_branch) = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::If { cond, then_branch, else_branch } => (cond, then_branch, else_branch),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Condition", cond);
        self.labeled_child(ast, "Then", then_branch);
        if let Some(else_stmt) = else_branch {
            self.labeled_child(ast, "Else", else_stmt);
        }
    }

    fn visit_while_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (cond, body) = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::While { cond, body } => (cond, body),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Condition", cond);
        self.labeled_child(ast, "Body", body);
    }

    fn visit_do_while_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (body, cond) = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::DoWhile { body, cond } => (body, cond),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Body", body);
        self.labeled_child(ast, "Condition", cond);
    }

    fn visit_for_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (init, cond, step, body) = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::For { init, cond, step, body } => (init, cond, step, body),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        if let Some(init) = init {
            self.labeled_child(ast, "Init", init);
        }
        if let Some(cond) = cond {
            self.labeled_child(ast, "Condition", cond);
        }
        if let Some(step) = step {
            self.labeled_child(ast, "Increment", step);
        }
        self.labeled_child(ast, "Body", body);
    }

    fn visit_return_stmt(&mut self, ast: &Ast, id: NodeId) {
        let value = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::Return { value } => value,
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        if let Some(v) = value {
            self.child(ast, v);
        }
    }

    fn visit_break_stmt(&mut self, ast: &Ast, id: NodeId) {
        self.emit_node_line(ast, id, "");
    }

    fn visit_continue_stmt(&mut self, ast: &Ast, id: NodeId) {
        self.emit_node_line(ast, id, "");
    }

    fn visit_switch_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (cond, cases) = match ast.get(id) {
            Node::Stmt(s) => match &s.kind {
                StmtKind::Switch { cond, cases } => (*cond, cases.clone()),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.labeled_child(ast, "Condition", cond);
        self.labeled_sequence(ast, "Cases", &cases);
    }

    fn visit_case_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (kind, value, body) = match ast.get(id) {
            Node::Stmt(s) => match s.kind {
                StmtKind::Case { kind, value, body } => (kind, value, body),
                _ => return,
            },
            _ => return,
        };
        let label = match kind {
            CaseKind::Label => "CaseStatement",
            CaseKind::Default => "DefaultStatement",
        };
        self.emit(label);
        self.depth += 1;
        if let Some(v) = value {
            self.labeled_child(ast, "Value", v);
        }
        self.labeled_child(ast, "Body", body);
        self.depth -= 1;
    }

    fn visit_labeled_stmt(&mut self, ast: &Ast, id: NodeId) {
        let (label, body) = match ast.get(id) {
            Node::Stmt(s) => match &s.kind {
                StmtKind::Labeled { label, body } => (label.clone(), *body),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": '{label}'"));
        self.child(ast, body);
    }

    fn visit_goto_stmt(&mut self, ast: &Ast, id: NodeId) {
        let label = match ast.get(id) {
            Node::Stmt(s) => match &s.kind {
                StmtKind::Goto { label } => label.clone(),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": '{label}'"));
    }

    fn visit_variable_decl(&mut self, ast: &Ast, id: NodeId) {
        let (name, storage_class, qualifiers, var_type, initializer) = match ast.get(id) {
            Node::Decl(d) => match d.kind {
                DeclKind::Variable { var_type, initializer } => {
                    (d.name.clone().unwrap_or_default(), d.storage_class, d.qualifiers, var_type, initializer)
                }
                _ => return,
            },
            _ => return,
        };
        let mut annotation = format!(": '{name}'{}", storage_class_suffix(storage_class));
        if qualifiers.is_const {
            annotation.push_str(" [const]");
        }
        if qualifiers.is_volatile {
            annotation.push_str(" [volatile]");
        }
        self.emit_node_line(ast, id, &annotation);
        self.labeled_child(ast, "Type", var_type);
        if let Some(init) = initializer {
            self.labeled_child(ast, "Initializer", init);
        }
    }

    fn visit_function_decl(&mut self, ast: &Ast, id: NodeId) {
        let (name, storage_class, qualifiers, return_type, parameters, body) = match ast.get(id) {
            Node::Decl(d) => match &d.kind {
                DeclKind::Function { return_type, parameters, body } => {
                    (d.name.clone().unwrap_or_default(), d.storage_class, d.qualifiers, *return_type, parameters.clone(), *body)
                }
                _ => return,
            },
            _ => return,
        };
        let mut annotation = format!(": '{name}'{}", storage_class_suffix(storage_class));
        if qualifiers.is_inline {
            annotation.push_str(" [inline]");
        }
        if qualifiers.is_noreturn {
            annotation.push_str(" [noreturn]");
        }
        self.emit_node_line(ast, id, &annotation);
        self.labeled_child(ast, "ReturnType", return_type);
        if !parameters.is_empty() {
            self.labeled_sequence(ast, "Parameters", &parameters);
        }
        if let Some(b) = body {
            self.labeled_child(ast, "Body", b);
        }
    }

    fn visit_struct_decl(&mut self, ast: &Ast, id: NodeId) {
        self.aggregate_decl(ast, id, "Members");
    }

    fn visit_union_decl(&mut self, ast: &Ast, id: NodeId) {
        self.aggregate_decl(ast, id, "Members");
    }

    fn visit_enum_decl(&mut self, ast: &Ast, id: NodeId) {
        let (name, constants) = match ast.get(id) {
            Node::Decl(d) => match &d.kind {
                DeclKind::Enum { constants } => (d.name.clone(), constants.clone()),
                _ => return,
            },
            _ => return,
        };
        let label = name.map(|n| format!(": '{n}'")).unwrap_or_else(|| ": <anonymous>".to_string());
        self.emit_node_line(ast, id, &label);
        self.emit(&format!("Constants ({}):", constants.len()));
        self.depth += 1;
        for constant in &constants {
            self.emit(&format!("'{}'", constant.name));
            if let Some(value) = constant.value {
                self.depth += 1;
                accept(self, ast, value);
                self.depth -= 1;
            }
        }
        self.depth -= 1;
    }

    fn visit_typedef_decl(&mut self, ast: &Ast, id: NodeId) {
        let (name, underlying_type) = match ast.get(id) {
            Node::Decl(d) => match d.kind {
                DeclKind::Typedef { underlying_type } => (d.name.clone().unwrap_or_default(), underlying_type),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": '{name}'"));
        self.child(ast, underlying_type);
    }

    fn visit_basic_type(&mut self, ast: &Ast, id: NodeId) {
        let (base, is_long, is_short, is_signed, is_unsigned) = match ast.get(id) {
            Node::TypeSpec(t) => match t.kind {
                TypeSpecKind::Basic { base, is_long, is_short, is_signed, is_unsigned } => {
                    (base, is_long, is_short, is_signed, is_unsigned)
                }
                _ => return,
            },
            _ => return,
        };
        let mut spelling = String::new();
        if is_signed {
            spelling.push_str("signed ");
        }
        if is_unsigned {
            spelling.push_str("unsigned ");
        }
        if is_short {
            spelling.push_str("short ");
        }
        if is_long {
            spelling.push_str("long ");
        }
        spelling.push_str(basic_type_spelling(base));
        self.emit_node_line(ast, id, &format!(": {spelling}"));
    }

    fn visit_pointer_type(&mut self, ast: &Ast, id: NodeId) {
        let pointee = match ast.get(id) {
            Node::TypeSpec(t) => match t.kind {
                TypeSpecKind::Pointer { pointee } => pointee,
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, "");
        self.child(ast, pointee);
    }

    fn visit_array_type(&mut self, ast: &Ast, id: NodeId) {
        let (element, size, is_vla) = match ast.get(id) {
            Node::TypeSpec(t) => match t.kind {
                TypeSpecKind::Array { element, size, is_vla } => (element, size, is_vla),
                _ => return,
            },
            _ => return,
        };
        let suffix = if is_vla { " [VLA]" } else { "" };
        self.emit_node_line(ast, id, suffix);
        self.labeled_child(ast, "Element", element);
        if let Some(s) = size {
            self.labeled_child(ast, "Size", s);
        }
    }

    fn visit_function_type(&mut self, ast: &Ast, id: NodeId) {
        let (return_type, params, variadic) = match ast.get(id) {
            Node::TypeSpec(t) => match &t.kind {
                TypeSpecKind::Function { return_type, params, variadic } => (*return_type, params.clone(), *variadic),
                _ => return,
            },
            _ => return,
        };
        let suffix = if variadic { " [variadic]" } else { "" };
        self.emit_node_line(ast, id, suffix);
        self.labeled_child(ast, "ReturnType", return_type);
        if !params.is_empty() {
            self.labeled_sequence(ast, "Parameters", &params);
        }
    }

    fn visit_struct_ref_type(&mut self, ast: &Ast, id: NodeId) {
        self.ref_type(ast, id);
    }

    fn visit_union_ref_type(&mut self, ast: &Ast, id: NodeId) {
        self.ref_type(ast, id);
    }

    fn visit_enum_ref_type(&mut self, ast: &Ast, id: NodeId) {
        self.ref_type(ast, id);
    }

    fn visit_typedef_name_type(&mut self, ast: &Ast, id: NodeId) {
        let name = match ast.get(id) {
            Node::TypeSpec(t) => match &t.kind {
                TypeSpecKind::TypedefNameRef { name } => name.clone(),
                _ => return,
            },
            _ => return,
        };
        self.emit_node_line(ast, id, &format!(": '{name}'"));
    }
}

fn storage_class_suffix(storage_class: StorageClass) -> &'static str {
    match storage_class {
        StorageClass::Static => " [static]",
        StorageClass::Extern => " [extern]",
        StorageClass::Register => " [register]",
        StorageClass::ThreadLocal => " [thread_local]",
        StorageClass::Auto | StorageClass::None => "",
    }
}

impl AstDumper {
    fn aggregate_decl(&mut self, ast: &Ast, id: NodeId, members_label: &str) {
        let (name, members) = match ast.get(id) {
            Node::Decl(d) => match &d.kind {
                DeclKind::Struct { members } | DeclKind::Union { members } => (d.name.clone(), members.clone()),
                _ => return,
            },
            _ => return,
        };
        let label = name.map(|n| format!(": '{n}'")).unwrap_or_else(|| ": <anonymous>".to_string());
        self.emit_node_line(ast, id, &label);
        self.labeled_sequence(ast, members_label, &members);
    }

    fn ref_type(&mut self, ast: &Ast, id: NodeId) {
        let (name, definition) = match ast.get(id) {
            Node::TypeSpec(t) => match &t.kind {
                TypeSpecKind::StructRef { name, definition }
                | TypeSpecKind::UnionRef { name, definition }
                | TypeSpecKind::EnumRef { name, definition } => (name.clone(), *definition),
                _ => return,
            },
            _ => return,
        };
        let mut annotation = name.map(|n| format!(": '{n}'")).unwrap_or_else(|| ": <anonymous>".to_string());
        if definition.is_none() {
            annotation.push_str(" [forward]");
        }
        self.emit_node_line(ast, id, &annotation);
    }
}

#[cfg(test)]
#[path = "dumper_tests.rs"]
mod dumper_tests;
