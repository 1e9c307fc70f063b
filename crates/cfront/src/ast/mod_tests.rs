use super::*;
use crate::location::SourceLocation;

#[test]
fn fresh_ast_has_only_the_root() {
    let ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    assert_eq!(ast.len(), 1);
    assert_eq!(ast.root(), NodeId::ROOT);
    assert!(ast.translation_unit().declarations.is_empty());
}

#[test]
fn alloc_returns_increasing_ids_and_attach_sets_parent() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let decl = ast.alloc(Node::TypeSpec(TypeSpecNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        kind: TypeSpecKind::Basic {
            base: BasicType::Int,
            is_long: false,
            is_short: false,
            is_signed: false,
            is_unsigned: false,
        },
    }));
    assert_ne!(decl, ast.root());
    assert_eq!(ast.len(), 2);
    ast.push_top_level_declaration(decl);
    assert_eq!(ast.get(decl).parent(), Some(ast.root()));
    assert_eq!(ast.translation_unit().declarations, vec![decl]);
}

#[test]
fn family_and_type_name_match_variant() {
    let mut ast = Ast::new(SourceLocation::unknown(1, 1, 0));
    let int_ty = ast.alloc(Node::TypeSpec(TypeSpecNode {
        header: NodeHeader::new(SourceLocation::unknown(1, 1, 0)),
        kind: TypeSpecKind::Basic {
            base: BasicType::Int,
            is_long: false,
            is_short: false,
            is_signed: false,
            is_unsigned: false,
        },
    }));
    let node = ast.get(int_ty);
    assert_eq!(node.family(), Family::TypeSpec);
    assert!(node.is_type_specifier());
    assert!(!node.is_expression());
    assert_eq!(node.type_name(), "BasicTypeSpecifier");
}
