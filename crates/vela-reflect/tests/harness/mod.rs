//! Shared AST builders for transformer tests
//!
//! The host parser is out of scope here, so test programs are built
//! directly as AST nodes.

#![allow(dead_code)]

use vela_ast::*;
use vela_checker::Program;
use vela_reflect::TypeOp;

pub fn id(name: &str) -> Identifier {
    Identifier::new(name)
}

pub fn ty(t: Type) -> TypeAnnotation {
    TypeAnnotation::synthesized(t)
}

pub fn string_ty() -> TypeAnnotation {
    ty(Type::Primitive(PrimitiveType::String))
}

pub fn number_ty() -> TypeAnnotation {
    ty(Type::Primitive(PrimitiveType::Number))
}

pub fn boolean_ty() -> TypeAnnotation {
    ty(Type::Primitive(PrimitiveType::Boolean))
}

pub fn null_ty() -> TypeAnnotation {
    ty(Type::Primitive(PrimitiveType::Null))
}

pub fn void_ty() -> TypeAnnotation {
    ty(Type::Primitive(PrimitiveType::Void))
}

pub fn reference(name: &str) -> TypeAnnotation {
    ty(Type::Reference(TypeReference::simple(id(name))))
}

pub fn generic(name: &str, args: Vec<TypeAnnotation>) -> TypeAnnotation {
    ty(Type::Reference(TypeReference::generic(id(name), args)))
}

pub fn union(types: Vec<TypeAnnotation>) -> TypeAnnotation {
    ty(Type::Union(UnionType::new(types)))
}

pub fn array_of(element: TypeAnnotation) -> TypeAnnotation {
    ty(Type::Array(ArrayType::new(element)))
}

pub fn string_literal_ty(value: &str) -> TypeAnnotation {
    ty(Type::StringLiteral(value.to_string()))
}

pub fn object_ty(members: Vec<ObjectTypeMember>) -> TypeAnnotation {
    ty(Type::Object(ObjectType::new(members)))
}

pub fn mapped_ty() -> TypeAnnotation {
    ty(Type::Mapped(MappedType {
        key_name: id("K"),
        constraint: Box::new(reference("T")),
        value_type: Box::new(reference("T")),
        span: Span::synthesized(),
    }))
}

pub fn prop_sig(name: &str, t: TypeAnnotation) -> ObjectTypeMember {
    ObjectTypeMember::Property(PropertySignature {
        name: id(name),
        type_annotation: Some(t),
        optional: false,
        span: Span::synthesized(),
    })
}

pub fn opt_prop_sig(name: &str, t: TypeAnnotation) -> ObjectTypeMember {
    ObjectTypeMember::Property(PropertySignature {
        name: id(name),
        type_annotation: Some(t),
        optional: true,
        span: Span::synthesized(),
    })
}

pub fn method_sig(name: &str, params: Vec<FunctionTypeParam>, ret: TypeAnnotation) -> ObjectTypeMember {
    ObjectTypeMember::Method(MethodSignature {
        name: id(name),
        params,
        return_type: Some(ret),
        optional: false,
        span: Span::synthesized(),
    })
}

pub fn index_sig(key: TypeAnnotation, value: TypeAnnotation) -> ObjectTypeMember {
    ObjectTypeMember::Index(IndexSignature {
        key_type: Some(key),
        value_type: value,
        span: Span::synthesized(),
    })
}

pub fn param(name: &str, t: TypeAnnotation) -> Parameter {
    Parameter::typed(id(name), t)
}

pub fn property(name: &str, t: TypeAnnotation) -> ClassMember {
    ClassMember::Property(PropertyDecl {
        doc: None,
        visibility: Visibility::Public,
        name: id(name),
        type_annotation: Some(t),
        initializer: None,
        optional: false,
        is_static: false,
        is_abstract: false,
        span: Span::synthesized(),
    })
}

pub fn method(name: &str, params: Vec<Parameter>, ret: Option<TypeAnnotation>) -> ClassMember {
    ClassMember::Method(MethodDecl {
        doc: None,
        visibility: Visibility::Public,
        is_abstract: false,
        name: id(name),
        type_params: None,
        params,
        return_type: ret,
        body: Some(BlockStatement::empty()),
        is_static: false,
        is_async: false,
        span: Span::synthesized(),
    })
}

pub fn constructor(params: Vec<Parameter>) -> ClassMember {
    ClassMember::Constructor(ConstructorDecl {
        doc: None,
        params,
        body: BlockStatement::empty(),
        span: Span::synthesized(),
    })
}

pub fn class_decl(name: &str, members: Vec<ClassMember>) -> ClassDecl {
    ClassDecl {
        doc: None,
        is_abstract: false,
        name: id(name),
        type_params: None,
        extends: None,
        members,
        span: Span::synthesized(),
    }
}

pub fn class_stmt(name: &str, members: Vec<ClassMember>) -> Statement {
    Statement::ClassDecl(class_decl(name, members))
}

pub fn tagged_class_stmt(name: &str, members: Vec<ClassMember>, doc: &str) -> Statement {
    let mut decl = class_decl(name, members);
    decl.doc = Some(DocComment::new(doc));
    Statement::ClassDecl(decl)
}

pub fn interface_stmt(
    name: &str,
    extends: Vec<&str>,
    members: Vec<ObjectTypeMember>,
) -> Statement {
    Statement::InterfaceDecl(InterfaceDecl {
        doc: None,
        name: id(name),
        type_params: None,
        extends: extends
            .into_iter()
            .map(|parent| TypeReference::simple(id(parent)))
            .collect(),
        members,
        span: Span::synthesized(),
    })
}

pub fn type_alias_stmt(name: &str, t: TypeAnnotation) -> Statement {
    Statement::TypeAliasDecl(TypeAliasDecl {
        doc: None,
        name: id(name),
        type_params: None,
        type_annotation: t,
        span: Span::synthesized(),
    })
}

pub fn enum_stmt(name: &str, is_const: bool) -> Statement {
    Statement::EnumDecl(EnumDecl {
        doc: None,
        is_const,
        name: id(name),
        members: vec![
            EnumMember {
                name: id("Active"),
                initializer: None,
                span: Span::synthesized(),
            },
            EnumMember {
                name: id("Disabled"),
                initializer: None,
                span: Span::synthesized(),
            },
        ],
        span: Span::synthesized(),
    })
}

pub fn function_stmt(
    name: &str,
    params: Vec<Parameter>,
    ret: Option<TypeAnnotation>,
) -> Statement {
    Statement::FunctionDecl(FunctionDecl {
        doc: None,
        name: id(name),
        type_params: None,
        params,
        return_type: ret,
        body: BlockStatement::empty(),
        is_async: false,
        span: Span::synthesized(),
    })
}

pub fn const_stmt(name: &str, init: Expression) -> Statement {
    Statement::VariableDecl(VariableDecl {
        doc: None,
        kind: VariableKind::Const,
        name: id(name),
        type_annotation: None,
        initializer: Some(init),
        span: Span::synthesized(),
    })
}

pub fn arrow(params: Vec<Parameter>, ret: Option<TypeAnnotation>) -> Expression {
    Expression::Arrow(ArrowFunction {
        params,
        return_type: ret,
        body: ArrowBody::Expression(Box::new(factory::ident("n"))),
        is_async: false,
        span: Span::synthesized(),
    })
}

pub fn import_stmt(names: &[&str], source: &str) -> Statement {
    Statement::ImportDecl(ImportDecl {
        specifiers: names
            .iter()
            .map(|name| ImportSpecifier::Named(NamedImport::plain(id(name))))
            .collect(),
        source: source.to_string(),
        span: Span::synthesized(),
    })
}

pub fn import_default(name: &str, source: &str) -> Statement {
    Statement::ImportDecl(ImportDecl {
        specifiers: vec![ImportSpecifier::Default(ImportBinding::plain(id(name)))],
        source: source.to_string(),
        span: Span::synthesized(),
    })
}

pub fn export(stmt: Statement) -> Statement {
    Statement::ExportDecl(ExportDecl::Declaration(Box::new(stmt)))
}

pub fn export_default(stmt: Statement) -> Statement {
    Statement::ExportDecl(ExportDecl::Default(Box::new(stmt)))
}

pub fn reexport_named(pairs: &[(&str, Option<&str>)], source: &str) -> Statement {
    Statement::ExportDecl(ExportDecl::Named {
        specifiers: pairs
            .iter()
            .map(|(name, alias)| ExportSpecifier {
                name: id(name),
                alias: alias.map(id),
            })
            .collect(),
        source: Some(source.to_string()),
        span: Span::synthesized(),
    })
}

pub fn export_all(source: &str) -> Statement {
    Statement::ExportDecl(ExportDecl::All {
        source: source.to_string(),
        span: Span::synthesized(),
    })
}

/// Opcode stream from parameterless opcodes
pub fn op_bytes(ops: &[TypeOp]) -> Vec<u8> {
    ops.iter().map(|op| op.to_u8()).collect()
}

pub fn single_file_program(path: &str, statements: Vec<Statement>) -> Program {
    let mut program = Program::new();
    program.add_file(path, Module::new(statements));
    program
}
