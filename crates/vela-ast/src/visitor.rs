//! AST visitor pattern for traversing the syntax tree
//!
//! Read-only traversal over modules, declarations and expressions. Each
//! visit method has a default implementation that calls the corresponding
//! walk function, so implementors override only the nodes they care about.
//!
//! # Example
//!
//! ```rust
//! use vela_ast::*;
//! use vela_ast::visitor::Visitor;
//!
//! struct CountClasses {
//!     count: usize,
//! }
//!
//! impl Visitor for CountClasses {
//!     fn visit_class_decl(&mut self, decl: &ClassDecl) {
//!         self.count += 1;
//!         visitor::walk_class_decl(self, decl);
//!     }
//! }
//! ```

use super::*;

/// AST visitor trait
pub trait Visitor: Sized {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        walk_variable_decl(self, decl);
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) {
        walk_function_decl(self, decl);
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        walk_class_decl(self, decl);
    }

    fn visit_interface_decl(&mut self, _decl: &InterfaceDecl) {}

    fn visit_type_alias_decl(&mut self, _decl: &TypeAliasDecl) {}

    fn visit_enum_decl(&mut self, _decl: &EnumDecl) {}

    fn visit_import_decl(&mut self, _decl: &ImportDecl) {}

    fn visit_export_decl(&mut self, decl: &ExportDecl) {
        walk_export_decl(self, decl);
    }

    fn visit_block_statement(&mut self, block: &BlockStatement) {
        walk_block_statement(self, block);
    }

    fn visit_property_decl(&mut self, _decl: &PropertyDecl) {}

    fn visit_method_decl(&mut self, decl: &MethodDecl) {
        walk_method_decl(self, decl);
    }

    fn visit_constructor_decl(&mut self, decl: &ConstructorDecl) {
        walk_constructor_decl(self, decl);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_arrow_function(&mut self, func: &ArrowFunction) {
        walk_arrow_function(self, func);
    }

    fn visit_function_expression(&mut self, func: &FunctionExpression) {
        walk_function_expression(self, func);
    }

    fn visit_identifier(&mut self, _id: &Identifier) {}
}

/// Walk all top-level statements of a module
pub fn walk_module<V: Visitor>(visitor: &mut V, module: &Module) {
    for stmt in &module.statements {
        visitor.visit_statement(stmt);
    }
}

/// Dispatch a statement to the matching visit method
pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::VariableDecl(decl) => visitor.visit_variable_decl(decl),
        Statement::FunctionDecl(decl) => visitor.visit_function_decl(decl),
        Statement::ClassDecl(decl) => visitor.visit_class_decl(decl),
        Statement::InterfaceDecl(decl) => visitor.visit_interface_decl(decl),
        Statement::TypeAliasDecl(decl) => visitor.visit_type_alias_decl(decl),
        Statement::EnumDecl(decl) => visitor.visit_enum_decl(decl),
        Statement::ImportDecl(decl) => visitor.visit_import_decl(decl),
        Statement::ExportDecl(decl) => visitor.visit_export_decl(decl),
        Statement::Expression(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::Empty(_) => {}
    }
}

pub fn walk_variable_decl<V: Visitor>(visitor: &mut V, decl: &VariableDecl) {
    if let Some(init) = &decl.initializer {
        visitor.visit_expression(init);
    }
}

pub fn walk_function_decl<V: Visitor>(visitor: &mut V, decl: &FunctionDecl) {
    visitor.visit_block_statement(&decl.body);
}

pub fn walk_class_decl<V: Visitor>(visitor: &mut V, decl: &ClassDecl) {
    for member in &decl.members {
        match member {
            ClassMember::Property(p) => visitor.visit_property_decl(p),
            ClassMember::Method(m) => visitor.visit_method_decl(m),
            ClassMember::Constructor(c) => visitor.visit_constructor_decl(c),
        }
    }
}

pub fn walk_export_decl<V: Visitor>(visitor: &mut V, decl: &ExportDecl) {
    match decl {
        ExportDecl::Declaration(stmt) | ExportDecl::Default(stmt) => {
            visitor.visit_statement(stmt);
        }
        ExportDecl::Named { .. } | ExportDecl::All { .. } => {}
    }
}

pub fn walk_block_statement<V: Visitor>(visitor: &mut V, block: &BlockStatement) {
    for stmt in &block.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_method_decl<V: Visitor>(visitor: &mut V, decl: &MethodDecl) {
    if let Some(body) = &decl.body {
        visitor.visit_block_statement(body);
    }
}

pub fn walk_constructor_decl<V: Visitor>(visitor: &mut V, decl: &ConstructorDecl) {
    visitor.visit_block_statement(&decl.body);
}

/// Dispatch an expression and descend into its children
pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Identifier(id) => visitor.visit_identifier(id),
        Expression::Array(arr) => {
            for elem in &arr.elements {
                visitor.visit_expression(elem);
            }
        }
        Expression::Object(obj) => {
            for prop in &obj.properties {
                visitor.visit_expression(&prop.value);
            }
        }
        Expression::Member(member) => visitor.visit_expression(&member.object),
        Expression::Call(call) => {
            visitor.visit_expression(&call.callee);
            for arg in &call.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Assignment(assign) => {
            visitor.visit_expression(&assign.target);
            visitor.visit_expression(&assign.value);
        }
        Expression::Arrow(func) => visitor.visit_arrow_function(func),
        Expression::FunctionExpr(func) => visitor.visit_function_expression(func),
        Expression::Parenthesized(inner) => visitor.visit_expression(inner),
        Expression::NumberLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_) => {}
    }
}

pub fn walk_arrow_function<V: Visitor>(visitor: &mut V, func: &ArrowFunction) {
    match &func.body {
        ArrowBody::Expression(expr) => visitor.visit_expression(expr),
        ArrowBody::Block(block) => visitor.visit_block_statement(block),
    }
}

pub fn walk_function_expression<V: Visitor>(visitor: &mut V, func: &FunctionExpression) {
    visitor.visit_block_statement(&func.body);
}
