//! Installing packed metadata into the emitted program
//!
//! Three installation shapes, one per declaration form:
//! - classes gain a static `__type` member holding an object literal keyed
//!   by member name (or `"constructor"`)
//! - named function declarations are followed by `name.__type = <packed>;`
//! - anonymous callables are wrapped in `Object.assign(expr, { __type })`,
//!   which preserves the value while attaching the metadata
//!
//! A packed value renders as a string literal, or an array literal whose
//! last element is the string when a literal stack is present; lazy
//! references land in the array as their synthesized closures verbatim.

use vela_ast::{factory, ClassDecl, Expression, Statement};

use crate::pack::{Packed, StackEntry};

/// Name of the static member and assignment target carrying the metadata
pub const TYPE_MEMBER: &str = "__type";

/// Render a packed value as an emitted expression
pub fn packed_expression(packed: Packed) -> Expression {
    match packed {
        Packed::Text(text) => factory::string_literal(text),
        Packed::WithStack(stack, text) => {
            let mut elements: Vec<Expression> =
                stack.into_iter().map(entry_expression).collect();
            elements.push(factory::string_literal(text));
            factory::array_literal(elements)
        }
    }
}

fn entry_expression(entry: StackEntry) -> Expression {
    match entry {
        StackEntry::String(value) => factory::string_literal(value),
        StackEntry::Number(value) => factory::number_literal(value),
        StackEntry::Boolean(value) => factory::boolean_literal(value),
        StackEntry::LazyRef(expr) => expr,
    }
}

/// Install per-member packs on a class as a static `__type` object literal.
///
/// A class with no packed members is left unchanged, as is a class that
/// already carries the member (idempotent re-decoration).
pub fn decorate_class(class: &mut ClassDecl, packs: Vec<(String, Packed)>) {
    if packs.is_empty() {
        return;
    }
    if class.static_property(TYPE_MEMBER).is_some() {
        return;
    }
    let properties = packs
        .into_iter()
        .map(|(name, packed)| (name, packed_expression(packed)))
        .collect();
    class
        .members
        .push(factory::static_property(TYPE_MEMBER, factory::object_literal(properties)));
}

/// Post-declaration assignment for a named function: `name.__type = <packed>;`
pub fn function_type_assignment(name: &str, packed: Packed) -> Statement {
    factory::assign_statement(
        factory::member(factory::ident(name), TYPE_MEMBER),
        packed_expression(packed),
    )
}

/// Wrap an anonymous callable: `Object.assign(expr, { __type: <packed> })`
pub fn wrap_callable(expr: Expression, packed: Packed) -> Expression {
    factory::object_assign(
        expr,
        factory::object_literal(vec![(TYPE_MEMBER.to_string(), packed_expression(packed))]),
    )
}
