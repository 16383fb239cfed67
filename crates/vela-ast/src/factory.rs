//! Factory for synthesized AST nodes
//!
//! Compile-time transforms build output fragments through these helpers so
//! every synthesized node carries the synthesized span and a uniform shape.
//! The surface mirrors what transforms actually emit: literals, identifiers,
//! member access, object/array literals, assignment statements, arrow
//! thunks, static properties and `Object.assign` calls.

use super::*;

/// String literal expression
pub fn string_literal(value: impl Into<String>) -> Expression {
    Expression::StringLiteral(StringLiteral {
        value: value.into(),
        span: Span::synthesized(),
    })
}

/// Number literal expression
pub fn number_literal(value: f64) -> Expression {
    Expression::NumberLiteral(NumberLiteral {
        value,
        span: Span::synthesized(),
    })
}

/// Boolean literal expression
pub fn boolean_literal(value: bool) -> Expression {
    Expression::BooleanLiteral(BooleanLiteral {
        value,
        span: Span::synthesized(),
    })
}

/// Identifier expression
pub fn ident(name: impl Into<String>) -> Expression {
    Expression::Identifier(Identifier::new(name))
}

/// Member access: `object.property`
pub fn member(object: Expression, property: impl Into<String>) -> Expression {
    Expression::Member(MemberExpression {
        object: Box::new(object),
        property: Identifier::new(property),
        span: Span::synthesized(),
    })
}

/// Call: `callee(arguments...)`
pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        callee: Box::new(callee),
        arguments,
        span: Span::synthesized(),
    })
}

/// Array literal: `[elements...]`
pub fn array_literal(elements: Vec<Expression>) -> Expression {
    Expression::Array(ArrayExpression {
        elements,
        span: Span::synthesized(),
    })
}

/// Object literal from key/value pairs. Keys that are not valid bare
/// identifiers are emitted quoted.
pub fn object_literal(properties: Vec<(String, Expression)>) -> Expression {
    let properties = properties
        .into_iter()
        .map(|(key, value)| {
            let key = if is_identifier_name(&key) {
                PropertyKey::Identifier(Identifier::new(key))
            } else {
                PropertyKey::String(StringLiteral {
                    value: key,
                    span: Span::synthesized(),
                })
            };
            ObjectProperty {
                key,
                value,
                span: Span::synthesized(),
            }
        })
        .collect();
    Expression::Object(ObjectExpression {
        properties,
        span: Span::synthesized(),
    })
}

/// Assignment statement: `target = value;`
pub fn assign_statement(target: Expression, value: Expression) -> Statement {
    Statement::Expression(ExpressionStatement {
        expression: Expression::Assignment(AssignmentExpression {
            target: Box::new(target),
            value: Box::new(value),
            span: Span::synthesized(),
        }),
        span: Span::synthesized(),
    })
}

/// Zero-parameter arrow returning `body`: `() => body`
pub fn arrow_thunk(body: Expression) -> Expression {
    Expression::Arrow(ArrowFunction {
        params: Vec::new(),
        return_type: None,
        body: ArrowBody::Expression(Box::new(body)),
        is_async: false,
        span: Span::synthesized(),
    })
}

/// `Object.assign(target, source)`
pub fn object_assign(target: Expression, source: Expression) -> Expression {
    call(member(ident("Object"), "assign"), vec![target, source])
}

/// Static class property with an initializer
pub fn static_property(name: impl Into<String>, initializer: Expression) -> ClassMember {
    ClassMember::Property(PropertyDecl {
        doc: None,
        visibility: Visibility::Public,
        name: Identifier::new(name),
        type_annotation: None,
        initializer: Some(initializer),
        optional: false,
        is_static: true,
        is_abstract: false,
        span: Span::synthesized(),
    })
}

fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_literal_quotes_non_identifier_keys() {
        let obj = object_literal(vec![
            ("title".to_string(), number_literal(1.0)),
            ("not a name".to_string(), number_literal(2.0)),
        ]);
        let Expression::Object(obj) = obj else {
            panic!("expected object literal");
        };
        assert!(matches!(obj.properties[0].key, PropertyKey::Identifier(_)));
        assert!(matches!(obj.properties[1].key, PropertyKey::String(_)));
    }

    #[test]
    fn arrow_thunk_is_nullary() {
        let Expression::Arrow(arrow) = arrow_thunk(ident("Model")) else {
            panic!("expected arrow");
        };
        assert!(arrow.params.is_empty());
        assert!(matches!(arrow.body, ArrowBody::Expression(_)));
    }

    #[test]
    fn object_assign_shape() {
        let expr = object_assign(ident("g"), object_literal(vec![]));
        let Expression::Call(call) = expr else {
            panic!("expected call");
        };
        let Expression::Member(m) = call.callee.as_ref() else {
            panic!("expected member callee");
        };
        assert_eq!(m.property.name, "assign");
        assert_eq!(call.arguments.len(), 2);
    }
}
