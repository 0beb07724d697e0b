//! Plain-text type signatures for markdown pages

use crate::reflection::{Kind, ReflectionNode, Type};

/// Render a type the way it reads in a TypeScript declaration.
///
/// Unions join with `|`, generic arguments render as `<A, B>` and inline
/// function literals as `(a: A, b: B) => R`. A missing type is empty.
pub fn type_string(ty: Option<&Type>) -> String {
    let Some(ty) = ty else {
        return String::new();
    };

    match ty {
        Type::Union { types } => types
            .iter()
            .map(|t| type_string(Some(t)))
            .collect::<Vec<_>>()
            .join("|"),
        Type::Reflection { declaration } => reflection_string(declaration),
        Type::Intrinsic {
            name,
            type_arguments: Some(arguments),
        }
        | Type::Reference {
            name,
            type_arguments: Some(arguments),
        } => {
            let arguments: Vec<String> = arguments.iter().map(|a| type_string(Some(a))).collect();
            format!("{}<{}>", name, arguments.join(", "))
        }
        Type::Intrinsic { name, .. } | Type::Reference { name, .. } => name.clone(),
        Type::Other { name, .. } => name.clone().unwrap_or_default(),
    }
}

fn reflection_string(declaration: &ReflectionNode) -> String {
    if declaration.kind != Kind::TypeLiteral {
        return String::new();
    }

    declaration
        .signatures
        .iter()
        .filter(|s| s.kind == Kind::CallSignature)
        .map(|s| {
            format!(
                "({}) => {}",
                parameter_list(&s.parameters).join(", "),
                type_string(s.type_.as_ref())
            )
        })
        .collect()
}

/// `name: type` for each parameter
pub fn parameter_list(parameters: &[ReflectionNode]) -> Vec<String> {
    parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, type_string(p.type_.as_ref())))
        .collect()
}
