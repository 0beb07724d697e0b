//! Text formatting shared by the API page rules
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use super::api_page::DocumentedType;
use crate::reflection::{Comment, Type};

const PRE_OPEN: &str = "<pre>";
const PRE_CLOSE: &str = "</pre>";

/// Render a type expression as HTML, linking documented type names.
///
/// A missing type renders as the empty string; type tags the page does not
/// understand render as `UNKNOWN`.
pub fn format_type(ty: Option<&Type>, documented: &[DocumentedType]) -> String {
    match ty {
        Some(ty) => format_known_type(ty, documented),
        None => String::new(),
    }
}

fn format_known_type(ty: &Type, documented: &[DocumentedType]) -> String {
    match ty {
        Type::Intrinsic {
            name,
            type_arguments,
        }
        | Type::Reference {
            name,
            type_arguments,
        } => {
            let mut type_name = name.clone();
            if let Some(arguments) = type_arguments {
                let arguments: Vec<String> = arguments
                    .iter()
                    .map(|arg| format_known_type(arg, documented))
                    .collect();
                type_name.push_str("&lt;");
                type_name.push_str(&arguments.join(", "));
                type_name.push_str("&gt;");
            }

            match documented.iter().find(|t| &t.name == name) {
                Some(target) => format!("<a href=\"#{}\">{}</a>", target.link_anchor(), type_name),
                None => type_name,
            }
        }
        Type::Union { types } => types
            .iter()
            .map(|t| format_known_type(t, documented))
            .collect::<Vec<_>>()
            .join(" | "),
        Type::Reflection { declaration } => match declaration.signatures.first() {
            Some(signature) => {
                let parameters: Vec<String> = signature
                    .parameters
                    .iter()
                    .map(|p| format!("{}: {}", p.name, format_type(p.type_.as_ref(), documented)))
                    .collect();
                format!(
                    "({}) => {}",
                    parameters.join(","),
                    format_type(signature.type_.as_ref(), documented)
                )
            }
            None => "UNKNOWN".to_string(),
        },
        Type::Other { .. } => "UNKNOWN".to_string(),
    }
}

/// Split prose into paragraphs joined by `<br/>`, turning `<pre>` blocks
/// into javascript highlight tags
pub fn break_text(text: &str) -> String {
    let mut formatted = String::new();
    let mut rest = text;

    loop {
        let code = rest.find(PRE_OPEN).and_then(|start| {
            let body = start + PRE_OPEN.len();
            rest[body..].find(PRE_CLOSE).map(|end| (start, body, body + end))
        });

        let prose_end = code.map_or(rest.len(), |(start, _, _)| start);
        formatted.push_str(&paragraphs(&rest[..prose_end]));

        match code {
            Some((_, body, end)) => {
                formatted.push_str("{% highlight javascript %}");
                formatted.push_str(&rest[body..end]);
                formatted.push_str("{% endhighlight %}");
                rest = &rest[end + PRE_CLOSE.len()..];
            }
            None => break,
        }
    }

    formatted
}

fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("<br/>")
}

/// Short text and text of a comment, each broken into paragraphs, joined by
/// `<br />`
pub fn format_comment(comment: Option<&Comment>) -> String {
    let Some(comment) = comment else {
        return String::new();
    };

    [comment.short_text.as_deref(), comment.text.as_deref()]
        .into_iter()
        .flatten()
        .map(break_text)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("<br />")
}
