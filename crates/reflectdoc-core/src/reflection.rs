//! Reflection tree model
//!
//! Typed view of the JSON emitted by the external type-reflection tool. Only
//! the fields the generators read are modelled; everything else in the input
//! is ignored during deserialization. Unknown `kindString` and `type` tags are
//! preserved rather than rejected so that the generators can skip them.

use crate::error::{Error, Result};
use crate::report::TestResults;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Comment tag that removes a node (and anything reached only through it)
/// from every generated document.
pub const IGNORE_TAG: &str = "ignore";

/// Discriminator identifying what a reflection node represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Kind {
    Module,
    Class,
    Interface,
    Method,
    Property,
    Constructor,
    CallSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    /// Any kind the generators do not document (including a missing kind)
    Other(String),
}

impl Kind {
    /// The `kindString` spelling used by the reflection tool
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Module => "Module",
            Kind::Class => "Class",
            Kind::Interface => "Interface",
            Kind::Method => "Method",
            Kind::Property => "Property",
            Kind::Constructor => "Constructor",
            Kind::CallSignature => "Call signature",
            Kind::ConstructorSignature => "Constructor signature",
            Kind::Parameter => "Parameter",
            Kind::TypeLiteral => "Type literal",
            Kind::Other(raw) => raw,
        }
    }
}

impl From<String> for Kind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Module" => Kind::Module,
            "Class" => Kind::Class,
            "Interface" => Kind::Interface,
            "Method" => Kind::Method,
            "Property" => Kind::Property,
            "Constructor" => Kind::Constructor,
            "Call signature" => Kind::CallSignature,
            "Constructor signature" => Kind::ConstructorSignature,
            "Parameter" => Kind::Parameter,
            "Type literal" => Kind::TypeLiteral,
            _ => Kind::Other(raw),
        }
    }
}

impl From<&str> for Kind {
    fn from(raw: &str) -> Self {
        Kind::from(raw.to_string())
    }
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Other(String::new())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean attributes of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_optional: bool,
}

/// Structured doc comment attached to a node
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub short_text: Option<String>,
    pub text: Option<String>,
    pub returns: Option<String>,
    #[serde(default)]
    pub tags: Vec<CommentTag>,
}

/// A single `@tag` of a doc comment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentTag {
    pub tag: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// A node in the reflection tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReflectionNode {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "kindString", default)]
    pub kind: Kind,
    #[serde(default)]
    pub children: Vec<ReflectionNode>,
    #[serde(default)]
    pub signatures: Vec<ReflectionNode>,
    #[serde(default)]
    pub parameters: Vec<ReflectionNode>,
    #[serde(rename = "type", default)]
    pub type_: Option<Type>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub comment: Option<Comment>,
    /// Attached by the test-report merge, never read from the input
    #[serde(skip)]
    pub results: Option<TestResults>,
}

impl ReflectionNode {
    /// Create a bare node of the given kind
    pub fn new(kind: impl Into<Kind>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the node carries an exact `ignore` comment tag
    pub fn is_ignored(&self) -> bool {
        self.has_tag(IGNORE_TAG)
    }

    /// Whether the node's comment carries a tag with exactly this name
    pub fn has_tag(&self, tag: &str) -> bool {
        self.comment
            .as_ref()
            .map(|c| c.tags.iter().any(|t| t.tag == tag))
            .unwrap_or(false)
    }

    /// Interfaces whose name ends in `Event` are documented as events
    pub fn is_event_interface(&self) -> bool {
        self.kind == Kind::Interface && self.name.ends_with("Event")
    }

    /// Short text of the comment, if any
    pub fn short_text(&self) -> Option<&str> {
        self.comment.as_ref().and_then(|c| c.short_text.as_deref())
    }

    /// First node in document order, among the `children` at any depth,
    /// that satisfies the predicate
    pub fn find_deep<F>(&self, predicate: F) -> Option<&ReflectionNode>
    where
        F: Fn(&ReflectionNode) -> bool + Copy,
    {
        for child in &self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_deep(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`find_deep`](Self::find_deep)
    pub fn find_deep_mut<F>(&mut self, predicate: F) -> Option<&mut ReflectionNode>
    where
        F: Fn(&ReflectionNode) -> bool + Copy,
    {
        for child in &mut self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_deep_mut(predicate) {
                return Some(found);
            }
        }
        None
    }
}

/// Wire shape of a type before it is narrowed to [`Type`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    #[serde(rename = "type", default)]
    tag: String,
    name: Option<String>,
    type_arguments: Option<Vec<Type>>,
    #[serde(default)]
    types: Vec<Type>,
    declaration: Option<Box<ReflectionNode>>,
}

/// A type expression attached to a property, parameter or signature
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawType")]
pub enum Type {
    Intrinsic {
        name: String,
        type_arguments: Option<Vec<Type>>,
    },
    Reference {
        name: String,
        type_arguments: Option<Vec<Type>>,
    },
    Union {
        types: Vec<Type>,
    },
    /// Inline declaration such as a function type literal
    Reflection {
        declaration: Box<ReflectionNode>,
    },
    Other {
        tag: String,
        name: Option<String>,
    },
}

impl From<RawType> for Type {
    fn from(raw: RawType) -> Self {
        let RawType {
            tag,
            name,
            type_arguments,
            types,
            declaration,
        } = raw;
        match (tag.as_str(), declaration) {
            ("intrinsic", _) => Type::Intrinsic {
                name: name.unwrap_or_default(),
                type_arguments,
            },
            ("reference", _) => Type::Reference {
                name: name.unwrap_or_default(),
                type_arguments,
            },
            ("union", _) => Type::Union { types },
            ("reflection", Some(declaration)) => Type::Reflection { declaration },
            _ => Type::Other {
                tag: tag.clone(),
                name,
            },
        }
    }
}

impl Type {
    /// Shorthand for an intrinsic type
    pub fn intrinsic(name: impl Into<String>) -> Self {
        Type::Intrinsic {
            name: name.into(),
            type_arguments: None,
        }
    }

    /// Shorthand for a reference type, with optional generic arguments
    pub fn reference(name: impl Into<String>, type_arguments: Option<Vec<Type>>) -> Self {
        Type::Reference {
            name: name.into(),
            type_arguments,
        }
    }

    /// Bare name of the type, when it has one
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Intrinsic { name, .. } | Type::Reference { name, .. } => Some(name),
            Type::Other { name, .. } => name.as_deref(),
            Type::Union { .. } | Type::Reflection { .. } => None,
        }
    }

    /// Generic arguments of an intrinsic or reference type
    pub fn type_arguments(&self) -> Option<&[Type]> {
        match self {
            Type::Intrinsic { type_arguments, .. } | Type::Reference { type_arguments, .. } => {
                type_arguments.as_deref()
            }
            _ => None,
        }
    }
}

/// Parse a reflection tree from a JSON string
pub fn parse_reflection(json: &str) -> Result<ReflectionNode> {
    Ok(serde_json::from_str(json)?)
}

/// Load the primary reflection input; any failure here is fatal to the run
pub fn load_reflection(path: &Path) -> Result<ReflectionNode> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
    let tree = serde_json::from_str(&content).map_err(|e| Error::input(path, e))?;
    tracing::debug!(path = %path.display(), "Loaded reflection tree");
    Ok(tree)
}
