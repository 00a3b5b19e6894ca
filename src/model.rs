//! Data model for JSDoc doclets: the records the expander reads and writes.
//!
//! Only the fields the expander interprets are typed. Everything else a
//! parser emits (`meta`, `comment`, `params`, `returns`, ...) is carried in
//! the `extra` maps and written back out untouched.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type names that are never looked up in the typedef index.
pub const TERMINAL_TYPES: &[&str] = &["array", "boolean", "function", "object", "string"];

/// The kind of entity a doclet documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Typedef,
    Function,
    Member,
    Class,
    Constant,
    Module,
    Namespace,
    Event,
    External,
    File,
    Interface,
    Mixin,
    Package,
    Param,
    /// Any kind not listed above, kept verbatim.
    Other(String),
    /// The doclet carried no `kind` field.
    #[default]
    Unset,
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Typedef => "typedef",
            Kind::Function => "function",
            Kind::Member => "member",
            Kind::Class => "class",
            Kind::Constant => "constant",
            Kind::Module => "module",
            Kind::Namespace => "namespace",
            Kind::Event => "event",
            Kind::External => "external",
            Kind::File => "file",
            Kind::Interface => "interface",
            Kind::Mixin => "mixin",
            Kind::Package => "package",
            Kind::Param => "param",
            Kind::Other(s) => s,
            Kind::Unset => "",
        }
    }

    fn is_unset(&self) -> bool {
        matches!(self, Kind::Unset)
    }
}

impl From<String> for Kind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "typedef" => Kind::Typedef,
            "function" => Kind::Function,
            "member" => Kind::Member,
            "class" => Kind::Class,
            "constant" => Kind::Constant,
            "module" => Kind::Module,
            "namespace" => Kind::Namespace,
            "event" => Kind::Event,
            "external" => Kind::External,
            "file" => Kind::File,
            "interface" => Kind::Interface,
            "mixin" => Kind::Mixin,
            "package" => Kind::Package,
            "param" => Kind::Param,
            _ => Kind::Other(s),
        }
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

/// A well-formed type reference: `{ "names": ["A", "B"] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeRef {
    pub names: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeRef {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeRef {
            names: names.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// The generic `object` type an expanded entry is rewritten to.
    pub fn object() -> Self {
        TypeRef::new(["object"])
    }
}

/// Whether a type name is one of [`TERMINAL_TYPES`].
pub fn is_terminal(name: &str) -> bool {
    TERMINAL_TYPES.contains(&name)
}

/// The `type` field of a doclet or property.
///
/// Anything that is not an object with a string `names` list is kept as
/// `Malformed` so it round-trips, but it never resolves to a typedef.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    Names(TypeRef),
    Malformed(Value),
}

impl TypeSpec {
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            TypeSpec::Names(r) => Some(r),
            TypeSpec::Malformed(_) => None,
        }
    }
}

impl From<TypeRef> for TypeSpec {
    fn from(r: TypeRef) -> Self {
        TypeSpec::Names(r)
    }
}

impl Serialize for TypeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypeSpec::Names(r) => r.serialize(serializer),
            TypeSpec::Malformed(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_object() {
            if let Ok(r) = serde_json::from_value::<TypeRef>(value.clone()) {
                return Ok(TypeSpec::Names(r));
            }
        }
        Ok(TypeSpec::Malformed(value))
    }
}

/// One `@property` / `@param` entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Property {
            name: Some(name.into()),
            ty: Some(ty.into()),
            ..Default::default()
        }
    }

    pub fn type_ref(&self) -> Option<&TypeRef> {
        self.ty.as_ref().and_then(TypeSpec::type_ref)
    }

    pub fn is_optional(&self) -> bool {
        self.optional == Some(true)
    }
}

/// A single parsed doclet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocRecord {
    #[serde(default, skip_serializing_if = "Kind::is_unset")]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longname: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocRecord {
    /// Build a typedef doclet, mostly for tests and programmatic callers.
    pub fn typedef(name: impl Into<String>, ty: TypeRef, properties: Option<Vec<Property>>) -> Self {
        DocRecord {
            kind: Kind::Typedef,
            name: Some(name.into()),
            ty: Some(ty.into()),
            properties,
            ..Default::default()
        }
    }

    pub fn type_ref(&self) -> Option<&TypeRef> {
        self.ty.as_ref().and_then(TypeSpec::type_ref)
    }

    /// A typedef doclet whose `type` is a well-formed reference.
    pub fn is_typedef(&self) -> bool {
        self.kind == Kind::Typedef && self.type_ref().is_some()
    }

    /// Whether `name` refers to this record by short or long name.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name) || self.longname.as_deref() == Some(name)
    }
}
