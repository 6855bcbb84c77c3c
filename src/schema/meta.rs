//! Types used to describe the shape of a schema.
//!
//! Unlike `juniper`'s `MetaType`, nothing here is derived from a
//! `GraphQLType`/`Registry` pass over Rust types at startup — a schema is
//! built directly, field by field, with each field optionally carrying a
//! boxed resolver. That's the one deliberate architectural departure this
//! crate takes from its template: the rest (the type-kind taxonomy, the
//! deprecation/description bookkeeping, the split between this file and
//! `schema::model`) follows it closely.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use futures::future::BoxFuture;
use indexmap::IndexMap;

use crate::{ast::InputValue as AstInputValue, ast::Type, error::FieldError, value::Value};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    Current,
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(r) => r.as_deref(),
        }
    }
}

/// A field's or an input object's declared default: the literal as written
/// in the schema, coerced lazily the first time it's needed (see
/// `crate::coerce`).
pub type DefaultValue = AstInputValue;

/// Metadata for one input position: a field argument, or a field of an
/// input object. Both shapes are identical, so `juniper`'s split between
/// `Argument` and input-object fields is collapsed into one type here.
#[derive(Clone, Debug)]
pub struct InputFieldMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub type_ref: Type,
    pub default_value: Option<DefaultValue>,
}

impl InputFieldMeta {
    pub fn new(name: impl Into<ArcStr>, type_ref: Type) -> Self {
        Self { name: name.into(), description: None, type_ref, default_value: None }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn is_builtin(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// Everything a field resolver needs besides the schema-wide context value.
pub struct ResolveInfo<'a, CtxT> {
    pub field_name: &'a str,
    pub parent: &'a Value,
    pub arguments: &'a crate::value::Object,
    pub context: &'a CtxT,
}

pub type FieldFuture<'a> = BoxFuture<'a, Result<Value, FieldError>>;
pub type SourceStream = futures::stream::BoxStream<'static, Value>;
pub type SourceStreamFuture<'a> = BoxFuture<'a, Result<SourceStream, FieldError>>;

/// A field's resolver: produces this field's value given its coerced
/// arguments and the execution's context value. `None` means the *default
/// resolver* applies — property lookup of the field's name on the parent
/// object, the behavior graphql-js falls back to.
pub type ResolveFn<CtxT> = dyn for<'a> Fn(ResolveInfo<'a, CtxT>) -> FieldFuture<'a> + Send + Sync;

/// A subscription field's source-stream producer, invoked once by
/// [`crate::subscription::create_source_event_stream`].
pub type SubscribeFn<CtxT> =
    dyn for<'a> Fn(ResolveInfo<'a, CtxT>) -> SourceStreamFuture<'a> + Send + Sync;

/// Metadata and (optionally) a resolver for one field of an object or
/// interface type.
pub struct FieldMeta<CtxT> {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub arguments: Vec<InputFieldMeta>,
    pub field_type: Type,
    pub deprecation_status: DeprecationStatus,
    pub(crate) resolve_fn: Option<Arc<ResolveFn<CtxT>>>,
    pub(crate) subscribe_fn: Option<Arc<SubscribeFn<CtxT>>>,
}

impl<CtxT> fmt::Debug for FieldMeta<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMeta")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("arguments", &self.arguments.iter().map(|a| &a.name).collect::<Vec<_>>())
            .field("has_resolver", &self.resolve_fn.is_some())
            .field("has_subscriber", &self.subscribe_fn.is_some())
            .finish()
    }
}

impl<CtxT> FieldMeta<CtxT> {
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            field_type,
            deprecation_status: DeprecationStatus::Current,
            resolve_fn: None,
            subscribe_fn: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn argument(mut self, argument: InputFieldMeta) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }

    #[must_use]
    pub fn resolve<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ResolveInfo<'a, CtxT>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.resolve_fn = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn subscribe<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ResolveInfo<'a, CtxT>) -> SourceStreamFuture<'a> + Send + Sync + 'static,
    {
        self.subscribe_fn = Some(Arc::new(f));
        self
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&InputFieldMeta> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn is_builtin(&self) -> bool {
        self.name.starts_with("__")
    }
}

pub struct ScalarMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub specified_by_url: Option<ArcStr>,
    pub(crate) serialize_fn: Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>,
    pub(crate) parse_value_fn: Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>,
    pub(crate) parse_literal_fn: Arc<dyn Fn(&AstInputValue) -> Result<Value, String> + Send + Sync>,
}

impl fmt::Debug for ScalarMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarMeta").field("name", &self.name).finish()
    }
}

impl ScalarMeta {
    pub fn new(
        name: impl Into<ArcStr>,
        serialize_fn: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_value_fn: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_literal_fn: impl Fn(&AstInputValue) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            specified_by_url: None,
            serialize_fn: Arc::new(serialize_fn),
            parse_value_fn: Arc::new(parse_value_fn),
            parse_literal_fn: Arc::new(parse_literal_fn),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn specified_by_url(mut self, url: impl Into<ArcStr>) -> Self {
        self.specified_by_url = Some(url.into());
        self
    }

    pub fn serialize(&self, v: &Value) -> Result<Value, String> {
        (self.serialize_fn)(v)
    }

    pub fn parse_value(&self, v: &Value) -> Result<Value, String> {
        (self.parse_value_fn)(v)
    }

    pub fn parse_literal(&self, v: &AstInputValue) -> Result<Value, String> {
        (self.parse_literal_fn)(v)
    }
}

#[derive(Clone, Debug)]
pub struct EnumValueMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub deprecation_status: DeprecationStatus,
}

impl EnumValueMeta {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self { name: name.into(), description: None, deprecation_status: DeprecationStatus::Current }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }
}

#[derive(Debug)]
pub struct EnumMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub values: Vec<EnumValueMeta>,
}

impl EnumMeta {
    pub fn new(name: impl Into<ArcStr>, values: Vec<EnumValueMeta>) -> Self {
        Self { name: name.into(), description: None, values }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value_by_name(&self, name: &str) -> Option<&EnumValueMeta> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// A function that checks whether a resolved value represents a particular
/// object type, for abstract-type resolution. Future-returning so that a
/// check backed by its own I/O (an async lookup confirming a discriminant)
/// doesn't have to block; every candidate object's check is run concurrently
/// by [`crate::executor`].
pub type IsTypeOfFn = dyn for<'a> Fn(&'a Value) -> BoxFuture<'a, bool> + Send + Sync;

pub struct ObjectMeta<CtxT> {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub fields: IndexMap<ArcStr, FieldMeta<CtxT>>,
    pub interface_names: Vec<ArcStr>,
    pub(crate) is_type_of: Option<Arc<IsTypeOfFn>>,
}

impl<CtxT> ObjectMeta<CtxT> {
    pub fn new(name: impl Into<ArcStr>, fields: Vec<FieldMeta<CtxT>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
            interface_names: Vec::new(),
            is_type_of: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn interfaces(mut self, interfaces: Vec<ArcStr>) -> Self {
        self.interface_names = interfaces;
        self
    }

    #[must_use]
    pub fn is_type_of<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Value) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        self.is_type_of = Some(Arc::new(f));
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldMeta<CtxT>> {
        self.fields.get(name)
    }
}

/// A function that picks the concrete object type for an abstract value,
/// by name — the dynamic equivalent of a `resolveType` callback. When
/// absent, abstract-type resolution instead probes each possible type's
/// `is_type_of`, the way `graphql-js` falls back when a type doesn't
/// implement `resolveType`.
pub type ResolveTypeFn = dyn for<'a> Fn(&'a Value) -> BoxFuture<'a, Option<ArcStr>> + Send + Sync;

pub struct InterfaceMeta<CtxT> {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub fields: IndexMap<ArcStr, FieldMeta<CtxT>>,
    pub interface_names: Vec<ArcStr>,
    pub(crate) resolve_type_fn: Option<Arc<ResolveTypeFn>>,
}

impl<CtxT> InterfaceMeta<CtxT> {
    pub fn new(name: impl Into<ArcStr>, fields: Vec<FieldMeta<CtxT>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
            interface_names: Vec::new(),
            resolve_type_fn: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn resolve_type<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Value) -> BoxFuture<'a, Option<ArcStr>> + Send + Sync + 'static,
    {
        self.resolve_type_fn = Some(Arc::new(f));
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldMeta<CtxT>> {
        self.fields.get(name)
    }
}

pub struct UnionMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub of_type_names: Vec<ArcStr>,
    pub(crate) resolve_type_fn: Option<Arc<ResolveTypeFn>>,
}

impl fmt::Debug for UnionMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionMeta")
            .field("name", &self.name)
            .field("of_type_names", &self.of_type_names)
            .finish()
    }
}

impl UnionMeta {
    pub fn new(name: impl Into<ArcStr>, of_type_names: Vec<ArcStr>) -> Self {
        Self { name: name.into(), description: None, of_type_names, resolve_type_fn: None }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn resolve_type<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Value) -> BoxFuture<'a, Option<ArcStr>> + Send + Sync + 'static,
    {
        self.resolve_type_fn = Some(Arc::new(f));
        self
    }
}

#[derive(Debug)]
pub struct InputObjectMeta {
    pub name: ArcStr,
    pub description: Option<ArcStr>,
    pub input_fields: IndexMap<ArcStr, InputFieldMeta>,
}

impl InputObjectMeta {
    pub fn new(name: impl Into<ArcStr>, input_fields: Vec<InputFieldMeta>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields: input_fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&InputFieldMeta> {
        self.input_fields.get(name)
    }
}

/// The kind of a named type, as reported by `__type { kind }` — also the
/// natural discriminant for [`NamedType`] everywhere else in the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// One named type in a schema.
pub enum NamedType<CtxT> {
    Scalar(ScalarMeta),
    Enum(EnumMeta),
    Object(ObjectMeta<CtxT>),
    Interface(InterfaceMeta<CtxT>),
    Union(UnionMeta),
    InputObject(InputObjectMeta),
}

impl<CtxT> fmt::Debug for NamedType<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(match self {
            Self::Scalar(_) => "Scalar",
            Self::Enum(_) => "Enum",
            Self::Object(_) => "Object",
            Self::Interface(_) => "Interface",
            Self::Union(_) => "Union",
            Self::InputObject(_) => "InputObject",
        })
        .field(&self.name())
        .finish()
    }
}

impl<CtxT> NamedType<CtxT> {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Only objects and interfaces have fields.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldMeta<CtxT>> {
        match self {
            Self::Object(o) => o.field_by_name(name),
            Self::Interface(i) => i.field_by_name(name),
            _ => None,
        }
    }

    /// Only input objects have input fields.
    pub fn input_field_by_name(&self, name: &str) -> Option<&InputFieldMeta> {
        match self {
            Self::InputObject(o) => o.field_by_name(name),
            _ => None,
        }
    }

    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    /// Only interfaces and unions are abstract.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Only scalars, enums, and input objects can appear in input position.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    pub fn is_builtin(&self) -> bool {
        let name = self.name();
        name.starts_with("__")
            || matches!(name, "Boolean" | "String" | "Int" | "Float" | "ID")
    }
}
