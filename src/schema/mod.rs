//! Schema description: the set of types and fields an execution is checked
//! and dispatched against.

pub mod meta;
pub mod model;

pub use self::meta::{
    DefaultValue, DeprecationStatus, EnumMeta, EnumValueMeta, FieldFuture, FieldMeta,
    InputFieldMeta, InputObjectMeta, InterfaceMeta, NamedType, ObjectMeta, ResolveFn,
    ResolveInfo, ScalarMeta, SourceStream, SourceStreamFuture, SubscribeFn, TypeKind, UnionMeta,
};
pub use self::model::{DirectiveLocation, DirectiveType, RootOperation, Schema};
