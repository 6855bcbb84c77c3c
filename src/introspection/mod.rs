//! Introspection: `__schema`/`__type` build an ordinary [`Value`] tree
//! shaped like the builtin `__Schema`/`__Type` object types, and that tree
//! is then handed to [`crate::executor::complete_value`] exactly like any
//! other resolved field value — so a client's own sub-selection set against
//! `__schema { types { name } }` is honored by the normal field-completion
//! machinery rather than by bespoke code here. `__typename` is resolved
//! directly against the runtime type in [`crate::executor`] and never
//! reaches this module.
//!
//! Grounded on `juniper`'s `schema/meta.rs`/`introspection/` query resolvers:
//! the field list each builtin type carries below (`__Type.kind`,
//! `__Type.ofType`, `__Field.args`, and so on) mirrors the fields `juniper`
//! exposes on its own `__Type`/`__Field`/`__InputValue` meta-objects.

use crate::{
    ast::{Field, InputValue as AstInputValue, Type},
    schema::{
        meta::{EnumMeta, EnumValueMeta, FieldMeta, InputFieldMeta, NamedType, TypeKind},
        model::{DirectiveLocation, DirectiveType, Schema},
    },
    value::{Object, Value},
};

fn type_kind_string(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Scalar => "SCALAR",
        TypeKind::Object => "OBJECT",
        TypeKind::Interface => "INTERFACE",
        TypeKind::Union => "UNION",
        TypeKind::Enum => "ENUM",
        TypeKind::InputObject => "INPUT_OBJECT",
        TypeKind::List => "LIST",
        TypeKind::NonNull => "NON_NULL",
    }
}

fn directive_location_string(loc: DirectiveLocation) -> &'static str {
    match loc {
        DirectiveLocation::Query => "QUERY",
        DirectiveLocation::Mutation => "MUTATION",
        DirectiveLocation::Subscription => "SUBSCRIPTION",
        DirectiveLocation::Field => "FIELD",
        DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
        DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
        DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
    }
}

fn description_of<CtxT>(named: &NamedType<CtxT>) -> Option<&str> {
    match named {
        NamedType::Scalar(s) => s.description.as_deref(),
        NamedType::Enum(e) => e.description.as_deref(),
        NamedType::Object(o) => o.description.as_deref(),
        NamedType::Interface(i) => i.description.as_deref(),
        NamedType::Union(u) => u.description.as_deref(),
        NamedType::InputObject(o) => o.description.as_deref(),
    }
}

/// Prints an AST literal back to source text, the shape `__InputValue`'s
/// `defaultValue` field reports it in.
fn print_literal(v: &AstInputValue) -> String {
    match v {
        AstInputValue::Null => "null".to_owned(),
        AstInputValue::Int(i) => i.to_string(),
        AstInputValue::Float(f) => f.to_string(),
        AstInputValue::String(s) => format!("{s:?}"),
        AstInputValue::Boolean(b) => b.to_string(),
        AstInputValue::Enum(e) => e.clone(),
        AstInputValue::Variable(name) => format!("${name}"),
        AstInputValue::List(items) => {
            format!("[{}]", items.iter().map(|i| print_literal(&i.item)).collect::<Vec<_>>().join(", "))
        }
        AstInputValue::Object(fields) => {
            let rendered = fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", print_literal(&v.item)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{rendered}}}")
        }
    }
}

fn wrapper_value(kind: &'static str, of_type: Value) -> Value {
    let mut o = Object::with_capacity(9);
    o.add_field("kind", Value::String(kind.to_owned()));
    o.add_field("name", Value::Null);
    o.add_field("description", Value::Null);
    o.add_field("fields", Value::Null);
    o.add_field("interfaces", Value::Null);
    o.add_field("possibleTypes", Value::Null);
    o.add_field("enumValues", Value::Null);
    o.add_field("inputFields", Value::Null);
    o.add_field("ofType", of_type);
    Value::Object(o)
}

/// Builds a `__Type`-shaped value for a type reference as written in a
/// schema (a field's type, an argument's type): recurses through `List`/
/// `NonNull` wrappers before bottoming out at a named type.
fn type_ref_value<CtxT>(schema: &Schema<CtxT>, type_ref: &Type) -> Value {
    match type_ref {
        Type::NonNull(inner) => wrapper_value("NON_NULL", type_ref_value(schema, inner)),
        Type::List(inner) => wrapper_value("LIST", type_ref_value(schema, inner)),
        Type::Named(name) => match schema.type_by_name(name) {
            Some(named) => named_type_value(schema, named),
            None => Value::Null,
        },
    }
}

fn input_value_meta_value<CtxT>(schema: &Schema<CtxT>, a: &InputFieldMeta) -> Value {
    let mut o = Object::with_capacity(4);
    o.add_field("name", Value::String(a.name.to_string()));
    o.add_field("description", a.description.as_deref().map_or(Value::Null, |d| Value::String(d.to_owned())));
    o.add_field("type", type_ref_value(schema, &a.type_ref));
    o.add_field(
        "defaultValue",
        a.default_value.as_ref().map_or(Value::Null, |v| Value::String(print_literal(v))),
    );
    Value::Object(o)
}

fn field_value<CtxT>(schema: &Schema<CtxT>, f: &FieldMeta<CtxT>) -> Value {
    let mut o = Object::with_capacity(6);
    o.add_field("name", Value::String(f.name.to_string()));
    o.add_field("description", f.description.as_deref().map_or(Value::Null, |d| Value::String(d.to_owned())));
    let args = f.arguments.iter().map(|a| input_value_meta_value(schema, a)).collect();
    o.add_field("args", Value::List(args));
    o.add_field("type", type_ref_value(schema, &f.field_type));
    o.add_field("isDeprecated", Value::Boolean(f.deprecation_status.is_deprecated()));
    o.add_field(
        "deprecationReason",
        f.deprecation_status.reason().map_or(Value::Null, |r| Value::String(r.to_owned())),
    );
    Value::Object(o)
}

fn enum_value_value(v: &EnumValueMeta) -> Value {
    let mut o = Object::with_capacity(4);
    o.add_field("name", Value::String(v.name.to_string()));
    o.add_field("description", v.description.as_deref().map_or(Value::Null, |d| Value::String(d.to_owned())));
    o.add_field("isDeprecated", Value::Boolean(v.deprecation_status.is_deprecated()));
    o.add_field(
        "deprecationReason",
        v.deprecation_status.reason().map_or(Value::Null, |r| Value::String(r.to_owned())),
    );
    Value::Object(o)
}

fn fields_value<CtxT>(schema: &Schema<CtxT>, named: &NamedType<CtxT>) -> Value {
    let fields: Option<Vec<&FieldMeta<CtxT>>> = match named {
        NamedType::Object(o) => Some(o.fields.values().filter(|f| !f.is_builtin()).collect()),
        NamedType::Interface(i) => Some(i.fields.values().filter(|f| !f.is_builtin()).collect()),
        _ => None,
    };
    match fields {
        Some(fields) => Value::List(fields.into_iter().map(|f| field_value(schema, f)).collect()),
        None => Value::Null,
    }
}

fn interfaces_value<CtxT>(schema: &Schema<CtxT>, named: &NamedType<CtxT>) -> Value {
    let interface_names: Option<&[arcstr::ArcStr]> = match named {
        NamedType::Object(o) => Some(&o.interface_names),
        NamedType::Interface(i) => Some(&i.interface_names),
        _ => None,
    };
    match interface_names {
        Some(names) => Value::List(
            names
                .iter()
                .filter_map(|n| schema.type_by_name(n))
                .map(|t| named_type_value(schema, t))
                .collect(),
        ),
        None => Value::Null,
    }
}

fn possible_types_value<CtxT>(schema: &Schema<CtxT>, named: &NamedType<CtxT>) -> Value {
    if !named.is_abstract() {
        return Value::Null;
    }
    Value::List(schema.possible_types(named).into_iter().map(|t| named_type_value(schema, t)).collect())
}

fn enum_values_value<CtxT>(named: &NamedType<CtxT>) -> Value {
    match named {
        NamedType::Enum(e) => Value::List(e.values.iter().map(enum_value_value).collect()),
        _ => Value::Null,
    }
}

fn input_fields_value<CtxT>(schema: &Schema<CtxT>, named: &NamedType<CtxT>) -> Value {
    match named {
        NamedType::InputObject(o) => {
            Value::List(o.input_fields.values().map(|f| input_value_meta_value(schema, f)).collect())
        }
        _ => Value::Null,
    }
}

/// Builds a `__Type`-shaped value for a named type in the schema.
fn named_type_value<CtxT>(schema: &Schema<CtxT>, named: &NamedType<CtxT>) -> Value {
    let mut o = Object::with_capacity(9);
    o.add_field("kind", Value::String(type_kind_string(named.type_kind()).to_owned()));
    o.add_field("name", Value::String(named.name().to_owned()));
    o.add_field("description", description_of(named).map_or(Value::Null, |d| Value::String(d.to_owned())));
    o.add_field("fields", fields_value(schema, named));
    o.add_field("interfaces", interfaces_value(schema, named));
    o.add_field("possibleTypes", possible_types_value(schema, named));
    o.add_field("enumValues", enum_values_value(named));
    o.add_field("inputFields", input_fields_value(schema, named));
    o.add_field("ofType", Value::Null);
    Value::Object(o)
}

fn directive_value<CtxT>(schema: &Schema<CtxT>, d: &DirectiveType) -> Value {
    let mut o = Object::with_capacity(4);
    o.add_field("name", Value::String(d.name.clone()));
    o.add_field("description", d.description.as_deref().map_or(Value::Null, |d| Value::String(d.to_owned())));
    o.add_field(
        "locations",
        Value::List(d.locations.iter().map(|l| Value::String(directive_location_string(*l).to_owned())).collect()),
    );
    o.add_field("args", Value::List(d.arguments.iter().map(|a| input_value_meta_value(schema, a)).collect()));
    Value::Object(o)
}

/// Builds the `__Schema`-shaped value `__schema` resolves to.
pub(crate) fn schema_value<CtxT>(schema: &Schema<CtxT>) -> Value {
    let mut o = Object::with_capacity(5);
    o.add_field("queryType", named_type_value(schema, schema.query_type()));
    o.add_field("mutationType", schema.mutation_type().map_or(Value::Null, |t| named_type_value(schema, t)));
    o.add_field("subscriptionType", schema.subscription_type().map_or(Value::Null, |t| named_type_value(schema, t)));
    o.add_field(
        "types",
        Value::List(schema.type_list().map(|t| named_type_value(schema, t)).collect()),
    );
    o.add_field(
        "directives",
        Value::List(
            ["skip", "include"]
                .iter()
                .filter_map(|name| schema.directive_by_name(name))
                .map(|d| directive_value(schema, d))
                .collect(),
        ),
    );
    Value::Object(o)
}

/// Builds the `__Type`-shaped value `__type(name: ...)` resolves to, or
/// `Value::Null` when the schema has no type by that name.
pub(crate) fn type_value<CtxT>(schema: &Schema<CtxT>, name: &str) -> Value {
    match schema.type_by_name(name) {
        Some(named) => named_type_value(schema, named),
        None => Value::Null,
    }
}

/// Reads the `__type` field's `name` argument straight off the AST, bypassing
/// ordinary argument coercion — `__type` isn't declared as a `FieldMeta` of
/// any real object type, so there is no [`crate::schema::meta::InputFieldMeta`]
/// for [`crate::coerce::coerce_argument_values`] to coerce against.
pub(crate) fn type_name_argument(field_node: &Field, variables: &Object) -> Option<String> {
    let (_, spanned) = field_node.arguments.iter().find(|(name, _)| name == "name")?;
    match &spanned.item {
        AstInputValue::String(s) => Some(s.clone()),
        AstInputValue::Variable(var_name) => variables.get(var_name).and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

fn named(name: &str) -> Type {
    Type::Named(name.to_owned())
}

fn non_null(t: Type) -> Type {
    Type::NonNull(Box::new(t))
}

fn list_of(t: Type) -> Type {
    Type::List(Box::new(t))
}

fn non_null_list_of(t: Type) -> Type {
    non_null(list_of(non_null(t)))
}

/// The synthetic `__Schema`/`__Type`/`__Field`/`__InputValue`/`__EnumValue`/
/// `__Directive`/`__TypeKind`/`__DirectiveLocation` types every schema
/// carries, injected by [`Schema::new`](crate::schema::model::Schema::new).
/// Built directly from [`FieldMeta`]/[`ObjectMeta`]/[`EnumMeta`] the same
/// way any other schema type is, rather than through some separate
/// introspection-specific type — `named_type_value` above resolves their
/// fields via ordinary property lookup against the `Value` trees it builds,
/// since every field name here matches the corresponding key those trees
/// use.
pub(crate) fn builtin_types<CtxT>() -> Vec<NamedType<CtxT>> {
    use crate::schema::meta::ObjectMeta;

    let type_kind = NamedType::Enum(EnumMeta::new(
        "__TypeKind",
        vec![
            EnumValueMeta::new("SCALAR"),
            EnumValueMeta::new("OBJECT"),
            EnumValueMeta::new("INTERFACE"),
            EnumValueMeta::new("UNION"),
            EnumValueMeta::new("ENUM"),
            EnumValueMeta::new("INPUT_OBJECT"),
            EnumValueMeta::new("LIST"),
            EnumValueMeta::new("NON_NULL"),
        ],
    ));

    let directive_location = NamedType::Enum(EnumMeta::new(
        "__DirectiveLocation",
        vec![
            EnumValueMeta::new("QUERY"),
            EnumValueMeta::new("MUTATION"),
            EnumValueMeta::new("SUBSCRIPTION"),
            EnumValueMeta::new("FIELD"),
            EnumValueMeta::new("FRAGMENT_DEFINITION"),
            EnumValueMeta::new("FRAGMENT_SPREAD"),
            EnumValueMeta::new("INLINE_FRAGMENT"),
        ],
    ));

    let input_value = NamedType::Object(ObjectMeta::new(
        "__InputValue",
        vec![
            FieldMeta::new("name", non_null(named("String"))),
            FieldMeta::new("description", named("String")),
            FieldMeta::new("type", non_null(named("__Type"))),
            FieldMeta::new("defaultValue", named("String")),
        ],
    ));

    let enum_value = NamedType::Object(ObjectMeta::new(
        "__EnumValue",
        vec![
            FieldMeta::new("name", non_null(named("String"))),
            FieldMeta::new("description", named("String")),
            FieldMeta::new("isDeprecated", non_null(named("Boolean"))),
            FieldMeta::new("deprecationReason", named("String")),
        ],
    ));

    let field = NamedType::Object(ObjectMeta::new(
        "__Field",
        vec![
            FieldMeta::new("name", non_null(named("String"))),
            FieldMeta::new("description", named("String")),
            FieldMeta::new("args", non_null_list_of(named("__InputValue"))),
            FieldMeta::new("type", non_null(named("__Type"))),
            FieldMeta::new("isDeprecated", non_null(named("Boolean"))),
            FieldMeta::new("deprecationReason", named("String")),
        ],
    ));

    let directive = NamedType::Object(ObjectMeta::new(
        "__Directive",
        vec![
            FieldMeta::new("name", non_null(named("String"))),
            FieldMeta::new("description", named("String")),
            FieldMeta::new("locations", non_null_list_of(named("__DirectiveLocation"))),
            FieldMeta::new("args", non_null_list_of(named("__InputValue"))),
        ],
    ));

    let type_object = NamedType::Object(ObjectMeta::new(
        "__Type",
        vec![
            FieldMeta::new("kind", non_null(named("__TypeKind"))),
            FieldMeta::new("name", named("String")),
            FieldMeta::new("description", named("String")),
            FieldMeta::new("fields", list_of(non_null(named("__Field")))),
            FieldMeta::new("interfaces", list_of(non_null(named("__Type")))),
            FieldMeta::new("possibleTypes", list_of(non_null(named("__Type")))),
            FieldMeta::new("enumValues", list_of(non_null(named("__EnumValue")))),
            FieldMeta::new("inputFields", list_of(non_null(named("__InputValue")))),
            FieldMeta::new("ofType", named("__Type")),
        ],
    ));

    let schema_object = NamedType::Object(ObjectMeta::new(
        "__Schema",
        vec![
            FieldMeta::new("queryType", non_null(named("__Type"))),
            FieldMeta::new("mutationType", named("__Type")),
            FieldMeta::new("subscriptionType", named("__Type")),
            FieldMeta::new("types", non_null_list_of(named("__Type"))),
            FieldMeta::new("directives", non_null_list_of(named("__Directive"))),
        ],
    ));

    vec![
        type_kind,
        directive_location,
        input_value,
        enum_value,
        field,
        directive,
        type_object,
        schema_object,
    ]
}
