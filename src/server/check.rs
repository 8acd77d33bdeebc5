use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{TypeKind, TypeSystemDefinition};
use serde::Deserialize;

use super::LibrarySchema;

/// The SDL the typed clients are generated against.
pub const LIBRARY_SDL: &str = include_str!("../../schemas/library.graphql");

const INTROSPECTION: &str = "
    { __schema { types { name fields { name type { ...TypeRef } args { name type { ...TypeRef } } } } } }
    fragment TypeRef on __Type { kind name ofType { kind name ofType { kind name ofType { kind name } } } }
";

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("introspecting the schema failed: {0}")]
    Introspection(String),
    #[error("introspection returned unexpected data")]
    Malformed(#[from] serde_json::Error),
    #[error("declared SDL does not parse: {0}")]
    Sdl(String),
    #[error("type `{0}` is missing from the schema")]
    MissingType(String),
    #[error("field `{type_name}.{field}` is missing from the schema")]
    MissingField { type_name: String, field: String },
    #[error("field `{type_name}.{field}` has type `{found}`, declared `{declared}`")]
    FieldType {
        type_name: String,
        field: String,
        declared: String,
        found: String,
    },
    #[error("field `{type_name}.{field}` takes `({found})`, declared `({declared})`")]
    Arguments {
        type_name: String,
        field: String,
        declared: String,
        found: String,
    },
}

#[derive(Deserialize)]
struct Introspection {
    #[serde(rename = "__schema")]
    schema: SchemaTypes,
}

#[derive(Deserialize)]
struct SchemaTypes {
    types: Vec<TypeInfo>,
}

#[derive(Deserialize)]
struct TypeInfo {
    name: String,
    fields: Option<Vec<FieldInfo>>,
}

#[derive(Deserialize)]
struct FieldInfo {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRef,
    args: Vec<ArgInfo>,
}

#[derive(Deserialize)]
struct ArgInfo {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Deserialize)]
struct TypeRef {
    kind: String,
    name: Option<String>,
    #[serde(rename = "ofType")]
    of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Renders the reference the way SDL spells it, e.g. `[Book!]!`.
    fn render(&self) -> String {
        let inner = || self.of_type.as_ref().map(|t| t.render()).unwrap_or_default();
        match self.kind.as_str() {
            "NON_NULL" => format!("{}!", inner()),
            "LIST" => format!("[{}]", inner()),
            _ => self.name.clone().unwrap_or_default(),
        }
    }
}

/// Argument list as `name: Type` pairs in declaration order.
fn signature<'a>(args: impl Iterator<Item = (&'a str, String)>) -> String {
    args.map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Verifies `schema` against the checked-in library SDL.
pub async fn check_schema(schema: &LibrarySchema) -> Result<(), SchemaError> {
    check_schema_against(schema, LIBRARY_SDL).await
}

/// Introspects `schema` and verifies that every object type declared in `sdl`
/// is exposed with the same fields, field types and arguments.
pub async fn check_schema_against(
    schema: &LibrarySchema,
    sdl: &str,
) -> Result<(), SchemaError> {
    let declared = parse_schema(sdl).map_err(|err| SchemaError::Sdl(err.to_string()))?;

    let response = schema.execute(INTROSPECTION).await;
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(SchemaError::Introspection(messages.join("; ")));
    }
    let introspection: Introspection = serde_json::from_value(response.data.into_json()?)?;

    for definition in &declared.definitions {
        let TypeSystemDefinition::Type(ty) = definition else {
            continue;
        };
        let TypeKind::Object(object) = &ty.node.kind else {
            continue;
        };
        let type_name = ty.node.name.node.as_str();

        let exposed = introspection
            .schema
            .types
            .iter()
            .find(|t| t.name == type_name)
            .ok_or_else(|| SchemaError::MissingType(type_name.to_owned()))?;
        let exposed_fields = exposed.fields.as_deref().unwrap_or_default();

        for field in &object.fields {
            let field = &field.node;
            let field_name = field.name.node.as_str();
            let found = exposed_fields
                .iter()
                .find(|f| f.name == field_name)
                .ok_or_else(|| SchemaError::MissingField {
                    type_name: type_name.to_owned(),
                    field: field_name.to_owned(),
                })?;

            let declared_ty = field.ty.node.to_string();
            let found_ty = found.ty.render();
            if declared_ty != found_ty {
                return Err(SchemaError::FieldType {
                    type_name: type_name.to_owned(),
                    field: field_name.to_owned(),
                    declared: declared_ty,
                    found: found_ty,
                });
            }

            let declared_args = signature(
                field
                    .arguments
                    .iter()
                    .map(|a| (a.node.name.node.as_str(), a.node.ty.node.to_string())),
            );
            let found_args = signature(
                found
                    .args
                    .iter()
                    .map(|a| (a.name.as_str(), a.ty.render())),
            );
            if declared_args != found_args {
                return Err(SchemaError::Arguments {
                    type_name: type_name.to_owned(),
                    field: field_name.to_owned(),
                    declared: declared_args,
                    found: found_args,
                });
            }
        }
    }

    tracing::debug!("schema matches the declared SDL");
    Ok(())
}
