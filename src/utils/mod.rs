//! Helpers shared by the entity modules.

use serde_json::{json, Value};

/// Location of a created resource, e.g. `/api/books/42`.
pub fn resource_location(resource: &str, id: &str) -> String {
    format!("/api/{resource}/{id}")
}

/// OpenAPI fragment for the standard CRUD surface of one resource.
///
/// `schema_name` refers to `schema`, which is registered under
/// `components.schemas`. Paths are relative to the module mount point.
pub fn crud_openapi(tag: &str, schema_name: &str, schema: Value) -> Value {
    let entity_ref = json!({ "$ref": format!("#/components/schemas/{schema_name}") });
    let error_ref = json!({ "$ref": "#/components/schemas/ErrorResponse" });
    let json_body = |schema: &Value| json!({ "application/json": { "schema": schema } });
    let error_response =
        |description: &str| json!({ "description": description, "content": json_body(&error_ref) });
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    }]);

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": format!("List all {tag}"),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": format!("Every {schema_name}"),
                            "content": json_body(&json!({ "type": "array", "items": entity_ref }))
                        }
                    }
                },
                "post": {
                    "summary": format!("Create a {schema_name}"),
                    "tags": [tag],
                    "requestBody": { "required": true, "content": json_body(&entity_ref) },
                    "responses": {
                        "201": { "description": "Created", "content": json_body(&entity_ref) },
                        "400": error_response("The payload already has an id")
                    }
                },
                "put": {
                    "summary": format!("Update a {schema_name}"),
                    "tags": [tag],
                    "requestBody": { "required": true, "content": json_body(&entity_ref) },
                    "responses": {
                        "200": { "description": "Updated", "content": json_body(&entity_ref) },
                        "400": error_response("The payload has no id or an unknown id")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get a {schema_name} by id"),
                    "tags": [tag],
                    "parameters": id_param,
                    "responses": {
                        "200": { "description": "Found", "content": json_body(&entity_ref) },
                        "404": error_response("No entity with this id")
                    }
                },
                "delete": {
                    "summary": format!("Delete a {schema_name} by id"),
                    "tags": [tag],
                    "parameters": id_param,
                    "responses": { "204": { "description": "Deleted" } }
                }
            },
            "/health": {
                "get": {
                    "summary": format!("{tag} health check"),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": { schema_name: schema }
        }
    })
}
