use axum::{response::Html, Json};
use serde_json::{json, Map, Value};

use crate::database::models::{ResourceKind, REQUIRED_FIELDS};

/// GET /api-docs - Swagger UI pointed at the generated document
pub async fn docs_ui() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

/// OpenAPI 3.0 description of the protected endpoints.
pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for kind in ResourceKind::ALL {
        let label = kind.label();
        let collection = kind.collection();
        let record_ref = format!("#/components/schemas/{}", label);
        let new_ref = format!("#/components/schemas/New{}", label);
        let security = json!([{ "ApiKeyAuth": [] }]);

        schemas.insert(label.to_string(), record_schema(kind));
        schemas.insert(format!("New{}", label), new_record_schema(kind));

        paths.insert(
            format!("/{}", collection),
            json!({
                "get": {
                    "summary": format!("List every {}", label.to_lowercase()),
                    "tags": [label],
                    "security": security,
                    "responses": {
                        "200": {
                            "description": format!("All {}", collection),
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": record_ref }
                            }}}
                        },
                        "401": { "$ref": "#/components/responses/Unauthorized" },
                        "403": { "$ref": "#/components/responses/Forbidden" }
                    }
                },
                "post": {
                    "summary": format!("Create a {}", label.to_lowercase()),
                    "tags": [label],
                    "security": security,
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": new_ref } } }
                    },
                    "responses": {
                        "201": {
                            "description": format!("{} created", label),
                            "content": { "application/json": { "schema": { "$ref": record_ref } } }
                        },
                        "400": { "description": "Missing required fields" },
                        "401": { "$ref": "#/components/responses/Unauthorized" },
                        "403": { "$ref": "#/components/responses/Forbidden" }
                    }
                }
            }),
        );

        paths.insert(
            format!("/{}/{{id}}", collection),
            json!({
                "parameters": [{
                    "in": "path",
                    "name": "id",
                    "required": true,
                    "schema": { "type": "string", "format": "uuid" },
                    "description": format!("{} id", label)
                }],
                "get": {
                    "summary": format!("Fetch a {} by id", label.to_lowercase()),
                    "tags": [label],
                    "security": security,
                    "responses": {
                        "200": {
                            "description": format!("The {}", label.to_lowercase()),
                            "content": { "application/json": { "schema": { "$ref": record_ref } } }
                        },
                        "400": { "description": "Malformed id" },
                        "404": { "description": format!("{} not found", label) }
                    }
                },
                "delete": {
                    "summary": format!("Delete a {} by id", label.to_lowercase()),
                    "tags": [label],
                    "security": security,
                    "responses": {
                        "204": { "description": format!("{} deleted", label) },
                        "400": { "description": "Malformed id" },
                        "404": { "description": format!("{} not found", label) }
                    }
                }
            }),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Nawal Planner API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Tasks and goals. Endpoints under `/tasks` and `/goals` require the API key \
                            in the `Authorization` header, sent as-is without a `Bearer ` prefix."
        },
        "servers": [{ "url": "/" }],
        "paths": paths,
        "components": {
            "securitySchemes": {
                "ApiKeyAuth": {
                    "type": "apiKey",
                    "in": "header",
                    "name": "Authorization",
                    "description": "Shared API key, e.g. `SUA_CHAVE_API_SECRETA`."
                }
            },
            "responses": {
                "Unauthorized": message_response("API Key required in the Authorization header."),
                "Forbidden": message_response("Invalid API Key.")
            },
            "schemas": schemas
        }
    })
}

fn string_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    for field in REQUIRED_FIELDS {
        let mut schema = json!({ "type": "string", "minLength": 1 });
        if *field == "dueDate" {
            schema["format"] = json!("date");
        }
        properties.insert(field.to_string(), schema);
    }
    properties
}

fn record_schema(kind: ResourceKind) -> Value {
    let mut properties = string_properties();
    properties.insert(
        "id".to_string(),
        json!({ "type": "string", "format": "uuid", "description": format!("Generated {} id", kind.label()) }),
    );
    properties.insert("createdAt".to_string(), json!({ "type": "string", "format": "date-time" }));
    properties.insert("updatedAt".to_string(), json!({ "type": "string", "format": "date-time" }));

    json!({
        "type": "object",
        "required": REQUIRED_FIELDS,
        "properties": properties
    })
}

fn new_record_schema(kind: ResourceKind) -> Value {
    json!({
        "type": "object",
        "description": format!(
            "Payload for a new {}. Each field must be a non-empty JSON string; numbers, booleans and null are rejected with 400.",
            kind.label().to_lowercase()
        ),
        "required": REQUIRED_FIELDS,
        "properties": string_properties()
    })
}

fn message_response(example: &str) -> Value {
    json!({
        "description": example,
        "content": { "application/json": { "schema": {
            "type": "object",
            "properties": { "message": { "type": "string", "example": example } }
        }}}
    })
}

const DOCS_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Nawal Planner API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;
