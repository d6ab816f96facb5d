//! Wire format of the Gremlin Server HTTP endpoint.
//!
//! A `SyncPlan` is rendered as a fixed Groovy script plus bindings. User
//! supplied values (repository URL, coordinates) only ever travel in the
//! bindings, never in the script text.

use crate::shared::error::GraphStoreError;
use crate::vulnerability_report::domain::{
    property, DependencyEdgeLabel, EdgeRecord, SyncPlan, TraversalResult, TraversalRow,
    VertexProperties,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Binding holding the repository URL
const REPO_URL_BINDING: &str = "repoUrl";
/// Binding holding the list of edge requests
const EDGE_REQUESTS_BINDING: &str = "edgeRequests";

/// Step labels of the final `select`
const REPO_STEP: &str = "rp";
const EDGE_STEP: &str = "ed";
const PACKAGE_STEP: &str = "epv";

/// Request body accepted by Gremlin Server over HTTP
#[derive(Debug, Serialize)]
pub struct GremlinRequest {
    pub gremlin: String,
    pub bindings: Map<String, Value>,
    pub language: &'static str,
}

impl GremlinRequest {
    /// Renders the synchronization protocol for `plan`
    pub fn for_plan(plan: &SyncPlan) -> Self {
        let edge_requests: Vec<Value> = plan
            .edges()
            .iter()
            .map(|request| {
                json!({
                    "label": request.label.as_str(),
                    "ecosystem": request.key.ecosystem,
                    "name": request.key.name,
                    "version": request.key.version,
                })
            })
            .collect();

        let mut bindings = Map::new();
        bindings.insert(
            REPO_URL_BINDING.to_string(),
            Value::String(plan.repo_url().to_string()),
        );
        bindings.insert(
            EDGE_REQUESTS_BINDING.to_string(),
            Value::Array(edge_requests),
        );

        Self {
            gremlin: sync_script(),
            bindings,
            language: "gremlin-groovy",
        }
    }
}

/// Groovy script implementing get-or-create, drop, relink and traverse
pub fn sync_script() -> String {
    let labels = DependencyEdgeLabel::ALL
        .iter()
        .map(|label| format!("'{}'", label.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "def repo = g.V().has('{repo_url}', {repo_url_binding}).tryNext().orElseGet {{ \
         graph.addVertex('{vertex_label}', '{repo_label}', '{repo_url}', {repo_url_binding}) }};\n\
         g.V(repo).outE({labels}).drop().iterate();\n\
         {edge_requests}.each {{ req ->\n  \
         def ver = g.V().has('{ecosystem}', req.ecosystem).has('{name}', req.name).has('{version}', req.version);\n  \
         if (ver.hasNext()) {{ repo.addEdge(req.label, ver.next()) }}\n\
         }};\n\
         g.V(repo).as('{rp}').outE({labels}).as('{ed}').inV().as('{epv}')\
         .select('{rp}', '{ed}', '{epv}').by(valueMap(true))",
        repo_url = property::REPO_URL,
        repo_url_binding = REPO_URL_BINDING,
        vertex_label = property::VERTEX_LABEL,
        repo_label = property::REPO_VERTEX_LABEL,
        labels = labels,
        edge_requests = EDGE_REQUESTS_BINDING,
        ecosystem = property::ECOSYSTEM,
        name = property::NAME,
        version = property::VERSION,
        rp = REPO_STEP,
        ed = EDGE_STEP,
        epv = PACKAGE_STEP,
    )
}

#[derive(Debug, Deserialize)]
struct GremlinResponse {
    status: GremlinStatus,
    #[serde(default)]
    result: Option<GremlinResult>,
}

#[derive(Debug, Deserialize)]
struct GremlinStatus {
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GremlinResult {
    #[serde(default)]
    data: Value,
}

/// Best-effort extraction of the server's error message from a body
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<GremlinResponse>(body)
        .ok()
        .map(|r| r.status.message)
        .filter(|m| !m.is_empty())
        .or_else(|| {
            serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// Decodes a successful response body into traversal rows
///
/// Accepts untyped GraphSON (1.0) as well as typed GraphSON 2/3 payloads.
pub fn decode_response(body: &str) -> Result<TraversalResult, GraphStoreError> {
    let response: GremlinResponse =
        serde_json::from_str(body).map_err(|e| GraphStoreError::Decode(e.to_string()))?;

    match response.status.code {
        200 => {}
        204 => return Ok(Vec::new()),
        code => {
            return Err(GraphStoreError::Status {
                code,
                message: response.status.message,
            })
        }
    }

    let data = response
        .result
        .map(|r| normalize_graphson(r.data))
        .unwrap_or(Value::Null);

    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(rows) => rows.into_iter().map(decode_row).collect(),
        other => Err(GraphStoreError::Decode(format!(
            "expected a list of rows, got {}",
            other
        ))),
    }
}

fn decode_row(row: Value) -> Result<TraversalRow, GraphStoreError> {
    let mut row = match row {
        Value::Object(map) => map,
        other => {
            return Err(GraphStoreError::Decode(format!(
                "expected an object row, got {}",
                other
            )))
        }
    };

    let repository = take_object(&mut row, REPO_STEP)?;
    let edge = take_object(&mut row, EDGE_STEP)?;
    let package = take_object(&mut row, PACKAGE_STEP)?;

    let label = edge
        .get("label")
        .map(scalar_to_string)
        .ok_or_else(|| GraphStoreError::Decode("edge without label".to_string()))?;
    let id = edge.get("id").map(scalar_to_string);

    Ok(TraversalRow::new(
        vertex_properties(repository),
        EdgeRecord::new(id, &label),
        vertex_properties(package),
    ))
}

fn take_object(row: &mut Map<String, Value>, key: &str) -> Result<Map<String, Value>, GraphStoreError> {
    match row.remove(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(GraphStoreError::Decode(format!(
            "'{}' is not an object: {}",
            key, other
        ))),
        None => Err(GraphStoreError::Decode(format!("row has no '{}' entry", key))),
    }
}

fn vertex_properties(map: Map<String, Value>) -> VertexProperties {
    let properties: HashMap<String, Vec<String>> = map
        .into_iter()
        .map(|(key, value)| {
            let values = match value {
                Value::Array(items) => items.iter().map(scalar_to_string).collect(),
                Value::Null => Vec::new(),
                scalar => vec![scalar_to_string(&scalar)],
            };
            (key, values)
        })
        .collect();
    VertexProperties::from_map(properties)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strips GraphSON 2/3 type wrappers (`{"@type": ..., "@value": ...}`)
fn normalize_graphson(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("@type") && map.contains_key("@value") => {
            let type_name = map
                .get("@type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let inner = map.remove("@value").unwrap_or(Value::Null);
            match (type_name.as_str(), inner) {
                ("g:Map", Value::Array(pairs)) => {
                    let mut object = Map::new();
                    let mut iter = pairs.into_iter();
                    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
                        let key = scalar_to_string(&normalize_graphson(key));
                        object.insert(key, normalize_graphson(value));
                    }
                    Value::Object(object)
                }
                (_, inner) => normalize_graphson(inner),
            }
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_graphson(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_graphson).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulnerability_report::domain::DependencyList;

    fn plan() -> SyncPlan {
        SyncPlan::build(
            "github.com/x/y'); g.V().drop(); ('",
            &DependencyList::new(
                vec!["npm::lodash:4.0.0".to_string()],
                vec!["maven:io.netty:netty-all:4.1.0".to_string()],
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_user_values_only_travel_in_bindings() {
        let request = GremlinRequest::for_plan(&plan());

        assert!(!request.gremlin.contains("github.com"));
        assert!(!request.gremlin.contains("lodash"));
        assert_eq!(
            request.bindings[REPO_URL_BINDING],
            json!("github.com/x/y'); g.V().drop(); ('")
        );
        assert_eq!(
            request.bindings[EDGE_REQUESTS_BINDING],
            json!([
                {"label": "has_dependency", "ecosystem": "npm", "name": "lodash", "version": "4.0.0"},
                {"label": "has_transitive_dependency", "ecosystem": "maven", "name": "io.netty:netty-all", "version": "4.1.0"}
            ])
        );
    }

    #[test]
    fn test_every_edge_request_is_bound() {
        let direct: Vec<String> = (0..50).map(|i| format!("npm::pkg-{}:1.0.{}", i, i)).collect();
        let plan = SyncPlan::build("github.com/x/y", &DependencyList::new(direct, vec![])).unwrap();

        let request = GremlinRequest::for_plan(&plan);

        let bound = request.bindings[EDGE_REQUESTS_BINDING].as_array().unwrap();
        assert_eq!(bound.len(), plan.edges().len());
        assert_eq!(bound.len(), 50);
        assert_eq!(bound[49]["name"], json!("pkg-49"));
    }

    #[test]
    fn test_script_follows_protocol_order() {
        let script = sync_script();
        let upsert = script.find("orElseGet").unwrap();
        let drop = script.find(".drop()").unwrap();
        let relink = script.find("addEdge").unwrap();
        let select = script.find("select('rp', 'ed', 'epv')").unwrap();
        assert!(upsert < drop && drop < relink && relink < select);
        assert!(script.contains("outE('has_dependency', 'has_transitive_dependency').drop()"));
        assert!(script.contains("by(valueMap(true))"));
    }

    #[test]
    fn test_decode_graphson_v1_rows() {
        let body = json!({
            "requestId": "abc",
            "status": {"code": 200, "message": "", "attributes": {}},
            "result": {"data": [{
                "rp": {"id": 4144, "label": "vertex", "vertex_label": ["Repo"], "repo_url": ["github.com/x/y"]},
                "ed": {"id": "2dd-36w-b2t-6hs", "label": "has_dependency"},
                "epv": {"id": 8328, "label": "vertex", "pecosystem": ["npm"], "pname": ["lodash"],
                        "version": ["4.0.0"], "cve_ids": ["CVE-2020-8203:7.4"]}
            }], "meta": {}}
        })
        .to_string();

        let rows = decode_response(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].repo_url().unwrap(), "github.com/x/y");
        assert_eq!(rows[0].edge.label, "has_dependency");
        assert_eq!(rows[0].edge.id.as_deref(), Some("2dd-36w-b2t-6hs"));
        assert_eq!(rows[0].name().unwrap(), "lodash");
        assert_eq!(rows[0].cve_annotations(), &["CVE-2020-8203:7.4".to_string()]);
        assert_eq!(rows[0].repository.single("id"), Some("4144"));
    }

    #[test]
    fn test_decode_graphson_v3_typed_rows() {
        let body = json!({
            "status": {"code": 200, "message": ""},
            "result": {"data": {"@type": "g:List", "@value": [{
                "@type": "g:Map",
                "@value": [
                    "rp", {"@type": "g:Map", "@value": [
                        {"@type": "g:T", "@value": "id"}, {"@type": "g:Int64", "@value": 4144},
                        "repo_url", {"@type": "g:List", "@value": ["github.com/x/y"]}
                    ]},
                    "ed", {"@type": "g:Map", "@value": [
                        {"@type": "g:T", "@value": "label"}, "has_transitive_dependency"
                    ]},
                    "epv", {"@type": "g:Map", "@value": [
                        "pecosystem", {"@type": "g:List", "@value": ["maven"]},
                        "pname", {"@type": "g:List", "@value": ["io.netty:netty-all"]},
                        "version", {"@type": "g:List", "@value": ["4.1.0"]}
                    ]}
                ]
            }]}}
        })
        .to_string();

        let rows = decode_response(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].repository.single("id"), Some("4144"));
        assert!(rows[0].edge.is_transitive());
        assert_eq!(rows[0].ecosystem().unwrap(), "maven");
        assert!(rows[0].cve_annotations().is_empty());
    }

    #[test]
    fn test_decode_no_content() {
        let body = json!({"status": {"code": 204, "message": ""}, "result": {"data": null}}).to_string();
        assert!(decode_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_decode_error_status_in_body() {
        let body = json!({"status": {"code": 597, "message": "No such property: graph"}}).to_string();
        assert_eq!(
            decode_response(&body).unwrap_err(),
            GraphStoreError::Status {
                code: 597,
                message: "No such property: graph".to_string()
            }
        );
    }

    #[test]
    fn test_decode_malformed_bodies() {
        assert!(matches!(
            decode_response("<html>oops</html>"),
            Err(GraphStoreError::Decode(_))
        ));

        let missing_edge = json!({
            "status": {"code": 200},
            "result": {"data": [{"rp": {}, "epv": {}}]}
        })
        .to_string();
        assert!(matches!(
            decode_response(&missing_edge),
            Err(GraphStoreError::Decode(msg)) if msg.contains("'ed'")
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message": "Invalid script"}"#),
            "Invalid script"
        );
        assert_eq!(
            error_message(r#"{"status": {"code": 500, "message": "Timeout"}}"#),
            "Timeout"
        );
        assert_eq!(error_message("plain text"), "plain text");
    }
}
