//! UUID generation tool definition.
//!
//! Versions 1 (time-based), 3 (MD5), 4 (random) and 5 (SHA-1). The
//! hash-based versions need a namespace and a name; when generating several
//! of them the name gets an iteration suffix so each UUID differs.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::tools::{ToolDescriptor, ToolError, parse_params};

/// Parameters for the UUID generation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GenerateUuidParams {
    /// Number of UUIDs to generate, optional, defaults to 1, max 1000.
    #[serde(default = "default_count")]
    pub count: i64,

    /// UUID version (1, 3, 4, or 5), optional, defaults to 4 (random).
    #[serde(default = "default_version")]
    pub version: i64,

    /// Namespace UUID (required for versions 3 and 5). Must be a valid UUID
    /// string or one of the predefined namespaces: 'dns', 'url', 'oid',
    /// 'x500'.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Name string (required for versions 3 and 5).
    #[serde(default)]
    pub name: Option<String>,
}

fn default_count() -> i64 {
    1
}

fn default_version() -> i64 {
    4
}

/// UUID generation tool.
pub struct GenerateUuidTool;

impl GenerateUuidTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_uuid";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generates one or multiple UUIDs with the specified version, defaults to one UUID of version 4 (random). Returns a list of UUID strings.";

    /// Execute the tool logic.
    pub async fn execute(params: GenerateUuidParams) -> Result<serde_json::Value, ToolError> {
        if !(1..=1000).contains(&params.count) {
            return Err(ToolError::invalid_arguments(
                "Count must be a positive integer between 1 and 1000",
            ));
        }
        if ![1, 3, 4, 5].contains(&params.version) {
            return Err(ToolError::invalid_arguments(
                "UUID version must be an integer of 1, 3, 4, or 5",
            ));
        }

        let hashed = match params.version {
            3 | 5 => {
                let (Some(namespace), Some(name)) = (&params.namespace, &params.name) else {
                    return Err(ToolError::invalid_arguments(format!(
                        "Version {} requires both namespace and name parameters",
                        params.version
                    )));
                };
                Some((resolve_namespace(namespace)?, name.as_str()))
            }
            _ => None,
        };

        let count = params.count as usize;
        let mut uuids = Vec::with_capacity(count);
        for i in 0..count {
            let u = match (params.version, hashed) {
                (1, _) => time_based_uuid(),
                (3, Some((namespace, name))) => {
                    Uuid::new_v3(&namespace, iterated_name(name, i, count).as_bytes())
                }
                (5, Some((namespace, name))) => {
                    Uuid::new_v5(&namespace, iterated_name(name, i, count).as_bytes())
                }
                _ => Uuid::new_v4(),
            };
            uuids.push(u.to_string());
        }

        Ok(serde_json::json!({ "uuids": uuids }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateUuidParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create the registry descriptor for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::to_tool(),
            Arc::new(|args| {
                async move {
                    let params: GenerateUuidParams = parse_params(args)?;
                    Self::execute(params).await
                }
                .boxed()
            }),
        )
    }
}

fn resolve_namespace(namespace: &str) -> Result<Uuid, ToolError> {
    match namespace {
        "dns" => return Ok(Uuid::NAMESPACE_DNS),
        "url" => return Ok(Uuid::NAMESPACE_URL),
        "oid" => return Ok(Uuid::NAMESPACE_OID),
        "x500" => return Ok(Uuid::NAMESPACE_X500),
        _ => {}
    }
    let raw = namespace.strip_prefix("urn:uuid:").unwrap_or(namespace);
    Uuid::parse_str(raw).map_err(|_| {
        ToolError::invalid_arguments(
            "Invalid namespace UUID string, must be a valid UUID string or one of the predefined namespaces: 'dns', 'url', 'oid', 'x500'",
        )
    })
}

/// Hash-based versions are deterministic over (namespace, name), so batches
/// suffix the name with the iteration index to keep every UUID distinct.
fn iterated_name(name: &str, i: usize, count: usize) -> String {
    if count > 1 {
        format!("{name}_{i}")
    } else {
        name.to_string()
    }
}

fn time_based_uuid() -> Uuid {
    // A random node id stands in for the MAC address
    let random = Uuid::new_v4();
    let mut node = [0u8; 6];
    node.copy_from_slice(&random.as_bytes()[..6]);
    Uuid::now_v1(&node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn run(args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: GenerateUuidParams = serde_json::from_value(args).unwrap();
        GenerateUuidTool::execute(params).await
    }

    fn uuids(value: &serde_json::Value) -> Vec<String> {
        value["uuids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_default_single_v4() {
        let value = run(json!({})).await.unwrap();
        let list = uuids(&value);
        assert_eq!(list.len(), 1);
        let parsed = Uuid::parse_str(&list[0]).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[tokio::test]
    async fn test_batch_v4_all_distinct() {
        let value = run(json!({"count": 50})).await.unwrap();
        let list = uuids(&value);
        assert_eq!(list.len(), 50);
        let unique: std::collections::HashSet<_> = list.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[tokio::test]
    async fn test_v5_deterministic() {
        let args = json!({"version": 5, "namespace": "dns", "name": "example.com"});
        let first = uuids(&run(args.clone()).await.unwrap());
        let second = uuids(&run(args).await.unwrap());
        assert_eq!(first, second);
        // Well-known v5 of (NAMESPACE_DNS, "example.com")
        assert_eq!(first[0], "cfbff0d1-9375-5685-968c-48ce8b15ae17");
    }

    #[tokio::test]
    async fn test_v3_batch_distinct() {
        let value = run(json!({
            "version": 3, "namespace": "url", "name": "x", "count": 3,
        }))
        .await
        .unwrap();
        let list = uuids(&value);
        let unique: std::collections::HashSet<_> = list.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[tokio::test]
    async fn test_v1_has_version_1() {
        let value = run(json!({"version": 1})).await.unwrap();
        let parsed = Uuid::parse_str(&uuids(&value)[0]).unwrap();
        assert_eq!(parsed.get_version_num(), 1);
    }

    #[tokio::test]
    async fn test_custom_namespace_with_urn_prefix() {
        let value = run(json!({
            "version": 5,
            "namespace": "urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "name": "example.com",
        }))
        .await
        .unwrap();
        // urn form of NAMESPACE_DNS resolves to the same namespace
        assert_eq!(uuids(&value)[0], "cfbff0d1-9375-5685-968c-48ce8b15ae17");
    }

    #[tokio::test]
    async fn test_invalid_version_rejected() {
        let err = run(json!({"version": 2})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_count_out_of_range() {
        let err = run(json!({"count": 0})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        let err = run(json!({"count": 1001})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_v5_requires_namespace_and_name() {
        let err = run(json!({"version": 5, "name": "x"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_bad_namespace_rejected() {
        let err = run(json!({"version": 3, "namespace": "nope", "name": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
