use std::collections::HashMap;

use esnap_template::{RenderError, TemplateEngine};
use reqwest::Method;

/// An immutable request template: HTTP verb, path pattern and optional body
/// pattern, both with `{{name}}` placeholders.
#[derive(Debug, Clone)]
pub struct RequestDefinition {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<&'static str>,
}

impl RequestDefinition {
    /// Substitutes every placeholder in the path and body templates from
    /// `params`.
    pub fn render(
        &self,
        engine: &TemplateEngine,
        params: &HashMap<String, String>,
    ) -> Result<(String, Option<String>), RenderError> {
        let path = engine.render(self.path, params)?;
        let body = self.body.map(|b| engine.render(b, params)).transpose()?;
        Ok((path, body))
    }
}

pub const CHECK_REPO: RequestDefinition = RequestDefinition {
    method: Method::GET,
    path: "_snapshot/{{repo_name}}",
    body: None,
};

pub const CREATE_REPO: RequestDefinition = RequestDefinition {
    method: Method::PUT,
    path: "_snapshot/{{repo_name}}",
    body: Some(
        r#"{"type":"s3","settings":{"bucket":"{{bucket_name}}","base_path":"{{base_path}}","region":"{{region}}"}}"#,
    ),
};

pub const CREATE_SNAPSHOT: RequestDefinition = RequestDefinition {
    method: Method::PUT,
    path: "_snapshot/{{repo_name}}/{{snapshot_name}}?wait_for_completion=true",
    body: None,
};

pub const LIST_SNAPSHOTS: RequestDefinition = RequestDefinition {
    method: Method::GET,
    path: "_snapshot/{{repo_name}}/_all",
    body: None,
};

pub const RESTORE_SNAPSHOT: RequestDefinition = RequestDefinition {
    method: Method::POST,
    path: "_snapshot/{{repo_name}}/{{snapshot_name}}/_restore",
    body: None,
};

pub const DELETE_SNAPSHOT: RequestDefinition = RequestDefinition {
    method: Method::DELETE,
    path: "_snapshot/{{repo_name}}/{{snapshot_name}}",
    body: None,
};

pub const MASTER_NODE: RequestDefinition = RequestDefinition {
    method: Method::GET,
    path: "_cluster/state/master_node",
    body: None,
};

pub const LOCAL_NODES: RequestDefinition = RequestDefinition {
    method: Method::GET,
    path: "_nodes/_local",
    body: None,
};
