//! Infrastructure stack template rendering
//!
//! Renders a CloudFormation document that creates exactly the resources a
//! readiness check found missing.

use crate::error::{CoreError, Result};
use adeptflow_cloud::InfrastructureRequirement;
use serde::Serialize;
use std::collections::HashSet;
use tera::{Context, Tera};
use tracing::debug;

/// File name the stack template is saved under
pub const STACK_TEMPLATE_FILENAME: &str = "adeptai-infrastructure.yml";

const STACK_TEMPLATE: &str = include_str!("../../templates/infrastructure.yml.tera");

#[derive(Serialize)]
struct StackResource<'a> {
    logical_id: String,
    name: &'a str,
    kind: String,
}

/// Render the stack template for the given missing requirements
///
/// Output depends only on `missing` and its order. Names that map to the
/// same logical id get a numeric suffix (`AgentTasksTable2`).
pub fn render_stack_template(missing: &[InfrastructureRequirement]) -> Result<String> {
    let mut taken = HashSet::new();
    let resources: Vec<StackResource<'_>> = missing
        .iter()
        .map(|requirement| StackResource {
            logical_id: unique_logical_id(requirement.logical_id(), &mut taken),
            name: &requirement.name,
            kind: requirement.kind.to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("resources", &resources);

    let rendered = Tera::default()
        .render_str(STACK_TEMPLATE, &context)
        .map_err(|e| CoreError::TemplateRender(tera_error_detail(&e)))?;

    debug!(resources = resources.len(), "Rendered stack template");
    Ok(rendered)
}

fn unique_logical_id(base: String, taken: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 2;
    while !taken.insert(id.clone()) {
        id = format!("{base}{n}");
        n += 1;
    }
    id
}

fn tera_error_detail(e: &tera::Error) -> String {
    use std::error::Error;

    let mut details = vec![e.to_string()];
    let mut source = e.source();
    while let Some(err) = source {
        details.push(err.to_string());
        source = err.source();
    }
    details.join(" | ")
}
