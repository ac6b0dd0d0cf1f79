//! Required cloud resources
//!
//! A requirement names a resource the application expects to exist in the
//! target account. The catalog of requirements is static application data,
//! never user input.

use serde::{Deserialize, Serialize};

/// Kind of resource a requirement refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Object-storage bucket (S3)
    Bucket,
    /// Key-value table (DynamoDB)
    Table,
}

impl ResourceKind {
    /// Human readable service label used in issue messages
    pub fn service_label(&self) -> &'static str {
        match self {
            ResourceKind::Bucket => "S3 bucket",
            ResourceKind::Table => "DynamoDB table",
        }
    }

    /// Suffix appended to stack template logical ids
    pub fn logical_suffix(&self) -> &'static str {
        match self {
            ResourceKind::Bucket => "Bucket",
            ResourceKind::Table => "Table",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Bucket => write!(f, "bucket"),
            ResourceKind::Table => write!(f, "table"),
        }
    }
}

/// A single required resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfrastructureRequirement {
    /// Resource name as it exists in the provider (bucket name, table name)
    pub name: String,

    /// Resource kind
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

impl InfrastructureRequirement {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn bucket(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Bucket)
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Table)
    }

    /// Issue line reported when this requirement is not met
    pub fn missing_message(&self) -> String {
        format!(
            "{} '{}' does not exist",
            self.kind.service_label(),
            self.name
        )
    }

    /// CloudFormation logical id (`agent_tasks` -> `AgentTasksTable`)
    pub fn logical_id(&self) -> String {
        let mut id = String::with_capacity(self.name.len() + 6);
        for part in self
            .name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|p| !p.is_empty())
        {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                id.push(first.to_ascii_uppercase());
                id.extend(chars);
            }
        }
        id.push_str(self.kind.logical_suffix());
        id
    }
}

impl std::fmt::Display for InfrastructureRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}
