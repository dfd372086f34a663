//! Project entities and the ordered registry

use tracing::debug;

use crate::Result;
use crate::error::CoreError;

/// A named unit of source code with a repository locator and an ordered
/// list of buildable tools. Immutable once constructed; entities are
/// created by the loader during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    tools: Vec<String>,
    repository: String,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        tools: Vec<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tools,
            repository: repository.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }
}

/// Ordered, name-keyed collection of projects.
///
/// Registration order is preserved; tool-ownership lookups walk the
/// registry in that order.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project. A duplicate name is rejected and leaves the
    /// registry unchanged.
    pub fn register(&mut self, project: Project) -> Result<()> {
        if self.lookup(project.name()).is_some() {
            return Err(CoreError::DuplicateProject(project.name().to_string()));
        }

        debug!("registered project '{}'", project.name());
        self.projects.push(project);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name() == name)
    }

    /// First project, in registration order, whose tool list contains
    /// the given tool.
    pub fn find_tool_owner(&self, tool: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.has_tool(tool))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
