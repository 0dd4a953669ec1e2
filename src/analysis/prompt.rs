//! Prompts for repository analysis and workflow generation

use super::types::{PipelineStep, ProjectAnalysis};
use crate::repo::RepoLocator;
use std::fmt::Write;

/// System prompt for the analysis stage
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a senior DevOps engineer who designs CI/CD pipelines.

You receive a snapshot of the CI/CD configuration and dependency files of a repository.
Identify the technology stack, the project type and the runtime versions, then propose
the ordered list of CI pipeline steps that fit this project.

Rules:
- Respond with a single JSON object and nothing else
- Do not wrap the JSON in explanations
- Use only information present in the snapshot; use "unknown" for versions you cannot determine
- Every step category must be one of: Setup, Build, Test, Deploy, Optimization
- Step ids are unique snake_case identifiers
- Every step has a concrete shell command in default_command"#;

/// System prompt for the generation stage
pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are a senior DevOps engineer who writes GitHub Actions workflows.

You receive a project analysis and the pipeline steps the user approved. Produce a
complete, valid GitHub Actions workflow implementing exactly those steps, together with
the manual setup the user must perform (secrets, environments, repository settings).

Respond with a single JSON object and nothing else."#;

const ANALYSIS_SCHEMA: &str = r#"{
  "project_analysis": {
    "repo_url": "<repository URL>",
    "branch": "<branch>",
    "tech_stack": [{"name": "<technology>", "version": "<version>"}],
    "project_type": "<e.g. web application, library, CLI tool>",
    "runtime_versions": [{"name": "<runtime>", "version": "<version>"}]
  },
  "ci_pipeline_steps": [
    {
      "id": "<snake_case_id>",
      "name": "<short name>",
      "description": "<what the step does>",
      "category": "Setup | Build | Test | Deploy | Optimization",
      "default_command": "<shell command>",
      "optional": false
    }
  ]
}"#;

const GENERATION_SCHEMA: &str = r#"{
  "github_actions_yaml": "<complete workflow file contents>",
  "manual_instructions": "<markdown setup instructions>",
  "suggestions": ["<optional improvement>"]
}"#;

/// Action versions the generated workflow must pin
pub const PINNED_ACTIONS: &[(&str, &str)] = &[
    ("checkout", "actions/checkout@v4"),
    ("Node.js setup", "actions/setup-node@v4"),
    ("Python setup", "actions/setup-python@v5"),
    ("Java setup", "actions/setup-java@v4"),
];

pub const RUNNER_IMAGE: &str = "ubuntu-latest";

pub const WORKFLOW_NAME: &str = "CI";

/// User prompt for the analysis stage
pub fn analysis_prompt(repo_url: &str, locator: &RepoLocator, snapshot: &str) -> String {
    format!(
        r#"Repository: {repo_url}
Owner: {owner}
Name: {repo}
Branch: {branch}

Repository snapshot:
{snapshot}

Return JSON with exactly this structure:
{schema}"#,
        repo_url = repo_url,
        owner = locator.owner,
        repo = locator.repo,
        branch = locator.branch,
        snapshot = snapshot,
        schema = ANALYSIS_SCHEMA,
    )
}

/// Renders the analysis and steps; steps keep the order they were given in
pub fn render_generation_context(analysis: &ProjectAnalysis, steps: &[PipelineStep]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Repository: {}", analysis.repo_url);
    let _ = writeln!(out, "Branch: {}", analysis.branch);
    let _ = writeln!(out, "Project type: {}", analysis.project_type);

    let _ = writeln!(out, "Tech stack:");
    for item in &analysis.tech_stack {
        let _ = writeln!(out, "- {}: {}", item.name, item.version);
    }

    let _ = writeln!(out, "Runtime versions:");
    for item in &analysis.runtime_versions {
        let _ = writeln!(out, "- {}: {}", item.name, item.version);
    }

    let _ = writeln!(out, "Selected steps:");
    for (index, step) in steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {}{}",
            index + 1,
            step.category,
            step.name,
            if step.optional { " (optional)" } else { "" }
        );
        let _ = writeln!(out, "   Description: {}", step.description);
        let _ = writeln!(out, "   Command: {}", step.default_command);
    }

    out
}

/// User prompt for the generation stage
pub fn generation_prompt(analysis: &ProjectAnalysis, steps: &[PipelineStep]) -> String {
    let mut requirements = String::new();
    let _ = writeln!(requirements, "- The workflow name must be \"{}\"", WORKFLOW_NAME);
    let _ = writeln!(
        requirements,
        "- Trigger on push to the \"{}\" branch",
        analysis.branch
    );
    let _ = writeln!(requirements, "- Run on {}", RUNNER_IMAGE);
    let _ = writeln!(
        requirements,
        "- Each step must run its given command verbatim, in the given order"
    );
    for (purpose, action) in PINNED_ACTIONS {
        let _ = writeln!(requirements, "- Use {} for {} when needed", action, purpose);
    }

    format!(
        r#"{context}
Requirements:
{requirements}
Return JSON with exactly this structure:
{schema}"#,
        context = render_generation_context(analysis, steps),
        requirements = requirements,
        schema = GENERATION_SCHEMA,
    )
}
