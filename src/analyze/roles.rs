//! Rule-based role classification.
//!
//! The taxonomy is an ordered list of `(role, [pattern, ...])`. Evaluation
//! lowercases `title + description + source` and walks roles in declaration
//! order, and patterns within a role in order; the first pattern found
//! anywhere in the text decides. There is no scoring.
//!
//! Fallback when nothing matches: text mentioning "arxiv" → `Analyst`,
//! everything else → `Architect`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ingest::types::Record;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Planning, structuring, orchestration.
    Architect,
    /// Development and automation.
    Builder,
    /// Deployment, monitoring, MLOps.
    Operator,
    /// Research and data.
    Analyst,
    /// Evaluation, verification, safety.
    Evaluator,
    /// Education, PM, documentation.
    Communicator,
}

/// Recommended skills for a role, split into technical, cognitive and
/// attitude groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillSet {
    pub tech: &'static [&'static str],
    pub cognitive: &'static [&'static str],
    pub attitude: &'static [&'static str],
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Architect,
        Role::Builder,
        Role::Operator,
        Role::Analyst,
        Role::Evaluator,
        Role::Communicator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Architect => "architect/orchestration",
            Role::Builder => "builder/automation",
            Role::Operator => "operator/deployment",
            Role::Analyst => "analyst/research",
            Role::Evaluator => "evaluator/safety",
            Role::Communicator => "communicator/education",
        }
    }

    pub fn skills(&self) -> SkillSet {
        match self {
            Role::Architect => SkillSet {
                tech: &["API/integration", "agents/workflows", "LLM/RAG"],
                cognitive: &[
                    "problem framing",
                    "structuring",
                    "systems thinking",
                    "information search",
                ],
                attitude: &["user perspective", "collaboration", "learning agility"],
            },
            Role::Builder => SkillSet {
                tech: &["Python", "API/integration", "data processing", "agents/workflows"],
                cognitive: &["structuring", "problem framing", "information search"],
                attitude: &["self-direction", "persistence", "responsibility"],
            },
            Role::Operator => SkillSet {
                tech: &["cloud/deployment", "API/integration", "security/ethics"],
                cognitive: &["systems thinking", "experimentation", "problem framing"],
                attitude: &["responsibility", "tolerance of uncertainty", "collaboration"],
            },
            Role::Analyst => SkillSet {
                tech: &["data processing", "Python", "LLM/RAG"],
                cognitive: &[
                    "experimentation",
                    "logical writing",
                    "information search",
                    "modeling/reasoning",
                ],
                attitude: &["learning agility", "persistence", "self-direction"],
            },
            Role::Evaluator => SkillSet {
                tech: &["security/ethics", "data processing", "LLM/RAG"],
                cognitive: &["experimentation", "problem framing", "logical writing"],
                attitude: &["responsibility", "tolerance of uncertainty", "user perspective"],
            },
            Role::Communicator => SkillSet {
                tech: &["API/integration", "LLM/RAG"],
                cognitive: &["logical writing", "problem framing", "information search"],
                attitude: &["collaboration", "user perspective", "responsibility"],
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Built-in ruleset, in priority order.
const BUILTIN_RULES: &[(Role, &[&str])] = &[
    (
        Role::Architect,
        &[
            r"\borchestrat",
            r"\bworkflow",
            r"\bpipeline",
            r"\bplanner",
            r"\bplanning",
            r"\barchitecture",
            r"\bdesign",
            r"\brouter",
            r"\bcoordinator",
            r"\bprompt\s*design",
        ],
    ),
    (
        Role::Builder,
        &[
            r"\bimplement",
            r"\bimplementation",
            r"\bbuild",
            r"\bdev",
            r"\bdeveloper",
            r"\bcode",
            r"\blibrary",
            r"\bsdk\b",
            r"\bapi\b",
            r"\bintegration",
            r"\bplugin",
            r"\bgithub\b",
            r"\btypescript\b",
            r"\bpython\b",
            r"\bnode\b",
        ],
    ),
    (
        Role::Operator,
        &[
            r"\bdeploy",
            r"\bdeployment",
            r"\bops\b",
            r"\bmlops\b",
            r"\bmonitor",
            r"\bobservability",
            r"\bproduction",
            r"\breliability",
            r"\binfra",
            r"\bkubernetes",
            r"\bserver",
            r"\bscaling",
            r"\blatency",
        ],
    ),
    (
        Role::Analyst,
        &[
            r"\barxiv\b",
            r"\bpaper\b",
            r"\bstudy\b",
            r"\bdata\b",
            r"\bdataset\b",
            r"\bstat",
            r"\bempirical",
            r"\bexperiment",
            r"\bmethodology",
            r"\btheory",
            r"\bsurvey\b",
        ],
    ),
    (
        Role::Evaluator,
        &[
            r"\beval",
            r"\bevaluation",
            r"\bbenchmark",
            r"\btest",
            r"\btesting",
            r"\bverification",
            r"\bvalidat",
            r"\bsafety",
            r"\balignment",
            r"\brisk",
            r"\bguardrail",
            r"\bpolicy",
        ],
    ),
    (
        Role::Communicator,
        &[
            r"\bguide\b",
            r"\btutorial",
            r"\bexplainer",
            r"\bdocument",
            r"\bdocumentation",
            r"\bcommunity",
            r"\bproduct",
            r"\bpm\b",
            r"\bteaching",
            r"\bcourse",
            r"\bwriting",
        ],
    ),
];

static BUILTIN: Lazy<RoleTaxonomy> = Lazy::new(|| {
    RoleTaxonomy::from_patterns(BUILTIN_RULES).expect("built-in role patterns compile")
});

#[derive(Debug, Clone)]
struct RoleRule {
    role: Role,
    patterns: Vec<Regex>,
}

/// Ordered, compiled ruleset. First match wins.
#[derive(Debug, Clone)]
pub struct RoleTaxonomy {
    rules: Vec<RoleRule>,
    research_fallback: Role,
    default_fallback: Role,
}

impl RoleTaxonomy {
    /// The baked-in taxonomy shared by every classification pass.
    pub fn builtin() -> &'static RoleTaxonomy {
        &BUILTIN
    }

    /// Compile an ordered ruleset. Fallbacks are `Analyst` (arxiv text) and
    /// `Architect` (everything else).
    pub fn from_patterns(rules: &[(Role, &[&str])]) -> anyhow::Result<Self> {
        let rules = rules
            .iter()
            .map(|(role, pats)| {
                let patterns = pats
                    .iter()
                    .map(|p| {
                        Regex::new(p)
                            .map_err(|e| anyhow::anyhow!("role `{}` regex error: {}", role, e))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(RoleRule {
                    role: *role,
                    patterns,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            rules,
            research_fallback: Role::Analyst,
            default_fallback: Role::Architect,
        })
    }

    /// Roles in priority order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.rules.iter().map(|r| r.role)
    }

    /// Classify free text. Total: always returns a role.
    pub fn classify(&self, title: &str, description: &str, source: &str) -> Role {
        let text = format!("{} {} {}", title, description, source).to_lowercase();
        for rule in &self.rules {
            if rule.patterns.iter().any(|re| re.is_match(&text)) {
                return rule.role;
            }
        }
        if text.contains("arxiv") {
            self.research_fallback
        } else {
            self.default_fallback
        }
    }
}

/// Classify with the built-in taxonomy.
pub fn classify_role(title: &str, description: &str, source: &str) -> Role {
    RoleTaxonomy::builtin().classify(title, description, source)
}

/// Re-classify an existing record (e.g. ad hoc, or against another taxonomy).
pub fn classify_record(record: &Record, taxonomy: &RoleTaxonomy) -> Role {
    taxonomy.classify(&record.title, &record.description, &record.source)
}
