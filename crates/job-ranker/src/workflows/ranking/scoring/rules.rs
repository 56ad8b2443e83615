use crate::workflows::ranking::domain::RawPosting;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Posting attribute a rule condition can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    CompanyName,
    Location,
    WorkType,
}

impl Field {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CompanyName => "companyName",
            Self::Location => "location",
            Self::WorkType => "workType",
        }
    }

    pub fn value(self, posting: &RawPosting) -> &str {
        match self {
            Self::Title => &posting.title,
            Self::CompanyName => &posting.company_name,
            Self::Location => &posting.location,
            Self::WorkType => &posting.work_type,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicate over a single posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Exact, case-sensitive equality.
    Equals { field: Field, value: String },
    /// Substring match against any of the needles.
    Contains {
        field: Field,
        needles: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
    All { conditions: Vec<Condition> },
}

impl Condition {
    pub fn matches(&self, posting: &RawPosting) -> bool {
        match self {
            Condition::Equals { field, value } => field.value(posting) == value.as_str(),
            Condition::Contains {
                field,
                needles,
                case_sensitive,
            } => {
                let haystack = field.value(posting);
                if *case_sensitive {
                    needles.iter().any(|needle| haystack.contains(needle.as_str()))
                } else {
                    let haystack = haystack.to_lowercase();
                    needles
                        .iter()
                        .any(|needle| haystack.contains(&needle.to_lowercase()))
                }
            }
            Condition::All { conditions } => {
                conditions.iter().all(|condition| condition.matches(posting))
            }
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            Condition::Equals { value, .. } if value.is_empty() => {
                Err("equality value must not be empty".to_string())
            }
            Condition::Equals { .. } => Ok(()),
            Condition::Contains { needles, .. } => {
                if needles.is_empty() || needles.iter().any(|needle| needle.is_empty()) {
                    Err("substring needles must be present and non-empty".to_string())
                } else {
                    Ok(())
                }
            }
            Condition::All { conditions } if conditions.is_empty() => {
                Err("conjunction must hold at least one condition".to_string())
            }
            Condition::All { conditions } => conditions.iter().try_for_each(Condition::check),
        }
    }
}

/// A condition paired with the points and explanation it awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub condition: Condition,
    pub points: u32,
    pub reason: String,
}

impl ScoringRule {
    fn new(condition: Condition, points: u32, reason: &str) -> Self {
        Self {
            condition,
            points,
            reason: reason.to_string(),
        }
    }
}

/// Mutually exclusive rules; the first match in order is the only award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    pub rules: Vec<ScoringRule>,
}

impl RuleGroup {
    pub fn first_match(&self, posting: &RawPosting) -> Option<&ScoringRule> {
        self.rules.iter().find(|rule| rule.condition.matches(posting))
    }
}

/// Ordered rule groups making up the preference rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub groups: Vec<RuleGroup>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringRules {
    /// Work arrangement, role fit, and company locale, in that order.
    pub fn standard() -> Self {
        let bangalore = || Condition::Contains {
            field: Field::Location,
            needles: vec!["Bangalore".to_string()],
            case_sensitive: true,
        };

        Self {
            groups: vec![
                RuleGroup {
                    name: "work_arrangement".to_string(),
                    rules: vec![
                        ScoringRule::new(
                            Condition::Equals {
                                field: Field::WorkType,
                                value: "Remote".to_string(),
                            },
                            10,
                            "Remote position (+10)",
                        ),
                        ScoringRule::new(
                            Condition::All {
                                conditions: vec![
                                    bangalore(),
                                    Condition::Equals {
                                        field: Field::WorkType,
                                        value: "Hybrid".to_string(),
                                    },
                                ],
                            },
                            5,
                            "Hybrid in Bangalore (+5)",
                        ),
                        ScoringRule::new(bangalore(), 3, "WFO in Bangalore (+3)"),
                    ],
                },
                RuleGroup {
                    name: "role_fit".to_string(),
                    rules: vec![
                        ScoringRule::new(
                            Condition::Contains {
                                field: Field::Title,
                                needles: vec![
                                    "founder".to_string(),
                                    "founding".to_string(),
                                    "software engineer".to_string(),
                                ],
                                case_sensitive: false,
                            },
                            10,
                            "Founding/Software Engineering role (+10)",
                        ),
                        ScoringRule::new(
                            Condition::Contains {
                                field: Field::Title,
                                needles: vec!["ai engineer".to_string()],
                                case_sensitive: false,
                            },
                            5,
                            "AI Engineering role (+5)",
                        ),
                    ],
                },
                RuleGroup {
                    name: "company_locale".to_string(),
                    rules: vec![
                        ScoringRule::new(
                            Condition::Contains {
                                field: Field::CompanyName,
                                needles: vec!["United States".to_string(), "Europe".to_string()],
                                case_sensitive: false,
                            },
                            10,
                            "US/Europe based company (+10)",
                        ),
                        ScoringRule::new(
                            Condition::Contains {
                                field: Field::CompanyName,
                                needles: vec!["India".to_string()],
                                case_sensitive: true,
                            },
                            5,
                            "India based company (+5)",
                        ),
                    ],
                },
            ],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(raw)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.groups.is_empty() {
            return Err(RulesError::Invalid("rubric has no rule groups".to_string()));
        }

        for group in &self.groups {
            if group.rules.is_empty() {
                return Err(RulesError::Invalid(format!(
                    "rule group '{}' has no rules",
                    group.name
                )));
            }
            for rule in &group.rules {
                if rule.reason.trim().is_empty() {
                    return Err(RulesError::Invalid(format!(
                        "rule group '{}' has a rule without a reason",
                        group.name
                    )));
                }
                rule.condition.check().map_err(|detail| {
                    RulesError::Invalid(format!("rule group '{}': {detail}", group.name))
                })?;
            }
        }

        if self.checked_max_score().is_none() {
            return Err(RulesError::Invalid(
                "highest possible score overflows u32".to_string(),
            ));
        }

        Ok(())
    }

    /// Highest score any posting can reach under this rubric, saturating at `u32::MAX`.
    pub fn max_score(&self) -> u32 {
        self.checked_max_score().unwrap_or(u32::MAX)
    }

    fn checked_max_score(&self) -> Option<u32> {
        self.groups
            .iter()
            .filter_map(|group| group.rules.iter().map(|rule| rule.points).max())
            .try_fold(0u32, u32::checked_add)
    }
}

/// Failure to load or accept a rubric.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read scoring rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("scoring rules are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scoring rules rejected: {0}")]
    Invalid(String),
}
