//! Keyword-pattern inference over raw answers.
//!
//! Each service tag carries a table of rule groups. A group holds ordered
//! alternatives (keyword set, derived pairs) and an optional fallback that
//! fires when no alternative matches. Answers are scanned in order; a later
//! answer deriving the same key overwrites the earlier value.
//!
//! The tables are data, not control flow: reordering a table entry reorders
//! the rules without touching the scan logic.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerRecord, AnswerSet};

/// A configuration value derived from free-text answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredAssignment {
    pub key: String,
    pub value: String,
    pub service: String,
}

/// One keyword alternative: any keyword present in the lowercased answer
/// text emits all derived pairs.
struct Alternative {
    keywords: &'static [&'static str],
    derived: &'static [(&'static str, &'static str)],
}

/// A rule group: first matching alternative wins; otherwise the fallback
/// (possibly empty) fires.
struct RuleGroup {
    alternatives: &'static [Alternative],
    fallback: &'static [(&'static str, &'static str)],
}

struct ServiceRules {
    service: &'static str,
    groups: &'static [RuleGroup],
}

const VPC_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["prod", "production"],
                derived: &[("vpc_environment", "production"), ("vpc_enable_flow_logs", "true")],
            },
            Alternative {
                keywords: &["dev", "development"],
                derived: &[("vpc_environment", "development"), ("vpc_enable_flow_logs", "false")],
            },
        ],
        fallback: &[],
    },
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["large", "enterprise"],
                derived: &[("vpc_suggested_cidr", "10.0.0.0/16")],
            },
            Alternative {
                keywords: &["small", "startup"],
                derived: &[("vpc_suggested_cidr", "10.0.0.0/20")],
            },
        ],
        fallback: &[],
    },
];

const EC2_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["high performance", "compute intensive"],
                derived: &[("ec2_suggested_instance_type", "c5.large")],
            },
            Alternative {
                keywords: &["web server", "frontend", "simple"],
                derived: &[("ec2_suggested_instance_type", "t3.micro")],
            },
            Alternative {
                keywords: &["database", "memory intensive"],
                derived: &[("ec2_suggested_instance_type", "r5.large")],
            },
        ],
        fallback: &[],
    },
    RuleGroup {
        alternatives: &[Alternative {
            keywords: &["high iops", "database", "performance"],
            derived: &[("ec2_suggested_storage_type", "gp3")],
        }],
        fallback: &[("ec2_suggested_storage_type", "gp2")],
    },
];

const RDS_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["mysql"],
                derived: &[("rds_suggested_engine", "mysql"), ("rds_suggested_version", "8.0")],
            },
            Alternative {
                keywords: &["postgres"],
                derived: &[("rds_suggested_engine", "postgres"), ("rds_suggested_version", "14")],
            },
        ],
        fallback: &[],
    },
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["small", "test", "dev"],
                derived: &[("rds_suggested_instance_class", "db.t3.micro")],
            },
            Alternative {
                keywords: &["production", "large"],
                derived: &[("rds_suggested_instance_class", "db.r5.large")],
            },
        ],
        fallback: &[],
    },
];

const S3_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["archive", "backup", "long term"],
                derived: &[("s3_suggested_storage_class", "GLACIER")],
            },
            Alternative {
                keywords: &["frequent", "active"],
                derived: &[("s3_suggested_storage_class", "STANDARD")],
            },
        ],
        fallback: &[("s3_suggested_storage_class", "STANDARD_IA")],
    },
    RuleGroup {
        alternatives: &[Alternative {
            keywords: &["important", "critical", "production"],
            derived: &[("s3_enable_versioning", "true")],
        }],
        fallback: &[],
    },
];

const LAMBDA_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[
            Alternative {
                keywords: &["python"],
                derived: &[("lambda_suggested_runtime", "python3.9")],
            },
            Alternative {
                keywords: &["node", "javascript"],
                derived: &[("lambda_suggested_runtime", "nodejs18.x")],
            },
        ],
        fallback: &[],
    },
    RuleGroup {
        alternatives: &[Alternative {
            keywords: &["heavy", "processing", "compute"],
            derived: &[("lambda_suggested_memory", "1024")],
        }],
        fallback: &[("lambda_suggested_memory", "128")],
    },
];

const ALB_RULES: &[RuleGroup] = &[
    RuleGroup {
        alternatives: &[Alternative {
            keywords: &["https", "ssl", "secure", "production"],
            derived: &[("alb_enable_ssl", "true"), ("alb_suggested_certificate_type", "ACM")],
        }],
        fallback: &[],
    },
    RuleGroup {
        alternatives: &[Alternative {
            keywords: &["internal", "private"],
            derived: &[("alb_scheme", "internal")],
        }],
        fallback: &[("alb_scheme", "internet-facing")],
    },
];

const SERVICE_RULES: &[ServiceRules] = &[
    ServiceRules { service: "VPC", groups: VPC_RULES },
    ServiceRules { service: "EC2", groups: EC2_RULES },
    ServiceRules { service: "RDS", groups: RDS_RULES },
    ServiceRules { service: "S3", groups: S3_RULES },
    ServiceRules { service: "LAMBDA", groups: LAMBDA_RULES },
    ServiceRules { service: "ALB", groups: ALB_RULES },
];

/// Derive configuration values from the raw answers of one service bucket.
///
/// A service with no rule table, or answers matching nothing, yields an
/// empty result; inference never fails.
pub fn infer(service: &str, answers: &[AnswerRecord]) -> Vec<InferredAssignment> {
    let service_upper = service.to_uppercase();
    let Some(rules) = SERVICE_RULES
        .iter()
        .find(|rules| rules.service == service_upper)
    else {
        return Vec::new();
    };

    let mut derived = AnswerSet::new();
    for answer in answers {
        let text = answer.text.to_lowercase();
        for group in rules.groups {
            let matched = group
                .alternatives
                .iter()
                .find(|alt| alt.keywords.iter().any(|k| text.contains(k)));
            let pairs = match matched {
                Some(alt) => alt.derived,
                None => group.fallback,
            };
            for (key, value) in pairs {
                derived.insert(*key, *value);
            }
        }
    }

    derived
        .iter()
        .map(|(key, value)| InferredAssignment {
            key: key.to_string(),
            value: value.to_string(),
            service: service.to_string(),
        })
        .collect()
}

/// Fold raw answers and their inferred values into one configuration set.
///
/// Services are processed in first-appearance order; within each service the
/// namespaced raw answers land first, then the derived pairs.
pub fn enrich_answers(records: &[AnswerRecord]) -> AnswerSet {
    let mut services: Vec<&str> = Vec::new();
    for record in records {
        if !services.contains(&record.service.as_str()) {
            services.push(&record.service);
        }
    }

    let mut set = AnswerSet::new();
    for service in services {
        let service_records: Vec<AnswerRecord> = records
            .iter()
            .filter(|r| r.service == service)
            .cloned()
            .collect();
        for record in &service_records {
            set.insert(record.key(), record.text.clone());
        }
        for derived in infer(service, &service_records) {
            set.insert(derived.key, derived.value);
        }
    }
    set
}
