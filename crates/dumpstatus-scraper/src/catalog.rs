//! Static registry of dump jobs and the shape of their output
//!
//! Job names are the ones written to `dumpruninfo.txt`. A lookup classifies
//! a name once into a [`JobKind`]; callers never sniff suffixes themselves.
//!
//! Recombine jobs are safe to list through their base job even though not
//! every wiki runs them: if one appears in a manifest, it ran for that wiki.

/// Placeholder replaced by the part number (or nothing) in file templates
pub const PART_PLACEHOLDER: &str = "{num}";

const TABLE_SUFFIX: &str = "table";
const RECOMBINE_SUFFIX: &str = "recombine";

/// Jobs with fixed output names. If the first template of a job takes a
/// part number, they all do.
const EASY_JOBS: &[(&str, &[&str])] = &[
    ("metahistory7zdump", &["pages-meta-history{num}.xml.7z"]),
    ("metahistorybz2dump", &["pages-meta-history{num}.xml.bz2"]),
    ("metacurrentdump", &["pages-meta-current{num}.xml.bz2"]),
    ("articlesdump", &["pages-articles{num}.xml.bz2"]),
    (
        "xmlstubsdump",
        &[
            "stub-articles{num}.xml.gz",
            "stub-meta-current{num}.xml.gz",
            "stub-meta-history{num}.xml.gz",
        ],
    ),
    ("abstractsdump", &["abstract{num}.xml"]),
    (
        "articlesmultistreamdump",
        &[
            "pages-articles-multistream-index.txt.bz2",
            "pages-articles-multistream.xml.bz2",
        ],
    ),
    ("xmlpagelogsdump", &["pages-logging.xml.gz"]),
    ("allpagetitlesdump", &["all-titles-in-ns0.gz"]),
    ("pagetitlesdump", &["all-titles.gz"]),
];

/// Table dumps whose SQL table name differs from the job name
const TABLE_ALIASES: &[(&str, &str)] = &[
    ("changetags", "change_tag"),
    ("pageprops", "page_props"),
    ("pagerestrictions", "page_restrictions"),
    ("protectedtitles", "protected_titles"),
    ("sitestats", "site_stats"),
    ("usergroups", "user_groups"),
    ("geotags", "geo_tags"),
];

/// History jobs whose output names are only known by listing the directory
const CHECKPOINT_JOBS: &[(&str, &[&str])] = &[
    ("metahistory7zdump", &["pages-meta-history{num}.xml-p*p*.7z"]),
    ("metahistorybz2dump", &["pages-meta-history{num}.xml-p*p*.bz2"]),
];

/// Output shape of a catalogued job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// One `<stem>.sql.gz` file
    Table { stem: String },
    /// Fixed file templates, in declared order
    Easy { templates: &'static [&'static str] },
    /// Fixed templates plus glob templates used when checkpointing is on
    Checkpoint {
        templates: &'static [&'static str],
        globs: &'static [&'static str],
    },
}

/// Result of a catalog lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub kind: JobKind,
    /// The name carried the `recombine` suffix
    pub recombine: bool,
}

impl JobEntry {
    /// Fixed templates for non-table jobs
    pub fn templates(&self) -> &'static [&'static str] {
        match self.kind {
            JobKind::Table { .. } => &[],
            JobKind::Easy { templates } | JobKind::Checkpoint { templates, .. } => templates,
        }
    }

    /// Whether the job's output is numbered by part
    pub fn takes_part_numbers(&self) -> bool {
        self.templates()
            .first()
            .is_some_and(|template| template.contains(PART_PLACEHOLDER))
    }
}

/// Classify a job name. `None` means the catalog does not know it.
pub fn lookup(job_name: &str) -> Option<JobEntry> {
    if let Some(base) = job_name.strip_suffix(TABLE_SUFFIX) {
        return Some(JobEntry {
            kind: JobKind::Table {
                stem: table_stem(base).to_string(),
            },
            recombine: false,
        });
    }

    let (base, recombine) = match job_name.strip_suffix(RECOMBINE_SUFFIX) {
        Some(base) => (base, true),
        None => (job_name, false),
    };

    let templates = find(EASY_JOBS, base)?;
    let kind = match find(CHECKPOINT_JOBS, base) {
        Some(globs) => JobKind::Checkpoint { templates, globs },
        None => JobKind::Easy { templates },
    };

    Some(JobEntry { kind, recombine })
}

/// Every job name with fixed or checkpointed output, in catalog order
pub fn job_names() -> impl Iterator<Item = &'static str> {
    EASY_JOBS.iter().map(|(name, _)| *name)
}

fn table_stem(base: &str) -> &str {
    TABLE_ALIASES
        .iter()
        .find(|(name, _)| *name == base)
        .map_or(base, |(_, table)| *table)
}

fn find(registry: &[(&str, &'static [&'static str])], name: &str) -> Option<&'static [&'static str]> {
    registry
        .iter()
        .find(|(job, _)| *job == name)
        .map(|(_, templates)| *templates)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_job_uses_alias() {
        let entry = lookup("pagepropstable").unwrap();
        assert_eq!(
            entry.kind,
            JobKind::Table {
                stem: "page_props".to_string()
            }
        );
    }

    #[test]
    fn test_table_job_without_alias_keeps_base_name() {
        let entry = lookup("categorylinkstable").unwrap();
        assert_eq!(
            entry.kind,
            JobKind::Table {
                stem: "categorylinks".to_string()
            }
        );
    }

    #[test]
    fn test_easy_job_templates_in_declared_order() {
        let entry = lookup("xmlstubsdump").unwrap();
        assert_eq!(
            entry.templates(),
            &[
                "stub-articles{num}.xml.gz",
                "stub-meta-current{num}.xml.gz",
                "stub-meta-history{num}.xml.gz",
            ]
        );
        assert!(entry.takes_part_numbers());
        assert!(!entry.recombine);
    }

    #[test]
    fn test_recombine_resolves_through_base_job() {
        let entry = lookup("metacurrentdumprecombine").unwrap();
        assert!(entry.recombine);
        assert_eq!(entry.templates(), &["pages-meta-current{num}.xml.bz2"]);
    }

    #[test]
    fn test_history_jobs_carry_checkpoint_globs() {
        let entry = lookup("metahistory7zdump").unwrap();
        assert_eq!(
            entry.kind,
            JobKind::Checkpoint {
                templates: &["pages-meta-history{num}.xml.7z"],
                globs: &["pages-meta-history{num}.xml-p*p*.7z"],
            }
        );
    }

    #[test]
    fn test_fixed_name_jobs_take_no_part_numbers() {
        assert!(!lookup("articlesmultistreamdump").unwrap().takes_part_numbers());
        assert!(!lookup("pagetitlesdump").unwrap().takes_part_numbers());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(lookup("ArticlesDump").is_none());
        assert!(lookup("articlesdump ").is_none());
    }

    #[test]
    fn test_unknown_job() {
        assert!(lookup("noopdump").is_none());
        assert!(lookup("noopdumprecombine").is_none());
    }

    #[test]
    fn test_job_names_lists_catalog() {
        let names: Vec<_> = job_names().collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "metahistory7zdump");
    }
}
