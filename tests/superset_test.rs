use anyhow::Result;
use refdata::config::Paths;
use refdata::pipeline;
use refdata::registry::TransformRegistry;
use refdata::tabular;
use refdata::transforms::TransformContext;
use refdata::validate;
use std::fs;
use tempfile::tempdir;

fn write_source(paths: &Paths, relative: &str, content: &str) {
    let path = paths.source_file(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_superset_union_tags_canonical_rows() -> Result<()> {
    let temp_dir = tempdir()?;
    let paths = Paths::rooted_at(temp_dir.path());
    write_source(
        &paths,
        "Onet/Occupations.tsv",
        "code\ttitle\tdescription\n11-1011.00\tChief Executives\tDetermine and formulate policies\n",
    );

    let registry = TransformRegistry::new();
    let ctx = TransformContext {
        paths: paths.clone(),
    };
    // jobs runs after onet, reading its freshly written output
    let summary = pipeline::run_transforms(
        &registry,
        &["onet".to_string(), "jobs".to_string()],
        &ctx,
    )
    .await;
    assert!(summary.failed_sources().is_empty());

    let jobs = tabular::read_tsv(&paths.entity_file("Jobs", "Job"))?;
    assert_eq!(
        jobs.headers,
        vec!["ns", "type", "id", "name", "description", "code", "sameAs"]
    );

    // Canonical-then-additional ordering: the canonical occupation is first
    let canonical = &jobs.rows[0];
    assert_eq!(canonical.get("id"), "Chief_Executives");
    assert_eq!(canonical.get("sameAs"), "Onet:Occupation:Chief_Executives");
    assert_eq!(canonical.get("code"), "11-1011.00");

    // Hand-curated additions carry no sameAs reference
    let additions: Vec<_> = jobs
        .rows
        .iter()
        .filter(|row| row.get("sameAs").is_empty())
        .collect();
    assert!(!additions.is_empty());
    assert!(additions.iter().any(|row| row.get("id") == "Prompt_Engineer"));

    // Category taxonomy and membership edges come from the additions only
    let categories = tabular::read_tsv(&paths.entity_file("Jobs", "JobCategory"))?;
    assert!(categories
        .rows
        .iter()
        .any(|row| row.get("id") == "Technology"));

    let edges = tabular::read_tsv(&paths.relationship_file("Jobs", "Job", "JobCategory"))?;
    assert!(edges
        .rows
        .iter()
        .all(|row| row.get("relationshipType") == "belongs_to"));
    assert!(edges
        .rows
        .iter()
        .all(|row| row.get("fromId") != "Chief_Executives"));
    Ok(())
}

#[tokio::test]
async fn test_superset_skips_gracefully_without_canonical_table() -> Result<()> {
    let temp_dir = tempdir()?;
    let paths = Paths::rooted_at(temp_dir.path());

    let registry = TransformRegistry::new();
    let ctx = TransformContext {
        paths: paths.clone(),
    };
    let summary = pipeline::run_transforms(&registry, &["jobs".to_string()], &ctx).await;
    assert!(summary.failed_sources().is_empty());

    // Only the hand-curated entries are present
    let jobs = tabular::read_tsv(&paths.entity_file("Jobs", "Job"))?;
    assert!(jobs.rows.iter().all(|row| row.get("sameAs").is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_validation_pass_over_full_run() -> Result<()> {
    let temp_dir = tempdir()?;
    let paths = Paths::rooted_at(temp_dir.path());
    write_source(
        &paths,
        "Onet/Occupations.tsv",
        "code\ttitle\tdescription\n11-1011.00\tChief Executives\tDetermine and formulate policies\n",
    );
    write_source(
        &paths,
        "W3c/HtmlElements.tsv",
        "element\tdescription\tcategory\nsection\tGeneric document section\tSectioning content\n\
         nav\tSection with navigation links\tSectioning content\n",
    );

    let registry = TransformRegistry::new();
    let ctx = TransformContext {
        paths: paths.clone(),
    };
    let selected: Vec<String> = registry
        .list_sources()
        .iter()
        .map(|s| s.to_string())
        .collect();
    pipeline::run_transforms(&registry, &selected, &ctx).await;

    let report = validate::check_references(&paths)?;
    assert!(report.edges_checked > 0);
    assert!(report.is_clean(), "dangling: {:?}", report.dangling);
    Ok(())
}
