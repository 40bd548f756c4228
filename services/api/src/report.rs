use crate::infra::{grades_from_pairs, in_memory_catalog, parse_grade_pair};
use clap::Args;
use cluster_points::catalog::{CatalogImporter, CatalogSummary, CourseCheck};
use cluster_points::eligibility::is_medicine_eligible;
use cluster_points::error::AppError;
use cluster_points::scoring::{compute_all_clusters, compute_cluster, normalize, RawGrades};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Points for one cluster plus the programmes stored under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ClusterEntry {
    pub(crate) cluster: u32,
    pub(crate) points: f64,
    pub(crate) programmes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ClusterReport {
    pub(crate) graded_subjects: usize,
    pub(crate) medicine_eligible: bool,
    pub(crate) clusters: Vec<ClusterEntry>,
}

pub(crate) fn build_cluster_report(
    grades: &RawGrades,
    programmes: &BTreeMap<u32, Vec<String>>,
) -> ClusterReport {
    let clusters = compute_all_clusters(grades)
        .into_iter()
        .map(|(cluster, points)| ClusterEntry {
            cluster,
            points,
            programmes: programmes.get(&cluster).cloned().unwrap_or_default(),
        })
        .collect();

    ClusterReport {
        graded_subjects: normalize(grades).len(),
        medicine_eligible: is_medicine_eligible(grades),
        clusters,
    }
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Subject grade as CODE=GRADE, e.g. --grade ENG=B+ (repeat for each subject)
    #[arg(long = "grade", value_parser = parse_grade_pair, required = true)]
    pub(crate) grades: Vec<(String, String)>,
    /// Course catalog CSV used to list programmes under each cluster
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogSummaryArgs {
    /// Course catalog CSV export
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogCheckArgs {
    /// Course catalog CSV export
    pub(crate) csv: PathBuf,
    /// Programme name as it appears in the catalog
    #[arg(long)]
    pub(crate) course: String,
    /// Cluster the programme is listed under
    #[arg(long)]
    pub(crate) cluster: u32,
    /// Subject grade as CODE=GRADE (repeat for each subject)
    #[arg(long = "grade", value_parser = parse_grade_pair, required = true)]
    pub(crate) grades: Vec<(String, String)>,
    /// Cluster points to compare against cut-offs (computed from the grades when omitted)
    #[arg(long)]
    pub(crate) points: Option<f64>,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs { grades, catalog } = args;
    let grades = grades_from_pairs(grades);

    let programmes = match catalog {
        Some(path) => {
            let service = in_memory_catalog();
            service.import(CatalogImporter::from_path(path)?)?;
            service.names_by_cluster()?
        }
        None => BTreeMap::new(),
    };

    let report = build_cluster_report(&grades, &programmes);
    render_cluster_report(&report);
    Ok(())
}

pub(crate) fn run_catalog_summary(args: CatalogSummaryArgs) -> Result<(), AppError> {
    let catalog = CatalogImporter::from_path(&args.csv)?;
    let summary = CatalogSummary::of(&catalog);

    println!("Course catalog: {}", args.csv.display());
    render_catalog_summary(&summary);
    for (cluster, programmes) in &catalog {
        println!("  Cluster {:>2}: {} programme(s)", cluster, programmes.len());
    }
    Ok(())
}

pub(crate) fn run_catalog_check(args: CatalogCheckArgs) -> Result<(), AppError> {
    let CatalogCheckArgs {
        csv,
        course,
        cluster,
        grades,
        points,
    } = args;
    let grades = grades_from_pairs(grades);

    let service = in_memory_catalog();
    service.import(CatalogImporter::from_path(csv)?)?;

    let points = points.unwrap_or_else(|| compute_cluster(cluster, &grades));
    let check = service.check_course(cluster, &course, points, &grades)?;
    render_course_check(&check);
    Ok(())
}

pub(crate) fn render_cluster_report(report: &ClusterReport) {
    println!("Cluster points ({} graded subjects)", report.graded_subjects);
    for entry in &report.clusters {
        println!("  Cluster {:>2}: {:>7.3}", entry.cluster, entry.points);
        for programme in &entry.programmes {
            println!("      - {}", programme);
        }
    }
    println!(
        "Medicine track: {}",
        if report.medicine_eligible {
            "eligible"
        } else {
            "not eligible (BIO, CHE, MAT and PHY required)"
        }
    );
}

pub(crate) fn render_catalog_summary(summary: &CatalogSummary) {
    println!(
        "  {} clusters, {} courses, {} university listings",
        summary.clusters, summary.courses, summary.universities
    );
}

pub(crate) fn render_course_check(check: &CourseCheck) {
    println!("{}", check.summary());
    println!("  Cluster {} points: {:.3}", check.cluster, check.points);

    if !check.subject_check.passed {
        println!("  Unmet subject requirements");
        for failure in &check.subject_check.failed {
            println!("    - {}", failure.summary());
        }
        return;
    }

    if check.qualified.is_empty() {
        println!("  Qualified: none");
    } else {
        println!("  Qualified");
        for university in &check.qualified {
            println!("    - {} (cut-off {:.3})", university.name, university.cutoff);
        }
    }

    if !check.not_qualified.is_empty() {
        println!("  Below cut-off");
        for university in &check.not_qualified {
            println!("    - {} (cut-off {:.3})", university.name, university.cutoff);
        }
    }
}
