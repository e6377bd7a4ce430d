//! Command-line mesh quality report.
//!
//! Loads a Wavefront OBJ file, analyzes every mesh in it, and prints a
//! quality summary per mesh. Optional filters list the individual issues
//! of one kind or above a severity threshold.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mesh_quality::{IssueKind, MeshIssue, MeshQualityAnalyzer};
use tracing::debug;

#[derive(Parser)]
#[command(name = "meshcheck", about = "Analyze mesh quality of an OBJ model")]
struct Args {
    /// OBJ file to analyze.
    model: PathBuf,

    /// List issues with severity at or above this value.
    #[arg(long, value_name = "SEVERITY")]
    min_severity: Option<f64>,

    /// List issues of this kind (canonical name, e.g. "Degenerate Face").
    #[arg(long, value_name = "KIND")]
    kind: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let kind_filter = match args.kind.as_deref().map(parse_kind).transpose() {
        Ok(kind) => kind,
        Err(unknown) => {
            eprintln!("error: unknown issue kind '{unknown}'");
            eprintln!("known kinds:");
            for kind in IssueKind::ALL {
                eprintln!("  {kind}");
            }
            return ExitCode::FAILURE;
        }
    };

    let meshes = match mesh_obj::load_obj(&args.model) {
        Ok(meshes) => meshes,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if meshes.is_empty() {
        eprintln!("error: {} contains no meshes", args.model.display());
        return ExitCode::FAILURE;
    }
    debug!(meshes = meshes.len(), "model loaded");

    for mesh in &meshes {
        let mut analyzer = MeshQualityAnalyzer::new(mesh);
        analyzer.analyze();

        println!("{}", analyzer.summary());

        if let Some(kind) = kind_filter {
            print_issues(&analyzer.issues_by_kind(kind));
        } else if let Some(min_severity) = args.min_severity {
            print_issues(&analyzer.issues_with_severity(min_severity));
        }
    }

    ExitCode::SUCCESS
}

/// Match a canonical kind name, case-insensitively.
fn parse_kind(name: &str) -> Result<IssueKind, String> {
    IssueKind::ALL
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| name.to_string())
}

fn print_issues(issues: &[MeshIssue]) {
    for issue in issues {
        println!(
            "{} at element {} (severity {:.3}, related: {:?})",
            issue.kind, issue.element, issue.severity, issue.related
        );
    }
    if !issues.is_empty() {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!(
            parse_kind("degenerate face"),
            Ok(IssueKind::DegenerateFace)
        );
        assert_eq!(parse_kind("Sharp Angle"), Ok(IssueKind::SharpAngle));
        assert!(parse_kind("bogus").is_err());
    }
}
