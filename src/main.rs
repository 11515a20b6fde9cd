use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

use asset_validators::{
    CheckManifest, ResourceRootCache, ValidationContext, ValidationResult, ValidatorConfig,
    ValidatorRegistry,
};

#[derive(Parser)]
#[command(version, about = "Validate asset references and field values")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every check listed in a JSON or YAML manifest.
    Check {
        /// Manifest describing the checks.
        manifest: PathBuf,
        /// Project directory holding the assets folder and optional config.
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
        /// Resource root to search instead of discovering roots. Repeatable.
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },
    /// Print the resource roots discovered for a project.
    Roots {
        /// Project directory holding the assets folder and optional config.
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Check {
            manifest,
            project_dir,
            roots,
        } => check(&manifest, &project_dir, roots),
        Command::Roots { project_dir } => {
            let cache = ValidatorConfig::discover(&project_dir).root_cache(&project_dir);
            for root in cache.roots().iter() {
                println!("{}", root.display());
            }
            Ok(())
        }
    }
}

fn check(manifest: &Path, project_dir: &Path, roots: Vec<PathBuf>) -> Result<()> {
    let manifest = CheckManifest::load_from_path(manifest)
        .with_context(|| format!("failed to load checks from {}", manifest.display()))?;

    let cache = if roots.is_empty() {
        ValidatorConfig::discover(project_dir).root_cache(project_dir)
    } else {
        Rc::new(ResourceRootCache::with_roots(roots))
    };
    log::info!("searching {} resource roots", cache.roots().len());

    let context = ValidationContext::new(cache);
    let registry = ValidatorRegistry::with_defaults();

    let mut failures = 0;
    for check in &manifest.checks {
        let result = registry.validate(&check.rule, &check.value, &context);
        if let ValidationResult::Error { .. } = result {
            failures += 1;
        }
        println!("{}: {}", check.field, result);
    }

    if failures > 0 {
        bail!("{failures} of {} checks failed", manifest.checks.len());
    }
    Ok(())
}
