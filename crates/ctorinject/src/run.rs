use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use ctorinject_core::inject::{has_import, inject, Dependency, InjectMode, Outcome};
use ctorinject_core::manifest::{Manifest, Target};
use ctorinject_core::report::{marker_line, section_header, RunSummary, Status, TargetReport};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "run")]
#[command(about = "Inject the dependency into the listed controllers")]
pub struct App {
    /// TOML manifest with the extend/create lists and dependency settings
    #[clap(long, short, env = "CTORINJECT_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Controller whose existing constructor gets the dependency (repeatable)
    #[clap(long, value_name = "NAME")]
    extend: Vec<String>,

    /// Controller that gets a new constructor (repeatable)
    #[clap(long, value_name = "NAME")]
    create: Vec<String>,

    /// Controller path relative to the root, `{name}` is replaced by the controller name
    #[clap(long)]
    path_template: Option<String>,

    /// Class name of the injected dependency
    #[clap(long = "type", value_name = "CLASS")]
    type_name: Option<String>,

    /// Property name of the injected dependency, without `$`
    #[clap(long = "name", value_name = "NAME")]
    var_name: Option<String>,

    /// Fully qualified class name to add as a `use` statement
    #[clap(long, value_name = "FQCN")]
    import: Option<String>,

    /// Report what would change without writing any file
    #[clap(long)]
    dry_run: bool,

    /// Output the run summary as JSON
    #[clap(long)]
    json: bool,
}

/// Module entry point
pub fn run(app: App, global: crate::Global) -> Result<()> {
    let mut manifest = crate::manifest::load(app.manifest.as_deref())?;
    apply_overrides(&mut manifest, &app);
    manifest.validate()?;

    if global.verbose {
        eprintln!("Root: {}", global.root.display());
        eprintln!("Path template: {}", manifest.path_template);
        eprintln!("Dependency: {}", manifest.dependency.parameter());
    }

    let targets = manifest.targets(&global.root);
    let summary = process_targets(&targets, &manifest.dependency, app.dry_run, !app.json)?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn apply_overrides(manifest: &mut Manifest, app: &App) {
    manifest.merge_cli(app.extend.clone(), app.create.clone());

    if let Some(template) = &app.path_template {
        manifest.path_template = template.clone();
    }
    if let Some(type_name) = &app.type_name {
        manifest.dependency.type_name = type_name.clone();
    }
    if let Some(var_name) = &app.var_name {
        manifest.dependency.var_name = var_name.clone();
    }
    if let Some(import) = &app.import {
        manifest.dependency.import = Some(import.clone());
    }
}

/// Process every target in order: all extend targets, then all create targets.
///
/// A file that cannot be read or written stops the run right there. Files
/// already written stay written.
pub fn process_targets(
    targets: &[Target],
    dependency: &Dependency,
    dry_run: bool,
    print: bool,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new(dry_run);

    for mode in [InjectMode::Extend, InjectMode::Create] {
        if print {
            println!("{}", section_header(mode));
        }

        for target in targets.iter().filter(|target| target.mode == mode) {
            let report = apply_target(target, dependency, dry_run)?;
            if print {
                print_report(&report);
            }
            summary.record(report);
        }

        if print {
            println!();
        }
    }

    if print {
        if dry_run {
            println!("{}", "Dry run, no file was written.".yellow());
        }
        println!("Done!");
    }

    Ok(summary)
}

/// Read, transform and (unless `dry_run`) write back a single controller.
pub fn apply_target(target: &Target, dependency: &Dependency, dry_run: bool) -> Result<TargetReport> {
    let path = target.path.display().to_string();

    log::debug!("reading {path}");
    let bytes = fs::read(&target.path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| Error::Encoding {
        path: path.clone(),
        source,
    })?;

    let outcome = inject(&content, target.mode, dependency);
    let status = Status::from(&outcome);
    log::debug!(
        "{} ({:?}): {:?}, changed: {}",
        target.name,
        target.mode,
        status,
        outcome.is_changed()
    );

    let mut warning = None;
    if let Outcome::Injected(updated) = &outcome {
        if !has_import(updated, dependency) {
            log::warn!("{path}: no namespace or use statements, import not added");
            warning = Some("import not added: no namespace or use statements".to_string());
        }

        if dry_run {
            log::info!("dry run, leaving {path} untouched");
        } else if *updated != content {
            fs::write(&target.path, updated).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            log::debug!("wrote {} bytes to {path}", updated.len());
        }
    }

    Ok(TargetReport {
        name: target.name.clone(),
        path,
        mode: target.mode,
        status,
        warning,
    })
}

fn print_report(report: &TargetReport) {
    let line = marker_line(&report.name, report.status);
    match report.status {
        Status::Injected => println!("{}", line.green()),
        Status::AlreadyInjected => println!("{}", line.yellow()),
        Status::PatternNotMatched => println!("{}", line.red()),
    }
    if let Some(warning) = &report.warning {
        println!("{}", f!("    ! {warning}").yellow());
    }
}
