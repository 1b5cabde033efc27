use crate::prelude::{println, *};
use colored::Colorize;
use ctorinject_core::inject::InjectMode;
use ctorinject_core::plan::{build_plan, PlanOutput};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "plan")]
#[command(about = "List the entity creation sites that still need the injected value")]
pub struct App {
    /// TOML manifest with `[[fix]]` entries
    #[clap(long, short, env = "CTORINJECT_MANIFEST")]
    manifest: PathBuf,

    /// Output as JSON
    #[clap(long)]
    json: bool,
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let manifest = crate::manifest::load(Some(app.manifest.as_path()))?;
    manifest.validate()?;

    if global.verbose {
        anstream::eprintln!("Manifest: {}", app.manifest.display());
        anstream::eprintln!("Fixes: {}", manifest.fixes.len());
    }

    let plan = build_plan(&manifest);

    if app.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, &manifest.dependency.type_name);
    }

    Ok(())
}

fn mode_label(mode: Option<InjectMode>) -> colored::ColoredString {
    match mode {
        Some(InjectMode::Extend) => "extend".green(),
        Some(InjectMode::Create) => "create".green(),
        None => "not scheduled".red(),
    }
}

fn print_plan(plan: &PlanOutput, type_name: &str) {
    if plan.instructions.is_empty() {
        println!("No fixes listed in the manifest.");
        return;
    }

    let title = f!("Controllers requiring {type_name} injection:");
    println!("{}", title.bold());
    println!("{}", "=".repeat(title.chars().count()));
    println!();

    for controller in &plan.controllers {
        println!("- {} ({})", controller.controller, mode_label(controller.mode));
    }

    println!();
    println!("Total: {} controllers", plan.total);
    println!();

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["File", "Method", "Line", "Entity", "Fix"]);

    for fix in &plan.instructions {
        table.add_row(prettytable::row![
            &fix.controller,
            &fix.method,
            f!("~{}", fix.line),
            &fix.entity,
            &fix.instruction
        ]);
    }

    table.printstd();
}
