use std::io::Write;
use std::sync::atomic::AtomicBool;
use log::{info, warn};
use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;
use anyhow::bail;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

use rd_generation::validate_template;

use ribodesign::input_parsers::read_templates_input;
use ribodesign::input_parsers::read_target_input;
use ribodesign::region_parsers::RegionArguments;
use ribodesign::pipeline::design_candidates_with_progress;

#[derive(Debug, Parser)]
#[command(name = "rd-generate")]
#[command(version, about = "Generate ribozyme candidates for a target RNA")]
pub struct Cli {
    /// Template file (FASTA-like), or "-" for stdin
    #[arg(value_name = "TEMPLATES")]
    templates: String,

    /// Target file (FASTA-like), or "-" for stdin
    #[arg(value_name = "TARGET", default_value = "-")]
    target: String,

    /// Print candidates as JSON.
    #[arg(long)]
    json: bool,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten, next_help_heading = "Target regions")]
    regions: RegionArguments,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.regions.validate()?;

    if cli.templates == "-" && cli.target == "-" {
        bail!("Templates and target cannot both be read from stdin");
    }

    let templates = read_templates_input(&cli.templates)?;
    for template in &templates {
        let issues = validate_template(template);
        if !issues.is_empty() {
            bail!("Template {} is invalid:\n - {}", template.name, issues.join("\n - "));
        }
    }

    let (header, target) = read_target_input(&cli.target)?;
    if let Some(h) = &header {
        info!("{}", h.yellow());
    }
    let slices = cli.regions.select(&target)?;
    if slices.is_empty() {
        warn!("The selected regions of the target are empty.");
    }

    let pb = ProgressBar::new((templates.len() * slices.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
        .progress_chars("#>-"),
    );
    let cancel = AtomicBool::new(false);
    let designs = design_candidates_with_progress(&templates, &slices, &cancel, &pb)?;
    pb.finish_and_clear();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&designs)?);
        return Ok(());
    }

    let mut current: Option<&str> = None;
    for design in &designs {
        if current != Some(design.template.as_str()) {
            println!("{}", format!(">{}", design.template).yellow());
            current = Some(design.template.as_str());
        }
        let c = &design.candidate;
        let cutsites = c.cutsite_indices.iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("{} {} {} {} {}",
            c.sequence, c.structure.cyan(), c.substrate_sequence,
            c.substrate_structure.cyan(), cutsites.green());
    }
    info!("{} candidates.", designs.len());

    Ok(())
}
