//! Command-line view of a trial dataset.
//!
//! Examples:
//!   trialmap-cli summary
//!   trialmap-cli sponsors
//!   trialmap-cli filter --sponsor Moderna --sponsor Pfizer
//!   trialmap-cli pins --name mRNA-1273
//!   trialmap-cli show NCT04283461
//!   trialmap-cli tally phase
//!
//! Uses the built-in sample unless `--data path.json`, `TRIALMAP_DATASET` or the
//! config file names a dataset.

use std::path::PathBuf;
use std::process;

use trialmap::config::{AppConfig, AppPaths, DATASET_ENV};
use trialmap::dashboard::Dashboard;
use trialmap::dataset::Dataset;
use trialmap::events::TracingSink;
use trialmap::filter::{FilterDimension, FilterState};
use trialmap::view::{tally, ChartDimension, ContactCard, PopupCard};

fn usage() -> ! {
    eprintln!("trialmap-cli (built-in sample dataset by default)");
    eprintln!("Usage: trialmap-cli [--data path.json] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  summary                     Record count and filter option counts");
    eprintln!("  sponsors | names            List unique filter values (first-seen order)");
    eprintln!("  filter [--sponsor S]... [--name N]...  List matching records");
    eprintln!("  pins [--sponsor S]... [--name N]...    List map pins for matching records");
    eprintln!("  show <id>                   Popup details and contact for one record");
    eprintln!("  tally <phase|status|approach|sponsor>  Counts for the charts view");
    eprintln!("  paths                       Show config file location");
    eprintln!("\nEnvironment: {} overrides the dataset path", DATASET_ENV);
    process::exit(1);
}

fn parse_args() -> (Option<PathBuf>, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut data = None;
    if args.len() >= 2 && args[0] == "--data" {
        data = Some(PathBuf::from(&args[1]));
        args.drain(0..2);
    }

    if args.is_empty() {
        usage();
    }
    (data, args)
}

/// `--sponsor X` / `--name Y` pairs, repeatable. Selections from the config
/// file apply to any dimension not given on the command line.
fn parse_filter(args: &[String], defaults: &FilterState) -> Result<FilterState, String> {
    let mut sponsors = Vec::new();
    let mut names = Vec::new();
    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--sponsor" | "-s" => sponsors.push(value.clone()),
            "--name" | "-n" => names.push(value.clone()),
            other => return Err(format!("unknown filter flag: {}", other)),
        }
    }

    let mut state = defaults.clone();
    if !sponsors.is_empty() {
        state.set(FilterDimension::Sponsor, sponsors);
    }
    if !names.is_empty() {
        state.set(FilterDimension::Name, names);
    }
    Ok(state)
}

fn load_dataset(flag: Option<PathBuf>, cfg: &AppConfig) -> Result<Dataset, String> {
    let env = std::env::var(DATASET_ENV).ok();
    match cfg.resolve_dataset(flag.as_deref(), env.as_deref()) {
        Some(path) => Dataset::load(&path).map_err(|e| e.to_string()),
        None => Ok(Dataset::builtin_sample()),
    }
}

fn print_card(card: &PopupCard, contact: &ContactCard) {
    println!("{}: {}", card.sponsor_heading, card.sponsor_names);
    println!("Product: {}", card.product);
    println!("Phase: {}", card.phase);
    println!("Status: {}", card.status);
    println!("Accepts Healthy Volunteers? {}", card.healthy_volunteers_label());
    println!(
        "Trial Registry Link: {}",
        card.registry_link.as_deref().unwrap_or(card.registry_label())
    );
    println!("Site: {}", card.site);
    println!("--- How to volunteer ---");
    if let Some(name) = &contact.name {
        println!("Name: {}", name);
    }
    if let Some(website) = &contact.website {
        println!("Website: {}", website);
    }
    println!("email: {}", contact.email);
    println!("Phone Number: {}", contact.phone);
    println!("Notes: {}", contact.notes);
}

fn run(data: Option<PathBuf>, args: &[String]) -> Result<(), String> {
    let cmd = args[0].as_str();

    let paths = AppPaths::new().map_err(|e| e.to_string())?;
    if cmd == "paths" {
        println!("Config dir:  {}", paths.config_dir().display());
        println!("Config file: {}", paths.config_file().display());
        return Ok(());
    }

    let cfg = AppConfig::load(&paths.config_file()).map_err(|e| e.to_string())?;
    let dataset = load_dataset(data, &cfg)?;
    tracing::info!("loaded {} record(s) from {:?}", dataset.len(), dataset.name);

    let defaults = cfg.initial_filter();
    let mut dashboard = Dashboard::with_sink(dataset.into_records(), Box::new(TracingSink))
        .with_filter(defaults.clone());

    match cmd {
        "summary" => {
            let view = dashboard.view();
            println!("{}: {}", view.summary.header(), view.summary.value());
            println!("Sponsors: {}", view.unique_sponsors.len());
            println!("Products: {}", view.unique_names.len());
            println!("Matching filters: {}", view.filtered.len());
            println!("Map pins: {}", view.pins.len());
        }
        "sponsors" | "names" => {
            let dim = FilterDimension::parse(cmd).unwrap_or(FilterDimension::Sponsor);
            let view = dashboard.view();
            let values = match dim {
                FilterDimension::Sponsor => &view.unique_sponsors,
                FilterDimension::Name => &view.unique_names,
            };
            for v in values {
                println!("{}", v);
            }
        }
        "filter" | "pins" => {
            let state = parse_filter(&args[1..], &defaults)?;
            for &dim in FilterDimension::all() {
                let selected: Vec<String> = state
                    .selected(dim)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                dashboard.set_filter(dim, selected);
            }
            let view = dashboard.view();
            if cmd == "filter" {
                for a in &view.filtered {
                    println!(
                        "{}\t{}\t{}\t{}",
                        a.id,
                        a.label(),
                        a.first_sponsor().unwrap_or(trialmap::view::ABSENT),
                        a.phase.as_deref().unwrap_or(trialmap::view::ABSENT)
                    );
                }
                println!("{} of {} record(s)", view.filtered.len(), view.summary.total);
            } else {
                for p in &view.pins {
                    println!(
                        "{}\t{:.4}\t{:.4}\t{}",
                        p.id, p.location.lat, p.location.lng, p.label
                    );
                }
            }
        }
        "show" => {
            let id = args.get(1).ok_or("show needs an id")?;
            dashboard.select(id.as_str());
            let view = dashboard.view();
            let asset = view
                .selected
                .ok_or_else(|| format!("no record with id {}", id))?;
            print_card(&PopupCard::from_asset(asset), &ContactCard::from_asset(asset));
        }
        "tally" => {
            let dim = args
                .get(1)
                .and_then(|s| ChartDimension::parse(s))
                .ok_or("tally needs one of: phase, status, approach, sponsor")?;
            let view = dashboard.view();
            println!("{}", dim.label());
            for (value, count) in tally(view.filtered.iter().copied(), dim) {
                println!("{:>4}  {}", count, value);
            }
        }
        _ => usage(),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let (data, args) = parse_args();
    if let Err(msg) = run(data, &args) {
        eprintln!("{}", msg);
        process::exit(1);
    }
}
