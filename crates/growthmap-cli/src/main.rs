//! growthmap: command-line front end for growthmap-core
//!
//! Loads the customer table and the three boundary files, then prints
//! statistics, the active view of a drill-down selection, or the rendered
//! GeoJSON layers. `replay` runs a script of clicks and resets the way a map
//! front end would send them.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ growthmap --data-dir data stats
//!
//! - Totals and viewport for a city
//!   $ growthmap view --province bali --city denpasar
//!
//! - Export the rendered layers
//!   $ growthmap export --province bali --pretty -o bali.geojson
//!
//! - Replay a click script from stdin
//!   $ printf 'click {"WADMPR":"BALI"}\nshow\n' | growthmap replay
//!
//! Data source
//! -----------
//!
//! Paths default to the standard file names inside `--data-dir` (or
//! `$GROWTHMAP_DATA_DIR`, or `./data`). A binary cache is kept next to the
//! sources and reused while every source still has the path, size and mtime
//! it was built from; `--no-cache` skips it and `build-cache` rewrites it.
mod args;

use crate::args::{CliArgs, Commands, DataArgs, SelectionArgs};
use anyhow::{bail, Context};
use clap::Parser;
use growthmap_core::prelude::*;
use growthmap_core::view::label;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use strum::IntoEnumIterator;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = CliArgs::parse();
    let sources = data_sources(&args.data);

    match args.command {
        Commands::BuildCache => {
            if sources.cache.is_none() {
                bail!("--no-cache given; nothing to build");
            }
            let db = GrowthDb::refresh(&sources)?;
            print_stats(&db.stats());
        }

        Commands::Stats => {
            let db = GrowthDb::load(&sources)?;
            print_stats(&db.stats());
        }

        Commands::View {
            selection,
            max_zoom,
        } => {
            let db = GrowthDb::load(&sources)?;
            let state = selection_from(&selection)?;
            let config = ViewConfig {
                max_zoom,
                ..ViewConfig::default()
            };
            print_view(&db, &state, &config);
        }

        Commands::Export {
            selection,
            output,
            pretty,
        } => {
            let db = GrowthDb::load(&sources)?;
            let state = selection_from(&selection)?;
            let json = render_json(&db, &state, pretty)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    log::info!("Wrote {} for {state}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Replay { script } => {
            // One database for the whole session.
            let db = GrowthDb::shared(&sources)?;
            let reader: Box<dyn BufRead> = match &script {
                Some(path) => Box::new(BufReader::new(
                    File::open(path).with_context(|| format!("opening {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(io::stdin())),
            };
            replay(db, reader)?;
        }
    }

    Ok(())
}

/// Explicit paths win over `--data-dir`; `--no-cache` drops the cache path.
fn data_sources(args: &DataArgs) -> DataSources {
    let dir = args
        .data_dir
        .clone()
        .unwrap_or_else(GrowthDb::default_data_dir);
    let mut sources = DataSources::from_dir(dir);
    if let Some(p) = &args.customers {
        sources.customers = p.clone();
    }
    if let Some(p) = &args.provinces {
        sources.provinces = p.clone();
    }
    if let Some(p) = &args.cities {
        sources.cities = p.clone();
    }
    if let Some(p) = &args.districts {
        sources.districts = p.clone();
    }
    if let Some(p) = &args.cache {
        sources.cache = Some(p.clone());
    }
    if args.no_cache {
        sources = sources.without_cache();
    }
    sources
}

fn selection_from(args: &SelectionArgs) -> anyhow::Result<Selection> {
    Selection::from_parts(
        args.province.as_deref(),
        args.city.as_deref(),
        args.district.as_deref(),
    )
    .context("a city needs a province and a district needs a city")
}

fn print_stats(stats: &DbStats) {
    println!("Database statistics:");
    println!(
        "  Provinces: {} ({} with data)",
        stats.provinces, stats.provinces_with_data
    );
    println!(
        "  Cities:    {} ({} with data)",
        stats.cities, stats.cities_with_data
    );
    println!(
        "  Districts: {} ({} with data)",
        stats.districts, stats.districts_with_data
    );
}

fn print_view(db: &GrowthDb, state: &Selection, config: &ViewConfig) {
    let view = active_view(db, state);
    let m = &view.totals.metrics;

    println!("Selection: {state}");
    println!("{}", view.label);
    for year in Year::iter() {
        println!("  Total Customer as of {year}: {}", m.customers(year));
    }
    println!("  Customer Growth (%): {:.2}", m.customer_growth);
    for unit in BusinessUnit::iter() {
        println!(
            "  {unit}: {} -> {} ({:.2} %)",
            m.unit_total(Year::Y2019, unit),
            m.unit_total(Year::Y2024, unit),
            m.booking_growth(unit)
        );
    }
    println!(
        "  Areas: {} ({} with data)",
        view.totals.areas, view.totals.areas_with_data
    );

    match viewport(db, state, config) {
        Some(vp) => println!(
            "Viewport: center ({:.4}, {:.4}) zoom {:.2}",
            vp.center.0, vp.center.1, vp.zoom
        ),
        None => println!("Viewport: no boundaries loaded"),
    }

    let mut actions = Vec::new();
    if state.can_reset_to_top() {
        actions.push("back-province");
    }
    if state.can_reset_to_city_level() {
        actions.push("back-city");
    }
    if !actions.is_empty() {
        println!("Available: {}", actions.join(", "));
    }

    for row in &view.rows {
        match row.customer_growth() {
            Some(g) => println!("  - {}: {g:.2} %", row.key.name()),
            None => println!("  - {}: no data", row.key.name()),
        }
    }
}

/// One parsed line of a replay script.
enum Step {
    Act(Action),
    Show,
}

fn parse_step(line: &str) -> anyhow::Result<Step> {
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));
    Ok(match verb {
        "click" => {
            let props: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(rest).context("click expects a JSON object")?;
            Step::Act(Action::Click(FeatureProperties::from_json(&props)))
        }
        "back-province" => Step::Act(Action::ResetToTop),
        "back-city" => Step::Act(Action::ResetToCityLevel),
        "show" => Step::Show,
        other => bail!("unknown action `{other}`"),
    })
}

fn replay(db: &GrowthDb, reader: Box<dyn BufRead>) -> anyhow::Result<()> {
    let config = ViewConfig::default();
    let mut state = Selection::Top;
    let stdout = io::stdout();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}", idx + 1))?;
        match step {
            Step::Act(action) => {
                state = action.apply(&state);
                writeln!(stdout.lock(), "> {line}  =>  {state} [{}]", label(&state))?;
            }
            Step::Show => print_view(db, &state, &config),
        }
    }
    Ok(())
}
