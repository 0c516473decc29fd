//! Drill-down walkthrough for growthmap-rs
//!
//! Builds a tiny database in memory, then clicks from the province map down
//! to a district and back, printing the label, totals and viewport after
//! every step. Point `GROWTHMAP_DATA_DIR` at real data to load it instead.

use growthmap_rs::loader::read_boundaries;
use growthmap_rs::prelude::*;

const PROVINCES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"WADMPR":"Bali"},
   "geometry":{"type":"Polygon","coordinates":[[[114.4,-8.9],[115.7,-8.9],[115.7,-8.0],[114.4,-8.0],[114.4,-8.9]]]}},
  {"type":"Feature","properties":{"WADMPR":"Nusa Tenggara Barat"},
   "geometry":{"type":"Polygon","coordinates":[[[115.8,-9.1],[119.3,-9.1],[119.3,-8.0],[115.8,-8.0],[115.8,-9.1]]]}}
]}"#;

const CITIES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"WADMPR":"Bali","WADMKK":"Denpasar"},
   "geometry":{"type":"Polygon","coordinates":[[[115.17,-8.74],[115.26,-8.74],[115.26,-8.6],[115.17,-8.6],[115.17,-8.74]]]}},
  {"type":"Feature","properties":{"WADMPR":"Bali","WADMKK":"Badung"},
   "geometry":{"type":"Polygon","coordinates":[[[115.05,-8.85],[115.25,-8.85],[115.25,-8.4],[115.05,-8.4],[115.05,-8.85]]]}}
]}"#;

const DISTRICTS: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"WADMPR":"Bali","WADMKK":"Denpasar","WADMKC":"Denpasar Barat"},
   "geometry":{"type":"Polygon","coordinates":[[[115.17,-8.7],[115.21,-8.7],[115.21,-8.62],[115.17,-8.62],[115.17,-8.7]]]}},
  {"type":"Feature","properties":{"WADMPR":"Bali","WADMKK":"Denpasar","WADMKC":"Denpasar Selatan"},
   "geometry":{"type":"Polygon","coordinates":[[[115.2,-8.74],[115.26,-8.74],[115.26,-8.67],[115.2,-8.67],[115.2,-8.74]]]}}
]}"#;

fn sample_db() -> Result<GrowthDb> {
    let records = vec![
        CustomerRecord::new("Bali", "Denpasar", "Denpasar Barat")
            .with_customers(Year::Y2019, 1_200)
            .with_customers(Year::Y2024, 1_650)
            .with_split(Year::Y2019, BusinessUnit::Nmc, Category::N, 300)
            .with_split(Year::Y2024, BusinessUnit::Nmc, Category::N, 420),
        CustomerRecord::new("Bali", "Denpasar", "Denpasar Selatan")
            .with_customers(Year::Y2019, 800)
            .with_customers(Year::Y2024, 760),
        CustomerRecord::new("Bali", "Badung", "Kuta")
            .with_customers(Year::Y2019, 0)
            .with_customers(Year::Y2024, 90),
    ];

    aggregate(
        &records,
        read_boundaries(PROVINCES.as_bytes(), Level::Province, "provinces")?,
        read_boundaries(CITIES.as_bytes(), Level::City, "cities")?,
        read_boundaries(DISTRICTS.as_bytes(), Level::District, "districts")?,
    )
}

fn show(db: &GrowthDb, state: &Selection, config: &ViewConfig) {
    let view = active_view(db, state);
    println!("[{state}] {}", view.label);
    println!(
        "  customers {} -> {} ({:.1} %)",
        view.totals.metrics.customers(Year::Y2019),
        view.totals.metrics.customers(Year::Y2024),
        view.totals.metrics.customer_growth
    );
    if let Some(vp) = viewport(db, state, config) {
        println!(
            "  viewport ({:.3}, {:.3}) zoom {:.2}",
            vp.center.0, vp.center.1, vp.zoom
        );
    }
    for row in &view.rows {
        match row.customer_growth() {
            Some(g) => println!("  - {}: {g:.1} %", row.key.name()),
            None => println!("  - {}: no data", row.key.name()),
        }
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== growthmap drill-down walkthrough ===\n");

    let db = match std::env::var_os("GROWTHMAP_DATA_DIR") {
        Some(dir) => GrowthDb::load(&DataSources::from_dir(dir))?,
        None => sample_db()?,
    };
    let config = ViewConfig::default();

    let mut state = Selection::Top;
    show(&db, &state, &config);

    let clicks = [
        FeatureProperties::province("Bali"),
        FeatureProperties::city("Bali", "Denpasar"),
        FeatureProperties::district("Bali", "Denpasar", "Denpasar Barat"),
    ];
    for props in &clicks {
        state = on_feature_clicked(&state, props);
        show(&db, &state, &config);
    }

    state = reset_to_city_level(&state);
    show(&db, &state, &config);

    // The rendered layer is what a map widget would draw for this state.
    let fc = render(&db, &state);
    println!("Rendered {} features for {state}", fc.features.len());

    state = reset_to_top(&state);
    println!("Back to {state}");
    Ok(())
}
