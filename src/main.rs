/*!
project-heatmap

Reads `countries.csv` and `projects_anon.csv` from the working directory, opens
the choropleth in the browser and writes `project_counts_heatmap.png`.
*/

use project_heatmap::{pipeline, HeatmapConfig, VERSION};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_heatmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = VERSION, "Starting project heatmap");

    let config = HeatmapConfig::default();
    let summary = pipeline::run(&config)?;

    info!(
        loaded = summary.loaded_rows,
        kept = summary.kept_rows,
        unmapped = summary.unmapped.len(),
        countries = summary.countries,
        global_max = summary.global_max,
        per_tier = ?summary.per_tier,
        html = %summary.html_path.display(),
        png = %summary.png_path.display(),
        "Done"
    );

    Ok(())
}
