/*!
# project-heatmap

Choropleth map of engagement projects per country.

Two CSV inputs, a country reference table (name, ISO-3 code, priority tier) and
a project roster, are joined and counted per country. The counts are drawn as
one choropleth layer per priority tier, each tier with its own outline, plus a
text layer carrying the numbers and a hand-built legend.

## Pipeline

```text
countries.csv ─► reader::reference ─┐
                                    ├─► aggregate ─► plot::layer ─┐
projects.csv ──► reader::projects ──┘                             ├─► plot::figure ─► writer
                                              plot::legend ───────┘
```

## Example

```rust,ignore
use project_heatmap::{pipeline, HeatmapConfig};

let summary = pipeline::run(&HeatmapConfig::default())?;
println!("{} countries drawn", summary.countries);
```
*/

pub mod aggregate;
pub mod config;
pub mod pipeline;
pub mod plot;
pub mod reader;
pub mod writer;

pub use aggregate::{aggregate, Aggregation, CountryCount};
pub use config::HeatmapConfig;
pub use plot::{Figure, PriorityTier};
pub use reader::{CountryReference, NormalizedProjects};

// Re-export polars types for users
pub use polars::prelude::DataFrame;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum HeatmapError {
    #[error("Reader error: {0}")]
    ReaderError(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
