//! Command-line workbench for the specto chart library.
//!
//! Talks to a live statistics backend and prints either dataset metadata or
//! a full Plotly-shaped chart spec as JSON on stdout. Logs go to stderr so
//! the JSON stream stays pipeable.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use specto::core::ChartSpec;
use specto::dash::DashSession;
use specto::select::{
    BivariateKind, BivariateSelection, MultivariateKind, MultivariateSelection, UnivariateKind,
    UnivariateSelection,
};

/// Fetch dataset statistics and print Plotly-shaped chart specs.
#[derive(Parser, Debug)]
#[command(name = "specto")]
#[command(about = "Fetch dataset statistics and print Plotly-shaped chart specs")]
struct Cli {
    /// Base URL of the statistics backend
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the datasets the backend can serve
    Projects,
    /// Load a dataset and print its column names
    Load {
        /// Project name under the backend's Projects/ directory
        name: String,
    },
    /// Build a single-column chart
    Univariate {
        /// Chart kind: histogram, bar, box, pie, density, dot, pareto,
        /// violin or stem
        kind: String,
        /// Column to summarize
        #[arg(long)]
        column: String,
    },
    /// Build a two-column chart
    Bivariate {
        /// Chart kind: scatter, line, box_by_category, grouped_bar, heatmap,
        /// stacked_bar, hexbin, bubble or mosaic
        kind: String,
        #[arg(long)]
        x: Option<String>,
        #[arg(long)]
        y: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        stack: Option<String>,
        /// Columns for the correlation heatmap, comma separated
        #[arg(long, value_delimiter = ',')]
        cols: Vec<String>,
    },
    /// Build a many-column chart
    Multivariate {
        /// Chart kind: pair_plot, parallel_coordinates, radar_chart, treemap,
        /// sunburst, chord_diagram, sankey, upset_plot, scatter_3d or contour
        kind: String,
        #[arg(long, value_delimiter = ',')]
        cols: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        /// Value columns for the radar chart, comma separated
        #[arg(long, value_delimiter = ',')]
        value_cols: Vec<String>,
        /// Hierarchy columns for treemap and sunburst, comma separated
        #[arg(long, value_delimiter = ',')]
        path_cols: Vec<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        x: Option<String>,
        #[arg(long)]
        y: Option<String>,
        #[arg(long)]
        z: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "specto=info,specto_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();
    info!(base_url = %cli.base_url, "starting specto");
    let session = DashSession::new(&cli.base_url);

    match cli.command {
        Command::Projects => {
            for name in session.projects()? {
                println!("{name}");
            }
        }
        Command::Load { name } => {
            for column in session.load_project(&name)? {
                println!("{column}");
            }
        }
        Command::Univariate { kind, column } => {
            let kind: UnivariateKind = kind.parse()?;
            let selection = UnivariateSelection::new(kind).with_column(column);
            print_spec(&session.univariate(&selection)?)?;
        }
        Command::Bivariate {
            kind,
            x,
            y,
            size,
            category,
            value,
            group,
            stack,
            cols,
        } => {
            let kind: BivariateKind = kind.parse()?;
            let selection = BivariateSelection {
                x,
                y,
                size,
                category,
                value,
                group,
                stack,
                cols,
                ..BivariateSelection::new(kind)
            };
            print_spec(&session.bivariate(&selection)?)?;
        }
        Command::Multivariate {
            kind,
            cols,
            category,
            value_cols,
            path_cols,
            value,
            source,
            target,
            x,
            y,
            z,
        } => {
            let kind: MultivariateKind = kind.parse()?;
            let selection = MultivariateSelection {
                cols,
                category,
                value_cols,
                path_cols,
                value,
                source,
                target,
                x,
                y,
                z,
                ..MultivariateSelection::new(kind)
            };
            print_spec(&session.multivariate(&selection)?)?;
        }
    }
    Ok(())
}

fn print_spec(spec: &ChartSpec) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(spec)?);
    Ok(())
}
