//! efficio CLI — build parametric parts and export them to STL, SVG or PNG.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use efficio::{Object, View};

mod catalog;

#[derive(Parser)]
#[command(name = "efficio")]
#[command(about = "Parametric part construction and export", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the object catalog and per-object parameters
    List,
    /// Build an object and export it
    Build {
        #[command(flatten)]
        selection: Selection,
        /// Output file (format from the extension: .stl, .svg, .png)
        #[arg(short, long)]
        output: PathBuf,
        /// Projection used for SVG output
        #[arg(long, value_enum, default_value_t = ViewArg::Isometric)]
        view: ViewArg,
    },
    /// Print geometry statistics for an object
    Info {
        #[command(flatten)]
        selection: Selection,
    },
}

/// How the object to build is chosen: flags or a recipe file.
#[derive(Debug, clap::Args)]
struct Selection {
    /// The name of the object (see `efficio list`)
    #[arg(long)]
    object: Option<String>,

    /// Object parameter as key=value; repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// TOML recipe declaring the object and its parameters
    #[arg(long, conflicts_with_all = ["object", "params"])]
    recipe: Option<PathBuf>,
}

/// A build recipe loaded from TOML.
#[derive(Debug, Deserialize)]
struct Recipe {
    object: String,
    #[serde(default)]
    params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Top,
    Front,
    Left,
    Isometric,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> View {
        match arg {
            ViewArg::Top => View::Top,
            ViewArg::Front => View::Front,
            ViewArg::Left => View::Left,
            ViewArg::Isometric => View::Isometric,
        }
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "efficio=debug,info"
    } else {
        "efficio=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::List => run_list(),
        Commands::Build {
            selection,
            output,
            view,
        } => run_build(&selection, &output, view.into()),
        Commands::Info { selection } => run_info(&selection),
    }
}

fn resolve(selection: &Selection) -> Result<Box<dyn Object>> {
    let (name, params) = match (&selection.recipe, &selection.object) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading recipe {}", path.display()))?;
            let recipe: Recipe = toml::from_str(&text)
                .with_context(|| format!("parsing recipe {}", path.display()))?;
            (recipe.object, catalog::Params::from_map(recipe.params))
        }
        (None, Some(object)) => (object.clone(), catalog::Params::parse(&selection.params)?),
        (None, None) => bail!("pass --object (with --param) or --recipe"),
    };
    tracing::debug!(object = %name, "building object");
    catalog::build_object(&name, &params)
}

fn run_list() -> Result<()> {
    println!("Available objects:\n");
    for entry in catalog::catalog() {
        println!("  {:<18} {}", entry.name, entry.summary);
        println!("  {:<18}   parameters: {}", "", entry.params);
    }
    println!("\nMeasure parameters accept `12`, `12mm`, `0.5in` or `3/8in`.");
    Ok(())
}

fn run_build(selection: &Selection, output: &Path, view: View) -> Result<()> {
    let object = resolve(selection)?;
    let shape = object.shape()?;

    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "stl" => shape.write_stl(output)?,
        "svg" => shape.write_svg(output, view)?,
        "png" => shape.write_png(output)?,
        _ => bail!("unknown output format: {ext:?} (expected stl, svg or png)"),
    }
    println!("wrote {}", output.display());
    Ok(())
}

fn run_info(selection: &Selection) -> Result<()> {
    let object = resolve(selection)?;
    let shape = object.shape()?;
    let bounds = shape.bounds().context("object has no geometry")?;

    let [sx, sy, sz] = bounds.size();
    println!("Bounds:");
    println!(
        "  min: ({:.3}, {:.3}, {:.3}) mm",
        bounds.min[0], bounds.min[1], bounds.min[2]
    );
    println!(
        "  max: ({:.3}, {:.3}, {:.3}) mm",
        bounds.max[0], bounds.max[1], bounds.max[2]
    );
    println!("  size: {sx:.3} x {sy:.3} x {sz:.3} mm");
    println!("Volume: {:.3} mm^3", shape.volume());
    println!("Surface area: {:.3} mm^2", shape.surface_area());
    println!("Triangles: {}", shape.num_triangles());

    if let Some(cut) = object.cut()? {
        if let Some(cut_bounds) = cut.bounds() {
            let [cx, cy, cz] = cut_bounds.size();
            println!("Clearance cut: {cx:.3} x {cy:.3} x {cz:.3} mm");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_parsing() {
        let recipe: Recipe = toml::from_str(
            r#"
            object = "m3-bolt"

            [params]
            length = "13mm"
            clearance = "true"
            "#,
        )
        .unwrap();
        assert_eq!(recipe.object, "m3-bolt");
        assert_eq!(recipe.params["length"], "13mm");

        let bare: Recipe = toml::from_str(r#"object = "m3-nut""#).unwrap();
        assert!(bare.params.is_empty());
    }

    #[test]
    fn test_view_mapping() {
        assert_eq!(View::from(ViewArg::Top), View::Top);
        assert_eq!(View::from(ViewArg::Isometric), View::Isometric);
    }

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from([
            "efficio", "build", "--object", "sphere", "--param", "radius=5", "--output",
            "ball.stl",
        ])
        .unwrap();
        match cli.command {
            Commands::Build { selection, .. } => {
                assert_eq!(selection.object.as_deref(), Some("sphere"));
                assert_eq!(selection.params, vec!["radius=5".to_string()]);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_recipe_conflicts_with_object() {
        let result = Cli::try_parse_from([
            "efficio", "build", "--object", "sphere", "--recipe", "r.toml", "--output",
            "ball.stl",
        ]);
        assert!(result.is_err());
    }
}
