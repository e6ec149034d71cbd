use anyhow::Result;
use bench_plot::chart::{plot_results_file, RenderOptions};
use bench_plot::labels::{SizeLabelMap, SizeLabelOverride};
use bench_plot::report::{print_summary, write_manifest};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bench-plot")]
#[command(about = "Plot search time against corpus size, one chart per pattern")]
struct Cli {
    /// Benchmark results CSV written by the search harness
    #[arg(short, long, default_value = "results/benchmark.csv")]
    input: PathBuf,

    /// Output directory for charts
    #[arg(short, long, default_value = "results/graficos")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "1000")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Extra or replacement tick label for an exact size, e.g. 2048=2K
    #[arg(long = "size-label", value_name = "BYTES=LABEL")]
    size_labels: Vec<SizeLabelOverride>,

    /// Render charts in parallel
    #[arg(long, default_value = "false")]
    parallel: bool,

    /// Also write manifest.json describing every chart
    #[arg(long, default_value = "false")]
    manifest: bool,

    /// Print per-chart progress and skipped rows
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut labels = SizeLabelMap::default();
    for o in &cli.size_labels {
        labels.insert(o.size, o.label.clone());
    }

    let options = RenderOptions {
        width: cli.width,
        height: cli.height,
        parallel: cli.parallel,
        verbose: cli.verbose,
    };

    let jobs = plot_results_file(&cli.input, &cli.output, &labels, &options)?;

    if cli.verbose {
        print_summary(&jobs);
    }

    if cli.manifest {
        let path = write_manifest(&jobs, &cli.output)?;
        if cli.verbose {
            println!("Generated: {}", path.display());
        }
    }

    println!("Gráficos generados en: {}", cli.output.display());
    Ok(())
}
