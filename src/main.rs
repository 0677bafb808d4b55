use clap::Parser;
use log::{error, info};

/// Designs a Savitzky-Golay filter bank and runs it over a linear ramp.
///
/// Prints the integer polynomial basis for the window, then the ramp before
/// and after filtering. A straight line survives the filter exactly, edges
/// included, which makes the ramp a quick end-to-end check of a design.
#[derive(Parser, Debug)]
#[command(name = "savgol", version, about)]
struct Cli {
    /// Window width in samples (odd)
    #[arg(default_value_t = 5)]
    frame: usize,

    /// Polynomial fit order
    #[arg(default_value_t = 3)]
    order: usize,

    /// First ramp sample
    #[arg(default_value_t = 900.0)]
    x_low: f64,

    /// Last ramp sample
    #[arg(default_value_t = 980.0)]
    x_high: f64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> savgol::Result<()> {
    let a = savgol::basis(cli.frame)?;
    println!("Polynomial basis for a {}-point window:", cli.frame);
    println!("{}", a);

    let bank = savgol::design::<f64>(cli.frame, cli.order)?;
    info!(
        "filter bank ready: frame={}, order={}, rank={}",
        bank.frame(),
        bank.order(),
        bank.rank()
    );
    println!("Filter coefficients for an order-{} fit:", cli.order);
    println!("{:.4}", bank.filters());

    let samples = ramp(cli.x_low, cli.x_high, cli.frame);
    let filtered = bank.apply(&samples)?;

    println!("Input:    {:?}", samples);
    println!("Filtered: {:?}", filtered);

    Ok(())
}

fn ramp(low: f64, high: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![low];
    }
    let step = (high - low) / (count - 1) as f64;
    (0..count).map(|i| low + step * i as f64).collect()
}
