use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Parser;
use rti_dash::layout::{
    DashboardLayout, WidgetConfig, calculate_widget_overlap, compact_layout, export_layout,
    import_layout, optimize_layout,
};

#[derive(Parser, Debug)]
#[command(
    name = "layout-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Times the layout utilities over large generated dashboards"
)]
struct BenchCli {
    /// Widgets in the generated layout.
    #[arg(short = 'w', long = "widgets", value_name = "N", default_value_t = 500)]
    widgets: usize,

    /// Repetitions per measured operation.
    #[arg(short = 'i', long = "iterations", value_name = "N", default_value_t = 200)]
    iterations: u32,

    /// Seed for the layout generator, for repeatable comparisons.
    #[arg(short = 's', long = "seed", default_value_t = 0x5eed)]
    seed: u64,
}

struct BenchConfig {
    widgets: usize,
    iterations: u32,
    seed: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=100_000).contains(&cli.widgets) {
            return Err("widgets must be between 1 and 100000".to_string());
        }
        if !(1..=100_000).contains(&cli.iterations) {
            return Err("iterations must be between 1 and 100000".to_string());
        }
        Ok(Self {
            widgets: cli.widgets,
            iterations: cli.iterations,
            seed: cli.seed,
        })
    }
}

/// xorshift; good enough to scatter widgets.
struct Scatter(u64);

impl Scatter {
    fn next(&mut self) -> u64 {
        let mut x = self.0.max(1);
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u64) -> f64 {
        (self.next() % n) as f64
    }
}

fn generate(config: &BenchConfig) -> DashboardLayout {
    let mut rng = Scatter(config.seed);
    let widgets = (0..config.widgets)
        .map(|i| {
            let w = 1.0 + rng.below(6);
            let x = rng.below(13 - w as u64);
            // fractional positions as left behind by pointer drags
            let y = rng.below(config.widgets as u64 * 2) + rng.below(4) / 4.0;
            WidgetConfig::new(format!("w{i}"), "bench", format!("Widget {i}")).at(
                x,
                y,
                w,
                1.0 + rng.below(5),
            )
        })
        .collect();
    DashboardLayout::new("bench", "Bench", Utc::now()).with_widgets(widgets)
}

struct Timing {
    name: &'static str,
    total: Duration,
    iterations: u32,
}

impl Timing {
    fn per_iter_us(&self) -> f64 {
        self.total.as_secs_f64() * 1_000_000.0 / f64::from(self.iterations)
    }
}

fn measure(name: &'static str, iterations: u32, mut op: impl FnMut() -> bool) -> Timing {
    let start = Instant::now();
    let mut sink = 0u32;
    for _ in 0..iterations {
        sink = sink.wrapping_add(u32::from(op()));
    }
    let total = start.elapsed();
    std::hint::black_box(sink);
    Timing {
        name,
        total,
        iterations,
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let layout = generate(&config);
    let json = export_layout(&layout).map_err(io::Error::other)?;
    let bytes = serde_json::to_vec(&layout).map_err(io::Error::other)?.len();

    let n = config.iterations;
    let timings = [
        measure("overlap", n, || calculate_widget_overlap(&layout.widgets)),
        measure("compact", n, || {
            !compact_layout(&layout, Utc::now()).widgets.is_empty()
        }),
        measure("optimize", n, || {
            !optimize_layout(&layout, Utc::now()).widgets.is_empty()
        }),
        measure("export", n, || export_layout(&layout).is_ok()),
        measure("import", n, || import_layout(&json, Utc::now()).is_some()),
    ];

    println!(
        "layout-bench: {} widgets, {} iterations, {} bytes compact json",
        config.widgets, config.iterations, bytes
    );
    for t in &timings {
        println!(
            "  {:<10} {:>12.1} us/iter  ({:.3} s total)",
            t.name,
            t.per_iter_us(),
            t.total.as_secs_f64()
        );
    }
    Ok(())
}
