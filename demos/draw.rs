/// Build a diagram from a file or random sites, report the sweep and draw the result
use clap::Parser;
use fortune_rs::{CircleEvent, Context, Float, Observer, Point, SiteId, SweeperBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use utils::{draw_svg, load_sites};
mod utils;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sites file, one `x y` pair per line. Random sites are used when missing
    #[arg(short, long)]
    path: Option<std::path::PathBuf>,

    /// svg file to draw the diagram into
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// number of random sites
    #[arg(long, default_value = "100")]
    count: usize,

    #[arg(long, default_value = "0")]
    seed: u64,

    /// query point for a nearest site lookup, as `x,y`
    #[arg(long, value_parser = parse_query)]
    query: Option<Point>,

    #[arg(long, default_value = "1")]
    bench_count: u32,
}

fn parse_query(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let x = x.trim().parse::<Float>().map_err(|err| err.to_string())?;
    let y = y.trim().parse::<Float>().map_err(|err| err.to_string())?;
    Ok(Point::new(x, y))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let sites = match &args.path {
        Some(path) => match load_sites(path) {
            Ok(sites) => sites,
            Err(err) => {
                eprintln!("failed to load {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            (0..args.count)
                .map(|_| Point::new(rng.gen_range(0. ..800.), rng.gen_range(0. ..800.)))
                .collect()
        }
    };
    let sweeper_builder = SweeperBuilder::new(sites);

    let mut observer = StatsObserver::default();
    let diagram = sweeper_builder
        .clone()
        .build()
        .sweep_with_observer(&mut observer);
    println!(
        "{} sites, {} edges, {} site events, {} circle events ({} scheduled, {} discarded), max beach line {}",
        diagram.sites().len(),
        diagram.edges().len(),
        observer.site_events,
        observer.circle_events,
        observer.scheduled,
        observer.discarded,
        observer.max_arcs,
    );

    if let Some(query) = args.query {
        match diagram.nearest_site(query) {
            Ok(nearest) => println!(
                "nearest site to ({}, {}): {} at ({}, {}), distance {}",
                query.x,
                query.y,
                nearest.site.as_usize(),
                nearest.point.x,
                nearest.point.y,
                nearest.distance
            ),
            Err(err) => println!("{err}"),
        }
    }

    if args.bench_count > 1 {
        // measure time with dummy observer
        let start = std::time::Instant::now();
        for _ in 0..args.bench_count {
            let _ = sweeper_builder.clone().build().sweep();
        }
        let duration = start.elapsed() / args.bench_count;
        println!("{:?} per sweep", duration);
    }

    if let Some(output_path) = args.output {
        draw_svg(&diagram, args.query, output_path);
    }
}

#[derive(Default)]
struct StatsObserver {
    site_events: u64,
    circle_events: u64,
    scheduled: u64,
    discarded: usize,
    max_arcs: usize,
}

impl Observer for StatsObserver {
    fn site_event(&mut self, _site: SiteId, context: &Context) {
        self.site_events += 1;
        self.max_arcs = self.max_arcs.max(context.beach_line.len());
    }

    fn circle_event(&mut self, _event: &CircleEvent, context: &Context) {
        self.circle_events += 1;
        self.max_arcs = self.max_arcs.max(context.beach_line.len());
    }

    fn circle_event_scheduled(&mut self, _event: &CircleEvent, _context: &Context) {
        self.scheduled += 1;
    }

    fn sweep_done(&mut self, context: &Context) {
        self.discarded = context.circle_events.discarded();
    }
}
