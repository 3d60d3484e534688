use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use truck_loader::render;
use truck_loader::request::{self, PlanRequest, PlanResponse};
use truck_loader::types::{Crate, Dims, Truck};

#[derive(Parser)]
#[command(
    name = "truck_loader",
    about = "Plans how to load rectangular crates into a truck"
)]
struct Cli {
    /// Truck cargo volume (WxHxL, e.g. 10x8x20)
    #[arg(long, required_unless_present = "input")]
    truck: Option<String>,

    /// Crates as ID:WxHxL, loaded in the given order (e.g. 1:5x5x5 2:2x4x1)
    #[arg(long = "crates", num_args = 1.., conflicts_with = "input")]
    crates: Vec<String>,

    /// Read truck and crates from a JSON plan request instead
    #[arg(long, conflicts_with = "truck")]
    input: Option<PathBuf>,

    /// Backtracks allowed before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Skip repeated rotations of crates with equal sides
    #[arg(long)]
    distinct_orientations: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show ASCII layers of the loaded truck
    #[arg(long)]
    layout: bool,

    /// Log search progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<Dims, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("invalid dimensions '{}', expected WxHxL", s));
    }
    let mut values = [0u32; 3];
    for (value, (part, name)) in values
        .iter_mut()
        .zip(parts.iter().zip(["width", "height", "length"]))
    {
        *value = part
            .parse::<u32>()
            .map_err(|_| format!("invalid {} in '{}'", name, s))?;
    }
    let dims = Dims::new(values[0], values[1], values[2]);
    if !dims.is_valid() {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok(dims)
}

fn parse_crate(s: &str) -> Result<Crate, String> {
    let (id, dims) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid crate '{}', expected ID:WxHxL", s))?;
    let id = id
        .parse::<u32>()
        .map_err(|_| format!("invalid crate id in '{}'", s))?;
    Ok(Crate {
        id,
        dims: parse_dimensions(dims)?,
    })
}

fn read_request(cli: &Cli) -> Result<PlanRequest, String> {
    let mut req = match &cli.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str::<PlanRequest>(&text)
                .map_err(|e| format!("invalid plan request in {}: {}", path.display(), e))?
        }
        None => {
            let truck = cli.truck.as_deref().ok_or("missing --truck")?;
            PlanRequest {
                truck: Truck {
                    dims: parse_dimensions(truck)?,
                },
                crates: cli
                    .crates
                    .iter()
                    .map(String::as_str)
                    .map(parse_crate)
                    .collect::<Result<Vec<_>, _>>()?,
                max_attempts: None,
                distinct_orientations: false,
            }
        }
    };
    if cli.max_attempts.is_some() {
        req.max_attempts = cli.max_attempts;
    }
    req.distinct_orientations |= cli.distinct_orientations;
    Ok(req)
}

fn print_plan(resp: &PlanResponse) {
    for i in &resp.instructions {
        let horizontal = if i.turn_horizontal {
            " [turned horizontally]"
        } else {
            ""
        };
        let vertical = if i.turn_vertical {
            " [turned vertically]"
        } else {
            ""
        };
        println!(
            "Step {}: crate {} {} @ {}{}{}",
            i.step,
            i.crate_id,
            i.placed,
            i.position(),
            horizontal,
            vertical
        );
    }
    println!(
        "Summary: {} crate{} loaded, {:.1}% of truck volume used",
        resp.instructions.len(),
        if resp.instructions.len() == 1 { "" } else { "s" },
        resp.utilization_percent,
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let req = read_request(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let resp = request::plan(&req).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&resp) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if resp.success {
        print_plan(&resp);
        if cli.layout {
            print!("{}", render::render_layers(resp.truck, &resp.plan()));
        }
    } else {
        eprintln!(
            "No loading plan found after {} attempts ({:?}). The crates do not seem to fit in the truck.",
            resp.attempts, resp.outcome
        );
    }

    if !resp.success {
        std::process::exit(2);
    }
}
