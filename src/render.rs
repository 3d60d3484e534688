use crate::types::{LoadingInstruction, LoadingPlan, Truck};

const MAX_COLUMNS: f64 = 60.0;
const MAX_ROWS: f64 = 30.0;
const MAX_LAYERS: u32 = 40;
const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Symbol drawn for the crate loaded at `step`.
pub fn step_symbol(step: usize) -> char {
    SYMBOLS[(step.saturating_sub(1)) % SYMBOLS.len()] as char
}

/// Top-down slices of the truck, one per height level, x across and z down.
pub fn render_layers(truck: Truck, plan: &LoadingPlan) -> String {
    let dims = truck.dims;
    let scale = f64::min(
        1.0,
        f64::min(MAX_COLUMNS / dims.width as f64, MAX_ROWS / dims.length as f64),
    );
    let cols = ((dims.width as f64 * scale).round() as usize).max(1);
    let rows = ((dims.length as f64 * scale).round() as usize).max(1);

    let steps = plan.in_step_order();
    let mut out = String::new();

    for y in 0..dims.height.min(MAX_LAYERS) {
        out.push_str(&format!("Layer y={}:\n", y));
        let mut grid = vec![vec!['.'; cols]; rows];
        for i in steps.iter().filter(|i| (i.y..i.y + i.placed.height).contains(&y)) {
            paint(&mut grid, i, scale);
        }

        let border = format!("+{}+\n", "-".repeat(cols));
        out.push_str(&border);
        for row in &grid {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push_str(&border);
    }
    if dims.height > MAX_LAYERS {
        out.push_str(&format!("... {} more layers\n", dims.height - MAX_LAYERS));
    }

    for i in &steps {
        out.push_str(&format!(
            "{} = crate {} ({})\n",
            step_symbol(i.step),
            i.crate_id,
            i.placed
        ));
    }
    out
}

fn paint(grid: &mut [Vec<char>], i: &LoadingInstruction, scale: f64) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    let c0 = ((i.x as f64 * scale) as usize).min(cols - 1);
    let c1 = (((i.x + i.placed.width) as f64 * scale).ceil() as usize).clamp(c0 + 1, cols);
    let r0 = ((i.z as f64 * scale) as usize).min(rows - 1);
    let r1 = (((i.z + i.placed.length) as f64 * scale).ceil() as usize).clamp(r0 + 1, rows);

    let symbol = step_symbol(i.step);
    for row in &mut grid[r0..r1] {
        for cell in &mut row[c0..c1] {
            *cell = symbol;
        }
    }
}
