use noise_core::sampler::{Domain, sample_grid_par2};
use noise_core::{NoiseError, Preset, analyze};
use tracing::info;

const SEED: u32 = 2025;
const PREVIEW: Preset = Preset::Terrain;
const SHADES: &[u8] = b" .:-=+*#%@";

// Print the analysis of every preset and a small ASCII preview of one of them
fn main() -> Result<(), NoiseError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    for preset in Preset::ALL {
        let g = preset.generator(SEED)?;
        let report = analyze(&g, 10_000)?;
        info!(
            preset = preset.name(),
            kernel = ?preset.kernel(),
            min = report.min,
            max = report.max,
            mean = report.mean,
            std = report.std_dev,
            within_nominal = report.within_nominal(),
        );
    }

    let g = PREVIEW.generator(SEED)?;
    let view = g.in_mode(PREVIEW.mode());
    let grid = sample_grid_par2(&view, Domain::unit(), [72, 28])?;
    let norm = grid.normalized_values();
    for row in norm.chunks(grid.shape[0]) {
        let line: String = row
            .iter()
            .map(|v| SHADES[((v * (SHADES.len() - 1) as f64).round()) as usize] as char)
            .collect();
        println!("{line}");
    }
    Ok(())
}
