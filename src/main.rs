// Example runner: tracks markers through a directory of still frames.
//
// Usage: marker_tracker <input_dir> <output_dir> [config.json]
//
// Every PNG/JPEG in `input_dir` is treated as one captured frame, in file-name
// order. Annotated frames are written to `output_dir` and the actuator bytes for
// each frame are logged. Set `RUST_LOG=debug` for per-pass timings.

use log::{info, warn};
use marker_tracker::core_modules::utils::image_helper::image_helper;
use marker_tracker::{FrameWorker, TrackerConfig};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: marker_tracker <input_dir> <output_dir> [config.json]");
        return Ok(());
    }
    let input_dir = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);

    let config = match args.get(3) {
        Some(path) => TrackerConfig::from_json_file(path)?,
        None => TrackerConfig::default(),
    };
    info!("tracker config: {config:?}");

    std::fs::create_dir_all(output_dir)?;
    let frames = image_helper::list_frames(input_dir)?;
    info!("{} frames in {}", frames.len(), input_dir.display());

    // --- 2. Worker Initialization ---
    let worker = FrameWorker::spawn(config)?;

    // --- 3. Main Processing Loop ---
    for path in &frames {
        let frame = match image_helper::load(path) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("dropping frame {}: {err}", path.display());
                continue;
            }
        };

        let outcome = worker.process(frame).await?;
        let report = match outcome.report {
            Ok(report) => report,
            Err(err) => {
                warn!("pass failed for {}: {err}", path.display());
                continue;
            }
        };

        let bytes = report.command.to_bytes();
        info!(
            "frame {} ({}): {} tracks, actuator {:02x?}",
            report.frame_index,
            path.display(),
            report.tracks.len(),
            bytes
        );
        for track in &report.tracks {
            let bbox = track.bbox.one_based();
            info!(
                "  track {} age {}: x={} y={} w={} h={}",
                track.id, track.age, bbox.x, bbox.y, bbox.w, bbox.h
            );
        }

        // --- 4. Write Output Frame ---
        let file_name = path.file_stem().unwrap_or_default().to_string_lossy();
        let output_path = output_dir.join(format!("{file_name}.png"));
        image_helper::save(&output_path, &outcome.frame)?;
    }

    worker.shutdown().await;
    println!("Processing complete. Output saved to {}", output_dir.display());
    Ok(())
}
