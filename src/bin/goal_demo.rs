use goal_perceptor::config::demo::{self, DemoConfig};
use goal_perceptor::diagnostics::DetectionReport;
use goal_perceptor::image::io::{load_ycbcr_image, save_overlay, write_json_file, OverlayBox};
use goal_perceptor::image::YCbCrImage;
use goal_perceptor::{Frame, GoalDetector};
use std::env;
use std::path::Path;

const CANDIDATE_RGB: [u8; 3] = [255, 160, 0];
const ACCEPTED_RGB: [u8; 3] = [255, 0, 0];

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "goal_demo".to_string());
    let config_path = args
        .next()
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = demo::load_config(Path::new(&config_path))?;

    let image = load_ycbcr_image(&config.input)?;
    let report = detect(&config, &image);
    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.overlay {
        save_overlay(&image, &overlay_boxes(&report), path)?;
        println!("Overlay written to {}", path.display());
    }
    Ok(())
}

fn detect(config: &DemoConfig, image: &YCbCrImage) -> DetectionReport {
    let mut frame = Frame::new(
        image.as_view(),
        &config.camera,
        &config.classifier,
        &config.field_boundary,
    )
    .with_view(config.view)
    .with_obstacles(&config.obstacles)
    .with_timestamp(config.timestamp_ms);
    if let Some(body) = &config.body_contour {
        frame = frame.with_body_contour(body);
    }
    GoalDetector::new(config.params.clone()).process_with_diagnostics(&frame)
}

fn print_text_summary(report: &DetectionReport) {
    let trace = &report.trace;
    println!("Detection summary");
    println!("  image: {}x{} ({:?})", trace.input.width, trace.input.height, trace.input.view);
    if let Some(reason) = &trace.skipped {
        println!("  skipped: {reason}");
    }
    if let Some(row) = trace.scan_height {
        println!("  scan row: {row}");
    }
    println!("  candidates: {}", trace.candidates);
    println!("  rejected: {}", trace.rejected.len());
    for r in &trace.rejected {
        println!("    spot {} at x={}: {:?}", r.spot.id, r.spot.mid.x, r.reason);
    }
    println!("  scored:");
    for s in trace.scored.iter().rev() {
        let distance = s
            .distance()
            .map(|d| format!("{d:.0} mm"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    spot {} cols [{}, {}) rows [{}, {}] side={:?} vote={:.2} dist={} validity={:.1}",
            s.id,
            s.start,
            s.end,
            s.top.y,
            s.base.y,
            s.side,
            s.vote_point,
            distance,
            s.validity
        );
    }
    let percept = &report.percept;
    println!("  posts: {}", percept.posts.len());
    for p in &percept.posts {
        println!(
            "    {:?}: image ({}, {}) field ({:.0}, {:.0}) validity {:.1}",
            p.side,
            p.position_in_image.x,
            p.position_in_image.y,
            p.position_on_field.x,
            p.position_on_field.y,
            p.validity
        );
    }
    println!("  complete goal: {}", percept.complete_goal_seen);
    println!("  latency_ms: {:.3}", percept.latency_ms);
    for stage in &trace.timings.stages {
        println!("    {:<9} {:.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn overlay_boxes(report: &DetectionReport) -> Vec<OverlayBox> {
    let accepted: Vec<_> = report.percept.posts.iter().map(|p| p.position_in_image).collect();
    report
        .trace
        .scored
        .iter()
        .map(|s| {
            let foot = nalgebra::Point2::new(s.center_x(), s.base.y);
            OverlayBox {
                x0: s.start,
                y0: s.top.y,
                x1: s.end,
                y1: s.base.y,
                rgb: if accepted.contains(&foot) {
                    ACCEPTED_RGB
                } else {
                    CANDIDATE_RGB
                },
            }
        })
        .collect()
}
