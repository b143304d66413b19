use log::warn;
use shape_matcher::config::{load_config, MatchDemoConfig};
use shape_matcher::detector::Matcher;
use shape_matcher::edges::compute_gradient_field;
use shape_matcher::image::io::{load_raster, save_byte_plane, write_json_file};
use shape_matcher::image::RasterU8;
use shape_matcher::orientation::{quantize_orientations, spread_orientations_with};
use shape_matcher::pyramid::{ScalePyramid, ScalePyramidOptions};
use shape_matcher::response::LinearMemories;
use shape_matcher::template::{Template, TemplateBuilder};
use std::env;
use std::error::Error;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frame = load_raster(&config.frame, config.color)?;
    let templates = build_templates(&config)?;
    println!(
        "Built {} templates from {} exemplars",
        templates.len(),
        config.templates.len()
    );

    let matcher = Matcher::new(config.match_params.clone());
    let report = matcher.match_with_report(&frame.as_view(), &templates)?;
    write_json_file(&config.output.report_json, &report)?;
    if let Some(path) = &config.output.templates_json {
        write_json_file(path, &templates)?;
        println!("Saved templates to {}", path.display());
    }
    if let Some(dir) = &config.output.debug_dir {
        dump_frame_planes(&frame, &config, dir)?;
        println!("Saved frame planes to {}", dir.display());
    }

    for det in &report.detections {
        println!(
            "{:<16} x={:<5} y={:<5} {}x{} scale={:.2} score={:.3}",
            det.class_id, det.rect.x, det.rect.y, det.rect.w, det.rect.h, det.scale, det.score
        );
    }
    for skip in &report.skipped {
        println!("skipped #{} {}: {}", skip.template_index, skip.class_id, skip.message);
    }
    println!(
        "Saved {} detections to {} ({:.2} ms)",
        report.detections.len(),
        config.output.report_json.display(),
        report.timings.total_ms
    );
    Ok(())
}

fn build_templates(config: &MatchDemoConfig) -> Result<Vec<Template>, Box<dyn Error>> {
    let mut templates = Vec::new();
    for spec in &config.templates {
        let exemplar = load_raster(&spec.path, config.color)?;
        let builder = TemplateBuilder::new(spec.params(&config.template_params));
        match &spec.scales {
            Some(scales) => {
                let options = ScalePyramidOptions::new(scales.clone());
                let pyramid = ScalePyramid::build(&exemplar.as_view(), &options)?;
                for (level, built) in pyramid
                    .levels()
                    .iter()
                    .zip(builder.build_pyramid(&spec.class_id, &pyramid, spec.roi))
                {
                    match built {
                        Ok(template) => templates.push(template),
                        Err(err) => warn!(
                            "match_demo: '{}' at scale {:.3} not trained: {}",
                            spec.class_id, level.scale, err
                        ),
                    }
                }
            }
            None => templates.push(builder.build(
                spec.class_id.clone(),
                &exemplar.as_view(),
                spec.roi,
            )?),
        }
    }
    Ok(templates)
}

fn dump_frame_planes(frame: &RasterU8, config: &MatchDemoConfig, dir: &Path) -> Result<(), Box<dyn Error>> {
    let params = &config.match_params;
    let field = compute_gradient_field(&frame.as_view())?;
    let quantized = quantize_orientations(&field, params.weak_threshold, params.vote_threshold);
    let spread = spread_orientations_with(&quantized, params.t, params.spread_kernel);
    save_byte_plane(&quantized, &dir.join("quantized.png"), true)?;
    save_byte_plane(&spread, &dir.join("spread.png"), true)?;
    let linear = LinearMemories::from_spread(&spread, params.t)?;
    for label in 0..8 {
        let response = linear.delinearize(label);
        save_byte_plane(&response, &dir.join(format!("response_{label}.png")), true)?;
    }
    Ok(())
}

fn usage() -> String {
    "Usage: match_demo <config.json>".to_string()
}
