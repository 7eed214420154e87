mod utils;
pub mod common;
pub mod data;
pub mod inspectors;

use std::path::PathBuf;
use std::time::Instant;
use crate::common::{ModelJson, PrepConfig};
use crate::data::{write_pretty_json, parse_labels_file, SettingsJson};
use crate::inspectors::{inspect_model, ModelGeometry};

/// Assembles the model configuration for `platform` and a square model input of
/// `image_size` pixels.
///
/// A missing label file or a model that cannot be inspected only produce warnings; the
/// record then keeps its placeholder labels or zeroed geometry.
pub fn build_model_json(config: &PrepConfig, platform: &str, image_size: u32) -> anyhow::Result<ModelJson> {
    let mut model_json = ModelJson::new(config, platform, image_size);
    model_json.labels = parse_labels_file(&config.labels_path)?;

    let now = Instant::now();
    match inspect_geometry(config, image_size) {
        Ok(geometry) => model_json.apply_geometry(&geometry),
        Err(err) => log::warn!("Error processing model {}: {:#}", config.model_path.display(), err),
    }
    log::debug!("Model inspection time: {:?}", now.elapsed());

    if !model_json.labels_match_classes() {
        log::warn!(
            "Number of labels ({}) does not match number of classes ({}).",
            model_json.labels.len(),
            model_json.classes,
        );
    }

    Ok(model_json)
}

fn inspect_geometry(config: &PrepConfig, image_size: u32) -> anyhow::Result<ModelGeometry> {
    let report = inspect_model(config)?;

    // informational only, the configured image size always wins
    let size = image_size as usize;
    match report.input_hw() {
        Some((h, w)) if h != 0 && w != 0 && (h != size || w != size) => {
            log::warn!("Model input is {}x{} but image size {} was requested", w, h, image_size);
        }
        Some(_) => {}
        None => log::debug!("Input 0 is not an image tensor: {:?}", report.in_dimss().first()),
    }

    let geometry = ModelGeometry::from_report(&report)?;
    if !geometry.quant.is_quantized() {
        log::info!("Output 0 carries no quantization parameters");
    }
    Ok(geometry)
}

/// Writes `model_json` to the configured output path and echoes it to stdout.
pub fn write_model_json(config: &PrepConfig, model_json: &ModelJson) -> anyhow::Result<PathBuf> {
    let file_path = config.model_json_path();
    let json = write_pretty_json(&file_path, model_json)?;

    println!("JSON file has been generated and saved to {}", file_path.display());
    println!("\nGenerated JSON:");
    println!("{}", json);

    Ok(file_path)
}

pub fn generate_model_json(config: &PrepConfig, platform: &str, image_size: u32) -> anyhow::Result<ModelJson> {
    let model_json = build_model_json(config, platform, image_size)?;
    write_model_json(config, &model_json)?;
    Ok(model_json)
}

/// Writes the default event settings unless a settings file is already in place.
/// Returns the written path, `None` when an existing file was left alone.
pub fn generate_settings_json(config: &PrepConfig) -> anyhow::Result<Option<PathBuf>> {
    let file_path = config.settings_json_path();
    if file_path.exists() {
        log::info!("Keeping existing {}", file_path.display());
        return Ok(None);
    }

    write_pretty_json(&file_path, &SettingsJson::default())?;
    log::info!("Default settings saved to {}", file_path.display());
    Ok(Some(file_path))
}
