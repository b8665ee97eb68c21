//! Load projection inputs from a JSON document

use super::ProjectionInputs;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read inputs from a JSON file; absent fields take the calculator defaults.
/// The result is validated before it is returned.
pub fn load_inputs(path: &Path) -> Result<ProjectionInputs, Box<dyn Error>> {
    let file = File::open(path)?;
    let inputs: ProjectionInputs = serde_json::from_reader(BufReader::new(file))?;
    inputs.validate()?;
    log::debug!("loaded projection inputs from {}", path.display());
    Ok(inputs)
}

/// Parse inputs from a JSON string (used by the Lambda handler)
pub fn parse_inputs(json: &str) -> Result<ProjectionInputs, Box<dyn Error + Send + Sync>> {
    let inputs: ProjectionInputs = if json.trim().is_empty() {
        ProjectionInputs::default()
    } else {
        serde_json::from_str(json)?
    };
    inputs.validate()?;
    Ok(inputs)
}
