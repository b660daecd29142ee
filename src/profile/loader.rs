use std::error::Error;
use std::path::Path;

use crate::profile::profile_model::ServiceProfile;

/// Load a service profile from a YAML file.
pub fn load_profile(path: &Path) -> Result<ServiceProfile, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    let profile: ServiceProfile =
        serde_yaml::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))?;
    if profile.search_candidates.is_empty() {
        return Err(format!("{}: profile has no search_candidates", path.display()).into());
    }
    Ok(profile)
}
