use crate::preset::preset_model::Configuration;

/// SHA-1 over the canonical flattened settings, hex-encoded.
///
/// Lets a report be tied back to the exact input it was produced from even
/// after the preset file has been edited. Field order is part of the
/// identity because apply order is observable under aliasing.
pub fn config_fingerprint(config: &Configuration) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    for setting in &config.settings {
        hasher.update(setting.field.as_bytes());
        hasher.update(b"=");
        hasher.update(setting.value.as_field_text().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
