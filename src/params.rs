use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceLocation {
    Torso,
    Wrist,
}

impl DeviceLocation {
    // non-intercept features the mode's model consumes
    pub fn feature_count(self) -> usize {
        match self {
            DeviceLocation::Torso => 2,
            DeviceLocation::Wrist => 3,
        }
    }
}

impl FromStr for DeviceLocation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "torso" => Ok(DeviceLocation::Torso),
            "wrist" => Ok(DeviceLocation::Wrist),
            other => Err(anyhow!(
                "unrecognized device location '{}', expected 'torso' or 'wrist'",
                other
            )),
        }
    }
}

impl fmt::Display for DeviceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceLocation::Torso => write!(f, "torso"),
            DeviceLocation::Wrist => write!(f, "wrist"),
        }
    }
}

/// Weights ordered `[intercept, dominant frequency, (frequency squared,
/// wrist only), peak-to-peak]`; threshold in (0, 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeParameters {
    pub weights: Vec<f64>,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParameters {
    pub torso: ModeParameters,
    pub wrist: ModeParameters,
}

impl ClassifierParameters {
    pub fn pretrained() -> Self {
        Self {
            torso: ModeParameters {
                weights: vec![-8.0, 3.2, 0.6],
                threshold: 0.5,
            },
            wrist: ModeParameters {
                weights: vec![-11.0, 7.5, -1.25, 0.6],
                threshold: 0.5,
            },
        }
    }

    pub fn mode(&self, location: DeviceLocation) -> &ModeParameters {
        match location {
            DeviceLocation::Torso => &self.torso,
            DeviceLocation::Wrist => &self.wrist,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut buf = Vec::new();
        File::open(&path)
            .with_context(|| format!("Failed to open {}", path.as_ref().display()))?
            .read_to_end(&mut buf)?;
        let params = bincode::deserialize(&buf)
            .with_context(|| format!("Invalid parameter file {}", path.as_ref().display()))?;
        Ok(params)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bin = bincode::serialize(self)?;
        File::create(&path)
            .with_context(|| format!("Failed to create {}", path.as_ref().display()))?
            .write_all(&bin)?;
        Ok(())
    }
}

impl Default for ClassifierParameters {
    fn default() -> Self {
        Self::pretrained()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_str() {
        assert_eq!("torso".parse::<DeviceLocation>().unwrap(), DeviceLocation::Torso);
        assert_eq!(" Wrist ".parse::<DeviceLocation>().unwrap(), DeviceLocation::Wrist);
        assert!("hip".parse::<DeviceLocation>().is_err());
    }

    #[test]
    fn test_pretrained_shapes() {
        let params = ClassifierParameters::pretrained();
        assert_eq!(
            params.torso.weights.len(),
            DeviceLocation::Torso.feature_count() + 1
        );
        assert_eq!(
            params.wrist.weights.len(),
            DeviceLocation::Wrist.feature_count() + 1
        );
        for mode in [&params.torso, &params.wrist] {
            assert!(mode.threshold > 0.0 && mode.threshold < 1.0);
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join("carl_params_test.bin");
        let params = ClassifierParameters::pretrained();
        params.save(&path).unwrap();
        let loaded = ClassifierParameters::load(&path).unwrap();
        assert_eq!(loaded, params);
        let _ = std::fs::remove_file(&path);
    }
}
