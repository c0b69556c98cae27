//! Preset profile parsing
//!
//! Detection conditions are stored in a flat text profile of named
//! sections:
//!
//! ```text
//! #WORM_ASSAY
//! minArea=350
//! maxArea=8000
//! }
//! ```
//!
//! A section starts at a `#<TITLE>` header, carries `key=value` lines with
//! the nine camelCase threshold keys, and ends at a lone `}`. Keys not
//! present keep their stock default; each section validates on close. The
//! pipeline itself only ever consumes the resulting
//! [`DetectionCondition`] struct.

use crate::condition::DetectionCondition;
use crate::error::{DetectError, DetectResult};

/// One parsed profile section.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPreset {
    pub name: String,
    pub condition: DetectionCondition,
}

/// Parse every preset section of a profile, in file order.
pub fn parse_presets(text: &str) -> DetectResult<Vec<NamedPreset>> {
    let mut presets = Vec::new();
    let mut current: Option<NamedPreset> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let number = i + 1;
        if line.is_empty() {
            continue;
        }

        match current.take() {
            None => {
                let Some(title) = line.strip_prefix('#') else {
                    return Err(DetectError::PresetSyntax {
                        line: number,
                        message: format!("expected a #TITLE header, got {:?}", line),
                    });
                };
                let title = title.trim();
                if title.is_empty() {
                    return Err(DetectError::PresetSyntax {
                        line: number,
                        message: "empty preset title".to_string(),
                    });
                }
                current = Some(NamedPreset {
                    name: title.to_string(),
                    condition: DetectionCondition::default(),
                });
            }
            Some(mut preset) => {
                if line == "}" {
                    preset
                        .condition
                        .validate()
                        .map_err(|e| DetectError::PresetSyntax {
                            line: number,
                            message: format!("preset {:?}: {}", preset.name, e),
                        })?;
                    presets.push(preset);
                } else {
                    let Some((key, value)) = line.split_once('=') else {
                        return Err(DetectError::PresetSyntax {
                            line: number,
                            message: format!("expected key=value or }}, got {:?}", line),
                        });
                    };
                    apply_key(&mut preset.condition, key.trim(), value.trim(), number)?;
                    current = Some(preset);
                }
            }
        }
    }

    if let Some(preset) = current {
        return Err(DetectError::PresetSyntax {
            line: text.lines().count(),
            message: format!("preset {:?} is missing its closing }}", preset.name),
        });
    }

    Ok(presets)
}

/// Load one named preset from a profile.
pub fn find_preset(text: &str, name: &str) -> DetectResult<DetectionCondition> {
    parse_presets(text)?
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.condition)
        .ok_or_else(|| DetectError::PresetNotFound(name.to_string()))
}

/// Render a condition as one profile section, parseable back by
/// [`parse_presets`].
pub fn format_preset(name: &str, condition: &DetectionCondition) -> String {
    format!(
        "#{}\n\
         minArea={}\n\
         maxArea={}\n\
         minBoundingSize={}\n\
         maxBoundingSize={}\n\
         spurThreshold={}\n\
         minMeanFat={}\n\
         maxMeanFat={}\n\
         minTrueLength={}\n\
         maxTrueLength={}\n\
         }}\n",
        name,
        condition.min_area,
        condition.max_area,
        condition.min_bounding_size,
        condition.max_bounding_size,
        condition.spur_threshold,
        condition.min_mean_fat,
        condition.max_mean_fat,
        condition.min_true_length,
        condition.max_true_length,
    )
}

fn apply_key(
    condition: &mut DetectionCondition,
    key: &str,
    value: &str,
    line: usize,
) -> DetectResult<()> {
    match key {
        "minArea" => condition.min_area = parse_int(key, value, line)?,
        "maxArea" => condition.max_area = parse_int(key, value, line)?,
        "minBoundingSize" => condition.min_bounding_size = parse_int(key, value, line)?,
        "maxBoundingSize" => condition.max_bounding_size = parse_int(key, value, line)?,
        "spurThreshold" => condition.spur_threshold = parse_int(key, value, line)?,
        "minMeanFat" => condition.min_mean_fat = parse_float(key, value, line)?,
        "maxMeanFat" => condition.max_mean_fat = parse_float(key, value, line)?,
        "minTrueLength" => condition.min_true_length = parse_float(key, value, line)?,
        "maxTrueLength" => condition.max_true_length = parse_float(key, value, line)?,
        _ => {
            return Err(DetectError::PresetSyntax {
                line,
                message: format!("unknown key {:?}", key),
            });
        }
    }
    Ok(())
}

fn parse_int(key: &str, value: &str, line: usize) -> DetectResult<u32> {
    value.parse().map_err(|_| DetectError::PresetSyntax {
        line,
        message: format!("{} expects an integer, got {:?}", key, value),
    })
}

fn parse_float(key: &str, value: &str, line: usize) -> DetectResult<f64> {
    value.parse().map_err(|_| DetectError::PresetSyntax {
        line,
        message: format!("{} expects a number, got {:?}", key, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = "\
#WORM_ASSAY
minArea=350
maxArea=8000
minBoundingSize=45
maxBoundingSize=250
spurThreshold=6
minMeanFat=8
maxMeanFat=45
minTrueLength=250
maxTrueLength=2000
}

#LARVA_COUNT
minArea=20
maxArea=900
minBoundingSize=4
maxBoundingSize=80
minTrueLength=10
maxTrueLength=400
}
";

    #[test]
    fn test_parse_full_profile() {
        let presets = parse_presets(PROFILE).unwrap();
        assert_eq!(presets.len(), 2);

        assert_eq!(presets[0].name, "WORM_ASSAY");
        let c = presets[0].condition;
        assert_eq!(c.min_area, 350);
        assert_eq!(c.max_area, 8000);
        assert_eq!(c.min_bounding_size, 45);
        assert_eq!(c.max_bounding_size, 250);
        assert_eq!(c.spur_threshold, 6);
        assert_eq!(c.min_mean_fat, 8.0);
        assert_eq!(c.max_mean_fat, 45.0);
        assert_eq!(c.min_true_length, 250.0);
        assert_eq!(c.max_true_length, 2000.0);

        // keys left out keep their defaults
        assert_eq!(presets[1].name, "LARVA_COUNT");
        assert_eq!(presets[1].condition.min_area, 20);
        assert_eq!(presets[1].condition.spur_threshold, 6);
    }

    #[test]
    fn test_find_preset() {
        let c = find_preset(PROFILE, "LARVA_COUNT").unwrap();
        assert_eq!(c.max_area, 900);

        assert!(matches!(
            find_preset(PROFILE, "NO_SUCH"),
            Err(DetectError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_presets("#P\nminarea=1\n}\n").unwrap_err();
        assert!(matches!(err, DetectError::PresetSyntax { line: 2, .. }));
    }

    #[test]
    fn test_bad_value_rejected() {
        let err = parse_presets("#P\nminArea=lots\n}\n").unwrap_err();
        assert!(matches!(err, DetectError::PresetSyntax { line: 2, .. }));
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(parse_presets("minArea=1\n}\n").is_err());
    }

    #[test]
    fn test_unterminated_section_rejected() {
        assert!(parse_presets("#P\nminArea=400\n").is_err());
    }

    #[test]
    fn test_invalid_range_rejected_at_close() {
        let err = parse_presets("#P\nminArea=500\nmaxArea=100\n}\n").unwrap_err();
        assert!(matches!(err, DetectError::PresetSyntax { line: 4, .. }));
    }

    #[test]
    fn test_format_round_trip() {
        let condition = DetectionCondition::default()
            .with_area(100, 5000)
            .with_mean_fat(2.5, 30.0);
        let text = format_preset("ROUND_TRIP", &condition);
        let parsed = find_preset(&text, "ROUND_TRIP").unwrap();
        assert_eq!(parsed, condition);
    }
}
