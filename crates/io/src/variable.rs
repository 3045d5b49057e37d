//! Climatology field identities and their fixed metadata.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::IoError;

const WOA05_DOCUMENTATION: &str = "http://www.nodc.noaa.gov/OC5/WOA05/pr_woa05.html";

/// Descriptive attributes written alongside a climatology field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableMetadata {
    /// NetCDF variable name.
    pub name: &'static str,
    /// Human-readable `long_name`.
    pub long_name: &'static str,
    /// CF `standard_name`.
    pub standard_name: &'static str,
    /// UDUNITS-style `units`.
    pub units: &'static str,
    /// Publication describing the analysis.
    pub references: &'static str,
    /// Location of the product documentation.
    pub documentation: &'static str,
}

/// The physical quantity a grid represents.
///
/// Each WOA05 ASCII product is identified by a one-character code at the start
/// of its file name (`t00an1`, `s13an1`, ...). Potential temperature has no
/// ASCII distribution; it is derived from temperature and salinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// In-situ temperature (`t`).
    Temperature,
    /// Salinity (`s`).
    Salinity,
    /// Dissolved oxygen (`o`).
    DissolvedOxygen,
    /// Percent oxygen saturation (`O`).
    OxygenSaturation,
    /// Apparent oxygen utilization (`A`).
    ApparentOxygenUtilization,
    /// Silicate (`i`).
    Silicate,
    /// Phosphate (`p`).
    Phosphate,
    /// Nitrate (`n`).
    Nitrate,
    /// Potential temperature referenced to the surface.
    PotentialTemperature,
}

impl VariableKind {
    /// Every identity, in code order.
    pub const ALL: [VariableKind; 9] = [
        VariableKind::Temperature,
        VariableKind::Salinity,
        VariableKind::DissolvedOxygen,
        VariableKind::OxygenSaturation,
        VariableKind::ApparentOxygenUtilization,
        VariableKind::Silicate,
        VariableKind::Phosphate,
        VariableKind::Nitrate,
        VariableKind::PotentialTemperature,
    ];

    /// The ASCII product code, if the field is distributed as ASCII.
    pub fn code(self) -> Option<char> {
        match self {
            Self::Temperature => Some('t'),
            Self::Salinity => Some('s'),
            Self::DissolvedOxygen => Some('o'),
            Self::OxygenSaturation => Some('O'),
            Self::ApparentOxygenUtilization => Some('A'),
            Self::Silicate => Some('i'),
            Self::Phosphate => Some('p'),
            Self::Nitrate => Some('n'),
            Self::PotentialTemperature => None,
        }
    }

    /// Resolve a one-character product code. Codes are case sensitive: `o` is
    /// dissolved oxygen and `O` is oxygen saturation.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownVariable`] for any other character.
    pub fn from_code(code: char) -> Result<Self, IoError> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == Some(code))
            .ok_or_else(|| IoError::UnknownVariable {
                code: code.to_string(),
            })
    }

    /// Resolve the identity from a WOA05 file name such as `t00an1.txt`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownVariable`] if the file name is empty or its
    /// first character is not a product code.
    pub fn from_file_name(path: &Path) -> Result<Self, IoError> {
        let stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let code = stem.chars().next().ok_or_else(|| IoError::UnknownVariable {
            code: path.display().to_string(),
        })?;
        Self::from_code(code)
    }

    /// Fixed descriptive metadata.
    pub fn metadata(self) -> VariableMetadata {
        match self {
            Self::Temperature => VariableMetadata {
                name: "temperature",
                long_name: "Objectively analyzed mean temperature",
                standard_name: "sea_water_temperature",
                units: "degC",
                references: "Locarnini, R. A., et al., 2006. World Ocean Atlas 2005, Volume 1: Temperature. NOAA Atlas NESDIS 61",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::Salinity => VariableMetadata {
                name: "salinity",
                long_name: "Objectively analyzed mean salinity",
                standard_name: "sea_water_salinity",
                units: "1e-3",
                references: "Antonov, J. I., et al., 2006. World Ocean Atlas 2005, Volume 2: Salinity. NOAA Atlas NESDIS 62",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::DissolvedOxygen => VariableMetadata {
                name: "oxygen",
                long_name: "Objectively analyzed mean dissolved oxygen",
                standard_name: "volume_fraction_of_oxygen_in_sea_water",
                units: "ml l-1",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 3: Dissolved Oxygen, Apparent Oxygen Utilization, and Oxygen Saturation. NOAA Atlas NESDIS 63",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::OxygenSaturation => VariableMetadata {
                name: "oxygen_saturation",
                long_name: "Objectively analyzed mean percent oxygen saturation",
                standard_name: "fractional_saturation_of_oxygen_in_sea_water",
                units: "percent",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 3: Dissolved Oxygen, Apparent Oxygen Utilization, and Oxygen Saturation. NOAA Atlas NESDIS 63",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::ApparentOxygenUtilization => VariableMetadata {
                name: "aou",
                long_name: "Objectively analyzed mean apparent oxygen utilization",
                standard_name: "apparent_oxygen_utilization",
                units: "ml l-1",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 3: Dissolved Oxygen, Apparent Oxygen Utilization, and Oxygen Saturation. NOAA Atlas NESDIS 63",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::Silicate => VariableMetadata {
                name: "silicate",
                long_name: "Objectively analyzed mean silicate",
                standard_name: "mole_concentration_of_silicate_in_sea_water",
                units: "umol l-1",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 4: Nutrients (phosphate, nitrate, silicate). NOAA Atlas NESDIS 64",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::Phosphate => VariableMetadata {
                name: "phosphate",
                long_name: "Objectively analyzed mean phosphate",
                standard_name: "mole_concentration_of_phosphate_in_sea_water",
                units: "umol l-1",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 4: Nutrients (phosphate, nitrate, silicate). NOAA Atlas NESDIS 64",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::Nitrate => VariableMetadata {
                name: "nitrate",
                long_name: "Objectively analyzed mean nitrate",
                standard_name: "mole_concentration_of_nitrate_in_sea_water",
                units: "umol l-1",
                references: "Garcia, H. E., et al., 2006. World Ocean Atlas 2005, Volume 4: Nutrients (phosphate, nitrate, silicate). NOAA Atlas NESDIS 64",
                documentation: WOA05_DOCUMENTATION,
            },
            Self::PotentialTemperature => VariableMetadata {
                name: "ptemp",
                long_name: "Potential temperature referenced to the sea surface",
                standard_name: "sea_water_potential_temperature",
                units: "degC",
                references: "Fofonoff, N. P. and Millard, R. C., 1983. Algorithms for computation of fundamental properties of seawater. UNESCO Technical Papers in Marine Science 44",
                documentation: WOA05_DOCUMENTATION,
            },
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metadata().name)
    }
}

impl FromStr for VariableKind {
    type Err = IoError;

    /// Accepts a one-character product code or a variable name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.metadata().name == s)
            .ok_or_else(|| IoError::UnknownVariable {
                code: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve() {
        assert_eq!(VariableKind::from_code('t').unwrap(), VariableKind::Temperature);
        assert_eq!(
            VariableKind::from_code('o').unwrap(),
            VariableKind::DissolvedOxygen
        );
        assert_eq!(
            VariableKind::from_code('O').unwrap(),
            VariableKind::OxygenSaturation
        );
        assert_eq!(
            VariableKind::from_code('A').unwrap(),
            VariableKind::ApparentOxygenUtilization
        );
    }

    #[test]
    fn unknown_code_rejected() {
        let err = VariableKind::from_code('x').unwrap_err();
        assert!(matches!(err, IoError::UnknownVariable { code } if code == "x"));
    }

    #[test]
    fn codes_are_unique() {
        let codes: Vec<char> = VariableKind::ALL.iter().filter_map(|k| k.code()).collect();
        assert_eq!(codes.len(), 8);
        for (i, c) in codes.iter().enumerate() {
            assert!(!codes[i + 1..].contains(c));
        }
    }

    #[test]
    fn from_str_accepts_code_or_name() {
        assert_eq!("s".parse::<VariableKind>().unwrap(), VariableKind::Salinity);
        assert_eq!(
            "ptemp".parse::<VariableKind>().unwrap(),
            VariableKind::PotentialTemperature
        );
        assert!("density".parse::<VariableKind>().is_err());
        assert!("".parse::<VariableKind>().is_err());
    }

    #[test]
    fn file_name_prefix() {
        let kind = VariableKind::from_file_name(Path::new("/data/WOA05/n13an1.txt")).unwrap();
        assert_eq!(kind, VariableKind::Nitrate);
        assert!(VariableKind::from_file_name(Path::new("/data/x00an1")).is_err());
    }

    #[test]
    fn metadata_names_are_distinct() {
        let names: Vec<&str> = VariableKind::ALL.iter().map(|k| k.metadata().name).collect();
        for (i, n) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(n));
        }
        assert_eq!(VariableKind::Temperature.to_string(), "temperature");
    }
}
