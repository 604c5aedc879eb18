use std::fmt;
use std::str::FromStr;

/// Target device for generation and for the preview viewport bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceMode {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

/// Maximum preview size in CSS pixels; `None` fills the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl DeviceMode {
    pub const ALL: [DeviceMode; 3] = [DeviceMode::Mobile, DeviceMode::Tablet, DeviceMode::Desktop];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceMode::Mobile => "mobile",
            DeviceMode::Tablet => "tablet",
            DeviceMode::Desktop => "desktop",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceMode::Mobile => "Mobile",
            DeviceMode::Tablet => "Tablet",
            DeviceMode::Desktop => "Desktop",
        }
    }

    pub fn viewport(self) -> Viewport {
        match self {
            DeviceMode::Mobile => Viewport {
                max_width: Some(375),
                max_height: Some(812),
            },
            DeviceMode::Tablet => Viewport {
                max_width: Some(768),
                max_height: Some(1024),
            },
            DeviceMode::Desktop => Viewport {
                max_width: None,
                max_height: None,
            },
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDeviceMode(pub String);

impl fmt::Display for UnknownDeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device mode {:?}", self.0)
    }
}

impl std::error::Error for UnknownDeviceMode {}

impl FromStr for DeviceMode {
    type Err = UnknownDeviceMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DeviceMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDeviceMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{DeviceMode, Viewport};

    #[test]
    fn viewports_match_device_sizes() {
        assert_eq!(
            DeviceMode::Mobile.viewport(),
            Viewport {
                max_width: Some(375),
                max_height: Some(812)
            }
        );
        assert_eq!(
            DeviceMode::Tablet.viewport(),
            Viewport {
                max_width: Some(768),
                max_height: Some(1024)
            }
        );
        assert_eq!(DeviceMode::Desktop.viewport().max_width, None);
        assert_eq!(DeviceMode::Desktop.viewport().max_height, None);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Tablet".parse::<DeviceMode>(), Ok(DeviceMode::Tablet));
        assert_eq!(" mobile ".parse::<DeviceMode>(), Ok(DeviceMode::Mobile));
        assert!("watch".parse::<DeviceMode>().is_err());
    }
}
