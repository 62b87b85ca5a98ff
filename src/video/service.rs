use std::fmt;
use std::str::FromStr;

use crate::error::CleanError;

/// Video hosts a marker can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Vk,
    Vimeo,
    Youtube,
}

impl Service {
    /// Public page URL for a video id on this host.
    pub fn source_url(self, id: &str) -> String {
        match self {
            Service::Vk => format!("https://vk.com/video{}", id),
            Service::Vimeo => format!("https://vimeo.com/{}", id),
            Service::Youtube => format!("https://youtu.be/{}", id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Vk => "vk",
            Service::Vimeo => "vimeo",
            Service::Youtube => "youtube",
        }
    }
}

impl FromStr for Service {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vk" => Ok(Service::Vk),
            "vimeo" => Ok(Service::Vimeo),
            "youtube" => Ok(Service::Youtube),
            other => Err(CleanError::UnknownService(other.to_string())),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
