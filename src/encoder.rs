use std::env;

use crate::{error::ZoneError, zone::Zone};

/// Environment variable holding the encode-time zone override.
pub const ZONE_OVERRIDE_VAR: &str = "TEMPORAL_ZONE_OVERRIDE";

/// Where a value sits in the document being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// The value is the whole payload.
    Root,
    /// The value is a field of some enclosing structure.
    Nested,
}

/// Per-call encoding configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Takes precedence over the value's own zone when set.
    pub zone_override: Option<Zone>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone_override(mut self, zone: Zone) -> Self {
        self.zone_override = Some(zone);
        self
    }

    /// Reads the override from `TEMPORAL_ZONE_OVERRIDE`.
    pub fn from_env() -> Result<Self, ZoneError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the override through an arbitrary key lookup.
    /// Missing or blank entries mean no override.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ZoneError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let zone_override = match lookup(ZONE_OVERRIDE_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                let zone = raw.parse::<Zone>().inspect_err(|err| {
                    tracing::error!("{ZONE_OVERRIDE_VAR} is not a valid zone: {err}");
                })?;
                Some(zone)
            }
            _ => None,
        };

        Ok(Self { zone_override })
    }

    /// Applies the zone priority: override, then `own`, then UTC.
    pub fn resolve_zone(&self, own: Option<Zone>) -> Zone {
        match (self.zone_override, own) {
            (Some(zone), Some(own)) if zone != own => {
                tracing::debug!("zone override {zone} replaces value zone {own}");
                zone
            }
            (Some(zone), _) => zone,
            (None, Some(own)) => own,
            (None, None) => Zone::Utc,
        }
    }
}
