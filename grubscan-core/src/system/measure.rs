// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Measurement hooks for data that was read during scanning.
//!
//! Every configuration file is passed to a [`Measure`] implementation before it is parsed, so that it may be recorded
//! for attestation or auditing. The scanner never looks at the outcome of a measurement.

use core::fmt;

use alloc::{string::String, vec::Vec};
use log::info;
use sha2::{Digest, Sha256};

/// The classification of measured data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasurementKind {
    /// Configuration data, such as a `grub.cfg`.
    ConfigData,
}

impl MeasurementKind {
    /// Convert a [`MeasurementKind`] type into an [`&str`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigData => "configuration-data",
        }
    }
}

/// Records data that was read before it is used.
pub trait Measure {
    /// Measures `data`, which was read from `path`.
    fn measure(&mut self, kind: MeasurementKind, data: &[u8], path: &str);
}

impl<F> Measure for F
where
    F: FnMut(MeasurementKind, &[u8], &str),
{
    fn measure(&mut self, kind: MeasurementKind, data: &[u8], path: &str) {
        self(kind, data, path);
    }
}

/// A [`Measure`] that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMeasure;

impl Measure for NoMeasure {
    fn measure(&mut self, _kind: MeasurementKind, _data: &[u8], _path: &str) {}
}

/// A single measurement made by [`DigestLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementEvent {
    /// The classification of the data.
    pub kind: MeasurementKind,

    /// The path that the data was read from.
    pub path: String,

    /// The SHA-256 digest of the data.
    pub digest: [u8; 32],
}

impl fmt::Display for MeasurementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} sha256:", self.kind.as_str(), self.path)?;
        for byte in self.digest {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A [`Measure`] that hashes the data with SHA-256, logs the digest, and keeps every event in memory.
#[derive(Clone, Debug, Default)]
pub struct DigestLog {
    /// The measurements, in the order that they were made.
    events: Vec<MeasurementEvent>,
}

impl DigestLog {
    /// Create a new, empty [`DigestLog`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Gets every measurement that was made, in order.
    #[must_use = "Has no effect if the result is unused"]
    pub fn events(&self) -> &[MeasurementEvent] {
        &self.events
    }
}

impl Measure for DigestLog {
    fn measure(&mut self, kind: MeasurementKind, data: &[u8], path: &str) {
        let mut digest = [0; 32];
        digest.copy_from_slice(&Sha256::digest(data));

        let event = MeasurementEvent {
            kind,
            path: path.into(),
            digest,
        };
        info!("Measured {event}");
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_digest_log() {
        let mut log = DigestLog::new();
        log.measure(MeasurementKind::ConfigData, b"", "/boot/grub/grub.cfg");

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "/boot/grub/grub.cfg");
        assert_eq!(
            events[0].to_string(),
            "configuration-data /boot/grub/grub.cfg sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_closure_measure() {
        let mut seen = Vec::new();
        let mut measure = |kind: MeasurementKind, data: &[u8], path: &str| {
            seen.push((kind, data.len(), path.to_string()));
        };
        measure.measure(MeasurementKind::ConfigData, b"abc", "grub.cfg");
        assert_eq!(
            seen,
            [(MeasurementKind::ConfigData, 3, "grub.cfg".to_string())]
        );
    }
}
