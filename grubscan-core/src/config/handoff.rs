//! Encodes a list of [`BootEntry`] so that it can be handed off to a boot execution component.
//!
//! The encoding is [`postcard`], prefixed with a magic value and a format version so that a stale or foreign blob is
//! rejected instead of being misread.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BootEntry;

/// The magic value at the start of every handoff blob.
const HANDOFF_MAGIC: [u8; 4] = *b"GRBS";

/// The current version of the handoff format.
const HANDOFF_VERSION: u16 = 1;

/// Errors that may result from encoding or decoding a handoff blob.
#[derive(Error, Debug)]
pub enum HandoffError {
    /// The entries could not be serialized, or the blob could not be deserialized.
    #[error("Postcard Error: {0}")]
    Postcard(postcard::Error),

    /// The blob did not start with the handoff magic value.
    #[error("Blob is not a boot entry handoff")]
    BadMagic,

    /// The blob was written with a format version that is not supported.
    #[error("Unsupported handoff version {0}")]
    UnsupportedVersion(u16),
}

impl From<postcard::Error> for HandoffError {
    fn from(e: postcard::Error) -> Self {
        Self::Postcard(e)
    }
}

/// The serialized form of a handoff.
#[derive(Serialize, Deserialize)]
struct Handoff {
    /// Always [`HANDOFF_MAGIC`].
    magic: [u8; 4],

    /// The format version.
    version: u16,

    /// The boot entries, in boot menu order.
    entries: Vec<BootEntry>,
}

/// Encodes a list of [`BootEntry`] into a handoff blob.
///
/// # Errors
///
/// May return an `Error` if the entries could not be serialized.
pub fn encode_entries(entries: &[BootEntry]) -> Result<Vec<u8>, HandoffError> {
    let handoff = Handoff {
        magic: HANDOFF_MAGIC,
        version: HANDOFF_VERSION,
        entries: entries.to_vec(),
    };
    Ok(postcard::to_allocvec(&handoff)?)
}

/// Decodes a handoff blob back into a list of [`BootEntry`].
///
/// # Errors
///
/// May return an `Error` if the blob is not a handoff blob, was written by an unsupported version, or is corrupted.
pub fn decode_entries(blob: &[u8]) -> Result<Vec<BootEntry>, HandoffError> {
    let handoff: Handoff = postcard::from_bytes(blob)?;
    if handoff.magic != HANDOFF_MAGIC {
        return Err(HandoffError::BadMagic);
    }
    if handoff.version != HANDOFF_VERSION {
        return Err(HandoffError::UnsupportedVersion(handoff.version));
    }
    Ok(handoff.entries)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use proptest::prelude::*;

    use super::*;
    use crate::config::builder::BootEntryBuilder;

    #[test]
    fn test_handoff() -> Result<(), HandoffError> {
        let entries = vec![
            BootEntryBuilder::new("Linux")
                .kernel("/mnt/vmlinuz")
                .kernel_args("root=/dev/sda1")
                .initramfs("/mnt/initrd.img")
                .build(),
            BootEntryBuilder::new("Xen")
                .multiboot("/mnt/xen.gz")
                .module("/mnt/vmlinuz console=hvc0")
                .build(),
        ];
        let blob = encode_entries(&entries)?;
        assert!(blob.starts_with(b"GRBS"));
        assert_eq!(decode_entries(&blob)?, entries);
        Ok(())
    }

    #[test]
    fn test_bad_magic() -> Result<(), HandoffError> {
        let mut blob = encode_entries(&[])?;
        blob[0] = b'X';
        assert!(matches!(decode_entries(&blob), Err(HandoffError::BadMagic)));
        Ok(())
    }

    #[test]
    fn test_bad_version() -> Result<(), HandoffError> {
        let blob = postcard::to_allocvec(&Handoff {
            magic: HANDOFF_MAGIC,
            version: 7,
            entries: Vec::new(),
        })?;
        assert!(matches!(
            decode_entries(&blob),
            Err(HandoffError::UnsupportedVersion(7))
        ));
        Ok(())
    }

    proptest! {
        #[test]
        fn doesnt_panic(x in any::<Vec<u8>>()) {
            let _ = decode_entries(&x);
        }
    }
}
