//! Per-verb extras layouts
//!
//! - Storage (set/add/replace): flags (4) + expiration (4)
//! - Expiration (touch/gat): expiration (4)
//! - None: everything else

use std::io::Write;

/// Extras carried by a request frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extras {
    None,
    Storage { flags: u32, expiration: u32 },
    Expiration { expiration: u32 },
}

impl Extras {
    /// Encoded length in bytes
    pub fn len(&self) -> u8 {
        match self {
            Extras::None => 0,
            Extras::Storage { .. } => 8,
            Extras::Expiration { .. } => 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the extras in big-endian order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match *self {
            Extras::None => Ok(()),
            Extras::Storage { flags, expiration } => {
                writer.write_all(&flags.to_be_bytes())?;
                writer.write_all(&expiration.to_be_bytes())
            }
            Extras::Expiration { expiration } => writer.write_all(&expiration.to_be_bytes()),
        }
    }
}
