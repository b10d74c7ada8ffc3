//! Opcode definitions
//!
//! The subset of memcached binary opcodes issued by the client.

/// Binary protocol opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Get = 0x00,
    Set = 0x01,
    Add = 0x02,
    Replace = 0x03,
    Delete = 0x04,
    GetQ = 0x09,
    Noop = 0x0A,
    Touch = 0x1C,
    Gat = 0x1D,
}

impl Opcode {
    /// Try to convert a byte to an opcode.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Opcode::Get),
            0x01 => Some(Opcode::Set),
            0x02 => Some(Opcode::Add),
            0x03 => Some(Opcode::Replace),
            0x04 => Some(Opcode::Delete),
            0x09 => Some(Opcode::GetQ),
            0x0A => Some(Opcode::Noop),
            0x1C => Some(Opcode::Touch),
            0x1D => Some(Opcode::Gat),
            _ => None,
        }
    }

    /// Returns true for opcodes whose success response the server may omit.
    pub fn is_quiet(&self) -> bool {
        matches!(self, Opcode::GetQ)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Get => "GET",
            Opcode::Set => "SET",
            Opcode::Add => "ADD",
            Opcode::Replace => "REPLACE",
            Opcode::Delete => "DELETE",
            Opcode::GetQ => "GETQ",
            Opcode::Noop => "NOOP",
            Opcode::Touch => "TOUCH",
            Opcode::Gat => "GAT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_byte_roundtrip() {
        for val in 0..=0xFFu8 {
            if let Some(op) = Opcode::from_u8(val) {
                assert_eq!(op as u8, val);
            }
        }
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(Opcode::from_u8(0x05), None);
        assert_eq!(Opcode::from_u8(0xFF), None);
    }

    #[test]
    fn test_only_getq_is_quiet() {
        assert!(Opcode::GetQ.is_quiet());
        assert!(!Opcode::Get.is_quiet());
        assert!(!Opcode::Noop.is_quiet());
    }
}
