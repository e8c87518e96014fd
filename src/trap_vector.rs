#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapVector {
    GETC,
    OUT,
    PUTS,
    IN,
    PUTSP,
    HALT,
    Unknown(u8),
}

impl TrapVector {
    pub fn decode(instruction: u16) -> TrapVector {
        match instruction & 0xff {
            0x20 => TrapVector::GETC,
            0x21 => TrapVector::OUT,
            0x22 => TrapVector::PUTS,
            0x23 => TrapVector::IN,
            0x24 => TrapVector::PUTSP,
            0x25 => TrapVector::HALT,
            value => TrapVector::Unknown(value as u8),
        }
    }

    pub fn vector(self) -> u8 {
        match self {
            TrapVector::GETC => 0x20,
            TrapVector::OUT => 0x21,
            TrapVector::PUTS => 0x22,
            TrapVector::IN => 0x23,
            TrapVector::PUTSP => 0x24,
            TrapVector::HALT => 0x25,
            TrapVector::Unknown(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_uses_low_byte_only() {
        assert_eq!(TrapVector::decode(0xf025), TrapVector::HALT);
        assert_eq!(TrapVector::decode(0x0f22), TrapVector::PUTS);
    }

    #[test]
    fn decode_unknown() {
        assert_eq!(TrapVector::decode(0xf0ff), TrapVector::Unknown(0xff));
        assert_eq!(TrapVector::Unknown(0x26).vector(), 0x26);
    }

    #[test]
    fn vector_matches_decode() {
        for vector in 0x20..=0x25u16 {
            assert_eq!(u16::from(TrapVector::decode(0xf000 | vector).vector()), vector);
        }
    }
}
