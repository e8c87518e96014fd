pub trait SignExtend {
    fn sign_extend(self, bit_count: u8) -> u16;
}

impl SignExtend for u16 {
    fn sign_extend(self, bit_count: u8) -> u16 {
        sign_extend(self, bit_count)
    }
}

/// Treats the low `bit_count` bits of `value` as a two's complement number and widens it to 16
/// bits. `bit_count` must be in `1..=16`.
pub fn sign_extend(value: u16, bit_count: u8) -> u16 {
    debug_assert!((1..=16).contains(&bit_count), "bad bit count: {}", bit_count);

    if bit_count >= 16 {
        return value;
    }

    let value = value & ((1 << bit_count) - 1);
    if ((value >> (bit_count - 1)) & 1) == 1 {
        value | (0xFFFF << bit_count)
    } else {
        value
    }
}

pub fn byte_swap16(value: u16) -> u16 {
    (value << 8) | (value >> 8)
}

/// Images are stored big-endian on disk.
pub fn from_disk(word: u16) -> u16 {
    if cfg!(target_endian = "little") {
        byte_swap16(word)
    } else {
        word
    }
}
