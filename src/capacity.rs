//! Chip capacity parameters.
//!
//! Every physical property of a chip (page size, write-settle delay, total
//! capacity) is derived from its capacity bit, the exponent such that the
//! capacity in kibibits is `1 << bit`. Nothing is stored redundantly.

/// Bus address with all address pins grounded.
pub const ADDRESS_MIN: u8 = 0x50;
/// Bus address with all address pins at Vcc.
pub const ADDRESS_MAX: u8 = 0x57;

/// Value the chip reports for erased cells.
pub const ERASED_VALUE: u8 = 0xFF;

/// Clamps a 7-bit bus address into the range the chip family decodes.
///
/// Out-of-range addresses are pulled to the nearest bound, never rejected.
pub fn clamp_address(address: u8) -> u8 {
    address.clamp(ADDRESS_MIN, ADDRESS_MAX)
}

/// Bus address for a given wiring of the A0~A2 address pins.
pub fn address_from_pins(pins: u8) -> u8 {
    ADDRESS_MIN + (pins & 0b111)
}

/// Supported chip types.
///
/// The discriminant is the capacity bit: the number in the part name is the
/// capacity in kibibits, `1 << bit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Capacity {
    /// 1 Kib, 128 B.
    At24c01 = 0,
    /// 2 Kib, 256 B.
    At24c02 = 1,
    /// 4 Kib, 512 B.
    At24c04 = 2,
    /// 8 Kib, 1 KiB.
    At24c08 = 3,
    /// 16 Kib, 2 KiB.
    At24c16 = 4,
    /// 32 Kib, 4 KiB.
    At24c32 = 5,
    /// 64 Kib, 8 KiB.
    At24c64 = 6,
    /// 128 Kib, 16 KiB.
    At24c128 = 7,
    /// 256 Kib, 32 KiB.
    At24c256 = 8,
    /// 512 Kib, 64 KiB.
    At24c512 = 9,
}

/// Largest page size across the family, for stack buffers.
pub const MAX_PAGE_SIZE: usize = 128;

impl Capacity {
    /// Capacity from a raw capacity bit, clamped to the supported range.
    pub fn from_bit(bit: u8) -> Self {
        match bit {
            0 => Capacity::At24c01,
            1 => Capacity::At24c02,
            2 => Capacity::At24c04,
            3 => Capacity::At24c08,
            4 => Capacity::At24c16,
            5 => Capacity::At24c32,
            6 => Capacity::At24c64,
            7 => Capacity::At24c128,
            8 => Capacity::At24c256,
            _ => Capacity::At24c512,
        }
    }

    /// The capacity bit itself.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Capacity in kibibits.
    pub fn kibibits(self) -> u16 {
        1 << self.bit()
    }

    /// Capacity in bits.
    pub fn bits(self) -> u32 {
        1024 << self.bit()
    }

    /// Capacity in bytes.
    pub fn bytes(self) -> u32 {
        128 << self.bit()
    }

    /// Bytes the chip accepts in one write transaction before its internal
    /// address counter wraps within the page.
    pub fn page_size(self) -> usize {
        match self.bit() {
            0..=1 => 8,
            2..=4 => 16,
            5..=6 => 32,
            7..=8 => 64,
            _ => 128,
        }
    }

    /// Number of physical write pages.
    pub fn pages(self) -> u32 {
        self.bytes() / self.page_size() as u32
    }

    /// Milliseconds the chip needs after a write before it acknowledges
    /// further bus activity.
    pub fn write_delay_ms(self) -> u32 {
        match self.bit() {
            0..=4 => 5,
            _ => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_tiers() {
        assert_eq!(Capacity::At24c01.page_size(), 8);
        assert_eq!(Capacity::At24c02.page_size(), 8);
        assert_eq!(Capacity::At24c04.page_size(), 16);
        assert_eq!(Capacity::At24c16.page_size(), 16);
        assert_eq!(Capacity::At24c32.page_size(), 32);
        assert_eq!(Capacity::At24c64.page_size(), 32);
        assert_eq!(Capacity::At24c128.page_size(), 64);
        assert_eq!(Capacity::At24c256.page_size(), 64);
        assert_eq!(Capacity::At24c512.page_size(), 128);
    }

    #[test]
    fn write_delay_tiers() {
        assert_eq!(Capacity::At24c01.write_delay_ms(), 5);
        assert_eq!(Capacity::At24c16.write_delay_ms(), 5);
        assert_eq!(Capacity::At24c32.write_delay_ms(), 10);
        assert_eq!(Capacity::At24c512.write_delay_ms(), 10);
    }

    #[test]
    fn derived_capacity_figures() {
        assert_eq!(Capacity::At24c01.bytes(), 128);
        assert_eq!(Capacity::At24c256.bytes(), 32 * 1024);
        assert_eq!(Capacity::At24c512.bytes(), 64 * 1024);
        assert_eq!(Capacity::At24c256.kibibits(), 256);
        assert_eq!(Capacity::At24c256.bits(), 256 * 1024);
        assert_eq!(Capacity::At24c01.pages(), 16);
        assert_eq!(Capacity::At24c512.pages(), 512);
    }

    #[test]
    fn from_bit_clamps() {
        assert_eq!(Capacity::from_bit(0), Capacity::At24c01);
        assert_eq!(Capacity::from_bit(9), Capacity::At24c512);
        assert_eq!(Capacity::from_bit(200), Capacity::At24c512);
    }

    #[test]
    fn address_clamped_never_rejected() {
        assert_eq!(clamp_address(0x00), ADDRESS_MIN);
        assert_eq!(clamp_address(0x53), 0x53);
        assert_eq!(clamp_address(0x7F), ADDRESS_MAX);
        assert_eq!(address_from_pins(0), ADDRESS_MIN);
        assert_eq!(address_from_pins(7), ADDRESS_MAX);
    }
}
