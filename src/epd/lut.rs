//! Waveform lookup tables for the first panel revision
//!
//! Each refresh class programs all five tables at once; they are never changed at runtime.

use crate::epd::cmd::Cmd;

/// Refresh class a waveform set is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutClass {
    /// Slow, high quality waveform
    Full,
    /// Fast waveform for windowed updates
    Partial,
    /// Four level grayscale waveform
    Gray,
}

/// One complete waveform set: VCOM plus the four pixel transition tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut {
    pub vcom: &'static [u8],
    pub ww: &'static [u8],
    pub bw: &'static [u8],
    pub wb: &'static [u8],
    pub bb: &'static [u8],
}

impl Lut {
    /// Waveform set for the given class
    pub const fn for_class(class: LutClass) -> &'static Lut {
        match class {
            LutClass::Full => &FULL,
            LutClass::Partial => &PARTIAL,
            LutClass::Gray => &GRAY,
        }
    }

    /// `(opcode, table)` pairs in the order they are programmed
    pub fn registers(&self) -> [(u8, &'static [u8]); 5] {
        [
            (Cmd::VCOM_LUT, self.vcom),
            (Cmd::W2W_LUT, self.ww),
            (Cmd::B2W_LUT, self.bw),
            (Cmd::W2B_LUT, self.wb),
            (Cmd::B2B_LUT, self.bb),
        ]
    }
}

#[rustfmt::skip]
const LUT_VCOM0: [u8; 44] = [
    0x00, 0x17, 0x00, 0x00, 0x00, 0x02,
    0x00, 0x17, 0x17, 0x00, 0x00, 0x02,
    0x00, 0x0A, 0x01, 0x00, 0x00, 0x01,
    0x00, 0x0E, 0x0E, 0x00, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const LUT_WW: [u8; 42] = [
    0x40, 0x17, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x17, 0x17, 0x00, 0x00, 0x02,
    0x40, 0x0A, 0x01, 0x00, 0x00, 0x01,
    0xA0, 0x0E, 0x0E, 0x00, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const LUT_BB: [u8; 42] = [
    0x80, 0x17, 0x00, 0x00, 0x00, 0x02,
    0x90, 0x17, 0x17, 0x00, 0x00, 0x02,
    0x80, 0x0A, 0x01, 0x00, 0x00, 0x01,
    0x50, 0x0E, 0x0E, 0x00, 0x00, 0x02,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const PARTIAL_LUT_VCOM1: [u8; 44] = [
    0x00, 0x01, 0x20, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[rustfmt::skip]
const PARTIAL_LUT_WW1: [u8; 42] = [
    0x00, 0x01, 0x20, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const PARTIAL_LUT_BW1: [u8; 42] = [
    0x20, 0x01, 0x20, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const PARTIAL_LUT_WB1: [u8; 42] = [
    0x10, 0x01, 0x20, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// WW1 and BB1 share one waveform
const PARTIAL_LUT_BB1: [u8; 42] = PARTIAL_LUT_WW1;

#[rustfmt::skip]
const GRAY_LUT_VCOM: [u8; 42] = [
    0x00, 0x0A, 0x00, 0x00, 0x00, 0x01,
    0x60, 0x14, 0x14, 0x00, 0x00, 0x01,
    0x00, 0x14, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x13, 0x0A, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const GRAY_LUT_WW: [u8; 42] = [
    0x40, 0x0A, 0x00, 0x00, 0x00, 0x01,
    0x90, 0x14, 0x14, 0x00, 0x00, 0x01,
    0x10, 0x14, 0x0A, 0x00, 0x00, 0x01,
    0xA0, 0x13, 0x01, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const GRAY_LUT_BW: [u8; 42] = [
    0x40, 0x0A, 0x00, 0x00, 0x00, 0x01,
    0x90, 0x14, 0x14, 0x00, 0x00, 0x01,
    0x00, 0x14, 0x0A, 0x00, 0x00, 0x01,
    0x99, 0x0C, 0x01, 0x03, 0x04, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const GRAY_LUT_WB: [u8; 42] = [
    0x40, 0x0A, 0x00, 0x00, 0x00, 0x01,
    0x90, 0x14, 0x14, 0x00, 0x00, 0x01,
    0x00, 0x14, 0x0A, 0x00, 0x00, 0x01,
    0x99, 0x0B, 0x04, 0x04, 0x01, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const GRAY_LUT_BB: [u8; 42] = [
    0x80, 0x0A, 0x00, 0x00, 0x00, 0x01,
    0x90, 0x14, 0x14, 0x00, 0x00, 0x01,
    0x20, 0x14, 0x0A, 0x00, 0x00, 0x01,
    0x50, 0x13, 0x01, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Full refresh waveforms. White-to-white matches black-to-white, black-to-black matches white-to-black.
pub const FULL: Lut = Lut {
    vcom: &LUT_VCOM0,
    ww: &LUT_WW,
    bw: &LUT_WW,
    wb: &LUT_BB,
    bb: &LUT_BB,
};

/// Partial refresh waveforms
pub const PARTIAL: Lut = Lut {
    vcom: &PARTIAL_LUT_VCOM1,
    ww: &PARTIAL_LUT_WW1,
    bw: &PARTIAL_LUT_BW1,
    wb: &PARTIAL_LUT_WB1,
    bb: &PARTIAL_LUT_BB1,
};

/// Grayscale waveforms
pub const GRAY: Lut = Lut {
    vcom: &GRAY_LUT_VCOM,
    ww: &GRAY_LUT_WW,
    bw: &GRAY_LUT_BW,
    wb: &GRAY_LUT_WB,
    bb: &GRAY_LUT_BB,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_follow_vcom_ww_bw_wb_bb_order() {
        let opcodes: Vec<u8> = FULL.registers().iter().map(|(cmd, _)| *cmd).collect();
        assert_eq!(opcodes, vec![0x20, 0x21, 0x22, 0x23, 0x24]);
    }

    #[test]
    fn classes_select_distinct_tables() {
        assert_eq!(Lut::for_class(LutClass::Full), &FULL);
        assert_ne!(Lut::for_class(LutClass::Partial), &FULL);
        assert_ne!(Lut::for_class(LutClass::Gray), Lut::for_class(LutClass::Partial));
    }

    #[test]
    fn vcom_tables_carry_two_extra_bytes_for_full_and_partial() {
        assert_eq!(FULL.vcom.len(), 44);
        assert_eq!(PARTIAL.vcom.len(), 44);
        assert_eq!(FULL.ww.len(), 42);
        assert_eq!(GRAY.vcom.len(), 42);
    }
}
