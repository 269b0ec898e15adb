// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors and the built-in palette tables.  A palette is a short list of
//! key colors, each pinned to a position in [0, 1] or left for the
//! palette to place; the [`ramp`](crate::ramp) module expands one into a
//! dense color ramp.

/// An 8-bit-per-channel color.  The all-zero value doubles as the
/// "unset" background of a raster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 0xff }
    }

    /// Packs the channels into one word, red in the high byte.
    pub fn pack(self) -> u32 {
        u32::from(self.r) << 24
            | u32::from(self.g) << 16
            | u32::from(self.b) << 8
            | u32::from(self.a)
    }

    /// The inverse of [`pack`](Rgba::pack).
    pub fn unpack(word: u32) -> Rgba {
        Rgba {
            r: (word >> 24 & 0xff) as u8,
            g: (word >> 16 & 0xff) as u8,
            b: (word >> 8 & 0xff) as u8,
            a: (word & 0xff) as u8,
        }
    }

    /// The channels in raster byte order.
    pub fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channel-wise linear blend; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// One stop in a palette.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeyColor {
    /// Where the stop sits in [0, 1].  `None` lets the palette infer it
    /// from the stop's index.
    pub position: Option<f64>,
    /// The color at the stop.
    pub color: Rgba,
}

const fn at(position: f64, r: u8, g: u8, b: u8) -> KeyColor {
    KeyColor {
        position: Some(position),
        color: Rgba::rgb(r, g, b),
    }
}

const fn key(r: u8, g: u8, b: u8) -> KeyColor {
    KeyColor {
        position: None,
        color: Rgba::rgb(r, g, b),
    }
}

/// A named, ordered list of at least two key colors.
#[derive(Debug)]
pub struct Palette {
    /// The name the command line selects the palette by.
    pub name: &'static str,
    /// The stops, in order.
    pub keys: &'static [KeyColor],
}

const HIPPI: [KeyColor; 7] = [
    at(0.00, 0x00, 0x07, 0x64),
    at(0.16, 0x20, 0x6b, 0xcb),
    at(0.42, 0xed, 0xff, 0xff),
    at(0.64, 0xff, 0xaa, 0x00),
    at(0.75, 0xf9, 0x3c, 0x7e),
    at(0.86, 0x8e, 0x1b, 0xa9),
    at(1.00, 0x00, 0x02, 0x00),
];

const PLAN9: [KeyColor; 5] = [
    at(0.00, 0x00, 0x00, 0x00),
    key(0x2b, 0x9c, 0xd9),
    key(0xf1, 0xe1, 0x7b),
    key(0xff, 0xff, 0xea),
    key(0x8c, 0x1d, 0x40),
];

const AFTERNOON_BLUE: [KeyColor; 6] = [
    at(0.00, 0x05, 0x0e, 0x1f),
    at(0.15, 0x1b, 0x3b, 0x6f),
    at(0.35, 0x3e, 0x7c, 0xb1),
    at(0.60, 0xa3, 0xd5, 0xff),
    at(0.82, 0xf2, 0xf7, 0xff),
    at(1.00, 0x0b, 0x1d, 0x39),
];

const SUMMER_BEACH: [KeyColor; 6] = [
    at(0.00, 0xff, 0xf4, 0xd6),
    at(0.20, 0xff, 0xc8, 0x57),
    at(0.40, 0xff, 0x7f, 0x50),
    at(0.60, 0x20, 0xb2, 0xaa),
    at(0.80, 0x00, 0x6e, 0x90),
    at(1.00, 0x02, 0x1a, 0x2c),
];

const BIOCHIMIST: [KeyColor; 4] = [
    at(0.00, 0x0f, 0x05, 0x1d),
    key(0x39, 0xff, 0x14),
    key(0xf5, 0xf5, 0x00),
    key(0x7a, 0x04, 0xeb),
];

const FIESTA: [KeyColor; 8] = [
    at(0.00, 0x1a, 0x01, 0x2b),
    at(0.12, 0xd7, 0x26, 0x3d),
    at(0.25, 0xf4, 0x6d, 0x43),
    at(0.40, 0xfd, 0xe0, 0x8b),
    at(0.55, 0x66, 0xc2, 0xa5),
    at(0.70, 0x32, 0x88, 0xbd),
    at(0.85, 0x5e, 0x4f, 0xa2),
    at(1.00, 0xff, 0xff, 0xff),
];

/// Every palette the renderer knows, in the order the help text lists
/// them.
pub static PALETTES: [Palette; 6] = [
    Palette {
        name: "Hippi",
        keys: &HIPPI,
    },
    Palette {
        name: "Plan9",
        keys: &PLAN9,
    },
    Palette {
        name: "AfternoonBlue",
        keys: &AFTERNOON_BLUE,
    },
    Palette {
        name: "SummerBeach",
        keys: &SUMMER_BEACH,
    },
    Palette {
        name: "Biochimist",
        keys: &BIOCHIMIST,
    },
    Palette {
        name: "Fiesta",
        keys: &FIESTA,
    },
];

impl Palette {
    /// Looks up a built-in palette by its exact name.
    pub fn find(name: &str) -> Option<&'static Palette> {
        PALETTES.iter().find(|palette| palette.name == name)
    }

    /// The names of all built-in palettes.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PALETTES.iter().map(|palette| palette.name)
    }

    /// The position of every stop.  The first stop always sits at 0; a
    /// stop with no position gets `(index + 1) / count`, truncated to two
    /// decimal places.
    pub fn positions(&self) -> Vec<f64> {
        let count = self.keys.len() as f64;
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| match (index, key.position) {
                (0, _) => 0.0,
                (_, Some(position)) => position,
                (_, None) => (((index + 1) as f64 / count) * 100.0).trunc() / 100.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_round_trip() {
        for &color in &[
            Rgba::rgb(0, 0, 0),
            Rgba::rgb(0xff, 0xff, 0xff),
            Rgba::rgb(0x12, 0x34, 0x56),
            Rgba {
                r: 1,
                g: 254,
                b: 128,
                a: 7,
            },
        ] {
            assert_eq!(Rgba::unpack(color.pack()), color);
        }
    }

    #[test]
    fn pack_puts_red_in_the_high_byte() {
        assert_eq!(Rgba::rgb(0x12, 0x34, 0x56).pack(), 0x1234_56ff);
    }

    #[test]
    fn every_palette_key_round_trips() {
        for palette in PALETTES.iter() {
            for key in palette.keys {
                assert_eq!(Rgba::unpack(key.color.pack()), key.color, "{}", palette.name);
            }
        }
    }

    #[test]
    fn lerp_hits_both_ends() {
        let (a, b) = (Rgba::rgb(0, 100, 200), Rgba::rgb(200, 100, 0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgba::rgb(100, 100, 100));
    }

    #[test]
    fn find_is_exact() {
        assert!(Palette::find("Hippi").is_some());
        assert!(Palette::find("hippi").is_none());
        assert!(Palette::find("Nope").is_none());
    }

    #[test]
    fn missing_positions_are_inferred_and_truncated() {
        let plan9 = Palette::find("Plan9").unwrap();
        assert_eq!(plan9.positions(), vec![0.0, 0.4, 0.6, 0.8, 1.0]);

        let biochimist = Palette::find("Biochimist").unwrap();
        assert_eq!(biochimist.positions(), vec![0.0, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn positions_strictly_increase() {
        for palette in PALETTES.iter() {
            assert!(palette.keys.len() >= 2, "{}", palette.name);
            let positions = palette.positions();
            assert_eq!(positions[0], 0.0);
            for pair in positions.windows(2) {
                assert!(pair[0] < pair[1], "{} is not increasing", palette.name);
            }
        }
    }
}
