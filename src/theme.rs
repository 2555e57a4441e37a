/// 24-bit color, renderer agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Composites `over` with the given alpha (0..=255) on top of `self`.
    pub fn blend(self, over: Rgb, alpha: u8) -> Rgb {
        let mix = |under: u8, top: u8| -> u8 {
            let a = alpha as u32;
            ((top as u32 * a + under as u32 * (255 - a) + 127) / 255) as u8
        };
        Rgb(mix(self.0, over.0), mix(self.1, over.1), mix(self.2, over.2))
    }
}

pub const HEADER_BG: Rgb = Rgb::WHITE;
pub const GRID_BG: Rgb = Rgb(187, 173, 160);
pub const TEXT: Rgb = Rgb::BLACK;

/// Game over veil: white at 180/255 over the whole surface.
pub const OVERLAY: Rgb = Rgb::WHITE;
pub const OVERLAY_ALPHA: u8 = 180;

/// Used for tile values outside the table.
pub const FALLBACK_TILE: Rgb = Rgb::BLACK;

pub fn tile_color(value: u32) -> Rgb {
    match value {
        0 => Rgb(205, 193, 180),
        2 => Rgb(238, 228, 218),
        4 => Rgb(237, 224, 200),
        8 => Rgb(242, 177, 121),
        16 => Rgb(245, 149, 99),
        32 => Rgb(246, 124, 95),
        64 => Rgb(246, 94, 59),
        128 => Rgb(237, 207, 114),
        256 => Rgb(237, 204, 97),
        512 => Rgb(237, 200, 80),
        1024 => Rgb(237, 197, 63),
        2048 => Rgb(237, 194, 46),
        _ => FALLBACK_TILE,
    }
}
