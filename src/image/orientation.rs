//! EXIF orientation correction.
//!
//! Every orientation is a horizontal mirror (or not) followed by a clockwise
//! rotation of zero to three quarter turns. Those two remaps are the only pixel
//! loops in here.

use image::Pixel;

use super::PixelBuffer;

/// One of the eight EXIF orientation codes.
///
/// Each variant names the transform that brings the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Code 1.
    #[default]
    Identity,
    /// Code 2.
    MirrorHorizontal,
    /// Code 3.
    Rotate180,
    /// Code 4.
    MirrorVertical,
    /// Code 5: mirror horizontally, then rotate 90 degrees clockwise.
    MirrorRotate90,
    /// Code 6.
    Rotate90,
    /// Code 7: mirror horizontally, then rotate 270 degrees clockwise.
    MirrorRotate270,
    /// Code 8.
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation value. Anything outside `1..=8` is `None`.
    #[must_use]
    pub const fn from_exif(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Identity),
            2 => Some(Self::MirrorHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::MirrorVertical),
            5 => Some(Self::MirrorRotate90),
            6 => Some(Self::Rotate90),
            7 => Some(Self::MirrorRotate270),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// The EXIF value for this orientation.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::MirrorHorizontal => 2,
            Self::Rotate180 => 3,
            Self::MirrorVertical => 4,
            Self::MirrorRotate90 => 5,
            Self::Rotate90 => 6,
            Self::MirrorRotate270 => 7,
            Self::Rotate270 => 8,
        }
    }

    /// All eight orientations in code order.
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::MirrorHorizontal,
        Self::Rotate180,
        Self::MirrorVertical,
        Self::MirrorRotate90,
        Self::Rotate90,
        Self::MirrorRotate270,
        Self::Rotate270,
    ];

    /// Decompose into `(mirror first, clockwise quarter turns)`.
    #[must_use]
    pub const fn steps(self) -> (bool, u8) {
        match self {
            Self::Identity => (false, 0),
            Self::MirrorHorizontal => (true, 0),
            Self::Rotate180 => (false, 2),
            // A vertical flip is a horizontal mirror turned half way round.
            Self::MirrorVertical => (true, 2),
            Self::MirrorRotate90 => (true, 1),
            Self::Rotate90 => (false, 1),
            Self::MirrorRotate270 => (true, 3),
            Self::Rotate270 => (false, 3),
        }
    }

    /// Whether applying this orientation swaps width and height.
    #[must_use]
    pub const fn swaps_dimensions(self) -> bool {
        self.steps().1 % 2 == 1
    }

    /// The orientation that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }

    /// Apply the transform, consuming the buffer.
    ///
    /// [`Orientation::Identity`] hands the buffer back untouched.
    #[must_use]
    pub fn apply<P: Pixel>(self, img: PixelBuffer<P>) -> PixelBuffer<P> {
        let (mirror, quarter_turns) = self.steps();

        let img = if mirror { mirror_horizontal(&img) } else { img };

        if quarter_turns == 0 {
            img
        } else {
            rotate_clockwise(&img, quarter_turns)
        }
    }
}

/// Mirror a buffer left to right.
#[must_use]
pub fn mirror_horizontal<P: Pixel>(src: &PixelBuffer<P>) -> PixelBuffer<P> {
    let (width, height) = src.dimensions();
    let mut dst = PixelBuffer::<P>::new(width, height);

    for (x, y, pixel) in src.enumerate_pixels() {
        dst.put_pixel(width - 1 - x, y, *pixel);
    }

    dst
}

/// Rotate a buffer clockwise by `quarter_turns` multiples of 90 degrees.
///
/// Odd turn counts swap width and height.
#[must_use]
pub fn rotate_clockwise<P: Pixel>(src: &PixelBuffer<P>, quarter_turns: u8) -> PixelBuffer<P> {
    let (width, height) = src.dimensions();
    let quarter_turns = quarter_turns % 4;

    let (dst_width, dst_height) = if quarter_turns % 2 == 1 {
        (height, width)
    } else {
        (width, height)
    };
    let mut dst = PixelBuffer::<P>::new(dst_width, dst_height);

    for (x, y, pixel) in src.enumerate_pixels() {
        let (dx, dy) = match quarter_turns {
            0 => (x, y),
            1 => (height - 1 - y, x),
            2 => (width - 1 - x, height - 1 - y),
            _ => (y, width - 1 - x),
        };
        dst.put_pixel(dx, dy, *pixel);
    }

    dst
}
