// THEORY:
// The `Pixel` module is the most fundamental unit of the tracker. It holds a single
// packed RGB pixel and the one heuristic the detector needs from it: whether the
// pixel looks like part of a reflective marker.
//
// Key principles:
// 1) Single-pixel scope: the classifier never reads neighbours or history.
// 2) The marker test is "near-white": every channel must be strictly above the
//    brightness threshold. It is not a hue test.

pub mod pixel {
    use crate::config::DEFAULT_BRIGHTNESS_THRESHOLD;

    pub type Byte = u8;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 3;

    /// A "dumb" data container representing a single RGB pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Rgb {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Rgb {
        pub const BLACK: Rgb = Rgb::new(0, 0, 0);
        pub const WHITE: Rgb = Rgb::new(255, 255, 255);
        pub const GREEN: Rgb = Rgb::new(0, 255, 0);

        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Rgb { red, green, blue }
        }
    }

    impl From<&[Byte]> for Rgb {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Rgb::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<Rgb> for [Byte; CHANNELS] {
        fn from(pixel: Rgb) -> Self {
            [pixel.red, pixel.green, pixel.blue]
        }
    }

    /// Stateless predicate deciding whether a pixel belongs to a marker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PixelClassifier {
        threshold: Channel,
    }

    impl Default for PixelClassifier {
        fn default() -> Self {
            Self::new(DEFAULT_BRIGHTNESS_THRESHOLD)
        }
    }

    impl PixelClassifier {
        pub const fn new(threshold: Channel) -> Self {
            Self { threshold }
        }

        pub fn threshold(&self) -> Channel {
            self.threshold
        }

        #[inline]
        pub fn is_marker(&self, red: Channel, green: Channel, blue: Channel) -> bool {
            red > self.threshold && green > self.threshold && blue > self.threshold
        }

        #[inline]
        pub fn is_marker_pixel(&self, pixel: Rgb) -> bool {
            self.is_marker(pixel.red, pixel.green, pixel.blue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn white_is_a_marker() {
        let classifier = PixelClassifier::default();
        assert!(classifier.is_marker_pixel(Rgb::WHITE));
        assert!(classifier.is_marker(0x96, 0x96, 0x96));
    }

    #[test]
    fn threshold_is_strict() {
        let classifier = PixelClassifier::default();
        assert!(!classifier.is_marker(0x95, 0xFF, 0xFF));
        assert!(!classifier.is_marker(0xFF, 0x95, 0xFF));
        assert!(!classifier.is_marker(0xFF, 0xFF, 0x95));
    }

    #[test]
    fn saturated_colours_are_not_markers() {
        let classifier = PixelClassifier::default();
        assert!(!classifier.is_marker(0xFF, 0x00, 0xFF));
        assert!(!classifier.is_marker_pixel(Rgb::GREEN));
    }

    #[test]
    fn pixel_from_bytes() {
        let pixel = Rgb::from(&[1u8, 2, 3][..]);
        assert_eq!(pixel, Rgb::new(1, 2, 3));
        let bytes: [u8; CHANNELS] = pixel.into();
        assert_eq!(bytes, [1, 2, 3]);
    }
}
