// Loading and saving still frames for the example runner and for debugging.

pub mod image_helper {
    use crate::core_modules::frame::OwnedFrame;
    use crate::error::TrackerError;
    use image::ImageEncoder;
    use std::path::{Path, PathBuf};

    const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

    /// Decodes an image file into an RGB888 frame.
    pub fn load(path: &Path) -> Result<OwnedFrame, TrackerError> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(OwnedFrame::new(width as usize, height as usize, rgb.into_raw()))
    }

    /// Encodes a frame as PNG.
    pub fn save(path: &Path, frame: &OwnedFrame) -> Result<(), TrackerError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            &frame.data,
            frame.width as u32,
            frame.height as u32,
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(())
    }

    /// Image files directly inside `dir`, sorted by file name.
    pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, TrackerError> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_frame = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if path.is_file() && is_frame {
                frames.push(path);
            }
        }
        frames.sort();
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::frame::OwnedFrame;
    use crate::core_modules::pixel::pixel::Rgb;

    #[test]
    fn save_and_load_gradient_file() {
        let dir = tempfile::tempdir().expect("Error creating temp dir.");
        let path = dir.path().join("gradient_file.png");

        let width = 50usize;
        let height = 20usize;
        let mut frame = OwnedFrame::filled(width, height, Rgb::BLACK);
        let mut intensity = 0u8;
        for pixel in frame.data.chunks_mut(3) {
            pixel[0] = intensity;
            pixel[1] = intensity / 2;
            pixel[2] = 255 - intensity;
            intensity = intensity.wrapping_add(1);
        }

        save(&path, &frame).expect("Error Saving File.");
        let loaded = load(&path).expect("Error Loading File.");
        assert_eq!(loaded, frame);
    }

    #[test]
    fn lists_only_image_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let frame = OwnedFrame::filled(2, 2, Rgb::WHITE);
        save(&dir.path().join("frame_002.png"), &frame).unwrap();
        save(&dir.path().join("frame_001.png"), &frame).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let frames = list_frames(dir.path()).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["frame_001.png", "frame_002.png"]);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.png")).is_err());
    }
}
