//! Output pixel format derivation and the colorspace-name accessor logic.

use std::collections::HashMap;

/// The packed layout the reader always converts into, fixed for the lifetime
/// of a `StreamDescriptor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPixelFormat {
    Rgb8,
    Rgba8,
    Rgb16Le,
    Rgba16Le,
}

impl OutputPixelFormat {
    /// bit_depth <= 8 -> 1-byte samples, otherwise 2-byte little-endian.
    pub fn sample_size(self) -> usize {
        match self {
            OutputPixelFormat::Rgb8 | OutputPixelFormat::Rgba8 => 1,
            OutputPixelFormat::Rgb16Le | OutputPixelFormat::Rgba16Le => 2,
        }
    }

    pub fn num_components(self) -> usize {
        match self {
            OutputPixelFormat::Rgb8 | OutputPixelFormat::Rgb16Le => 3,
            OutputPixelFormat::Rgba8 | OutputPixelFormat::Rgba16Le => 4,
        }
    }

    pub fn ffmpeg_pixel(self) -> ffmpeg_next::format::Pixel {
        use ffmpeg_next::format::Pixel;
        match self {
            OutputPixelFormat::Rgb8 => Pixel::RGB24,
            OutputPixelFormat::Rgba8 => Pixel::RGBA,
            OutputPixelFormat::Rgb16Le => Pixel::RGB48LE,
            OutputPixelFormat::Rgba16Le => Pixel::RGBA64LE,
        }
    }
}

/// Derive the output format from (bit_depth, num_components).
/// `num_components` must already be promoted to 3 or 4 by the caller.
pub fn derive_output_format(bit_depth: u32, num_components: u32) -> OutputPixelFormat {
    match (bit_depth > 8, num_components) {
        (false, 4) => OutputPixelFormat::Rgba8,
        (false, _) => OutputPixelFormat::Rgb8,
        (true, 4) => OutputPixelFormat::Rgba16Le,
        (true, _) => OutputPixelFormat::Rgb16Le,
    }
}

/// Monochrome and other < 3 component sources are promoted to 3 components;
/// the core never hands the rest of the pipeline fewer than 3.
pub fn promote_num_components(reported: u32) -> u32 {
    if reported < 3 {
        3
    } else {
        reported
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMatrixOverride {
    #[default]
    None,
    Rec709,
    Rec601,
}

/// Inspect container metadata for a colorspace name. `is_yuv` picks the
/// fallback when neither metadata key is present.
pub fn colorspace_from_metadata(metadata: &HashMap<String, String>, is_yuv: bool) -> String {
    let lower: HashMap<String, String> = metadata
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
        .collect();

    if let Some(v) = lower.get("foundry colorspace") {
        return v.clone();
    }
    if let Some(v) = lower.get("arri color gamma") {
        if v.starts_with("LOG-C") || v.to_ascii_uppercase().starts_with("LOG-C") {
            return "AlexaV3LogC".to_string();
        }
        if v.to_ascii_uppercase().starts_with("REC-709") {
            return "rec709".to_string();
        }
    }
    if is_yuv {
        "Gamma2.2".to_string()
    } else {
        "Gamma1.8".to_string()
    }
}

/// Image-file extensions the enclosing plugin should divert elsewhere.
const IMAGE_EXTENSIONS: &[&str] = &[
    "bmp", "pix", "dpx", "exr", "jpeg", "jpg", "png", "ppm", "ptx", "tiff", "tga", "rgba", "rgb",
];

pub fn is_image_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(8, 3 => OutputPixelFormat::Rgb8)]
    #[test_case(8, 4 => OutputPixelFormat::Rgba8)]
    #[test_case(10, 3 => OutputPixelFormat::Rgb16Le)]
    #[test_case(12, 4 => OutputPixelFormat::Rgba16Le)]
    #[test_case(16, 3 => OutputPixelFormat::Rgb16Le)]
    fn output_format_derivation(bit_depth: u32, components: u32) -> OutputPixelFormat {
        derive_output_format(bit_depth, components)
    }

    #[test_case(1 => 3)]
    #[test_case(2 => 3)]
    #[test_case(3 => 3)]
    #[test_case(4 => 4)]
    fn monochrome_promotion(reported: u32) -> u32 {
        promote_num_components(reported)
    }

    #[test_case("clip.mov" => false)]
    #[test_case("frame.DPX" => true)]
    #[test_case("frame.exr" => true)]
    #[test_case("noext" => false)]
    #[test_case("a.PNG" => true)]
    fn image_file_detection(name: &str) -> bool {
        is_image_file(name)
    }

    #[test]
    fn colorspace_foundry_key_wins() {
        let mut meta = HashMap::new();
        meta.insert("Foundry Colorspace".to_string(), "scene-linear".to_string());
        meta.insert("Arri Color Gamma".to_string(), "LOG-C".to_string());
        assert_eq!(colorspace_from_metadata(&meta, true), "scene-linear");
    }

    #[test]
    fn colorspace_arri_logc() {
        let mut meta = HashMap::new();
        meta.insert("arri color gamma".to_string(), "LOG-C4".to_string());
        assert_eq!(colorspace_from_metadata(&meta, true), "AlexaV3LogC");
    }

    #[test]
    fn colorspace_arri_rec709() {
        let mut meta = HashMap::new();
        meta.insert("Arri Color Gamma".to_string(), "REC-709".to_string());
        assert_eq!(colorspace_from_metadata(&meta, true), "rec709");
    }

    #[test]
    fn colorspace_fallback() {
        let meta = HashMap::new();
        assert_eq!(colorspace_from_metadata(&meta, true), "Gamma2.2");
        assert_eq!(colorspace_from_metadata(&meta, false), "Gamma1.8");
    }
}
