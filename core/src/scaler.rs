//! The cached colorspace-aware scaler.
//!
//! Modeled as `Option<Converter>` on the descriptor with explicit
//! invalidation, not a hidden memoization table.

use ffmpeg_next::{ffi, format::Pixel, software::scaling, util::color};

use crate::descriptor::StreamDescriptor;
use crate::error::{ReaderError, Result};
use crate::pixel_format::ColorMatrixOverride;

/// Normalize deprecated "JPEG-range" YUV tags to their modern equivalents,
/// so the scaler is never asked to build a `YUVJ*`-tagged conversion.
pub fn normalize_jpeg_range_tag(format: Pixel) -> (Pixel, bool) {
    match format {
        Pixel::YUVJ420P => (Pixel::YUV420P, true),
        Pixel::YUVJ422P => (Pixel::YUV422P, true),
        Pixel::YUVJ444P => (Pixel::YUV444P, true),
        Pixel::YUVJ411P => (Pixel::YUV411P, true),
        Pixel::YUVJ440P => (Pixel::YUV440P, true),
        other => (other, false),
    }
}

pub(crate) fn is_rgb_family(format: Pixel) -> bool {
    matches!(
        format,
        Pixel::RGB24
            | Pixel::BGR24
            | Pixel::RGBA
            | Pixel::BGRA
            | Pixel::RGB48LE
            | Pixel::RGB48BE
            | Pixel::RGBA64LE
            | Pixel::RGBA64BE
            | Pixel::GBRP
            | Pixel::GBRP10LE
            | Pixel::GBRP12LE
            | Pixel::GBRP16LE
    )
}

/// Returns a converter configured for the requested conversion and color
/// semantics, rebuilding it only when the source/destination tuple or the
/// color-matrix override changed.
#[allow(clippy::too_many_arguments)]
pub fn get_converter<'d>(
    descriptor: &'d mut StreamDescriptor,
    src_format: Pixel,
    src_width: u32,
    src_height: u32,
    src_range: color::Range,
    src_is_rec709_tagged: bool,
    dst_format: Pixel,
    dst_width: u32,
    dst_height: u32,
) -> Result<&'d mut scaling::Context> {
    if descriptor.converter_reset {
        descriptor.converter = None;
        descriptor.converter_reset = false;
    }

    let (src_format, was_jpeg_tagged) = normalize_jpeg_range_tag(src_format);
    let src_range = if was_jpeg_tagged { color::Range::JPEG } else { src_range };

    if descriptor.converter.is_none() {
        log::debug!(
            "building scaler: {:?} {}x{} (range {:?}) -> {:?} {}x{}",
            src_format, src_width, src_height, src_range, dst_format, dst_width, dst_height
        );
        let converter = scaling::Context::get(
            src_format,
            src_width,
            src_height,
            dst_format,
            dst_width,
            dst_height,
            scaling::Flags::BICUBIC,
        )
        .map_err(ReaderError::Converter)?;
        descriptor.converter = Some(converter);
    }

    let converter = descriptor.converter.as_mut().unwrap();

    if is_rgb_family(src_format) {
        return Ok(converter);
    }

    let coeff_set = match descriptor.color_matrix_override {
        ColorMatrixOverride::Rec709 => ffi::SWS_CS_ITU709,
        ColorMatrixOverride::Rec601 => ffi::SWS_CS_ITU601,
        ColorMatrixOverride::None => {
            if src_is_rec709_tagged {
                ffi::SWS_CS_ITU709
            } else {
                ffi::SWS_CS_ITU601
            }
        }
    };

    let src_range_flag: i32 = match src_range {
        color::Range::JPEG => 1,
        color::Range::MPEG => 0,
        _ => {
            if is_rgb_family(src_format) {
                1
            } else {
                0
            }
        }
    };

    unsafe {
        let coefficients = ffi::sws_getCoefficients(coeff_set as i32);
        let ret = ffi::sws_setColorspaceDetails(
            converter.as_mut_ptr(),
            coefficients,
            src_range_flag,
            coefficients,
            1, // full range out
            0,
            1 << 16,
            1 << 16,
        );
        if ret < 0 {
            descriptor.converter = None;
            return Err(ReaderError::Converter(ffmpeg_next::Error::from(ret)));
        }
    }

    Ok(descriptor.converter.as_mut().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_tags_normalize_and_report_jpeg_range() {
        let (fmt, was_jpeg) = normalize_jpeg_range_tag(Pixel::YUVJ420P);
        assert_eq!(fmt, Pixel::YUV420P);
        assert!(was_jpeg);

        let (fmt, was_jpeg) = normalize_jpeg_range_tag(Pixel::YUV420P);
        assert_eq!(fmt, Pixel::YUV420P);
        assert!(!was_jpeg);
    }

    #[test]
    fn rgb_family_detection() {
        assert!(is_rgb_family(Pixel::RGB24));
        assert!(is_rgb_family(Pixel::RGBA64LE));
        assert!(!is_rgb_family(Pixel::YUV420P));
        assert!(!is_rgb_family(Pixel::NV12));
    }
}
