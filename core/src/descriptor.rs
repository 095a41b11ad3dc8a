//! Per-stream decode state.
//!
//! The cursors here (`decode_next_frame_in/out`, `accum_decode_latency`,
//! `timestamp_field`, `pts_seen`) are single-owner and only ever touched by
//! `FrameReader` while its mutex is held — never publish a `&StreamDescriptor`
//! outside the reader.

use crate::pixel_format::{ColorMatrixOverride, OutputPixelFormat};
use ffmpeg_next::software::scaling::Context as Converter;

/// Selects which packet timestamp field resync/decode submission reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    Pts,
    Dts,
}

impl TimestampField {
    pub fn extract(self, packet: &ffmpeg_next::Packet) -> Option<i64> {
        match self {
            TimestampField::Pts => packet.pts(),
            TimestampField::Dts => packet.dts(),
        }
    }
}

pub struct StreamDescriptor {
    pub index: usize,

    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub num_components: u32,
    pub output_pixel_format: OutputPixelFormat,

    pub fps_num: i64,
    pub fps_den: i64,
    pub aspect: f64,

    pub start_pts: i64,
    pub total_frames: i64,

    pub tb_num: i64,
    pub tb_den: i64,

    /// 0-based index of the next frame about to be submitted; -1 = unknown / just seeked.
    pub decode_next_frame_in: i64,
    /// 0-based index of the next decoded frame expected out; -1 = unknown.
    pub decode_next_frame_out: i64,
    /// Consecutive packets submitted without a corresponding decoded frame.
    pub accum_decode_latency: u32,

    pub timestamp_field: TimestampField,
    pub pts_seen: bool,

    /// Number of container seeks issued for this stream since it was opened.
    pub seek_count: u64,

    pub color_matrix_override: ColorMatrixOverride,
    pub converter: Option<Converter>,
    /// Set when the color-matrix override changed since the converter was built.
    pub converter_reset: bool,
}

impl StreamDescriptor {
    /// `pts_to_frame(pts) = ((pts - start_pts) * fps_num * tb_num) / (fps_den * tb_den)`.
    pub fn pts_to_frame(&self, pts: i64) -> i64 {
        let numerator = (pts - self.start_pts) as i128 * self.fps_num as i128 * self.tb_num as i128;
        let denominator = self.fps_den as i128 * self.tb_den as i128;
        (numerator / denominator) as i64
    }

    /// `frame_to_pts(f) = (f * fps_den * tb_den) / (fps_num * tb_num) + start_pts`.
    pub fn frame_to_pts(&self, frame: i64) -> i64 {
        let numerator = frame as i128 * self.fps_den as i128 * self.tb_den as i128;
        let denominator = self.fps_num as i128 * self.tb_num as i128;
        (numerator / denominator) as i64 + self.start_pts
    }

    pub fn row_size(&self) -> usize {
        self.output_pixel_format.num_components() * self.width as usize * self.output_pixel_format.sample_size()
    }

    pub fn buffer_size(&self) -> usize {
        self.row_size() * self.height as usize
    }

    pub fn set_color_matrix_override(&mut self, value: ColorMatrixOverride) {
        if value != self.color_matrix_override {
            self.color_matrix_override = value;
            self.converter_reset = true;
        }
    }

    /// Reset on successful frame emission or on any seek.
    pub fn reset_decode_latency(&mut self) {
        self.accum_decode_latency = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(fps_num: i64, fps_den: i64, tb_num: i64, tb_den: i64, start_pts: i64) -> StreamDescriptor {
        StreamDescriptor {
            index: 0,
            width: 320,
            height: 240,
            bit_depth: 8,
            num_components: 3,
            output_pixel_format: OutputPixelFormat::Rgb8,
            fps_num,
            fps_den,
            aspect: 1.0,
            start_pts,
            total_frames: 10,
            tb_num,
            tb_den,
            decode_next_frame_in: -1,
            decode_next_frame_out: -1,
            accum_decode_latency: 0,
            timestamp_field: TimestampField::Pts,
            pts_seen: false,
            seek_count: 0,
            color_matrix_override: ColorMatrixOverride::None,
            converter: None,
            converter_reset: false,
        }
    }

    #[test]
    fn pts_frame_round_trip() {
        let d = descriptor(24, 1, 1, 24000, 0);
        for f in 0..1000i64 {
            assert_eq!(d.pts_to_frame(d.frame_to_pts(f)), f);
        }
    }

    #[test]
    fn pts_frame_round_trip_nonzero_start() {
        let d = descriptor(30000, 1001, 1, 90000, 123456);
        for f in 0..500i64 {
            assert_eq!(d.pts_to_frame(d.frame_to_pts(f)), f);
        }
    }

    #[test]
    fn buffer_size_matches_row_size_times_height() {
        let mut d = descriptor(24, 1, 1, 24000, 0);
        d.output_pixel_format = OutputPixelFormat::Rgba16Le;
        assert_eq!(d.row_size(), 4 * 320 * 2);
        assert_eq!(d.buffer_size(), d.row_size() * 240);
    }

    #[test]
    fn override_change_sets_reset_flag() {
        let mut d = descriptor(24, 1, 1, 24000, 0);
        assert!(!d.converter_reset);
        d.set_color_matrix_override(ColorMatrixOverride::Rec709);
        assert!(d.converter_reset);
        d.converter_reset = false;
        d.set_color_matrix_override(ColorMatrixOverride::Rec709);
        assert!(!d.converter_reset, "setting the same override again should not re-flag a reset");
    }
}
