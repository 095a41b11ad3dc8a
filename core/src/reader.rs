//! Opening the container and the random-access decode hot path. This is
//! where stream descriptors, the scaler, `resync`, and `stall` get wired
//! together.

use std::collections::HashMap;

use ffmpeg_next::{codec, ffi, format, frame, media, threading, util::color, Packet};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::buffer::{buffer_size, copy_packed_rows};
use crate::descriptor::{StreamDescriptor, TimestampField};
use crate::error::{ReaderError, Result};
use crate::pixel_format::{
    colorspace_from_metadata, derive_output_format, promote_num_components, ColorMatrixOverride,
};
use crate::resync::{evaluate_landing, ResyncAttempt, ResyncOutcome};
use crate::scaler::{get_converter, is_rgb_family};
use crate::stall::{is_stalled, recover, RecoveryAction, StallPhase};

const AV_TIME_BASE: i64 = 1_000_000;
const AV_NOPTS_VALUE: i64 = i64::MIN;

/// Frame-accurate random-access video reader. Cheap to construct (no lock
/// contention during `open`); every other call serializes on the inner
/// mutex.
pub struct FrameReader {
    inner: Mutex<ReaderInner>,
}

struct ReaderInner {
    input: Option<format::context::Input>,
    decoders: Vec<ffmpeg_next::decoder::Video>,
    descriptors: Vec<StreamDescriptor>,
    container_metadata: HashMap<String, String>,
    output_buffer: Vec<u8>,
    error: Option<String>,
    invalid: bool,
}

struct StreamCandidate {
    index: usize,
    parameters: codec::Parameters,
    time_base: ffmpeg_next::Rational,
    rate: ffmpeg_next::Rational,
    start_time: i64,
    duration: i64,
    nb_frames: i64,
    sample_aspect_ratio: (i32, i32),
}

impl FrameReader {
    /// Opens `filename`. Never panics; a reader that failed to open reports
    /// `is_invalid() == true` and refuses `decode`.
    pub fn open(filename: &str) -> FrameReader {
        let mut inner = ReaderInner {
            input: None,
            decoders: Vec::new(),
            descriptors: Vec::new(),
            container_metadata: HashMap::new(),
            output_buffer: Vec::new(),
            error: None,
            invalid: false,
        };

        if filename.is_empty() {
            inner.invalid = true;
            inner.error = Some(ReaderError::EmptyFilename.to_string());
        } else if let Err(e) = inner.open(filename) {
            log::warn!("failed to open '{}': {}", filename, e);
            inner.invalid = true;
            inner.error = Some(e.to_string());
        }

        FrameReader { inner: Mutex::new(inner) }
    }

    pub fn decode(&self, frame: i64, load_nearest: bool, max_retries: u32) -> bool {
        let mut inner = self.inner.lock();
        if inner.invalid {
            return false;
        }
        match inner.decode_impl(frame, load_nearest, max_retries) {
            Ok(()) => true,
            Err(e) => {
                inner.error = Some(e.to_string());
                if let Some(d) = inner.descriptors.first_mut() {
                    d.decode_next_frame_out = -1;
                }
                false
            }
        }
    }

    pub fn get_info(
        &self,
        stream_idx: usize,
        width: &mut u32,
        height: &mut u32,
        aspect: &mut f64,
        frames: &mut i64,
    ) -> bool {
        let inner = self.inner.lock();
        match inner.descriptors.get(stream_idx) {
            Some(d) => {
                *width = d.width;
                *height = d.height;
                *aspect = d.aspect;
                *frames = d.total_frames;
                true
            }
            None => false,
        }
    }

    pub fn get_fps(&self, stream_idx: usize, fps: &mut f64) -> bool {
        let inner = self.inner.lock();
        match inner.descriptors.get(stream_idx) {
            Some(d) if d.fps_den != 0 => {
                *fps = d.fps_num as f64 / d.fps_den as f64;
                true
            }
            _ => false,
        }
    }

    pub fn get_colorspace(&self) -> String {
        let inner = self.inner.lock();
        let is_yuv = match inner.decoders.first() {
            Some(d) => !is_rgb_family(d.format()),
            None => true,
        };
        colorspace_from_metadata(&inner.container_metadata, is_yuv)
    }

    pub fn get_error(&self) -> String {
        self.inner.lock().error.clone().unwrap_or_default()
    }

    pub fn is_invalid(&self) -> bool {
        self.inner.lock().invalid
    }

    pub fn get_bit_depth(&self) -> u32 {
        self.inner.lock().descriptors.first().map(|d| d.bit_depth).unwrap_or(0)
    }

    pub fn get_num_components(&self) -> u32 {
        self.inner.lock().descriptors.first().map(|d| d.num_components).unwrap_or(0)
    }

    pub fn get_row_size(&self) -> usize {
        self.inner.lock().descriptors.first().map(|d| d.row_size()).unwrap_or(0)
    }

    pub fn get_buffer_size(&self) -> usize {
        self.inner.lock().descriptors.first().map(|d| d.buffer_size()).unwrap_or(0)
    }

    /// Overrides the YUV->RGB coefficient matrix for the active stream.
    /// Invalidates the cached scaler so the next `decode` rebuilds it.
    pub fn set_color_matrix_override(&self, value: ColorMatrixOverride) {
        let mut inner = self.inner.lock();
        if let Some(d) = inner.descriptors.first_mut() {
            d.set_color_matrix_override(value);
        }
    }

    /// Returns a view of the shared output buffer, holding the reader's lock
    /// for the guard's lifetime. The caller must copy it out before the next
    /// `decode` call overwrites it.
    pub fn get_data(&self) -> MappedMutexGuard<'_, [u8]> {
        MutexGuard::map(self.inner.lock(), |inner| inner.output_buffer.as_mut_slice())
    }

    /// Read-only snapshot of the active stream's decode cursors, for
    /// diagnostics. Never mutated from outside the reader.
    pub fn stats(&self) -> Option<DecodeStats> {
        let inner = self.inner.lock();
        inner.descriptors.first().map(|d| DecodeStats {
            decode_next_frame_in: d.decode_next_frame_in,
            decode_next_frame_out: d.decode_next_frame_out,
            accum_decode_latency: d.accum_decode_latency,
            using_pts: d.timestamp_field == TimestampField::Pts,
            seek_count: d.seek_count,
        })
    }
}

impl std::fmt::Debug for FrameReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("FrameReader")
            .field("invalid", &inner.invalid)
            .field("streams", &inner.descriptors.len())
            .field("error", &inner.error)
            .finish()
    }
}

/// Snapshot of the active stream's decode cursors, exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    pub decode_next_frame_in: i64,
    pub decode_next_frame_out: i64,
    pub accum_decode_latency: u32,
    pub using_pts: bool,
    pub seek_count: u64,
}

impl ReaderInner {
    fn open(&mut self, filename: &str) -> Result<()> {
        ffmpeg_next::init().map_err(ReaderError::OpenContainer)?;

        let mut input = format::input(&filename).map_err(ReaderError::OpenContainer)?;

        self.container_metadata = input
            .metadata()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let candidates: Vec<StreamCandidate> = input
            .streams()
            .map(|stream| {
                let sar = unsafe {
                    let raw = (*stream.as_ptr()).sample_aspect_ratio;
                    (raw.num, raw.den)
                };
                StreamCandidate {
                    index: stream.index(),
                    parameters: stream.parameters(),
                    time_base: stream.time_base(),
                    rate: stream.rate(),
                    start_time: stream.start_time(),
                    duration: stream.duration(),
                    nb_frames: stream.frames(),
                    sample_aspect_ratio: sar,
                }
            })
            .collect();

        let thread_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(1, 16);

        for candidate in candidates {
            if candidate.parameters.medium() != media::Type::Video {
                continue;
            }
            if codec::decoder::find(candidate.parameters.id()).is_none() {
                continue;
            }

            let mut ctx = match codec::context::Context::from_parameters(candidate.parameters.clone()) {
                Ok(ctx) => ctx,
                Err(_) => continue,
            };
            ctx.set_threading(threading::Config {
                kind: threading::Type::Frame,
                count: thread_count,
                safe: true,
            });

            unsafe {
                let codec_ptr = ffi::avcodec_find_decoder((*ctx.as_ptr()).codec_id);
                if !codec_ptr.is_null() {
                    let supports_dr1 = (*codec_ptr).capabilities & ffi::AV_CODEC_CAP_DR1 as i32 != 0;
                    let is_lowres = (*ctx.as_ptr()).lowres > 0;
                    if supports_dr1 || is_lowres {
                        (*ctx.as_mut_ptr()).flags |= ffi::AV_CODEC_FLAG_EMU_EDGE as i32;
                    }
                }
            }

            let decoder = match ctx.decoder().video() {
                Ok(d) => d,
                Err(e) => {
                    log::warn!("stream {}: failed to open decoder: {}", candidate.index, e);
                    continue;
                }
            };

            let width = decoder.width();
            let height = decoder.height();

            let reported_components = unsafe {
                let desc = ffi::av_pix_fmt_desc_get(decoder.format().into());
                if desc.is_null() {
                    3
                } else {
                    (*desc).nb_components as u32
                }
            };
            let num_components = promote_num_components(reported_components);

            let bit_depth = unsafe {
                let raw = (*decoder.as_ptr()).bits_per_raw_sample;
                if raw > 0 {
                    raw as u32
                } else {
                    let desc = ffi::av_pix_fmt_desc_get(decoder.format().into());
                    if desc.is_null() || (*desc).comp[0].depth == 0 {
                        8
                    } else {
                        (*desc).comp[0].depth as u32
                    }
                }
            };

            let output_pixel_format = derive_output_format(bit_depth, num_components);

            let fps_num = if candidate.rate.numerator() > 0 { candidate.rate.numerator() as i64 } else { 1 };
            let fps_den = if candidate.rate.denominator() > 0 { candidate.rate.denominator() as i64 } else { 1 };

            let aspect = {
                let (snum, sden) = candidate.sample_aspect_ratio;
                if snum != 0 && sden != 0 {
                    snum as f64 / sden as f64
                } else {
                    let (cnum, cden) = unsafe {
                        let raw = (*decoder.as_ptr()).sample_aspect_ratio;
                        (raw.num, raw.den)
                    };
                    if cnum != 0 && cden != 0 {
                        cnum as f64 / cden as f64
                    } else {
                        1.0
                    }
                }
            };

            let tb_num = candidate.time_base.numerator() as i64;
            let tb_den = candidate.time_base.denominator() as i64;

            let start_pts = if candidate.start_time != AV_NOPTS_VALUE {
                candidate.start_time
            } else {
                probe_start_pts(&mut input, candidate.index)
            };

            let mut descriptor = StreamDescriptor {
                index: candidate.index,
                width,
                height,
                bit_depth,
                num_components,
                output_pixel_format,
                fps_num,
                fps_den,
                aspect,
                start_pts,
                total_frames: 0,
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
            };

            descriptor.total_frames =
                compute_total_frames(&descriptor, input.duration(), candidate.duration, candidate.nb_frames);
            if descriptor.total_frames <= 0 {
                descriptor.total_frames = measure_total_frames(&mut input, &descriptor).unwrap_or(1).max(1);
            }

            self.descriptors.push(descriptor);
            self.decoders.push(decoder);
        }

        if self.descriptors.is_empty() {
            return Err(ReaderError::NoVideoStream);
        }

        let active = &self.descriptors[0];
        self.output_buffer = vec![0u8; buffer_size(active.output_pixel_format, active.width, active.height)];
        self.input = Some(input);
        Ok(())
    }

    fn seek_to(&mut self, frame: i64) -> Result<()> {
        let pts = self.descriptors[0].frame_to_pts(frame);
        self.decoders[0].flush();
        let input = self.input.as_mut().expect("seek_to called on an unopened reader");
        input.seek(pts, ..pts).map_err(ReaderError::Seek)?;
        self.descriptors[0].decode_next_frame_in = -1;
        self.descriptors[0].decode_next_frame_out = -1;
        self.descriptors[0].reset_decode_latency();
        self.descriptors[0].seek_count += 1;
        Ok(())
    }

    /// Reads packets until one belongs to the active stream. Returns `false`
    /// on EOF; other-stream packets are silently discarded.
    fn next_stream_packet(&mut self, packet: &mut Packet) -> Result<bool> {
        let active_index = self.descriptors[0].index;
        loop {
            let input = self.input.as_mut().expect("next_stream_packet called on an unopened reader");
            match packet.read(input) {
                Ok(()) => {
                    if packet.stream() == active_index {
                        return Ok(true);
                    }
                }
                Err(ffmpeg_next::Error::Eof) => return Ok(false),
                Err(e) => return Err(ReaderError::Read(e)),
            }
        }
    }

    fn codec_delay(&self) -> u32 {
        unsafe { (*self.decoders[0].as_ptr()).delay.max(0) as u32 }
    }

    /// Corrects `total_frames` to what was actually observed and decides
    /// what the caller should do next: `Ok(None)`
    /// means the target frame was recovered from the decoder's held frames
    /// during flush and `decode` is done; `Ok(Some(frame))` means reseek to
    /// `frame` and keep going.
    fn handle_eof(&mut self, target: i64, load_nearest: bool) -> Result<Option<i64>> {
        let corrected = self.descriptors[0].decode_next_frame_in.max(0).max(1);
        self.descriptors[0].total_frames = corrected;

        if target < corrected {
            if self.drain_and_match(target)? {
                return Ok(None);
            }
            return Err(ReaderError::MissingFrame);
        }

        if load_nearest {
            Ok(Some((corrected - 1).max(0)))
        } else {
            Err(ReaderError::MissingFrame)
        }
    }

    fn drain_and_match(&mut self, target: i64) -> Result<bool> {
        self.decoders[0].send_eof().map_err(ReaderError::Decode)?;
        let mut raw_frame = frame::Video::empty();
        loop {
            match self.decoders[0].receive_frame(&mut raw_frame) {
                Ok(()) => {
                    let out = self.descriptors[0].decode_next_frame_out.max(0);
                    self.descriptors[0].decode_next_frame_out = out + 1;
                    if out == target {
                        self.convert_frame(&raw_frame)?;
                        return Ok(true);
                    }
                }
                Err(_) => return Ok(false),
            }
        }
    }

    fn convert_frame(&mut self, raw: &frame::Video) -> Result<()> {
        let src_range = raw.color_range();
        let src_is_709 = matches!(raw.color_space(), color::Space::BT709);
        let src_format = raw.format();
        let (width, height) = (self.descriptors[0].width, self.descriptors[0].height);
        let dst_format = self.descriptors[0].output_pixel_format.ffmpeg_pixel();

        let converted = {
            let converter = get_converter(
                &mut self.descriptors[0],
                src_format,
                width,
                height,
                src_range,
                src_is_709,
                dst_format,
                width,
                height,
            )?;
            let mut converted = frame::Video::empty();
            converter.run(raw, &mut converted).map_err(ReaderError::Converter)?;
            converted
        };

        let row_bytes = self.descriptors[0].row_size();
        let stride = converted.stride(0);
        copy_packed_rows(&mut self.output_buffer, converted.data(0), stride, row_bytes, height as usize);
        Ok(())
    }

    fn decode_impl(&mut self, frame: i64, load_nearest: bool, max_retries: u32) -> Result<()> {
        if self.input.is_none() || self.descriptors.is_empty() {
            return Err(ReaderError::NoVideoStream);
        }

        let total_frames = self.descriptors[0].total_frames;
        let target = if frame < 0 || frame >= total_frames {
            if load_nearest {
                frame.clamp(0, (total_frames - 1).max(0))
            } else {
                return Err(ReaderError::MissingFrame);
            }
        } else {
            frame
        };

        let retries_budget = max_retries.max(1);
        let mut retries_left = retries_budget;

        let mut seek_target = if self.descriptors[0].decode_next_frame_out == target {
            None
        } else {
            Some(target)
        };
        let mut emitted_since_seek = self.descriptors[0].decode_next_frame_out == target;
        let mut pending_packet: Option<Packet> = None;
        let mut raw_frame = frame::Video::empty();

        'decode: loop {
            if let Some(mut dest) = seek_target.take() {
                self.seek_to(dest)?;
                emitted_since_seek = false;

                let landing = 'await_sync: loop {
                    let mut packet = Packet::empty();
                    if !self.next_stream_packet(&mut packet)? {
                        // Running off the end of the stream while still
                        // searching for a landing frame means the timing
                        // reference never resolved; `decode_next_frame_in` is
                        // -1 here (every seek resets it) so `handle_eof`'s
                        // "correction" would stomp total_frames to 1.
                        return Err(ReaderError::TimingReference);
                    }

                    let field = self.descriptors[0].timestamp_field;
                    if packet.pts().is_some() {
                        self.descriptors[0].pts_seen = true;
                    }
                    let landing_frame = field.extract(&packet).map(|ts| self.descriptors[0].pts_to_frame(ts));

                    let attempt = ResyncAttempt {
                        target_frame: target,
                        last_seeked_frame: dest,
                        using_pts: field == TimestampField::Pts,
                        pts_ever_seen: self.descriptors[0].pts_seen,
                    };

                    match evaluate_landing(attempt, landing_frame) {
                        ResyncOutcome::Valid { landing_frame } => {
                            pending_packet = Some(packet);
                            break 'await_sync landing_frame;
                        }
                        ResyncOutcome::Reseek { to_frame, switch_to_dts } => {
                            if switch_to_dts {
                                self.descriptors[0].timestamp_field = TimestampField::Dts;
                            }
                            self.seek_to(to_frame)?;
                            dest = to_frame;
                        }
                        ResyncOutcome::Fail => return Err(ReaderError::TimingReference),
                    }
                };

                self.descriptors[0].decode_next_frame_in = landing;
                self.descriptors[0].decode_next_frame_out = landing;
            }

            let packet = match pending_packet.take() {
                Some(p) => p,
                None => {
                    let mut p = Packet::empty();
                    if !self.next_stream_packet(&mut p)? {
                        match self.handle_eof(target, load_nearest)? {
                            None => return Ok(()),
                            Some(new_target) => {
                                seek_target = Some(new_target);
                                continue 'decode;
                            }
                        }
                    }
                    p
                }
            };

            if packet.pts().is_some() {
                self.descriptors[0].pts_seen = true;
            }

            self.decoders[0].send_packet(&packet).map_err(ReaderError::Decode)?;
            self.descriptors[0].decode_next_frame_in += 1;

            let mut got_frame = false;
            loop {
                match self.decoders[0].receive_frame(&mut raw_frame) {
                    Ok(()) => {
                        got_frame = true;
                        emitted_since_seek = true;
                        self.descriptors[0].reset_decode_latency();
                        let out = self.descriptors[0].decode_next_frame_out.max(0);
                        self.descriptors[0].decode_next_frame_out = out + 1;
                        if out == target {
                            self.convert_frame(&raw_frame)?;
                            return Ok(());
                        }
                    }
                    Err(_) => break,
                }
            }

            if !got_frame {
                self.descriptors[0].accum_decode_latency += 1;
                let codec_delay = self.codec_delay();
                if is_stalled(self.descriptors[0].accum_decode_latency, codec_delay) {
                    let phase = if emitted_since_seek { StallPhase::MidDecode } else { StallPhase::PostSeek };
                    match recover(phase, self.descriptors[0].decode_next_frame_out, retries_left) {
                        RecoveryAction::SeekEarlier { to_frame } => {
                            seek_target = Some(to_frame);
                        }
                        RecoveryAction::ConsumeRetryAndReseekToTarget => {
                            retries_left -= 1;
                            seek_target = Some(target);
                        }
                        RecoveryAction::Fail => {
                            return Err(if phase == StallPhase::PostSeek {
                                ReaderError::PostSeekStall
                            } else {
                                ReaderError::MidDecodeStall
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Derives `total_frames` from container duration, stream duration, and the
/// stream's own reported frame count, in that preference order. A measured
/// scan is applied by the caller when this returns `<= 0`.
fn compute_total_frames(
    descriptor: &StreamDescriptor,
    container_duration: i64,
    stream_duration: i64,
    stream_frames: i64,
) -> i64 {
    let candidate1 = if container_duration > 0 && descriptor.fps_den > 0 {
        let divisor = AV_TIME_BASE as i128 * descriptor.fps_den as i128;
        let numerator = (container_duration as i128 - 1) * descriptor.fps_num as i128 + divisor - 1;
        (numerator.div_euclid(divisor)) as i64
    } else {
        0
    };

    if candidate1 > 0 {
        if stream_frames > 0 && (stream_frames - candidate1).abs() <= 1 {
            return stream_frames;
        }
        return candidate1;
    }

    if stream_frames > 0 {
        return stream_frames;
    }

    if stream_duration > 0 && descriptor.tb_den > 0 && descriptor.fps_den > 0 {
        let numerator = stream_duration as i128 * descriptor.tb_num as i128 * descriptor.fps_num as i128;
        let denominator = descriptor.tb_den as i128 * descriptor.fps_den as i128;
        return (numerator / denominator) as i64;
    }

    0
}

/// Last-resort frame-count fallback: seek past the end, read to the true
/// end, and take `1 + pts_to_frame(max_pts)`. Only reached when the
/// container is silent about duration and frame count.
fn measure_total_frames(input: &mut format::context::Input, descriptor: &StreamDescriptor) -> Result<i64> {
    input.seek(i64::MAX, ..i64::MAX).map_err(ReaderError::Seek)?;
    let mut packet = Packet::empty();
    let mut max_pts = descriptor.start_pts;
    loop {
        match packet.read(input) {
            Ok(()) => {
                if packet.stream() == descriptor.index {
                    if let Some(ts) = descriptor.timestamp_field.extract(&packet) {
                        max_pts = max_pts.max(ts);
                    }
                }
            }
            Err(ffmpeg_next::Error::Eof) => break,
            Err(e) => return Err(ReaderError::Read(e)),
        }
    }
    let _ = input.seek(0, ..0);
    Ok(descriptor.pts_to_frame(max_pts) + 1)
}

/// `start_pts` fallback: seek to the beginning and read until a packet for
/// `stream_index` carries a valid PTS, else 0.
fn probe_start_pts(input: &mut format::context::Input, stream_index: usize) -> i64 {
    if input.seek(0, ..0).is_err() {
        return 0;
    }
    let mut packet = Packet::empty();
    let result = loop {
        match packet.read(input) {
            Ok(()) => {
                if packet.stream() == stream_index {
                    if let Some(pts) = packet.pts() {
                        break pts;
                    }
                }
            }
            Err(_) => break 0,
        }
    };
    let _ = input.seek(0, ..0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::OutputPixelFormat;

    fn descriptor(fps_num: i64, fps_den: i64, tb_num: i64, tb_den: i64) -> StreamDescriptor {
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
            start_pts: 0,
            total_frames: 0,
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
    fn duration_off_by_one_clamps_to_stream_frame_count() {
        // 5.0042s at 24fps, reported in AV_TIME_BASE (microsecond) units.
        let d = descriptor(24, 1, 1, 24000);
        let container_duration = 5_004_200i64;

        // With no stream-reported count, candidate1's ceil-biased rounding
        // overshoots to 121.
        let total = compute_total_frames(&d, container_duration, 0, 0);
        assert_eq!(total, 121);

        // The stream itself reports the true 120 frames (5s * 24fps), within
        // 1 of candidate1: the clamp prefers it over the rounded-up value.
        let total = compute_total_frames(&d, container_duration, 0, 120);
        assert_eq!(total, 120);
    }

    #[test]
    fn stream_frame_count_used_when_no_container_duration() {
        let d = descriptor(24, 1, 1, 24000);
        assert_eq!(compute_total_frames(&d, 0, 0, 240), 240);
    }

    #[test]
    fn stream_duration_fallback_when_nothing_else_reported() {
        let d = descriptor(24, 1, 1, 24000);
        // 10 seconds of stream-timebase duration at 24fps -> 240 frames.
        let stream_duration = 10 * 24000;
        assert_eq!(compute_total_frames(&d, 0, stream_duration, 0), 240);
    }

    #[test]
    fn zero_when_nothing_is_reported() {
        let d = descriptor(24, 1, 1, 24000);
        assert_eq!(compute_total_frames(&d, 0, 0, 0), 0);
    }
}
