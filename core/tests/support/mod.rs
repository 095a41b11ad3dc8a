//! Synthetic-clip encoder used by the integration tests. Grounds frame N's
//! pixel content in N itself (solid color = `N % 256`) so decoded output can
//! be checked for byte-identity across reads without shipping fixture files.

use ffmpeg_next::{codec, encoder, format, frame, software::scaling, util::rational::Rational, Packet};

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 48;
pub const FPS: i32 = 24;

/// Encodes `frame_count` frames of solid RGB color `(i % 256, i % 256, i %
/// 256)` into an mp4 at `path`, one keyframe every `gop` frames.
pub fn encode_clip(path: &std::path::Path, frame_count: i64, gop: i32) {
    ffmpeg_next::init().expect("ffmpeg init");

    let mut octx = format::output(&path).expect("open output");
    let codec = encoder::find(codec::Id::MPEG4).expect("mpeg4 encoder available");

    let mut stream = octx.add_stream(codec).expect("add stream");
    let mut encoder = codec::context::Context::new_with_codec(codec)
        .encoder()
        .video()
        .expect("video encoder context");

    encoder.set_width(WIDTH);
    encoder.set_height(HEIGHT);
    encoder.set_format(format::Pixel::YUV420P);
    encoder.set_time_base(Rational::new(1, FPS));
    encoder.set_gop(gop as u32);
    encoder.set_max_b_frames(0);

    let mut opened = encoder.open_as(codec).expect("open encoder");
    stream.set_parameters(&opened);
    stream.set_time_base(Rational::new(1, FPS));

    octx.write_header().expect("write header");

    let mut scaler = scaling::Context::get(
        format::Pixel::RGB24,
        WIDTH,
        HEIGHT,
        format::Pixel::YUV420P,
        WIDTH,
        HEIGHT,
        scaling::Flags::BICUBIC,
    )
    .expect("build rgb->yuv scaler");

    for i in 0..frame_count {
        let mut rgb = frame::Video::new(format::Pixel::RGB24, WIDTH, HEIGHT);
        let value = (i % 256) as u8;
        for b in rgb.data_mut(0) {
            *b = value;
        }

        let mut yuv = frame::Video::empty();
        scaler.run(&rgb, &mut yuv).expect("scale rgb->yuv");
        yuv.set_pts(Some(i));

        opened.send_frame(&yuv).expect("send frame");
        drain_packets(&mut opened, &mut octx, 0);
    }

    opened.send_eof().expect("send eof");
    drain_packets(&mut opened, &mut octx, 0);
    octx.write_trailer().expect("write trailer");
}

fn drain_packets(encoder: &mut encoder::Video, octx: &mut format::context::Output, stream_index: usize) {
    let mut packet = Packet::empty();
    loop {
        match encoder.receive_packet(&mut packet) {
            Ok(()) => {
                packet.set_stream(stream_index);
                packet.write_interleaved(octx).expect("write packet");
            }
            Err(_) => break,
        }
    }
}
