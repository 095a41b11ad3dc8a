//! Error taxonomy for the frame reader, per the "error as value" design: every
//! fallible internal step produces one of these, and the public API collapses
//! them to `bool` + a stored message (see `FrameReader::get_error`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("empty filename")]
    EmptyFilename,

    #[error("unable to open container: {0}")]
    OpenContainer(ffmpeg_next::Error),

    #[error("unsupported codec")]
    UnsupportedCodec,

    #[error("unable to find video stream")]
    NoVideoStream,

    #[error("failed to open decoder: {0}")]
    OpenDecoder(ffmpeg_next::Error),

    #[error("seek failed: {0}")]
    Seek(ffmpeg_next::Error),

    #[error("packet read failed: {0}")]
    Read(ffmpeg_next::Error),

    #[error("decoder rejected packet: {0}")]
    Decode(ffmpeg_next::Error),

    #[error("failed to find timing reference frame")]
    TimingReference,

    #[error("failed to find decode reference frame")]
    PostSeekStall,

    #[error("detected decoding stall")]
    MidDecodeStall,

    #[error("missing frame")]
    MissingFrame,

    #[error("failed to build color converter: {0}")]
    Converter(ffmpeg_next::Error),

    #[error("reader is invalid: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
