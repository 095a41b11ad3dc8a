//! Pure stall-detection and recovery decision logic. Kept independent of
//! ffmpeg types for the same testability reason as `resync`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallPhase {
    /// No frame has been emitted since the last seek.
    PostSeek,
    /// At least one frame has been emitted since the last seek.
    MidDecode,
}

/// A stall is declared once accumulated latency exceeds the codec's
/// currently reported delay.
pub fn is_stalled(accum_decode_latency: u32, codec_delay: u32) -> bool {
    accum_decode_latency > codec_delay
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Back off one frame and keep searching for an earlier valid decode
    /// start. Does not consume a retry.
    SeekEarlier { to_frame: i64 },
    /// Consume one retry and reseek to the frame the caller originally asked
    /// `decode()` for.
    ConsumeRetryAndReseekToTarget,
    /// Retry budget exhausted.
    Fail,
}

/// Decide how to recover from a declared stall. `retries_left` must already
/// reflect `max(1, max_retries)`.
pub fn recover(
    phase: StallPhase,
    decode_next_frame_out: i64,
    retries_left: u32,
) -> RecoveryAction {
    match phase {
        StallPhase::PostSeek => {
            if decode_next_frame_out > 0 {
                RecoveryAction::SeekEarlier {
                    to_frame: decode_next_frame_out - 1,
                }
            } else if retries_left > 0 {
                RecoveryAction::ConsumeRetryAndReseekToTarget
            } else {
                RecoveryAction::Fail
            }
        }
        StallPhase::MidDecode => {
            if retries_left > 0 {
                RecoveryAction::ConsumeRetryAndReseekToTarget
            } else {
                RecoveryAction::Fail
            }
        }
    }
}
