//! Pure resynchronization decision logic for the `SEEKING` / `AWAITING_SYNC`
//! states of the decode state machine. Kept free of any ffmpeg types so it
//! can be unit tested without a container or decoder.

/// One resync attempt's immutable context: the frame the caller originally
/// asked for, and whether PTS has ever been observed on this stream.
#[derive(Debug, Clone, Copy)]
pub struct ResyncAttempt {
    pub target_frame: i64,
    pub last_seeked_frame: i64,
    pub using_pts: bool,
    pub pts_ever_seen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResyncOutcome {
    /// The landing packet's timestamp mapped to a usable frame; cursors can
    /// be set to `landing_frame` and decoding resumes at this packet.
    Valid { landing_frame: i64 },
    /// Reseek and try again. `switch_to_dts` is set at most once per
    /// `decode()` call, which is what keeps this loop bounded.
    Reseek { to_frame: i64, switch_to_dts: bool },
    /// Walked back past frame 0 with no PTS fallback left: the file is
    /// structurally broken.
    Fail,
}

/// Evaluate a landing timestamp against the current resync attempt: decide
/// whether the packet we landed on after seeking is usable, or whether to
/// walk back further (and, as a last resort, switch timestamp sources).
pub fn evaluate_landing(attempt: ResyncAttempt, landing: Option<i64>) -> ResyncOutcome {
    let valid = match landing {
        None => false,
        Some(landing) => landing <= attempt.last_seeked_frame,
    };
    if valid {
        return ResyncOutcome::Valid {
            landing_frame: landing.unwrap(),
        };
    }

    let next_target = attempt.last_seeked_frame - 1;
    if next_target < 0 {
        if attempt.using_pts && !attempt.pts_ever_seen {
            return ResyncOutcome::Reseek {
                to_frame: attempt.target_frame,
                switch_to_dts: true,
            };
        }
        return ResyncOutcome::Fail;
    }

    ResyncOutcome::Reseek {
        to_frame: next_target,
        switch_to_dts: false,
    }
}
