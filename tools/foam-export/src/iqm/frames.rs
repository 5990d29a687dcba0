//! Quantized frame stream decoding and clip slicing.
//!
//! Every frame stores, for each pose in order, one `u16` per channel whose
//! mask bit is set. A channel's value is
//! `channel_offset + quantized * channel_scale`; a channel without its mask
//! bit holds `channel_offset`.

use foam_common::{AnimationClip, FormatError, Frame, Result};
use glam::{Quat, Vec3};

use super::context::DecodeContext;
use super::records::{POSE_CHANNELS, Pose};
use super::skeleton::compose_local;

/// Mask bits that select a channel; higher bits are ignored.
const CHANNEL_BITS: u32 = (1 << POSE_CHANNELS) - 1;

/// Decode the shared frame timeline into bone-local matrices.
pub fn decode_frames(ctx: &DecodeContext) -> Result<Vec<Frame>> {
    let num_frames = ctx.header.num_frames as usize;
    if num_frames == 0 {
        return Ok(Vec::new());
    }
    if ctx.poses.len() != ctx.joints.len() {
        return Err(FormatError::Malformed(format!(
            "IQM has {} poses for {} joints",
            ctx.poses.len(),
            ctx.joints.len()
        )));
    }

    let channels = ctx.header.num_framechannels as usize;
    let masked: usize = ctx
        .poses
        .iter()
        .map(|pose| (pose.channel_mask & CHANNEL_BITS).count_ones() as usize)
        .sum();
    if masked != channels {
        return Err(FormatError::FrameChannelMismatch {
            masked,
            declared: channels,
        });
    }

    (0..num_frames)
        .map(|frame| {
            let start = frame * channels;
            let data = ctx.frame_data.get(start..start + channels).unwrap_or(&[]);
            decode_frame(&ctx.poses, data, frame, channels)
        })
        .collect()
}

fn decode_frame(poses: &[Pose], data: &[u16], frame: usize, channels: usize) -> Result<Frame> {
    let mut values = data.iter().copied();
    let transforms = poses
        .iter()
        .map(|pose| {
            let mut c = pose.channel_offset;
            for (k, value) in c.iter_mut().enumerate() {
                if pose.has_channel(k) {
                    let quantized = values
                        .next()
                        .ok_or(FormatError::FrameDataExhausted { frame, channels })?;
                    *value += f32::from(quantized) * pose.channel_scale[k];
                }
            }
            Ok(compose_local(
                Vec3::new(c[0], c[1], c[2]),
                Quat::from_xyzw(c[3], c[4], c[5], c[6]),
                Vec3::new(c[7], c[8], c[9]),
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Frame::new(transforms))
}

/// One clip per anim entry, each owning its `[first, first + count)` slice.
pub fn build_clips(
    ctx: &DecodeContext,
    frames: &[Frame],
    bone_names: &[String],
) -> Result<Vec<AnimationClip>> {
    ctx.anims
        .iter()
        .map(|anim| {
            let name = ctx.text_at(anim.name)?;
            let first = anim.first_frame as usize;
            let end = u64::from(anim.first_frame) + u64::from(anim.num_frames);
            let slice = usize::try_from(end)
                .ok()
                .and_then(|end| frames.get(first..end))
                .ok_or_else(|| FormatError::ClipOutOfRange {
                    clip: name.clone(),
                    first: anim.first_frame,
                    end,
                    available: frames.len(),
                })?;

            tracing::debug!(
                "Clip '{}': frames {}..{} at {} fps",
                name,
                anim.first_frame,
                end,
                anim.framerate
            );
            Ok(AnimationClip::new(
                name,
                bone_names.to_vec(),
                slice.to_vec(),
                anim.num_frames as f32,
                anim.framerate,
            ))
        })
        .collect()
}
