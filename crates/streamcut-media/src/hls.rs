// crates/streamcut-media/src/hls.rs
//
// StreamDecoder: stateful decoder for one remote HLS rendition.
// FFmpeg's demuxer handles the playlist/segment plumbing; this wraps it
// into open → seek → next_frame with RGBA output sized for display.

use std::path::PathBuf;

use anyhow::Result;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

/// Display width frames are scaled to. Height follows the source ratio.
const OUT_WIDTH: u32 = 640;

pub(crate) fn secs_to_pts(t: f64, tb_num: i32, tb_den: i32) -> i64 {
    (t * tb_den as f64 / tb_num as f64) as i64
}

pub(crate) fn pts_to_secs(pts: i64, tb_num: i32, tb_den: i32) -> f64 {
    pts as f64 * tb_num as f64 / tb_den as f64
}

pub struct StreamDecoder {
    pub url:   String,
    ictx:      ffmpeg::format::context::Input,
    decoder:   ffmpeg::decoder::video::Video,
    video_idx: usize,
    tb_num:    i32,
    tb_den:    i32,
    last_pts:  i64,
    /// Frames with pts below this are decoded but not emitted — burns
    /// through the GOP after a keyframe-aligned seek.
    skip_until_pts: i64,
    duration:  f64,
    src_w:     u32,
    src_h:     u32,
    out_w:     u32,
    out_h:     u32,
    scaler:    SwsContext,
}

impl StreamDecoder {
    /// Open the rendition at `url` and position at `start_at` seconds.
    /// FFmpeg treats the target string as its input, so the same path works
    /// for https playlists and local files (tests use the latter).
    pub fn open(url: &str, start_at: f64) -> Result<Self> {
        let target = PathBuf::from(url);
        let mut ictx = input(&target)?;

        let video_idx = ictx.streams().best(Type::Video)
            .ok_or_else(|| anyhow::anyhow!("no video stream in rendition"))?
            .index();

        let (tb_num, tb_den, src_w, src_h) = {
            let stream = ictx.stream(video_idx).unwrap();
            let tb = stream.time_base();
            let (w, h) = unsafe {
                let p = stream.parameters().as_ptr();
                ((*p).width as u32, (*p).height as u32)
            };
            (tb.numerator(), tb.denominator(), w, h)
        };

        let duration = {
            let d = ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
            if d > 0.0 {
                d
            } else {
                // Live-edge playlists report no container duration; fall
                // back to the stream header, which may also be zero.
                let stream = ictx.stream(video_idx).unwrap();
                stream.duration() as f64 * tb_num as f64 / tb_den as f64
            }
        };

        let seek_pts = secs_to_pts(start_at.max(0.0), tb_num, tb_den);
        if seek_pts > 0 {
            let _ = ictx.seek(seek_pts, ..=seek_pts);
        }

        // Second context for decoder params (Parameters borrows from ictx).
        let ictx2   = input(&target)?;
        let stream2 = ictx2.stream(video_idx).unwrap();
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
        let decoder = dec_ctx.decoder().video()?;

        let out_w = OUT_WIDTH.min(src_w.max(2));
        let out_h = ((out_w as u64 * src_h.max(2) as u64 / src_w.max(2) as u64) as u32)
            .max(2) & !1;

        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        )?;

        Ok(Self {
            url: url.to_string(),
            ictx, decoder, video_idx,
            tb_num, tb_den,
            last_pts: seek_pts,
            skip_until_pts: seek_pts,
            duration, src_w, src_h, out_w, out_h, scaler,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn size(&self) -> (u32, u32) {
        (self.src_w, self.src_h)
    }

    /// Jump to `t` seconds. Seeks the demuxer to the enclosing keyframe,
    /// flushes the decoder, and arms skip_until_pts so the next emitted
    /// frame is at or past the target.
    pub fn seek(&mut self, t: f64) -> Result<()> {
        let target = secs_to_pts(t.max(0.0), self.tb_num, self.tb_den);
        self.ictx.seek(target, ..=target)?;
        self.decoder.flush();
        self.last_pts       = target;
        self.skip_until_pts = target;
        Ok(())
    }

    /// Decode until the next presentable frame. Returns
    /// `(rgba, w, h, ts_secs)`, or None at end of stream.
    pub fn next_frame(&mut self) -> Option<(Vec<u8>, u32, u32, f64)> {
        for (stream, packet) in self.ictx.packets().flatten() {
            if stream.index() != self.video_idx { continue; }
            if self.decoder.send_packet(&packet).is_err() { continue; }
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(self.last_pts + 1);
                self.last_pts = pts;
                // Post-seek GOP burn: decode but don't emit.
                if pts + 2 < self.skip_until_pts { continue; }

                let mut out = ffmpeg::util::frame::video::Video::empty();
                if self.scaler.run(&decoded, &mut out).is_err() { return None; }

                // Destripe: copy only visible pixels, not stride padding.
                let stride = out.stride(0);
                let raw    = out.data(0);
                let row    = self.out_w as usize * 4;
                let data: Vec<u8> = (0..self.out_h as usize)
                    .flat_map(|r| {
                        let s = r * stride;
                        &raw[s..s + row]
                    })
                    .copied()
                    .collect();

                let ts = pts_to_secs(pts, self.tb_num, self.tb_den);
                return Some((data, self.out_w, self.out_h, ts));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_round_trips_through_seconds() {
        // 90 kHz clock, the usual HLS time base.
        let pts = secs_to_pts(12.5, 1, 90_000);
        assert_eq!(pts, 1_125_000);
        assert!((pts_to_secs(pts, 1, 90_000) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn fractional_time_bases_convert() {
        // 1/1000 time base (webm-style).
        assert_eq!(secs_to_pts(3.2, 1, 1000), 3200);
        assert!((pts_to_secs(3200, 1, 1000) - 3.2).abs() < 1e-9);
    }
}
