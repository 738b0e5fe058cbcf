use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LpuvisError, LpuvisResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Encoder binaries tried by [`EncoderPreference::Auto`], in order.
pub const ENCODER_BINARIES: [&str; 2] = ["ffmpeg", "avconv"];

/// Which external encoder binary to use.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EncoderPreference {
    /// `ffmpeg`, falling back to `avconv`.
    #[default]
    Auto,
    /// `ffmpeg` only.
    Ffmpeg,
    /// `avconv` only.
    Avconv,
}

/// Pick the encoder binary for `pref`, asking `is_usable` whether a binary is usable.
pub fn select_encoder(
    pref: EncoderPreference,
    is_usable: impl Fn(&str) -> bool,
) -> LpuvisResult<&'static str> {
    let candidates: &[&'static str] = match pref {
        EncoderPreference::Auto => &ENCODER_BINARIES,
        EncoderPreference::Ffmpeg => &ENCODER_BINARIES[..1],
        EncoderPreference::Avconv => &ENCODER_BINARIES[1..],
    };
    candidates
        .iter()
        .copied()
        .find(|bin| is_usable(bin))
        .ok_or_else(|| {
            LpuvisError::encoder_unavailable(format!(
                "none of [{}] was found on PATH",
                candidates.join(", ")
            ))
        })
}

/// Return `true` when `bin -version` runs successfully.
pub fn is_on_path(bin: &str) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Background used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// Video codec passed as `-c:v`.
    pub codec: String,
    /// Encoder binary (`ffmpeg` or `avconv`).
    pub binary: &'static str,
}

impl FfmpegSinkOpts {
    /// Options writing `out_path` with `codec` through `ffmpeg`.
    pub fn new(out_path: impl Into<PathBuf>, codec: impl Into<String>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [255, 255, 255, 255],
            codec: codec.into(),
            binary: ENCODER_BINARIES[0],
        }
    }

    /// Use `binary` instead of `ffmpeg`.
    pub fn with_binary(mut self, binary: &'static str) -> Self {
        self.binary = binary;
        self
    }
}

/// Sink that spawns the encoder and streams raw frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a sink; the encoder process starts in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Encoder arguments for a stream of `cfg`-sized raw RGBA frames.
    pub fn command_args(&self, cfg: &SinkConfig) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        args.push(if self.opts.overwrite { "-y" } else { "-n" }.to_string());
        args.extend(
            [
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
            ]
            .map(String::from),
        );
        args.push(format!("{}x{}", cfg.width, cfg.height));
        args.extend(input_fps_args(cfg.fps));
        args.extend(["-i", "pipe:0", "-an", "-c:v"].map(String::from));
        args.push(self.opts.codec.clone());
        args.extend(["-pix_fmt", "yuv420p"].map(String::from));
        if wants_faststart(&self.opts.out_path) {
            args.extend(["-movflags", "+faststart"].map(String::from));
        }
        args.push(self.opts.out_path.display().to_string());
        args
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> LpuvisResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(LpuvisError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(LpuvisError::validation(
                "video sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(LpuvisError::validation(
                "video sink width/height must be even (required for yuv420p output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(LpuvisError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let bin = self.opts.binary;
        if !is_on_path(bin) {
            return Err(LpuvisError::encoder_unavailable(format!(
                "{bin} is required for video output, but was not found on PATH"
            )));
        }

        tracing::info!(
            encoder = bin,
            codec = %self.opts.codec,
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "starting video encoder"
        );

        let mut cmd = Command::new(bin);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(self.command_args(&cfg));

        let mut child = cmd
            .spawn()
            .map_err(|e| LpuvisError::render(format!("failed to spawn {bin}: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| LpuvisError::render(format!("failed to open {bin} stdin")))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| LpuvisError::render(format!("failed to open {bin} stderr")))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LpuvisResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| LpuvisError::render("video sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(LpuvisError::render(
                "video sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(LpuvisError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(LpuvisError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        if frame.premultiplied {
            flatten_premul_over_bg_to_opaque_rgba8(
                &mut self.scratch,
                &frame.data,
                self.opts.bg_rgba,
            )?;
        } else {
            flatten_straight_over_bg_to_opaque_rgba8(
                &mut self.scratch,
                &frame.data,
                self.opts.bg_rgba,
            )?;
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(LpuvisError::render("video sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            LpuvisError::render(format!(
                "failed to write frame to {} stdin: {e}",
                self.opts.binary
            ))
        })?;
        Ok(())
    }

    fn end(&mut self) -> LpuvisResult<()> {
        let bin = self.opts.binary;
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| LpuvisError::render("video sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| LpuvisError::render(format!("failed to wait for {bin}: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LpuvisError::render(format!("{bin} stderr drain thread panicked")))?
                .map_err(|e| LpuvisError::render(format!("{bin} stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(LpuvisError::render(format!(
                "{bin} exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::info!(out = %self.opts.out_path.display(), "video finalized");
        self.cfg = None;
        Ok(())
    }
}

fn input_fps_args(fps: Fps) -> [String; 2] {
    // `-r` before `-i` sets the rawvideo input rate.
    ["-r".to_string(), format!("{}/{}", fps.num, fps.den)]
}

fn wants_faststart(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mp4") || e.eq_ignore_ascii_case("mov"))
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> LpuvisResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(LpuvisError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255u16 - a;
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

fn flatten_straight_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    bg_rgba: [u8; 4],
) -> LpuvisResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LpuvisError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255u16 - a;
        for c in 0..3 {
            let fg = mul_div255_u16(u16::from(s[c]), a);
            let bg = mul_div255_u16(u16::from(bg_rgba[c]), inv);
            d[c] = (fg + bg).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> LpuvisResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
