//! Audio decoding for transcription
//!
//! Decodes supported containers (m4a, mp3, wav) into mono f32 samples at
//! Whisper's expected 16 kHz.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::conv::IntoSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

use crate::{MtgmapError, Result};

/// Whisper models are trained on 16 kHz mono audio.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decode an audio file into mono f32 samples at 16 kHz.
pub fn decode_samples(path: &Path) -> Result<Vec<f32>> {
    let file = File::open(path).map_err(|e| {
        MtgmapError::Transcription(format!(
            "Failed to open audio file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            MtgmapError::Transcription(format!(
                "Unsupported audio format {}: {}",
                path.display(),
                e
            ))
        })?;

    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| {
        MtgmapError::Transcription(format!("No audio track found in {}", path.display()))
    })?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params.sample_rate.ok_or_else(|| {
        MtgmapError::Transcription(format!("Unknown sample rate in {}", path.display()))
    })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| {
            MtgmapError::Transcription(format!(
                "Unsupported codec in {}: {}",
                path.display(),
                e
            ))
        })?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(MtgmapError::Transcription(format!(
                    "Failed to read audio packet from {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| {
            MtgmapError::Transcription(format!("Failed to decode {}: {}", path.display(), e))
        })?;

        push_mono_frames(&decoded, &mut samples);
    }

    if samples.is_empty() {
        return Err(MtgmapError::Transcription(format!(
            "No audio samples decoded from {}",
            path.display()
        )));
    }

    tracing::debug!(
        "Decoded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        path.display()
    );

    if sample_rate != WHISPER_SAMPLE_RATE {
        Ok(resample(&samples, sample_rate, WHISPER_SAMPLE_RATE))
    } else {
        Ok(samples)
    }
}

/// Downmix a decoded buffer to mono f32 and append it to `out`.
fn push_mono_frames(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => push_frames(buf, out),
        AudioBufferRef::U16(buf) => push_frames(buf, out),
        AudioBufferRef::U24(buf) => push_frames(buf, out),
        AudioBufferRef::U32(buf) => push_frames(buf, out),
        AudioBufferRef::S8(buf) => push_frames(buf, out),
        AudioBufferRef::S16(buf) => push_frames(buf, out),
        AudioBufferRef::S24(buf) => push_frames(buf, out),
        AudioBufferRef::S32(buf) => push_frames(buf, out),
        AudioBufferRef::F32(buf) => push_frames(buf, out),
        AudioBufferRef::F64(buf) => push_frames(buf, out),
    }
}

fn push_frames<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buf.spec().channels.count();
    if channels == 0 {
        return;
    }

    for frame in 0..buf.frames() {
        let mut acc = 0.0f32;
        for ch in 0..channels {
            acc += buf.chan(ch)[frame].into_sample();
        }
        out.push(acc / channels as f32);
    }
}

/// Simple linear resampling
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio) as usize;
    let mut result = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        let sample = if src_idx + 1 < samples.len() {
            samples[src_idx] * (1.0 - frac as f32) + samples[src_idx + 1] * frac as f32
        } else if src_idx < samples.len() {
            samples[src_idx]
        } else {
            0.0
        };

        result.push(sample);
    }

    result
}
