//! WAV renderer — renders pipeline output to a WAV byte buffer.
//!
//! Offline counterpart to the real-time frame path: drive the pipeline from
//! any frequency source for a fixed number of samples and wrap the result in
//! a RIFF container for playback or inspection.

use crate::input::FrequencySource;

use super::pipeline::{SynthesisPipeline, sample_to_i16};

/// Render `num_samples` of pipeline output as 16-bit PCM.
pub fn render_pcm(
    pipeline: &mut SynthesisPipeline,
    source: &mut dyn FrequencySource,
    num_samples: usize,
) -> Vec<i16> {
    (0..num_samples)
        .map(|_| sample_to_i16(pipeline.process_sample(source.next_frequency())))
        .collect()
}

/// Render pipeline output to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(
    pipeline: &mut SynthesisPipeline,
    source: &mut dyn FrequencySource,
    num_samples: usize,
    sample_rate: u32,
) -> Vec<u8> {
    let pcm = render_pcm(pipeline, source, num_samples);
    encode_wav(&pcm, sample_rate, 1)
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}
