//! Log-mel front end for the CLAP audio tower.

use std::f32::consts::PI;

use ndarray::{Array2, Array4};
use rustfft::{FftPlanner, num_complex::Complex};

pub const CLAP_SAMPLE_RATE: u32 = 48_000;
pub const CLIP_SAMPLES: usize = CLAP_SAMPLE_RATE as usize * 10;
pub const N_FFT: usize = 1024;
pub const HOP_LENGTH: usize = 480;
pub const N_MELS: usize = 64;
const FMIN: f64 = 50.0;
const FMAX: f64 = 14_000.0;
const AMIN: f32 = 1e-10;

/// Repeats short clips until they fill ten seconds, then zero-pads the remainder.
/// Longer clips keep their first ten seconds.
pub fn fit_to_clip(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return vec![0.0; CLIP_SAMPLES];
    }
    if samples.len() >= CLIP_SAMPLES {
        return samples[..CLIP_SAMPLES].to_vec();
    }

    let repeats = CLIP_SAMPLES / samples.len();
    let mut clip = Vec::with_capacity(CLIP_SAMPLES);
    for _ in 0..repeats {
        clip.extend_from_slice(samples);
    }
    clip.resize(CLIP_SAMPLES, 0.0);
    clip
}

fn hann_window(length: usize) -> Vec<f32> {
    (0..length)
        .map(|i| 0.5 - 0.5 * ((2.0 * PI * i as f32) / length as f32).cos())
        .collect()
}

/// Centered power spectrogram, shaped `(freq_bins, frames)`.
fn power_spectrogram(audio: &[f32]) -> Array2<f32> {
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(N_FFT);
    let window = hann_window(N_FFT);

    let pad = N_FFT / 2;
    let mut padded = vec![0.0f32; pad];
    padded.extend_from_slice(audio);
    padded.extend(std::iter::repeat_n(0.0f32, pad));

    let frames = (padded.len() - N_FFT) / HOP_LENGTH + 1;
    let freq_bins = N_FFT / 2 + 1;
    let mut spectrogram = Array2::<f32>::zeros((freq_bins, frames));
    let mut buffer = vec![Complex::new(0.0f32, 0.0); N_FFT];

    for frame in 0..frames {
        let start = frame * HOP_LENGTH;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(padded[start + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);
        for k in 0..freq_bins {
            spectrogram[[k, frame]] = buffer[k].norm_sqr();
        }
    }

    spectrogram
}

fn hz_to_mel(hz: f64) -> f64 {
    let f_sp = 200.0 / 3.0;
    let min_log_hz = 1000.0;
    let min_log_mel = min_log_hz / f_sp;
    let logstep = 6.4f64.ln() / 27.0;
    if hz >= min_log_hz {
        min_log_mel + (hz / min_log_hz).ln() / logstep
    } else {
        hz / f_sp
    }
}

fn mel_to_hz(mel: f64) -> f64 {
    let f_sp = 200.0 / 3.0;
    let min_log_hz = 1000.0;
    let min_log_mel = min_log_hz / f_sp;
    let logstep = 6.4f64.ln() / 27.0;
    if mel >= min_log_mel {
        min_log_hz * (logstep * (mel - min_log_mel)).exp()
    } else {
        f_sp * mel
    }
}

/// Slaney-normalized triangular filters, shaped `(N_MELS, freq_bins)`.
pub fn mel_filterbank() -> Array2<f32> {
    let freq_bins = N_FFT / 2 + 1;
    let mut filters = Array2::<f32>::zeros((N_MELS, freq_bins));

    let fft_freqs: Vec<f64> = (0..freq_bins)
        .map(|k| k as f64 * CLAP_SAMPLE_RATE as f64 / N_FFT as f64)
        .collect();
    let min_mel = hz_to_mel(FMIN);
    let max_mel = hz_to_mel(FMAX);
    let edges: Vec<f64> = (0..N_MELS + 2)
        .map(|i| mel_to_hz(min_mel + (max_mel - min_mel) * i as f64 / (N_MELS + 1) as f64))
        .collect();

    for m in 0..N_MELS {
        let (lower, center, upper) = (edges[m], edges[m + 1], edges[m + 2]);
        let norm = 2.0 / (upper - lower);
        for (k, &freq) in fft_freqs.iter().enumerate() {
            let rising = (freq - lower) / (center - lower);
            let falling = (upper - freq) / (upper - center);
            filters[[m, k]] = (rising.min(falling).max(0.0) * norm) as f32;
        }
    }

    filters
}

/// Model input of shape `[1, 1, frames, N_MELS]` in decibels.
pub fn log_mel_features(samples: &[f32], filters: &Array2<f32>) -> Array4<f32> {
    let clip = fit_to_clip(samples);
    let mel = filters.dot(&power_spectrogram(&clip));
    let frames = mel.shape()[1];

    let mut features = Array4::<f32>::zeros((1, 1, frames, N_MELS));
    for t in 0..frames {
        for m in 0..N_MELS {
            features[[0, 0, t, m]] = 10.0 * mel[[m, t]].max(AMIN).log10();
        }
    }
    features
}
