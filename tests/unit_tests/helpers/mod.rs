use std::f32::consts::PI;
use std::path::{Path, PathBuf};

pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

pub fn sine(sample_rate: u32, frequency: f32, seconds: f32) -> Vec<i16> {
    let count = (sample_rate as f32 * seconds) as usize;
    (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((2.0 * PI * frequency * t).sin() * 0.5 * i16::MAX as f32) as i16
        })
        .collect()
}

pub fn write_wav(dir: &Path, name: &str, sample_rate: u32, samples: &[i16]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_wav(sample_rate, samples)).unwrap();
    path
}

pub fn write_tone(dir: &Path, name: &str) -> PathBuf {
    write_wav(dir, name, 16_000, &sine(16_000, 440.0, 0.25))
}
