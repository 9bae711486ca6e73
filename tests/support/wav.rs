use std::path::Path;

pub fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create wav parent dirs");
    }
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav writer");
    for &sample in samples {
        writer.write_sample(sample).expect("write wav sample");
    }
    writer.finalize().expect("finalize wav");
}

pub fn write_float_wav(path: &Path, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav writer");
    for &sample in samples {
        writer.write_sample(sample).expect("write wav sample");
    }
    writer.finalize().expect("finalize wav");
}

/// A slow RF capture: `periods` HIGH/LOW cycles with jitter riding on each level.
pub fn rf_capture(periods: usize, samples_per_half: usize) -> Vec<i16> {
    let mut samples = Vec::with_capacity(periods * samples_per_half * 2);
    for period in 0..periods {
        for half in 0..2 {
            let level: i32 = if half == 0 { 9_000 } else { -7_500 };
            for i in 0..samples_per_half {
                let jitter = ((period * 31 + half * 17 + i * 7) % 23) as i32 * 40 - 440;
                samples.push((level + jitter) as i16);
            }
        }
    }
    samples
}
