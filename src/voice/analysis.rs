use crate::voice::VoiceSample;

/// Collapses a frequency-magnitude frame into the two control scalars.
///
/// Volume is the RMS of the magnitudes over 128, so ordinary speech lands
/// above 1.0. Sharpness is the magnitude-weighted mean bin index divided by
/// the bin count; an empty or silent frame has sharpness 0.
pub fn analyze(spectrum: &[u8]) -> VoiceSample {
    if spectrum.is_empty() {
        return VoiceSample { volume: 0.0, sharpness: 0.0 };
    }

    let bins = spectrum.len() as f32;

    let sum_squares: f32 = spectrum.iter().map(|&m| m as f32 * m as f32).sum();
    let rms = (sum_squares / bins).sqrt();
    let volume = rms / 128.0;

    let mut weighted_sum = 0.0;
    let mut magnitude_sum = 0.0;
    for (index, &magnitude) in spectrum.iter().enumerate() {
        weighted_sum += magnitude as f32 * index as f32;
        magnitude_sum += magnitude as f32;
    }
    let centroid = if magnitude_sum > 0.0 { weighted_sum / magnitude_sum } else { 0.0 };

    VoiceSample { volume, sharpness: centroid / bins }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_has_no_volume_and_no_sharpness() {
        let sample = analyze(&[0; 1024]);
        assert_eq!(sample.volume, 0.0);
        assert_eq!(sample.sharpness, 0.0);
    }

    #[test]
    fn empty_frame_is_silence() {
        let sample = analyze(&[]);
        assert_eq!(sample.volume, 0.0);
        assert_eq!(sample.sharpness, 0.0);
    }

    #[test]
    fn uniform_half_scale_is_unit_volume() {
        let sample = analyze(&[128; 512]);
        assert!((sample.volume - 1.0).abs() < 1e-5);
    }

    #[test]
    fn saturated_frame_exceeds_unit_volume() {
        // A hard clap pushes the spectrum toward 255 everywhere.
        let sample = analyze(&[255; 512]);
        assert!(sample.volume > 1.5);
    }

    #[test]
    fn single_bin_sets_the_centroid() {
        let mut spectrum = [0u8; 100];
        spectrum[80] = 200;
        let sample = analyze(&spectrum);
        assert!((sample.sharpness - 0.8).abs() < 1e-5);
    }

    #[test]
    fn sharpness_stays_normalized() {
        let mut spectrum = [0u8; 64];
        spectrum[63] = 255;
        let sample = analyze(&spectrum);
        assert!(sample.sharpness > 0.0 && sample.sharpness < 1.0);
    }
}
