//! Property-based tests for mediasniff-core
//!
//! Random buffers and corrupted samples must never panic, truncated samples
//! must never turn into a different format, and classification must be a
//! pure function of the bytes.

mod common;

use mediasniff_core::{determine_container, determine_container_with_trace, MediaContainerName};
use proptest::prelude::*;

proptest! {
    /// Property: arbitrary bytes never panic and always classify the same way
    #[test]
    fn prop_random_buffers_are_deterministic(buf in prop::collection::vec(any::<u8>(), 0..4096)) {
        let first = determine_container_with_trace(&buf);
        prop_assert_eq!(determine_container_with_trace(&buf), first);
        prop_assert_eq!(determine_container(&buf), first.container);
    }

    /// Property: buffers shorter than the minimum are always unknown
    #[test]
    fn prop_short_buffers_are_unknown(buf in prop::collection::vec(any::<u8>(), 0..12)) {
        prop_assert_eq!(determine_container(&buf), MediaContainerName::Unknown);
    }

    /// Property: a truncated sample is either unknown or still its own format
    #[test]
    fn prop_truncated_samples(index in any::<prop::sample::Index>(), cut in any::<prop::sample::Index>()) {
        let samples = common::samples();
        let sample = &samples[index.index(samples.len())];
        let truncated = &sample.bytes[..cut.index(sample.bytes.len() + 1)];
        let got = determine_container(truncated);
        prop_assert!(
            got == MediaContainerName::Unknown || got == sample.container,
            "{} cut to {} bytes classified as {}",
            sample.name,
            truncated.len(),
            got.name()
        );
        prop_assert_eq!(determine_container(truncated), got);
    }

    /// Property: flipping bytes inside a sample never panics
    #[test]
    fn prop_corrupted_samples(
        index in any::<prop::sample::Index>(),
        flips in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..8),
    ) {
        let samples = common::samples();
        let mut sample = samples[index.index(samples.len())].bytes.clone();
        for (position, value) in flips {
            let i = position.index(sample.len());
            sample[i] = value;
        }
        let _ = determine_container_with_trace(&sample);
    }

    /// Property: trailing data does not change a confident MP3 match
    #[test]
    fn prop_mp3_survives_trailing_garbage(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = common::mp3(12);
        buf.extend(tail);
        prop_assert_eq!(determine_container(&buf), MediaContainerName::Mp3);
    }
}
