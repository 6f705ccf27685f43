//! Gap filling for runs of untrusted samples.
//!
//! Untrusted frames between two trusted anchors are placed on the straight
//! line joining them, spaced by frame index. Runs at either end of the
//! recording take the position of the nearest trusted frame.

use trip_core::Sample;

/// Outcome of repairing one keypoint's samples
#[derive(Debug, Clone, PartialEq)]
pub enum Repair {
    /// Every untrusted frame was filled; `repaired` counts them
    Filled { samples: Vec<Sample>, repaired: usize },
    /// No frame was trusted, so there is nothing to anchor on
    NoValidSamples,
}

/// Replace the position of every untrusted sample.
///
/// Confidence values are carried over unchanged so the repaired frames stay
/// recognisable downstream. An empty recording has nothing to repair and is
/// returned as an empty fill.
pub fn repair_samples(samples: &[Sample], confidence_threshold: f64) -> Repair {
    if samples.is_empty() {
        return Repair::Filled {
            samples: Vec::new(),
            repaired: 0,
        };
    }

    let anchors: Vec<usize> = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_valid(confidence_threshold))
        .map(|(i, _)| i)
        .collect();

    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Repair::NoValidSamples,
    };

    let mut repaired = samples.to_vec();

    // Leading run: hold the first trusted position
    let head = samples[first].position();
    for sample in &mut repaired[..first] {
        *sample = sample.with_position(head);
    }

    // Trailing run: hold the last trusted position
    let tail = samples[last].position();
    for sample in &mut repaired[last + 1..] {
        *sample = sample.with_position(tail);
    }

    // Interior runs
    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < 2 {
            continue;
        }
        let start = samples[a].position();
        let end = samples[b].position();
        let span = (b - a) as f64;
        for i in a + 1..b {
            let t = (i - a) as f64 / span;
            repaired[i] = repaired[i].with_position(start.lerp(&end, t));
        }
    }

    Repair::Filled {
        samples: repaired,
        repaired: samples.len() - anchors.len(),
    }
}
