use rand::seq::SliceRandom;

use crate::config::TrackCount;
use crate::library::{Playlist, Track};

/// Random playlist of `count` tracks out of `tracks`.
///
/// A finite count larger than the directory is clamped to what is there;
/// `ALL` returns every track. Order is random in both cases.
pub fn pick_tracks(mut tracks: Vec<Track>, count: TrackCount) -> Playlist {
    tracks.shuffle(&mut rand::rng());
    if let TrackCount::Limit(n) = count {
        tracks.truncate(n);
    }
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    fn tracks(k: usize) -> Vec<Track> {
        let root = Path::new("/srv/music");
        (0..k)
            .map(|i| Track::new(root.join(format!("collection/{i:03}.mp3")), root))
            .collect()
    }

    #[test]
    fn finite_count_returns_min_of_n_and_k_distinct_tracks() {
        for k in [0usize, 1, 3, 10, 60, 150] {
            for n in [10usize, 50, 100] {
                let input = tracks(k);
                let all: HashSet<_> = input.iter().map(|t| t.path.clone()).collect();

                let got = pick_tracks(input, TrackCount::Limit(n));
                let distinct: HashSet<_> = got.iter().map(|t| t.path.clone()).collect();

                assert_eq!(got.len(), n.min(k), "n={n} k={k}");
                assert_eq!(distinct.len(), got.len());
                assert!(distinct.is_subset(&all));
            }
        }
    }

    #[test]
    fn all_returns_every_track() {
        let input = tracks(42);
        let expected: HashSet<_> = input.iter().map(|t| t.path.clone()).collect();

        let got = pick_tracks(input, TrackCount::All);
        let got: HashSet<_> = got.iter().map(|t| t.path.clone()).collect();
        assert_eq!(got, expected);
    }
}
