//! Video and audio stream selection.
//!
//! Video selection walks the available resolutions from the quality ceiling
//! downwards and takes the first resolution that has any stream. Resolution
//! is the shorter frame side, so portrait renditions rank like their
//! landscape counterparts. Within that resolution VP9 streams are preferred, then the highest frame rate wins; ties
//! go to the higher bitrate and finally to the lexicographically smaller
//! format ID so the result never depends on extractor ordering. When no
//! stream fits under the ceiling the highest resolution available is used.

use std::cmp::Ordering;

use crate::error::{Error, Result, StreamKind};
use crate::stream::candidate::{MediaInfo, StreamCandidate};

/// Codec preferred when several streams share a height.
pub const PREFERRED_VIDEO_CODEC: &str = "vp9";

/// Check whether a codec string denotes the preferred codec.
///
/// Extractors report VP9 either as `vp9` or in RFC 6381 form (`vp09.00.40.08`).
pub fn is_preferred_codec(codec: &str) -> bool {
    let codec = codec.to_lowercase();
    codec.contains(PREFERRED_VIDEO_CODEC) || codec.starts_with("vp09")
}

/// Distinct video resolutions at or below `ceiling`, highest first.
pub fn resolution_ladder(streams: &[StreamCandidate], ceiling: u32) -> Vec<u32> {
    let mut rungs: Vec<u32> = streams
        .iter()
        .filter(|s| s.has_video())
        .filter_map(|s| s.resolution())
        .filter(|r| *r <= ceiling)
        .collect();

    rungs.sort_unstable_by(|a, b| b.cmp(a));
    rungs.dedup();
    rungs
}

/// Pick the best video stream not exceeding `ceiling`.
///
/// Falls back to the highest resolution available when nothing fits.
/// Returns `None` only if there is no video stream at all.
pub fn select_video(streams: &[StreamCandidate], ceiling: u32) -> Option<&StreamCandidate> {
    for rung in resolution_ladder(streams, ceiling) {
        let at_rung: Vec<&StreamCandidate> = streams
            .iter()
            .filter(|s| s.has_video() && s.resolution() == Some(rung))
            .collect();

        if at_rung.is_empty() {
            continue;
        }

        let preferred: Vec<&StreamCandidate> = at_rung
            .iter()
            .copied()
            .filter(|s| s.video_codec.as_deref().is_some_and(is_preferred_codec))
            .collect();

        let pool = if preferred.is_empty() {
            at_rung
        } else {
            preferred
        };

        return pool.into_iter().max_by(|a, b| compare_video(a, b));
    }

    highest_resolution(streams)
}

/// Highest resolution video stream regardless of any ceiling.
pub fn highest_resolution(streams: &[StreamCandidate]) -> Option<&StreamCandidate> {
    streams.iter().filter(|s| s.has_video()).max_by(|a, b| {
        a.resolution()
            .unwrap_or(0)
            .cmp(&b.resolution().unwrap_or(0))
            .then_with(|| compare_video(a, b))
    })
}

/// Pick the audio-only stream with the highest bitrate.
pub fn select_audio(streams: &[StreamCandidate]) -> Option<&StreamCandidate> {
    streams.iter().filter(|s| s.is_audio_only()).max_by(|a, b| {
        a.effective_audio_bitrate()
            .total_cmp(&b.effective_audio_bitrate())
            .then_with(|| b.id.cmp(&a.id))
    })
}

/// Ranking among streams of equal height: fps, then bitrate, then smaller ID.
fn compare_video(a: &StreamCandidate, b: &StreamCandidate) -> Ordering {
    a.fps
        .unwrap_or(0.0)
        .total_cmp(&b.fps.unwrap_or(0.0))
        .then_with(|| {
            a.bitrate_kbps
                .unwrap_or(0.0)
                .total_cmp(&b.bitrate_kbps.unwrap_or(0.0))
        })
        .then_with(|| b.id.cmp(&a.id))
}

impl MediaInfo {
    /// Best video stream for this item under the given ceiling.
    pub fn select_video(&self, ceiling: u32) -> Result<&StreamCandidate> {
        select_video(&self.streams, ceiling).ok_or_else(|| Error::NoStream {
            url: self.url.clone(),
            kind: StreamKind::Video,
        })
    }

    /// Best audio-only stream for this item.
    pub fn select_audio(&self) -> Result<&StreamCandidate> {
        select_audio(&self.streams).ok_or_else(|| Error::NoStream {
            url: self.url.clone(),
            kind: StreamKind::Audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, height: u32, fps: f64, codec: &str) -> StreamCandidate {
        StreamCandidate {
            id: id.to_string(),
            height: Some(height),
            fps: Some(fps),
            video_codec: Some(codec.to_string()),
            container: "webm".to_string(),
            ..Default::default()
        }
    }

    fn audio(id: &str, abr: f64) -> StreamCandidate {
        StreamCandidate {
            id: id.to_string(),
            audio_codec: Some("opus".to_string()),
            audio_bitrate_kbps: Some(abr),
            container: "webm".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_never_exceeds_ceiling() {
        let streams = vec![
            video("401", 2160, 30.0, "av01"),
            video("137", 1080, 30.0, "avc1"),
            video("136", 720, 30.0, "avc1"),
        ];
        let chosen = select_video(&streams, 1080).unwrap();
        assert_eq!(chosen.id, "137");
    }

    #[test]
    fn test_falls_back_to_highest_available() {
        let streams = vec![
            video("136", 720, 30.0, "avc1"),
            video("137", 1080, 30.0, "avc1"),
        ];
        let chosen = select_video(&streams, 240).unwrap();
        assert_eq!(chosen.height, Some(1080));
    }

    #[test]
    fn test_steps_down_to_next_height() {
        let streams = vec![video("136", 720, 30.0, "avc1"), video("135", 480, 30.0, "avc1")];
        assert_eq!(select_video(&streams, 1080).unwrap().id, "136");
    }

    #[test]
    fn test_off_ladder_height_is_still_under_ceiling() {
        let streams = vec![video("a", 2160, 30.0, "vp9"), video("b", 1012, 30.0, "avc1")];
        assert_eq!(select_video(&streams, 1080).unwrap().id, "b");
    }

    #[test]
    fn test_prefers_vp9_over_higher_fps() {
        let streams = vec![
            video("299", 1080, 60.0, "avc1.64002a"),
            video("248", 1080, 30.0, "vp9"),
        ];
        assert_eq!(select_video(&streams, 1080).unwrap().id, "248");

        let rfc_form = vec![
            video("299", 1080, 60.0, "avc1.64002a"),
            video("248", 1080, 30.0, "vp09.00.40.08"),
        ];
        assert_eq!(select_video(&rfc_form, 1080).unwrap().id, "248");
    }

    #[test]
    fn test_highest_fps_within_codec() {
        let streams = vec![
            video("248", 1080, 30.0, "vp9"),
            video("303", 1080, 60.0, "vp9"),
            video("299", 1080, 60.0, "avc1"),
        ];
        assert_eq!(select_video(&streams, 1080).unwrap().id, "303");
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let mut low = video("b", 720, 30.0, "vp9");
        low.bitrate_kbps = Some(1000.0);
        let mut high = video("c", 720, 30.0, "vp9");
        high.bitrate_kbps = Some(2000.0);
        let streams = vec![high.clone(), low.clone()];
        assert_eq!(select_video(&streams, 720).unwrap().id, "c");

        let first = video("z", 720, 30.0, "vp9");
        let second = video("a", 720, 30.0, "vp9");
        let forward = vec![first.clone(), second.clone()];
        let backward = vec![second, first];
        assert_eq!(select_video(&forward, 720).unwrap().id, "a");
        assert_eq!(select_video(&backward, 720).unwrap().id, "a");
    }

    #[test]
    fn test_audio_streams_are_not_video() {
        let streams = vec![audio("251", 160.0)];
        assert!(select_video(&streams, 1080).is_none());
    }

    #[test]
    fn test_select_audio_highest_bitrate() {
        let streams = vec![
            audio("249", 50.0),
            audio("251", 160.0),
            audio("140", 129.0),
            video("137", 1080, 30.0, "avc1"),
        ];
        assert_eq!(select_audio(&streams).unwrap().id, "251");
    }

    #[test]
    fn test_select_audio_ignores_muxed() {
        let mut muxed = video("18", 360, 30.0, "avc1");
        muxed.audio_codec = Some("mp4a.40.2".to_string());
        muxed.audio_bitrate_kbps = Some(320.0);
        let streams = vec![muxed, audio("140", 129.0)];
        assert_eq!(select_audio(&streams).unwrap().id, "140");
    }

    #[test]
    fn test_media_info_errors_when_empty() {
        let info = MediaInfo {
            url: "https://example.com/watch?v=x".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            info.select_video(1080),
            Err(Error::NoStream { kind: StreamKind::Video, .. })
        ));
        assert!(matches!(
            info.select_audio(),
            Err(Error::NoStream { kind: StreamKind::Audio, .. })
        ));
    }

    fn portrait(id: &str, height: u32) -> StreamCandidate {
        StreamCandidate {
            width: Some(height * 9 / 16),
            ..video(id, height, 30.0, "vp9")
        }
    }

    #[test]
    fn test_portrait_uses_shorter_side() {
        let streams = vec![
            portrait("1080p", 1920),
            portrait("720p", 1280),
            portrait("480p", 854),
        ];
        assert_eq!(select_video(&streams, 1080).unwrap().id, "1080p");
        assert_eq!(select_video(&streams, 720).unwrap().id, "720p");
        assert_eq!(resolution_ladder(&streams, 1080), vec![1080, 720, 480]);
    }

    #[test]
    fn test_resolution_ladder() {
        let streams = vec![
            video("a", 2160, 30.0, "vp9"),
            video("b", 720, 30.0, "vp9"),
            video("c", 1080, 30.0, "vp9"),
            video("d", 720, 60.0, "vp9"),
            audio("e", 128.0),
        ];
        assert_eq!(resolution_ladder(&streams, 1080), vec![1080, 720]);
        assert!(resolution_ladder(&streams, 144).is_empty());
    }
}
