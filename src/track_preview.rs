//! Track Previews
//!
//! Widgets with the track layer enabled render a course outline instead
//! of a texture. The outlines live here as normalized polylines (0..1 in
//! both axes), scaled into the widget's rect by the draw pass.

/// One selectable course: display name plus its outline.
pub struct TrackPreview {
    pub name: &'static str,
    /// Closed polyline, normalized to the unit square.
    pub outline: &'static [(f32, f32)],
}

/// The built-in courses, indexed by the widgets' track numbers.
pub struct TrackPreviewRegistry {
    tracks: Vec<TrackPreview>,
}

impl TrackPreviewRegistry {
    pub fn builtin() -> Self {
        TrackPreviewRegistry {
            tracks: vec![
                TrackPreview {
                    name: "OVAL RUN",
                    outline: &[
                        (0.2, 0.1),
                        (0.8, 0.1),
                        (0.95, 0.5),
                        (0.8, 0.9),
                        (0.2, 0.9),
                        (0.05, 0.5),
                        (0.2, 0.1),
                    ],
                },
                TrackPreview {
                    name: "HAIRPIN VALLEY",
                    outline: &[
                        (0.1, 0.1),
                        (0.9, 0.1),
                        (0.9, 0.45),
                        (0.3, 0.45),
                        (0.3, 0.65),
                        (0.9, 0.65),
                        (0.9, 0.9),
                        (0.1, 0.9),
                        (0.1, 0.1),
                    ],
                },
                TrackPreview {
                    name: "FIGURE EIGHT",
                    outline: &[
                        (0.5, 0.5),
                        (0.9, 0.75),
                        (0.75, 0.95),
                        (0.25, 0.95),
                        (0.1, 0.75),
                        (0.5, 0.5),
                        (0.9, 0.25),
                        (0.75, 0.05),
                        (0.25, 0.05),
                        (0.1, 0.25),
                        (0.5, 0.5),
                    ],
                },
            ],
        }
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&TrackPreview> {
        self.tracks.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_outlines_are_normalized_and_closed() {
        let reg = TrackPreviewRegistry::builtin();
        assert!(reg.count() >= 3);
        for i in 0..reg.count() {
            let track = reg.get(i).unwrap();
            assert!(track.outline.len() >= 4);
            assert_eq!(track.outline.first(), track.outline.last());
            for &(x, y) in track.outline {
                assert!((0.0..=1.0).contains(&x));
                assert!((0.0..=1.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_out_of_range_index_is_none() {
        let reg = TrackPreviewRegistry::builtin();
        assert!(reg.get(99).is_none());
    }
}
