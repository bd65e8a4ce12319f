// Unit tests for business rules

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::domain::rules::*;
    use std::path::Path;
    use std::time::Duration;

    fn letterbox(w: u32, h: u32) -> OutputGeometry {
        GeometryCalculator::compute(ConversionMethod::Letterbox, w, h).unwrap()
    }

    fn crop(w: u32, h: u32, position: CropPosition) -> OutputGeometry {
        GeometryCalculator::compute(ConversionMethod::Crop { position }, w, h).unwrap()
    }

    #[test]
    fn test_letterbox_1080p() {
        let geometry = letterbox(1920, 1080);
        assert_eq!(geometry.width, 1920);
        assert_eq!(geometry.height, 3414);
        assert_eq!(
            geometry.placement,
            Placement::Pad {
                left: 0,
                top: 1167,
                bottom: 1167
            }
        );
        assert_eq!(geometry.filter, "pad=1920:3414:0:1167:black");
    }

    #[test]
    fn test_letterbox_720p_uneven_padding() {
        let geometry = letterbox(1280, 720);
        // 1280 * 16 / 9 = 2275.6 -> 2276
        assert_eq!(geometry.height, 2276);
        match geometry.placement {
            Placement::Pad { top, bottom, .. } => {
                assert_eq!(top, 778);
                assert_eq!(bottom, 778);
                assert_eq!(top + bottom + 720, 2276);
            }
            other => panic!("unexpected placement {:?}", other),
        }
    }

    #[test]
    fn test_letterbox_height_is_even_and_covers_target() {
        for w in (2..4000u32).step_by(2) {
            for h in [1u32, 9, 360, 719, 1080] {
                let geometry = letterbox(w, h);
                let exact = w as f64 * 16.0 / 9.0;
                assert_eq!(geometry.width, w);
                assert_eq!(geometry.height % 2, 0, "w={}", w);
                assert!(geometry.height as f64 >= exact.round(), "w={}", w);
                assert!(geometry.height >= h);
            }
        }
    }

    #[test]
    fn test_letterbox_tall_source_never_negative_padding() {
        let geometry = letterbox(100, 1000);
        assert_eq!(geometry.height, 1000);
        assert_eq!(
            geometry.placement,
            Placement::Pad {
                left: 0,
                top: 0,
                bottom: 0
            }
        );
    }

    #[test]
    fn test_crop_center_1080p() {
        let geometry = crop(1920, 1080, CropPosition::Center);
        // 1080 * 9 / 16 = 607.5 -> 606
        assert_eq!(geometry.width, 606);
        assert_eq!(geometry.height, 1080);
        assert_eq!(geometry.placement, Placement::Crop { x: 657, y: 0 });
        assert_eq!(geometry.filter, "crop=606:1080:657:0");
    }

    #[test]
    fn test_crop_positions() {
        assert_eq!(
            crop(1920, 1080, CropPosition::Left).placement,
            Placement::Crop { x: 0, y: 0 }
        );
        assert_eq!(
            crop(1920, 1080, CropPosition::Right).placement,
            Placement::Crop { x: 1314, y: 0 }
        );
    }

    #[test]
    fn test_crop_width_even_and_bounded() {
        for h in (16..2200u32).step_by(2) {
            let w = h * 2;
            let geometry = crop(w, h, CropPosition::Center);
            let exact = h as f64 * 9.0 / 16.0;
            assert_eq!(geometry.width % 2, 0, "h={}", h);
            assert!(geometry.width as f64 <= exact.round(), "h={}", h);
            assert_eq!(geometry.height, h);
            assert_eq!(
                geometry.placement,
                Placement::Crop {
                    x: (w - geometry.width) / 2,
                    y: 0
                }
            );
        }
    }

    #[test]
    fn test_crop_narrow_source_rejected() {
        let err = GeometryCalculator::compute(
            ConversionMethod::Crop {
                position: CropPosition::Center,
            },
            100,
            1000,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidDimensions {
                width: 100,
                height: 1000
            }
        );
    }

    #[test]
    fn test_zoom_1080p_to_portrait() {
        let geometry = GeometryCalculator::compute(
            ConversionMethod::Zoom {
                width: 1080,
                height: 1920,
            },
            1920,
            1080,
        )
        .unwrap();
        assert_eq!((geometry.width, geometry.height), (1080, 1920));
        assert_eq!(
            geometry.placement,
            Placement::ScaleCrop {
                scaled_width: 3414,
                scaled_height: 1920,
                x: 1167,
                y: 0
            }
        );
        assert_eq!(geometry.filter, "scale=3414:1920,crop=1080:1920:1167:0");
    }

    #[test]
    fn test_zoom_portrait_source_scales_by_width() {
        let geometry = GeometryCalculator::compute(
            ConversionMethod::Zoom {
                width: 1080,
                height: 1920,
            },
            540,
            1200,
        )
        .unwrap();
        match geometry.placement {
            Placement::ScaleCrop {
                scaled_width,
                scaled_height,
                x,
                y,
            } => {
                assert_eq!(scaled_width, 1080);
                assert_eq!(scaled_height, 2400);
                assert_eq!(x, 0);
                assert_eq!(y, 240);
            }
            other => panic!("unexpected placement {:?}", other),
        }
    }

    #[test]
    fn test_zoom_odd_target_rejected() {
        let result = GeometryCalculator::compute(
            ConversionMethod::Zoom {
                width: 1081,
                height: 1920,
            },
            1920,
            1080,
        );
        assert!(matches!(result, Err(DomainError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        for method in [
            ConversionMethod::Letterbox,
            ConversionMethod::Crop {
                position: CropPosition::Center,
            },
            ConversionMethod::Zoom {
                width: 1080,
                height: 1920,
            },
        ] {
            assert!(GeometryCalculator::compute(method, 0, 1080).is_err());
            assert!(GeometryCalculator::compute(method, 1920, 0).is_err());
        }
    }

    #[test]
    fn test_sanitize_replaces_disallowed() {
        assert_eq!(
            FilenameSanitizer::sanitize("a|b/c\\d:e*f?g\"h<i>j\u{FF5C}k.mp4"),
            "a-b-c-d-e-f-g-h-i-j-k"
        );
        assert_eq!(FilenameSanitizer::sanitize("nul\0byte.mov"), "nul-byte");
    }

    #[test]
    fn test_sanitize_keeps_unicode_and_inner_dots() {
        assert_eq!(
            FilenameSanitizer::sanitize("⚡ Epic Timer v1.2.mp4"),
            "⚡ Epic Timer v1.2"
        );
        assert_eq!(FilenameSanitizer::sanitize(".hidden"), ".hidden");
        assert_eq!(FilenameSanitizer::sanitize("noext"), "noext");
        assert_eq!(FilenameSanitizer::sanitize(""), "");
    }

    #[test]
    fn test_sanitize_stem_idempotent() {
        let inputs = ["clip: part 1?", "a|b｜c", "plain", "", "<<>>"];
        for input in inputs {
            let once = FilenameSanitizer::sanitize_stem(input);
            assert_eq!(FilenameSanitizer::sanitize_stem(&once), once);
            assert!(!once.chars().any(|c| FilenameSanitizer::DISALLOWED.contains(&c)));
        }
    }

    #[test]
    fn test_qualified_stem_depends_only_on_the_input() {
        assert_eq!(FilenameSanitizer::qualified_stem(Path::new("clip.mp4")), "clip_mp4");
        assert_eq!(FilenameSanitizer::qualified_stem(Path::new("clip.MKV")), "clip_mkv");
        assert_eq!(
            FilenameSanitizer::qualified_stem(Path::new("trips/day 1/clip.mov")),
            "trips-day 1-clip_mov"
        );
        assert_eq!(FilenameSanitizer::qualified_stem(Path::new("noext")), "noext");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            FilenameSanitizer::output_file_name_for("My:Clip.MOV", 1),
            "My-Clip_9x16.mp4"
        );
        assert_eq!(
            FilenameSanitizer::output_file_name_for("My:Clip.MOV", 2),
            "My-Clip_2_9x16.mp4"
        );
    }

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(
            policy.backoff(&DomainError::ProbeFail("x".into())),
            Duration::from_secs(1)
        );
        assert_eq!(
            policy.backoff(&DomainError::EncoderFailed { exit_code: Some(1) }),
            Duration::from_secs(2)
        );
        assert_eq!(
            policy.backoff(&DomainError::Timeout(Duration::from_secs(600))),
            Duration::ZERO
        );
    }

    #[test]
    fn test_retry_policy_predicate() {
        let policy = RetryPolicy::default();
        let transient = DomainError::EncoderFailed { exit_code: Some(1) };
        assert!(policy.should_retry(&transient, 1));
        assert!(!policy.should_retry(&transient, 2));

        for fatal in [
            DomainError::FileNotFound("x".into()),
            DomainError::EmptyInput("x".into()),
            DomainError::InvalidDimensions {
                width: 0,
                height: 0,
            },
            DomainError::Cancelled,
        ] {
            assert!(!policy.should_retry(&fatal, 1));
            assert_eq!(RetryPolicy::classify(&fatal), FailureClass::Fatal);
        }
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            DomainError::Timeout(Duration::from_secs(600)).to_string(),
            "Conversion timeout (>10 minutes)"
        );
        assert_eq!(
            DomainError::EncoderFailed { exit_code: Some(1) }.to_string(),
            "FFmpeg process failed (exit code: 1)"
        );
        assert_eq!(
            DomainError::EmptyInput("a.mp4".into()).to_string(),
            "Input file is empty"
        );
        assert_eq!(
            DomainError::FileNotFound("a.mp4".into()).to_string(),
            "Input file not found"
        );
    }
}
