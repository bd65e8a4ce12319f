// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn report(name: &str, result: JobResult) -> JobReport {
        JobReport {
            name: name.to_string(),
            input_path: PathBuf::from(format!("/videos/{}", name)),
            result,
            elapsed: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_quality_crf_mapping_is_exact() {
        assert_eq!(QualityLevel::Low.crf(), 28);
        assert_eq!(QualityLevel::Medium.crf(), 23);
        assert_eq!(QualityLevel::High.crf(), 18);
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(QualityLevel::parse("low").unwrap(), QualityLevel::Low);
        assert_eq!(QualityLevel::parse("MEDIUM").unwrap(), QualityLevel::Medium);
        assert_eq!(QualityLevel::parse(" high ").unwrap(), QualityLevel::High);
        assert!(QualityLevel::parse("ultra").is_err());
    }

    #[test]
    fn test_method_parse() {
        let method = ConversionMethod::parse("crop", CropPosition::Left, 1080, 1920).unwrap();
        assert_eq!(
            method,
            ConversionMethod::Crop {
                position: CropPosition::Left
            }
        );

        let method = ConversionMethod::parse("Zoom", CropPosition::Center, 720, 1280).unwrap();
        assert_eq!(
            method,
            ConversionMethod::Zoom {
                width: 720,
                height: 1280
            }
        );

        assert_eq!(
            ConversionMethod::parse("letterbox", CropPosition::Center, 1, 1).unwrap(),
            ConversionMethod::Letterbox
        );
        assert!(ConversionMethod::parse("stretch", CropPosition::Center, 1, 1).is_err());
    }

    #[test]
    fn test_crop_position_parse() {
        assert_eq!(CropPosition::parse("center").unwrap(), CropPosition::Center);
        assert_eq!(CropPosition::parse("RIGHT").unwrap(), CropPosition::Right);
        assert!(CropPosition::parse("top").is_err());
    }

    #[test]
    fn test_descriptor_name_is_file_name() {
        let descriptor = VideoDescriptor::new("/tmp/clips/holiday.MOV", 2 * 1024 * 1024);
        assert_eq!(descriptor.name, "holiday.MOV");
        assert_eq!(descriptor.size_mb(), 2.0);
    }

    #[test]
    fn test_metadata_resolution_name() {
        let meta = VideoMetadata {
            width: 1920,
            height: 1080,
            fps: 30.0,
            duration: 12.0,
        };
        assert_eq!(meta.resolution_name(), "1080p");
        assert!((meta.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);

        let odd = VideoMetadata {
            width: 1000,
            height: 0,
            fps: 0.0,
            duration: 0.0,
        };
        assert_eq!(odd.resolution_name(), "Custom");
        assert_eq!(odd.aspect_ratio(), 0.0);
    }

    #[test]
    fn test_summary_accumulates_and_finalizes() {
        let mut summary = BatchSummary::new(3);
        summary.record(&report(
            "a.mp4",
            JobResult::Success {
                output_path: PathBuf::from("out/a_9x16.mp4"),
            },
        ));
        summary.record(&report(
            "b.mp4",
            JobResult::Skipped {
                existing_output_path: PathBuf::from("out/b_9x16.mp4"),
            },
        ));
        assert_eq!(summary.completed(), 2);
        assert!(summary.is_success());

        summary.record(&report(
            "c.mp4",
            JobResult::Failed {
                reason: "Input file is empty".to_string(),
                attempts: 1,
            },
        ));
        let summary = summary.finalize(Duration::from_secs(5), false);

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].name, "c.mp4");
        assert_eq!(summary.elapsed, Duration::from_secs(5));
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_interrupted_summary_fails() {
        let summary = BatchSummary::new(0).finalize(Duration::ZERO, true);
        assert!(!summary.is_success());
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_encode_request_fixed_codecs() {
        let geometry = OutputGeometry {
            width: 1920,
            height: 3414,
            placement: Placement::Pad {
                left: 0,
                top: 1167,
                bottom: 1167,
            },
            filter: "pad=1920:3414:0:1167:black".to_string(),
        };
        let request = EncodeRequest::new(
            std::path::Path::new("in.mp4"),
            std::path::Path::new("out.mp4"),
            &geometry,
            QualityLevel::Medium,
        );
        assert_eq!(request.crf, 23);
        assert_eq!(request.video_codec, "libx264");
        assert_eq!(request.audio_codec, "aac");
        assert_eq!(request.audio_bitrate, "192k");
        assert_eq!(request.sample_rate, 48_000);
        assert!(request.fast_start);
        assert_eq!(request.filter, geometry.filter);
    }

    #[test]
    fn test_job_result_serializes_with_status_tag() {
        let json = serde_json::to_value(JobResult::Failed {
            reason: "Invalid dimensions: 0x0".to_string(),
            attempts: 1,
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["attempts"], 1);
    }
}
