use sr_base::{Rect, Vec2};
use sr_video::{PipelineConfig, RenderMode, VideoError};

#[test]
fn test_config_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.crop(), None);
    assert_eq!(config.zoom_factor(), 4);
    assert_eq!(config.render_mode(), RenderMode::Grayscale);
    assert!(config.clip_output());
    assert!(!config.preview());
    assert_eq!(config.frame_limit(), None);
    assert_eq!(config.fps(), 60);
}

#[test]
fn test_config_builder() {
    let crop = Rect::new(Vec2::new(10, 20), Vec2::new(64, 64));
    let config = PipelineConfig::default()
        .with_crop(Some(crop))
        .with_zoom_factor(2)
        .with_render_mode(RenderMode::Mix)
        .with_clip_output(false)
        .with_preview(true)
        .with_frame_limit(Some(1))
        .with_fps(30);

    assert_eq!(config.crop(), Some(crop));
    assert_eq!(config.zoom_factor(), 2);
    assert_eq!(config.render_mode(), RenderMode::Mix);
    assert!(!config.clip_output());
    assert!(config.preview());
    assert_eq!(config.frame_limit(), Some(1));
    assert_eq!(config.fps(), 30);
}

#[test]
fn test_zoom_factor_never_zero() {
    assert_eq!(PipelineConfig::default().with_zoom_factor(0).zoom_factor(), 1);
}

#[test]
fn test_config_deserialize() {
    let json = r#"{
        "crop": { "x": 5, "y": 6, "width": 64, "height": 32 },
        "render_mode": "mix",
        "frame_limit": 1
    }"#;
    let config = PipelineConfig::from_json(json).unwrap();

    assert_eq!(
        config.crop(),
        Some(Rect::new(Vec2::new(5, 6), Vec2::new(64, 32)))
    );
    assert_eq!(config.render_mode(), RenderMode::Mix);
    assert_eq!(config.frame_limit(), Some(1));
    // unspecified fields keep their defaults
    assert_eq!(config.zoom_factor(), 4);
    assert!(config.clip_output());
}

#[test]
fn test_config_rejects_zero_zoom() {
    let result = PipelineConfig::from_json(r#"{ "zoom_factor": 0 }"#);
    assert!(matches!(result, Err(VideoError::Config(_))));
}

#[test]
fn test_config_rejects_empty_crop() {
    let json = r#"{ "crop": { "x": 0, "y": 0, "width": 0, "height": 4 } }"#;
    assert!(matches!(
        PipelineConfig::from_json(json),
        Err(VideoError::Config(_))
    ));
}

#[test]
fn test_config_rejects_unknown_mode() {
    assert!(PipelineConfig::from_json(r#"{ "render_mode": "sepia" }"#).is_err());
}

#[test]
fn test_config_rejects_out_of_range_fps() {
    for json in [r#"{ "fps": 0 }"#, r#"{ "fps": 2000000000 }"#] {
        assert!(
            matches!(PipelineConfig::from_json(json), Err(VideoError::Config(_))),
            "{json} accepted"
        );
    }
    let config = PipelineConfig::from_json(&format!(r#"{{ "fps": {} }}"#, sr_video::MAX_FPS)).unwrap();
    assert_eq!(config.fps(), sr_video::MAX_FPS);
}

#[test]
fn test_partial_config_keeps_caller_defaults() {
    let crop = Rect::new(Vec2::new(12, 34), Vec2::new(64, 64));
    let base = PipelineConfig::default()
        .with_crop(Some(crop))
        .with_zoom_factor(4)
        .with_render_mode(RenderMode::Mix)
        .with_preview(true);

    let config = base.apply_json(r#"{ "fps": 30 }"#).unwrap();

    assert_eq!(config.fps(), 30);
    assert_eq!(config.crop(), Some(crop));
    assert_eq!(config.zoom_factor(), 4);
    assert_eq!(config.render_mode(), RenderMode::Mix);
    assert!(config.preview());
}

#[test]
fn test_config_overrides_present_fields() {
    let base = PipelineConfig::default()
        .with_render_mode(RenderMode::Mix)
        .with_frame_limit(Some(1));
    let json = r#"{
        "crop": { "x": 1, "y": 2, "width": 8, "height": 8 },
        "render_mode": "grayscale",
        "frame_limit": 9
    }"#;

    let config = base.apply_json(json).unwrap();

    assert_eq!(
        config.crop(),
        Some(Rect::new(Vec2::new(1, 2), Vec2::new(8, 8)))
    );
    assert_eq!(config.render_mode(), RenderMode::Grayscale);
    assert_eq!(config.frame_limit(), Some(9));
}

#[test]
fn test_invalid_patch_is_rejected_against_base() {
    let base = PipelineConfig::default().with_fps(30);
    assert!(matches!(
        base.apply_json(r#"{ "zoom_factor": 0 }"#),
        Err(VideoError::Config(_))
    ));
}
