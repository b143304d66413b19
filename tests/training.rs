mod common;

use common::init_logging;
use common::synthetic_image::{disk_patch, embed, flat_frame, noise_frame, BACKGROUND};
use shape_matcher::image::ImageU8;
use shape_matcher::pyramid::{ScalePyramid, ScalePyramidOptions};
use shape_matcher::{MatchParams, Matcher, Rect, ShapeMatchError, TemplateBuilder, TemplateParams};

#[test]
fn features_are_scattered_and_inside_footprint() {
    init_logging();
    let patch = disk_patch(64, 20.0);
    let template = TemplateBuilder::new(TemplateParams::default().with_num_features(24))
        .build("disk", &ImageU8::gray(64, 64, &patch), None)
        .expect("disk patch has enough edge features");

    let features = template.features();
    assert_eq!(features.len(), 24);
    for (i, a) in features.iter().enumerate() {
        assert!(a.x < 64 && a.y < 64 && a.label < 8);
        for b in &features[i + 1..] {
            assert!(
                (a.x, a.y) != (b.x, b.y),
                "duplicate feature position ({}, {})",
                a.x,
                a.y
            );
        }
    }
}

#[test]
fn noise_patch_lacks_strong_features() {
    init_logging();
    let patch = noise_frame(48, 48, 6, 11);
    let res = TemplateBuilder::new(TemplateParams::default())
        .build("noise", &ImageU8::gray(48, 48, &patch), None);
    assert!(matches!(res, Err(ShapeMatchError::InsufficientFeatures { .. })));
}

#[test]
fn invalid_training_inputs_are_rejected() {
    init_logging();
    let patch = disk_patch(32, 10.0);
    let view = ImageU8::gray(32, 32, &patch);
    let zero = TemplateBuilder::new(TemplateParams::default().with_num_features(0));
    assert!(matches!(
        zero.build("x", &view, None),
        Err(ShapeMatchError::InvalidInput { .. })
    ));
    let builder = TemplateBuilder::new(TemplateParams::default());
    assert!(matches!(
        builder.build("x", &view, Some(Rect::new(20, 20, 20, 20))),
        Err(ShapeMatchError::InvalidInput { .. })
    ));
}

#[test]
fn pyramid_templates_record_their_scale() {
    init_logging();
    let patch = disk_patch(64, 20.0);
    let options = ScalePyramidOptions::new(vec![1.0, 0.75, 0.4]);
    let pyramid =
        ScalePyramid::build(&ImageU8::gray(64, 64, &patch), &options).expect("valid exemplar");
    let builder = TemplateBuilder::new(TemplateParams::default());
    let templates: Vec<_> = builder
        .build_pyramid("disk", &pyramid, None)
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("every level trains");

    assert_eq!(templates.len(), 3);
    assert_eq!((templates[0].width(), templates[0].scale_factor()), (64, 1.0));
    assert_eq!((templates[1].width(), templates[1].height()), (48, 48));
    assert_eq!(templates[1].scale_factor(), 0.75);
    // 64 * 0.4 rounds to 26 px, so the recorded factor is 26/64, not 0.4.
    assert_eq!(templates[2].width(), 26);
    assert_eq!(templates[2].scale_factor(), 26.0 / 64.0);
    assert!(templates.iter().all(|t| t.features().len() == 16));
}

#[test]
fn scaled_level_is_found_with_its_scale() {
    init_logging();
    let patch = disk_patch(64, 20.0);
    let options = ScalePyramidOptions::new(vec![0.75]);
    let pyramid =
        ScalePyramid::build(&ImageU8::gray(64, 64, &patch), &options).expect("valid exemplar");
    let level = &pyramid.levels()[0];
    let template = TemplateBuilder::new(TemplateParams::default())
        .build_scaled("disk", &level.image.as_view(), None, level.scale)
        .expect("scaled disk trains");

    let (w, h) = (320, 240);
    let mut frame = flat_frame(w, h, BACKGROUND);
    let side = level.image.width();
    embed(&mut frame, w, level.image.data(), side, side, 200, 100);

    let detections = Matcher::new(MatchParams::default())
        .match_templates(&ImageU8::gray(w, h, &frame), &[template])
        .expect("valid frame");
    assert_eq!(detections.len(), 1);
    let det = &detections[0];
    assert_eq!(det.scale, 0.75);
    assert_eq!((det.rect.w, det.rect.h), (48, 48));
    assert!(det.rect.x.abs_diff(200) <= 2 && det.rect.y.abs_diff(100) <= 2);
}
