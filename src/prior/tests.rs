use super::*;
use crate::types::{GridExtent, ImageExtent};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

fn config(scales: &[u32]) -> PriorBoxConfig {
    PriorBoxConfig {
        scales: scales.to_vec(),
        ..Default::default()
    }
}

#[test]
fn three_scales_give_twentyone_priors_per_cell() {
    let params = PriorBoxParams::from_config(config(&[32, 64, 128])).unwrap();
    assert_eq!(params.priors_per_cell(), 21);

    for scales in [&[16][..], &[32, 64][..], &[8, 16, 32, 64][..]] {
        let params = PriorBoxParams::from_config(config(scales)).unwrap();
        assert_eq!(
            params.priors_per_cell(),
            1,
            "expected a single prior per cell for {} scales",
            scales.len()
        );
    }
}

#[test]
fn empty_scales_are_rejected() {
    let err = PriorBoxParams::from_config(config(&[])).unwrap_err();
    assert_eq!(err, ConfigError::EmptyScales);
}

#[test]
fn zero_scale_is_rejected() {
    let err = PriorBoxParams::from_config(config(&[32, 0, 64])).unwrap_err();
    assert_eq!(err, ConfigError::ZeroScale { index: 1 });
}

#[test]
fn variance_defaults_to_single_value() {
    let params = PriorBoxParams::from_config(config(&[64])).unwrap();
    assert_eq!(params.variance(), &[DEFAULT_VARIANCE]);
}

#[test]
fn variance_count_must_be_one_or_four() {
    let mut cfg = config(&[64]);
    cfg.variance = vec![0.1, 0.2];
    let err = PriorBoxParams::from_config(cfg).unwrap_err();
    assert_eq!(err, ConfigError::InvalidVarianceCount { found: 2 });

    let mut cfg = config(&[64]);
    cfg.variance = vec![0.1, 0.1, 0.2, 0.2];
    assert!(PriorBoxParams::from_config(cfg).is_ok());
}

#[test]
fn non_positive_variance_is_rejected() {
    let mut cfg = config(&[64]);
    cfg.variance = vec![0.1, -0.1, 0.2, 0.2];
    let err = PriorBoxParams::from_config(cfg).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NonPositiveVariance {
            index: 1,
            value: -0.1
        }
    );
}

#[test]
fn zero_stride_divisor_is_rejected() {
    let mut cfg = config(&[64]);
    cfg.stride_policy.rules.push(StrideRule {
        scale: 16,
        divisor: 0,
    });
    let err = PriorBoxParams::from_config(cfg).unwrap_err();
    assert_eq!(err, ConfigError::ZeroStrideDivisor { scale: Some(16) });
}

#[test]
fn default_policy_resolves_one_stride_per_scale() {
    let policy = StridePolicy::default();
    assert_eq!(policy.strides_for(32), (8, None));
    assert_eq!(policy.strides_for(64), (32, None));
    assert_eq!(policy.strides_for(16), (16, None));
    assert_eq!(policy.strides_for(128), (128, None));
}

#[test]
fn duplicate_fallback_only_fires_for_ruled_scales() {
    let policy = StridePolicy::with_duplicate_fallback(&[32, 48]);
    assert_eq!(policy.strides_for(32), (8, Some(32)));
    // 48 has no dedicated rule, so there is nothing to duplicate.
    assert_eq!(policy.strides_for(48), (48, None));
    assert_eq!(policy.strides_for(64), (32, None));
}

#[test]
fn boxes_have_scale_sized_extents() {
    let generator = PriorBoxGenerator::new(config(&[48])).unwrap();
    let image = ImageExtent { w: 240, h: 192 };
    let grid = GridExtent { w: 5, h: 4 };
    let mut buffer = generator.alloc_buffer(grid);
    let written = generator.generate(grid, image, &mut buffer).unwrap();

    assert!(written > 0);
    for chunk in buffer.mean()[..written].chunks_exact(4) {
        assert!(
            approx_eq(chunk[2] - chunk[0], 48.0 / 240.0),
            "box width off: {chunk:?}"
        );
        assert!(
            approx_eq(chunk[3] - chunk[1], 48.0 / 192.0),
            "box height off: {chunk:?}"
        );
    }
}

#[test]
fn border_boxes_are_not_clamped() {
    let generator = PriorBoxGenerator::new(config(&[64])).unwrap();
    let image = ImageExtent { w: 256, h: 256 };
    let grid = GridExtent { w: 8, h: 8 };
    let mut buffer = generator.alloc_buffer(grid);
    generator.generate(grid, image, &mut buffer).unwrap();

    // First center sits at (16, 16); the 64-wide box extends past zero.
    assert!(approx_eq(buffer.mean()[0], -0.0625));
    assert!(approx_eq(buffer.mean()[2], 0.1875));
}

#[test]
fn push_past_capacity_is_rejected() {
    let mut buffer = PriorBuffer::new(8);
    assert!(buffer.push_box([0.0, 0.0, 1.0, 1.0]).is_ok());
    assert!(buffer.push_box([0.0, 0.0, 1.0, 1.0]).is_ok());
    let err = buffer.push_box([0.0, 0.0, 1.0, 1.0]).unwrap_err();
    assert_eq!(
        err,
        CapacityError {
            capacity: 8,
            attempted: 12
        }
    );
    assert_eq!(buffer.written(), 8, "rejected write must not advance");
}

#[test]
fn per_coordinate_variance_covers_emitted_values_only() {
    let mut buffer = PriorBuffer::new(12);
    buffer.push_box([0.0, 0.0, 1.0, 1.0]).unwrap();
    buffer.push_box([0.0, 0.0, 1.0, 1.0]).unwrap();
    buffer.fill_variance_per_coord([0.1, 0.2, 0.3, 0.4]);

    assert_eq!(
        &buffer.variance()[..8],
        &[0.1, 0.2, 0.3, 0.4, 0.1, 0.2, 0.3, 0.4]
    );
    assert_eq!(
        &buffer.variance()[8..],
        &[0.0; 4],
        "slots past the cursor stay untouched"
    );
}

#[test]
fn generation_is_idempotent_on_reused_buffers() {
    let generator = PriorBoxGenerator::new(config(&[32, 64])).unwrap();
    // 32 tiles 16x16 and 64 tiles 4x4 across 128 pixels; 272 cells
    // cover both passes exactly.
    let image = ImageExtent { w: 128, h: 128 };
    let grid = GridExtent { w: 17, h: 16 };

    let mut first = generator.alloc_buffer(grid);
    generator.generate(grid, image, &mut first).unwrap();
    let snapshot_mean = first.mean().to_vec();
    let snapshot_var = first.variance().to_vec();

    generator.generate(grid, image, &mut first).unwrap();
    assert_eq!(first.mean(), &snapshot_mean[..]);
    assert_eq!(first.variance(), &snapshot_var[..]);

    let mut second = generator.alloc_buffer(grid);
    generator.generate(grid, image, &mut second).unwrap();
    assert_eq!(second.mean(), &snapshot_mean[..]);
    assert_eq!(second.variance(), &snapshot_var[..]);
}
