use crate::error::{Result, StudioError};
use crate::geometry::{Dimensions, Placement};

/// Scale and centre `content` inside `container` while preserving the
/// content's aspect ratio.
///
/// Portrait content (ratio < 1) fills the container vertically and is
/// centred horizontally; landscape and square content fills horizontally and
/// is centred vertically. Square content deliberately takes the landscape
/// branch, so a square always fills the container's width first.
///
/// The filled axis touches both container edges exactly. The centred axis
/// stays inside the container whenever the content ratio and the container
/// ratio sit on the same side of 1; when they straddle it (a square in a
/// wide container, say) the centred offset goes negative and the surface is
/// expected to clip the overhang, which is what a canvas blit does.
///
/// Returns [`StudioError::InvalidDimensions`] when any axis of either input
/// is non-finite or non-positive; there is no sentinel/NaN result.
pub fn compute_fit(container: Dimensions, content: Dimensions) -> Result<Placement> {
    if !container.is_valid() {
        return Err(StudioError::InvalidDimensions {
            width: container.width,
            height: container.height,
        });
    }
    if !content.is_valid() {
        return Err(StudioError::InvalidDimensions {
            width: content.width,
            height: content.height,
        });
    }

    let ratio = content.aspect_ratio();

    let placement = if ratio < 1.0 {
        let height = container.height;
        let width = container.height * ratio;
        Placement::new((container.width - width) / 2.0, 0.0, width, height)
    } else {
        let width = container.width;
        let height = container.width / ratio;
        Placement::new(0.0, (container.height - height) / 2.0, width, height)
    };

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn fit(cw: f64, ch: f64, iw: f64, ih: f64) -> Placement {
        compute_fit(Dimensions::new(cw, ch), Dimensions::new(iw, ih)).unwrap()
    }

    #[test]
    fn portrait_fills_height_and_centres_width() {
        let placement = fit(400.0, 300.0, 100.0, 200.0);
        assert_eq!(placement.height, 300.0);
        assert_eq!(placement.width, 150.0);
        assert_eq!(placement.y, 0.0);
        assert_eq!(placement.x, 125.0);
    }

    #[test]
    fn landscape_fills_width_and_centres_height() {
        let placement = fit(400.0, 300.0, 200.0, 100.0);
        assert_eq!(placement.width, 400.0);
        assert_eq!(placement.height, 150.0);
        assert_eq!(placement.x, 0.0);
        assert_eq!(placement.y, 75.0);
    }

    #[test]
    fn square_takes_the_landscape_branch() {
        // Square container: the square fills width first and lands exactly.
        let placement = fit(240.0, 240.0, 50.0, 50.0);
        assert_eq!(placement, Placement::new(0.0, 0.0, 240.0, 240.0));

        // Tall container: width-first leaves vertical room to centre in.
        let placement = fit(300.0, 400.0, 50.0, 50.0);
        assert_eq!(placement.width, 300.0);
        assert_eq!(placement.height, 300.0);
        assert_eq!(placement.x, 0.0);
        assert_eq!(placement.y, 50.0);
    }

    #[test]
    fn square_in_a_wide_container_overhangs_for_the_surface_to_clip() {
        let placement = fit(400.0, 300.0, 50.0, 50.0);
        assert_eq!(placement.width, 400.0);
        assert_eq!(placement.height, 400.0);
        assert_eq!(placement.x, 0.0);
        assert_eq!(placement.y, -50.0);
    }

    #[test]
    fn matching_ratios_fill_the_container_exactly() {
        let placement = fit(400.0, 300.0, 400.0, 300.0);
        assert_eq!(placement, Placement::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn placement_preserves_ratio_and_stays_in_bounds() {
        let cases = [
            (400.0, 300.0, 33.0, 777.0),
            (400.0, 300.0, 777.0, 33.0),
            (128.0, 512.0, 100.0, 99.0),
            (1920.0, 1080.0, 3.0, 4.0),
            (1.0, 1.0, 12345.0, 6789.0),
        ];

        for (cw, ch, iw, ih) in cases {
            let placement = fit(cw, ch, iw, ih);
            assert!(
                (placement.width / placement.height - iw / ih).abs() < EPSILON,
                "ratio drifted for {cw}x{ch} vs {iw}x{ih}"
            );
            assert!(placement.x >= 0.0);
            assert!(placement.y >= 0.0);
            assert!(placement.right() <= cw + EPSILON);
            assert!(placement.bottom() <= ch + EPSILON);
        }
    }

    #[test]
    fn filled_axis_touches_both_container_edges() {
        let portrait = fit(400.0, 300.0, 100.0, 200.0);
        assert_eq!(portrait.y, 0.0);
        assert!((portrait.bottom() - 300.0).abs() < EPSILON);

        let landscape = fit(400.0, 300.0, 200.0, 100.0);
        assert_eq!(landscape.x, 0.0);
        assert!((landscape.right() - 400.0).abs() < EPSILON);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let container = Dimensions::new(400.0, 300.0);
        for bad in [
            Dimensions::new(0.0, 100.0),
            Dimensions::new(100.0, 0.0),
            Dimensions::new(-5.0, 100.0),
            Dimensions::new(100.0, f64::NAN),
            Dimensions::new(f64::INFINITY, 100.0),
        ] {
            assert!(matches!(
                compute_fit(container, bad),
                Err(StudioError::InvalidDimensions { .. })
            ));
            assert!(matches!(
                compute_fit(bad, container),
                Err(StudioError::InvalidDimensions { .. })
            ));
        }
    }
}
