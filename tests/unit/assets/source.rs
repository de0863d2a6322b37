use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ImageSource {
    let data = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    ImageSource::from_rgba8(width, height, data).unwrap()
}

#[test]
fn from_rgba8_validates_length() {
    assert!(ImageSource::from_rgba8(2, 1, vec![0; 7]).is_err());
    assert!(ImageSource::from_rgba8(2, 1, vec![0; 8]).is_ok());
}

#[test]
fn raster_pads_with_transparent_pixels() {
    let src = solid(1, 1, [10, 20, 30, 255]);
    let out = FitMode::Raster
        .sample(
            &src,
            Canvas {
                width: 2,
                height: 2,
            },
        )
        .unwrap();

    assert_eq!(out.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(out.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(0, 1), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn raster_keeps_row_layout_of_wider_targets() {
    let data = vec![
        1, 1, 1, 1, 2, 2, 2, 2, //
        3, 3, 3, 3, 4, 4, 4, 4,
    ];
    let src = ImageSource::from_rgba8(2, 2, data).unwrap();
    let out = FitMode::Raster
        .sample(
            &src,
            Canvas {
                width: 3,
                height: 2,
            },
        )
        .unwrap();

    assert_eq!(out.pixel(0, 1), Some([3, 3, 3, 3]));
    assert_eq!(out.pixel(1, 1), Some([4, 4, 4, 4]));
    assert_eq!(out.pixel(2, 1), Some([0, 0, 0, 0]));
}

#[test]
fn stretch_fills_the_whole_target() {
    let src = solid(1, 1, [200, 100, 50, 255]);
    let out = FitMode::Stretch
        .sample(
            &src,
            Canvas {
                width: 3,
                height: 2,
            },
        )
        .unwrap();

    assert_eq!(out.canvas(), Canvas { width: 3, height: 2 });
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(out.pixel(x, y), Some([200, 100, 50, 255]));
        }
    }
}

#[test]
fn stretch_same_size_is_a_copy() {
    let data: Vec<u8> = (0..16).collect();
    let src = ImageSource::from_rgba8(2, 2, data.clone()).unwrap();
    let out = FitMode::Stretch.sample(&src, src.canvas()).unwrap();
    assert_eq!(out.data(), data.as_slice());
}

#[test]
fn empty_target_is_rejected() {
    let src = solid(1, 1, [0, 0, 0, 255]);
    assert!(
        FitMode::Raster
            .sample(
                &src,
                Canvas {
                    width: 0,
                    height: 1
                }
            )
            .is_err()
    );
}

#[test]
fn mismatched_source_bytes_are_rejected_by_every_fit() {
    let src = ImageSource {
        width: 4,
        height: 4,
        rgba8: Arc::new(vec![0; 8]),
    };
    assert!(src.validate().is_err());
    for fit in [FitMode::Raster, FitMode::Stretch] {
        assert!(matches!(
            fit.sample(
                &src,
                Canvas {
                    width: 4,
                    height: 4
                }
            ),
            Err(XfadeError::Validation(_))
        ));
    }
}
