use super::*;

#[test]
fn from_straight_rgba_premultiplies() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 102);
    assert_eq!(c.to_array(), [102, 51, 0, 102]);

    let opaque = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!(opaque.to_array(), [10, 20, 30, 255]);
}

#[test]
fn frame_pixel_bounds_and_rgb_flatten() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 20, 30, 255, 1, 2, 3, 4],
    };
    assert_eq!(frame.pixel(1, 0), Some([1, 2, 3, 4]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 1), None);
    assert_eq!(frame.to_rgb8(), vec![10, 20, 30, 1, 2, 3]);
}
