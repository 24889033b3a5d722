use std::io::Cursor;

use super::*;

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();
    let buf = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_jpeg_is_opaque() {
    let img = image::RgbImage::from_pixel(8, 4, image::Rgb([40, 80, 120]));
    let buf = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Jpeg);

    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width, decoded.height), (8, 4));
    assert!(decoded.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, PadframeError::Decode(_)), "{err}");
}

#[test]
fn premultiply_zeroes_transparent_color() {
    let mut px = vec![200u8, 100, 50, 0, 200, 100, 50, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 200, 100, 50, 255]);
}

/// Big-endian TIFF block holding a single Orientation (0x0112) entry.
fn exif_orientation(value: u16) -> Vec<u8> {
    let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&value.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());
    tiff
}

#[test]
fn decode_image_applies_exif_rotation() {
    use image::ImageEncoder as _;

    // Left half red, right half blue.
    let img = image::RgbImage::from_fn(4, 2, |x, _| {
        if x < 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    let mut buf = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95);
    encoder.set_exif_metadata(exif_orientation(6)).unwrap();
    encoder.encode_image(&img).unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 4));

    // Rotating 90 degrees clockwise moves the left (red) half to the top.
    let top = &decoded.rgba8_premul[..4];
    let bottom = &decoded.rgba8_premul[(3 * 2) * 4..(3 * 2) * 4 + 4];
    assert!(top[0] > top[2], "top {top:?}");
    assert!(bottom[2] > bottom[0], "bottom {bottom:?}");
}
