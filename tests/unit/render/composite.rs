use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_translucent_black_darkens_white() {
    let dst = [255, 255, 255, 255];
    let src = [0, 0, 0, 102];
    assert_eq!(over(dst, src, 1.0), [153, 153, 153, 255]);
}

#[test]
fn fill_and_clamp() {
    let mut buf = vec![0u8; 8];
    fill(&mut buf, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    assert_eq!(buf, vec![10, 20, 30, 255, 10, 20, 30, 255]);

    let mut overshoot = vec![120u8, 90, 10, 100];
    clamp_premul_in_place(&mut overshoot);
    assert_eq!(overshoot, vec![100, 90, 10, 100]);
}

#[test]
fn blit_over_clips_at_every_edge() {
    let (dw, dh) = (4u32, 4u32);
    let red = [255u8, 0, 0, 255];
    let src = red.repeat(4);

    for &(x, y) in &[(-1i64, -1i64), (3, 3), (-1, 3), (3, -1)] {
        let mut dst = vec![0u8; (dw * dh * 4) as usize];
        blit_over(&mut dst, dw, dh, &src, 2, 2, x, y, 1.0).unwrap();
        let painted = dst.chunks_exact(4).filter(|px| px[3] == 255).count();
        assert_eq!(painted, 1, "offset ({x},{y})");
    }

    let mut dst = vec![0u8; (dw * dh * 4) as usize];
    blit_over(&mut dst, dw, dh, &src, 2, 2, 10, 10, 1.0).unwrap();
    assert!(dst.iter().all(|&v| v == 0));

    blit_over(&mut dst, dw, dh, &src, 2, 2, 1, 1, 1.0).unwrap();
    let idx = ((2 * dw + 2) * 4) as usize;
    assert_eq!(&dst[idx..idx + 4], &red);
    assert_eq!(&dst[0..4], &[0, 0, 0, 0]);
}

#[test]
fn blit_over_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 15];
    assert!(blit_over(&mut dst, 2, 2, &[0u8; 4], 1, 1, 0, 0, 1.0).is_err());
}
