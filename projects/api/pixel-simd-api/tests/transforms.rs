//! The safe wrappers must reject contract violations before any kernel runs
//! and agree with the scalar references on valid inputs.

use pixel_simd_api::{
    add_feature_difference, gray_to_bgra, texture_get_difference_sum, yuv420p_to_bgra, ImageMut,
    ImageRef, PixelFormat, TransformError,
};
use pixel_simd_testing::{compare, fill_random, Tolerance, View};
use rstest::rstest;

fn image_ref(view: &View) -> ImageRef<'_> {
    ImageRef::new(
        view.as_slice(),
        view.width(),
        view.height(),
        view.stride(),
        view.format(),
    )
    .unwrap()
}

fn image_mut(view: &mut View) -> ImageMut<'_> {
    let (width, height, stride, format) = (view.width(), view.height(), view.stride(), view.format());
    ImageMut::new(view.as_mut_slice(), width, height, stride, format).unwrap()
}

#[rstest]
#[case(61, 13)]
#[case(64, 8)]
fn gray_to_bgra_matches_the_scalar_reference(#[case] width: usize, #[case] height: usize) {
    let mut gray = View::new(PixelFormat::Gray8, width, height);
    fill_random(&mut gray, 5);
    let mut expected = View::new(PixelFormat::Bgra32, width, height);
    unsafe {
        pixel_simd::gray_to_bgra::generic::gray_to_bgra(
            gray.as_ptr(),
            width,
            height,
            gray.stride(),
            expected.as_mut_ptr(),
            expected.stride(),
            0xFF,
        );
    }

    let mut actual = View::new(PixelFormat::Bgra32, width, height);
    gray_to_bgra(&image_ref(&gray), &mut image_mut(&mut actual), 0xFF).unwrap();
    assert!(compare(&expected, &actual, &Tolerance::exact()).is_ok());
}

#[test]
fn gray_to_bgra_rejects_mismatched_sizes() {
    let gray = View::new(PixelFormat::Gray8, 20, 10);
    let mut bgra = View::new(PixelFormat::Bgra32, 21, 10);
    let err = gray_to_bgra(&image_ref(&gray), &mut image_mut(&mut bgra), 0xFF).unwrap_err();
    assert!(matches!(err, TransformError::SizeMismatch { .. }));
}

#[test]
fn gray_to_bgra_rejects_wrong_format() {
    let gray = View::new(PixelFormat::Bgr24, 20, 10);
    let mut bgra = View::new(PixelFormat::Bgra32, 20, 10);
    let err = gray_to_bgra(&image_ref(&gray), &mut image_mut(&mut bgra), 0xFF).unwrap_err();
    assert_eq!(
        err,
        TransformError::FormatMismatch {
            expected: PixelFormat::Gray8,
            actual: PixelFormat::Bgr24
        }
    );
}

#[test]
fn yuv420_rejects_odd_sizes_and_bad_chroma_planes() {
    let y = View::new(PixelFormat::Gray8, 21, 10);
    let u = View::new(PixelFormat::Gray8, 10, 5);
    let v = View::new(PixelFormat::Gray8, 10, 5);
    let mut bgra = View::new(PixelFormat::Bgra32, 21, 10);
    let err = yuv420p_to_bgra(
        &image_ref(&y),
        &image_ref(&u),
        &image_ref(&v),
        &mut image_mut(&mut bgra),
        0xFF,
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::InvalidParameter { .. }));

    let y = View::new(PixelFormat::Gray8, 20, 10);
    let undersized = View::new(PixelFormat::Gray8, 9, 5);
    let v = View::new(PixelFormat::Gray8, 10, 5);
    let mut bgra = View::new(PixelFormat::Bgra32, 20, 10);
    let err = yuv420p_to_bgra(
        &image_ref(&y),
        &image_ref(&undersized),
        &image_ref(&v),
        &mut image_mut(&mut bgra),
        0xFF,
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::InvalidPlaneDimensions { .. }));
}

#[test]
fn feature_difference_accumulates_through_the_safe_surface() {
    let width = 37;
    let height = 5;
    let mut value = View::new(PixelFormat::Gray8, width, height);
    let mut lo = View::new(PixelFormat::Gray8, width, height);
    let mut hi = View::new(PixelFormat::Gray8, width, height);
    fill_random(&mut value, 1);
    fill_random(&mut lo, 2);
    fill_random(&mut hi, 3);

    let mut expected = View::new(PixelFormat::Gray8, width, height);
    let mut actual = View::new(PixelFormat::Gray8, width, height);
    for _ in 0..2 {
        unsafe {
            pixel_simd::feature_difference::generic::add_feature_difference(
                value.as_ptr(),
                value.stride(),
                width,
                height,
                lo.as_ptr(),
                lo.stride(),
                hi.as_ptr(),
                hi.stride(),
                0x2000,
                expected.as_mut_ptr(),
                expected.stride(),
            );
        }
        add_feature_difference(
            &image_ref(&value),
            &image_ref(&lo),
            &image_ref(&hi),
            0x2000,
            &mut image_mut(&mut actual),
        )
        .unwrap();
    }
    assert!(compare(&expected, &actual, &Tolerance::exact()).is_ok());
}

#[test]
fn difference_sum_agrees_with_the_scalar_reference() {
    let width = 51;
    let height = 7;
    let mut src = View::new(PixelFormat::Gray8, width, height);
    let mut lo = View::new(PixelFormat::Gray8, width, height);
    let mut hi = View::new(PixelFormat::Gray8, width, height);
    fill_random(&mut src, 7);
    fill_random(&mut lo, 8);
    fill_random(&mut hi, 9);

    let expected = unsafe {
        pixel_simd::texture::generic::texture_get_difference_sum(
            src.as_ptr(),
            src.stride(),
            width,
            height,
            lo.as_ptr(),
            lo.stride(),
            hi.as_ptr(),
            hi.stride(),
        )
    };
    let actual =
        texture_get_difference_sum(&image_ref(&src), &image_ref(&lo), &image_ref(&hi)).unwrap();
    assert_eq!(expected, actual);
}
