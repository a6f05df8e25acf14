/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::safe_math::SafeMul;
use crate::surface::{AlphaSurfaceMut, SkipRegion};
use crate::{AnisotropicRadius, BlurError, GeometryError};
use num_traits::{AsPrimitive, PrimInt};
use std::ops::Range;

/// Extent of one box on each side of the target pixel along a single axis.
///
/// `leading` goes towards the smaller coordinate (left or top), `trailing`
/// towards the larger one (right or bottom).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BoxLobe {
    pub(crate) leading: u32,
    pub(crate) trailing: u32,
}

impl BoxLobe {
    const fn new(leading: u32, trailing: u32) -> BoxLobe {
        BoxLobe { leading, trailing }
    }

    #[inline]
    pub(crate) fn size(&self) -> u64 {
        self.leading as u64 + self.trailing as u64 + 1
    }
}

/// Splits a blur radius into the three boxes applied along one axis.
///
/// The first two boxes are off center by one pixel in opposite directions
/// when the radius is not divisible by three, so the overall kernel stays
/// centered and spans exactly `2 * radius + 1` pixels.
pub(crate) fn compute_lobes(radius: u32) -> [BoxLobe; 3] {
    let z = radius / 3;
    let (major, minor, last) = match radius % 3 {
        0 => (z, z, z),
        1 => (z + 1, z, z),
        _ => (z + 1, z, z + 1),
    };
    [
        BoxLobe::new(major, minor),
        BoxLobe::new(minor, major),
        BoxLobe::new(last, last),
    ]
}

/// Largest number of pixels any of the three two dimensional boxes averages.
pub(crate) fn max_box_area(radius: AnisotropicRadius) -> u64 {
    let horizontal = compute_lobes(radius.x_axis);
    let vertical = compute_lobes(radius.y_axis);
    horizontal
        .iter()
        .zip(vertical.iter())
        .map(|(h, v)| h.size() * v.size())
        .max()
        .unwrap_or(1)
}

/// Rejects radiuses whose box areas cannot be divided with a 32-bit reciprocal.
pub(crate) fn check_box_area(radius: AnisotropicRadius) -> Result<u64, BlurError> {
    let area = max_box_area(radius);
    if area > 1u64 << 32 {
        return Err(BlurError::InvalidGeometry(
            GeometryError::ExceedingPointerSize,
        ));
    }
    Ok(area)
}

/// Sums of a row of u8 fit in u32 as long as every weighted sum stays below
/// `u32::MAX`, otherwise accumulate in u64.
fn fits_u32_accumulator(max_area: u64) -> bool {
    max_area
        .safe_mul(255)
        .is_ok_and(|x| x <= u32::MAX as u64)
}

/// Moving sums of `src` over `[x - lobe.leading, x + lobe.trailing]` for
/// every `x` in `columns`, pixels outside the row replicate the nearest edge.
fn horizontal_sums<J>(src: &[u8], lobe: BoxLobe, columns: Range<usize>, dst: &mut [J])
where
    J: PrimInt + 'static,
    u8: AsPrimitive<J>,
    u64: AsPrimitive<J>,
{
    let width = src.len();
    if width == 0 || columns.is_empty() {
        return;
    }
    let left = lobe.leading as usize;
    let right = lobe.trailing as usize;
    let last = width - 1;
    let (start, end) = (columns.start, columns.end);

    // replicate edge
    let first_inside = start.saturating_sub(left);
    let last_inside = (start + right).min(last);
    let left_count: J = ((left - (start - first_inside)) as u64).as_();
    let right_count: J = ((start + right - last_inside) as u64).as_();
    let first: J = src[0].as_();
    let edge: J = src[last].as_();
    let mut weight = first * left_count + edge * right_count;
    for &v in src[first_inside..=last_inside].iter() {
        let v: J = v.as_();
        weight = weight + v;
    }

    let fast_start = left.max(start).min(end);
    let fast_end = width.saturating_sub(right + 1).min(end).max(fast_start);

    for x in start..fast_start {
        dst[x] = weight;
        let previous: J = src[x.saturating_sub(left)].as_();
        let next: J = src[(x + right + 1).min(last)].as_();
        weight = weight - previous + next;
    }

    if fast_end > fast_start {
        let previous_part = &src[fast_start - left..];
        let next_part = &src[fast_start + right + 1..];
        for ((dst, &src_previous), &src_next) in dst[fast_start..fast_end]
            .iter_mut()
            .zip(previous_part.iter())
            .zip(next_part.iter())
        {
            *dst = weight;
            let previous: J = src_previous.as_();
            let next: J = src_next.as_();
            weight = weight - previous + next;
        }
    }

    for x in fast_end..end {
        dst[x] = weight;
        let previous: J = src[x.saturating_sub(left)].as_();
        let next: J = src[(x + right + 1).min(last)].as_();
        weight = weight - previous + next;
    }
}

/// Column sums of `sums` over `[y - lobe.leading, y + lobe.trailing]` for
/// every `x` in `columns`, rows outside the surface replicate the nearest edge.
fn column_window<J>(
    sums: &[J],
    width: usize,
    y: usize,
    lobe: BoxLobe,
    columns: Range<usize>,
    working_row: &mut [J],
) where
    J: PrimInt + 'static,
    u64: AsPrimitive<J>,
{
    let height = sums.len() / width;
    let last = height - 1;
    let top = lobe.leading as usize;
    let bottom = lobe.trailing as usize;
    let first_row = y.saturating_sub(top);
    let last_row = (y + bottom).min(last);
    let above = top - (y - first_row);
    let below = y + bottom - last_row;
    let above_count: J = (above as u64).as_();
    let below_count: J = (below as u64).as_();
    for x in columns {
        let mut acc = J::zero();
        if above > 0 {
            acc = sums[x] * above_count;
        }
        if below > 0 {
            acc = acc + sums[last * width + x] * below_count;
        }
        for row in first_row..=last_row {
            acc = acc + sums[row * width + x];
        }
        working_row[x] = acc;
    }
}

/// Writes `working_row * reciprocal >> 32` into `dst`, then slides the column
/// window down by one row, dropping `previous` and taking `next`.
pub(crate) fn column_sum_emit<J>(
    previous: &[J],
    next: &[J],
    dst: &mut [u8],
    working_row: &mut [J],
    reciprocal: u32,
) where
    J: PrimInt + AsPrimitive<u64>,
{
    let reciprocal = reciprocal as u64;
    for (((&src_previous, &src_next), buffer), dst) in previous
        .iter()
        .zip(next.iter())
        .zip(working_row.iter_mut())
        .zip(dst.iter_mut())
    {
        let weight = *buffer;
        let wide: u64 = weight.as_();
        *dst = ((wide * reciprocal) >> 32) as u8;
        *buffer = weight - src_previous + src_next;
    }
}

trait ColumnSumHandler<J> {
    #[allow(clippy::type_complexity)]
    fn column_sum_handler(
    ) -> fn(previous: &[J], next: &[J], dst: &mut [u8], working_row: &mut [J], reciprocal: u32);
}

impl ColumnSumHandler<u32> for () {
    fn column_sum_handler() -> fn(&[u32], &[u32], &mut [u8], &mut [u32], u32) {
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            use crate::box_filter::neon::neon_column_sum_emit;
            neon_column_sum_emit
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                use crate::box_filter::avx::avx_column_sum_emit;
                return avx_column_sum_emit;
            }
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if std::arch::is_x86_feature_detected!("sse4.1") {
                use crate::box_filter::sse::sse_column_sum_emit;
                return sse_column_sum_emit;
            }
        }
        #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
        column_sum_emit
    }
}

impl ColumnSumHandler<u64> for () {
    fn column_sum_handler() -> fn(&[u64], &[u64], &mut [u8], &mut [u64], u32) {
        column_sum_emit
    }
}

/// One two dimensional box average applied in place.
///
/// Row sums are taken where the column window reads them, then the column
/// window slides over them and every pixel outside `skip` receives the average.
/// Columns under `skip` stop sliding while their rows are skipped and restart
/// from a fresh window below it.
fn box_pass<J>(
    surface: &mut AlphaSurfaceMut,
    horizontal: BoxLobe,
    vertical: BoxLobe,
    skip: &SkipRegion,
    sums: &mut [J],
    working_row: &mut [J],
) where
    J: PrimInt + AsPrimitive<u64> + 'static,
    u8: AsPrimitive<J>,
    u64: AsPrimitive<J>,
    (): ColumnSumHandler<J>,
{
    let area = horizontal.size() * vertical.size();
    if area == 1 {
        return;
    }
    let width = surface.width as usize;
    let height = surface.height as usize;
    let reciprocal = ((1u64 << 32) / area) as u32;
    let top = vertical.leading as usize;
    let bottom = vertical.trailing as usize;
    let last = height - 1;

    let skipped_rows = skip.rows();
    let skipped_columns = skip.columns();
    // rows no column under `skip` reads
    let interior = (skipped_rows.start + bottom + 1)..skipped_rows.end.saturating_sub(top);

    for (y, row_sums) in sums.chunks_exact_mut(width).enumerate() {
        let src = surface.row(y);
        if interior.contains(&y) {
            for columns in skip.row_segments(y, width) {
                horizontal_sums(src, horizontal, columns, row_sums);
            }
        } else {
            horizontal_sums(src, horizontal, 0..width, row_sums);
        }
    }

    let sums: &[J] = sums;
    let sum_row = |y: usize| &sums[y * width..(y + 1) * width];

    column_window(sums, width, 0, vertical, 0..width, working_row);

    let handler = <() as ColumnSumHandler<J>>::column_sum_handler();

    for y in 0..height {
        if y == skipped_rows.end && y > 0 && !skipped_columns.is_empty() {
            column_window(
                sums,
                width,
                y,
                vertical,
                skipped_columns.clone(),
                working_row,
            );
        }
        let previous = sum_row(y.saturating_sub(top));
        let next = sum_row((y + bottom + 1).min(last));
        let dst = surface.row_mut(y);
        for columns in skip.row_segments(y, width) {
            if columns.is_empty() {
                continue;
            }
            handler(
                &previous[columns.clone()],
                &next[columns.clone()],
                &mut dst[columns.clone()],
                &mut working_row[columns],
                reciprocal,
            );
        }
    }
}

fn triple_box_blur_impl<J>(
    surface: &mut AlphaSurfaceMut,
    radius: AnisotropicRadius,
    skip: &SkipRegion,
) where
    J: PrimInt + AsPrimitive<u64> + 'static,
    u8: AsPrimitive<J>,
    u64: AsPrimitive<J>,
    (): ColumnSumHandler<J>,
{
    let width = surface.width as usize;
    let height = surface.height as usize;
    let mut sums = vec![J::zero(); width * height];
    let mut working_row = vec![J::zero(); width];

    let horizontal = compute_lobes(radius.x_axis);
    let vertical = compute_lobes(radius.y_axis);

    for (h, v) in horizontal.iter().zip(vertical.iter()) {
        box_pass(surface, *h, *v, skip, &mut sums, &mut working_row);
    }
}

/// Three successive box averages approximating a Gaussian blur with `radius`.
///
/// Pixels inside `skip` are neither read as blurred nor written, they keep
/// their value and still contribute to their neighbours.
/// `radius` must have passed [check_box_area].
pub(crate) fn triple_box_blur(
    surface: &mut AlphaSurfaceMut,
    radius: AnisotropicRadius,
    skip: &SkipRegion,
) {
    if radius.is_zero() || surface.width == 0 || surface.height == 0 {
        return;
    }
    let max_area = max_box_area(radius);
    if fits_u32_accumulator(max_area) {
        log::trace!("triple box blur {radius:?} with 32-bit accumulators, box area {max_area}");
        triple_box_blur_impl::<u32>(surface, radius, skip);
    } else {
        log::trace!("triple box blur {radius:?} with 64-bit accumulators, box area {max_area}");
        triple_box_blur_impl::<u64>(surface, radius, skip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntRect;

    fn surface_from(
        data: &mut [u8],
        width: u32,
        height: u32,
        stride: u32,
    ) -> AlphaSurfaceMut<'_> {
        AlphaSurfaceMut {
            data,
            width,
            height,
            stride,
        }
    }

    fn impulse() -> Vec<u8> {
        let mut data = vec![0u8; 8 * 5 + 3];
        data[18..22].fill(0xFF);
        data
    }

    const IMPULSE_BLURRED: [u8; 40] = [
        1, 6, 13, 19, 19, 13, 6, 1, //
        5, 20, 41, 57, 57, 41, 20, 5, //
        6, 27, 55, 77, 77, 55, 27, 6, //
        5, 20, 41, 57, 57, 41, 20, 5, //
        1, 6, 13, 19, 19, 13, 6, 1,
    ];

    /// Direct evaluation of every box average, clamping coordinates to the surface.
    fn box_blur_brute_force(
        data: &mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        radius: AnisotropicRadius,
        skip: &SkipRegion,
    ) {
        let clamp = |v: i64, len: usize| v.clamp(0, len as i64 - 1) as usize;
        for (h, v) in compute_lobes(radius.x_axis)
            .iter()
            .zip(compute_lobes(radius.y_axis).iter())
        {
            let area = h.size() * v.size();
            if area == 1 {
                continue;
            }
            let reciprocal = (1u64 << 32) / area;
            let source = data.to_vec();
            for y in 0..height {
                for x in 0..width {
                    if skip.covers_row(y) && skip.columns().contains(&x) {
                        continue;
                    }
                    let mut sum = 0u64;
                    for sy in y as i64 - v.leading as i64..=y as i64 + v.trailing as i64 {
                        for sx in x as i64 - h.leading as i64..=x as i64 + h.trailing as i64 {
                            sum += source[clamp(sy, height) * stride + clamp(sx, width)] as u64;
                        }
                    }
                    data[y * stride + x] = ((sum * reciprocal) >> 32) as u8;
                }
            }
        }
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| ((i * 2654435761usize) >> 7) as u8)
            .collect()
    }

    #[test]
    fn test_compute_lobes() {
        let lobes = |r| compute_lobes(r).map(|l| (l.leading, l.trailing));
        assert_eq!(lobes(0), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(lobes(1), [(1, 0), (0, 1), (0, 0)]);
        assert_eq!(lobes(2), [(1, 0), (0, 1), (1, 1)]);
        assert_eq!(lobes(3), [(1, 1), (1, 1), (1, 1)]);
        assert_eq!(lobes(4), [(2, 1), (1, 2), (1, 1)]);
        assert_eq!(lobes(8), [(3, 2), (2, 3), (3, 3)]);
        for radius in 0..200u32 {
            let lobes = compute_lobes(radius);
            let extent: u32 = lobes.iter().map(|l| l.leading + l.trailing).sum();
            assert_eq!(extent, 2 * radius);
            let leading: u32 = lobes.iter().map(|l| l.leading).sum();
            assert_eq!(leading, radius);
        }
    }

    #[test]
    fn test_box_area_limits() {
        assert_eq!(max_box_area(AnisotropicRadius::new(0)), 1);
        assert_eq!(max_box_area(AnisotropicRadius::new(2)), 9);
        assert_eq!(max_box_area(AnisotropicRadius::create(4, 0)), 4);
        assert!(fits_u32_accumulator(16_843_009));
        assert!(!fits_u32_accumulator(16_843_010));
        assert!(check_box_area(AnisotropicRadius::new(90_000)).is_ok());
        assert_eq!(
            check_box_area(AnisotropicRadius::new(300_000)),
            Err(BlurError::InvalidGeometry(
                GeometryError::ExceedingPointerSize
            ))
        );
    }

    #[test]
    fn test_horizontal_sums_replicate_edges() {
        let src = [10u8, 20, 30, 40];
        let mut dst = [0u32; 4];
        horizontal_sums(&src, BoxLobe::new(1, 1), 0..4, &mut dst);
        assert_eq!(dst, [40, 60, 90, 110]);
        horizontal_sums(&src, BoxLobe::new(2, 0), 0..4, &mut dst);
        assert_eq!(dst, [30, 40, 60, 90]);
        horizontal_sums(&src, BoxLobe::new(0, 6), 0..4, &mut dst);
        assert_eq!(dst, [220, 250, 270, 280]);
        let mut single = [0u64; 1];
        horizontal_sums(&[7u8], BoxLobe::new(3, 5), 0..1, &mut single);
        assert_eq!(single, [63]);
    }

    #[test]
    fn test_horizontal_sums_of_a_span() {
        let src = pattern(29);
        for lobe in [
            BoxLobe::new(1, 1),
            BoxLobe::new(4, 2),
            BoxLobe::new(0, 9),
            BoxLobe::new(31, 30),
        ] {
            let mut full = vec![0u32; src.len()];
            horizontal_sums(&src, lobe, 0..src.len(), &mut full);
            for columns in [0..5, 3..17, 11..29, 28..29, 7..7] {
                let mut dst = vec![u32::MAX; src.len()];
                horizontal_sums(&src, lobe, columns.clone(), &mut dst);
                for (x, (&sum, &expected)) in dst.iter().zip(full.iter()).enumerate() {
                    if columns.contains(&x) {
                        assert_eq!(sum, expected, "{lobe:?} {columns:?} at {x}");
                    } else {
                        assert_eq!(sum, u32::MAX, "{lobe:?} {columns:?} at {x}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_impulse() {
        let mut data = impulse();
        let mut surface = surface_from(&mut data, 8, 5, 8);
        triple_box_blur(&mut surface, AnisotropicRadius::new(2), &SkipRegion::default());
        assert_eq!(&data[..40], &IMPULSE_BLURRED);
        assert_eq!(&data[40..], &[0, 0, 0]);
    }

    #[test]
    fn test_flat_surface_truncates() {
        let (width, height, stride) = (7usize, 4usize, 8usize);
        let mut data = vec![0u8; stride * height + 3];
        for row in data.chunks_exact_mut(stride).take(height) {
            row[..width].fill(0xFF);
        }
        let mut surface = surface_from(&mut data, width as u32, height as u32, stride as u32);
        triple_box_blur(&mut surface, AnisotropicRadius::new(2), &SkipRegion::default());
        for row in data.chunks_exact(stride).take(height) {
            assert_eq!(&row[..width], &[254; 7]);
            assert_eq!(row[width], 0);
        }
        assert_eq!(&data[stride * height..], &[0, 0, 0]);
    }

    #[test]
    fn test_skip_region_is_preserved() {
        let mut data = impulse();
        let skip = SkipRegion::new(IntRect::new(2, 1, 3, 2));
        let mut surface = surface_from(&mut data, 8, 5, 8);
        triple_box_blur(&mut surface, AnisotropicRadius::new(2), &skip);
        assert_eq!(
            &data[..40],
            &[
                6, 6, 6, 0, 5, 6, 6, 1, //
                15, 44, 0, 0, 0, 49, 20, 5, //
                17, 50, 255, 255, 255, 63, 27, 6, //
                10, 43, 79, 104, 86, 56, 20, 5, //
                1, 6, 13, 19, 19, 13, 6, 1,
            ]
        );
    }

    #[test]
    fn test_matches_brute_force() {
        for (width, height, radius, skip) in [
            (13usize, 11usize, AnisotropicRadius::new(4), SkipRegion::default()),
            (40, 6, AnisotropicRadius::create(7, 1), SkipRegion::default()),
            (5, 23, AnisotropicRadius::create(0, 5), SkipRegion::new(IntRect::new(1, 4, 2, 9))),
            (3, 3, AnisotropicRadius::new(25), SkipRegion::default()),
            (37, 19, AnisotropicRadius::create(11, 6), SkipRegion::new(IntRect::new(9, 5, 20, 7))),
            (30, 26, AnisotropicRadius::create(3, 2), SkipRegion::new(IntRect::new(0, 0, 30, 20))),
            (26, 30, AnisotropicRadius::new(5), SkipRegion::new(IntRect::new(3, 8, 20, 22))),
            (21, 21, AnisotropicRadius::new(1), SkipRegion::new(IntRect::new(1, 1, 19, 19))),
            (18, 40, AnisotropicRadius::create(2, 8), SkipRegion::new(IntRect::new(4, 0, 10, 40))),
        ] {
            let stride = width.div_ceil(4) * 4;
            let mut expected = pattern(stride * height + 3);
            let mut data = expected.clone();
            box_blur_brute_force(&mut expected, width, height, stride, radius, &skip);
            let mut surface = surface_from(&mut data, width as u32, height as u32, stride as u32);
            triple_box_blur(&mut surface, radius, &skip);
            assert_eq!(data, expected, "{width}x{height} radius {radius:?}");
        }
    }

    #[test]
    fn test_skip_interior_is_not_summed() {
        let (width, height, stride) = (24usize, 20usize, 24usize);
        let skip = SkipRegion::new(IntRect::new(4, 3, 15, 14));
        let (horizontal, vertical) = (BoxLobe::new(2, 1), BoxLobe::new(1, 2));
        let source = pattern(stride * height + 3);
        let mut working_row = vec![0u32; width];

        let mut full = source.clone();
        let mut sums = vec![0u32; width * height];
        box_pass(
            &mut surface_from(&mut full, width as u32, height as u32, stride as u32),
            horizontal,
            vertical,
            &SkipRegion::default(),
            &mut sums,
            &mut working_row,
        );

        let mut data = source.clone();
        let mut sums = vec![u32::MAX; width * height];
        box_pass(
            &mut surface_from(&mut data, width as u32, height as u32, stride as u32),
            horizontal,
            vertical,
            &skip,
            &mut sums,
            &mut working_row,
        );

        for y in 0..height {
            for x in 0..width {
                let i = y * stride + x;
                if skip.covers_row(y) && skip.columns().contains(&x) {
                    assert_eq!(data[i], source[i], "({x}, {y})");
                } else {
                    assert_eq!(data[i], full[i], "({x}, {y})");
                }
            }
        }
        // skipped rows 3..17 minus what the columns below and above reach
        for y in 6..16 {
            for x in 4..19 {
                assert_eq!(sums[y * width + x], u32::MAX, "({x}, {y})");
            }
        }
        assert_ne!(sums[5 * width + 4], u32::MAX);
        assert_ne!(sums[16 * width + 18], u32::MAX);
    }

    #[test]
    fn test_accumulators_agree() {
        let (width, height, stride) = (29usize, 17usize, 32usize);
        let radius = AnisotropicRadius::create(9, 14);
        let source = pattern(stride * height + 3);
        let mut narrow = source.clone();
        let mut wide = source.clone();
        triple_box_blur_impl::<u32>(
            &mut surface_from(&mut narrow, width as u32, height as u32, stride as u32),
            radius,
            &SkipRegion::default(),
        );
        triple_box_blur_impl::<u64>(
            &mut surface_from(&mut wide, width as u32, height as u32, stride as u32),
            radius,
            &SkipRegion::default(),
        );
        assert_eq!(narrow, wide);
        assert_ne!(narrow, source);
    }

    #[test]
    fn test_wide_accumulator_on_huge_radius() {
        let (width, height, stride) = (6usize, 3usize, 8usize);
        let radius = AnisotropicRadius::new(12_000);
        assert!(!fits_u32_accumulator(max_box_area(radius)));
        let mut data = vec![0u8; stride * height + 3];
        for row in data.chunks_exact_mut(stride).take(height) {
            row[..width].fill(200);
        }
        let mut surface = surface_from(&mut data, width as u32, height as u32, stride as u32);
        triple_box_blur(&mut surface, radius, &SkipRegion::default());
        for row in data.chunks_exact(stride).take(height) {
            // every pass truncates once
            assert_eq!(&row[..width], &[197; 6]);
            assert_eq!(&row[width..], &[0, 0]);
        }
    }

    #[test]
    fn test_column_handler_matches_scalar() {
        let handler = <() as ColumnSumHandler<u32>>::column_sum_handler();
        for width in [0usize, 1, 7, 15, 16, 17, 31, 32, 33, 64, 79] {
            let area = 35u64;
            let reciprocal = ((1u64 << 32) / area) as u32;
            let previous = (0..width).map(|x| (x as u32 * 37) % 256).collect::<Vec<_>>();
            let next = (0..width).map(|x| (x as u32 * 91) % 256).collect::<Vec<_>>();
            let working = (0..width)
                .map(|x| previous[x] + ((x as u32 * 7919) % (255 * area as u32 - 255)))
                .collect::<Vec<_>>();

            let mut scalar_row = working.clone();
            let mut scalar_dst = vec![0u8; width];
            column_sum_emit(&previous, &next, &mut scalar_dst, &mut scalar_row, reciprocal);

            let mut row = working.clone();
            let mut dst = vec![0u8; width];
            handler(&previous, &next, &mut dst, &mut row, reciprocal);

            assert_eq!(dst, scalar_dst, "width {width}");
            assert_eq!(row, scalar_row, "width {width}");
        }
    }
}
