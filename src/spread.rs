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
use crate::surface::{AlphaSurfaceMut, SkipRegion};
use crate::AnisotropicRadius;
use std::collections::VecDeque;
use std::ops::Range;

/// Running maximum over `[i - radius, i + radius]` clipped to the line, for
/// every `i` in `positions`.
///
/// Samples are read at `src[i * step]`, the line is `dst.len()` samples long.
/// The deque holds indices of strictly decreasing values, so every sample
/// enters and leaves it once.
fn sliding_window_max(
    src: &[u8],
    step: usize,
    radius: usize,
    positions: Range<usize>,
    deque: &mut VecDeque<usize>,
    dst: &mut [u8],
) {
    let len = dst.len();
    if len == 0 || positions.is_empty() {
        return;
    }
    deque.clear();
    let mut next = positions.start.saturating_sub(radius);
    for i in positions {
        let window_end = (i + radius).min(len - 1);
        while next <= window_end {
            let value = src[next * step];
            while let Some(&back) = deque.back() {
                if src[back * step] <= value {
                    deque.pop_back();
                } else {
                    break;
                }
            }
            deque.push_back(next);
            next += 1;
        }
        let window_start = i.saturating_sub(radius);
        while let Some(&front) = deque.front() {
            if front < window_start {
                deque.pop_front();
            } else {
                break;
            }
        }
        if let Some(&front) = deque.front() {
            dst[i] = src[front * step];
        }
    }
}

fn spread_horizontal(
    src: &AlphaSurfaceMut,
    dst: &mut [u8],
    radius: u32,
    skip: &SkipRegion,
    deque: &mut VecDeque<usize>,
) {
    let width = src.width as usize;
    let stride = src.row_stride();
    for y in 0..src.height as usize {
        let line = &mut dst[y * stride..y * stride + width];
        for columns in skip.row_segments(y, width) {
            sliding_window_max(src.row(y), 1, radius as usize, columns, deque, line);
        }
    }
}

fn spread_vertical(
    src: &[u8],
    dst: &mut AlphaSurfaceMut,
    radius: u32,
    skip: &SkipRegion,
    deque: &mut VecDeque<usize>,
) {
    let width = dst.width as usize;
    let height = dst.height as usize;
    let stride = dst.row_stride();
    let mut column = vec![0u8; height];
    for x in 0..width {
        for rows in skip.column_segments(x, height) {
            sliding_window_max(
                &src[x..],
                stride,
                radius as usize,
                rows.clone(),
                deque,
                &mut column,
            );
            for y in rows {
                dst.data[y * stride + x] = column[y];
            }
        }
    }
}

/// Dilates the surface in place.
///
/// Every pixel becomes the maximum of the source pixels inside the
/// `(2 * radius + 1)` sided box centered on it, clipped to the surface.
/// Pixels inside `skip` keep their value.
pub(crate) fn spread_alpha(
    surface: &mut AlphaSurfaceMut,
    radius: AnisotropicRadius,
    skip: &SkipRegion,
) {
    if radius.is_zero() || surface.width == 0 || surface.height == 0 {
        return;
    }
    let mut deque = VecDeque::new();
    let mut transient = surface.copy_rows();
    if radius.x_axis > 0 {
        spread_horizontal(surface, &mut transient, radius.x_axis, skip, &mut deque);
    }
    if radius.y_axis > 0 {
        spread_vertical(&transient, surface, radius.y_axis, skip, &mut deque);
    } else {
        let width = surface.width as usize;
        let stride = surface.row_stride();
        for y in 0..surface.height as usize {
            let line = &transient[y * stride..y * stride + width];
            surface.row_mut(y).copy_from_slice(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntRect;

    fn spread_brute_force(
        src: &[u8],
        width: usize,
        height: usize,
        stride: usize,
        radius: AnisotropicRadius,
    ) -> Vec<u8> {
        let mut dst = src.to_vec();
        let rx = radius.x_axis as i64;
        let ry = radius.y_axis as i64;
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let mut value = 0u8;
                for sy in (y - ry).max(0)..=(y + ry).min(height as i64 - 1) {
                    for sx in (x - rx).max(0)..=(x + rx).min(width as i64 - 1) {
                        value = value.max(src[sy as usize * stride + sx as usize]);
                    }
                }
                dst[y as usize * stride + x as usize] = value;
            }
        }
        dst
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| ((i * 7919 + (i / 13) * 31) % 251) as u8)
            .collect()
    }

    #[test]
    fn test_sliding_window_max() {
        let mut deque = VecDeque::new();
        let src = [1u8, 5, 2, 0, 0, 3, 9, 1];
        let mut dst = [0u8; 8];
        sliding_window_max(&src, 1, 1, 0..8, &mut deque, &mut dst);
        assert_eq!(dst, [5, 5, 5, 2, 3, 9, 9, 9]);
        sliding_window_max(&src, 1, 0, 0..8, &mut deque, &mut dst);
        assert_eq!(dst, src);
        sliding_window_max(&src, 1, 100, 0..8, &mut deque, &mut dst);
        assert_eq!(dst, [9; 8]);
        let strided = [4u8, 0, 1, 0, 7, 0];
        let mut column = [0u8; 3];
        sliding_window_max(&strided, 2, 1, 0..3, &mut deque, &mut column);
        assert_eq!(column, [4, 7, 7]);

        let mut span = [0u8; 8];
        sliding_window_max(&src, 1, 1, 3..6, &mut deque, &mut span);
        assert_eq!(span, [0, 0, 0, 2, 3, 9, 0, 0]);
        sliding_window_max(&src, 1, 2, 6..6, &mut deque, &mut span);
        assert_eq!(span, [0, 0, 0, 2, 3, 9, 0, 0]);
    }

    #[test]
    fn test_spread_single_pixel() {
        let (width, height, stride) = (7usize, 5usize, 8usize);
        let mut data = vec![0u8; stride * height + 3];
        data[2 * stride + 3] = 200;
        let mut surface = AlphaSurfaceMut {
            data: &mut data,
            width: width as u32,
            height: height as u32,
            stride: stride as u32,
        };
        spread_alpha(
            &mut surface,
            AnisotropicRadius::create(2, 1),
            &SkipRegion::default(),
        );
        for y in 0..height {
            for x in 0..stride {
                let inside = (1..=3).contains(&y) && (1..=5).contains(&x);
                let expected = if inside { 200 } else { 0 };
                assert_eq!(data[y * stride + x], expected, "at {x}, {y}");
            }
        }
    }

    #[test]
    fn test_spread_matches_brute_force() {
        for (width, height, radius) in [
            (13usize, 9usize, AnisotropicRadius::create(1, 3)),
            (4, 17, AnisotropicRadius::create(5, 0)),
            (21, 3, AnisotropicRadius::create(0, 2)),
            (9, 9, AnisotropicRadius::new(20)),
        ] {
            let stride = width.div_ceil(4) * 4;
            let src = pattern(stride * height + 3);
            let expected = spread_brute_force(&src, width, height, stride, radius);
            let mut data = src.clone();
            let mut surface = AlphaSurfaceMut {
                data: &mut data,
                width: width as u32,
                height: height as u32,
                stride: stride as u32,
            };
            spread_alpha(&mut surface, radius, &SkipRegion::default());
            assert_eq!(data, expected, "{width}x{height} radius {radius:?}");
        }
    }

    #[test]
    fn test_spread_respects_skip() {
        let (width, height, stride) = (8usize, 8usize, 8usize);
        let src = pattern(stride * height + 3);
        let skip = SkipRegion::new(IntRect::new(2, 3, 4, 2));
        let expected = spread_brute_force(&src, width, height, stride, AnisotropicRadius::new(1));
        let mut data = src.clone();
        let mut surface = AlphaSurfaceMut {
            data: &mut data,
            width: width as u32,
            height: height as u32,
            stride: stride as u32,
        };
        spread_alpha(&mut surface, AnisotropicRadius::new(1), &skip);
        for y in 0..height {
            for x in 0..width {
                let index = y * stride + x;
                if (3..5).contains(&y) && (2..6).contains(&x) {
                    assert_eq!(data[index], src[index], "skipped pixel changed at {x}, {y}");
                } else if !(2..6).contains(&y) || !(1..7).contains(&x) {
                    // Neighborhood does not reach into the skipped area.
                    assert_eq!(data[index], expected[index], "at {x}, {y}");
                }
            }
        }
    }

    #[test]
    fn test_spread_skip_matches_masked_spread() {
        for (width, height, radius, rect) in [
            (16usize, 12usize, AnisotropicRadius::create(2, 1), IntRect::new(3, 2, 9, 7)),
            (10, 10, AnisotropicRadius::new(3), IntRect::new(0, 0, 10, 6)),
            (11, 9, AnisotropicRadius::create(0, 2), IntRect::new(4, 0, 5, 9)),
            (9, 14, AnisotropicRadius::create(4, 0), IntRect::new(1, 5, 8, 9)),
        ] {
            let stride = width.div_ceil(4) * 4;
            let skip = SkipRegion::new(rect);
            let skipped = |x: usize, y: usize| skip.covers_row(y) && skip.columns().contains(&x);
            let src = pattern(stride * height + 3);

            // every pass reads the whole line and only leaves skipped pixels as they were
            let horizontal = spread_brute_force(
                &src,
                width,
                height,
                stride,
                AnisotropicRadius::create(radius.x_axis, 0),
            );
            let mut transient = src.clone();
            let mut expected = src.clone();
            for y in 0..height {
                for x in 0..width {
                    if !skipped(x, y) {
                        transient[y * stride + x] = horizontal[y * stride + x];
                    }
                }
            }
            let vertical = spread_brute_force(
                &transient,
                width,
                height,
                stride,
                AnisotropicRadius::create(0, radius.y_axis),
            );
            for y in 0..height {
                for x in 0..width {
                    if !skipped(x, y) {
                        expected[y * stride + x] = vertical[y * stride + x];
                    }
                }
            }

            let mut data = src.clone();
            let mut surface = AlphaSurfaceMut {
                data: &mut data,
                width: width as u32,
                height: height as u32,
                stride: stride as u32,
            };
            spread_alpha(&mut surface, radius, &skip);
            assert_eq!(data, expected, "{width}x{height} radius {radius:?} skip {rect:?}");
        }
    }
}
