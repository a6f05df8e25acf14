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
use crate::safe_math::{SafeAdd, SafeMul};
use crate::{AnisotropicRadius, BlurError, GeometryError};

/// `(3 * sqrt(2π) / 4) * 1.5`, rounded to `f32`.
///
/// Maps a Gaussian standard deviation onto the radius of the whole triple box
/// kernel, see [calculate_blur_radius].
pub const GAUSSIAN_SCALE_FACTOR: f32 = 2.819_956_8;

/// Rectangle in device units, may have sub-pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x_most(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_most(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Smallest pixel aligned rect covering this one.
    pub fn round_out(&self) -> Result<IntRect, BlurError> {
        self.to_pixel_edges(f64::floor, f64::ceil)
    }

    /// Largest pixel aligned rect inside this one, empty if there is none.
    pub fn round_in(&self) -> Result<IntRect, BlurError> {
        self.to_pixel_edges(f64::ceil, f64::floor)
    }

    fn to_pixel_edges(
        &self,
        near: fn(f64) -> f64,
        far: fn(f64) -> f64,
    ) -> Result<IntRect, BlurError> {
        if !self.is_finite() {
            return Err(GeometryError::NonFiniteRect.into());
        }
        let x = self.x as f64;
        let y = self.y as f64;
        IntRect::from_edges(
            to_pixel(near(x))?,
            to_pixel(near(y))?,
            to_pixel(far(x + self.width as f64))?,
            to_pixel(far(y + self.height as f64))?,
        )
    }
}

#[inline]
fn to_pixel(edge: f64) -> Result<i64, BlurError> {
    if edge < i32::MIN as f64 || edge > i32::MAX as f64 {
        return Err(GeometryError::ExceedingPointerSize.into());
    }
    Ok(edge as i64)
}

#[inline]
fn narrow(value: i64) -> Result<i32, BlurError> {
    i32::try_from(value).map_err(|_| GeometryError::ExceedingPointerSize.into())
}

/// Pixel aligned rectangle in device units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> IntRect {
        IntRect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x_most(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn y_most(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn size(&self) -> IntSize {
        IntSize::new(self.width.max(0) as u32, self.height.max(0) as u32)
    }

    pub fn contains_point(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64 && x < self.x_most() && y >= self.y as i64 && y < self.y_most()
    }

    /// Overlap of both rects; an empty result keeps the origin and has zero size.
    pub fn intersect(&self, other: &IntRect) -> IntRect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.x_most().min(other.x_most());
        let bottom = self.y_most().min(other.y_most());
        if right <= left as i64 || bottom <= top as i64 {
            return IntRect::new(left, top, 0, 0);
        }
        // Bounded by the extents of `self`, which already fit.
        IntRect::new(
            left,
            top,
            (right - left as i64) as i32,
            (bottom - top as i64) as i32,
        )
    }

    pub(crate) fn from_edges(
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
    ) -> Result<IntRect, BlurError> {
        Ok(IntRect {
            x: narrow(left)?,
            y: narrow(top)?,
            width: narrow((right - left).max(0))?,
            height: narrow((bottom - top).max(0))?,
        })
    }

    pub(crate) fn inflate(&self, dx: u32, dy: u32) -> Result<IntRect, BlurError> {
        let dx = dx as i64;
        let dy = dy as i64;
        IntRect::from_edges(
            self.x as i64 - dx,
            self.y as i64 - dy,
            self.x_most() + dx,
            self.y_most() + dy,
        )
    }

    pub(crate) fn deflate(&self, dx: u32, dy: u32) -> IntRect {
        let dx = dx as i64;
        let dy = dy as i64;
        if self.width as i64 <= 2 * dx || self.height as i64 <= 2 * dy {
            return IntRect::default();
        }
        IntRect::new(
            (self.x as i64 + dx) as i32,
            (self.y as i64 + dy) as i32,
            (self.width as i64 - 2 * dx) as i32,
            (self.height as i64 - 2 * dy) as i32,
        )
    }

    /// Expresses `self` in the coordinate space whose origin is the top left corner of `origin`.
    /// `self` must lie inside `origin`.
    pub(crate) fn relative_to(&self, origin: &IntRect) -> IntRect {
        IntRect::new(
            (self.x as i64 - origin.x as i64) as i32,
            (self.y as i64 - origin.y as i64) as i32,
            self.width,
            self.height,
        )
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    pub width: u32,
    pub height: u32,
}

impl IntSize {
    pub const fn new(width: u32, height: u32) -> IntSize {
        IntSize { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Layout of the 8-bit alpha surface a blur operates on.
///
/// Rows are `stride` bytes apart, only the first `size.width` bytes of each row
/// carry pixels. `allocation_size` is the minimum buffer length callers must provide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceDescriptor {
    rect: IntRect,
    size: IntSize,
    stride: u32,
    allocation_size: usize,
}

impl SurfaceDescriptor {
    /// Surface covering `rect` with the stride rounded up to the next multiple of 4.
    pub(crate) fn new(rect: IntRect) -> Result<SurfaceDescriptor, BlurError> {
        if rect.is_empty() {
            return Ok(SurfaceDescriptor {
                rect: IntRect::new(rect.x, rect.y, 0, 0),
                ..Default::default()
            });
        }
        let stride = round_up_to_multiple_of_4(rect.size().width)?;
        SurfaceDescriptor::with_stride(rect, stride)
    }

    pub(crate) fn with_stride(rect: IntRect, stride: u32) -> Result<SurfaceDescriptor, BlurError> {
        let size = rect.size();
        // Three trailing guard bytes, row end handling may read a whole 32-bit word.
        let allocation_size = (stride as usize)
            .safe_mul(size.height as usize)?
            .safe_add(3)?;
        Ok(SurfaceDescriptor {
            rect,
            size,
            stride,
            allocation_size,
        })
    }

    /// Device space rect the surface covers.
    pub fn rect(&self) -> IntRect {
        self.rect
    }

    pub fn size(&self) -> IntSize {
        self.size
    }

    /// Bytes per row.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Minimum length of the buffer handed to the blur, zero for an empty surface.
    pub fn allocation_size(&self) -> usize {
        self.allocation_size
    }
}

#[inline]
fn round_up_to_multiple_of_4(value: u32) -> Result<u32, BlurError> {
    Ok(value.safe_add(3)? & !3)
}

/// Validates and rounds out the rect a blur context is built around.
pub(crate) fn content_rect(rect: &Rect) -> Result<IntRect, BlurError> {
    if !rect.is_finite() {
        return Err(GeometryError::NonFiniteRect.into());
    }
    if !(rect.width > 0. && rect.height > 0.) {
        return Err(GeometryError::NonPositiveSize.into());
    }
    rect.round_out()
}

/// Computes the surface needed to hold `rect` once spread and blurred.
///
/// The rect is rounded out to whole pixels and inflated on every side by
/// `spread_radius + blur_radius` of the matching axis.
pub fn compute_surface(
    rect: Rect,
    spread_radius: AnisotropicRadius,
    blur_radius: AnisotropicRadius,
) -> Result<SurfaceDescriptor, BlurError> {
    let content = content_rect(&rect)?;
    let inflation = spread_radius.checked_sum(blur_radius)?;
    SurfaceDescriptor::new(content.inflate(inflation.x_axis, inflation.y_axis)?)
}

/// Converts a standard deviation into a triple box radius using an arbitrary scale.
///
/// Evaluates `floor(sigma * scale + 0.5)` in single precision. Negative and NaN
/// results become 0, huge ones saturate at `u32::MAX`.
pub fn sigma_to_radius(sigma: f32, scale: f32) -> u32 {
    (sigma * scale + 0.5).floor() as u32
}

/// Calculates a blur radius that, used with the triple box blur,
/// approximates a Gaussian blur with the given standard deviations.
///
/// The result is meant to be passed as `blur_radius` to
/// [AlphaBoxBlur::from_radiuses](crate::AlphaBoxBlur::from_radiuses).
pub fn calculate_blur_radius(sigma_x: f32, sigma_y: f32) -> AnisotropicRadius {
    AnisotropicRadius::create(
        sigma_to_radius(sigma_x, GAUSSIAN_SCALE_FACTOR),
        sigma_to_radius(sigma_y, GAUSSIAN_SCALE_FACTOR),
    )
}
