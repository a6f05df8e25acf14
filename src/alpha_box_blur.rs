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
use crate::box_filter::{check_box_area, triple_box_blur};
use crate::geometry::{content_rect, IntRect, IntSize, Rect, SurfaceDescriptor};
use crate::spread::spread_alpha;
use crate::surface::{AlphaSurfaceMut, SkipRegion};
use crate::{calculate_blur_radius, AnisotropicRadius, BlurError, GeometryError, MismatchedSize};

/// Blurs 8-bit alpha surfaces with three successive box blurs approximating
/// a Gaussian.
///
/// The value only describes a blur: it computes the placement and layout of
/// the surface the caller has to provide and holds no pixel memory.
/// It is immutable once built and may be shared between threads as long as
/// every [AlphaBoxBlur::blur] call gets its own buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlphaBoxBlur {
    surface: SurfaceDescriptor,
    spread_radius: AnisotropicRadius,
    blur_radius: AnisotropicRadius,
    dirty_rect: Option<Rect>,
    skip: SkipRegion,
}

impl AlphaBoxBlur {
    /// Creates a blur for `rect` with explicit radiuses.
    ///
    /// The surface is `rect` rounded out to whole pixels and inflated on every
    /// side by `spread_radius + blur_radius`.
    ///
    /// # Arguments
    ///
    /// * `rect`: Device space rect the content is drawn into.
    /// * `spread_radius`: Dilation applied before blurring, 0 disables it.
    /// * `blur_radius`: Triple box blur radius, see [calculate_blur_radius].
    /// * `dirty_rect`: Area that actually needs the blur, the surface shrinks
    ///   to what is required to produce it.
    /// * `skip_rect`: Area guaranteed to be covered by something opaque, its
    ///   pixels are left untouched.
    ///
    /// # Errors
    ///
    /// [BlurError::InvalidGeometry] when a rect is not finite, `rect` has no
    /// area, or the surface or box sizes overflow.
    pub fn from_radiuses(
        rect: Rect,
        spread_radius: AnisotropicRadius,
        blur_radius: AnisotropicRadius,
        dirty_rect: Option<Rect>,
        skip_rect: Option<Rect>,
    ) -> Result<AlphaBoxBlur, BlurError> {
        let content = content_rect(&rect)?;
        check_box_area(blur_radius)?;
        let inflation = spread_radius.checked_sum(blur_radius)?;
        let mut surface_rect = content.inflate(inflation.x_axis, inflation.y_axis)?;

        if let Some(dirty) = dirty_rect {
            let visible = dirty.round_out()?.intersect(&surface_rect);
            surface_rect = if visible.is_empty() {
                visible
            } else {
                visible
                    .inflate(inflation.x_axis, inflation.y_axis)?
                    .intersect(&surface_rect)
            };
        }

        let skip = match skip_rect {
            Some(skip) => {
                let inner = skip
                    .round_in()?
                    .deflate(inflation.x_axis, inflation.y_axis)
                    .intersect(&surface_rect);
                if inner.is_empty() {
                    SkipRegion::default()
                } else {
                    SkipRegion::new(inner.relative_to(&surface_rect))
                }
            }
            None => SkipRegion::default(),
        };

        let surface = SurfaceDescriptor::new(surface_rect)?;
        if surface.size().is_empty() {
            log::debug!("dirty rect {dirty_rect:?} misses the blurred area of {rect:?}, nothing to blur");
        }
        let size = surface.size();
        if skip.covers_surface(size.width, size.height) {
            log::debug!("skip rect {skip_rect:?} covers the whole surface {surface_rect:?}");
        }

        Ok(AlphaBoxBlur {
            surface,
            spread_radius,
            blur_radius,
            dirty_rect,
            skip,
        })
    }

    /// Creates a blur of `rect` matching a Gaussian with the given standard deviations.
    ///
    /// The surface covers exactly `rect` rounded out, without inflation, and
    /// rows are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// [BlurError::InvalidGeometry] when `rect` is invalid, a sigma is negative or
    /// not finite, or `stride` is shorter than a row or not a multiple of 4.
    pub fn from_sigma(
        rect: Rect,
        stride: u32,
        sigma_x: f32,
        sigma_y: f32,
    ) -> Result<AlphaBoxBlur, BlurError> {
        for sigma in [sigma_x, sigma_y] {
            if !sigma.is_finite() || sigma < 0. {
                return Err(GeometryError::InvalidSigma.into());
            }
        }
        let content = content_rect(&rect)?;
        let width = content.size().width;
        if stride < width {
            return Err(GeometryError::StrideTooSmall(MismatchedSize {
                expected: width as usize,
                received: stride as usize,
            })
            .into());
        }
        if stride % 4 != 0 {
            return Err(GeometryError::UnalignedStride(stride).into());
        }
        let blur_radius = calculate_blur_radius(sigma_x, sigma_y);
        check_box_area(blur_radius)?;

        Ok(AlphaBoxBlur {
            surface: SurfaceDescriptor::with_stride(content, stride)?,
            spread_radius: AnisotropicRadius::default(),
            blur_radius,
            dirty_rect: None,
            skip: SkipRegion::default(),
        })
    }

    /// Device space rect covered by the surface.
    pub fn surface_rect(&self) -> IntRect {
        self.surface.rect()
    }

    pub fn surface_size(&self) -> IntSize {
        self.surface.size()
    }

    /// Bytes per surface row.
    pub fn stride(&self) -> u32 {
        self.surface.stride()
    }

    /// Minimum length of the buffer passed to [AlphaBoxBlur::blur].
    pub fn surface_allocation_size(&self) -> usize {
        self.surface.allocation_size()
    }

    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.surface
    }

    pub fn spread_radius(&self) -> AnisotropicRadius {
        self.spread_radius
    }

    pub fn blur_radius(&self) -> AnisotropicRadius {
        self.blur_radius
    }

    /// Dirty rect as it was given at construction.
    pub fn dirty_rect(&self) -> Option<Rect> {
        self.dirty_rect
    }

    /// Skipped area relative to the surface origin, `None` when nothing is skipped.
    pub fn skip_rect(&self) -> Option<IntRect> {
        self.skip.rect()
    }

    /// Spreads and blurs `data` in place.
    ///
    /// `data` holds the surface rows as described by [AlphaBoxBlur::descriptor].
    /// Stride padding and the trailing guard bytes are never written.
    ///
    /// # Errors
    ///
    /// [BlurError::BufferTooSmall] when `data` is shorter than
    /// [AlphaBoxBlur::surface_allocation_size], `data` is left unchanged.
    pub fn blur(&self, data: &mut [u8]) -> Result<(), BlurError> {
        let mut surface = AlphaSurfaceMut::borrow(data, &self.surface)?;
        if self.spread_radius.is_zero() && self.blur_radius.is_zero() {
            return Ok(());
        }
        if surface.width == 0
            || surface.height == 0
            || self.skip.covers_surface(surface.width, surface.height)
        {
            return Ok(());
        }
        spread_alpha(&mut surface, self.spread_radius, &self.skip);
        triple_box_blur(&mut surface, self.blur_radius, &self.skip);
        Ok(())
    }
}
