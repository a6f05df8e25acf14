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
use crate::{AlphaBoxBlur, AnisotropicRadius, BlurError, IntRect, Rect};
use image::{GrayImage, Luma};

/// Builds a blurred shadow mask out of a coverage mask
///
/// The mask is treated as content placed at the origin. It is spread, blurred
/// and returned grown by `spread_radius + blur_radius` on every side, together
/// with the rect the result occupies in the coordinate space of `mask`.
///
/// # Arguments
///
/// * `mask`: Coverage of the shape casting the shadow.
/// * `spread_radius`: Dilation applied before blurring.
/// * `blur_radius`: Triple box blur radius, see [crate::calculate_blur_radius].
///
/// # Errors
///
/// [BlurError::InvalidGeometry] for an empty mask or radiuses overflowing the
/// surface geometry.
pub fn shadow_mask(
    mask: &GrayImage,
    spread_radius: AnisotropicRadius,
    blur_radius: AnisotropicRadius,
) -> Result<(IntRect, GrayImage), BlurError> {
    let blur = AlphaBoxBlur::from_radiuses(
        Rect::new(0., 0., mask.width() as f32, mask.height() as f32),
        spread_radius,
        blur_radius,
        None,
        None,
    )?;
    let surface_rect = blur.surface_rect();
    let size = blur.surface_size();
    let stride = blur.stride() as usize;
    let mut data = vec![0u8; blur.surface_allocation_size()];

    let offset_x = surface_rect.x.unsigned_abs() as usize;
    let offset_y = surface_rect.y.unsigned_abs() as usize;
    let mask_width = mask.width() as usize;
    for (y, src) in mask.as_raw().chunks_exact(mask_width).enumerate() {
        let start = (y + offset_y) * stride + offset_x;
        data[start..start + mask_width].copy_from_slice(src);
    }

    blur.blur(&mut data)?;

    let shadow = GrayImage::from_fn(size.width, size.height, |x, y| {
        Luma([data[y as usize * stride + x as usize]])
    });
    Ok((surface_rect, shadow))
}
