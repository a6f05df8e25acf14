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
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Triple box blur approximation of a Gaussian blur over 8-bit alpha surfaces.
//!
//! A Gaussian blur done independently in the horizontal and vertical directions
//! matches the result of blurring along any other rotated set of axes, and three
//! successive box blurs are a very close approximation of a Gaussian.
//!
//! [AlphaBoxBlur] is a service type: it computes the size and placement of the
//! surface needed to blur a rect, the caller creates that surface, rasterizes
//! into it and hands the bytes to [AlphaBoxBlur::blur]. Surface memory is never
//! retained past that call.
//!
//! ```
//! use alphablur::{AlphaBoxBlur, AnisotropicRadius, Rect};
//!
//! let blur = AlphaBoxBlur::from_radiuses(
//!     Rect::new(0., 0., 4., 1.),
//!     AnisotropicRadius::new(0),
//!     AnisotropicRadius::new(2),
//!     None,
//!     None,
//! )
//! .unwrap();
//! let mut data = vec![0u8; blur.surface_allocation_size()];
//! data[8 * 2 + 2..8 * 2 + 6].fill(0xFF);
//! blur.blur(&mut data).unwrap();
//! assert_eq!(&data[16..24], &[6, 27, 55, 77, 77, 55, 27, 6]);
//! ```

mod alpha_box_blur;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod alpha_blur_image;
mod box_filter;
mod geometry;
mod safe_math;
mod spread;
mod surface;
mod util;

pub use alpha_box_blur::AlphaBoxBlur;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use alpha_blur_image::shadow_mask;
pub use geometry::{
    calculate_blur_radius, compute_surface, sigma_to_radius, IntRect, IntSize, Rect,
    SurfaceDescriptor, GAUSSIAN_SCALE_FACTOR,
};
pub use util::{BlurError, GeometryError, MismatchedSize};

use safe_math::SafeAdd;

/// Asymmetric radius container
#[derive(Copy, Clone, Default, PartialOrd, PartialEq, Eq, Hash, Debug)]
pub struct AnisotropicRadius {
    pub x_axis: u32,
    pub y_axis: u32,
}

impl AnisotropicRadius {
    pub fn new(radius: u32) -> AnisotropicRadius {
        AnisotropicRadius {
            x_axis: radius,
            y_axis: radius,
        }
    }

    pub fn create(x: u32, y: u32) -> AnisotropicRadius {
        AnisotropicRadius {
            x_axis: x,
            y_axis: y,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x_axis == 0 && self.y_axis == 0
    }

    pub(crate) fn checked_sum(
        &self,
        other: AnisotropicRadius,
    ) -> Result<AnisotropicRadius, BlurError> {
        Ok(AnisotropicRadius {
            x_axis: self.x_axis.safe_add(other.x_axis)?,
            y_axis: self.y_axis.safe_add(other.y_axis)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anisotropic_radius() {
        assert!(AnisotropicRadius::new(0).is_zero());
        assert!(!AnisotropicRadius::create(0, 1).is_zero());
        assert_eq!(
            AnisotropicRadius::create(1, 2).checked_sum(AnisotropicRadius::create(4, 8)),
            Ok(AnisotropicRadius::create(5, 10))
        );
        assert_eq!(
            AnisotropicRadius::new(u32::MAX).checked_sum(AnisotropicRadius::create(0, 1)),
            Err(BlurError::InvalidGeometry(
                GeometryError::ExceedingPointerSize
            ))
        );
    }
}
