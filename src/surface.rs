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
use crate::geometry::{IntRect, SurfaceDescriptor};
use crate::util::check_surface_size;
use crate::BlurError;
use std::ops::Range;

/// Mutable view over a caller owned 8-bit alpha surface.
///
/// Only the first `width` bytes of each row are pixels, the rest of the stride
/// and the trailing guard bytes are never touched.
#[derive(Debug)]
pub(crate) struct AlphaSurfaceMut<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) stride: u32,
}

impl<'a> AlphaSurfaceMut<'a> {
    /// Borrows `data` laid out as described by `descriptor`.
    pub(crate) fn borrow(
        data: &'a mut [u8],
        descriptor: &SurfaceDescriptor,
    ) -> Result<AlphaSurfaceMut<'a>, BlurError> {
        check_surface_size(data, descriptor.allocation_size())?;
        let size = descriptor.size();
        Ok(AlphaSurfaceMut {
            data,
            width: size.width,
            height: size.height,
            stride: descriptor.stride(),
        })
    }

    #[inline]
    pub(crate) fn row_stride(&self) -> usize {
        self.stride as usize
    }

    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let start = y * self.row_stride();
        &self.data[start..start + self.width as usize]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.row_stride();
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Copy of the pixel rows including stride padding, without the guard bytes.
    pub(crate) fn copy_rows(&self) -> Vec<u8> {
        self.data[..self.row_stride() * self.height as usize].to_vec()
    }
}

/// Surface relative area that is left untouched by every pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SkipRegion {
    rect: IntRect,
}

impl SkipRegion {
    /// `rect` must already be clipped to the surface and expressed relative to it.
    pub(crate) fn new(rect: IntRect) -> SkipRegion {
        if rect.is_empty() {
            return SkipRegion::default();
        }
        SkipRegion { rect }
    }

    pub(crate) fn rect(&self) -> Option<IntRect> {
        if self.rect.is_empty() {
            None
        } else {
            Some(self.rect)
        }
    }

    #[inline]
    pub(crate) fn covers_row(&self, y: usize) -> bool {
        !self.rect.is_empty() && (y as i64) >= self.rect.y as i64 && (y as i64) < self.rect.y_most()
    }

    /// Skipped columns of a row inside the region.
    #[inline]
    pub(crate) fn columns(&self) -> Range<usize> {
        if self.rect.is_empty() {
            return 0..0;
        }
        self.rect.x as usize..self.rect.x_most() as usize
    }

    pub(crate) fn covers_surface(&self, width: u32, height: u32) -> bool {
        !self.rect.is_empty()
            && self.rect.x == 0
            && self.rect.y == 0
            && self.rect.width as i64 == width as i64
            && self.rect.height as i64 == height as i64
    }

    /// Skipped rows of a column inside the region.
    #[inline]
    pub(crate) fn rows(&self) -> Range<usize> {
        if self.rect.is_empty() {
            return 0..0;
        }
        self.rect.y as usize..self.rect.y_most() as usize
    }

    /// Processed spans of row `y`, the second one is empty unless the row
    /// crosses the region.
    #[inline]
    pub(crate) fn row_segments(&self, y: usize, width: usize) -> [Range<usize>; 2] {
        if !self.covers_row(y) {
            return [0..width, width..width];
        }
        let columns = self.columns();
        [0..columns.start, columns.end..width]
    }

    /// Processed spans of column `x`.
    #[inline]
    pub(crate) fn column_segments(&self, x: usize, height: usize) -> [Range<usize>; 2] {
        if !self.columns().contains(&x) {
            return [0..height, height..height];
        }
        let rows = self.rows();
        [0..rows.start, rows.end..height]
    }
}
