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
#![no_main]

use alphablur::{AlphaBoxBlur, AnisotropicRadius, Rect};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcRect {
    pub x: i16,
    pub y: i16,
    pub width: u8,
    pub height: u8,
    pub fraction: u8,
}

#[derive(Clone, Debug, Arbitrary)]
pub struct BlurInput {
    pub rect: SrcRect,
    pub spread_x: u8,
    pub spread_y: u8,
    pub blur_x: u8,
    pub blur_y: u8,
    pub dirty: Option<SrcRect>,
    pub skip: Option<SrcRect>,
    pub value: u8,
    pub short_by: u8,
}

impl SrcRect {
    fn to_rect(&self) -> Rect {
        let fraction = self.fraction as f32 / 256.;
        Rect::new(
            self.x as f32 + fraction,
            self.y as f32 - fraction,
            self.width as f32 + fraction,
            self.height as f32,
        )
    }
}

fuzz_target!(|data: BlurInput| {
    let Ok(blur) = AlphaBoxBlur::from_radiuses(
        data.rect.to_rect(),
        AnisotropicRadius::create(data.spread_x as u32, data.spread_y as u32),
        AnisotropicRadius::create(data.blur_x as u32, data.blur_y as u32),
        data.dirty.as_ref().map(|r| r.to_rect()),
        data.skip.as_ref().map(|r| r.to_rect()),
    ) else {
        return;
    };
    let size = blur.surface_size();
    assert!(blur.stride() % 4 == 0);
    assert!(blur.stride() >= size.width);
    if size.is_empty() {
        assert_eq!(blur.surface_allocation_size(), 0);
    } else {
        assert_eq!(
            blur.surface_allocation_size(),
            blur.stride() as usize * size.height as usize + 3
        );
    }

    let allocation = blur.surface_allocation_size();
    let mut surface = vec![data.value; allocation];
    // padding and guard bytes must survive
    let stride = blur.stride() as usize;
    for row in surface.chunks_mut(stride.max(1)) {
        for v in row.iter_mut().skip(size.width as usize) {
            *v = 0xA5;
        }
    }
    let source = surface.clone();
    blur.blur(&mut surface).unwrap();
    for (i, (&after, &before)) in surface.iter().zip(source.iter()).enumerate() {
        if stride == 0 || i % stride >= size.width as usize || i >= stride * size.height as usize {
            assert_eq!(after, before);
        }
    }

    if data.short_by > 0 && allocation > 0 {
        let short = allocation.saturating_sub(data.short_by as usize);
        let mut truncated = source[..short].to_vec();
        assert!(blur.blur(&mut truncated).is_err());
        assert_eq!(truncated, &source[..short]);
    }
});
