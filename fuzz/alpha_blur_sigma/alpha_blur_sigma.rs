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

use alphablur::{AlphaBoxBlur, Rect};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
pub struct SigmaInput {
    pub width: u8,
    pub height: u8,
    pub stride_padding: u8,
    pub sigma_x: f32,
    pub sigma_y: f32,
    pub value: u8,
}

fuzz_target!(|data: SigmaInput| {
    if data.sigma_x.abs() > 1e5 || data.sigma_y.abs() > 1e5 {
        return;
    }
    let stride = data.width as u32 + data.stride_padding as u32;
    let Ok(blur) = AlphaBoxBlur::from_sigma(
        Rect::new(0., 0., data.width as f32, data.height as f32),
        stride,
        data.sigma_x,
        data.sigma_y,
    ) else {
        return;
    };
    assert_eq!(blur.stride(), stride);
    let mut surface = vec![data.value; blur.surface_allocation_size()];
    blur.blur(&mut surface).unwrap();
    let guard = &surface[surface.len() - 3..];
    assert_eq!(guard, &[data.value; 3]);
});
