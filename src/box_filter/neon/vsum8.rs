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
use crate::box_filter::box_blur::column_sum_emit;
use std::arch::aarch64::*;

/// High 32 bits of `weight * reciprocal` in every lane.
#[inline(always)]
unsafe fn vmulhiq_u32(weight: uint32x4_t, v_reciprocal: uint32x4_t) -> uint32x4_t {
    unsafe {
        let lo = vmull_u32(vget_low_u32(weight), vget_low_u32(v_reciprocal));
        let hi = vmull_high_u32(weight, v_reciprocal);
        vcombine_u32(vshrn_n_u64::<32>(lo), vshrn_n_u64::<32>(hi))
    }
}

pub(crate) fn neon_column_sum_emit(
    previous: &[u32],
    next: &[u32],
    dst: &mut [u8],
    working_row: &mut [u32],
    reciprocal: u32,
) {
    let v_reciprocal = unsafe { vdupq_n_u32(reciprocal) };

    let chunks = dst.chunks_exact(16).len();

    for (((src_previous, src_next), buffer), dst) in previous
        .chunks_exact(16)
        .zip(next.chunks_exact(16))
        .zip(working_row.chunks_exact_mut(16))
        .zip(dst.chunks_exact_mut(16))
    {
        unsafe {
            let mut weight0 = vld1q_u32(buffer.as_ptr());
            let mut weight1 = vld1q_u32(buffer.get_unchecked(4..).as_ptr());
            let mut weight2 = vld1q_u32(buffer.get_unchecked(8..).as_ptr());
            let mut weight3 = vld1q_u32(buffer.get_unchecked(12..).as_ptr());

            let k0 = vmulhiq_u32(weight0, v_reciprocal);
            let k1 = vmulhiq_u32(weight1, v_reciprocal);
            let k2 = vmulhiq_u32(weight2, v_reciprocal);
            let k3 = vmulhiq_u32(weight3, v_reciprocal);

            let r0 = vcombine_u16(vmovn_u32(k0), vmovn_u32(k1));
            let r1 = vcombine_u16(vmovn_u32(k2), vmovn_u32(k3));

            vst1q_u8(
                dst.as_mut_ptr(),
                vcombine_u8(vqmovn_u16(r0), vqmovn_u16(r1)),
            );

            let previous0 = vld1q_u32(src_previous.as_ptr());
            let previous1 = vld1q_u32(src_previous.get_unchecked(4..).as_ptr());
            let previous2 = vld1q_u32(src_previous.get_unchecked(8..).as_ptr());
            let previous3 = vld1q_u32(src_previous.get_unchecked(12..).as_ptr());

            let next0 = vld1q_u32(src_next.as_ptr());
            let next1 = vld1q_u32(src_next.get_unchecked(4..).as_ptr());
            let next2 = vld1q_u32(src_next.get_unchecked(8..).as_ptr());
            let next3 = vld1q_u32(src_next.get_unchecked(12..).as_ptr());

            weight0 = vaddq_u32(vsubq_u32(weight0, previous0), next0);
            weight1 = vaddq_u32(vsubq_u32(weight1, previous1), next1);
            weight2 = vaddq_u32(vsubq_u32(weight2, previous2), next2);
            weight3 = vaddq_u32(vsubq_u32(weight3, previous3), next3);

            vst1q_u32(buffer.as_mut_ptr(), weight0);
            vst1q_u32(buffer.get_unchecked_mut(4..).as_mut_ptr(), weight1);
            vst1q_u32(buffer.get_unchecked_mut(8..).as_mut_ptr(), weight2);
            vst1q_u32(buffer.get_unchecked_mut(12..).as_mut_ptr(), weight3);
        }
    }

    let tail = chunks * 16;
    if tail < dst.len() {
        column_sum_emit(
            &previous[tail..],
            &next[tail..],
            &mut dst[tail..],
            &mut working_row[tail..],
            reciprocal,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_matches_scalar() {
        for (width, area) in [(16usize, 9u32), (37, 2), (64, 1001), (5, 16_843_009)] {
            let reciprocal = ((1u64 << 32) / area as u64) as u32;
            let previous = (0..width as u32).map(|x| (x * 13) % 256).collect::<Vec<_>>();
            let next = (0..width as u32).map(|x| (x * 101) % 256).collect::<Vec<_>>();
            let working = (0..width as u32)
                .map(|x| previous[x as usize] + (x * 48271) % (255 * (area - 1)))
                .collect::<Vec<_>>();

            let mut expected_row = working.clone();
            let mut expected = vec![0u8; width];
            column_sum_emit(&previous, &next, &mut expected, &mut expected_row, reciprocal);

            let mut row = working;
            let mut dst = vec![0u8; width];
            neon_column_sum_emit(&previous, &next, &mut dst, &mut row, reciprocal);

            assert_eq!(dst, expected, "width {width}, area {area}");
            assert_eq!(row, expected_row, "width {width}, area {area}");
        }
    }
}
